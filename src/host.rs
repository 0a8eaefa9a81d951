//! Game host
//!
//! Owns whichever engine is active, routes keys to it, converts frame
//! deltas into fixed snake ticks or clamped runner steps, and forwards
//! engine events to the [`EventBus`]. Only one game runs at a time.

use crate::consts::*;
use crate::events::EventBus;
use crate::input::Key;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameKind, GridSize, SnakeGame, TunnelRun};

/// The running engine
#[derive(Debug, Clone)]
pub enum ActiveGame {
    Snake(SnakeGame),
    Tunnel(TunnelRun),
}

impl ActiveGame {
    pub fn kind(&self) -> GameKind {
        match self {
            ActiveGame::Snake(_) => GameKind::MirrorSnake,
            ActiveGame::Tunnel(_) => GameKind::TunnelRun,
        }
    }

    pub fn score(&self) -> u64 {
        match self {
            ActiveGame::Snake(game) => game.score(),
            ActiveGame::Tunnel(run) => run.score(),
        }
    }

    pub fn is_over(&self) -> bool {
        match self {
            ActiveGame::Snake(game) => game.session.is_over(),
            ActiveGame::Tunnel(run) => run.session.is_over(),
        }
    }

    pub fn is_paused(&self) -> bool {
        match self {
            ActiveGame::Snake(game) => game.session.is_paused(),
            ActiveGame::Tunnel(run) => run.session.is_paused(),
        }
    }

    fn drain_events(&mut self) -> Vec<GameEvent> {
        match self {
            ActiveGame::Snake(game) => game.drain_events(),
            ActiveGame::Tunnel(run) => run.drain_events(),
        }
    }
}

/// What a key press did at the host level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResponse {
    /// No game is active
    Ignored,
    /// Routed to the active engine
    Handled,
    /// The active game was closed
    Exited,
}

pub struct Arcade {
    pub settings: Settings,
    active: Option<ActiveGame>,
    bus: EventBus,
    grid: GridSize,
    /// Unconsumed snake time (seconds)
    accumulator: f32,
}

impl Arcade {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            active: None,
            bus: EventBus::new(),
            grid: GridSize::default(),
            accumulator: 0.0,
        }
    }

    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    pub fn active(&self) -> Option<&ActiveGame> {
        self.active.as_ref()
    }

    pub fn active_kind(&self) -> Option<GameKind> {
        self.active.as_ref().map(ActiveGame::kind)
    }

    pub fn grid(&self) -> GridSize {
        self.grid
    }

    /// Viewport size in pixels; sets the snake grid
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.grid = GridSize::from_viewport(width, height);
        if let Some(ActiveGame::Snake(game)) = self.active.as_mut() {
            game.resize(self.grid);
        }
    }

    /// Start `kind`, replacing any running game. A seed in the settings
    /// takes precedence over `seed`.
    pub fn launch(&mut self, kind: GameKind, seed: u64) {
        let seed = self.settings.seed.unwrap_or(seed);
        self.accumulator = 0.0;
        self.active = Some(match kind {
            GameKind::MirrorSnake => ActiveGame::Snake(SnakeGame::new(self.grid, seed)),
            GameKind::TunnelRun => {
                ActiveGame::Tunnel(TunnelRun::new(seed, self.settings.fall_policy))
            }
        });
        log::info!("Launched {} with seed {}", kind.as_str(), seed);
        self.flush_events();
    }

    /// Close the active game
    pub fn exit(&mut self) {
        self.flush_events();
        if let Some(game) = self.active.take() {
            log::info!("Exited {} (score {})", game.kind().as_str(), game.score());
        }
        self.accumulator = 0.0;
    }

    /// Explicit restart action (e.g. a retry button)
    pub fn restart(&mut self) {
        match self.active.as_mut() {
            Some(ActiveGame::Snake(game)) => game.reset(),
            Some(ActiveGame::Tunnel(run)) => run.restart(),
            None => return,
        }
        self.accumulator = 0.0;
        self.flush_events();
    }

    pub fn toggle_invert(&mut self) {
        self.settings.toggle_invert();
        log::info!("Invert controls: {}", self.settings.invert_controls);
    }

    pub fn key_down(&mut self, key: Key) -> KeyResponse {
        let invert = self.settings.invert_controls;
        let exit = match self.active.as_mut() {
            None => return KeyResponse::Ignored,
            Some(ActiveGame::Snake(game)) => {
                if game.session.is_over() {
                    key == Key::Escape && game.can_exit()
                } else {
                    if let Some(heading) = key.heading() {
                        game.steer(heading, invert);
                    } else if key == Key::Space {
                        game.toggle_pause();
                    }
                    false
                }
            }
            Some(ActiveGame::Tunnel(run)) => match key.runner_command() {
                Some(command) => {
                    run.press(command, invert);
                    false
                }
                None => true,
            },
        };

        if exit {
            self.exit();
            return KeyResponse::Exited;
        }
        self.flush_events();
        KeyResponse::Handled
    }

    /// Advance the active game by a frame delta in seconds
    pub fn advance(&mut self, dt: f32) {
        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        match self.active.as_mut() {
            Some(ActiveGame::Snake(game)) => {
                if game.session.is_playing() {
                    self.accumulator += dt;
                } else {
                    self.accumulator = 0.0;
                }
                let mut substeps = 0;
                while self.accumulator >= TICK_DT && substeps < MAX_SUBSTEPS {
                    game.tick();
                    self.accumulator -= TICK_DT;
                    substeps += 1;
                }
            }
            Some(ActiveGame::Tunnel(run)) => run.step(dt),
            None => return,
        }
        self.flush_events();
    }

    fn flush_events(&mut self) {
        let Some(game) = self.active.as_mut() else {
            return;
        };
        for event in game.drain_events() {
            if let GameEvent::Over { game: kind, score } = event {
                log::info!("{} over with score {}", kind.as_str(), score);
            }
            self.bus.publish(&event);
        }
    }
}
