//! Schematic Arcade entry point
//!
//! The browser build is driven from `schematic_arcade::web`. Natively this
//! runs both engines headless through a short scripted session and logs
//! what happens, which is handy for checking tuning changes.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let settings = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => schematic_arcade::Settings::from_json_or_default(&json),
            Err(e) => {
                log::warn!("Could not read settings from {}: {}", path, e);
                schematic_arcade::Settings::default()
            }
        },
        None => schematic_arcade::Settings::default(),
    };

    log::info!("Schematic Arcade (native) starting with {:?}", settings);
    headless::run(settings);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::cell::Cell;
    use std::rc::Rc;

    use schematic_arcade::consts::*;
    use schematic_arcade::host::ActiveGame;
    use schematic_arcade::input::Key;
    use schematic_arcade::sim::{GameEvent, GameKind};
    use schematic_arcade::{Arcade, Settings};

    const FRAME_DT: f32 = 1.0 / 60.0;
    const DEMO_SEED: u64 = 2024;

    pub fn run(settings: Settings) {
        let mut arcade = Arcade::new(settings);
        arcade.set_viewport(1000.0, 800.0);

        let finished = Rc::new(Cell::new(None));
        {
            let finished = finished.clone();
            arcade.bus_mut().subscribe(move |event| match *event {
                GameEvent::Started { game } => log::info!("[bus] {} started", game.as_str()),
                GameEvent::Over { game, score } => {
                    log::info!("[bus] {} over, score {}", game.as_str(), score);
                    finished.set(Some(score));
                }
            });
        }

        snake_demo(&mut arcade);
        finished.set(None);
        tunnel_demo(&mut arcade, &finished);
    }

    /// Steer a square loop, then run straight until something gives
    fn snake_demo(arcade: &mut Arcade) {
        arcade.launch(GameKind::MirrorSnake, DEMO_SEED);
        let script = [Key::Down, Key::Left, Key::Up, Key::Right];
        let frames_per_turn = (6.0 * TICK_DT / FRAME_DT) as usize;

        for key in script.iter().cycle().take(8) {
            arcade.key_down(*key);
            for _ in 0..frames_per_turn {
                arcade.advance(FRAME_DT);
            }
        }

        let mut frames = 0;
        while arcade.active().is_some_and(|g| !g.is_over()) && frames < 3_000 {
            arcade.advance(FRAME_DT);
            frames += 1;
        }

        if let Some(ActiveGame::Snake(game)) = arcade.active() {
            log::info!(
                "Snake: length {}, {} food on board, score {}, over: {}",
                game.snake.len(),
                game.food.len(),
                game.score(),
                game.session.is_over()
            );
        }
        arcade.key_down(Key::Escape);
    }

    /// Hold the floor with periodic jumps for up to a minute of play
    fn tunnel_demo(arcade: &mut Arcade, finished: &Rc<Cell<Option<u64>>>) {
        arcade.launch(GameKind::TunnelRun, DEMO_SEED);
        arcade.key_down(Key::Other);

        let jump_every = (1.0 / FRAME_DT) as usize;
        for frame in 0..3_600 {
            if frame % jump_every == 0 {
                arcade.key_down(Key::Up);
            }
            arcade.advance(FRAME_DT);
            if finished.get().is_some() {
                break;
            }
        }

        if let Some(ActiveGame::Tunnel(run)) = arcade.active() {
            log::info!(
                "Tunnel: {} rings passed, {} respawns, score {}",
                run.path.rings_passed,
                run.respawns,
                run.score()
            );
        }
        arcade.key_down(Key::Escape);
    }
}
