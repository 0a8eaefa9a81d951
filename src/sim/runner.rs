//! Tunnel runner simulation
//!
//! The player sits at a fixed screen position at the bottom of the tunnel.
//! Steering rotates the tunnel instead of the player, and the floor slot
//! under the player is looked up from that rotation. Vertical motion is a
//! simple gravity integrator with a double jump and a fast-descent impulse.

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::session::{GameEvent, GameKind, GamePhase, GameSession, RngState};
use super::tunnel::{TunnelPath, segment_at_bottom};
use crate::consts::*;
use crate::segment_angle;

/// What happens when the player drops through the floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FallPolicy {
    /// Falling past `DEATH_DEPTH` ends the run
    #[default]
    Fatal,
    /// Falling past `RESPAWN_DEPTH` drops the player back in from above
    Respawn,
}

/// Player-facing commands, already mapped from keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerCommand {
    SteerLeft,
    SteerRight,
    Jump,
    FastFall,
    Pause,
    /// Any other key (only used to start or restart)
    Other,
}

/// Continuous player state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerBody {
    /// Current tunnel rotation (radians); the world turns, not the player
    pub angular_position: f32,
    /// Rotation the tunnel is easing toward
    pub target_angle: f32,
    /// Height within the tunnel cross-section
    pub vertical_offset: f32,
    pub vertical_velocity: f32,
    /// Jumps since last landing
    pub jumps_used: u8,
}

impl Default for PlayerBody {
    fn default() -> Self {
        Self {
            angular_position: 0.0,
            target_angle: 0.0,
            vertical_offset: GROUND_LEVEL,
            vertical_velocity: 0.0,
            jumps_used: 0,
        }
    }
}

impl PlayerBody {
    /// Integrate gravity for one step, landing unless `over_hole`
    pub fn integrate(&mut self, dt: f32, over_hole: bool) {
        if self.vertical_offset > GROUND_LEVEL || self.vertical_velocity > 0.0 {
            self.vertical_velocity -= GRAVITY * dt;
            let next = self.vertical_offset + self.vertical_velocity * dt;

            if next <= GROUND_LEVEL && self.vertical_velocity < 0.0 && !over_hole {
                self.vertical_offset = GROUND_LEVEL;
                self.vertical_velocity = 0.0;
                self.jumps_used = 0;
            } else {
                self.vertical_offset = next;
            }
        } else if over_hole {
            self.vertical_velocity -= GRAVITY * dt;
            self.vertical_offset += self.vertical_velocity * dt;
        } else {
            // Resting on solid floor
            self.vertical_velocity = 0.0;
        }
    }

    /// Free fall with no floor (used after game over)
    pub fn fall(&mut self, dt: f32) {
        self.vertical_velocity -= GRAVITY * dt;
        self.vertical_offset += self.vertical_velocity * dt;
    }

    /// Ease the tunnel rotation toward the target
    pub fn ease_rotation(&mut self, dt: f32) {
        let blend = 1.0 - (-ROTATION_EASE * dt).exp();
        self.angular_position += (self.target_angle - self.angular_position) * blend;
    }

    pub fn try_jump(&mut self) -> bool {
        if self.jumps_used >= MAX_JUMPS {
            return false;
        }
        self.vertical_velocity = JUMP_FORCE;
        self.jumps_used += 1;
        true
    }

    pub fn fast_fall(&mut self) {
        self.vertical_velocity = -JUMP_FORCE * FAST_FALL_FACTOR;
    }
}

/// Complete tunnel runner state
#[derive(Debug, Clone)]
pub struct TunnelRun {
    pub path: TunnelPath,
    pub player: PlayerBody,
    pub session: GameSession,
    pub policy: FallPolicy,
    /// Floor under the player is missing (sampled each step)
    pub over_hole: bool,
    /// Fatal policy: body has fallen far enough to accept a restart
    pub waiting_for_restart: bool,
    /// Seconds left during which keys are ignored
    pub cooldown: f32,
    /// Seconds since the run was created (drives the ready-state hover)
    pub clock: f32,
    pub respawns: u32,
    pub rng_state: RngState,
    score_timer: f32,
    rng: Pcg32,
    events: Vec<GameEvent>,
}

impl TunnelRun {
    pub fn new(seed: u64, policy: FallPolicy) -> Self {
        let rng_state = RngState::new(seed);
        let mut rng = rng_state.to_rng();
        let player = PlayerBody::default();
        let path = TunnelPath::new(segment_at_bottom(player.angular_position), &mut rng);
        Self {
            path,
            player,
            session: GameSession::new(GamePhase::Ready),
            policy,
            over_hole: false,
            waiting_for_restart: false,
            cooldown: 0.0,
            clock: 0.0,
            respawns: 0,
            rng_state,
            score_timer: 0.0,
            rng,
            events: Vec::new(),
        }
    }

    /// Fresh tunnel and body; waits for a key after a short cooldown
    pub fn restart(&mut self) {
        self.player = PlayerBody::default();
        self.path = TunnelPath::new(segment_at_bottom(0.0), &mut self.rng);
        self.session = GameSession::new(GamePhase::Ready);
        self.over_hole = false;
        self.waiting_for_restart = false;
        self.cooldown = RESTART_COOLDOWN;
        self.score_timer = 0.0;
        self.respawns = 0;
        log::info!("Tunnel run restarted ({:?} falls)", self.policy);
    }

    pub fn score(&self) -> u64 {
        self.session.score
    }

    /// Slot index currently under the player
    pub fn bottom_segment(&self) -> usize {
        segment_at_bottom(self.player.angular_position)
    }

    /// Player has dropped below the floor (scroll and steering frozen)
    pub fn is_falling(&self) -> bool {
        self.session.is_over() || (self.over_hole && self.player.vertical_offset < GROUND_LEVEL)
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Apply a key command. Returns true if it changed anything.
    pub fn press(&mut self, command: RunnerCommand, invert: bool) -> bool {
        if self.cooldown > 0.0 {
            return false;
        }

        match self.session.phase {
            GamePhase::Ready => {
                self.session.phase = GamePhase::Playing;
                self.events.push(GameEvent::Started {
                    game: GameKind::TunnelRun,
                });
                log::info!("Tunnel run started");
                true
            }
            GamePhase::GameOver => {
                if self.waiting_for_restart {
                    self.restart();
                    true
                } else {
                    false
                }
            }
            GamePhase::Paused => {
                if command == RunnerCommand::Pause {
                    self.session.toggle_pause();
                    true
                } else {
                    false
                }
            }
            GamePhase::Playing => self.apply(command, invert),
        }
    }

    fn apply(&mut self, command: RunnerCommand, invert: bool) -> bool {
        let direction = if invert { -1.0 } else { 1.0 };
        match command {
            RunnerCommand::Pause => {
                self.session.toggle_pause();
                true
            }
            RunnerCommand::SteerLeft if !self.is_falling() => {
                self.player.target_angle += segment_angle() * direction;
                true
            }
            RunnerCommand::SteerRight if !self.is_falling() => {
                self.player.target_angle -= segment_angle() * direction;
                true
            }
            RunnerCommand::Jump => self.player.try_jump(),
            RunnerCommand::FastFall => {
                self.player.fast_fall();
                true
            }
            _ => false,
        }
    }

    /// Advance by one display frame
    pub fn step(&mut self, dt: f32) {
        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        self.clock += dt;
        self.cooldown = (self.cooldown - dt).max(0.0);

        match self.session.phase {
            GamePhase::Ready | GamePhase::Paused => return,
            GamePhase::GameOver => {
                self.player.fall(dt);
                if self.player.vertical_offset < RESTART_DEPTH && !self.waiting_for_restart {
                    self.waiting_for_restart = true;
                    log::debug!("Tunnel run waiting for restart");
                }
                return;
            }
            GamePhase::Playing => {}
        }

        if !self.is_falling() {
            self.path.advance(SPEED * dt, &mut self.rng);
            self.player.ease_rotation(dt);
        }
        self.over_hole = self
            .path
            .is_over_hole(self.player.angular_position, self.player.vertical_offset);
        self.player.integrate(dt, self.over_hole);

        self.score_timer += dt;
        while self.score_timer >= SCORE_INTERVAL {
            self.score_timer -= SCORE_INTERVAL;
            self.session.score += 1;
        }

        match self.policy {
            FallPolicy::Fatal if self.player.vertical_offset < DEATH_DEPTH => {
                if self.session.end() {
                    log::info!("Tunnel run over, distance {}", self.session.score);
                    self.events.push(GameEvent::Over {
                        game: GameKind::TunnelRun,
                        score: self.session.score,
                    });
                }
            }
            FallPolicy::Respawn if self.player.vertical_offset < RESPAWN_DEPTH => {
                self.player.vertical_offset = RESPAWN_HEIGHT;
                self.player.vertical_velocity = 0.0;
                self.over_hole = false;
                self.respawns += 1;
                log::info!("Tunnel runner respawned ({} so far)", self.respawns);
            }
            _ => {}
        }
    }
}
