//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - No rendering, platform or event-bus dependencies
//! - Derived state (the mirror snake) is computed, never stored

pub mod food;
pub mod grid;
pub mod runner;
pub mod session;
pub mod snake;
pub mod tunnel;

pub use food::spawn_food;
pub use grid::{GridSize, Heading, Point, mirror_point, mirror_snake};
pub use runner::{FallPolicy, PlayerBody, RunnerCommand, TunnelRun};
pub use session::{GameEvent, GameKind, GamePhase, GameSession, RngState};
pub use snake::{Collision, SnakeGame, TickOutcome};
pub use tunnel::{RingOdds, TunnelPath, TunnelRing, segment_at_bottom};
