//! Schematic Arcade - the embedded mini-games of a schematic-themed portfolio
//!
//! Core modules:
//! - `sim`: Deterministic simulation (mirror snake, tunnel runner)
//! - `host`: Active-game selection, key routing and timing
//! - `events`: Publish/subscribe boundary for game-started/game-over signals
//! - `input`: Platform key mapping
//! - `render`: Instance data sampled from simulation state
//! - `settings`: Runtime preferences

pub mod events;
pub mod host;
pub mod input;
pub mod render;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use events::EventBus;
pub use host::Arcade;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    // === Mirror snake ===

    /// Pixels per grid cell
    pub const GRID_SIZE: f32 = 40.0;
    /// Simulation period in milliseconds
    pub const TICK_MS: u32 = 80;
    /// Simulation period in seconds
    pub const TICK_DT: f32 = TICK_MS as f32 / 1000.0;
    /// Rendered dot diameter in pixels
    pub const DOT_SIZE: f32 = 12.0;
    /// Spawn cell of the player snake
    pub const SNAKE_START: (i32, i32) = (10, 10);
    /// Food items spawned at the start of a run
    pub const INITIAL_FOOD: usize = 2;
    /// Bonus food only spawns while fewer items than this remain
    pub const BONUS_FOOD_LIMIT: usize = 3;
    /// Chance of a bonus food item after the player eats
    pub const BONUS_FOOD_CHANCE: f64 = 0.3;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    // === Tunnel runner ===

    pub const TUNNEL_RADIUS: f32 = 8.0;
    /// Angular slots around the tunnel circumference
    pub const SEGMENTS: usize = 16;
    /// Forward distance covered by one ring
    pub const SEGMENT_LENGTH: f32 = 4.0;
    /// Forward scroll speed (units/sec)
    pub const SPEED: f32 = 8.0;
    /// Rings kept in front of the player
    pub const VIEW_DISTANCE: usize = 90;
    /// Fully solid rings at tunnel start
    pub const SAFE_ENTRY_RINGS: usize = 5;
    pub const GRAVITY: f32 = 12.0;
    pub const JUMP_FORCE: f32 = 8.0;
    /// Fast descent impulse multiplier (applied downward)
    pub const FAST_FALL_FACTOR: f32 = 1.5;
    pub const MAX_JUMPS: u8 = 2;
    /// Player rest height (just above the tunnel floor)
    pub const GROUND_LEVEL: f32 = -TUNNEL_RADIUS + 0.5;
    /// Height band above ground in which the floor is sampled
    pub const GROUND_TOLERANCE: f32 = 0.1;
    /// Fatal policy: falling below this ends the run
    pub const DEATH_DEPTH: f32 = -20.0;
    /// Fatal policy: restart accepted once the body is this deep
    pub const RESTART_DEPTH: f32 = -50.0;
    /// Respawn policy: falling below this resets the player
    pub const RESPAWN_DEPTH: f32 = -30.0;
    /// Respawn policy: height the player is dropped from
    pub const RESPAWN_HEIGHT: f32 = 0.0;
    /// Rotation easing rate (1/sec)
    pub const ROTATION_EASE: f32 = 2.0;
    /// Angle of the tunnel floor under the player (radians)
    pub const BOTTOM_ANGLE: f32 = std::f32::consts::PI * 1.5;
    /// Frame delta clamp (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Distance score interval (seconds per point)
    pub const SCORE_INTERVAL: f32 = 0.1;
    /// Keys are ignored this long after a restart (seconds)
    pub const RESTART_COOLDOWN: f32 = 0.5;

    // Ring generation probabilities
    pub const INITIAL_SHIFT_CHANCE: f64 = 0.5;
    pub const INITIAL_GAP_CHANCE: f64 = 0.1;
    pub const SHIFT_CHANCE: f64 = 0.4;
    pub const GAP_CHANCE: f64 = 0.2;
}

/// Angular width of one tunnel slot (radians)
#[inline]
pub fn segment_angle() -> f32 {
    std::f32::consts::TAU / consts::SEGMENTS as f32
}

/// Wrap angle to [0, 2π)
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(std::f32::consts::TAU);
    // rem_euclid can round up to TAU for tiny negative inputs
    if wrapped >= std::f32::consts::TAU {
        0.0
    } else {
        wrapped
    }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
