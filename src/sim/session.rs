//! Session bookkeeping shared by both engines
//!
//! Score, phase and the seeded RNG live here so a run can be replayed from
//! its seed.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Which engine a session belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameKind {
    /// Grid snake with a point-mirrored ghost
    MirrorSnake,
    /// Cylindrical tunnel runner
    TunnelRun,
}

impl GameKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::MirrorSnake => "PYTHON_SNAKE",
            GameKind::TunnelRun => "SPACE_RUN",
        }
    }
}

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first key press
    Ready,
    /// Active gameplay
    Playing,
    /// Frozen by the pause key
    Paused,
    /// Run ended, waiting for restart or exit
    GameOver,
}

/// Signals emitted by an engine for the host to forward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started { game: GameKind },
    Over { game: GameKind, score: u64 },
}

/// Score and phase of one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    pub score: u64,
    pub phase: GamePhase,
}

impl GameSession {
    pub fn new(phase: GamePhase) -> Self {
        Self { score: 0, phase }
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Flip between Playing and Paused; other phases are left alone
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            other => other,
        };
    }

    /// Enter GameOver. Returns false if the run was already over.
    pub fn end(&mut self) -> bool {
        if self.is_over() {
            return false;
        }
        self.phase = GamePhase::GameOver;
        true
    }
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_toggle_pause() {
        let mut session = GameSession::new(GamePhase::Playing);
        session.toggle_pause();
        assert!(session.is_paused());
        session.toggle_pause();
        assert!(session.is_playing());
    }

    #[test]
    fn test_toggle_pause_ignored_when_over() {
        let mut session = GameSession::new(GamePhase::Playing);
        assert!(session.end());
        session.toggle_pause();
        assert!(session.is_over());
        assert!(!session.end());
    }

    #[test]
    fn test_rng_state_reproducible() {
        let state = RngState::new(42);
        let a: u32 = state.to_rng().random();
        let b: u32 = state.to_rng().random();
        assert_eq!(a, b);
    }
}
