//! Player preferences
//!
//! Gameplay tunables are compile-time constants in [`crate::consts`]; the
//! few things a player can toggle live here and can be handed over by the
//! host page as JSON.

use serde::{Deserialize, Serialize};

use crate::sim::FallPolicy;

/// Runtime preferences shared by both games
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Negate arrow-key directions in both games
    pub invert_controls: bool,
    /// Tunnel runner terminal rule
    pub fall_policy: FallPolicy,
    /// Fixed RNG seed (random per run when absent)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            invert_controls: false,
            fall_policy: FallPolicy::Fatal,
            seed: None,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse settings, logging and falling back to defaults on bad input
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded settings: {:?}", settings);
                settings
            }
            Err(e) => {
                log::warn!("Ignoring invalid settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn toggle_invert(&mut self) {
        self.invert_controls = !self.invert_controls;
    }
}
