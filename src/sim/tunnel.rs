//! Procedural tunnel path
//!
//! The tunnel is a queue of rings, each a ring of angular slots that are
//! either floor or hole. Ring 0 is nearest the player. New rings are pushed
//! at the far end as the player scrolls forward; each keeps a 3-slot safe
//! arc centered on a slowly drifting path center.

use std::collections::VecDeque;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::{segment_angle, wrap_angle};

/// One cross-section of the tunnel floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TunnelRing {
    pub slots: [bool; SEGMENTS],
}

impl TunnelRing {
    pub const fn solid() -> Self {
        Self {
            slots: [true; SEGMENTS],
        }
    }

    pub const fn empty() -> Self {
        Self {
            slots: [false; SEGMENTS],
        }
    }

    /// Ring with the 3 slots around `center` solid
    pub fn with_safe_arc(center: usize) -> Self {
        let mut ring = Self::empty();
        for offset in [SEGMENTS - 1, 0, 1] {
            ring.slots[(center + offset) % SEGMENTS] = true;
        }
        ring
    }

    #[inline]
    pub fn is_hole(&self, index: usize) -> bool {
        !self.slots[index % SEGMENTS]
    }

    pub fn solid_count(&self) -> usize {
        self.slots.iter().filter(|&&s| s).count()
    }
}

/// Shift and gap probabilities for one generated ring
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingOdds {
    pub shift: f64,
    pub gap: f64,
}

impl RingOdds {
    /// Used while filling the initial view
    pub const INITIAL: RingOdds = RingOdds {
        shift: INITIAL_SHIFT_CHANCE,
        gap: INITIAL_GAP_CHANCE,
    };
    /// Used for rings emitted by scrolling
    pub const SCROLLING: RingOdds = RingOdds {
        shift: SHIFT_CHANCE,
        gap: GAP_CHANCE,
    };
}

/// Slot index sitting at the bottom of the tunnel for a given rotation
pub fn segment_at_bottom(rotation: f32) -> usize {
    let angle = wrap_angle(BOTTOM_ANGLE - rotation);
    (angle / segment_angle()).round() as usize % SEGMENTS
}

/// Scrolling ring sequence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TunnelPath {
    /// Ring 0 is nearest the player
    pub rings: VecDeque<TunnelRing>,
    /// Center slot of the safe arc of the newest ring
    pub path_center: usize,
    /// Distance travelled into the current ring
    pub local_offset: f32,
    /// Rings emitted since the run started
    pub rings_passed: u64,
}

impl TunnelPath {
    /// Fill the view: safe entry rings, then generated path
    pub fn new<R: Rng>(start_center: usize, rng: &mut R) -> Self {
        let mut path = Self {
            rings: VecDeque::with_capacity(VIEW_DISTANCE),
            path_center: start_center % SEGMENTS,
            local_offset: 0.0,
            rings_passed: 0,
        };
        for i in 0..VIEW_DISTANCE {
            let ring = if i < SAFE_ENTRY_RINGS {
                TunnelRing::solid()
            } else {
                path.generate_ring(RingOdds::INITIAL, rng)
            };
            path.rings.push_back(ring);
        }
        path
    }

    /// Build the next ring, possibly drifting the path center by one slot
    pub fn generate_ring<R: Rng>(&mut self, odds: RingOdds, rng: &mut R) -> TunnelRing {
        if rng.random_bool(odds.shift) {
            self.path_center = if rng.random_bool(0.5) {
                (self.path_center + 1) % SEGMENTS
            } else {
                (self.path_center + SEGMENTS - 1) % SEGMENTS
            };
        }
        let mut ring = TunnelRing::with_safe_arc(self.path_center);
        if rng.random_bool(odds.gap) {
            ring.slots[self.path_center] = false;
        }
        ring
    }

    /// Move forward by `distance`. Returns the number of rings emitted.
    pub fn advance<R: Rng>(&mut self, distance: f32, rng: &mut R) -> usize {
        self.local_offset += distance;
        let mut emitted = 0;
        while self.local_offset >= SEGMENT_LENGTH {
            self.local_offset -= SEGMENT_LENGTH;
            self.rings.pop_front();
            let ring = self.generate_ring(RingOdds::SCROLLING, rng);
            self.rings.push_back(ring);
            self.rings_passed += 1;
            emitted += 1;
        }
        emitted
    }

    pub fn nearest(&self) -> Option<&TunnelRing> {
        self.rings.front()
    }

    /// True if the floor under the player is missing.
    ///
    /// Only sampled while the player is within the ground band; above it,
    /// or with no rings yet, there is nothing to fall through.
    pub fn is_over_hole(&self, rotation: f32, vertical_offset: f32) -> bool {
        if vertical_offset > GROUND_LEVEL + GROUND_TOLERANCE {
            return false;
        }
        match self.nearest() {
            Some(ring) => ring.is_hole(segment_at_bottom(rotation)),
            None => false,
        }
    }
}
