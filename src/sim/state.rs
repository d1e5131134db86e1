//! Session state
//!
//! Everything the session knows lives here; the engine owns the scene, the
//! session owns the coin and the bookkeeping around it.

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::coin::Coin;
use super::feedback::{FeedbackMessage, TrackingState, message_for};
use super::plane::{AnchorId, PlaneOverlay};
use crate::engine::NodeId;
use crate::settings::{Settings, SettingsError};

/// A flip whose outcome hasn't been applied yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingFlip {
    /// Half-rotations the animation performs
    pub flip_count: u32,
    /// Session tick at which the outcome is applied
    pub resolves_at: u64,
}

/// What the front end shows on top of the camera view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Hud {
    /// The single visible status message, if any
    pub feedback: Option<FeedbackMessage>,
    /// Result of the last completed flip
    pub result: Option<Coin>,
}

/// Serializable view of a session, for logs and debugging front ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub seed: u64,
    pub time_ticks: u64,
    pub coin: Coin,
    pub placed: bool,
    pub pending: Option<PendingFlip>,
    pub tracking: TrackingState,
    pub interrupted: bool,
    pub planes: usize,
    pub feedback: Option<String>,
    pub result: Option<Coin>,
    pub flips_completed: u32,
}

/// One AR coin-flip session
#[derive(Debug, Clone)]
pub struct Session {
    pub(super) settings: Settings,
    pub(super) seed: u64,
    pub(super) rng: Pcg32,
    pub(super) coin: Coin,
    /// The coin node, once placed
    pub(super) placed: Option<NodeId>,
    /// Overlays mirrored for each detected plane
    pub(super) planes: BTreeMap<AnchorId, PlaneOverlay>,
    pub(super) tracking: TrackingState,
    pub(super) interrupted: bool,
    pub(super) running: bool,
    pub(super) pending: Option<PendingFlip>,
    pub(super) hud: Hud,
    pub(super) time_ticks: u64,
    pub(super) flips_completed: u32,
}

impl Session {
    /// Create a session; the coin starts heads up
    pub fn new(settings: Settings, seed: u64) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self {
            settings,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            coin: Coin::Heads,
            placed: None,
            planes: BTreeMap::new(),
            tracking: TrackingState::default(),
            interrupted: false,
            running: false,
            pending: None,
            hud: Hud::default(),
            time_ticks: 0,
            flips_completed: 0,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn coin(&self) -> Coin {
        self.coin
    }

    pub fn placed(&self) -> Option<NodeId> {
        self.placed
    }

    pub fn hud(&self) -> &Hud {
        &self.hud
    }

    pub fn tracking(&self) -> TrackingState {
        self.tracking
    }

    pub fn is_interrupted(&self) -> bool {
        self.interrupted
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn pending_flip(&self) -> Option<PendingFlip> {
        self.pending
    }

    pub fn is_flipping(&self) -> bool {
        self.pending.is_some()
    }

    pub fn plane_overlay(&self, anchor: AnchorId) -> Option<&PlaneOverlay> {
        self.planes.get(&anchor)
    }

    pub fn plane_count(&self) -> usize {
        self.planes.len()
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn flips_completed(&self) -> u32 {
        self.flips_completed
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            seed: self.seed,
            time_ticks: self.time_ticks,
            coin: self.coin,
            placed: self.placed.is_some(),
            pending: self.pending,
            tracking: self.tracking,
            interrupted: self.interrupted,
            planes: self.planes.len(),
            feedback: self.hud.feedback.map(|m| m.text().to_string()),
            result: self.hud.result,
            flips_completed: self.flips_completed,
        }
    }

    /// Recompute the visible status message
    pub(super) fn refresh_feedback(&mut self) {
        let message = message_for(self.tracking, self.interrupted, self.placed.is_some());
        if message != self.hud.feedback {
            match message {
                Some(m) => log::debug!("Feedback: {}", m),
                None => log::debug!("Feedback hidden"),
            }
            self.hud.feedback = message;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session() {
        let session = Session::new(Settings::default(), 1).unwrap();
        assert_eq!(session.coin(), Coin::Heads);
        assert_eq!(session.placed(), None);
        assert_eq!(session.hud(), &Hud::default());
        assert!(!session.is_flipping());
        assert!(!session.is_running());
    }

    #[test]
    fn test_snapshot_serializes() {
        let session = Session::new(Settings::default(), 5).unwrap();
        let json = serde_json::to_string(&session.snapshot()).unwrap();
        let back: SessionSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session.snapshot());
        assert!(json.contains("\"coin\":\"Heads\""));
    }

    #[test]
    fn test_rejects_invalid_settings() {
        let mut settings = Settings::default();
        settings.flip.min_flips = 80;
        settings.flip.max_flips = 50;
        assert!(matches!(
            Session::new(settings, 1),
            Err(SettingsError::EmptyFlipRange { min: 80, max: 50 })
        ));
    }
}
