//! Heads or Tails - an augmented-reality coin flip
//!
//! Core modules:
//! - `sim`: Deterministic session logic (coin state, placement, flip, feedback)
//! - `engine`: AR engine abstraction and an in-memory headless engine
//! - `gesture`: Tap/swipe classification from raw pointer strokes
//! - `settings`: Data-driven tunables loaded from JSON

pub mod engine;
pub mod gesture;
pub mod settings;
pub mod sim;

pub use engine::{ArEngine, EngineError, HeadlessEngine};
pub use settings::{Settings, SettingsError};
pub use sim::{Coin, Session, SessionEvent};

/// Session configuration constants
pub mod consts {
    /// Fixed session timestep (120 Hz, matches the host frame pacing)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Flip count range (half-rotations), inclusive
    pub const FLIP_COUNT_MIN: u32 = 50;
    pub const FLIP_COUNT_MAX: u32 = 79;

    /// Duration of one bounce phase (rise or fall) in seconds
    pub const FLIP_PHASE_SECS: f32 = 0.5;
    /// How high the coin rises above the surface (meters)
    pub const FLIP_BOUNCE_HEIGHT: f32 = 0.3;

    /// Scene file and node name of the coin model
    pub const COIN_SCENE: &str = "coin.scn";
    pub const COIN_NODE: &str = "coin";

    /// Plane overlay color (translucent light blue)
    pub const PLANE_OVERLAY_RGBA: [f32; 4] = [90.0 / 255.0, 200.0 / 255.0, 250.0 / 255.0, 0.5];
}

/// Convert a duration in seconds to whole session ticks
#[inline]
pub fn secs_to_ticks(secs: f32) -> u64 {
    (secs / consts::SIM_DT).round().max(0.0) as u64
}
