//! Deterministic session module
//!
//! All coin-flip logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Scene access only through the `ArEngine` trait

pub mod action;
pub mod coin;
pub mod feedback;
pub mod plane;
pub mod state;
pub mod tick;

pub use action::{Action, Easing, Motion};
pub use coin::Coin;
pub use feedback::{FeedbackMessage, LimitedReason, TrackingState, message_for};
pub use plane::{AnchorId, PlaneAnchor, PlaneOverlay};
pub use state::{Hud, PendingFlip, Session, SessionSnapshot};
pub use tick::{FlipOutcome, Placement, SessionEvent, flip_action};
