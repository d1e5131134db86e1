//! Tracking quality and the status message shown for it

use serde::{Deserialize, Serialize};

/// Why tracking is limited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LimitedReason {
    Initializing,
    ExcessiveMotion,
    InsufficientFeatures,
    Relocalizing,
}

/// Camera tracking quality as reported by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TrackingState {
    /// No tracking data yet (also the state before the session runs)
    #[default]
    NotAvailable,
    Limited(LimitedReason),
    Normal,
}

/// Status messages; at most one is visible at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedbackMessage {
    SessionInterrupted,
    TrackingUnavailable,
    Initializing,
    ExcessiveMotion,
    InsufficientFeatures,
    Relocalizing,
    FindSurface,
}

impl FeedbackMessage {
    pub fn text(&self) -> &'static str {
        match self {
            FeedbackMessage::SessionInterrupted => "Session interrupted",
            FeedbackMessage::TrackingUnavailable => "Tracking unavailable",
            FeedbackMessage::Initializing => "Initializing AR session",
            FeedbackMessage::ExcessiveMotion => "Too much motion, slow down",
            FeedbackMessage::InsufficientFeatures => "Not enough surface detail",
            FeedbackMessage::Relocalizing => "Relocalizing, return to where you were",
            FeedbackMessage::FindSurface => "Move the device to find a horizontal surface",
        }
    }
}

impl std::fmt::Display for FeedbackMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text())
    }
}

/// Pick the message for the current tracking situation.
///
/// Interruption wins over everything; limited/unavailable tracking is always
/// reported; with normal tracking the only hint left is to find a surface,
/// and only until something has been placed.
pub fn message_for(tracking: TrackingState, interrupted: bool, placed: bool) -> Option<FeedbackMessage> {
    if interrupted {
        return Some(FeedbackMessage::SessionInterrupted);
    }
    match tracking {
        TrackingState::NotAvailable => Some(FeedbackMessage::TrackingUnavailable),
        TrackingState::Limited(reason) => Some(match reason {
            LimitedReason::Initializing => FeedbackMessage::Initializing,
            LimitedReason::ExcessiveMotion => FeedbackMessage::ExcessiveMotion,
            LimitedReason::InsufficientFeatures => FeedbackMessage::InsufficientFeatures,
            LimitedReason::Relocalizing => FeedbackMessage::Relocalizing,
        }),
        TrackingState::Normal if !placed => Some(FeedbackMessage::FindSurface),
        TrackingState::Normal => None,
    }
}
