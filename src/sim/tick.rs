//! Event handling and the fixed-timestep session tick
//!
//! Everything runs on one logical thread: the host feeds events through
//! [`Session::handle`] and advances time with [`Session::tick`]. The flip
//! outcome is a tick deadline, so it resolves in order with everything else.

use glam::{Vec2, Vec3};
use rand::Rng;

use super::action::{Action, Easing};
use super::coin::Coin;
use super::feedback::TrackingState;
use super::plane::{AnchorId, PlaneAnchor, PlaneOverlay};
use super::state::{PendingFlip, Session};
use crate::engine::{ArEngine, EngineError, NodeId};
use crate::gesture::{Gesture, SwipeDirection};
use crate::secs_to_ticks;
use crate::settings::FlipTuning;

/// Something the environment reports to the session
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEvent {
    /// The AR view is on screen; start tracking
    Appear,
    /// The AR view left the screen; pause tracking
    Disappear,
    /// Tap at a screen point
    Tap(Vec2),
    Swipe(SwipeDirection),
    TrackingChanged(TrackingState),
    Interrupted,
    InterruptionEnded,
    AnchorAdded(PlaneAnchor),
    AnchorUpdated(PlaneAnchor),
    AnchorRemoved(AnchorId),
}

impl From<Gesture> for SessionEvent {
    fn from(gesture: Gesture) -> Self {
        match gesture {
            Gesture::Tap(point) => SessionEvent::Tap(point),
            Gesture::Swipe { direction, .. } => SessionEvent::Swipe(direction),
        }
    }
}

/// Result of a tap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// First coin added to the scene
    Placed(NodeId),
    /// Existing coin moved
    Moved(NodeId),
    /// The tap didn't land on a plane; nothing changed
    Missed,
}

/// Result of a flip request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipOutcome {
    Started(PendingFlip),
    /// No coin to flip
    NothingPlaced,
    /// A flip is already in the air
    Busy,
}

/// The flip animation: rise and fall while spinning `flip_count` half-turns
pub fn flip_action(tuning: &FlipTuning, flip_count: u32) -> Action {
    let lift = Vec3::Y * tuning.bounce_height;
    let bounce = Action::Sequence(vec![
        Action::move_by(lift, tuning.phase_secs, Easing::EaseOut),
        Action::move_by(-lift, tuning.phase_secs, Easing::EaseIn),
    ]);
    let spin = Action::rotate_by(
        Vec3::X,
        flip_count as f32 * std::f32::consts::PI,
        tuning.phase_secs * 2.0,
        Easing::Linear,
    );
    Action::Group(vec![bounce, spin])
}

impl Session {
    /// Process one environment event. Engine failures abort the event and are
    /// logged; they never reach the caller.
    pub fn handle(&mut self, engine: &mut impl ArEngine, event: SessionEvent) {
        match event {
            SessionEvent::Appear => {
                engine.run(&self.settings.tracking);
                self.running = true;
                log::info!("Session running");
            }
            SessionEvent::Disappear => {
                engine.pause();
                self.running = false;
                log::info!("Session paused");
            }
            SessionEvent::Tap(point) => {
                if let Err(e) = self.place(engine, point) {
                    log::warn!("Placement aborted: {}", e);
                }
            }
            SessionEvent::Swipe(SwipeDirection::Up) => {
                if let Err(e) = self.flip(engine) {
                    log::warn!("Flip aborted: {}", e);
                }
            }
            SessionEvent::Swipe(direction) => {
                log::debug!("Ignoring {:?} swipe", direction);
            }
            SessionEvent::TrackingChanged(state) => {
                self.tracking = state;
                self.refresh_feedback();
            }
            SessionEvent::Interrupted => {
                log::info!("Session interrupted");
                self.interrupted = true;
                self.refresh_feedback();
            }
            SessionEvent::InterruptionEnded => {
                log::info!("Session interruption ended");
                self.interrupted = false;
                if self.running {
                    engine.run(&self.settings.tracking);
                }
                self.refresh_feedback();
            }
            SessionEvent::AnchorAdded(anchor) => self.mirror_plane(engine, &anchor),
            SessionEvent::AnchorUpdated(anchor) => self.mirror_plane(engine, &anchor),
            SessionEvent::AnchorRemoved(id) => {
                if self.planes.remove(&id).is_some() {
                    engine.remove_plane_overlay(id);
                    log::debug!("Plane {:?} removed", id);
                }
            }
        }
    }

    /// Place the coin where a screen point meets a detected plane, or move it
    /// there if it's already placed
    pub fn place(&mut self, engine: &mut impl ArEngine, point: Vec2) -> Result<Placement, EngineError> {
        let Some(position) = engine.hit_test(point) else {
            log::debug!("Tap at {} hit no plane", point);
            return Ok(Placement::Missed);
        };

        let placement = match self.placed {
            Some(node) => {
                engine.set_position(node, position)?;
                log::debug!("Coin moved to {}", position);
                Placement::Moved(node)
            }
            None => {
                let node = engine.load_model(&self.settings.coin)?;
                // Later taps reuse this node even if attaching fails part way
                self.placed = Some(node);
                engine.add_node(node)?;
                engine.set_position(node, position)?;
                log::info!("Coin placed at {}", position);
                Placement::Placed(node)
            }
        };

        self.refresh_feedback();
        Ok(placement)
    }

    /// Flip the placed coin with a random number of half-turns
    pub fn flip(&mut self, engine: &mut impl ArEngine) -> Result<FlipOutcome, EngineError> {
        if self.placed.is_none() {
            return Ok(FlipOutcome::NothingPlaced);
        }
        if self.pending.is_some() {
            log::debug!("Flip ignored, coin still in the air");
            return Ok(FlipOutcome::Busy);
        }
        let flip_count = self.rng.random_range(self.settings.flip.flip_range());
        self.flip_with(engine, flip_count)
    }

    /// Flip the placed coin exactly `flip_count` half-turns
    pub fn flip_with(
        &mut self,
        engine: &mut impl ArEngine,
        flip_count: u32,
    ) -> Result<FlipOutcome, EngineError> {
        let Some(node) = self.placed else {
            return Ok(FlipOutcome::NothingPlaced);
        };
        if self.pending.is_some() {
            return Ok(FlipOutcome::Busy);
        }

        let action = flip_action(&self.settings.flip, flip_count);
        let resolves_at = self.time_ticks.saturating_add(secs_to_ticks(action.duration()));
        engine.run_action(node, action)?;

        let pending = PendingFlip {
            flip_count,
            resolves_at,
        };
        self.pending = Some(pending);
        log::info!("Flipping coin: {} half-turns", flip_count);
        Ok(FlipOutcome::Started(pending))
    }

    /// Advance one fixed timestep. Returns the result of a flip that landed
    /// during this tick.
    pub fn tick(&mut self) -> Option<Coin> {
        self.time_ticks = self.time_ticks.saturating_add(1);

        let pending = self.pending?;
        if self.time_ticks < pending.resolves_at {
            return None;
        }
        self.pending = None;
        Some(self.resolve_flip(pending.flip_count))
    }

    /// Apply a finished flip to the coin and show the result
    fn resolve_flip(&mut self, flip_count: u32) -> Coin {
        if flip_count % 2 == 1 {
            self.coin.flip();
        }
        self.hud.result = Some(self.coin);
        self.flips_completed += 1;
        log::info!("Coin landed {} ({} half-turns)", self.coin, flip_count);
        self.coin
    }

    fn mirror_plane(&mut self, engine: &mut impl ArEngine, anchor: &PlaneAnchor) {
        let overlay = PlaneOverlay::for_anchor(anchor);
        if self.planes.insert(anchor.id, overlay).is_some() {
            engine.update_plane_overlay(anchor.id, &overlay);
        } else {
            log::debug!("Plane {:?} detected ({} x {})", anchor.id, overlay.width, overlay.height);
            engine.add_plane_overlay(anchor.id, &overlay);
        }
    }
}
