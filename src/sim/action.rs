//! Composable node animations
//!
//! An [`Action`] describes a relative move or rotation over time. Actions nest
//! into sequences (one after another) and groups (all at once), mirroring the
//! action primitives AR scene graphs provide. Engines that animate natively can
//! translate an `Action` tree into their own primitives; engines that don't can
//! call [`Action::sample`] every frame.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Timing curve applied to an action's progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Easing {
    #[default]
    Linear,
    /// Starts slow, accelerates (falling)
    EaseIn,
    /// Starts fast, decelerates (rising)
    EaseOut,
    EaseInEaseOut,
}

impl Easing {
    /// Map linear progress in [0, 1] through the curve
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInEaseOut => t * t * (3.0 - 2.0 * t),
        }
    }
}

/// Offset produced by an action at some point in time, relative to where the
/// node was when the action started
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Motion {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    /// Apply `other` after `self`
    fn then(self, other: Motion) -> Self {
        Self {
            translation: self.translation + other.translation,
            rotation: other.rotation * self.rotation,
        }
    }
}

/// A relative animation on a scene node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    MoveBy {
        delta: Vec3,
        duration: f32,
        easing: Easing,
    },
    RotateBy {
        axis: Vec3,
        /// Radians
        angle: f32,
        duration: f32,
        easing: Easing,
    },
    /// Children run one after another
    Sequence(Vec<Action>),
    /// Children run together; the group lasts as long as its longest child
    Group(Vec<Action>),
}

impl Action {
    pub fn move_by(delta: Vec3, duration: f32, easing: Easing) -> Self {
        Action::MoveBy {
            delta,
            duration,
            easing,
        }
    }

    pub fn rotate_by(axis: Vec3, angle: f32, duration: f32, easing: Easing) -> Self {
        Action::RotateBy {
            axis: axis.normalize_or_zero(),
            angle,
            duration,
            easing,
        }
    }

    /// Total running time in seconds
    pub fn duration(&self) -> f32 {
        match self {
            Action::MoveBy { duration, .. } | Action::RotateBy { duration, .. } => {
                duration.max(0.0)
            }
            Action::Sequence(children) => children.iter().map(Action::duration).sum(),
            Action::Group(children) => children
                .iter()
                .map(Action::duration)
                .fold(0.0, f32::max),
        }
    }

    /// Offset from the start pose after `t` seconds (clamped to the action's span)
    pub fn sample(&self, t: f32) -> Motion {
        match self {
            Action::MoveBy {
                delta,
                duration,
                easing,
            } => Motion {
                translation: *delta * easing.apply(progress(t, *duration)),
                rotation: Quat::IDENTITY,
            },
            Action::RotateBy {
                axis,
                angle,
                duration,
                easing,
            } => {
                if *axis == Vec3::ZERO {
                    return Motion::IDENTITY;
                }
                Motion {
                    translation: Vec3::ZERO,
                    rotation: Quat::from_axis_angle(*axis, angle * easing.apply(progress(t, *duration))),
                }
            }
            Action::Sequence(children) => {
                let mut motion = Motion::IDENTITY;
                let mut start = 0.0;
                for child in children {
                    if t < start {
                        break;
                    }
                    motion = motion.then(child.sample(t - start));
                    start += child.duration();
                }
                motion
            }
            Action::Group(children) => children
                .iter()
                .fold(Motion::IDENTITY, |motion, child| motion.then(child.sample(t))),
        }
    }

    /// Total rotation angle about `axis` once the action completes (radians).
    /// Rotations about other axes are ignored.
    pub fn total_angle_about(&self, axis: Vec3) -> f32 {
        match self {
            Action::MoveBy { .. } => 0.0,
            Action::RotateBy {
                axis: a, angle, ..
            } => {
                if a.abs_diff_eq(axis.normalize_or_zero(), 1e-6) {
                    *angle
                } else {
                    0.0
                }
            }
            Action::Sequence(children) | Action::Group(children) => {
                children.iter().map(|c| c.total_angle_about(axis)).sum()
            }
        }
    }
}

/// Linear progress of `t` through a span of `duration` seconds
fn progress(t: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        1.0
    } else {
        (t / duration).clamp(0.0, 1.0)
    }
}
