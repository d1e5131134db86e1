//! Tap and swipe recognition from raw pointer strokes
//!
//! Hosts with a platform gesture recognizer can send taps and swipes straight
//! to the session. Hosts that only see pointer down/up (touch screens in a
//! browser, a mouse) run them through a [`StrokeTracker`] first.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Direction of a swipe in screen space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
    Down,
}

/// A recognized gesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// Short press that barely moved, at the given screen point
    Tap(Vec2),
    Swipe {
        direction: SwipeDirection,
        /// Points per second
        velocity: f32,
    },
}

/// Recognition thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Movement (points) a tap may wander
    pub tap_slop: f32,
    /// Longest press still counted as a tap (seconds)
    pub tap_max_secs: f32,
    /// Shortest travel for a swipe (points)
    pub swipe_min_distance: f32,
    /// Slowest average speed for a swipe (points/second)
    pub swipe_min_velocity: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            tap_slop: 10.0,
            tap_max_secs: 0.3,
            swipe_min_distance: 50.0,
            swipe_min_velocity: 300.0,
        }
    }
}

/// One pointer press, from down to up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub start: Vec2,
    pub end: Vec2,
    pub duration_secs: f32,
}

impl Stroke {
    /// Classify the stroke, or `None` if it is neither a tap nor a swipe
    pub fn classify(&self, config: &GestureConfig) -> Option<Gesture> {
        let delta = self.end - self.start;
        let distance = delta.length();

        if distance <= config.tap_slop && self.duration_secs <= config.tap_max_secs {
            return Some(Gesture::Tap(self.start));
        }

        if distance < config.swipe_min_distance || self.duration_secs <= 0.0 {
            return None;
        }
        let velocity = distance / self.duration_secs;
        if velocity < config.swipe_min_velocity {
            return None;
        }

        // Screen y grows downward
        let direction = if delta.x.abs() > delta.y.abs() {
            if delta.x > 0.0 { SwipeDirection::Right } else { SwipeDirection::Left }
        } else if delta.y < 0.0 {
            SwipeDirection::Up
        } else {
            SwipeDirection::Down
        };

        Some(Gesture::Swipe {
            direction,
            velocity,
        })
    }
}

/// Turns pointer down/up pairs into gestures
#[derive(Debug, Clone, Default)]
pub struct StrokeTracker {
    config: GestureConfig,
    /// Where and when (seconds) the current press began
    pressed: Option<(Vec2, f64)>,
}

impl StrokeTracker {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            pressed: None,
        }
    }

    pub fn pointer_down(&mut self, pos: Vec2, time_secs: f64) {
        self.pressed = Some((pos, time_secs));
    }

    /// Finish the press; returns the gesture it formed, if any
    pub fn pointer_up(&mut self, pos: Vec2, time_secs: f64) -> Option<Gesture> {
        let (start, started_at) = self.pressed.take()?;
        Stroke {
            start,
            end: pos,
            duration_secs: (time_secs - started_at).max(0.0) as f32,
        }
        .classify(&self.config)
    }

    /// Drop the current press (pointer left the surface, touch cancelled)
    pub fn cancel(&mut self) {
        self.pressed = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stroke(start: (f32, f32), end: (f32, f32), secs: f32) -> Stroke {
        Stroke {
            start: Vec2::new(start.0, start.1),
            end: Vec2::new(end.0, end.1),
            duration_secs: secs,
        }
    }

    #[test]
    fn test_tap() {
        let config = GestureConfig::default();
        assert_eq!(
            stroke((100.0, 200.0), (103.0, 198.0), 0.1).classify(&config),
            Some(Gesture::Tap(Vec2::new(100.0, 200.0)))
        );
    }

    #[test]
    fn test_long_press_is_not_a_tap() {
        let config = GestureConfig::default();
        assert_eq!(stroke((100.0, 200.0), (100.0, 200.0), 1.0).classify(&config), None);
    }

    #[test]
    fn test_swipe_up() {
        let config = GestureConfig::default();
        let g = stroke((200.0, 600.0), (210.0, 300.0), 0.2).classify(&config);
        match g {
            Some(Gesture::Swipe { direction, velocity }) => {
                assert_eq!(direction, SwipeDirection::Up);
                assert!(velocity > 1000.0);
            }
            other => panic!("expected swipe, got {:?}", other),
        }
    }

    #[test]
    fn test_swipe_directions() {
        let config = GestureConfig::default();
        let dir = |s: Stroke| match s.classify(&config) {
            Some(Gesture::Swipe { direction, .. }) => Some(direction),
            _ => None,
        };
        assert_eq!(dir(stroke((0.0, 0.0), (200.0, 20.0), 0.2)), Some(SwipeDirection::Right));
        assert_eq!(dir(stroke((200.0, 0.0), (0.0, 20.0), 0.2)), Some(SwipeDirection::Left));
        assert_eq!(dir(stroke((0.0, 0.0), (20.0, 200.0), 0.2)), Some(SwipeDirection::Down));
    }

    #[test]
    fn test_slow_drag_ignored() {
        let config = GestureConfig::default();
        // 300 points over 3 seconds is 100 pt/s
        assert_eq!(stroke((200.0, 600.0), (200.0, 300.0), 3.0).classify(&config), None);
    }

    #[test]
    fn test_tracker() {
        let mut tracker = StrokeTracker::new(GestureConfig::default());
        assert_eq!(tracker.pointer_up(Vec2::ZERO, 0.0), None);

        tracker.pointer_down(Vec2::new(50.0, 50.0), 1.0);
        assert_eq!(
            tracker.pointer_up(Vec2::new(51.0, 50.0), 1.05),
            Some(Gesture::Tap(Vec2::new(50.0, 50.0)))
        );

        tracker.pointer_down(Vec2::new(50.0, 50.0), 2.0);
        tracker.cancel();
        assert_eq!(tracker.pointer_up(Vec2::new(50.0, 400.0), 2.1), None);
    }
}
