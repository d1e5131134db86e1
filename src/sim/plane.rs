//! Detected horizontal planes and their translucent overlays

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::consts::PLANE_OVERLAY_RGBA;

/// Engine-assigned anchor identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnchorId(pub u64);

/// A horizontal plane anchor reported by tracking
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaneAnchor {
    pub id: AnchorId,
    /// Center of the plane in world space
    pub center: Vec3,
    /// Size along each axis; only x (width) and z (depth) are meaningful
    pub extent: Vec3,
}

impl PlaneAnchor {
    /// Whether a world point on the plane's height lies within its extent
    pub fn contains_xz(&self, point: Vec3) -> bool {
        let half = Vec2::new(self.extent.x, self.extent.z) * 0.5;
        let d = Vec2::new(point.x - self.center.x, point.z - self.center.z).abs();
        d.x <= half.x && d.y <= half.y
    }
}

/// The visual outline drawn for a plane anchor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaneOverlay {
    pub width: f32,
    pub height: f32,
    pub position: Vec3,
    /// Rotation about X; -π/2 lays the quad flat on the plane
    pub euler_x: f32,
    pub rgba: [f32; 4],
}

impl PlaneOverlay {
    pub fn for_anchor(anchor: &PlaneAnchor) -> Self {
        Self {
            width: anchor.extent.x,
            height: anchor.extent.z,
            position: anchor.center,
            euler_x: -std::f32::consts::FRAC_PI_2,
            rgba: PLANE_OVERLAY_RGBA,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor() -> PlaneAnchor {
        PlaneAnchor {
            id: AnchorId(1),
            center: Vec3::new(1.0, -0.5, 2.0),
            extent: Vec3::new(2.0, 0.0, 1.0),
        }
    }

    #[test]
    fn test_overlay_mirrors_anchor() {
        let overlay = PlaneOverlay::for_anchor(&anchor());
        assert_eq!(overlay.width, 2.0);
        assert_eq!(overlay.height, 1.0);
        assert_eq!(overlay.position, Vec3::new(1.0, -0.5, 2.0));
        assert!((overlay.euler_x + std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert_eq!(overlay.rgba[3], 0.5);
    }

    #[test]
    fn test_contains_xz() {
        let a = anchor();
        assert!(a.contains_xz(Vec3::new(1.0, -0.5, 2.0)));
        assert!(a.contains_xz(Vec3::new(1.9, -0.5, 2.4)));
        assert!(!a.contains_xz(Vec3::new(2.1, -0.5, 2.0)));
        assert!(!a.contains_xz(Vec3::new(1.0, -0.5, 2.6)));
    }
}
