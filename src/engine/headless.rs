//! In-memory AR engine
//!
//! No camera feed and no renderer: the world is a list of horizontal planes,
//! the camera is a pinhole at a fixed pose, and actions are sampled on
//! [`HeadlessEngine::advance`]. Good enough to drive a session end to end.

use std::collections::{BTreeMap, HashMap, HashSet};

use glam::{Quat, Vec2, Vec3};

use super::{ArEngine, EngineError, ModelAsset, NodeId, PlaneDetection, TrackingConfig};
use crate::sim::action::Action;
use crate::sim::plane::{AnchorId, PlaneAnchor, PlaneOverlay};

/// Rays closer than this to parallel with a plane never hit it
const PARALLEL_EPSILON: f32 = 1e-6;

/// Pinhole camera
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub position: Vec3,
    pub forward: Vec3,
    pub up: Vec3,
    /// Vertical field of view (radians)
    pub vfov: f32,
    /// Screen size in points
    pub viewport: Vec2,
}

impl Default for Camera {
    /// Held at chest height, looking 45° down at the floor
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.4, 0.0),
            forward: Vec3::new(0.0, -1.0, -1.0).normalize(),
            up: Vec3::Y,
            vfov: 60f32.to_radians(),
            viewport: Vec2::new(390.0, 844.0),
        }
    }
}

impl Camera {
    /// World-space ray (origin, unit direction) through a screen point.
    /// Screen origin is top-left, y grows downward.
    pub fn ray(&self, point: Vec2) -> (Vec3, Vec3) {
        let ndc = Vec2::new(
            2.0 * point.x / self.viewport.x - 1.0,
            1.0 - 2.0 * point.y / self.viewport.y,
        );
        let aspect = self.viewport.x / self.viewport.y;
        let half_h = (self.vfov * 0.5).tan();
        let forward = self.forward.normalize();
        let right = forward.cross(self.up).normalize();
        let up = right.cross(forward);
        let dir = forward + right * (ndc.x * half_h * aspect) + up * (ndc.y * half_h);
        (self.position, dir.normalize())
    }

    /// Screen center
    pub fn center(&self) -> Vec2 {
        self.viewport * 0.5
    }
}

#[derive(Debug, Clone)]
struct SceneNode {
    name: String,
    position: Vec3,
    rotation: Quat,
    attached: bool,
}

#[derive(Debug, Clone)]
struct RunningAction {
    node: NodeId,
    action: Action,
    elapsed: f32,
    base_position: Vec3,
    base_rotation: Quat,
}

/// Headless engine used by tests and the native demo
#[derive(Debug, Default)]
pub struct HeadlessEngine {
    pub camera: Camera,
    config: Option<TrackingConfig>,
    running: bool,
    /// Planes tracking has found
    planes: Vec<PlaneAnchor>,
    /// Scene/node pairs that can be loaded
    assets: HashSet<(String, String)>,
    nodes: HashMap<NodeId, SceneNode>,
    actions: Vec<RunningAction>,
    overlays: BTreeMap<AnchorId, PlaneOverlay>,
    next_id: u64,
}

impl HeadlessEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a loadable model
    pub fn with_asset(mut self, asset: &ModelAsset) -> Self {
        self.assets.insert((asset.scene.clone(), asset.node.clone()));
        self
    }

    /// Simulate tracking finding a plane. Returns the anchor so the caller can
    /// forward it to the session as an `AnchorAdded` event.
    pub fn detect_plane(&mut self, center: Vec3, width: f32, depth: f32) -> PlaneAnchor {
        self.next_id += 1;
        let anchor = PlaneAnchor {
            id: AnchorId(self.next_id),
            center,
            extent: Vec3::new(width, 0.0, depth),
        };
        self.planes.push(anchor);
        anchor
    }

    /// Simulate tracking refining a plane's extent
    pub fn grow_plane(&mut self, id: AnchorId, width: f32, depth: f32) -> Option<PlaneAnchor> {
        let plane = self.planes.iter_mut().find(|p| p.id == id)?;
        plane.extent = Vec3::new(width, 0.0, depth);
        Some(*plane)
    }

    /// Simulate tracking dropping a plane
    pub fn lose_plane(&mut self, id: AnchorId) -> Option<PlaneAnchor> {
        let index = self.planes.iter().position(|p| p.id == id)?;
        Some(self.planes.remove(index))
    }

    /// Advance running actions by `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        for running in &mut self.actions {
            running.elapsed += dt;
            let motion = running.action.sample(running.elapsed);
            if let Some(node) = self.nodes.get_mut(&running.node) {
                node.position = running.base_position + motion.translation;
                node.rotation = motion.rotation * running.base_rotation;
            }
        }
        self.actions
            .retain(|running| running.elapsed < running.action.duration());
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn config(&self) -> Option<&TrackingConfig> {
        self.config.as_ref()
    }

    /// Nodes currently attached to the scene root
    pub fn scene_node_count(&self) -> usize {
        self.nodes.values().filter(|n| n.attached).count()
    }

    pub fn node_name(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(&node).map(|n| n.name.as_str())
    }

    pub fn node_position(&self, node: NodeId) -> Option<Vec3> {
        self.nodes.get(&node).map(|n| n.position)
    }

    pub fn node_rotation(&self, node: NodeId) -> Option<Quat> {
        self.nodes.get(&node).map(|n| n.rotation)
    }

    pub fn active_actions(&self) -> usize {
        self.actions.len()
    }

    pub fn overlay(&self, anchor: AnchorId) -> Option<&PlaneOverlay> {
        self.overlays.get(&anchor)
    }

    pub fn overlay_count(&self) -> usize {
        self.overlays.len()
    }

    fn node_mut(&mut self, node: NodeId) -> Result<&mut SceneNode, EngineError> {
        self.nodes
            .get_mut(&node)
            .ok_or(EngineError::UnknownNode(node))
    }
}

impl ArEngine for HeadlessEngine {
    fn run(&mut self, config: &TrackingConfig) {
        log::info!("Tracking started: {:?}", config);
        self.config = Some(*config);
        self.running = true;
    }

    fn pause(&mut self) {
        log::info!("Tracking paused");
        self.running = false;
    }

    fn hit_test(&self, point: Vec2) -> Option<Vec3> {
        let detecting = self
            .config
            .is_some_and(|c| c.plane_detection == PlaneDetection::Horizontal);
        if !self.running || !detecting {
            return None;
        }

        let (origin, dir) = self.camera.ray(point);
        if dir.y.abs() < PARALLEL_EPSILON {
            return None;
        }

        self.planes
            .iter()
            .filter_map(|plane| {
                let t = (plane.center.y - origin.y) / dir.y;
                if t <= 0.0 {
                    return None;
                }
                let hit = origin + dir * t;
                plane.contains_xz(hit).then_some((t, hit))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, hit)| hit)
    }

    fn load_model(&mut self, asset: &ModelAsset) -> Result<NodeId, EngineError> {
        if !self.assets.contains(&(asset.scene.clone(), asset.node.clone())) {
            return Err(EngineError::AssetNotFound {
                scene: asset.scene.clone(),
                node: asset.node.clone(),
            });
        }
        self.next_id += 1;
        let id = NodeId(self.next_id);
        self.nodes.insert(
            id,
            SceneNode {
                name: asset.node.clone(),
                position: Vec3::ZERO,
                rotation: Quat::IDENTITY,
                attached: false,
            },
        );
        Ok(id)
    }

    fn add_node(&mut self, node: NodeId) -> Result<(), EngineError> {
        self.node_mut(node)?.attached = true;
        Ok(())
    }

    fn set_position(&mut self, node: NodeId, position: Vec3) -> Result<(), EngineError> {
        let scene_node = self.node_mut(node)?;
        let shift = position - scene_node.position;
        scene_node.position = position;
        // Keep in-flight actions relative to the new spot
        for running in self.actions.iter_mut().filter(|r| r.node == node) {
            running.base_position += shift;
        }
        Ok(())
    }

    fn run_action(&mut self, node: NodeId, action: Action) -> Result<(), EngineError> {
        let scene_node = self.nodes.get(&node).ok_or(EngineError::UnknownNode(node))?;
        self.actions.push(RunningAction {
            node,
            action,
            elapsed: 0.0,
            base_position: scene_node.position,
            base_rotation: scene_node.rotation,
        });
        Ok(())
    }

    fn add_plane_overlay(&mut self, anchor: AnchorId, overlay: &PlaneOverlay) {
        self.overlays.insert(anchor, *overlay);
    }

    fn update_plane_overlay(&mut self, anchor: AnchorId, overlay: &PlaneOverlay) {
        self.overlays.insert(anchor, *overlay);
    }

    fn remove_plane_overlay(&mut self, anchor: AnchorId) {
        self.overlays.remove(&anchor);
    }
}
