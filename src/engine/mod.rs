//! AR engine abstraction
//!
//! World tracking, plane detection, hit-testing, the scene graph and action
//! playback all belong to the host platform. The session only talks to them
//! through [`ArEngine`], so the same logic runs against a native AR bridge or
//! against [`HeadlessEngine`] in tests and the demo binary.

pub mod headless;

pub use headless::{Camera, HeadlessEngine};

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::action::Action;
use crate::sim::plane::{AnchorId, PlaneOverlay};

/// Handle to a node in the engine's scene graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

/// A loadable 3D model: a scene file and the named node inside it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelAsset {
    pub scene: String,
    pub node: String,
}

/// Which planes tracking should detect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlaneDetection {
    None,
    #[default]
    Horizontal,
}

/// World-tracking session options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    pub plane_detection: PlaneDetection,
    /// Debug overlay of raw feature points
    pub show_feature_points: bool,
    /// Default scene lighting, updated from the camera feed
    pub auto_lighting: bool,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            plane_detection: PlaneDetection::Horizontal,
            show_feature_points: true,
            auto_lighting: true,
        }
    }
}

/// Engine operation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("model `{node}` not found in scene `{scene}`")]
    AssetNotFound { scene: String, node: String },

    #[error("unknown scene node {0:?}")]
    UnknownNode(NodeId),
}

/// The services a host AR engine provides to a session
pub trait ArEngine {
    /// Start (or restart) world tracking
    fn run(&mut self, config: &TrackingConfig);

    /// Suspend tracking
    fn pause(&mut self);

    /// Intersect the camera ray through a screen point with existing planes,
    /// honoring each plane's extent. Returns the nearest hit.
    fn hit_test(&self, point: Vec2) -> Option<Vec3>;

    /// Instantiate a model; the node is not yet part of the scene
    fn load_model(&mut self, asset: &ModelAsset) -> Result<NodeId, EngineError>;

    /// Attach a node to the scene root
    fn add_node(&mut self, node: NodeId) -> Result<(), EngineError>;

    fn set_position(&mut self, node: NodeId, position: Vec3) -> Result<(), EngineError>;

    /// Run an action on a node to completion
    fn run_action(&mut self, node: NodeId, action: Action) -> Result<(), EngineError>;

    fn add_plane_overlay(&mut self, anchor: AnchorId, overlay: &PlaneOverlay);

    fn update_plane_overlay(&mut self, anchor: AnchorId, overlay: &PlaneOverlay);

    fn remove_plane_overlay(&mut self, anchor: AnchorId);
}
