//! Camera resource wrapping the choreographer.

use bevy_ecs::prelude::*;
use orrery_core::CameraChoreographer;

/// The camera choreographer plus the manual-override flag derived from
/// interaction events this frame.
#[derive(Resource, Debug, Clone)]
pub struct CameraRig {
    pub choreographer: CameraChoreographer,
    /// True while the viewer is steering the camera (debounce included).
    pub manual_override: bool,
}

impl CameraRig {
    pub fn new(choreographer: CameraChoreographer) -> Self {
        Self {
            choreographer,
            manual_override: false,
        }
    }
}
