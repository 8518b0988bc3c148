//! Read-only frame output for the render collaborator.

use bevy_ecs::prelude::*;
use orrery_core::{BodyTransform, CameraPose, ChoreographerState, FocusId};

/// Shader time advances this much per nominal tick of simulation time.
pub const SHADER_TIME_SCALE: f64 = 0.003;

/// Everything a renderer needs for one frame, published after the camera
/// stage. Render systems only ever read it.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    /// Index of the frame that produced this snapshot.
    pub frame: u64,
    /// Simulation time in nominal ticks.
    pub elapsed: f64,
    /// Time fed to flicker and wobble uniforms.
    pub shader_time: f64,
    /// Star first, then planets in catalog order.
    pub bodies: Vec<BodyTransform>,
    /// Live camera pose.
    pub camera: CameraPose,
    pub state: ChoreographerState,
    pub focus: FocusId,
}

impl FrameSnapshot {
    /// Looks up a body transform by name, ignoring ASCII case.
    pub fn body(&self, name: &str) -> Option<&BodyTransform> {
        self.bodies
            .iter()
            .find(|body| body.name.eq_ignore_ascii_case(name))
    }
}

pub(crate) fn shader_time(elapsed: f64) -> f64 {
    elapsed * SHADER_TIME_SCALE
}
