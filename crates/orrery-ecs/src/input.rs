//! Discrete input events queued between frames.

use bevy_ecs::prelude::*;
use orrery_core::{CameraPose, InteractionTracker};

/// An event from the input source, applied at the start of the next frame.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// The viewer picked a focus target (`overview`, `star`, or a body name).
    ViewChange(String),
    /// Pointer or touch went down on the view.
    InteractionStart,
    /// Pointer or touch was released.
    InteractionEnd,
    /// Pose produced by the free-navigation controls.
    ManualPose(CameraPose),
    /// Drop the focus constraint and navigate freely.
    ReleaseFocus,
    /// New value from the speed control.
    SetSpeed(f64),
}

/// Events queued since the last frame, drained by the input stage.
#[derive(Resource, Debug, Clone, Default)]
pub struct InputEvents {
    events: Vec<InputEvent>,
}

impl InputEvents {
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Queues a view change.
    pub fn request_view(&mut self, target_id: impl Into<String>) {
        self.events.push(InputEvent::ViewChange(target_id.into()));
    }

    /// Takes every queued event, in arrival order.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Press-and-hold tracker with release debounce.
#[derive(Resource, Debug, Clone, Default)]
pub struct Interaction(pub InteractionTracker);
