//! ECS world setup, the ordered per-frame schedule, and the resources that
//! wrap the orrery core.
//!
//! Provides the [`World`](bevy_ecs::world::World) factory and the
//! [`OrrerySchedules`] runner that drives one frame: input, simulation,
//! camera, publish, render.

mod bodies;
mod camera;
mod input;
mod schedule;
mod snapshot;
mod systems;
mod time;
mod world;

pub use bodies::{Bodies, Focus};
pub use camera::CameraRig;
pub use input::{InputEvent, InputEvents, Interaction};
pub use schedule::{OrrerySchedules, Stage};
pub use snapshot::{FrameSnapshot, SHADER_TIME_SCALE};
pub use systems::{
    advance_bodies, advance_clock, process_input, publish_snapshot, register_core_systems,
    update_camera,
};
pub use time::{FrameTime, SimClock};
pub use world::{create_world, register_core_resources};
