//! Animation and camera-choreography core for the orrery.
//!
//! Everything here is renderer-free: bodies advance through a pure transform
//! each tick, the focus registry maps symbolic targets to world anchors, and
//! the camera choreographer eases the live pose toward the pending one.
//! Scheduling and rendering live in `orrery-ecs` and its collaborators.

pub mod body;
pub mod catalog;
pub mod choreographer;
pub mod clock;
pub mod focus;
pub mod interaction;

pub use body::{Body, BodySystem, BodyTransform, wrap_angle};
pub use catalog::{BodyDef, Catalog, CatalogError, Decoration, MIN_BODY_SIZE};
pub use choreographer::{
    CameraChoreographer, CameraPose, ChoreographerState, ChoreographyParams,
};
pub use clock::{MAX_FRAME_TIME, NOMINAL_TICK_HZ, SimulationClock, TimeMode};
pub use focus::{
    Anchor, FocusError, FocusId, FocusParams, FocusRegistry, FocusTarget, MIN_STANDOFF, OVERVIEW,
    STAR,
};
pub use interaction::InteractionTracker;
