//! Body system and focus registry resources.

use bevy_ecs::prelude::*;
use orrery_core::{BodySystem, FocusRegistry};

/// Every simulated body. Mutated only by the simulation stage.
#[derive(Resource, Debug, Clone)]
pub struct Bodies(pub BodySystem);

/// Static lookup of camera targets.
#[derive(Resource, Debug, Clone)]
pub struct Focus(pub FocusRegistry);
