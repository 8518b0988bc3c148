//! Focus Registry: symbolic camera targets and where they are in the world.

use std::fmt;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::body::BodySystem;

/// Identifier of the whole-system view.
pub const OVERVIEW: &str = "overview";
/// Identifier of the central star.
pub const STAR: &str = "star";
/// Smallest standoff distance the registry hands out.
pub const MIN_STANDOFF: f64 = 1e-3;

/// Errors from resolving focus targets.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FocusError {
    /// No target is registered under this identifier.
    #[error("unknown focus target `{0}`")]
    UnknownTarget(String),
}

/// Symbolic focus identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FocusId {
    Overview,
    Star,
    Body(String),
}

impl fmt::Display for FocusId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FocusId::Overview => f.write_str(OVERVIEW),
            FocusId::Star => f.write_str(STAR),
            FocusId::Body(name) => f.write_str(name),
        }
    }
}

/// What a focus target's world position follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    /// The system origin. Never moves.
    Origin,
    /// The tilt frame of the planet at this index in the [`BodySystem`].
    Planet(usize),
}

/// A resolvable camera target.
#[derive(Clone, Debug, PartialEq)]
pub struct FocusTarget {
    pub id: FocusId,
    pub anchor: Anchor,
    /// Preferred camera distance from the anchor.
    pub standoff: f64,
}

impl FocusTarget {
    /// Whether the anchor moves with the simulation.
    pub fn is_moving(&self) -> bool {
        matches!(self.anchor, Anchor::Planet(_))
    }

    /// Current world position of the anchor.
    ///
    /// For planets this is the tilt-frame position, the point the camera
    /// orbits, not the spinning mesh origin.
    pub fn world_position(&self, bodies: &BodySystem) -> DVec3 {
        match self.anchor {
            Anchor::Origin => DVec3::ZERO,
            Anchor::Planet(index) => bodies
                .planet(index)
                .map_or(DVec3::ZERO, |body| body.tilt_frame_position()),
        }
    }
}

/// Standoff constants.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusParams {
    /// Multiplier on body size (`K`).
    pub standoff_scale: f64,
    /// Constant added after scaling (`C`).
    pub standoff_offset: f64,
    /// Standoff that frames the whole system.
    pub overview_distance: f64,
    /// Standoff used for the star.
    pub star_distance: f64,
}

impl Default for FocusParams {
    fn default() -> Self {
        Self {
            standoff_scale: 4.0,
            standoff_offset: 3.0,
            overview_distance: 40.0,
            star_distance: 10.0,
        }
    }
}

impl FocusParams {
    /// Standoff for a planet of the given size: `size * K + C`, clamped positive.
    pub fn planet_standoff(&self, size: f64) -> f64 {
        clamp_standoff(size * self.standoff_scale + self.standoff_offset)
    }
}

fn clamp_standoff(distance: f64) -> f64 {
    if distance.is_finite() && distance > MIN_STANDOFF {
        distance
    } else {
        MIN_STANDOFF
    }
}

/// Static lookup from target identifier to [`FocusTarget`].
///
/// Built once from the body system; only the anchors' positions change
/// afterwards.
#[derive(Clone, Debug)]
pub struct FocusRegistry {
    targets: Vec<FocusTarget>,
    star_name: String,
}

impl FocusRegistry {
    /// Registers `overview`, `star`, and every planet.
    pub fn new(bodies: &BodySystem, params: &FocusParams) -> Self {
        let mut targets = Vec::with_capacity(bodies.planets().len() + 2);
        targets.push(FocusTarget {
            id: FocusId::Overview,
            anchor: Anchor::Origin,
            standoff: clamp_standoff(params.overview_distance),
        });
        targets.push(FocusTarget {
            id: FocusId::Star,
            anchor: Anchor::Origin,
            standoff: clamp_standoff(params.star_distance),
        });
        for (index, planet) in bodies.planets().iter().enumerate() {
            targets.push(FocusTarget {
                id: FocusId::Body(planet.name().to_string()),
                anchor: Anchor::Planet(index),
                standoff: params.planet_standoff(planet.size()),
            });
        }
        Self {
            targets,
            star_name: bodies.star().name().to_string(),
        }
    }

    /// Looks up a target by identifier, ignoring ASCII case.
    ///
    /// The star answers to both `star` and its catalog name.
    pub fn resolve(&self, target_id: &str) -> Result<&FocusTarget, FocusError> {
        let id = target_id.trim();
        let wanted = if id.eq_ignore_ascii_case(OVERVIEW) {
            FocusId::Overview
        } else if id.eq_ignore_ascii_case(STAR) || id.eq_ignore_ascii_case(&self.star_name) {
            FocusId::Star
        } else {
            return self
                .targets
                .iter()
                .find(|t| matches!(&t.id, FocusId::Body(name) if name.eq_ignore_ascii_case(id)))
                .ok_or_else(|| FocusError::UnknownTarget(target_id.to_string()));
        };
        self.targets
            .iter()
            .find(|t| t.id == wanted)
            .ok_or_else(|| FocusError::UnknownTarget(target_id.to_string()))
    }

    /// The whole-system target.
    pub fn overview(&self) -> &FocusTarget {
        &self.targets[0]
    }

    /// Current world position of a target.
    pub fn world_position_of(&self, target: &FocusTarget, bodies: &BodySystem) -> DVec3 {
        target.world_position(bodies)
    }

    pub fn targets(&self) -> &[FocusTarget] {
        &self.targets
    }
}
