//! Body Transform Model: per-body kinematics advanced once per frame.
//!
//! Each body is composed as revolution group → tilt frame → self-rotation
//! frame. The revolution only moves the tilt frame around the origin; the
//! tilt itself is fixed in world space, so a body's spin axis keeps its
//! direction at every orbital phase.

use std::f64::consts::TAU;

use glam::{DQuat, DVec3};

use crate::catalog::{BodyDef, Catalog};

/// Wraps an angle into `[0, TAU)`.
///
/// Angles are only consumed through trigonometric transforms, so wrapping
/// keeps them bounded over long sessions without changing any output.
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid rounds tiny negative inputs up to exactly TAU.
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Kinematic state of one celestial body.
///
/// Values are immutable: [`Body::advanced`] returns the next state.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    name: String,
    size: f64,
    distance: f64,
    tilt: f64,
    rotation_rate: f64,
    revolution_rate: f64,
    start_angle: f64,
    revolution_angle: f64,
    rotation_angle: f64,
}

/// Snapshot of a body's transform, handed to the renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct BodyTransform {
    /// Body name.
    pub name: String,
    /// World position of the tilt frame (post-revolution, pre-spin).
    pub position: DVec3,
    /// Current revolution angle in radians.
    pub revolution_angle: f64,
    /// Current self-rotation angle in radians.
    pub rotation_angle: f64,
    /// Axial tilt in radians.
    pub tilt: f64,
    /// World orientation: tilt frame composed with self-rotation.
    pub orientation: DQuat,
}

impl Body {
    /// Builds the initial state of a body from its catalog entry.
    pub fn from_def(def: &BodyDef) -> Self {
        let def = def.sanitized();
        let start_angle = wrap_angle(def.start_angle_deg.to_radians());
        Self {
            name: def.name,
            size: def.size,
            distance: def.distance,
            tilt: def.tilt_deg.to_radians(),
            rotation_rate: def.rotation_rate,
            revolution_rate: def.revolution_rate,
            start_angle,
            revolution_angle: start_angle,
            rotation_angle: 0.0,
        }
    }

    /// Returns the state after `step` nominal ticks at `speed_multiplier`.
    ///
    /// Both angles move by `rate * speed_multiplier * step`. Negative rates
    /// are kept as-is.
    #[must_use]
    pub fn advanced(&self, step: f64, speed_multiplier: f64) -> Self {
        let scaled = step * speed_multiplier;
        if !scaled.is_finite() || scaled == 0.0 {
            return self.clone();
        }
        Self {
            revolution_angle: wrap_angle(self.revolution_angle + self.revolution_rate * scaled),
            rotation_angle: wrap_angle(self.rotation_angle + self.rotation_rate * scaled),
            ..self.clone()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Axial tilt in radians.
    pub fn tilt(&self) -> f64 {
        self.tilt
    }

    pub fn rotation_rate(&self) -> f64 {
        self.rotation_rate
    }

    pub fn revolution_rate(&self) -> f64 {
        self.revolution_rate
    }

    /// Initial revolution phase in radians.
    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    pub fn revolution_angle(&self) -> f64 {
        self.revolution_angle
    }

    pub fn rotation_angle(&self) -> f64 {
        self.rotation_angle
    }

    /// World position of the tilt frame: `(d cos θ, 0, d sin θ)`.
    pub fn tilt_frame_position(&self) -> DVec3 {
        let (sin, cos) = self.revolution_angle.sin_cos();
        DVec3::new(self.distance * cos, 0.0, self.distance * sin)
    }

    /// Orientation of the tilt frame. Independent of revolution.
    pub fn tilt_frame(&self) -> DQuat {
        DQuat::from_rotation_z(self.tilt)
    }

    /// Full world orientation of the body mesh.
    pub fn orientation(&self) -> DQuat {
        self.tilt_frame() * DQuat::from_rotation_y(self.rotation_angle)
    }

    /// Unit spin axis in world space.
    pub fn spin_axis(&self) -> DVec3 {
        self.tilt_frame() * DVec3::Y
    }

    pub fn transform(&self) -> BodyTransform {
        BodyTransform {
            name: self.name.clone(),
            position: self.tilt_frame_position(),
            revolution_angle: self.revolution_angle,
            rotation_angle: self.rotation_angle,
            tilt: self.tilt,
            orientation: self.orientation(),
        }
    }
}

/// The star plus every planet, advanced together once per frame.
#[derive(Clone, Debug)]
pub struct BodySystem {
    star: Body,
    planets: Vec<Body>,
}

impl BodySystem {
    /// Builds the initial body states from a catalog.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self {
            star: Body::from_def(&catalog.star),
            planets: catalog.planets.iter().map(Body::from_def).collect(),
        }
    }

    /// Advances every body by `step` nominal ticks at `speed_multiplier`.
    pub fn advance(&mut self, step: f64, speed_multiplier: f64) {
        self.star = self.star.advanced(step, speed_multiplier);
        for planet in &mut self.planets {
            *planet = planet.advanced(step, speed_multiplier);
        }
    }

    pub fn star(&self) -> &Body {
        &self.star
    }

    pub fn planets(&self) -> &[Body] {
        &self.planets
    }

    pub fn planet(&self, index: usize) -> Option<&Body> {
        self.planets.get(index)
    }

    /// Finds a planet index by name, ignoring ASCII case.
    pub fn planet_index(&self, name: &str) -> Option<usize> {
        self.planets
            .iter()
            .position(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Iterates the star followed by every planet.
    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        std::iter::once(&self.star).chain(self.planets.iter())
    }

    /// Transforms of every body, star first.
    pub fn transforms(&self) -> Vec<BodyTransform> {
        self.iter().map(Body::transform).collect()
    }
}
