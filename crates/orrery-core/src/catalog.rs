//! Static body catalog: the star and its planets, loadable from RON.
//!
//! The catalog is read once at startup and never mutated by the simulation.
//! Cosmetic attachments (rings, atmosphere shells) ride along as
//! [`Decoration`]s for the rendering side; the core ignores them.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::focus::{OVERVIEW, STAR};

/// Smallest size a body may have after sanitizing.
pub const MIN_BODY_SIZE: f64 = 1e-3;

/// Errors raised while loading or validating a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog: {0}")]
    ReadError(#[source] std::io::Error),

    /// The catalog is not valid RON.
    #[error("failed to parse catalog: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    /// A body has an empty name.
    #[error("catalog contains a body with an empty name")]
    EmptyName,

    /// Two bodies share a name (compared case-insensitively).
    #[error("duplicate body name `{0}`")]
    DuplicateName(String),

    /// A planet uses a name reserved for a focus target.
    #[error("body name `{0}` is reserved")]
    ReservedName(String),
}

/// Cosmetic attachment drawn with a body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Decoration {
    /// Flat ring in the body's equatorial plane, radii relative to body size.
    Ring {
        /// Inner radius as a multiple of body size.
        inner_scale: f64,
        /// Outer radius as a multiple of body size.
        outer_scale: f64,
    },
    /// Translucent shell slightly larger than the body.
    Atmosphere {
        /// Shell radius as a multiple of body size.
        shell_scale: f64,
        /// Shell opacity in [0, 1].
        opacity: f32,
    },
}

/// One catalog entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodyDef {
    /// Symbolic name, also the focus-target identifier.
    pub name: String,
    /// Render radius.
    pub size: f64,
    /// Orbital radius from the system origin.
    #[serde(default)]
    pub distance: f64,
    /// Axial tilt in degrees.
    #[serde(default)]
    pub tilt_deg: f64,
    /// Self-rotation in radians per nominal tick. Negative spins retrograde.
    #[serde(default)]
    pub rotation_rate: f64,
    /// Revolution in radians per nominal tick.
    #[serde(default)]
    pub revolution_rate: f64,
    /// Revolution phase at startup, in degrees.
    #[serde(default)]
    pub start_angle_deg: f64,
    /// Cosmetic attachments.
    #[serde(default)]
    pub decorations: Vec<Decoration>,
}

impl BodyDef {
    /// Creates a bare entry with no decorations.
    pub fn new(
        name: impl Into<String>,
        size: f64,
        distance: f64,
        tilt_deg: f64,
        rotation_rate: f64,
        revolution_rate: f64,
        start_angle_deg: f64,
    ) -> Self {
        Self {
            name: name.into(),
            size,
            distance,
            tilt_deg,
            rotation_rate,
            revolution_rate,
            start_angle_deg,
            decorations: Vec::new(),
        }
    }

    /// Attaches a decoration.
    pub fn with_decoration(mut self, decoration: Decoration) -> Self {
        self.decorations.push(decoration);
        self
    }

    /// Returns a copy with degenerate numeric fields clamped.
    ///
    /// Non-positive or non-finite sizes become [`MIN_BODY_SIZE`]; negative or
    /// non-finite distances become `0`; non-finite angles and rates become `0`.
    pub fn sanitized(&self) -> Self {
        let mut def = self.clone();
        if !(def.size.is_finite() && def.size > 0.0) {
            warn!(body = %def.name, size = def.size, "degenerate body size, clamping");
            def.size = MIN_BODY_SIZE;
        }
        if !(def.distance.is_finite() && def.distance >= 0.0) {
            warn!(body = %def.name, distance = def.distance, "degenerate orbital distance, clamping");
            def.distance = 0.0;
        }
        for value in [
            &mut def.tilt_deg,
            &mut def.rotation_rate,
            &mut def.revolution_rate,
            &mut def.start_angle_deg,
        ] {
            if !value.is_finite() {
                *value = 0.0;
            }
        }
        def
    }

    /// Returns the ring decoration, if any.
    pub fn ring(&self) -> Option<&Decoration> {
        self.decorations
            .iter()
            .find(|d| matches!(d, Decoration::Ring { .. }))
    }

    /// Returns the atmosphere decoration, if any.
    pub fn atmosphere(&self) -> Option<&Decoration> {
        self.decorations
            .iter()
            .find(|d| matches!(d, Decoration::Atmosphere { .. }))
    }
}

/// The full static catalog: one star at the origin plus orbiting planets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// The central star. Its distance and revolution are ignored.
    pub star: BodyDef,
    /// Planets in display order.
    pub planets: Vec<BodyDef>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// The built-in solar system.
    pub fn builtin() -> Self {
        Self {
            star: BodyDef::new("Sun", 2.0, 0.0, 0.0, 0.001, 0.0, 0.0),
            planets: vec![
                BodyDef::new("Mercury", 0.38, 3.5, 0.03, 0.004, 0.0415, 0.0),
                BodyDef::new("Venus", 0.95, 4.8, 177.4, -0.002, 0.0163, 45.0).with_decoration(
                    Decoration::Atmosphere {
                        shell_scale: 1.01,
                        opacity: 0.8,
                    },
                ),
                BodyDef::new("Earth", 1.0, 6.0, 23.5, 0.05, 0.01, 0.0),
                BodyDef::new("Mars", 0.53, 9.0, 25.0, 0.03, 0.0053, 0.0),
                BodyDef::new("Jupiter", 2.2, 14.0, 3.1, 0.12, 0.00084, 120.0),
                BodyDef::new("Saturn", 1.9, 19.0, 26.7, 0.11, 0.00034, 200.0).with_decoration(
                    Decoration::Ring {
                        inner_scale: 1.4,
                        outer_scale: 2.4,
                    },
                ),
                BodyDef::new("Uranus", 1.3, 24.0, 97.8, -0.07, 0.00012, 300.0),
                BodyDef::new("Neptune", 1.25, 28.0, 28.3, 0.075, 0.00006, 60.0),
            ],
        }
    }

    /// Parses and validates a catalog from RON text.
    pub fn from_ron_str(text: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = ron::from_str(text).map_err(CatalogError::ParseError)?;
        catalog.validated()
    }

    /// Loads and validates a catalog from a RON file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path).map_err(CatalogError::ReadError)?;
        Self::from_ron_str(&text)
    }

    /// Checks naming rules and clamps degenerate numeric fields.
    pub fn validated(self) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        let star = self.star.sanitized();
        check_name(&star.name, &mut seen)?;

        let mut planets = Vec::with_capacity(self.planets.len());
        for def in &self.planets {
            let lowered = def.name.to_ascii_lowercase();
            if lowered == OVERVIEW || lowered == STAR {
                return Err(CatalogError::ReservedName(def.name.clone()));
            }
            check_name(&def.name, &mut seen)?;
            planets.push(def.sanitized());
        }

        Ok(Self { star, planets })
    }

    /// Iterates the star followed by every planet.
    pub fn bodies(&self) -> impl Iterator<Item = &BodyDef> {
        std::iter::once(&self.star).chain(self.planets.iter())
    }
}

fn check_name(name: &str, seen: &mut HashSet<String>) -> Result<(), CatalogError> {
    if name.trim().is_empty() {
        return Err(CatalogError::EmptyName);
    }
    if !seen.insert(name.to_ascii_lowercase()) {
        return Err(CatalogError::DuplicateName(name.to_string()));
    }
    Ok(())
}
