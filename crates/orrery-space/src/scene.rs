//! Assembled static scene data for one catalog.

use glam::DVec3;
use log::debug;
use orrery_core::Catalog;

use crate::decoration::{AtmosphereShell, RingGeometry, atmosphere_shell, ring_geometry};
use crate::orbit::orbit_polyline;
use crate::starfield::{StarPoint, StarfieldGenerator};

/// The orbit loop and decorations of one planet.
#[derive(Clone, Debug)]
pub struct OrbitLine {
    pub body: String,
    pub points: Vec<DVec3>,
    pub ring: Option<RingGeometry>,
    pub atmosphere: Option<AtmosphereShell>,
}

/// Everything the renderer builds once at startup.
#[derive(Clone, Debug)]
pub struct SpaceScene {
    pub stars: Vec<StarPoint>,
    pub orbits: Vec<OrbitLine>,
}

impl SpaceScene {
    /// Builds the starfield and one orbit loop per planet.
    pub fn build(
        catalog: &Catalog,
        star_seed: u64,
        star_count: u32,
        starfield_extent: f64,
        orbit_segments: u32,
    ) -> Self {
        let stars =
            StarfieldGenerator::new(star_seed, star_count, starfield_extent as f32).generate();
        let orbits = catalog
            .planets
            .iter()
            .map(|def| {
                let def = def.sanitized();
                OrbitLine {
                    points: orbit_polyline(def.distance, orbit_segments),
                    ring: def.ring().and_then(|d| ring_geometry(def.size, d)),
                    atmosphere: def.atmosphere().and_then(|d| atmosphere_shell(def.size, d)),
                    body: def.name,
                }
            })
            .collect::<Vec<_>>();
        debug!(
            "Built space scene: {} stars, {} orbit loops",
            stars.len(),
            orbits.len()
        );
        Self { stars, orbits }
    }

    pub fn orbit(&self, body: &str) -> Option<&OrbitLine> {
        self.orbits
            .iter()
            .find(|orbit| orbit.body.eq_ignore_ascii_case(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_core::BodySystem;

    #[test]
    fn test_one_orbit_per_planet() {
        let catalog = Catalog::builtin();
        let scene = SpaceScene::build(&catalog, 2024, 100, 2000.0, 100);
        assert_eq!(scene.stars.len(), 100);
        assert_eq!(scene.orbits.len(), catalog.planets.len());
        assert!(scene.orbit("saturn").unwrap().ring.is_some());
        assert!(scene.orbit("Venus").unwrap().atmosphere.is_some());
        assert!(scene.orbit("Earth").unwrap().ring.is_none());
    }

    #[test]
    fn test_planets_start_on_their_orbit() {
        let catalog = Catalog::builtin();
        let scene = SpaceScene::build(&catalog, 1, 0, 2000.0, 100);
        let bodies = BodySystem::from_catalog(&catalog);
        for planet in bodies.planets() {
            let orbit = scene.orbit(planet.name()).unwrap();
            let radius = orbit.points[0].length();
            assert!((planet.tilt_frame_position().length() - radius).abs() < 1e-9);
        }
    }
}
