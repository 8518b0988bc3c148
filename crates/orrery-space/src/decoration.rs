//! Geometry of cosmetic body decorations.

use orrery_core::Decoration;

/// Flat ring in the body's equatorial plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingGeometry {
    pub inner_radius: f64,
    pub outer_radius: f64,
}

/// Translucent shell around a body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AtmosphereShell {
    pub radius: f64,
    pub opacity: f32,
}

/// Ring radii for a body of `size`, or `None` if `decoration` is not a ring.
///
/// Swapped bounds are reordered and negative scales count as zero.
pub fn ring_geometry(size: f64, decoration: &Decoration) -> Option<RingGeometry> {
    let Decoration::Ring {
        inner_scale,
        outer_scale,
    } = *decoration
    else {
        return None;
    };
    let a = scaled(size, inner_scale);
    let b = scaled(size, outer_scale);
    Some(RingGeometry {
        inner_radius: a.min(b),
        outer_radius: a.max(b),
    })
}

/// Shell radius and opacity for a body of `size`, or `None` if `decoration`
/// is not an atmosphere.
pub fn atmosphere_shell(size: f64, decoration: &Decoration) -> Option<AtmosphereShell> {
    let Decoration::Atmosphere {
        shell_scale,
        opacity,
    } = *decoration
    else {
        return None;
    };
    Some(AtmosphereShell {
        radius: scaled(size, shell_scale),
        opacity: if opacity.is_finite() {
            opacity.clamp(0.0, 1.0)
        } else {
            1.0
        },
    })
}

fn scaled(size: f64, scale: f64) -> f64 {
    let r = size * scale;
    if r.is_finite() { r.max(0.0) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_core::Catalog;

    #[test]
    fn test_builtin_saturn_ring() {
        let catalog = Catalog::builtin();
        let saturn = catalog.planets.iter().find(|p| p.name == "Saturn").unwrap();
        let ring = ring_geometry(saturn.size, saturn.ring().unwrap()).unwrap();
        assert!((ring.inner_radius - 1.9 * 1.4).abs() < 1e-12);
        assert!((ring.outer_radius - 1.9 * 2.4).abs() < 1e-12);
    }

    #[test]
    fn test_builtin_venus_atmosphere() {
        let catalog = Catalog::builtin();
        let venus = catalog.planets.iter().find(|p| p.name == "Venus").unwrap();
        let shell = atmosphere_shell(venus.size, venus.atmosphere().unwrap()).unwrap();
        assert!((shell.radius - 0.95 * 1.01).abs() < 1e-12);
        assert_eq!(shell.opacity, 0.8);
        assert!(ring_geometry(venus.size, venus.atmosphere().unwrap()).is_none());
    }

    #[test]
    fn test_swapped_ring_bounds_are_reordered() {
        let ring = ring_geometry(
            2.0,
            &Decoration::Ring {
                inner_scale: 3.0,
                outer_scale: -1.0,
            },
        )
        .unwrap();
        assert_eq!(ring.inner_radius, 0.0);
        assert_eq!(ring.outer_radius, 6.0);
    }

    #[test]
    fn test_opacity_clamped() {
        let shell = atmosphere_shell(
            1.0,
            &Decoration::Atmosphere {
                shell_scale: 1.1,
                opacity: 4.0,
            },
        )
        .unwrap();
        assert_eq!(shell.opacity, 1.0);
    }
}
