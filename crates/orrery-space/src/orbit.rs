//! Orbit-line loops drawn under each planet's path.

use std::f64::consts::TAU;

use glam::DVec3;

/// Closed loop of `segments + 1` points on the XZ plane, first == last.
///
/// Point `i` sits at angle `i / segments * 2π`, using the same
/// `(r cos a, 0, r sin a)` convention as body revolution, so a planet always
/// lies on its own loop. At least three segments are produced.
pub fn orbit_polyline(radius: f64, segments: u32) -> Vec<DVec3> {
    let segments = segments.max(3);
    let radius = if radius.is_finite() { radius.abs() } else { 0.0 };
    let mut points: Vec<DVec3> = (0..segments)
        .map(|i| {
            let angle = f64::from(i) / f64::from(segments) * TAU;
            DVec3::new(radius * angle.cos(), 0.0, radius * angle.sin())
        })
        .collect();
    points.push(points[0]);
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_is_closed() {
        let points = orbit_polyline(6.0, 100);
        assert_eq!(points.len(), 101);
        assert_eq!(points.first(), points.last());
    }

    #[test]
    fn test_points_lie_on_circle() {
        for p in orbit_polyline(9.0, 100) {
            assert!((p.length() - 9.0).abs() < 1e-9);
            assert_eq!(p.y, 0.0);
        }
    }

    #[test]
    fn test_quarter_point_matches_revolution_convention() {
        let points = orbit_polyline(20.0, 100);
        assert!((points[25] - DVec3::new(0.0, 0.0, 20.0)).length() < 1e-9);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(orbit_polyline(5.0, 0).len(), 4);
        for p in orbit_polyline(f64::NAN, 10) {
            assert_eq!(p, DVec3::ZERO);
        }
    }
}
