//! Procedural starfield: deterministic twinkling points scattered through a
//! cube around the system.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const MIN_POINT_SIZE: f32 = 5.0;
const POINT_SIZE_SPREAD: f32 = 3.0;
const MIN_HUE: f32 = 0.1;
const HUE_SPREAD: f32 = 0.6;
const SATURATION: f32 = 0.8;
const LIGHTNESS: f32 = 0.9;

/// A single background star.
#[derive(Clone, Debug, PartialEq)]
pub struct StarPoint {
    /// World position inside the starfield cube.
    pub position: Vec3,
    /// Twinkle phase in [0, 2π).
    pub phase: f32,
    /// Point size before perspective scaling, in [5, 8).
    pub size: f32,
    /// Linear RGB colour.
    pub color: [f32; 3],
}

/// Generates a deterministic star catalog from a seed.
pub struct StarfieldGenerator {
    seed: u64,
    star_count: u32,
    extent: f32,
}

impl StarfieldGenerator {
    /// `extent` is the edge length of the cube, centred on the origin.
    pub fn new(seed: u64, star_count: u32, extent: f32) -> Self {
        let extent = if extent.is_finite() { extent.abs() } else { 0.0 };
        Self {
            seed,
            star_count,
            extent,
        }
    }

    /// Generate the star catalog. Deterministic for a given seed.
    pub fn generate(&self) -> Vec<StarPoint> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut stars = Vec::with_capacity(self.star_count as usize);

        for _ in 0..self.star_count {
            let position = Vec3::new(
                (rng.random::<f32>() - 0.5) * self.extent,
                (rng.random::<f32>() - 0.5) * self.extent,
                (rng.random::<f32>() - 0.5) * self.extent,
            );
            // Rounding can land exactly on TAU.
            let phase = (rng.random::<f32>() * TAU) % TAU;
            let size = MIN_POINT_SIZE + rng.random::<f32>() * POINT_SIZE_SPREAD;
            let hue = MIN_HUE + rng.random::<f32>() * HUE_SPREAD;

            stars.push(StarPoint {
                position,
                phase,
                size,
                color: hsl_to_rgb(hue, SATURATION, LIGHTNESS),
            });
        }

        stars
    }
}

/// Brightness factor of a twinkling star: `0.6 + 0.5 * sin(1.5 t + 8 phase)`.
pub fn star_flicker(time: f32, phase: f32) -> f32 {
    0.6 + 0.5 * (time * 1.5 + phase * 8.0).sin()
}

/// Convert HSL (all components in [0, 1]) to linear RGB.
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> [f32; 3] {
    let h = hue.rem_euclid(1.0);
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);
    if s == 0.0 {
        return [l, l, l];
    }

    let q = if l <= 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;
    [
        hue_to_channel(p, q, h + 1.0 / 3.0),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1.0 / 3.0),
    ]
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}
