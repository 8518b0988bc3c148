//! Animated sun surface uniforms.
//!
//! The star's surface brightens and dims over time and its texture lookup
//! wobbles horizontally in bands. Both are driven by the snapshot's shader
//! time, so they freeze when the simulation speed is zero.

/// Amplitude of the horizontal texture wobble, in UV units.
pub const UV_WOBBLE_AMPLITUDE: f32 = 0.02;

/// Extra brightness in [0, 0.5]: `0.5 * (0.5 * sin(2t) + 0.5)`.
pub fn sun_flicker(time: f32) -> f32 {
    0.5 * ((time * 2.0).sin() * 0.5 + 0.5)
}

/// Multiplier applied to the surface texture colour.
pub fn sun_brightness(time: f32) -> f32 {
    1.0 + sun_flicker(time)
}

/// Horizontal UV offset for texture row `v`: `0.02 * sin(t + 5v)`.
pub fn sun_uv_wobble(time: f32, v: f32) -> f32 {
    (time + v * 5.0).sin() * UV_WOBBLE_AMPLITUDE
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    #[test]
    fn test_flicker_bounds() {
        assert!((sun_flicker(0.0) - 0.25).abs() < 1e-6);
        assert!((sun_flicker(FRAC_PI_4) - 0.5).abs() < 1e-6);
        assert!(sun_flicker(3.0 * FRAC_PI_4).abs() < 1e-6);
        for i in 0..500 {
            let f = sun_flicker(i as f32 * 0.013);
            assert!((-1e-6..=0.5 + 1e-6).contains(&f));
        }
    }

    #[test]
    fn test_brightness_never_dims_below_texture() {
        for i in 0..500 {
            assert!(sun_brightness(i as f32 * 0.05) >= 1.0 - 1e-6);
        }
    }

    #[test]
    fn test_wobble_varies_by_row() {
        assert!(sun_uv_wobble(0.0, 0.0).abs() < 1e-7);
        let top = sun_uv_wobble(0.0, FRAC_PI_2 / 5.0);
        assert!((top - UV_WOBBLE_AMPLITUDE).abs() < 1e-6);
    }
}
