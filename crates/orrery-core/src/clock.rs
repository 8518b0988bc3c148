//! Simulation clock: the single time source for body motion and shader animation.
//!
//! Time is counted in nominal ticks, one reference frame at [`NOMINAL_TICK_HZ`].
//! Body rates are radians per nominal tick.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Reference frame rate that defines one nominal tick.
pub const NOMINAL_TICK_HZ: f64 = 60.0;

/// Maximum wall-clock frame time honoured in [`TimeMode::Elapsed`].
/// Longer frames are clamped so a stall does not fling the planets around.
pub const MAX_FRAME_TIME: f64 = 0.25;

/// How rendered frames map to nominal ticks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeMode {
    /// Exactly one nominal tick per rendered frame, whatever the frame rate.
    #[default]
    Fixed,
    /// Ticks proportional to wall-clock frame time, for frame-rate independence.
    Elapsed,
}

impl TimeMode {
    /// Number of nominal ticks a frame of `frame_dt` seconds represents.
    pub fn nominal_step(self, frame_dt: f64) -> f64 {
        match self {
            TimeMode::Fixed => 1.0,
            TimeMode::Elapsed => {
                if !frame_dt.is_finite() || frame_dt <= 0.0 {
                    return 0.0;
                }
                frame_dt.min(MAX_FRAME_TIME) * NOMINAL_TICK_HZ
            }
        }
    }
}

/// Monotonic simulation time scaled by the user speed multiplier.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationClock {
    elapsed: f64,
    frames: u64,
    last_delta: f64,
    speed_multiplier: f64,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl SimulationClock {
    /// Creates a clock at time zero.
    pub fn new(speed_multiplier: f64) -> Self {
        Self {
            elapsed: 0.0,
            frames: 0,
            last_delta: 0.0,
            speed_multiplier: sanitize_multiplier(speed_multiplier),
        }
    }

    /// Advances by `nominal_step * speed_multiplier` and returns that delta.
    ///
    /// Any non-negative multiplier is accepted; `0` freezes simulation time.
    /// Negative or non-finite inputs count as `0`.
    pub fn advance(&mut self, nominal_step: f64, speed_multiplier: f64) -> f64 {
        let step = if nominal_step.is_finite() && nominal_step > 0.0 {
            nominal_step
        } else {
            0.0
        };
        let delta = step * sanitize_multiplier(speed_multiplier);
        self.elapsed += delta;
        self.last_delta = delta;
        self.frames += 1;
        delta
    }

    /// Advances using the stored speed multiplier.
    pub fn tick(&mut self, nominal_step: f64) -> f64 {
        self.advance(nominal_step, self.speed_multiplier)
    }

    /// Sets the multiplier used by [`tick`](Self::tick).
    pub fn set_speed_multiplier(&mut self, speed_multiplier: f64) {
        self.speed_multiplier = sanitize_multiplier(speed_multiplier);
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }

    /// Total simulation time in nominal ticks.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Delta produced by the most recent advance.
    pub fn last_delta(&self) -> f64 {
        self.last_delta
    }

    /// Number of frames advanced so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

fn sanitize_multiplier(speed_multiplier: f64) -> f64 {
    if speed_multiplier.is_finite() && speed_multiplier >= 0.0 {
        speed_multiplier
    } else {
        warn!(speed_multiplier, "invalid speed multiplier, treating as 0");
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_returns_scaled_step() {
        let mut clock = SimulationClock::default();
        let delta = clock.advance(1.0, 2.5);
        assert!((delta - 2.5).abs() < 1e-12);
        assert!((clock.elapsed() - 2.5).abs() < 1e-12);
        assert_eq!(clock.frames(), 1);
    }

    #[test]
    fn test_elapsed_is_monotonic() {
        let mut clock = SimulationClock::default();
        let mut last = clock.elapsed();
        for m in [0.0, 1.0, 5.0, 0.5, 0.0, 3.0] {
            clock.advance(1.0, m);
            assert!(clock.elapsed() >= last);
            last = clock.elapsed();
        }
        assert!((last - 9.5).abs() < 1e-12);
    }

    #[test]
    fn test_zero_multiplier_freezes_time() {
        let mut clock = SimulationClock::new(0.0);
        for _ in 0..100 {
            assert_eq!(clock.tick(1.0), 0.0);
        }
        assert_eq!(clock.elapsed(), 0.0);
        assert_eq!(clock.frames(), 100);
    }

    #[test]
    fn test_multiplier_above_ui_range_tolerated() {
        let mut clock = SimulationClock::default();
        assert!((clock.advance(1.0, 12.0) - 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_multiplier_is_zero() {
        let mut clock = SimulationClock::default();
        assert_eq!(clock.advance(1.0, -1.0), 0.0);
        assert_eq!(clock.advance(1.0, f64::NAN), 0.0);
        clock.set_speed_multiplier(f64::INFINITY);
        assert_eq!(clock.speed_multiplier(), 0.0);
    }

    #[test]
    fn test_invalid_step_is_zero() {
        let mut clock = SimulationClock::default();
        assert_eq!(clock.advance(f64::NAN, 1.0), 0.0);
        assert_eq!(clock.advance(-1.0, 1.0), 0.0);
    }

    #[test]
    fn test_fixed_mode_ignores_frame_time() {
        assert_eq!(TimeMode::Fixed.nominal_step(0.1), 1.0);
        assert_eq!(TimeMode::Fixed.nominal_step(0.001), 1.0);
    }

    #[test]
    fn test_elapsed_mode_scales_with_frame_time() {
        let step = TimeMode::Elapsed.nominal_step(1.0 / 30.0);
        assert!((step - 2.0).abs() < 1e-9);
        let clamped = TimeMode::Elapsed.nominal_step(5.0);
        assert!((clamped - MAX_FRAME_TIME * NOMINAL_TICK_HZ).abs() < 1e-9);
        assert_eq!(TimeMode::Elapsed.nominal_step(-0.1), 0.0);
    }
}
