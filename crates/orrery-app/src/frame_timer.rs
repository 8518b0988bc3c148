//! Wall-clock frame timing with a stall clamp and optional pacing.

use std::time::{Duration, Instant};

use orrery_core::MAX_FRAME_TIME;
use tracing::warn;

/// Clamps a measured frame time into `[0, MAX_FRAME_TIME]`.
///
/// Returns the clamped value and whether clamping was needed.
pub fn clamp_frame_time(frame_time: f64) -> (f64, bool) {
    if !frame_time.is_finite() || frame_time < 0.0 {
        (0.0, true)
    } else if frame_time > MAX_FRAME_TIME {
        (MAX_FRAME_TIME, true)
    } else {
        (frame_time, false)
    }
}

/// Measures the time between frames and sleeps to hold a target rate.
pub struct FrameTimer {
    previous_time: Instant,
    target_frame_time: Option<Duration>,
    frame_count: u64,
}

impl FrameTimer {
    /// `target_fps` of zero runs unpaced.
    pub fn new(target_fps: u32) -> Self {
        let target_frame_time =
            (target_fps > 0).then(|| Duration::from_secs_f64(1.0 / f64::from(target_fps)));
        Self {
            previous_time: Instant::now(),
            target_frame_time,
            frame_count: 0,
        }
    }

    /// Seconds since the previous call (or construction), clamped.
    pub fn tick(&mut self) -> f64 {
        let current_time = Instant::now();
        let frame_time = current_time
            .duration_since(self.previous_time)
            .as_secs_f64();
        self.previous_time = current_time;
        self.frame_count += 1;

        let (clamped, was_clamped) = clamp_frame_time(frame_time);
        if was_clamped {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                clamped * 1000.0
            );
        }
        clamped
    }

    /// Sleeps out the remainder of the current frame's budget.
    pub fn pace(&self) {
        if let Some(target) = self.target_frame_time {
            let spent = self.previous_time.elapsed();
            if spent < target {
                std::thread::sleep(target - spent);
            }
        }
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn target_frame_time(&self) -> Option<Duration> {
        self.target_frame_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_frame_passes_through() {
        assert_eq!(clamp_frame_time(1.0 / 60.0), (1.0 / 60.0, false));
        assert_eq!(clamp_frame_time(0.0), (0.0, false));
    }

    #[test]
    fn test_stall_is_clamped() {
        assert_eq!(clamp_frame_time(1.0), (MAX_FRAME_TIME, true));
    }

    #[test]
    fn test_invalid_frame_time_is_zero() {
        assert_eq!(clamp_frame_time(-0.5), (0.0, true));
        assert_eq!(clamp_frame_time(f64::NAN), (0.0, true));
    }

    #[test]
    fn test_target_frame_time() {
        let timer = FrameTimer::new(50);
        assert_eq!(timer.target_frame_time(), Some(Duration::from_millis(20)));
        assert_eq!(FrameTimer::new(0).target_frame_time(), None);
    }

    #[test]
    fn test_tick_counts_frames_and_stays_bounded() {
        let mut timer = FrameTimer::new(0);
        for _ in 0..5 {
            let dt = timer.tick();
            assert!((0.0..=MAX_FRAME_TIME).contains(&dt));
        }
        assert_eq!(timer.frame_count(), 5);
    }

    #[test]
    fn test_pacing_holds_frame_budget() {
        let mut timer = FrameTimer::new(100);
        timer.tick();
        timer.pace();
        let dt = timer.tick();
        assert!(dt >= 0.009, "paced frame took only {dt}s");
    }
}
