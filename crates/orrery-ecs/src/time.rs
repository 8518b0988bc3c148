//! Frame timing and simulation clock resources.

use std::time::{Duration, Instant};

use bevy_ecs::prelude::*;
use orrery_core::{MAX_FRAME_TIME, SimulationClock, TimeMode};

/// Wall-clock timing of the frame being run.
///
/// Written by [`OrrerySchedules::run`](crate::OrrerySchedules::run) before any
/// stage executes, read by every system that needs the frame delta.
#[derive(Resource, Debug, Clone)]
pub struct FrameTime {
    /// Seconds since the previous frame, clamped to `[0, MAX_FRAME_TIME]`.
    pub delta: f64,
    /// Sum of all clamped frame deltas.
    pub wall_elapsed: f64,
    /// Index of the frame being run, starting at 0.
    pub frame: u64,
    origin: Instant,
    started: bool,
}

impl Default for FrameTime {
    fn default() -> Self {
        Self {
            delta: 0.0,
            wall_elapsed: 0.0,
            frame: 0,
            origin: Instant::now(),
            started: false,
        }
    }
}

impl FrameTime {
    /// Records the start of a new frame of `frame_dt` seconds.
    pub fn begin_frame(&mut self, frame_dt: f64) {
        let delta = if frame_dt.is_finite() && frame_dt > 0.0 {
            frame_dt.min(MAX_FRAME_TIME)
        } else {
            0.0
        };
        if self.started {
            self.frame += 1;
        }
        self.started = true;
        self.delta = delta;
        self.wall_elapsed += delta;
    }

    /// Instant corresponding to the accumulated frame time.
    ///
    /// Derived from frame deltas, not the system clock.
    pub fn now(&self) -> Instant {
        self.origin + Duration::try_from_secs_f64(self.wall_elapsed).unwrap_or_default()
    }
}

/// The simulation clock plus the knobs that feed it.
#[derive(Resource, Debug, Clone)]
pub struct SimClock {
    pub clock: SimulationClock,
    pub time_mode: TimeMode,
    /// Upper bound applied to speed changes coming from the viewer.
    pub max_speed_multiplier: f64,
}

impl Default for SimClock {
    fn default() -> Self {
        Self {
            clock: SimulationClock::default(),
            time_mode: TimeMode::Fixed,
            max_speed_multiplier: 5.0,
        }
    }
}

impl SimClock {
    /// Sets the speed multiplier, clamped to `[0, max_speed_multiplier]`.
    pub fn set_speed(&mut self, speed_multiplier: f64) {
        let max = if self.max_speed_multiplier.is_finite() {
            self.max_speed_multiplier.max(0.0)
        } else {
            f64::MAX
        };
        let speed = if speed_multiplier.is_finite() {
            speed_multiplier.clamp(0.0, max)
        } else {
            0.0
        };
        self.clock.set_speed_multiplier(speed);
    }
}
