//! Manual-navigation detection with a release debounce.
//!
//! Pointer/touch press-and-hold marks the viewer as steering the camera. The
//! override lingers for a short debounce after release so a quick re-grab
//! does not let automatic tracking snap in between.

use std::time::{Duration, Instant};

/// Tracks whether the viewer is currently manipulating the camera.
#[derive(Clone, Debug)]
pub struct InteractionTracker {
    debounce: Duration,
    pressed: bool,
    released_at: Option<Instant>,
}

impl Default for InteractionTracker {
    fn default() -> Self {
        Self::new(Duration::from_millis(100))
    }
}

impl InteractionTracker {
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            pressed: false,
            released_at: None,
        }
    }

    /// Pointer or touch went down on the view.
    pub fn press(&mut self) {
        self.pressed = true;
        self.released_at = None;
    }

    /// Pointer or touch was released at `now`.
    pub fn release(&mut self, now: Instant) {
        if self.pressed {
            self.pressed = false;
            self.released_at = Some(now);
        }
    }

    /// Whether automatic tracking should yield at `now`.
    pub fn is_overriding(&self, now: Instant) -> bool {
        if self.pressed {
            return true;
        }
        self.released_at
            .is_some_and(|at| now.saturating_duration_since(at) < self.debounce)
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_does_not_override() {
        let tracker = InteractionTracker::default();
        assert!(!tracker.is_overriding(Instant::now()));
    }

    #[test]
    fn test_press_overrides_until_debounce_expires() {
        let mut tracker = InteractionTracker::new(Duration::from_millis(100));
        let t0 = Instant::now();
        tracker.press();
        assert!(tracker.is_overriding(t0));
        tracker.release(t0);
        assert!(tracker.is_overriding(t0 + Duration::from_millis(50)));
        assert!(!tracker.is_overriding(t0 + Duration::from_millis(100)));
        assert!(!tracker.is_overriding(t0 + Duration::from_secs(5)));
    }

    #[test]
    fn test_regrab_cancels_pending_release() {
        let mut tracker = InteractionTracker::default();
        let t0 = Instant::now();
        tracker.press();
        tracker.release(t0);
        tracker.press();
        assert!(tracker.is_overriding(t0 + Duration::from_secs(1)));
    }

    #[test]
    fn test_release_without_press_is_ignored() {
        let mut tracker = InteractionTracker::default();
        let t0 = Instant::now();
        tracker.release(t0);
        assert!(!tracker.is_overriding(t0));
    }

    #[test]
    fn test_zero_debounce_yields_immediately() {
        let mut tracker = InteractionTracker::new(Duration::ZERO);
        let t0 = Instant::now();
        tracker.press();
        tracker.release(t0);
        assert!(!tracker.is_overriding(t0));
    }
}
