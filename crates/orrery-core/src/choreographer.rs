//! Camera Choreographer: eases the live camera pose toward a pending pose
//! derived from the current focus target, and keeps tracking moving targets.
//!
//! ```text
//!   Free ──request_view──▶ Transitioning ──distance < threshold──▶ Following
//!    ▲                          ▲                                     │
//!    └────────release───────────┴───────────request_view──────────────┘
//! ```
//!
//! Every pose change after construction goes through a linear blend; the
//! live pose is only ever assigned outright when the choreographer is built.

use glam::DVec3;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::body::BodySystem;
use crate::focus::{FocusError, FocusRegistry, FocusTarget};

/// Camera position plus look-at point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: DVec3,
    pub look_at: DVec3,
}

impl CameraPose {
    pub fn new(position: DVec3, look_at: DVec3) -> Self {
        Self { position, look_at }
    }

    /// Pose that views `anchor` from `standoff` along `direction`.
    pub fn framing(anchor: DVec3, standoff: f64, direction: DVec3) -> Self {
        Self {
            position: anchor + direction * standoff,
            look_at: anchor,
        }
    }

    /// The same pose moved rigidly by `offset`.
    pub fn translated(&self, offset: DVec3) -> Self {
        Self {
            position: self.position + offset,
            look_at: self.look_at + offset,
        }
    }

    /// Moves each axis a fraction `alpha` of the way toward `goal`.
    pub fn lerp_toward(&self, goal: &CameraPose, alpha: f64) -> Self {
        Self {
            position: self.position.lerp(goal.position, alpha),
            look_at: self.look_at.lerp(goal.look_at, alpha),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.look_at.is_finite()
    }
}

/// Lifecycle of the choreographer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChoreographerState {
    /// No focus constraint; the viewer navigates freely.
    #[default]
    Free,
    /// Easing toward a newly chosen focus.
    Transitioning,
    /// Close enough to the focus; keep tracking it every frame.
    /// A stationary focus is simply followed with zero velocity.
    Following,
}

/// Interpolation constants. The defaults are hand-tuned for 60 fps.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChoreographyParams {
    /// Blend factor at zero distance.
    pub base_rate: f64,
    /// Extra blend factor per world unit of distance.
    pub distance_gain: f64,
    /// Upper bound on the distance-adaptive blend factor.
    pub max_rate: f64,
    /// Live-to-pending distance below which a transition becomes following.
    pub follow_threshold: f64,
    /// Steady blend factor while following a moving body.
    pub follow_rate: f64,
    /// Camera offset direction, scaled by the target's standoff distance.
    pub offset_direction: [f64; 3],
    /// Shift the live pose by the focus's per-frame displacement before
    /// blending, so the remaining gap shrinks geometrically even for fast
    /// bodies. Off by default: each tick is then a plain blend toward the
    /// pending pose, and a body moving faster than about
    /// `follow_threshold * alpha` per frame is chased but never settled on.
    pub carry_with_focus: bool,
}

impl Default for ChoreographyParams {
    fn default() -> Self {
        Self {
            base_rate: 0.08,
            distance_gain: 0.002,
            max_rate: 0.2,
            follow_threshold: 0.5,
            follow_rate: 0.1,
            offset_direction: [0.7, 0.5, 0.7],
            carry_with_focus: false,
        }
    }
}

impl ChoreographyParams {
    /// `min(base + distance * gain, max)`, kept within `[0, 1]`.
    pub fn adaptive_rate(&self, distance: f64) -> f64 {
        clamp_unit((self.base_rate + distance * self.distance_gain).min(self.max_rate))
    }

    /// Tracking rate while following, kept within `[0, 1]`.
    pub fn tracking_rate(&self) -> f64 {
        clamp_unit(self.follow_rate)
    }

    pub fn offset(&self) -> DVec3 {
        DVec3::from_array(self.offset_direction)
    }
}

fn clamp_unit(rate: f64) -> f64 {
    if rate.is_finite() {
        rate.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Owns the live and pending camera poses and the transition state.
#[derive(Clone, Debug)]
pub struct CameraChoreographer {
    params: ChoreographyParams,
    state: ChoreographerState,
    focus: FocusTarget,
    focus_anchor: DVec3,
    live: CameraPose,
    pending: CameraPose,
}

impl CameraChoreographer {
    /// Starts in [`ChoreographerState::Free`] at the overview pose.
    pub fn new(registry: &FocusRegistry, bodies: &BodySystem, params: ChoreographyParams) -> Self {
        let focus = registry.overview().clone();
        let focus_anchor = focus.world_position(bodies);
        let pending = pose_for(&focus, bodies, &params);
        Self {
            params,
            state: ChoreographerState::Free,
            focus,
            focus_anchor,
            live: pending,
            pending,
        }
    }

    /// Switches focus to `target_id` and begins a transition.
    ///
    /// An unknown identifier leaves every piece of state untouched.
    pub fn request_view(
        &mut self,
        target_id: &str,
        registry: &FocusRegistry,
        bodies: &BodySystem,
    ) -> Result<(), FocusError> {
        let target = registry.resolve(target_id)?.clone();
        self.pending = pose_for(&target, bodies, &self.params);
        debug!(from = %self.focus.id, to = %target.id, "camera focus change");
        self.focus_anchor = target.world_position(bodies);
        self.focus = target;
        self.state = ChoreographerState::Transitioning;
        Ok(())
    }

    /// Advances the live pose by one frame and returns the new state.
    ///
    /// `manual_override` is true while the viewer is dragging the camera;
    /// it pauses tracking in [`ChoreographerState::Following`] only.
    pub fn tick(&mut self, bodies: &BodySystem, manual_override: bool) -> ChoreographerState {
        if self.state == ChoreographerState::Free {
            return self.state;
        }

        let mut anchor_step = DVec3::ZERO;
        if self.focus.is_moving() {
            let anchor = self.focus.world_position(bodies);
            anchor_step = anchor - self.focus_anchor;
            self.focus_anchor = anchor;
            self.pending = pose_for(&self.focus, bodies, &self.params);
        }
        if !self.params.carry_with_focus || !anchor_step.is_finite() {
            anchor_step = DVec3::ZERO;
        }
        let tracking = !(manual_override && self.state == ChoreographerState::Following);
        let carried = if tracking {
            self.live.translated(anchor_step)
        } else {
            self.live
        };

        let distance = carried.position.distance(self.pending.position);
        if !distance.is_finite() || !self.pending.is_finite() {
            warn!(focus = %self.focus.id, "non-finite camera goal, holding pose");
            return self.state;
        }

        match self.state {
            ChoreographerState::Transitioning => {
                let alpha = self.params.adaptive_rate(distance);
                self.live = carried.lerp_toward(&self.pending, alpha);
                if distance < self.params.follow_threshold {
                    debug!(focus = %self.focus.id, "camera transition settled");
                    self.state = ChoreographerState::Following;
                }
            }
            ChoreographerState::Following => {
                if tracking {
                    let alpha = if self.focus.is_moving() {
                        self.params.tracking_rate()
                    } else {
                        self.params.adaptive_rate(distance)
                    };
                    self.live = carried.lerp_toward(&self.pending, alpha);
                }
            }
            ChoreographerState::Free => {}
        }
        self.state
    }

    /// Drops the focus constraint and returns to free navigation.
    pub fn release(&mut self) {
        if self.state != ChoreographerState::Free {
            debug!(focus = %self.focus.id, "camera released to free navigation");
        }
        self.state = ChoreographerState::Free;
    }

    /// Accepts the pose produced by the navigation controls while the viewer
    /// is manipulating the camera. Ignored otherwise, and while transitioning.
    pub fn sync_manual_pose(&mut self, pose: CameraPose, manual_override: bool) -> bool {
        let accepted = manual_override
            && pose.is_finite()
            && self.state != ChoreographerState::Transitioning;
        if accepted {
            self.live = pose;
        }
        accepted
    }

    pub fn state(&self) -> ChoreographerState {
        self.state
    }

    pub fn focus(&self) -> &FocusTarget {
        &self.focus
    }

    /// The pose actually rendered.
    pub fn live(&self) -> CameraPose {
        self.live
    }

    /// The goal of the current transition.
    pub fn pending(&self) -> CameraPose {
        self.pending
    }

    /// Distance between the live and pending camera positions.
    pub fn distance_to_pending(&self) -> f64 {
        self.live.position.distance(self.pending.position)
    }

    pub fn params(&self) -> &ChoreographyParams {
        &self.params
    }
}

fn pose_for(target: &FocusTarget, bodies: &BodySystem, params: &ChoreographyParams) -> CameraPose {
    CameraPose::framing(target.world_position(bodies), target.standoff, params.offset())
}
