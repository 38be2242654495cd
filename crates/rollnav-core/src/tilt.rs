use serde::{Deserialize, Serialize};

use crate::config::RollConfig;
use crate::curvature::TiltRequest;
use crate::transform::{MeshSink, ParentFrame};

/// Bank animation phase.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum TiltPhase {
    /// No animation running; the next tick may issue a new request.
    #[default]
    Idle,
    /// Easing toward a target; `remaining` is the bank still to apply (degrees).
    Tilting { remaining: f32 },
    /// Stopped from outside. Reads as tilting so no new request starts, but
    /// no steps run until [`TiltAnimator::reset`].
    Halted,
}

/// Proportional bank animation, advanced one step per tick.
///
/// Each step applies `remaining * dt * tilt_speed` degrees, so the step size
/// shrinks geometrically while `dt * tilt_speed < 1`. Past that the steps
/// overshoot. With [`RollConfig::clamp_tilt`] the target is limited to
/// `±tilt_amount` and the per-step gain to 1, so the accumulated angle stays
/// in bounds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TiltAnimator {
    phase: TiltPhase,
    total_angle: f32,
}

impl TiltAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> TiltPhase {
        self.phase
    }

    /// Accumulated bank in degrees.
    pub fn total_angle(&self) -> f32 {
        self.total_angle
    }

    pub fn is_tilting(&self) -> bool {
        !matches!(self.phase, TiltPhase::Idle)
    }

    /// Start animating toward `request`. Ignored unless idle; returns whether
    /// the request was accepted.
    pub fn begin(&mut self, request: TiltRequest) -> bool {
        if self.is_tilting() {
            return false;
        }
        tracing::debug!(?request, total = self.total_angle, "Tilt requested");
        self.phase = TiltPhase::Tilting {
            remaining: request.delta(),
        };
        true
    }

    /// Apply one animation step around the parent's forward axis and return
    /// the degrees applied. Does nothing unless tilting.
    pub fn step(
        &mut self,
        dt: f32,
        config: &RollConfig,
        parent: &impl ParentFrame,
        mesh: &mut impl MeshSink,
    ) -> f32 {
        let TiltPhase::Tilting { mut remaining } = self.phase else {
            return 0.0;
        };

        let mut gain = dt * config.tilt_speed;
        if config.clamp_tilt {
            let limit = config.tilt_amount;
            remaining = (self.total_angle + remaining).clamp(-limit, limit) - self.total_angle;
            gain = gain.min(1.0);
        }
        let angle = remaining * gain;

        if angle != 0.0 {
            mesh.rotate_around(parent.position(), parent.forward(), angle);
        }
        self.total_angle += angle;

        if remaining.abs() < dt {
            tracing::debug!(total = self.total_angle, "Tilt settled");
            self.phase = TiltPhase::Idle;
        } else {
            tracing::trace!(angle, remaining, total = self.total_angle, "Tilt step");
            self.phase = TiltPhase::Tilting {
                remaining: remaining - angle,
            };
        }
        angle
    }

    /// Cancel any running animation and hold the tilting flag. The bank
    /// angle already applied is left in place.
    pub fn stop(&mut self) {
        tracing::info!(total = self.total_angle, "Tilt stopped");
        self.phase = TiltPhase::Halted;
    }

    /// Return to idle so the next tick can issue a fresh request.
    pub fn reset(&mut self) {
        if self.phase != TiltPhase::Idle {
            tracing::info!(total = self.total_angle, "Tilt reset");
        }
        self.phase = TiltPhase::Idle;
    }
}
