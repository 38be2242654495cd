use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::RollConfig;
use crate::curvature::{CurvatureEstimator, TiltRequest};
use crate::error::ConfigError;
use crate::roll::apply_roll;
use crate::tilt::{TiltAnimator, TiltPhase};
use crate::transform::{MeshSink, ParentFrame, VelocitySource};

/// What one tick did.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    /// Degrees of roll applied about the mesh's local right axis.
    pub roll_deg: f32,
    /// Degrees of bank applied about the parent's forward axis.
    pub tilt_deg: f32,
    /// Request issued this tick, if the animator was idle.
    pub request: Option<TiltRequest>,
    /// Phase after the tick.
    pub phase: TiltPhase,
}

/// Serializable view of controller state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControllerSnapshot {
    pub previous_direction: Vec3,
    pub total_angle: f32,
    pub phase: TiltPhase,
}

/// Spins a mesh to match navigation speed and banks it into turns.
///
/// Drive it with [`RollController::tick`] once per frame. Each tick rolls the
/// mesh, then either issues a new bank request (when idle, applying its first
/// step immediately) or advances the running animation by one step, and
/// finally records the parent's forward direction for the next curvature
/// estimate.
#[derive(Debug, Clone)]
pub struct RollController {
    config: RollConfig,
    estimator: CurvatureEstimator,
    animator: TiltAnimator,
}

impl RollController {
    /// Rejects a config that fails [`RollConfig::validate`]; a zero radius
    /// would otherwise turn every roll into an infinite rotation.
    pub fn new(config: RollConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: RollConfig) -> Self {
        Self {
            config,
            estimator: CurvatureEstimator::new(),
            animator: TiltAnimator::new(),
        }
    }

    pub fn config(&self) -> &RollConfig {
        &self.config
    }

    pub fn total_angle(&self) -> f32 {
        self.animator.total_angle()
    }

    pub fn phase(&self) -> TiltPhase {
        self.animator.phase()
    }

    pub fn is_tilting(&self) -> bool {
        self.animator.is_tilting()
    }

    pub fn previous_direction(&self) -> Vec3 {
        self.estimator.previous_direction()
    }

    pub fn snapshot(&self) -> ControllerSnapshot {
        ControllerSnapshot {
            previous_direction: self.estimator.previous_direction(),
            total_angle: self.animator.total_angle(),
            phase: self.animator.phase(),
        }
    }

    /// Advance one frame of `dt` seconds. Non-positive or non-finite `dt`
    /// leaves everything untouched.
    pub fn tick(
        &mut self,
        dt: f32,
        nav: &impl VelocitySource,
        parent: &impl ParentFrame,
        mesh: &mut impl MeshSink,
    ) -> TickReport {
        if !(dt.is_finite() && dt > 0.0) {
            tracing::debug!(dt, "Skipping tick with unusable dt");
            return TickReport {
                roll_deg: 0.0,
                tilt_deg: 0.0,
                request: None,
                phase: self.animator.phase(),
            };
        }

        let roll_deg = apply_roll(dt, nav.velocity(), self.config.object_radius, mesh);

        let current = parent.forward();
        let request = if self.animator.is_tilting() {
            None
        } else {
            let request = self.estimator.evaluate(
                current,
                parent.up(),
                dt,
                &self.config,
                self.animator.total_angle(),
            );
            self.animator.begin(request);
            Some(request)
        };
        let tilt_deg = self.animator.step(dt, &self.config, parent, mesh);

        self.estimator.observe(current);

        TickReport {
            roll_deg,
            tilt_deg,
            request,
            phase: self.animator.phase(),
        }
    }

    /// Cancel the running bank animation. The controller keeps reporting
    /// itself as tilting and issues no new requests until
    /// [`RollController::reset_tilting`].
    pub fn stop_tilting(&mut self) {
        self.animator.stop();
    }

    /// Clear a stop (or abandon a running animation) so the next tick can
    /// issue a fresh request. The accumulated bank is kept.
    pub fn reset_tilting(&mut self) {
        self.animator.reset();
    }
}

impl Default for RollController {
    fn default() -> Self {
        Self::with_valid_config(RollConfig::default())
    }
}
