use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::RollConfig;
use crate::math::{osculating_curvature, signed_angle_deg};

/// What the tilt animator should do next, with the bank delta (degrees)
/// still needed to get there from the current accumulated angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TiltRequest {
    /// Bank toward `+tilt_amount`.
    Outward { delta: f32 },
    /// Bank toward `-tilt_amount`.
    Inward { delta: f32 },
    /// Level out toward zero.
    Neutral { delta: f32 },
}

impl TiltRequest {
    pub fn delta(&self) -> f32 {
        match *self {
            Self::Outward { delta } | Self::Inward { delta } | Self::Neutral { delta } => delta,
        }
    }
}

/// One curvature measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvatureSample {
    pub curvature: f32,
    /// `dt * tilt_boundary`; the sample is a turn only if `curvature` exceeds it.
    pub threshold: f32,
    /// Signed angle from the current to the previous direction about `up`.
    pub turn_angle_deg: f32,
}

impl CurvatureSample {
    /// NaN curvature compares false and reads as straight travel; infinite
    /// curvature exceeds any finite threshold and reads as a turn.
    pub fn is_turning(&self) -> bool {
        self.curvature > self.threshold
    }
}

/// Finite-difference curvature estimate over successive forward directions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurvatureEstimator {
    previous_direction: Vec3,
}

impl CurvatureEstimator {
    /// Starts with a zero previous direction, so the first sample is a
    /// startup transient.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn previous_direction(&self) -> Vec3 {
        self.previous_direction
    }

    /// Measure curvature of the path whose direction is now `current`.
    pub fn sample(
        &self,
        current: Vec3,
        up: Vec3,
        dt: f32,
        tilt_boundary: f32,
    ) -> CurvatureSample {
        let first = current;
        let second = (current - self.previous_direction) / dt;
        CurvatureSample {
            curvature: osculating_curvature(first, second),
            threshold: dt * tilt_boundary,
            turn_angle_deg: signed_angle_deg(current, self.previous_direction, up),
        }
    }

    /// Turn a sample into a request given the bank already accumulated.
    pub fn request(
        sample: &CurvatureSample,
        config: &RollConfig,
        total_angle: f32,
    ) -> TiltRequest {
        if sample.curvature.is_nan() {
            tracing::trace!("NaN curvature, treating as straight");
        }
        if sample.is_turning() {
            if sample.turn_angle_deg > 0.0 {
                TiltRequest::Outward {
                    delta: config.tilt_amount - total_angle,
                }
            } else {
                TiltRequest::Inward {
                    delta: -config.tilt_amount - total_angle,
                }
            }
        } else {
            TiltRequest::Neutral {
                delta: -total_angle,
            }
        }
    }

    /// Sample and decide in one call.
    pub fn evaluate(
        &self,
        current: Vec3,
        up: Vec3,
        dt: f32,
        config: &RollConfig,
        total_angle: f32,
    ) -> TiltRequest {
        let sample = self.sample(current, up, dt, config.tilt_boundary);
        Self::request(&sample, config, total_angle)
    }

    /// Record this tick's direction. Called every tick, tilting or not.
    pub fn observe(&mut self, current: Vec3) {
        self.previous_direction = current;
    }
}
