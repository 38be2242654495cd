pub mod config;
pub mod controller;
pub mod curvature;
pub mod error;
pub mod math;
pub mod roll;
pub mod tilt;
pub mod transform;

pub use config::RollConfig;
pub use controller::{ControllerSnapshot, RollController, TickReport};
pub use curvature::TiltRequest;
pub use error::ConfigError;
pub use tilt::TiltPhase;
pub use transform::{MeshSink, Parented, ParentFrame, Transform, VelocitySource};

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use glam::Vec3;

    use crate::controller::{RollController, TickReport};
    use crate::transform::{Parented, Transform, VelocitySource};

    /// Navigation source that always reports the same velocity.
    #[derive(Debug, Clone, Copy)]
    pub struct FixedVelocity(pub Vec3);

    impl VelocitySource for FixedVelocity {
        fn velocity(&self) -> Vec3 {
            self.0
        }
    }

    /// `n` headings (degrees) starting at `start`, turning `rate_deg_per_s`.
    pub fn turning_headings(start: f32, rate_deg_per_s: f32, dt: f32, n: usize) -> Vec<f32> {
        (0..n)
            .map(|i| start + rate_deg_per_s * dt * i as f32)
            .collect()
    }

    /// Tick the controller once per heading with the parent at the origin and
    /// the mesh parented to it, returning every report.
    pub fn run_headings(
        controller: &mut RollController,
        headings: &[f32],
        dt: f32,
        velocity: Vec3,
    ) -> Vec<TickReport> {
        let nav = FixedVelocity(velocity);
        let mut local = Transform::IDENTITY;
        headings
            .iter()
            .map(|&yaw| {
                let parent = Transform::from_heading(Vec3::ZERO, yaw);
                let mut mesh = Parented {
                    parent: &parent,
                    local: &mut local,
                };
                controller.tick(dt, &nav, &parent, &mut mesh)
            })
            .collect()
    }
}
