use glam::Vec3;

use crate::math::rolling_angle_deg;
use crate::transform::MeshSink;

/// Spin the mesh about its local right axis to match ground speed.
/// Returns the degrees applied this tick.
pub fn apply_roll(dt: f32, velocity: Vec3, radius: f32, mesh: &mut impl MeshSink) -> f32 {
    let degrees = rolling_angle_deg(dt, velocity.length(), radius);
    if degrees != 0.0 {
        mesh.rotate_local(Vec3::X, degrees);
    }
    degrees
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use super::*;
    use crate::transform::Transform;

    #[test]
    fn one_revolution_per_circumference() {
        let mut mesh = Transform::IDENTITY;
        let deg = apply_roll(1.0, Vec3::Z * 2.0 * PI, 1.0, &mut mesh);
        assert!((deg - 360.0).abs() < 1e-3, "got {deg}");
        // A full turn lands back where it started.
        assert!(mesh.rotation.angle_between(glam::Quat::IDENTITY) < 1e-3);
    }

    #[test]
    fn stationary_does_not_roll() {
        let mut mesh = Transform::IDENTITY;
        assert_eq!(apply_roll(0.5, Vec3::ZERO, 1.0, &mut mesh), 0.0);
        assert_eq!(mesh, Transform::IDENTITY);
    }

    #[test]
    fn quarter_turn_pitches_forward() {
        let mut mesh = Transform::IDENTITY;
        // Quarter circumference of a unit sphere.
        apply_roll(1.0, Vec3::Z * (PI / 2.0), 1.0, &mut mesh);
        assert!((mesh.forward() - Vec3::NEG_Y).length() < 1e-3);
    }

    #[test]
    fn direction_of_travel_does_not_matter() {
        let mut a = Transform::IDENTITY;
        let mut b = Transform::IDENTITY;
        let da = apply_roll(0.1, Vec3::new(3.0, 0.0, 4.0), 0.5, &mut a);
        let db = apply_roll(0.1, Vec3::new(0.0, 0.0, -5.0), 0.5, &mut b);
        assert!((da - db).abs() < 1e-5);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn roll_matches_arc_length(
                dt in 0.001f32..0.1,
                speed in 0.0f32..50.0,
                radius in 0.05f32..5.0,
            ) {
                let mut mesh = Transform::IDENTITY;
                let deg = apply_roll(dt, Vec3::new(0.0, 0.0, speed), radius, &mut mesh);
                let expected = dt * speed * 360.0 / (2.0 * PI * radius);
                prop_assert!(
                    (deg - expected).abs() <= expected.abs() * 1e-5 + 1e-6,
                    "roll {deg} != {expected}"
                );
                prop_assert!(deg >= 0.0);
            }
        }
    }
}
