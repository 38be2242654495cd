use std::f32::consts::PI;

use glam::Vec3;

/// Squared lengths below this are treated as zero-length vectors.
const EPSILON_SQ: f32 = 1e-15;

/// Degrees of spin produced by rolling `speed * dt` units along the ground
/// without slipping on a sphere of radius `radius`.
pub fn rolling_angle_deg(dt: f32, speed: f32, radius: f32) -> f32 {
    dt * speed * 360.0 / (2.0 * PI * radius)
}

/// Unsigned angle between two vectors in degrees. Zero-length input gives 0.
pub fn angle_deg(from: Vec3, to: Vec3) -> f32 {
    let denom = (from.length_squared() * to.length_squared()).sqrt();
    if denom < EPSILON_SQ {
        return 0.0;
    }
    let cos = (from.dot(to) / denom).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}

/// Angle from `from` to `to` in degrees, signed by which side of `axis` the
/// rotation falls on. A zero cross product counts as positive.
pub fn signed_angle_deg(from: Vec3, to: Vec3, axis: Vec3) -> f32 {
    let unsigned = angle_deg(from, to);
    if axis.dot(from.cross(to)) >= 0.0 {
        unsigned
    } else {
        -unsigned
    }
}

/// Curvature of a path from its first and second derivatives:
/// `|r' x r''| / |r'|^3`.
///
/// A zero-length `first` yields NaN; callers compare with `>` so NaN never
/// counts as a turn.
pub fn osculating_curvature(first: Vec3, second: Vec3) -> f32 {
    first.cross(second).length() / first.length().powi(3)
}
