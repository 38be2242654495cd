//! Minimal rigid transform plus the seams the controller talks through.
//!
//! The controller never owns the objects it reads or writes. The navigation
//! agent, the parent transform and the mesh transform are all handed to
//! [`crate::controller::RollController::tick`] each frame through the traits
//! below, so any engine (or the headless simulator) can plug in.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Position and orientation in a right-handed, Y-up frame. Forward is local +Z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Quat::IDENTITY,
        }
    }

    /// Transform at `translation` facing `yaw_deg` degrees about +Y.
    pub fn from_heading(translation: Vec3, yaw_deg: f32) -> Self {
        Self {
            translation,
            rotation: Quat::from_rotation_y(yaw_deg.to_radians()),
        }
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Rotate about `axis` expressed in this transform's own space.
    pub fn rotate_local(&mut self, axis: Vec3, degrees: f32) {
        let Some(axis) = axis.try_normalize() else {
            return;
        };
        let q = Quat::from_axis_angle(axis, degrees.to_radians());
        self.rotation = (self.rotation * q).normalize();
    }

    /// Orbit about the world-space line through `point` along `axis`, turning
    /// the orientation by the same amount.
    pub fn rotate_around(&mut self, point: Vec3, axis: Vec3, degrees: f32) {
        let Some(axis) = axis.try_normalize() else {
            return;
        };
        let q = Quat::from_axis_angle(axis, degrees.to_radians());
        self.translation = point + q * (self.translation - point);
        self.rotation = (q * self.rotation).normalize();
    }

    /// World transform of a child whose local transform is `local`.
    pub fn mul_transform(&self, local: &Transform) -> Transform {
        Transform {
            translation: self.translation + self.rotation * local.translation,
            rotation: (self.rotation * local.rotation).normalize(),
        }
    }

    /// Express a world-space point in this transform's local space.
    pub fn inverse_transform_point(&self, point: Vec3) -> Vec3 {
        self.rotation.inverse() * (point - self.translation)
    }

    /// Express a world-space direction in this transform's local space.
    pub fn inverse_transform_direction(&self, direction: Vec3) -> Vec3 {
        self.rotation.inverse() * direction
    }
}

/// Anything that reports the current navigation velocity.
pub trait VelocitySource {
    fn velocity(&self) -> Vec3;
}

impl VelocitySource for Vec3 {
    fn velocity(&self) -> Vec3 {
        *self
    }
}

/// Read-only view of the transform the mesh hangs from.
pub trait ParentFrame {
    fn position(&self) -> Vec3;
    fn forward(&self) -> Vec3;
    fn up(&self) -> Vec3;
}

impl ParentFrame for Transform {
    fn position(&self) -> Vec3 {
        self.translation
    }

    fn forward(&self) -> Vec3 {
        Transform::forward(self)
    }

    fn up(&self) -> Vec3 {
        Transform::up(self)
    }
}

/// Write side: the mesh transform the controller spins and banks.
pub trait MeshSink {
    /// Rotate about an axis in the mesh's own space.
    fn rotate_local(&mut self, axis: Vec3, degrees: f32);
    /// Rotate about a world-space line.
    fn rotate_around(&mut self, point: Vec3, axis: Vec3, degrees: f32);
}

impl MeshSink for Transform {
    fn rotate_local(&mut self, axis: Vec3, degrees: f32) {
        Transform::rotate_local(self, axis, degrees);
    }

    fn rotate_around(&mut self, point: Vec3, axis: Vec3, degrees: f32) {
        Transform::rotate_around(self, point, axis, degrees);
    }
}

/// A mesh stored relative to a moving parent. World-space rotations are
/// converted into the parent's space before being applied to `local`.
pub struct Parented<'a> {
    pub parent: &'a Transform,
    pub local: &'a mut Transform,
}

impl MeshSink for Parented<'_> {
    fn rotate_local(&mut self, axis: Vec3, degrees: f32) {
        self.local.rotate_local(axis, degrees);
    }

    fn rotate_around(&mut self, point: Vec3, axis: Vec3, degrees: f32) {
        let local_point = self.parent.inverse_transform_point(point);
        let local_axis = self.parent.inverse_transform_direction(axis);
        self.local.rotate_around(local_point, local_axis, degrees);
    }
}
