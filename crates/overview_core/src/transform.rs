//! World-space transform: position, rotation (quaternion), scale.
//!
//! `Transform` is `Copy` and `Default`, making it easy to embed in any
//! struct.  The engine uses a right-handed frame: forward is `−Z`, right is
//! `+X`, up is `+Y`.  Angles taken by the helpers below are in **degrees**.

use glam::{Mat4, Quat, Vec3};

use crate::math::delta_angle;

/// World-space transform component.
///
/// # Example
/// ```rust,ignore
/// use overview_core::Transform;
/// use glam::Vec3;
///
/// let mut t = Transform::from_position(Vec3::new(0.0, 20.0, 30.0));
/// t.rotate_local(Vec3::Y, 45.0);
/// let m = t.matrix();
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// World-space position.
    pub position: Vec3,
    /// Orientation as a unit quaternion.
    pub rotation: Quat,
    /// Non-uniform scale factor.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// Identity transform: origin, no rotation, unit scale.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Construct with a world-space position, identity rotation and scale.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Construct from a position and euler angles `[pitch, yaw, roll]` in
    /// degrees (applied yaw, then pitch, then roll).
    pub fn from_position_euler(position: Vec3, euler_deg: [f32; 3]) -> Self {
        let [pitch, yaw, roll] = euler_deg;
        let rotation = Quat::from_euler(
            glam::EulerRot::YXZ,
            yaw.to_radians(),
            pitch.to_radians(),
            roll.to_radians(),
        );
        Self {
            position,
            rotation,
            scale: Vec3::ONE,
        }
    }

    /// Build the TRS model matrix (`T * R * S`).
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Apply a translation offset in world space.
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }

    /// Rotate by `degrees` around the given world-space axis.
    pub fn rotate_axis(&mut self, axis: Vec3, degrees: f32) {
        self.rotation =
            (Quat::from_axis_angle(axis.normalize(), degrees.to_radians()) * self.rotation)
                .normalize();
    }

    /// Rotate by `degrees` around an axis expressed in this transform's own
    /// space.
    pub fn rotate_local(&mut self, axis: Vec3, degrees: f32) {
        self.rotation =
            (self.rotation * Quat::from_axis_angle(axis.normalize(), degrees.to_radians()))
                .normalize();
    }

    /// Rotate around a world-space pivot: both the orientation and the
    /// position orbit `point` by `degrees` around `axis`.
    pub fn rotate_around(&mut self, point: Vec3, axis: Vec3, degrees: f32) {
        let q = Quat::from_axis_angle(axis.normalize(), degrees.to_radians());
        self.position = point + q * (self.position - point);
        self.rotation = (q * self.rotation).normalize();
    }

    /// Forward direction in world space (`−Z` rotated by the quaternion).
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Right direction in world space.
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Up direction in world space.
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Decompose a roll-free orientation into `(yaw, pitch)` degrees.
    ///
    /// Yaw is measured around world `+Y`; pitch around the local right axis,
    /// positive looking up, in `(-180, 180]`.  A pitch beyond ±90° means the
    /// view went over the vertical and the camera is upside down.
    pub fn yaw_pitch(&self) -> (f32, f32) {
        let right = self.right();
        let yaw = (-right.z).atan2(right.x);
        let heading = Quat::from_rotation_y(yaw);
        let local = heading.inverse() * self.rotation;
        let pitch = 2.0 * local.x.atan2(local.w);
        (yaw.to_degrees(), delta_angle(0.0, pitch.to_degrees()))
    }

    /// Inverse of [`yaw_pitch`](Self::yaw_pitch).
    pub fn rotation_from_yaw_pitch(yaw: f32, pitch: f32) -> Quat {
        Quat::from_rotation_y(yaw.to_radians()) * Quat::from_rotation_x(pitch.to_radians())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix_maps_local_forward_into_world() {
        // yawed 90° left and shifted one unit along +X: local forward lands on the origin
        let t = Transform::from_position_euler(Vec3::X, [0.0, 90.0, 0.0]);
        let p = t.matrix().transform_point3(Vec3::NEG_Z);
        assert!(p.abs_diff_eq(Vec3::ZERO, 1e-5), "{p:?}");
        assert!(t.forward().abs_diff_eq(Vec3::NEG_X, 1e-5));
    }

    #[test]
    fn local_rotation_spins_forward() {
        let mut t = Transform::default();
        t.rotate_local(Vec3::Y, 90.0);
        // +90° around +Y turns −Z towards −X
        assert!(t.forward().abs_diff_eq(Vec3::NEG_X, 1e-5));
    }

    #[test]
    fn rotate_around_moves_position() {
        let mut t = Transform::from_position(Vec3::new(1.0, 0.0, 0.0));
        t.rotate_around(Vec3::ZERO, Vec3::Y, 180.0);
        assert!(t.position.abs_diff_eq(Vec3::new(-1.0, 0.0, 0.0), 1e-5));
    }

    #[test]
    fn yaw_pitch_round_trip() {
        let q = Transform::rotation_from_yaw_pitch(40.0, -30.0);
        let t = Transform {
            rotation: q,
            ..Transform::default()
        };
        let (yaw, pitch) = t.yaw_pitch();
        assert!((yaw - 40.0).abs() < 1e-3);
        assert!((pitch + 30.0).abs() < 1e-3);
    }

    #[test]
    fn pitch_past_vertical_is_reported() {
        let mut t = Transform::default();
        t.rotate_axis(Vec3::X, 120.0);
        let (_, pitch) = t.yaw_pitch();
        assert!((pitch - 120.0).abs() < 1e-3);
        assert!(t.up().y < 0.0);
    }

    #[test]
    fn euler_constructor_pitches_down() {
        let t = Transform::from_position_euler(Vec3::ZERO, [-45.0, 0.0, 0.0]);
        assert!(t.forward().y < 0.0);
    }
}
