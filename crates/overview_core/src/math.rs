//! Scalar and vector helpers used by the per-frame behaviours.
//!
//! Everything here works in **degrees** where an angle is involved, matching
//! the units exposed in configuration files.  The damped-spring helpers are
//! frame-rate independent: call them once per frame with the frame's delta
//! and they converge in roughly `smooth_time` seconds without overshooting.

use glam::{Quat, Vec3};

/// Default upper bound for [`smooth_damp`] speeds.
pub const UNBOUNDED: f32 = f32::INFINITY;

const EPSILON: f32 = 1e-5;

/// Gradually moves `current` towards `target` using a critically damped
/// spring.
///
/// `velocity` carries state between calls and must be owned by the caller
/// (reset it to zero when a new motion starts).  `smooth_time` is roughly the
/// time it takes to reach the target; `max_speed` caps the rate of change.
/// The result never overshoots `target`.
pub fn smooth_damp(
    current: f32,
    target: f32,
    velocity: &mut f32,
    smooth_time: f32,
    max_speed: f32,
    dt: f32,
) -> f32 {
    if dt <= 0.0 {
        return current;
    }
    let smooth_time = smooth_time.max(1e-4);
    let omega = 2.0 / smooth_time;
    let exp = damping_factor(omega * dt);

    let max_change = max_speed * smooth_time;
    let change = (current - target).clamp(-max_change, max_change);
    let clamped_target = current - change;

    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * exp;
    let mut output = clamped_target + (change + temp) * exp;

    // prevent overshooting
    if (target - current > 0.0) == (output > target) {
        output = target;
        *velocity = 0.0;
    }
    output
}

/// Vector variant of [`smooth_damp`].
pub fn smooth_damp_vec3(
    current: Vec3,
    target: Vec3,
    velocity: &mut Vec3,
    smooth_time: f32,
    max_speed: f32,
    dt: f32,
) -> Vec3 {
    if dt <= 0.0 {
        return current;
    }
    let smooth_time = smooth_time.max(1e-4);
    let omega = 2.0 / smooth_time;
    let exp = damping_factor(omega * dt);

    let max_change = max_speed * smooth_time;
    let change = (current - target).clamp_length_max(max_change);
    let clamped_target = current - change;

    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * exp;
    let mut output = clamped_target + (change + temp) * exp;

    if (target - current).dot(output - target) > 0.0 {
        output = target;
        *velocity = Vec3::ZERO;
    }
    output
}

/// [`smooth_damp`] for angles in degrees, taking the shortest way around.
pub fn smooth_damp_angle(
    current: f32,
    target: f32,
    velocity: &mut f32,
    smooth_time: f32,
    max_speed: f32,
    dt: f32,
) -> f32 {
    let target = current + delta_angle(current, target);
    smooth_damp(current, target, velocity, smooth_time, max_speed, dt)
}

// Polynomial approximation of e^-x, accurate enough for x < 1.
#[inline]
fn damping_factor(x: f32) -> f32 {
    1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x)
}

/// Loops `t` so that it is never larger than `length` and never below zero.
pub fn repeat(t: f32, length: f32) -> f32 {
    (t - (t / length).floor() * length).clamp(0.0, length)
}

/// Shortest signed difference between two angles in degrees, in `(-180, 180]`.
pub fn delta_angle(current: f32, target: f32) -> f32 {
    let delta = repeat(target - current, 360.0);
    if delta > 180.0 {
        delta - 360.0
    } else {
        delta
    }
}

/// Removes the component of `v` along `normal`.
pub fn project_on_plane(v: Vec3, normal: Vec3) -> Vec3 {
    let len_sq = normal.length_squared();
    if len_sq < EPSILON * EPSILON {
        return v;
    }
    v - normal * (v.dot(normal) / len_sq)
}

/// Unsigned angle in degrees between two directions.  Returns `0.0` when
/// either vector is degenerate.
pub fn angle_between(a: Vec3, b: Vec3) -> f32 {
    let denom = (a.length_squared() * b.length_squared()).sqrt();
    if denom < 1e-15 {
        return 0.0;
    }
    (a.dot(b) / denom).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Angle in degrees needed to rotate from orientation `a` to `b`.
pub fn quat_angle(a: Quat, b: Quat) -> f32 {
    let dot = a.dot(b).abs().min(1.0);
    if dot > 1.0 - 1e-6 {
        0.0
    } else {
        (dot.acos() * 2.0).to_degrees()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smooth_damp_converges_without_overshoot() {
        let mut value = 0.0;
        let mut vel = 0.0;
        for _ in 0..240 {
            value = smooth_damp(value, 10.0, &mut vel, 0.5, UNBOUNDED, 1.0 / 60.0);
            assert!(value <= 10.0);
        }
        assert!((value - 10.0).abs() < 1e-3);
    }

    #[test]
    fn smooth_damp_respects_max_speed() {
        let mut vel = 0.0;
        let next = smooth_damp(0.0, 100.0, &mut vel, 0.1, 1.0, 0.1);
        // at most max_speed * dt plus the spring's own slack
        assert!(next < 0.2);
    }

    #[test]
    fn smooth_damp_zero_dt_is_noop() {
        let mut vel = 3.0;
        assert_eq!(smooth_damp(1.0, 5.0, &mut vel, 0.5, UNBOUNDED, 0.0), 1.0);
        assert_eq!(vel, 3.0);
    }

    #[test]
    fn smooth_damp_vec3_reaches_target() {
        let target = Vec3::new(3.0, -2.0, 7.0);
        let mut pos = Vec3::ZERO;
        let mut vel = Vec3::ZERO;
        for _ in 0..300 {
            pos = smooth_damp_vec3(pos, target, &mut vel, 0.3, UNBOUNDED, 1.0 / 60.0);
        }
        assert!(pos.abs_diff_eq(target, 1e-3));
    }

    #[test]
    fn delta_angle_takes_shortest_path() {
        assert!((delta_angle(350.0, 10.0) - 20.0).abs() < 1e-4);
        assert!((delta_angle(10.0, 350.0) + 20.0).abs() < 1e-4);
        assert!((delta_angle(0.0, 180.0) - 180.0).abs() < 1e-4);
        assert!((delta_angle(90.0, -270.0)).abs() < 1e-4);
    }

    #[test]
    fn smooth_damp_angle_wraps() {
        let mut vel = 0.0;
        let next = smooth_damp_angle(350.0, 10.0, &mut vel, 0.1, UNBOUNDED, 0.05);
        assert!(next > 350.0, "should move forward through 360, got {next}");
    }

    #[test]
    fn projection_is_orthogonal() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        let p = project_on_plane(v, Vec3::Y);
        assert!(p.dot(Vec3::Y).abs() < 1e-6);
        assert_eq!(p, Vec3::new(1.0, 0.0, 3.0));
    }

    #[test]
    fn angles() {
        assert!((angle_between(Vec3::X, Vec3::Y) - 90.0).abs() < 1e-4);
        assert_eq!(angle_between(Vec3::ZERO, Vec3::Y), 0.0);
        let q = Quat::from_rotation_y(30f32.to_radians());
        assert!((quat_angle(Quat::IDENTITY, q) - 30.0).abs() < 1e-2);
        assert_eq!(quat_angle(q, q), 0.0);
    }
}
