//! Spins an entity around its own up axis at a constant rate.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::behavior::{Behavior, FrameContext};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotatorConfig {
    /// Degrees per second around the local `+Y` axis.
    pub rate: f32,
}

impl Default for RotatorConfig {
    fn default() -> Self {
        // 0.1° per frame at 60 Hz
        Self { rate: 6.0 }
    }
}

#[derive(Debug, Clone)]
pub struct Rotator {
    rate: f32,
}

impl Rotator {
    pub fn new(config: RotatorConfig) -> Self {
        Self { rate: config.rate }
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }
}

impl Behavior for Rotator {
    fn name(&self) -> &'static str {
        "rotator"
    }

    fn update(&mut self, ctx: &mut FrameContext) {
        let degrees = self.rate * ctx.dt();
        if let Some(t) = ctx.transform_mut() {
            t.rotate_local(Vec3::Y, degrees);
        }
    }
}

#[cfg(test)]
mod tests {
    use overview_core::{CursorState, InputState, Transform, World};

    use super::*;
    use crate::test_util::step;

    #[test]
    fn spins_by_rate_times_delta() {
        let mut world = World::new();
        let h = world.spawn("Spinner").build();
        let input = InputState::new();
        let mut cursor = CursorState::default();
        let mut rot = Rotator::new(RotatorConfig { rate: 90.0 });
        for frame in 0..10 {
            step(&mut rot, &mut world, &input, &mut cursor, h, 0.1, frame);
        }
        // 10 × 0.1 s × 90°/s = 90°, so forward went from −Z to −X
        let forward = world.transform(h).unwrap().forward();
        assert!(forward.abs_diff_eq(Vec3::NEG_X, 1e-4), "{forward:?}");
    }

    #[test]
    fn spins_around_local_axis() {
        let mut world = World::new();
        let tilted = Transform::from_position_euler(Vec3::ZERO, [0.0, 0.0, 90.0]);
        let h = world.spawn("Tilted").with_transform(tilted).build();
        let input = InputState::new();
        let mut cursor = CursorState::default();
        let mut rot = Rotator::new(RotatorConfig { rate: 45.0 });
        step(&mut rot, &mut world, &input, &mut cursor, h, 0.1, 0);
        // the local up axis is unaffected by a spin around itself
        let up = world.transform(h).unwrap().up();
        assert!(up.abs_diff_eq(tilted.up(), 1e-5));
    }

    #[test]
    fn default_rate() {
        assert_eq!(Rotator::new(RotatorConfig::default()).rate(), 6.0);
    }
}
