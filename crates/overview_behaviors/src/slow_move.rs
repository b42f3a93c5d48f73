//! Moves an entity toward another one at a constant speed, then snaps onto
//! it and latches `done`.

use log::{debug, warn};
use overview_core::Handle;
use serde::{Deserialize, Serialize};

use crate::behavior::{Behavior, FrameContext};

/// Configuration as it appears in scene files; the target is resolved by
/// name when the scene is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlowMoveConfig {
    pub target: String,
    /// World units per second.
    pub speed: f32,
}

impl Default for SlowMoveConfig {
    fn default() -> Self {
        Self {
            target: String::new(),
            speed: 1.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SlowMove {
    target: Handle,
    speed: f32,
    done: bool,
    warned: bool,
}

impl SlowMove {
    pub fn new(target: Handle, speed: f32) -> Self {
        Self {
            target,
            speed,
            done: false,
            warned: false,
        }
    }

    pub fn target(&self) -> Handle {
        self.target
    }

    /// Whether the entity has reached its target at least once.
    pub fn is_done(&self) -> bool {
        self.done
    }
}

impl Behavior for SlowMove {
    fn name(&self) -> &'static str {
        "slow_move"
    }

    fn update(&mut self, ctx: &mut FrameContext) {
        let Some(goal) = ctx.world.position(self.target) else {
            if !self.warned {
                warn!("SlowMove: target {:?} no longer exists", self.target);
                self.warned = true;
            }
            return;
        };
        // a negative speed never pushes away from the target
        let step = (self.speed * ctx.dt()).max(0.0);
        let entity = ctx.entity;
        let Some(t) = ctx.transform_mut() else {
            return;
        };

        let to_goal = goal - t.position;
        if to_goal.length() <= step {
            t.position = goal;
            if !self.done {
                debug!("SlowMove: entity {:?} arrived at {:?}", entity, goal);
            }
            self.done = true;
        } else if !self.done {
            t.translate(to_goal.normalize() * step);
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;
    use overview_core::{CursorState, InputState, World};

    use super::*;
    use crate::test_util::step;

    fn setup(goal: Vec3) -> (World, overview_core::Handle, overview_core::Handle) {
        let mut world = World::new();
        let mover = world.spawn("Mover").build();
        let target = world.spawn("Goal").with_position(goal).build();
        (world, mover, target)
    }

    #[test]
    fn moves_at_constant_speed() {
        let (mut world, mover, target) = setup(Vec3::new(10.0, 0.0, 0.0));
        let input = InputState::new();
        let mut cursor = CursorState::default();
        let mut mv = SlowMove::new(target, 2.0);
        step(&mut mv, &mut world, &input, &mut cursor, mover, 0.1, 0);
        let p = world.position(mover).unwrap();
        assert!(p.abs_diff_eq(Vec3::new(0.2, 0.0, 0.0), 1e-5));
        assert!(!mv.is_done());
    }

    #[test]
    fn snaps_and_latches_done() {
        let (mut world, mover, target) = setup(Vec3::new(1.0, 0.0, 0.0));
        let input = InputState::new();
        let mut cursor = CursorState::default();
        let mut mv = SlowMove::new(target, 2.0);
        for frame in 0..6 {
            step(&mut mv, &mut world, &input, &mut cursor, mover, 0.1, frame);
        }
        assert!(mv.is_done());
        assert_eq!(world.position(mover), Some(Vec3::new(1.0, 0.0, 0.0)));

        // once done, a target that walks away is not chased any more
        world.set_position(target, Vec3::new(5.0, 0.0, 0.0));
        step(&mut mv, &mut world, &input, &mut cursor, mover, 0.1, 6);
        assert_eq!(world.position(mover), Some(Vec3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn negative_speed_does_not_back_away() {
        let (mut world, mover, target) = setup(Vec3::new(1.0, 0.0, 0.0));
        let input = InputState::new();
        let mut cursor = CursorState::default();
        let mut mv = SlowMove::new(target, -2.0);
        for frame in 0..60 {
            step(&mut mv, &mut world, &input, &mut cursor, mover, 1.0 / 60.0, frame);
        }
        assert_eq!(world.position(mover), Some(Vec3::ZERO));
        assert!(!mv.is_done());
    }

    #[test]
    fn missing_target_is_ignored() {
        let (mut world, mover, target) = setup(Vec3::ONE);
        world.despawn(target);
        let input = InputState::new();
        let mut cursor = CursorState::default();
        let mut mv = SlowMove::new(target, 2.0);
        step(&mut mv, &mut world, &input, &mut cursor, mover, 0.1, 0);
        step(&mut mv, &mut world, &input, &mut cursor, mover, 0.1, 1);
        assert_eq!(world.position(mover), Some(Vec3::ZERO));
        assert!(!mv.is_done());
    }
}
