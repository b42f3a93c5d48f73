//! Per-frame behaviours that can be attached to scene entities: an RTS-style
//! overview camera, a "move toward target" translator and a constant-rate
//! rotator.

pub mod behavior;
pub mod overview_camera;
pub mod rotator;
pub mod slow_move;

pub use behavior::{Behavior, FrameContext};
pub use overview_camera::{CameraBindings, CameraState, OverviewCamera, OverviewCameraConfig};
pub use rotator::{Rotator, RotatorConfig};
pub use slow_move::{SlowMove, SlowMoveConfig};

#[cfg(test)]
pub(crate) mod test_util {
    use overview_core::{CursorState, Handle, InputState, Time, World};

    use crate::{Behavior, FrameContext};

    /// Step a behaviour once with a fixed delta.
    pub fn step(
        behavior: &mut dyn Behavior,
        world: &mut World,
        input: &InputState,
        cursor: &mut CursorState,
        entity: Handle,
        dt: f32,
        frame: u64,
    ) {
        let mut ctx = FrameContext {
            entity,
            input,
            time: Time::from_delta(dt, dt as f64 * (frame + 1) as f64, frame),
            world,
            cursor,
        };
        if frame == 0 {
            behavior.start(&mut ctx);
        }
        behavior.update(&mut ctx);
    }
}
