use log::trace;
use overview_behaviors::{Behavior, FrameContext};
use overview_core::{CursorState, Handle, InputState, Time, TimeClock, World};

use crate::scene::Attachment;

struct Slot {
    attachment: Attachment,
    started: bool,
}

/// Owns the world, the input, the clock and every attached behaviour, and
/// drives them one frame at a time.
///
/// Per frame: tick the clock, ease the input axes, run each behaviour
/// (`start` on its first frame, then `update`) in attachment order, then
/// clear the per-frame input.
pub struct Runner {
    world: World,
    input: InputState,
    clock: TimeClock,
    cursor: CursorState,
    slots: Vec<Slot>,
}

impl Runner {
    pub fn new(world: World, input: InputState, clock: TimeClock) -> Self {
        Self {
            world,
            input,
            clock,
            cursor: CursorState::default(),
            slots: Vec::new(),
        }
    }

    /// Attach a behaviour to `entity`.  It starts on the next frame.
    pub fn attach(&mut self, entity: Handle, behavior: impl Behavior + 'static) {
        self.attach_boxed(Attachment {
            entity,
            behavior: Box::new(behavior),
        });
    }

    pub fn attach_boxed(&mut self, attachment: Attachment) {
        self.slots.push(Slot {
            attachment,
            started: false,
        });
    }

    /// Swap the frame clock, e.g. to step deterministically.
    pub fn set_clock(&mut self, clock: TimeClock) {
        self.clock = clock;
    }

    /// Run one frame and return its timing.
    pub fn step(&mut self) -> Time {
        let time = self.clock.tick();
        self.input.advance_axes(time.delta);

        for slot in &mut self.slots {
            let mut ctx = FrameContext {
                entity: slot.attachment.entity,
                input: &self.input,
                time,
                world: &mut self.world,
                cursor: &mut self.cursor,
            };
            let behavior = &mut slot.attachment.behavior;
            if !slot.started {
                trace!("starting {} on {:?}", behavior.name(), ctx.entity);
                behavior.start(&mut ctx);
                slot.started = true;
            }
            behavior.update(&mut ctx);
        }

        self.input.end_frame();
        time
    }

    /// Run `frames` frames back to back.
    pub fn run_frames(&mut self, frames: u64) {
        for _ in 0..frames {
            self.step();
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Input to feed before the next [`step`](Self::step).
    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    /// The cursor requested by behaviours during the last frame.
    pub fn cursor(&self) -> CursorState {
        self.cursor
    }

    pub fn behavior_count(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    struct Probe {
        starts: Rc<Cell<u32>>,
        updates: Rc<Cell<u32>>,
    }

    impl Behavior for Probe {
        fn name(&self) -> &'static str {
            "probe"
        }

        fn start(&mut self, _ctx: &mut FrameContext) {
            self.starts.set(self.starts.get() + 1);
        }

        fn update(&mut self, _ctx: &mut FrameContext) {
            self.updates.set(self.updates.get() + 1);
        }
    }

    #[test]
    fn start_runs_once_before_updates() {
        let mut world = World::new();
        let h = world.spawn("P").build();
        let mut runner = Runner::new(world, InputState::new(), TimeClock::fixed(0.01));
        let starts = Rc::new(Cell::new(0));
        let updates = Rc::new(Cell::new(0));
        runner.attach(
            h,
            Probe {
                starts: starts.clone(),
                updates: updates.clone(),
            },
        );
        runner.run_frames(5);
        assert_eq!(starts.get(), 1);
        assert_eq!(updates.get(), 5);
        assert_eq!(runner.behavior_count(), 1);
    }

    #[test]
    fn per_frame_input_is_cleared() {
        let mut runner = Runner::new(World::new(), InputState::new(), TimeClock::fixed(0.01));
        runner.input_mut().add_scroll(1.0);
        let t = runner.step();
        assert_eq!(t.frame_count, 0);
        assert_eq!(runner.input_mut().scroll_delta(), 0.0);
    }
}
