use overview_core::{CursorState, Handle, InputState, Time, Transform, World};

/// Per-frame context handed to every [`Behavior`] callback.
///
/// It bundles everything a behaviour may read or write so method
/// signatures stay simple:
///
/// ```rust,ignore
/// fn update(&mut self, ctx: &mut FrameContext) {
///     let step = self.speed * ctx.time.delta;
///     if let Some(t) = ctx.transform_mut() {
///         t.translate(Vec3::X * step);
///     }
/// }
/// ```
pub struct FrameContext<'a> {
    /// The entity this behaviour is attached to.
    pub entity: Handle,

    // ── Read-only ──────────────────────────────────────────────────────────
    /// Keyboard, mouse and virtual-axis state for this frame.
    pub input: &'a InputState,

    /// Frame timing: delta, elapsed, FPS.
    pub time: Time,

    // ── Read-write ─────────────────────────────────────────────────────────
    /// The scene.  Behaviours should only modify their own entity (and, for
    /// cameras, the lens they drive).
    pub world: &'a mut World,

    /// Cursor request applied by the host after the frame.
    pub cursor: &'a mut CursorState,
}

impl<'a> FrameContext<'a> {
    /// Shortcut: seconds elapsed since the previous frame.
    #[inline]
    pub fn dt(&self) -> f32 {
        self.time.delta
    }

    /// The attached entity's transform, if it is still alive.
    pub fn transform(&self) -> Option<&Transform> {
        self.world.transform(self.entity)
    }

    pub fn transform_mut(&mut self) -> Option<&mut Transform> {
        self.world.transform_mut(self.entity)
    }
}

/// A per-frame hook attached to one scene entity.
///
/// Both callbacks have empty default implementations so you only override
/// what you need.
#[allow(unused_variables)]
pub trait Behavior {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Called once, on the first frame the behaviour runs, before `update`.
    fn start(&mut self, ctx: &mut FrameContext) {}

    /// Called every frame.
    fn update(&mut self, ctx: &mut FrameContext) {}
}
