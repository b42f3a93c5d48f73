//! overview_core: math, transforms, timing, input and the scene world that
//! the per-frame behaviours operate on.

pub mod input;
pub mod math;
pub mod scene;
pub mod time;
pub mod transform;

// re-export common types so callers don't need to reach into submodules
pub use input::{Axis, AxisSettings, InputState, KeyAxis, KeyCode, MouseButton};
pub use scene::{CursorMode, CursorState, Element, ElementKind, Handle, Lens, World};
pub use time::{Time, TimeClock};
pub use transform::Transform;

// glam is part of the public API (positions, rotations)
pub use glam;
