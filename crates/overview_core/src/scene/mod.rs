//! Lightweight scene container: named entities with transforms, some of
//! which carry a camera lens.

pub mod camera;
pub mod world;

pub use camera::{CursorMode, CursorState, Lens, MAIN_CAMERA_TAG};
pub use world::{Element, ElementKind, EntityBuilder, Handle, World};
