use glam::Mat4;
use serde::{Deserialize, Serialize};

/// Tag marking the entity that behaviours treat as "the" camera.
pub const MAIN_CAMERA_TAG: &str = "MainCamera";

/// Projection parameters carried by a camera entity.  The view comes from
/// the entity's [`Transform`](crate::Transform).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lens {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Lens {
    fn default() -> Self {
        Self {
            fov: 60.0,
            aspect: 16.0 / 9.0,
            znear: 0.1,
            zfar: 1000.0,
        }
    }
}

impl Lens {
    pub fn with_fov(fov: f32) -> Self {
        Self {
            fov,
            ..Default::default()
        }
    }

    /// Right-handed perspective projection for this lens.
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), self.aspect, self.znear, self.zfar)
    }

    /// Update aspect ratio when viewport dimensions change.
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = if height == 0 {
            1.0
        } else {
            width as f32 / height as f32
        };
    }
}

/// How the host should treat the OS cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorMode {
    #[default]
    Free,
    /// Kept inside the window.
    Confined,
    /// Pinned in place; only raw motion is reported.
    Locked,
}

/// Cursor request written by behaviours during a frame and applied by the
/// host afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorState {
    pub mode: CursorMode,
    pub visible: bool,
}

impl Default for CursorState {
    fn default() -> Self {
        Self {
            mode: CursorMode::Free,
            visible: true,
        }
    }
}
