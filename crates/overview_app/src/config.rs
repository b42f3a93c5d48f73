//! Application configuration, loaded from TOML.
//!
//! Every struct uses `#[serde(default)]`, so a file only needs to mention
//! what it changes:
//!
//! ```toml
//! title = "Overview"
//! frames = 240
//!
//! [[entities]]
//! name = "Camera"
//! position = [0, 20, 30]
//! rotation = [-30, 0, 0]
//! camera = { fov = 60 }
//! behaviors = [{ kind = "overview_camera" }]
//!
//! [[script]]
//! frame = 10
//! key_down = "KeyD"
//! ```

use std::path::Path;

use overview_behaviors::{OverviewCameraConfig, RotatorConfig, SlowMoveConfig};
use overview_core::input::{AxisSettings, KeyCode, MouseButton};
use overview_core::{InputState, Lens};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Behaviour attached to an entity, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BehaviorConfig {
    OverviewCamera(OverviewCameraConfig),
    SlowMove(SlowMoveConfig),
    Rotator(RotatorConfig),
}

/// One scene entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityConfig {
    pub name: String,
    pub position: [f32; 3],
    /// Euler angles in degrees: `[pitch, yaw, roll]`.
    pub rotation: [f32; 3],
    /// Present on camera entities; the first one becomes the main camera.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera: Option<Lens>,
    pub behaviors: Vec<BehaviorConfig>,
}

impl Default for EntityConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            position: [0.0; 3],
            rotation: [0.0; 3],
            camera: None,
            behaviors: Vec::new(),
        }
    }
}

/// Input injected at a given frame of a headless run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptStep {
    pub frame: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_down: Option<KeyCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_up: Option<KeyCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_down: Option<MouseButton>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_up: Option<MouseButton>,
    /// Pixels, screen space (`+y` down).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mouse_motion: Option<[f32; 2]>,
    /// Wheel lines, positive away from the user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scroll: Option<f32>,
}

impl ScriptStep {
    /// Feed this step's events into `input`.
    pub fn apply(&self, input: &mut InputState) {
        if let Some(key) = self.key_down {
            input.update_key(key, true);
        }
        if let Some(key) = self.key_up {
            input.update_key(key, false);
        }
        if let Some(button) = self.button_down {
            input.update_mouse_button(button, true);
        }
        if let Some(button) = self.button_up {
            input.update_mouse_button(button, false);
        }
        if let Some([dx, dy]) = self.mouse_motion {
            input.add_mouse_motion(dx, dy);
        }
        if let Some(lines) = self.scroll {
            input.add_scroll(lines);
        }
    }
}

/// Initial configuration of the window, the runner and the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// `error`, `warn`, `info`, `debug` or `trace`; `RUST_LOG` overrides it.
    pub log_level: String,
    /// Fixed frame length in seconds.  Headless runs fall back to 1/60.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_dt: Option<f32>,
    /// Number of frames a headless run simulates.
    pub frames: u64,
    pub input: AxisSettings,
    pub entities: Vec<EntityConfig>,
    pub script: Vec<ScriptStep>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Overview".to_string(),
            width: 1280,
            height: 720,
            log_level: "info".to_string(),
            fixed_dt: None,
            frames: 240,
            input: AxisSettings::default(),
            entities: Vec::new(),
            script: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Parse a config from TOML text.  Missing fields use defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load a config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Save the config to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let text = toml::to_string_pretty(self)?;
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(path, text).map_err(io_err)
    }

    /// Script steps scheduled for `frame`, in file order.
    pub fn steps_at(&self, frame: u64) -> impl Iterator<Item = &ScriptStep> {
        self.script.iter().filter(move |s| s.frame == frame)
    }
}
