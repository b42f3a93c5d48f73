//! Application layer for the overview behaviours: TOML configuration,
//! logging, scene construction and the runners (headless and windowed).
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use overview_app::{logger, App, AppConfig};
//!
//! fn main() -> Result<(), overview_app::AppError> {
//!     let config = AppConfig::from_toml_str(include_str!("scene.toml"))?;
//!     logger::init(&config.log_level)?;
//!     App::from_config(config)?.run_windowed()
//! }
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod logger;
pub mod runner;
pub mod scene;
mod window;

pub use builder::{App, DEFAULT_FIXED_DT};
pub use config::{AppConfig, BehaviorConfig, EntityConfig, ScriptStep};
pub use error::{AppError, ConfigError, SceneError};
pub use runner::Runner;
pub use scene::{build_scene, Attachment};

// ── Re-export the most-used core and behaviour types ───────────────────────
pub use overview_behaviors::{
    Behavior, CameraState, FrameContext, OverviewCamera, OverviewCameraConfig, Rotator,
    RotatorConfig, SlowMove, SlowMoveConfig,
};
pub use overview_core::{
    CursorMode, CursorState, Handle, InputState, KeyCode, Lens, MouseButton, Time, TimeClock,
    Transform, World,
};

// glam math types, re-exported for convenience
pub use overview_core::glam::{Quat, Vec3};
