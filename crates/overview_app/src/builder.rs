use log::info;
use overview_core::{InputState, TimeClock};

use crate::config::AppConfig;
use crate::error::AppError;
use crate::runner::Runner;
use crate::scene::build_scene;

/// Frame length used by headless runs when the config sets none.
pub const DEFAULT_FIXED_DT: f32 = 1.0 / 60.0;

/// The main entry point: builds the scene described by an [`AppConfig`] and
/// runs it either headless (scripted input, fixed steps) or in a window.
///
/// ```rust,ignore
/// let config = AppConfig::load(Path::new("scene.toml"))?;
/// let mut app = App::from_config(config)?;
/// app.run_headless();
/// ```
pub struct App {
    config: AppConfig,
    runner: Runner,
}

impl App {
    /// Spawn the configured entities and attach their behaviours.  The clock
    /// is fixed when the config asks for it, wall-clock otherwise.
    pub fn from_config(config: AppConfig) -> Result<Self, AppError> {
        let (world, attachments) = build_scene(&config)?;
        let clock = match config.fixed_dt {
            Some(dt) => TimeClock::fixed(dt),
            None => TimeClock::new(),
        };
        let mut runner = Runner::new(world, InputState::with_settings(config.input.clone()), clock);
        for attachment in attachments {
            runner.attach_boxed(attachment);
        }
        info!(
            "scene \"{}\": {} entities, {} behaviours",
            config.title,
            runner.world().len(),
            runner.behavior_count()
        );
        Ok(Self { config, runner })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn runner(&self) -> &Runner {
        &self.runner
    }

    pub fn runner_mut(&mut self) -> &mut Runner {
        &mut self.runner
    }

    /// Simulate `config.frames` fixed steps, feeding the scripted input at
    /// the frames it is scheduled for.
    pub fn run_headless(&mut self) {
        if self.config.fixed_dt.is_none() {
            self.runner.set_clock(TimeClock::fixed(DEFAULT_FIXED_DT));
        }
        for frame in 0..self.config.frames {
            for step in self.config.steps_at(frame) {
                step.apply(self.runner.input_mut());
            }
            self.runner.step();
        }
        info!("headless run finished after {} frames", self.config.frames);
    }

    /// Open a window and run until it is closed.  Scripted input is ignored.
    pub fn run_windowed(self) -> Result<(), AppError> {
        crate::window::run_windowed(self.runner, self.config)
    }
}
