//! Windowed host: a winit event loop that feeds real keyboard and mouse
//! input to the [`Runner`] and applies the cursor behaviours ask for.
//!
//! Nothing is rendered; the window title shows the main camera's position
//! and field of view so the behaviours can be driven by hand.

use std::sync::Arc;

use log::{debug, error, info};
use overview_core::{CursorMode, CursorState};
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorGrabMode, Window, WindowId},
};

use crate::config::AppConfig;
use crate::error::AppError;
use crate::runner::Runner;

/// Frames between window-title refreshes.
const TITLE_INTERVAL: u64 = 15;

struct WindowHost {
    runner: Runner,
    config: AppConfig,
    window: Option<Arc<Window>>,
    applied_cursor: Option<CursorState>,
}

impl WindowHost {
    fn new(runner: Runner, config: AppConfig) -> Self {
        Self {
            runner,
            config,
            window: None,
            applied_cursor: None,
        }
    }

    fn resize_lens(&mut self, width: u32, height: u32) {
        let world = self.runner.world_mut();
        if let Some(lens) = world.main_camera().and_then(|cam| world.lens_mut(cam)) {
            lens.set_aspect(width, height);
        }
    }

    fn apply_cursor(&mut self, window: &Window) {
        let wanted = self.runner.cursor();
        if self.applied_cursor == Some(wanted) {
            return;
        }
        let grab = match wanted.mode {
            CursorMode::Free => CursorGrabMode::None,
            CursorMode::Confined => CursorGrabMode::Confined,
            CursorMode::Locked => CursorGrabMode::Locked,
        };
        if let Err(e) = window.set_cursor_grab(grab) {
            // not every platform supports every grab mode
            debug!("cursor grab {:?} unavailable ({}), trying fallback", grab, e);
            let fallback = match grab {
                CursorGrabMode::Locked => CursorGrabMode::Confined,
                _ => CursorGrabMode::None,
            };
            if let Err(e) = window.set_cursor_grab(fallback) {
                debug!("cursor grab fallback failed: {}", e);
            }
        }
        window.set_cursor_visible(wanted.visible);
        self.applied_cursor = Some(wanted);
    }

    fn refresh_title(&self, window: &Window) {
        let world = self.runner.world();
        let Some(cam) = world.main_camera() else {
            return;
        };
        if let (Some(t), Some(lens)) = (world.transform(cam), world.lens(cam)) {
            let p = t.position;
            window.set_title(&format!(
                "{} | pos ({:.1}, {:.1}, {:.1}) fov {:.1}",
                self.config.title, p.x, p.y, p.z, lens.fov
            ));
        }
    }
}

impl ApplicationHandler for WindowHost {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attributes = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(winit::dpi::PhysicalSize::new(
                self.config.width,
                self.config.height,
            ));
        match event_loop.create_window(attributes) {
            Ok(window) => {
                let size = window.inner_size();
                self.resize_lens(size.width, size.height);
                self.window = Some(Arc::new(window));
            }
            Err(e) => {
                error!("failed to create window: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.runner.input_mut().handle_window_event(&event);

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. }
                if event.physical_key == PhysicalKey::Code(KeyCode::Escape) =>
            {
                event_loop.exit()
            }
            WindowEvent::Resized(size) => self.resize_lens(size.width, size.height),
            _ => {}
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _id: DeviceId, event: DeviceEvent) {
        self.runner.input_mut().handle_device_event(&event);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        let Some(window) = self.window.clone() else {
            return;
        };
        let time = self.runner.step();
        self.apply_cursor(&window);
        if time.frame_count % TITLE_INTERVAL == 0 {
            self.refresh_title(&window);
        }
        window.request_redraw();
    }
}

/// Run `runner` inside a window until it is closed or Escape is pressed.
pub(crate) fn run_windowed(runner: Runner, config: AppConfig) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    // Poll = spin the loop as fast as possible; no sleeping between frames.
    event_loop.set_control_flow(ControlFlow::Poll);
    info!("opening window \"{}\"", config.title);
    let mut host = WindowHost::new(runner, config);
    event_loop.run_app(&mut host)?;
    Ok(())
}
