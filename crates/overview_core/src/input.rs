use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use winit::event::{DeviceEvent, ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::PhysicalKey;

/// Re-exported key and mouse enums from `winit` for convenience.
pub use winit::event::MouseButton;
pub use winit::keyboard::KeyCode;

/// Touch-pad scrolling reports pixels; this many count as one wheel line.
const PIXELS_PER_LINE: f32 = 40.0;

/// Virtual input axes polled by behaviours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Strafe left / right (A/D, arrow keys).
    Horizontal,
    /// Forward / backward (W/S, arrow keys).
    Vertical,
    /// Horizontal mouse motion this frame, positive to the right.
    MouseX,
    /// Vertical mouse motion this frame, positive upwards.
    MouseY,
    /// Wheel movement this frame, positive away from the user.
    ScrollWheel,
}

/// A key-driven axis that eases towards its raw value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyAxis {
    pub positive: Vec<KeyCode>,
    pub negative: Vec<KeyCode>,
    /// Units per second the value falls back to zero once released.
    pub gravity: f32,
    /// Units per second the value moves towards the held direction.
    pub sensitivity: f32,
    /// Jump to zero first when the opposite direction is pressed.
    pub snap: bool,
}

impl Default for KeyAxis {
    fn default() -> Self {
        Self {
            positive: Vec::new(),
            negative: Vec::new(),
            gravity: 3.0,
            sensitivity: 3.0,
            snap: true,
        }
    }
}

impl KeyAxis {
    pub fn new(positive: &[KeyCode], negative: &[KeyCode]) -> Self {
        Self {
            positive: positive.to_vec(),
            negative: negative.to_vec(),
            ..Default::default()
        }
    }
}

/// Tuning for all virtual axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisSettings {
    pub horizontal: KeyAxis,
    pub vertical: KeyAxis,
    /// Axis units per pixel of mouse motion.
    pub mouse_sensitivity: f32,
    /// Axis units per wheel line.
    pub scroll_sensitivity: f32,
}

impl Default for AxisSettings {
    fn default() -> Self {
        Self {
            horizontal: KeyAxis::new(
                &[KeyCode::KeyD, KeyCode::ArrowRight],
                &[KeyCode::KeyA, KeyCode::ArrowLeft],
            ),
            vertical: KeyAxis::new(
                &[KeyCode::KeyW, KeyCode::ArrowUp],
                &[KeyCode::KeyS, KeyCode::ArrowDown],
            ),
            mouse_sensitivity: 0.1,
            scroll_sensitivity: 0.1,
        }
    }
}

/// State of the keyboard and mouse at a given moment.
///
/// The runner is responsible for driving this structure, either by feeding
/// it the events coming from `winit` ([`handle_window_event`],
/// [`handle_device_event`]) or by calling the setters directly in headless
/// runs.  Once populated, behaviours query it through the helpers below.
///
/// [`handle_window_event`]: InputState::handle_window_event
/// [`handle_device_event`]: InputState::handle_device_event
#[derive(Debug, Clone, Default)]
pub struct InputState {
    keys_down: HashSet<KeyCode>,
    /// keys that went down since the last `end_frame`
    keys_pressed: HashSet<KeyCode>,
    mouse_buttons: HashSet<MouseButton>,
    mouse_pos: Option<(f64, f64)>,
    /// accumulated movement since the last `end_frame`
    mouse_delta: (f32, f32),
    /// accumulated wheel lines since the last `end_frame`
    scroll: f32,
    settings: AxisSettings,
    horizontal: f32,
    vertical: f32,
}

impl InputState {
    /// Creates a fresh, empty input state with default axis settings.
    pub fn new() -> Self {
        Default::default()
    }

    /// Creates an empty input state with custom axis tuning.
    pub fn with_settings(settings: AxisSettings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    /// Called by the event loop when a keyboard event arrives.
    pub fn update_key(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            if self.keys_down.insert(key) {
                self.keys_pressed.insert(key);
            }
        } else {
            self.keys_down.remove(&key);
        }
    }

    /// Returns true while the given key is held down.
    pub fn key_held(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Returns true only on the frame the key went down.
    pub fn just_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Called by the event loop when a mouse button event arrives.
    pub fn update_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        if pressed {
            self.mouse_buttons.insert(button);
        } else {
            self.mouse_buttons.remove(&button);
        }
    }

    /// Returns true if the given mouse button is currently held.
    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.mouse_buttons.contains(&button)
    }

    /// Update the cursor position (window coordinates) and accumulate the
    /// movement into this frame's mouse delta.  The first sample only sets
    /// the position.
    pub fn set_mouse_position(&mut self, x: f64, y: f64) {
        if let Some((px, py)) = self.mouse_pos {
            self.add_mouse_motion((x - px) as f32, (y - py) as f32);
        }
        self.mouse_pos = Some((x, y));
    }

    /// Add raw mouse motion in pixels (screen space, `+y` down).
    pub fn add_mouse_motion(&mut self, dx: f32, dy: f32) {
        self.mouse_delta.0 += dx;
        self.mouse_delta.1 += dy;
    }

    /// Add wheel movement in lines, positive away from the user.
    pub fn add_scroll(&mut self, lines: f32) {
        self.scroll += lines;
    }

    /// Retrieve the last recorded mouse position.
    pub fn mouse_position(&self) -> (f64, f64) {
        self.mouse_pos.unwrap_or((0.0, 0.0))
    }

    /// Mouse movement in pixels accumulated this frame.
    pub fn mouse_delta(&self) -> (f32, f32) {
        self.mouse_delta
    }

    /// Wheel lines accumulated this frame.
    pub fn scroll_delta(&self) -> f32 {
        self.scroll
    }

    /// Smoothed value of a virtual axis.
    pub fn axis(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.horizontal,
            Axis::Vertical => self.vertical,
            _ => self.axis_raw(axis),
        }
    }

    /// Unsmoothed value of a virtual axis; `-1`, `0` or `1` for key axes.
    pub fn axis_raw(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.key_axis_raw(&self.settings.horizontal),
            Axis::Vertical => self.key_axis_raw(&self.settings.vertical),
            Axis::MouseX => self.mouse_delta.0 * self.settings.mouse_sensitivity,
            Axis::MouseY => -self.mouse_delta.1 * self.settings.mouse_sensitivity,
            Axis::ScrollWheel => self.scroll * self.settings.scroll_sensitivity,
        }
    }

    fn key_axis_raw(&self, axis: &KeyAxis) -> f32 {
        let pos = axis.positive.iter().any(|k| self.key_held(*k));
        let neg = axis.negative.iter().any(|k| self.key_held(*k));
        match (pos, neg) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }

    /// Ease the key axes towards their raw values.  Call once per frame
    /// before behaviours read the input.
    pub fn advance_axes(&mut self, dt: f32) {
        let raw_h = self.key_axis_raw(&self.settings.horizontal);
        let raw_v = self.key_axis_raw(&self.settings.vertical);
        self.horizontal = ease_axis(self.horizontal, raw_h, &self.settings.horizontal, dt);
        self.vertical = ease_axis(self.vertical, raw_v, &self.settings.vertical, dt);
    }

    /// Clear per-frame data (pressed keys, mouse and wheel deltas).  Must
    /// run after every behaviour has read the frame's input.
    pub fn end_frame(&mut self) {
        self.keys_pressed.clear();
        self.mouse_delta = (0.0, 0.0);
        self.scroll = 0.0;
    }

    /// Feed a winit window event.
    ///
    /// Cursor moves only update the position; mouse look reads raw motion
    /// from [`handle_device_event`](Self::handle_device_event) so it keeps
    /// working while the cursor is locked.
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.mouse_pos = Some((position.x, position.y));
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.update_mouse_button(*button, *state == ElementState::Pressed);
            }
            WindowEvent::MouseWheel { delta, .. } => match delta {
                MouseScrollDelta::LineDelta(_, y) => self.add_scroll(*y),
                MouseScrollDelta::PixelDelta(p) => self.add_scroll(p.y as f32 / PIXELS_PER_LINE),
            },
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    self.update_key(code, event.state == ElementState::Pressed);
                }
            }
            WindowEvent::Focused(false) => {
                // keys released while unfocused never reach us
                self.keys_down.clear();
                self.mouse_buttons.clear();
            }
            _ => {}
        }
    }

    /// Feed a winit device event (raw mouse motion).
    pub fn handle_device_event(&mut self, event: &DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            self.add_mouse_motion(*dx as f32, *dy as f32);
        }
    }
}

fn ease_axis(value: f32, raw: f32, axis: &KeyAxis, dt: f32) -> f32 {
    if raw != 0.0 {
        let start = if axis.snap && value != 0.0 && value.signum() != raw.signum() {
            0.0
        } else {
            value
        };
        move_towards(start, raw, axis.sensitivity * dt)
    } else {
        move_towards(value, 0.0, axis.gravity * dt)
    }
}

fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}
