//! RTS-style overview camera with smooth transitions between saved states.
//!
//! The camera pans on the ground plane (keyboard axes), zooms by narrowing
//! or widening the field of view (mouse wheel) and mouse-looks while the look
//! key or button is held.  On top of direct control it can glide back to its
//! `home` state or to the state it was in before the last jump.  Rotation,
//! zoom and position each transition independently, and manual input on a
//! channel cancels that channel's transition.
//!
//! Roll is ignored: mouse look only yaws around world up and pitches around
//! the camera's right axis.

use glam::{Quat, Vec3};
use log::{debug, warn};
use overview_core::input::{Axis, KeyCode, MouseButton};
use overview_core::math::{
    angle_between, project_on_plane, quat_angle, smooth_damp, smooth_damp_angle,
    smooth_damp_vec3, UNBOUNDED,
};
use overview_core::{CursorMode, CursorState, Handle, Transform, World};
use serde::{Deserialize, Serialize};

use crate::behavior::{Behavior, FrameContext};

/// Snapshot of everything a transition can restore.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub rotation: Quat,
    pub position: Vec3,
}

impl CameraState {
    pub fn new(fov: f32, rotation: Quat, position: Vec3) -> Self {
        Self {
            fov,
            rotation,
            position,
        }
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new(60.0, Quat::IDENTITY, Vec3::ZERO)
    }
}

/// Keys and buttons the camera listens to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraBindings {
    /// Glide back to the home state.
    pub home: KeyCode,
    /// Glide back to the state before the last jump.
    pub previous: KeyCode,
    /// Hold to mouse-look.
    pub look_key: KeyCode,
    /// Alternative to `look_key`.
    pub look_button: MouseButton,
    /// Hold to keep the cursor inside the window.
    pub confine_key: KeyCode,
}

impl Default for CameraBindings {
    fn default() -> Self {
        Self {
            home: KeyCode::Space,
            previous: KeyCode::Backspace,
            look_key: KeyCode::ControlLeft,
            look_button: MouseButton::Right,
            confine_key: KeyCode::ShiftLeft,
        }
    }
}

/// Tuning for [`OverviewCamera`].  Angles are in degrees, times in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverviewCameraConfig {
    /// Smooth time of automatic transitions.
    pub change_duration: f32,
    /// Mouse-look speed, degrees per axis unit per second.
    pub rotate_speed: f32,
    /// Pan speed in world units per second.
    pub move_speed: f32,
    /// Reference height; `0` means "use the height the camera starts at".
    pub base_height: f32,
    /// Zoom speed, degrees of FOV per scroll unit per second.
    pub zoom_speed: f32,
    pub min_fov: f32,
    pub max_fov: f32,
    /// Completion threshold of transitions: FOV degrees, squared distance,
    /// and (×100) degrees of rotation.
    pub snap_margin: f32,
    /// Smooth time used to pull an upside-down camera back over the vertical.
    pub look_clamp_time: f32,
    pub bindings: CameraBindings,
}

impl Default for OverviewCameraConfig {
    fn default() -> Self {
        Self {
            change_duration: 0.5,
            rotate_speed: 200.0,
            move_speed: 50.0,
            base_height: 0.0,
            zoom_speed: 360.0,
            min_fov: 10.0,
            max_fov: 120.0,
            snap_margin: 0.001,
            look_clamp_time: 0.1,
            bindings: CameraBindings::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OverviewCamera {
    config: OverviewCameraConfig,
    /// Entity carrying the lens whose FOV we drive.
    camera: Option<Handle>,
    warned: bool,

    home: CameraState,
    target: CameraState,
    last: CameraState,

    // auto-changing channels
    rot_change: bool,
    zoom_change: bool,
    pos_change: bool,

    pos_vel: Vec3,
    initial_rotation: Quat,
    rot_progress: f32,
    rot_vel: f32,
    fov_vel: f32,
    clamp_vel: f32,
}

impl Default for OverviewCamera {
    fn default() -> Self {
        Self::new(OverviewCameraConfig::default())
    }
}

impl OverviewCamera {
    pub fn new(config: OverviewCameraConfig) -> Self {
        Self {
            config,
            camera: None,
            warned: false,
            home: CameraState::default(),
            target: CameraState::default(),
            last: CameraState::default(),
            rot_change: false,
            zoom_change: false,
            pos_change: false,
            pos_vel: Vec3::ZERO,
            initial_rotation: Quat::IDENTITY,
            rot_progress: 0.0,
            rot_vel: 0.0,
            fov_vel: 0.0,
            clamp_vel: 0.0,
        }
    }

    pub fn config(&self) -> &OverviewCameraConfig {
        &self.config
    }

    /// The lens entity resolved at start, if any.
    pub fn camera(&self) -> Option<Handle> {
        self.camera
    }

    pub fn home(&self) -> CameraState {
        self.home
    }

    pub fn target(&self) -> CameraState {
        self.target
    }

    pub fn last(&self) -> CameraState {
        self.last
    }

    pub fn is_rotating(&self) -> bool {
        self.rot_change
    }

    pub fn is_zooming(&self) -> bool {
        self.zoom_change
    }

    pub fn is_moving(&self) -> bool {
        self.pos_change
    }

    /// Whether any transition is still running.
    pub fn is_changing(&self) -> bool {
        self.rot_change || self.zoom_change || self.pos_change
    }

    /// The state the camera is in right now.
    pub fn current_state(&self, world: &World, entity: Handle) -> Option<CameraState> {
        let fov = world.lens(self.camera?)?.fov;
        let t = world.transform(entity)?;
        Some(CameraState::new(fov, t.rotation, t.position))
    }

    /// The state the camera will settle in: the current state with every
    /// channel that is still transitioning replaced by its target.
    pub fn desired_state(&self, world: &World, entity: Handle) -> Option<CameraState> {
        let mut state = self.current_state(world, entity)?;
        if self.zoom_change {
            state.fov = self.target.fov;
        }
        if self.rot_change {
            state.rotation = self.target.rotation;
        }
        if self.pos_change {
            state.position = self.target.position;
        }
        Some(state)
    }

    /// Start gliding to `state`, remembering where we were headed as `last`.
    pub fn change_to(&mut self, world: &World, entity: Handle, state: CameraState) {
        let Some(desired) = self.desired_state(world, entity) else {
            return;
        };
        self.last = desired;
        self.change_zoom_to(state.fov);
        self.change_rotation_to(current_rotation(world, entity), state.rotation);
        self.change_position_to(state.position);
    }

    /// Stop every running transition where it is.
    pub fn abort_change(&mut self) {
        self.zoom_change = false;
        self.pos_change = false;
        self.rot_change = false;
    }

    fn change_zoom_to(&mut self, fov: f32) {
        self.target.fov = fov;
        if !self.zoom_change {
            self.zoom_change = true;
            self.fov_vel = 0.0;
        }
    }

    fn change_rotation_to(&mut self, from: Quat, rotation: Quat) {
        self.target.rotation = rotation;
        self.initial_rotation = from;
        self.rot_progress = 0.0;
        if !self.rot_change {
            self.rot_change = true;
            self.rot_vel = 0.0;
        }
    }

    fn change_position_to(&mut self, position: Vec3) {
        self.target.position = position;
        if !self.pos_change {
            self.pos_change = true;
            self.pos_vel = Vec3::ZERO;
        }
    }

    // ── Per-frame ─────────────────────────────────────────────────────────

    fn apply_input(&mut self, ctx: &mut FrameContext, camera: Handle) {
        let dt = ctx.dt();
        let input = ctx.input;
        let entity = ctx.entity;
        let bindings = self.config.bindings.clone();

        // ── Pan ───────────────────────────────────────────────────────────
        let horiz = input.axis(Axis::Horizontal);
        let verti = input.axis(Axis::Vertical);
        if horiz != 0.0 || verti != 0.0 {
            let looking_down = ctx
                .world
                .transform(camera)
                .map(|cam| {
                    let fwd = cam.forward();
                    angle_between(fwd, Vec3::NEG_Y) < angle_between(fwd, Vec3::Y)
                })
                .unwrap_or(false);
            if let Some(t) = ctx.world.transform_mut(entity) {
                let mut pan = horiz * project_on_plane(t.right(), Vec3::Y).normalize_or_zero();
                let (_, pitch) = t.yaw_pitch();
                let ahead = if pitch.abs() < 1.0 {
                    t.forward()
                } else if looking_down {
                    t.up()
                } else {
                    -t.up()
                };
                pan += verti * project_on_plane(ahead, Vec3::Y).normalize_or_zero();
                t.translate(self.config.move_speed * dt * pan);
            }
        }
        // trying to move during a reset aborts the position reset
        if input.axis_raw(Axis::Horizontal) != 0.0 || input.axis_raw(Axis::Vertical) != 0.0 {
            self.pos_change = false;
        }

        // ── Zoom ──────────────────────────────────────────────────────────
        let scroll = input.axis(Axis::ScrollWheel);
        if input.axis_raw(Axis::ScrollWheel) != 0.0 {
            self.zoom_change = false;
        }
        if let Some(lens) = ctx.world.lens_mut(camera) {
            if scroll != 0.0 {
                lens.fov -= scroll * self.config.zoom_speed * dt;
            }
            // max_fov wins if the limits are inverted
            lens.fov = lens.fov.max(self.config.min_fov).min(self.config.max_fov);
        }

        // ── Saved states ──────────────────────────────────────────────────
        if input.just_pressed(bindings.home) {
            debug!("OverviewCamera: returning home");
            let home = self.home;
            self.change_to(ctx.world, entity, home);
        }
        if input.just_pressed(bindings.previous) {
            debug!("OverviewCamera: returning to previous state");
            let last = self.last;
            self.change_to(ctx.world, entity, last);
        }

        // ── Mouse look ────────────────────────────────────────────────────
        if input.key_held(bindings.look_key) || input.is_button_down(bindings.look_button) {
            *ctx.cursor = CursorState {
                mode: CursorMode::Locked,
                visible: false,
            };
            let yaw = self.config.rotate_speed * dt * input.axis(Axis::MouseX);
            let pitch = self.config.rotate_speed * dt * input.axis(Axis::MouseY);
            if let Some(t) = ctx.world.transform_mut(entity) {
                // positive mouse x turns right, positive mouse y looks up
                t.rotate_axis(Vec3::Y, -yaw);
                let right = t.right();
                t.rotate_axis(right, pitch);
            }
            if input.axis_raw(Axis::MouseX) != 0.0 || input.axis_raw(Axis::MouseY) != 0.0 {
                self.rot_change = false;
            }
        } else {
            // an automatic rotation may legitimately pass over the vertical
            if !self.rot_change {
                self.clamp_look_angle(ctx.world, entity, dt);
            }
            let mode = if input.key_held(bindings.confine_key) {
                CursorMode::Confined
            } else {
                CursorMode::Free
            };
            *ctx.cursor = CursorState {
                mode,
                visible: true,
            };
        }
    }

    /// Pull a camera that pitched over the vertical (upside down) back to
    /// looking straight down or straight up.
    ///
    /// The rotation is rebuilt from yaw and pitch alone, so any roll left by
    /// an aborted rotation transition is dropped once the clamp engages.
    fn clamp_look_angle(&mut self, world: &mut World, entity: Handle, dt: f32) {
        let Some(t) = world.transform_mut(entity) else {
            return;
        };
        let (yaw, pitch) = t.yaw_pitch();
        if pitch.abs() <= 90.0 {
            self.clamp_vel = 0.0;
            return;
        }
        let goal = 90.0f32.copysign(pitch);
        let pitch = smooth_damp_angle(
            pitch,
            goal,
            &mut self.clamp_vel,
            self.config.look_clamp_time,
            UNBOUNDED,
            dt,
        );
        t.rotation = Transform::rotation_from_yaw_pitch(yaw, pitch);
    }

    fn advance_transitions(&mut self, world: &mut World, entity: Handle, camera: Handle, dt: f32) {
        let margin = self.config.snap_margin;
        let smooth_time = self.config.change_duration;

        if self.rot_change {
            if let Some(t) = world.transform_mut(entity) {
                if quat_angle(t.rotation, self.target.rotation) < margin * 100.0 {
                    t.rotation = self.target.rotation;
                    self.rot_change = false;
                } else {
                    self.rot_progress =
                        smooth_damp(self.rot_progress, 1.0, &mut self.rot_vel, smooth_time, UNBOUNDED, dt);
                    t.rotation = self
                        .initial_rotation
                        .slerp(self.target.rotation, self.rot_progress)
                        .normalize();
                }
            }
        }

        if self.zoom_change {
            if let Some(lens) = world.lens_mut(camera) {
                if (lens.fov - self.target.fov).abs() < margin {
                    lens.fov = self.target.fov;
                    self.fov_vel = 0.0;
                    self.zoom_change = false;
                } else {
                    lens.fov =
                        smooth_damp(lens.fov, self.target.fov, &mut self.fov_vel, smooth_time, UNBOUNDED, dt);
                }
            }
        }

        if self.pos_change {
            if let Some(t) = world.transform_mut(entity) {
                if (t.position - self.target.position).length_squared() < margin {
                    t.position = self.target.position;
                    self.pos_change = false;
                } else {
                    t.position = smooth_damp_vec3(
                        t.position,
                        self.target.position,
                        &mut self.pos_vel,
                        smooth_time,
                        UNBOUNDED,
                        dt,
                    );
                }
            }
        }
    }
}

fn current_rotation(world: &World, entity: Handle) -> Quat {
    world
        .transform(entity)
        .map(|t| t.rotation)
        .unwrap_or(Quat::IDENTITY)
}

impl Behavior for OverviewCamera {
    fn name(&self) -> &'static str {
        "overview_camera"
    }

    fn start(&mut self, ctx: &mut FrameContext) {
        if self.config.base_height == 0.0 {
            if let Some(t) = ctx.transform() {
                self.config.base_height = t.position.y;
            }
        }
        self.camera = ctx.world.main_camera();
        match self.current_state(ctx.world, ctx.entity) {
            Some(state) => {
                self.home = state;
                self.target = state;
                self.last = state;
                debug!(
                    "OverviewCamera: home at {:?}, fov {:.1}",
                    state.position, state.fov
                );
            }
            None => {
                if !self.warned {
                    warn!("OverviewCamera: no camera found");
                    self.warned = true;
                }
                self.camera = None;
            }
        }
    }

    fn update(&mut self, ctx: &mut FrameContext) {
        let Some(camera) = self.camera else {
            return;
        };
        self.apply_input(ctx, camera);
        self.advance_transitions(ctx.world, ctx.entity, camera, ctx.dt());
    }
}
