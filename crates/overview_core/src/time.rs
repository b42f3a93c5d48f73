//! Frame timing utilities.
//!
//! `Time` is produced once per frame by the runner and handed to every
//! behaviour through its frame context.  The runner owns the `TimeClock`
//! that produces snapshots; headless runs and tests use
//! [`TimeClock::fixed`] so every frame advances by the same amount.
//!
//! # Example
//! ```rust,ignore
//! fn update(&mut self, ctx: &mut FrameContext) {
//!     // Spin at 90°/s regardless of frame rate
//!     let degrees = 90.0 * ctx.time.delta;
//!     ctx.transform_mut().rotate_local(Vec3::Y, degrees);
//! }
//! ```

#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;
#[cfg(target_arch = "wasm32")]
use web_time::Instant;

/// Largest delta a single frame may report, in seconds.
pub const MAX_DELTA: f32 = 0.1;

/// A snapshot of timing information for the current frame.
///
/// Since it is `Copy` you can store a copy locally if needed.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Time {
    /// Seconds elapsed since the previous frame.  Clamped to
    /// [`MAX_DELTA`] so a stalled frame does not fling the camera.
    pub delta: f32,

    /// Total seconds elapsed since the clock started.
    pub elapsed: f64,

    /// Number of frames produced so far (starts at 0 for the first frame).
    pub frame_count: u64,

    /// Instantaneous frames-per-second derived from `delta`.
    pub fps: f32,
}

impl Time {
    /// Build a snapshot for a frame of the given length.
    pub fn from_delta(delta: f32, elapsed: f64, frame_count: u64) -> Self {
        let delta = delta.clamp(0.0, MAX_DELTA);
        let fps = if delta > 0.0 { 1.0 / delta } else { 0.0 };
        Self {
            delta,
            elapsed,
            frame_count,
            fps,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Source {
    Wall { start: Instant, last_tick: Instant },
    Fixed { step: f32, elapsed: f64 },
}

/// Stateful timer that accumulates time and produces [`Time`] snapshots.
///
/// The runner creates one of these at startup and calls `tick()` at the
/// beginning of every frame.
#[derive(Debug, Clone)]
pub struct TimeClock {
    source: Source,
    frame_count: u64,
}

impl TimeClock {
    /// Create a wall-clock timer, starting the epoch now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            source: Source::Wall {
                start: now,
                last_tick: now,
            },
            frame_count: 0,
        }
    }

    /// Create a deterministic clock where every frame lasts `step` seconds.
    pub fn fixed(step: f32) -> Self {
        Self {
            source: Source::Fixed { step, elapsed: 0.0 },
            frame_count: 0,
        }
    }

    /// Whether this clock advances by a fixed step.
    pub fn is_fixed(&self) -> bool {
        matches!(self.source, Source::Fixed { .. })
    }

    /// Return the current [`Time`] snapshot without advancing the clock.
    pub fn peek(&self) -> Time {
        match self.source {
            Source::Wall { start, last_tick } => {
                let now = Instant::now();
                Time::from_delta(
                    (now - last_tick).as_secs_f32(),
                    (now - start).as_secs_f64(),
                    self.frame_count,
                )
            }
            Source::Fixed { step, elapsed } => {
                Time::from_delta(step, elapsed + step as f64, self.frame_count)
            }
        }
    }

    /// Advance by one frame.  Returns the [`Time`] snapshot for this frame.
    pub fn tick(&mut self) -> Time {
        let time = self.peek();
        match &mut self.source {
            Source::Wall { last_tick, .. } => *last_tick = Instant::now(),
            Source::Fixed { step, elapsed } => *elapsed += *step as f64,
        }
        self.frame_count += 1;
        time
    }
}

impl Default for TimeClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_is_deterministic() {
        let mut clock = TimeClock::fixed(0.02);
        let a = clock.tick();
        let b = clock.tick();
        assert_eq!(a.frame_count, 0);
        assert_eq!(b.frame_count, 1);
        assert_eq!(a.delta, 0.02);
        assert!((b.elapsed - 0.04).abs() < 1e-6);
        assert!((a.fps - 50.0).abs() < 1e-3);
    }

    #[test]
    fn delta_is_clamped() {
        let t = Time::from_delta(2.0, 0.0, 0);
        assert_eq!(t.delta, MAX_DELTA);
        let mut clock = TimeClock::fixed(1.0);
        assert_eq!(clock.tick().delta, MAX_DELTA);
    }

    #[test]
    fn wall_clock_counts_frames() {
        let mut clock = TimeClock::new();
        assert!(!clock.is_fixed());
        clock.tick();
        let t = clock.tick();
        assert_eq!(t.frame_count, 1);
        assert!(t.delta >= 0.0 && t.delta <= MAX_DELTA);
    }
}
