//! Frame clock driving the animation.
//!
//! [`Time`] produces the monotonically increasing elapsed value the frame
//! driver feeds to every update. It runs either from the wall clock or from
//! a fixed step per frame, the latter giving bit-identical replays.
//!
//! ```ignore
//! let mut time = Time::fixed(1.0 / 60.0);
//! let (elapsed, delta) = time.update();
//! ```

use std::time::{Duration, Instant};

/// Where frame deltas come from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeSource {
    /// Measured wall-clock time between updates.
    RealTime,
    /// Constant delta per update, in seconds.
    Fixed(f32),
}

/// Elapsed/delta tracking with pause and time scaling.
#[derive(Debug)]
pub struct Time {
    source: TimeSource,
    last_frame: Instant,
    /// Running total kept in f64 so small deltas still register after days.
    elapsed_secs: f64,
    delta_secs: f32,
    frame_count: u64,
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    fps_update_interval: Duration,
    paused: bool,
    time_scale: f32,
}

impl Time {
    /// Wall-clock timer starting now.
    pub fn new() -> Self {
        Self::with_source(TimeSource::RealTime)
    }

    /// Timer advancing by `step` seconds per update.
    pub fn fixed(step: f32) -> Self {
        Self::with_source(TimeSource::Fixed(step.max(0.0)))
    }

    pub fn with_source(source: TimeSource) -> Self {
        let now = Instant::now();
        Self {
            source,
            last_frame: now,
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
            paused: false,
            time_scale: 1.0,
        }
    }

    /// Advance one frame. Returns `(elapsed, delta)`.
    ///
    /// Elapsed time accumulates scaled deltas, so it never decreases, and a
    /// pause freezes it without a jump on resume.
    pub fn update(&mut self) -> (f32, f32) {
        let now = Instant::now();
        let raw_delta = match self.source {
            TimeSource::RealTime => now.duration_since(self.last_frame).as_secs_f32(),
            TimeSource::Fixed(step) => step,
        };
        self.last_frame = now;

        if self.paused {
            self.delta_secs = 0.0;
            return (self.elapsed(), self.delta_secs);
        }

        self.delta_secs = raw_delta * self.time_scale;
        self.elapsed_secs += raw_delta as f64 * self.time_scale as f64;
        self.frame_count += 1;

        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        (self.elapsed(), self.delta_secs)
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs as f32
    }

    /// Full-precision elapsed seconds.
    #[inline]
    pub fn elapsed_f64(&self) -> f64 {
        self.elapsed_secs
    }

    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Frames advanced since start (paused updates don't count).
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Frames per second, refreshed every half second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    #[inline]
    pub fn source(&self) -> TimeSource {
        self.source
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.last_frame = Instant::now();
            self.paused = false;
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Set the time scale multiplier (clamped to be non-negative).
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    /// Back to zero, keeping source and scale.
    pub fn reset(&mut self) {
        let source = self.source;
        let scale = self.time_scale;
        *self = Self::with_source(source);
        self.time_scale = scale;
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}
