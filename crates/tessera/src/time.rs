//! Frame pacing and delta time.
//!
//! [`FrameClock`] is ticked once per loop iteration by the game. It waits out
//! whatever is left of the target frame time, measures the real delta, and
//! clamps it so a stall (debugger, window drag) can't teleport entities.

use std::time::{Duration, Instant};

/// Fixed-target frame clock.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    /// When the clock was created.
    startup: Instant,
    /// When the current frame started.
    frame_start: Instant,
    /// Target duration of one frame.
    target: Duration,
    /// Upper bound on the reported delta, in seconds.
    max_delta: f32,
    /// Clamped delta of the previous frame, in seconds.
    delta: f32,
    frame_count: u64,
}

impl FrameClock {
    /// Create a clock aiming for `fps` frames per second. An `fps` of zero
    /// disables pacing.
    pub fn new(fps: u32, max_delta: f32) -> Self {
        let now = Instant::now();
        let target = if fps == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64(1.0 / fps as f64)
        };
        Self {
            startup: now,
            frame_start: now,
            target,
            max_delta,
            delta: 0.0,
            frame_count: 0,
        }
    }

    /// Sleep out the rest of the target frame, then advance.
    ///
    /// Returns the clamped delta in seconds.
    pub fn tick(&mut self) -> f32 {
        let spent = self.frame_start.elapsed();
        if spent < self.target {
            std::thread::sleep(self.target - spent);
        }
        let now = Instant::now();
        let raw = (now - self.frame_start).as_secs_f32();
        self.frame_start = now;
        self.delta = self.clamp(raw);
        self.frame_count += 1;
        self.delta
    }

    /// Clamp a raw delta to `[0, max_delta]`.
    pub fn clamp(&self, raw: f32) -> f32 {
        if raw > self.max_delta { self.max_delta } else { raw.max(0.0) }
    }

    /// Delta of the previous frame in seconds.
    pub fn delta_secs(&self) -> f32 {
        self.delta
    }

    /// Total elapsed time since the clock was created.
    pub fn elapsed(&self) -> Duration {
        self.startup.elapsed()
    }

    /// Number of ticks so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn target(&self) -> Duration {
        self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_limits_large_deltas() {
        let clock = FrameClock::new(60, 0.05);
        assert_eq!(clock.clamp(1.0), 0.05);
        assert_eq!(clock.clamp(0.01), 0.01);
        assert_eq!(clock.clamp(-1.0), 0.0);
    }

    #[test]
    fn tick_waits_for_target() {
        let mut clock = FrameClock::new(200, 1.0);
        let dt = clock.tick();
        assert!(dt >= 0.004, "dt = {dt}");
        assert_eq!(clock.frame_count(), 1);
        assert_eq!(clock.delta_secs(), dt);
    }

    #[test]
    fn zero_fps_disables_pacing() {
        let clock = FrameClock::new(0, 0.1);
        assert_eq!(clock.target(), Duration::ZERO);
    }
}
