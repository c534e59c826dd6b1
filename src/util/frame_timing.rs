use web_time::{Duration, Instant};

/// Update pacing with a smoothed rate and optional rate limiting.
pub struct FrameTiming {
    /// Target updates per second (0 = unlimited)
    target_fps: u32,
    /// Minimum frame duration based on target FPS
    min_frame_duration: Duration,
    /// Last frame timestamp
    last_frame: Instant,
    /// Smoothed rate using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
    /// Frames ended so far
    frames: u64,
}

impl FrameTiming {
    /// Create a new frame timer with the given FPS target (0 = unlimited).
    pub fn new(target_fps: u32) -> Self {
        let min_frame_duration = if target_fps > 0 {
            Duration::from_secs_f64(1.0 / target_fps as f64)
        } else {
            Duration::ZERO
        };

        Self {
            target_fps,
            min_frame_duration,
            last_frame: Instant::now(),
            smoothed_fps: 60.0,
            smoothing: 0.05,
            frames: 0,
        }
    }

    /// Time left before the next frame may start. Zero when unlimited.
    pub fn remaining(&self) -> Duration {
        if self.target_fps == 0 {
            return Duration::ZERO;
        }
        self.min_frame_duration
            .saturating_sub(self.last_frame.elapsed())
    }

    /// Whether enough time has passed to start the next frame.
    pub fn should_render(&self) -> bool {
        self.remaining().is_zero()
    }

    /// Call after each update to fold its duration into the smoothed rate.
    pub fn end_frame(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.frames += 1;

        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
    }

    /// Smoothed frames per second.
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }

    /// Frames ended since construction.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlimited_never_waits() {
        let timing = FrameTiming::new(0);
        assert!(timing.should_render());
        assert_eq!(timing.remaining(), Duration::ZERO);
    }

    #[test]
    fn limited_waits_for_frame_budget() {
        let mut timing = FrameTiming::new(1);
        timing.end_frame();
        assert!(!timing.should_render());
        assert!(timing.remaining() <= Duration::from_secs(1));
        assert_eq!(timing.frames(), 1);
    }
}
