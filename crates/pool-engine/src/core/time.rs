use std::time::{Duration, Instant};

/// Frame-rate limiter for the cooperative game loop.
///
/// The simulation always advances by one fixed step per frame, so this only
/// caps how often frames happen: `tick` sleeps away whatever is left of the
/// frame budget since the previous tick.
pub struct FrameLimiter {
    /// Target frame duration. `None` runs frames back to back.
    target: Option<Duration>,
    last: Instant,
}

impl FrameLimiter {
    /// Cap the loop at `fps` frames per second.
    pub fn new(fps: u32) -> Self {
        Self {
            target: Some(Duration::from_secs_f64(1.0 / fps.max(1) as f64)),
            last: Instant::now(),
        }
    }

    /// A limiter that never sleeps (tests, fast headless runs).
    pub fn unlimited() -> Self {
        Self {
            target: None,
            last: Instant::now(),
        }
    }

    /// Block until the frame budget has elapsed, then start the next frame.
    /// Returns the wall-clock duration of the frame that just ended.
    pub fn tick(&mut self) -> Duration {
        if let Some(target) = self.target {
            let elapsed = self.last.elapsed();
            if elapsed < target {
                std::thread::sleep(target - elapsed);
            }
        }
        let now = Instant::now();
        let frame = now - self.last;
        self.last = now;
        frame
    }

    /// The target frame duration, if limited.
    pub fn target(&self) -> Option<Duration> {
        self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_matches_fps() {
        let limiter = FrameLimiter::new(120);
        let target = limiter.target().unwrap();
        assert!((target.as_secs_f64() - 1.0 / 120.0).abs() < 1e-9);
    }

    #[test]
    fn tick_waits_for_frame_budget() {
        let mut limiter = FrameLimiter::new(100);
        limiter.tick();
        let frame = limiter.tick();
        assert!(frame >= Duration::from_millis(9), "frame={:?}", frame);
    }

    #[test]
    fn unlimited_does_not_sleep() {
        let mut limiter = FrameLimiter::unlimited();
        assert!(limiter.target().is_none());
        let frame = limiter.tick();
        assert!(frame < Duration::from_millis(50), "frame={:?}", frame);
    }

    #[test]
    fn zero_fps_is_clamped() {
        let limiter = FrameLimiter::new(0);
        assert_eq!(limiter.target(), Some(Duration::from_secs(1)));
    }
}
