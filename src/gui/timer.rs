use std::time::{Duration, Instant};

/// Wall-clock time between frames. This is the only time step the scene sees.
pub struct FrameTimer {
    last_tick: Instant,
    fps_counter: FpsCounter,
}

impl FrameTimer {
    pub fn new() -> Self {
        FrameTimer {
            last_tick: Instant::now(),
            fps_counter: FpsCounter::new(Duration::from_millis(1000)),
        }
    }

    /// Seconds since the previous tick (or since construction).
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_tick);
        self.last_tick = now;

        if let Some(fps) = self.fps_counter.increment(now) {
            log::debug!("{:.1} fps", fps);
        }
        elapsed.as_secs_f32()
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

pub struct FpsCounter {
    window_start: Instant,
    counter: usize,
    window_size: Duration,
    previous_fps: f64,
}

impl FpsCounter {
    pub fn new(window_size: Duration) -> Self {
        FpsCounter {
            window_start: Instant::now(),
            counter: 0,
            window_size,
            previous_fps: 0.0,
        }
    }

    pub fn value(&self) -> f64 {
        self.previous_fps
    }

    /// Counts a frame. Returns the new rate whenever a window closes.
    pub fn increment(&mut self, now: Instant) -> Option<f64> {
        self.counter += 1;

        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed > self.window_size {
            self.previous_fps = self.counter as f64 / elapsed.as_secs_f64();
            self.window_start = now;
            self.counter = 0;
            Some(self.previous_fps)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fps_window() {
        let mut counter = FpsCounter::new(Duration::from_millis(1000));
        let start = Instant::now();

        for i in 1..=59 {
            assert_eq!(counter.increment(start + Duration::from_millis(i * 16)), None);
        }
        let fps = counter.increment(start + Duration::from_millis(1200)).unwrap();
        assert!(fps > 45.0 && fps < 55.0, "fps was {}", fps);
        assert_eq!(counter.value(), fps);
    }

    #[test]
    fn test_tick_is_non_negative() {
        let mut timer = FrameTimer::new();
        let first = timer.tick();
        let second = timer.tick();
        assert!(first >= 0.0);
        assert!(second >= 0.0);
    }
}
