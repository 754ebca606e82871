/// Frame rate measurement
use std::collections::VecDeque;
use std::time::Duration;
use wf3d_core::config::FPS_WINDOW;

/// Average frame rate over the most recent frames
pub struct FpsCounter {
    frames: VecDeque<Duration>,
    window: usize,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::with_window(FPS_WINDOW)
    }

    pub fn with_window(window: usize) -> Self {
        Self {
            frames: VecDeque::with_capacity(window),
            window: window.max(1),
        }
    }

    /// Record the duration of a finished frame.
    pub fn tick(&mut self, frame_time: Duration) {
        if self.frames.len() == self.window {
            self.frames.pop_front();
        }
        self.frames.push_back(frame_time);
    }

    /// Frames per second, or 0 before any frame has been timed.
    pub fn fps(&self) -> f64 {
        let total: Duration = self.frames.iter().sum();
        if total.is_zero() {
            return 0.0;
        }
        self.frames.len() as f64 / total.as_secs_f64()
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}
