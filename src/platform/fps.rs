//! Rolling frame rate over the last 60 frames

const WINDOW: usize = 60;

#[derive(Debug, Clone)]
pub struct FpsCounter {
    frame_times: [f64; WINDOW],
    frame_index: usize,
    frames_seen: usize,
    fps: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl FpsCounter {
    pub fn new() -> Self {
        Self {
            frame_times: [0.0; WINDOW],
            frame_index: 0,
            frames_seen: 0,
            fps: 0,
        }
    }

    /// Record a frame timestamp (ms) and return the current estimate
    pub fn record(&mut self, now_ms: f64) -> u32 {
        self.frame_times[self.frame_index] = now_ms;
        self.frame_index = (self.frame_index + 1) % WINDOW;
        self.frames_seen = (self.frames_seen + 1).min(WINDOW);

        // Oldest sample in the window
        let oldest = if self.frames_seen < WINDOW {
            self.frame_times[0]
        } else {
            self.frame_times[self.frame_index]
        };
        let intervals = if self.frames_seen < WINDOW {
            self.frames_seen - 1
        } else {
            WINDOW - 1
        };
        let elapsed = now_ms - oldest;
        if intervals > 0 && elapsed > 0.0 {
            self.fps = (intervals as f64 * 1000.0 / elapsed).round() as u32;
        }
        self.fps
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}
