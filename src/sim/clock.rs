//! Frame clock: turns host timestamps into a bounded per-tick dt

/// Tracks the last render timestamp and hands out capped elapsed time
#[derive(Debug, Clone)]
pub struct Clock {
    /// Last timestamp seen (ms); `None` until the first tick
    last_ms: Option<f64>,
    /// Upper bound on a single dt (seconds)
    dt_cap: f32,
}

impl Clock {
    pub fn new(dt_cap: f32) -> Self {
        Self {
            last_ms: None,
            dt_cap,
        }
    }

    /// Elapsed seconds since the previous call, clamped to `[0, dt_cap]`.
    ///
    /// The first call yields 0. A timestamp older than the last one also
    /// yields 0 and does not move the clock backwards.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) if now_ms > last => ((now_ms - last) / 1000.0) as f32,
            _ => 0.0,
        };
        self.last_ms = Some(self.last_ms.map_or(now_ms, |last| last.max(now_ms)));
        dt.min(self.dt_cap)
    }

    /// Restart timing from `now_ms` so the next tick measures from here
    pub fn reset(&mut self, now_ms: f64) {
        self.last_ms = Some(now_ms);
    }

    pub fn last_ms(&self) -> Option<f64> {
        self.last_ms
    }
}
