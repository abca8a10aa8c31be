use std::cell::Cell;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of wall-clock milliseconds for jump timing windows.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Native wall clock (milliseconds since the Unix epoch).
/// Not usable on `wasm32-unknown-unknown`; the web bridge supplies its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64() * 1000.0)
            .unwrap_or(0.0)
    }
}

/// Manually driven clock. Clones share the same time, so a test (or a replay
/// tool) can keep a handle and advance it while the engine owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn set(&self, ms: f64) {
        self.now.set(ms);
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// Turns successive frame timestamps (ms, as handed to an animation-frame
/// callback) into per-frame delta times in seconds.
#[derive(Debug, Clone, Default)]
pub struct FrameTimer {
    last_timestamp: Option<f64>,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame timestamp and return the seconds elapsed since the
    /// previous one. The first frame after construction or `reset` yields 0.
    pub fn tick(&mut self, timestamp: f64) -> f32 {
        let dt = match self.last_timestamp {
            Some(last) => ((timestamp - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_timestamp = Some(timestamp);
        dt
    }

    /// Forget the baseline; the next `tick` yields 0.
    pub fn reset(&mut self) {
        self.last_timestamp = None;
    }
}
