use platformer_engine::Clock;

/// Browser wall clock backed by `Date.now()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebClock;

impl Clock for WebClock {
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }
}
