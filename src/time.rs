//! Platform-agnostic time utilities
//!
//! Frame timestamps are milliseconds (matching `requestAnimationFrame`),
//! everything else is seconds.

use std::collections::VecDeque;

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub fn now_millis() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

#[cfg(not(all(feature = "wasm", target_arch = "wasm32")))]
pub fn now_millis() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static START: OnceLock<Instant> = OnceLock::new();
    START.get_or_init(Instant::now).elapsed().as_secs_f64() * 1000.0
}

pub fn now_seconds() -> f64 {
    now_millis() / 1000.0
}

/// Frames per second over a sliding window of recent frame timestamps
#[derive(Debug)]
pub struct FrameRate {
    window: usize,
    stamps: VecDeque<f64>,
}

impl FrameRate {
    pub fn new(window: usize) -> Self {
        let window = window.max(2);
        Self {
            window,
            stamps: VecDeque::with_capacity(window),
        }
    }

    pub fn tick(&mut self, now_ms: f64) {
        if self.stamps.len() == self.window {
            self.stamps.pop_front();
        }
        self.stamps.push_back(now_ms);
    }

    pub fn fps(&self) -> f64 {
        match (self.stamps.front(), self.stamps.back()) {
            (Some(first), Some(last)) if last > first => {
                (self.stamps.len() - 1) as f64 * 1000.0 / (last - first)
            }
            _ => 0.0,
        }
    }
}

impl Default for FrameRate {
    fn default() -> Self {
        Self::new(60)
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn clock_is_monotonic() {
        let a = now_millis();
        let b = now_millis();
        assert!(b >= a);
        assert!(now_seconds() >= a / 1000.0);
    }

    #[test]
    fn frame_rate_over_window() {
        let mut rate = FrameRate::new(4);
        assert_eq!(rate.fps(), 0.0);
        rate.tick(0.0);
        assert_eq!(rate.fps(), 0.0);
        for i in 1..10 {
            rate.tick(i as f64 * 20.0);
        }
        // only the last four stamps count: 3 intervals over 60 ms
        assert!((rate.fps() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn repeated_stamp_reports_zero() {
        let mut rate = FrameRate::default();
        rate.tick(5.0);
        rate.tick(5.0);
        assert_eq!(rate.fps(), 0.0);
    }
}
