//! Warp drive ramp
//!
//! Eases the star speed exponentially from a near-static drift to full warp
//! over a fixed duration, and derives the background progress that whites
//! out the sky during the final third of the ramp.

use tracing::{debug, info};

use crate::config::WarpConfig;

pub const START_SPEED: f64 = 1.01;
pub const TARGET_SPEED: f64 = 500.0;

/// Share of the ramp (by speed) after which the background starts to brighten
const BRIGHTEN_FROM: f64 = 2.0 / 3.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WarpPhase {
    Idle,
    Warping { started_at: f64, from: f64 },
    Arrived,
}

#[derive(Clone, Debug)]
pub struct WarpTransition {
    start_speed: f64,
    target_speed: f64,
    duration: f64,
    phase: WarpPhase,
    speed: f64,
}

impl Default for WarpTransition {
    fn default() -> Self {
        Self::new(&WarpConfig::default())
    }
}

impl WarpTransition {
    pub fn new(config: &WarpConfig) -> Self {
        Self {
            start_speed: config.start_speed,
            target_speed: config.target_speed,
            duration: config.duration_secs,
            phase: WarpPhase::Idle,
            speed: config.start_speed,
        }
    }

    pub fn phase(&self) -> WarpPhase {
        self.phase
    }

    pub fn is_warping(&self) -> bool {
        matches!(self.phase, WarpPhase::Warping { .. })
    }

    pub fn has_arrived(&self) -> bool {
        self.phase == WarpPhase::Arrived
    }

    /// Last computed speed
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Start the ramp at `now` seconds. Ignored while already warping.
    pub fn engage(&mut self, now: f64) -> bool {
        if self.is_warping() {
            return false;
        }
        info!(from = self.speed, to = self.target_speed, "Engaging warp");
        self.phase = WarpPhase::Warping {
            started_at: now,
            from: self.speed,
        };
        true
    }

    /// Speed at `now`: `from * (target / from)^p` with `p` the clamped
    /// fraction of the duration elapsed
    pub fn speed_at(&mut self, now: f64) -> f64 {
        if let WarpPhase::Warping { started_at, from } = self.phase {
            let p = ((now - started_at) / self.duration).clamp(0.0, 1.0);
            self.speed = from * (self.target_speed / from).powf(p);
            if p >= 1.0 {
                self.speed = self.target_speed;
                self.phase = WarpPhase::Arrived;
                info!(speed = self.speed, "Warp complete");
            }
        }
        self.speed
    }

    pub fn reset(&mut self) {
        debug!("Warp reset");
        self.phase = WarpPhase::Idle;
        self.speed = self.start_speed;
    }

    /// How far `speed` is along the ramp, in `[0, 1]`
    pub fn warp_progress(&self, speed: f64) -> f64 {
        clamp01((speed - self.start_speed) / (self.target_speed - self.start_speed))
    }

    /// Background brightness input: zero until two thirds of the ramp, then
    /// linear up to one at full speed
    pub fn background_progress(&self, speed: f64) -> f64 {
        clamp01((self.warp_progress(speed) - BRIGHTEN_FROM) * 3.0)
    }
}

fn clamp01(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_holds_start_speed() {
        let mut w = WarpTransition::default();
        assert_eq!(w.speed_at(10.0), START_SPEED);
        assert_eq!(w.phase(), WarpPhase::Idle);
    }

    #[test]
    fn exponential_ramp_hits_geometric_midpoint() {
        let mut w = WarpTransition::default();
        assert!(w.engage(2.0));
        assert!((w.speed_at(2.0) - START_SPEED).abs() < 1e-9);
        let mid = w.speed_at(3.5);
        assert!((mid - (START_SPEED * TARGET_SPEED).sqrt()).abs() < 1e-9);
        assert!(w.is_warping());
        assert_eq!(w.speed_at(5.0), TARGET_SPEED);
        assert!(w.has_arrived());
    }

    #[test]
    fn ramp_is_monotonic() {
        let mut w = WarpTransition::default();
        w.engage(0.0);
        let mut prev = 0.0;
        for i in 0..=300 {
            let s = w.speed_at(i as f64 * 0.01);
            assert!(s >= prev);
            prev = s;
        }
    }

    #[test]
    fn engage_while_warping_is_ignored() {
        let mut w = WarpTransition::default();
        assert!(w.engage(0.0));
        w.speed_at(1.0);
        assert!(!w.engage(1.0));
        assert_eq!(
            w.phase(),
            WarpPhase::Warping { started_at: 0.0, from: START_SPEED }
        );
    }

    #[test]
    fn engage_from_arrived_starts_at_current_speed() {
        let mut w = WarpTransition::default();
        w.engage(0.0);
        w.speed_at(5.0);
        assert!(w.has_arrived());

        assert!(w.engage(6.0));
        assert_eq!(
            w.phase(),
            WarpPhase::Warping { started_at: 6.0, from: TARGET_SPEED }
        );
        assert_eq!(w.speed_at(7.5), TARGET_SPEED);
        assert_eq!(w.speed_at(9.0), TARGET_SPEED);
        assert!(w.has_arrived());
    }

    #[test]
    fn reset_returns_to_idle() {
        let mut w = WarpTransition::default();
        w.engage(0.0);
        w.speed_at(10.0);
        w.reset();
        assert_eq!(w.phase(), WarpPhase::Idle);
        assert_eq!(w.speed(), START_SPEED);
    }

    #[test]
    fn background_brightens_in_final_third() {
        let w = WarpTransition::default();
        assert_eq!(w.warp_progress(START_SPEED), 0.0);
        assert_eq!(w.warp_progress(TARGET_SPEED), 1.0);
        assert_eq!(w.warp_progress(10_000.0), 1.0);

        let two_thirds = START_SPEED + (TARGET_SPEED - START_SPEED) * 2.0 / 3.0;
        assert_eq!(w.background_progress(START_SPEED), 0.0);
        assert!(w.background_progress(two_thirds).abs() < 1e-9);
        assert_eq!(w.background_progress(TARGET_SPEED), 1.0);
        let five_sixths = START_SPEED + (TARGET_SPEED - START_SPEED) * 5.0 / 6.0;
        assert!((w.background_progress(five_sixths) - 0.5).abs() < 1e-9);
    }
}
