// src/pacing.rs

//! Frame pacing - computes and enforces the inter-frame delay.
//!
//! Two policies:
//! - [`PacingPolicy::Adaptive`] measures how long the frame took and sleeps
//!   only for the remainder of the target interval, so the cycle time stays
//!   at the interval as long as drawing is under budget.
//! - [`PacingPolicy::FixedSleep`] sleeps the full interval every frame,
//!   reproducing the classic naive loop: cycle time = draw time + interval,
//!   with the truncated-millisecond interval accumulating drift. Kept as a
//!   documented fallback.
//!
//! A sleep that wakes early (signal delivery, coarse timers) is not an
//! error; the render loop just proceeds to its next `running` check.

use crate::config::PacingPolicy;
use log::trace;
use std::time::{Duration, Instant};

/// Paces a render loop to a target frame rate.
#[derive(Debug)]
pub struct FramePacer {
    policy: PacingPolicy,
    /// Precise fractional interval, used by the adaptive policy.
    interval: Duration,
    /// Truncated integer-millisecond interval (1000 / fps), used by the
    /// fixed-sleep policy.
    fixed_interval: Duration,
    frame_start: Instant,
}

impl FramePacer {
    /// Creates a pacer for the given target rate. A zero rate is clamped
    /// to 1 fps rather than dividing by zero, and the truncated fixed
    /// interval is clamped to 1 ms so rates above 1000 fps still sleep
    /// instead of spinning.
    #[must_use]
    pub fn new(target_fps: u32, policy: PacingPolicy) -> Self {
        let fps = target_fps.max(1);
        Self {
            policy,
            interval: Duration::from_secs_f64(1.0 / f64::from(fps)),
            fixed_interval: Duration::from_millis(u64::from((1000 / fps).max(1))),
            frame_start: Instant::now(),
        }
    }

    /// The target frame interval for the active policy.
    #[must_use]
    pub fn target_interval(&self) -> Duration {
        match self.policy {
            PacingPolicy::Adaptive => self.interval,
            PacingPolicy::FixedSleep => self.fixed_interval,
        }
    }

    /// Marks the start of a frame. Call before locking and drawing.
    pub fn begin_frame(&mut self) {
        self.frame_start = Instant::now();
    }

    /// Sleep budget for the frame that just finished, given the active
    /// policy. Zero when an adaptive frame has already blown its interval.
    #[must_use]
    pub fn sleep_budget(&self) -> Duration {
        match self.policy {
            PacingPolicy::FixedSleep => self.fixed_interval,
            PacingPolicy::Adaptive => {
                let elapsed = self.frame_start.elapsed();
                self.interval.saturating_sub(elapsed)
            }
        }
    }

    /// Sleeps out the rest of the frame interval.
    pub fn pace(&self) {
        let budget = self.sleep_budget();
        if budget.is_zero() {
            trace!("FramePacer: frame over budget, skipping sleep");
            return;
        }
        std::thread::sleep(budget);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn fixed_interval_truncates_to_whole_milliseconds() {
        let pacer = FramePacer::new(60, PacingPolicy::FixedSleep);
        assert_eq!(pacer.target_interval(), Duration::from_millis(16));
    }

    #[test]
    fn adaptive_interval_is_fractional() {
        let pacer = FramePacer::new(60, PacingPolicy::Adaptive);
        let micros = pacer.target_interval().as_micros();
        assert!((16_600..=16_700).contains(&micros), "got {micros}us");
    }

    #[test]
    fn fixed_interval_never_truncates_to_zero() {
        // 1000/2000 truncates to 0 ms; the pacer must still sleep rather
        // than hot-spin.
        let pacer = FramePacer::new(2000, PacingPolicy::FixedSleep);
        assert_eq!(pacer.target_interval(), Duration::from_millis(1));
    }

    #[test]
    fn zero_fps_is_clamped() {
        let pacer = FramePacer::new(0, PacingPolicy::Adaptive);
        assert_eq!(pacer.target_interval(), Duration::from_secs(1));
    }

    #[test]
    fn fixed_sleep_cycle_includes_draw_cost() {
        // Fixed policy: 16ms target, 5ms injected draw cost. The cycle must
        // be at least the full interval (it is in fact draw + interval,
        // which is the documented drift).
        let mut pacer = FramePacer::new(60, PacingPolicy::FixedSleep);
        let cycle_start = Instant::now();
        pacer.begin_frame();
        std::thread::sleep(Duration::from_millis(5));
        pacer.pace();
        let cycle = cycle_start.elapsed();
        assert!(cycle >= Duration::from_millis(21), "cycle {cycle:?}");
    }

    #[test]
    fn adaptive_cycle_absorbs_draw_cost() {
        // Adaptive policy: a 5ms draw still yields a cycle close to the
        // 16.67ms interval. Generous upper bound for scheduler jitter.
        let mut pacer = FramePacer::new(60, PacingPolicy::Adaptive);
        let cycle_start = Instant::now();
        pacer.begin_frame();
        std::thread::sleep(Duration::from_millis(5));
        pacer.pace();
        let cycle = cycle_start.elapsed();
        assert!(cycle >= Duration::from_micros(16_000), "cycle {cycle:?}");
        assert!(cycle < Duration::from_millis(60), "cycle {cycle:?}");
    }

    #[test]
    fn adaptive_over_budget_frame_skips_sleep() {
        let mut pacer = FramePacer::new(60, PacingPolicy::Adaptive);
        pacer.begin_frame();
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(pacer.sleep_budget(), Duration::ZERO);
    }
}
