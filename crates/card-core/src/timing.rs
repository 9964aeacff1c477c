//! Frame timing: turns monotonic timestamps into clamped simulation steps.

use crate::constants::{DT_MAX_SEC, DT_MIN_SEC};
use instant::Instant;
use std::time::Duration;

/// Clamp a raw frame delta (seconds) into the range the simulation accepts.
#[inline]
pub fn clamp_dt(raw_sec: f32) -> f32 {
    if raw_sec.is_finite() {
        raw_sec.clamp(DT_MIN_SEC, DT_MAX_SEC)
    } else {
        DT_MIN_SEC
    }
}

/// Monotonic frame clock.
///
/// `elapsed` is the scene clock used by timers; it advances by the *clamped*
/// step so choreography stays in lockstep with the particles when frames are
/// dropped.
#[derive(Clone, Debug, Default)]
pub struct FrameClock {
    last: Option<Instant>,
    elapsed: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to `now`, returning the clamped step in seconds.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let raw = match self.last {
            Some(prev) if now > prev => (now - prev).as_secs_f32(),
            Some(_) => 0.0,
            None => DT_MIN_SEC,
        };
        self.last = Some(now);
        self.advance(raw)
    }

    /// Advance by an explicit raw step.
    pub fn advance(&mut self, raw_sec: f32) -> f32 {
        let dt = clamp_dt(raw_sec);
        self.elapsed += Duration::from_secs_f32(dt);
        dt
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_large_and_tiny_steps() {
        assert_eq!(clamp_dt(1.0), DT_MAX_SEC);
        assert_eq!(clamp_dt(0.0), DT_MIN_SEC);
        assert_eq!(clamp_dt(f32::NAN), DT_MIN_SEC);
        assert!((clamp_dt(0.016) - 0.016).abs() < 1e-6);
    }

    #[test]
    fn tick_at_is_monotonic() {
        let mut clock = FrameClock::new();
        let t0 = Instant::now();
        clock.tick_at(t0);
        let dt = clock.tick_at(t0 + Duration::from_millis(16));
        assert!((dt - 0.016).abs() < 1e-3);
        // going backwards never produces a negative step
        let back = clock.tick_at(t0);
        assert_eq!(back, DT_MIN_SEC);
        assert!(clock.elapsed() > Duration::ZERO);
    }
}
