//! Frame timing

use crate::sim::sanitize_dt;

/// Converts host frame timestamps (ms) into simulation deltas (s)
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ts: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous frame; the next delta uses the fallback step
    pub fn rearm(&mut self) {
        self.last_ts = None;
    }

    /// Start counting from `ts` without producing a delta
    pub fn rearm_at(&mut self, ts: f64) {
        self.last_ts = Some(ts);
    }

    /// Delta since the previous timestamp, sanitized for the integrator
    pub fn delta(&mut self, ts: f64) -> f64 {
        let raw = self.last_ts.map(|last| (ts - last) / 1000.0);
        self.last_ts = Some(ts);
        sanitize_dt(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{FALLBACK_FRAME_DT, MAX_FRAME_DT};

    #[test]
    fn test_first_frame_uses_fallback() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.delta(1000.0), FALLBACK_FRAME_DT);
    }

    #[test]
    fn test_regular_frames() {
        let mut clock = FrameClock::new();
        clock.rearm_at(0.0);
        assert!((clock.delta(16.0) - 0.016).abs() < 1e-6);
        assert!((clock.delta(26.0) - 0.010).abs() < 1e-6);
    }

    #[test]
    fn test_hitch_is_capped() {
        let mut clock = FrameClock::new();
        clock.rearm_at(0.0);
        assert_eq!(clock.delta(500.0), MAX_FRAME_DT);
    }

    #[test]
    fn test_repeated_or_backwards_timestamp() {
        let mut clock = FrameClock::new();
        clock.rearm_at(100.0);
        assert_eq!(clock.delta(100.0), FALLBACK_FRAME_DT);
        assert_eq!(clock.delta(90.0), FALLBACK_FRAME_DT);
    }

    #[test]
    fn test_rearm_forgets_last_frame() {
        let mut clock = FrameClock::new();
        clock.rearm_at(0.0);
        let _ = clock.delta(16.0);
        clock.rearm();
        assert_eq!(clock.delta(10_000.0), FALLBACK_FRAME_DT);
    }
}
