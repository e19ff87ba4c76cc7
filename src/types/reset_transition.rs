use crate::types::ring::RingKind;

/// Timed animation of both rings back to 0 after a reset.
///
/// Purely visual: ring state is already zeroed when this starts.
#[derive(Debug, Clone, PartialEq)]
pub struct ResetTransition {
    /// UI time (seconds) at which the animation began.
    pub started_at: f64,
    pub duration_secs: f64,
    pub from_big_deg: f64,
    pub from_small_deg: f64,
}

impl ResetTransition {
    pub fn new(started_at: f64, duration_secs: f64, from_big_deg: f64, from_small_deg: f64) -> Self {
        Self {
            started_at,
            duration_secs,
            from_big_deg,
            from_small_deg,
        }
    }

    /// Linear progress in [0, 1].
    pub fn progress(&self, now: f64) -> f64 {
        if self.duration_secs <= 0.0 {
            return 1.0;
        }
        ((now - self.started_at) / self.duration_secs).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self, now: f64) -> bool {
        self.progress(now) >= 1.0
    }

    /// Animated angle of `ring` at `now`, easing out towards 0.
    pub fn angle(&self, ring: RingKind, now: f64) -> f64 {
        let from = match ring {
            RingKind::Big => self.from_big_deg,
            RingKind::Small => self.from_small_deg,
        };
        let remaining = 1.0 - self.progress(now);
        from * remaining * remaining * remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_runs_from_start_to_zero() {
        let t = ResetTransition::new(10.0, 0.5, 120.0, 300.0);
        assert_eq!(t.angle(RingKind::Big, 10.0), 120.0);
        assert_eq!(t.angle(RingKind::Small, 10.0), 300.0);
        let mid = t.angle(RingKind::Small, 10.25);
        assert!(mid > 0.0 && mid < 300.0);
        assert_eq!(t.angle(RingKind::Big, 10.5), 0.0);
        assert!(t.is_finished(10.5));
        assert!(!t.is_finished(10.49));
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let t = ResetTransition::new(3.0, 0.0, 90.0, 90.0);
        assert!(t.is_finished(3.0));
        assert_eq!(t.angle(RingKind::Big, 3.0), 0.0);
    }
}
