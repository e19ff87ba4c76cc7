use crate::error::CaptureError;
use crate::ops::angle_ops::{display_angle, normalize_delta};

/// Which of the two concentric rings a gesture applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RingKind {
    /// Outer ring, coarse scrubbing.
    Big,
    /// Inner ring, scrubbing plus loop counting.
    Small,
}

/// Identity of the pointer driving a drag (mouse or first touch point).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerId(pub u64);

impl PointerId {
    pub const MOUSE: PointerId = PointerId(0);
}

/// Drag and rotation state of one ring.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RingState {
    pub is_dragging: bool,
    pub last_angle_deg: f64,
    /// Unbounded running total of normalized deltas.
    pub cumulative_rotation_deg: f64,
    capture: Option<PointerId>,
}

impl RingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a drag at `angle_deg`, capturing `pointer`.
    pub fn begin(&mut self, pointer: PointerId, angle_deg: f64) {
        self.is_dragging = true;
        self.capture = Some(pointer);
        self.last_angle_deg = angle_deg;
    }

    /// Feeds the pointer's current angle and returns the normalized delta,
    /// or `None` when the ring is not being dragged.
    pub fn advance(&mut self, angle_deg: f64) -> Option<f64> {
        if !self.is_dragging {
            return None;
        }
        let delta = normalize_delta(angle_deg - self.last_angle_deg);
        self.cumulative_rotation_deg += delta;
        self.last_angle_deg = angle_deg;
        Some(delta)
    }

    /// Adds an already-normalized delta without touching the drag reference.
    pub fn rotate_by(&mut self, delta_deg: f64) {
        self.cumulative_rotation_deg += delta_deg;
    }

    /// Ends the drag and releases the capture held for `pointer`.
    ///
    /// The dragging flag and any held capture are always cleared, even when
    /// the release fails.
    pub fn finish(&mut self, pointer: PointerId) -> Result<(), CaptureError> {
        self.is_dragging = false;
        match self.capture.take() {
            Some(held) if held == pointer => Ok(()),
            _ => Err(CaptureError::NotCaptured(pointer)),
        }
    }

    pub fn captured_pointer(&self) -> Option<PointerId> {
        self.capture
    }

    /// Visual rotation in [0, 360).
    pub fn display_angle(&self) -> f64 {
        display_angle(self.cumulative_rotation_deg)
    }

    /// Zeroes the accumulated rotation. Drag state is left as is.
    pub fn reset_rotation(&mut self) {
        self.cumulative_rotation_deg = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_ignored_when_not_dragging() {
        let mut ring = RingState::new();
        assert_eq!(ring.advance(45.0), None);
        assert_eq!(ring.cumulative_rotation_deg, 0.0);
    }

    #[test]
    fn test_drag_accumulates_normalized_deltas() {
        let mut ring = RingState::new();
        ring.begin(PointerId::MOUSE, 170.0);
        assert_eq!(ring.advance(-170.0), Some(20.0));
        assert_eq!(ring.advance(-150.0), Some(20.0));
        assert_eq!(ring.cumulative_rotation_deg, 40.0);
        assert_eq!(ring.last_angle_deg, -150.0);
    }

    #[test]
    fn test_finish_releases_capture() {
        let mut ring = RingState::new();
        ring.begin(PointerId(7), 0.0);
        assert_eq!(ring.captured_pointer(), Some(PointerId(7)));
        assert!(ring.finish(PointerId(7)).is_ok());
        assert!(!ring.is_dragging);
        assert_eq!(ring.captured_pointer(), None);
    }

    #[test]
    fn test_finish_twice_reports_not_captured() {
        let mut ring = RingState::new();
        ring.begin(PointerId::MOUSE, 0.0);
        ring.finish(PointerId::MOUSE).unwrap();
        assert_eq!(
            ring.finish(PointerId::MOUSE),
            Err(CaptureError::NotCaptured(PointerId::MOUSE))
        );
        assert!(!ring.is_dragging);
    }

    #[test]
    fn test_finish_with_other_pointer_still_releases() {
        let mut ring = RingState::new();
        ring.begin(PointerId(1), 0.0);
        assert_eq!(
            ring.finish(PointerId(2)),
            Err(CaptureError::NotCaptured(PointerId(2)))
        );
        assert!(!ring.is_dragging);
        assert_eq!(ring.captured_pointer(), None);
    }

    #[test]
    fn test_display_angle_wraps_negative_rotation() {
        let mut ring = RingState::new();
        ring.rotate_by(5.0);
        ring.rotate_by(-10.0);
        assert_eq!(ring.cumulative_rotation_deg, -5.0);
        assert_eq!(ring.display_angle(), 355.0);
    }
}
