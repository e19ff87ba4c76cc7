/// Distance kept from both ends of the media when seeking.
/// Some decoders misbehave on a seek to exactly 0 or exactly the duration.
pub const SEEK_EPSILON: f64 = 0.04;

/// Upper bound of the initial stable frame, in seconds.
pub const INITIAL_FRAME_MAX_SECS: f64 = 15.0;

/// Fraction of the duration used for the initial stable frame on short media.
pub const INITIAL_FRAME_FRACTION: f64 = 0.2;

/// Returns `Some(duration)` only for a known, finite, positive duration.
pub fn seekable_duration(duration: Option<f64>) -> Option<f64> {
    duration.filter(|d| d.is_finite() && *d > 0.0)
}

/// Playback time delta for a rotation delta.
pub fn delta_time(delta_deg: f64, duration: f64, sensitivity: f64) -> f64 {
    (delta_deg / 360.0) * duration * sensitivity
}

/// Wraps `time` into [0, duration) then keeps it `epsilon` away from both ends.
///
/// For media shorter than `2 * epsilon` there is no such range and the
/// midpoint is returned.
pub fn wrap_time(time: f64, duration: f64, epsilon: f64) -> f64 {
    if duration <= 2.0 * epsilon {
        return duration / 2.0;
    }
    let wrapped = time.rem_euclid(duration);
    wrapped.clamp(epsilon, duration - epsilon)
}

/// Time of the frame shown before any interaction and after a reset.
pub fn initial_frame_time(duration: f64, max_secs: f64, fraction: f64) -> f64 {
    max_secs.min(duration * fraction)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_delta_time_scales_with_duration_and_sensitivity() {
        assert!(approx(delta_time(90.0, 100.0, 1.0), 25.0));
        assert!(approx(delta_time(-36.0, 50.0, 1.0), -5.0));
        assert!(approx(delta_time(360.0, 10.0, 0.5), 5.0));
    }

    #[test]
    fn test_wrap_time_stays_inside_safe_range() {
        for duration in [0.1, 1.0, 7.3, 100.0, 3600.0] {
            let mut t = -3.0 * duration;
            while t <= 3.0 * duration {
                let w = wrap_time(t, duration, SEEK_EPSILON);
                assert!(
                    w >= SEEK_EPSILON && w <= duration - SEEK_EPSILON,
                    "t {t} duration {duration} -> {w}"
                );
                t += duration / 37.0;
            }
        }
    }

    #[test]
    fn test_wrap_time_boundaries() {
        assert!(approx(wrap_time(0.0, 100.0, SEEK_EPSILON), SEEK_EPSILON));
        assert!(approx(wrap_time(100.0, 100.0, SEEK_EPSILON), SEEK_EPSILON));
        assert!(approx(
            wrap_time(99.99, 100.0, SEEK_EPSILON),
            100.0 - SEEK_EPSILON
        ));
        assert!(approx(wrap_time(-1.0, 100.0, SEEK_EPSILON), 99.0));
        assert!(approx(wrap_time(111.0, 100.0, SEEK_EPSILON), 11.0));
    }

    #[test]
    fn test_wrap_time_tiny_duration_returns_midpoint() {
        assert!(approx(wrap_time(5.0, 0.05, SEEK_EPSILON), 0.025));
    }

    #[test]
    fn test_initial_frame_time() {
        let t = initial_frame_time(100.0, INITIAL_FRAME_MAX_SECS, INITIAL_FRAME_FRACTION);
        assert!(approx(t, 15.0));
        let t = initial_frame_time(30.0, INITIAL_FRAME_MAX_SECS, INITIAL_FRAME_FRACTION);
        assert!(approx(t, 6.0));
    }

    #[test]
    fn test_seekable_duration() {
        assert_eq!(seekable_duration(Some(12.5)), Some(12.5));
        assert_eq!(seekable_duration(Some(0.0)), None);
        assert_eq!(seekable_duration(Some(f64::INFINITY)), None);
        assert_eq!(seekable_duration(Some(f64::NAN)), None);
        assert_eq!(seekable_duration(None), None);
    }
}
