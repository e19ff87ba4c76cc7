use eframe::egui;

/// Angle in degrees, range (-180, 180], of `pos` relative to the center of `rect`.
pub fn pointer_angle(rect: egui::Rect, pos: egui::Pos2) -> f64 {
    let center = rect.center();
    angle_between(center, pos)
}

/// Angle in degrees of `point` as seen from `center`, using screen axes (y down).
pub fn angle_between(center: egui::Pos2, point: egui::Pos2) -> f64 {
    let dx = (point.x - center.x) as f64;
    let dy = (point.y - center.y) as f64;
    dy.atan2(dx).to_degrees()
}

/// Shortest-path equivalent of a raw angular delta.
///
/// A drag crossing the 180/-180 seam yields a small delta instead of a ~360 jump.
pub fn normalize_delta(mut delta: f64) -> f64 {
    if delta > 180.0 {
        delta -= 360.0;
    }
    if delta < -180.0 {
        delta += 360.0;
    }
    delta
}

/// Visual ring angle in [0, 360) for an unbounded cumulative rotation.
pub fn display_angle(cumulative_deg: f64) -> f64 {
    let angle = cumulative_deg.rem_euclid(360.0);
    // rem_euclid can round up to the modulus for tiny negative inputs
    if angle >= 360.0 { 0.0 } else { angle }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_pointer_angle_cardinal_directions() {
        let rect = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(200.0, 200.0));
        assert!(approx(pointer_angle(rect, egui::pos2(200.0, 100.0)), 0.0));
        assert!(approx(pointer_angle(rect, egui::pos2(100.0, 200.0)), 90.0));
        assert!(approx(pointer_angle(rect, egui::pos2(0.0, 100.0)), 180.0));
        assert!(approx(pointer_angle(rect, egui::pos2(100.0, 0.0)), -90.0));
    }

    #[test]
    fn test_pointer_angle_uses_rect_center() {
        let rect = egui::Rect::from_min_size(egui::pos2(300.0, 50.0), egui::vec2(100.0, 100.0));
        // center is (350, 100); pointer diagonally down-right
        assert!(approx(pointer_angle(rect, egui::pos2(400.0, 150.0)), 45.0));
    }

    #[test]
    fn test_normalize_delta_crossing_seam() {
        let delta = normalize_delta(-170.0 - 170.0);
        assert!(approx(delta, 20.0));
        let delta = normalize_delta(170.0 - -170.0);
        assert!(approx(delta, -20.0));
    }

    #[test]
    fn test_normalize_delta_range_and_congruence() {
        let mut a1 = -179.5;
        while a1 <= 180.0 {
            let mut a2 = -179.5;
            while a2 <= 180.0 {
                let raw = a2 - a1;
                let n = normalize_delta(raw);
                assert!((-180.0..=180.0).contains(&n), "raw {raw} -> {n}");
                let diff = (n - raw).rem_euclid(360.0);
                assert!(diff < 1e-9 || (360.0 - diff) < 1e-9, "raw {raw} -> {n}");
                a2 += 7.25;
            }
            a1 += 11.5;
        }
    }

    #[test]
    fn test_normalize_delta_leaves_small_values() {
        assert_eq!(normalize_delta(0.0), 0.0);
        assert_eq!(normalize_delta(180.0), 180.0);
        assert_eq!(normalize_delta(-180.0), -180.0);
        assert_eq!(normalize_delta(42.5), 42.5);
    }

    #[test]
    fn test_display_angle() {
        assert!(approx(display_angle(-5.0), 355.0));
        assert!(approx(display_angle(400.0), 40.0));
        assert!(approx(display_angle(720.0), 0.0));
        assert!(approx(display_angle(-1e-18), 0.0));
        let a = display_angle(-1e-13);
        assert!((0.0..360.0).contains(&a));
    }
}
