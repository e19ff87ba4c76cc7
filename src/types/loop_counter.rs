/// Counts full positive revolutions of the small ring.
///
/// Rotation is accumulated and drained in whole turns, so the count does not
/// depend on how a total rotation is split across move events.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoopCounter {
    pub count: u32,
    pub accumulated_deg: f64,
}

impl LoopCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rotation delta and returns how many loops it completed.
    ///
    /// Negative rotation is accumulated but never decrements the count.
    /// Non-finite deltas are ignored.
    pub fn accumulate(&mut self, delta_deg: f64) -> u32 {
        if !delta_deg.is_finite() {
            return 0;
        }
        self.accumulated_deg += delta_deg;
        if self.accumulated_deg < 360.0 {
            return 0;
        }
        let remainder = self.accumulated_deg.rem_euclid(360.0);
        // float to int casts saturate
        let completed = ((self.accumulated_deg - remainder) / 360.0).round() as u32;
        self.accumulated_deg = remainder;
        self.count = self.count.saturating_add(completed);
        completed
    }

    pub fn reset(&mut self) {
        self.count = 0;
        self.accumulated_deg = 0.0;
    }

    /// Counter text, zero-padded to two digits.
    pub fn display(&self) -> String {
        format!("{:02}", self.count)
    }
}
