/// Loading overlay shown until the first interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingOverlay {
    visible: bool,
}

impl LoadingOverlay {
    pub fn new(visible: bool) -> Self {
        Self { visible }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Hides the overlay for good. Returns true only on the first call.
    pub fn dismiss(&mut self) -> bool {
        std::mem::replace(&mut self.visible, false)
    }
}

impl Default for LoadingOverlay {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dismiss_is_one_way() {
        let mut overlay = LoadingOverlay::default();
        assert!(overlay.is_visible());
        assert!(overlay.dismiss());
        assert!(!overlay.is_visible());
        assert!(!overlay.dismiss());
        assert!(!overlay.is_visible());
    }
}
