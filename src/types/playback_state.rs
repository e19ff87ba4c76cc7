/// Playback position as tracked by a media element.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    /// Last requested position in seconds.
    pub current_time: f64,
    /// Known once metadata is loaded.
    pub duration: Option<f64>,
}

impl PlaybackState {
    pub fn new() -> Self {
        Self {
            current_time: 0.0,
            duration: None,
        }
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new()
    }
}
