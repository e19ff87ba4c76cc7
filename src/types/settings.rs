use crate::error::ScrubError;
use crate::ops::seek_ops::{INITIAL_FRAME_FRACTION, INITIAL_FRAME_MAX_SECS, SEEK_EPSILON};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub video_path: Option<PathBuf>,
    pub camera_enabled: bool,
    pub show_loading_overlay: bool,
    /// Outer ring: fraction of the duration scrubbed per full turn.
    pub big_sensitivity: f64,
    /// Inner ring: fraction of the duration scrubbed per full turn.
    pub small_sensitivity: f64,
    pub seek_epsilon: f64,
    pub initial_frame_max_secs: f64,
    pub initial_frame_fraction: f64,
    pub reset_animation_secs: f64,
    /// Use key-unit seeks when the pipeline is seekable.
    pub prefer_fast_seek: bool,
    pub preview_size: (u32, u32),
    pub camera_size: (u32, u32),
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            video_path: None,
            camera_enabled: true,
            show_loading_overlay: true,
            big_sensitivity: 1.0,
            small_sensitivity: 1.0,
            seek_epsilon: SEEK_EPSILON,
            initial_frame_max_secs: INITIAL_FRAME_MAX_SECS,
            initial_frame_fraction: INITIAL_FRAME_FRACTION,
            reset_animation_secs: 0.3,
            prefer_fast_seek: true,
            preview_size: (1280, 720),
            camera_size: (320, 240),
        }
    }
}

impl Settings {
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ScrubError> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ScrubError> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        let settings = serde_json::from_str(&contents)?;
        Ok(settings)
    }

    /// Loads settings, falling back to defaults when the file does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ScrubError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No settings file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }
}
