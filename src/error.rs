use gstreamer as gst;
use gstreamer::glib;

/// Errors surfaced by the scrubber's media and configuration layers.
///
/// Only `GstInit` and `Ui` are fatal; everything else is logged and the
/// widget keeps running.
#[derive(Debug, thiserror::Error)]
pub enum ScrubError {
    #[error("GStreamer initialisation failed: {0}")]
    GstInit(#[source] glib::Error),

    #[error("Failed to build pipeline: {0}")]
    Pipeline(#[source] glib::Error),

    #[error("Pipeline element missing: {0}")]
    MissingElement(&'static str),

    #[error("Pipeline state change failed: {0}")]
    StateChange(#[from] gst::StateChangeError),

    #[error("Seek to {time:.3}s failed: {source}")]
    Seek {
        time: f64,
        #[source]
        source: glib::BoolError,
    },

    #[error("Video file does not exist: {0}")]
    MissingFile(String),

    #[error("Settings I/O error: {0}")]
    Settings(#[from] std::io::Error),

    #[error("Settings format error: {0}")]
    SettingsFormat(#[from] serde_json::Error),

    #[error("UI error: {0}")]
    Ui(String),
}

/// Pointer capture could not be released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CaptureError {
    #[error("Pointer {0:?} is not captured by this ring")]
    NotCaptured(crate::types::ring::PointerId),
}
