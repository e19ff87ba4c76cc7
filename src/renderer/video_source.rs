use std::path::{Path, PathBuf};

use eframe::egui;
use gst::prelude::*;
use gstreamer as gst;
use gstreamer_app as gst_app;

use crate::error::ScrubError;
use crate::renderer::frame_slot::FrameSlot;
use crate::types::media::MediaElement;
use crate::types::playback_state::PlaybackState;

/// Notifications drained from the pipeline bus.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// Duration became known for the first time.
    MetadataLoaded { duration: f64 },
    Error(String),
    EndOfStream,
}

/// A video file decoded to RGBA frames, held paused and driven by seeks.
pub struct VideoSource {
    pipeline: gst::Pipeline,
    frames: FrameSlot,
    state: PlaybackState,
    path: PathBuf,
    prefer_fast_seek: bool,
    metadata_loaded: bool,
}

impl VideoSource {
    /// Builds the decoding pipeline for `path` and starts prerolling it.
    ///
    /// Metadata arrives later through [`VideoSource::poll_events`].
    pub fn open(
        path: &Path,
        size: (u32, u32),
        prefer_fast_seek: bool,
        repaint: Option<egui::Context>,
    ) -> Result<Self, ScrubError> {
        if !path.exists() {
            return Err(ScrubError::MissingFile(path.display().to_string()));
        }

        let pipeline_str = format!(
            "filesrc name=src ! decodebin ! videoconvert ! videoscale ! video/x-raw,format=RGBA,width={},height={} ! appsink name=sink sync=false max-buffers=1 drop=true",
            size.0, size.1
        );
        let pipeline = gst::parse::launch(&pipeline_str)
            .map_err(ScrubError::Pipeline)?
            .downcast::<gst::Pipeline>()
            .map_err(|_| ScrubError::MissingElement("pipeline"))?;

        let src = pipeline
            .by_name("src")
            .ok_or(ScrubError::MissingElement("filesrc"))?;
        src.set_property("location", &*path.to_string_lossy());

        let sink = pipeline
            .by_name("sink")
            .ok_or(ScrubError::MissingElement("appsink"))?
            .downcast::<gst_app::AppSink>()
            .map_err(|_| ScrubError::MissingElement("appsink"))?;

        let frames = FrameSlot::new();
        frames.attach(&sink, repaint);

        // PAUSED prerolls the first frame and makes the duration queryable
        if let Err(err) = pipeline.set_state(gst::State::Paused) {
            pipeline.set_state(gst::State::Null).ok();
            return Err(err.into());
        }
        tracing::info!("Opened video {}", path.display());

        Ok(Self {
            pipeline,
            frames,
            state: PlaybackState::new(),
            path: path.to_path_buf(),
            prefer_fast_seek,
            metadata_loaded: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn frames(&self) -> &FrameSlot {
        &self.frames
    }

    /// Drains pending bus messages without blocking.
    pub fn poll_events(&mut self) -> Vec<MediaEvent> {
        let mut events = Vec::new();
        let Some(bus) = self.pipeline.bus() else {
            return events;
        };

        while let Some(msg) = bus.pop() {
            match msg.view() {
                gst::MessageView::AsyncDone(_) | gst::MessageView::DurationChanged(_) => {
                    self.refresh_duration();
                    if !self.metadata_loaded {
                        if let Some(duration) = self.state.duration {
                            self.metadata_loaded = true;
                            events.push(MediaEvent::MetadataLoaded { duration });
                        }
                    }
                }
                gst::MessageView::Error(err) => {
                    let message = format!(
                        "{} ({})",
                        err.error(),
                        err.debug().map(|d| d.to_string()).unwrap_or_default()
                    );
                    tracing::warn!("Video pipeline error: {}", message);
                    events.push(MediaEvent::Error(message));
                }
                gst::MessageView::Warning(warn) => {
                    tracing::warn!("Video pipeline warning: {}", warn.error());
                }
                gst::MessageView::Eos(_) => events.push(MediaEvent::EndOfStream),
                _ => {}
            }
        }
        events
    }

    fn refresh_duration(&mut self) {
        if let Some(duration) = self.pipeline.query_duration::<gst::ClockTime>() {
            let secs = duration.nseconds() as f64 / 1_000_000_000.0;
            if secs > 0.0 {
                self.state.duration = Some(secs);
            }
        }
    }

    fn is_seekable(&self) -> bool {
        let mut query = gst::query::Seeking::new(gst::Format::Time);
        if self.pipeline.query(&mut query) {
            let (seekable, _start, _end) = query.result();
            seekable
        } else {
            false
        }
    }

    fn seek_with(&mut self, time: f64, flags: gst::SeekFlags) -> Result<(), ScrubError> {
        let position = gst::ClockTime::from_nseconds((time * 1_000_000_000.0) as u64);
        self.pipeline
            .seek_simple(flags, position)
            .map_err(|source| ScrubError::Seek { time, source })?;
        // Track the requested position: key-unit seeks snap the real one,
        // and small deltas must still add up.
        self.state.current_time = time;
        Ok(())
    }
}

impl MediaElement for VideoSource {
    fn duration(&self) -> Option<f64> {
        self.state.duration
    }

    fn current_time(&self) -> f64 {
        self.state.current_time
    }

    fn supports_fast_seek(&self) -> bool {
        self.prefer_fast_seek && self.is_seekable()
    }

    fn fast_seek(&mut self, time: f64) -> Result<(), ScrubError> {
        self.seek_with(
            time,
            gst::SeekFlags::FLUSH | gst::SeekFlags::KEY_UNIT | gst::SeekFlags::SNAP_NEAREST,
        )
    }

    fn set_current_time(&mut self, time: f64) -> Result<(), ScrubError> {
        self.seek_with(time, gst::SeekFlags::FLUSH | gst::SeekFlags::ACCURATE)
    }

    fn pause(&mut self) -> Result<(), ScrubError> {
        self.pipeline.set_state(gst::State::Paused)?;
        Ok(())
    }
}

impl Drop for VideoSource {
    fn drop(&mut self) {
        self.pipeline.set_state(gst::State::Null).ok();
    }
}
