use eframe::egui;
use gst::prelude::*;
use gstreamer as gst;
use gstreamer_app as gst_app;

use crate::error::ScrubError;
use crate::renderer::frame_slot::FrameSlot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraState {
    /// Capture requested, no frame yet.
    Starting,
    Live,
    Unavailable(String),
}

/// Live camera preview. Any failure leaves it `Unavailable`; it is never retried.
pub struct CameraFeed {
    pipeline: Option<gst::Pipeline>,
    frames: FrameSlot,
    state: CameraState,
}

impl CameraFeed {
    /// Requests a video-only capture stream. Never fails: errors are logged
    /// and reported through [`CameraFeed::state`].
    pub fn start(size: (u32, u32), repaint: Option<egui::Context>) -> Self {
        let frames = FrameSlot::new();
        match Self::build(size, &frames, repaint) {
            Ok(pipeline) => {
                tracing::info!("Camera capture requested");
                Self::with_pipeline(pipeline, frames)
            }
            Err(err) => {
                tracing::warn!("Camera unavailable: {}", err);
                Self {
                    pipeline: None,
                    frames,
                    state: CameraState::Unavailable(err.to_string()),
                }
            }
        }
    }

    /// Wraps an already started capture pipeline feeding `frames`.
    fn with_pipeline(pipeline: gst::Pipeline, frames: FrameSlot) -> Self {
        Self {
            pipeline: Some(pipeline),
            frames,
            state: CameraState::Starting,
        }
    }

    pub fn disabled() -> Self {
        Self {
            pipeline: None,
            frames: FrameSlot::new(),
            state: CameraState::Unavailable("disabled".to_string()),
        }
    }

    fn build(
        size: (u32, u32),
        frames: &FrameSlot,
        repaint: Option<egui::Context>,
    ) -> Result<gst::Pipeline, ScrubError> {
        let pipeline_str = format!(
            "autovideosrc ! videoconvert ! videoscale ! video/x-raw,format=RGBA,width={},height={} ! appsink name=sink sync=false max-buffers=1 drop=true",
            size.0, size.1
        );
        let pipeline = gst::parse::launch(&pipeline_str)
            .map_err(ScrubError::Pipeline)?
            .downcast::<gst::Pipeline>()
            .map_err(|_| ScrubError::MissingElement("pipeline"))?;
        let sink = pipeline
            .by_name("sink")
            .ok_or(ScrubError::MissingElement("appsink"))?
            .downcast::<gst_app::AppSink>()
            .map_err(|_| ScrubError::MissingElement("appsink"))?;
        frames.attach(&sink, repaint);

        if let Err(err) = pipeline.set_state(gst::State::Playing) {
            pipeline.set_state(gst::State::Null).ok();
            return Err(err.into());
        }
        Ok(pipeline)
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    pub fn frames(&self) -> &FrameSlot {
        &self.frames
    }

    /// Picks up asynchronous outcomes of the capture request.
    pub fn poll(&mut self) {
        let Some(pipeline) = &self.pipeline else {
            return;
        };

        if let Some(bus) = pipeline.bus() {
            while let Some(msg) = bus.pop() {
                if let gst::MessageView::Error(err) = msg.view() {
                    let reason = err.error().to_string();
                    tracing::warn!("Camera error: {}", reason);
                    self.stop(CameraState::Unavailable(reason));
                    return;
                }
            }
        }

        if self.state == CameraState::Starting && self.frames.generation() > 0 {
            tracing::info!("Camera preview live");
            self.state = CameraState::Live;
        }
    }

    fn stop(&mut self, state: CameraState) {
        if let Some(pipeline) = self.pipeline.take() {
            pipeline.set_state(gst::State::Null).ok();
        }
        self.state = state;
    }
}

impl Drop for CameraFeed {
    fn drop(&mut self) {
        if let Some(pipeline) = &self.pipeline {
            pipeline.set_state(gst::State::Null).ok();
        }
    }
}
