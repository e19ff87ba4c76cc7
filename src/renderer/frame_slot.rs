use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use eframe::egui;
use gstreamer as gst;
use gstreamer_app as gst_app;
use gstreamer_video as gst_video;

#[derive(Debug, Clone)]
pub struct VideoFrame {
    pub data: Vec<u8>, // Tightly packed RGBA
    pub width: u32,
    pub height: u32,
}

/// Latest decoded frame, written by a GStreamer streaming thread and read by
/// the UI thread.
#[derive(Debug, Clone, Default)]
pub struct FrameSlot {
    frame: Arc<Mutex<Option<VideoFrame>>>,
    generation: Arc<AtomicU64>,
}

impl FrameSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self, frame: VideoFrame) {
        let mut slot = self.frame.lock().unwrap_or_else(|e| e.into_inner());
        *slot = Some(frame);
        self.generation.fetch_add(1, Ordering::Release);
    }

    /// Bumped on every stored frame; 0 until the first one arrives.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    pub fn latest(&self) -> Option<VideoFrame> {
        self.frame.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Routes preroll and playing samples of `sink` into this slot.
    pub fn attach(&self, sink: &gst_app::AppSink, repaint: Option<egui::Context>) {
        let preroll_slot = self.clone();
        let preroll_repaint = repaint.clone();
        let sample_slot = self.clone();

        sink.set_callbacks(
            gst_app::AppSinkCallbacks::builder()
                .new_preroll(move |sink| {
                    let sample = sink.pull_preroll().map_err(|_| gst::FlowError::Eos)?;
                    preroll_slot.store_sample(&sample, preroll_repaint.as_ref());
                    Ok(gst::FlowSuccess::Ok)
                })
                .new_sample(move |sink| {
                    let sample = sink.pull_sample().map_err(|_| gst::FlowError::Eos)?;
                    sample_slot.store_sample(&sample, repaint.as_ref());
                    Ok(gst::FlowSuccess::Ok)
                })
                .build(),
        );
    }

    fn store_sample(&self, sample: &gst::Sample, repaint: Option<&egui::Context>) {
        match frame_from_sample(sample) {
            Some(frame) => {
                self.store(frame);
                if let Some(ctx) = repaint {
                    ctx.request_repaint();
                }
            }
            None => tracing::trace!("Dropping sample without usable RGBA buffer"),
        }
    }
}

/// Converts an RGBA appsink sample into a packed frame.
pub fn frame_from_sample(sample: &gst::Sample) -> Option<VideoFrame> {
    let caps = sample.caps()?;
    let info = gst_video::VideoInfo::from_caps(caps).ok()?;
    let buffer = sample.buffer()?;
    let map = buffer.map_readable().ok()?;

    let stride = usize::try_from(*info.stride().first()?).ok()?;
    let data = pack_rows(map.as_slice(), info.width(), info.height(), stride)?;

    Some(VideoFrame {
        data,
        width: info.width(),
        height: info.height(),
    })
}

/// Drops per-row padding from a strided RGBA plane.
/// Returns `None` if `data` is too short for the given geometry.
pub fn pack_rows(data: &[u8], width: u32, height: u32, stride: usize) -> Option<Vec<u8>> {
    let row_bytes = width as usize * 4;
    if stride < row_bytes {
        return None;
    }
    if stride == row_bytes {
        return data.get(..row_bytes * height as usize).map(<[u8]>::to_vec);
    }
    let mut packed = Vec::with_capacity(row_bytes * height as usize);
    for row in 0..height as usize {
        let start = row * stride;
        packed.extend_from_slice(data.get(start..start + row_bytes)?);
    }
    Some(packed)
}
