use std::path::Path;
use std::time::Instant;

use eframe::egui;

use crate::ops::scrub_controller::{RotationScrubController, ScrubConfig};
use crate::renderer::camera_feed::{CameraFeed, CameraState};
use crate::renderer::video_source::{MediaEvent, VideoSource};
use crate::types::clock::Clock;
use crate::types::overlay::LoadingOverlay;
use crate::types::settings::Settings;
use crate::ui::loading_overlay::loading_overlay;
use crate::ui::ring_dial::RingDial;
use crate::ui::video_player::VideoSurface;

const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "mkv", "webm", "avi", "m4v"];

pub struct AppState {
    pub settings: Settings,
    pub controller: RotationScrubController<Option<VideoSource>>,
    pub camera: CameraFeed,
    pub overlay: LoadingOverlay,
    pub clock: Clock,
    pub video_surface: VideoSurface,
    pub camera_surface: VideoSurface,
    pub status: Option<String>,
}

pub struct ScrubApp {
    pub state: AppState,
    ctx: egui::Context,
}

impl ScrubApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings) -> Self {
        let ctx = cc.egui_ctx.clone();
        let camera = if settings.camera_enabled {
            CameraFeed::start(settings.camera_size, Some(ctx.clone()))
        } else {
            CameraFeed::disabled()
        };

        let state = AppState {
            controller: RotationScrubController::new(None, ScrubConfig::from(&settings)),
            camera,
            overlay: LoadingOverlay::new(settings.show_loading_overlay),
            clock: Clock::default(),
            video_surface: VideoSurface::new("scrub_video_frame"),
            camera_surface: VideoSurface::new("camera_preview_frame"),
            status: None,
            settings,
        };
        let mut app = Self { state, ctx };

        if let Some(path) = app.state.settings.video_path.clone() {
            app.open_video(&path);
        }
        app
    }

    /// Replaces the scrubbed video. Failures are shown in the status line.
    pub fn open_video(&mut self, path: &Path) {
        match VideoSource::open(
            path,
            self.state.settings.preview_size,
            self.state.settings.prefer_fast_seek,
            Some(self.ctx.clone()),
        ) {
            Ok(source) => {
                self.state.controller.replace_media(Some(source));
                self.state.video_surface.clear();
                self.state.status = None;
            }
            Err(err) => {
                tracing::warn!("Could not open {}: {}", path.display(), err);
                self.state.status = Some(err.to_string());
            }
        }
    }

    fn poll_media(&mut self) {
        let events = self
            .state
            .controller
            .media_mut()
            .as_mut()
            .map(VideoSource::poll_events)
            .unwrap_or_default();

        for event in events {
            match event {
                MediaEvent::MetadataLoaded { duration } => {
                    tracing::debug!(duration, "Video metadata ready");
                    self.state.controller.on_metadata_loaded();
                }
                MediaEvent::Error(message) => self.state.status = Some(message),
                MediaEvent::EndOfStream => tracing::debug!("Video reached end of stream"),
            }
        }

        self.state.camera.poll();
    }

    fn pick_video(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Video", VIDEO_EXTENSIONS)
            .pick_file()
        {
            self.open_video(&path);
        }
    }
}

impl eframe::App for ScrubApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_media();

        let now = Instant::now();
        self.state.clock.tick(now, || chrono::Local::now().time());
        ctx.request_repaint_after(self.state.clock.until_next_tick(now));

        if let Some(video) = self.state.controller.media() {
            self.state.video_surface.update(ctx, video.frames());
        }
        self.state.camera_surface.update(ctx, self.state.camera.frames());

        let mut open_requested = false;
        egui::CentralPanel::default()
            .frame(egui::Frame::default().fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                let full = ui.max_rect();
                self.state.video_surface.paint(ui.painter(), full);

                // Clock, top left
                ui.painter().text(
                    full.left_top() + egui::vec2(16.0, 12.0),
                    egui::Align2::LEFT_TOP,
                    &self.state.clock.text,
                    egui::FontId::monospace(22.0),
                    egui::Color32::WHITE,
                );

                // Camera preview, top right
                if *self.state.camera.state() == CameraState::Live {
                    let size = egui::vec2(
                        self.state.settings.camera_size.0 as f32,
                        self.state.settings.camera_size.1 as f32,
                    ) * 0.6;
                    let preview = egui::Rect::from_min_size(
                        full.right_top() + egui::vec2(-size.x - 16.0, 12.0),
                        size,
                    );
                    self.state.camera_surface.paint(ui.painter(), preview);
                }

                // Dial, centered
                let side = full.width().min(full.height()) * 0.6;
                let dial_rect = egui::Rect::from_center_size(full.center(), egui::Vec2::splat(side));
                RingDial::new(&mut self.state.controller).show(ui, dial_rect);

                if self.state.controller.media().is_none() {
                    let button_rect = egui::Rect::from_center_size(
                        full.center_bottom() - egui::vec2(0.0, 48.0),
                        egui::vec2(160.0, 32.0),
                    );
                    if ui.put(button_rect, egui::Button::new("Open video…")).clicked() {
                        open_requested = true;
                    }
                }

                let video = self.state.controller.media().as_ref();
                let line = status_line(
                    self.state.status.as_deref(),
                    video.map(VideoSource::path),
                    self.state.video_surface.has_frame(),
                );
                if let Some(line) = line {
                    let color = if self.state.status.is_some() {
                        egui::Color32::from_rgb(255, 140, 120)
                    } else {
                        egui::Color32::from_white_alpha(160)
                    };
                    ui.painter().text(
                        full.left_bottom() + egui::vec2(16.0, -12.0),
                        egui::Align2::LEFT_BOTTOM,
                        line,
                        egui::FontId::proportional(14.0),
                        color,
                    );
                }
            });

        loading_overlay(ctx, &mut self.state.overlay);

        if open_requested {
            self.pick_video();
        }
    }
}

/// Bottom status text: an error if there is one, otherwise the open file's
/// name, marked as loading until its first frame is shown.
fn status_line(error: Option<&str>, video: Option<&Path>, has_frame: bool) -> Option<String> {
    if let Some(error) = error {
        return Some(error.to_string());
    }
    let path = video?;
    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    if has_frame {
        Some(name)
    } else {
        Some(format!("Loading {name}…"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_line_prefers_error() {
        let line = status_line(
            Some("Video file does not exist: a.mp4"),
            Some(Path::new("/v/b.mp4")),
            true,
        );
        assert_eq!(line.as_deref(), Some("Video file does not exist: a.mp4"));
    }

    #[test]
    fn test_status_line_shows_file_name() {
        let path = Path::new("/videos/ring.mp4");
        assert_eq!(
            status_line(None, Some(path), false).as_deref(),
            Some("Loading ring.mp4…")
        );
        assert_eq!(
            status_line(None, Some(path), true).as_deref(),
            Some("ring.mp4")
        );
    }

    #[test]
    fn test_status_line_empty_without_video() {
        assert_eq!(status_line(None, None, false), None);
    }
}
