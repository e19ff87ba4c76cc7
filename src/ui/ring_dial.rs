use eframe::egui;

use crate::ops::scrub_controller::RotationScrubController;
use crate::types::media::MediaElement;
use crate::types::ring::{PointerId, RingKind};

const BIG_RING_COLOR: egui::Color32 = egui::Color32::from_rgb(60, 64, 72);
const SMALL_RING_COLOR: egui::Color32 = egui::Color32::from_rgb(82, 88, 100);
const ACTIVE_RING_COLOR: egui::Color32 = egui::Color32::from_rgb(120, 170, 255);
const MIDDLE_COLOR: egui::Color32 = egui::Color32::from_rgb(24, 26, 30);
const MARKER_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 200, 90);
const TICKS_PER_RING: usize = 24;

/// Where a pointer landed on the dial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialZone {
    Ring(RingKind),
    /// Center disc, tapped to reset.
    Middle,
    Outside,
}

/// Concentric layout: big ring outside, small ring inside it, middle disc in
/// the center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialGeometry {
    pub center: egui::Pos2,
    pub big_radius: f32,
    pub small_radius: f32,
    pub middle_radius: f32,
}

impl DialGeometry {
    pub fn from_rect(rect: egui::Rect) -> Self {
        let big_radius = rect.width().min(rect.height()) / 2.0;
        Self {
            center: rect.center(),
            big_radius,
            small_radius: big_radius * 0.66,
            middle_radius: big_radius * 0.36,
        }
    }

    pub fn zone_at(&self, pos: egui::Pos2) -> DialZone {
        let distance = self.center.distance(pos);
        if distance <= self.middle_radius {
            DialZone::Middle
        } else if distance <= self.small_radius {
            DialZone::Ring(RingKind::Small)
        } else if distance <= self.big_radius {
            DialZone::Ring(RingKind::Big)
        } else {
            DialZone::Outside
        }
    }

    /// Bounding box of a ring; angles are measured from its center.
    pub fn ring_rect(&self, kind: RingKind) -> egui::Rect {
        let radius = match kind {
            RingKind::Big => self.big_radius,
            RingKind::Small => self.small_radius,
        };
        egui::Rect::from_center_size(self.center, egui::Vec2::splat(radius * 2.0))
    }

    /// Inner and outer radius of a ring's band.
    fn band(&self, kind: RingKind) -> (f32, f32) {
        match kind {
            RingKind::Big => (self.small_radius, self.big_radius),
            RingKind::Small => (self.middle_radius, self.small_radius),
        }
    }
}

/// Pointer driving this frame's input: the first touch point if any touch
/// event arrived, the mouse otherwise.
fn frame_pointer(events: &[egui::Event]) -> PointerId {
    events
        .iter()
        .find_map(|event| match event {
            egui::Event::Touch { id, .. } => Some(PointerId(id.0)),
            _ => None,
        })
        .unwrap_or(PointerId::MOUSE)
}

/// Pointers whose gesture was cancelled by the platform this frame.
fn cancelled_pointers(events: &[egui::Event]) -> Vec<PointerId> {
    events
        .iter()
        .filter_map(|event| match event {
            egui::Event::Touch {
                id,
                phase: egui::TouchPhase::Cancel,
                ..
            } => Some(PointerId(id.0)),
            egui::Event::WindowFocused(false) => Some(PointerId::MOUSE),
            _ => None,
        })
        .collect()
}

/// The dual-ring dial widget, driving a [`RotationScrubController`].
pub struct RingDial<'a, M: MediaElement> {
    controller: &'a mut RotationScrubController<M>,
}

impl<'a, M: MediaElement> RingDial<'a, M> {
    pub fn new(controller: &'a mut RotationScrubController<M>) -> Self {
        Self { controller }
    }

    pub fn show(self, ui: &mut egui::Ui, rect: egui::Rect) -> egui::Response {
        let geometry = DialGeometry::from_rect(rect);
        let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());
        let (events, now, press_origin) =
            ui.input(|i| (i.events.clone(), i.time, i.pointer.press_origin()));
        let pointer = frame_pointer(&events);

        for cancelled in cancelled_pointers(&events) {
            if self.controller.dragging_ring().is_some() {
                self.controller.cancel_drag(cancelled);
            }
        }

        if response.drag_started() {
            // start from where the press happened, not where the drag was detected
            if let Some(origin) = press_origin.or(response.interact_pointer_pos()) {
                if let DialZone::Ring(kind) = geometry.zone_at(origin) {
                    self.controller
                        .start_drag(kind, pointer, geometry.ring_rect(kind), origin);
                }
            }
        }

        if response.dragged() {
            if let (Some(kind), Some(pos)) = (
                self.controller.dragging_ring(),
                response.interact_pointer_pos(),
            ) {
                self.controller.drag_move(kind, geometry.ring_rect(kind), pos);
            }
        }

        if response.drag_stopped() {
            self.controller.end_drag(pointer);
        }

        if response.clicked() {
            let tapped_middle = response
                .interact_pointer_pos()
                .is_some_and(|pos| geometry.zone_at(pos) == DialZone::Middle);
            if tapped_middle {
                self.controller.reset(now);
            }
        }

        if self.controller.tick(now) {
            ui.ctx().request_repaint();
        }

        self.update_cursor(ui, &response, &geometry);
        self.paint(ui, &geometry, now);
        response
    }

    fn update_cursor(&self, ui: &egui::Ui, response: &egui::Response, geometry: &DialGeometry) {
        if self.controller.dragging_ring().is_some() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
            return;
        }
        match response.hover_pos().map(|pos| geometry.zone_at(pos)) {
            Some(DialZone::Ring(_)) => ui.ctx().set_cursor_icon(egui::CursorIcon::Grab),
            Some(DialZone::Middle) => ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand),
            _ => {}
        }
    }

    fn paint(&self, ui: &egui::Ui, geometry: &DialGeometry, now: f64) {
        let painter = ui.painter();
        let dragging = self.controller.dragging_ring();

        for kind in [RingKind::Big, RingKind::Small] {
            let (inner, outer) = geometry.band(kind);
            let base = match kind {
                RingKind::Big => BIG_RING_COLOR,
                RingKind::Small => SMALL_RING_COLOR,
            };
            let fill = if dragging == Some(kind) {
                ACTIVE_RING_COLOR.gamma_multiply(0.6)
            } else {
                base
            };
            let mid = (inner + outer) / 2.0;
            painter.circle_stroke(geometry.center, mid, egui::Stroke::new(outer - inner, fill));

            let angle = self.controller.visual_angle(kind, now) as f32;
            for tick in 0..TICKS_PER_RING {
                let a = (angle + tick as f32 * 360.0 / TICKS_PER_RING as f32).to_radians();
                let dir = egui::vec2(a.cos(), a.sin());
                let length = if tick % 6 == 0 { 0.35 } else { 0.18 };
                let half = (outer - inner) * length / 2.0;
                painter.line_segment(
                    [
                        geometry.center + dir * (mid - half),
                        geometry.center + dir * (mid + half),
                    ],
                    egui::Stroke::new(1.5, egui::Color32::from_white_alpha(90)),
                );
            }

            let marker = angle.to_radians();
            painter.circle_filled(
                geometry.center + egui::vec2(marker.cos(), marker.sin()) * mid,
                (outer - inner) * 0.14,
                MARKER_COLOR,
            );
        }

        painter.circle_filled(geometry.center, geometry.middle_radius, MIDDLE_COLOR);
        painter.text(
            geometry.center,
            egui::Align2::CENTER_CENTER,
            self.controller.counter().display(),
            egui::FontId::monospace(geometry.middle_radius * 0.7),
            egui::Color32::WHITE,
        );
    }
}
