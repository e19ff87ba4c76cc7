use eframe::egui;

use crate::renderer::frame_slot::FrameSlot;

/// An egui texture that mirrors the latest frame of a [`FrameSlot`].
pub struct VideoSurface {
    name: &'static str,
    texture: Option<egui::TextureHandle>,
    generation: u64,
}

impl VideoSurface {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            texture: None,
            generation: 0,
        }
    }

    /// Uploads the slot's frame if it changed since the last call.
    pub fn update(&mut self, ctx: &egui::Context, frames: &FrameSlot) {
        let generation = frames.generation();
        if generation == self.generation {
            return;
        }
        self.generation = generation;

        let Some(frame) = frames.latest() else {
            return;
        };
        let image = egui::ColorImage::from_rgba_unmultiplied(
            [frame.width as usize, frame.height as usize],
            &frame.data,
        );
        match &mut self.texture {
            Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
            None => {
                self.texture = Some(ctx.load_texture(self.name, image, egui::TextureOptions::LINEAR))
            }
        }
    }

    /// Forgets the current texture, e.g. when the source is replaced.
    pub fn clear(&mut self) {
        self.texture = None;
        self.generation = 0;
    }

    pub fn has_frame(&self) -> bool {
        self.texture.is_some()
    }

    /// Paints the frame letterboxed into `rect`.
    pub fn paint(&self, painter: &egui::Painter, rect: egui::Rect) {
        let Some(texture) = &self.texture else {
            return;
        };
        let target = fit_rect(texture.size_vec2(), rect);
        painter.image(
            texture.id(),
            target,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
    }
}

/// Largest rect with the aspect ratio of `size` centered inside `bounds`.
pub fn fit_rect(size: egui::Vec2, bounds: egui::Rect) -> egui::Rect {
    if size.x <= 0.0 || size.y <= 0.0 {
        return bounds;
    }
    let scale = (bounds.width() / size.x).min(bounds.height() / size.y);
    egui::Rect::from_center_size(bounds.center(), size * scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_rect_letterboxes_wide_frame() {
        let bounds = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(400.0, 400.0));
        let fitted = fit_rect(egui::vec2(1600.0, 900.0), bounds);
        assert_eq!(fitted.width(), 400.0);
        assert_eq!(fitted.height(), 225.0);
        assert_eq!(fitted.center(), bounds.center());
    }

    #[test]
    fn test_fit_rect_pillarboxes_tall_frame() {
        let bounds = egui::Rect::from_min_size(egui::pos2(10.0, 10.0), egui::vec2(300.0, 200.0));
        let fitted = fit_rect(egui::vec2(100.0, 200.0), bounds);
        assert_eq!(fitted.height(), 200.0);
        assert_eq!(fitted.width(), 100.0);
    }

    #[test]
    fn test_fit_rect_degenerate_size() {
        let bounds = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(50.0, 50.0));
        assert_eq!(fit_rect(egui::Vec2::ZERO, bounds), bounds);
    }
}
