use eframe::egui;

use crate::types::overlay::LoadingOverlay;

/// Full-window overlay covering the dial until the first click or touch.
pub fn loading_overlay(ctx: &egui::Context, overlay: &mut LoadingOverlay) {
    if !overlay.is_visible() {
        return;
    }

    let screen = ctx.screen_rect();
    egui::Area::new(egui::Id::new("loading_overlay"))
        .order(egui::Order::Foreground)
        .fixed_pos(screen.min)
        .show(ctx, |ui| {
            // Sense drags too so nothing underneath reacts while covered
            let response = ui.allocate_rect(screen, egui::Sense::click_and_drag());
            let touched = ui.input(|i| {
                i.events.iter().any(|event| {
                    matches!(
                        event,
                        egui::Event::Touch {
                            phase: egui::TouchPhase::Start,
                            pos,
                            ..
                        } if screen.contains(*pos)
                    )
                })
            });

            let painter = ui.painter();
            painter.rect_filled(screen, 0.0, egui::Color32::from_black_alpha(235));
            painter.text(
                screen.center(),
                egui::Align2::CENTER_CENTER,
                "Tap to start",
                egui::FontId::proportional(32.0),
                egui::Color32::WHITE,
            );

            if (response.clicked() || touched) && overlay.dismiss() {
                tracing::debug!("Loading overlay dismissed");
            }
        });
}
