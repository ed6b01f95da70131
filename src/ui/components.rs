//! Reusable UI components
//!
//! This module contains standalone UI components that can be used
//! throughout the application.

use crate::theme;
use eframe::egui;

/// Live clock string for the category bar.
pub fn clock_text() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

/// Format a record's creation timestamp for captions and tooltips.
pub fn format_created_at(epoch_ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(epoch_ms)
        .map(|dt| {
            dt.with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        })
        .unwrap_or_else(|| "unknown".to_string())
}

/// Small colored category badge.
pub fn category_badge(ui: &mut egui::Ui, category: &str) {
    let (bg, fg) = theme::category_colors(category);
    egui::Frame::new()
        .fill(bg)
        .corner_radius(theme::RADIUS_DEFAULT)
        .inner_margin(egui::Margin::symmetric(6, 2))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(category).color(fg).size(10.0));
        });
}

/// Thin upload progress bar, 0-100.
pub fn progress_bar(ui: &mut egui::Ui, progress: u8) {
    let desired = egui::vec2(ui.available_width(), 5.0);
    let (rect, _) = ui.allocate_exact_size(desired, egui::Sense::hover());
    if ui.is_rect_visible(rect) {
        let painter = ui.painter();
        painter.rect_filled(rect, 2.0, theme::ACCENT_FAINT);
        let filled_w = rect.width() * (progress as f32 / 100.0);
        let filled = egui::Rect::from_min_size(rect.min, egui::vec2(filled_w, rect.height()));
        painter.rect_filled(filled, 2.0, theme::ACCENT);
    }
}

/// Hollow icon button used on tile overlays and in the lightbox. Place
/// with `ui.put(rect, icon_button(...))`.
pub fn icon_button(icon: &str, tint: egui::Color32) -> egui::Button<'static> {
    egui::Button::new(egui::RichText::new(icon.to_string()).color(tint).size(15.0))
        .fill(egui::Color32::from_rgba_unmultiplied(0x03, 0x08, 0x04, 180))
        .stroke(egui::Stroke::new(theme::STROKE_DEFAULT, theme::BORDER_DEFAULT))
        .corner_radius(theme::RADIUS_DEFAULT)
}
