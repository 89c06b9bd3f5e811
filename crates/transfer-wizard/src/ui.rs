//! UI helper components

use eframe::egui;

const ACCENT: egui::Color32 = egui::Color32::from_rgb(0, 212, 170);
const ERROR: egui::Color32 = egui::Color32::from_rgb(220, 80, 80);
const OK: egui::Color32 = egui::Color32::from_rgb(80, 200, 120);

/// Page title in the accent color with an optional line of guidance under it
pub fn page_heading(ui: &mut egui::Ui, title: &str, subtitle: Option<&str>) {
    ui.heading(egui::RichText::new(title).color(ACCENT));
    if let Some(subtitle) = subtitle {
        ui.label(egui::RichText::new(subtitle).weak());
    }
    ui.add_space(15.0);
}

/// One-line outcome: a blocking reason, a service error or a confirmation.
pub fn status_line(ui: &mut egui::Ui, ok: bool, message: &str) {
    let (icon, color) = if ok { ("✅", OK) } else { ("❌", ERROR) };
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(icon).size(14.0));
        ui.label(egui::RichText::new(message).color(color));
    });
}

/// Wizard navigation button. The primary one is filled with the accent color.
pub fn nav_button(ui: &mut egui::Ui, text: &str, primary: bool, enabled: bool) -> egui::Response {
    let label = egui::RichText::new(text).size(14.0);
    let btn = if primary {
        egui::Button::new(label.color(egui::Color32::WHITE))
            .fill(ACCENT.gamma_multiply(0.85))
            .min_size(egui::vec2(120.0, 32.0))
    } else {
        egui::Button::new(label).min_size(egui::vec2(90.0, 32.0))
    };
    ui.add_enabled(enabled, btn)
}

/// Framed group for the field rows of a page
pub fn form_frame(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::group(ui.style())
        .inner_margin(12.0)
        .show(ui, add_contents);
}

pub fn copy_to_clipboard(text: &str) {
    match arboard::Clipboard::new() {
        Ok(mut clipboard) => {
            if let Err(e) = clipboard.set_text(text) {
                tracing::warn!(error = %e, "clipboard write failed");
            }
        }
        Err(e) => tracing::warn!(error = %e, "clipboard unavailable"),
    }
}

/// Transaction id with copy button
pub fn copyable_id(ui: &mut egui::Ui, id: &str) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(id).monospace().strong());
        if ui
            .small_button("📋")
            .on_hover_text("Copy transaction id")
            .clicked()
        {
            copy_to_clipboard(id);
        }
    });
}
