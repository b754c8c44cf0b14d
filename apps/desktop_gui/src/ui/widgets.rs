//! Small form widgets shared across the studio screens.

use std::hash::Hash;

use eframe::egui;

/// Labelled single-line text input stretched to the available width.
pub fn labeled_text_field(
    ui: &mut egui::Ui,
    id_salt: impl Hash,
    label: &str,
    hint: &str,
    value: &mut String,
    should_focus: bool,
) -> egui::Response {
    ui.label(egui::RichText::new(label).strong());
    let edit = egui::TextEdit::singleline(value)
        .id_salt(id_salt)
        .hint_text(
            egui::RichText::new(hint).color(ui.visuals().weak_text_color().gamma_multiply(0.85)),
        )
        .desired_width(f32::INFINITY);

    // Taller inputs are easier to click and feel "app-like".
    let response = ui.add_sized([ui.available_width(), 34.0], edit);

    // One-time / directed focus that doesn't flicker.
    if should_focus {
        response.request_focus();
    }

    response
}

/// Labelled multi-line text input for longer prose.
pub fn labeled_multiline_field(
    ui: &mut egui::Ui,
    id_salt: impl Hash,
    label: &str,
    hint: &str,
    value: &mut String,
    rows: usize,
    should_focus: bool,
) -> egui::Response {
    ui.label(egui::RichText::new(label).strong());
    let edit = egui::TextEdit::multiline(value)
        .id_salt(id_salt)
        .hint_text(
            egui::RichText::new(hint).color(ui.visuals().weak_text_color().gamma_multiply(0.85)),
        )
        .desired_rows(rows)
        .desired_width(f32::INFINITY);

    let response = ui.add(edit);
    if should_focus {
        response.request_focus();
    }

    response
}

/// Read-only display of a derived value, styled like a disabled input.
pub fn read_only_field(ui: &mut egui::Ui, label: &str, value: &str) {
    ui.label(egui::RichText::new(label).strong());
    let mut text = value.to_string();
    ui.add(
        egui::TextEdit::singleline(&mut text)
            .interactive(false)
            .desired_width(f32::INFINITY),
    );
}

/// Inline validation message below a field.
pub fn inline_error(ui: &mut egui::Ui, message: &str) {
    ui.label(
        egui::RichText::new(message)
            .color(ui.visuals().error_fg_color)
            .small(),
    );
}
