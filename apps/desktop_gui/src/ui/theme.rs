//! Theme presets and style application for the studio shell.

use std::collections::BTreeMap;

use eframe::egui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemePreset {
    Light,
    Dark,
}

impl ThemePreset {
    pub fn label(self) -> &'static str {
        match self {
            ThemePreset::Light => "Studio Light",
            ThemePreset::Dark => "Studio Dark",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeSettings {
    pub preset: ThemePreset,
    pub accent_color: egui::Color32,
    pub text_scale: f32,
}

impl ThemeSettings {
    pub fn for_preset(preset: ThemePreset) -> Self {
        Self {
            preset,
            accent_color: egui::Color32::from_rgb(0x19, 0x76, 0xd2),
            text_scale: 1.0,
        }
    }
}

fn visuals_for_theme(theme: ThemeSettings) -> egui::Visuals {
    let mut visuals = match theme.preset {
        ThemePreset::Light => egui::Visuals::light(),
        ThemePreset::Dark => egui::Visuals::dark(),
    };
    visuals.hyperlink_color = theme.accent_color;
    visuals.selection.bg_fill = theme.accent_color;
    visuals.widgets.active.bg_fill = theme.accent_color;
    visuals.widgets.hovered.bg_fill = theme.accent_color.gamma_multiply(0.85);
    visuals
}

fn scaled_text_styles(text_scale: f32) -> BTreeMap<egui::TextStyle, egui::FontId> {
    let mut styles = egui::Style::default().text_styles;
    for font in styles.values_mut() {
        font.size *= text_scale;
    }
    styles
}

pub fn apply_theme(ctx: &egui::Context, theme: ThemeSettings) {
    let mut style = (*ctx.style()).clone();
    style.visuals = visuals_for_theme(theme);
    style.text_styles = scaled_text_styles(theme.text_scale);

    // Make text inputs reliably clickable and visible:
    style.visuals.widgets.inactive.bg_stroke =
        egui::Stroke::new(1.0, style.visuals.widgets.noninteractive.bg_stroke.color);
    style.visuals.widgets.hovered.bg_stroke =
        egui::Stroke::new(1.0, style.visuals.widgets.hovered.bg_stroke.color);
    style.visuals.widgets.active.bg_stroke =
        egui::Stroke::new(1.2, style.visuals.selection.bg_fill.gamma_multiply(0.9));

    ctx.set_style(style);
}

pub fn lighten_color(c: egui::Color32, t: f32) -> egui::Color32 {
    let t = t.clamp(0.0, 1.0);
    let mix = |channel: u8| -> u8 {
        let channel = channel as f32;
        (channel + (255.0 - channel) * t).round().clamp(0.0, 255.0) as u8
    };
    egui::Color32::from_rgba_unmultiplied(mix(c.r()), mix(c.g()), mix(c.b()), c.a())
}
