//! Application shell: the assessment form screen and the settings window.

use chrono::{DateTime, Local};
use eframe::egui;
use form_core::{
    FormCommand, FormState, LoggingSubmissionSink, SectionUpdate, SubmissionSink, SubmitError,
};
use shared::{
    draft::Section,
    error::{DraftField, FieldError},
    taxonomy::{Domain, Sector},
};
use tracing::{error, info};

use super::theme::{apply_theme, lighten_color, ThemePreset, ThemeSettings};
use super::widgets;

#[derive(Debug, Clone, Copy)]
pub struct StartupConfig {
    pub theme: ThemePreset,
    pub text_scale: f32,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            theme: ThemePreset::Light,
            text_scale: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FocusField {
    Title,
    Description,
}

impl FocusField {
    /// Validation focus lands on text inputs; the sector dropdown has no
    /// caret to place.
    fn for_field(field: DraftField) -> Option<FocusField> {
        match field {
            DraftField::Title => Some(FocusField::Title),
            DraftField::Description => Some(FocusField::Description),
            DraftField::Sector => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusBannerSeverity {
    Info,
    Error,
}

#[derive(Debug, Clone)]
struct StatusBanner {
    severity: StatusBannerSeverity,
    message: String,
}

pub struct StudioApp {
    form: FormState,
    sink: Box<dyn SubmissionSink>,

    field_errors: Vec<FieldError>,
    status: String,
    status_banner: Option<StatusBanner>,
    last_submitted: Option<DateTime<Local>>,

    theme: ThemeSettings,
    applied_theme: Option<ThemeSettings>,
    settings_open: bool,

    // Stable focus state so text boxes keep focus reliably.
    focus: Option<FocusField>,
    attempted_auto_focus: bool,
}

impl StudioApp {
    pub fn bootstrap(startup: StartupConfig) -> Self {
        Self::with_sink(startup, Box::new(LoggingSubmissionSink))
    }

    fn with_sink(startup: StartupConfig, sink: Box<dyn SubmissionSink>) -> Self {
        let mut theme = ThemeSettings::for_preset(startup.theme);
        theme.text_scale = startup.text_scale.clamp(0.8, 1.4);
        Self {
            form: FormState::new(),
            sink,
            field_errors: Vec::new(),
            status: "Draft not saved yet".to_string(),
            status_banner: None,
            last_submitted: None,
            theme,
            applied_theme: None,
            settings_open: false,
            focus: Some(FocusField::Title),
            attempted_auto_focus: false,
        }
    }

    fn apply_theme_if_needed(&mut self, ctx: &egui::Context) {
        if self.applied_theme == Some(self.theme) {
            return;
        }
        apply_theme(ctx, self.theme);
        self.applied_theme = Some(self.theme);
    }

    /// Queued commands run after the widgets have finished drawing, so a
    /// frame never observes a section list it no longer matches.
    fn apply_pending(&mut self, pending: Vec<FormCommand>) {
        for command in pending {
            let edited = edited_field(&command);
            if let Err(err) = self.form.apply(command) {
                error!(
                    index = err.index,
                    len = err.len,
                    "dropped stale section command: {err}"
                );
                continue;
            }
            if let Some(field) = edited {
                self.field_errors.retain(|e| e.field != field);
            }
        }
    }

    fn take_focus_request(&mut self) -> Option<FocusField> {
        if !self.attempted_auto_focus {
            self.attempted_auto_focus = true;
            return self.focus;
        }
        self.focus.take()
    }

    fn try_submit(&mut self) {
        match self.form.submit(self.sink.as_ref()) {
            Ok(draft) => {
                let now = Local::now();
                self.field_errors.clear();
                self.last_submitted = Some(now);
                self.status = format!(
                    "Saved \"{}\" ({} sections) at {}",
                    draft.title,
                    draft.sections.len(),
                    now.format("%H:%M:%S")
                );
                self.status_banner = Some(StatusBanner {
                    severity: StatusBannerSeverity::Info,
                    message: "Assessment submitted.".to_string(),
                });
                info!(sections = draft.sections.len(), "assessment draft saved");
            }
            Err(SubmitError::Invalid { errors }) => {
                self.focus = errors.iter().find_map(|e| FocusField::for_field(e.field));
                self.field_errors = errors;
                self.status = "Draft has missing required fields".to_string();
                self.status_banner = Some(StatusBanner {
                    severity: StatusBannerSeverity::Error,
                    message: "Please fill in the highlighted fields before saving.".to_string(),
                });
            }
            Err(SubmitError::Delivery(err)) => {
                self.status = "Submission failed".to_string();
                self.status_banner = Some(StatusBanner {
                    severity: StatusBannerSeverity::Error,
                    message: format!("Could not hand the draft off: {err:#}"),
                });
                error!("assessment submission failed: {err:#}");
            }
        }
    }

    fn show_form_screen(
        &mut self,
        ctx: &egui::Context,
        pending: &mut Vec<FormCommand>,
        save_requested: &mut bool,
    ) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let avail = ui.available_size();
            let card_width = avail.x.clamp(520.0, 720.0);
            let top_space = (avail.y * 0.05).clamp(10.0, 40.0);

            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(top_space);

                // Centered card
                ui.vertical_centered(|ui| {
                    ui.set_width(card_width);

                    let card_fill = lighten_color(ui.visuals().panel_fill, 0.02);
                    egui::Frame::NONE
                        .fill(card_fill)
                        .corner_radius(14.0)
                        .stroke(egui::Stroke::new(
                            1.0,
                            ui.visuals().widgets.noninteractive.bg_stroke.color,
                        ))
                        .inner_margin(egui::Margin::symmetric(20, 18))
                        .show(ui, |ui| {
                            ui.style_mut().spacing.item_spacing = egui::vec2(10.0, 10.0);

                            // Header
                            ui.horizontal(|ui| {
                                ui.label(egui::RichText::new("📋").size(24.0));
                                ui.vertical(|ui| {
                                    ui.heading("Assessment Update");
                                    ui.weak("Describe the assessment and its sections.");
                                });
                                ui.with_layout(
                                    egui::Layout::right_to_left(egui::Align::Center),
                                    |ui| {
                                        if ui.button("⚙").clicked() {
                                            self.settings_open = !self.settings_open;
                                        }
                                    },
                                );
                            });

                            ui.add_space(4.0);
                            self.show_status_banner(ui);

                            let focus_to_set = self.take_focus_request();

                            self.show_header_fields(ui, pending, focus_to_set, save_requested);
                            ui.add_space(4.0);
                            self.show_sections(ui, pending);
                            ui.add_space(6.0);
                            self.show_save_row(ui, save_requested);

                            ui.add_space(4.0);
                            ui.separator();
                            ui.horizontal_wrapped(|ui| {
                                ui.small("Status:");
                                ui.small(egui::RichText::new(&self.status).weak());
                                if let Some(at) = self.last_submitted {
                                    ui.with_layout(
                                        egui::Layout::right_to_left(egui::Align::Center),
                                        |ui| {
                                            ui.small(
                                                egui::RichText::new(format!(
                                                    "Last saved {}",
                                                    at.format("%H:%M:%S")
                                                ))
                                                .weak(),
                                            );
                                        },
                                    );
                                }
                            });
                        });
                });
                ui.add_space((avail.y * 0.05).clamp(8.0, 30.0));
            });
        });
    }

    fn show_header_fields(
        &self,
        ui: &mut egui::Ui,
        pending: &mut Vec<FormCommand>,
        focus_to_set: Option<FocusField>,
        save_requested: &mut bool,
    ) {
        egui::Frame::NONE
            .fill(ui.visuals().faint_bg_color.gamma_multiply(0.55))
            .corner_radius(12.0)
            .inner_margin(egui::Margin::symmetric(14, 12))
            .show(ui, |ui| {
                let mut title_buf = self.form.title().to_string();
                let title_resp = widgets::labeled_text_field(
                    ui,
                    "assessment_title",
                    "Assessment Title",
                    "e.g. Annual readiness check",
                    &mut title_buf,
                    focus_to_set == Some(FocusField::Title),
                );
                if title_resp.changed() {
                    pending.push(FormCommand::SetTitle(title_buf));
                }
                // Enter in the title field saves, like a plain form.
                if title_resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    *save_requested = true;
                }
                self.show_field_error(ui, DraftField::Title);

                ui.add_space(2.0);
                self.show_sector_picker(ui, pending);
                self.show_field_error(ui, DraftField::Sector);

                ui.add_space(2.0);
                let mut description_buf = self.form.description().to_string();
                let description_resp = widgets::labeled_multiline_field(
                    ui,
                    "assessment_description",
                    "Assessment Description",
                    "What does this assessment cover?",
                    &mut description_buf,
                    4,
                    focus_to_set == Some(FocusField::Description),
                );
                if description_resp.changed() {
                    pending.push(FormCommand::SetDescription(description_buf));
                }
                self.show_field_error(ui, DraftField::Description);
            });
    }

    fn show_sector_picker(&self, ui: &mut egui::Ui, pending: &mut Vec<FormCommand>) {
        ui.label(egui::RichText::new("Sector").strong());
        let selected_text = self
            .form
            .sector()
            .map(Sector::label)
            .unwrap_or("Select Sector");
        egui::ComboBox::from_id_salt("assessment_sector")
            .selected_text(selected_text)
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                for sector in Sector::ALL {
                    if ui
                        .selectable_label(self.form.sector() == Some(sector), sector.label())
                        .clicked()
                    {
                        pending.push(FormCommand::SetSector(sector));
                    }
                }
            });
    }

    fn show_field_error(&self, ui: &mut egui::Ui, field: DraftField) {
        if let Some(err) = self.field_errors.iter().find(|e| e.field == field) {
            widgets::inline_error(ui, &err.message);
        }
    }

    fn show_sections(&self, ui: &mut egui::Ui, pending: &mut Vec<FormCommand>) {
        ui.label(egui::RichText::new("Sections").strong().size(16.0));
        for (index, section) in self.form.sections().iter().enumerate() {
            show_section_card(ui, self.form.sector(), index, section, pending);
            ui.add_space(2.0);
        }

        if ui.button("Add Section").clicked() {
            pending.push(FormCommand::AddSection);
        }
    }

    fn show_save_row(&self, ui: &mut egui::Ui, save_requested: &mut bool) {
        let save = egui::Button::new(
            egui::RichText::new("Save Assessment")
                .strong()
                .size(16.0)
                .color(egui::Color32::WHITE),
        )
        .fill(self.theme.accent_color)
        .stroke(egui::Stroke::new(
            1.0,
            lighten_color(self.theme.accent_color, 0.2),
        ))
        .min_size(egui::vec2(ui.available_width(), 40.0));

        if ui.add(save).clicked() {
            *save_requested = true;
        }
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        if let Some(banner) = self.status_banner.clone() {
            let (fill, stroke) = match banner.severity {
                StatusBannerSeverity::Info => (
                    egui::Color32::from_rgb(46, 80, 46),
                    egui::Stroke::new(1.0, egui::Color32::from_rgb(96, 146, 96)),
                ),
                StatusBannerSeverity::Error => (
                    egui::Color32::from_rgb(111, 53, 53),
                    egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)),
                ),
            };

            egui::Frame::NONE
                .fill(fill)
                .stroke(stroke)
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(10, 8))
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(egui::RichText::new(&banner.message).color(egui::Color32::WHITE));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Dismiss").clicked() {
                                self.status_banner = None;
                            }
                        });
                    });
                });
        }
    }

    fn show_settings_window(&mut self, ctx: &egui::Context) {
        if !self.settings_open {
            return;
        }

        let window_frame = egui::Frame::NONE
            .fill(ctx.style().visuals.window_fill)
            .stroke(egui::Stroke::new(
                1.0,
                ctx.style().visuals.window_stroke().color,
            ))
            .corner_radius(10.0)
            .inner_margin(egui::Margin::symmetric(12, 10));

        let mut settings_open = self.settings_open;
        let mut close_requested = false;

        egui::Window::new("settings_window")
            .title_bar(false)
            .frame(window_frame)
            .open(&mut settings_open)
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("Settings").strong());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("✕").clicked() {
                            close_requested = true;
                        }
                    });
                });
                ui.separator();
                ui.label("Theme preset");
                egui::ComboBox::from_id_salt("theme_preset")
                    .selected_text(self.theme.preset.label())
                    .show_ui(ui, |ui| {
                        ui.selectable_value(
                            &mut self.theme.preset,
                            ThemePreset::Light,
                            ThemePreset::Light.label(),
                        );
                        ui.selectable_value(
                            &mut self.theme.preset,
                            ThemePreset::Dark,
                            ThemePreset::Dark.label(),
                        );
                    });

                ui.separator();
                ui.label("Accent color");
                ui.color_edit_button_srgba(&mut self.theme.accent_color);
                ui.small("Used for the save button and selected values.");
                ui.add(
                    egui::Slider::new(&mut self.theme.text_scale, 0.8..=1.4)
                        .text("Text scale")
                        .step_by(0.05),
                );

                if ui.button("Reset to defaults").clicked() {
                    self.theme = ThemeSettings::for_preset(self.theme.preset);
                }
            });

        self.settings_open = settings_open && !close_requested;
    }
}

fn edited_field(command: &FormCommand) -> Option<DraftField> {
    match command {
        FormCommand::SetTitle(_) => Some(DraftField::Title),
        FormCommand::SetSector(_) => Some(DraftField::Sector),
        FormCommand::SetDescription(_) => Some(DraftField::Description),
        _ => None,
    }
}

fn show_section_card(
    ui: &mut egui::Ui,
    sector: Option<Sector>,
    index: usize,
    section: &Section,
    pending: &mut Vec<FormCommand>,
) {
    egui::Frame::NONE
        .fill(ui.visuals().faint_bg_color.gamma_multiply(0.55))
        .stroke(egui::Stroke::new(
            1.0,
            ui.visuals().widgets.noninteractive.bg_stroke.color,
        ))
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(14, 12))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(format!("Section {}", index + 1)).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let remove = egui::Button::new(
                        egui::RichText::new("Remove Section").color(ui.visuals().error_fg_color),
                    );
                    if ui.add(remove).clicked() {
                        pending.push(FormCommand::RemoveSection { index });
                    }
                });
            });

            ui.columns(3, |columns| {
                show_section_title_field(&mut columns[0], index, section, pending);
                show_domain_picker(&mut columns[1], sector, index, section, pending);
                show_sub_domain_picker(&mut columns[2], index, section, pending);
            });

            ui.columns(2, |columns| {
                widgets::read_only_field(
                    &mut columns[0],
                    "Total Marks",
                    &section.total_marks.to_string(),
                );
                widgets::read_only_field(
                    &mut columns[1],
                    "Total Questions",
                    &section.total_questions.to_string(),
                );
            });

            ui.columns(2, |columns| {
                {
                    let ui = &mut columns[0];
                    ui.add_space(4.0);
                    let mut time_enabled = section.time_enabled;
                    if ui
                        .checkbox(&mut time_enabled, "Enable Time Duration")
                        .changed()
                    {
                        pending.push(FormCommand::UpdateSection {
                            index,
                            update: SectionUpdate::TimeEnabled(time_enabled),
                        });
                    }
                    let mut shuffle = section.shuffle_questions;
                    if ui.checkbox(&mut shuffle, "Shuffle Questions").changed() {
                        pending.push(FormCommand::UpdateSection {
                            index,
                            update: SectionUpdate::ShuffleQuestions(shuffle),
                        });
                    }
                }
                if section.time_enabled {
                    widgets::read_only_field(
                        &mut columns[1],
                        "Time Duration (mins)",
                        &section.time_duration_minutes.to_string(),
                    );
                }
            });
        });
}

fn show_section_title_field(
    ui: &mut egui::Ui,
    index: usize,
    section: &Section,
    pending: &mut Vec<FormCommand>,
) {
    let mut title_buf = section.title.clone();
    let resp = widgets::labeled_text_field(
        ui,
        ("section_title", index),
        "Section Title",
        "Name this section",
        &mut title_buf,
        false,
    );
    if resp.changed() {
        pending.push(FormCommand::UpdateSection {
            index,
            update: SectionUpdate::Title(title_buf),
        });
    }
}

fn show_domain_picker(
    ui: &mut egui::Ui,
    sector: Option<Sector>,
    index: usize,
    section: &Section,
    pending: &mut Vec<FormCommand>,
) {
    ui.label(egui::RichText::new("Select Domain").strong());
    let selected_text = section.domain.map(Domain::label).unwrap_or("Select Domain");
    let choices = sector.map(Sector::domains).unwrap_or(&[]);
    egui::ComboBox::from_id_salt(("section_domain", index))
        .selected_text(selected_text)
        .width(ui.available_width())
        .show_ui(ui, |ui| {
            if choices.is_empty() {
                ui.weak("Choose a sector first");
            }
            for &domain in choices {
                // A click re-issues the write even when the value is
                // unchanged; the picks below still reset.
                if ui
                    .selectable_label(section.domain == Some(domain), domain.label())
                    .clicked()
                {
                    pending.push(FormCommand::UpdateSection {
                        index,
                        update: SectionUpdate::Domain(domain),
                    });
                }
            }
        });
}

fn show_sub_domain_picker(
    ui: &mut egui::Ui,
    index: usize,
    section: &Section,
    pending: &mut Vec<FormCommand>,
) {
    ui.label(egui::RichText::new("Select Sub-domains").strong());
    let choices = section.domain.map(Domain::sub_domains).unwrap_or(&[]);
    egui::ComboBox::from_id_salt(("section_sub_domains", index))
        .selected_text(sub_domain_summary(section))
        .width(ui.available_width())
        .close_behavior(egui::PopupCloseBehavior::CloseOnClickOutside)
        .show_ui(ui, |ui| {
            if choices.is_empty() {
                ui.weak("Choose a domain first");
                return;
            }
            for &sub in choices {
                let mut picked = section.sub_domains.contains(&sub);
                if ui.checkbox(&mut picked, sub.label()).changed() {
                    let mut picks = section.sub_domains.clone();
                    if picked {
                        picks.push(sub);
                    } else {
                        picks.retain(|existing| *existing != sub);
                    }
                    pending.push(FormCommand::UpdateSection {
                        index,
                        update: SectionUpdate::SubDomains(picks),
                    });
                }
            }
        });
}

fn sub_domain_summary(section: &Section) -> String {
    if section.sub_domains.is_empty() {
        return "Select Sub-domains".to_string();
    }
    section
        .sub_domains
        .iter()
        .map(|sub| sub.label())
        .collect::<Vec<_>>()
        .join(", ")
}

impl eframe::App for StudioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_theme_if_needed(ctx);

        let mut pending = Vec::new();
        let mut save_requested = false;
        self.show_form_screen(ctx, &mut pending, &mut save_requested);
        self.show_settings_window(ctx);

        self.apply_pending(pending);
        if save_requested {
            self.try_submit();
        }
    }
}
