use clap::Parser;

mod ui;

use ui::{StartupConfig, StudioApp, ThemePreset};

#[derive(Parser, Debug)]
struct Args {
    /// Theme preset to start with.
    #[arg(long, value_enum, default_value_t = ThemePresetArg::Light)]
    theme: ThemePresetArg,
    /// Scale factor applied to all UI text.
    #[arg(long, default_value_t = 1.0)]
    text_scale: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum ThemePresetArg {
    Light,
    Dark,
}

impl From<ThemePresetArg> for ThemePreset {
    fn from(value: ThemePresetArg) -> Self {
        match value {
            ThemePresetArg::Light => ThemePreset::Light,
            ThemePresetArg::Dark => ThemePreset::Dark,
        }
    }
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let startup = StartupConfig {
        theme: args.theme.into(),
        text_scale: args.text_scale,
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Assessment Studio")
            .with_inner_size([900.0, 760.0])
            .with_min_inner_size([640.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Assessment Studio",
        options,
        Box::new(move |_cc| Ok(Box::new(StudioApp::bootstrap(startup)))),
    )
}
