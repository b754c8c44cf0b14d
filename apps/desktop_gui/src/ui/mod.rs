//! UI layer for the authoring app: app shell, theme presets, and field widgets.

pub mod app;
pub mod theme;
pub mod widgets;

pub use app::{StartupConfig, StudioApp};
pub use theme::ThemePreset;
