use serde::{Deserialize, Serialize};

use crate::scoring::ScoreVariant;
use crate::tui::Theme;

/// User configuration. Every field is optional; missing fields fall back to
/// the defaults below.
///
/// Example YAML:
/// ```yaml
/// variant: revised
/// color: auto
/// theme: dark
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Point table variant (default: revised)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<ScoreVariant>,

    /// Colored CLI output (default: auto)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorMode>,

    /// TUI palette (default: auto)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
}

impl Config {
    pub fn variant(&self) -> ScoreVariant {
        self.variant.unwrap_or_default()
    }

    pub fn color(&self) -> ColorMode {
        self.color.unwrap_or_default()
    }

    pub fn theme(&self) -> Theme {
        self.theme.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color only when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn use_colors(self) -> bool {
        match self {
            ColorMode::Auto => crate::output::should_use_colors(),
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}
