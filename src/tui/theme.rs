//! Centralized theme module for TUI color constants and styles

use ratatui::prelude::*;
use serde::{Deserialize, Serialize};

use crate::output::DisplayStyle;

/// Palette selection from config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Detect from the terminal background
    #[default]
    Auto,
    Dark,
    Light,
}

/// Complete color palette for the TUI
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Category colors (success/info/warning/error)
    pub success: Color,
    pub info: Color,
    pub warning: Color,
    pub error: Color,

    // Checklist
    pub checked: Color,
    pub unchecked: Color,
    pub points_color: Color,
    pub row_selected: Style,

    // Chart
    pub bar_inactive: Color,

    // General colors
    pub muted: Color,
    pub title_color: Color,
    pub header_style: Style,

    // Status bar colors
    pub status_bar_bg: Color,
    pub status_key_color: Color,
    pub flash_color: Color,

    // Popup overlay colors
    pub popup_border: Color,
    pub popup_title: Style,
    pub popup_bg: Color,
}

impl ThemeColors {
    pub fn dark() -> Self {
        Self {
            success: Color::Green,
            info: Color::Cyan,
            warning: Color::Yellow,
            error: Color::Red,
            checked: Color::Green,
            unchecked: Color::DarkGray,
            points_color: Color::Gray,
            row_selected: Style::new().reversed(),
            bar_inactive: Color::Indexed(240),
            muted: Color::Gray,
            title_color: Color::Cyan,
            header_style: Style::new().bold(),
            status_bar_bg: Color::Indexed(236),
            status_key_color: Color::Cyan,
            flash_color: Color::White,
            popup_border: Color::Cyan,
            popup_title: Style::new().fg(Color::Cyan).bold(),
            popup_bg: Color::Indexed(234),
        }
    }

    pub fn light() -> Self {
        Self {
            success: Color::Rgb(0, 128, 0),
            info: Color::Blue,
            warning: Color::Rgb(180, 110, 0),
            error: Color::Rgb(190, 0, 0),
            checked: Color::Rgb(0, 128, 0),
            unchecked: Color::Gray,
            points_color: Color::DarkGray,
            row_selected: Style::new().reversed(),
            bar_inactive: Color::Indexed(250),
            muted: Color::DarkGray,
            title_color: Color::Blue,
            header_style: Style::new().bold(),
            status_bar_bg: Color::Indexed(254),
            status_key_color: Color::Blue,
            flash_color: Color::Black,
            popup_border: Color::Blue,
            popup_title: Style::new().fg(Color::Blue).bold(),
            popup_bg: Color::Indexed(255),
        }
    }

    pub fn style_color(&self, style: DisplayStyle) -> Color {
        match style {
            DisplayStyle::Success => self.success,
            DisplayStyle::Info => self.info,
            DisplayStyle::Warning => self.warning,
            DisplayStyle::Error => self.error,
        }
    }
}

/// Pick the palette. `Auto` queries the terminal background luma and
/// falls back to dark when the terminal does not answer.
pub fn resolve_theme(theme: Theme) -> ThemeColors {
    match theme {
        Theme::Dark => ThemeColors::dark(),
        Theme::Light => ThemeColors::light(),
        Theme::Auto => match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => {
                log::debug!("Terminal background luma {:.2}, using light theme", luma);
                ThemeColors::light()
            }
            Ok(luma) => {
                log::debug!("Terminal background luma {:.2}, using dark theme", luma);
                ThemeColors::dark()
            }
            Err(e) => {
                log::debug!("Could not detect terminal background ({}), using dark theme", e);
                ThemeColors::dark()
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_themes() {
        assert_eq!(resolve_theme(Theme::Dark).title_color, Color::Cyan);
        assert_eq!(resolve_theme(Theme::Light).title_color, Color::Blue);
    }

    #[test]
    fn test_style_colors_are_distinct() {
        let colors = ThemeColors::dark();
        let all = [
            colors.style_color(DisplayStyle::Success),
            colors.style_color(DisplayStyle::Info),
            colors.style_color(DisplayStyle::Warning),
            colors.style_color(DisplayStyle::Error),
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
