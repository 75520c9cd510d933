//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::data::HourStatus;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Heatmap color for hours without data.
    pub no_data: Color,
    /// Heatmap color for hours within threshold.
    pub ok: Color,
    /// Color for alerted probes and hours.
    pub alert: Color,
    /// Color for warnings and inline dialog errors.
    pub warning: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for header rows in tables.
    pub header: Style,
    /// Style for selected/highlighted rows.
    pub selected: Style,
    /// Style for the focused dialog field.
    pub focused: Style,
    /// Style for a filter menu that is filtering.
    pub filter_active: Style,
    /// Style for an idle filter menu.
    pub filter_inactive: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            no_data: Color::DarkGray,
            ok: Color::Green,
            alert: Color::Red,
            warning: Color::Yellow,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            focused: Style::default().fg(Color::Black).bg(Color::Cyan),
            filter_active: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            filter_inactive: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            no_data: Color::Gray,
            ok: Color::Green,
            alert: Color::Red,
            warning: Color::Yellow,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            focused: Style::default().fg(Color::White).bg(Color::Blue),
            filter_active: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            filter_inactive: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Color of one heatmap hour.
    pub fn hour_color(&self, status: HourStatus) -> Color {
        match status {
            HourStatus::NoData => self.no_data,
            HourStatus::Ok => self.ok,
            HourStatus::Alert => self.alert,
            HourStatus::Warning => self.warning,
        }
    }

    /// Style for the alert marker of a row.
    pub fn alert_style(&self, alerted: bool) -> Style {
        if alerted {
            Style::default().fg(self.alert).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.ok)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hour_colors_are_distinct() {
        let theme = Theme::dark();
        let colors = [
            theme.hour_color(HourStatus::NoData),
            theme.hour_color(HourStatus::Ok),
            theme.hour_color(HourStatus::Alert),
            theme.hour_color(HourStatus::Warning),
        ];
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
