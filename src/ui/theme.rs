use crate::logic::bands::{CloudBand, HumidityBand};
use ratatui::style::{Color, Modifier, Style};

pub struct Theme;

impl Theme {
    // Base colors
    pub const FG: Color = Color::White;
    pub const DIM: Color = Color::DarkGray;
    pub const ACCENT: Color = Color::Cyan;
    pub const HIGHLIGHT: Color = Color::Magenta;

    // Status colors
    pub const SUCCESS: Color = Color::Green;
    pub const WARNING: Color = Color::Yellow;
    pub const ERROR: Color = Color::Red;

    // Measurement colors
    pub const TEMP_COLD: Color = Color::LightBlue;
    pub const TEMP_MILD: Color = Color::Cyan;
    pub const TEMP_WARM: Color = Color::Yellow;
    pub const TEMP_HOT: Color = Color::Red;
    pub const BAND_LOW: Color = Color::Green;
    pub const BAND_MODERATE: Color = Color::Yellow;
    pub const BAND_HIGH: Color = Color::LightBlue;

    // Score chart bars
    pub const RAIN_BAR: Color = Color::Cyan;
    pub const CLOUD_BAR: Color = Color::Magenta;

    // Styles
    pub fn title() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn subtitle() -> Style {
        Style::default().fg(Self::HIGHLIGHT)
    }

    pub fn header() -> Style {
        Style::default().fg(Self::FG).add_modifier(Modifier::BOLD)
    }

    pub fn normal() -> Style {
        Style::default().fg(Self::FG)
    }

    pub fn dim() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn highlight() -> Style {
        Style::default()
            .fg(Self::HIGHLIGHT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected() -> Style {
        Style::default()
            .bg(Color::DarkGray)
            .fg(Self::FG)
            .add_modifier(Modifier::BOLD)
    }

    pub fn success() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    pub fn warning() -> Style {
        Style::default().fg(Self::WARNING)
    }

    pub fn error() -> Style {
        Style::default().fg(Self::ERROR).add_modifier(Modifier::BOLD)
    }

    pub fn temp_color(temp_c: f64) -> Color {
        if temp_c < 5.0 {
            Self::TEMP_COLD
        } else if temp_c < 20.0 {
            Self::TEMP_MILD
        } else if temp_c <= 35.0 {
            Self::TEMP_WARM
        } else {
            Self::TEMP_HOT
        }
    }

    pub fn humidity_color(humidity: f64) -> Color {
        match HumidityBand::of(humidity) {
            HumidityBand::Low => Self::BAND_LOW,
            HumidityBand::Moderate => Self::BAND_MODERATE,
            HumidityBand::High => Self::BAND_HIGH,
        }
    }

    pub fn cloud_color(cloudiness: f64) -> Color {
        match CloudBand::of(cloudiness) {
            CloudBand::Low => Self::BAND_LOW,
            CloudBand::Moderate => Self::BAND_MODERATE,
            CloudBand::High => Self::BAND_HIGH,
        }
    }

    pub fn nav_key() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn nav_label() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(Self::ACCENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_colors_follow_rule_bands() {
        assert_eq!(Theme::humidity_color(80.0), Theme::BAND_MODERATE);
        assert_eq!(Theme::humidity_color(81.0), Theme::BAND_HIGH);
        assert_eq!(Theme::cloud_color(49.0), Theme::BAND_LOW);
        assert_eq!(Theme::cloud_color(70.0), Theme::BAND_MODERATE);
    }

    #[test]
    fn temp_color_marks_rain_window() {
        assert_eq!(Theme::temp_color(19.9), Theme::TEMP_MILD);
        assert_eq!(Theme::temp_color(20.0), Theme::TEMP_WARM);
        assert_eq!(Theme::temp_color(35.0), Theme::TEMP_WARM);
        assert_eq!(Theme::temp_color(35.1), Theme::TEMP_HOT);
    }
}
