//! Ratatui theme implementation of PresentationMapper.

use client_frontend_core::{message::MessageLevel, view_model::PresentationMapper};
use ratatui::style::{Color, Modifier, Style};

/// Color scheme for the sale screen.
pub struct RatatuiTheme;

impl PresentationMapper for RatatuiTheme {
    type Style = Style;

    fn style_message(&self, level: MessageLevel) -> Self::Style {
        match level {
            MessageLevel::Info => Style::default().fg(Color::White),
            MessageLevel::Warning => Style::default().fg(Color::Yellow),
            MessageLevel::Error => Style::default().fg(Color::LightRed),
        }
    }

    fn style_action(&self, enabled: bool) -> Self::Style {
        if enabled {
            Style::default().fg(Color::LightBlue).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
        }
    }

    fn style_figure(&self) -> Self::Style {
        Style::default().fg(Color::Yellow)
    }

    fn emphasize(&self, base_style: Self::Style) -> Self::Style {
        base_style.add_modifier(Modifier::BOLD)
    }
}

impl RatatuiTheme {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RatatuiTheme {
    fn default() -> Self {
        Self::new()
    }
}
