//! Header widget with the sale title.

use client_frontend_core::view_model::PresentationMapper;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

pub const TITLE: &str = "Welcome to Crypto Devs ICO!";
const SUBTITLE: &str = "You can claim or mint Crypto Dev tokens here";

pub fn render<T: PresentationMapper<Style = Style>>(frame: &mut Frame, area: Rect, theme: &T) {
    let text = vec![
        Line::styled(TITLE, theme.emphasize(Style::default())),
        Line::raw(SUBTITLE),
    ];

    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Crypto Devs"));

    frame.render_widget(paragraph, area);
}
