//! Messages widget displaying recent notices.

use client_frontend_core::{message::MessageEntry, view_model::PresentationMapper};
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, List, ListDirection, ListItem},
};

/// Render the message log panel.
///
/// `messages` is newest first; the list draws bottom-to-top so the newest
/// entry sits on the last row.
pub fn render<T: PresentationMapper<Style = Style>>(
    frame: &mut Frame,
    area: Rect,
    messages: &[MessageEntry],
    theme: &T,
) {
    let rows = area.height.saturating_sub(2) as usize;
    let mut items: Vec<ListItem> = messages
        .iter()
        .take(rows)
        .map(|entry| ListItem::new(entry.text.clone()).style(theme.style_message(entry.level)))
        .collect();

    // Pad with empty lines to maintain consistent height
    while items.len() < rows {
        items.push(ListItem::new(""));
    }

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Messages"))
        .direction(ListDirection::BottomToTop);

    frame.render_widget(list, area);
}
