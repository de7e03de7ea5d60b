//! Key-binding hints, replaced by a loading line while a command runs.

use client_frontend_core::{SyncAction, view_model::PresentationMapper};
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::Line,
    widgets::Paragraph,
};

pub fn render<T: PresentationMapper<Style = Style>>(
    frame: &mut Frame,
    area: Rect,
    pending: Option<SyncAction>,
    claim_enabled: bool,
    theme: &T,
) {
    let line = match pending {
        Some(action) => Line::styled(
            format!("Loading... ({})", action),
            theme.emphasize(theme.style_figure()),
        ),
        None => Line::raw(hints(claim_enabled)),
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn hints(claim_enabled: bool) -> &'static str {
    if claim_enabled {
        "c connect | 0-9 quantity | m mint | l claim | w withdraw | r refresh | q quit"
    } else {
        "c connect | 0-9 quantity | m mint | w withdraw | r refresh | q quit"
    }
}
