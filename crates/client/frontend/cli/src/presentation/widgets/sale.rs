//! Main panel: balances, quantity input and the available actions.

use client_frontend_core::{ViewModel, view_model::PresentationMapper};
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub const CONNECT_PROMPT: &str = "Connect your wallet to continue";
const QUANTITY_PLACEHOLDER: &str = "Amount of Tokens";

/// What the panel needs beyond the view model.
pub struct SalePanel<'a> {
    pub view_model: &'a ViewModel,
    /// Raw contents of the quantity field.
    pub quantity: &'a str,
    pub claim_enabled: bool,
}

pub fn render<T: PresentationMapper<Style = Style>>(
    frame: &mut Frame,
    area: Rect,
    panel: &SalePanel,
    theme: &T,
) {
    let lines = if panel.view_model.connected {
        connected_lines(panel, theme)
    } else {
        vec![
            Line::raw(""),
            Line::from(vec![
                Span::raw(CONNECT_PROMPT),
                Span::raw("  "),
                Span::styled("[c] Connect wallet", theme.style_action(true)),
            ]),
        ]
    };

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Sale"));

    frame.render_widget(paragraph, area);
}

fn connected_lines<'a, T: PresentationMapper<Style = Style>>(
    panel: &'a SalePanel,
    theme: &T,
) -> Vec<Line<'a>> {
    let model = panel.view_model;
    let mut lines = vec![
        Line::styled(model.minted_line.as_str(), theme.style_figure()),
        Line::styled(model.supply_line.as_str(), theme.style_figure()),
        Line::raw(""),
    ];

    if panel.claim_enabled
        && let Some(claim) = &model.claim_line
    {
        lines.push(Line::from(vec![
            Span::raw(claim.as_str()),
            Span::raw("  "),
            Span::styled("[l] Claim Tokens", theme.style_action(true)),
        ]));
        lines.push(Line::raw(""));
    }

    let quantity = if panel.quantity.is_empty() {
        Span::styled(QUANTITY_PLACEHOLDER, theme.style_action(false))
    } else {
        Span::styled(panel.quantity, theme.emphasize(Style::default()))
    };
    lines.push(Line::from(vec![Span::raw("Quantity: "), quantity]));
    lines.push(Line::styled(
        "[m] Mint Tokens",
        theme.style_action(model.mint_enabled),
    ));

    if model.show_withdraw {
        lines.push(Line::styled(
            "[w] Withdraw Coins",
            theme.style_action(true),
        ));
    }

    lines
}
