//! UI rendering entry point composing all widgets.
use anyhow::Result;
use ratatui::{
    Frame, Terminal,
    backend::Backend,
    layout::{Constraint, Direction, Layout},
};

use crate::presentation::{theme::RatatuiTheme, widgets};
use client_frontend_core::ViewModel;

/// Everything needed to draw one frame.
pub struct RenderContext<'a> {
    pub view_model: &'a ViewModel,
    pub quantity: &'a str,
    pub claim_enabled: bool,
    pub message_panel_height: u16,
}

pub fn render<B: Backend>(terminal: &mut Terminal<B>, ctx: &RenderContext) -> Result<()> {
    terminal.draw(|frame| draw(frame, ctx))?;
    Ok(())
}

/// Header, sale panel, messages, footer.
pub fn draw(frame: &mut Frame, ctx: &RenderContext) {
    let theme = RatatuiTheme;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),                        // Header
            Constraint::Min(0),                           // Sale
            Constraint::Length(ctx.message_panel_height), // Messages
            Constraint::Length(1),                        // Footer
        ])
        .split(frame.area());

    widgets::header::render(frame, chunks[0], &theme);

    let panel = widgets::sale::SalePanel {
        view_model: ctx.view_model,
        quantity: ctx.quantity,
        claim_enabled: ctx.claim_enabled,
    };
    widgets::sale::render(frame, chunks[1], &panel, &theme);

    widgets::messages::render(frame, chunks[2], &ctx.view_model.messages, &theme);

    widgets::footer::render(
        frame,
        chunks[3],
        ctx.view_model.pending,
        ctx.claim_enabled,
        &theme,
    );
}

#[cfg(test)]
mod tests {
    use client_blockchain_core::U256;
    use client_frontend_core::{MessageLog, SaleConfig, SyncAction, ViewState};
    use ratatui::backend::TestBackend;

    use super::*;

    fn tokens(whole: u64) -> U256 {
        U256::from(whole) * U256::from(10).pow(U256::from(18))
    }

    fn screen(state: &ViewState, quantity: &str, claim_enabled: bool, log: &MessageLog) -> String {
        let model = ViewModel::from_state(state, &SaleConfig::default(), log, 4);
        let ctx = RenderContext {
            view_model: &model,
            quantity,
            claim_enabled,
            message_panel_height: 6,
        };

        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        render(&mut terminal, &ctx).unwrap();

        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn connected() -> ViewState {
        ViewState {
            wallet_connected: true,
            caller_balance: tokens(5),
            total_minted: tokens(42),
            ..ViewState::default()
        }
    }

    #[test]
    fn disconnected_shows_connect_prompt_only() {
        let text = screen(&ViewState::default(), "", false, &MessageLog::new(4));
        assert!(text.contains(widgets::header::TITLE));
        assert!(text.contains(widgets::sale::CONNECT_PROMPT));
        assert!(!text.contains("Mint Tokens"));
    }

    #[test]
    fn connected_shows_balances_and_mint() {
        let text = screen(&connected(), "5", false, &MessageLog::new(4));
        assert!(text.contains("You have minted 5.0 Crypto Dev Tokens"));
        assert!(text.contains("Overall 42.0/10000 have been minted!!!"));
        assert!(text.contains("Quantity: 5"));
        assert!(text.contains("[m] Mint Tokens"));
        assert!(!text.contains("Withdraw Coins"));
    }

    #[test]
    fn owner_sees_withdraw() {
        let state = ViewState {
            is_owner: true,
            ..connected()
        };
        let text = screen(&state, "", false, &MessageLog::new(4));
        assert!(text.contains("[w] Withdraw Coins"));
        assert!(text.contains("Amount of Tokens"));
    }

    #[test]
    fn claim_panel_needs_config_and_claimable_tokens() {
        let state = ViewState {
            tokens_to_be_claimed: 3,
            ..connected()
        };
        assert!(!screen(&state, "", false, &MessageLog::new(4)).contains("can be claimed"));
        assert!(screen(&state, "", true, &MessageLog::new(4)).contains("30 Tokens can be claimed!"));

        let none_left = connected();
        assert!(!screen(&none_left, "", true, &MessageLog::new(4)).contains("can be claimed"));
    }

    #[test]
    fn pending_action_replaces_hints() {
        let state = ViewState {
            pending: Some(SyncAction::Mint),
            ..connected()
        };
        let text = screen(&state, "1", false, &MessageLog::new(4));
        assert!(text.contains("Loading... (mint)"));
        assert!(!text.contains("q quit"));
    }

    #[test]
    fn messages_are_rendered() {
        let mut log = MessageLog::new(4);
        log.push_info("Successfully claimed Crypto Dev Tokens");
        let text = screen(&connected(), "", false, &log);
        assert!(text.contains("Successfully claimed Crypto Dev Tokens"));
    }
}
