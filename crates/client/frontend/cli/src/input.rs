//! Input processing for the CLI client.
//!
//! This module owns the keyboard-to-command mapping so the rest of the
//! application can remain agnostic about concrete key bindings or the
//! specifics of `crossterm` events.

use client_blockchain_core::U256;
use client_frontend_core::{SyncCommand, ViewState};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub const NOT_CONNECTED: &str = "Connect your wallet first (press c)";
pub const ZERO_QUANTITY: &str = "Enter an amount of tokens greater than zero";
pub const NOTHING_TO_CLAIM: &str = "No tokens to claim";
pub const NOT_OWNER: &str = "Only the contract owner can withdraw";

/// High-level outcome of processing a keyboard event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    Connect,
    Refresh,
    Mint,
    Claim,
    Withdraw,
    /// Append a digit to the quantity field.
    PushDigit(char),
    /// Delete the last digit of the quantity field.
    PopDigit,
    /// No meaningful command was produced.
    None,
}

/// Translates `KeyEvent`s into UI commands.
pub struct InputHandler {
    claim_enabled: bool,
}

impl InputHandler {
    pub fn new(claim_enabled: bool) -> Self {
        Self { claim_enabled }
    }

    /// Converts a raw key event into a higher-level command.
    pub fn handle_key(&self, key: KeyEvent) -> KeyAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            KeyCode::Char(ch) => self.handle_char(ch),
            KeyCode::Backspace | KeyCode::Delete => KeyAction::PopDigit,
            KeyCode::Enter => KeyAction::Mint,
            KeyCode::Esc => KeyAction::Quit,
            _ => KeyAction::None,
        }
    }

    fn handle_char(&self, raw: char) -> KeyAction {
        if raw.is_ascii_digit() {
            return KeyAction::PushDigit(raw);
        }

        match raw.to_ascii_lowercase() {
            'q' => KeyAction::Quit,
            'c' => KeyAction::Connect,
            'r' => KeyAction::Refresh,
            'm' => KeyAction::Mint,
            'w' => KeyAction::Withdraw,
            'l' if self.claim_enabled => KeyAction::Claim,
            _ => KeyAction::None,
        }
    }
}

/// What an action key turns into given the current view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Gate {
    Send(SyncCommand),
    Warn(&'static str),
    Ignore,
}

/// Maps an action key to a command when the current view offers it.
///
/// `quantity` is the local input field, which leads the worker's copy.
pub fn gate(action: KeyAction, state: &ViewState, quantity: U256) -> Gate {
    match action {
        KeyAction::Connect => Gate::Send(SyncCommand::Connect),
        KeyAction::Refresh => Gate::Send(SyncCommand::RefreshAll),
        KeyAction::Mint | KeyAction::Claim | KeyAction::Withdraw if !state.wallet_connected => {
            Gate::Warn(NOT_CONNECTED)
        }
        KeyAction::Mint if quantity.is_zero() => Gate::Warn(ZERO_QUANTITY),
        KeyAction::Mint => Gate::Send(SyncCommand::Mint(quantity)),
        KeyAction::Claim if state.tokens_to_be_claimed == 0 => Gate::Warn(NOTHING_TO_CLAIM),
        KeyAction::Claim => Gate::Send(SyncCommand::Claim),
        KeyAction::Withdraw if !state.is_owner => Gate::Warn(NOT_OWNER),
        KeyAction::Withdraw => Gate::Send(SyncCommand::Withdraw),
        KeyAction::Quit | KeyAction::PushDigit(_) | KeyAction::PopDigit | KeyAction::None => {
            Gate::Ignore
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::empty(),
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn maps_sale_actions() {
        let handler = InputHandler::new(false);
        assert_eq!(handler.handle_key(key(KeyCode::Char('c'))), KeyAction::Connect);
        assert_eq!(handler.handle_key(key(KeyCode::Char('M'))), KeyAction::Mint);
        assert_eq!(handler.handle_key(key(KeyCode::Enter)), KeyAction::Mint);
        assert_eq!(handler.handle_key(key(KeyCode::Char('w'))), KeyAction::Withdraw);
        assert_eq!(handler.handle_key(key(KeyCode::Char('r'))), KeyAction::Refresh);
    }

    #[test]
    fn maps_quantity_editing() {
        let handler = InputHandler::new(false);
        assert_eq!(
            handler.handle_key(key(KeyCode::Char('7'))),
            KeyAction::PushDigit('7')
        );
        assert_eq!(handler.handle_key(key(KeyCode::Backspace)), KeyAction::PopDigit);
    }

    #[test]
    fn claim_binding_follows_config() {
        assert_eq!(
            InputHandler::new(false).handle_key(key(KeyCode::Char('l'))),
            KeyAction::None
        );
        assert_eq!(
            InputHandler::new(true).handle_key(key(KeyCode::Char('l'))),
            KeyAction::Claim
        );
    }

    #[test]
    fn maps_quit_keys() {
        let handler = InputHandler::new(false);
        assert_eq!(handler.handle_key(key(KeyCode::Char('q'))), KeyAction::Quit);
        assert_eq!(handler.handle_key(key(KeyCode::Esc)), KeyAction::Quit);

        let ctrl_c = KeyEvent {
            modifiers: KeyModifiers::CONTROL,
            ..key(KeyCode::Char('c'))
        };
        assert_eq!(handler.handle_key(ctrl_c), KeyAction::Quit);
    }

    fn connected() -> ViewState {
        ViewState {
            wallet_connected: true,
            ..ViewState::default()
        }
    }

    #[test]
    fn connect_and_refresh_are_always_offered() {
        let state = ViewState::default();
        assert_eq!(
            gate(KeyAction::Connect, &state, U256::ZERO),
            Gate::Send(SyncCommand::Connect)
        );
        assert_eq!(
            gate(KeyAction::Refresh, &state, U256::ZERO),
            Gate::Send(SyncCommand::RefreshAll)
        );
    }

    #[test]
    fn writes_need_a_connected_wallet() {
        let state = ViewState {
            is_owner: true,
            tokens_to_be_claimed: 3,
            ..ViewState::default()
        };
        for action in [KeyAction::Mint, KeyAction::Claim, KeyAction::Withdraw] {
            assert_eq!(
                gate(action, &state, U256::from(5)),
                Gate::Warn(NOT_CONNECTED)
            );
        }
    }

    #[test]
    fn mint_carries_the_typed_quantity() {
        let state = connected();
        assert_eq!(
            gate(KeyAction::Mint, &state, U256::ZERO),
            Gate::Warn(ZERO_QUANTITY)
        );
        assert_eq!(
            gate(KeyAction::Mint, &state, U256::from(7)),
            Gate::Send(SyncCommand::Mint(U256::from(7)))
        );
    }

    #[test]
    fn claim_needs_claimable_tokens() {
        let mut state = connected();
        assert_eq!(
            gate(KeyAction::Claim, &state, U256::ZERO),
            Gate::Warn(NOTHING_TO_CLAIM)
        );

        state.tokens_to_be_claimed = 2;
        assert_eq!(
            gate(KeyAction::Claim, &state, U256::ZERO),
            Gate::Send(SyncCommand::Claim)
        );
    }

    #[test]
    fn withdraw_is_owner_only() {
        let mut state = connected();
        assert_eq!(
            gate(KeyAction::Withdraw, &state, U256::ZERO),
            Gate::Warn(NOT_OWNER)
        );

        state.is_owner = true;
        assert_eq!(
            gate(KeyAction::Withdraw, &state, U256::ZERO),
            Gate::Send(SyncCommand::Withdraw)
        );
    }

    #[test]
    fn editing_and_unknown_keys_send_nothing() {
        let state = connected();
        for action in [
            KeyAction::None,
            KeyAction::PushDigit('1'),
            KeyAction::PopDigit,
            KeyAction::Quit,
        ] {
            assert_eq!(gate(action, &state, U256::from(1)), Gate::Ignore);
        }
    }

    #[test]
    fn ignores_unknown_keys() {
        let handler = InputHandler::new(true);
        assert_eq!(handler.handle_key(key(KeyCode::Char('x'))), KeyAction::None);
        assert_eq!(handler.handle_key(key(KeyCode::Tab)), KeyAction::None);
    }
}
