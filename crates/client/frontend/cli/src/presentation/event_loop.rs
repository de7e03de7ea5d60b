//! Pumps sync events, state snapshots, user input, and rendering.
use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use tokio::sync::broadcast::error::RecvError;
use tokio::{
    sync::{broadcast, watch},
    time::{self, Duration},
};

use crate::config::CliConfig;
use crate::input::{self, Gate, InputHandler, KeyAction};
use crate::presentation::{
    terminal::Tui,
    ui::{self, RenderContext},
};
use crate::state::QuantityInput;
use client_frontend_core::{
    EventConsumer, SaleConfig, SyncCommand, SyncEvent, SyncHandle, ViewModel, ViewState,
    WorkerError,
};

const FRAME_INTERVAL_MS: u64 = 16;

pub struct EventLoop<C>
where
    C: EventConsumer,
{
    handle: SyncHandle,
    state_rx: watch::Receiver<ViewState>,
    event_rx: broadcast::Receiver<SyncEvent>,
    input: InputHandler,
    quantity: QuantityInput,
    consumer: C,
    sale: SaleConfig,
    cli_config: CliConfig,
}

impl<C> EventLoop<C>
where
    C: EventConsumer,
{
    pub fn new(handle: SyncHandle, consumer: C, sale: SaleConfig, cli_config: CliConfig) -> Self {
        Self {
            state_rx: handle.watch_state(),
            event_rx: handle.subscribe(),
            input: InputHandler::new(cli_config.ui.enable_claim),
            quantity: QuantityInput::default(),
            handle,
            consumer,
            sale,
            cli_config,
        }
    }

    pub async fn run(mut self, terminal: &mut Tui) -> Result<C> {
        self.render(terminal)?;

        loop {
            tokio::select! {
                changed = self.state_rx.changed() => {
                    if changed.is_err() {
                        tracing::warn!("Sync worker stopped");
                        break;
                    }
                    self.render(terminal)?;
                }
                result = self.event_rx.recv() => {
                    if self.handle_sync_channel(result, terminal)? {
                        break;
                    }
                }
                _ = time::sleep(Duration::from_millis(FRAME_INTERVAL_MS)) => {
                    if self.handle_input_tick(terminal)? {
                        break;
                    }
                }
            }
        }

        Ok(self.consumer)
    }

    fn handle_sync_channel(
        &mut self,
        result: Result<SyncEvent, RecvError>,
        terminal: &mut Tui,
    ) -> Result<bool> {
        match result {
            Ok(event) => {
                if self.collect_events(event) {
                    self.render(terminal)?;
                }
                Ok(false)
            }
            Err(RecvError::Closed) => {
                tracing::warn!("Event stream closed");
                Ok(true)
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!("Dropped {} stale events", skipped);
                Ok(false)
            }
        }
    }

    fn collect_events(&mut self, initial: SyncEvent) -> bool {
        let mut should_render = self.consumer.on_event(&initial).requires_redraw;

        while let Ok(event) = self.event_rx.try_recv() {
            should_render |= self.consumer.on_event(&event).requires_redraw;
        }

        should_render
    }

    fn handle_input_tick(&mut self, terminal: &mut Tui) -> Result<bool> {
        if !event::poll(Duration::from_millis(0))? {
            return Ok(false);
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                self.handle_key_press(key, terminal)
            }
            Event::Resize(_, _) => {
                self.render(terminal)?;
                Ok(false)
            }
            _ => Ok(false),
        }
    }

    fn handle_key_press(&mut self, key: KeyEvent, terminal: &mut Tui) -> Result<bool> {
        let action = self.input.handle_key(key);
        match action {
            KeyAction::Quit => {
                self.consumer.message_log_mut().push_info("Quitting...");
                self.render(terminal)?;
                return Ok(true);
            }
            KeyAction::PushDigit(digit) => {
                self.quantity.push(digit);
            }
            KeyAction::PopDigit => {
                self.quantity.pop();
            }
            _ => match input::gate(action, &self.handle.state(), self.quantity.value()) {
                Gate::Send(command) => {
                    if self.dispatch(command) {
                        return Ok(true);
                    }
                }
                Gate::Warn(text) => self.consumer.message_log_mut().push_warning(text),
                Gate::Ignore => {}
            },
        }

        // Echo local edits and warnings even while the worker is busy.
        self.render(terminal)?;
        Ok(false)
    }

    /// Queues `command` without waiting. Returns `true` once the worker is gone.
    fn dispatch(&mut self, command: SyncCommand) -> bool {
        match self.handle.try_send(command) {
            Ok(()) => false,
            Err(WorkerError::QueueFull) => {
                tracing::warn!("Command queue full; dropping key press");
                self.consumer
                    .message_log_mut()
                    .push_warning("Still busy with the previous transaction");
                false
            }
            Err(WorkerError::CommandChannelClosed) => {
                tracing::error!("Command channel closed");
                true
            }
        }
    }

    fn render(&mut self, terminal: &mut Tui) -> Result<()> {
        let state = self.state_rx.borrow_and_update().clone();
        let mut view_model = ViewModel::from_state(
            &state,
            &self.sale,
            self.consumer.message_log(),
            self.cli_config.ui.message_panel_height as usize,
        );
        // The next mint amount lives only in the local field.
        view_model.mint_enabled = !self.quantity.value().is_zero();

        let ctx = RenderContext {
            view_model: &view_model,
            quantity: self.quantity.as_str(),
            claim_enabled: self.cli_config.ui.enable_claim,
            message_panel_height: self.cli_config.ui.message_panel_height,
        };
        ui::render(terminal, &ctx)
    }
}
