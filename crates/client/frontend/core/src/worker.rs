//! Background task owning the [`ViewSync`] controller.
//!
//! Frontends never touch the controller directly: they queue commands
//! through a [`SyncHandle`] and observe results via the state watch and the
//! event stream. Commands run one at a time in arrival order.

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use client_blockchain_core::U256;

use crate::controller::ViewSync;
use crate::event::SyncEvent;
use crate::view_model::ViewState;

/// Commands accepted by the sync worker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyncCommand {
    /// Connect, then load every view value.
    Initialize,
    Connect,
    RefreshAll,
    /// Buy this many whole tokens; becomes the pending mint amount.
    Mint(U256),
    Claim,
    Withdraw,
}

#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    #[error("sync worker command channel closed")]
    CommandChannelClosed,

    #[error("sync worker command queue is full")]
    QueueFull,
}

/// Client-facing handle to the sync worker.
#[derive(Clone)]
pub struct SyncHandle {
    command_tx: mpsc::Sender<SyncCommand>,
    state_rx: watch::Receiver<ViewState>,
    events: broadcast::Sender<SyncEvent>,
}

impl SyncHandle {
    /// Queue a command. Waits only for queue space, not for completion.
    pub async fn send(&self, command: SyncCommand) -> Result<(), WorkerError> {
        self.command_tx
            .send(command)
            .await
            .map_err(|_| WorkerError::CommandChannelClosed)
    }

    /// Queue a command without waiting.
    ///
    /// Fails with [`WorkerError::QueueFull`] while the worker is stuck on a
    /// long confirmation and the queue has filled up.
    pub fn try_send(&self, command: SyncCommand) -> Result<(), WorkerError> {
        self.command_tx.try_send(command).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => WorkerError::QueueFull,
            mpsc::error::TrySendError::Closed(_) => WorkerError::CommandChannelClosed,
        })
    }

    /// Latest state snapshot.
    pub fn state(&self) -> ViewState {
        self.state_rx.borrow().clone()
    }

    pub fn watch_state(&self) -> watch::Receiver<ViewState> {
        self.state_rx.clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.events.subscribe()
    }
}

pub struct SyncWorker {
    controller: ViewSync,
    command_rx: mpsc::Receiver<SyncCommand>,
}

impl SyncWorker {
    /// Spawn the worker onto the current runtime.
    ///
    /// The task ends once every [`SyncHandle`] is dropped.
    pub fn spawn(controller: ViewSync, command_buffer: usize) -> (SyncHandle, JoinHandle<()>) {
        let (command_tx, command_rx) = mpsc::channel(command_buffer.max(1));
        let handle = SyncHandle {
            command_tx,
            state_rx: controller.watch_state(),
            events: controller.event_sender(),
        };

        let worker = Self {
            controller,
            command_rx,
        };
        let task = tokio::spawn(worker.run());

        (handle, task)
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        info!("sync worker started");
        while let Some(command) = self.command_rx.recv().await {
            debug!(?command, "processing command");
            self.controller.execute(command).await;
        }
        info!("sync worker stopped");
    }
}
