//! Cross-frontend primitives for the Crypto Devs token sale.
//!
//! Houses the view-sync controller and its worker, message logging, event
//! handling, amount formatting, and view-model types that the terminal UI
//! and any future frontend can reuse.
pub mod config;
pub mod controller;
pub mod event;
pub mod format;
pub mod frontend;
pub mod message;
pub mod view_model;
pub mod worker;

pub use config::{ChannelConfig, FrontendConfig, MessageConfig, SaleConfig, SyncConfig};
pub use controller::{SyncError, ViewSync};
pub use event::{EventConsumer, EventImpact, SyncEvent};
pub use frontend::Frontend;
pub use message::{MessageEntry, MessageLevel, MessageLog};
pub use view_model::{PresentationMapper, SyncAction, ViewModel, ViewState};
pub use worker::{SyncCommand, SyncHandle, SyncWorker, WorkerError};
