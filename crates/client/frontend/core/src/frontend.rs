//! Trait describing a runnable client front-end.
use anyhow::Result;
use async_trait::async_trait;

use crate::worker::SyncHandle;

/// Frontend abstraction for UI layers.
///
/// Frontends communicate with the sale through a [`SyncHandle`]:
/// - Watch the latest `ViewState`
/// - Subscribe to `SyncEvent`s
/// - Queue user commands (connect, mint, claim, withdraw)
///
/// Frontends do NOT own the controller; the sync worker does.
///
/// # Implementations
///
/// - `CliFrontend`: Terminal-based UI (ratatui + crossterm)
///
/// # Example Implementation
///
/// ```no_run
/// use async_trait::async_trait;
/// use client_frontend_core::{Frontend, SyncCommand, SyncHandle};
/// use anyhow::Result;
///
/// struct Headless;
///
/// #[async_trait]
/// impl Frontend for Headless {
///     async fn run(&mut self, handle: SyncHandle) -> Result<()> {
///         handle.send(SyncCommand::Initialize).await?;
///         let mut events = handle.subscribe();
///         while let Ok(event) = events.recv().await {
///             println!("{:?}", event);
///         }
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Frontend: Send {
    /// Run the frontend event loop until the user quits.
    ///
    /// # Errors
    ///
    /// Returns an error if the frontend encounters a fatal error.
    async fn run(&mut self, handle: SyncHandle) -> Result<()>;
}
