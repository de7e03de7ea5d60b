//! Terminal UI frontend for the Crypto Devs token sale.
//!
//! This crate provides a terminal-based user interface built on ratatui and
//! crossterm. It implements the `client_frontend_core::Frontend` trait.
//!
//! # Architecture
//!
//! CliFrontend is a pure UI layer that:
//! - Receives a SyncHandle for communication
//! - Does NOT own the view-sync controller
//! - Watches view state, subscribes to events and queues commands via the handle

mod app;
mod config;
mod input;
pub mod logging;
pub mod presentation;
mod state;

pub use app::CliFrontend;
pub use config::{CliConfig, UiConfig};

// Re-export for convenience (used in main.rs)
pub use client_frontend_core::FrontendConfig;
