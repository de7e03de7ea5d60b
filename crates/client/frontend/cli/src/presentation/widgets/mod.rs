//! Widgets composing the sale screen.
pub mod footer;
pub mod header;
pub mod messages;
pub mod sale;
