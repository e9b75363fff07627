//! Browser-side plumbing around `ndnfs_core`.
//!
//! This module provides:
//! - [`GatewayFace`] - the HTTP transport for interests
//! - [`BrowserSettings`] - persisted prefix, gateway and lifetime
//! - [`error`] - fetch and storage errors

pub mod error;
mod gateway;
pub mod settings;

pub use gateway::{GatewayFace, gateway_url};
pub use settings::BrowserSettings;
