//! UI components built with Leptos.
//!
//! - [`Browser`] - Main browsing view (prefix bar, listing, file details)
//! - [`icons`] - Centralized icon definitions (change theme here)
//! - [`status`] - Status bar showing prefix, location and gateway

pub mod browser;
pub mod icons;
pub mod status;

pub use browser::Browser;
