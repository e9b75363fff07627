//! Utility modules for web and DOM operations.
//!
//! Provides:
//! - [`dom`] - Window, storage and focus helpers
//! - [`fetch`] - Gateway fetching raced against a timeout
//! - [`format`] - Size and date formatting for file metadata
//! - [`logger`] - `log` backend writing to the browser console

pub mod dom;
pub mod fetch;
pub mod format;
pub mod logger;
