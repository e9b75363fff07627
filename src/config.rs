//! Application configuration.
//!
//! Centralizes the constants used by the browser. User-adjustable values
//! (prefix, gateway, lifetime) only provide defaults here; the persisted
//! [`BrowserSettings`](crate::core::settings::BrowserSettings) override them.

use log::LevelFilter;

// =============================================================================
// Application Metadata
// =============================================================================

/// Application name shown in the header.
pub const APP_NAME: &str = "ndnfs";

/// Id of the element `index.html` provides for mounting.
pub const MOUNT_ELEMENT_ID: &str = "app";

// =============================================================================
// Browsing Defaults
// =============================================================================

/// Root prefix browsed on first visit.
pub const DEFAULT_PREFIX: &str = "/ndnfs";

/// Base URL of the HTTP gateway that forwards interests into the network.
///
/// The request name's URI is appended verbatim, so no trailing slash.
pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:6363/ndn";

/// Interest lifetime in milliseconds.
pub const INTEREST_LIFETIME_MS: u64 = ndnfs_core::client::DEFAULT_INTEREST_LIFETIME_MS;

/// Response header carrying the full data name (markers and version).
pub const DATA_NAME_HEADER: &str = "X-NDN-Data-Name";

// =============================================================================
// Storage
// =============================================================================

/// localStorage key for persisted [`BrowserSettings`](crate::core::settings::BrowserSettings).
pub const SETTINGS_KEY: &str = "ndnfs_browser_settings";

// =============================================================================
// Logging
// =============================================================================

/// Most verbose level forwarded to the browser console.
pub const LOG_LEVEL: LevelFilter = if cfg!(debug_assertions) {
    LevelFilter::Debug
} else {
    LevelFilter::Info
};

// =============================================================================
// UI Configuration
// =============================================================================

/// Icon theme selection.
///
/// Available themes:
/// - `Bootstrap` - Familiar, slightly bolder (default)
/// - `Lucide` - Minimal, thin strokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(dead_code)]
pub enum IconTheme {
    #[default]
    Bootstrap,
    Lucide,
}

/// Current icon theme used throughout the application.
pub const ICON_THEME: IconTheme = IconTheme::Bootstrap;
