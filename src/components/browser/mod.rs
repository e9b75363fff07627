//! NDNFS browsing UI.
//!
//! Components:
//! - [`Browser`] - Main view
//! - [`PrefixBar`] - Root prefix form with up/refresh buttons
//! - [`FileList`] - Rows of the current listing
//! - [`ErrorBanner`] - Failure of the last browse
//! - [`FileInfoPanel`] - Metadata of the selected file

#[allow(clippy::module_inception)]
mod browser;
mod error_banner;
mod file_info;
mod file_list;
mod prefix_bar;

pub use browser::Browser;
pub use error_banner::ErrorBanner;
pub use file_info::FileInfoPanel;
pub use file_list::FileList;
pub use prefix_bar::PrefixBar;
