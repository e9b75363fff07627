//! Centralized icon definitions.
//!
//! Icon theme is configured in `config.rs` via `ICON_THEME`.
//! This module maps semantic icon names to the selected theme's icons.

use icondata::Icon;

use crate::config::IconTheme;

// =============================================================================
// Theme Imports
// =============================================================================

mod lucide {
    pub use icondata::{
        LuArrowUp as ArrowUp, LuChevronRight as ChevronRight, LuCircleAlert as Alert,
        LuFile as File, LuFolder as Folder, LuGlobe as Network, LuInfo as Info,
        LuMapPin as Location, LuRefreshCw as Refresh, LuSearch as Search, LuX as Close,
    };
}

mod bootstrap {
    pub use icondata::{
        BsArrowClockwise as Refresh, BsArrowUp as ArrowUp, BsChevronRight as ChevronRight,
        BsExclamationCircle as Alert, BsFileEarmark as File, BsFolderFill as Folder,
        BsGeoAltFill as Location, BsGlobe as Network, BsInfoCircle as Info,
        BsSearch as Search, BsXLg as Close,
    };
}

// =============================================================================
// Icon Constants (selected based on theme)
// =============================================================================

macro_rules! themed_icon {
    ($name:ident, $theme_name:ident) => {
        pub const $name: Icon = match crate::config::ICON_THEME {
            IconTheme::Lucide => lucide::$theme_name,
            IconTheme::Bootstrap => bootstrap::$theme_name,
        };
    };
}

themed_icon!(ALERT, Alert);
themed_icon!(ARROW_UP, ArrowUp);
themed_icon!(CHEVRON_RIGHT, ChevronRight);
themed_icon!(CLOSE, Close);
themed_icon!(FILE, File);
themed_icon!(FOLDER, Folder);
themed_icon!(INFO, Info);
themed_icon!(LOCATION, Location);
themed_icon!(NETWORK, Network);
themed_icon!(REFRESH, Refresh);
themed_icon!(SEARCH, Search);
