mod app;
mod components;
mod config;
mod core;
mod utils;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    utils::logger::init(config::LOG_LEVEL);
    log::info!("{} {}", config::APP_NAME, env!("CARGO_PKG_VERSION"));

    let Some(root) = utils::dom::mount_root(config::MOUNT_ELEMENT_ID) else {
        log::error!("no #{} element to mount into", config::MOUNT_ELEMENT_ID);
        return;
    };

    mount_to(root, App).forget();
}
