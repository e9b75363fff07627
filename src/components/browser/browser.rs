//! Main browser component.
//!
//! ## Layout
//!
//! - **Desktop (> 768px)**: listing on the left, file details on the right
//! - **Mobile (< 768px)**: single column, file details below the listing

use leptos::prelude::*;

use super::{ErrorBanner, FileInfoPanel, FileList, PrefixBar};
use crate::app::AppContext;
use crate::components::status::Status;

stylance::import_crate_style!(css, "src/components/browser/browser.module.css");

/// NDNFS browser view component.
#[component]
pub fn Browser() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let has_file = Signal::derive(move || ctx.view.file.with(|f| f.is_some()));

    view! {
        <div class=css::browser>
            <PrefixBar />
            <ErrorBanner />

            <div class=css::body>
                <div class=move || {
                    if has_file.get() {
                        format!("{} {}", css::listPane, css::listPaneWithDetails)
                    } else {
                        css::listPane.to_string()
                    }
                }>
                    <FileList />
                </div>

                <Show when=move || has_file.get()>
                    <FileInfoPanel />
                </Show>
            </div>

            <Status />
        </div>
    }
}
