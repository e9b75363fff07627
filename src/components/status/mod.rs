//! Status bar component.
//!
//! Displays the browsing prefix, the current location, the gateway and the
//! controller state.

use leptos::prelude::*;
use leptos_icons::Icon;
use ndnfs_core::NavState;

use crate::app::AppContext;
use crate::components::icons as ic;

stylance::import_crate_style!(css, "src/components/status/status.module.css");

/// Short label for the controller state.
fn state_label(state: &NavState, pending: usize) -> &'static str {
    if pending > 0 {
        return "Loading";
    }
    match state {
        NavState::Idle => "Idle",
        NavState::AwaitingResponse(_) => "Loading",
        NavState::Rendered => "Ready",
        NavState::Error(_) => "Error",
    }
}

/// Host part of a gateway URL, for compact display.
fn gateway_host(url: &str) -> &str {
    let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    without_scheme.split('/').next().unwrap_or(without_scheme)
}

/// Status bar displaying prefix, location and gateway.
///
/// ## Responsive behavior
///
/// | Breakpoint | Display |
/// |------------|---------|
/// | Desktop (> 768px) | Full labels: `Prefix: /ndnfs \| Location: /ndnfs/photos \| Gateway: host` |
/// | Mobile (< 768px) | Values only, gateway hidden |
#[component]
pub fn Status() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");

    let prefix = Signal::derive(move || ctx.context.with(|c| c.prefix().to_uri()));
    let location = Signal::derive(move || ctx.context.with(|c| c.current_name().to_uri()));
    let gateway = Signal::derive(move || {
        ctx.settings
            .with(|s| gateway_host(&s.gateway_url).to_string())
    });
    let state = Signal::derive(move || {
        let pending = ctx.pending.get();
        ctx.state.with(|s| state_label(s, pending))
    });

    view! {
        <footer class=css::bar>
            <div class=css::section>
                <span class=css::label>
                    <span class=css::labelText>"Prefix:"</span>
                    <span class=css::value>{prefix}</span>
                </span>

                <span class=css::labelCyan>
                    <span class=css::labelText>"Location:"</span>
                    <span class=css::labelIcon><Icon icon=ic::LOCATION /></span>
                    <span class=css::value>{location}</span>
                </span>

                <span class=css::labelPurple>
                    <span class=css::labelText>"Gateway:"</span>
                    <span class=css::labelIcon><Icon icon=ic::NETWORK /></span>
                    <span class=css::value>{gateway}</span>
                </span>
            </div>

            <span class=css::state>{state}</span>
        </footer>
    }
}
