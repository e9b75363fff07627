//! Prefix bar component.
//!
//! Form for the root prefix, plus buttons to go up one directory and to
//! browse the current directory again.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::config::APP_NAME;
use crate::utils::dom;

stylance::import_crate_style!(css, "src/components/browser/prefix_bar.module.css");

const INPUT_ID: &str = "prefix-input";

#[component]
pub fn PrefixBar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let initial = ctx.settings.with_untracked(|s| s.prefix.clone());
    let (prefix_text, set_prefix_text) = signal(initial);

    let can_go_up = Signal::derive(move || ctx.context.with(|c| c.parent_name().is_some()));
    let loading = Signal::derive(move || ctx.is_loading());

    Effect::new(move |_| {
        dom::focus_element(&format!("#{}", INPUT_ID));
    });

    let handle_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let text = prefix_text.get_untracked();
        if !text.trim().is_empty() {
            ctx.start(text);
        }
    };

    view! {
        <header class=css::bar>
            <span class=css::brand>{APP_NAME}</span>

            <button
                class=css::iconButton
                title="Parent directory"
                disabled=move || !can_go_up.get()
                on:click=move |_| ctx.browse_parent()
            >
                <Icon icon=ic::ARROW_UP />
            </button>

            <button
                class=css::iconButton
                title="Refresh"
                on:click=move |_| ctx.refresh()
            >
                <Icon icon=ic::REFRESH />
            </button>

            <form class=css::form on:submit=handle_submit>
                <input
                    id=INPUT_ID
                    class=css::input
                    type="text"
                    spellcheck="false"
                    placeholder="/ndnfs"
                    aria-label="Root prefix"
                    prop:value=move || prefix_text.get()
                    on:input=move |ev| set_prefix_text.set(event_target_value(&ev))
                />
                <button class=css::goButton type="submit" title="Browse prefix">
                    <Icon icon=ic::SEARCH />
                </button>
            </form>

            <span
                class=move || {
                    if loading.get() {
                        format!("{} {}", css::spinner, css::spinnerActive)
                    } else {
                        css::spinner.to_string()
                    }
                }
                aria-hidden="true"
            ></span>
        </header>
    }
}
