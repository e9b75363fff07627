//! File list component.
//!
//! One row per [`NavigableRecord`] of the current listing. Selecting a row
//! browses its request name: a directory opens its listing, a file shows its
//! metadata. A `..` row leads to the parent while below the prefix.

use icondata::Icon as IconData;
use leptos::prelude::*;
use leptos_icons::Icon;
use ndnfs_core::{NavigableRecord, Name};

use crate::app::AppContext;
use crate::components::icons as ic;

stylance::import_crate_style!(css, "src/components/browser/file_list.module.css");

fn get_icon(record: &NavigableRecord) -> IconData {
    if record.is_directory {
        ic::FOLDER
    } else {
        ic::FILE
    }
}

#[component]
pub fn FileList() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let records = ctx.view.records;
    let parent = Signal::derive(move || ctx.context.with(|c| c.parent_name()));
    let is_empty = Signal::derive(move || records.with(|r| r.is_empty()));

    view! {
        <div class=css::list role="grid" aria-label="Directory listing">
            <div class=css::listHeader role="row">
                <span class=css::headerIcon></span>
                <span class=css::headerName>"Name"</span>
                <span class=css::headerKind>"Kind"</span>
                <span class=css::headerChevron></span>
            </div>

            {move || parent.get().map(|name| view! { <ParentRow name=name /> })}

            <For
                each=move || records.get()
                key=|record| record.request_name.clone()
                children=move |record| {
                    view! { <FileListItem record=record /> }
                }
            />

            <Show when=move || is_empty.get() && !ctx.is_loading()>
                <div class=css::empty>"Nothing to show yet. Enter a prefix above."</div>
            </Show>
        </div>
    }
}

#[component]
fn ParentRow(name: Name) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let name_for_key = name.clone();
    let open = move || ctx.browse(name.clone());
    let open_on_key = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" {
            ctx.browse(name_for_key.clone());
        }
    };

    view! {
        <div
            class=css::listItem
            on:click=move |_| open()
            on:keydown=open_on_key
            role="row"
            tabindex="0"
            aria-label="Parent directory"
        >
            <span class=css::icon aria-hidden="true"><Icon icon=ic::ARROW_UP /></span>
            <span class=format!("{} {}", css::name, css::nameDir)>".."</span>
            <span class=css::kind></span>
            <span class=css::chevron></span>
        </div>
    }
}

#[component]
fn FileListItem(record: NavigableRecord) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let is_dir = record.is_directory;
    let icon = get_icon(&record);
    let request_name = record.request_name.clone();
    let request_name_for_key = record.request_name.clone();
    let title = record.request_name.to_uri();

    // selected while its metadata is on display
    let selected_name = record.request_name.clone();
    let is_selected = Signal::derive(move || {
        ctx.view
            .file
            .with(|f| f.as_ref().is_some_and(|d| d.name == selected_name))
    });

    let handle_click = move |_: leptos::ev::MouseEvent| {
        ctx.browse(request_name.clone());
    };

    let handle_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" {
            ctx.browse(request_name_for_key.clone());
        }
    };

    let name_class = if is_dir {
        format!("{} {}", css::name, css::nameDir)
    } else {
        format!("{} {}", css::name, css::nameFile)
    };

    let suffix = if is_dir { "/" } else { "" };
    let display_name = format!("{}{}", record.display_name, suffix);
    let kind = if is_dir { "Directory" } else { "File" };

    let item_class = move || {
        if is_selected.get() {
            format!("{} {}", css::listItem, css::selected)
        } else {
            css::listItem.to_string()
        }
    };

    let aria_label = if is_dir {
        format!("Folder: {}", record.display_name)
    } else {
        format!("File: {}", record.display_name)
    };

    view! {
        <div
            class=item_class
            on:click=handle_click
            on:keydown=handle_keydown
            role="row"
            tabindex="0"
            title=title
            aria-label=aria_label
            aria-selected=move || is_selected.get()
        >
            <span class=css::icon aria-hidden="true"><Icon icon=icon /></span>
            <span class=name_class>{display_name}</span>
            <span class=css::kind>{kind}</span>
            <span class=css::chevron aria-hidden="true">
                {is_dir.then(|| view! { <Icon icon=ic::CHEVRON_RIGHT /> })}
            </span>
        </div>
    }
}
