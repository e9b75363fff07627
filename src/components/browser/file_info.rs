//! File details panel.
//!
//! Shows the `FileInfo` record the server returns for a file name. Content
//! itself is not fetched; the gateway link points at the metadata request.

use leptos::prelude::*;
use leptos_icons::Icon;
use ndnfs_core::FileDetails;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::core::gateway_url;
use crate::utils::format::{format_date_iso, format_segments, format_size};

stylance::import_crate_style!(css, "src/components/browser/file_info.module.css");

/// Label/value rows for `details`.
fn detail_rows(details: &FileDetails) -> Vec<(&'static str, String)> {
    let info = details.info;
    vec![
        ("Name", details.name.to_uri()),
        ("Size", format_size(u64::from(info.size))),
        ("Segments", format_segments(info.total_segments)),
        (
            "Version",
            format!(
                "{} ({})",
                info.version,
                format_date_iso(u64::from(info.version))
            ),
        ),
    ]
}

fn leaf_name(details: &FileDetails) -> String {
    details
        .name
        .components()
        .last()
        .map(|c| c.to_text())
        .unwrap_or_else(|| "/".to_string())
}

#[component]
pub fn FileInfoPanel() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    view! {
        {move || ctx.view.file.get().map(|details| {
            let title = leaf_name(&details);
            let rows = detail_rows(&details);
            let link = ctx
                .settings
                .with_untracked(|s| gateway_url(&s.gateway_url, &details.name));

            view! {
                <aside class=css::panel aria-label="File details">
                    <header class=css::header>
                        <span class=css::icon><Icon icon=ic::INFO /></span>
                        <span class=css::title>{title}</span>
                        <button
                            class=css::close
                            title="Close"
                            on:click=move |_| ctx.view.close_file()
                        >
                            <Icon icon=ic::CLOSE />
                        </button>
                    </header>
                    <dl class=css::rows>
                        {rows.into_iter().map(|(label, value)| view! {
                            <dt class=css::label>{label}</dt>
                            <dd class=css::value>{value}</dd>
                        }).collect_view()}
                    </dl>
                    <a class=css::link href=link.clone() target="_blank" rel="noopener">
                        {link.clone()}
                    </a>
                </aside>
            }
        })}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndnfs_core::FileInfo;

    fn details() -> FileDetails {
        FileDetails {
            name: "/ndnfs/docs/report.pdf".parse().unwrap(),
            info: FileInfo {
                size: 2_500_000,
                total_segments: 306,
                version: 1704067200,
            },
        }
    }

    #[test]
    fn test_detail_rows() {
        let rows = detail_rows(&details());
        assert_eq!(rows[1], ("Size", "2.5M".to_string()));
        assert_eq!(rows[2], ("Segments", "306 segments".to_string()));
        assert_eq!(rows[3], ("Version", "1704067200 (2024-01-01)".to_string()));
    }

    #[test]
    fn test_leaf_name() {
        assert_eq!(leaf_name(&details()), "report.pdf");
    }
}
