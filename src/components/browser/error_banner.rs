//! Error banner component.
//!
//! Shown above the listing when the last browse failed. The listing below
//! keeps whatever was rendered before the failure.

use leptos::prelude::*;
use leptos_icons::Icon;
use ndnfs_core::BrowseError;

use crate::app::AppContext;
use crate::components::icons as ic;

stylance::import_crate_style!(css, "src/components/browser/error_banner.module.css");

/// Extra line shown under the error message.
fn hint(error: &BrowseError) -> Option<&'static str> {
    match error {
        BrowseError::Timeout(_) => {
            Some("The server does not answer for empty directories, so this may just be empty.")
        }
        BrowseError::Transport(_) => Some("Check that the gateway is reachable."),
        BrowseError::Decode(_) | BrowseError::MalformedPath(_) => {
            Some("The server answered, but not with a listing this browser understands.")
        }
        BrowseError::InvalidPrefix(_) | BrowseError::OutsidePrefix(_) => None,
    }
}

/// Name worth requesting again after `error`.
fn retry_target(error: &BrowseError) -> Option<ndnfs_core::Name> {
    match error {
        BrowseError::Timeout(name) => Some(name.clone()),
        _ => None,
    }
}

#[component]
pub fn ErrorBanner() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let error = ctx.view.error;

    view! {
        {move || error.get().map(|err| {
            let message = err.to_string();
            let hint = hint(&err);
            let retry = retry_target(&err);

            view! {
                <div class=css::banner role="alert">
                    <span class=css::icon><Icon icon=ic::ALERT /></span>
                    <div class=css::text>
                        <span class=css::message>{message}</span>
                        {hint.map(|h| view! { <span class=css::hint>{h}</span> })}
                    </div>
                    {retry.map(|name| view! {
                        <button
                            class=css::retry
                            on:click=move |_| ctx.browse(name.clone())
                        >
                            "Retry"
                        </button>
                    })}
                    <button
                        class=css::dismiss
                        title="Dismiss"
                        on:click=move |_| ctx.view.dismiss_error()
                    >
                        <Icon icon=ic::CLOSE />
                    </button>
                </div>
            }
        })}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndnfs_core::{DecodeError, Name};

    #[test]
    fn test_timeout_mentions_empty_directory() {
        let err = BrowseError::Timeout(Name::new());
        assert!(hint(&err).unwrap().contains("empty"));
        assert_eq!(retry_target(&err), Some(Name::new()));
    }

    #[test]
    fn test_decode_error_has_no_retry() {
        let err = BrowseError::Decode(DecodeError::EmptyPath);
        assert!(hint(&err).is_some());
        assert_eq!(retry_target(&err), None);
    }
}
