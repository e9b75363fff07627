//! Root application module.
//!
//! Contains the App component, the [`AppContext`] shared by every component,
//! and [`ListingView`], the presenter that turns browse results into signals.

use std::rc::Rc;

use leptos::prelude::*;
use ndnfs_core::{
    BrowseError, BrowsingContext, FileDetails, NavState, NavigableRecord, Name, Navigator,
    Presenter, Session,
};
use wasm_bindgen_futures::spawn_local;

use crate::components::Browser;
use crate::config::APP_NAME;
use crate::core::{BrowserSettings, GatewayFace};
use crate::utils::dom;

// ============================================================================
// ListingView
// ============================================================================

/// Browse results as Leptos signals.
///
/// A successful listing replaces the rows and dismisses any error; a failure
/// only sets the error, so the last good listing stays visible underneath.
#[derive(Clone, Copy)]
pub struct ListingView {
    /// Rows of the last successful listing.
    pub records: RwSignal<Vec<NavigableRecord>>,
    /// Failure of the most recent browse, if it failed.
    pub error: RwSignal<Option<BrowseError>>,
    /// Metadata of the selected file.
    pub file: RwSignal<Option<FileDetails>>,
}

impl ListingView {
    pub fn new() -> Self {
        Self {
            records: RwSignal::new(Vec::new()),
            error: RwSignal::new(None),
            file: RwSignal::new(None),
        }
    }

    pub fn dismiss_error(&self) {
        self.error.set(None);
    }

    pub fn close_file(&self) {
        self.file.set(None);
    }
}

impl Default for ListingView {
    fn default() -> Self {
        Self::new()
    }
}

impl Presenter for ListingView {
    fn render(&self, records: &[NavigableRecord]) {
        self.records.set(records.to_vec());
        self.file.set(None);
        self.error.set(None);
    }

    fn clear(&self) {
        self.records.update(|rows| rows.clear());
    }

    fn show_error(&self, error: &BrowseError) {
        self.error.set(Some(error.clone()));
    }

    fn show_file(&self, details: &FileDetails) {
        self.file.set(Some(details.clone()));
        self.error.set(None);
    }
}

// ============================================================================
// AppContext
// ============================================================================

/// Browsing session driven by the gateway and presented through signals.
pub type BrowserSession = Session<GatewayFace, ListingView>;

/// Application-wide reactive context.
///
/// Provided at the root of the component tree and accessed with
/// `use_context::<AppContext>()`. `Copy` because every field is a signal or
/// a stored value handle.
#[derive(Clone, Copy)]
pub struct AppContext {
    /// What the presenter last wrote.
    pub view: ListingView,
    /// Controller state after the last completed transition.
    pub state: RwSignal<NavState>,
    /// Prefix and current directory after the last completed browse.
    pub context: RwSignal<BrowsingContext>,
    /// Number of browses still waiting for an answer.
    pub pending: RwSignal<usize>,
    pub settings: RwSignal<BrowserSettings>,
    session: StoredValue<Rc<BrowserSession>, LocalStorage>,
}

impl AppContext {
    /// Creates the context and the session behind it.
    pub fn new(settings: BrowserSettings) -> Self {
        let view = ListingView::new();
        let navigator = Navigator::with_config(
            GatewayFace::new(settings.gateway_url.clone()),
            settings.client_config(),
        );

        Self {
            view,
            state: RwSignal::new(NavState::Idle),
            context: RwSignal::new(BrowsingContext::default()),
            pending: RwSignal::new(0),
            settings: RwSignal::new(settings),
            session: StoredValue::new_local(Rc::new(Session::new(navigator, view))),
        }
    }

    /// Make `prefix_text` the root and browse it.
    pub fn start(&self, prefix_text: String) {
        self.settings.update(|settings| {
            if let Err(err) = settings.remember_prefix(&prefix_text) {
                log::warn!("could not save prefix: {}", err);
            }
        });

        let ctx = *self;
        let session = self.begin();
        spawn_local(async move {
            session.start(&prefix_text).await;
            ctx.finish(&session);
        });
    }

    /// Browse `name`, typically a row the user selected.
    pub fn browse(&self, name: Name) {
        let ctx = *self;
        let session = self.begin();
        spawn_local(async move {
            session.browse(name).await;
            ctx.finish(&session);
        });
    }

    /// Browse the directory above the current one.
    pub fn browse_parent(&self) {
        if let Some(parent) = self.context.with_untracked(|c| c.parent_name()) {
            self.browse(parent);
        }
    }

    /// Browse the current directory again.
    pub fn refresh(&self) {
        let current = self.context.with_untracked(|c| c.current_name());
        self.browse(current);
    }

    pub fn is_loading(&self) -> bool {
        self.pending.get() > 0
    }

    fn begin(&self) -> Rc<BrowserSession> {
        self.pending.update(|n| *n += 1);
        self.session.get_value()
    }

    fn finish(&self, session: &BrowserSession) {
        let context = session.context();
        dom::set_title(&format!("{} - {}", context.current_name(), APP_NAME));
        self.state.set(session.state());
        self.context.set(context);
        self.pending.update(|n| *n = n.saturating_sub(1));
    }
}

/// Root application component with error boundary.
///
/// Loads the persisted settings, provides the [`AppContext`] and issues the
/// first browse for the remembered prefix.
#[component]
pub fn App() -> impl IntoView {
    let settings = BrowserSettings::load();
    let initial_prefix = settings.prefix.clone();

    let ctx = AppContext::new(settings);
    provide_context(ctx);
    ctx.start(initial_prefix);

    view! {
        <ErrorBoundary
            fallback=|errors| view! {
                <div style="padding: 2rem; font-family: monospace;">
                    <h1>"Something went wrong"</h1>
                    <ul>
                        {move || errors.get()
                            .into_iter()
                            .map(|(_, e)| view! { <li>{e.to_string()}</li> })
                            .collect::<Vec<_>>()
                        }
                    </ul>
                    <button on:click=move |_| {
                        if let Some(window) = dom::window() {
                            let _ = window.location().reload();
                        }
                    }>
                        "Reload Page"
                    </button>
                </div>
            }
        >
            <Browser />
        </ErrorBoundary>
    }
}
