//! Browse state machine.
//!
//! [`Navigator`] is stateless: it takes a [`BrowsingContext`] in and hands the
//! next one back, so any number of sessions can share it. [`Session`] wraps a
//! navigator with the mutable pieces a front end needs: the current context,
//! the [`NavState`], and a [`Presenter`].
//!
//! The view is only replaced after a successful decode. A failed browse
//! reports through [`Presenter::show_error`] and leaves the last listing on
//! screen.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::client::{ClientConfig, ContentKind, Face, RequestClient, Response};
use crate::codec::{self, DirectoryEntry, DirectoryListing, FileInfo};
use crate::error::BrowseError;
use crate::name::{Component, Name};
use crate::path;

/// Leaf name the server may list for a directory itself.
const SELF_ENTRY: &str = ".";

/// Where a session is browsing: the root prefix and the directory below it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowsingContext {
    prefix: Name,
    /// Components after the prefix, empty at the root.
    directory: Name,
}

impl BrowsingContext {
    pub fn new(prefix: Name) -> Self {
        Self {
            prefix,
            directory: Name::new(),
        }
    }

    pub fn prefix(&self) -> &Name {
        &self.prefix
    }

    /// Current directory relative to the prefix.
    pub fn directory(&self) -> &Name {
        &self.directory
    }

    /// Current directory as a `/`-joined path without leading separator.
    ///
    /// For display only: components are shown as text, so this is lossy for
    /// components holding a `/` or non-UTF-8 bytes.
    pub fn current_directory(&self) -> String {
        self.directory
            .components()
            .iter()
            .map(Component::to_text)
            .collect::<Vec<_>>()
            .join("/")
    }

    pub fn with_directory(mut self, directory: Name) -> Self {
        self.directory = directory;
        self
    }

    /// Set the directory from a `/`-separated path such as `photos/2014`.
    pub fn with_current_directory(self, path: &str) -> Self {
        self.with_directory(Name::new().append_path(path))
    }

    /// Name of the current directory.
    pub fn current_name(&self) -> Name {
        self.prefix.clone().join(&self.directory)
    }

    /// Name of the directory above the current one, `None` at the prefix.
    pub fn parent_name(&self) -> Option<Name> {
        let depth = self.directory.len().checked_sub(1)?;
        Some(self.prefix.clone().join(&self.directory.prefix(depth)))
    }
}

/// One row ready for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigableRecord {
    pub display_name: String,
    /// Name to browse when this row is selected.
    pub request_name: Name,
    pub is_directory: bool,
}

impl NavigableRecord {
    /// Build the record for `entry`. Returns `None` for the `.` entry.
    pub fn from_entry(
        context: &BrowsingContext,
        entry: &DirectoryEntry,
    ) -> Result<Option<Self>, BrowseError> {
        let (directory, leaf) = path::split(&entry.path)?;
        if leaf == SELF_ENTRY {
            return Ok(None);
        }
        Ok(Some(Self {
            display_name: leaf.to_string(),
            request_name: path::compose_request_name(context.prefix(), directory, leaf),
            is_directory: entry.entry_type.is_directory(),
        }))
    }
}

/// Metadata shown when a file is selected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDetails {
    pub name: Name,
    pub info: FileInfo,
}

/// Controller state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum NavState {
    #[default]
    Idle,
    /// A request for this name is in flight.
    AwaitingResponse(Name),
    Rendered,
    Error(BrowseError),
}

/// Decoded result of a successful browse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BrowseOutput {
    Listing(Vec<NavigableRecord>),
    File(FileDetails),
}

/// Outcome of [`Navigator::browse`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigation {
    /// Context to use for the next browse. Unchanged on failure.
    pub context: BrowsingContext,
    pub result: Result<BrowseOutput, BrowseError>,
}

pub struct Navigator<F> {
    client: RequestClient<F>,
}

impl<F: Face> Navigator<F> {
    pub fn new(face: F) -> Self {
        Self::with_config(face, ClientConfig::default())
    }

    pub fn with_config(face: F, config: ClientConfig) -> Self {
        Self {
            client: RequestClient::with_config(face, config),
        }
    }

    pub fn client(&self) -> &RequestClient<F> {
        &self.client
    }

    /// Request `name` and decode the answer.
    ///
    /// A listing moves the returned context into the requested directory. A
    /// file-info answer keeps the directory as it was. Any failure returns
    /// `context` untouched.
    pub async fn browse(&self, context: BrowsingContext, name: &Name) -> Navigation {
        let Some(directory) = path::directory_of(context.prefix(), name) else {
            warn!("refusing to browse {} outside {}", name, context.prefix());
            return Navigation {
                context,
                result: Err(BrowseError::OutsidePrefix(name.clone())),
            };
        };

        match self.fetch(&context, name).await {
            Ok(BrowseOutput::Listing(records)) => Navigation {
                context: context.with_directory(directory),
                result: Ok(BrowseOutput::Listing(records)),
            },
            result => Navigation { context, result },
        }
    }

    async fn fetch(
        &self,
        context: &BrowsingContext,
        name: &Name,
    ) -> Result<BrowseOutput, BrowseError> {
        let data = match self.client.request(name).await {
            Response::Data(data) => data,
            Response::Timeout => return Err(BrowseError::Timeout(name.clone())),
            Response::TransportError(err) => return Err(BrowseError::Transport(err)),
        };

        match data.content_kind() {
            ContentKind::FileInfo { .. } => {
                let info = codec::decode_file_info(&data.content)?;
                debug!("file info for {}: {:?}", name, info);
                Ok(BrowseOutput::File(FileDetails {
                    name: name.clone(),
                    info,
                }))
            }
            ContentKind::Listing { .. } | ContentKind::Unmarked => {
                let listing = codec::decode_listing(&data.content)?;
                debug!("decoded {} entries for {}", listing.len(), name);
                Self::normalize(context, &listing).map(BrowseOutput::Listing)
            }
        }
    }

    /// Turn decoded entries into display records, dropping the `.` entry.
    ///
    /// Fails on the first entry with a malformed path.
    pub fn normalize(
        context: &BrowsingContext,
        listing: &DirectoryListing,
    ) -> Result<Vec<NavigableRecord>, BrowseError> {
        listing
            .iter()
            .filter_map(|entry| NavigableRecord::from_entry(context, entry).transpose())
            .collect()
    }
}

/// Receives browse results for display.
pub trait Presenter {
    /// Replace the view with `records`.
    fn render(&self, records: &[NavigableRecord]);
    fn clear(&self);
    fn show_error(&self, error: &BrowseError);
    fn show_file(&self, details: &FileDetails);
}

impl<P: Presenter + ?Sized> Presenter for Rc<P> {
    fn render(&self, records: &[NavigableRecord]) {
        (**self).render(records)
    }

    fn clear(&self) {
        (**self).clear()
    }

    fn show_error(&self, error: &BrowseError) {
        (**self).show_error(error)
    }

    fn show_file(&self, details: &FileDetails) {
        (**self).show_file(details)
    }
}

impl<P: Presenter + ?Sized> Presenter for &P {
    fn render(&self, records: &[NavigableRecord]) {
        (**self).render(records)
    }

    fn clear(&self) {
        (**self).clear()
    }

    fn show_error(&self, error: &BrowseError) {
        (**self).show_error(error)
    }

    fn show_file(&self, details: &FileDetails) {
        (**self).show_file(details)
    }
}

struct SessionState {
    context: BrowsingContext,
    state: NavState,
}

/// A browsing session driving a presenter.
///
/// Browses may overlap. Each completion writes the context and the view, so
/// whichever finishes last is what the user sees, even if it was requested
/// first. A completion that belongs to a prefix replaced by [`start`](Self::start)
/// is dropped: it touches neither the context, the state nor the presenter.
pub struct Session<F, P> {
    navigator: Navigator<F>,
    presenter: P,
    inner: RefCell<SessionState>,
}

impl<F: Face, P: Presenter> Session<F, P> {
    pub fn new(navigator: Navigator<F>, presenter: P) -> Self {
        Self {
            navigator,
            presenter,
            inner: RefCell::new(SessionState {
                context: BrowsingContext::default(),
                state: NavState::Idle,
            }),
        }
    }

    /// Parse `root_prefix_text`, make it the session root and browse it.
    pub async fn start(&self, root_prefix_text: &str) {
        let prefix: Name = match root_prefix_text.parse() {
            Ok(prefix) => prefix,
            Err(err) => {
                let error = BrowseError::InvalidPrefix(err);
                warn!("{}", error);
                self.inner.borrow_mut().state = NavState::Error(error.clone());
                self.presenter.show_error(&error);
                return;
            }
        };

        info!("browsing prefix {}", prefix);
        self.inner.borrow_mut().context = BrowsingContext::new(prefix.clone());
        self.browse(prefix).await;
    }

    /// Browse `name` and hand the result to the presenter.
    pub async fn browse(&self, name: Name) {
        let context = {
            let mut inner = self.inner.borrow_mut();
            inner.state = NavState::AwaitingResponse(name.clone());
            inner.context.clone()
        };

        let navigation = self.navigator.browse(context, &name).await;

        let outcome = {
            let mut inner = self.inner.borrow_mut();
            if inner.context.prefix() != navigation.context.prefix() {
                debug!(
                    "dropping {}: prefix changed to {} while in flight",
                    name,
                    inner.context.prefix()
                );
                return;
            }
            match navigation.result {
                Ok(output) => {
                    inner.context = navigation.context;
                    inner.state = NavState::Rendered;
                    Ok(output)
                }
                Err(error) => {
                    inner.state = NavState::Error(error.clone());
                    Err(error)
                }
            }
        };

        match outcome {
            Ok(BrowseOutput::Listing(records)) => {
                self.presenter.clear();
                self.presenter.render(&records);
            }
            Ok(BrowseOutput::File(details)) => self.presenter.show_file(&details),
            Err(error) => {
                warn!("browse {} failed: {}", name, error);
                self.presenter.show_error(&error);
            }
        }
    }

    pub fn state(&self) -> NavState {
        self.inner.borrow().state.clone()
    }

    pub fn context(&self) -> BrowsingContext {
        self.inner.borrow().context.clone()
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn navigator(&self) -> &Navigator<F> {
        &self.navigator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{Data, Interest};
    use crate::codec::EntryType;
    use crate::error::DecodeError;
    use crate::testing::{MemoryFace, PresenterEvent, RecordingPresenter};
    use std::collections::HashMap;
    use std::future::{Future, poll_fn};
    use std::pin::pin;
    use std::task::{Context, Poll, Waker};

    fn name(uri: &str) -> Name {
        uri.parse().unwrap()
    }

    fn sample_face() -> MemoryFace {
        MemoryFace::new(name("/ndnfs"))
            .with_directory("/photos", 1)
            .with_file(
                "/readme.txt",
                FileInfo {
                    size: 12,
                    total_segments: 1,
                    version: 5,
                },
            )
            .with_file(
                "/photos/cat.jpg",
                FileInfo {
                    size: 4096,
                    total_segments: 1,
                    version: 9,
                },
            )
    }

    #[test]
    fn test_parent_name() {
        let root = BrowsingContext::new(name("/ndnfs"));
        assert_eq!(root.parent_name(), None);
        assert_eq!(
            root.clone().with_current_directory("photos").parent_name(),
            Some(name("/ndnfs"))
        );
        assert_eq!(
            root.with_current_directory("photos/2014").parent_name(),
            Some(name("/ndnfs/photos"))
        );
    }

    #[test]
    fn test_normalize_filters_self_entry() {
        let context = BrowsingContext::new(name("/ndnfs"));
        let listing = DirectoryListing::new(vec![
            DirectoryEntry::directory("/a/."),
            DirectoryEntry::directory("/a/b"),
        ]);

        let records = Navigator::<MemoryFace>::normalize(&context, &listing).unwrap();
        assert_eq!(
            records,
            vec![NavigableRecord {
                display_name: "b".into(),
                request_name: name("/ndnfs/a/b"),
                is_directory: true,
            }]
        );
    }

    #[test]
    fn test_normalize_rejects_malformed_path() {
        let context = BrowsingContext::new(name("/ndnfs"));
        let listing = DirectoryListing::new(vec![
            DirectoryEntry::file("/ok.txt"),
            DirectoryEntry::new("relative.txt", EntryType::File),
        ]);
        assert!(matches!(
            Navigator::<MemoryFace>::normalize(&context, &listing),
            Err(BrowseError::MalformedPath(_))
        ));
    }

    #[tokio::test]
    async fn test_browse_root_listing() {
        let navigator = Navigator::new(sample_face());
        let context = BrowsingContext::new(name("/ndnfs"));

        let navigation = navigator.browse(context.clone(), &name("/ndnfs")).await;
        assert_eq!(navigation.context, context);
        let records = match navigation.result {
            Ok(BrowseOutput::Listing(records)) => records,
            other => panic!("expected listing, got {other:?}"),
        };
        let rows: Vec<_> = records
            .iter()
            .map(|r| (r.request_name.to_uri(), r.is_directory))
            .collect();
        assert_eq!(
            rows,
            [
                ("/ndnfs/photos".to_string(), true),
                ("/ndnfs/readme.txt".to_string(), false)
            ]
        );
    }

    #[tokio::test]
    async fn test_browse_moves_into_subdirectory() {
        let navigator = Navigator::new(sample_face());
        let context = BrowsingContext::new(name("/ndnfs"));

        let navigation = navigator.browse(context, &name("/ndnfs/photos")).await;
        assert_eq!(navigation.context.current_directory(), "photos");
        assert_eq!(navigation.context.current_name(), name("/ndnfs/photos"));
        assert!(matches!(
            navigation.result,
            Ok(BrowseOutput::Listing(ref records)) if records[0].display_name == "cat.jpg"
        ));
    }

    #[tokio::test]
    async fn test_file_keeps_directory() {
        let navigator = Navigator::new(sample_face());
        let context = BrowsingContext::new(name("/ndnfs")).with_current_directory("photos");

        let navigation = navigator
            .browse(context.clone(), &name("/ndnfs/photos/cat.jpg"))
            .await;
        assert_eq!(navigation.context, context);
        assert_eq!(
            navigation.result,
            Ok(BrowseOutput::File(FileDetails {
                name: name("/ndnfs/photos/cat.jpg"),
                info: FileInfo {
                    size: 4096,
                    total_segments: 1,
                    version: 9,
                },
            }))
        );
    }

    #[tokio::test]
    async fn test_failure_returns_context_unchanged() {
        let face = sample_face()
            .with_response(
                name("/ndnfs/photos"),
                Data::new(name("/ndnfs/photos"), vec![0x0A, 0x05]),
            )
            .with_failure(name("/ndnfs/down"), "connection reset");
        let navigator = Navigator::new(face);
        let context = BrowsingContext::new(name("/ndnfs")).with_current_directory("photos");

        let missing = navigator.browse(context.clone(), &name("/ndnfs/nope")).await;
        assert_eq!(missing.context, context);
        assert_eq!(
            missing.result,
            Err(BrowseError::Timeout(name("/ndnfs/nope")))
        );

        let garbled = navigator.browse(context.clone(), &name("/ndnfs/photos")).await;
        assert_eq!(garbled.context, context);
        assert!(matches!(
            garbled.result,
            Err(BrowseError::Decode(DecodeError::Wire(_)))
        ));

        let down = navigator.browse(context.clone(), &name("/ndnfs/down")).await;
        assert_eq!(
            down.result,
            Err(BrowseError::Transport("connection reset".into()))
        );
    }

    #[tokio::test]
    async fn test_outside_prefix_never_expressed() {
        let face = sample_face();
        let navigator = Navigator::new(&face);
        let context = BrowsingContext::new(name("/ndnfs"));

        let navigation = navigator.browse(context, &name("/other/photos")).await;
        assert_eq!(
            navigation.result,
            Err(BrowseError::OutsidePrefix(name("/other/photos")))
        );
        assert!(face.expressed().is_empty());
    }

    #[tokio::test]
    async fn test_session_clear_on_success_only() {
        let presenter = Rc::new(RecordingPresenter::default());
        let session = Session::new(Navigator::new(sample_face()), presenter.clone());

        session.start("/ndnfs").await;
        assert_eq!(session.state(), NavState::Rendered);
        assert!(matches!(
            presenter.events().as_slice(),
            [PresenterEvent::Cleared, PresenterEvent::Rendered(records)] if records.len() == 2
        ));

        session.browse(name("/ndnfs/missing")).await;
        assert_eq!(
            session.state(),
            NavState::Error(BrowseError::Timeout(name("/ndnfs/missing")))
        );
        assert_eq!(session.context().current_directory(), "");
        // previous listing stays up
        assert_eq!(presenter.events().len(), 3);
        assert_eq!(presenter.last_listing().map(|r| r.len()), Some(2));
    }

    #[tokio::test]
    async fn test_session_rejects_bad_prefix() {
        let presenter = Rc::new(RecordingPresenter::default());
        let face = sample_face();
        let session = Session::new(Navigator::new(&face), presenter.clone());

        session.start("/nd%zz").await;
        assert!(matches!(
            session.state(),
            NavState::Error(BrowseError::InvalidPrefix(_))
        ));
        assert!(face.expressed().is_empty());
        assert!(matches!(
            presenter.events().as_slice(),
            [PresenterEvent::Error(BrowseError::InvalidPrefix(_))]
        ));
    }

    #[tokio::test]
    async fn test_session_shows_file() {
        let presenter = Rc::new(RecordingPresenter::default());
        let session = Session::new(Navigator::new(sample_face()), presenter.clone());

        session.start("/ndnfs").await;
        session.browse(name("/ndnfs/readme.txt")).await;
        assert_eq!(session.state(), NavState::Rendered);
        assert!(matches!(
            presenter.events().last(),
            Some(PresenterEvent::File(details)) if details.info.version == 5
        ));
        assert_eq!(session.context().current_directory(), "");
    }

    /// Face whose answers are released by the test.
    #[derive(Default)]
    struct GatedFace {
        released: RefCell<HashMap<Name, Response>>,
    }

    impl GatedFace {
        fn release(&self, name: Name, response: Response) {
            self.released.borrow_mut().insert(name, response);
        }
    }

    impl Face for GatedFace {
        async fn express_interest(&self, interest: Interest) -> Response {
            poll_fn(|_| match self.released.borrow_mut().remove(&interest.name) {
                Some(response) => Poll::Ready(response),
                None => Poll::Pending,
            })
            .await
        }
    }

    fn listing_of(dir: &str, entries: &[&str]) -> Response {
        let listing: DirectoryListing = entries
            .iter()
            .map(|path| DirectoryEntry::file(*path))
            .collect();
        Response::Data(Data::new(
            name("/ndnfs").append_path(dir),
            codec::encode_listing(&listing),
        ))
    }

    #[test]
    fn test_awaiting_response_while_in_flight() {
        let face = GatedFace::default();
        let presenter = RecordingPresenter::default();
        let session = Session::new(Navigator::new(&face), &presenter);
        let mut cx = Context::from_waker(Waker::noop());

        let mut start = pin!(session.start("/ndnfs"));
        assert!(start.as_mut().poll(&mut cx).is_pending());
        assert_eq!(session.state(), NavState::AwaitingResponse(name("/ndnfs")));

        face.release(name("/ndnfs"), listing_of("", &["/a.txt"]));
        assert!(start.as_mut().poll(&mut cx).is_ready());
        assert_eq!(session.state(), NavState::Rendered);
    }

    #[test]
    fn test_overlapping_browses_last_completion_wins() {
        let face = GatedFace::default();
        let presenter = RecordingPresenter::default();
        let session = Session::new(Navigator::new(&face), &presenter);
        let mut cx = Context::from_waker(Waker::noop());

        face.release(name("/ndnfs"), listing_of("", &["/a", "/b"]));
        assert!(pin!(session.start("/ndnfs")).poll(&mut cx).is_ready());

        let mut first = pin!(session.browse(name("/ndnfs/a")));
        let mut second = pin!(session.browse(name("/ndnfs/b")));
        assert!(first.as_mut().poll(&mut cx).is_pending());
        assert!(second.as_mut().poll(&mut cx).is_pending());
        assert_eq!(
            session.state(),
            NavState::AwaitingResponse(name("/ndnfs/b"))
        );

        face.release(name("/ndnfs/b"), listing_of("b", &["/b/two.txt"]));
        assert!(second.as_mut().poll(&mut cx).is_ready());
        assert_eq!(session.context().current_directory(), "b");

        face.release(name("/ndnfs/a"), listing_of("a", &["/a/one.txt"]));
        assert!(first.as_mut().poll(&mut cx).is_ready());
        assert_eq!(session.context().current_directory(), "a");
        assert_eq!(
            presenter.last_listing().unwrap()[0].request_name,
            name("/ndnfs/a/one.txt")
        );
    }

    #[test]
    fn test_restart_ignores_stale_completion() {
        let face = GatedFace::default();
        let presenter = RecordingPresenter::default();
        let session = Session::new(Navigator::new(&face), &presenter);
        let mut cx = Context::from_waker(Waker::noop());

        face.release(name("/ndnfs"), listing_of("", &["/a"]));
        assert!(pin!(session.start("/ndnfs")).poll(&mut cx).is_ready());

        let mut stale = pin!(session.browse(name("/ndnfs/a")));
        assert!(stale.as_mut().poll(&mut cx).is_pending());

        let mut restart = pin!(session.start("/other"));
        assert!(restart.as_mut().poll(&mut cx).is_pending());

        let seen = presenter.events().len();
        face.release(name("/ndnfs/a"), listing_of("a", &["/a/x"]));
        assert!(stale.as_mut().poll(&mut cx).is_ready());
        assert_eq!(session.context().prefix(), &name("/other"));
        assert_eq!(session.context().current_directory(), "");
        assert_eq!(
            session.state(),
            NavState::AwaitingResponse(name("/other"))
        );
        assert_eq!(presenter.events().len(), seen);

        face.release(
            name("/other"),
            Response::Data(Data::new(
                name("/other"),
                codec::encode_listing(&DirectoryListing::new(vec![DirectoryEntry::file(
                    "/y.txt",
                )])),
            )),
        );
        assert!(restart.as_mut().poll(&mut cx).is_ready());
        assert_eq!(session.state(), NavState::Rendered);
        let rows = presenter.last_listing().unwrap();
        assert!(rows.iter().all(|r| r.request_name.starts_with(&name("/other"))));
    }

    #[test]
    fn test_stale_failure_is_dropped_after_restart() {
        let face = GatedFace::default();
        let presenter = RecordingPresenter::default();
        let session = Session::new(Navigator::new(&face), &presenter);
        let mut cx = Context::from_waker(Waker::noop());

        face.release(name("/ndnfs"), listing_of("", &["/a"]));
        assert!(pin!(session.start("/ndnfs")).poll(&mut cx).is_ready());

        let mut stale = pin!(session.browse(name("/ndnfs/a")));
        assert!(stale.as_mut().poll(&mut cx).is_pending());
        let mut restart = pin!(session.start("/other"));
        assert!(restart.as_mut().poll(&mut cx).is_pending());

        face.release(name("/ndnfs/a"), Response::Timeout);
        assert!(stale.as_mut().poll(&mut cx).is_ready());
        assert_eq!(presenter.last_error(), None);
        assert_eq!(
            session.state(),
            NavState::AwaitingResponse(name("/other"))
        );
    }

    #[tokio::test]
    async fn test_directory_keeps_escaped_components() {
        let odd = name("/ndnfs/a%2Fb/%FF");
        let face = MemoryFace::new(name("/ndnfs"))
            .with_response(odd.clone(), Data::new(odd.clone(), Vec::new()));
        let navigator = Navigator::new(face);

        let navigation = navigator
            .browse(BrowsingContext::new(name("/ndnfs")), &odd)
            .await;
        assert!(navigation.result.is_ok());
        assert_eq!(navigation.context.directory().len(), 2);
        assert_eq!(navigation.context.current_name(), odd);
        assert_eq!(
            navigation.context.parent_name(),
            Some(name("/ndnfs/a%2Fb"))
        );
    }
}
