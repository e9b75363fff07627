//! In-memory collaborators for tests.
//!
//! [`MemoryFace`] models an NDNFS server: a tree of directories and files
//! under a prefix. Like the real server it answers a directory with a
//! `%C1.FS.dir` listing of its children and a file with a `%C1.FS.file`
//! record, and it sends nothing at all for a missing path or an empty
//! directory, which the requester sees as a timeout.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::client::{Data, Face, Interest, Response};
use crate::codec::{self, DirectoryEntry, DirectoryListing, EntryType, FileInfo};
use crate::error::BrowseError;
use crate::name::{Component, DIRECTORY_MARKER, FILE_MARKER, Name};
use crate::navigator::{FileDetails, NavigableRecord, Presenter};

#[derive(Clone, Debug)]
enum Node {
    Directory { mtime: u64 },
    File(FileInfo),
}

/// Scripted NDNFS server.
pub struct MemoryFace {
    prefix: Name,
    /// Insertion order is listing order.
    nodes: Vec<(String, Node)>,
    responses: HashMap<Name, Data>,
    failures: HashMap<Name, String>,
    expressed: RefCell<Vec<Interest>>,
}

impl MemoryFace {
    /// Empty filesystem served under `prefix`.
    pub fn new(prefix: Name) -> Self {
        Self {
            prefix,
            nodes: vec![("/".to_string(), Node::Directory { mtime: 0 })],
            responses: HashMap::new(),
            failures: HashMap::new(),
            expressed: RefCell::new(Vec::new()),
        }
    }

    /// Add a directory, creating missing parents.
    pub fn with_directory(mut self, path: &str, mtime: u64) -> Self {
        self.insert(path, Node::Directory { mtime });
        self
    }

    /// Add a file, creating missing parents.
    pub fn with_file(mut self, path: &str, info: FileInfo) -> Self {
        self.insert(path, Node::File(info));
        self
    }

    /// Answer `name` with `data` verbatim, bypassing the tree.
    pub fn with_response(mut self, name: Name, data: Data) -> Self {
        self.responses.insert(name, data);
        self
    }

    /// Fail requests for `name` at the transport level.
    pub fn with_failure(mut self, name: Name, message: impl Into<String>) -> Self {
        self.failures.insert(name, message.into());
        self
    }

    pub fn prefix(&self) -> &Name {
        &self.prefix
    }

    /// Interests received so far, oldest first.
    pub fn expressed(&self) -> Vec<Interest> {
        self.expressed.borrow().clone()
    }

    fn insert(&mut self, path: &str, node: Node) {
        let path = normalize_path(path);
        if path != "/" {
            let parent = parent_of(&path);
            if self.node(&parent).is_none() {
                self.insert(&parent, Node::Directory { mtime: 0 });
            }
        }
        match self.nodes.iter_mut().find(|(p, _)| *p == path) {
            Some((_, existing)) => *existing = node,
            None => self.nodes.push((path, node)),
        }
    }

    fn node(&self, path: &str) -> Option<&Node> {
        self.nodes.iter().find(|(p, _)| p == path).map(|(_, n)| n)
    }

    fn listing(&self, directory: &str) -> DirectoryListing {
        self.nodes
            .iter()
            .filter(|(path, _)| path != "/" && parent_of(path) == directory)
            .map(|(path, node)| {
                let entry_type = match node {
                    Node::Directory { .. } => EntryType::Directory,
                    Node::File(_) => EntryType::File,
                };
                DirectoryEntry::new(path.clone(), entry_type)
            })
            .collect()
    }

    /// What the server sends for `name`, if anything.
    fn answer(&self, name: &Name) -> Option<Data> {
        if let Some(data) = self.responses.get(name) {
            return Some(data.clone());
        }

        let suffix = name.suffix_after(&self.prefix)?;
        let path = format!(
            "/{}",
            suffix
                .iter()
                .map(Component::to_text)
                .collect::<Vec<_>>()
                .join("/")
        );

        match self.node(&path)? {
            Node::Directory { mtime } => {
                let listing = self.listing(&path);
                if listing.is_empty() {
                    return None;
                }
                let data_name = name
                    .clone()
                    .append(DIRECTORY_MARKER)
                    .append(Component::version(*mtime));
                Some(Data::new(data_name, codec::encode_listing(&listing)))
            }
            Node::File(info) => {
                let data_name = name
                    .clone()
                    .append(FILE_MARKER)
                    .append(Component::version(u64::from(info.version)));
                Some(Data::new(data_name, codec::encode_file_info(info)))
            }
        }
    }
}

impl Face for MemoryFace {
    async fn express_interest(&self, interest: Interest) -> Response {
        self.expressed.borrow_mut().push(interest.clone());

        if let Some(message) = self.failures.get(&interest.name) {
            return Response::TransportError(message.clone());
        }
        match self.answer(&interest.name) {
            Some(data) => Response::Data(data),
            None => Response::Timeout,
        }
    }
}

fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_matches('/');
    format!("/{}", trimmed)
}

fn parent_of(path: &str) -> String {
    match path.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(idx) => path[..idx].to_string(),
    }
}

/// A call received by [`RecordingPresenter`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PresenterEvent {
    Cleared,
    Rendered(Vec<NavigableRecord>),
    Error(BrowseError),
    File(FileDetails),
}

/// Presenter that records every call.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    events: RefCell<Vec<PresenterEvent>>,
}

impl RecordingPresenter {
    pub fn events(&self) -> Vec<PresenterEvent> {
        self.events.borrow().clone()
    }

    /// Records of the most recent render.
    pub fn last_listing(&self) -> Option<Vec<NavigableRecord>> {
        self.events.borrow().iter().rev().find_map(|event| match event {
            PresenterEvent::Rendered(records) => Some(records.clone()),
            _ => None,
        })
    }

    pub fn last_error(&self) -> Option<BrowseError> {
        self.events.borrow().iter().rev().find_map(|event| match event {
            PresenterEvent::Error(error) => Some(error.clone()),
            _ => None,
        })
    }
}

impl Presenter for RecordingPresenter {
    fn render(&self, records: &[NavigableRecord]) {
        self.events
            .borrow_mut()
            .push(PresenterEvent::Rendered(records.to_vec()));
    }

    fn clear(&self) {
        self.events.borrow_mut().push(PresenterEvent::Cleared);
    }

    fn show_error(&self, error: &BrowseError) {
        self.events
            .borrow_mut()
            .push(PresenterEvent::Error(error.clone()));
    }

    fn show_file(&self, details: &FileDetails) {
        self.events
            .borrow_mut()
            .push(PresenterEvent::File(details.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ContentKind;
    use std::time::Duration;

    fn name(uri: &str) -> Name {
        uri.parse().unwrap()
    }

    fn interest(uri: &str) -> Interest {
        Interest::new(name(uri), Duration::from_millis(10))
    }

    #[tokio::test]
    async fn test_directory_listing_has_marker_and_children() {
        let face = MemoryFace::new(name("/ndnfs"))
            .with_directory("/photos", 1_400_000_000)
            .with_file("/photos/2014/cat.jpg", FileInfo {
                size: 1,
                total_segments: 1,
                version: 1,
            });

        let Response::Data(data) = face.express_interest(interest("/ndnfs/photos")).await else {
            panic!("expected data");
        };
        assert_eq!(
            data.content_kind(),
            ContentKind::Listing {
                version: Some(1_400_000_000)
            }
        );
        let listing = codec::decode_listing(&data.content).unwrap();
        assert_eq!(listing.entries(), &[DirectoryEntry::directory("/photos/2014")]);
    }

    #[tokio::test]
    async fn test_empty_directory_and_missing_path_time_out() {
        let face = MemoryFace::new(name("/ndnfs")).with_directory("/empty", 3);

        assert_eq!(
            face.express_interest(interest("/ndnfs/empty")).await,
            Response::Timeout
        );
        assert_eq!(
            face.express_interest(interest("/ndnfs/missing")).await,
            Response::Timeout
        );
        assert_eq!(
            face.express_interest(interest("/elsewhere")).await,
            Response::Timeout
        );
        assert_eq!(face.expressed().len(), 3);
    }

    #[tokio::test]
    async fn test_file_answer() {
        let info = FileInfo {
            size: 300,
            total_segments: 2,
            version: 260,
        };
        let face = MemoryFace::new(name("/ndnfs")).with_file("/doc.txt", info);

        let Response::Data(data) = face.express_interest(interest("/ndnfs/doc.txt")).await else {
            panic!("expected data");
        };
        assert_eq!(data.name.to_uri(), "/ndnfs/doc.txt/%C1.FS.file/%FD%01%04");
        assert_eq!(codec::decode_file_info(&data.content).unwrap(), info);
    }

    #[tokio::test]
    async fn test_overrides() {
        let raw = Data::new(name("/ndnfs/raw"), vec![1, 2]);
        let face = MemoryFace::new(name("/ndnfs"))
            .with_response(name("/ndnfs/raw"), raw.clone())
            .with_failure(name("/ndnfs/down"), "unreachable");

        assert_eq!(
            face.express_interest(interest("/ndnfs/raw")).await,
            Response::Data(raw)
        );
        assert_eq!(
            face.express_interest(interest("/ndnfs/down")).await,
            Response::TransportError("unreachable".into())
        );
    }

    #[test]
    fn test_listing_order_and_parents() {
        let face = MemoryFace::new(name("/ndnfs"))
            .with_file("/b.txt", FileInfo {
                size: 0,
                total_segments: 0,
                version: 0,
            })
            .with_directory("/a/deep/", 0);

        let paths: Vec<_> = face
            .listing("/")
            .into_iter()
            .map(|entry| entry.path)
            .collect();
        assert_eq!(paths, ["/b.txt", "/a"]);
        assert_eq!(parent_of("/a/deep"), "/a");
        assert_eq!(parent_of("/a"), "/");
    }

    #[test]
    fn test_recording_presenter() {
        let presenter = RecordingPresenter::default();
        presenter.clear();
        presenter.show_error(&BrowseError::Transport("x".into()));
        assert_eq!(presenter.events().len(), 2);
        assert_eq!(presenter.last_listing(), None);
        assert_eq!(
            presenter.last_error(),
            Some(BrowseError::Transport("x".into()))
        );
    }
}
