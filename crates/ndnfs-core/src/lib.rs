//! Core of the NDNFS browser.
//!
//! Browsing a named-data filesystem takes four steps: turn a path into a
//! request [`Name`](name::Name), send one interest and wait for data or a
//! timeout, decode the directory listing, and derive the names of the next
//! things to browse. Each step has its own module:
//!
//! - [`name`] - names, components, URI escaping, marker components
//! - [`path`] - splitting entry paths and composing request names
//! - [`codec`] - protobuf `DirInfo`/`DirInfoArray`/`FileInfo` payloads
//! - [`client`] - the [`Face`](client::Face) boundary and single-shot requests
//! - [`navigator`] - browse state machine, sessions and the presenter boundary
//!
//! The transport and the display are traits, so the whole flow runs against
//! in-memory doubles from [`testing`] (with the `mock` feature).

pub mod client;
pub mod codec;
pub mod error;
pub mod name;
pub mod navigator;
pub mod path;

#[cfg(any(test, feature = "mock"))]
pub mod testing;

pub use client::{ClientConfig, Data, Face, Interest, RequestClient, Response};
pub use codec::{DirectoryEntry, DirectoryListing, EntryType, FileInfo};
pub use error::{BrowseError, DecodeError, NameError, PathError};
pub use name::{Component, Name};
pub use navigator::{
    BrowseOutput, BrowsingContext, FileDetails, NavState, NavigableRecord, Navigation, Navigator,
    Presenter, Session,
};
