//! Single-shot request/response client.
//!
//! A request expresses exactly one [`Interest`] through a [`Face`] and resolves
//! to exactly one [`Response`]. There is no retry and no deduplication: two
//! calls for the same name are two independent requests, and keeping at most
//! one browse in flight is the caller's business. Dropping the returned future
//! abandons the request.

use std::rc::Rc;
use std::time::Duration;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::name::{Component, DIRECTORY_MARKER, FILE_MARKER, Name};

/// Default interest lifetime in milliseconds.
pub const DEFAULT_INTEREST_LIFETIME_MS: u64 = 4000;

/// An outgoing named request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Interest {
    pub name: Name,
    /// How long the transport waits before reporting a timeout.
    pub lifetime: Duration,
}

impl Interest {
    pub fn new(name: Name, lifetime: Duration) -> Self {
        Self { name, lifetime }
    }
}

/// A response packet: the data name and its content bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Data {
    pub name: Name,
    pub content: Vec<u8>,
}

impl Data {
    pub fn new(name: Name, content: Vec<u8>) -> Self {
        Self { name, content }
    }

    /// Classify the payload by the marker component the server places
    /// before the trailing version component.
    pub fn content_kind(&self) -> ContentKind {
        let len = self.name.len();
        if len < 2 {
            return ContentKind::Unmarked;
        }
        let marker = self.name.get(len - 2).map(Component::as_bytes);
        let version = self.name.get(len - 1).and_then(Component::to_version);
        match marker {
            Some(m) if m == DIRECTORY_MARKER => ContentKind::Listing { version },
            Some(m) if m == FILE_MARKER => ContentKind::FileInfo { version },
            _ => ContentKind::Unmarked,
        }
    }
}

/// What a data packet carries, judging by its name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentKind {
    /// Name ends in `%C1.FS.dir/<version>`.
    Listing { version: Option<u64> },
    /// Name ends in `%C1.FS.file/<version>`.
    FileInfo { version: Option<u64> },
    /// No marker. Treated as a listing.
    Unmarked,
}

/// Resolution of one request.
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub enum Response {
    /// A data packet arrived.
    Data(Data),
    /// Nothing arrived within the interest lifetime.
    Timeout,
    /// The transport failed before any answer.
    TransportError(String),
}

/// Transport endpoint that expresses interests.
///
/// Implementations resolve each call exactly once. Futures need not be
/// `Send`: browsing runs on a single cooperative thread.
#[allow(async_fn_in_trait)]
pub trait Face {
    async fn express_interest(&self, interest: Interest) -> Response;
}

impl<F: Face + ?Sized> Face for Rc<F> {
    async fn express_interest(&self, interest: Interest) -> Response {
        (**self).express_interest(interest).await
    }
}

impl<F: Face + ?Sized> Face for &F {
    async fn express_interest(&self, interest: Interest) -> Response {
        (**self).express_interest(interest).await
    }
}

/// Request client configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Interest lifetime in milliseconds
    pub interest_lifetime_ms: u64,
}

impl ClientConfig {
    pub fn with_lifetime_ms(mut self, lifetime_ms: u64) -> Self {
        self.interest_lifetime_ms = lifetime_ms;
        self
    }

    pub fn interest_lifetime(&self) -> Duration {
        Duration::from_millis(self.interest_lifetime_ms)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            interest_lifetime_ms: DEFAULT_INTEREST_LIFETIME_MS,
        }
    }
}

/// Issues one interest per request over a [`Face`].
pub struct RequestClient<F> {
    face: F,
    config: ClientConfig,
}

impl<F: Face> RequestClient<F> {
    pub fn new(face: F) -> Self {
        Self::with_config(face, ClientConfig::default())
    }

    pub fn with_config(face: F, config: ClientConfig) -> Self {
        Self { face, config }
    }

    pub fn face(&self) -> &F {
        &self.face
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send one interest for `name` and wait for its single resolution.
    pub async fn request(&self, name: &Name) -> Response {
        let interest = Interest::new(name.clone(), self.config.interest_lifetime());
        debug!(
            "expressing interest {} (lifetime {} ms)",
            name, self.config.interest_lifetime_ms
        );

        let response = self.face.express_interest(interest).await;
        match &response {
            Response::Data(data) => debug!(
                "data {} for {} ({} bytes)",
                data.name,
                name,
                data.content.len()
            ),
            Response::Timeout => warn!("interest timed out: {}", name),
            Response::TransportError(err) => warn!("transport error for {}: {}", name, err),
        }
        response
    }

    /// Callback form of [`request`](Self::request).
    ///
    /// Exactly one of `on_data` and `on_timeout` runs, once. A transport
    /// failure is reported through `on_timeout`.
    pub async fn request_with<D, T>(&self, name: &Name, on_data: D, on_timeout: T)
    where
        D: FnOnce(Data),
        T: FnOnce(),
    {
        match self.request(name).await {
            Response::Data(data) => on_data(data),
            Response::Timeout | Response::TransportError(_) => on_timeout(),
        }
    }
}
