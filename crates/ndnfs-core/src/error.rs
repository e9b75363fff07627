//! Error types for browsing a named-data filesystem.
//!
//! Every failure is scoped to a single browse attempt:
//!
//! - [`NameError`] - a textual name could not be parsed
//! - [`PathError`] - an entry path violates the leading-separator convention
//! - [`DecodeError`] - response bytes do not match the listing schema
//! - [`BrowseError`] - what a browse reports to the presentation layer

use thiserror::Error;

use crate::name::Name;

/// Errors raised while parsing the URI form of a [`Name`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NameError {
    /// A `%` escape is truncated or not followed by two hex digits.
    #[error("invalid percent escape in name component `{0}`")]
    InvalidEscape(String),

    /// A component made only of periods must carry at least three of them.
    #[error("invalid name component `{0}`")]
    InvalidComponent(String),
}

/// Errors raised by the path algebra.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PathError {
    /// The path is empty, relative, or ends with a separator.
    #[error("malformed path `{path}`: {reason}")]
    Malformed {
        /// The offending path
        path: String,
        /// What rule it broke
        reason: &'static str,
    },
}

impl PathError {
    pub(crate) fn malformed(path: &str, reason: &'static str) -> Self {
        Self::Malformed {
            path: path.to_string(),
            reason,
        }
    }
}

/// Errors raised while decoding listing or file-info payloads.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// Truncated buffer or invalid protobuf framing.
    #[error("malformed wire data: {0}")]
    Wire(String),

    /// A required field was absent from a record.
    #[error("missing required field `{field}` in {message}")]
    MissingField {
        /// Message type the field belongs to
        message: &'static str,
        /// Field name from the schema
        field: &'static str,
    },

    /// The entry type discriminant is neither file nor directory.
    #[error("unknown entry type {0}")]
    UnknownEntryType(u32),

    /// A directory entry carried an empty path.
    #[error("directory entry has an empty path")]
    EmptyPath,
}

impl From<prost::DecodeError> for DecodeError {
    fn from(err: prost::DecodeError) -> Self {
        Self::Wire(err.to_string())
    }
}

/// Failure of one browse action.
///
/// None of these are fatal: the user recovers by browsing again.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BrowseError {
    /// The root prefix text could not be parsed as a name.
    #[error("invalid prefix: {0}")]
    InvalidPrefix(#[from] NameError),

    /// An entry in the listing had a malformed path.
    #[error(transparent)]
    MalformedPath(#[from] PathError),

    /// The response payload could not be decoded.
    #[error("unable to parse listing: {0}")]
    Decode(#[from] DecodeError),

    /// No response arrived within the interest lifetime.
    ///
    /// An empty directory looks exactly like this: the server does not answer.
    #[error("no response for {0} (timed out or empty directory)")]
    Timeout(Name),

    /// The transport failed before any response arrived.
    #[error("transport error: {0}")]
    Transport(String),

    /// The requested name does not extend the session prefix.
    #[error("{0} is outside the browsing prefix")]
    OutsidePrefix(Name),
}

impl BrowseError {
    /// Check if this failure means nothing came back for the request.
    pub fn is_no_response(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::Transport(_))
    }
}
