//! Hierarchical names used as request addresses.
//!
//! A [`Name`] is an ordered sequence of [`Component`]s, each an arbitrary byte
//! string. The textual form is the NDN URI: `/c1/c2/...`, where bytes outside the
//! unreserved set are percent-escaped and a component made only of periods is
//! written with three extra periods (so `...` is the empty component).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::NameError;

/// First byte of a command marker component such as `%C1.FS.dir`.
pub const COMMAND_MARKER: u8 = 0xC1;

/// First byte of a version component.
pub const VERSION_MARKER: u8 = 0xFD;

/// Marker the server places before the version of a directory listing.
pub const DIRECTORY_MARKER: &[u8] = b"\xC1.FS.dir";

/// Marker the server places before the version of a file-info record.
pub const FILE_MARKER: &[u8] = b"\xC1.FS.file";

/// One component of a [`Name`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Component(Vec<u8>);

impl Component {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Build a version component: the marker byte followed by the shortest
    /// big-endian encoding of `version` among 1, 2, 4 or 8 bytes.
    pub fn version(version: u64) -> Self {
        let width = match version {
            0..=0xFF => 1,
            0x100..=0xFFFF => 2,
            0x1_0000..=0xFFFF_FFFF => 4,
            _ => 8,
        };
        let mut bytes = Vec::with_capacity(width + 1);
        bytes.push(VERSION_MARKER);
        bytes.extend_from_slice(&version.to_be_bytes()[8 - width..]);
        Self(bytes)
    }

    /// Read a version component. Returns `None` for anything else.
    pub fn to_version(&self) -> Option<u64> {
        let (&marker, value) = self.0.split_first()?;
        if marker != VERSION_MARKER || value.is_empty() || value.len() > 8 {
            return None;
        }
        Some(value.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b)))
    }

    /// Check if this is a `0xC1` command marker component.
    pub fn is_command_marker(&self) -> bool {
        self.0.first() == Some(&COMMAND_MARKER)
    }

    /// Lossy UTF-8 rendering of the raw bytes, for display and path joins.
    pub fn to_text(&self) -> String {
        String::from_utf8_lossy(&self.0).into_owned()
    }

    /// Escaped URI form of this component.
    pub fn to_escaped_string(&self) -> String {
        if self.0.iter().all(|&b| b == b'.') {
            // covers the empty component too
            return format!("...{}", ".".repeat(self.0.len()));
        }

        let mut out = String::with_capacity(self.0.len());
        for &byte in &self.0 {
            if is_unreserved(byte) {
                out.push(byte as char);
            } else {
                out.push_str(&format!("%{:02X}", byte));
            }
        }
        out
    }

    /// Parse one escaped URI segment.
    pub fn from_escaped(segment: &str) -> Result<Self, NameError> {
        if segment.bytes().all(|b| b == b'.') {
            return match segment.len().checked_sub(3) {
                Some(dots) => Ok(Self(vec![b'.'; dots])),
                None => Err(NameError::InvalidComponent(segment.to_string())),
            };
        }

        let raw = segment.as_bytes();
        let mut bytes = Vec::with_capacity(raw.len());
        let mut i = 0;
        while i < raw.len() {
            if raw[i] == b'%' {
                let hex = raw
                    .get(i + 1..i + 3)
                    .and_then(|h| std::str::from_utf8(h).ok())
                    .and_then(|h| u8::from_str_radix(h, 16).ok())
                    .ok_or_else(|| NameError::InvalidEscape(segment.to_string()))?;
                bytes.push(hex);
                i += 3;
            } else {
                bytes.push(raw[i]);
                i += 1;
            }
        }
        Ok(Self(bytes))
    }
}

fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~')
}

impl From<&str> for Component {
    fn from(value: &str) -> Self {
        Self(value.as_bytes().to_vec())
    }
}

impl From<String> for Component {
    fn from(value: String) -> Self {
        Self(value.into_bytes())
    }
}

impl From<Vec<u8>> for Component {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl From<&[u8]> for Component {
    fn from(value: &[u8]) -> Self {
        Self(value.to_vec())
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_escaped_string())
    }
}

/// Hierarchical name: the address of a request and the identity of a path.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name {
    components: Vec<Component>,
}

impl Name {
    /// The root name, `/`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_components(components: impl IntoIterator<Item = Component>) -> Self {
        Self {
            components: components.into_iter().collect(),
        }
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Component> {
        self.components.get(index)
    }

    /// Append a component in place.
    pub fn push(&mut self, component: impl Into<Component>) {
        self.components.push(component.into());
    }

    /// Append a component, consuming and returning the name for chaining.
    pub fn append(mut self, component: impl Into<Component>) -> Self {
        self.push(component);
        self
    }

    /// Append every non-empty `/`-separated segment of `path` as its own component.
    ///
    /// Segments are taken verbatim (not unescaped).
    pub fn append_path(mut self, path: &str) -> Self {
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            self.push(segment);
        }
        self
    }

    /// Append every component of `suffix`.
    pub fn join(mut self, suffix: &Name) -> Self {
        self.components.extend_from_slice(&suffix.components);
        self
    }

    /// Check if `prefix` matches the leading components of this name.
    pub fn starts_with(&self, prefix: &Name) -> bool {
        self.components.starts_with(&prefix.components)
    }

    /// Components following `prefix`, or `None` if this name does not extend it.
    pub fn suffix_after(&self, prefix: &Name) -> Option<&[Component]> {
        self.components.strip_prefix(prefix.components.as_slice())
    }

    /// Name made of the first `len` components.
    pub fn prefix(&self, len: usize) -> Name {
        Self::from_components(self.components.iter().take(len).cloned())
    }

    /// Escaped URI form, e.g. `/ndnfs/photos`. The root name prints as `/`.
    pub fn to_uri(&self) -> String {
        if self.components.is_empty() {
            return "/".to_string();
        }
        let mut uri = String::new();
        for component in &self.components {
            uri.push('/');
            uri.push_str(&component.to_escaped_string());
        }
        uri
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uri())
    }
}

impl FromStr for Name {
    type Err = NameError;

    /// Parse a URI such as `/ndnfs/photos` or `ndn:/ndnfs`.
    ///
    /// Empty segments are skipped, so `//a///b/` is `/a/b`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let path = trimmed.strip_prefix("ndn:").unwrap_or(trimmed);
        let components = path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(Component::from_escaped)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { components })
    }
}

impl Serialize for Name {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_uri())
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let uri = String::deserialize(deserializer)?;
        uri.parse().map_err(serde::de::Error::custom)
    }
}
