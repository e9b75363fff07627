//! Binary codec for directory listings and file-info records.
//!
//! The wire format is protobuf (proto2):
//!
//! ```text
//! message DirInfo       { required string path = 1; required uint32 type = 2; }
//! message DirInfoArray  { repeated DirInfo di = 1; }
//! message FileInfo      { required uint32 size = 1; required uint32 totalseg = 2; required uint32 version = 3; }
//! ```
//!
//! The [`wire`] messages keep every field optional so that a missing required
//! field can be told apart from a default value; decoding then validates them
//! into the domain types. Decoding a listing is all-or-nothing.

use prost::Message;
use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

/// Raw protobuf messages as they appear on the wire.
pub mod wire {
    /// One directory entry.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct DirInfo {
        #[prost(string, optional, tag = "1")]
        pub path: Option<String>,
        #[prost(uint32, optional, tag = "2")]
        pub r#type: Option<u32>,
    }

    /// A directory listing.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct DirInfoArray {
        #[prost(message, repeated, tag = "1")]
        pub di: Vec<DirInfo>,
    }

    /// Metadata of one file version.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct FileInfo {
        #[prost(uint32, optional, tag = "1")]
        pub size: Option<u32>,
        #[prost(uint32, optional, tag = "2")]
        pub totalseg: Option<u32>,
        #[prost(uint32, optional, tag = "3")]
        pub version: Option<u32>,
    }
}

/// Kind of a directory entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryType {
    /// Regular file (wire value 1)
    File,
    /// Directory (wire value 2)
    Directory,
}

impl EntryType {
    pub fn is_directory(self) -> bool {
        self == Self::Directory
    }
}

impl From<EntryType> for u32 {
    fn from(value: EntryType) -> Self {
        match value {
            EntryType::File => 1,
            EntryType::Directory => 2,
        }
    }
}

impl TryFrom<u32> for EntryType {
    type Error = DecodeError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::File),
            2 => Ok(Self::Directory),
            other => Err(DecodeError::UnknownEntryType(other)),
        }
    }
}

/// A decoded directory entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    /// Full hierarchical path, e.g. `/photos/cat.jpg`
    pub path: String,
    pub entry_type: EntryType,
}

impl DirectoryEntry {
    pub fn new(path: impl Into<String>, entry_type: EntryType) -> Self {
        Self {
            path: path.into(),
            entry_type,
        }
    }

    pub fn file(path: impl Into<String>) -> Self {
        Self::new(path, EntryType::File)
    }

    pub fn directory(path: impl Into<String>) -> Self {
        Self::new(path, EntryType::Directory)
    }
}

impl TryFrom<wire::DirInfo> for DirectoryEntry {
    type Error = DecodeError;

    fn try_from(info: wire::DirInfo) -> Result<Self, Self::Error> {
        let path = info.path.ok_or(DecodeError::MissingField {
            message: "DirInfo",
            field: "path",
        })?;
        let raw_type = info.r#type.ok_or(DecodeError::MissingField {
            message: "DirInfo",
            field: "type",
        })?;
        if path.is_empty() {
            return Err(DecodeError::EmptyPath);
        }
        Ok(Self {
            path,
            entry_type: EntryType::try_from(raw_type)?,
        })
    }
}

impl From<&DirectoryEntry> for wire::DirInfo {
    fn from(entry: &DirectoryEntry) -> Self {
        Self {
            path: Some(entry.path.clone()),
            r#type: Some(entry.entry_type.into()),
        }
    }
}

/// Ordered entries of one directory, in wire order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryListing {
    entries: Vec<DirectoryEntry>,
}

impl DirectoryListing {
    pub fn new(entries: Vec<DirectoryEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DirectoryEntry> {
        self.entries.iter()
    }
}

impl IntoIterator for DirectoryListing {
    type Item = DirectoryEntry;
    type IntoIter = std::vec::IntoIter<DirectoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a DirectoryListing {
    type Item = &'a DirectoryEntry;
    type IntoIter = std::slice::Iter<'a, DirectoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<DirectoryEntry> for DirectoryListing {
    fn from_iter<I: IntoIterator<Item = DirectoryEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Metadata of one file version.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    /// File size in bytes
    pub size: u32,
    /// Number of content segments
    pub total_segments: u32,
    pub version: u32,
}

impl TryFrom<wire::FileInfo> for FileInfo {
    type Error = DecodeError;

    fn try_from(info: wire::FileInfo) -> Result<Self, Self::Error> {
        let missing = |field| DecodeError::MissingField {
            message: "FileInfo",
            field,
        };
        Ok(Self {
            size: info.size.ok_or_else(|| missing("size"))?,
            total_segments: info.totalseg.ok_or_else(|| missing("totalseg"))?,
            version: info.version.ok_or_else(|| missing("version"))?,
        })
    }
}

impl From<&FileInfo> for wire::FileInfo {
    fn from(info: &FileInfo) -> Self {
        Self {
            size: Some(info.size),
            totalseg: Some(info.total_segments),
            version: Some(info.version),
        }
    }
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode a single `DirInfo` record.
pub fn decode_entry(buf: &[u8]) -> Result<DirectoryEntry, DecodeError> {
    wire::DirInfo::decode(buf)?.try_into()
}

/// Decode a `DirInfoArray`, preserving wire order.
///
/// Fails as a whole if any entry is malformed. A zero-length buffer is a
/// valid, empty listing.
pub fn decode_listing(buf: &[u8]) -> Result<DirectoryListing, DecodeError> {
    wire::DirInfoArray::decode(buf)?
        .di
        .into_iter()
        .map(DirectoryEntry::try_from)
        .collect()
}

/// Decode a `FileInfo` record.
pub fn decode_file_info(buf: &[u8]) -> Result<FileInfo, DecodeError> {
    wire::FileInfo::decode(buf)?.try_into()
}

// =============================================================================
// Encoding
// =============================================================================

pub fn encode_entry(entry: &DirectoryEntry) -> Vec<u8> {
    wire::DirInfo::from(entry).encode_to_vec()
}

pub fn encode_listing(listing: &DirectoryListing) -> Vec<u8> {
    wire::DirInfoArray {
        di: listing.iter().map(wire::DirInfo::from).collect(),
    }
    .encode_to_vec()
}

pub fn encode_file_info(info: &FileInfo) -> Vec<u8> {
    wire::FileInfo::from(info).encode_to_vec()
}
