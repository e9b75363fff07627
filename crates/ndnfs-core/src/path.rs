//! Path algebra between server-side entry paths and request names.
//!
//! Entry paths always begin with `/` and never end with one, e.g.
//! `/photos/2014/cat.jpg`. Splitting such a path gives the directory between
//! the first and last separator (`photos/2014`) and the leaf (`cat.jpg`).

use crate::error::PathError;
use crate::name::Name;

/// Path separator used by entry paths.
pub const SEPARATOR: char = '/';

/// Split a full entry path into `(directory, leaf)`.
///
/// The directory excludes both the leading and the last separator, and is
/// empty for top-level entries.
///
/// # Examples
///
/// ```
/// use ndnfs_core::path::split;
///
/// assert_eq!(split("/a/b/c").unwrap(), ("a/b", "c"));
/// assert_eq!(split("/c").unwrap(), ("", "c"));
/// assert!(split("c").is_err());
/// ```
pub fn split(full_path: &str) -> Result<(&str, &str), PathError> {
    if full_path.is_empty() {
        return Err(PathError::malformed(full_path, "path is empty"));
    }
    if !full_path.starts_with(SEPARATOR) {
        return Err(PathError::malformed(full_path, "must start with `/`"));
    }
    if full_path.ends_with(SEPARATOR) {
        return Err(PathError::malformed(full_path, "must not end with `/`"));
    }

    // Starts with a separator, so rfind always succeeds.
    let last = full_path.rfind(SEPARATOR).unwrap_or(0);
    let leaf = &full_path[last + 1..];
    let directory = if last > 0 { &full_path[1..last] } else { "" };
    Ok((directory, leaf))
}

/// Compose the request name for `leaf` inside `directory` under `prefix`.
///
/// Each `/`-separated segment of `directory` becomes its own component, so
/// the URI suffix after the prefix mirrors the entry path.
pub fn compose_request_name(prefix: &Name, directory: &str, leaf: &str) -> Name {
    prefix.clone().append_path(directory).append(leaf)
}

/// Components of `name` after `prefix`, as a relative name. `None` if `name`
/// is outside `prefix`.
///
/// The components are kept as bytes, so a directory whose component holds a
/// `/` or non-UTF-8 bytes maps back to the same name.
pub fn directory_of(prefix: &Name, name: &Name) -> Option<Name> {
    name.suffix_after(prefix)
        .map(|suffix| Name::from_components(suffix.iter().cloned()))
}
