//! Path types for addressing values nested inside a [`Document`](super::Document).
//!
//! A path is a string of dot-separated segments. Each segment is either an
//! object key or, when the value being traversed is an array, a
//! non-negative base-10 index literal. There is no escaping: a key that
//! contains a literal dot cannot be addressed.
//!
//! Unlike filesystem paths, segments are taken verbatim. `"a..b"` has the
//! three segments `a`, `""` and `b`, and the empty string is a path with a
//! single empty segment.
//!
//! The [`Path`]/[`PathBuf`] pair follows the same borrowed/owned pattern as
//! `std::path::Path`/`std::path::PathBuf`.
//!
//! ```rust
//! use roz::doc::{Path, PathBuf};
//!
//! let path = PathBuf::from("players.player_alpha");
//! let path = path.push("username");
//! assert_eq!(path.as_str(), "players.player_alpha.username");
//!
//! let segments: Vec<&str> = path.segments().collect();
//! assert_eq!(segments, vec!["players", "player_alpha", "username"]);
//!
//! let borrowed: &Path = Path::new("list.0");
//! assert_eq!(borrowed.last_segment(), "0");
//! ```

use std::{borrow::Borrow, convert::Infallible, fmt, ops::Deref, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Separator between path segments.
pub const SEPARATOR: char = '.';

/// Reasons a path cannot be written through.
#[non_exhaustive]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    /// An array index past the end of the array.
    #[error("index {index} out of bounds (len {len}) in path '{path}'")]
    IndexOutOfBounds {
        path: String,
        index: usize,
        len: usize,
    },

    /// A segment that is not an index literal was applied to an array.
    #[error("segment '{segment}' is not an array index in path '{path}'")]
    InvalidIndex { path: String, segment: String },

    /// A segment was applied to a scalar value.
    #[error("segment '{segment}' is not a container in path '{path}'")]
    NotAContainer { path: String, segment: String },
}

impl PathError {
    /// The full path the failing operation was given.
    pub fn path(&self) -> &str {
        match self {
            PathError::IndexOutOfBounds { path, .. }
            | PathError::InvalidIndex { path, .. }
            | PathError::NotAContainer { path, .. } => path,
        }
    }

    /// Check if this error is an out-of-bounds array access.
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, PathError::IndexOutOfBounds { .. })
    }

    /// Check if this error comes from traversing the wrong kind of value.
    pub fn is_type_error(&self) -> bool {
        matches!(
            self,
            PathError::InvalidIndex { .. } | PathError::NotAContainer { .. }
        )
    }
}

/// Parses a segment as an array index.
///
/// Only non-empty, all-ASCII-digit literals are indices. A literal too large
/// for `usize` maps to `usize::MAX`, which is out of bounds for every array.
pub fn parse_index(segment: &str) -> Option<usize> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(segment.parse().unwrap_or(usize::MAX))
}

/// A borrowed path.
///
/// This type is unsized and must always be used behind a reference.
#[derive(Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Path {
    inner: str,
}

/// An owned path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathBuf {
    inner: String,
}

impl Path {
    /// Wraps a string slice as a path. Every string is a valid path.
    pub const fn new(s: &str) -> &Path {
        // SAFETY: Path is a repr(transparent) wrapper around str
        unsafe { &*(s as *const str as *const Path) }
    }

    /// Returns an iterator over the segments of the path.
    ///
    /// Always yields at least one segment.
    pub fn segments(&self) -> std::str::Split<'_, char> {
        self.inner.split(SEPARATOR)
    }

    /// Returns the number of segments in the path.
    pub fn len(&self) -> usize {
        self.segments().count()
    }

    /// Returns `true` for the empty string path.
    ///
    /// The empty path still has one (empty) segment.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Splits the path into its parent and its final segment.
    pub fn split_last(&self) -> (Option<&Path>, &str) {
        match self.inner.rsplit_once(SEPARATOR) {
            Some((parent, last)) => (Some(Path::new(parent)), last),
            None => (None, &self.inner),
        }
    }

    /// Returns the parent path, or `None` for a single-segment path.
    pub fn parent(&self) -> Option<&Path> {
        self.split_last().0
    }

    /// Returns the final segment of the path.
    pub fn last_segment(&self) -> &str {
        self.split_last().1
    }

    /// Returns the path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Converts this `Path` to an owned `PathBuf`.
    pub fn to_path_buf(&self) -> PathBuf {
        PathBuf {
            inner: self.inner.to_string(),
        }
    }
}

impl PathBuf {
    /// Creates a new, empty path.
    pub fn new() -> Self {
        Self {
            inner: String::new(),
        }
    }

    /// Appends a segment (or a dotted run of segments) to this path.
    ///
    /// Pushing onto the empty path replaces it rather than producing a
    /// leading empty segment.
    pub fn push(mut self, segment: impl AsRef<str>) -> Self {
        if !self.inner.is_empty() {
            self.inner.push(SEPARATOR);
        }
        self.inner.push_str(segment.as_ref());
        self
    }

    /// Joins this path with another path.
    pub fn join(self, other: impl AsRef<Path>) -> Self {
        self.push(other.as_ref().as_str())
    }

    /// Consumes the path, returning the underlying string.
    pub fn into_string(self) -> String {
        self.inner
    }
}

impl Deref for PathBuf {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        Path::new(&self.inner)
    }
}

impl AsRef<Path> for PathBuf {
    fn as_ref(&self) -> &Path {
        self
    }
}

impl AsRef<Path> for Path {
    fn as_ref(&self) -> &Path {
        self
    }
}

impl AsRef<Path> for str {
    fn as_ref(&self) -> &Path {
        Path::new(self)
    }
}

impl AsRef<Path> for String {
    fn as_ref(&self) -> &Path {
        Path::new(self)
    }
}

impl AsRef<str> for Path {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl AsRef<str> for PathBuf {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl Borrow<Path> for PathBuf {
    fn borrow(&self) -> &Path {
        self
    }
}

impl ToOwned for Path {
    type Owned = PathBuf;

    fn to_owned(&self) -> PathBuf {
        self.to_path_buf()
    }
}

impl From<&str> for PathBuf {
    fn from(s: &str) -> Self {
        Self {
            inner: s.to_string(),
        }
    }
}

impl From<String> for PathBuf {
    fn from(inner: String) -> Self {
        Self { inner }
    }
}

impl From<&Path> for PathBuf {
    fn from(path: &Path) -> Self {
        path.to_path_buf()
    }
}

impl From<&PathBuf> for PathBuf {
    fn from(path: &PathBuf) -> Self {
        path.clone()
    }
}

impl FromStr for PathBuf {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl PartialEq<str> for PathBuf {
    fn eq(&self, other: &str) -> bool {
        self.inner == other
    }
}

impl PartialEq<&str> for PathBuf {
    fn eq(&self, other: &&str) -> bool {
        self.inner == *other
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.inner.is_empty() {
            write!(f, "(empty path)")
        } else {
            write!(f, "{}", &self.inner)
        }
    }
}

impl fmt::Display for PathBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&**self, f)
    }
}

/// Constructs a path.
///
/// - `path!("user.profile.name")` - a single literal, returns `&'static Path`
/// - `path!("players", id, "username")` - several parts, returns `PathBuf`
///
/// ```rust
/// use roz::path;
///
/// let literal = path!("players.player_alpha.username");
/// let id = "player_alpha";
/// let built = path!("players", id, "username");
/// assert_eq!(literal.as_str(), built.as_str());
/// ```
#[macro_export]
macro_rules! path {
    ($single:literal) => {
        $crate::doc::Path::new($single)
    };

    ($first:expr $(, $rest:expr)+ $(,)?) => {{
        let path = $crate::doc::PathBuf::from($first.to_string());
        $(
            let path = path.push($rest.to_string());
        )+
        path
    }};
}
