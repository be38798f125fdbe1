//! The document model and the path engine.
//!
//! A [`Document`] is a JSON-like tree: objects, arrays and scalars. The
//! [`PathExt`] trait adds dotted-path reads and writes to it.
//!
//! Writes auto-vivify: every segment before the last that is missing, or
//! that holds a scalar, is replaced by an empty object. Whatever scalar was
//! there is silently discarded. Array slots are never created, so an index
//! past the end of an array fails the write.
//!
//! ```
//! use roz::doc::{self, PathExt};
//! use serde_json::json;
//!
//! let mut state = doc::empty();
//! state.set_path("a.b.c", json!(5)).unwrap();
//! assert_eq!(state, json!({"a": {"b": {"c": 5}}}));
//! assert_eq!(state.get_path("a.b.c"), Some(&json!(5)));
//! assert_eq!(state.get_path("a.x"), None);
//! ```
//!
//! A failed write leaves the document as it was: failures only happen at an
//! existing array or at a scalar root, before anything has been replaced.
//! The [`Store`](crate::Store) still applies every write to a copy so that
//! readers never observe a document mid-write.

pub mod path;

pub use path::{Path, PathBuf, PathError};

use path::parse_index;
use serde_json::Map;

/// The state value: a JSON tree.
pub type Document = serde_json::Value;

/// Returns a new, empty object document.
pub fn empty() -> Document {
    Document::Object(Map::new())
}

/// Returns `true` for objects and arrays.
pub fn is_container(value: &Document) -> bool {
    matches!(value, Document::Object(_) | Document::Array(_))
}

/// Path-based access to nested values.
pub trait PathExt {
    /// Reads the value at `path`.
    ///
    /// Returns `None` when a key is missing, an index is not a valid
    /// in-bounds literal, or a segment is applied to a scalar (including
    /// `null`).
    fn get_path(&self, path: impl AsRef<Path>) -> Option<&Document>;

    /// Mutable counterpart of [`get_path`](PathExt::get_path).
    fn get_path_mut(&mut self, path: impl AsRef<Path>) -> Option<&mut Document>;

    /// Writes `value` at `path`, creating intermediate objects as needed.
    fn set_path(&mut self, path: impl AsRef<Path>, value: Document) -> Result<(), PathError>;
}

impl PathExt for Document {
    fn get_path(&self, path: impl AsRef<Path>) -> Option<&Document> {
        let mut current = self;
        for segment in path.as_ref().segments() {
            current = match current {
                Document::Object(map) => map.get(segment)?,
                Document::Array(items) => items.get(parse_index(segment)?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    fn get_path_mut(&mut self, path: impl AsRef<Path>) -> Option<&mut Document> {
        let mut current = self;
        for segment in path.as_ref().segments() {
            current = match current {
                Document::Object(map) => map.get_mut(segment)?,
                Document::Array(items) => items.get_mut(parse_index(segment)?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    fn set_path(&mut self, path: impl AsRef<Path>, value: Document) -> Result<(), PathError> {
        let path = path.as_ref();
        let (parent, last) = path.split_last();

        let mut current = self;
        for segment in parent.into_iter().flat_map(Path::segments) {
            current = descend(current, path, segment)?;
        }

        match current {
            Document::Object(map) => {
                map.insert(last.to_string(), value);
                Ok(())
            }
            Document::Array(items) => {
                let slot = array_slot(items, path, last)?;
                *slot = value;
                Ok(())
            }
            _ => Err(PathError::NotAContainer {
                path: path.as_str().to_string(),
                segment: last.to_string(),
            }),
        }
    }
}

/// Steps one intermediate segment down during a write.
///
/// The returned slot is always a container.
fn descend<'a>(
    current: &'a mut Document,
    path: &Path,
    segment: &str,
) -> Result<&'a mut Document, PathError> {
    let slot = match current {
        Document::Object(map) => map.entry(segment).or_insert_with(empty),
        Document::Array(items) => array_slot(items, path, segment)?,
        _ => {
            return Err(PathError::NotAContainer {
                path: path.as_str().to_string(),
                segment: segment.to_string(),
            });
        }
    };

    if !is_container(slot) {
        *slot = empty();
    }
    Ok(slot)
}

/// Resolves an existing array element; never grows the array.
fn array_slot<'a>(
    items: &'a mut [Document],
    path: &Path,
    segment: &str,
) -> Result<&'a mut Document, PathError> {
    let index = parse_index(segment).ok_or_else(|| PathError::InvalidIndex {
        path: path.as_str().to_string(),
        segment: segment.to_string(),
    })?;

    let len = items.len();
    items.get_mut(index).ok_or_else(|| PathError::IndexOutOfBounds {
        path: path.as_str().to_string(),
        index,
        len,
    })
}
