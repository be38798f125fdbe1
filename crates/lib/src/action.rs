//! Actions: the only way to request a change to the document.
//!
//! On the wire an action is a JSON object with a string `type` and a
//! type-specific payload. `SET_STATE` is the one recognised type; every
//! other object with a `type` is kept as [`Action::Other`] so it can still
//! flow through the pipeline and be reported as unknown.

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Map;
use thiserror::Error;

use crate::doc::{Document, PathBuf};

/// Type tag of the action that writes a value at a path.
pub const SET_STATE: &str = "SET_STATE";

static NULL: Document = Document::Null;

/// Errors for raw values that cannot be read as an action at all.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ActionError {
    /// The value is not a JSON object.
    #[error("action must be a JSON object")]
    NotAnObject,

    /// The object has no string `type` field.
    #[error("action is missing a string 'type' field")]
    MissingType,

    /// The input is not valid JSON.
    #[error("action is not valid JSON: {0}")]
    Deserialize(#[from] serde_json::Error),
}

/// A request to change the document.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Write `value` at `path`.
    ///
    /// A missing `value` writes `null`. Any other fields the caller attached
    /// (request ids and the like) are kept in `extra` and travel with the
    /// action into its event.
    SetState {
        path: PathBuf,
        value: Option<Document>,
        extra: Map<String, Document>,
    },

    /// Any other action, with its raw payload (everything except `type`).
    ///
    /// A `SET_STATE` object without a string `path` also lands here; the
    /// pipeline reports it as malformed rather than unknown.
    Other {
        kind: String,
        payload: Map<String, Document>,
    },
}

impl Action {
    /// Builds a `SET_STATE` action.
    pub fn set_state(path: impl Into<PathBuf>, value: impl Into<Document>) -> Self {
        Action::SetState {
            path: path.into(),
            value: Some(value.into()),
            extra: Map::new(),
        }
    }

    /// Attaches an extra field to the action's payload.
    ///
    /// `type`, `path` and `value` are reserved; setting them here has no
    /// effect on the wire form.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Document>) -> Self {
        match &mut self {
            Action::SetState { extra: fields, .. } | Action::Other { payload: fields, .. } => {
                fields.insert(key.into(), value.into());
            }
        }
        self
    }

    /// The value a `SET_STATE` action writes; `None` for other actions.
    pub fn value(&self) -> Option<&Document> {
        match self {
            Action::SetState { value, .. } => Some(value.as_ref().unwrap_or(&NULL)),
            Action::Other { .. } => None,
        }
    }

    /// The action's type tag.
    pub fn kind(&self) -> &str {
        match self {
            Action::SetState { .. } => SET_STATE,
            Action::Other { kind, .. } => kind,
        }
    }

    /// Converts the action to its JSON object form.
    pub fn to_value(&self) -> Document {
        let mut map = match self {
            Action::SetState { path, value, extra } => {
                let mut map = extra.clone();
                map.insert("path".to_string(), Document::from(path.as_str()));
                match value {
                    Some(value) => map.insert("value".to_string(), value.clone()),
                    None => map.remove("value"),
                };
                map
            }
            Action::Other { payload, .. } => payload.clone(),
        };
        map.insert("type".to_string(), Document::from(self.kind()));
        Document::Object(map)
    }

    /// Reads an action from its JSON object form.
    ///
    /// Every field is kept, so `to_value` gives back the object this was
    /// read from.
    pub fn from_value(value: Document) -> Result<Self, ActionError> {
        let Document::Object(mut map) = value else {
            return Err(ActionError::NotAnObject);
        };

        let kind = match map.remove("type") {
            Some(Document::String(kind)) => kind,
            _ => return Err(ActionError::MissingType),
        };

        if kind == SET_STATE
            && let Some(Document::String(path)) = map.get("path")
        {
            let path = PathBuf::from(path.as_str());
            map.remove("path");
            let value = map.remove("value");
            return Ok(Action::SetState {
                path,
                value,
                extra: map,
            });
        }

        Ok(Action::Other { kind, payload: map })
    }
}

impl TryFrom<Document> for Action {
    type Error = ActionError;

    fn try_from(value: Document) -> Result<Self, Self::Error> {
        Action::from_value(value)
    }
}

impl From<Action> for Document {
    fn from(action: Action) -> Self {
        action.to_value()
    }
}

impl FromStr for Action {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::from_value(serde_json::from_str(s)?)
    }
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Document::deserialize(deserializer)?;
        Action::from_value(value).map_err(serde::de::Error::custom)
    }
}
