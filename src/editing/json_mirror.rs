//! Raw-JSON text projection of a structured record.
//!
//! The record stays the single source of truth. The text is regenerated from
//! it on every structured change, and a text edit only yields a new record
//! when it parses strictly; otherwise the text is kept as typed and the mirror
//! is marked invalid.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MirrorError {
    #[error("invalid JSON: {0}")]
    Syntax(String),

    #[error("JSON does not match the expected shape: {0}")]
    Shape(String),

    #[error("{0}")]
    Rejected(String),
}

impl From<serde_json::Error> for MirrorError {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            serde_json::error::Category::Data => MirrorError::Shape(err.to_string()),
            _ => MirrorError::Syntax(err.to_string()),
        }
    }
}

/// Canonical pretty JSON for a record
pub fn canonical<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

#[derive(Debug, Clone)]
pub struct JsonMirror<T> {
    text: String,
    error: Option<MirrorError>,
    _record: PhantomData<T>,
}

impl<T> JsonMirror<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn from_value(value: &T) -> Self {
        Self {
            text: canonical(value),
            error: None,
            _record: PhantomData,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    pub fn error(&self) -> Option<&MirrorError> {
        self.error.as_ref()
    }

    /// Regenerate the text after a structured change
    pub fn sync_from(&mut self, value: &T) {
        self.text = canonical(value);
        self.error = None;
    }

    /// Take new text from the user. Returns the parsed record when the text
    /// is valid; the caller applies it and then calls [`Self::sync_from`].
    pub fn edit(&mut self, text: impl Into<String>) -> Option<T> {
        self.edit_checked(text, |_| Ok(()))
    }

    /// Like [`Self::edit`] with an extra acceptance check on the parsed value
    pub fn edit_checked<F>(&mut self, text: impl Into<String>, check: F) -> Option<T>
    where
        F: FnOnce(&T) -> Result<(), String>,
    {
        self.text = text.into();
        let parsed = serde_json::from_str::<T>(&self.text)
            .map_err(MirrorError::from)
            .and_then(|value| check(&value).map(|_| value).map_err(MirrorError::Rejected));

        match parsed {
            Ok(value) => {
                self.error = None;
                Some(value)
            }
            Err(err) => {
                log::debug!("Mirror text rejected: {}", err);
                self.error = Some(err);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct Flags {
        a: bool,
        b: bool,
    }

    #[test]
    fn test_invalid_text_is_kept_and_flagged() {
        let mut mirror = JsonMirror::from_value(&Flags { a: true, b: false });
        assert!(mirror.edit("{ \"a\": tru").is_none());
        assert!(!mirror.is_valid());
        assert_eq!(mirror.text(), "{ \"a\": tru");
        assert!(matches!(mirror.error(), Some(MirrorError::Syntax(_))));
    }

    #[test]
    fn test_shape_errors_are_distinguished() {
        let mut mirror = JsonMirror::from_value(&Flags { a: true, b: false });
        assert!(mirror.edit(r#"{ "a": 1, "b": false }"#).is_none());
        assert!(matches!(mirror.error(), Some(MirrorError::Shape(_))));
    }

    #[test]
    fn test_valid_edit_then_sync_is_canonical() {
        let original = Flags { a: true, b: false };
        let mut mirror = JsonMirror::from_value(&original);
        let canonical_text = mirror.text().to_string();

        let parsed = mirror.edit(r#"{"a":true,   "b":false}"#).unwrap();
        assert!(mirror.is_valid());
        mirror.sync_from(&parsed);
        assert_eq!(mirror.text(), canonical_text);
    }

    #[test]
    fn test_edit_checked_rejects() {
        let mut mirror = JsonMirror::from_value(&Flags { a: true, b: false });
        let result = mirror.edit_checked(r#"{"a":false,"b":false}"#, |f| {
            if f.a || f.b { Ok(()) } else { Err("at least one flag".to_string()) }
        });
        assert!(result.is_none());
        assert_eq!(mirror.error(), Some(&MirrorError::Rejected("at least one flag".to_string())));
    }
}
