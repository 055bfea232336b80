//! Dotted paths into a settings record, e.g. `button.backgroundColor`.

use serde_json::Value;
use std::fmt;

use super::PatchError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingPath {
    segments: Vec<String>,
}

impl SettingPath {
    pub fn parse(raw: &str) -> Result<Self, PatchError> {
        let segments: Vec<String> = raw.split('.').map(str::to_string).collect();
        if raw.trim().is_empty() || segments.iter().any(|s| s.is_empty()) {
            return Err(PatchError::UnknownPath(raw.to_string()));
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The last segment, i.e. the field being written
    pub fn leaf(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }
}

impl fmt::Display for SettingPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

/// Coarse JSON type name used in shape errors
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Read the value at `path`
pub fn lookup<'a>(tree: &'a Value, path: &SettingPath) -> Option<&'a Value> {
    path.segments()
        .iter()
        .try_fold(tree, |node, segment| node.as_object()?.get(segment))
}

/// Overwrite the existing value at `path`.
///
/// The path must already exist and the replacement must have the same JSON
/// kind as the value it replaces. New keys are never created.
pub fn assign(tree: &mut Value, path: &SettingPath, value: Value) -> Result<(), PatchError> {
    let mut node = tree;
    for segment in path.segments() {
        node = node
            .as_object_mut()
            .and_then(|map| map.get_mut(segment))
            .ok_or_else(|| PatchError::UnknownPath(path.to_string()))?;
    }

    if kind_of(node) != kind_of(&value) {
        return Err(PatchError::WrongShape {
            path: path.to_string(),
            expected: kind_of(node),
            found: kind_of(&value),
        });
    }

    *node = value;
    Ok(())
}
