use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Parameter values keyed by parameter name.
pub type ParameterMap = AHashMap<String, ParamValue>;

/// A parameter value as held by a node or supplied by a connection.
///
/// JSON scalars are normalized into the native variants by [`ParamValue::from_json`],
/// so `Json` only ever carries arrays and objects when built through it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    File(MediaFile),
    Json(serde_json::Value),
}

impl ParamValue {
    pub fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => ParamValue::Null,
            serde_json::Value::Bool(b) => ParamValue::Bool(b),
            serde_json::Value::Number(n) => match n.as_f64() {
                Some(f) => ParamValue::Number(f),
                None => ParamValue::Json(serde_json::Value::Number(n)),
            },
            serde_json::Value::String(s) => ParamValue::Text(s),
            other => ParamValue::Json(other),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ParamValue::Null | ParamValue::Json(serde_json::Value::Null))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric conversion with the loose rules of a UI text field:
    /// blank text is zero, unparsable text is NaN, booleans are 0/1.
    pub fn to_number(&self) -> f64 {
        match self {
            ParamValue::Null => 0.0,
            ParamValue::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            ParamValue::Number(n) => *n,
            ParamValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse().unwrap_or(f64::NAN)
                }
            }
            ParamValue::File(_) | ParamValue::Json(_) => f64::NAN,
        }
    }

    /// Truthiness used when a value cannot be read as an explicit boolean.
    pub fn is_truthy(&self) -> bool {
        match self {
            ParamValue::Null => false,
            ParamValue::Bool(b) => *b,
            ParamValue::Number(n) => *n != 0.0 && !n.is_nan(),
            ParamValue::Text(s) => !s.is_empty(),
            ParamValue::File(_) => true,
            ParamValue::Json(v) => !v.is_null(),
        }
    }

    /// Converts into a wire-ready JSON value. Files become their descriptor.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            ParamValue::Null => serde_json::Value::Null,
            ParamValue::Bool(b) => serde_json::Value::Bool(*b),
            ParamValue::Number(n) => number_to_json(*n),
            ParamValue::Text(s) => serde_json::Value::String(s.clone()),
            ParamValue::File(file) => serde_json::to_value(file).unwrap_or(serde_json::Value::Null),
            ParamValue::Json(v) => v.clone(),
        }
    }
}

/// Integral floats are emitted as JSON integers so `42.0` packages as `42`.
pub(crate) fn number_to_json(n: f64) -> serde_json::Value {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        serde_json::Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null)
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Null => write!(f, "null"),
            ParamValue::Bool(b) => write!(f, "{}", b),
            ParamValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            ParamValue::Text(s) => write!(f, "{}", s),
            ParamValue::File(file) => write!(f, "{}", file.display_name()),
            ParamValue::Json(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Number(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Number(value as f64)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Number(value as f64)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<MediaFile> for ParamValue {
    fn from(value: MediaFile) -> Self {
        ParamValue::File(value)
    }
}

/// A handle to binary media selected by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    pub source: FileSource,
}

/// Where the bytes of a [`MediaFile`] live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum FileSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

impl MediaFile {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned());
        Self {
            name,
            mime_type: None,
            source: FileSource::Path(path),
        }
    }

    pub fn from_bytes(name: &str, mime_type: Option<&str>, bytes: Vec<u8>) -> Self {
        Self {
            name: Some(name.to_string()),
            mime_type: mime_type.map(str::to_string),
            source: FileSource::Bytes(bytes),
        }
    }

    pub fn display_name(&self) -> String {
        match (&self.name, &self.source) {
            (Some(name), _) => name.clone(),
            (None, FileSource::Path(path)) => path.display().to_string(),
            (None, FileSource::Bytes(_)) => "<unnamed file>".to_string(),
        }
    }
}
