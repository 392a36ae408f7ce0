//! Decoders for JSON documents embedded in string fields
//!
//! Content and account records carry `json_metadata` as a JSON string whose
//! contents vary by author and client. Content metadata is strict (a bad
//! document is an error); account profiles are best effort.

use crate::error::DecodeError;
use crate::types::StringSlice;
use serde::de::DeserializeOwned;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Decode `raw` as `T`, falling back to `T::default()` with the error as a warning
pub fn best_effort<T>(raw: &str) -> (T, Option<DecodeError>)
where
    T: DeserializeOwned + Default,
{
    match serde_json::from_str(raw) {
        Ok(value) => (value, None),
        Err(e) => (
            T::default(),
            Some(DecodeError::MetadataDecodeError(e.to_string())),
        ),
    }
}

/// Remove one layer of surrounding double quotes, if present
fn strip_quotes(text: &str) -> &str {
    text.strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(text)
}

// =============================================================================
// Content
// =============================================================================

/// Structured content metadata
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StructuredMetadata {
    #[serde(default)]
    pub tags: StringSlice,
    #[serde(default)]
    pub users: StringSlice,
    #[serde(default, alias = "images")]
    pub image: StringSlice,
}

/// `json_metadata` of a post or comment
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ContentMetadata {
    /// Legacy clients stored a bare `true`/`false`
    Flag(bool),
    Structured(StructuredMetadata),
    #[default]
    Empty,
}

impl ContentMetadata {
    /// Decode the already-unquoted field text
    pub fn parse(text: &str) -> Result<Self, DecodeError> {
        match text {
            "true" => return Ok(ContentMetadata::Flag(true)),
            "false" => return Ok(ContentMetadata::Flag(false)),
            "" => return Ok(ContentMetadata::Empty),
            _ => {}
        }
        serde_json::from_str(text)
            .map(ContentMetadata::Structured)
            .map_err(|e| DecodeError::MetadataDecodeError(e.to_string()))
    }

    /// Decode the field as it appears in a node response, i.e. a JSON string literal
    pub fn from_wire(raw: &str) -> Result<Self, DecodeError> {
        let text: String = serde_json::from_str(raw)?;
        Self::parse(&text)
    }

    pub fn tags(&self) -> &[String] {
        match self {
            ContentMetadata::Structured(meta) => meta.tags.as_slice(),
            _ => &[],
        }
    }
}

impl Serialize for ContentMetadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ContentMetadata::Flag(flag) => serializer.collect_str(flag),
            ContentMetadata::Empty => serializer.serialize_str(""),
            ContentMetadata::Structured(meta) => {
                let text = serde_json::to_string(meta).map_err(serde::ser::Error::custom)?;
                serializer.serialize_str(&text)
            }
        }
    }
}

impl<'de> Deserialize<'de> for ContentMetadata {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        ContentMetadata::parse(&text).map_err(de::Error::custom)
    }
}

// =============================================================================
// Account
// =============================================================================

/// Profile an account publishes in its `json_metadata`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, alias = "image")]
    pub profile_image: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub about: String,
}

#[derive(Debug, Default, Deserialize)]
struct EmbeddedDocument {
    #[serde(default)]
    profile: Profile,
}

/// Account `json_metadata`: the raw document plus the profile decoded from it
///
/// Decoding never fails. When the embedded document is malformed `profile`
/// is zero and `warning` records why.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccountMetadata {
    pub raw: String,
    pub profile: Profile,
    pub warning: Option<DecodeError>,
}

impl AccountMetadata {
    pub fn from_raw(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let text = strip_quotes(raw.trim());
        let (document, warning) = if text.is_empty() {
            (EmbeddedDocument::default(), None)
        } else {
            best_effort::<EmbeddedDocument>(text)
        };
        AccountMetadata {
            profile: document.profile,
            warning,
            raw,
        }
    }
}

impl Serialize for AccountMetadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for AccountMetadata {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Null => AccountMetadata::default(),
            Value::String(raw) => AccountMetadata::from_raw(raw),
            // some nodes return the document already parsed
            other => AccountMetadata::from_raw(other.to_string()),
        })
    }
}
