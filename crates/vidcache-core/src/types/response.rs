//! Media cache service responses and field extraction.
//!
//! Every endpoint answers with one flat JSON object. Extraction is lenient:
//! a body that is not an object, a field holding JSON `null` or the string
//! `"null"`, and a field holding a nested value all read as absent. When a
//! key is repeated, its first occurrence wins.

use std::fmt;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use serde_json::Value;

use crate::Status;

/// A response from any of the service's status-bearing endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceResponse {
    /// Content identifier assigned by the service.
    pub hash: Option<String>,
    /// Raw status string.
    pub status: Option<String>,
    /// Location of the playable stream, once ready.
    pub stream_url: Option<String>,
    /// Human-readable progress or failure text.
    pub message: Option<String>,
    /// Video title (metadata endpoint only).
    pub title: Option<String>,
}

impl ServiceResponse {
    /// Parse a response body. Never fails; unusable input yields a response
    /// with every field absent.
    pub fn parse(body: &str) -> Self {
        Self::from(FlatFields::parse(body))
    }

    /// Look up a field by its wire name.
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "hash" => self.hash.as_deref(),
            "status" => self.status.as_deref(),
            "stream_url" => self.stream_url.as_deref(),
            "message" => self.message.as_deref(),
            "title" => self.title.as_deref(),
            _ => None,
        }
    }

    /// Interpreted status; `Unknown` when missing.
    pub fn status(&self) -> Status {
        Status::from_field(self.status.as_deref())
    }

    /// Stream location, if present and non-blank.
    pub fn stream_path(&self) -> Option<&str> {
        self.stream_url.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// True when no known field could be extracted.
    pub const fn is_empty(&self) -> bool {
        self.hash.is_none()
            && self.status.is_none()
            && self.stream_url.is_none()
            && self.message.is_none()
            && self.title.is_none()
    }
}

impl From<FlatFields> for ServiceResponse {
    fn from(mut fields: FlatFields) -> Self {
        Self {
            hash: fields.take("hash"),
            status: fields.take("status"),
            stream_url: fields.take("stream_url"),
            message: fields.take("message"),
            title: fields.take("title"),
        }
    }
}

impl<'de> Deserialize<'de> for ServiceResponse {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        FlatFields::deserialize(deserializer).map(Self::from)
    }
}

/// Extract one string field from a raw response body.
///
/// Returns `None` when the body is not a JSON object, the field is missing,
/// or its value is `null` / `"null"`.
pub fn extract_field(body: &str, name: &str) -> Option<String> {
    FlatFields::parse(body).get(name).map(str::to_string)
}

/// Top-level keys of a flat object, in document order, first occurrence only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct FlatFields(Vec<(String, Option<String>)>);

impl FlatFields {
    fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .and_then(|(_, value)| value.as_deref())
    }

    fn take(&mut self, name: &str) -> Option<String> {
        self.0
            .iter_mut()
            .find(|(key, _)| key == name)
            .and_then(|(_, value)| value.take())
    }
}

impl<'de> Deserialize<'de> for FlatFields {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(FlatFieldsVisitor)
    }
}

struct FlatFieldsVisitor;

impl<'de> Visitor<'de> for FlatFieldsVisitor {
    type Value = FlatFields;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a flat JSON object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut fields: Vec<(String, Option<String>)> = Vec::new();
        while let Some(key) = map.next_key::<String>()? {
            // The value must be consumed even when the key is a duplicate.
            let value: Value = map.next_value()?;
            if fields.iter().any(|(seen, _)| *seen == key) {
                continue;
            }
            fields.push((key, scalar_text(value)));
        }
        Ok(FlatFields(fields))
    }
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) if s == "null" => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
