//! Canonical analysis object extraction from loosely-shaped service responses

use crate::error::{AtsClientError, Result};
use log::debug;
use serde_json::Value;

/// The shapes the analysis service is known to answer with.
#[derive(Debug, Clone, PartialEq)]
pub enum WirePayload {
    /// `{ "analysis": "<JSON text>" }`
    EncodedString(String),
    /// `{ "analysis": { ... } }`, or an array there, which carries no
    /// analysis fields and renders as all placeholders.
    Nested(Value),
    /// The analysis fields sit at the top level.
    Direct(Value),
}

impl WirePayload {
    /// First match wins: a non-empty string, then an object or array, then the
    /// payload itself.
    pub fn detect(raw: Value) -> Self {
        match raw.get("analysis") {
            Some(Value::String(encoded)) if !encoded.is_empty() => {
                WirePayload::EncodedString(encoded.clone())
            }
            Some(nested @ (Value::Object(_) | Value::Array(_))) => WirePayload::Nested(nested.clone()),
            _ => WirePayload::Direct(raw),
        }
    }

    pub fn into_analysis(self) -> Result<Value> {
        match self {
            WirePayload::EncodedString(encoded) => serde_json::from_str(&encoded)
                .map_err(|e| AtsClientError::Parse(e.to_string())),
            WirePayload::Nested(nested) => Ok(nested),
            WirePayload::Direct(raw) => Ok(raw),
        }
    }
}

pub fn normalize(raw: Value) -> Result<Value> {
    let payload = WirePayload::detect(raw);
    debug!(
        "Analysis payload shape: {}",
        match &payload {
            WirePayload::EncodedString(_) => "encoded string",
            WirePayload::Nested(_) => "nested",
            WirePayload::Direct(_) => "direct",
        }
    );
    payload.into_analysis()
}
