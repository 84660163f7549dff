use serde_json::Value;

use crate::{EncodingError, Result};

/// The payload kind describes how the decrypted bytes map back to a value. Encryption always
/// happens on UTF-8 text, and this marker is carried (and authenticated) inside the envelope so
/// that decoding does not have to guess whether the text was a plain string or serialized JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    /// The plaintext is a string stored verbatim
    Text,
    /// The plaintext is a serialized JSON value
    Json,
}

impl PayloadKind {
    pub(crate) fn marker(&self) -> &'static str {
        match self {
            PayloadKind::Text => "t",
            PayloadKind::Json => "j",
        }
    }

    pub(crate) fn from_marker(marker: &str) -> Result<Self> {
        match marker {
            "t" => Ok(PayloadKind::Text),
            "j" => Ok(PayloadKind::Json),
            _ => Err(EncodingError::UnknownPayloadKind.into()),
        }
    }

    /// Serialize a value to the text that gets encrypted. Strings pass through unchanged,
    /// everything else is serialized as JSON with object keys in sorted order.
    pub(crate) fn serialize(value: &Value) -> Result<(Self, String)> {
        match value {
            Value::String(text) => Ok((PayloadKind::Text, text.clone())),
            other => Ok((
                PayloadKind::Json,
                serde_json::to_string(other).map_err(EncodingError::InvalidJson)?,
            )),
        }
    }

    /// Recover a value from decrypted text.
    ///
    /// Untagged envelopes predate the kind marker. For those, text starting with `{` is read as a
    /// JSON object and anything else as a plain string, so arrays and scalars written by older
    /// encoders come back as strings.
    pub(crate) fn deserialize(kind: Option<Self>, text: String) -> Result<Value> {
        match kind {
            Some(PayloadKind::Text) => Ok(Value::String(text)),
            Some(PayloadKind::Json) => Ok(parse_json(&text)?),
            None if text.starts_with('{') => Ok(parse_json(&text)?),
            None => Ok(Value::String(text)),
        }
    }
}

fn parse_json(text: &str) -> Result<Value, EncodingError> {
    Ok(serde_json::from_str(text)?)
}
