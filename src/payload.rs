use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("payload is empty")]
    Empty,
    #[error("payload is neither JSON nor JSON5: {json}")]
    Syntax {
        json: serde_json::Error,
        #[source]
        json5: json5::Error,
    },
}

/// Parses section data text into a JSON value.
///
/// Strict JSON is tried first; hand-written payloads with comments, single
/// quotes or trailing commas fall back to JSON5.
pub fn parse_payload(text: &str) -> Result<Value, PayloadError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(PayloadError::Empty);
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => Ok(value),
        Err(json) => match json5::from_str::<Value>(trimmed) {
            Ok(value) => {
                tracing::debug!("payload parsed as JSON5");
                Ok(value)
            }
            Err(json5) => Err(PayloadError::Syntax { json, json5 }),
        },
    }
}
