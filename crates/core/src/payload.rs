//! JSON payload parsing.
//!
//! Form state and backend responses reach the validators as JSON. Parsing is lenient about
//! missing keys (every payload field is optional) but strict about types, and a type mismatch
//! is reported with the path of the offending field.

use serde::de::DeserializeOwned;

use crate::error::{LimsError, LimsResult};

/// Parses a JSON payload, surfacing a best-effort path (e.g. `tipoDeAgua.tipo`) on failure.
///
/// # Arguments
///
/// * `json_text` - JSON text expected to represent a `T`.
///
/// # Errors
///
/// Returns [`LimsError::InvalidPayload`] if the text is not valid JSON, has trailing
/// characters, or a field has an unexpected type.
pub fn parse_json<T: DeserializeOwned>(json_text: &str) -> LimsResult<T> {
    let mut deserializer = serde_json::Deserializer::from_str(json_text);
    let parsed = match serde_path_to_error::deserialize::<_, T>(&mut deserializer) {
        Ok(parsed) => parsed,
        Err(err) => {
            let path = err.path().to_string();
            let source = err.into_inner();
            let path = if path.is_empty() || path == "." {
                "<root>".to_string()
            } else {
                path
            };
            return Err(LimsError::InvalidPayload {
                path,
                message: source.to_string(),
            });
        }
    };

    deserializer
        .end()
        .map_err(|e| LimsError::InvalidPayload {
            path: "<root>".into(),
            message: e.to_string(),
        })?;

    Ok(parsed)
}
