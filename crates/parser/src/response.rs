//! The `{success, ...}` envelope returned across the public boundary.
//!
//! Editors talk to the translator through JSON. Every call answers with
//! either `{"success": true, ...payload}` or
//! `{"success": false, "error": "<message>"}`; no error or panic escapes
//! a guarded operation.

use serde::ser::{Error as _, SerializeMap};
use serde::{Serialize, Serializer};
use std::panic::{self, AssertUnwindSafe};

use crate::error::{FlowLangError, Result};

/// Discriminated result of a public operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Response<T> {
    Success(T),
    Failure { error: String },
}

impl<T> Response<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success(_))
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Response::Failure {
            error: error.into(),
        }
    }

    /// The error message, if this is a failure.
    pub fn error(&self) -> Option<&str> {
        match self {
            Response::Success(_) => None,
            Response::Failure { error } => Some(error),
        }
    }

    pub fn into_result(self) -> std::result::Result<T, String> {
        match self {
            Response::Success(payload) => Ok(payload),
            Response::Failure { error } => Err(error),
        }
    }
}

impl<T> From<Result<T>> for Response<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(payload) => Response::Success(payload),
            Err(err) => {
                tracing::warn!(error = %err, "operation failed");
                Response::failure(err.to_string())
            }
        }
    }
}

impl<T: Serialize> Serialize for Response<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Response::Success(payload) => {
                // Flatten the payload's fields next to `success`.
                let value = serde_json::to_value(payload).map_err(S::Error::custom)?;
                let fields = match value {
                    serde_json::Value::Object(fields) => fields,
                    other => {
                        let mut fields = serde_json::Map::new();
                        fields.insert("result".to_string(), other);
                        fields
                    }
                };
                let mut map = serializer.serialize_map(Some(fields.len() + 1))?;
                for (key, value) in &fields {
                    map.serialize_entry(key, value)?;
                }
                map.serialize_entry("success", &true)?;
                map.end()
            }
            Response::Failure { error } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("error", error)?;
                map.serialize_entry("success", &false)?;
                map.end()
            }
        }
    }
}

/// Run `operation`, turning both errors and panics into a failure response.
pub fn respond<T, F>(operation: F) -> Response<T>
where
    F: FnOnce() -> Result<T>,
{
    match panic::catch_unwind(AssertUnwindSafe(operation)) {
        Ok(result) => result.into(),
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Response::from(Err::<T, _>(FlowLangError::Internal(message)))
        }
    }
}

/// Serialize a response as JSON.
///
/// Falls back to a hand-written failure envelope if the payload itself
/// cannot be serialized.
pub fn to_json<T: Serialize>(response: &Response<T>) -> String {
    serde_json::to_string(response).unwrap_or_else(|err| {
        let error = serde_json::Value::String(err.to_string());
        format!(r#"{{"error":{},"success":false}}"#, error)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serializer::SyncOutput;
    use serde_json::json;

    #[test]
    fn test_success_flattens_payload() {
        let response = Response::Success(SyncOutput {
            flowlang_code: "Diagram".to_string(),
        });
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value, json!({"flowlang_code": "Diagram", "success": true}));
    }

    #[test]
    fn test_failure_shape() {
        let response: Response<SyncOutput> = Response::failure("bad input");
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value, json!({"error": "bad input", "success": false}));
        assert_eq!(response.error(), Some("bad input"));
    }

    #[test]
    fn test_non_object_payload_is_wrapped() {
        let value = serde_json::to_value(Response::Success(3)).unwrap();
        assert_eq!(value, json!({"result": 3, "success": true}));
    }

    #[test]
    fn test_respond_converts_errors() {
        let response: Response<()> =
            respond(|| Err(FlowLangError::Internal("nope".to_string())));
        assert!(!response.is_success());
        assert_eq!(response.error(), Some("internal error: nope"));
    }

    #[test]
    fn test_respond_catches_panics() {
        let response: Response<()> = respond(|| panic!("exploded"));
        assert_eq!(response.error(), Some("internal error: exploded"));
    }

    #[test]
    fn test_into_result() {
        let ok = Response::Success(SyncOutput::default()).into_result();
        assert_eq!(ok, Ok(SyncOutput::default()));

        let err: std::result::Result<SyncOutput, String> =
            respond(|| Err(FlowLangError::Internal("nope".to_string()))).into_result();
        assert_eq!(err, Err("internal error: nope".to_string()));
    }

    #[test]
    fn test_to_json_failure() {
        let response: Response<()> = Response::failure("x");
        assert_eq!(to_json(&response), r#"{"error":"x","success":false}"#);
    }
}
