//! Error types for the Early client.

use serde::Deserialize;

/// Result type for client operations.
pub type EarlyResult<T> = Result<T, EarlyError>;

/// Errors that can occur when talking to the Early API.
#[derive(Debug, thiserror::Error)]
pub enum EarlyError {
    /// `EARLY_API_KEY` / `EARLY_API_SECRET` missing from the environment.
    #[error("EARLY_API_KEY and EARLY_API_SECRET environment variables are required")]
    MissingCredentials,

    /// API returned a non-success response.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Referenced entry, tag, or session does not exist upstream.
    #[error("not found: {0}")]
    NotFound(String),

    /// Malformed parameters, caught before any network call.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl EarlyError {
    /// Create an error from a non-success status code and response body.
    ///
    /// 404 maps to [`EarlyError::NotFound`]; everything else carries the
    /// upstream body verbatim.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => parsed.into_message(),
            Err(_) => body.to_string(),
        };

        if status == 404 {
            Self::NotFound(message)
        } else {
            Self::Api { status, message }
        }
    }
}

/// Error body shape used by the Early API. Some endpoints return
/// `{"message": ...}`, others `{"error": ...}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> String {
        self.message.or(self.error).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_response_parses_message_body() {
        let err = EarlyError::from_response(409, r#"{"message":"tracking already running"}"#);
        match err {
            EarlyError::Api { status, message } => {
                assert_eq!(status, 409);
                assert_eq!(message, "tracking already running");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_from_response_maps_404_to_not_found() {
        let err = EarlyError::from_response(404, r#"{"error":"no such time entry"}"#);
        assert!(matches!(err, EarlyError::NotFound(msg) if msg == "no such time entry"));
    }

    #[test]
    fn test_from_response_keeps_unparseable_body() {
        let err = EarlyError::from_response(500, "Internal Server Error");
        match err {
            EarlyError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Internal Server Error");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }
}
