//! Error types for Notion requests.

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while talking to Notion or downloading files.
#[derive(Error, Debug)]
pub enum NotionError {
    /// Transport failure (connection, TLS, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Notion answered with a non-success status.
    #[error("Notion API error {status} {code}: {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    /// Response body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Endpoint URL could not be built.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A file download answered with a non-success status.
    #[error("download of {url} failed with status {status}")]
    Download { url: String, status: u16 },
}

/// Notion's error body: `{"object": "error", "status": 404, "code": "...", "message": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl NotionError {
    /// Builds an API error from a failed response's status and body.
    pub fn from_response(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => NotionError::Api {
                status,
                code: parsed.code,
                message: parsed.message,
            },
            Err(_) => NotionError::Api {
                status,
                code: "unknown".to_string(),
                message: body.trim().to_string(),
            },
        }
    }
}

/// Result type alias for Notion operations.
pub type Result<T> = std::result::Result<T, NotionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_response_parses_notion_error() {
        let body = r#"{"object":"error","status":404,"code":"object_not_found","message":"Could not find database"}"#;
        match NotionError::from_response(404, body) {
            NotionError::Api {
                status,
                code,
                message,
            } => {
                assert_eq!(status, 404);
                assert_eq!(code, "object_not_found");
                assert_eq!(message, "Could not find database");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_from_response_keeps_plain_body() {
        let err = NotionError::from_response(502, "Bad Gateway\n");
        assert_eq!(err.to_string(), "Notion API error 502 unknown: Bad Gateway");
    }
}
