//! Errors from talking to the forms API

use thiserror::Error;

use crate::state::ErrorBody;

pub type ApiResult<T> = Result<T, ApiError>;

/// Any failed request. Nothing is retried; callers surface the message.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-success status
    #[error("request failed with status {status}")]
    Status { status: u16, message: Option<String> },

    /// The request never produced a response
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// A success response whose body we could not read
    #[error("unexpected response body: {0}")]
    Decode(String),

    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(String),
}

impl ApiError {
    /// Build a status error from a raw response body, keeping its `message` if any
    pub fn from_status(status: u16, body: &str) -> Self {
        Self::Status {
            status,
            message: server_message(body),
        }
    }

    /// Human-readable message sent by the server
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Message to show the user: the server's, or `fallback`
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(fallback)
            .to_string()
    }
}

fn server_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_reads_message() {
        let err = ApiError::from_status(404, r#"{"error": "Not Found", "message": "Form not found"}"#);
        assert_eq!(err.server_message(), Some("Form not found"));
        assert_eq!(err.user_message("Failed to fetch form"), "Form not found");
    }

    #[test]
    fn test_from_status_without_message() {
        let err = ApiError::from_status(500, r#"{"error": "Internal Server Error"}"#);
        assert_eq!(err.server_message(), None);
        assert_eq!(err.user_message("Failed to fetch forms"), "Failed to fetch forms");
    }

    #[test]
    fn test_from_status_with_non_json_body() {
        let err = ApiError::from_status(502, "<html>Bad Gateway</html>");
        assert_eq!(err.user_message("Failed to save form"), "Failed to save form");
    }

    #[test]
    fn test_blank_message_falls_back() {
        let err = ApiError::Status {
            status: 400,
            message: Some("  ".to_string()),
        };
        assert_eq!(err.user_message("Failed to delete form"), "Failed to delete form");
    }

    #[test]
    fn test_decode_error_uses_fallback() {
        let err = ApiError::Decode("missing field `forms`".to_string());
        assert_eq!(err.user_message("Failed to fetch forms"), "Failed to fetch forms");
        assert!(err.to_string().contains("missing field"));
    }

    #[test]
    fn test_status_display() {
        let err = ApiError::from_status(401, "");
        assert_eq!(err.to_string(), "request failed with status 401");
    }
}
