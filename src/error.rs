use thiserror::Error;

pub const NOT_CONFIGURED_MESSAGE: &str = "API service is not configured.";
pub const MALFORMED_RESPONSE_MESSAGE: &str = "AI response was empty or malformed.";
pub const UPSTREAM_FALLBACK_MESSAGE: &str = "Google API Error";
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Method Not Allowed")]
    MethodNotAllowed,
    /// Carries the names of the absent fields for logging; the caller only sees the fixed message.
    #[error("Missing userQuery or systemPrompt")]
    MissingFields(Vec<String>),
    #[error("{}", NOT_CONFIGURED_MESSAGE)]
    NotConfigured,
    #[error("{0}")]
    Upstream(String),
    #[error("{}", MALFORMED_RESPONSE_MESSAGE)]
    MalformedResponse,
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Unexpected(e.into())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_caller_messages() {
        assert_eq!(AppError::MethodNotAllowed.to_string(), "Method Not Allowed");
        assert_eq!(
            AppError::MissingFields(vec!["userQuery".into()]).to_string(),
            "Missing userQuery or systemPrompt"
        );
        assert_eq!(AppError::NotConfigured.to_string(), "API service is not configured.");
        assert_eq!(AppError::Upstream("quota exceeded".into()).to_string(), "quota exceeded");
        assert_eq!(AppError::MalformedResponse.to_string(), "AI response was empty or malformed.");
    }

    #[test]
    fn json_errors_become_unexpected() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let app: AppError = err.into();
        assert!(matches!(app, AppError::Unexpected(_)));
        assert!(!app.to_string().is_empty());
    }
}
