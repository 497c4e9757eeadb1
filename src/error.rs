//! Error types for the Megaverse model and transport.

use thiserror::Error;

/// Errors raised while constructing or decoding model values.
///
/// These indicate a contract violation between the remote payload and the
/// model. They are never coerced: the construction or decode call fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A position or entity attribute outside its domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A grid that is empty or whose rows differ in length.
    #[error("invalid shape: {0}")]
    InvalidShape(String),

    /// A type discriminant or goal token outside the known variants.
    #[error("unrecognized astral object type: {0}")]
    UnrecognizedType(String),
}

/// Errors raised by the remote service transport.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The endpoint URL could not be built from the base URL.
    #[error("invalid endpoint {path}: {message}")]
    Url {
        /// Relative path that failed to resolve.
        path: String,
        /// Parser message.
        message: String,
    },

    /// The request never produced a response (connection, timeout, ...).
    #[error("request failed: {0}")]
    Request(String),

    /// The service answered with a status other than 200.
    #[error("unexpected status {0}")]
    Status(u16),

    /// The response body was not the expected JSON shape.
    #[error("malformed response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Request(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrecognized_type_names_value() {
        let err = ModelError::UnrecognizedType("9".to_string());
        assert!(err.to_string().contains('9'));
    }

    #[test]
    fn test_status_display() {
        let err = ApiError::Status(429);
        assert_eq!(err.to_string(), "unexpected status 429");
    }
}
