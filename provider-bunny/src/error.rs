//! Error types for the Bunny Stream provider

use thiserror::Error;

/// Bunny Stream provider errors
#[derive(Error, Debug)]
pub enum BunnyError {
    /// API request returned a non-success status; `body` keeps whatever the
    /// server sent for diagnostics
    #[error("Bunny API error (status {status}): {body}")]
    Api { status: u16, body: String },

    /// Failed to parse an API response body
    #[error("Failed to parse API response: {0}")]
    Parse(String),

    /// Transport-level failure from the HTTP client
    #[error(transparent)]
    Host(#[from] host_traits::error::HostError),
}

/// Result type for Bunny Stream operations
pub type Result<T> = std::result::Result<T, BunnyError>;

impl From<BunnyError> for host_traits::error::HostError {
    fn from(error: BunnyError) -> Self {
        match error {
            BunnyError::Api { status, body } => host_traits::error::HostError::OperationFailed(
                format!("API error (status {}): {}", status, body),
            ),
            BunnyError::Parse(msg) => {
                host_traits::error::HostError::OperationFailed(format!("Parse error: {}", msg))
            }
            BunnyError::Host(e) => e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = BunnyError::Api {
            status: 401,
            body: "Unauthorized".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "Bunny API error (status 401): Unauthorized"
        );
    }

    #[test]
    fn test_error_conversion() {
        let error = BunnyError::Parse("unexpected end of input".to_string());
        let host_error: host_traits::error::HostError = error.into();

        assert!(matches!(
            host_error,
            host_traits::error::HostError::OperationFailed(_)
        ));
    }
}
