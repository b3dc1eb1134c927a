//! Error types for wifi-scout services.

use thiserror::Error;

/// Result type alias using WifiError.
pub type WifiResult<T> = Result<T, WifiError>;

/// Primary error type for wifi-scout operations.
#[derive(Debug, Error)]
pub enum WifiError {
    // === Request Errors ===
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    // === Scanning Errors ===
    #[error("Wi-Fi scan failed: {0}")]
    ScanFailed(String),

    #[error("No wireless interface available")]
    NoInterface,

    // === Speedtest Errors ===
    #[error("Speedtest failed: {0}")]
    Speedtest(String),

    // === Rendering Errors ===
    #[error("Rendering failed: {0}")]
    RenderError(String),

    // === Storage Errors ===
    #[error("Storage error: {0}")]
    StorageError(String),

    // === Assistant Errors ===
    #[error("Assistant unavailable: {0}")]
    AssistantUnavailable(String),

    // === Infrastructure Errors ===
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl WifiError {
    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            WifiError::MissingParameter(_) | WifiError::InvalidParameter { .. } => 400,

            WifiError::NoInterface => 404,

            WifiError::AssistantUnavailable(_) => 503,

            _ => 500,
        }
    }
}

// Conversion from common error types
impl From<std::io::Error> for WifiError {
    fn from(err: std::io::Error) -> Self {
        WifiError::InternalError(err.to_string())
    }
}

impl From<serde_json::Error> for WifiError {
    fn from(err: serde_json::Error) -> Self {
        WifiError::InternalError(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            WifiError::MissingParameter("width".to_string()).http_status_code(),
            400
        );
        assert_eq!(WifiError::NoInterface.http_status_code(), 404);
        assert_eq!(
            WifiError::AssistantUnavailable("no key".to_string()).http_status_code(),
            503
        );
        assert_eq!(
            WifiError::RenderError("singular system".to_string()).http_status_code(),
            500
        );
    }
}
