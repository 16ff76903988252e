//! Error types module
//!
//! All failures that reach the HTTP boundary are unified under `AppError`.
//! Each variant describes itself through `ErrorMetadata` so the response
//! mapping stays in one place.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for rejected input the engine could not process
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "VALIDATION_ERROR")
    fn error_code(&self) -> &'static str;

    /// Short variant name used in structured logs
    fn error_type(&self) -> &'static str;

    /// Client-facing message
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Missing main image, rejected upload, malformed multipart body
    #[error("{0}")]
    InvalidInput(String),

    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    /// The image engine rejected a step
    #[error("{0}")]
    ImageProcessing(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{message}")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

/// Static metadata for each variant: (error_code, error_type, log_level).
fn app_error_static_metadata(err: &AppError) -> (&'static str, &'static str, LogLevel) {
    match err {
        AppError::InvalidInput(_) => ("VALIDATION_ERROR", "InvalidInput", LogLevel::Debug),
        AppError::PayloadTooLarge(_) => ("PAYLOAD_TOO_LARGE", "PayloadTooLarge", LogLevel::Debug),
        AppError::ImageProcessing(_) => ("ENGINE_ERROR", "ImageProcessing", LogLevel::Warn),
        AppError::Internal(_) => ("INTERNAL_ERROR", "Internal", LogLevel::Error),
        AppError::InternalWithSource { .. } => ("INTERNAL_ERROR", "Internal", LogLevel::Error),
    }
}

impl ErrorMetadata for AppError {
    /// Every failure is reported as 500; clients read the message.
    fn http_status_code(&self) -> u16 {
        500
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).0
    }

    fn error_type(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn client_message(&self) -> String {
        self.to_string()
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).2
    }
}
