//! エラー型定義
//!
//! 統一エラー型（thiserror使用）
//!
//! `JarvisError`は`external_message()`と`status_code()`を提供し、
//! 内部情報（ファイルパスやデバイス詳細）を含まないHTTPレスポンスを生成できます。

use axum::http::StatusCode;
use thiserror::Error;

/// Common layer error type
#[derive(Debug, Error)]
pub enum CommonError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Audit server error type
#[derive(Debug, Error)]
pub enum JarvisError {
    /// Common layer error
    #[error(transparent)]
    Common(#[from] CommonError),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// No usable compute device
    #[error("Device unavailable: {0}")]
    DeviceUnavailable(String),

    /// Device probe failed
    #[error("Device probe failed: {0}")]
    Device(String),

    /// QR encoding error
    #[error("QR encoding failed: {0}")]
    Encode(String),

    /// Image write error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Timeout error
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl JarvisError {
    /// Returns a safe error message for external clients.
    ///
    /// The `Display` implementation carries the full details and is meant for
    /// server logs only.
    pub fn external_message(&self) -> &'static str {
        match self {
            Self::Common(_) => "Request error",
            Self::NotFound(_) => "Not found",
            Self::DeviceUnavailable(_) => "Compute device unavailable",
            Self::Device(_) => "Compute device error",
            Self::Encode(_) => "Failed to encode QR code",
            Self::Storage(_) => "Failed to write QR image",
            Self::Timeout(_) => "Request timeout",
            Self::Internal(_) => "Internal server error",
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Common(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::DeviceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Device(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Result type alias (Common)
pub type CommonResult<T> = Result<T, CommonError>;

/// Result type alias (audit server)
pub type JarvisResult<T> = Result<T, JarvisError>;
