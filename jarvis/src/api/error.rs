//! APIエラーレスポンス型
//!
//! axum用の共通エラーハンドリング

use crate::common::error::JarvisError;
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// Axum用のエラーレスポンス型
#[derive(Debug)]
pub struct AppError(pub JarvisError);

impl From<JarvisError> for AppError {
    fn from(err: JarvisError) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        // 外部には external_message() のみ返し、詳細はログに残す
        let status = self.0.status_code();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self.0, "Request failed");
        } else if status != StatusCode::NOT_FOUND {
            tracing::warn!(status = status.as_u16(), error = %self.0, "Request rejected");
        }

        let payload = json!({
            "error": self.0.external_message()
        });

        (status, Json(payload)).into_response()
    }
}
