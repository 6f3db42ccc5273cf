//! System API

use super::error::AppError;
use crate::common::error::JarvisError;
use crate::common::types::VersionInfo;
use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

/// GET /api/version
pub async fn get_version() -> Json<VersionInfo> {
    Json(VersionInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// 静的ファイルが見つからない場合の404レスポンス
pub async fn not_found() -> AppError {
    AppError(JarvisError::NotFound("static asset".to_string()))
}

/// ドットで始まるパスセグメントを含むか（`%2e` エンコードも含む）
fn has_hidden_segment(path: &str) -> bool {
    path.split('/').any(|segment| {
        segment.starts_with('.')
            || segment
                .get(..3)
                .is_some_and(|head| head.eq_ignore_ascii_case("%2e"))
    })
}

/// 隠しファイル（書き込み中のQR一時ファイルなど）を配信しないミドルウェア
pub async fn hide_dotfiles(request: Request, next: Next) -> Response {
    if has_hidden_segment(request.uri().path()) {
        return AppError(JarvisError::NotFound("hidden path".to_string())).into_response();
    }
    next.run(request).await
}
