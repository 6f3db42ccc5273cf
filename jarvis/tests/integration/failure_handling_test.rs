//! Integration Test: 監査失敗時のエラーレスポンス
//!
//! 画像書き込み失敗・デバイス障害はJSONエラーとして返し、
//! サーバーは後続のリクエストを処理し続ける。

use crate::support::{
    body_bytes, build_app_with, post_audit, send, test_config, FailingProbe,
};
use axum::http::StatusCode;
use jarvis::device::SharedProbe;
use std::sync::Arc;

/// 画像の出力先ディレクトリが作れない場合は500
#[tokio::test]
async fn test_image_write_failure_returns_500_and_server_survives() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(&dir);
    // ディレクトリであるべき場所に通常ファイルを置く
    let blocker = config.static_dir.join("qr");
    std::fs::write(&blocker, b"not a directory").unwrap();
    config.image_path = blocker.join("nano_qr.png");
    let app = build_app_with(config, dir, None);

    let (status, body) = post_audit(app.router()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to write QR image");
    assert!(!body.to_string().contains("nano_qr.png"));

    let index = send(app.router(), "GET", "/").await;
    assert_eq!(index.status(), StatusCode::OK);
}

/// 実行中にデバイスが失われた場合は503
#[tokio::test]
async fn test_device_failure_returns_503() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&dir);
    let probe: SharedProbe = Arc::new(FailingProbe);
    let app = build_app_with(config, dir, Some(probe));

    let response = send(app.router(), "POST", "/nano").await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body["error"], "Compute device error");
    assert!(!app.image_path().exists());
}
