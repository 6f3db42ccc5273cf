//! Contract Test: POST /nano

use crate::support::{build_app, build_gpu_app, post_audit, send};
use axum::http::StatusCode;
use chrono::DateTime;
use sha2::{Digest, Sha256};

fn expected_digest() -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"nano");
    format!("{:x}", hasher.finalize())
}

/// POST /nano - 定数 "nano" のSHA-256ダイジェストを返す
#[tokio::test]
async fn test_audit_returns_sha256_of_constant() {
    let app = build_app();

    let (status, body) = post_audit(app.router()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hash"], expected_digest());
}

/// ダイジェストは呼び出し間で不変
#[tokio::test]
async fn test_audit_hash_is_constant_across_calls() {
    let app = build_app();

    let (_, first) = post_audit(app.router()).await;
    let (_, second) = post_audit(app.router()).await;

    assert_eq!(first["hash"], second["hash"]);
}

/// タイムスタンプはISO-8601で、連続呼び出しで減少しない
#[tokio::test]
async fn test_audit_timestamps_are_iso8601_and_non_decreasing() {
    let app = build_app();
    let mut previous = None;

    for _ in 0..5 {
        let (status, body) = post_audit(app.router()).await;
        assert_eq!(status, StatusCode::OK);

        let ts = body["timestamp"].as_str().expect("timestamp must be a string");
        let parsed = DateTime::parse_from_rfc3339(ts).expect("timestamp must be ISO-8601");
        if let Some(prev) = previous {
            assert!(parsed >= prev, "{} went backwards from {}", parsed, prev);
        }
        previous = Some(parsed);
    }
}

/// CPU版ではlatency_msとgpuキー自体が存在しない
#[tokio::test]
async fn test_cpu_variant_omits_device_fields() {
    let app = build_app();

    let (_, body) = post_audit(app.router()).await;

    let obj = body.as_object().unwrap();
    assert!(!obj.contains_key("latency_ms"));
    assert!(!obj.contains_key("gpu"));
    assert_eq!(obj.len(), 2);
}

/// GPU版ではlatency_ms（0以上の数値）とgpuラベルを返す
#[tokio::test]
async fn test_gpu_variant_reports_latency_and_label() {
    let app = build_gpu_app("RTX 4050");

    let (status, body) = post_audit(app.router()).await;

    assert_eq!(status, StatusCode::OK);
    let latency = body["latency_ms"].as_f64().expect("latency_ms must be numeric");
    assert!(latency >= 0.0);
    assert_eq!(body["gpu"], "RTX 4050");
    assert_eq!(body["hash"], expected_digest());
}

/// 監査後、QR画像が出力先に存在し、デコード可能
#[tokio::test]
async fn test_audit_writes_decodable_qr_image() {
    let app = build_app();

    for _ in 0..2 {
        let (status, _) = post_audit(app.router()).await;
        assert_eq!(status, StatusCode::OK);

        let bytes = std::fs::read(app.image_path()).expect("QR image must exist");
        assert!(!bytes.is_empty());
        let image = image::load_from_memory(&bytes).expect("QR image must decode");
        assert!(image.width() > 0);
    }
}

/// GET /nano は許可されない
#[tokio::test]
async fn test_audit_requires_post() {
    let app = build_app();

    let response = send(app.router(), "GET", "/nano").await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
