//! Contract Test: GET / と GET /<path>

use crate::support::{body_bytes, build_app, post_audit, send};
use axum::http::{header, StatusCode};

/// GET / - ランディングページ（HTML）
#[tokio::test]
async fn test_index_returns_html_landing_page() {
    let app = build_app();

    let response = send(app.router(), "GET", "/").await;

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/html"));

    let html = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(html.contains("JARVIS Offline"));
    assert!(html.contains("Run Nano-Perfection"));
    assert!(html.contains("\"/nano_qr.png\""));
}

/// 存在する静的ファイルはバイト列そのままを返す
#[tokio::test]
async fn test_existing_asset_returns_exact_bytes() {
    let app = build_app();
    let payload: Vec<u8> = (0u8..=255).chain(b"bundle".iter().copied()).collect();
    std::fs::create_dir_all(app.static_dir().join("assets")).unwrap();
    std::fs::write(app.static_dir().join("assets/app.js"), &payload).unwrap();

    let response = send(app.router(), "GET", "/assets/app.js").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, payload);
}

/// 存在しないパスは404（JSONエラーボディ）
#[tokio::test]
async fn test_missing_asset_returns_404_json() {
    let app = build_app();

    let response = send(app.router(), "GET", "/does-not-exist.css").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body["error"], "Not found");
}

/// 静的ディレクトリ外へのパストラバーサルは配信しない
#[tokio::test]
async fn test_path_traversal_is_not_served() {
    let app = build_app();
    std::fs::write(app.dir.path().join("secret.txt"), b"top secret").unwrap();

    let response = send(app.router(), "GET", "/../secret.txt").await;

    assert_ne!(response.status(), StatusCode::OK);
    assert!(!body_bytes(response).await.starts_with(b"top secret"));
}

/// 監査で書き出したQR画像を静的パスから取得できる（キャッシュ回避クエリ付き）
#[tokio::test]
async fn test_qr_image_served_after_audit() {
    let app = build_app();

    let before = send(app.router(), "GET", "/nano_qr.png").await;
    assert_eq!(before.status(), StatusCode::NOT_FOUND);

    let (status, _) = post_audit(app.router()).await;
    assert_eq!(status, StatusCode::OK);

    let response = send(app.router(), "GET", "/nano_qr.png?1760000000000").await;
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert_eq!(content_type, "image/png");

    let served = body_bytes(response).await;
    assert_eq!(served, std::fs::read(app.image_path()).unwrap());
}

/// 書き込み途中のQR一時ファイルなど、ドットで始まるファイルは配信しない
#[tokio::test]
async fn test_dotfiles_are_not_served() {
    let app = build_app();
    std::fs::write(app.static_dir().join(".qr-Ab12Cd.tmp"), b"partial png").unwrap();

    for uri in ["/.qr-Ab12Cd.tmp", "/%2Eqr-Ab12Cd.tmp"] {
        let response = send(app.router(), "GET", uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", uri);
        let body: serde_json::Value =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["error"], "Not found");
    }
}
