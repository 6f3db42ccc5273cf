//! REST APIハンドラー
//!
//! ランディングページ、監査トリガー、静的ファイル配信

pub mod audit;
pub mod error;
pub mod pages;
pub mod system;

use crate::AppState;
use axum::{
    handler::HandlerWithoutStateExt,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

/// アプリケーションルーターを作成
///
/// 明示ルート以外の `GET /<path>` は `static_dir` から配信し、
/// 存在しないパスとドットで始まるパスはJSONの404を返す。
pub fn create_app(state: AppState) -> Router {
    let assets = ServeDir::new(&state.config.static_dir)
        .not_found_service(system::not_found.into_service());

    Router::new()
        .route("/", get(pages::index))
        .route("/nano", post(audit::run_audit))
        .route("/api/version", get(system::get_version))
        .fallback_service(assets)
        .layer(middleware::from_fn(system::hide_dotfiles))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
