//! JARVIS Offline audit server
//!
//! ボタン1つで定数ダイジェストのQRコードと監査レコードを返すHTTPサーバー

#![warn(missing_docs)]

/// 共通型定義・エラー
pub mod common;

/// REST APIハンドラー
pub mod api;

/// 監査処理（ダイジェスト・QRコード・レコード）
pub mod audit;

/// 計算デバイスプローブ
pub mod device;

/// ロギング初期化ユーティリティ
pub mod logging;

/// 設定管理
pub mod config;

/// CLIインターフェース
pub mod cli;

/// axumサーバー起動
pub mod server;

/// Shutdown controller
pub mod shutdown;

use common::error::CommonResult;
use std::sync::Arc;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// サーバー設定
    pub config: Arc<config::AppConfig>,
    /// 監査処理
    pub auditor: Arc<audit::Auditor>,
    /// 描画済みランディングページ
    pub landing_page: Arc<str>,
    /// Cooperative shutdown controller
    pub shutdown: shutdown::ShutdownController,
}

impl AppState {
    /// 設定と（起動時に初期化済みの）デバイスプローブから状態を構築
    pub fn new(config: config::AppConfig, probe: Option<device::SharedProbe>) -> CommonResult<Self> {
        config.validate()?;
        let landing_page = api::pages::render_index(&config.image_url()?);
        let auditor = audit::Auditor::new(&config, probe);
        Ok(Self {
            config: Arc::new(config),
            auditor: Arc::new(auditor),
            landing_page: Arc::from(landing_page),
            shutdown: shutdown::ShutdownController::default(),
        })
    }
}
