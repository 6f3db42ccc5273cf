//! ロギング初期化
//!
//! 標準出力へのテキストログに加え、`JARVIS_LOG_DIR` 指定時は
//! 日次ローテーションのJSONログファイルを出力する。

use crate::config::get_env_or;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// ログファイル名のプレフィックス
pub const LOG_FILE_PREFIX: &str = "jarvis.log";

/// ログレベルフィルタを構築
///
/// `RUST_LOG` が設定されていればそれを優先し、未設定時は
/// `JARVIS_LOG_LEVEL`（デフォルト: `info`）を使う。
pub fn build_filter() -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(get_env_or("JARVIS_LOG_LEVEL", "info")))
}

/// ログ出力ディレクトリ（`JARVIS_LOG_DIR`）
pub fn log_dir() -> Option<PathBuf> {
    std::env::var_os("JARVIS_LOG_DIR")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// グローバルsubscriberを初期化
///
/// 返された `WorkerGuard` はプロセス終了までDropしないこと
/// （Drop時にファイルへの書き込みがフラッシュされる）。
pub fn init() -> Result<Option<WorkerGuard>, String> {
    let stdout_layer = fmt::layer().with_target(false).with_filter(build_filter());

    let (file_layer, guard) = match log_dir() {
        Some(dir) => {
            std::fs::create_dir_all(&dir).map_err(|e| {
                format!("failed to create log directory {}: {}", dir.display(), e)
            })?;
            let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .json()
                .with_writer(writer)
                .with_filter(build_filter());
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| e.to_string())?;

    Ok(guard)
}
