//! axumサーバー起動・シャットダウンハンドリング

use crate::audit::qr;
use crate::common::error::{JarvisError, JarvisResult};
use crate::config::AppConfig;
use crate::shutdown::ShutdownController;
use crate::AppState;
use std::path::Path;
use tracing::{info, warn};

/// 静的ファイルディレクトリとQR画像の出力先ディレクトリを作成
///
/// 前回の異常終了で残ったQR一時ファイルもここで削除する。
pub async fn prepare_dirs(config: &AppConfig) -> JarvisResult<()> {
    for dir in [config.static_dir.as_path(), config.image_dir()] {
        tokio::fs::create_dir_all(dir).await.map_err(|e| {
            JarvisError::Storage(format!("failed to create {}: {}", dir.display(), e))
        })?;
    }
    sweep_stale_temp_files(config.image_dir()).await
}

async fn sweep_stale_temp_files(dir: &Path) -> JarvisResult<()> {
    let storage_err =
        |e: std::io::Error| JarvisError::Storage(format!("failed to read {}: {}", dir.display(), e));

    let mut entries = tokio::fs::read_dir(dir).await.map_err(storage_err)?;
    while let Some(entry) = entries.next_entry().await.map_err(storage_err)? {
        let name = entry.file_name();
        if !name.to_str().is_some_and(qr::is_temp_file_name) {
            continue;
        }
        let path = entry.path();
        match tokio::fs::remove_file(&path).await {
            Ok(()) => info!(path = %path.display(), "Removed stale QR temp file"),
            Err(e) => warn!(path = %path.display(), error = %e, "Failed to remove stale QR temp file"),
        }
    }
    Ok(())
}

/// axumサーバーを起動し、シャットダウンシグナルを待機する
///
/// 静的ファイルディレクトリは接続受け付け前に作成する。
pub async fn run(state: AppState) -> JarvisResult<()> {
    prepare_dirs(&state.config).await?;

    let shutdown = state.shutdown.clone();
    let bind_addr = state.config.bind_addr();

    let app = crate::api::create_app(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| JarvisError::Internal(format!("failed to bind {}: {}", bind_addr, e)))?;

    info!("JARVIS audit server listening on {}", bind_addr);

    let shutdown_signal = shutdown_signal(shutdown);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|e| JarvisError::Internal(format!("server error: {}", e)))?;

    info!("Server shutdown complete");
    Ok(())
}

/// シャットダウンシグナルを待機
async fn shutdown_signal(shutdown: ShutdownController) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down...");
        }
        _ = shutdown.wait() => {
            info!("Shutdown requested, shutting down...");
        }
    }
}
