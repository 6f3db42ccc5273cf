//! 監査APIハンドラー

use super::error::AppError;
use crate::common::types::AuditRecord;
use crate::AppState;
use axum::{extract::State, Json};
use tracing::info;

/// POST /nano - 監査を実行
///
/// ダイジェストをQRコード画像として書き出し、監査レコードを返す。
/// 画像の書き込みに失敗した場合は500を返し、プロセスは継続する。
pub async fn run_audit(State(state): State<AppState>) -> Result<Json<AuditRecord>, AppError> {
    let record = state.auditor.run().await?;

    info!(
        hash = %record.hash,
        latency_ms = ?record.latency_ms,
        image = %state.auditor.image_path().display(),
        "Audit completed"
    );

    Ok(Json(record))
}
