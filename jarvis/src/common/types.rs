//! 共通型定義

use serde::{Deserialize, Serialize};

/// 監査レコード
///
/// `POST /nano` のレスポンス。リクエストごとに生成され、構築後は変更されない。
/// CPU版では `latency_ms` と `gpu` はJSONに含まれない（`null`ではなくキー自体が無い）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// ISO-8601タイムスタンプ
    pub timestamp: String,
    /// SHA-256 16進ダイジェスト
    pub hash: String,
    /// デバイスプローブのレイテンシ（ミリ秒、小数点以下2桁）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<f64>,
    /// ハードウェアラベル
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpu: Option<String>,
}

/// デバイスプローブの計測結果
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeMeasurement {
    /// 経過時間（ミリ秒、小数点以下2桁に丸め済み）
    pub latency_ms: f64,
    /// ハードウェアラベル
    pub label: String,
}

/// バージョン情報レスポンス
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionInfo {
    /// クレートバージョン
    pub version: String,
}
