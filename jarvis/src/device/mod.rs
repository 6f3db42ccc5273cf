//! 計算デバイスプローブ（GPU版）
//!
//! GPU上に固定サイズのバッファを確保して破棄し、その所要時間を計測する。
//! デバイスの有無は起動時に確認し、リクエスト処理中に初めて失敗することはない。

#[cfg(feature = "cuda")]
pub mod cuda;

use crate::common::error::{JarvisError, JarvisResult};
use crate::common::types::ProbeMeasurement;
use crate::config::{DeviceConfig, DeviceKind};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// プローブで確保するバッファの要素数
pub const PROBE_ELEMENTS: usize = 96;

/// 計算デバイスプローブ
pub trait DeviceProbe: Send + Sync {
    /// 監査レコードに載せるハードウェアラベル
    fn label(&self) -> &str;

    /// デバイス上にバッファを確保・同期・破棄する（計算は行わない）
    fn exercise(&self) -> JarvisResult<()>;
}

/// 共有プローブハンドル
pub type SharedProbe = Arc<dyn DeviceProbe>;

/// レイテンシを小数点以下2桁に丸める
pub fn round_latency(ms: f64) -> f64 {
    (ms * 100.0).round() / 100.0
}

/// プローブを1回実行し、経過時間を計測する
pub fn measure(probe: &dyn DeviceProbe) -> JarvisResult<ProbeMeasurement> {
    let start = Instant::now();
    probe.exercise()?;
    let elapsed = start.elapsed();
    Ok(ProbeMeasurement {
        latency_ms: round_latency(elapsed.as_secs_f64() * 1000.0),
        label: probe.label().to_string(),
    })
}

/// 設定に従ってプローブを初期化する
///
/// `DeviceKind::Cuda` の場合はデバイスを開いて1回プローブを実行し、
/// 使えなければ `JarvisError::DeviceUnavailable` を返す。
pub fn init(config: &DeviceConfig) -> JarvisResult<Option<SharedProbe>> {
    match config.kind {
        DeviceKind::None => Ok(None),
        DeviceKind::Cuda => {
            let probe = open_cuda(config)?;
            let warmup = measure(probe.as_ref()).map_err(|e| {
                JarvisError::DeviceUnavailable(format!("startup probe failed: {}", e))
            })?;
            info!(
                gpu = %warmup.label,
                latency_ms = warmup.latency_ms,
                "Device probe ready"
            );
            Ok(Some(probe))
        }
    }
}

#[cfg(feature = "cuda")]
fn open_cuda(config: &DeviceConfig) -> JarvisResult<SharedProbe> {
    let probe = cuda::CudaProbe::open(config.ordinal, config.label.clone())?;
    Ok(Arc::new(probe))
}

#[cfg(not(feature = "cuda"))]
fn open_cuda(_config: &DeviceConfig) -> JarvisResult<SharedProbe> {
    Err(JarvisError::DeviceUnavailable(
        "this binary was built without CUDA support; rebuild with `--features cuda`".to_string(),
    ))
}
