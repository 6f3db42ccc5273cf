//! 監査処理
//!
//! 定数入力のダイジェスト計算、（GPU版のみ）デバイスプローブ、
//! QRコード画像の書き込みを行い、監査レコードを返す。

/// ダイジェスト計算
pub mod hasher;

/// QRコード生成
pub mod qr;

/// 監査レコード・タイムスタンプ
pub mod record;

use crate::common::error::{JarvisError, JarvisResult};
use crate::common::types::{AuditRecord, ProbeMeasurement};
use crate::config::AppConfig;
use crate::device::{self, SharedProbe};
use record::MonotonicClock;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

type ImageWriter = fn(&Path, &str) -> JarvisResult<()>;

/// 監査処理の実行者
///
/// 起動時に1つだけ生成し、`AppState` 経由で全リクエストから共有する。
pub struct Auditor {
    input: Vec<u8>,
    image_path: PathBuf,
    timeout: Duration,
    probe: Option<SharedProbe>,
    // デバイスへのアクセスは同時に1つまで
    probe_lock: Arc<Mutex<()>>,
    clock: MonotonicClock,
    write_image: ImageWriter,
}

impl Auditor {
    /// 設定とプローブから生成
    pub fn new(config: &AppConfig, probe: Option<SharedProbe>) -> Self {
        Self {
            input: config.audit_input.clone(),
            image_path: config.image_path.clone(),
            timeout: config.audit_timeout,
            probe,
            probe_lock: Arc::new(Mutex::new(())),
            clock: MonotonicClock::default(),
            write_image: qr::write_qr,
        }
    }

    /// QR画像の出力先
    pub fn image_path(&self) -> &Path {
        &self.image_path
    }

    /// デバイスプローブが設定されているか
    pub fn has_probe(&self) -> bool {
        self.probe.is_some()
    }

    /// 監査を1回実行する
    pub async fn run(&self) -> JarvisResult<AuditRecord> {
        let hash = hasher::digest_hex(&self.input);

        let measurement = match &self.probe {
            Some(probe) => Some(self.measure(probe.clone()).await?),
            None => None,
        };

        let timestamp = self.clock.now();
        let record = record::build_record(&timestamp, hash, measurement);

        let path = self.image_path.clone();
        let data = record.hash.clone();
        let write_image = self.write_image;
        self.blocking("QR image write", move || write_image(&path, &data))
            .await?;

        Ok(record)
    }

    async fn measure(&self, probe: SharedProbe) -> JarvisResult<ProbeMeasurement> {
        let lock = self.probe_lock.clone();
        // ロック待ちはブロッキングスレッドを消費しない。
        // 実行中のプローブはタイムアウト後もガードを保持し、終わるまで次を待たせる。
        let task = async move {
            let guard = lock.lock_owned().await;
            tokio::task::spawn_blocking(move || {
                let _guard = guard;
                device::measure(probe.as_ref())
            })
            .await
        };
        with_timeout("device probe", self.timeout, task).await
    }

    async fn blocking<T, F>(&self, what: &'static str, f: F) -> JarvisResult<T>
    where
        T: Send + 'static,
        F: FnOnce() -> JarvisResult<T> + Send + 'static,
    {
        with_timeout(what, self.timeout, tokio::task::spawn_blocking(f)).await
    }
}

async fn with_timeout<T, Fut>(what: &'static str, timeout: Duration, task: Fut) -> JarvisResult<T>
where
    Fut: Future<Output = Result<JarvisResult<T>, tokio::task::JoinError>>,
{
    match tokio::time::timeout(timeout, task).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_err)) => Err(JarvisError::Internal(format!(
            "{} task failed: {}",
            what, join_err
        ))),
        Err(_) => Err(JarvisError::Timeout(format!(
            "{} exceeded {}ms",
            what,
            timeout.as_millis()
        ))),
    }
}
