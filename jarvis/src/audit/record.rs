//! 監査レコードの組み立てとタイムスタンプ

use crate::common::types::{AuditRecord, ProbeMeasurement};
use chrono::{DateTime, Local, SecondsFormat};
use std::sync::Mutex;

/// 単調非減少なタイムスタンプを発行する時計
///
/// 壁時計が巻き戻った場合は直前に発行した時刻を返す。
#[derive(Debug, Default)]
pub struct MonotonicClock {
    last: Mutex<Option<DateTime<Local>>>,
}

impl MonotonicClock {
    /// 現在時刻
    pub fn now(&self) -> DateTime<Local> {
        self.observe(Local::now())
    }

    /// `now` を観測し、直前の発行時刻より前なら直前の時刻を返す
    pub fn observe(&self, now: DateTime<Local>) -> DateTime<Local> {
        let mut last = self.last.lock().unwrap_or_else(|p| p.into_inner());
        let issued = match *last {
            Some(prev) if prev > now => prev,
            _ => now,
        };
        *last = Some(issued);
        issued
    }
}

/// ISO-8601（オフセット付き、マイクロ秒精度）に整形
pub fn format_timestamp(ts: &DateTime<Local>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, false)
}

/// 監査レコードを組み立てる
pub fn build_record(
    timestamp: &DateTime<Local>,
    hash: String,
    measurement: Option<ProbeMeasurement>,
) -> AuditRecord {
    let (latency_ms, gpu) = match measurement {
        Some(m) => (Some(m.latency_ms), Some(m.label)),
        None => (None, None),
    };
    AuditRecord {
        timestamp: format_timestamp(timestamp),
        hash,
        latency_ms,
        gpu,
    }
}
