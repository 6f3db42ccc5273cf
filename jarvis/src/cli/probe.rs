//! probe サブコマンド
//!
//! 設定したデバイスプローブを1回実行し、ラベルとレイテンシを表示します。

use crate::common::error::JarvisResult;
use crate::config::{DeviceConfig, DeviceKind};
use crate::device;
use clap::Args;

/// デバイス関連の引数（serve / probe 共通）
#[derive(Args, Debug, Clone)]
pub struct DeviceArgs {
    /// Compute device used by the audit
    #[arg(long, value_enum, default_value_t = DeviceKind::None, env = "JARVIS_DEVICE")]
    pub device: DeviceKind,

    /// CUDA device ordinal
    #[arg(long, default_value_t = 0, env = "JARVIS_DEVICE_ORDINAL")]
    pub device_ordinal: usize,

    /// Hardware label reported in audit records (defaults to the detected GPU name)
    #[arg(long, env = "JARVIS_GPU_LABEL")]
    pub gpu_label: Option<String>,
}

impl DeviceArgs {
    /// デバイス設定に変換
    pub fn to_config(&self) -> DeviceConfig {
        DeviceConfig {
            kind: self.device,
            ordinal: self.device_ordinal,
            label: self.gpu_label.clone(),
        }
    }
}

/// probe サブコマンドの引数
#[derive(Args, Debug, Clone)]
pub struct ProbeArgs {
    /// Device options
    #[command(flatten)]
    pub device: DeviceArgs,
}

/// probe サブコマンドを実行
pub fn execute(args: &ProbeArgs) -> JarvisResult<()> {
    let config = args.device.to_config();
    match device::init(&config)? {
        Some(probe) => {
            let measurement = device::measure(probe.as_ref())?;
            println!("DEVICE\tLATENCY_MS");
            println!("{}\t{:.2}", measurement.label, measurement.latency_ms);
        }
        None => {
            println!("No compute device configured (use --device cuda)");
        }
    }
    Ok(())
}
