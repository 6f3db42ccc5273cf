//! serve サブコマンド
//!
//! 監査サーバーを起動します。

use super::probe::DeviceArgs;
use crate::common::error::JarvisResult;
use crate::config::{
    AppConfig, DEFAULT_AUDIT_INPUT, DEFAULT_AUDIT_TIMEOUT_SECS, DEFAULT_HOST, DEFAULT_PORT,
    DEFAULT_STATIC_DIR,
};
use crate::{device, server, AppState};
use clap::Args;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// serve サブコマンドの引数
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Listen port
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "JARVIS_PORT")]
    pub port: u16,

    /// Bind address
    #[arg(short = 'H', long, default_value = DEFAULT_HOST, env = "JARVIS_HOST")]
    pub host: String,

    /// Directory served under `/`
    #[arg(long, default_value = DEFAULT_STATIC_DIR, env = "JARVIS_STATIC_DIR")]
    pub static_dir: PathBuf,

    /// QR image output path (must be inside the static directory)
    #[arg(long, env = "JARVIS_IMAGE_PATH")]
    pub image_path: Option<PathBuf>,

    /// Constant hashed by every audit
    #[arg(long, default_value = DEFAULT_AUDIT_INPUT, env = "JARVIS_AUDIT_INPUT")]
    pub audit_input: String,

    /// Timeout in seconds for the device probe and the image write
    #[arg(
        long,
        default_value_t = DEFAULT_AUDIT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..),
        env = "JARVIS_AUDIT_TIMEOUT_SECS"
    )]
    pub audit_timeout_secs: u64,

    /// Device options
    #[command(flatten)]
    pub device: DeviceArgs,
}

impl ServeArgs {
    /// サーバー設定に変換
    ///
    /// `image_path` 未指定時はデバイス種別に応じたファイル名を静的ディレクトリ直下に置く。
    pub fn to_config(&self) -> AppConfig {
        let device = self.device.to_config();
        let image_path = self
            .image_path
            .clone()
            .unwrap_or_else(|| self.static_dir.join(device.kind.default_image_name()));
        AppConfig {
            host: self.host.clone(),
            port: self.port,
            static_dir: self.static_dir.clone(),
            image_path,
            audit_input: self.audit_input.clone().into_bytes(),
            device,
            audit_timeout: Duration::from_secs(self.audit_timeout_secs),
        }
    }
}

/// serve サブコマンドを実行
///
/// 設定検証とデバイスプローブの初期化はリスナー作成前に行い、
/// 失敗した場合はリクエストを受け付けずにエラーを返す。
pub async fn execute(args: &ServeArgs) -> JarvisResult<()> {
    let config = args.to_config();
    config.validate()?;

    let probe = device::init(&config.device)?;
    info!(
        static_dir = %config.static_dir.display(),
        image_path = %config.image_path.display(),
        device = ?config.device.kind,
        "Configuration loaded"
    );

    let state = AppState::new(config, probe)?;
    server::run(state).await
}
