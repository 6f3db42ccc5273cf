//! Configuration management
//!
//! Server settings resolved from CLI flags / environment variables, plus
//! a helper for reading environment variables directly.

use crate::common::error::{CommonError, CommonResult};
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

/// Default bind address
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default listen port
pub const DEFAULT_PORT: u16 = 8080;
/// Default static asset directory
pub const DEFAULT_STATIC_DIR: &str = "dist";
/// Default constant hashed by every audit
pub const DEFAULT_AUDIT_INPUT: &str = "nano";
/// Default timeout for the device probe and the image write
pub const DEFAULT_AUDIT_TIMEOUT_SECS: u64 = 10;

/// Get an environment variable, or `default` if unset.
pub fn get_env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

// URLパスにエンコードなしで置ける文字か
fn is_url_safe(c: char) -> bool {
    !c.is_control()
        && !c.is_whitespace()
        && !matches!(c, '#' | '?' | '%' | '"' | '<' | '>' | '\\' | '^' | '`' | '{' | '|' | '}')
}

/// Compute device used by the audit operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum DeviceKind {
    /// CPU only (no device probe)
    #[default]
    None,
    /// CUDA GPU probe (requires the `cuda` feature)
    Cuda,
}

impl DeviceKind {
    /// File name of the QR image written when `image_path` is not configured.
    pub fn default_image_name(self) -> &'static str {
        match self {
            DeviceKind::None => "nano_qr.png",
            DeviceKind::Cuda => "nano_qr_torch.png",
        }
    }
}

/// Compute device settings
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeviceConfig {
    /// Device kind
    pub kind: DeviceKind,
    /// CUDA device ordinal
    pub ordinal: usize,
    /// Hardware label override
    pub label: Option<String>,
}

/// Resolved server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Bind address
    pub host: String,
    /// Listen port
    pub port: u16,
    /// Directory served under `/`
    pub static_dir: PathBuf,
    /// Where the QR image is written (must live inside `static_dir`)
    pub image_path: PathBuf,
    /// Constant byte string hashed by every audit
    pub audit_input: Vec<u8>,
    /// Compute device
    pub device: DeviceConfig,
    /// Upper bound for the device probe and the image write
    pub audit_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_static_dir(DEFAULT_STATIC_DIR)
    }
}

impl AppConfig {
    /// Default configuration serving from `static_dir`.
    pub fn for_static_dir(static_dir: impl Into<PathBuf>) -> Self {
        let static_dir = static_dir.into();
        let device = DeviceConfig::default();
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            image_path: static_dir.join(device.kind.default_image_name()),
            static_dir,
            audit_input: DEFAULT_AUDIT_INPUT.as_bytes().to_vec(),
            device,
            audit_timeout: Duration::from_secs(DEFAULT_AUDIT_TIMEOUT_SECS),
        }
    }

    /// `host:port`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// URL path under which the QR image is served, e.g. `/nano_qr.png`.
    pub fn image_url(&self) -> CommonResult<String> {
        let relative = self.image_path.strip_prefix(&self.static_dir).map_err(|_| {
            CommonError::Config(format!(
                "image path {} must be inside static dir {}",
                self.image_path.display(),
                self.static_dir.display()
            ))
        })?;

        let mut segments = Vec::new();
        for component in relative.components() {
            match component {
                Component::Normal(part) => {
                    let part = part.to_str().ok_or_else(|| {
                        CommonError::Config(format!(
                            "image path {} is not valid UTF-8",
                            self.image_path.display()
                        ))
                    })?;
                    if let Some(c) = part.chars().find(|c| !is_url_safe(*c)) {
                        return Err(CommonError::Config(format!(
                            "image path {} contains {:?}, which cannot appear in a URL path",
                            self.image_path.display(),
                            c
                        )));
                    }
                    segments.push(part.to_string());
                }
                Component::CurDir => {}
                _ => {
                    return Err(CommonError::Config(format!(
                        "image path {} must not escape static dir",
                        self.image_path.display()
                    )))
                }
            }
        }
        if segments.is_empty() {
            return Err(CommonError::Config(
                "image path must name a file inside the static dir".to_string(),
            ));
        }
        Ok(format!("/{}", segments.join("/")))
    }

    /// Check the configuration before the server starts.
    pub fn validate(&self) -> CommonResult<()> {
        if self.audit_timeout.is_zero() {
            return Err(CommonError::Config(
                "audit timeout must be greater than zero".to_string(),
            ));
        }
        if self.static_dir.as_os_str().is_empty() {
            return Err(CommonError::Config("static dir must not be empty".to_string()));
        }
        self.image_url()?;
        Ok(())
    }

    /// Directory the QR image is written into.
    pub fn image_dir(&self) -> &Path {
        self.image_path.parent().unwrap_or(&self.static_dir)
    }
}
