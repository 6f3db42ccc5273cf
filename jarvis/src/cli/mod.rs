//! CLI module for jarvis
//!
//! Starts the audit server, or runs the device probe once for diagnostics.

pub mod probe;
pub mod serve;

use clap::{Parser, Subcommand};

/// JARVIS Offline - audit server that hashes a constant and renders it as a QR code
#[derive(Parser, Debug)]
#[command(name = "jarvis")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    JARVIS_HOST                Bind address (default: 0.0.0.0)
    JARVIS_PORT                Listen port (default: 8080)
    JARVIS_STATIC_DIR          Static asset directory (default: dist)
    JARVIS_IMAGE_PATH          QR image output path (default: <static dir>/nano_qr.png)
    JARVIS_AUDIT_INPUT         Constant hashed by every audit (default: nano)
    JARVIS_AUDIT_TIMEOUT_SECS  Timeout for device probe and image write (default: 10)
    JARVIS_DEVICE              Compute device: none | cuda (default: none)
    JARVIS_DEVICE_ORDINAL      CUDA device ordinal (default: 0)
    JARVIS_GPU_LABEL           Hardware label override
    JARVIS_LOG_LEVEL           Log level (default: info)
    JARVIS_LOG_DIR             Directory for JSON log files (optional)
"#)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Server options when no subcommand is given
    #[command(flatten)]
    pub serve: serve::ServeArgs,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the audit server (default)
    Serve(serve::ServeArgs),
    /// Run the configured device probe once and print the measurement
    Probe(probe::ProbeArgs),
}
