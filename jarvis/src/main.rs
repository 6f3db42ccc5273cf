//! JARVIS Offline audit server entry point

use clap::Parser;
use jarvis::cli::{Cli, Commands};
use jarvis::logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Dropするとファイルログが書き込まれなくなるため main 終了まで保持する
    let _log_guard = match logging::init() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            None
        }
    };

    let result = match cli.command {
        Some(Commands::Probe(args)) => jarvis::cli::probe::execute(&args),
        Some(Commands::Serve(args)) => jarvis::cli::serve::execute(&args).await,
        None => jarvis::cli::serve::execute(&cli.serve).await,
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
