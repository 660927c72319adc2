//! Trak CLI binary.

mod app;
mod cli;
mod output;
mod version;

use cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the trak CLI.
///
/// Uses tokio's current_thread runtime; CLI work is sequential and
/// I/O-bound.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Controlled via RUST_LOG, e.g. RUST_LOG=trak=debug trak list
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trak=warn")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse_args();
    if let Err(e) = cli.execute().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
