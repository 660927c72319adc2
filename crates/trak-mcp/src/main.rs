//! Trak MCP server binary.
//!
//! This binary runs the MCP server using stdio transport. Logs go to
//! stderr; stdout carries the protocol.

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting trak-mcp server");

    let cwd = std::env::current_dir()?;
    trak_mcp::run_stdio_server(&cwd).await?;

    Ok(())
}
