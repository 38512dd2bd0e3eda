//! ucloudctl-mcp: MCP server for UCloud UHost instances
//!
//! A standalone MCP server that exposes UHost instance operations as tools
//! for AI systems.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tower_mcp::McpRouter;
use tower_mcp::transport::StdioTransport;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use ucloudctl_core::PaginationConfig;
use ucloudctl_core::pagination::{DEFAULT_MAX_PAGES, DEFAULT_PAGE_SIZE};
use ucloudctl_mcp::{AppState, build_router};

/// Transport mode for the MCP server
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum Transport {
    /// Standard input/output (for CLI integrations)
    #[default]
    Stdio,
    /// HTTP with Server-Sent Events (for shared deployments)
    Http,
}

/// MCP server for UCloud UHost instances
#[derive(Parser, Debug)]
#[command(name = "ucloudctl-mcp")]
#[command(version, about, long_about = None)]
struct Args {
    /// Transport mode
    #[arg(short, long, value_enum, default_value = "stdio")]
    transport: Transport,

    /// Path to the configuration file (TOML, or JSON for *.json)
    #[arg(short, long, env = "UCLOUDCTL_CONFIG")]
    config: Option<PathBuf>,

    // --- HTTP transport options ---
    /// Host to bind HTTP server
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to bind HTTP server
    #[arg(long, default_value = "8080")]
    port: u16,

    // --- Pagination ---
    /// Items requested per page from list APIs
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: u32,

    /// Maximum pages fetched for one listing before giving up
    #[arg(long, default_value_t = DEFAULT_MAX_PAGES)]
    max_pages: usize,

    // --- Rate limiting ---
    /// Maximum concurrent requests
    #[arg(long, default_value = "10")]
    max_concurrent: usize,

    /// Request timeout in seconds (HTTP mode)
    #[arg(long, default_value = "30")]
    request_timeout_secs: u64,

    // --- Logging ---
    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries the stdio transport
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| args.log_level.clone().into()))
        .init();

    info!(
        transport = ?args.transport,
        config = ?args.config,
        page_size = args.page_size,
        max_pages = args.max_pages,
        "Starting ucloudctl-mcp server"
    );

    let pagination = PaginationConfig::new(args.page_size, args.max_pages)
        .context("Invalid pagination settings")?;

    let state = Arc::new(AppState::new(args.config.clone(), pagination));
    let router = build_router(state).context("Failed to build MCP router")?;

    match args.transport {
        Transport::Stdio => {
            info!("Running with stdio transport");
            StdioTransport::new(router).run().await?;
        }
        Transport::Http => {
            info!(host = %args.host, port = args.port, "Running with HTTP transport");
            run_http_server(router, &args).await?;
        }
    }

    Ok(())
}

/// Run the HTTP server with middleware
#[cfg(feature = "http")]
async fn run_http_server(router: McpRouter, args: &Args) -> Result<()> {
    use std::time::Duration;
    use tower::limit::ConcurrencyLimitLayer;
    use tower::timeout::TimeoutLayer;
    use tower_mcp::HttpTransport;

    let addr = format!("{}:{}", args.host, args.port);

    let transport = HttpTransport::new(router)
        .layer(TimeoutLayer::new(Duration::from_secs(
            args.request_timeout_secs,
        )))
        .layer(ConcurrencyLimitLayer::new(args.max_concurrent));

    transport.serve(&addr).await?;

    Ok(())
}

#[cfg(not(feature = "http"))]
async fn run_http_server(_router: McpRouter, _args: &Args) -> Result<()> {
    anyhow::bail!("HTTP transport requires the 'http' feature")
}
