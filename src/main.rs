//! maps-mcp: MCP server exposing Google Maps operations over HTTP
//!
//! Binds a single `POST /mcp` endpoint and forwards the two supported
//! tools (geocode, places-search) to the Google Maps web APIs.

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use maps_mcp::config::Config;
use maps_mcp::maps::GoogleMapsClient;
use maps_mcp::mcp::http::router;
use maps_mcp::mcp::server::{tool_definitions, McpServer};

/// MCP server exposing Google Maps geocoding and nearby-places search
/// through a single HTTP endpoint.
#[derive(Parser, Debug)]
#[command(name = "maps-mcp")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Listening port (overrides the PORT environment variable)
    #[arg(short, long)]
    port: Option<u16>,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease logging verbosity (only show errors)
    #[arg(short, long)]
    quiet: bool,
}

/// Determines the log level from CLI arguments.
fn get_log_level(verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::ERROR;
    }

    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialises the tracing subscriber for logging.
fn init_tracing(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Prints the startup banner describing the available tools.
fn print_banner(port: u16) {
    eprintln!("maps-mcp {} listening on port {port}", env!("CARGO_PKG_VERSION"));
    eprintln!("Endpoint: POST /mcp");
    eprintln!("Tools:");
    for tool in tool_definitions() {
        eprintln!("  {}: {}", tool.name, tool.description);
    }
    eprintln!();
}

/// Waits for an interrupt signal.
#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = match signal(SignalKind::interrupt()) {
        Ok(signal) => signal,
        Err(e) => {
            error!(error = %e, "failed to install SIGINT handler");
            return std::future::pending().await;
        }
    };
    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(signal) => signal,
        Err(e) => {
            error!(error = %e, "failed to install SIGTERM handler");
            return std::future::pending().await;
        }
    };

    tokio::select! {
        _ = sigint.recv() => info!("received SIGINT, exiting"),
        _ = sigterm.recv() => info!("received SIGTERM, exiting"),
    }
}

/// Waits for an interrupt signal.
#[cfg(windows)]
async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("received Ctrl+C, exiting");
    }
}

/// Binds the listener and serves until interrupted. In-flight requests
/// are not drained on shutdown.
async fn serve(addr: SocketAddr, app: axum::Router) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, "listening");

    tokio::select! {
        result = axum::serve(listener, app).into_future() => result,
        () = shutdown_signal() => Ok(()),
    }
}

/// Entry point for the maps-mcp server.
fn main() -> ExitCode {
    let args = Args::parse();

    init_tracing(get_log_level(args.verbose, args.quiet));

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let port = args.port.unwrap_or(config.port);

    let provider = match GoogleMapsClient::new() {
        Ok(client) => Arc::new(client),
        Err(e) => {
            eprintln!("Failed to build provider client: {e}");
            return ExitCode::FAILURE;
        }
    };

    let server = Arc::new(McpServer::new(provider));
    let app = router(server);

    print_banner(port);
    info!(version = env!("CARGO_PKG_VERSION"), port, "starting maps-mcp server");

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to create Tokio runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    match runtime.block_on(serve(addr, app)) {
        Ok(()) => {
            info!("server shut down");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "server error");
            ExitCode::FAILURE
        }
    }
}
