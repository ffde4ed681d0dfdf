use std::{env, net::SocketAddr};

use anyhow::Context;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::{
    fmt::{self, time::ChronoUtc},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use emr_server::{create_app, EmrServer};

/// Bridgeway EMR HTTP Server
#[derive(Parser, Debug)]
#[command(name = "emr-server")]
#[command(about = "Outpatient behavioral health clinic HTTP API server")]
struct Args {
    /// Server bind address
    #[arg(long, default_value = "0.0.0.0", env = "EMR_HOST")]
    host: String,

    /// Server port
    #[arg(short, long, default_value = "8080", env = "EMR_PORT")]
    port: u16,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    init_tracing(args.verbose);

    info!("Starting Bridgeway EMR HTTP server");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let server = EmrServer::new();
    let app = create_app(server);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", args.host, args.port))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    info!("Server running on http://{addr}");
    info!("Health check available at: http://{addr}/health");
    info!("API v1 available at: http://{addr}/api/v1");
    info!("API docs available at: http://{addr}/api/docs");

    axum::serve(listener, app)
        .await
        .context("HTTP server error")?;

    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let is_development =
        env::var("EMR_ENV").unwrap_or_else(|_| "development".to_string()) == "development";

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("emr_server={level},tower_http=info,hyper=info").into());

    if is_development {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_level(true),
            )
            .init();
    } else {
        // Structured JSON logging for production
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(false)
                    .json(),
            )
            .init();
    }
}
