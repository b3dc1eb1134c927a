//! wifi-scout backend service.
//!
//! Local HTTP server for the Wi-Fi diagnostics desktop app: network
//! scanning, heatmap rendering, speed tests, flat-file histories and
//! notifications, and the LLM-backed assistant.

mod assistant;
mod handlers;
mod scan;
mod speedtest;
mod state;
mod store;
mod triggers;

use anyhow::Result;
use axum::{
    extract::Extension,
    routing::{delete, get, post},
    Router,
};
use clap::Parser;
use std::{env, net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use state::AppState;

#[derive(Parser, Debug)]
#[command(name = "wifi-api")]
#[command(about = "Wi-Fi diagnostics backend server")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "127.0.0.1:8000")]
    listen: String,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Directory for flat-file data stores
    #[arg(long, env = "WIFI_SCOUT_DATA_DIR", default_value = "./data")]
    data_dir: String,

    /// Number of tokio worker threads (default: number of CPU cores)
    #[arg(long)]
    worker_threads: Option<usize>,
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Build tokio runtime with configurable worker threads
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(threads) = args.worker_threads {
        runtime_builder.worker_threads(threads);
    } else if let Ok(threads_str) = env::var("TOKIO_WORKER_THREADS") {
        if let Ok(threads) = threads_str.parse::<usize>() {
            runtime_builder.worker_threads(threads);
        }
    }

    let runtime = runtime_builder.build()?;
    runtime.block_on(async_main(args))?;
    Ok(())
}

async fn async_main(args: Args) -> Result<()> {
    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting wifi-scout backend");

    // Initialize application state
    let state = Arc::new(AppState::new(&args.data_dir)?);

    // Build router
    let app = Router::new()
        .route("/", get(handlers::root_handler))
        .route("/health", get(handlers::health_handler))
        // Scanning
        .route("/api/scan", get(handlers::scan_handler))
        .route("/api/network/current", get(handlers::current_network_handler))
        // Heatmap
        .route("/api/heatmap", post(handlers::heatmap_handler))
        // Speedtest
        .route("/api/speedtest", get(handlers::speedtest_run_handler))
        .route("/api/speedtest/history", get(handlers::speedtest_history_handler))
        // History log
        .route("/api/history", get(handlers::history_handler))
        .route("/api/history", delete(handlers::history_clear_handler))
        // Notifications
        .route("/api/notifications", get(handlers::notifications_handler))
        .route("/api/notifications/read", post(handlers::notifications_read_handler))
        .route("/api/notifications", delete(handlers::notifications_clear_handler))
        // Assistant
        .route("/api/assistant", post(handlers::assistant_handler))
        // Layer extensions
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Parse listen address
    let addr: SocketAddr = args.listen.parse()?;
    info!(address = %addr, "Listening");

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
