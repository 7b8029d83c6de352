use anyhow::{Context, Result};
use clap::Parser;
use server::{build_app, DEFAULT_CACHE_CAPACITY};
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

/// Serve keyword extraction over HTTP from a model directory
#[derive(Parser, Debug)]
#[command(name = "keyrank-server")]
struct Args {
    /// Model directory written by `keyrank import`
    #[arg(long, default_value = "./model")]
    model: String,
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    #[arg(long, default_value_t = 8080)]
    port: u16,
    /// Cached rankings to keep (0 disables the cache)
    #[arg(long, default_value_t = DEFAULT_CACHE_CAPACITY)]
    cache_capacity: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    // A model that fails to load stops the process before anything binds
    let app = build_app(args.model.clone(), args.cache_capacity)
        .with_context(|| format!("loading model from {}", args.model))?;

    let listener = TcpListener::bind((args.host.as_str(), args.port))
        .await
        .with_context(|| format!("binding {}:{}", args.host, args.port))?;
    let addr = listener.local_addr()?;
    tracing::info!(%addr, model = %args.model, cache_capacity = args.cache_capacity, "serving keywords");

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(%err, "cannot listen for ctrl-c; running until killed");
        std::future::pending::<()>().await;
    }
}
