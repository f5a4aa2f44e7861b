//! Walt Dispatch Server

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use walt_dispatch::config::{Config, DistanceMode};
use walt_dispatch::seed::SeedData;
use walt_dispatch::{http, AppState, MemoryStore};

/// Walt driver dispatch server.
#[derive(Parser, Debug)]
#[command(name = "walt-dispatch", about = "Assigns delivery drivers to orders")]
struct Args {
    /// HTTP server address
    #[arg(long, default_value = "[::1]:8080")]
    http_addr: String,

    /// JSON file with cities, drivers, customers and restaurants
    #[arg(long)]
    seed: Option<PathBuf>,

    /// Upper bound for randomly drawn delivery distances
    #[arg(long, default_value_t = 20.0, conflicts_with = "fixed_distance")]
    max_distance: f64,

    /// Use this distance for every delivery instead of a random one
    #[arg(long)]
    fixed_distance: Option<f64>,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        let distance = match args.fixed_distance {
            Some(value) => DistanceMode::Fixed(value),
            None => DistanceMode::Random {
                max: args.max_distance,
            },
        };

        Self {
            http_bind_addr: args.http_addr,
            seed_path: args.seed,
            distance,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("walt_dispatch=info,walt_core=info,tower_http=info")),
        )
        .with_target(true)
        .init();

    let config = Config::from(Args::parse());
    let http_addr: SocketAddr = config.http_bind_addr.parse()?;

    let store = Arc::new(MemoryStore::new());
    if let Some(path) = &config.seed_path {
        info!(path = %path.display(), "Loading seed data");
        SeedData::load(path)?.apply(&store).await?;
    }

    let state = AppState::with_store(store, config.estimator()?);
    let router = http::create_router(state);

    info!(http_addr = %http_addr, distance = ?config.distance, "Starting Walt dispatch");

    let listener = TcpListener::bind(http_addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
