//! SmartTravel WebSocket Server
//!
//! A WebSocket server that exposes the travel concierge for remote access.

mod protocol;
mod server;
mod session;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use smarttravel::{Config, TravelConcierge};

use server::Server;

/// SmartTravel WebSocket Server
#[derive(Parser, Debug)]
#[command(name = "smarttravel-server")]
#[command(author, version, about = "WebSocket server for the SmartTravel travel concierge")]
struct Args {
    /// Address to listen on
    #[arg(short, long, default_value = "127.0.0.1:8900")]
    listen: SocketAddr,

    /// Model to use (overrides config)
    #[arg(short, long)]
    model: Option<String>,

    /// Log file path
    #[arg(long, default_value = "/tmp/smarttravel-server.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up file-based logging
    let log_file = std::fs::File::create(&args.log_file)?;
    tracing_subscriber::registry()
        .with(EnvFilter::new("info,smarttravel=debug"))
        .with(fmt::layer().with_writer(log_file).with_ansi(false))
        .init();

    // Load .env files
    let _ = dotenvy::from_filename(".env");
    if let Some(home) = dirs::home_dir() {
        let _ = dotenvy::from_path(home.join(".env"));
    }

    // Load configuration
    let mut config = Config::load()?;
    if let Some(model) = args.model {
        config.llm.model = model;
    }

    let concierge = Arc::new(TravelConcierge::new(&config)?);

    let server = Server::new(args.listen, concierge);
    server.run().await
}
