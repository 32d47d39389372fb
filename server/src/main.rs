use anyhow::Result;
use axum::Router;
use clap::Parser;
use hashdex_core::{IndexConfig, Strategy};
use server::{build_app, ServerConfig};
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Directory of documents to index
    #[arg(long, default_value = "./docs")]
    docs: PathBuf,
    /// Whitespace-separated stopword file
    #[arg(long)]
    stopwords: Option<PathBuf>,
    /// Collision strategy: chaining, quadratic or linear
    #[arg(long, default_value = "linear")]
    strategy: Strategy,
    /// Initial slot count of every table
    #[arg(long, default_value_t = hashdex_core::config::DEFAULT_CAPACITY)]
    capacity: usize,
    /// Extension of files picked up from the directory
    #[arg(long, default_value = "txt")]
    ext: String,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let config = ServerConfig {
        docs: args.docs,
        stopwords: args.stopwords,
        index: IndexConfig { strategy: args.strategy, initial_capacity: args.capacity, extension: args.ext },
        admin_token: std::env::var("ADMIN_TOKEN").ok(),
    };
    let app: Router = build_app(config)?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
