//! Siteloom Production Server
//!
//! Multi-tenant website platform: resolves inbound host names to tenant
//! sites, gates public reads on publication state, and serves the owner
//! editing API.
//!
//! Usage:
//! ```bash
//! # With config file
//! siteloom-server --config config.yaml
//!
//! # Flag overrides
//! siteloom-server --config config.yaml --port 9000
//! ```
//!
//! Test with:
//! ```bash
//! # Public site view for a tenant host
//! curl http://localhost:8080/ -H 'Host: bellas.platform.com'
//!
//! # Owner save (identity header set by the auth proxy in production)
//! curl -X PUT http://localhost:8080/api/site/content \
//!   -H 'Host: platform.com' \
//!   -H 'x-authenticated-tenant: 550e8400-e29b-41d4-a716-446655440000' \
//!   -H 'Content-Type: application/json' \
//!   -d '{"subdomain": "bellas", "content": {"businessName": "Bella'\''s"}}'
//! ```

mod bootstrap;
mod config;

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use config::ServerConfig;

const LOOM: &str = r#"
   _________ __         .__
  /   _____/|__| ____   |  |   ____   ____   _____
  \_____  \ |  |/  _ \  |  | _/  _ \ /  _ \ /     \
  /        \|  (  <_> ) |  |_(  <_> |  <_> )  Y Y  \
 /_______  /|__|\____/  |____/\____/ \____/|__|_|  /
         \/                                      \/
 every business, its own site
"#;

/// Siteloom Server - multi-tenant website platform
#[derive(Parser)]
#[command(name = "siteloom-server")]
#[command(about = "Siteloom production server for tenant site hosting", long_about = None)]
#[command(before_help = LOOM)]
struct Cli {
    /// Path to configuration file (YAML or TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the bind host
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ServerConfig::load(path)?,
        None => {
            eprintln!("No config file given, using defaults");
            ServerConfig::default()
        }
    };
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    config.validate()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    println!("{}", LOOM);

    let state = bootstrap::build_state(&config).await?;
    let app = siteloom_ingress::app(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on {}", addr);
    info!(main_hosts = ?config.main_hosts, "tenant resolution active");
    if config.store.backend == config::StoreBackend::Memory {
        warn!("in-memory store: site records do not survive restarts");
    }

    axum::serve(listener, app).await?;
    Ok(())
}
