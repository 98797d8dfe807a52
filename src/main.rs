//! `rpc-failover`: send JSON-RPC calls through a failover endpoint pool.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::Value;

use rpc_failover::config::{load_config, validate_config, ClientConfig};
use rpc_failover::observability::logging;
use rpc_failover::MultiEndpointClient;

#[derive(Parser)]
#[command(name = "rpc-failover")]
#[command(about = "JSON-RPC client with endpoint failover", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Endpoint URL, appended after configured endpoints. Repeatable.
    #[arg(short, long = "endpoint")]
    endpoints: Vec<String>,

    /// Return the first failure instead of failing over.
    #[arg(long)]
    no_auto_update: bool,

    /// Log level when RUST_LOG is unset.
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send one RPC call and print its result
    Call {
        /// RPC method name
        method: String,
        /// JSON array of parameters
        #[arg(default_value = "[]")]
        params: String,
        /// Rank endpoints by liveness before the call
        #[arg(long)]
        rank: bool,
    },
    /// Probe every endpoint and print the ranked order
    Rank,
    /// Print the endpoint ring in its configured order
    Endpoints,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ClientConfig::default(),
    };
    config.endpoints.extend(cli.endpoints.iter().cloned());
    if cli.no_auto_update {
        config.auto_update = false;
    }
    validate_config(&config).map_err(|errors| {
        errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    })?;

    logging::init(cli.log_level.as_deref().unwrap_or(&config.observability.log_level));

    let client = MultiEndpointClient::from_config(&config)?;
    tracing::debug!(client = ?client, "Client ready");

    match cli.command {
        Commands::Call { method, params, rank } => {
            let params: Vec<Value> = serde_json::from_str(&params)?;
            if rank || config.ranking.rank_on_start {
                client.sort_endpoints().await;
            }
            let result = client.request(&method, &params).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Rank => {
            for (endpoint, score) in client.sort_endpoints().await {
                println!("{:>12}  {}", score, endpoint);
            }
        }
        Commands::Endpoints => {
            for endpoint in client.endpoints() {
                println!("{}", endpoint);
            }
        }
    }

    Ok(())
}
