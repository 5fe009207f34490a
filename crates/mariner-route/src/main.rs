//! CLI entry point for the mariner-route query engine.
//!
//! Prints the selected route as JSON to stdout; diagnostics go to stderr.

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use mariner_graph::{GraphClient, GraphConfig};
use mariner_route::RouteEngine;

#[derive(Parser)]
#[command(name = "mariner-route")]
#[command(about = "Best-route computation engine for the Mariner shipping knowledge graph")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file prefix (default: mariner).
    #[arg(short, long, default_value = "mariner", global = true)]
    config: String,
}

#[derive(Subcommand)]
enum Command {
    /// Find the best route between two ports.
    Find {
        /// Origin port code.
        #[arg(long)]
        from: String,
        /// Destination port code.
        #[arg(long)]
        to: String,
        /// Maximum hops to consider.
        #[arg(long, default_value_t = 6)]
        max_hops: usize,
        /// Maximum candidate paths to examine before stopping.
        #[arg(long, default_value_t = 500)]
        max_candidates: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let graph_config = load_graph_config(&cli.config);
    let graph = GraphClient::connect(&graph_config).await?;

    match cli.command {
        Command::Find {
            from,
            to,
            max_hops,
            max_candidates,
        } => {
            let engine = RouteEngine::new(graph)
                .with_max_hops(max_hops)
                .with_max_candidates(max_candidates);
            match engine.find_optimal_route(&from, &to).await? {
                Some(result) => {
                    tracing::info!(
                        hops = result.hops,
                        total_distance = result.total_distance,
                        total_weather_score = result.total_weather_score,
                        total_rating = result.total_rating,
                        "Found best route"
                    );
                    println!("{}", serde_json::to_string_pretty(&result)?);
                }
                None => {
                    tracing::info!(from = %from, to = %to, "No route found");
                    println!("null");
                }
            }
        }
    }

    Ok(())
}

fn load_graph_config(file_prefix: &str) -> GraphConfig {
    let cfg = config::Config::builder()
        .add_source(config::File::with_name(file_prefix).required(false))
        .add_source(
            config::Environment::with_prefix("MARINER")
                .separator("__")
                .try_parsing(true),
        )
        .build();

    match cfg {
        Ok(c) => GraphConfig {
            uri: c
                .get_string("neo4j.uri")
                .unwrap_or_else(|_| "bolt://localhost:7687".to_string()),
            user: c
                .get_string("neo4j.user")
                .unwrap_or_else(|_| "neo4j".to_string()),
            password: c
                .get_string("neo4j.password")
                .unwrap_or_else(|_| "mariner-dev".to_string()),
            ..Default::default()
        },
        Err(_) => GraphConfig::default(),
    }
}
