//! CLI entry point for the mariner-import batch importer.

use std::path::Path;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use mariner_core::RatingMethod;
use mariner_graph::{GraphClient, GraphConfig};

use mariner_import::config::ImportConfig;
use mariner_import::BatchImporter;

#[derive(Parser)]
#[command(name = "mariner-import")]
#[command(about = "Batch CSV importer for the Mariner shipping knowledge graph")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file prefix (default: mariner).
    #[arg(short, long, default_value = "mariner", global = true)]
    config: String,
}

#[derive(Subcommand)]
enum Command {
    /// Import every dataset from the data directory.
    Import {
        /// Override the configured data directory.
        #[arg(long)]
        data_dir: Option<String>,

        /// Override the configured rating method.
        #[arg(long)]
        rating_method: Option<String>,
    },
    /// Link ships to companies from standalone dataset files.
    LinkOwnership {
        /// Path to the ship dataset.
        #[arg(long)]
        ships: String,

        /// Path to the company dataset.
        #[arg(long)]
        companies: String,
    },
    /// Drop all nodes and relationships (before a full re-import).
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    let graph_config = load_graph_config(&cli.config);
    let graph = GraphClient::connect(&graph_config).await?;

    match cli.command {
        Command::Import {
            data_dir,
            rating_method,
        } => {
            let mut import_config = ImportConfig::load(&cli.config)?;
            if let Some(dir) = data_dir {
                import_config.data_dir = dir;
            }
            if let Some(method) = rating_method {
                import_config.rating_method = method;
            }

            // Fail on an unknown method before anything is written.
            let method = import_config.parse_rating_method()?;

            let importer = BatchImporter::new(graph, method)
                .with_progress_every(import_config.progress_every);
            importer.run(&import_config).await?;
        }
        Command::LinkOwnership { ships, companies } => {
            let importer = BatchImporter::new(graph, RatingMethod::default());
            let report = importer
                .link_ownership(Path::new(&ships), Path::new(&companies))
                .await?;
            tracing::info!(
                success = report.success,
                failure = report.failure,
                "Ownership linking finished"
            );
        }
        Command::Clear => {
            graph.clear_database().await?;
            tracing::info!("Database cleared");
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
