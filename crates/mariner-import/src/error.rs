//! Error types for the mariner-import crate.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    /// A dataset is missing required columns. Fatal for that dataset,
    /// raised before any write.
    #[error(transparent)]
    Schema(#[from] mariner_core::SchemaError),

    /// A row's natural key is empty.
    #[error("dataset '{dataset}' row {line}: empty '{column}' key")]
    EmptyKey {
        dataset: String,
        line: usize,
        column: &'static str,
    },

    /// The dataset file could not be read or a row failed to parse.
    #[error("failed to read dataset '{dataset}': {source}")]
    Csv {
        dataset: String,
        #[source]
        source: csv::Error,
    },

    /// An unrecognized docking-feasibility flag value.
    #[error("dataset '{dataset}' row {line}: unrecognized can_dock flag '{value}'")]
    InvalidFlag {
        dataset: String,
        line: usize,
        value: String,
    },

    #[error(transparent)]
    RatingMethod(#[from] mariner_core::rating::UnknownRatingMethod),

    #[error("Graph error: {0}")]
    Graph(#[from] mariner_graph::GraphError),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, ImportError>;
