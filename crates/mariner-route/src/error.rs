//! Error types for the mariner-route crate.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RouteError {
    #[error("Graph error: {0}")]
    Graph(#[from] mariner_graph::GraphError),
}

pub type Result<T> = std::result::Result<T, RouteError>;
