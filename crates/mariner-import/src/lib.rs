//! mariner-import: Batch CSV importer for the Mariner shipping graph.
//!
//! Loads tabular datasets (companies, ships, ports, routes, cargo, docking
//! compatibility, port visits), validates each dataset's columns up front,
//! maps the legacy and typed source schemas into canonical records, and
//! upserts everything into Neo4j. Node datasets land before the
//! relationship datasets that reference them.

pub mod config;
pub mod dataset;
pub mod error;
pub mod importer;
pub mod ownership;
pub mod records;

pub use error::ImportError;
pub use importer::BatchImporter;
