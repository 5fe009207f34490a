//! Dataset-level error types shared across Mariner components.

use thiserror::Error;

/// A dataset is missing required columns.
///
/// Raised once per dataset, before any row is deserialized or any graph
/// write is issued — a malformed dataset aborts its whole import with zero
/// partial writes.
#[derive(Debug, Clone, Error)]
#[error("dataset '{dataset}' is missing required columns: {}", missing.join(", "))]
pub struct SchemaError {
    /// Human-readable dataset name (e.g. "companies").
    pub dataset: String,
    /// Every required column absent from the header row.
    pub missing: Vec<String>,
}

impl SchemaError {
    pub fn new(dataset: impl Into<String>, missing: Vec<String>) -> Self {
        Self {
            dataset: dataset.into(),
            missing,
        }
    }
}
