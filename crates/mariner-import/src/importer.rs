//! Batch import orchestration.
//!
//! Node datasets (companies, ships, ports, cargo) are written first, each
//! inside one transaction — a rejected node write aborts its dataset, since
//! later relationship imports could not resolve their endpoints against a
//! half-written dataset. Relationship datasets (routes, docking, visits,
//! ownership) follow, per row: a rejected edge write is warned and counted,
//! never aborting the batch.

use std::path::{Path, PathBuf};

use mariner_core::{rating, RatingMethod, RouteSpec};
use mariner_graph::GraphClient;

use crate::config::ImportConfig;
use crate::dataset;
use crate::error::Result;
use crate::ownership::{self, OwnershipReport};
use crate::records::RouteRow;

/// Per-dataset outcome for relationship imports.
#[derive(Debug, Default, Clone, Copy, serde::Serialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub failed: usize,
}

/// Drives a full batch import of all datasets into the graph.
pub struct BatchImporter {
    graph: GraphClient,
    method: RatingMethod,
    progress_every: usize,
}

impl BatchImporter {
    pub fn new(graph: GraphClient, method: RatingMethod) -> Self {
        Self {
            graph,
            method,
            progress_every: 25,
        }
    }

    /// Log route-import progress every `n` rows (0 disables).
    pub fn with_progress_every(mut self, n: usize) -> Self {
        self.progress_every = n;
        self
    }

    /// Run the full batch: every node dataset, then every relationship
    /// dataset, in dependency order.
    pub async fn run(&self, config: &ImportConfig) -> Result<()> {
        let dir = PathBuf::from(&config.data_dir);

        let companies = dataset::load_companies(&dir.join(&config.files.companies))?;
        self.graph.upsert_companies(&companies).await?;
        tracing::info!(count = companies.len(), "Imported companies");

        let ships = dataset::load_ships(&dir.join(&config.files.ships))?;
        self.graph.upsert_ships(&ships).await?;
        tracing::info!(count = ships.len(), "Imported ships");

        let ports = dataset::load_ports(&dir.join(&config.files.ports))?;
        self.graph.upsert_ports(&ports).await?;
        tracing::info!(count = ports.len(), "Imported ports");

        let cargo = dataset::load_cargo(&dir.join(&config.files.cargo))?;
        self.graph.upsert_cargo_lots(&cargo).await?;
        tracing::info!(count = cargo.len(), "Imported cargo lots");

        let routes = self.import_routes(&dir.join(&config.files.routes)).await?;
        let docking = self.import_docking(&dir.join(&config.files.docking)).await?;
        let visits = self.import_visits(&dir.join(&config.files.visits)).await?;
        let owns = ownership::link_ownership(&self.graph, &ships, &companies).await?;

        tracing::info!(
            routes = routes.imported,
            docking = docking.imported,
            visits = visits.imported,
            owns = owns.success,
            failed = routes.failed + docking.failed + visits.failed + owns.failure,
            "Batch import complete"
        );
        Ok(())
    }

    /// Import the route dataset, annotating each edge with its composite
    /// rating before the write.
    pub async fn import_routes(&self, path: &Path) -> Result<ImportSummary> {
        let rows = dataset::load_routes(path)?;
        let total = rows.len();
        tracing::info!(count = total, method = %self.method, "Loaded route dataset");

        let mut summary = ImportSummary::default();
        for (i, row) in rows.into_iter().enumerate() {
            let spec = route_spec(row, self.method);
            match self.graph.upsert_route(&spec).await {
                Ok(()) => summary.imported += 1,
                Err(e) => {
                    tracing::warn!(route = %spec.name, error = %e, "Failed to write ROUTE edge");
                    summary.failed += 1;
                }
            }
            if self.progress_every > 0 && (i + 1) % self.progress_every == 0 {
                tracing::info!(done = i + 1, total, "Route import progress");
            }
        }

        // Post-import verification, matching the per-dataset summary policy.
        let stored = self.graph.count_relationships("ROUTE").await?;
        tracing::info!(
            imported = summary.imported,
            failed = summary.failed,
            stored,
            "Route import complete"
        );
        Ok(summary)
    }

    /// Import the docking-compatibility dataset.
    pub async fn import_docking(&self, path: &Path) -> Result<ImportSummary> {
        let specs = dataset::load_docking(path)?;
        let mut summary = ImportSummary::default();
        for spec in &specs {
            match self.graph.upsert_can_dock(spec).await {
                Ok(()) => summary.imported += 1,
                Err(e) => {
                    tracing::warn!(imo = %spec.imo, port = %spec.port_code, error = %e,
                        "Failed to write CAN_DOCK edge");
                    summary.failed += 1;
                }
            }
        }
        tracing::info!(
            imported = summary.imported,
            failed = summary.failed,
            "Docking import complete"
        );
        Ok(summary)
    }

    /// Import the port-visit dataset.
    pub async fn import_visits(&self, path: &Path) -> Result<ImportSummary> {
        let specs = dataset::load_visits(path)?;
        let mut summary = ImportSummary::default();
        for spec in &specs {
            match self.graph.upsert_visited(spec).await {
                Ok(()) => summary.imported += 1,
                Err(e) => {
                    tracing::warn!(imo = %spec.imo, port = %spec.port_code, error = %e,
                        "Failed to write VISITED edge");
                    summary.failed += 1;
                }
            }
        }
        tracing::info!(
            imported = summary.imported,
            failed = summary.failed,
            "Visit import complete"
        );
        Ok(summary)
    }

    /// Link ships to companies with referential validation.
    pub async fn link_ownership(
        &self,
        ships_path: &Path,
        companies_path: &Path,
    ) -> Result<OwnershipReport> {
        let ships = dataset::load_ships(ships_path)?;
        let companies = dataset::load_companies(companies_path)?;
        ownership::link_ownership(&self.graph, &ships, &companies).await
    }
}

/// Annotate a raw route row with its composite rating.
fn route_spec(row: RouteRow, method: RatingMethod) -> RouteSpec {
    let rating = rating(row.distance, row.weather_score, method);
    RouteSpec {
        from_port: row.from_port,
        to_port: row.to_port,
        name: row.name,
        distance: row.distance,
        weather_score: row.weather_score,
        rating,
    }
}
