//! Referential-validated ownership linking.
//!
//! The one place cross-dataset consistency is enforced in-process: an OWNS
//! edge is only issued when the ship's company reference exists in the
//! company dataset's key set. Failures are independent per ship — they are
//! warned, counted, and skipped, never aborting the batch.

use std::collections::HashSet;

use mariner_core::{Company, Ship};
use mariner_graph::GraphClient;

use crate::error::Result;

/// Outcome of an ownership-linking pass.
#[derive(Debug, Default, Clone, Copy, serde::Serialize)]
pub struct OwnershipReport {
    pub success: usize,
    pub failure: usize,
}

/// Link each ship to its owning company with an idempotent OWNS edge.
///
/// Builds the valid company-code set once, then checks each ship's
/// reference against it in input order. Unknown or missing references and
/// rejected writes increment `failure` and processing continues with the
/// next ship; there is no rollback of edges already written.
pub async fn link_ownership(
    graph: &GraphClient,
    ships: &[Ship],
    companies: &[Company],
) -> Result<OwnershipReport> {
    let valid_codes = company_code_set(companies);
    tracing::info!(count = valid_codes.len(), "Loaded company registration codes");

    let mut report = OwnershipReport::default();

    for ship in ships {
        let Some(code) = referenced_company(ship, &valid_codes) else {
            tracing::warn!(
                imo = %ship.imo,
                company_code = ship.company_code.as_deref().unwrap_or("<missing>"),
                "Company reference not found, skipping ownership link"
            );
            report.failure += 1;
            continue;
        };

        match graph.upsert_owns(code, &ship.imo).await {
            Ok(()) => report.success += 1,
            Err(e) => {
                tracing::warn!(imo = %ship.imo, company_code = %code, error = %e,
                    "Failed to write OWNS edge");
                report.failure += 1;
            }
        }
    }

    tracing::info!(
        success = report.success,
        failure = report.failure,
        "Ownership linking complete"
    );
    Ok(report)
}

/// The set of valid company registration codes, built once per batch.
fn company_code_set(companies: &[Company]) -> HashSet<&str> {
    companies.iter().map(|c| c.code.as_str()).collect()
}

/// The ship's company reference, if present and valid.
fn referenced_company<'a>(ship: &'a Ship, valid: &HashSet<&str>) -> Option<&'a str> {
    ship.company_code
        .as_deref()
        .filter(|code| valid.contains(code))
}
