//! Canonical domain records for the Mariner shipping knowledge graph.
//!
//! Each node record is keyed by a natural, externally supplied identifier
//! (registration code, IMO number, port code, cargo id). The source data
//! exists in two shapes for companies and ships (a legacy schema and a
//! typed one); both map into the canonical superset structs here, with
//! `Option` for the fields only one schema carries. The mapping itself
//! lives in the importer.

use serde::{Deserialize, Serialize};

// ── Node Records ──────────────────────────────────────────────────

/// A shipping company, keyed by registration code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    /// Registration code — the natural key.
    pub code: String,
    pub name: String,
    pub headquarters: String,
    /// Typed-schema only.
    pub establish_year: Option<i64>,
    /// Typed-schema only.
    pub company_type: Option<String>,
    /// Typed-schema only.
    pub fleet_size: Option<i64>,
}

/// A vessel, keyed by IMO number.
///
/// The typed source schema identifies ships by name instead of IMO; the
/// importer maps that name into `imo` so node identity stays a single field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    /// IMO number — the natural key.
    pub imo: String,
    pub name: String,
    pub ship_type: String,
    /// Design speed in knots.
    pub speed: f64,
    /// Deadweight tonnage.
    pub dwt: f64,
    /// Main engine power in kW. Legacy-schema only.
    pub power: Option<f64>,
    /// Legacy-schema only.
    pub gross_tonnage: Option<f64>,
    /// Length overall in metres. Typed-schema only.
    pub length: Option<f64>,
    /// Typed-schema only.
    pub build_year: Option<i64>,
    /// Draft in metres. Typed-schema only.
    pub draft: Option<f64>,
    /// Registration code of the owning company, used for OWNS linking.
    pub company_code: Option<String>,
}

/// A port, keyed by its 5-character code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Port {
    /// 5-character port code — the natural key.
    pub code: String,
    pub name: String,
    /// Congestion level, 1–10.
    pub congestion: i64,
    /// Maximum deadweight tonnage that can dock.
    pub max_dwt: f64,
}

/// A cargo lot, keyed by cargo id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cargo {
    /// Cargo id — the natural key.
    pub id: String,
    pub name: String,
    pub cargo_type: String,
    /// Weight in tonnes.
    pub weight: f64,
}

// ── Relationship Specs ────────────────────────────────────────────

/// A named ROUTE edge between two ports.
///
/// A port pair may carry several routes; `name` is the discriminating
/// property, so re-importing the same name updates in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteSpec {
    pub from_port: String,
    pub to_port: String,
    pub name: String,
    /// Distance in nautical miles.
    pub distance: f64,
    /// Weather-risk score, nominally 1–10.
    pub weather_score: f64,
    /// Composite 0–100 rating computed at import time.
    pub rating: f64,
}

/// A CAN_DOCK compatibility edge between a ship and a port.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DockingSpec {
    pub imo: String,
    pub port_code: String,
    pub ship_dwt: f64,
    pub port_max_dwt: f64,
    pub can_dock: bool,
}

/// A VISITED edge recording one port call.
///
/// A ship/port pair may have many visits; `arrival` + `departure` together
/// discriminate the edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitSpec {
    pub imo: String,
    pub port_code: String,
    pub arrival: String,
    pub departure: String,
    /// Time in port, hours.
    pub duration: f64,
}
