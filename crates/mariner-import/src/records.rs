//! CSV row shapes and their mapping into canonical records.
//!
//! Companies and ships exist in two external schemas: the legacy shape
//! (registration codes, engine data) and the typed shape (fleet metadata,
//! hull dimensions). Each shape gets its own row struct deserialized by
//! column name, with an explicit `From` mapping into the canonical
//! mariner-core type. Schema selection happens once per dataset from the
//! header row, never per field at use.

use serde::Deserialize;

use mariner_core::{Cargo, Company, Port, Ship};

// ── Companies ─────────────────────────────────────────────────────

/// Legacy company schema: code, name, headquarters.
pub const COMPANY_COLUMNS_V1: &[&str] = &["registration_code", "name", "headquarters"];

/// Typed company schema: adds establishment year, company type, fleet size.
pub const COMPANY_COLUMNS_V2: &[&str] = &[
    "registration_code",
    "name",
    "headquarters",
    "establish_year",
    "company_type",
    "fleet_size",
];

#[derive(Debug, Deserialize)]
pub struct CompanyRowV1 {
    pub registration_code: String,
    pub name: String,
    pub headquarters: String,
}

#[derive(Debug, Deserialize)]
pub struct CompanyRowV2 {
    pub registration_code: String,
    pub name: String,
    pub headquarters: String,
    pub establish_year: i64,
    pub company_type: String,
    pub fleet_size: i64,
}

impl From<CompanyRowV1> for Company {
    fn from(row: CompanyRowV1) -> Self {
        Self {
            code: row.registration_code,
            name: row.name,
            headquarters: row.headquarters,
            establish_year: None,
            company_type: None,
            fleet_size: None,
        }
    }
}

impl From<CompanyRowV2> for Company {
    fn from(row: CompanyRowV2) -> Self {
        Self {
            code: row.registration_code,
            name: row.name,
            headquarters: row.headquarters,
            establish_year: Some(row.establish_year),
            company_type: Some(row.company_type),
            fleet_size: Some(row.fleet_size),
        }
    }
}

// ── Ships ─────────────────────────────────────────────────────────

/// Legacy ship schema: engine data, no hull dimensions.
pub const SHIP_COLUMNS_V1: &[&str] = &[
    "imo",
    "name",
    "type",
    "speed",
    "power",
    "gross_tonnage",
    "dwt",
    "company_code",
];

/// Typed ship schema: hull dimensions and build year, no engine data.
pub const SHIP_COLUMNS_V2: &[&str] = &[
    "imo",
    "name",
    "type",
    "speed",
    "dwt",
    "length",
    "build_year",
    "draft",
    "company_code",
];

#[derive(Debug, Deserialize)]
pub struct ShipRowV1 {
    pub imo: String,
    pub name: String,
    #[serde(rename = "type")]
    pub ship_type: String,
    pub speed: f64,
    pub power: f64,
    pub gross_tonnage: f64,
    pub dwt: f64,
    pub company_code: String,
}

#[derive(Debug, Deserialize)]
pub struct ShipRowV2 {
    pub imo: String,
    pub name: String,
    #[serde(rename = "type")]
    pub ship_type: String,
    pub speed: f64,
    pub dwt: f64,
    pub length: f64,
    pub build_year: i64,
    pub draft: f64,
    pub company_code: String,
}

impl From<ShipRowV1> for Ship {
    fn from(row: ShipRowV1) -> Self {
        Self {
            imo: row.imo,
            name: row.name,
            ship_type: row.ship_type,
            speed: row.speed,
            dwt: row.dwt,
            power: Some(row.power),
            gross_tonnage: Some(row.gross_tonnage),
            length: None,
            build_year: None,
            draft: None,
            company_code: none_if_empty(row.company_code),
        }
    }
}

impl From<ShipRowV2> for Ship {
    fn from(row: ShipRowV2) -> Self {
        Self {
            imo: row.imo,
            name: row.name,
            ship_type: row.ship_type,
            speed: row.speed,
            dwt: row.dwt,
            power: None,
            gross_tonnage: None,
            length: Some(row.length),
            build_year: Some(row.build_year),
            draft: Some(row.draft),
            company_code: none_if_empty(row.company_code),
        }
    }
}

// ── Ports ─────────────────────────────────────────────────────────

pub const PORT_COLUMNS: &[&str] = &["code", "name", "congestion", "max_dwt"];

#[derive(Debug, Deserialize)]
pub struct PortRow {
    pub code: String,
    pub name: String,
    pub congestion: i64,
    pub max_dwt: f64,
}

impl From<PortRow> for Port {
    fn from(row: PortRow) -> Self {
        Self {
            code: row.code,
            name: row.name,
            congestion: row.congestion,
            max_dwt: row.max_dwt,
        }
    }
}

// ── Routes ────────────────────────────────────────────────────────

pub const ROUTE_COLUMNS: &[&str] = &["from_port", "to_port", "name", "distance", "weather_score"];

/// A route row before rating annotation.
#[derive(Debug, Deserialize)]
pub struct RouteRow {
    pub from_port: String,
    pub to_port: String,
    pub name: String,
    pub distance: f64,
    pub weather_score: f64,
}

// ── Cargo ─────────────────────────────────────────────────────────

pub const CARGO_COLUMNS: &[&str] = &["id", "name", "type", "weight"];

#[derive(Debug, Deserialize)]
pub struct CargoRow {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub cargo_type: String,
    pub weight: f64,
}

impl From<CargoRow> for Cargo {
    fn from(row: CargoRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            cargo_type: row.cargo_type,
            weight: row.weight,
        }
    }
}

// ── Docking & Visits ──────────────────────────────────────────────

pub const DOCKING_COLUMNS: &[&str] = &["imo", "port_code", "ship_dwt", "port_max_dwt", "can_dock"];

#[derive(Debug, Deserialize)]
pub struct DockingRow {
    pub imo: String,
    pub port_code: String,
    pub ship_dwt: f64,
    pub port_max_dwt: f64,
    /// Source flag: yes/no style string, parsed by the loader.
    pub can_dock: String,
}

pub const VISIT_COLUMNS: &[&str] = &["imo", "port_code", "arrival", "departure", "duration"];

#[derive(Debug, Deserialize)]
pub struct VisitRow {
    pub imo: String,
    pub port_code: String,
    pub arrival: String,
    pub departure: String,
    pub duration: f64,
}

fn none_if_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
