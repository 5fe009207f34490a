//! CSV dataset loading with dataset-level schema validation.
//!
//! Every loader checks the header row against the dataset's required
//! columns before deserializing a single row, so a malformed dataset fails
//! whole — zero rows reach the graph. Company and ship datasets carry two
//! possible schemas; the loader picks the version from the headers present
//! and maps rows through the matching `records` shape.

use std::collections::HashSet;
use std::path::Path;

use serde::de::DeserializeOwned;

use mariner_core::{Cargo, Company, DockingSpec, Port, SchemaError, Ship, VisitSpec};

use crate::error::{ImportError, Result};
use crate::records::{
    CargoRow, CompanyRowV1, CompanyRowV2, DockingRow, PortRow, RouteRow, ShipRowV1, ShipRowV2,
    VisitRow, CARGO_COLUMNS, COMPANY_COLUMNS_V1, COMPANY_COLUMNS_V2, DOCKING_COLUMNS,
    PORT_COLUMNS, ROUTE_COLUMNS, SHIP_COLUMNS_V1, SHIP_COLUMNS_V2, VISIT_COLUMNS,
};

/// Load the company dataset, detecting the legacy or typed schema.
pub fn load_companies(path: &Path) -> Result<Vec<Company>> {
    let (mut reader, headers) = open("companies", path)?;

    let companies: Vec<Company> = if has_all(&headers, COMPANY_COLUMNS_V2) {
        tracing::debug!(path = %path.display(), "Company dataset uses the typed schema");
        deserialize_rows::<CompanyRowV2>(&mut reader, "companies")?
            .into_iter()
            .map(Company::from)
            .collect()
    } else {
        validate_columns("companies", &headers, COMPANY_COLUMNS_V1)?;
        deserialize_rows::<CompanyRowV1>(&mut reader, "companies")?
            .into_iter()
            .map(Company::from)
            .collect()
    };

    for (i, company) in companies.iter().enumerate() {
        require_key("companies", i, "registration_code", &company.code)?;
    }
    Ok(companies)
}

/// Load the ship dataset, detecting the legacy or typed schema.
pub fn load_ships(path: &Path) -> Result<Vec<Ship>> {
    let (mut reader, headers) = open("ships", path)?;

    let ships: Vec<Ship> = if has_all(&headers, SHIP_COLUMNS_V2) {
        tracing::debug!(path = %path.display(), "Ship dataset uses the typed schema");
        deserialize_rows::<ShipRowV2>(&mut reader, "ships")?
            .into_iter()
            .map(Ship::from)
            .collect()
    } else {
        validate_columns("ships", &headers, SHIP_COLUMNS_V1)?;
        deserialize_rows::<ShipRowV1>(&mut reader, "ships")?
            .into_iter()
            .map(Ship::from)
            .collect()
    };

    for (i, ship) in ships.iter().enumerate() {
        require_key("ships", i, "imo", &ship.imo)?;
    }
    Ok(ships)
}

/// Load the port dataset.
pub fn load_ports(path: &Path) -> Result<Vec<Port>> {
    let (mut reader, headers) = open("ports", path)?;
    validate_columns("ports", &headers, PORT_COLUMNS)?;

    let ports: Vec<Port> = deserialize_rows::<PortRow>(&mut reader, "ports")?
        .into_iter()
        .map(Port::from)
        .collect();

    for (i, port) in ports.iter().enumerate() {
        require_key("ports", i, "code", &port.code)?;
    }
    Ok(ports)
}

/// Load the route dataset. Ratings are computed by the importer.
pub fn load_routes(path: &Path) -> Result<Vec<RouteRow>> {
    let (mut reader, headers) = open("routes", path)?;
    validate_columns("routes", &headers, ROUTE_COLUMNS)?;

    let routes = deserialize_rows::<RouteRow>(&mut reader, "routes")?;
    for (i, route) in routes.iter().enumerate() {
        require_key("routes", i, "from_port", &route.from_port)?;
        require_key("routes", i, "to_port", &route.to_port)?;
        require_key("routes", i, "name", &route.name)?;
    }
    Ok(routes)
}

/// Load the cargo dataset.
pub fn load_cargo(path: &Path) -> Result<Vec<Cargo>> {
    let (mut reader, headers) = open("cargo", path)?;
    validate_columns("cargo", &headers, CARGO_COLUMNS)?;

    let lots: Vec<Cargo> = deserialize_rows::<CargoRow>(&mut reader, "cargo")?
        .into_iter()
        .map(Cargo::from)
        .collect();

    for (i, cargo) in lots.iter().enumerate() {
        require_key("cargo", i, "id", &cargo.id)?;
    }
    Ok(lots)
}

/// Load the ship/port docking-compatibility dataset.
pub fn load_docking(path: &Path) -> Result<Vec<DockingSpec>> {
    let (mut reader, headers) = open("docking", path)?;
    validate_columns("docking", &headers, DOCKING_COLUMNS)?;

    let rows = deserialize_rows::<DockingRow>(&mut reader, "docking")?;
    let mut specs = Vec::with_capacity(rows.len());
    for (i, row) in rows.into_iter().enumerate() {
        let can_dock = parse_flag(&row.can_dock).ok_or_else(|| ImportError::InvalidFlag {
            dataset: "docking".to_string(),
            line: data_line(i),
            value: row.can_dock.clone(),
        })?;
        specs.push(DockingSpec {
            imo: row.imo,
            port_code: row.port_code,
            ship_dwt: row.ship_dwt,
            port_max_dwt: row.port_max_dwt,
            can_dock,
        });
    }
    Ok(specs)
}

/// Load the port-visit dataset.
pub fn load_visits(path: &Path) -> Result<Vec<VisitSpec>> {
    let (mut reader, headers) = open("visits", path)?;
    validate_columns("visits", &headers, VISIT_COLUMNS)?;

    Ok(deserialize_rows::<VisitRow>(&mut reader, "visits")?
        .into_iter()
        .map(|row| VisitSpec {
            imo: row.imo,
            port_code: row.port_code,
            arrival: row.arrival,
            departure: row.departure,
            duration: row.duration,
        })
        .collect())
}

// ── Helpers ──────────────────────────────────────────────────────

fn open(dataset: &str, path: &Path) -> Result<(csv::Reader<std::fs::File>, HashSet<String>)> {
    let mut reader = csv::Reader::from_path(path).map_err(|source| ImportError::Csv {
        dataset: dataset.to_string(),
        source,
    })?;
    let headers = reader
        .headers()
        .map_err(|source| ImportError::Csv {
            dataset: dataset.to_string(),
            source,
        })?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    Ok((reader, headers))
}

fn has_all(headers: &HashSet<String>, required: &[&str]) -> bool {
    required.iter().all(|c| headers.contains(*c))
}

fn validate_columns(dataset: &str, headers: &HashSet<String>, required: &[&str]) -> Result<()> {
    let missing: Vec<String> = required
        .iter()
        .filter(|c| !headers.contains(**c))
        .map(|c| (*c).to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(SchemaError::new(dataset, missing).into())
    }
}

fn deserialize_rows<T: DeserializeOwned>(
    reader: &mut csv::Reader<std::fs::File>,
    dataset: &str,
) -> Result<Vec<T>> {
    reader
        .deserialize()
        .collect::<std::result::Result<Vec<T>, _>>()
        .map_err(|source| ImportError::Csv {
            dataset: dataset.to_string(),
            source,
        })
}

fn require_key(dataset: &str, row_idx: usize, column: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ImportError::EmptyKey {
            dataset: dataset.to_string(),
            line: data_line(row_idx),
            column,
        });
    }
    Ok(())
}

/// 1-based file line for a 0-based data row (header is line 1).
fn data_line(row_idx: usize) -> usize {
    row_idx + 2
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "yes" | "y" | "true" | "1" => Some(true),
        "no" | "n" | "false" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn csv_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_legacy_company_schema() {
        let file = csv_file(
            "registration_code,name,headquarters\n\
             C001,Nordic Lines,Oslo\n\
             C002,Pacific Freight,Singapore\n",
        );
        let companies = load_companies(file.path()).unwrap();
        assert_eq!(companies.len(), 2);
        assert_eq!(companies[0].code, "C001");
        assert!(companies[0].fleet_size.is_none());
    }

    #[test]
    fn test_typed_company_schema() {
        let file = csv_file(
            "registration_code,name,headquarters,establish_year,company_type,fleet_size\n\
             C001,Nordic Lines,Oslo,1987,Bulk,24\n",
        );
        let companies = load_companies(file.path()).unwrap();
        assert_eq!(companies[0].establish_year, Some(1987));
        assert_eq!(companies[0].fleet_size, Some(24));
    }

    #[test]
    fn test_missing_columns_abort_the_dataset() {
        let file = csv_file("registration_code,name\nC001,Nordic Lines\n");
        let err = load_companies(file.path()).unwrap_err();
        match err {
            ImportError::Schema(schema) => {
                assert_eq!(schema.dataset, "companies");
                assert_eq!(schema.missing, vec!["headquarters".to_string()]);
            }
            other => panic!("expected schema error, got {other}"),
        }
    }

    #[test]
    fn test_empty_natural_key_is_rejected() {
        let file = csv_file(
            "registration_code,name,headquarters\n\
             C001,Nordic Lines,Oslo\n\
             ,Ghost Shipping,Nowhere\n",
        );
        let err = load_companies(file.path()).unwrap_err();
        match err {
            ImportError::EmptyKey { line, column, .. } => {
                assert_eq!(line, 3);
                assert_eq!(column, "registration_code");
            }
            other => panic!("expected empty-key error, got {other}"),
        }
    }

    #[test]
    fn test_ship_schema_versions() {
        let legacy = csv_file(
            "imo,name,type,speed,power,gross_tonnage,dwt,company_code\n\
             9700001,Baltic Trader,Bulk Carrier,14.5,9480,44000,82000,C001\n",
        );
        let ships = load_ships(legacy.path()).unwrap();
        assert_eq!(ships[0].power, Some(9480.0));
        assert!(ships[0].length.is_none());

        let typed = csv_file(
            "imo,name,type,speed,dwt,length,build_year,draft,company_code\n\
             9700002,Coral Wave,Container,21.0,95000,334.5,2014,14.2,C002\n",
        );
        let ships = load_ships(typed.path()).unwrap();
        assert_eq!(ships[0].length, Some(334.5));
        assert_eq!(ships[0].build_year, Some(2014));
        assert!(ships[0].power.is_none());
    }

    #[test]
    fn test_ship_blank_company_reference_becomes_none() {
        let file = csv_file(
            "imo,name,type,speed,power,gross_tonnage,dwt,company_code\n\
             9700003,Iron Duke,Bulk Carrier,13.0,8800,41000,76000,\n",
        );
        let ships = load_ships(file.path()).unwrap();
        assert!(ships[0].company_code.is_none());
    }

    #[test]
    fn test_docking_flag_parsing() {
        let file = csv_file(
            "imo,port_code,ship_dwt,port_max_dwt,can_dock\n\
             9700001,NLRTM,82000,150000,yes\n\
             9700001,CNSHA,82000,60000,no\n",
        );
        let specs = load_docking(file.path()).unwrap();
        assert!(specs[0].can_dock);
        assert!(!specs[1].can_dock);
    }

    #[test]
    fn test_docking_unrecognized_flag_fails() {
        let file = csv_file(
            "imo,port_code,ship_dwt,port_max_dwt,can_dock\n\
             9700001,NLRTM,82000,150000,maybe\n",
        );
        let err = load_docking(file.path()).unwrap_err();
        match err {
            ImportError::InvalidFlag { value, line, .. } => {
                assert_eq!(value, "maybe");
                assert_eq!(line, 2);
            }
            other => panic!("expected flag error, got {other}"),
        }
    }

    #[test]
    fn test_route_rows_load_without_rating() {
        let file = csv_file(
            "from_port,to_port,name,distance,weather_score\n\
             CNSHA,USNYC,Trans-Pacific Express,10500,6\n",
        );
        let routes = load_routes(file.path()).unwrap();
        assert_eq!(routes[0].distance, 10500.0);
        assert_eq!(routes[0].weather_score, 6.0);
    }

    #[test]
    fn test_visits_load() {
        let file = csv_file(
            "imo,port_code,arrival,departure,duration\n\
             9700001,SGSIN,2025-03-01T08:00,2025-03-02T19:30,35.5\n",
        );
        let visits = load_visits(file.path()).unwrap();
        assert_eq!(visits[0].arrival, "2025-03-01T08:00");
        assert_eq!(visits[0].duration, 35.5);
    }
}
