//! Integration tests for mariner-graph against a live Neo4j instance.
//!
//! These tests require `docker compose up` to be running.
//! Run with: cargo test --package mariner-graph --test integration -- --ignored
//!
//! Skipped automatically if Neo4j is not available.

use mariner_core::{Cargo, Company, DockingSpec, Port, RouteSpec, Ship, VisitSpec};
use mariner_graph::{GraphClient, GraphConfig};

async fn connect_or_skip() -> Option<GraphClient> {
    let config = GraphConfig::default();
    match GraphClient::connect(&config).await {
        Ok(client) => Some(client),
        Err(e) => {
            eprintln!("Skipping integration test (Neo4j not available): {e}");
            None
        }
    }
}

async fn cleanup(client: &GraphClient) {
    let _ = client.clear_database().await;
}

fn make_company(code: &str, name: &str) -> Company {
    Company {
        code: code.to_string(),
        name: name.to_string(),
        headquarters: "Rotterdam".to_string(),
        establish_year: None,
        company_type: None,
        fleet_size: None,
    }
}

fn make_ship(imo: &str, name: &str) -> Ship {
    Ship {
        imo: imo.to_string(),
        name: name.to_string(),
        ship_type: "Bulk Carrier".to_string(),
        speed: 14.5,
        dwt: 82_000.0,
        power: Some(9_480.0),
        gross_tonnage: Some(44_000.0),
        length: None,
        build_year: None,
        draft: None,
        company_code: Some("C001".to_string()),
    }
}

fn make_port(code: &str, name: &str) -> Port {
    Port {
        code: code.to_string(),
        name: name.to_string(),
        congestion: 5,
        max_dwt: 150_000.0,
    }
}

fn make_route(from: &str, to: &str, name: &str, distance: f64) -> RouteSpec {
    RouteSpec {
        from_port: from.to_string(),
        to_port: to.to_string(),
        name: name.to_string(),
        distance,
        weather_score: 4.0,
        rating: 42.0,
    }
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn test_company_upsert_is_idempotent() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    cleanup(&client).await;

    client.upsert_company(&make_company("C001", "Nordic Lines")).await.unwrap();
    // Re-import with a changed name: same key must update in place.
    client.upsert_company(&make_company("C001", "Nordic Lines AS")).await.unwrap();

    assert_eq!(client.count_nodes("Company").await.unwrap(), 1);

    cleanup(&client).await;
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn test_company_partial_schema_preserves_fields() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    cleanup(&client).await;

    // Typed schema carries fleet_size; the legacy schema doesn't.
    let mut typed = make_company("C002", "Pacific Freight");
    typed.fleet_size = Some(31);
    client.upsert_company(&typed).await.unwrap();

    // Legacy re-import must not clear fleet_size.
    client.upsert_company(&make_company("C002", "Pacific Freight")).await.unwrap();

    let row = client
        .query_one(
            neo4rs::query("MATCH (c:Company {code: 'C002'}) RETURN c.fleet_size AS fleet_size"),
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.get::<i64>("fleet_size").unwrap(), 31);

    cleanup(&client).await;
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn test_route_upsert_is_idempotent_per_name() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    cleanup(&client).await;

    client.upsert_port(&make_port("CNSHA", "Shanghai")).await.unwrap();
    client.upsert_port(&make_port("USNYC", "New York")).await.unwrap();

    client
        .upsert_route(&make_route("CNSHA", "USNYC", "Trans-Pacific Express", 10_500.0))
        .await
        .unwrap();
    // Same name, updated distance: one edge, latest attributes.
    client
        .upsert_route(&make_route("CNSHA", "USNYC", "Trans-Pacific Express", 10_620.0))
        .await
        .unwrap();
    // Different name on the same port pair: a second edge.
    client
        .upsert_route(&make_route("CNSHA", "USNYC", "Arctic Shortcut", 8_900.0))
        .await
        .unwrap();

    assert_eq!(client.count_relationships("ROUTE").await.unwrap(), 2);

    let network = client.fetch_route_network().await.unwrap();
    let express = network
        .routes
        .iter()
        .find(|r| r.name == "Trans-Pacific Express")
        .unwrap();
    assert_eq!(express.distance, 10_620.0);

    cleanup(&client).await;
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn test_owns_requires_both_endpoints() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    cleanup(&client).await;

    client.upsert_ship(&make_ship("9700001", "Baltic Trader")).await.unwrap();

    // Company node absent: the MATCH finds nothing and no edge is created.
    client.upsert_owns("C404", "9700001").await.unwrap();
    assert_eq!(client.count_relationships("OWNS").await.unwrap(), 0);

    client.upsert_company(&make_company("C001", "Nordic Lines")).await.unwrap();
    client.upsert_owns("C001", "9700001").await.unwrap();
    client.upsert_owns("C001", "9700001").await.unwrap();
    assert_eq!(client.count_relationships("OWNS").await.unwrap(), 1);

    cleanup(&client).await;
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn test_visited_discriminated_by_arrival_departure() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    cleanup(&client).await;

    client.upsert_ship(&make_ship("9700002", "Coral Wave")).await.unwrap();
    client.upsert_port(&make_port("SGSIN", "Singapore")).await.unwrap();

    let visit = VisitSpec {
        imo: "9700002".to_string(),
        port_code: "SGSIN".to_string(),
        arrival: "2025-03-01T08:00".to_string(),
        departure: "2025-03-02T19:30".to_string(),
        duration: 35.5,
    };
    client.upsert_visited(&visit).await.unwrap();
    client.upsert_visited(&visit).await.unwrap();

    let second = VisitSpec {
        arrival: "2025-04-11T06:15".to_string(),
        departure: "2025-04-12T10:00".to_string(),
        duration: 27.75,
        ..visit
    };
    client.upsert_visited(&second).await.unwrap();

    assert_eq!(client.count_relationships("VISITED").await.unwrap(), 2);

    cleanup(&client).await;
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn test_can_dock_and_cargo_upserts() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    cleanup(&client).await;

    client.upsert_ship(&make_ship("9700003", "Iron Duke")).await.unwrap();
    client.upsert_port(&make_port("NLRTM", "Rotterdam")).await.unwrap();

    let spec = DockingSpec {
        imo: "9700003".to_string(),
        port_code: "NLRTM".to_string(),
        ship_dwt: 82_000.0,
        port_max_dwt: 150_000.0,
        can_dock: true,
    };
    client.upsert_can_dock(&spec).await.unwrap();
    client.upsert_can_dock(&spec).await.unwrap();
    assert_eq!(client.count_relationships("CAN_DOCK").await.unwrap(), 1);

    let cargo = Cargo {
        id: "CG-1001".to_string(),
        name: "Iron Ore".to_string(),
        cargo_type: "Dry Bulk".to_string(),
        weight: 64_000.0,
    };
    client.upsert_cargo(&cargo).await.unwrap();
    client.upsert_cargo(&cargo).await.unwrap();
    assert_eq!(client.count_nodes("Cargo").await.unwrap(), 1);

    cleanup(&client).await;
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn test_get_port_missing_returns_none() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    cleanup(&client).await;

    assert!(client.get_port("ZZZZZ").await.unwrap().is_none());
}
