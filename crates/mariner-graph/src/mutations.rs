//! Write operations for the shipping knowledge graph.
//!
//! All mutations use MERGE (upsert) semantics so that re-running an import
//! never duplicates a node or relationship. Nodes are identified solely by
//! their natural key; relationships by their discriminating properties
//! (route name for ROUTE, arrival + departure for VISITED). Properties not
//! named in a SET clause are left untouched.

use chrono::Utc;
use neo4rs::{query, Query};

use mariner_core::{Cargo, Company, DockingSpec, Port, RouteSpec, Ship, VisitSpec};

use crate::client::{GraphClient, GraphError};

impl GraphClient {
    // ── Node Upserts ─────────────────────────────────────────────

    /// Upsert a Company node, keyed by registration code.
    pub async fn upsert_company(&self, company: &Company) -> Result<(), GraphError> {
        self.run(company_query(company)).await
    }

    /// Upsert a Ship node, keyed by IMO number.
    pub async fn upsert_ship(&self, ship: &Ship) -> Result<(), GraphError> {
        self.run(ship_query(ship)).await
    }

    /// Upsert a Port node, keyed by 5-character port code.
    pub async fn upsert_port(&self, port: &Port) -> Result<(), GraphError> {
        self.run(port_query(port)).await
    }

    /// Upsert a Cargo node, keyed by cargo id.
    pub async fn upsert_cargo(&self, cargo: &Cargo) -> Result<(), GraphError> {
        self.run(cargo_query(cargo)).await
    }

    // ── Batch Node Upserts ───────────────────────────────────────
    //
    // One transaction per dataset: a rejected write rolls the whole dataset
    // back, since a half-imported node dataset leaves later relationship
    // imports unable to resolve their endpoints.

    /// Upsert a whole company dataset in a single transaction.
    pub async fn upsert_companies(&self, companies: &[Company]) -> Result<(), GraphError> {
        self.run_batch(companies.iter().map(company_query)).await
    }

    /// Upsert a whole ship dataset in a single transaction.
    pub async fn upsert_ships(&self, ships: &[Ship]) -> Result<(), GraphError> {
        self.run_batch(ships.iter().map(ship_query)).await
    }

    /// Upsert a whole port dataset in a single transaction.
    pub async fn upsert_ports(&self, ports: &[Port]) -> Result<(), GraphError> {
        self.run_batch(ports.iter().map(port_query)).await
    }

    /// Upsert a whole cargo dataset in a single transaction.
    pub async fn upsert_cargo_lots(&self, lots: &[Cargo]) -> Result<(), GraphError> {
        self.run_batch(lots.iter().map(cargo_query)).await
    }

    async fn run_batch(
        &self,
        queries: impl Iterator<Item = Query>,
    ) -> Result<(), GraphError> {
        let mut txn = self.start_txn().await?;
        for q in queries {
            txn.run(q).await?;
        }
        txn.commit().await?;
        Ok(())
    }

    // ── Relationship Upserts ─────────────────────────────────────

    /// Upsert an OWNS edge between an existing company and ship.
    ///
    /// Both endpoints are MATCHed, not MERGEd: if either is absent the
    /// query touches nothing. Referential validation against the company
    /// dataset happens in the importer before this is called.
    pub async fn upsert_owns(&self, company_code: &str, imo: &str) -> Result<(), GraphError> {
        let q = query(
            "MATCH (c:Company {code: $code})
             MATCH (s:Ship {imo: $imo})
             MERGE (c)-[:OWNS]->(s)",
        )
        .param("code", company_code.to_string())
        .param("imo", imo.to_string());

        self.run(q).await
    }

    /// Upsert a named ROUTE edge between two ports.
    ///
    /// Port endpoint stubs are MERGEd as well, so a route referencing a
    /// port absent from the port dataset still lands; a later port import
    /// fills in the stub's attributes.
    pub async fn upsert_route(&self, route: &RouteSpec) -> Result<(), GraphError> {
        let q = query(
            "MERGE (from:Port {code: $from_code})
             MERGE (to:Port {code: $to_code})
             MERGE (from)-[r:ROUTE {name: $name}]->(to)
             SET r.distance = $distance,
                 r.weather_score = $weather_score,
                 r.rating = $rating",
        )
        .param("from_code", route.from_port.clone())
        .param("to_code", route.to_port.clone())
        .param("name", route.name.clone())
        .param("distance", route.distance)
        .param("weather_score", route.weather_score)
        .param("rating", route.rating);

        self.run(q).await
    }

    /// Upsert a CAN_DOCK compatibility edge between a ship and a port.
    ///
    /// The pattern is undirected: MERGE matches an existing edge in either
    /// direction and creates ship→port only if none exists.
    pub async fn upsert_can_dock(&self, spec: &DockingSpec) -> Result<(), GraphError> {
        let q = query(
            "MATCH (s:Ship {imo: $imo})
             MATCH (p:Port {code: $port_code})
             MERGE (s)-[r:CAN_DOCK]-(p)
             SET r.ship_dwt = $ship_dwt,
                 r.port_max_dwt = $port_max_dwt,
                 r.can_dock = $can_dock",
        )
        .param("imo", spec.imo.clone())
        .param("port_code", spec.port_code.clone())
        .param("ship_dwt", spec.ship_dwt)
        .param("port_max_dwt", spec.port_max_dwt)
        .param("can_dock", spec.can_dock);

        self.run(q).await
    }

    /// Upsert a VISITED edge for one port call.
    ///
    /// Arrival + departure discriminate the edge, so a ship/port pair
    /// accumulates one edge per distinct visit.
    pub async fn upsert_visited(&self, spec: &VisitSpec) -> Result<(), GraphError> {
        let q = query(
            "MATCH (s:Ship {imo: $imo})
             MATCH (p:Port {code: $port_code})
             MERGE (s)-[r:VISITED {arrival: $arrival, departure: $departure}]-(p)
             SET r.duration = $duration",
        )
        .param("imo", spec.imo.clone())
        .param("port_code", spec.port_code.clone())
        .param("arrival", spec.arrival.clone())
        .param("departure", spec.departure.clone())
        .param("duration", spec.duration);

        self.run(q).await
    }

    // ── Administration ───────────────────────────────────────────

    /// Drop every node and relationship. Used before a full re-import.
    pub async fn clear_database(&self) -> Result<(), GraphError> {
        self.run(query("MATCH (n) DETACH DELETE n")).await
    }
}

// ── Query Builders ───────────────────────────────────────────────
//
// Shared between the single-record and batched upsert paths.
// first_imported / last_imported track when a record was seen, the only
// write that happens on every re-import.

fn company_query(company: &Company) -> Query {
    // Last write wins per field; fields this record's schema doesn't carry
    // are omitted from the SET clause so an earlier import's values survive.
    let mut sets = vec![
        "c.name = $name",
        "c.headquarters = $headquarters",
        "c.last_imported = $now",
    ];
    if company.establish_year.is_some() {
        sets.push("c.establish_year = $establish_year");
    }
    if company.company_type.is_some() {
        sets.push("c.company_type = $company_type");
    }
    if company.fleet_size.is_some() {
        sets.push("c.fleet_size = $fleet_size");
    }

    let cypher = format!(
        "MERGE (c:Company {{code: $code}})
         ON CREATE SET c.first_imported = $now
         SET {}",
        sets.join(", ")
    );

    let mut q = query(&cypher)
        .param("code", company.code.clone())
        .param("name", company.name.clone())
        .param("headquarters", company.headquarters.clone())
        .param("now", Utc::now().to_rfc3339());
    if let Some(year) = company.establish_year {
        q = q.param("establish_year", year);
    }
    if let Some(ref company_type) = company.company_type {
        q = q.param("company_type", company_type.clone());
    }
    if let Some(size) = company.fleet_size {
        q = q.param("fleet_size", size);
    }
    q
}

fn ship_query(ship: &Ship) -> Query {
    let mut sets = vec![
        "s.name = $name",
        "s.type = $type",
        "s.speed = $speed",
        "s.dwt = $dwt",
        "s.last_imported = $now",
    ];
    if ship.power.is_some() {
        sets.push("s.power = $power");
    }
    if ship.gross_tonnage.is_some() {
        sets.push("s.gross_tonnage = $gross_tonnage");
    }
    if ship.length.is_some() {
        sets.push("s.length = $length");
    }
    if ship.build_year.is_some() {
        sets.push("s.build_year = $build_year");
    }
    if ship.draft.is_some() {
        sets.push("s.draft = $draft");
    }

    let cypher = format!(
        "MERGE (s:Ship {{imo: $imo}})
         ON CREATE SET s.first_imported = $now
         SET {}",
        sets.join(", ")
    );

    let mut q = query(&cypher)
        .param("imo", ship.imo.clone())
        .param("name", ship.name.clone())
        .param("type", ship.ship_type.clone())
        .param("speed", ship.speed)
        .param("dwt", ship.dwt)
        .param("now", Utc::now().to_rfc3339());
    if let Some(power) = ship.power {
        q = q.param("power", power);
    }
    if let Some(gt) = ship.gross_tonnage {
        q = q.param("gross_tonnage", gt);
    }
    if let Some(length) = ship.length {
        q = q.param("length", length);
    }
    if let Some(year) = ship.build_year {
        q = q.param("build_year", year);
    }
    if let Some(draft) = ship.draft {
        q = q.param("draft", draft);
    }
    q
}

fn port_query(port: &Port) -> Query {
    query(
        "MERGE (p:Port {code: $code})
         ON CREATE SET p.first_imported = $now
         SET p.name = $name,
             p.congestion = $congestion,
             p.max_dwt = $max_dwt,
             p.last_imported = $now",
    )
    .param("code", port.code.clone())
    .param("name", port.name.clone())
    .param("congestion", port.congestion)
    .param("max_dwt", port.max_dwt)
    .param("now", Utc::now().to_rfc3339())
}

fn cargo_query(cargo: &Cargo) -> Query {
    query(
        "MERGE (c:Cargo {id: $id})
         ON CREATE SET c.first_imported = $now
         SET c.name = $name,
             c.type = $type,
             c.weight = $weight,
             c.last_imported = $now",
    )
    .param("id", cargo.id.clone())
    .param("name", cargo.name.clone())
    .param("type", cargo.cargo_type.clone())
    .param("weight", cargo.weight)
    .param("now", Utc::now().to_rfc3339())
}
