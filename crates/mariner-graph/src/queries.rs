//! Read operations for the shipping knowledge graph.

use neo4rs::query;

use crate::client::{GraphClient, GraphError};

/// A Port node as read back from the graph.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PortRecord {
    pub code: String,
    pub name: String,
    pub congestion: i64,
    pub max_dwt: f64,
}

/// A ROUTE edge as read back from the graph, with both endpoint codes.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RouteEdgeRecord {
    pub from_code: String,
    pub to_code: String,
    pub name: String,
    pub distance: f64,
    pub weather_score: f64,
    pub rating: f64,
}

/// The full Port/ROUTE subgraph, fetched for in-memory route computation.
#[derive(Debug, Clone, Default)]
pub struct RouteNetworkData {
    pub ports: Vec<PortRecord>,
    pub routes: Vec<RouteEdgeRecord>,
}

impl GraphClient {
    // ── Lookups ──────────────────────────────────────────────────

    /// Get a port by its 5-character code, if present.
    pub async fn get_port(&self, code: &str) -> Result<Option<PortRecord>, GraphError> {
        let q = query(
            "MATCH (p:Port {code: $code})
             RETURN p.code AS code, p.name AS name,
                    p.congestion AS congestion, p.max_dwt AS max_dwt",
        )
        .param("code", code.to_string());

        match self.query_one(q).await? {
            Some(row) => Ok(Some(port_from_row(&row)?)),
            None => Ok(None),
        }
    }

    /// Count nodes with a given label.
    pub async fn count_nodes(&self, label: &str) -> Result<i64, GraphError> {
        let cypher = format!("MATCH (n:{label}) RETURN count(n) AS cnt");
        match self.query_one(query(&cypher)).await? {
            Some(row) => Ok(row.get::<i64>("cnt").unwrap_or(0)),
            None => Ok(0),
        }
    }

    /// Count relationships of a given type.
    pub async fn count_relationships(&self, rel_type: &str) -> Result<i64, GraphError> {
        let cypher = format!("MATCH ()-[r:{rel_type}]->() RETURN count(r) AS cnt");
        match self.query_one(query(&cypher)).await? {
            Some(row) => Ok(row.get::<i64>("cnt").unwrap_or(0)),
            None => Ok(0),
        }
    }

    // ── Route Network ────────────────────────────────────────────

    /// Fetch every Port node and every ROUTE edge.
    ///
    /// The route engine enumerates candidate paths in memory; for the size
    /// of a port network one bulk fetch beats per-hop round trips.
    pub async fn fetch_route_network(&self) -> Result<RouteNetworkData, GraphError> {
        let port_rows = self
            .query_rows(query(
                "MATCH (p:Port)
                 RETURN p.code AS code, p.name AS name,
                        p.congestion AS congestion, p.max_dwt AS max_dwt",
            ))
            .await?;

        let mut ports = Vec::with_capacity(port_rows.len());
        for row in port_rows {
            ports.push(port_from_row(&row)?);
        }

        let route_rows = self
            .query_rows(query(
                "MATCH (from:Port)-[r:ROUTE]->(to:Port)
                 RETURN from.code AS from_code, to.code AS to_code,
                        r.name AS name, r.distance AS distance,
                        r.weather_score AS weather_score, r.rating AS rating",
            ))
            .await?;

        let mut routes = Vec::with_capacity(route_rows.len());
        for row in route_rows {
            routes.push(RouteEdgeRecord {
                from_code: get_column(&row, "from_code")?,
                to_code: get_column(&row, "to_code")?,
                name: get_column(&row, "name")?,
                distance: get_number(&row, "distance")?,
                weather_score: get_number(&row, "weather_score")?,
                rating: get_number(&row, "rating")?,
            });
        }

        Ok(RouteNetworkData { ports, routes })
    }
}

fn port_from_row(row: &neo4rs::Row) -> Result<PortRecord, GraphError> {
    Ok(PortRecord {
        code: get_column(row, "code")?,
        name: get_column(row, "name")?,
        congestion: row.get::<i64>("congestion").unwrap_or(0),
        max_dwt: get_number(row, "max_dwt")?,
    })
}

fn get_column(row: &neo4rs::Row, name: &str) -> Result<String, GraphError> {
    row.get::<String>(name)
        .map_err(|e| GraphError::Deserialization(format!("column '{name}': {e}")))
}

/// Read a numeric column that may come back as integer or float.
fn get_number(row: &neo4rs::Row, name: &str) -> Result<f64, GraphError> {
    if let Ok(v) = row.get::<f64>(name) {
        return Ok(v);
    }
    row.get::<i64>(name)
        .map(|v| v as f64)
        .map_err(|e| GraphError::Deserialization(format!("column '{name}': {e}")))
}
