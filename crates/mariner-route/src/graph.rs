//! In-memory representation of the port network.
//!
//! Converts fetched `PortRecord` and `RouteEdgeRecord` rows into a compact
//! adjacency list for path enumeration. Ports that appear only as route
//! endpoints (stubs the port dataset never filled in) still get an index,
//! so routes through them remain traversable.

use std::collections::HashMap;

use mariner_graph::queries::{PortRecord, RouteEdgeRecord};

/// An outgoing ROUTE edge in the adjacency list.
#[derive(Debug, Clone)]
pub struct NetworkEdge {
    pub name: String,
    pub distance: f64,
    pub weather_score: f64,
    pub rating: f64,
    /// Destination port index.
    pub target: usize,
}

/// The port network as an adjacency list over dense indices.
pub struct RouteNetwork {
    /// Port code per dense index.
    pub codes: Vec<String>,
    /// `adjacency[i]` = outgoing ROUTE edges from port `i`.
    pub adjacency: Vec<Vec<NetworkEdge>>,
    index: HashMap<String, usize>,
}

impl RouteNetwork {
    /// Build from fetched graph data.
    pub fn from_records(ports: &[PortRecord], routes: &[RouteEdgeRecord]) -> Self {
        let mut index = HashMap::with_capacity(ports.len());
        let mut codes = Vec::with_capacity(ports.len());

        for port in ports {
            intern(&port.code, &mut index, &mut codes);
        }
        for route in routes {
            intern(&route.from_code, &mut index, &mut codes);
            intern(&route.to_code, &mut index, &mut codes);
        }

        let mut adjacency = vec![Vec::new(); codes.len()];
        for route in routes {
            let from = index[&route.from_code];
            let to = index[&route.to_code];
            adjacency[from].push(NetworkEdge {
                name: route.name.clone(),
                distance: route.distance,
                weather_score: route.weather_score,
                rating: route.rating,
                target: to,
            });
        }

        Self {
            codes,
            adjacency,
            index,
        }
    }

    /// Dense index of a port code, if known.
    pub fn index_of(&self, code: &str) -> Option<usize> {
        self.index.get(code).copied()
    }

    pub fn port_count(&self) -> usize {
        self.codes.len()
    }

    pub fn route_count(&self) -> usize {
        self.adjacency.iter().map(|edges| edges.len()).sum()
    }
}

fn intern(code: &str, index: &mut HashMap<String, usize>, codes: &mut Vec<String>) -> usize {
    if let Some(&i) = index.get(code) {
        return i;
    }
    let i = codes.len();
    index.insert(code.to_string(), i);
    codes.push(code.to_string());
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    fn port(code: &str) -> PortRecord {
        PortRecord {
            code: code.to_string(),
            name: format!("Port {code}"),
            congestion: 3,
            max_dwt: 100_000.0,
        }
    }

    fn route(from: &str, to: &str, name: &str) -> RouteEdgeRecord {
        RouteEdgeRecord {
            from_code: from.to_string(),
            to_code: to.to_string(),
            name: name.to_string(),
            distance: 1_000.0,
            weather_score: 5.0,
            rating: 30.0,
        }
    }

    #[test]
    fn test_builds_adjacency() {
        let ports = vec![port("A"), port("B")];
        let routes = vec![route("A", "B", "r1"), route("A", "B", "r2")];
        let net = RouteNetwork::from_records(&ports, &routes);

        assert_eq!(net.port_count(), 2);
        assert_eq!(net.route_count(), 2);
        let a = net.index_of("A").unwrap();
        assert_eq!(net.adjacency[a].len(), 2);
    }

    #[test]
    fn test_stub_endpoints_get_indices() {
        // "C" never appears in the port dataset but is a route endpoint.
        let ports = vec![port("A")];
        let routes = vec![route("A", "C", "r1")];
        let net = RouteNetwork::from_records(&ports, &routes);

        assert_eq!(net.port_count(), 2);
        assert!(net.index_of("C").is_some());
        assert!(net.index_of("Z").is_none());
    }
}
