//! Simple-path enumeration over the port network.
//!
//! A DFS with cycle detection and a hop-depth bound enumerates every simple
//! path between two ports. Parallel edges (differently-named routes on the
//! same port pair) are distinct legs, so each combination yields its own
//! candidate path. Ranking among candidates happens in the engine.

use std::collections::HashSet;

use crate::graph::RouteNetwork;

/// A raw path through the network: port indices plus, per hop,
/// `(from_index, edge_position_in_adjacency_list)`.
#[derive(Debug, Clone)]
pub struct RawRoute {
    pub ports: Vec<usize>,
    pub edges: Vec<(usize, usize)>,
}

struct DfsState {
    node: usize,
    ports: Vec<usize>,
    edges: Vec<(usize, usize)>,
    visited: HashSet<usize>,
}

/// Walk all simple paths from `source` to `target` up to `max_hops` edges,
/// invoking `visit` on each. Stops after `max_routes` paths; returns `true`
/// when that bound cut the walk short with unexplored branches remaining,
/// so callers can surface that the candidate set is incomplete.
pub fn visit_simple_routes(
    network: &RouteNetwork,
    source: usize,
    target: usize,
    max_hops: usize,
    max_routes: usize,
    visit: &mut dyn FnMut(RawRoute),
) -> bool {
    let mut found = 0;

    let mut stack = vec![DfsState {
        node: source,
        ports: vec![source],
        edges: Vec::new(),
        visited: {
            let mut s = HashSet::new();
            s.insert(source);
            s
        },
    }];

    while let Some(state) = stack.pop() {
        if state.node == target && !state.edges.is_empty() {
            visit(RawRoute {
                ports: state.ports,
                edges: state.edges,
            });
            found += 1;
            if found >= max_routes {
                return !stack.is_empty();
            }
            continue;
        }

        if state.edges.len() >= max_hops {
            continue;
        }

        for (edge_pos, edge) in network.adjacency[state.node].iter().enumerate() {
            if state.visited.contains(&edge.target) {
                continue;
            }

            let mut visited = state.visited.clone();
            visited.insert(edge.target);

            let mut ports = state.ports.clone();
            ports.push(edge.target);

            let mut edges = state.edges.clone();
            edges.push((state.node, edge_pos));

            stack.push(DfsState {
                node: edge.target,
                ports,
                edges,
                visited,
            });
        }
    }

    false
}

/// Collect all simple paths from `source` to `target` up to `max_hops`
/// edges, capped at `max_routes` candidates.
pub fn enumerate_simple_routes(
    network: &RouteNetwork,
    source: usize,
    target: usize,
    max_hops: usize,
    max_routes: usize,
) -> Vec<RawRoute> {
    let mut routes = Vec::new();
    visit_simple_routes(network, source, target, max_hops, max_routes, &mut |r| {
        routes.push(r)
    });
    routes
}

#[cfg(test)]
mod tests {
    use mariner_graph::queries::{PortRecord, RouteEdgeRecord};

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

    fn network(routes: &[RouteEdgeRecord]) -> RouteNetwork {
        RouteNetwork::from_records(&[port("A"), port("B"), port("C"), port("D")], routes)
    }

    #[test]
    fn test_finds_direct_and_indirect_paths() {
        let net = network(&[
            route("A", "B", "direct"),
            route("A", "C", "leg1"),
            route("C", "B", "leg2"),
        ]);
        let paths = enumerate_simple_routes(
            &net,
            net.index_of("A").unwrap(),
            net.index_of("B").unwrap(),
            6,
            100,
        );
        assert_eq!(paths.len(), 2);
    }

    #[test]
    fn test_parallel_routes_are_distinct_paths() {
        let net = network(&[route("A", "B", "northern"), route("A", "B", "southern")]);
        let paths = enumerate_simple_routes(
            &net,
            net.index_of("A").unwrap(),
            net.index_of("B").unwrap(),
            6,
            100,
        );
        assert_eq!(paths.len(), 2);
    }

    #[test]
    fn test_unreachable_target_yields_nothing() {
        let net = network(&[route("A", "B", "r1"), route("C", "D", "r2")]);
        let paths = enumerate_simple_routes(
            &net,
            net.index_of("A").unwrap(),
            net.index_of("D").unwrap(),
            6,
            100,
        );
        assert!(paths.is_empty());
    }

    #[test]
    fn test_cycles_are_not_revisited() {
        let net = network(&[
            route("A", "B", "ab"),
            route("B", "A", "ba"),
            route("B", "C", "bc"),
        ]);
        let paths = enumerate_simple_routes(
            &net,
            net.index_of("A").unwrap(),
            net.index_of("C").unwrap(),
            6,
            100,
        );
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].edges.len(), 2);
    }

    #[test]
    fn test_candidate_cap_reports_truncation() {
        // Adjacency order puts the two-hop branch on the stack first, so
        // the LIFO walk reaches the direct route before it; a cap of one
        // must report that the other branch went unexplored.
        let net = network(&[
            route("A", "C", "leg1"),
            route("A", "B", "direct"),
            route("C", "B", "leg2"),
        ]);
        let mut found = 0;
        let truncated = visit_simple_routes(
            &net,
            net.index_of("A").unwrap(),
            net.index_of("B").unwrap(),
            6,
            1,
            &mut |_| found += 1,
        );
        assert!(truncated);
        assert_eq!(found, 1);
    }

    #[test]
    fn test_ample_candidate_cap_is_not_truncation() {
        let net = network(&[
            route("A", "C", "leg1"),
            route("A", "B", "direct"),
            route("C", "B", "leg2"),
        ]);
        let mut found = 0;
        let truncated = visit_simple_routes(
            &net,
            net.index_of("A").unwrap(),
            net.index_of("B").unwrap(),
            6,
            100,
            &mut |_| found += 1,
        );
        assert!(!truncated);
        assert_eq!(found, 2);
    }

    #[test]
    fn test_hop_depth_bound() {
        let net = network(&[
            route("A", "B", "ab"),
            route("B", "C", "bc"),
            route("C", "D", "cd"),
        ]);
        let paths = enumerate_simple_routes(
            &net,
            net.index_of("A").unwrap(),
            net.index_of("D").unwrap(),
            2,
            100,
        );
        assert!(paths.is_empty());
    }
}
