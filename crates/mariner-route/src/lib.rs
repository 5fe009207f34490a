//! mariner-route: Best-route computation for the Mariner shipping graph.
//!
//! Fetches the Port/ROUTE subgraph from Neo4j, builds an in-memory
//! adjacency, enumerates all simple paths between the two ports up to a
//! bounded hop depth, and selects the path with the highest total rating
//! (ties broken by fewer hops, then lower total weather exposure).

pub mod algorithms;
pub mod error;
pub mod graph;
pub mod types;

pub use error::RouteError;
pub use types::{RouteLeg, RouteResult};

use mariner_graph::GraphClient;

use crate::algorithms::RawRoute;
use crate::graph::RouteNetwork;

const DEFAULT_MAX_HOPS: usize = 6;
const DEFAULT_MAX_CANDIDATES: usize = 500;

/// The route query engine.
pub struct RouteEngine {
    graph: GraphClient,
    max_hops: usize,
    max_candidates: usize,
}

impl RouteEngine {
    pub fn new(graph: GraphClient) -> Self {
        Self {
            graph,
            max_hops: DEFAULT_MAX_HOPS,
            max_candidates: DEFAULT_MAX_CANDIDATES,
        }
    }

    /// Bound the hop depth of enumerated paths.
    pub fn with_max_hops(mut self, max_hops: usize) -> Self {
        self.max_hops = max_hops;
        self
    }

    /// Bound the number of candidate paths examined.
    pub fn with_max_candidates(mut self, max_candidates: usize) -> Self {
        self.max_candidates = max_candidates;
        self
    }

    /// Find the best route between two ports.
    ///
    /// Returns `Ok(None)` when either port is unknown or no path exists
    /// within the hop bound — an empty result, not an error.
    pub async fn find_optimal_route(
        &self,
        from_port: &str,
        to_port: &str,
    ) -> error::Result<Option<RouteResult>> {
        let data = self.graph.fetch_route_network().await?;
        let network = RouteNetwork::from_records(&data.ports, &data.routes);
        tracing::debug!(
            ports = network.port_count(),
            routes = network.route_count(),
            "Fetched route network"
        );

        let (Some(source), Some(target)) =
            (network.index_of(from_port), network.index_of(to_port))
        else {
            tracing::info!(from = %from_port, to = %to_port, "Port not present in the graph");
            return Ok(None);
        };

        // Fold each candidate into a running best as the walk produces it.
        let mut best: Option<RouteResult> = None;
        let truncated = algorithms::visit_simple_routes(
            &network,
            source,
            target,
            self.max_hops,
            self.max_candidates,
            &mut |raw| {
                let candidate = to_route_result(&raw, &network);
                best = Some(match best.take() {
                    Some(current) => pick_better(current, candidate),
                    None => candidate,
                });
            },
        );
        if truncated {
            tracing::warn!(
                max_candidates = self.max_candidates,
                "Candidate cap stopped path enumeration early; \
                 the selected route may not be the highest-rated"
            );
        }

        Ok(best)
    }
}

/// Aggregate a raw path into a result with per-leg detail and totals.
fn to_route_result(raw: &RawRoute, network: &RouteNetwork) -> RouteResult {
    let legs: Vec<RouteLeg> = raw
        .edges
        .iter()
        .map(|&(from_idx, edge_pos)| {
            let edge = &network.adjacency[from_idx][edge_pos];
            RouteLeg {
                from_port: network.codes[from_idx].clone(),
                to_port: network.codes[edge.target].clone(),
                name: edge.name.clone(),
                distance: edge.distance,
                weather_score: edge.weather_score,
                rating: edge.rating,
            }
        })
        .collect();

    RouteResult {
        hops: legs.len(),
        total_distance: legs.iter().map(|l| l.distance).sum(),
        total_weather_score: legs.iter().map(|l| l.weather_score).sum(),
        total_rating: legs.iter().map(|l| l.rating).sum(),
        legs,
    }
}

/// Keep the better of two candidates: highest total rating, then fewer
/// hops, then lower total weather exposure.
fn pick_better(best: RouteResult, candidate: RouteResult) -> RouteResult {
    let better = match candidate
        .total_rating
        .partial_cmp(&best.total_rating)
        .unwrap_or(std::cmp::Ordering::Equal)
    {
        std::cmp::Ordering::Greater => true,
        std::cmp::Ordering::Less => false,
        std::cmp::Ordering::Equal => {
            candidate.hops < best.hops
                || (candidate.hops == best.hops
                    && candidate.total_weather_score < best.total_weather_score)
        }
    };
    if better {
        candidate
    } else {
        best
    }
}
