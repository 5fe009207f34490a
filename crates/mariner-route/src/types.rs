//! Result types for route queries.

use serde::{Deserialize, Serialize};

/// One ROUTE edge along a selected path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteLeg {
    pub from_port: String,
    pub to_port: String,
    pub name: String,
    pub distance: f64,
    pub weather_score: f64,
    pub rating: f64,
}

/// A candidate (or selected) route with its aggregate scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteResult {
    pub legs: Vec<RouteLeg>,
    pub hops: usize,
    pub total_distance: f64,
    pub total_weather_score: f64,
    pub total_rating: f64,
}
