//! mariner-core: Shared types and domain logic for the Mariner shipping graph.
//!
//! This crate provides the foundational pieces used across all Mariner
//! components:
//! - Canonical node records (Company, Ship, Port, Cargo) keyed by natural
//!   identifiers
//! - Relationship specs (ROUTE, CAN_DOCK, VISITED)
//! - The composite route rating engine
//! - Dataset-level schema error type

pub mod error;
pub mod rating;
pub mod types;

pub use error::SchemaError;
pub use rating::{rating, RatingMethod};
pub use types::{Cargo, Company, DockingSpec, Port, RouteSpec, Ship, VisitSpec};
