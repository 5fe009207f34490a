//! Mariner Graph — Neo4j client for the shipping knowledge graph.
//!
//! This crate is the single mutation point for the Neo4j graph. All reads
//! and writes flow through this crate so that node identity (natural keys),
//! relationship idempotence, and the label/relationship-type vocabulary stay
//! consistent across the importer and the route engine.

pub mod client;
pub mod mutations;
pub mod queries;

pub use client::{GraphClient, GraphConfig, GraphError};
