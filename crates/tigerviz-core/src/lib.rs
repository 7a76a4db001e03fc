//! tigerviz-core: shared types and configuration for the tigerviz connector.
//!
//! This crate provides the foundational types used across tigerviz:
//! - Raw record shapes (`VertexRecord`, `EdgeRecord`) as returned by TigerGraph
//! - The normalized output contract (`Node`, `Link`, `GraphData`) consumed
//!   by force-directed graph renderers
//! - Structural record classification (`RecordClass`)
//! - Connection configuration

pub mod config;
pub mod types;

pub use config::ConnectionConfig;
pub use types::{EdgeRecord, GraphData, Link, Node, RecordClass, VertexRecord};
