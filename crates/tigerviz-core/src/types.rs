//! Graph record types shared across the tigerviz connector.
//!
//! TigerGraph returns vertices and edges as weakly-typed JSON records with
//! a free-form `attributes` bag. These types give those records an explicit
//! shape, and define the normalized `{nodes, links}` output consumed by
//! graph renderers expecting `id`-keyed nodes and `source`/`target` links.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ── Raw Records ───────────────────────────────────────────────────

/// A vertex as returned by a TigerGraph query.
///
/// Identity is the pair `(v_type, v_id)`; `v_id` is only unique within
/// its type.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexRecord {
    pub v_type: String,
    pub v_id: String,
    pub attributes: Map<String, Value>,
}

impl VertexRecord {
    /// Extract a vertex from a raw record.
    ///
    /// Returns `None` unless both `v_type` and `v_id` keys are present.
    /// Presence is what matters: a `null` value still counts, matching the
    /// service's own output for untyped accumulators.
    pub fn from_record(record: &Map<String, Value>) -> Option<Self> {
        let v_type = record.get("v_type")?;
        let v_id = record.get("v_id")?;
        Some(Self {
            v_type: text(v_type),
            v_id: text(v_id),
            attributes: attribute_bag(record),
        })
    }
}

/// A directed edge as returned by a TigerGraph query.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeRecord {
    pub from_type: String,
    pub from_id: String,
    pub to_type: String,
    pub to_id: String,
    pub attributes: Map<String, Value>,
}

impl EdgeRecord {
    /// Extract an edge from a raw record.
    ///
    /// Returns `None` unless both `from_type` and `to_type` keys are
    /// present. The endpoint ids default to empty strings when absent.
    pub fn from_record(record: &Map<String, Value>) -> Option<Self> {
        let from_type = record.get("from_type")?;
        let to_type = record.get("to_type")?;
        Some(Self {
            from_type: text(from_type),
            from_id: record.get("from_id").map(text).unwrap_or_default(),
            to_type: text(to_type),
            to_id: record.get("to_id").map(text).unwrap_or_default(),
            attributes: attribute_bag(record),
        })
    }
}

/// Structural classification of a raw query-result record.
///
/// Evaluated once per record; vertex shape takes precedence when a record
/// carries both field sets.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordClass {
    Vertex(VertexRecord),
    Edge(EdgeRecord),
    Unrecognized,
}

impl RecordClass {
    pub fn classify(record: &Value) -> RecordClass {
        let Some(map) = record.as_object() else {
            return RecordClass::Unrecognized;
        };
        if let Some(vertex) = VertexRecord::from_record(map) {
            return RecordClass::Vertex(vertex);
        }
        if let Some(edge) = EdgeRecord::from_record(map) {
            return RecordClass::Edge(edge);
        }
        RecordClass::Unrecognized
    }
}

// ── Normalized Output ─────────────────────────────────────────────

/// A node in the normalized output graph.
///
/// `id` is the synthetic `{v_type}_{v_id}` identifier. Repeated input
/// records are not deduplicated here; a caller that re-queries overlapping
/// vertex sets must deduplicate downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub v_id: String,
    pub v_type: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// A link in the normalized output graph.
///
/// `source` and `target` reference node `id` values using the same
/// `{type}_{id}` convention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub source: String,
    pub target: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// The normalized graph handed to the visualization layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
}

/// Render a JSON value as the string the output contract expects:
/// strings pass through, anything else uses its JSON rendering.
pub fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// The `attributes` bag of a record, or an empty map when absent or
/// not an object.
fn attribute_bag(record: &Map<String, Value>) -> Map<String, Value> {
    match record.get("attributes") {
        Some(Value::Object(map)) => map.clone(),
        _ => Map::new(),
    }
}
