//! Query-result normalization: TigerGraph result sets to `{nodes, links}`.
//!
//! Two entry points mirror the two response shapes the server produces.
//! [`normalize_typed`] handles the fixed shape of the whole-graph fetch
//! query (one vertex set, one accumulated edge list). [`normalize_generic`]
//! handles arbitrary query output: any number of result sets with
//! caller-chosen field names, scanned with per-array structural
//! classification. Both are pure functions over `serde_json` values.

use serde_json::Value;

use tigerviz_core::types::text;
use tigerviz_core::{EdgeRecord, GraphData, Link, Node, RecordClass, VertexRecord};

use crate::error::{ClientError, Result};

/// Which side wins when an attribute key collides with a reserved output
/// field (`id`/`v_id`/`v_type` on nodes, `source`/`target` on links).
///
/// The typed fetch path lets attributes win; the generic path lets the
/// reserved fields win. This asymmetry is inherited behavior, kept as is;
/// callers should not rely on attribute keys with reserved names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    ReservedWins,
    AttributesWin,
}

/// Normalize the whole-graph fetch response: one vertex array and one
/// edge array, pre-classified by the query's own output shape.
///
/// No empty-result check: an empty typed fetch legitimately yields an
/// empty graph.
pub fn normalize_typed(vertices: &[Value], edges: &[Value]) -> Result<GraphData> {
    let mut nodes = Vec::with_capacity(vertices.len());
    for record in vertices {
        let vertex = record
            .as_object()
            .and_then(VertexRecord::from_record)
            .ok_or_else(|| {
                ClientError::UnexpectedShape("vertex record missing v_type/v_id".to_string())
            })?;
        nodes.push(vertex_to_node(vertex, MergePolicy::AttributesWin));
    }

    let mut links = Vec::with_capacity(edges.len());
    for record in edges {
        let edge = record
            .as_object()
            .and_then(EdgeRecord::from_record)
            .ok_or_else(|| {
                ClientError::UnexpectedShape("edge record missing from_type/to_type".to_string())
            })?;
        links.push(edge_to_link(edge, MergePolicy::AttributesWin));
    }

    Ok(GraphData { nodes, links })
}

/// Normalize a generic `results` array: every result set and every field
/// array is scanned, with no assumption about result-set or field names.
///
/// Fails with [`ClientError::EmptyResult`] when the scan finds zero
/// vertex-shaped records, or zero edge-shaped records. An empty graph is
/// visually indistinguishable from a broken query, so the caller gets an
/// explicit signal instead.
pub fn normalize_generic(results: &Value) -> Result<GraphData> {
    let result_sets = results
        .as_array()
        .ok_or_else(|| ClientError::UnexpectedShape("results is not an array".to_string()))?;

    let mut graph = GraphData::default();
    for result_set in result_sets {
        let Some(fields) = result_set.as_object() else {
            continue;
        };
        for records in fields.values() {
            if let Some(records) = records.as_array() {
                scan_array(records, &mut graph);
            }
        }
    }

    if graph.nodes.is_empty() {
        return Err(ClientError::EmptyResult {
            missing: "vertices",
        });
    }
    if graph.links.is_empty() {
        return Err(ClientError::EmptyResult { missing: "edges" });
    }
    Ok(graph)
}

/// Scan one record array into the output graph.
///
/// The first record fixes the array's expected class; the scan stops at
/// the first record that classifies differently. Truncation is silent:
/// arrays are assumed homogeneous, and a heterogeneous one loses its
/// remainder. Arrays whose first record is unrecognized are skipped
/// entirely (scalar print output, accumulator dumps, etc.).
fn scan_array(records: &[Value], graph: &mut GraphData) {
    let Some(first) = records.first() else {
        return;
    };

    match RecordClass::classify(first) {
        RecordClass::Vertex(_) => {
            for record in records {
                match RecordClass::classify(record) {
                    RecordClass::Vertex(vertex) => graph
                        .nodes
                        .push(vertex_to_node(vertex, MergePolicy::ReservedWins)),
                    _ => break,
                }
            }
        }
        RecordClass::Edge(_) => {
            for record in records {
                match RecordClass::classify(record) {
                    RecordClass::Edge(edge) => graph
                        .links
                        .push(edge_to_link(edge, MergePolicy::ReservedWins)),
                    _ => break,
                }
            }
        }
        RecordClass::Unrecognized => {}
    }
}

/// Convert an accepted vertex record into an output node, merging its
/// attribute bag under the given collision policy.
pub fn vertex_to_node(vertex: VertexRecord, policy: MergePolicy) -> Node {
    let mut attributes = vertex.attributes;
    let mut id = format!("{}_{}", vertex.v_type, vertex.v_id);
    let mut v_id = vertex.v_id;
    let mut v_type = vertex.v_type;

    match policy {
        MergePolicy::ReservedWins => {
            attributes.remove("id");
            attributes.remove("v_id");
            attributes.remove("v_type");
        }
        MergePolicy::AttributesWin => {
            if let Some(v) = attributes.remove("id") {
                id = text(&v);
            }
            if let Some(v) = attributes.remove("v_id") {
                v_id = text(&v);
            }
            if let Some(v) = attributes.remove("v_type") {
                v_type = text(&v);
            }
        }
    }

    Node {
        id,
        v_id,
        v_type,
        attributes,
    }
}

/// Convert an accepted edge record into an output link.
pub fn edge_to_link(edge: EdgeRecord, policy: MergePolicy) -> Link {
    let mut attributes = edge.attributes;
    let mut source = format!("{}_{}", edge.from_type, edge.from_id);
    let mut target = format!("{}_{}", edge.to_type, edge.to_id);

    match policy {
        MergePolicy::ReservedWins => {
            attributes.remove("source");
            attributes.remove("target");
        }
        MergePolicy::AttributesWin => {
            if let Some(v) = attributes.remove("source") {
                source = text(&v);
            }
            if let Some(v) = attributes.remove("target") {
                target = text(&v);
            }
        }
    }

    Link {
        source,
        target,
        attributes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn person(id: &str, name: &str) -> Value {
        json!({
            "v_type": "Person",
            "v_id": id,
            "attributes": {"name": name}
        })
    }

    fn friendship(from: &str, to: &str) -> Value {
        json!({
            "from_type": "Person",
            "from_id": from,
            "to_type": "Person",
            "to_id": to,
            "attributes": {"weight": 3}
        })
    }

    #[test]
    fn typed_vertex_becomes_node() {
        let graph = normalize_typed(&[person("42", "Ann")], &[friendship("42", "7")]).unwrap();
        assert_eq!(
            serde_json::to_value(&graph.nodes[0]).unwrap(),
            json!({"id": "Person_42", "v_id": "42", "v_type": "Person", "name": "Ann"})
        );
    }

    #[test]
    fn typed_edge_becomes_link() {
        let graph = normalize_typed(&[], &[friendship("42", "7")]).unwrap();
        assert_eq!(
            serde_json::to_value(&graph.links[0]).unwrap(),
            json!({"source": "Person_42", "target": "Person_7", "weight": 3})
        );
    }

    #[test]
    fn typed_empty_input_is_an_empty_graph() {
        // Only the generic path enforces the empty-result post-condition.
        let graph = normalize_typed(&[], &[]).unwrap();
        assert!(graph.nodes.is_empty());
        assert!(graph.links.is_empty());
    }

    #[test]
    fn typed_malformed_vertex_is_rejected() {
        let err = normalize_typed(&[json!({"v_id": "42"})], &[]).unwrap_err();
        assert!(matches!(err, ClientError::UnexpectedShape(_)));
    }

    #[test]
    fn generic_scans_all_result_sets_and_fields() {
        let results = json!([
            {"Seed": [person("42", "Ann"), person("7", "Bob")]},
            {"@@edges": [friendship("42", "7")], "extra": [person("9", "Cyd")]}
        ]);
        let graph = normalize_generic(&results).unwrap();
        assert_eq!(graph.nodes.len(), 3);
        assert_eq!(graph.links.len(), 1);
        assert_eq!(graph.links[0].source, "Person_42");
    }

    #[test]
    fn generic_truncates_at_first_mismatched_record() {
        let results = json!([{
            "Seed": [
                person("1", "a"),
                person("2", "b"),
                {"count": 10},
                person("3", "c")
            ],
            "edges": [friendship("1", "2")]
        }]);
        let graph = normalize_generic(&results).unwrap();
        // Third element lacks v_type/v_id: the remainder of the array is
        // dropped without error.
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.nodes[1].id, "Person_2");
    }

    #[test]
    fn generic_skips_unrecognized_arrays() {
        let results = json!([{
            "stats": [{"count": 10}, {"count": 20}],
            "Seed": [person("1", "a")],
            "edges": [friendship("1", "1")]
        }]);
        let graph = normalize_generic(&results).unwrap();
        assert_eq!(graph.nodes.len(), 1);
        assert_eq!(graph.links.len(), 1);
    }

    #[test]
    fn generic_fails_without_vertices() {
        let results = json!([{"edges": [friendship("1", "2")]}]);
        let err = normalize_generic(&results).unwrap_err();
        assert!(matches!(
            err,
            ClientError::EmptyResult {
                missing: "vertices"
            }
        ));
    }

    #[test]
    fn generic_fails_without_edges() {
        let results = json!([{"Seed": [person("1", "a")]}]);
        let err = normalize_generic(&results).unwrap_err();
        assert!(matches!(err, ClientError::EmptyResult { missing: "edges" }));
    }

    #[test]
    fn generic_rejects_non_array_results() {
        let err = normalize_generic(&json!({"Seed": []})).unwrap_err();
        assert!(matches!(err, ClientError::UnexpectedShape(_)));
    }

    // ── Merge-policy asymmetry (kept deliberately) ──────────────

    #[test]
    fn generic_path_reserved_fields_win_over_attributes() {
        let results = json!([{
            "Seed": [{
                "v_type": "Person",
                "v_id": "42",
                "attributes": {"id": "shadow", "v_type": "Imposter", "name": "Ann"}
            }],
            "edges": [{
                "from_type": "Person", "from_id": "42",
                "to_type": "Person", "to_id": "7",
                "attributes": {"source": "shadow"}
            }]
        }]);
        let graph = normalize_generic(&results).unwrap();
        assert_eq!(graph.nodes[0].id, "Person_42");
        assert_eq!(graph.nodes[0].v_type, "Person");
        assert_eq!(graph.nodes[0].attributes["name"], json!("Ann"));
        assert!(!graph.nodes[0].attributes.contains_key("id"));
        assert_eq!(graph.links[0].source, "Person_42");
    }

    #[test]
    fn typed_path_attributes_win_over_reserved_fields() {
        let vertices = [json!({
            "v_type": "Person",
            "v_id": "42",
            "attributes": {"id": "shadow", "name": "Ann"}
        })];
        let edges = [json!({
            "from_type": "Person", "from_id": "42",
            "to_type": "Person", "to_id": "7",
            "attributes": {"target": "elsewhere"}
        })];
        let graph = normalize_typed(&vertices, &edges).unwrap();
        assert_eq!(graph.nodes[0].id, "shadow");
        assert_eq!(graph.nodes[0].v_id, "42");
        assert_eq!(graph.links[0].source, "Person_42");
        assert_eq!(graph.links[0].target, "elsewhere");
    }

    #[test]
    fn attribute_override_coerces_non_string_values() {
        let vertices = [json!({
            "v_type": "Person",
            "v_id": "42",
            "attributes": {"id": 99}
        })];
        let graph = normalize_typed(&vertices, &[]).unwrap();
        assert_eq!(graph.nodes[0].id, "99");
    }

    #[test]
    fn duplicate_vertices_are_not_deduplicated() {
        let results = json!([{
            "Seed": [person("1", "a"), person("1", "a")],
            "edges": [friendship("1", "1")]
        }]);
        let graph = normalize_generic(&results).unwrap();
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.nodes[0].id, graph.nodes[1].id);
    }
}
