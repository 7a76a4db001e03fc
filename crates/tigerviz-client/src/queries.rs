//! GSQL query-text generation for whole-graph fetches.

/// Build the `INTERPRET QUERY` program that selects every vertex of the
/// given types and accumulates every edge of the given types between them.
///
/// The query prints two result sets: `Seed` (the vertices) and `edges`
/// (the accumulated edge list), which is exactly the shape
/// [`crate::normalize::normalize_typed`] expects.
pub fn interpret_fetch_query(graph: &str, vertex_types: &[&str], edge_types: &[&str]) -> String {
    let seed = vertex_types
        .iter()
        .map(|t| format!("{t}.*"))
        .collect::<Vec<_>>()
        .join(", ");
    let edges = edge_types.join(" | ");

    format!(
        "INTERPRET QUERY () FOR GRAPH {graph} {{
  ListAccum<EDGE> @@edges;
  Seed = {{{seed}}};
  Res = SELECT d FROM Seed:d - (({edges}):e) -> :t
          ACCUM @@edges += e;
  PRINT Seed;
  PRINT @@edges AS edges;
}}"
    )
}
