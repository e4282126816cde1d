use anyhow::Result;
use petgraph::visit::EdgeRef;
use serde_json::json;
use std::fs;
use std::path::Path;

use crate::core::{Analysis, Vertex};

/// JSON formatter with minimal tokens: vertices once, everything else as
/// indices into the vertex array. Vertex order is graph insertion order,
/// which construction keeps deterministic.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn format_to_file(&self, analysis: &Analysis, output_path: &Path) -> Result<()> {
        fs::write(output_path, self.format(analysis)?)?;
        Ok(())
    }

    pub fn format(&self, analysis: &Analysis) -> Result<String> {
        let graph = &analysis.graph;

        let vertices: Vec<serde_json::Value> = graph
            .node_weights()
            .map(|vertex| match vertex {
                Vertex::Object(id) => json!({
                    "l": vertex.label(),
                    "k": "object",
                    "a": id.archive,
                }),
                Vertex::External(symbol) => json!({
                    "l": symbol,
                    "k": "external",
                }),
            })
            .collect();

        let edges: Vec<serde_json::Value> = graph
            .edge_references()
            .map(|edge| json!([edge.source().index(), edge.target().index()]))
            .collect();

        let components: Vec<serde_json::Value> = analysis
            .components
            .iter()
            .map(|component| {
                let mut members: Vec<usize> =
                    component.iter().map(|index| index.index()).collect();
                members.sort_unstable();
                json!(members)
            })
            .collect();

        let output = json!({
            "meta": {
                "archives": analysis.table.archives,
                "vertices": graph.node_count(),
                "edges": graph.edge_count(),
                "components": analysis.components.len(),
            },
            "vertices": vertices,
            "edges": edges,
            "components": components,
        });

        Ok(serde_json::to_string(&output)?)
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}
