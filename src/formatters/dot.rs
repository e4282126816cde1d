//! DOT graph-description output.
//!
//! Renders the dependency graph as a `strict digraph` document. The
//! convention is fixed across everything this formatter emits: an edge is
//! written `"needy" -> "provider"`, tail at the dependent object, head at
//! the object
//! that satisfies one of its symbols. With `rankdir=LR` dependencies
//! therefore sit to the right of their dependents.

use anyhow::Result;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::core::{Analysis, Vertex};

/// How vertices are grouped into visual clusters.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ClusterMode {
    /// No clustering directives.
    None,
    /// One cluster per multi-member SCC; singleton components stay ungrouped.
    Component,
    /// One cluster per source archive; external pseudo-vertices stay
    /// ungrouped.
    Archive,
}

pub struct DotFormatter {
    cluster: ClusterMode,
}

impl DotFormatter {
    pub fn new() -> Self {
        Self {
            cluster: ClusterMode::None,
        }
    }

    pub fn with_cluster(mut self, cluster: ClusterMode) -> Self {
        self.cluster = cluster;
        self
    }

    pub fn format_to_file(&self, analysis: &Analysis, output_path: &Path) -> Result<()> {
        fs::write(output_path, self.format(analysis))?;
        Ok(())
    }

    /// Renders the whole document. Vertices and edge statements are sorted
    /// by label so identical input yields byte-identical output.
    pub fn format(&self, analysis: &Analysis) -> String {
        let graph = &analysis.graph;
        let mut out = String::new();

        out.push_str(&format!(
            "strict digraph \"{}\" {{\n",
            escape(&analysis.table.archives.join(","))
        ));
        out.push_str("\trankdir=LR;\n");
        out.push_str("\tnode [shape=box];\n");

        match self.cluster {
            ClusterMode::None => {
                for label in sorted_labels(graph.node_weights()) {
                    out.push_str(&format!("\t\"{}\";\n", escape(&label)));
                }
            }
            ClusterMode::Component => self.write_component_clusters(analysis, &mut out),
            ClusterMode::Archive => self.write_archive_clusters(analysis, &mut out),
        }

        // One statement per source vertex, all its providers grouped.
        let mut by_source: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for edge in graph.edge_references() {
            let source = graph[edge.source()].label();
            let target = graph[edge.target()].label();
            by_source.entry(source).or_default().push(target);
        }
        for (source, mut targets) in by_source {
            targets.sort();
            let list = targets
                .iter()
                .map(|t| format!("\"{}\"", escape(t)))
                .collect::<Vec<_>>()
                .join(" ");
            out.push_str(&format!("\t\"{}\" -> {{ {} }};\n", escape(&source), list));
        }

        out.push_str("}\n");
        out
    }

    fn write_component_clusters(&self, analysis: &Analysis, out: &mut String) {
        let graph = &analysis.graph;
        let mut cluster_id = 0usize;
        let mut singletons: Vec<String> = Vec::new();

        for component in &analysis.components {
            if component.len() > 1 {
                out.push_str(&format!("\tsubgraph cluster_{} {{\n", cluster_id));
                out.push_str("\t\tlabel=\"circular dependency\";\n");
                for label in sorted_member_labels(graph, component) {
                    out.push_str(&format!("\t\t\"{}\";\n", escape(&label)));
                }
                out.push_str("\t}\n");
                cluster_id += 1;
            } else {
                singletons.extend(sorted_member_labels(graph, component));
            }
        }

        singletons.sort();
        for label in singletons {
            out.push_str(&format!("\t\"{}\";\n", escape(&label)));
        }
    }

    fn write_archive_clusters(&self, analysis: &Analysis, out: &mut String) {
        let graph = &analysis.graph;

        for (cluster_id, archive) in analysis.table.archives.iter().enumerate() {
            out.push_str(&format!("\tsubgraph cluster_{} {{\n", cluster_id));
            out.push_str(&format!("\t\tlabel=\"{}\";\n", escape(archive)));
            let members = graph
                .node_weights()
                .filter(|vertex| vertex.archive() == Some(archive.as_str()));
            for label in sorted_labels(members) {
                out.push_str(&format!("\t\t\"{}\";\n", escape(&label)));
            }
            out.push_str("\t}\n");
        }

        let externals = graph
            .node_weights()
            .filter(|vertex| vertex.archive().is_none());
        for label in sorted_labels(externals) {
            out.push_str(&format!("\t\"{}\";\n", escape(&label)));
        }
    }
}

impl Default for DotFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn sorted_labels<'a>(vertices: impl Iterator<Item = &'a Vertex>) -> Vec<String> {
    let mut labels: Vec<String> = vertices.map(Vertex::label).collect();
    labels.sort();
    labels
}

fn sorted_member_labels(graph: &crate::core::DependencyGraph, members: &[NodeIndex]) -> Vec<String> {
    let mut labels: Vec<String> = members.iter().map(|&index| graph[index].label()).collect();
    labels.sort();
    labels
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
