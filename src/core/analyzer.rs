use anyhow::Result;
use petgraph::graph::NodeIndex;
use std::path::Path;

use super::graph::{build_graph, DependencyGraph};
use super::scc::strongly_connected_components;
use super::symbols::{SymbolTable, SymbolTableBuilder};
use crate::tools::SymbolLister;

/// Immutable result of one analysis run. Each stage produced a snapshot the
/// next one only reads; formatters never mutate any of it.
#[derive(Debug)]
pub struct Analysis {
    pub table: SymbolTable,
    pub graph: DependencyGraph,
    /// Strongly connected components in reverse topological order.
    pub components: Vec<Vec<NodeIndex>>,
}

/// Drives the full pipeline: symbol listing, table construction, graph
/// construction, SCC computation. Stages run sequentially on one thread.
pub struct ArchiveAnalyzer {
    lister: Box<dyn SymbolLister>,
    externals: bool,
}

impl ArchiveAnalyzer {
    pub fn new(lister: Box<dyn SymbolLister>) -> Self {
        Self {
            lister,
            externals: false,
        }
    }

    /// Show unresolved external symbols as isolated pseudo-vertices.
    pub fn with_externals(mut self, externals: bool) -> Self {
        self.externals = externals;
        self
    }

    pub fn analyze<P: AsRef<Path>>(&self, archives: &[P]) -> Result<Analysis> {
        let mut tables = Vec::with_capacity(archives.len());
        for archive in archives {
            let archive = archive.as_ref();
            eprintln!("Listing symbols in {}...", archive.display());
            let records = self.lister.list(archive)?;

            let mut builder = SymbolTableBuilder::new();
            builder.add_records(&records)?;
            tables.push(builder.build());
        }

        let table = SymbolTable::merge(tables)?;
        eprintln!(
            "Found {} object files, {} defined symbols",
            table.objects.len(),
            table.index.len()
        );

        eprintln!("Building dependency graph...");
        let graph = build_graph(&table, self.externals);
        eprintln!(
            "Graph has {} vertices, {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        eprintln!("Computing strongly connected components...");
        let components = strongly_connected_components(&graph);
        let cycles = components.iter().filter(|c| c.len() > 1).count();
        eprintln!(
            "Found {} components ({} circular)",
            components.len(),
            cycles
        );

        Ok(Analysis {
            table,
            graph,
            components,
        })
    }
}
