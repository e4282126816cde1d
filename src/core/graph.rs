use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::{Directed, Graph};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

use super::symbols::{ObjectId, SymbolTable};

/// A graph vertex: an object file, or (in external-dependency mode) a needed
/// symbol that nothing in the archive set provides.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Vertex {
    Object(ObjectId),
    External(String),
}

impl Vertex {
    /// The archive this vertex's object came from, if it is an object.
    pub fn archive(&self) -> Option<&str> {
        match self {
            Vertex::Object(id) => Some(&id.archive),
            Vertex::External(_) => None,
        }
    }

    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Vertex::Object(id) => id.fmt(f),
            Vertex::External(symbol) => f.write_str(symbol),
        }
    }
}

/// Edge direction reads "needy depends on provider": the source vertex
/// requires a symbol the target vertex defines.
pub type DependencyGraph = Graph<Vertex, (), Directed>;

/// Builds a [`DependencyGraph`] with vertex and edge deduplication.
pub struct GraphBuilder {
    graph: DependencyGraph,
    node_map: HashMap<Vertex, NodeIndex>,
    edge_set: HashSet<(NodeIndex, NodeIndex)>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            graph: Graph::new(),
            node_map: HashMap::new(),
            edge_set: HashSet::new(),
        }
    }

    /// Adds a vertex, returning the existing index if it is already present.
    pub fn add_vertex(&mut self, vertex: Vertex) -> NodeIndex {
        if let Some(&index) = self.node_map.get(&vertex) {
            return index;
        }
        let index = self.graph.add_node(vertex.clone());
        self.node_map.insert(vertex, index);
        index
    }

    /// Adds a directed edge between two known vertices. Returns `None` when
    /// either endpoint is missing or the edge already exists. Self-loops are
    /// allowed; parallel edges are not.
    pub fn add_edge(&mut self, from: &Vertex, to: &Vertex) -> Option<EdgeIndex> {
        let source = *self.node_map.get(from)?;
        let target = *self.node_map.get(to)?;
        if !self.edge_set.insert((source, target)) {
            return None;
        }
        Some(self.graph.add_edge(source, target, ()))
    }

    #[allow(dead_code)]
    pub fn get_vertex_index(&self, vertex: &Vertex) -> Option<NodeIndex> {
        self.node_map.get(vertex).copied()
    }

    pub fn build(self) -> DependencyGraph {
        self.graph
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Constructs the dependency graph from a merged symbol table.
///
/// Every known object becomes a vertex. For each needed symbol with a
/// provider, one edge needy -> provider is added; multiple symbols resolving
/// to the same provider collapse into a single edge. Needs without a
/// provider add no edge. With `externals` enabled, each unresolved symbol
/// name also appears as an isolated pseudo-vertex.
///
/// Iteration runs over sorted collections, so vertex and edge insertion
/// order is reproducible run to run.
pub fn build_graph(table: &SymbolTable, externals: bool) -> DependencyGraph {
    let mut builder = GraphBuilder::new();

    for id in table.objects.keys() {
        builder.add_vertex(Vertex::Object(id.clone()));
    }

    if externals {
        let unresolved: BTreeSet<&String> = table
            .objects
            .values()
            .flat_map(|record| record.needs.iter())
            .filter(|symbol| table.provider(symbol).is_none())
            .collect();
        for symbol in unresolved {
            builder.add_vertex(Vertex::External(symbol.clone()));
        }
    }

    for (id, record) in &table.objects {
        let needy = Vertex::Object(id.clone());
        for symbol in &record.needs {
            if let Some(provider) = table.provider(symbol) {
                builder.add_edge(&needy, &Vertex::Object(provider.clone()));
            }
        }
    }

    builder.build()
}
