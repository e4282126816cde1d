pub mod analyzer;
pub mod graph;
pub mod scc;
pub mod symbols;

pub use analyzer::{Analysis, ArchiveAnalyzer};
pub use graph::{build_graph, DependencyGraph, GraphBuilder, Vertex};
pub use scc::strongly_connected_components;
pub use symbols::{
    Diagnostic, ObjectId, ObjectRecord, SymbolKind, SymbolRecord, SymbolTable, SymbolTableBuilder,
};
