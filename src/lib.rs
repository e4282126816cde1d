//! # ARDEPS
//!
//! Link-dependency analysis for static library archives.
//!
//! ardeps inspects the symbol tables of one or more static archives, resolves
//! every undefined reference against the symbols defined elsewhere in the
//! same archive set, and builds a directed dependency graph over object
//! files. Strongly connected components of that graph expose circular
//! dependency clusters and a valid link order.
//!
//! ## Output Formats
//!
//! - **DOT**: directed-graph description with optional clustering by SCC or
//!   by source archive
//! - **Component listing**: one strongly connected component per line, in
//!   reverse topological order
//! - **JSON-Compact**: minimal index-based format for programmatic consumption
//!
//! Symbol listing and name demangling are delegated to external tools
//! (`nm` and `c++filt` by default) behind swappable traits in [`tools`].

pub mod core;
pub mod formatters;
pub mod tools;
