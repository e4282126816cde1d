//! Strongly connected components via Tarjan's algorithm.
//!
//! The traversal is iterative with an explicit frame stack, so very deep
//! dependency chains cannot exhaust the call stack. Components come out in
//! the order their DFS root finishes, which for edges reading
//! "needy -> provider" is reverse topological order: a component that others
//! depend on is emitted before its dependents.

use petgraph::graph::NodeIndex;

use super::graph::DependencyGraph;

const UNVISITED: usize = usize::MAX;

/// All mutable traversal state, passed explicitly instead of being captured
/// by a recursive closure.
struct TarjanContext {
    next_index: usize,
    /// Discovery index per node; UNVISITED until first reached.
    index: Vec<usize>,
    /// Smallest discovery index reachable through the DFS subtree plus at
    /// most one edge to a node still on the stack.
    lowlink: Vec<usize>,
    on_stack: Vec<bool>,
    stack: Vec<NodeIndex>,
    components: Vec<Vec<NodeIndex>>,
}

impl TarjanContext {
    fn new(node_count: usize) -> Self {
        Self {
            next_index: 0,
            index: vec![UNVISITED; node_count],
            lowlink: vec![UNVISITED; node_count],
            on_stack: vec![false; node_count],
            stack: Vec::new(),
            components: Vec::new(),
        }
    }

    fn discover(&mut self, node: NodeIndex) {
        self.index[node.index()] = self.next_index;
        self.lowlink[node.index()] = self.next_index;
        self.next_index += 1;
        self.stack.push(node);
        self.on_stack[node.index()] = true;
    }

    fn pop_component(&mut self, root: NodeIndex) {
        let mut members = Vec::new();
        while let Some(node) = self.stack.pop() {
            self.on_stack[node.index()] = false;
            members.push(node);
            if node == root {
                break;
            }
        }
        self.components.push(members);
    }
}

/// Computes the strongly connected components of `graph`, returned in
/// reverse topological order. Every vertex lands in exactly one component;
/// isolated vertices and self-loops both yield singleton components.
pub fn strongly_connected_components(graph: &DependencyGraph) -> Vec<Vec<NodeIndex>> {
    let mut ctx = TarjanContext::new(graph.node_count());

    // petgraph yields neighbors newest-edge-first; reverse to walk edges in
    // insertion order so emission order is stable across runs.
    let successors: Vec<Vec<NodeIndex>> = graph
        .node_indices()
        .map(|node| {
            let mut targets: Vec<NodeIndex> = graph.neighbors(node).collect();
            targets.reverse();
            targets
        })
        .collect();

    for start in graph.node_indices() {
        if ctx.index[start.index()] != UNVISITED {
            continue;
        }
        ctx.discover(start);
        let mut frames: Vec<(NodeIndex, usize)> = vec![(start, 0)];

        while let Some(frame) = frames.last_mut() {
            let node = frame.0;
            let edges = &successors[node.index()];

            if frame.1 < edges.len() {
                let target = edges[frame.1];
                frame.1 += 1;
                if ctx.index[target.index()] == UNVISITED {
                    ctx.discover(target);
                    frames.push((target, 0));
                } else if ctx.on_stack[target.index()] {
                    let reach = ctx.index[target.index()];
                    if reach < ctx.lowlink[node.index()] {
                        ctx.lowlink[node.index()] = reach;
                    }
                }
                // A settled target belongs to an earlier component and
                // cannot lower this node's lowlink.
            } else {
                frames.pop();
                if ctx.lowlink[node.index()] == ctx.index[node.index()] {
                    ctx.pop_component(node);
                }
                if let Some(parent) = frames.last() {
                    let low = ctx.lowlink[node.index()];
                    if low < ctx.lowlink[parent.0.index()] {
                        ctx.lowlink[parent.0.index()] = low;
                    }
                }
            }
        }
    }

    ctx.components
}
