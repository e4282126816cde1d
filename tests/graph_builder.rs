use ardeps::core::{
    build_graph, GraphBuilder, ObjectId, SymbolRecord, SymbolTableBuilder, Vertex,
};
use std::collections::BTreeSet;

fn obj(archive: &str, object: &str) -> Vertex {
    Vertex::Object(ObjectId::new(archive, object))
}

fn table_from(records: &[(&str, &str, char, &str)]) -> ardeps::core::SymbolTable {
    let mut builder = SymbolTableBuilder::new();
    for &(archive, object, code, name) in records {
        builder
            .add_record(&SymbolRecord::new(archive, object, code, name))
            .unwrap();
    }
    builder.build()
}

#[test]
fn builder_deduplicates_vertices_and_edges() {
    let mut gb = GraphBuilder::new();
    let a = obj("lib.a", "a.o");
    let b = obj("lib.a", "b.o");

    let first = gb.add_vertex(a.clone());
    let again = gb.add_vertex(a.clone());
    assert_eq!(first, again);
    gb.add_vertex(b.clone());

    assert!(gb.add_edge(&a, &b).is_some());
    assert!(gb.add_edge(&a, &b).is_none());

    let graph = gb.build();
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn builder_rejects_edges_with_missing_endpoints() {
    let mut gb = GraphBuilder::new();
    let a = obj("lib.a", "a.o");
    gb.add_vertex(a.clone());
    assert!(gb.add_edge(&a, &obj("lib.a", "missing.o")).is_none());
}

#[test]
fn builder_keeps_self_loops() {
    let mut gb = GraphBuilder::new();
    let a = obj("lib.a", "a.o");
    gb.add_vertex(a.clone());
    assert!(gb.add_edge(&a, &a).is_some());
    assert_eq!(gb.build().edge_count(), 1);
}

#[test]
fn needed_symbol_resolves_to_one_edge() {
    let table = table_from(&[
        ("lib.a", "a.o", 'T', "foo"),
        ("lib.a", "b.o", 'U', "foo"),
    ]);
    let graph = build_graph(&table, false);

    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 1);
    let edge = graph.edge_indices().next().unwrap();
    let (source, target) = graph.edge_endpoints(edge).unwrap();
    assert_eq!(graph[source], obj("lib.a", "b.o"));
    assert_eq!(graph[target], obj("lib.a", "a.o"));
}

#[test]
fn multiple_symbols_to_same_provider_collapse() {
    let table = table_from(&[
        ("lib.a", "a.o", 'T', "foo"),
        ("lib.a", "a.o", 'T', "bar"),
        ("lib.a", "b.o", 'U', "foo"),
        ("lib.a", "b.o", 'U', "bar"),
    ]);
    let graph = build_graph(&table, false);
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn unresolved_need_adds_no_edge_by_default() {
    let table = table_from(&[("lib.a", "c.o", 'U', "bar")]);
    let graph = build_graph(&table, false);

    assert_eq!(graph.node_count(), 1);
    assert_eq!(graph.edge_count(), 0);
    assert_eq!(graph.node_weights().next().unwrap(), &obj("lib.a", "c.o"));
}

#[test]
fn externals_mode_shows_unresolved_symbol_as_isolated_vertex() {
    let table = table_from(&[("lib.a", "c.o", 'U', "bar")]);
    let graph = build_graph(&table, true);

    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 0);
    let vertices: BTreeSet<&Vertex> = graph.node_weights().collect();
    assert!(vertices.contains(&obj("lib.a", "c.o")));
    assert!(vertices.contains(&Vertex::External("bar".to_string())));
}

#[test]
fn externals_mode_excludes_resolved_symbols() {
    let table = table_from(&[
        ("lib.a", "a.o", 'T', "foo"),
        ("lib.a", "b.o", 'U', "foo"),
        ("lib.a", "b.o", 'U', "puts"),
    ]);
    let graph = build_graph(&table, true);

    // Only the unresolved "puts" becomes a pseudo-vertex.
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn self_reference_is_preserved() {
    let table = table_from(&[
        ("lib.a", "a.o", 'T', "foo"),
        ("lib.a", "a.o", 'U', "foo"),
    ]);
    let graph = build_graph(&table, false);

    assert_eq!(graph.node_count(), 1);
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn construction_is_deterministic() {
    let records = [
        ("libz.a", "z.o", 'T', "zeta"),
        ("liba.a", "a.o", 'T', "alpha"),
        ("liba.a", "b.o", 'U', "zeta"),
        ("libz.a", "z.o", 'U', "alpha"),
        ("liba.a", "b.o", 'U', "nowhere"),
    ];
    let first = build_graph(&table_from(&records), true);
    let second = build_graph(&table_from(&records), true);

    let nodes_of = |g: &ardeps::core::DependencyGraph| -> Vec<Vertex> {
        g.node_weights().cloned().collect()
    };
    assert_eq!(nodes_of(&first), nodes_of(&second));

    let edges_of = |g: &ardeps::core::DependencyGraph| -> Vec<(Vertex, Vertex)> {
        g.edge_indices()
            .map(|e| {
                let (s, t) = g.edge_endpoints(e).unwrap();
                (g[s].clone(), g[t].clone())
            })
            .collect()
    };
    assert_eq!(edges_of(&first), edges_of(&second));
}
