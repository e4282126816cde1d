use ardeps::core::{
    build_graph, strongly_connected_components, Analysis, SymbolRecord, SymbolTableBuilder,
};
use ardeps::formatters::ComponentsFormatter;

fn analyze(records: &[(&str, &str, char, &str)]) -> Analysis {
    let mut builder = SymbolTableBuilder::new();
    for &(archive, object, code, name) in records {
        builder
            .add_record(&SymbolRecord::new(archive, object, code, name))
            .unwrap();
    }
    let table = builder.build();
    let graph = build_graph(&table, false);
    let components = strongly_connected_components(&graph);
    Analysis {
        table,
        graph,
        components,
    }
}

#[test]
fn one_line_per_component_in_emission_order() {
    let analysis = analyze(&[
        ("lib.a", "a.o", 'T', "foo"),
        ("lib.a", "b.o", 'U', "foo"),
    ]);
    let out = ComponentsFormatter::new().format(&analysis);
    assert_eq!(out, "lib.a(a.o)\nlib.a(b.o)\n");
}

#[test]
fn cyclic_members_share_a_line_sorted() {
    let analysis = analyze(&[
        ("lib.a", "b.o", 'T', "from_b"),
        ("lib.a", "b.o", 'U', "from_a"),
        ("lib.a", "a.o", 'T', "from_a"),
        ("lib.a", "a.o", 'U', "from_b"),
    ]);
    let out = ComponentsFormatter::new().format(&analysis);
    assert_eq!(out, "lib.a(a.o) lib.a(b.o)\n");
}

#[test]
fn format_to_file_round_trips() {
    let analysis = analyze(&[("lib.a", "a.o", 'T', "foo")]);
    let tmp = tempfile::NamedTempFile::new().unwrap();
    ComponentsFormatter::new()
        .format_to_file(&analysis, tmp.path())
        .unwrap();
    let written = std::fs::read_to_string(tmp.path()).unwrap();
    assert_eq!(written, "lib.a(a.o)\n");
}

#[test]
fn output_is_byte_identical_across_runs() {
    let records = [
        ("libz.a", "z.o", 'T', "zeta"),
        ("liba.a", "a.o", 'U', "zeta"),
        ("liba.a", "a.o", 'T', "alpha"),
        ("libz.a", "z.o", 'U', "alpha"),
    ];
    let first = ComponentsFormatter::new().format(&analyze(&records));
    let second = ComponentsFormatter::new().format(&analyze(&records));
    assert_eq!(first, second);
}
