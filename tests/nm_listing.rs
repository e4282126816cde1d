use ardeps::tools::nm::parse_listing;

#[test]
fn parses_defined_symbol_line() {
    let records = parse_listing("libfoo.a:bar.o:0000000000000040 T do_work\n").unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].archive, "libfoo.a");
    assert_eq!(records[0].object, "bar.o");
    assert_eq!(records[0].type_code, 'T');
    assert_eq!(records[0].name, "do_work");
}

#[test]
fn parses_undefined_symbol_line_with_blank_value() {
    let records =
        parse_listing("libfoo.a:bar.o:                 U printf\n").unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].type_code, 'U');
    assert_eq!(records[0].name, "printf");
}

#[test]
fn archive_path_is_reduced_to_basename() {
    let records = parse_listing("build/out/libfoo.a:bar.o:0000 T go\n").unwrap();
    assert_eq!(records[0].archive, "libfoo.a");
}

#[test]
fn blank_lines_are_skipped() {
    let listing = "libfoo.a:a.o:0000 T one\n\nlibfoo.a:b.o:0000 T two\n";
    let records = parse_listing(listing).unwrap();
    assert_eq!(records.len(), 2);
}

#[test]
fn malformed_line_reports_position() {
    let listing = "libfoo.a:a.o:0000 T fine\nthis is not a symbol line\n";
    let err = parse_listing(listing).unwrap_err();
    let text = err.to_string();
    assert!(text.contains("line 2"));
    assert!(text.contains("malformed symbol listing"));
}

#[test]
fn non_letter_type_code_is_fatal() {
    let err = parse_listing("libfoo.a:a.o:0000 ? mystery\n").unwrap_err();
    let text = err.to_string();
    assert!(text.contains("line 1"));
    assert!(text.contains("unrecognized symbol type code '?'"));
}

#[test]
fn weak_and_local_codes_pass_through() {
    let listing = "\
libfoo.a:a.o:0000000000000000 t local_fn
libfoo.a:a.o:0000000000000008 w weak_hook
libfoo.a:a.o:0000000000000010 V weak_obj
";
    let records = parse_listing(listing).unwrap();
    let codes: Vec<char> = records.iter().map(|r| r.type_code).collect();
    assert_eq!(codes, vec!['t', 'w', 'V']);
}
