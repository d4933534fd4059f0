//! Printing trees back in indented form.

use rdm_yaml::{BuildOptions, Event, EventQueue, RecordTree, SerializeOptions, parse, parse_events};

fn print(tree: &RecordTree) -> String {
    tree.to_yaml_string(&SerializeOptions::default())
}

fn pairs(tree: &RecordTree, document: usize) -> Vec<(String, String)> {
    let arena = tree.arena();
    let body = tree.document(document).unwrap();
    arena
        .iter(body.handle())
        .map(|(_, record)| {
            (
                record.key().unwrap().to_string(),
                record.value().as_text().unwrap().to_string(),
            )
        })
        .collect()
}

#[test]
fn test_round_trip_single_line_mapping() {
    let tree = parse("title: My Project\nauthor: Jane Roe\nyear: 2024\n").unwrap();
    let printed = print(&tree);
    let reparsed = parse(&printed).unwrap();

    assert_eq!(pairs(&tree, 0), pairs(&reparsed, 0));
    assert_eq!(
        pairs(&reparsed, 0),
        vec![
            ("title".to_string(), "My Project".to_string()),
            ("author".to_string(), "Jane Roe".to_string()),
            ("year".to_string(), "2024".to_string()),
        ]
    );
}

#[test]
fn test_round_trip_text_that_needs_quotes() {
    let cases = [
        ("a: 'x: y'\n", "a", "x: y"),
        ("a: 'v # c'\n", "a", "v # c"),
        ("'k: 1': v\n", "k: 1", "v"),
        ("a: '- x'\n", "a", "- x"),
        ("a: '[x, y]'\n", "a", "[x, y]"),
        ("a: '{x: 1}'\n", "a", "{x: 1}"),
        ("a: '&anchor'\n", "a", "&anchor"),
        ("a: '*alias'\n", "a", "*alias"),
        ("a: 'ends:'\n", "a", "ends:"),
        ("a: ' padded '\n", "a", " padded "),
        ("a: '\"quoted\" start'\n", "a", "\"quoted\" start"),
        ("a: \"tab\\there\\\\\"\n", "a", "tab\there\\"),
    ];

    for (input, key, text) in cases {
        let tree = parse(input).unwrap();
        let expected = vec![(key.to_string(), text.to_string())];
        assert_eq!(pairs(&tree, 0), expected, "{input:?}");

        let printed = print(&tree);
        let reparsed = parse(&printed).unwrap_or_else(|err| panic!("{printed:?}: {err}"));
        assert_eq!(pairs(&reparsed, 0), expected, "{printed:?}");
    }
}

#[test]
fn test_quoting_is_minimal() {
    let tree = parse("url: https://example.org/a#b\nnote: it's fine\n").unwrap();
    assert_eq!(print(&tree), "url: https://example.org/a#b\nnote: it's fine\n");
}

#[test]
fn test_round_trip_from_events() {
    let queue = EventQueue::document([
        Event::MappingStart,
        Event::scalar("name"),
        Event::scalar("dataset"),
        Event::scalar("version"),
        Event::scalar("3"),
        Event::MappingEnd,
    ]);
    let tree = parse_events(queue, &BuildOptions::default()).unwrap();
    let reparsed = parse(&print(&tree)).unwrap();
    assert_eq!(pairs(&tree, 0), pairs(&reparsed, 0));
}

#[test]
fn test_nested_document() {
    let tree = parse(
        "project:\n  title: Demo\n  keywords: [yaml, records]\n  abstract: |\n    First line.\n\n    Second paragraph.\nlicense: MIT\n",
    )
    .unwrap();

    insta::assert_snapshot!(print(&tree), @r"
    project:
      title: Demo
      keywords:
        - yaml
        - records
      abstract: |
        First line.

        Second paragraph.
    license: MIT
    ");
}

#[test]
fn test_sequence_items() {
    let tree = parse("- one\n- - nested\n  - items\n- |\n  block\n").unwrap();

    insta::assert_snapshot!(print(&tree), @r"
    -
      - one
      -
        - nested
        - items
      - |
        block
    ");
}

#[test]
fn test_documents_are_separated() {
    let tree = parse("a: 1\n---\nb: 2\n").unwrap();

    insta::assert_snapshot!(print(&tree), @r"
    a: 1
    ---
    b: 2
    ");
}

#[test]
fn test_wider_indent_step() {
    let tree = parse("outer:\n  inner:\n    leaf: x\n").unwrap();
    let printed = tree.to_yaml_string(&SerializeOptions { indent_step: 4 });
    assert_eq!(printed, "outer:\n    inner:\n        leaf: x\n");
}

#[test]
fn test_display_matches_default_options() {
    let tree = parse("a:\n  - x\n").unwrap();
    assert_eq!(tree.to_string(), print(&tree));
}
