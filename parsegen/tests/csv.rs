//! A very simple csv grammar that acts only on numbers.

use ebnf::Grammar;
use parsegen::{parse, parse_rule, Node};

const CSV: &str = r#"
    csv = { record } ;
    record = fields , "\n" ;
    fields = field , { "," , field } ;
    field = digit , { digit } ;
    digit = "0" | "1" | "2" | "3" | "4" | "5" | "6" | "7" | "8" | "9" ;
"#;

fn grammar() -> Grammar {
    CSV.parse().unwrap()
}

fn named<'n, 'a>(node: &'n Node<'a>, rule: &str) -> Vec<&'n Node<'a>> {
    node.children()
        .iter()
        .filter(|n| n.rule() == Some(rule))
        .collect()
}

#[test]
fn digit() {
    let g = grammar();
    let input = "7";
    let node = parse_rule(&g, "digit", input).unwrap();

    assert_eq!(node.rule(), Some("digit"));
    assert_eq!(node.as_str(), input);
    assert!(node.is_leaf(), "unexpected children: {:?}", node.children());
}

#[test]
fn field() {
    let g = grammar();
    let input = "789";
    let node = parse_rule(&g, "field", input).unwrap();

    assert_eq!(node.as_str(), input);
    let digits = named(&node, "digit");
    assert_eq!(digits.len(), 3, "unexpected nodes: {:?}", digits);
}

#[test]
fn fields() {
    let g = grammar();
    let input = "123,789";
    let node = parse_rule(&g, "fields", input).unwrap();

    let fields = named(&node, "field");
    assert_eq!(fields[0].as_str(), "123");
    assert_eq!(fields[1].as_str(), "789");

    // The comma is not a rule of its own.
    let anonymous: Vec<&str> = node
        .children()
        .iter()
        .filter(|n| n.rule().is_none())
        .map(|n| n.as_str())
        .collect();
    assert_eq!(anonymous, vec![","]);
}

#[test]
fn record() {
    let g = grammar();
    let node = parse_rule(&g, "record", "123,789\n").unwrap();

    assert_eq!(named(&node, "fields").len(), 1);
    let leaves: String = node.leaves().map(|n| n.as_str()).collect();
    assert_eq!(leaves, "123,789\n");
}

#[test]
fn csv() {
    let g = grammar();
    let input = "184,754\n33,22222\n";
    let root = parse(&g, input).unwrap();

    assert_eq!(root.rule(), Some("csv"));
    let records = named(&root, "record");
    assert_eq!(records.len(), 2, "nodes: {:?}", root);
    assert_eq!(records[1].as_str(), "33,22222\n");
}

#[test]
fn missing_newline() {
    let g = grammar();
    let err = parse(&g, "1,2\n3,4").unwrap_err();
    assert_eq!(err.offset(), 7);
    assert_eq!(err.line_col(), (2, 4));
}

mod props {
    use super::*;
    use proptest::prelude::*;

    fn csv_strategy() -> impl Strategy<Value = Vec<Vec<u32>>> {
        prop::collection::vec(prop::collection::vec(0u32..100_000, 1..5), 0..6)
    }

    proptest! {
        #[test]
        fn generated_csv_parses(rows in csv_strategy()) {
            let input: String = rows
                .iter()
                .map(|row| {
                    let fields: Vec<String> = row.iter().map(|n| n.to_string()).collect();
                    format!("{}\n", fields.join(","))
                })
                .collect();

            let g = grammar();
            let root = parse(&g, &input).unwrap();
            prop_assert_eq!(root.as_str(), input.as_str());
            prop_assert_eq!(named(&root, "record").len(), rows.len());
        }
    }
}
