//! Property-based tests for the script parser.

use crate::{Block, Item, TextEdit, Value, apply_edits, parse};
use proptest::prelude::*;

fn arb_word() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z_][a-z0-9_]{0,12}").unwrap()
}

/// Random well-formed nested script text.
fn arb_script() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        arb_word(),
        arb_word().prop_map(|w| format!("\"{w}\"")),
        (-1000i32..1000).prop_map(|n| n.to_string()),
    ];
    let value = leaf.prop_recursive(4, 32, 6, |inner| {
        prop::collection::vec((arb_word(), inner), 0..6).prop_map(|entries| {
            let body: Vec<String> = entries
                .into_iter()
                .map(|(k, v)| format!("\t{k} = {v}"))
                .collect();
            format!("{{\n{}\n}}", body.join("\n"))
        })
    });
    prop::collection::vec((arb_word(), value), 0..5).prop_map(|entries| {
        entries
            .into_iter()
            .map(|(k, v)| format!("{k} = {v} # note\n"))
            .collect::<String>()
    })
}

fn collect_entries<'a>(block: &'a Block, out: &mut Vec<&'a crate::Entry>) {
    for item in &block.items {
        match item {
            Item::Entry(e) => {
                out.push(e);
                if let Value::Block(inner) = &e.value {
                    collect_entries(inner, out);
                }
            }
            Item::Value(Value::Block(inner)) => collect_entries(inner, out),
            Item::Value(Value::Scalar(_)) => {}
        }
    }
}

proptest! {
    #[test]
    fn parser_never_panics(input in ".*") {
        let _ = parse(&input);
    }

    #[test]
    fn key_spans_index_the_source(text in arb_script()) {
        let doc = parse(&text).expect("generated scripts are well formed");
        let mut entries = Vec::new();
        collect_entries(&doc, &mut entries);
        for entry in entries {
            prop_assert_eq!(&text[entry.key.span.start..entry.key.span.end], entry.key.text.as_str());
            if let Value::Scalar(s) = &entry.value {
                prop_assert_eq!(&text[s.span.start..s.span.end], s.text.as_str());
            }
        }
    }

    #[test]
    fn deleting_any_entry_keeps_the_file_parseable(text in arb_script(), pick in any::<prop::sample::Index>()) {
        let doc = parse(&text).expect("generated scripts are well formed");
        let mut entries = Vec::new();
        collect_entries(&doc, &mut entries);
        prop_assume!(!entries.is_empty());
        let entry = pick.get(&entries);
        let edited = apply_edits(&text, &[TextEdit::delete(entry.span)]).expect("apply");
        prop_assert!(parse(&edited).is_ok());
        prop_assert!(edited.len() < text.len());
    }
}
