//! Cross-checks against `serde_json`.
//!
//! For inputs inside the common subset of both grammars (no signs, no
//! exponents, no `\u` escapes), our compact output must be valid JSON that
//! `serde_json` reads back as the same document.

use json_tree::{parse, serialize, Value};

const SHARED_SUBSET: &[&str] = &[
    "null",
    "true",
    "17",
    "2.25",
    "\"plain text\"",
    "\"quote \\\" and backslash \\\\ and newline \\n\"",
    "[1, 2, [3, [4]]]",
    r#"{"name": "tree", "tags": ["a", "b"], "nested": {"ok": true, "n": null}}"#,
    r#"[{"a": 0.5}, {"b": []}, {}]"#,
];

fn to_serde(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => serde_json::Value::from(i),
            (None, Some(d)) => serde_json::Value::from(d),
            (None, None) => unreachable!("number has one active representation"),
        },
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Array(elements) => serde_json::Value::Array(elements.fold(
            Vec::new(),
            |mut acc, _, v| {
                acc.push(to_serde(v));
                acc
            },
        )),
        Value::Object(members) => serde_json::Value::Object(members.fold(
            serde_json::Map::new(),
            |mut acc, k, v| {
                acc.insert(k.clone(), to_serde(v));
                acc
            },
        )),
    }
}

#[test]
fn compact_output_is_valid_json() {
    for input in SHARED_SUBSET {
        let ours = serialize(&parse(input).unwrap());
        let theirs: serde_json::Value = serde_json::from_str(&ours)
            .unwrap_or_else(|e| panic!("serde_json rejected {ours}: {e}"));
        let expected: serde_json::Value = serde_json::from_str(input).unwrap();
        assert_eq!(theirs, expected, "document changed for {input}");
    }
}

#[test]
fn parsed_tree_matches_serde_tree() {
    for input in SHARED_SUBSET {
        let ours = to_serde(&parse(input).unwrap());
        let theirs: serde_json::Value = serde_json::from_str(input).unwrap();
        assert_eq!(ours, theirs, "tree mismatch for {input}");
    }
}

#[test]
fn compact_output_matches_serde_compact_output() {
    // serde_json sorts keys by default, so only use key-sorted objects here.
    for input in ["[1,2,3]", r#"{"a":[true,null],"b":"x"}"#, "\"tab\\there\""] {
        let ours = serialize(&parse(input).unwrap());
        let value: serde_json::Value = serde_json::from_str(input).unwrap();
        assert_eq!(ours, serde_json::to_string(&value).unwrap());
    }
}
