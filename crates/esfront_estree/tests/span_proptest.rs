//! Property-based tests for node positions in the ESTree output.

use esfront_estree::{parse_to_json, ParseOptions};
use proptest::prelude::*;
use serde_json::Value;

fn statement() -> impl Strategy<Value = String> {
    let name = "[a-z]{1,5}".prop_map(|n| format!("{}_", n));
    prop_oneof![
        name.clone().prop_map(|n| format!("let {} = {{ {}, k: [1, , 2] }};", n, n)),
        name.clone().prop_map(|n| format!("function {}(a, {{ b }} = {{}}, ...c) {{ return a ?? b; }}", n)),
        name.clone().prop_map(|n| format!("{} = `x${{{}}}y` + /re/g.source;", n, n)),
        name.clone().prop_map(|n| format!("class {} {{ #p = 1; static {{ this.q = 2; }} m() {{ return this.#p; }} }}", n)),
        name.prop_map(|n| format!("for (const [i, j] of {}) {{ if (i) continue; }}", n)),
        (0u32..500).prop_map(|n| format!("switch (v) {{ case {}: x => x * {}; break; }}", n, n)),
    ]
}

/// Checks every positioned node and returns how many were seen.
fn check_spans(value: &Value, source: &str) -> usize {
    match value {
        Value::Object(map) => {
            let mut seen = 0;
            if let (Some(start), Some(end)) = (map.get("start"), map.get("end")) {
                let start = start.as_u64().unwrap_or(u64::MAX) as usize;
                let end = end.as_u64().unwrap_or(0) as usize;
                assert!(start <= end, "{:?} has start {} > end {}", map.get("type"), start, end);
                assert!(source.get(start..end).is_some(), "span {}..{} out of range", start, end);
                seen += 1;
            }
            seen + map.values().map(|child| check_spans(child, source)).sum::<usize>()
        }
        Value::Array(items) => items.iter().map(|item| check_spans(item, source)).sum(),
        _ => 0,
    }
}

proptest! {
    #[test]
    fn test_spans_are_ordered_and_in_range(
        statements in prop::collection::vec(statement(), 1..8),
        resolve in any::<bool>(),
    ) {
        let source = statements.join("\n");
        let program = parse_to_json(&source, &ParseOptions { resolve });
        prop_assert!(program.is_ok(), "{:?}", source);
        if let Ok(program) = program {
            prop_assert!(check_spans(&program, &source) > statements.len());
        }
    }
}
