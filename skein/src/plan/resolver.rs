//! Placeholder resolution: substitutes `$N` / `${N}` references with observations.

use dashmap::DashMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\{?(\d+)\}?").unwrap());

/// Resolves every placeholder inside `value` against `observations`.
///
/// Strings are scanned once for `$N`/`${N}` occurrences; lists and maps are
/// resolved element/value-wise; anything else is returned unchanged. A
/// placeholder whose index has no entry in `observations` is left as-is —
/// the planner is trusted never to emit forward references, so an absent
/// index means the model meant a literal dollar sign.
pub fn resolve_value(value: &Value, observations: &DashMap<i64, String>) -> Value {
    match value {
        Value::String(s) => Value::String(resolve_string(s, observations)),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| resolve_value(item, observations))
                .collect(),
        ),
        Value::Object(map) => {
            let mut out = serde_json::Map::with_capacity(map.len());
            for (k, v) in map {
                out.insert(k.clone(), resolve_value(v, observations));
            }
            Value::Object(out)
        }
        other => other.clone(),
    }
}

fn resolve_string(input: &str, observations: &DashMap<i64, String>) -> String {
    let mut out = String::with_capacity(input.len());
    let mut last = 0;
    for caps in ID_RE.captures_iter(input) {
        let whole = caps.get(0).unwrap();
        let idx: i64 = caps[1].parse().expect("regex guarantees digits");
        out.push_str(&input[last..whole.start()]);
        match observations.get(&idx) {
            Some(resolved) => out.push_str(resolved.value()),
            None => out.push_str(whole.as_str()),
        }
        last = whole.end();
    }
    out.push_str(&input[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_braced_and_unbraced_placeholders() {
        let obs = DashMap::new();
        obs.insert(1, "23".to_string());
        assert_eq!(resolve_string("temp is $1", &obs), "temp is 23");
        assert_eq!(resolve_string("temp is ${1}", &obs), "temp is 23");
    }

    #[test]
    fn missing_index_left_literal() {
        let obs = DashMap::new();
        obs.insert(1, "a".to_string());
        assert_eq!(resolve_string("hello $9", &obs), "hello $9");
    }

    #[test]
    fn resolution_is_idempotent_on_already_resolved_values() {
        let obs = DashMap::new();
        obs.insert(1, "23".to_string());
        let once = resolve_string("temp is $1", &obs);
        let twice = resolve_string(&once, &obs);
        assert_eq!(once, twice);
    }

    #[test]
    fn resolves_lists_and_maps_elementwise() {
        let obs = DashMap::new();
        obs.insert(1, "a".to_string());
        let value = Value::Array(vec![Value::String("$1".into()), Value::String("lit".into())]);
        let resolved = resolve_value(&value, &obs);
        assert_eq!(
            resolved,
            Value::Array(vec![Value::String("a".into()), Value::String("lit".into())])
        );
    }
}
