//! Precedence merge: flatten sources into a dotted-key dictionary, then
//! rebuild a nested tree with JSON coercion at string leaves.

use serde_json::{Map, Value};
use serde_yaml::Value as YamlValue;

/// Flat dictionary from dotted path to scalar. Insertion-ordered, so a
/// later layer writing the same key replaces the value in place and a
/// leaf/branch conflict between distinct keys resolves in favor of the
/// layer that wrote last.
pub(crate) type FlatDict = Map<String, Value>;

/// Merge the source layers in increasing precedence: `default` profile,
/// active profile, environment snapshot, argument tokens. Returns the
/// rebuilt nested tree.
pub fn merge_layers(
    default_profile: Option<&YamlValue>,
    active_profile: Option<&YamlValue>,
    env_vars: &[(String, String)],
    args: &[String],
) -> Value {
    let mut flat = FlatDict::new();
    if let Some(value) = default_profile {
        flatten_into(&mut flat, value, "");
    }
    if let Some(value) = active_profile {
        flatten_into(&mut flat, value, "");
    }
    overlay_env(&mut flat, env_vars);
    overlay_args(&mut flat, args);
    tracing::debug!("merged {} flat entries", flat.len());
    build_tree(&flat)
}

/// Walk `tree` by dotted path. Empty segments are discarded, so an empty
/// path (or one of only dots) returns the whole tree. A non-composite
/// node reached before the final segment yields `None`.
pub fn lookup<'a>(tree: &'a Value, path: &str) -> Option<&'a Value> {
    let segments: Vec<&str> = path.split('.').filter(|s| !s.is_empty()).collect();
    let Some((leaf, branches)) = segments.split_last() else {
        return Some(tree);
    };
    let mut node = tree;
    for segment in branches {
        node = child(node, segment)?;
    }
    child(node, leaf)
}

fn child<'a>(node: &'a Value, segment: &str) -> Option<&'a Value> {
    match node {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|index| items.get(index)),
        _ => None,
    }
}

/// Recursively flatten a parsed profile body. Mappings and sequences
/// recurse (sequence indices become path segments); scalars land in the
/// dictionary as-is, under `prefix`.
pub(crate) fn flatten_into(flat: &mut FlatDict, value: &YamlValue, prefix: &str) {
    match value {
        YamlValue::Mapping(map) => {
            for (key, entry) in map {
                let Some(segment) = key_segment(key) else { continue };
                flatten_into(flat, entry, &join(prefix, &segment));
            }
        }
        YamlValue::Sequence(items) => {
            for (index, entry) in items.iter().enumerate() {
                flatten_into(flat, entry, &join(prefix, &index.to_string()));
            }
        }
        YamlValue::Tagged(tagged) => flatten_into(flat, &tagged.value, prefix),
        scalar => {
            flat.insert(prefix.to_string(), scalar_to_json(scalar));
        }
    }
}

/// Overlay environment variables: the raw name is the whole flat key, no
/// dot splitting, the value a string.
pub(crate) fn overlay_env(flat: &mut FlatDict, vars: &[(String, String)]) {
    for (name, value) in vars {
        flat.insert(name.clone(), Value::String(value.clone()));
    }
}

/// Overlay argument tokens. `--key=value` splits on the first `=` (any
/// later `=` stay in the value); bare `--key` stores the string "true";
/// anything without the `--` prefix is ignored.
pub(crate) fn overlay_args(flat: &mut FlatDict, args: &[String]) {
    for arg in args {
        let Some(rest) = arg.strip_prefix("--") else { continue };
        match rest.split_once('=') {
            Some((key, value)) => {
                flat.insert(key.to_string(), Value::String(value.to_string()))
            }
            None => flat.insert(rest.to_string(), Value::String("true".to_string())),
        };
    }
}

/// Rebuild the nested tree from the flat dictionary, in insertion order.
/// An intermediate segment landing on a non-object replaces it with a
/// fresh object, so the last-written key decides a node's shape.
pub(crate) fn build_tree(flat: &FlatDict) -> Value {
    let mut root = Map::new();
    for (key, value) in flat {
        let segments: Vec<&str> = key.split('.').collect();
        let Some((leaf, branches)) = segments.split_last() else { continue };
        let mut node = &mut root;
        for segment in branches {
            if !matches!(node.get(*segment), Some(Value::Object(_))) {
                node.insert((*segment).to_string(), Value::Object(Map::new()));
            }
            node = match node.get_mut(*segment) {
                Some(Value::Object(map)) => map,
                _ => unreachable!(),
            };
        }
        node.insert((*leaf).to_string(), coerce_leaf(value));
    }
    Value::Object(root)
}

/// Best-effort leaf coercion: strings are reparsed as JSON to recover
/// numbers, booleans, null, and structured values, keeping the raw
/// string when that fails. Non-string scalars pass through unchanged.
pub(crate) fn coerce_leaf(value: &Value) -> Value {
    match value {
        Value::String(raw) => {
            serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.clone()))
        }
        other => other.clone(),
    }
}

fn join(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{prefix}.{segment}")
    }
}

fn key_segment(key: &YamlValue) -> Option<String> {
    match key {
        YamlValue::String(text) => Some(text.clone()),
        YamlValue::Number(number) => Some(number.to_string()),
        YamlValue::Bool(flag) => Some(flag.to_string()),
        YamlValue::Null => Some("null".to_string()),
        // Composite mapping keys have no dotted-path rendering.
        _ => None,
    }
}

fn scalar_to_json(value: &YamlValue) -> Value {
    match value {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(flag) => Value::Bool(*flag),
        YamlValue::String(text) => Value::String(text.clone()),
        YamlValue::Number(number) => {
            if let Some(int) = number.as_i64() {
                Value::from(int)
            } else if let Some(int) = number.as_u64() {
                Value::from(int)
            } else {
                // YAML .nan/.inf have no JSON form.
                number
                    .as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map_or(Value::Null, Value::Number)
            }
        }
        // Composites are recursed by the caller.
        _ => Value::Null,
    }
}
