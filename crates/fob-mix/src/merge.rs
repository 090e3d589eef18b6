//! Structural merge of bundler configuration trees.
//!
//! Fragments contributed by separate `webpack_config` calls are folded into the
//! accumulated tree with [`merge`]. The rules are fixed:
//!
//! - scalars: the incoming value replaces the base value
//! - arrays: base elements followed by incoming elements; two string lists
//!   (loaders, plugins, extensions) are de-duplicated keeping first occurrence
//! - objects: merged key by key, recursively
//! - mismatched types: the incoming value wins for that key
//!
//! Merging never fails. Callers always fold the newest fragment into the
//! accumulated result, i.e. `merge(merge(a, b), c)`.

use serde_json::{Map, Value};

/// Merge `incoming` over `base`, returning a new tree.
///
/// # Example
///
/// ```
/// use fob_mix::merge::merge;
/// use serde_json::json;
///
/// let base = json!({ "resolve": { "extensions": [".js", ".vue"] } });
/// let incoming = json!({ "resolve": { "extensions": [".vue", ".ts"] } });
///
/// assert_eq!(
///     merge(&base, &incoming),
///     json!({ "resolve": { "extensions": [".js", ".vue", ".ts"] } })
/// );
/// ```
pub fn merge(base: &Value, incoming: &Value) -> Value {
    let mut merged = base.clone();
    merge_into(&mut merged, incoming.clone());
    merged
}

/// Merge `incoming` into `target` in place.
pub fn merge_into(target: &mut Value, incoming: Value) {
    match (target, incoming) {
        (Value::Object(target_map), Value::Object(incoming_map)) => {
            merge_maps(target_map, incoming_map);
        }
        (Value::Array(target_items), Value::Array(incoming_items)) => {
            let dedupe = is_string_list(target_items) && is_string_list(&incoming_items);
            target_items.extend(incoming_items);
            if dedupe {
                dedupe_strings(target_items);
            }
        }
        (target_slot, incoming) => {
            *target_slot = incoming;
        }
    }
}

fn merge_maps(target: &mut Map<String, Value>, incoming: Map<String, Value>) {
    for (key, value) in incoming {
        match target.get_mut(&key) {
            Some(existing) => merge_into(existing, value),
            None => {
                target.insert(key, value);
            }
        }
    }
}

fn is_string_list(items: &[Value]) -> bool {
    !items.is_empty() && items.iter().all(Value::is_string)
}

fn dedupe_strings(items: &mut Vec<Value>) {
    let mut seen: Vec<String> = Vec::with_capacity(items.len());
    items.retain(|item| match item.as_str() {
        Some(s) if seen.iter().any(|prev| prev == s) => false,
        Some(s) => {
            seen.push(s.to_string());
            true
        }
        None => true,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars_are_overwritten() {
        assert_eq!(merge(&json!(1), &json!(2)), json!(2));
        assert_eq!(merge(&json!("a"), &json!(null)), json!(null));
        assert_eq!(
            merge(&json!({ "devtool": "eval" }), &json!({ "devtool": false })),
            json!({ "devtool": false })
        );
    }

    #[test]
    fn mixed_arrays_are_concatenated() {
        let base = json!({ "plugins": [{ "plugin": "A" }] });
        let incoming = json!({ "plugins": [{ "plugin": "A" }, { "plugin": "B" }] });
        assert_eq!(
            merge(&base, &incoming),
            json!({ "plugins": [{ "plugin": "A" }, { "plugin": "A" }, { "plugin": "B" }] })
        );
    }

    #[test]
    fn string_lists_drop_duplicates() {
        let base = json!({ "use": ["style-loader", "css-loader"] });
        let incoming = json!({ "use": ["css-loader", "sass-loader", "sass-loader"] });
        assert_eq!(
            merge(&base, &incoming),
            json!({ "use": ["style-loader", "css-loader", "sass-loader"] })
        );
    }

    #[test]
    fn string_list_with_non_strings_is_not_deduped() {
        let base = json!(["a", 1]);
        let incoming = json!(["a"]);
        assert_eq!(merge(&base, &incoming), json!(["a", 1, "a"]));
    }

    #[test]
    fn empty_array_concat_keeps_other_side() {
        assert_eq!(merge(&json!([]), &json!(["a", "a"])), json!(["a", "a"]));
        assert_eq!(merge(&json!([1]), &json!([])), json!([1]));
    }

    #[test]
    fn objects_merge_recursively() {
        let base = json!({
            "output": { "path": "public", "filename": "[name].js" },
            "resolve": { "alias": { "vue$": "vue/dist/vue.common.js" } }
        });
        let incoming = json!({
            "output": { "filename": "[name].[hash].js" },
            "resolve": { "alias": { "@": "resources/assets/js" } }
        });
        assert_eq!(
            merge(&base, &incoming),
            json!({
                "output": { "path": "public", "filename": "[name].[hash].js" },
                "resolve": {
                    "alias": {
                        "vue$": "vue/dist/vue.common.js",
                        "@": "resources/assets/js"
                    }
                }
            })
        );
    }

    #[test]
    fn type_mismatch_incoming_wins() {
        assert_eq!(
            merge(&json!({ "entry": ["a.js"] }), &json!({ "entry": "b.js" })),
            json!({ "entry": "b.js" })
        );
        assert_eq!(
            merge(&json!({ "node": false }), &json!({ "node": { "fs": "empty" } })),
            json!({ "node": { "fs": "empty" } })
        );
        assert_eq!(
            merge(&json!({ "externals": { "a": "A" } }), &json!({ "externals": ["a"] })),
            json!({ "externals": ["a"] })
        );
    }

    #[test]
    fn empty_fragment_is_identity() {
        let a = json!({ "module": { "rules": [{ "test": "\\.js$" }] }, "devtool": "eval" });
        assert_eq!(merge(&a, &json!({})), a);
        assert_eq!(merge(&json!({}), &a), a);
    }

    #[test]
    fn key_order_is_preserved() {
        let base = json!({ "z": 1, "a": 2 });
        let merged = merge(&base, &json!({ "m": 3, "z": 4 }));
        let keys: Vec<_> = merged.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn left_fold_applies_newest_last() {
        let a = json!({ "devtool": "a", "list": ["x"] });
        let b = json!({ "devtool": "b", "list": ["y"] });
        let c = json!({ "devtool": "c", "list": ["x", "z"] });
        let folded = merge(&merge(&a, &b), &c);
        assert_eq!(folded, json!({ "devtool": "c", "list": ["x", "y", "z"] }));
    }
}
