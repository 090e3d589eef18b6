//! Normalization of the `purifyCss` option into a list of scan paths.

use path_clean::PathClean;
use serde_json::{Value, json};
use std::path::PathBuf;

use crate::error::{MixError, Result};

pub const PURIFY_CSS_OPTION: &str = "purifyCss";

/// Package that performs the CSS purge, and the packages it needs installed.
pub const PURIFY_CSS_PACKAGE: &str = "purifycss-webpack";
pub const PURIFY_CSS_PEERS: [&str; 2] = ["purifycss-webpack", "purify-css"];

/// Templates scanned when `purifyCss` is simply `true`.
pub const DEFAULT_PURIFY_PATHS: [&str; 4] = [
    "app/**/*.php",
    "resources/views/**/*.php",
    "resources/assets/js/**/*.vue",
    "resources/assets/js/**/*.js",
];

/// Builds the normalized path list stored under `purifyCss`.
///
/// Accepted shapes: `true`, a single path, an array of paths, or an object
/// with a `paths` array. Paths use forward slashes, are cleaned, and repeated
/// entries are dropped.
#[derive(Debug, Clone, Default)]
pub struct PurifyPaths;

impl PurifyPaths {
    /// Falsy values (`false`, `null`, `""`, `0`) disable the feature and need
    /// no dependency check.
    pub fn is_requested(value: &Value) -> bool {
        match value {
            Value::Null | Value::Bool(false) => false,
            Value::String(s) => !s.is_empty(),
            Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
            _ => true,
        }
    }

    pub fn build(&self, value: &Value) -> Result<Value> {
        match value {
            Value::Bool(true) => Ok(json!({ "paths": normalize_all(DEFAULT_PURIFY_PATHS) })),
            Value::String(path) => Ok(json!({ "paths": normalize_all([path.as_str()]) })),
            Value::Array(items) => Ok(json!({ "paths": normalize_all(string_items(items)?) })),
            // Sibling keys such as `purifyOptions` are passed through untouched.
            Value::Object(map) => match map.get("paths") {
                Some(Value::Array(items)) => {
                    let mut built = map.clone();
                    built.insert("paths".to_string(), json!(normalize_all(string_items(items)?)));
                    Ok(Value::Object(built))
                }
                _ => Err(invalid("expected a 'paths' array")),
            },
            _ => Err(invalid("expected true, a path, or a list of paths")),
        }
    }
}

fn normalize_all<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut paths: Vec<String> = Vec::new();
    for path in raw {
        let normalized = normalize(path.as_ref());
        if !normalized.is_empty() && !paths.contains(&normalized) {
            paths.push(normalized);
        }
    }
    paths
}

fn string_items(items: &[Value]) -> Result<Vec<String>> {
    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| invalid("every path must be a string"))
        })
        .collect()
}

fn normalize(path: &str) -> String {
    let unified = path.trim().replace('\\', "/");
    if unified.is_empty() {
        return unified;
    }
    PathBuf::from(unified)
        .clean()
        .to_string_lossy()
        .replace('\\', "/")
}

fn invalid(hint: &str) -> MixError {
    MixError::InvalidOption {
        option: PURIFY_CSS_OPTION.to_string(),
        hint: hint.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn true_selects_default_paths() {
        let built = PurifyPaths.build(&json!(true)).unwrap();
        assert_eq!(built["paths"].as_array().unwrap().len(), DEFAULT_PURIFY_PATHS.len());
        assert_eq!(built["paths"][1], json!("resources/views/**/*.php"));
    }

    #[test]
    fn list_is_normalized_and_deduped() {
        let built = PurifyPaths
            .build(&json!(["./templates/*.html", "templates\\*.html", "lib/../src/*.vue"]))
            .unwrap();
        assert_eq!(built, json!({ "paths": ["templates/*.html", "src/*.vue"] }));
    }

    #[test]
    fn object_with_paths() {
        let built = PurifyPaths.build(&json!({ "paths": ["views/*.php"] })).unwrap();
        assert_eq!(built, json!({ "paths": ["views/*.php"] }));
    }

    #[test]
    fn object_keeps_sibling_keys() {
        let built = PurifyPaths
            .build(&json!({
                "paths": ["./views/*.html"],
                "purifyOptions": { "whitelist": ["*modal*"] }
            }))
            .unwrap();
        assert_eq!(
            built,
            json!({
                "paths": ["views/*.html"],
                "purifyOptions": { "whitelist": ["*modal*"] }
            })
        );
    }

    #[test]
    fn single_string() {
        let built = PurifyPaths.build(&json!("views/")).unwrap();
        assert_eq!(built, json!({ "paths": ["views"] }));
    }

    #[test]
    fn rejects_other_shapes() {
        assert!(matches!(
            PurifyPaths.build(&json!(42)),
            Err(MixError::InvalidOption { .. })
        ));
        assert!(PurifyPaths.build(&json!([1, 2])).is_err());
        assert!(PurifyPaths.build(&json!({ "dirs": [] })).is_err());
    }

    #[test]
    fn false_is_not_requested() {
        assert!(!PurifyPaths::is_requested(&json!(false)));
        assert!(!PurifyPaths::is_requested(&Value::Null));
        assert!(PurifyPaths::is_requested(&json!(["a"])));
    }

    #[test]
    fn falsy_scalars_are_not_requested() {
        assert!(!PurifyPaths::is_requested(&json!("")));
        assert!(!PurifyPaths::is_requested(&json!(0)));
        assert!(!PurifyPaths::is_requested(&json!(0.0)));
        assert!(PurifyPaths::is_requested(&json!("views/*.html")));
        assert!(PurifyPaths::is_requested(&json!(1)));
    }
}
