use lineage_bd::MemoryStore;
use lineage_kernel::StyleRegistry;
use serde_json::{Map, Value, json};
use std::fmt::Display;
use std::path::{Path, PathBuf};

pub const DEFAULT_TREE_PATH: &str = ".lineage/tree.jsonl";

/// Print `message` and exit with status 1. In JSON mode the error is also
/// written to stdout as `{"error":{"message":...}}`.
pub fn fail(message: impl Display, json_output: bool) -> ! {
    let message = message.to_string();
    if json_output {
        let payload = json!({ "error": { "message": message } });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).expect("json serialization")
        );
    }
    eprintln!("error: {message}");
    std::process::exit(1);
}

pub fn registry_or_exit(manifest: Option<&str>, json_output: bool) -> StyleRegistry {
    let mut registry = StyleRegistry::with_builtins();
    if let Some(manifest) = manifest {
        registry
            .set_source(manifest)
            .unwrap_or_else(|e| fail(e, json_output));
    }
    registry
}

pub fn load_tree_or_exit(tree_arg: &str, json_output: bool) -> (MemoryStore, PathBuf) {
    let path = PathBuf::from(tree_arg);
    if !path.exists() {
        fail(
            format!("tree file not found: {}", path.display()),
            json_output,
        );
    }
    let store = MemoryStore::load_jsonl(&path)
        .unwrap_or_else(|e| fail(format!("failed to load {}: {e}", path.display()), json_output));
    (store, path)
}

/// Parse repeated `key=value` arguments into a raw parameter map.
///
/// Values stay strings; the style's descriptors coerce them. A key given
/// more than once becomes a list, which is how multi-choice values are
/// passed.
pub fn parse_params(args: &[String]) -> Result<Map<String, Value>, String> {
    let mut raw = Map::new();
    for arg in args {
        let Some((key, value)) = arg.split_once('=') else {
            return Err(format!("invalid --param `{arg}`: expected KEY=VALUE"));
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(format!("invalid --param `{arg}`: empty key"));
        }
        let value = Value::String(value.to_string());
        match raw.get_mut(key) {
            None => {
                raw.insert(key.to_string(), value);
            }
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
        }
    }
    Ok(raw)
}

pub fn write_output_or_exit(path: &Path, text: &str, json_output: bool) {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .unwrap_or_else(|e| fail(format!("{}: {e}", parent.display()), json_output));
    }
    std::fs::write(path, text)
        .unwrap_or_else(|e| fail(format!("{}: {e}", path.display()), json_output));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn params_split_on_the_first_equals_sign() {
        let raw = parse_params(&args(&["includeSpouses=yes", "pattern=a=b"])).unwrap();
        assert_eq!(raw["includeSpouses"], json!("yes"));
        assert_eq!(raw["pattern"], json!("a=b"));
    }

    #[test]
    fn repeated_params_become_a_list() {
        let raw = parse_params(&args(&["tags=a", "tags=b", "tags=c"])).unwrap();
        assert_eq!(raw["tags"], json!(["a", "b", "c"]));
    }

    #[test]
    fn malformed_params_are_rejected() {
        assert!(parse_params(&args(&["includeSpouses"])).is_err());
        assert!(parse_params(&args(&["=1"])).is_err());
    }
}
