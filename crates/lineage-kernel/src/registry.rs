//! Style registry: identifier -> factory, plus an optional manifest source.
//!
//! Styles are registered explicitly; nothing is discovered at runtime. A
//! TOML manifest can narrow and reorder the catalog and give each entry
//! default parameter values:
//!
//! ```toml
//! [[styles]]
//! id = "daboville"
//!
//! [styles.defaults]
//! includeSpouses = true
//!
//! [[styles]]
//! id = "ngsq"
//! ```
//!
//! The catalog is built lazily and cached until the source changes.
//! Manifest entries that cannot be used are skipped with a warning.

use crate::error::LineageError;
use crate::style::NumberingStyle;
use crate::styles::{DAboville, Henry, Ngsq, daboville, henry, ngsq};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Constructor of a default-configured style instance.
pub type StyleFactory = fn() -> Box<dyn NumberingStyle>;

fn new_daboville() -> Box<dyn NumberingStyle> {
    Box::new(DAboville::new())
}

fn new_henry() -> Box<dyn NumberingStyle> {
    Box::new(Henry::new())
}

fn new_ngsq() -> Box<dyn NumberingStyle> {
    Box::new(Ngsq::new())
}

/// Styles shipped with the kernel, in catalog order.
pub const BUILTIN_STYLES: &[(&str, StyleFactory)] = &[
    (daboville::ID, new_daboville),
    (henry::ID, new_henry),
    (ngsq::ID, new_ngsq),
];

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestEntry {
    id: String,
    #[serde(default = "default_enabled")]
    enabled: bool,
    #[serde(default)]
    defaults: Map<String, Value>,
}

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Clone)]
struct CatalogEntry {
    id: String,
    factory: StyleFactory,
    defaults: Map<String, Value>,
}

impl CatalogEntry {
    fn instantiate(&self) -> Result<Box<dyn NumberingStyle>, LineageError> {
        let mut style = (self.factory)();
        style.set_parameters(&self.defaults)?;
        Ok(style)
    }
}

#[derive(Debug, Clone)]
pub struct StyleRegistry {
    factories: Vec<(String, StyleFactory)>,
    source: Option<PathBuf>,
    catalog: Option<Vec<CatalogEntry>>,
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl StyleRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            factories: Vec::new(),
            source: None,
            catalog: None,
        }
    }

    /// A registry holding [`BUILTIN_STYLES`].
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for (id, factory) in BUILTIN_STYLES {
            registry.register(*id, *factory);
        }
        registry
    }

    /// Add or replace the factory for `id`.
    pub fn register(&mut self, id: impl Into<String>, factory: StyleFactory) {
        let id = id.into();
        match self.factories.iter_mut().find(|(known, _)| *known == id) {
            Some(slot) => slot.1 = factory,
            None => self.factories.push((id, factory)),
        }
        self.catalog = None;
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Use the manifest at `path` as the catalog source.
    ///
    /// Always invalidates the cached catalog, even for the same path.
    pub fn set_source(&mut self, path: impl Into<PathBuf>) -> Result<(), LineageError> {
        let path = path.into();
        if !path.is_file() {
            return Err(LineageError::Source(format!(
                "{} is not a file",
                path.display()
            )));
        }
        self.source = Some(path);
        self.catalog = None;
        Ok(())
    }

    /// Go back to listing every registered factory.
    pub fn clear_source(&mut self) {
        self.source = None;
        self.catalog = None;
    }

    /// Identifiers of the catalog, in order.
    pub fn ids(&mut self) -> Result<Vec<String>, LineageError> {
        Ok(self
            .catalog()?
            .iter()
            .map(|entry| entry.id.clone())
            .collect())
    }

    /// Fresh default-configured instances of every catalog style.
    pub fn list_styles(&mut self) -> Result<Vec<Box<dyn NumberingStyle>>, LineageError> {
        self.catalog()?
            .iter()
            .map(CatalogEntry::instantiate)
            .collect()
    }

    /// A fresh default-configured instance of style `id`.
    pub fn get_by_identifier(&mut self, id: &str) -> Result<Box<dyn NumberingStyle>, LineageError> {
        self.catalog()?
            .iter()
            .find(|entry| entry.id == id)
            .ok_or_else(|| LineageError::UnknownStyle(id.to_string()))?
            .instantiate()
    }

    /// Look up style `id` and apply caller parameters on top of its defaults.
    pub fn configure(
        &mut self,
        id: &str,
        raw: &Map<String, Value>,
    ) -> Result<Box<dyn NumberingStyle>, LineageError> {
        let mut style = self.get_by_identifier(id)?;
        style.set_parameters(raw)?;
        Ok(style)
    }

    fn catalog(&mut self) -> Result<&[CatalogEntry], LineageError> {
        let catalog = match self.catalog.take() {
            Some(catalog) => catalog,
            None => self.scan()?,
        };
        Ok(self.catalog.insert(catalog).as_slice())
    }

    fn scan(&self) -> Result<Vec<CatalogEntry>, LineageError> {
        let Some(path) = &self.source else {
            return Ok(self
                .factories
                .iter()
                .map(|(id, factory)| CatalogEntry {
                    id: id.clone(),
                    factory: *factory,
                    defaults: Map::new(),
                })
                .collect());
        };

        let text = fs::read_to_string(path)
            .map_err(|e| LineageError::Source(format!("{}: {e}", path.display())))?;
        let manifest: toml::Table = toml::from_str(&text)
            .map_err(|e| LineageError::Source(format!("{}: {e}", path.display())))?;

        let rows = match manifest.get("styles") {
            Some(toml::Value::Array(rows)) => rows.clone(),
            Some(_) => {
                tracing::warn!(source = %path.display(), "`styles` is not an array; catalog is empty");
                Vec::new()
            }
            None => Vec::new(),
        };

        let mut seen = BTreeSet::new();
        let mut catalog = Vec::new();
        for (position, row) in rows.into_iter().enumerate() {
            match self.resolve_row(row) {
                Ok(Some(entry)) if seen.insert(entry.id.clone()) => catalog.push(entry),
                Ok(Some(entry)) => {
                    tracing::warn!(source = %path.display(), position, id = %entry.id, "duplicate style entry skipped");
                }
                Ok(None) => {}
                Err(reason) => {
                    tracing::warn!(source = %path.display(), position, %reason, "style entry skipped");
                }
            }
        }
        tracing::debug!(source = %path.display(), styles = catalog.len(), "style catalog loaded");
        Ok(catalog)
    }

    fn resolve_row(&self, row: toml::Value) -> Result<Option<CatalogEntry>, String> {
        let entry = row
            .try_into::<ManifestEntry>()
            .map_err(|e| format!("malformed entry: {e}"))?;
        if !entry.enabled {
            return Ok(None);
        }
        let factory = self
            .factories
            .iter()
            .find(|(id, _)| *id == entry.id)
            .map(|(_, factory)| *factory)
            .ok_or_else(|| format!("unknown style `{}`", entry.id))?;

        let candidate = CatalogEntry {
            id: entry.id,
            factory,
            defaults: entry.defaults,
        };
        candidate
            .instantiate()
            .map_err(|e| format!("invalid defaults for `{}`: {e}", candidate.id))?;
        Ok(Some(candidate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameter::ParameterValue;
    use serde_json::json;
    use std::time::{SystemTime, UNIX_EPOCH};

    struct TempManifest {
        path: PathBuf,
    }

    impl TempManifest {
        fn new(prefix: &str, contents: &str) -> Self {
            let unique = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("clock should be after unix epoch")
                .as_nanos();
            let path = std::env::temp_dir().join(format!(
                "lineage-registry-{prefix}-{}-{unique}.toml",
                std::process::id()
            ));
            fs::write(&path, contents).expect("manifest should write");
            Self { path }
        }

        fn rewrite(&self, contents: &str) {
            fs::write(&self.path, contents).expect("manifest should rewrite");
        }
    }

    impl Drop for TempManifest {
        fn drop(&mut self) {
            let _ = fs::remove_file(&self.path);
        }
    }

    fn object(raw: Value) -> Map<String, Value> {
        serde_json::from_value(raw).expect("object literal")
    }

    #[test]
    fn builtins_are_listed_in_registration_order() {
        let mut registry = StyleRegistry::with_builtins();
        assert_eq!(registry.ids().unwrap(), vec!["daboville", "henry", "ngsq"]);
        let names: Vec<&str> = registry
            .list_styles()
            .unwrap()
            .iter()
            .map(|style| style.name())
            .collect();
        assert_eq!(names, vec!["d'Aboville", "Henry System", "NGSQ Style"]);
    }

    #[test]
    fn unknown_identifier_is_a_configuration_error() {
        let mut registry = StyleRegistry::with_builtins();
        let err = registry.get_by_identifier("meurgey").unwrap_err();
        assert!(matches!(err, LineageError::UnknownStyle(ref id) if id == "meurgey"));
    }

    #[test]
    fn configure_validates_caller_parameters() {
        let mut registry = StyleRegistry::with_builtins();
        let style = registry
            .configure("daboville", &object(json!({ "includeSpouses": "yes" })))
            .unwrap();
        assert_eq!(
            style.parameter("includeSpouses"),
            Some(ParameterValue::Bool(true))
        );

        let err = registry
            .configure("henry", &object(json!({ "bogus": 1 })))
            .unwrap_err();
        assert!(err.to_string().contains("invalid parameter name: bogus"));
    }

    #[test]
    fn every_lookup_returns_a_fresh_instance() {
        let mut registry = StyleRegistry::with_builtins();
        let mut first = registry.get_by_identifier("ngsq").unwrap();
        let mut second = registry.get_by_identifier("ngsq").unwrap();
        let params = crate::params::NumberingParameters {
            nth_child: 1,
            nth_marriage: 1,
            total_marriages: 1,
            parent_label: Some("1".to_string()),
            depth: 2,
        };
        assert_eq!(first.descendant_number(Some(&params)).unwrap(), "1 2i");
        assert_eq!(first.descendant_number(Some(&params)).unwrap(), "1 3i");
        assert_eq!(second.descendant_number(Some(&params)).unwrap(), "1 2i");
    }

    #[test]
    fn manifest_selects_orders_and_configures_styles() {
        let manifest = TempManifest::new(
            "select",
            r#"
[[styles]]
id = "ngsq"

[[styles]]
id = "daboville"
[styles.defaults]
includeSpouses = true
childrenNumberAfter10 = "A"

[[styles]]
id = "henry"
enabled = false
"#,
        );
        let mut registry = StyleRegistry::with_builtins();
        registry.set_source(&manifest.path).unwrap();
        assert_eq!(registry.ids().unwrap(), vec!["ngsq", "daboville"]);

        let style = registry.get_by_identifier("daboville").unwrap();
        assert_eq!(
            style.parameter("childrenNumberAfter10"),
            Some(ParameterValue::Choice("A".to_string()))
        );
        assert!(registry.get_by_identifier("henry").is_err());
    }

    #[test]
    fn malformed_manifest_entries_are_skipped() {
        let manifest = TempManifest::new(
            "malformed",
            r#"
[[styles]]
id = "unknown-style"

[[styles]]
name = "missing id"

[[styles]]
id = "daboville"
[styles.defaults]
dotForEachNNumbers = 0

[[styles]]
id = "henry"

[[styles]]
id = "henry"
"#,
        );
        let mut registry = StyleRegistry::with_builtins();
        registry.set_source(&manifest.path).unwrap();
        assert_eq!(registry.ids().unwrap(), vec!["henry"]);
    }

    #[test]
    fn catalog_is_cached_until_source_changes() {
        let manifest = TempManifest::new("cache", "[[styles]]\nid = \"henry\"\n");
        let mut registry = StyleRegistry::with_builtins();
        registry.set_source(&manifest.path).unwrap();
        assert_eq!(registry.ids().unwrap(), vec!["henry"]);

        manifest.rewrite("[[styles]]\nid = \"ngsq\"\n");
        assert_eq!(registry.ids().unwrap(), vec!["henry"]);

        registry.set_source(&manifest.path).unwrap();
        assert_eq!(registry.ids().unwrap(), vec!["ngsq"]);

        registry.clear_source();
        assert_eq!(registry.ids().unwrap().len(), BUILTIN_STYLES.len());
    }

    #[test]
    fn unusable_sources_are_reported() {
        let mut registry = StyleRegistry::with_builtins();
        assert!(matches!(
            registry.set_source("/definitely/not/here.toml"),
            Err(LineageError::Source(_))
        ));

        let manifest = TempManifest::new("syntax", "[[styles]\nid = ");
        registry.set_source(&manifest.path).unwrap();
        assert!(matches!(registry.ids(), Err(LineageError::Source(_))));
    }

    #[test]
    fn register_adds_custom_styles() {
        fn shouting_henry() -> Box<dyn NumberingStyle> {
            Box::new(Henry::with_mode(crate::styles::henry::HenryMode::Modified))
        }
        let mut registry = StyleRegistry::new();
        registry.register("henry-modified", shouting_henry);
        let style = registry.get_by_identifier("henry-modified").unwrap();
        assert_eq!(
            style.parameter("childrenNumberAfter9"),
            Some(ParameterValue::Choice("modified".to_string()))
        );
    }
}
