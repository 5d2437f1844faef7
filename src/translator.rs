//! Hierarchical text lookup with fallback keys and `%{name}` interpolation.
//!
//! Locale tables are nested YAML maps rooted at `<locale>.api_doc`, flattened
//! into dotted keys when loaded:
//!
//! ```yaml
//! en:
//!   api_doc:
//!     actions:
//!       index: "List %{resources}"
//! ```
//!
//! A missing key is not an error: lookups return `None` and the caller picks a
//! literal phrase instead.

use crate::error::{Error, Result};
use crate::scanner::LocaleScanner;
use log::{debug, warn};
use serde_yaml::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// The built-in English table
const DEFAULT_LOCALE_TABLE: &str = include_str!("../locales/en.yml");

/// Scope every key is resolved under
const SCOPE: &str = "api_doc";

/// Named interpolation parameters, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Params {
    values: Vec<(&'static str, String)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.values.push((name, value.into()));
        self
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Read-only text table for one locale.
#[derive(Debug, Clone)]
pub struct Translator {
    locale: String,
    table: HashMap<String, String>,
}

impl Translator {
    /// An empty table for `locale`
    pub fn new(locale: &str) -> Self {
        Self {
            locale: locale.to_string(),
            table: HashMap::new(),
        }
    }

    /// A table for `locale` preloaded with the built-in English texts.
    pub fn with_defaults(locale: &str) -> Result<Self> {
        let mut translator = Self::new(locale);
        translator.load_str(DEFAULT_LOCALE_TABLE)?;
        if locale != "en" {
            // Keep English as the base so a partial locale still reads well.
            let english = flatten_yaml(DEFAULT_LOCALE_TABLE)?;
            let prefix = format!("en.{}.", SCOPE);
            for (key, text) in english {
                if let Some(rest) = key.strip_prefix(&prefix) {
                    translator
                        .table
                        .entry(format!("{}.{}.{}", locale, SCOPE, rest))
                        .or_insert(text);
                }
            }
        }
        Ok(translator)
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Merge a YAML locale document; later loads win.
    pub fn load_str(&mut self, yaml: &str) -> Result<usize> {
        let entries = flatten_yaml(yaml)?;
        let count = entries.len();
        self.table.extend(entries);
        Ok(count)
    }

    pub fn load_file(&mut self, path: &Path) -> Result<usize> {
        debug!("Loading locale file: {}", path.display());
        let content = fs::read_to_string(path)?;
        self.load_str(&content).map_err(|e| match e {
            Error::SerializationError(msg) => {
                Error::SerializationError(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Load every locale file found under `dir`, in sorted path order.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize> {
        let scan = LocaleScanner::new(dir.to_path_buf())
            .scan()
            .map_err(|e| Error::InvalidArgument(e.to_string()))?;
        for warning in &scan.warnings {
            warn!("{}", warning);
        }
        for file in &scan.locale_files {
            self.load_file(file)?;
        }
        Ok(scan.locale_files.len())
    }

    /// Set a single template, relative to the locale scope
    pub fn insert(&mut self, key: &str, template: &str) {
        self.table.insert(self.full_key(key), template.to_string());
    }

    /// Look up `key` and interpolate `params` into it.
    pub fn lookup(&self, key: &str, params: &Params) -> Option<String> {
        self.table
            .get(&self.full_key(key))
            .map(|template| interpolate(template, params))
    }

    /// Look up `key`, or use the literal `default` on a miss.
    pub fn text(&self, key: &str, params: &Params, default: &str) -> String {
        self.lookup(key, params).unwrap_or_else(|| {
            debug!("Missing translation for {}, using literal", key);
            interpolate(default, params)
        })
    }

    /// Resolve display text for `name` in `bucket`, most specific key first:
    ///
    /// 1. `<entity>.<bucket>.<name>`
    /// 2. `<bucket>.<name>`
    /// 3. `<entity>.<bucket>.default`
    /// 4. `<bucket>.default`
    pub fn resolve(&self, bucket: &str, entity: &str, name: &str, params: &Params) -> Option<String> {
        let keys = [
            format!("{}.{}.{}", entity, bucket, name),
            format!("{}.{}", bucket, name),
            format!("{}.{}.default", entity, bucket),
            format!("{}.default", bucket),
        ];
        keys.iter().find_map(|key| self.lookup(key, params))
    }

    fn full_key(&self, key: &str) -> String {
        format!("{}.{}.{}", self.locale, SCOPE, key)
    }
}

/// Substitute `%{name}` placeholders. Unknown names are left untouched.
pub fn interpolate(template: &str, params: &Params) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("%{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let name = &after[..end];
                match params.get(name) {
                    Some(value) => out.push_str(value),
                    None => out.push_str(&rest[start..start + 2 + end + 1]),
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

fn flatten_yaml(yaml: &str) -> Result<Vec<(String, String)>> {
    let root: Value = serde_yaml::from_str(yaml)?;
    let mut entries = Vec::new();
    match root {
        Value::Mapping(_) => flatten_value("", &root, &mut entries),
        Value::Null => {}
        _ => {
            return Err(Error::SerializationError(
                "locale table must be a mapping".to_string(),
            ))
        }
    }
    Ok(entries)
}

fn flatten_value(prefix: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Mapping(map) => {
            for (key, child) in map {
                let key = match key {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    _ => continue,
                };
                let path = if prefix.is_empty() {
                    key
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten_value(&path, child, out);
            }
        }
        Value::String(s) => out.push((prefix.to_string(), s.clone())),
        Value::Number(n) => out.push((prefix.to_string(), n.to_string())),
        Value::Bool(b) => out.push((prefix.to_string(), b.to_string())),
        _ => {}
    }
}
