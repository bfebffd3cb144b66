//! The in-memory card name index and prefix search.

use std::collections::HashSet;

use serde_json::Value;

use crate::catalog::CatalogError;

/// Maximum number of names a single search returns.
pub const MAX_RESULTS: usize = 5;

/// Immutable set of card names in dataset order.
///
/// Names are stored alongside their lowercase form so a search only has to
/// lowercase the prefix.
#[derive(Debug, Clone, Default)]
pub struct CardIndex {
    entries: Vec<Entry>,
}

#[derive(Debug, Clone)]
struct Entry {
    name: String,
    folded: String,
}

impl CardIndex {
    /// An index with no cards. Every search against it returns nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build an index from names in iteration order. Later duplicates are
    /// dropped so each name keeps its first position.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let entries = names
            .into_iter()
            .map(Into::into)
            .filter(|name| seen.insert(name.clone()))
            .map(|name| Entry {
                folded: name.to_lowercase(),
                name,
            })
            .collect();
        Self { entries }
    }

    /// Build an index from a parsed dataset.
    ///
    /// An object contributes its keys (values are ignored); an array must
    /// contain only strings.
    pub fn from_json(value: Value) -> Result<Self, CatalogError> {
        match value {
            Value::Object(map) => Ok(Self::from_names(map.into_iter().map(|(name, _)| name))),
            Value::Array(items) => {
                let names = items
                    .into_iter()
                    .map(|item| match item {
                        Value::String(name) => Ok(name),
                        other => Err(CatalogError::Shape(format!(
                            "expected card name string, found {}",
                            json_kind(&other)
                        ))),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Self::from_names(names))
            }
            other => Err(CatalogError::Shape(format!(
                "expected object or array at top level, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// Parse raw dataset bytes into an index.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CatalogError> {
        let value: Value = serde_json::from_slice(bytes)?;
        Self::from_json(value)
    }

    /// Up to [`MAX_RESULTS`] names starting with `prefix`, case-insensitively,
    /// in dataset order. An absent or empty prefix matches nothing.
    pub fn search(&self, prefix: Option<&str>) -> Vec<String> {
        let prefix = match prefix {
            Some(p) if !p.is_empty() => p.to_lowercase(),
            _ => return Vec::new(),
        };

        self.entries
            .iter()
            .filter(|entry| entry.folded.starts_with(&prefix))
            .take(MAX_RESULTS)
            .map(|entry| entry.name.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry.name == name)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
