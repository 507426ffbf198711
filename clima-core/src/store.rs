use std::collections::BTreeMap;
use std::fmt::Debug;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::Config;
use crate::store::firestore::FirestoreStore;

pub mod firestore;

/// One document returned by the store: a bag of named field values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    fields: BTreeMap<String, Value>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: impl Into<String>, value: Value) {
        self.fields.insert(field.into(), value);
    }

    pub fn with(mut self, field: impl Into<String>, value: Value) -> Self {
        self.set(field, value);
        self
    }

    /// Numeric value of a field, or `None` when the field is absent or
    /// not a number.
    pub fn get_double(&self, field: &str) -> Option<f64> {
        match self.fields.get(field)? {
            Value::Number(n) => n.as_f64(),
            _ => None,
        }
    }
}

/// Equality predicate on a single document field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFilter {
    pub field: String,
    pub value: String,
}

impl FieldFilter {
    pub fn equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self { field: field.into(), value: value.into() }
    }
}

/// Read-only access to a remote document collection.
///
/// A single capability: an equality-filtered read that resolves exactly
/// once, with the matching documents or an error.
#[async_trait]
pub trait DocumentStore: Send + Sync + Debug {
    async fn query(
        &self,
        collection: &str,
        filters: &[FieldFilter],
    ) -> anyhow::Result<Vec<Document>>;
}

/// Construct the configured store.
pub fn store_from_config(config: &Config) -> anyhow::Result<Box<dyn DocumentStore>> {
    let project_id = config.require_project_id()?;

    let store = FirestoreStore::new(
        project_id.to_owned(),
        config.database.clone(),
        config.api_key.clone(),
    );

    Ok(Box::new(store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn get_double_reads_numbers() {
        let doc = Document::new()
            .with("temperature", json!(23.7))
            .with("humidity", json!(55));

        assert_eq!(doc.get_double("temperature"), Some(23.7));
        assert_eq!(doc.get_double("humidity"), Some(55.0));
    }

    #[test]
    fn get_double_is_none_for_missing_or_non_numeric() {
        let doc = Document::new().with("note", json!("frio"));

        assert_eq!(doc.get_double("temperature"), None);
        assert_eq!(doc.get_double("note"), None);
    }

    #[test]
    fn store_from_config_errors_when_project_missing() {
        let cfg = Config::default();
        let err = store_from_config(&cfg).unwrap_err();

        assert!(err.to_string().contains("No Firebase project configured"));
    }

    #[test]
    fn store_from_config_builds_store_when_configured() {
        let mut cfg = Config::default();
        cfg.project_id = Some("demo-project".to_string());

        assert!(store_from_config(&cfg).is_ok());
    }
}
