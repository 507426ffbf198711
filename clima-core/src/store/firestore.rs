use std::collections::BTreeMap;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Number, Value, json};

use super::{Document, DocumentStore, FieldFilter};

const FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";

/// [`DocumentStore`] backed by the Firestore REST API (`documents:runQuery`).
#[derive(Debug, Clone)]
pub struct FirestoreStore {
    project_id: String,
    database: String,
    api_key: Option<String>,
    http: Client,
}

impl FirestoreStore {
    pub fn new(project_id: String, database: String, api_key: Option<String>) -> Self {
        Self {
            project_id,
            database,
            api_key,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl DocumentStore for FirestoreStore {
    async fn query(
        &self,
        collection: &str,
        filters: &[FieldFilter],
    ) -> Result<Vec<Document>> {
        let url = format!(
            "{FIRESTORE_BASE_URL}/projects/{}/databases/{}/documents:runQuery",
            self.project_id, self.database,
        );

        let mut request = self.http.post(&url).json(&run_query_body(collection, filters));
        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key.as_str())]);
        }

        let res = request
            .send()
            .await
            .context("Failed to send request to Firestore (runQuery)")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read Firestore runQuery response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Firestore runQuery failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: Vec<FsRunQueryEntry> =
            serde_json::from_str(&body).context("Failed to parse Firestore runQuery JSON")?;

        Ok(collect_documents(parsed))
    }
}

/// Request body for `documents:runQuery`: the collection plus an AND of
/// equality filters on string fields.
fn run_query_body(collection: &str, filters: &[FieldFilter]) -> Value {
    let mut structured = json!({
        "from": [{ "collectionId": collection }],
    });

    if !filters.is_empty() {
        let field_filters: Vec<Value> = filters
            .iter()
            .map(|f| {
                json!({
                    "fieldFilter": {
                        "field": { "fieldPath": f.field },
                        "op": "EQUAL",
                        "value": { "stringValue": f.value },
                    }
                })
            })
            .collect();

        structured["where"] = json!({
            "compositeFilter": {
                "op": "AND",
                "filters": field_filters,
            }
        });
    }

    json!({ "structuredQuery": structured })
}

// runQuery streams one entry per result; entries carrying only a read
// timestamp have no `document` and are skipped.
#[derive(Debug, Deserialize)]
struct FsRunQueryEntry {
    document: Option<FsDocument>,
}

#[derive(Debug, Deserialize)]
struct FsDocument {
    #[serde(default)]
    fields: BTreeMap<String, FsValue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FsValue {
    double_value: Option<f64>,
    integer_value: Option<String>,
    string_value: Option<String>,
    boolean_value: Option<bool>,
}

impl FsValue {
    /// Collapse the wire representation into a plain JSON value.
    /// `integerValue` arrives as a decimal string and coerces to a number,
    /// so integer-typed readings still satisfy `Document::get_double`.
    fn into_json(self) -> Option<Value> {
        if let Some(d) = self.double_value {
            return Number::from_f64(d).map(Value::Number);
        }
        if let Some(i) = self.integer_value {
            return i.parse::<i64>().ok().map(|n| Value::Number(n.into()));
        }
        if let Some(s) = self.string_value {
            return Some(Value::String(s));
        }
        if let Some(b) = self.boolean_value {
            return Some(Value::Bool(b));
        }
        None
    }
}

fn collect_documents(entries: Vec<FsRunQueryEntry>) -> Vec<Document> {
    entries
        .into_iter()
        .filter_map(|entry| entry.document)
        .map(|doc| {
            let mut out = Document::new();
            for (name, value) in doc.fields {
                if let Some(v) = value.into_json() {
                    out.set(name, v);
                }
            }
            out
        })
        .collect()
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX { format!("{}...", &body[..MAX]) } else { body.to_string() }
}
