//! Documents and Snapshots

use serde::{Deserialize, Serialize};

use crate::collection::Collection;

/// Untyped document body: field name to JSON value.
///
/// Documents are deliberately schemaless. Every consumer in this system is
/// a JSON dump and the only structured writer merges a known record, so
/// unknown fields pass through untouched.
pub type Fields = serde_json::Map<String, serde_json::Value>;

/// A single document: store-assigned identifier plus its field mapping.
///
/// Serializes to the flat `{"id": ..., <fields>}` shape the live views
/// render, with the id alongside the document's own fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Store-assigned identifier.
    pub id: String,

    /// Document body.
    #[serde(flatten)]
    pub fields: Fields,
}

impl Document {
    /// Create a document with the given id and body.
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Merge semantics: fields named by the patch replace their current
    /// values; everything else stays.
    pub fn apply_merge(&mut self, patch: &Fields) {
        for (key, value) in patch {
            self.fields.insert(key.clone(), value.clone());
        }
    }
}

/// The full contents of one collection at a commit point.
///
/// Snapshots are whole-state: a subscriber replaces its view with
/// `documents`, never merges into it. Order is store insertion order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Which collection this snapshot describes.
    pub collection: Collection,

    /// Every current document, in store order.
    pub documents: Vec<Document>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(value: serde_json::Value) -> Fields {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_document_serializes_flat() {
        let doc = Document::new("a", fields(serde_json::json!({"title": "x"})));
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json, serde_json::json!({"id": "a", "title": "x"}));
    }

    #[test]
    fn test_merge_keeps_unrelated_fields() {
        let mut doc = Document::new("u42", fields(serde_json::json!({"name": "Ada", "plan": "free"})));
        doc.apply_merge(&fields(serde_json::json!({"plan": "team", "commands_limit": 1000})));

        assert_eq!(doc.fields["name"], "Ada");
        assert_eq!(doc.fields["plan"], "team");
        assert_eq!(doc.fields["commands_limit"], 1000);
    }
}
