//! Chunk records and the two lookup views the resolvers read.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use smol_str::{SmolStr, ToSmolStr};

use crate::chunk::{self, ChunkType};
use crate::error::ChunkRefError;

/// Chunk id → full record.
pub type IdIndex = HashMap<SmolStr, ChunkRecord>;

/// Canonical type → (number → chunk id).
pub type TypeNumberIndex = HashMap<SmolStr, HashMap<SmolStr, SmolStr>>;

/// One chunk as delivered by document ingestion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChunkRecord {
    #[serde(default, deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub id: Option<SmolStr>,
    #[serde(default, deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub chunk_type: Option<SmolStr>,
    /// Dotted numeral such as `3.2.1`. Compared as a string, never numerically.
    #[serde(default, deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub number: Option<SmolStr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Everything else ingestion attached, kept for display.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl ChunkRecord {
    pub fn new(id: &str, chunk_type: &str, number: &str) -> Self {
        Self {
            id: Some(id.into()),
            chunk_type: Some(chunk_type.into()),
            number: Some(number.into()),
            ..Default::default()
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn parsed_type(&self) -> Option<ChunkType> {
        self.chunk_type.as_deref().and_then(ChunkType::parse)
    }
}

/// Strings and numbers both come through as strings; empty strings,
/// `null` and anything else count as absent.
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<SmolStr>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) if !s.is_empty() => Some(SmolStr::from(s)),
        Some(Value::Number(n)) => Some(n.to_smolstr()),
        _ => None,
    })
}

/// Read-only lookup views over a document's chunks.
#[derive(Debug, Clone, Default)]
pub struct ChunkRegistry {
    by_id: IdIndex,
    by_type_and_number: TypeNumberIndex,
}

impl ChunkRegistry {
    pub fn from_records(records: impl IntoIterator<Item = ChunkRecord>) -> Self {
        let mut registry = Self::default();
        registry.merge_records(records);
        registry
    }

    /// Parses a JSON array of chunk records.
    pub fn from_json(json: &str) -> Result<Self, ChunkRefError> {
        let records: Vec<ChunkRecord> = serde_json::from_str(json)?;
        Ok(Self::from_records(records))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ChunkRefError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| ChunkRefError::io(path, e))?;
        let registry = Self::from_json(&json)?;
        tracing::debug!(
            "loaded {} chunks from {}",
            registry.len(),
            path.display()
        );
        Ok(registry)
    }

    /// Folds more records into the registry. Later records replace earlier
    /// ones with the same id or the same (type, number).
    pub fn merge_records(&mut self, records: impl IntoIterator<Item = ChunkRecord>) {
        for record in records {
            let Some(id) = record.id.clone() else {
                tracing::trace!("skipping chunk without id");
                continue;
            };
            if let (Some(ty), Some(number)) = (&record.chunk_type, &record.number) {
                let key = SmolStr::from(chunk::type_key(ty));
                let previous = self
                    .by_type_and_number
                    .entry(key)
                    .or_default()
                    .insert(number.clone(), id.clone());
                if let Some(previous) = previous.filter(|p| *p != id) {
                    tracing::debug!("{ty} {number}: {previous} replaced by {id}");
                }
            } else {
                tracing::trace!("chunk {id} has no type or number, indexed by id only");
            }
            self.by_id.insert(id, record);
        }
    }

    pub fn by_id(&self) -> &IdIndex {
        &self.by_id
    }

    pub fn by_type_and_number(&self) -> &TypeNumberIndex {
        &self.by_type_and_number
    }

    pub fn get(&self, id: &str) -> Option<&ChunkRecord> {
        self.by_id.get(id)
    }

    pub fn lookup(&self, chunk_type: &str, number: &str) -> Option<&SmolStr> {
        find_id(&self.by_type_and_number, chunk_type, number)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Looks up the chunk id for a (type, number) pair. `chunk_type` is
/// normalized the same way the index keys were.
pub fn find_id<'a>(
    index: &'a TypeNumberIndex,
    chunk_type: &str,
    number: &str,
) -> Option<&'a SmolStr> {
    index.get(chunk::type_key(chunk_type).as_ref())?.get(number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexes_by_id_and_by_type_and_number() {
        let registry = ChunkRegistry::from_records([
            ChunkRecord::new("c9", "Theorem", "3.2"),
            ChunkRecord::new("c10", "lemma", "3.3"),
        ]);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.lookup("theorem", "3.2").map(|s| s.as_str()), Some("c9"));
        assert_eq!(registry.lookup("LEMMA", "3.3").map(|s| s.as_str()), Some("c10"));
        assert_eq!(registry.lookup("theorem", "3.20"), None);
        assert_eq!(registry.get("c9").and_then(|r| r.parsed_type()), Some(ChunkType::Theorem));
    }

    #[test]
    fn skips_records_without_id() {
        let registry = ChunkRegistry::from_records([ChunkRecord {
            id: None,
            chunk_type: Some("theorem".into()),
            number: Some("1".into()),
            ..Default::default()
        }]);
        assert!(registry.is_empty());
        assert!(registry.by_type_and_number().is_empty());
    }

    #[test]
    fn records_without_number_are_id_only() {
        let registry = ChunkRegistry::from_records([ChunkRecord {
            id: Some("c1".into()),
            chunk_type: Some("remark".into()),
            ..Default::default()
        }]);
        assert!(registry.get("c1").is_some());
        assert!(registry.by_type_and_number().is_empty());
    }

    #[test]
    fn numbers_are_exact_string_keys() {
        let registry = ChunkRegistry::from_records([ChunkRecord::new("a", "theorem", "3.10")]);
        assert!(registry.lookup("theorem", "3.1").is_none());
        assert!(registry.lookup("theorem", "3.10").is_some());
    }

    #[test]
    fn merge_replaces_duplicates() {
        let mut registry = ChunkRegistry::from_records([ChunkRecord::new("a", "theorem", "1")]);
        registry.merge_records([ChunkRecord::new("b", "theorem", "1")]);
        assert_eq!(registry.lookup("theorem", "1").map(|s| s.as_str()), Some("b"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn legacy_type_spelling_is_canonicalized() {
        let registry = ChunkRegistry::from_records([ChunkRecord::new("d1", "defination", "2.1")]);
        assert_eq!(registry.lookup("definition", "2.1").map(|s| s.as_str()), Some("d1"));
    }

    #[test]
    fn parses_json_with_numeric_numbers_and_extra_fields() {
        let registry = ChunkRegistry::from_json(
            r#"[
                {"id": "c1", "chunk_type": "theorem", "number": 3, "summary": "main", "page": 4},
                {"id": "", "chunk_type": "lemma", "number": "1"},
                {"id": "c2", "chunk_type": "lemma", "number": ""}
            ]"#,
        )
        .unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.lookup("theorem", "3").map(|s| s.as_str()), Some("c1"));
        assert!(registry.lookup("lemma", "1").is_none());
        let c1 = registry.get("c1").unwrap();
        assert_eq!(c1.summary.as_deref(), Some("main"));
        assert_eq!(c1.extra.get("page"), Some(&Value::from(4)));
    }

    #[test]
    fn rejects_non_array_json() {
        assert!(matches!(
            ChunkRegistry::from_json(r#"{"id": "c1"}"#),
            Err(ChunkRefError::Registry(_))
        ));
    }
}
