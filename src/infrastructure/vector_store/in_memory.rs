//! In-memory vector store for development and testing

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::embedding::cosine_similarity;
use crate::domain::vector_store::{
    IndexName, Namespace, QueryMatch, QueryParams, UpsertResult, VectorRecord, VectorStore,
};
use crate::domain::DomainError;

#[derive(Debug, Clone)]
struct StoredVector {
    id: String,
    values: Vec<f32>,
    text: String,
}

type NamespaceMap = HashMap<String, Vec<StoredVector>>;

/// Process-wide storage shared by every in-memory store handle
///
/// Handles are rebuilt on each reconfiguration; the registry outlives them so
/// ingested knowledge survives a credential change.
#[derive(Debug, Clone, Default)]
pub struct InMemoryVectorRegistry {
    indexes: Arc<RwLock<HashMap<IndexName, NamespaceMap>>>,
}

impl InMemoryVectorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a store bound to one index
    pub fn store(&self, index: IndexName) -> InMemoryVectorStore {
        InMemoryVectorStore {
            index,
            indexes: Arc::clone(&self.indexes),
        }
    }
}

/// In-memory vector store using cosine similarity
#[derive(Debug)]
pub struct InMemoryVectorStore {
    index: IndexName,
    indexes: Arc<RwLock<HashMap<IndexName, NamespaceMap>>>,
}

impl InMemoryVectorStore {
    /// Create a standalone store with its own storage
    pub fn new(index: IndexName) -> Self {
        InMemoryVectorRegistry::new().store(index)
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    fn index_name(&self) -> &IndexName {
        &self.index
    }

    fn provider_type(&self) -> &'static str {
        "in_memory"
    }

    async fn upsert(
        &self,
        namespace: &Namespace,
        records: Vec<VectorRecord>,
    ) -> Result<UpsertResult, DomainError> {
        let mut indexes = self.indexes.write().await;
        let vectors = indexes
            .entry(self.index.clone())
            .or_default()
            .entry(namespace.as_str().to_string())
            .or_default();

        let count = records.len();

        for record in records {
            let stored = StoredVector {
                id: record.id,
                values: record.values,
                text: record.text,
            };

            match vectors.iter_mut().find(|v| v.id == stored.id) {
                Some(existing) => *existing = stored,
                None => vectors.push(stored),
            }
        }

        Ok(UpsertResult::new(count))
    }

    async fn query(
        &self,
        namespace: &Namespace,
        params: QueryParams,
    ) -> Result<Vec<QueryMatch>, DomainError> {
        let indexes = self.indexes.read().await;

        let Some(vectors) = indexes
            .get(&self.index)
            .and_then(|namespaces| namespaces.get(namespace.as_str()))
        else {
            return Ok(Vec::new());
        };

        let mut matches: Vec<QueryMatch> = vectors
            .iter()
            .map(|v| QueryMatch::new(&v.id, &v.text, cosine_similarity(&params.vector, &v.values)))
            .collect();

        // Stable sort keeps insertion order on equal scores
        matches.sort_by(|a, b| b.score.total_cmp(&a.score));
        matches.truncate(params.top_k as usize);

        Ok(matches)
    }

    async fn health_check(&self) -> Result<bool, DomainError> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ContextSelector;

    fn index() -> IndexName {
        IndexName::new("jarvis").unwrap()
    }

    fn hr() -> Namespace {
        Namespace::from(ContextSelector::HrPolicy)
    }

    fn it() -> Namespace {
        Namespace::from(ContextSelector::ItSupport)
    }

    #[tokio::test]
    async fn test_query_orders_by_similarity() {
        let store = InMemoryVectorStore::new(index());

        store
            .upsert(
                &hr(),
                vec![
                    VectorRecord::new("far", vec![0.0, 1.0], "far"),
                    VectorRecord::new("near", vec![1.0, 0.1], "near"),
                    VectorRecord::new("exact", vec![1.0, 0.0], "exact"),
                ],
            )
            .await
            .unwrap();

        let matches = store.query(&hr(), QueryParams::new(vec![1.0, 0.0], 3)).await.unwrap();

        let ids: Vec<_> = matches.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["exact", "near", "far"]);
        assert!(matches[0].score >= matches[1].score);
    }

    #[tokio::test]
    async fn test_query_respects_top_k() {
        let store = InMemoryVectorStore::new(index());
        let records = (0..5)
            .map(|i| VectorRecord::new(format!("id-{i}"), vec![1.0, i as f32], format!("doc {i}")))
            .collect();

        store.upsert(&hr(), records).await.unwrap();

        let matches = store.query(&hr(), QueryParams::new(vec![1.0, 0.0], 3)).await.unwrap();
        assert_eq!(matches.len(), 3);
    }

    #[tokio::test]
    async fn test_namespaces_are_isolated() {
        let store = InMemoryVectorStore::new(index());

        store
            .upsert(&hr(), vec![VectorRecord::new("a", vec![1.0, 0.0], "Vacation policy")])
            .await
            .unwrap();

        let matches = store.query(&it(), QueryParams::new(vec![1.0, 0.0], 3)).await.unwrap();
        assert!(matches.is_empty());
    }

    #[tokio::test]
    async fn test_equal_scores_keep_insertion_order() {
        let store = InMemoryVectorStore::new(index());

        store
            .upsert(
                &hr(),
                vec![
                    VectorRecord::new("first", vec![1.0, 0.0], "same"),
                    VectorRecord::new("second", vec![1.0, 0.0], "same"),
                ],
            )
            .await
            .unwrap();

        let matches = store.query(&hr(), QueryParams::new(vec![1.0, 0.0], 3)).await.unwrap();
        assert_eq!(matches[0].id, "first");
        assert_eq!(matches[1].id, "second");
    }

    #[tokio::test]
    async fn test_upsert_same_id_replaces() {
        let store = InMemoryVectorStore::new(index());

        store
            .upsert(&hr(), vec![VectorRecord::new("a", vec![1.0], "old")])
            .await
            .unwrap();
        store
            .upsert(&hr(), vec![VectorRecord::new("a", vec![1.0], "new")])
            .await
            .unwrap();

        let matches = store.query(&hr(), QueryParams::new(vec![1.0], 3)).await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].text, "new");
    }

    #[tokio::test]
    async fn test_registry_shares_storage_between_handles() {
        let registry = InMemoryVectorRegistry::new();

        registry
            .store(index())
            .upsert(&hr(), vec![VectorRecord::new("a", vec![1.0], "kept")])
            .await
            .unwrap();

        let matches = registry
            .store(index())
            .query(&hr(), QueryParams::new(vec![1.0], 3))
            .await
            .unwrap();
        assert_eq!(matches[0].text, "kept");

        let other = registry
            .store(IndexName::new("other").unwrap())
            .query(&hr(), QueryParams::new(vec![1.0], 3))
            .await
            .unwrap();
        assert!(other.is_empty());
    }
}
