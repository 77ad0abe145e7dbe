//! Vector store provider trait

use std::fmt::Debug;

use async_trait::async_trait;

use super::entity::{IndexName, Namespace};
use super::record::{QueryMatch, QueryParams, UpsertResult, VectorRecord};
use crate::domain::error::DomainError;

/// Provider trait for vector store operations
///
/// Implementations translate between this interface and a concrete backend.
/// Every call is scoped to a single namespace; matches are returned closest first.
#[async_trait]
pub trait VectorStore: Send + Sync + Debug {
    /// Index this handle is bound to
    fn index_name(&self) -> &IndexName;

    /// Get the provider type name
    fn provider_type(&self) -> &'static str;

    /// Write records into a namespace
    async fn upsert(
        &self,
        namespace: &Namespace,
        records: Vec<VectorRecord>,
    ) -> Result<UpsertResult, DomainError>;

    /// Find the nearest stored records within a namespace
    async fn query(
        &self,
        namespace: &Namespace,
        params: QueryParams,
    ) -> Result<Vec<QueryMatch>, DomainError>;

    /// Check that the index is reachable
    async fn health_check(&self) -> Result<bool, DomainError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Mock store returning fixed matches and recording writes
    #[derive(Debug)]
    pub struct MockVectorStore {
        index: IndexName,
        matches: Vec<QueryMatch>,
        upserts: Mutex<Vec<(String, VectorRecord)>>,
        queried_namespaces: Mutex<Vec<String>>,
        should_fail: AtomicBool,
    }

    impl MockVectorStore {
        pub fn new(index: IndexName) -> Self {
            Self {
                index,
                matches: Vec::new(),
                upserts: Mutex::new(Vec::new()),
                queried_namespaces: Mutex::new(Vec::new()),
                should_fail: AtomicBool::new(false),
            }
        }

        pub fn with_matches(mut self, matches: Vec<QueryMatch>) -> Self {
            self.matches = matches;
            self
        }

        pub fn set_should_fail(&self, fail: bool) {
            self.should_fail.store(fail, Ordering::SeqCst);
        }

        /// (namespace, record) pairs written so far
        pub fn upserts(&self) -> Vec<(String, VectorRecord)> {
            self.upserts.lock().unwrap().clone()
        }

        pub fn queried_namespaces(&self) -> Vec<String> {
            self.queried_namespaces.lock().unwrap().clone()
        }

        fn check_should_fail(&self) -> Result<(), DomainError> {
            if self.should_fail.load(Ordering::SeqCst) {
                return Err(DomainError::vector_store("Mock store configured to fail"));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl VectorStore for MockVectorStore {
        fn index_name(&self) -> &IndexName {
            &self.index
        }

        fn provider_type(&self) -> &'static str {
            "mock"
        }

        async fn upsert(
            &self,
            namespace: &Namespace,
            records: Vec<VectorRecord>,
        ) -> Result<UpsertResult, DomainError> {
            self.check_should_fail()?;

            let count = records.len();
            let mut upserts = self.upserts.lock().unwrap();

            for record in records {
                upserts.push((namespace.as_str().to_string(), record));
            }

            Ok(UpsertResult::new(count))
        }

        async fn query(
            &self,
            namespace: &Namespace,
            params: QueryParams,
        ) -> Result<Vec<QueryMatch>, DomainError> {
            self.check_should_fail()?;

            self.queried_namespaces
                .lock()
                .unwrap()
                .push(namespace.as_str().to_string());

            Ok(self
                .matches
                .iter()
                .take(params.top_k as usize)
                .cloned()
                .collect())
        }

        async fn health_check(&self) -> Result<bool, DomainError> {
            self.check_should_fail()?;
            Ok(true)
        }
    }
}
