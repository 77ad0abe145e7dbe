//! Pinecone vector store over the REST API

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use tracing::debug;

use crate::domain::vector_store::{
    IndexName, Namespace, QueryMatch, QueryParams, UpsertResult, VectorRecord, VectorStore,
    TEXT_METADATA_KEY,
};
use crate::domain::{ApiKey, DomainError};
use crate::infrastructure::http_client::HttpClientTrait;

pub const DEFAULT_CONTROL_PLANE_URL: &str = "https://api.pinecone.io";
pub const DEFAULT_API_VERSION: &str = "2024-07";

/// Connection settings for Pinecone
#[derive(Debug, Clone)]
pub struct PineconeConfig {
    pub control_plane_url: String,
    pub api_version: String,
    /// Data plane host; resolved from the control plane when absent
    pub index_host: Option<String>,
}

impl Default for PineconeConfig {
    fn default() -> Self {
        Self {
            control_plane_url: DEFAULT_CONTROL_PLANE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            index_host: None,
        }
    }
}

/// Pinecone-backed vector store bound to one index
#[derive(Debug)]
pub struct PineconeVectorStore<C: HttpClientTrait> {
    client: C,
    api_key: ApiKey,
    index: IndexName,
    control_plane_url: String,
    api_version: String,
    host: OnceCell<String>,
}

impl<C: HttpClientTrait> PineconeVectorStore<C> {
    pub fn new(client: C, api_key: ApiKey, index: IndexName, config: PineconeConfig) -> Self {
        let host = match config.index_host {
            Some(host) => OnceCell::new_with(Some(normalize_host(&host))),
            None => OnceCell::new(),
        };

        Self {
            client,
            api_key,
            index,
            control_plane_url: config.control_plane_url.trim_end_matches('/').to_string(),
            api_version: config.api_version,
            host,
        }
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("Api-Key", self.api_key.expose()),
            ("X-Pinecone-API-Version", self.api_version.as_str()),
            ("Content-Type", "application/json"),
        ]
    }

    /// Data plane base URL, looked up once per store
    async fn host(&self) -> Result<&str, DomainError> {
        let host = self
            .host
            .get_or_try_init(|| async {
                let url = format!("{}/indexes/{}", self.control_plane_url, self.index);
                let json = self.client.get_json(&url, self.headers()).await?;

                let description: IndexDescription = serde_json::from_value(json).map_err(|e| {
                    DomainError::vector_store(format!("Failed to parse index description: {}", e))
                })?;

                debug!(index = %self.index, host = %description.host, "Resolved Pinecone index host");
                Ok::<_, DomainError>(normalize_host(&description.host))
            })
            .await?;

        Ok(host.as_str())
    }

    async fn data_plane_url(&self, path: &str) -> Result<String, DomainError> {
        Ok(format!("{}{}", self.host().await?, path))
    }
}

fn normalize_host(host: &str) -> String {
    let host = host.trim_end_matches('/');

    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    }
}

#[async_trait]
impl<C: HttpClientTrait> VectorStore for PineconeVectorStore<C> {
    fn index_name(&self) -> &IndexName {
        &self.index
    }

    fn provider_type(&self) -> &'static str {
        "pinecone"
    }

    async fn upsert(
        &self,
        namespace: &Namespace,
        records: Vec<VectorRecord>,
    ) -> Result<UpsertResult, DomainError> {
        let url = self.data_plane_url("/vectors/upsert").await?;

        let vectors: Vec<PineconeVector> = records
            .into_iter()
            .map(|record| PineconeVector {
                metadata: record.stored_metadata(),
                id: record.id,
                values: record.values,
            })
            .collect();

        let body = serde_json::json!({
            "vectors": vectors,
            "namespace": namespace.as_str(),
        });

        let json = self.client.post_json(&url, self.headers(), &body).await?;

        let response: UpsertResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::vector_store(format!("Failed to parse upsert response: {}", e))
        })?;

        Ok(UpsertResult::new(response.upserted_count))
    }

    async fn query(
        &self,
        namespace: &Namespace,
        params: QueryParams,
    ) -> Result<Vec<QueryMatch>, DomainError> {
        let url = self.data_plane_url("/query").await?;

        let body = serde_json::json!({
            "namespace": namespace.as_str(),
            "vector": params.vector,
            "topK": params.top_k,
            "includeMetadata": true,
            "includeValues": false,
        });

        let json = self.client.post_json(&url, self.headers(), &body).await?;

        let response: QueryResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::vector_store(format!("Failed to parse query response: {}", e))
        })?;

        Ok(response
            .matches
            .into_iter()
            .map(|m| {
                let text = m
                    .metadata
                    .get(TEXT_METADATA_KEY)
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string();
                QueryMatch::new(m.id, text, m.score)
            })
            .collect())
    }

    async fn health_check(&self) -> Result<bool, DomainError> {
        let url = self.data_plane_url("/describe_index_stats").await?;

        self.client
            .post_json(&url, self.headers(), &serde_json::json!({}))
            .await?;

        Ok(true)
    }
}

// Pinecone API types

#[derive(Debug, Deserialize)]
struct IndexDescription {
    host: String,
}

#[derive(Debug, Serialize)]
struct PineconeVector {
    id: String,
    values: Vec<f32>,
    metadata: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpsertResponse {
    #[serde(default)]
    upserted_count: usize,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<PineconeMatch>,
}

#[derive(Debug, Deserialize)]
struct PineconeMatch {
    id: String,
    #[serde(default)]
    score: f32,
    #[serde(default)]
    metadata: HashMap<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ContextSelector;
    use crate::infrastructure::http_client::mock::MockHttpClient;
    use crate::infrastructure::http_client::HttpClient;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const DESCRIBE_URL: &str = "https://api.pinecone.io/indexes/jarvis";
    const HOST: &str = "https://jarvis-abc123.svc.us-east-1.pinecone.io";

    fn store(client: MockHttpClient) -> PineconeVectorStore<MockHttpClient> {
        PineconeVectorStore::new(
            client,
            ApiKey::new("pc-secret").unwrap(),
            IndexName::new("jarvis").unwrap(),
            PineconeConfig::default(),
        )
    }

    fn describe_response() -> serde_json::Value {
        serde_json::json!({
            "name": "jarvis",
            "dimension": 384,
            "metric": "cosine",
            "host": "jarvis-abc123.svc.us-east-1.pinecone.io",
            "status": { "ready": true, "state": "Ready" }
        })
    }

    #[tokio::test]
    async fn test_upsert_sends_text_metadata_and_namespace() {
        let client = MockHttpClient::new()
            .with_response(DESCRIBE_URL, describe_response())
            .with_response(format!("{HOST}/vectors/upsert"), serde_json::json!({"upsertedCount": 1}));
        let store = store(client);

        let result = store
            .upsert(
                &Namespace::from(ContextSelector::HrPolicy),
                vec![VectorRecord::new("id-1", vec![0.5, 0.25], "Vacation policy")],
            )
            .await
            .unwrap();

        assert_eq!(result.upserted, 1);

        let sent = store.client.requests_to(&format!("{HOST}/vectors/upsert"));
        assert_eq!(
            sent[0].body,
            Some(serde_json::json!({
                "vectors": [{
                    "id": "id-1",
                    "values": [0.5, 0.25],
                    "metadata": { "text": "Vacation policy" }
                }],
                "namespace": "HR Policy"
            }))
        );
        assert_eq!(sent[0].header("Api-Key"), Some("pc-secret"));
        assert_eq!(sent[0].header("X-Pinecone-API-Version"), Some(DEFAULT_API_VERSION));
    }

    #[tokio::test]
    async fn test_query_maps_matches_and_caches_host() {
        let client = MockHttpClient::new()
            .with_response(DESCRIBE_URL, describe_response())
            .with_response(
                format!("{HOST}/query"),
                serde_json::json!({
                    "matches": [
                        { "id": "a", "score": 0.92, "metadata": { "text": "15 days annual leave" } },
                        { "id": "b", "score": 0.41 }
                    ],
                    "namespace": "HR Policy"
                }),
            );
        let store = store(client);
        let namespace = Namespace::from(ContextSelector::HrPolicy);

        let matches = store
            .query(&namespace, QueryParams::new(vec![0.1, 0.2], 3))
            .await
            .unwrap();
        store
            .query(&namespace, QueryParams::new(vec![0.1, 0.2], 3))
            .await
            .unwrap();

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0], QueryMatch::new("a", "15 days annual leave", 0.92));
        assert_eq!(matches[1].text, "");

        assert_eq!(store.client.requests_to(DESCRIBE_URL).len(), 1);

        let sent = store.client.requests_to(&format!("{HOST}/query"));
        let body = sent[0].body.as_ref().unwrap();
        assert_eq!(body["topK"], 3);
        assert_eq!(body["namespace"], "HR Policy");
        assert_eq!(body["includeMetadata"], true);
    }

    #[tokio::test]
    async fn test_configured_host_skips_control_plane() {
        let client = MockHttpClient::new()
            .with_response("http://localhost:5081/query", serde_json::json!({"matches": []}));
        let store = PineconeVectorStore::new(
            client,
            ApiKey::new("pc-secret").unwrap(),
            IndexName::new("jarvis").unwrap(),
            PineconeConfig {
                index_host: Some("http://localhost:5081/".to_string()),
                ..PineconeConfig::default()
            },
        );

        let matches = store
            .query(&Namespace::from(ContextSelector::General), QueryParams::new(vec![1.0], 3))
            .await
            .unwrap();

        assert!(matches.is_empty());
        assert_eq!(store.client.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_index_error_is_propagated() {
        let client = MockHttpClient::new().with_error(DESCRIBE_URL, "HTTP 404: index not found");
        let store = store(client);

        let err = store
            .upsert(
                &Namespace::from(ContextSelector::General),
                vec![VectorRecord::new("id", vec![1.0], "text")],
            )
            .await
            .unwrap_err();

        assert!(err.to_string().contains("index not found"));
    }

    #[tokio::test]
    async fn test_health_check_against_live_http() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/indexes/jarvis"))
            .and(header("Api-Key", "pc-secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "host": server.uri()
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/describe_index_stats"))
            .and(body_json(serde_json::json!({})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "namespaces": { "HR Policy": { "vectorCount": 1 } },
                "dimension": 384,
                "totalVectorCount": 1
            })))
            .expect(2)
            .mount(&server)
            .await;

        let store = PineconeVectorStore::new(
            HttpClient::new(),
            ApiKey::new("pc-secret").unwrap(),
            IndexName::new("jarvis").unwrap(),
            PineconeConfig {
                control_plane_url: server.uri(),
                ..PineconeConfig::default()
            },
        );

        assert!(store.health_check().await.unwrap());
        assert!(store.health_check().await.unwrap());
    }

    #[test]
    fn test_normalize_host() {
        assert_eq!(normalize_host("idx.pinecone.io"), "https://idx.pinecone.io");
        assert_eq!(normalize_host("http://localhost:5081/"), "http://localhost:5081");
    }
}
