//! Assistant endpoints backing the chat UI

pub mod chat;
pub mod knowledge;
pub mod session;

use axum::{
    routing::{get, post, put},
    Router,
};

use super::state::AppState;

/// Create the assistant API router
pub fn create_assistant_router() -> Router<AppState> {
    Router::new()
        // Sidebar settings
        .route(
            "/session",
            get(session::get_session)
                .put(session::configure_session)
                .delete(session::reset_session),
        )
        .route("/session/context", put(session::select_context))
        // Knowledge ingestion
        .route("/knowledge", post(knowledge::add_knowledge))
        // Conversation
        .route("/messages", get(chat::list_messages))
        .route("/chat", post(chat::chat))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::domain::{MockLlmProvider, CONFIGURATION_REQUIRED_NOTICE};
    use crate::infrastructure::services::{AnswerSettings, MockClientFactory, SessionService};

    fn app(llm: MockLlmProvider) -> (Router, Arc<MockClientFactory>) {
        let factory = Arc::new(MockClientFactory::new(llm));
        let service = SessionService::new(factory.clone(), "jarvis", AnswerSettings::default());
        let router = create_assistant_router().with_state(AppState::new(Arc::new(service)));

        (router, factory)
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        let body = match body {
            Some(value) => {
                builder = builder.header("content-type", "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, json)
    }

    async fn configured_app(llm: MockLlmProvider) -> (Router, Arc<MockClientFactory>) {
        let (app, factory) = app(llm);
        let (status, _) = send(
            &app,
            Method::PUT,
            "/session",
            Some(json!({"api_key": "pc-secret", "index_name": "jarvis"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        (app, factory)
    }

    #[tokio::test]
    async fn test_unconfigured_session_shows_notice() {
        let (app, _) = app(MockLlmProvider::new());

        let (status, body) = send(&app, Method::GET, "/session", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ready"], false);
        assert_eq!(body["index_name"], "jarvis");
        assert_eq!(body["context"], "General");
        assert_eq!(body["warning"], CONFIGURATION_REQUIRED_NOTICE);
        assert_eq!(
            body["contexts"],
            json!(["General", "HR Policy", "IT Support"])
        );
    }

    #[tokio::test]
    async fn test_actions_require_configuration() {
        let (app, factory) = app(MockLlmProvider::new().with_reply("never"));

        let (status, body) = send(
            &app,
            Method::POST,
            "/knowledge",
            Some(json!({"text": "Remote work is allowed"})),
        )
        .await;
        assert_eq!(status, StatusCode::PRECONDITION_REQUIRED);
        assert_eq!(body["error"]["code"], "configuration_required");

        let (status, _) = send(&app, Method::POST, "/chat", Some(json!({"question": "hi?"}))).await;
        assert_eq!(status, StatusCode::PRECONDITION_REQUIRED);

        assert!(factory.llm().requests().is_empty());
        let (_, messages) = send(&app, Method::GET, "/messages", None).await;
        assert_eq!(messages["messages"], json!([]));
    }

    #[tokio::test]
    async fn test_configure_never_echoes_key() {
        let (app, _) = app(MockLlmProvider::new());

        let (status, body) = send(
            &app,
            Method::PUT,
            "/session",
            Some(json!({"api_key": "pc-secret", "context": "IT Support"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ready"], true);
        assert_eq!(body["context"], "IT Support");
        assert!(body.get("warning").is_none());
        assert!(!body.to_string().contains("pc-secret"));
    }

    #[tokio::test]
    async fn test_invalid_index_name_is_rejected() {
        let (app, _) = app(MockLlmProvider::new());

        let (status, body) = send(
            &app,
            Method::PUT,
            "/session",
            Some(json!({"api_key": "pc-secret", "index_name": "Not_Valid"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["type"], "invalid_request_error");
    }

    #[tokio::test]
    async fn test_ingest_then_chat() {
        let (app, factory) =
            configured_app(MockLlmProvider::new().with_reply("You get **25** days.")).await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/knowledge",
            Some(json!({"text": "Employees get 25 days of leave.", "context": "HR Policy"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "stored");
        assert_eq!(body["namespace"], "HR Policy");
        assert_eq!(body["message"], "Stored in HR Policy memory!");

        let (status, body) = send(
            &app,
            Method::POST,
            "/chat",
            Some(json!({"question": "How much leave?"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["role"], "assistant");
        assert_eq!(body["content"], "You get **25** days.");
        assert!(body["html"].as_str().unwrap().contains("<strong>25</strong>"));

        let prompt = factory.llm().last_prompt().unwrap();
        assert!(prompt.contains("Employees get 25 days of leave."));
        assert!(prompt.ends_with("Question: How much leave?"));

        let (_, messages) = send(&app, Method::GET, "/messages", None).await;
        let messages = messages["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["role"], "user");
        assert_eq!(messages[0]["content"], "How much leave?");
        assert_eq!(messages[1]["role"], "assistant");
    }

    #[tokio::test]
    async fn test_empty_knowledge_is_skipped() {
        let (app, _) = configured_app(MockLlmProvider::new()).await;

        let (status, body) =
            send(&app, Method::POST, "/knowledge", Some(json!({"text": ""}))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "skipped"}));

        let (status, body) =
            send(&app, Method::POST, "/knowledge", Some(json!({"text": "   "}))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "stored");
    }

    #[tokio::test]
    async fn test_blank_question_is_rejected() {
        let (app, factory) = configured_app(MockLlmProvider::new().with_reply("x")).await;

        let (status, _) =
            send(&app, Method::POST, "/chat", Some(json!({"question": "  "}))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(factory.llm().requests().is_empty());
    }

    #[tokio::test]
    async fn test_model_failure_keeps_question_in_transcript() {
        let (app, _) =
            configured_app(MockLlmProvider::new().with_error("model not found")).await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/chat",
            Some(json!({"question": "Anyone there?"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["type"], "upstream_error");

        let (_, messages) = send(&app, Method::GET, "/messages", None).await;
        let messages = messages["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0]["role"], "user");
    }

    #[tokio::test]
    async fn test_select_context() {
        let (app, _) = app(MockLlmProvider::new());

        let (status, body) = send(
            &app,
            Method::PUT,
            "/session/context",
            Some(json!({"context": "HR Policy"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["context"], "HR Policy");

        let (status, body) = send(
            &app,
            Method::PUT,
            "/session/context",
            Some(json!({"context": "Finance"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "json_parse_error");
    }

    #[tokio::test]
    async fn test_reset_clears_configuration_and_transcript() {
        let (app, _) = configured_app(MockLlmProvider::new().with_reply("ok")).await;
        send(&app, Method::POST, "/chat", Some(json!({"question": "hello?"}))).await;

        let (status, body) = send(&app, Method::DELETE, "/session", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ready"], false);
        assert_eq!(body["message_count"], 0);
        assert_eq!(body["warning"], CONFIGURATION_REQUIRED_NOTICE);
    }
}
