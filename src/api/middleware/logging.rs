//! Request/response logging middleware with sensitive data redaction

use std::time::Instant;

use axum::{
    body::{to_bytes, Body},
    extract::MatchedPath,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, Level};

use super::security::MAX_BODY_SIZE;

/// Longest request body excerpt written to debug logs
const MAX_LOGGED_BODY: usize = 2048;

const SENSITIVE_FIELDS: &[&str] = &[
    "api_key",
    "apiKey",
    "password",
    "secret",
    "token",
    "access_token",
    "authorization",
];

static SENSITIVE_FIELD_PATTERNS: Lazy<Vec<(Regex, String)>> = Lazy::new(|| {
    SENSITIVE_FIELDS
        .iter()
        .filter_map(|field| {
            Regex::new(&format!(r#""{}"\s*:\s*"(?:[^"\\]|\\.)*""#, field))
                .ok()
                .map(|re| (re, format!(r#""{}":"[REDACTED]""#, field)))
        })
        .collect()
});

/// Middleware to log HTTP requests and responses with sensitive data redaction.
/// Note: This middleware does NOT create its own tracing span since `TraceLayer`
/// from tower-http already handles span creation.
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = extract_path(&request);
    let request_id = extract_request_id(&request);

    info!(
        method = %method,
        path = %path,
        request_id = %request_id,
        headers = %redact_headers(&request),
        "Incoming request"
    );

    let request = if tracing::enabled!(Level::DEBUG) && is_json(&request) {
        match log_json_body(request, &request_id).await {
            Ok(request) => request,
            Err(response) => return response,
        }
    } else {
        request
    };

    let response = next.run(request).await;
    let status = response.status();

    info!(
        method = %method,
        path = %path,
        status = %status.as_u16(),
        duration_ms = %start.elapsed().as_millis(),
        request_id = %request_id,
        "Request completed"
    );

    response
}

/// Buffer the body, log a redacted excerpt, and hand back an equivalent request
async fn log_json_body(request: Request<Body>, request_id: &str) -> Result<Request<Body>, Response> {
    let (parts, body) = request.into_parts();

    let bytes = to_bytes(body, MAX_BODY_SIZE)
        .await
        .map_err(|_| StatusCode::PAYLOAD_TOO_LARGE.into_response())?;

    let text = String::from_utf8_lossy(&bytes);
    debug!(
        request_id = %request_id,
        body = %truncate_for_log(&redact_json_sensitive_fields(&text), MAX_LOGGED_BODY),
        "Request body"
    );

    Ok(Request::from_parts(parts, Body::from(bytes)))
}

fn is_json(request: &Request<Body>) -> bool {
    request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}

fn extract_path(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string())
}

fn extract_request_id(request: &Request<Body>) -> String {
    request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}

/// Redact sensitive headers for logging
fn redact_headers(request: &Request<Body>) -> String {
    let mut parts = Vec::new();

    for (name, value) in request.headers() {
        let name_str = name.as_str().to_lowercase();

        if !should_log_header(&name_str) {
            continue;
        }

        let value_str = if is_sensitive_header(&name_str) {
            "[REDACTED]".to_string()
        } else {
            value.to_str().unwrap_or("[invalid]").to_string()
        };

        parts.push(format!("{}={}", name_str, value_str));
    }

    parts.join(", ")
}

/// Check if a header contains sensitive information
fn is_sensitive_header(name: &str) -> bool {
    matches!(
        name,
        "authorization" | "api-key" | "x-api-key" | "cookie" | "set-cookie" | "proxy-authorization"
    )
}

/// Check if a header should be logged
fn should_log_header(name: &str) -> bool {
    matches!(
        name,
        "content-type"
            | "content-length"
            | "accept"
            | "user-agent"
            | "x-request-id"
            | "x-forwarded-for"
            | "x-real-ip"
            | "authorization"
            | "api-key"
            | "x-api-key"
    )
}

/// Redact sensitive values in a JSON string
pub fn redact_json_sensitive_fields(json: &str) -> String {
    let mut result = json.to_string();

    for (pattern, replacement) in SENSITIVE_FIELD_PATTERNS.iter() {
        result = pattern
            .replace_all(&result, replacement.as_str())
            .into_owned();
    }

    result
}

/// Truncate long strings for logging
pub fn truncate_for_log(s: &str, max_len: usize) -> String {
    match s.char_indices().nth(max_len) {
        None => s.to_string(),
        Some((cut, _)) => {
            let rest = s[cut..].chars().count();
            format!("{}...[truncated {} chars]", &s[..cut], rest)
        }
    }
}
