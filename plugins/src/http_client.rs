use async_trait::async_trait;
use finora_core::api::{ApiError, ApiRequest, ApiTransport, HttpMethod, TokenProvider};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

const BODY_PREVIEW_LIMIT: usize = 512;

/// Error bodies are kept for messages, capped at [`BODY_PREVIEW_LIMIT`] chars.
fn preview_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_string();
    }
    match trimmed.char_indices().nth(BODY_PREVIEW_LIMIT) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}

fn to_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
    }
}

/// Timeout is checked first: reqwest may also flag a timed-out call as a
/// connect or request error.
fn classify(err: reqwest::Error, url: &str, timeout_ms: u64) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout {
            url: url.to_string(),
            timeout_ms,
        }
    } else {
        ApiError::NetworkUnreachable {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}

/// JSON client for the Finora API.
///
/// The bearer token is read from the [`TokenProvider`] on every send, so a
/// login or logout takes effect on the next call without rebuilding the
/// client.
#[derive(Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    base_url: String,
    timeout_ms: u64,
    tokens: Arc<dyn TokenProvider>,
}

impl HttpClient {
    pub fn new(
        base_url: &str,
        timeout_ms: u64,
        tokens: Arc<dyn TokenProvider>,
    ) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .default_headers(headers)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_ms,
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn auth(
        &self,
        req: reqwest::RequestBuilder,
        authenticated: bool,
    ) -> reqwest::RequestBuilder {
        if !authenticated {
            return req;
        }
        match self.tokens.current_token().await {
            Some(token) if !token.trim().is_empty() => req.bearer_auth(token),
            _ => req,
        }
    }

    async fn parse_json_response(
        &self,
        resp: reqwest::Response,
        url: &str,
    ) -> Result<Value, ApiError> {
        let status = resp.status();
        let body = resp.text().await.map_err(|err| {
            if err.is_timeout() {
                classify(err, url, self.timeout_ms)
            } else {
                ApiError::Decode {
                    status: Some(status.as_u16()),
                    url: url.to_string(),
                    message: format!("failed to read response body: {}", err),
                }
            }
        })?;

        if !status.is_success() {
            return Err(ApiError::ServerError {
                status: status.as_u16(),
                body: preview_body(&body),
            });
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str::<Value>(&body).map_err(|err| ApiError::Decode {
            status: Some(status.as_u16()),
            url: url.to_string(),
            message: format!("{} | body={}", err, preview_body(&body)),
        })
    }

    async fn execute(&self, request: ApiRequest, url: &str) -> Result<Value, ApiError> {
        let mut req = self.http.request(to_method(request.method), url);
        if let Some(body) = &request.body {
            req = req.json(body);
        }
        let resp = self
            .auth(req, request.authenticated)
            .await
            .send()
            .await
            .map_err(|err| classify(err, url, self.timeout_ms))?;
        let status = resp.status();
        let value = self.parse_json_response(resp, url).await?;
        tracing::debug!(
            target: "finora.http",
            stage = "http.send.out",
            method = %request.method,
            status = %status
        );
        Ok(value)
    }
}

#[async_trait]
impl ApiTransport for HttpClient {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let url = self.url(&request.path);
        tracing::debug!(
            target: "finora.http",
            stage = "http.send.in",
            method = %request.method,
            url = %url,
            authenticated = request.authenticated,
            has_body = request.body.is_some()
        );
        let method = request.method;
        self.execute(request, &url).await.map_err(|err| {
            tracing::error!(
                target: "finora.http",
                stage = "http.send.error",
                method = %method,
                url = %url,
                kind = %err.kind(),
                status = ?err.status(),
                error = %err
            );
            err
        })
    }
}
