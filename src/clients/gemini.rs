use async_trait::async_trait;
use reqwest::Client;

use crate::models::gemini::GenerateContentRequest;

/// Raw upstream answer: status plus body text, left uninterpreted so the
/// service layer owns the success/failure mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: String,
}

impl UpstreamReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport seam for the `generateContent` call.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate_content(
        &self,
        url: &str,
        api_key: &str,
        payload: &GenerateContentRequest,
    ) -> anyhow::Result<UpstreamReply>;
}

/// reqwest-backed generator. Uses the client's default timeouts and never retries.
#[derive(Debug, Clone, Default)]
pub struct GeminiClient {
    http: Client,
}

impl GeminiClient {
    pub fn new() -> Self {
        Self { http: Client::new() }
    }
}

#[async_trait]
impl ContentGenerator for GeminiClient {
    async fn generate_content(
        &self,
        url: &str,
        api_key: &str,
        payload: &GenerateContentRequest,
    ) -> anyhow::Result<UpstreamReply> {
        // The key travels in the query string, so transport errors drop the URL before surfacing.
        let response = self
            .http
            .post(url)
            .query(&[("key", api_key)])
            .json(payload)
            .send()
            .await
            .map_err(|e| e.without_url())?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| e.without_url())?;
        tracing::debug!(status, body_len = body.len(), "gemini responded");

        Ok(UpstreamReply { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MODEL_PATH: &str = "/v1beta/models/gemini-test:generateContent";

    fn url(server: &MockServer) -> String {
        format!("{}{}", server.uri(), MODEL_PATH)
    }

    #[tokio::test]
    async fn posts_payload_with_key_in_query() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .and(query_param("key", "fake-key"))
            .and(header("content-type", "application/json"))
            .and(body_partial_json(json!({
                "contents": [{ "parts": [{ "text": "orders in Bandung" }] }],
                "systemInstruction": { "parts": [{ "text": "route metrics" }] },
                "generationConfig": { "responseMimeType": "application/json" }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"candidates":[]}"#))
            .expect(1)
            .mount(&server)
            .await;

        let payload = GenerateContentRequest::metric_query("orders in Bandung", "route metrics");
        let reply = GeminiClient::new()
            .generate_content(&url(&server), "fake-key", &payload)
            .await
            .expect("reply");

        assert!(reply.is_success());
        assert_eq!(reply.body, r#"{"candidates":[]}"#);
    }

    #[tokio::test]
    async fn non_success_status_is_returned_not_raised() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(
                ResponseTemplate::new(429)
                    .set_body_json(json!({ "error": { "code": 429, "message": "quota exceeded" } })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let payload = GenerateContentRequest::metric_query("q", "s");
        let reply = GeminiClient::new()
            .generate_content(&url(&server), "fake-key", &payload)
            .await
            .expect("reply");

        assert_eq!(reply.status, 429);
        assert!(!reply.is_success());
        assert!(reply.body.contains("quota exceeded"));
    }

    #[tokio::test]
    async fn transport_error_does_not_leak_key() {
        // Nothing listens on port 9 locally; connection is refused.
        let payload = GenerateContentRequest::metric_query("q", "s");
        let err = GeminiClient::new()
            .generate_content("http://127.0.0.1:9/v1beta/models/m:generateContent", "secret-key", &payload)
            .await
            .expect_err("connection should fail");

        assert!(!err.to_string().contains("secret-key"));
    }
}
