use serde_json::Value;

use crate::{
    clients::gemini::ContentGenerator,
    config::GeminiConfig,
    error::{AppError, Result},
    http::response::ApiResponse,
    models::query::QueryRequest,
    services::metric_query,
};

/// Translate one inbound request into a response. Never fails: every error
/// becomes a JSON `{ "error": ... }` body with the matching status.
pub async fn handle<G>(method: &str, body: &[u8], config: &GeminiConfig, generator: &G) -> ApiResponse
where
    G: ContentGenerator + ?Sized,
{
    match process(method, body, config, generator).await {
        Ok(value) => ApiResponse::ok(value),
        Err(err) => {
            log_failure(&err);
            ApiResponse::from_error(&err)
        }
    }
}

async fn process<G>(method: &str, body: &[u8], config: &GeminiConfig, generator: &G) -> Result<Value>
where
    G: ContentGenerator + ?Sized,
{
    if method != "POST" {
        return Err(AppError::MethodNotAllowed);
    }

    let query = QueryRequest::from_body(body)
        .validate()
        .map_err(AppError::MissingFields)?;

    metric_query::translate(config, generator, &query).await
}

fn log_failure(err: &AppError) {
    match err {
        AppError::MethodNotAllowed => tracing::info!("rejected non-POST request"),
        AppError::MissingFields(fields) => tracing::warn!(missing = ?fields, "invalid request body"),
        AppError::Unexpected(e) => tracing::error!("Backend Error: {e:#}"),
        // logged where they were raised
        AppError::NotConfigured | AppError::Upstream(_) | AppError::MalformedResponse => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::gemini::UpstreamReply;
    use crate::models::gemini::GenerateContentRequest;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use vercel_runtime::StatusCode;

    struct Failing {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ContentGenerator for Failing {
        async fn generate_content(
            &self,
            _url: &str,
            _api_key: &str,
            _payload: &GenerateContentRequest,
        ) -> anyhow::Result<UpstreamReply> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            anyhow::bail!("error sending request")
        }
    }

    fn body() -> Vec<u8> {
        json!({ "userQuery": "q", "systemPrompt": "s" }).to_string().into_bytes()
    }

    #[tokio::test]
    async fn method_is_checked_before_body() {
        let generator = Failing { calls: AtomicUsize::new(0) };
        let resp = handle("GET", b"", &GeminiConfig::with_api_key("k"), &generator).await;
        assert_eq!(resp.status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.body, json!({ "error": "Method Not Allowed" }));
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn transport_failure_surfaces_its_message() {
        let generator = Failing { calls: AtomicUsize::new(0) };
        let resp = handle("POST", &body(), &GeminiConfig::with_api_key("k"), &generator).await;
        assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(resp.body, json!({ "error": "error sending request" }));
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }
}
