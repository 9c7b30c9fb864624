use crate::{
    clients::gemini::{ContentGenerator, UpstreamReply},
    config::GeminiConfig,
    error::{AppError, Result, UPSTREAM_FALLBACK_MESSAGE},
    models::{
        gemini::{ErrorEnvelope, GenerateContentRequest, GenerateContentResponse},
        query::ValidQuery,
    },
};
use serde_json::Value;

/// Ask Gemini to turn a natural-language question into a structured metric query.
///
/// Single upstream call, no retry. Every failure is returned as a tagged [`AppError`].
pub async fn translate<G>(config: &GeminiConfig, generator: &G, query: &ValidQuery) -> Result<Value>
where
    G: ContentGenerator + ?Sized,
{
    let Some(api_key) = config.api_key.as_deref() else {
        tracing::error!("API key is not configured on the server.");
        return Err(AppError::NotConfigured);
    };

    debug_log_preview(&query.system_prompt, &query.user_query);
    let payload = GenerateContentRequest::metric_query(&query.user_query, &query.system_prompt);

    let reply = generator
        .generate_content(&config.generate_content_url(), api_key, &payload)
        .await?;

    interpret_reply(&reply)
}

/// Map a raw upstream reply onto the generated JSON or one of the upstream error kinds.
///
/// The generated text is parsed but not checked against the schema; keys, their
/// order and value types reach the caller as the model produced them.
pub fn interpret_reply(reply: &UpstreamReply) -> Result<Value> {
    if !reply.is_success() {
        let envelope: ErrorEnvelope = serde_json::from_str(&reply.body)?;
        let message = envelope.message().unwrap_or(UPSTREAM_FALLBACK_MESSAGE);
        tracing::error!(status = reply.status, upstream_message = message, "Google API Error");
        return Err(AppError::Upstream(message.to_owned()));
    }

    let result: GenerateContentResponse = serde_json::from_str(&reply.body)?;
    let Some(text) = result.first_text() else {
        tracing::error!(candidates = result.candidates.len(), "AI response was empty or malformed");
        return Err(AppError::MalformedResponse);
    };

    Ok(serde_json::from_str(text)?)
}

fn debug_log_preview(system: &str, user: &str) {
    tracing::debug!(
        system_len = system.len(),
        user_len = user.len(),
        user_preview = %user.chars().take(80).collect::<String>(),
        "forwarding prompts to gemini"
    );
}
