use std::sync::OnceLock;

use metric_query_api::{
    clients::gemini::GeminiClient,
    http::{handler::handle, response::ApiResponse},
    telemetry::init_tracing,
    GeminiConfig,
};
use vercel_runtime::{run, Body, Error, Request, Response};

struct AppState {
    config: GeminiConfig,
    client: GeminiClient,
}

// Read once per cold start, shared read-only by every invocation.
static STATE: OnceLock<AppState> = OnceLock::new();

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing("info");

    let config = GeminiConfig::from_env();
    if config.api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY is not set; requests will be answered with a configuration error");
    }
    let _ = STATE.set(AppState { config, client: GeminiClient::new() });

    run(handler).await
}

pub async fn handler(req: Request) -> Result<Response<Body>, Error> {
    let Some(state) = STATE.get() else {
        return Err("generate-sql state used before initialisation".into());
    };

    let resp: ApiResponse = handle(req.method().as_str(), req.body(), &state.config, &state.client).await;
    tracing::info!(status = resp.status.as_u16(), "generate-sql handled");
    Ok(resp.into_response()?)
}
