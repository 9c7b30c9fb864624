use serde_json::{json, Value};
use vercel_runtime::{Body, Response, StatusCode};

use crate::error::{AppError, UNKNOWN_ERROR_MESSAGE};

/// Status and JSON body produced by the handler, before it is bound to a runtime response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiResponse {
    pub fn ok(body: Value) -> Self {
        Self { status: StatusCode::OK, body }
    }

    pub fn from_error(err: &AppError) -> Self {
        let (status, body) = error_response(err);
        Self { status, body }
    }

    pub fn into_response(self) -> anyhow::Result<Response<Body>> {
        let mut resp = json_response(self.status, &self.body)?;
        if self.status == StatusCode::METHOD_NOT_ALLOWED {
            resp.headers_mut().insert("Allow", "POST".parse()?);
        }
        Ok(resp)
    }
}

/// Every failure is reported to the caller as `{ "error": <message> }`.
pub fn error_response(err: &AppError) -> (StatusCode, Value) {
    let status = match err {
        AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        AppError::MissingFields(_) => StatusCode::BAD_REQUEST,
        AppError::NotConfigured
        | AppError::Upstream(_)
        | AppError::MalformedResponse
        | AppError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let mut message = err.to_string();
    if message.is_empty() {
        message = UNKNOWN_ERROR_MESSAGE.to_owned();
    }
    (status, json!({ "error": message }))
}

pub fn json_response<T: serde::Serialize>(status: StatusCode, value: &T) -> anyhow::Result<Response<Body>> {
    Ok(Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(serde_json::to_string(value)?.into())?)
}
