use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};
use serde::de::DeserializeOwned;

use crate::api::errors::ApiError;

/// JSON body extractor that reads a missing body as an empty request
///
/// A request without a JSON content type, or with an empty body, yields
/// `T::default()`. Only a JSON body that fails to parse is rejected, with a
/// 400 in the usual `{status, message}` shape.
///
/// Usage:
/// ```rust,ignore
/// async fn handler(JsonOrEmpty(req): JsonOrEmpty<UpdateUserRequest>) { /* ... */ }
/// ```
#[derive(Debug)]
pub struct JsonOrEmpty<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonOrEmpty<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(is_json_content_type)
            .unwrap_or(false);

        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;

        if !is_json || body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }

        serde_json::from_slice(&body)
            .map(Self)
            .map_err(|e| ApiError::bad_request(format!("Malformed request body: {}", e)))
    }
}

fn is_json_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}
