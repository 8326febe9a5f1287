use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Serialize, Serializer};

/// Success envelope wrapping every successful response
///
/// Rendered as `{"status": <code>, "message"?: <message>, "data": <payload>}`
/// with the same status on the HTTP response.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    #[serde(serialize_with = "serialize_status")]
    pub status: StatusCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

impl<T> Envelope<T> {
    /// Creates a 200 OK envelope
    pub fn ok(data: T) -> Self {
        Self {
            status: StatusCode::OK,
            message: None,
            data,
        }
    }

    /// Creates a 201 Created envelope
    pub fn created(data: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            message: None,
            data,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

fn serialize_status<S: Serializer>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u16(status.as_u16())
}
