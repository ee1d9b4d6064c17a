//! # Transport
//!
//! The seam between the typed clients and the wire. A [`Transport`] takes one
//! [`ApiRequest`] and returns one [`ApiResponse`], whatever its status code.
//! Status interpretation happens one level up, in
//! [`HttpClient`](crate::HttpClient), so the production transport
//! ([`ReqwestTransport`](crate::http::ReqwestTransport)) and the test
//! transport ([`MockTransport`](crate::mock::MockTransport)) stay trivial.

use crate::error::ApiError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt::{self, Display};

/// HTTP verbs used by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        f.write_str(verb)
    }
}

/// A request relative to the API base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path below the base URL, always starting with `/`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    /// Bearer token for the `Authorization` header.
    pub bearer: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            bearer: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Attaches a JSON body.
    pub fn with_json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        let value =
            serde_json::to_value(body).map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        self.body = Some(value);
        Ok(self)
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }
}

/// Response body as received.
///
/// The backend answers with JSON for reads but frequently with plain text for
/// mutations ("Producto updated successfully with ID: ..."), so both are kept.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Empty,
    Json(Value),
    Text(String),
}

impl Payload {
    /// Classifies a raw body: JSON if it parses, text otherwise.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Payload::Empty;
        }
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => Payload::Json(value),
            Err(_) => Payload::Text(raw.to_owned()),
        }
    }

    /// The human-readable message carried by the body, if any.
    ///
    /// A JSON `message` field wins; a non-empty plain text body is taken as-is.
    pub fn message(&self) -> Option<String> {
        match self {
            Payload::Json(value) => value
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_owned),
            Payload::Text(text) => {
                let text = text.trim();
                (!text.is_empty()).then(|| text.to_owned())
            }
            Payload::Empty => None,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Payload::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Empty => Ok(()),
            Payload::Json(value) => write!(f, "{value}"),
            Payload::Text(text) => f.write_str(text),
        }
    }
}

/// A response as returned by the transport, unmodified.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub payload: Payload,
}

impl ApiResponse {
    pub fn new(status: u16, payload: Payload) -> Self {
        Self { status, payload }
    }

    pub fn json(status: u16, value: Value) -> Self {
        Self::new(status, Payload::Json(value))
    }

    pub fn text(status: u16, text: impl Into<String>) -> Self {
        Self::new(status, Payload::Text(text.into()))
    }

    pub fn empty(status: u16) -> Self {
        Self::new(status, Payload::Empty)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decodes the JSON body into `T`. An empty body decodes as `null`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        match &self.payload {
            Payload::Json(value) => Ok(T::deserialize(value)?),
            Payload::Empty => Ok(T::deserialize(Value::Null)?),
            Payload::Text(text) => Err(ApiError::Decode(format!(
                "expected a JSON body, got text: {text}"
            ))),
        }
    }

    /// Converts a failed response into [`ApiError::Status`].
    pub fn into_error(self) -> ApiError {
        ApiError::Status {
            status: self.status,
            message: self.payload.message(),
            body: self.payload.to_string(),
        }
    }
}

/// Sends one request and returns the response, whatever its status.
///
/// Implementations only fail with [`ApiError::Transport`] when no response
/// was obtained at all.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_parse() {
        assert_eq!(Payload::parse(""), Payload::Empty);
        assert_eq!(Payload::parse("{\"token\":\"abc\"}"), Payload::Json(json!({"token": "abc"})));
        assert_eq!(
            Payload::parse("Producto deleted successfully with ID: p1"),
            Payload::Text("Producto deleted successfully with ID: p1".into())
        );
    }

    #[test]
    fn test_payload_message() {
        assert_eq!(
            Payload::Json(json!({"message": "Rating must be between 1 and 5"})).message(),
            Some("Rating must be between 1 and 5".into())
        );
        assert_eq!(Payload::Json(json!({"id": "p1"})).message(), None);
        assert_eq!(Payload::Text("Invalid credentials\n".into()).message(), Some("Invalid credentials".into()));
        assert_eq!(Payload::Empty.message(), None);
    }

    #[test]
    fn test_into_error_keeps_status_and_message() {
        let err = ApiResponse::json(404, json!({"message": "Producto not found"})).into_error();
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.server_message(), Some("Producto not found"));
    }

    #[test]
    fn test_decode_text_body_is_an_error() {
        let response = ApiResponse::text(200, "ok");
        assert!(matches!(response.decode::<Value>(), Err(ApiError::Decode(_))));
        let empty = ApiResponse::empty(200);
        assert_eq!(empty.decode::<Option<String>>().unwrap(), None);
    }
}
