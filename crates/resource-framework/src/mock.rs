//! # Mock Transport & Testing Guide
//!
//! [`MockTransport`] implements [`Transport`] entirely in memory. Tests queue
//! the requests they expect together with the response each should get, hand
//! the transport to an [`HttpClient`], and drive the real service clients and
//! stores against it. No server, no sockets, fully deterministic.
//!
//! ## When to use the mock vs a real backend
//!
//! | Feature | MockTransport | Real backend |
//! |---------|---------------|--------------|
//! | **Speed** | Instant (in-memory) | Network bound |
//! | **Determinism** | Responses are scripted | Depends on server data |
//! | **Error injection** | `return_status(500, ..)`, `return_transport_error(..)` | Hard |
//! | **Use case** | Stores, session flows, guards | End-to-end smoke runs |
//!
//! ## Example
//!
//! ```rust
//! use resource_framework::mock::MockTransport;
//! use resource_framework::{ApiRequest, SessionContext};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockTransport::new();
//!     mock.expect_get("/admin/categoria/getAll")
//!         .return_ok_json(json!([{ "id": "c1", "titulo": "Libros" }]));
//!     mock.expect_delete("/admin/categoria/delete/c1")
//!         .return_status(500, "Categoria in use");
//!
//!     let http = mock.http_client(SessionContext::with_token("abc"));
//!
//!     let list: serde_json::Value = http.fetch(ApiRequest::get("/admin/categoria/getAll")).await.unwrap();
//!     assert_eq!(list[0]["titulo"], "Libros");
//!
//!     let err = http.send(ApiRequest::delete("/admin/categoria/delete/c1")).await.unwrap_err();
//!     assert_eq!(err.server_message(), Some("Categoria in use"));
//!
//!     // The session token went out with every request.
//!     assert!(mock.requests().iter().all(|r| r.bearer.as_deref() == Some("abc")));
//!     mock.verify();
//! }
//! ```
//!
//! Requests are matched strictly in order on method and path (the query
//! string is recorded but not matched). A request with no matching
//! expectation panics, which fails the test at the offending call.

use crate::client::HttpClient;
use crate::error::ApiError;
use crate::session::SessionContext;
use crate::transport::{ApiRequest, ApiResponse, Method, Transport};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Arc;

struct Expectation {
    method: Method,
    path: String,
    response: Result<ApiResponse, String>,
}

/// Scripted in-memory transport.
///
/// Clones share the same queue and request log, so keep one clone in the
/// test for [`verify`](Self::verify) after moving another into a client.
#[derive(Clone, Default)]
pub struct MockTransport {
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
    requests: Arc<Mutex<Vec<ApiRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// An [`HttpClient`] sending through this transport.
    pub fn http_client(&self, session: SessionContext) -> HttpClient {
        HttpClient::new(Arc::new(self.clone()), session)
    }

    pub fn expect(&self, method: Method, path: impl Into<String>) -> ExpectationBuilder {
        ExpectationBuilder {
            method,
            path: path.into(),
            expectations: Arc::clone(&self.expectations),
        }
    }

    pub fn expect_get(&self, path: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Get, path)
    }

    pub fn expect_post(&self, path: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Post, path)
    }

    pub fn expect_put(&self, path: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Put, path)
    }

    pub fn expect_delete(&self, path: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Delete, path)
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().clone()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.requests.lock().last().cloned()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock();
        if !exps.is_empty() {
            let pending: Vec<String> = exps
                .iter()
                .map(|e| format!("{} {}", e.method, e.path))
                .collect();
            panic!(
                "Not all expectations were met. {} remaining: {:?}",
                exps.len(),
                pending
            );
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.requests.lock().push(request.clone());
        let expectation = self.expectations.lock().pop_front();

        match expectation {
            Some(exp) if exp.method == request.method && exp.path == request.path => {
                exp.response.map_err(ApiError::Transport)
            }
            Some(exp) => panic!(
                "Unexpected request {} {}; expected {} {}",
                request.method, request.path, exp.method, exp.path
            ),
            None => panic!(
                "Unexpected request {} {}; no expectations left",
                request.method, request.path
            ),
        }
    }
}

/// Builder returned by the `expect_*` methods; consumed by a `return_*` call.
#[must_use = "an expectation is only registered by a return_* call"]
pub struct ExpectationBuilder {
    method: Method,
    path: String,
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
}

impl ExpectationBuilder {
    fn push(self, response: Result<ApiResponse, String>) {
        self.expectations.lock().push_back(Expectation {
            method: self.method,
            path: self.path,
            response,
        });
    }

    pub fn return_response(self, response: ApiResponse) {
        self.push(Ok(response));
    }

    pub fn return_json(self, status: u16, body: Value) {
        self.push(Ok(ApiResponse::json(status, body)));
    }

    /// 200 with a JSON body.
    pub fn return_ok_json(self, body: Value) {
        self.return_json(200, body);
    }

    pub fn return_text(self, status: u16, text: impl Into<String>) {
        self.push(Ok(ApiResponse::text(status, text)));
    }

    /// Non-2xx with a `{"message": ..}` body.
    pub fn return_status(self, status: u16, message: &str) {
        self.return_json(status, json!({ "message": message }));
    }

    /// Status only, empty body.
    pub fn return_empty(self, status: u16) {
        self.push(Ok(ApiResponse::empty(status)));
    }

    /// No response at all (connection refused, timeout).
    pub fn return_transport_error(self, reason: impl Into<String>) {
        self.push(Err(reason.into()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_transport_with_expectations() {
        let mock = MockTransport::new();
        mock.expect_post("/login").return_ok_json(json!({ "token": "abc" }));
        mock.expect_get("/log_out").return_transport_error("connection refused");

        let response = mock.send(ApiRequest::post("/login")).await.unwrap();
        assert_eq!(response.decode::<Value>().unwrap()["token"], "abc");

        let err = mock.send(ApiRequest::get("/log_out")).await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));

        assert_eq!(mock.request_count(), 2);
        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Unexpected request")]
    async fn test_unexpected_request_panics() {
        let mock = MockTransport::new();
        mock.expect_get("/getUsers").return_ok_json(json!([]));
        let _ = mock.send(ApiRequest::get("/isLoggedIn")).await;
    }

    #[test]
    #[should_panic(expected = "Not all expectations were met")]
    fn test_verify_reports_pending() {
        let mock = MockTransport::new();
        mock.expect_get("/getUsers").return_ok_json(json!([]));
        mock.verify();
    }
}
