//! # Test Doubles
//!
//! [`MockTransport`] answers store requests from a queue of expectations, so
//! a page can be driven against a scripted backend. [`RecordingPrompt`] keeps
//! every alert and confirmation a page shows and answers confirmations from a
//! script.
//!
//! ```rust
//! use catalog_forms::mock::MockTransport;
//! use catalog_forms::store::{Method, ProductStore, TransportError};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockTransport::new();
//!     mock.expect(Method::Get, "/products")
//!         .return_err(TransportError::client("connection refused"));
//!     mock.expect(Method::Get, "/products")
//!         .return_ok(json!({ "products": [] }));
//!
//!     let store = ProductStore::new(Arc::new(mock.clone()));
//!     assert!(store.list().await.unwrap().is_empty());
//!     mock.verify();
//! }
//! ```

use crate::config::DEFAULT_API_URL;
use crate::prompt::Prompt;
use crate::store::{HttpRequest, Method, Transport, TransportError};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

struct Expectation {
    method: Method,
    path: String,
    response: Result<Value, TransportError>,
}

#[derive(Default)]
struct TransportState {
    expectations: VecDeque<Expectation>,
    requests: Vec<HttpRequest>,
    mismatches: Vec<String>,
}

/// A scripted [`Transport`]. Clones share the same script.
#[derive(Clone)]
pub struct MockTransport {
    base_url: String,
    state: Arc<Mutex<TransportState>>,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTransport {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_API_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            state: Arc::new(Mutex::new(TransportState::default())),
        }
    }

    /// Expects the next request to be `method path`. Expectations are consumed
    /// in the order they were added.
    pub fn expect(&mut self, method: Method, path: impl Into<String>) -> TransportExpectationBuilder {
        TransportExpectationBuilder {
            method,
            path: path.into(),
            state: self.state.clone(),
        }
    }

    /// Every request received so far, matched or not.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Verifies that every expectation was met and nothing unexpected arrived.
    pub fn verify(&self) {
        let state = self.state.lock().unwrap();
        if !state.mismatches.is_empty() {
            panic!("Unexpected requests: {:?}", state.mismatches);
        }
        if !state.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                state.expectations.len()
            );
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<Value, TransportError> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(request.clone());

        match state.expectations.pop_front() {
            Some(expected) if expected.method == request.method && expected.path == request.path => {
                expected.response
            }
            Some(expected) => {
                let mismatch = format!(
                    "expected {} {}, got {} {}",
                    expected.method, expected.path, request.method, request.path
                );
                state.mismatches.push(mismatch.clone());
                Err(TransportError::client(mismatch))
            }
            None => {
                let mismatch = format!("unexpected {} {}", request.method, request.path);
                state.mismatches.push(mismatch.clone());
                Err(TransportError::client(mismatch))
            }
        }
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Builder for one scripted response.
pub struct TransportExpectationBuilder {
    method: Method,
    path: String,
    state: Arc<Mutex<TransportState>>,
}

impl TransportExpectationBuilder {
    pub fn return_ok(self, body: Value) {
        self.push(Ok(body));
    }

    pub fn return_err(self, error: TransportError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Value, TransportError>) {
        self.state.lock().unwrap().expectations.push_back(Expectation {
            method: self.method,
            path: self.path,
            response,
        });
    }
}

#[derive(Default)]
struct PromptState {
    alerts: Vec<String>,
    confirms: Vec<String>,
    answers: VecDeque<bool>,
}

/// A [`Prompt`] that records what it was asked. Clones share the record.
#[derive(Clone)]
pub struct RecordingPrompt {
    default_answer: bool,
    state: Arc<Mutex<PromptState>>,
}

impl Default for RecordingPrompt {
    fn default() -> Self {
        Self::answering(true)
    }
}

impl RecordingPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    /// A prompt that answers `answer` once its scripted answers run out.
    pub fn answering(answer: bool) -> Self {
        Self {
            default_answer: answer,
            state: Arc::new(Mutex::new(PromptState::default())),
        }
    }

    /// Scripts the answer to the next unanswered confirmation.
    pub fn answer_next(&self, answer: bool) {
        self.state.lock().unwrap().answers.push_back(answer);
    }

    pub fn alerts(&self) -> Vec<String> {
        self.state.lock().unwrap().alerts.clone()
    }

    pub fn last_alert(&self) -> Option<String> {
        self.state.lock().unwrap().alerts.last().cloned()
    }

    pub fn confirms(&self) -> Vec<String> {
        self.state.lock().unwrap().confirms.clone()
    }
}

impl Prompt for RecordingPrompt {
    fn confirm(&self, message: &str) -> bool {
        let mut state = self.state.lock().unwrap();
        state.confirms.push(message.to_string());
        state.answers.pop_front().unwrap_or(self.default_answer)
    }

    fn alert(&self, message: &str) {
        self.state.lock().unwrap().alerts.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_mock_transport_answers_in_order() {
        let mut mock = MockTransport::new();
        mock.expect(Method::Get, "/products/1")
            .return_ok(json!({"products": {"id": "1"}}));
        mock.expect(Method::Delete, "/products/1")
            .return_err(TransportError::server(500, "boom"));

        let first = mock.send(HttpRequest::get("/products/1")).await.unwrap();
        assert_eq!(first, json!({"products": {"id": "1"}}));
        let second = mock.send(HttpRequest::delete("/products/1")).await;
        assert_eq!(second, Err(TransportError::server(500, "boom")));

        assert_eq!(mock.requests().len(), 2);
        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Unexpected requests")]
    async fn test_mock_transport_flags_mismatch() {
        let mut mock = MockTransport::new();
        mock.expect(Method::Get, "/products").return_ok(json!({"products": []}));

        let result = mock.send(HttpRequest::delete("/products/1")).await;
        assert!(result.is_err());
        mock.verify();
    }

    #[test]
    fn test_recording_prompt_scripted_answers() {
        let prompt = RecordingPrompt::answering(false);
        prompt.answer_next(true);
        assert!(prompt.confirm("first?"));
        assert!(!prompt.confirm("second?"));
        prompt.alert("done");

        assert_eq!(prompt.confirms(), vec!["first?", "second?"]);
        assert_eq!(prompt.last_alert().as_deref(), Some("done"));
    }
}
