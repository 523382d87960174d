//! # Mock Framework & Testing Guide
//!
//! [`MockPage<P>`] hands out a real [`PageClient<P>`] whose requests are answered
//! from a queue of expectations instead of a running page. Use it to test code
//! that *drives* a page (typed clients, navigation) without building the page.
//!
//! | Feature | MockPage | Real PageActor |
//! |---------|----------|----------------|
//! | **Speed** | Instant (in-memory) | Fast (but involves tokio spawn) |
//! | **Determinism** | 100% Deterministic | Subject to timers |
//! | **State** | No real form (expectations) | Real form and observers |
//! | **Use Case** | Testing logic *around* the client | Testing the page itself |
//! | **Error Injection** | Easy (`return_err`) | Hard (requires specific state) |
//!
//! ## Testing Failure Scenarios
//!
//! ```rust
//! use form_framework::mock::MockPage;
//! use form_framework::{FormError, FormEvent, FormGroup, FormPage, Observers};
//! use async_trait::async_trait;
//!
//! struct Survey { form: FormGroup }
//! #[derive(Debug, thiserror::Error)] #[error("survey")] struct SurveyError;
//!
//! #[async_trait]
//! impl FormPage for Survey {
//!     type Reaction = (); type Command = (); type Reply = bool; type View = ();
//!     type Context = (); type Error = SurveyError;
//!     fn form(&self) -> &FormGroup { &self.form }
//!     fn form_mut(&mut self) -> &mut FormGroup { &mut self.form }
//!     fn observe(&self, _: &mut Observers<()>) {}
//!     fn view(&self) {}
//!     async fn react(&mut self, _: (), _: &FormEvent, _: &()) -> Result<(), SurveyError> { Ok(()) }
//!     async fn handle_command(&mut self, _: (), _: &()) -> Result<bool, SurveyError> { Ok(true) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockPage::<Survey>::new();
//!     let client = mock.client();
//!
//!     // Simulate a page that went away
//!     mock.expect_command().return_err(FormError::PageDropped);
//!
//!     let result = client.command(()).await;
//!     assert!(matches!(result, Err(FormError::PageDropped)));
//!     mock.verify();
//! }
//! ```
//!
//! ## Mocking Utilities
//!
//! Use [`create_mock_client`] to get a client and the raw request receiver, then
//! answer requests by hand with the `expect_*` helpers; or use the fluent
//! [`MockPage`] API.

use crate::client::PageClient;
use crate::error::FormError;
use crate::message::{PageRequest, Response};
use crate::page::FormPage;
use crate::value::FieldValue;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected request and the response to give it.
enum Expectation<P: FormPage> {
    Input {
        field: Option<String>,
        response: Result<(), FormError>,
    },
    Blur,
    Command {
        response: Result<P::Reply, FormError>,
    },
    View {
        response: Result<P::View, FormError>,
    },
    Teardown,
}

type Expectations<P> = Arc<Mutex<VecDeque<Expectation<P>>>>;

/// A mock page with expectation tracking for fluent testing.
pub struct MockPage<P: FormPage> {
    client: PageClient<P>,
    expectations: Expectations<P>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<P: FormPage> Default for MockPage<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: FormPage> MockPage<P> {
    /// Creates a mock page with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<PageRequest<P>>(100);
        let expectations: Expectations<P> = Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone.lock().unwrap().pop_front();

                match (request, expectation) {
                    (
                        PageRequest::Input {
                            field, respond_to, ..
                        },
                        Some(Expectation::Input {
                            field: expected,
                            response,
                        }),
                    ) => {
                        if let Some(expected) = expected {
                            assert_eq!(field, expected, "Unexpected input field");
                        }
                        let _ = respond_to.send(response);
                    }
                    (PageRequest::Blur { respond_to, .. }, Some(Expectation::Blur)) => {
                        let _ = respond_to.send(Ok(()));
                    }
                    (PageRequest::Command { respond_to, .. }, Some(Expectation::Command { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (PageRequest::View { respond_to }, Some(Expectation::View { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (PageRequest::Teardown { respond_to }, Some(Expectation::Teardown)) => {
                        let _ = respond_to.send(Ok(()));
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: PageClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> PageClient<P> {
        self.client.clone()
    }

    /// Expects an `input` on any field.
    pub fn expect_input(&mut self) -> InputExpectationBuilder<P> {
        InputExpectationBuilder {
            field: None,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects an `input` on `field`.
    pub fn expect_input_on(&mut self, field: impl Into<String>) -> InputExpectationBuilder<P> {
        InputExpectationBuilder {
            field: Some(field.into()),
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_blur(&mut self) {
        self.expectations.lock().unwrap().push_back(Expectation::Blur);
    }

    pub fn expect_command(&mut self) -> CommandExpectationBuilder<P> {
        CommandExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_view(&mut self) -> ViewExpectationBuilder<P> {
        ViewExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_teardown(&mut self) {
        self.expectations.lock().unwrap().push_back(Expectation::Teardown);
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

/// Builder for `input` expectations.
pub struct InputExpectationBuilder<P: FormPage> {
    field: Option<String>,
    expectations: Expectations<P>,
}

impl<P: FormPage> InputExpectationBuilder<P> {
    pub fn return_ok(self) {
        self.expectations.lock().unwrap().push_back(Expectation::Input {
            field: self.field,
            response: Ok(()),
        });
    }

    pub fn return_err(self, error: FormError) {
        self.expectations.lock().unwrap().push_back(Expectation::Input {
            field: self.field,
            response: Err(error),
        });
    }
}

/// Builder for `command` expectations.
pub struct CommandExpectationBuilder<P: FormPage> {
    expectations: Expectations<P>,
}

impl<P: FormPage> CommandExpectationBuilder<P> {
    pub fn return_ok(self, reply: P::Reply) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Command { response: Ok(reply) });
    }

    pub fn return_err(self, error: FormError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Command { response: Err(error) });
    }
}

/// Builder for `view` expectations.
pub struct ViewExpectationBuilder<P: FormPage> {
    expectations: Expectations<P>,
}

impl<P: FormPage> ViewExpectationBuilder<P> {
    pub fn return_ok(self, view: P::View) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::View { response: Ok(view) });
    }

    pub fn return_err(self, error: FormError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::View { response: Err(error) });
    }
}

// =============================================================================
// RAW RECEIVER HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
///
/// Lets a test play the page: read each request and answer it however the
/// scenario needs (success, failure, or never).
pub fn create_mock_client<P: FormPage>(
    buffer_size: usize,
) -> (PageClient<P>, mpsc::Receiver<PageRequest<P>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (PageClient::new(sender), receiver)
}

/// Helper to verify that the next message is an Input request
pub async fn expect_input<P: FormPage>(
    receiver: &mut mpsc::Receiver<PageRequest<P>>,
) -> Option<(String, FieldValue, Response<()>)> {
    match receiver.recv().await {
        Some(PageRequest::Input {
            field,
            value,
            respond_to,
        }) => Some((field, value, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Command request
pub async fn expect_command<P: FormPage>(
    receiver: &mut mpsc::Receiver<PageRequest<P>>,
) -> Option<(P::Command, Response<P::Reply>)> {
    match receiver.recv().await {
        Some(PageRequest::Command {
            command,
            respond_to,
        }) => Some((command, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a View request
pub async fn expect_view<P: FormPage>(
    receiver: &mut mpsc::Receiver<PageRequest<P>>,
) -> Option<Response<P::View>> {
    match receiver.recv().await {
        Some(PageRequest::View { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is a Teardown request
pub async fn expect_teardown<P: FormPage>(
    receiver: &mut mpsc::Receiver<PageRequest<P>>,
) -> Option<Response<()>> {
    match receiver.recv().await {
        Some(PageRequest::Teardown { respond_to }) => Some(respond_to),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::{FormEvent, FormGroup};
    use crate::subscription::Observers;
    use async_trait::async_trait;

    struct Counter {
        form: FormGroup,
    }

    #[derive(Debug)]
    enum CounterCommand {
        Add(u32),
    }

    #[derive(Debug, thiserror::Error)]
    #[error("Counter error")]
    struct CounterError;

    #[async_trait]
    impl FormPage for Counter {
        type Reaction = ();
        type Command = CounterCommand;
        type Reply = u32;
        type View = u32;
        type Context = ();
        type Error = CounterError;

        fn form(&self) -> &FormGroup {
            &self.form
        }

        fn form_mut(&mut self) -> &mut FormGroup {
            &mut self.form
        }

        fn observe(&self, _observers: &mut Observers<()>) {}

        fn view(&self) -> u32 {
            0
        }

        async fn react(&mut self, _: (), _: &FormEvent, _: &()) -> Result<(), CounterError> {
            Ok(())
        }

        async fn handle_command(&mut self, command: CounterCommand, _: &()) -> Result<u32, CounterError> {
            match command {
                CounterCommand::Add(n) => Ok(n),
            }
        }
    }

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<Counter>(10);

        let task = tokio::spawn(async move { client.command(CounterCommand::Add(2)).await });

        let (command, responder) = expect_command(&mut receiver)
            .await
            .expect("Expected Command request");
        assert!(matches!(command, CounterCommand::Add(2)));
        responder.send(Ok(5)).unwrap();

        let result = task.await.unwrap();
        assert!(matches!(result, Ok(5)));
    }

    #[tokio::test]
    async fn test_mock_page_with_expectations() {
        let mut mock = MockPage::<Counter>::new();
        mock.expect_input_on("amount").return_ok();
        mock.expect_view().return_ok(3);
        mock.expect_input().return_err(FormError::UnknownField("other".into()));
        mock.expect_teardown();

        let client = mock.client();
        client.input("amount", 3.0).await.unwrap();
        assert_eq!(client.view().await.unwrap(), 3);
        let err = client.input("other", "x").await.unwrap_err();
        assert_eq!(err.to_string(), "Unknown field: other");
        client.teardown().await.unwrap();

        mock.verify();
    }
}
