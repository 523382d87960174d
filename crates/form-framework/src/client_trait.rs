//! # Page Handle Trait
//!
//! Domain clients wrap a [`PageClient`] and expose page-specific methods with
//! their own error type. The `PageHandle` trait supplies the operations every
//! page shares so each wrapper only writes its commands.

use crate::client::PageClient;
use crate::error::FormError;
use crate::page::FormPage;
use crate::value::FieldValue;
use async_trait::async_trait;

/// Shared behavior for typed page clients.
///
/// # Example
///
/// ```rust
/// use form_framework::{FormError, FormEvent, FormGroup, FormPage, Observers, PageClient, PageHandle};
/// use async_trait::async_trait;
///
/// struct Notes { form: FormGroup }
/// #[derive(Debug, thiserror::Error)]
/// enum NotesError {
///     #[error("{0}")]
///     Framework(String),
/// }
///
/// #[async_trait]
/// impl FormPage for Notes {
///     type Reaction = ();
///     type Command = ();
///     type Reply = ();
///     type View = ();
///     type Context = ();
///     type Error = NotesError;
///     fn form(&self) -> &FormGroup { &self.form }
///     fn form_mut(&mut self) -> &mut FormGroup { &mut self.form }
///     fn observe(&self, _: &mut Observers<()>) {}
///     fn view(&self) {}
///     async fn react(&mut self, _: (), _: &FormEvent, _: &()) -> Result<(), NotesError> { Ok(()) }
///     async fn handle_command(&mut self, _: (), _: &()) -> Result<(), NotesError> { Ok(()) }
/// }
///
/// struct NotesClient { inner: PageClient<Notes> }
///
/// #[async_trait]
/// impl PageHandle<Notes> for NotesClient {
///     type Error = NotesError;
///
///     fn inner(&self) -> &PageClient<Notes> {
///         &self.inner
///     }
///
///     fn map_error(e: FormError) -> NotesError {
///         NotesError::Framework(e.to_string())
///     }
/// }
///
/// // input(), blur(), view() and teardown() are provided automatically!
/// async fn usage(client: NotesClient) {
///     let _ = client.input("body", "hello".into()).await;
///     let _ = client.teardown().await;
/// }
/// ```
#[async_trait]
pub trait PageHandle<P: FormPage>: Send + Sync {
    /// The page-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic PageClient.
    fn inner(&self) -> &PageClient<P>;

    /// Map framework errors to the page error type.
    fn map_error(e: FormError) -> Self::Error;

    /// Types `value` into `field`.
    #[tracing::instrument(skip(self))]
    async fn input(&self, field: &str, value: FieldValue) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().input(field, value).await.map_err(Self::map_error)
    }

    /// Leaves `field`, marking it touched.
    #[tracing::instrument(skip(self))]
    async fn blur(&self, field: &str) -> Result<(), Self::Error> {
        self.inner().blur(field).await.map_err(Self::map_error)
    }

    async fn view(&self) -> Result<P::View, Self::Error> {
        self.inner().view().await.map_err(Self::map_error)
    }

    /// Tears the page down. A page that already stopped counts as torn down.
    #[tracing::instrument(skip(self))]
    async fn teardown(&self) -> Result<(), Self::Error> {
        match self.inner().teardown().await {
            Ok(()) | Err(FormError::PageClosed) => Ok(()),
            Err(e) => Err(Self::map_error(e)),
        }
    }
}
