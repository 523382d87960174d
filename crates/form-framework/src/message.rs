//! # Page Messages
//!
//! The requests a [`PageClient`](crate::client::PageClient) sends to a
//! [`PageActor`](crate::runtime::PageActor), each with its one-shot reply channel.

use crate::error::FormError;
use crate::page::FormPage;
use crate::value::FieldValue;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by pages.
pub type Response<T> = oneshot::Sender<Result<T, FormError>>;

/// Internal message type sent to a page loop.
///
/// `Input` and `Blur` are the same for every page; `Command` carries the
/// page's own [`FormPage::Command`], so a quotation command cannot be sent
/// to the inventory page.
#[derive(Debug)]
pub enum PageRequest<P: FormPage> {
    /// User typed or picked a value.
    Input {
        field: String,
        value: FieldValue,
        respond_to: Response<()>,
    },
    /// Focus left a field.
    Blur {
        field: String,
        respond_to: Response<()>,
    },
    Command {
        command: P::Command,
        respond_to: Response<P::Reply>,
    },
    View {
        respond_to: Response<P::View>,
    },
    /// Navigation away from the page.
    Teardown { respond_to: Response<()> },
}
