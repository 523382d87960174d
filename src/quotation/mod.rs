//! Quotation calculator page: live totals with a debounced discount code.

mod actions;
pub mod calculator;
pub mod error;
pub mod page;

pub use actions::*;
pub use calculator::*;
pub use error::*;
pub use page::*;

use crate::clients::QuotationClient;
use form_framework::PageActor;

/// Creates a new quotation page actor and its client.
pub fn new() -> (PageActor<QuotationPage>, QuotationClient) {
    let (actor, generic_client) = PageActor::new(QuotationPage::new(), 32);
    let client = QuotationClient::new(generic_client);

    (actor, client)
}
