//! Inventory manager page: product CRUD against the remote store, with
//! summary statistics and a live price preview.

mod actions;
pub mod error;
pub mod page;
pub mod stats;

pub use actions::*;
pub use error::*;
pub use page::*;
pub use stats::*;

use crate::clients::InventoryClient;
use form_framework::PageActor;

/// Creates a new inventory page actor and its client.
pub fn new() -> Result<(PageActor<InventoryPage>, InventoryClient), InventoryError> {
    let (actor, generic_client) = PageActor::new(InventoryPage::new()?, 32);
    let client = InventoryClient::new(generic_client);

    Ok((actor, client))
}
