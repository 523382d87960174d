//! Registration page: field and group status monitoring, password rules.

mod actions;
pub mod error;
pub mod page;
pub mod validators;

pub use actions::*;
pub use error::*;
pub use page::*;
pub use validators::*;

use crate::clients::RegistrationClient;
use form_framework::PageActor;

/// Creates a new registration page actor and its client.
pub fn new() -> (PageActor<RegistrationPage>, RegistrationClient) {
    let (actor, generic_client) = PageActor::new(RegistrationPage::new(), 32);
    let client = RegistrationClient::new(generic_client);

    (actor, client)
}
