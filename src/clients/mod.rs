//! Type-safe wrappers around [`PageClient`](form_framework::PageClient).
//!
//! Each wrapper implements [`PageHandle`](form_framework::PageHandle) for the
//! shared requests (input, blur, view, teardown) and adds one method per page
//! command. Page errors are recovered from the framework error by downcasting.

pub mod inventory_client;
pub mod quotation_client;
pub mod registration_client;

pub use inventory_client::*;
pub use quotation_client::*;
pub use registration_client::*;
