//! # Product Store
//!
//! The remote product catalog, reached through a [`Transport`]. The store knows
//! the resource layout (`GET /products`, `GET /products/{id}`, …) and the
//! `{ "products": ... }` envelope; the transport only moves JSON.
//!
//! ## Structure
//!
//! - [`transport`] - [`Transport`] trait, request/response types and [`ReqwestTransport`]
//! - [`product_store`] - [`ProductStore`] with list/get/create/update/remove
//! - [`error`] - [`TransportError`] and [`StoreError`]
//!
//! ## Retries
//!
//! Only `list` is retried. Writes are sent once so a failure never duplicates
//! a mutation.

pub mod error;
pub mod product_store;
pub mod transport;

pub use error::*;
pub use product_store::*;
pub use transport::*;
