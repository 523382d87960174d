//! Catalog data structures shared by the pages and the product store.

pub mod catalog;
pub mod product;

pub use catalog::*;
pub use product::*;
