//! Page lifecycle: routes, navigation and shutdown.

pub mod catalog_system;
pub mod route;

pub use catalog_system::*;
pub use route::*;
