//! # Catalog Forms
//!
//! Reactive form pages for a product catalog front end, built on the
//! [`form_framework`] page runtime.
//!
//! ## 🚀 Core Components
//!
//! - **[quotation]**: quote calculator. Totals follow every change; the
//!   discount code is applied once typing settles.
//! - **[registration]**: registration form. Tracks form status, password
//!   strength and password confirmation.
//! - **[inventory]**: product manager. Lists, creates, edits and deletes
//!   products in the remote [`store`] and keeps inventory statistics.
//! - **[clients]**: type-safe wrappers (e.g. [`InventoryClient`](clients::InventoryClient))
//!   that hide the message passing.
//! - **[lifecycle]**: [`CatalogSystem`](lifecycle::CatalogSystem) opens one page per
//!   route and tears the previous one down.
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. One loop per page
//! Each page runs in its own Tokio task and handles input, reactions and
//! commands one at a time, so page state needs no locks. Remote calls are
//! awaited inside the loop; requests sent meanwhile wait in the mailbox.
//!
//! ### 2. Collaborators as context
//! The product store and the [`Prompt`](prompt::Prompt) are injected when a page
//! starts running, not when it is built. Tests swap in
//! [`MockTransport`](mock::MockTransport) and [`RecordingPrompt`](mock::RecordingPrompt).
//!
//! ### 3. Type-safe errors
//! Each page has its own error type. Page errors cross the page loop boxed in
//! [`FormError`](form_framework::FormError) and the typed clients recover them.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run the demo against a local backend
//! cargo run -- --api-url http://localhost:8080
//! ```

pub mod clients;
pub mod config;
pub mod inventory;
pub mod lifecycle;
pub mod mock;
pub mod model;
pub mod prompt;
pub mod quotation;
pub mod registration;
pub mod store;
