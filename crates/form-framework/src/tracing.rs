//! # Observability & Tracing
//!
//! Structured logging for page loops and the code driving them.
//!
//! The page runtime tags its events with a `page_type` field (e.g.
//! `page_type="QuotationPage"`), so the output uses a compact format that hides the
//! module path (`with_target(false)`).
//!
//! ```bash
//! # Lifecycle only: page started, command ok, teardown
//! RUST_LOG=info cargo run
//!
//! # Every input, reaction and command payload
//! RUST_LOG=debug cargo run
//!
//! # Only the engine
//! RUST_LOG=form_framework=debug cargo run
//! ```
//!
//! With `RUST_LOG=debug` a quotation session reads like:
//!
//! ```text
//! INFO Page started page_type="QuotationPage" subscriptions=3
//! DEBUG Input page_type="QuotationPage" field=quantity value=Number(3.0)
//! DEBUG React page_type="QuotationPage" reaction=Recalculate
//! DEBUG React page_type="QuotationPage" reaction=ApplyDiscount
//! INFO Teardown page_type="QuotationPage" cancelled=0 released=3
//! ```

use tracing_subscriber::EnvFilter;

/// Initializes tracing with the filter taken from `RUST_LOG`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false) // page_type replaces module paths
        .compact()
        .init();
}

/// Like [`setup_tracing`], falling back to `default_level` (e.g. `"info"`) when
/// `RUST_LOG` is unset or unparsable.
pub fn setup_tracing_with_default(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
