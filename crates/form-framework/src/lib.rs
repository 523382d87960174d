//! # Form Framework
//!
//! This crate provides the building blocks for reactive forms driven by
//! sequential page loops. A page owns a [`FormGroup`], declares which change
//! notifications it observes, and reacts to them inside its own Tokio task.
//!
//! ## Architecture Overview
//!
//! The framework separates concerns into three layers:
//!
//! 1. **Form Layer** ([`FormGroup`], [`FormControl`], [`Validator`]) - values,
//!    rules, and the status state machine ([`FormStatus`])
//! 2. **Runtime Layer** ([`PageActor`]) - one event loop per page: inputs,
//!    commands, observer dispatch and debounce timers ([`DebounceScheduler`])
//! 3. **Interface Layer** ([`PageClient`], [`PageHandle`]) - type-safe communication
//!
//! You write your page logic **once** in the [`FormPage`] trait and the
//! framework handles message passing, notification ordering and teardown.
//!
//! ## Change notifications
//!
//! Every value change on a control produces, in order, a field value, a field
//! status, a group value and a group status notification ([`FormEvent`]).
//! Observers subscribe to one [`Source`] each:
//!
//! ```rust
//! use form_framework::{FormControl, FormEvent, FormGroup, FormStatus, Validator};
//!
//! let mut form = FormGroup::new()
//!     .with_control(FormControl::new("username", "").with_validators([
//!         Validator::Required,
//!         Validator::MinLength(4),
//!     ]));
//! assert_eq!(form.status(), FormStatus::Invalid);
//!
//! form.set_value("username", "abcd".into()).unwrap();
//! assert_eq!(form.status(), FormStatus::Valid);
//!
//! let events = form.take_events();
//! assert_eq!(events.len(), 4);
//! assert!(matches!(events[3], FormEvent::GroupStatus(FormStatus::Valid)));
//! ```
//!
//! ## Debounced observers
//!
//! [`Observers::on_debounced`] delays a reaction until its source has been quiet
//! for the given period. A newer notification replaces the pending one, so only
//! the last value of a burst is acted on. Tearing a page down cancels anything
//! still pending.

pub mod client;
pub mod client_trait;
pub mod control;
pub mod error;
pub mod group;
pub mod message;
pub mod mock;
pub mod page;
pub mod runtime;
pub mod scheduler;
pub mod status;
pub mod subscription;
pub mod tracing;
pub mod validator;
pub mod value;

pub use client::PageClient;
pub use client_trait::PageHandle;
pub use control::FormControl;
pub use error::FormError;
pub use group::{FormEvent, FormGroup, Source};
pub use message::{PageRequest, Response};
pub use page::FormPage;
pub use runtime::PageActor;
pub use scheduler::{DebounceScheduler, Tick};
pub use status::{FormStatus, StatusEvent};
pub use subscription::{Observers, Subscription, SubscriptionId};
pub use validator::{GroupValidator, ValidationError, ValidationErrors, Validator};
pub use value::{parse_float, parse_int, FieldValue, FormValue};
