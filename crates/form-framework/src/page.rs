//! # FormPage Trait
//!
//! The `FormPage` trait is the contract every page (a quotation calculator, a
//! registration form, an inventory editor, …) implements to be driven by the
//! generic [`PageActor`](crate::runtime::PageActor). A page owns one
//! [`FormGroup`], declares its observers once, reacts to the notifications those
//! observers match, and handles page-specific commands such as "submit".
//!
//! # Provided Methods (Hooks)
//! - [`FormPage::on_start`] runs once, after observers are registered
//! - [`FormPage::on_teardown`] runs once, after every subscription is released
//!
//! Both default to doing nothing.

use crate::group::{FormEvent, FormGroup};
use crate::subscription::Observers;
use async_trait::async_trait;
use std::fmt::Debug;

/// Trait that any page must implement to be run by `PageActor`.
///
/// # Async & Context
/// Hooks are `async` so a page can await collaborators (a remote store, a prompt)
/// from inside its event loop. The `Context` carries those collaborators and is
/// handed to [`PageActor::run`](crate::runtime::PageActor::run), not to the page
/// constructor.
#[async_trait]
pub trait FormPage: Send + 'static {
    /// Page-defined tag stored in each subscription and handed back to
    /// [`FormPage::react`] when the subscription fires.
    type Reaction: Clone + Send + Sync + Debug + 'static;

    /// Page-specific operations (submit, reset, load, …).
    type Command: Send + Debug;

    /// What a command returns to the caller.
    type Reply: Send + Debug;

    /// Snapshot of the page for rendering.
    type View: Send + Debug;

    /// Collaborators injected at run time. Use `()` if none are needed.
    type Context: Send + Sync;

    /// One error enum for the whole page.
    type Error: std::error::Error + Send + Sync + 'static;

    fn form(&self) -> &FormGroup;

    fn form_mut(&mut self) -> &mut FormGroup;

    /// Registers the page's subscriptions. Called once, before `on_start`.
    fn observe(&self, observers: &mut Observers<Self::Reaction>);

    fn view(&self) -> Self::View;

    async fn on_start(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Runs the reaction of a subscription that matched `event`.
    async fn react(
        &mut self,
        reaction: Self::Reaction,
        event: &FormEvent,
        ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    async fn handle_command(
        &mut self,
        command: Self::Command,
        ctx: &Self::Context,
    ) -> Result<Self::Reply, Self::Error>;

    async fn on_teardown(&mut self, _ctx: &Self::Context) {}
}
