//! # Page Runtime
//!
//! This module defines the `PageActor`, the event loop that owns one page and its
//! form. It is the "server" half of a page: requests from the client, expired
//! debounce timers and the reactions they trigger are all processed sequentially
//! in a single task, so the form needs no `Mutex`.

use crate::client::PageClient;
use crate::error::FormError;
use crate::group::FormEvent;
use crate::message::PageRequest;
use crate::page::FormPage;
use crate::scheduler::{DebounceScheduler, Tick};
use crate::subscription::{Observers, Subscription};
use std::collections::VecDeque;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// What woke the loop up.
enum Wake<P: FormPage> {
    Request(PageRequest<P>),
    Tick(Tick),
    Closed,
}

/// The generic event loop that drives one [`FormPage`].
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `PageActor::new()` to get the `actor` (loop) and `client` (interface).
/// 2.  **Wire**: Pass collaborators into `actor.run(context)`.
/// 3.  **Run**: Spawn the loop in a background task.
///
/// ```rust
/// use form_framework::{FormControl, FormEvent, FormGroup, FormPage, Observers, PageActor, Source};
/// use async_trait::async_trait;
///
/// struct Echo { form: FormGroup, changes: u32 }
/// #[derive(Debug, thiserror::Error)] #[error("echo")] struct EchoError;
///
/// #[async_trait]
/// impl FormPage for Echo {
///     type Reaction = ();
///     type Command = ();
///     type Reply = u32;
///     type View = u32;
///     type Context = ();
///     type Error = EchoError;
///
///     fn form(&self) -> &FormGroup { &self.form }
///     fn form_mut(&mut self) -> &mut FormGroup { &mut self.form }
///     fn observe(&self, observers: &mut Observers<()>) { observers.on(Source::GroupValue, ()); }
///     fn view(&self) -> u32 { self.changes }
///     async fn react(&mut self, _: (), _: &FormEvent, _: &()) -> Result<(), EchoError> {
///         self.changes += 1;
///         Ok(())
///     }
///     async fn handle_command(&mut self, _: (), _: &()) -> Result<u32, EchoError> { Ok(self.changes) }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let page = Echo { form: FormGroup::new().with_control(FormControl::new("name", "")), changes: 0 };
///     let (actor, client) = PageActor::new(page, 10);
///     tokio::spawn(actor.run(()));
///
///     client.input("name", "Ana").await.unwrap();
///     assert_eq!(client.view().await.unwrap(), 1);
///     client.teardown().await.unwrap();
/// }
/// ```
///
/// # Implementation Details
///
/// * **Input**: writes the value, dispatches the resulting notifications, then replies.
/// * **Blur**: marks the field touched. Emits no notification.
/// * **Command**: calls `handle_command`, dispatches, then replies.
/// * **Tick**: a debounce timer expired; if it is still the latest for its
///   subscription the reaction runs and its notifications are dispatched.
/// * **Teardown** (requested, or every client dropped): cancels pending timers,
///   releases all subscriptions and calls `on_teardown`. Nothing fires afterwards.
pub struct PageActor<P: FormPage> {
    page: P,
    receiver: mpsc::Receiver<PageRequest<P>>,
    observers: Observers<P::Reaction>,
    scheduler: DebounceScheduler,
    ticks: mpsc::UnboundedReceiver<Tick>,
    page_type: &'static str,
}

impl<P: FormPage> PageActor<P> {
    /// Creates the loop for `page` and the client that talks to it.
    ///
    /// The page's observers are registered here. Notifications queued while the
    /// form was being built are discarded.
    pub fn new(mut page: P, buffer_size: usize) -> (Self, PageClient<P>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (scheduler, ticks) = DebounceScheduler::new();
        let mut observers = Observers::new();
        page.observe(&mut observers);
        page.form_mut().take_events();

        // "QuotationPage" rather than "catalog_forms::quotation::page::QuotationPage"
        let page_type = std::any::type_name::<P>()
            .split("::")
            .last()
            .unwrap_or("Unknown");

        let actor = Self {
            page,
            receiver,
            observers,
            scheduler,
            ticks,
            page_type,
        };
        (actor, PageClient::new(sender))
    }

    /// Runs the loop until the page is torn down or every client is dropped.
    pub async fn run(mut self, context: P::Context) {
        let page_type = self.page_type;
        info!(page_type, subscriptions = self.observers.len(), "Page started");

        if let Err(e) = self.page.on_start(&context).await {
            warn!(page_type, error = %e, "on_start failed");
        }
        self.dispatch(&context).await;

        loop {
            let wake = tokio::select! {
                request = self.receiver.recv() => match request {
                    Some(request) => Wake::Request(request),
                    None => Wake::Closed,
                },
                Some(tick) = self.ticks.recv() => Wake::Tick(tick),
            };

            match wake {
                Wake::Request(PageRequest::Input {
                    field,
                    value,
                    respond_to,
                }) => {
                    debug!(page_type, %field, ?value, "Input");
                    let result = self.page.form_mut().set_value(&field, value);
                    if let Err(e) = &result {
                        warn!(page_type, error = %e, "Input rejected");
                    }
                    self.dispatch(&context).await;
                    let _ = respond_to.send(result);
                }
                Wake::Request(PageRequest::Blur { field, respond_to }) => {
                    debug!(page_type, %field, "Blur");
                    let _ = respond_to.send(self.page.form_mut().mark_touched(&field));
                }
                Wake::Request(PageRequest::Command {
                    command,
                    respond_to,
                }) => {
                    debug!(page_type, ?command, "Command");
                    let result = self
                        .page
                        .handle_command(command, &context)
                        .await
                        .map_err(|e| FormError::PageError(Box::new(e)));
                    match &result {
                        Ok(_) => info!(page_type, "Command ok"),
                        Err(e) => warn!(page_type, error = %e, "Command failed"),
                    }
                    self.dispatch(&context).await;
                    let _ = respond_to.send(result);
                }
                Wake::Request(PageRequest::View { respond_to }) => {
                    let _ = respond_to.send(Ok(self.page.view()));
                }
                Wake::Request(PageRequest::Teardown { respond_to }) => {
                    self.teardown(&context).await;
                    let _ = respond_to.send(Ok(()));
                    return;
                }
                Wake::Tick(tick) => {
                    let Some(event) = self.scheduler.take(&tick) else {
                        continue;
                    };
                    if let Some(subscription) = self.observers.get(tick.subscription).cloned() {
                        self.react(subscription, &event, &context).await;
                        self.dispatch(&context).await;
                    }
                }
                Wake::Closed => {
                    self.teardown(&context).await;
                    return;
                }
            }
        }
    }

    /// Delivers queued notifications to matching subscriptions in registration
    /// order. Notifications raised by reactions are delivered in turn.
    async fn dispatch(&mut self, context: &P::Context) {
        let mut queue: VecDeque<FormEvent> = self.page.form_mut().take_events().into();
        while let Some(event) = queue.pop_front() {
            for subscription in self.observers.matching(&event.source()) {
                match subscription.debounce {
                    Some(quiet) => self.scheduler.schedule(subscription.id, quiet, event.clone()),
                    None => self.react(subscription, &event, context).await,
                }
                queue.extend(self.page.form_mut().take_events());
            }
        }
    }

    async fn react(&mut self, subscription: Subscription<P::Reaction>, event: &FormEvent, context: &P::Context) {
        let page_type = self.page_type;
        debug!(page_type, reaction = ?subscription.reaction, "React");
        if let Err(e) = self.page.react(subscription.reaction, event, context).await {
            warn!(page_type, error = %e, "Reaction failed");
        }
    }

    async fn teardown(&mut self, context: &P::Context) {
        let cancelled = self.scheduler.cancel_all();
        let released = self.observers.clear();
        self.page.on_teardown(context).await;
        info!(page_type = self.page_type, cancelled, released, "Teardown");
    }
}
