//! # Debounce Scheduler
//!
//! Holds at most one pending notification per debounced subscription. Scheduling a
//! newer notification aborts the older timer, so only the last value of a burst is
//! ever delivered. Expired timers send a [`Tick`] back to the page loop, which
//! claims the notification with [`DebounceScheduler::take`].

use crate::group::FormEvent;
use crate::subscription::SubscriptionId;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Sent by an expired timer. Carries the generation it was scheduled with so a
/// tick racing a newer schedule is recognised as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub subscription: SubscriptionId,
    pub generation: u64,
}

struct Pending {
    generation: u64,
    event: FormEvent,
    timer: JoinHandle<()>,
}

pub struct DebounceScheduler {
    pending: HashMap<SubscriptionId, Pending>,
    ticks: mpsc::UnboundedSender<Tick>,
    next_generation: u64,
}

impl DebounceScheduler {
    /// Creates a scheduler and the receiver its timers report to.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Tick>) {
        let (ticks, receiver) = mpsc::unbounded_channel();
        let scheduler = Self {
            pending: HashMap::new(),
            ticks,
            next_generation: 1,
        };
        (scheduler, receiver)
    }

    /// Arms (or re-arms) the timer of `subscription` with `event`.
    pub fn schedule(&mut self, subscription: SubscriptionId, quiet: Duration, event: FormEvent) {
        if let Some(previous) = self.pending.remove(&subscription) {
            previous.timer.abort();
        }

        let generation = self.next_generation;
        self.next_generation += 1;

        let ticks = self.ticks.clone();
        let timer = tokio::spawn(async move {
            tokio::time::sleep(quiet).await;
            let _ = ticks.send(Tick {
                subscription,
                generation,
            });
        });

        self.pending.insert(
            subscription,
            Pending {
                generation,
                event,
                timer,
            },
        );
    }

    /// Claims the notification a tick refers to. Stale ticks yield `None`.
    pub fn take(&mut self, tick: &Tick) -> Option<FormEvent> {
        match self.pending.get(&tick.subscription) {
            Some(pending) if pending.generation == tick.generation => self
                .pending
                .remove(&tick.subscription)
                .map(|pending| pending.event),
            _ => None,
        }
    }

    /// Drops the pending notification of one subscription.
    pub fn cancel(&mut self, subscription: SubscriptionId) -> bool {
        match self.pending.remove(&subscription) {
            Some(pending) => {
                pending.timer.abort();
                true
            }
            None => false,
        }
    }

    /// Drops every pending notification and returns how many were discarded.
    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.pending.len();
        for (_, pending) in self.pending.drain() {
            pending.timer.abort();
        }
        cancelled
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, subscription: SubscriptionId) -> bool {
        self.pending.contains_key(&subscription)
    }
}

impl Drop for DebounceScheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::FieldValue;

    fn code(value: &str) -> FormEvent {
        FormEvent::FieldValue {
            field: "discountCode".to_string(),
            value: FieldValue::from(value),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_last_of_burst_is_delivered() {
        let (mut scheduler, mut ticks) = DebounceScheduler::new();
        let quiet = Duration::from_millis(500);

        scheduler.schedule(1, quiet, code("D"));
        tokio::time::sleep(Duration::from_millis(200)).await;
        scheduler.schedule(1, quiet, code("DESC"));
        tokio::time::sleep(Duration::from_millis(200)).await;
        scheduler.schedule(1, quiet, code("DESC10"));
        assert_eq!(scheduler.pending(), 1);

        let tick = ticks.recv().await.unwrap();
        assert_eq!(scheduler.take(&tick), Some(code("DESC10")));
        assert_eq!(scheduler.pending(), 0);
        assert!(ticks.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_tick_is_ignored() {
        let (mut scheduler, _ticks) = DebounceScheduler::new();
        scheduler.schedule(7, Duration::from_millis(300), code("A"));
        let stale = Tick {
            subscription: 7,
            generation: 0,
        };
        assert_eq!(scheduler.take(&stale), None);
        assert!(scheduler.is_pending(7));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_all_discards_pending() {
        let (mut scheduler, mut ticks) = DebounceScheduler::new();
        scheduler.schedule(1, Duration::from_millis(300), code("A"));
        scheduler.schedule(2, Duration::from_millis(500), code("B"));

        assert_eq!(scheduler.cancel_all(), 2);
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(ticks.try_recv().is_err());
    }
}
