//! # Observer Registration
//!
//! Pages declare what they react to by registering subscriptions on an
//! [`Observers`] registry: a [`Source`] to watch, an optional quiet period and a
//! page-defined reaction value handed back when the subscription fires.
//!
//! ```rust
//! use form_framework::{Observers, Source};
//! use std::time::Duration;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum Reaction { Recalculate, ApplyDiscount }
//!
//! let mut observers = Observers::new();
//! observers.on(Source::GroupValue, Reaction::Recalculate);
//! let id = observers.on_debounced(
//!     Source::field_value("discountCode"),
//!     Duration::from_millis(500),
//!     Reaction::ApplyDiscount,
//! );
//! assert_eq!(observers.len(), 2);
//!
//! assert!(observers.off(id));
//! assert_eq!(observers.matching(&Source::field_value("discountCode")).len(), 0);
//! ```

use crate::group::Source;
use std::time::Duration;

/// Handle returned by [`Observers::on`], used to unsubscribe.
pub type SubscriptionId = u64;

#[derive(Debug, Clone)]
pub struct Subscription<R> {
    pub id: SubscriptionId,
    pub source: Source,
    pub debounce: Option<Duration>,
    pub reaction: R,
}

/// Registry of subscriptions, kept in registration order.
#[derive(Debug)]
pub struct Observers<R> {
    entries: Vec<Subscription<R>>,
    next_id: SubscriptionId,
}

impl<R: Clone> Observers<R> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// Reacts to every notification from `source`, immediately.
    pub fn on(&mut self, source: Source, reaction: R) -> SubscriptionId {
        self.register(source, None, reaction)
    }

    /// Reacts to the last notification of a burst once `quiet` has elapsed
    /// without a newer one.
    pub fn on_debounced(&mut self, source: Source, quiet: Duration, reaction: R) -> SubscriptionId {
        self.register(source, Some(quiet), reaction)
    }

    /// Removes a subscription. Returns `false` if it was already gone.
    pub fn off(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    /// Removes every subscription and returns how many were released.
    pub fn clear(&mut self) -> usize {
        let released = self.entries.len();
        self.entries.clear();
        released
    }

    pub fn get(&self, id: SubscriptionId) -> Option<&Subscription<R>> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Subscriptions watching `source`, in registration order.
    pub fn matching(&self, source: &Source) -> Vec<Subscription<R>> {
        self.entries
            .iter()
            .filter(|entry| &entry.source == source)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn register(&mut self, source: Source, debounce: Option<Duration>, reaction: R) -> SubscriptionId {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Subscription {
            id,
            source,
            debounce,
            reaction,
        });
        id
    }
}

impl<R: Clone> Default for Observers<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_preserves_registration_order() {
        let mut observers = Observers::new();
        observers.on(Source::GroupStatus, "message");
        observers.on(Source::GroupValue, "preview");
        observers.on(Source::GroupStatus, "invalid-fields");

        let reactions: Vec<&str> = observers
            .matching(&Source::GroupStatus)
            .into_iter()
            .map(|s| s.reaction)
            .collect();
        assert_eq!(reactions, vec!["message", "invalid-fields"]);
    }

    #[test]
    fn test_off_and_clear() {
        let mut observers = Observers::new();
        let first = observers.on(Source::GroupValue, 1);
        observers.on_debounced(Source::field_value("email"), Duration::from_millis(300), 2);

        assert!(observers.off(first));
        assert!(!observers.off(first));
        assert!(observers.get(first).is_none());
        assert_eq!(observers.clear(), 1);
        assert!(observers.is_empty());
    }
}
