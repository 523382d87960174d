//! Reactions, commands and results of the quotation page.

use form_framework::{FormStatus, FormValue};
use std::time::Duration;

pub const DISCOUNT_DEBOUNCE: Duration = Duration::from_millis(500);
pub const EMAIL_DEBOUNCE: Duration = Duration::from_millis(300);

/// What a quotation subscription does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteReaction {
    /// Recomputes the total on every form change.
    Recalculate,
    /// Evaluates the discount code once typing settles.
    ApplyDiscount,
    /// Logs the address about to be checked.
    CheckEmail,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteCommand {
    /// Sends the quote. Rejected unless the form is valid.
    Submit,
    /// Restores defaults and clears the computed amounts.
    Reset,
}

/// Results from QuoteCommands - variants match 1:1 with QuoteCommand
#[derive(Debug, Clone, PartialEq)]
pub enum QuoteReply {
    Submit(Quote),
    Reset(()),
}

/// A submitted quote: the form value plus the total shown when it was sent.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub value: FormValue,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuoteView {
    pub value: FormValue,
    pub status: FormStatus,
    pub subtotal: f64,
    pub discount_amount: f64,
    pub total: f64,
    /// Labels of the fields that are invalid and were touched.
    pub invalid_fields: Vec<String>,
}
