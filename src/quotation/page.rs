//! [`FormPage`] implementation of the quotation calculator.
//!
//! The form has five fields: `product`, `quantity`, `unitPrice`, `discountCode` and
//! `email`. Every change recomputes the total right away; the discount code is
//! only evaluated once it has been stable for [`DISCOUNT_DEBOUNCE`].

use super::actions::{Quote, QuoteCommand, QuoteReaction, QuoteReply, QuoteView, DISCOUNT_DEBOUNCE, EMAIL_DEBOUNCE};
use super::calculator::{subtotal, DiscountCode, QuoteCalculator};
use super::error::QuoteError;
use crate::prompt::Prompt;
use async_trait::async_trait;
use form_framework::{FormControl, FormEvent, FormGroup, FormPage, Observers, Source, Validator};
use std::sync::Arc;
use tracing::{debug, info};

pub const SUBMITTED_MESSAGE: &str = "Quote sent successfully!";

pub struct QuotationPage {
    form: FormGroup,
    calculator: QuoteCalculator,
}

impl Default for QuotationPage {
    fn default() -> Self {
        Self::new()
    }
}

impl QuotationPage {
    pub fn new() -> Self {
        Self {
            form: Self::build_form(),
            calculator: QuoteCalculator::default(),
        }
    }

    pub fn build_form() -> FormGroup {
        FormGroup::new()
            .with_control(
                FormControl::new("product", "")
                    .labelled("Product")
                    .with_validator(Validator::Required),
            )
            .with_control(
                FormControl::new("quantity", 1.0)
                    .labelled("Quantity")
                    .with_validators([Validator::Required, Validator::Integer, Validator::Min(1.0)]),
            )
            .with_control(
                FormControl::new("unitPrice", 0.0)
                    .labelled("Unit price")
                    .with_validators([Validator::Required, Validator::Min(0.0)]),
            )
            .with_control(FormControl::new("discountCode", "").labelled("Discount code"))
            .with_control(
                FormControl::new("email", "")
                    .labelled("Email")
                    .with_validators([Validator::Required, Validator::Email]),
            )
    }

    pub fn calculator(&self) -> &QuoteCalculator {
        &self.calculator
    }
}

#[async_trait]
impl FormPage for QuotationPage {
    type Reaction = QuoteReaction;
    type Command = QuoteCommand;
    type Reply = QuoteReply;
    type View = QuoteView;
    type Context = Arc<dyn Prompt>;
    type Error = QuoteError;

    fn form(&self) -> &FormGroup {
        &self.form
    }

    fn form_mut(&mut self) -> &mut FormGroup {
        &mut self.form
    }

    fn observe(&self, observers: &mut Observers<QuoteReaction>) {
        observers.on(Source::GroupValue, QuoteReaction::Recalculate);
        observers.on_debounced(
            Source::field_value("discountCode"),
            DISCOUNT_DEBOUNCE,
            QuoteReaction::ApplyDiscount,
        );
        observers.on_debounced(Source::field_value("email"), EMAIL_DEBOUNCE, QuoteReaction::CheckEmail);
    }

    fn view(&self) -> QuoteView {
        let value = self.form.value();
        QuoteView {
            subtotal: subtotal(&value),
            value,
            status: self.form.status(),
            discount_amount: self.calculator.discount_amount(),
            total: self.calculator.total(),
            invalid_fields: self.form.invalid_touched_labels(),
        }
    }

    async fn react(
        &mut self,
        reaction: QuoteReaction,
        event: &FormEvent,
        _prompt: &Arc<dyn Prompt>,
    ) -> Result<(), QuoteError> {
        match reaction {
            QuoteReaction::Recalculate => {
                let value = event.group_value().cloned().unwrap_or_else(|| self.form.value());
                let total = self.calculator.recalculate(&value);
                debug!(total, "Total recalculated");
            }
            QuoteReaction::ApplyDiscount => {
                let code = event.field_value().map(|v| v.to_text()).unwrap_or_default();
                let discount = DiscountCode::parse(&code);
                let total = self.calculator.apply_discount(discount, &self.form.value());
                match discount {
                    DiscountCode::None => debug!(%code, total, "No discount"),
                    _ => info!(
                        %code,
                        rate = discount.rate(),
                        discount_amount = self.calculator.discount_amount(),
                        total,
                        "Discount applied"
                    ),
                }
            }
            QuoteReaction::CheckEmail => {
                let email = event.field_value().map(|v| v.to_text()).unwrap_or_default();
                if !email.is_empty() {
                    debug!(%email, "Checking email");
                }
            }
        }
        Ok(())
    }

    async fn handle_command(
        &mut self,
        command: QuoteCommand,
        prompt: &Arc<dyn Prompt>,
    ) -> Result<QuoteReply, QuoteError> {
        match command {
            QuoteCommand::Submit => {
                if !self.form.is_valid() {
                    let error = QuoteError::InvalidForm;
                    prompt.alert(&error.to_string());
                    return Err(error);
                }
                let quote = Quote {
                    value: self.form.value(),
                    total: self.calculator.total(),
                };
                info!(?quote, "Quote submitted");
                prompt.alert(SUBMITTED_MESSAGE);
                self.calculator.clear();
                self.form.reset();
                Ok(QuoteReply::Submit(quote))
            }
            QuoteCommand::Reset => {
                self.calculator.clear();
                self.form.reset();
                Ok(QuoteReply::Reset(()))
            }
        }
    }
}
