//! Quote arithmetic.
//!
//! `subtotal = quantity * unitPrice` and `total = subtotal - discount_amount`.
//! A discount code sets `discount_amount` from the total computed *before* the
//! code was applied, so the discount follows whatever total was on screen.

use form_framework::FormValue;

/// Discount codes accepted at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountCode {
    Desc10,
    Desc20,
    None,
}

impl DiscountCode {
    /// Codes are matched exactly; anything unknown gives no discount.
    pub fn parse(code: &str) -> Self {
        match code {
            "DESC10" => DiscountCode::Desc10,
            "DESC20" => DiscountCode::Desc20,
            _ => DiscountCode::None,
        }
    }

    pub fn rate(&self) -> f64 {
        match self {
            DiscountCode::Desc10 => 0.10,
            DiscountCode::Desc20 => 0.20,
            DiscountCode::None => 0.0,
        }
    }
}

/// Subtotal of a quote form. Missing or non-numeric inputs count as 0.
pub fn subtotal(value: &FormValue) -> f64 {
    let quantity = value.number("quantity").unwrap_or(0.0);
    let unit_price = value.number("unitPrice").unwrap_or(0.0);
    quantity * unit_price
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct QuoteCalculator {
    total: f64,
    discount_amount: f64,
}

impl QuoteCalculator {
    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn discount_amount(&self) -> f64 {
        self.discount_amount
    }

    /// Recomputes the total with the current discount amount.
    pub fn recalculate(&mut self, value: &FormValue) -> f64 {
        self.total = subtotal(value) - self.discount_amount;
        self.total
    }

    /// Applies `code` against the current total, then recomputes.
    pub fn apply_discount(&mut self, code: DiscountCode, value: &FormValue) -> f64 {
        self.discount_amount = self.total * code.rate();
        self.recalculate(value)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use form_framework::FieldValue;

    fn quote(quantity: impl Into<FieldValue>, unit_price: impl Into<FieldValue>) -> FormValue {
        [("quantity", quantity.into()), ("unitPrice", unit_price.into())]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_discount_codes() {
        assert_eq!(DiscountCode::parse("DESC10").rate(), 0.10);
        assert_eq!(DiscountCode::parse("DESC20").rate(), 0.20);
        assert_eq!(DiscountCode::parse("desc10"), DiscountCode::None);
        assert_eq!(DiscountCode::parse("").rate(), 0.0);
    }

    #[test]
    fn test_missing_inputs_count_as_zero() {
        assert_eq!(subtotal(&quote(FieldValue::Null, 100.0)), 0.0);
        assert_eq!(subtotal(&quote("abc", 100.0)), 0.0);
        assert_eq!(subtotal(&quote("3", "2.5")), 7.5);
    }

    #[test]
    fn test_discount_uses_previous_total() {
        let value = quote(3.0, 100.0);
        let mut calculator = QuoteCalculator::default();
        assert_eq!(calculator.recalculate(&value), 300.0);

        assert_eq!(calculator.apply_discount(DiscountCode::Desc10, &value), 270.0);
        assert_eq!(calculator.discount_amount(), 30.0);

        // Switching codes discounts the already discounted total.
        assert_eq!(calculator.apply_discount(DiscountCode::Desc20, &value), 246.0);
        assert_eq!(calculator.discount_amount(), 54.0);

        calculator.apply_discount(DiscountCode::None, &value);
        assert_eq!(calculator.total(), 300.0);
    }

    #[test]
    fn test_total_keeps_discount_when_inputs_change() {
        let mut calculator = QuoteCalculator::default();
        calculator.recalculate(&quote(1.0, 100.0));
        calculator.apply_discount(DiscountCode::Desc10, &quote(1.0, 100.0));
        assert_eq!(calculator.recalculate(&quote(2.0, 100.0)), 190.0);

        calculator.clear();
        assert_eq!(calculator.total(), 0.0);
        assert_eq!(calculator.discount_amount(), 0.0);
    }
}
