//! Reactions, commands and results of the inventory page.

use super::stats::InventoryStats;
use crate::model::Product;
use form_framework::{FormStatus, FormValue};
use serde_json::Value;
use std::time::Duration;

pub const PREVIEW_DEBOUNCE: Duration = Duration::from_millis(300);
pub const TITLE_DEBOUNCE: Duration = Duration::from_millis(300);
pub const PRICE_DEBOUNCE: Duration = Duration::from_millis(500);
pub const DISCOUNT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Prices above this are reported as unusually high.
pub const HIGH_PRICE: f64 = 1000.0;
/// Discounts above this are reported as unusually deep.
pub const DEEP_DISCOUNT: f64 = 0.5;
/// Stock below this is reported as low.
pub const LOW_STOCK: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryReaction {
    /// Tracks the form status.
    TrackStatus,
    /// Recomputes the discounted price preview.
    PreviewPrice,
    TitleStatus,
    PriceWarning,
    DiscountWarning,
    LowStock,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryCommand {
    /// Reloads the product list.
    Load,
    /// Creates a product, or updates the one being edited.
    Save,
    /// Fetches a product into the form and enters edit mode.
    Edit(String),
    /// Deletes a product after the user confirms.
    Delete { id: String, title: String },
    /// Clears the form and leaves edit mode.
    Reset,
}

/// Results from InventoryCommands - variants match 1:1 with InventoryCommand
#[derive(Debug, Clone, PartialEq)]
pub enum InventoryReply {
    /// Number of products loaded.
    Load(usize),
    Save(Product),
    Edit(Product),
    Delete(DeleteOutcome),
    Reset(()),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    /// The backend's confirmation payload.
    Deleted(Value),
    /// The user declined; nothing was sent.
    Cancelled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryView {
    pub products: Vec<Product>,
    pub stats: InventoryStats,
    pub value: FormValue,
    pub form_status: FormStatus,
    pub editing_id: Option<String>,
    pub discounted_price: f64,
    /// Names of the fields that are invalid and were touched.
    pub invalid_fields: Vec<String>,
}

impl InventoryView {
    pub fn is_edit_mode(&self) -> bool {
        self.editing_id.is_some()
    }
}
