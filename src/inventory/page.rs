//! [`FormPage`] implementation of the inventory manager.
//!
//! The page keeps the product list and its [`InventoryStats`] in sync with the
//! remote store and runs a product form in either create or edit mode. Every
//! store call is awaited inside the page loop, so a second command sent while
//! one is in flight waits in the mailbox.

use super::actions::*;
use super::error::InventoryError;
use super::stats::InventoryStats;
use crate::model::{is_category, is_rating, Product, ProductDraft, ProductPatch};
use crate::prompt::Prompt;
use crate::store::{ProductStore, StoreError};
use async_trait::async_trait;
use form_framework::{parse_float, parse_int, FormControl, FormEvent, FormGroup, FormPage, FormStatus, Observers, Source, Validator};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const INCOMPLETE_MESSAGE: &str = "Please fill in all fields correctly";

/// Collaborators of the inventory page.
#[derive(Clone)]
pub struct InventoryContext {
    pub store: ProductStore,
    pub prompt: Arc<dyn Prompt>,
}

impl InventoryContext {
    pub fn new(store: ProductStore, prompt: Arc<dyn Prompt>) -> Self {
        Self { store, prompt }
    }
}

pub struct InventoryPage {
    form: FormGroup,
    products: Vec<Product>,
    stats: InventoryStats,
    editing_id: Option<String>,
    form_status: FormStatus,
    discounted_price: f64,
}

impl InventoryPage {
    pub fn new() -> Result<Self, InventoryError> {
        let form = Self::build_form()?;
        Ok(Self {
            form_status: form.status(),
            form,
            products: Vec::new(),
            stats: InventoryStats::default(),
            editing_id: None,
            discounted_price: 0.0,
        })
    }

    /// The product form. Every field is required.
    pub fn build_form() -> Result<FormGroup, regex::Error> {
        let field = |name: &str, label: &str, rules: Vec<Validator>| {
            FormControl::new(name, "")
                .labelled(label)
                .with_validator(Validator::Required)
                .with_validators(rules)
        };
        let choice = |kind: &str, message: &str, allowed: fn(&str) -> bool| {
            Validator::custom(kind, message, move |value| value.is_empty() || allowed(&value.to_text()))
        };

        Ok(FormGroup::new()
            .with_control(field("title", "Title", vec![Validator::MinLength(3)]))
            .with_control(field("description", "Description", vec![Validator::MinLength(10)]))
            .with_control(field("category", "Category", vec![choice("category", "Unknown category", is_category)]))
            .with_control(field("price", "Price", vec![Validator::pattern(r"^\d+(\.\d{1,2})?$")?]))
            .with_control(field(
                "discount",
                "Discount",
                vec![Validator::pattern(r"^0(\.\d{1,2})?$")?, Validator::Max(0.99)],
            ))
            .with_control(field("rating", "Rating", vec![choice("rating", "Rating must be 1 to 5", is_rating)]))
            .with_control(field("stock", "Stock", vec![Validator::pattern(r"^\d+$")?]))
            .with_control(field("brand", "Brand", vec![Validator::MinLength(2)]))
            .with_control(field("weight", "Weight", vec![Validator::pattern(r"^\d+$")?])))
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn stats(&self) -> InventoryStats {
        self.stats
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.editing_id.as_deref()
    }

    async fn load(&mut self, ctx: &InventoryContext) -> Result<usize, InventoryError> {
        let result = ctx.store.list().await;

        match result {
            Ok(products) => {
                self.stats = InventoryStats::from_products(&products);
                self.products = products;
                info!(
                    count = self.stats.total_products,
                    value = self.stats.total_inventory_value,
                    "Inventory loaded"
                );
                Ok(self.products.len())
            }
            Err(e) => {
                warn!(error = %e, "Inventory load failed");
                ctx.prompt.alert(&format!(
                    "Error loading products. Check that the API is running at {}",
                    ctx.store.resource_url()
                ));
                Err(e.into())
            }
        }
    }

    /// Reloads after a successful mutation. A failed reload has already been
    /// reported to the user and does not undo the mutation.
    async fn reload(&mut self, ctx: &InventoryContext) {
        if let Err(e) = self.load(ctx).await {
            debug!(error = %e, "Reload after mutation failed");
        }
    }

    fn reset_form(&mut self) {
        self.form.reset();
        self.editing_id = None;
        self.discounted_price = 0.0;
    }

    async fn save(&mut self, ctx: &InventoryContext) -> Result<Product, InventoryError> {
        if !self.form.is_valid() {
            self.form.mark_all_touched();
            ctx.prompt.alert(INCOMPLETE_MESSAGE);
            return Err(InventoryError::InvalidForm);
        }

        let draft = ProductDraft::from_form(&self.form.value());
        let (result, action) = match self.editing_id.clone() {
            Some(id) => (ctx.store.update(&id, &ProductPatch::from(draft)).await, "updating"),
            None => (ctx.store.create(&draft).await, "creating"),
        };

        match result {
            Ok(product) => {
                let message = if self.editing_id.is_some() {
                    "Product updated successfully"
                } else {
                    "Product created successfully"
                };
                info!(id = %product.id, "Product saved");
                self.reload(ctx).await;
                self.reset_form();
                ctx.prompt.alert(message);
                Ok(product)
            }
            Err(e) => Err(self.report(ctx, action, e)),
        }
    }

    async fn edit(&mut self, id: String, ctx: &InventoryContext) -> Result<Product, InventoryError> {
        let result = ctx.store.get_by_id(&id).await;

        let product = result.map_err(|e| self.report(ctx, "loading", e))?;
        self.form.patch_value(product.form_values());
        info!(%id, title = %product.title, "Editing product");
        self.editing_id = Some(id);
        Ok(product)
    }

    async fn delete(&mut self, id: String, title: &str, ctx: &InventoryContext) -> Result<DeleteOutcome, InventoryError> {
        let question = format!(
            "Are you sure you want to delete the product \"{}\"?\n\nThis action cannot be undone.",
            title
        );
        if !ctx.prompt.confirm(&question) {
            debug!(%id, "Delete cancelled");
            return Ok(DeleteOutcome::Cancelled);
        }

        let result = ctx.store.remove(&id).await;

        let confirmation = result.map_err(|e| self.report(ctx, "deleting", e))?;
        info!(%id, "Product deleted");
        self.reload(ctx).await;
        ctx.prompt.alert("Product deleted successfully");
        if self.editing_id.as_deref() == Some(id.as_str()) {
            self.reset_form();
        }
        Ok(DeleteOutcome::Deleted(confirmation))
    }

    fn report(&self, ctx: &InventoryContext, action: &str, e: StoreError) -> InventoryError {
        warn!(action, error = %e, "Store operation failed");
        ctx.prompt.alert(&format!("Error {} product: {}", action, e));
        e.into()
    }
}

#[async_trait]
impl FormPage for InventoryPage {
    type Reaction = InventoryReaction;
    type Command = InventoryCommand;
    type Reply = InventoryReply;
    type View = InventoryView;
    type Context = InventoryContext;
    type Error = InventoryError;

    fn form(&self) -> &FormGroup {
        &self.form
    }

    fn form_mut(&mut self) -> &mut FormGroup {
        &mut self.form
    }

    fn observe(&self, observers: &mut Observers<InventoryReaction>) {
        observers.on(Source::GroupStatus, InventoryReaction::TrackStatus);
        observers.on_debounced(Source::GroupValue, PREVIEW_DEBOUNCE, InventoryReaction::PreviewPrice);
        observers.on_debounced(Source::field_status("title"), TITLE_DEBOUNCE, InventoryReaction::TitleStatus);
        observers.on_debounced(Source::field_value("price"), PRICE_DEBOUNCE, InventoryReaction::PriceWarning);
        observers.on_debounced(
            Source::field_value("discount"),
            DISCOUNT_DEBOUNCE,
            InventoryReaction::DiscountWarning,
        );
        observers.on(Source::field_status("stock"), InventoryReaction::LowStock);
    }

    fn view(&self) -> InventoryView {
        InventoryView {
            products: self.products.clone(),
            stats: self.stats,
            value: self.form.value(),
            form_status: self.form_status,
            editing_id: self.editing_id.clone(),
            discounted_price: self.discounted_price,
            invalid_fields: self
                .form
                .controls()
                .filter(|control| control.is_invalid() && control.is_touched())
                .map(|control| control.name().to_string())
                .collect(),
        }
    }

    async fn on_start(&mut self, ctx: &InventoryContext) -> Result<(), InventoryError> {
        self.load(ctx).await.map(|_| ())
    }

    async fn react(
        &mut self,
        reaction: InventoryReaction,
        event: &FormEvent,
        _ctx: &InventoryContext,
    ) -> Result<(), InventoryError> {
        match reaction {
            InventoryReaction::TrackStatus => {
                if let Some(status) = event.status() {
                    self.form_status = status;
                    debug!(%status, "Form status");
                }
            }
            InventoryReaction::PreviewPrice => {
                let Some(value) = event.group_value() else {
                    return Ok(());
                };
                let stock = value.get("stock").as_integer().unwrap_or(0);
                self.discounted_price = discounted_price(&value.text("price"), &value.text("discount"));
                debug!(
                    discounted_price = self.discounted_price,
                    line_value = %format!("{:.2}", self.discounted_price * stock as f64),
                    "Price preview"
                );
            }
            InventoryReaction::TitleStatus => {
                if event.status() == Some(FormStatus::Valid) {
                    debug!("Title valid");
                }
            }
            InventoryReaction::PriceWarning => {
                let price = event.field_value().and_then(|v| v.as_number());
                if let Some(price) = price.filter(|p| *p > HIGH_PRICE) {
                    info!(price, "High price");
                }
            }
            InventoryReaction::DiscountWarning => {
                let discount = event.field_value().and_then(|v| v.as_number());
                if let Some(discount) = discount.filter(|d| *d > DEEP_DISCOUNT) {
                    info!(percent = %format!("{:.0}%", discount * 100.0), "Deep discount");
                }
            }
            InventoryReaction::LowStock => {
                if event.status() != Some(FormStatus::Valid) {
                    return Ok(());
                }
                let stock = self.form.get("stock").and_then(|c| parse_int(&c.value().to_text()));
                if let Some(stock) = stock.filter(|s| *s < LOW_STOCK) {
                    info!(stock, "Low stock");
                }
            }
        }
        Ok(())
    }

    async fn handle_command(
        &mut self,
        command: InventoryCommand,
        ctx: &InventoryContext,
    ) -> Result<InventoryReply, InventoryError> {
        match command {
            InventoryCommand::Load => self.load(ctx).await.map(InventoryReply::Load),
            InventoryCommand::Save => self.save(ctx).await.map(InventoryReply::Save),
            InventoryCommand::Edit(id) => self.edit(id, ctx).await.map(InventoryReply::Edit),
            InventoryCommand::Delete { id, title } => self.delete(id, &title, ctx).await.map(InventoryReply::Delete),
            InventoryCommand::Reset => {
                self.reset_form();
                Ok(InventoryReply::Reset(()))
            }
        }
    }
}

/// Unit price after discount for raw form text, as the preview computes it.
pub fn discounted_price(price: &str, discount: &str) -> f64 {
    parse_float(price).unwrap_or(0.0) * (1.0 - parse_float(discount).unwrap_or(0.0))
}
