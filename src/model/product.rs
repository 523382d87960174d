//! Represents a product record as the remote store holds it.
//!
//! Every field is carried as text, exactly as the backend and the form exchange
//! it. Numeric readings go through the leading-number rule, so `"12kg"` reads as
//! `12` and anything unparsable reads as `0`.
//!
//! See [`ProductStore`](crate::store::ProductStore) for the operations on it.

use form_framework::{parse_float, parse_int, FormValue};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub price: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub discount: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub rating: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub stock: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub brand: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub weight: String,
}

/// Form fields of a product, in form order. `id` is not editable.
pub const PRODUCT_FIELDS: [&str; 9] = [
    "title",
    "description",
    "category",
    "price",
    "discount",
    "rating",
    "stock",
    "brand",
    "weight",
];

impl Product {
    pub fn price_value(&self) -> f64 {
        parse_float(&self.price).unwrap_or(0.0)
    }

    pub fn discount_value(&self) -> f64 {
        parse_float(&self.discount).unwrap_or(0.0)
    }

    pub fn stock_value(&self) -> f64 {
        parse_int(&self.stock).unwrap_or(0) as f64
    }

    /// Unit price after the product's own discount.
    pub fn final_price(&self) -> f64 {
        self.price_value() * (1.0 - self.discount_value())
    }

    /// Value of the stock on hand at the final price.
    pub fn line_value(&self) -> f64 {
        self.final_price() * self.stock_value()
    }

    pub fn stars(&self) -> String {
        stars(&self.rating)
    }

    /// Field values in form order, ready to patch into the product form.
    pub fn form_values(&self) -> Vec<(&'static str, String)> {
        let values = [
            &self.title,
            &self.description,
            &self.category,
            &self.price,
            &self.discount,
            &self.rating,
            &self.stock,
            &self.brand,
            &self.weight,
        ];
        PRODUCT_FIELDS.into_iter().zip(values.into_iter().cloned()).collect()
    }
}

/// Filled stars for the rating followed by empty ones, five in total.
pub fn stars(rating: &str) -> String {
    let filled = parse_int(rating).unwrap_or(0).clamp(0, 5) as usize;
    format!("{}{}", "⭐".repeat(filled), "☆".repeat(5 - filled))
}

/// Body of a create request: a product without its id.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ProductDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: String,
    pub discount: String,
    pub rating: String,
    pub stock: String,
    pub brand: String,
    pub weight: String,
}

impl ProductDraft {
    pub fn from_form(value: &FormValue) -> Self {
        Self {
            title: value.text("title"),
            description: value.text("description"),
            category: value.text("category"),
            price: value.text("price"),
            discount: value.text("discount"),
            rating: value.text("rating"),
            stock: value.text("stock"),
            brand: value.text("brand"),
            weight: value.text("weight"),
        }
    }
}

/// Body of an update request. Absent fields are left as they are.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
}

impl From<ProductDraft> for ProductPatch {
    fn from(draft: ProductDraft) -> Self {
        Self {
            title: Some(draft.title),
            description: Some(draft.description),
            category: Some(draft.category),
            price: Some(draft.price),
            discount: Some(draft.discount),
            rating: Some(draft.rating),
            stock: Some(draft.stock),
            brand: Some(draft.brand),
            weight: Some(draft.weight),
        }
    }
}

/// The `{ "products": ... }` wrapper every store response comes in.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Envelope<T> {
    pub products: T,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Text(String),
    Integer(i64),
    Number(f64),
    Bool(bool),
}

// Backends disagree on whether numeric fields are strings; accept both.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Loose>::deserialize(deserializer)? {
        None => String::new(),
        Some(Loose::Text(text)) => text,
        Some(Loose::Integer(n)) => n.to_string(),
        Some(Loose::Number(n)) => n.to_string(),
        Some(Loose::Bool(b)) => b.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price: &str, discount: &str, stock: &str) -> Product {
        Product {
            price: price.to_string(),
            discount: discount.to_string(),
            stock: stock.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_final_price_and_line_value() {
        let p = product("100", "0.25", "4");
        assert_eq!(p.final_price(), 75.0);
        assert_eq!(p.line_value(), 300.0);
    }

    #[test]
    fn test_unparsable_fields_read_as_zero() {
        assert_eq!(product("abc", "0.1", "3").line_value(), 0.0);
        assert_eq!(product("10", "", "3").line_value(), 30.0);
        assert_eq!(product("10", "0", "12.7").stock_value(), 12.0);
        assert_eq!(product("12abc", "0", "1").price_value(), 12.0);
    }

    #[test]
    fn test_stars() {
        assert_eq!(stars("3"), "⭐⭐⭐☆☆");
        assert_eq!(stars("9"), "⭐⭐⭐⭐⭐");
        assert_eq!(stars("x"), "☆☆☆☆☆");
    }

    #[test]
    fn test_form_values_follow_field_order() {
        let p = Product {
            id: "9".to_string(),
            title: "Desk".to_string(),
            category: "Furniture".to_string(),
            weight: "30".to_string(),
            ..Default::default()
        };
        let values = p.form_values();
        let names: Vec<_> = values.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, PRODUCT_FIELDS);
        assert_eq!(values[0], ("title", "Desk".to_string()));
        assert_eq!(values[2], ("category", "Furniture".to_string()));
        assert_eq!(values[8], ("weight", "30".to_string()));
    }

    #[test]
    fn test_lenient_deserialization() {
        let json = r#"{"id": 7, "title": "Desk", "price": 120.5, "stock": 3, "rating": "4", "weight": null}"#;
        let p: Product = serde_json::from_str(json).unwrap();
        assert_eq!(p.id, "7");
        assert_eq!(p.price, "120.5");
        assert_eq!(p.stock, "3");
        assert_eq!(p.weight, "");
        assert_eq!(p.brand, "");
    }

    #[test]
    fn test_patch_skips_absent_fields() {
        let patch = ProductPatch {
            price: Some("9.99".to_string()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_string(&patch).unwrap(), r#"{"price":"9.99"}"#);
    }

    #[test]
    fn test_draft_from_form() {
        let value: FormValue = [("title", "Lamp"), ("price", "15"), ("stock", "2")]
            .into_iter()
            .collect();
        let draft = ProductDraft::from_form(&value);
        assert_eq!(draft.title, "Lamp");
        assert_eq!(draft.stock, "2");
        assert_eq!(draft.brand, "");
    }
}
