//! Inventory summary figures.

use crate::model::Product;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InventoryStats {
    pub total_products: usize,
    /// Sum of `price * (1 - discount) * stock`; unparsable fields count as 0.
    pub total_inventory_value: f64,
}

impl InventoryStats {
    pub fn from_products(products: &[Product]) -> Self {
        Self {
            total_products: products.len(),
            total_inventory_value: products.iter().map(Product::line_value).sum(),
        }
    }
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
    fn test_stats_of_empty_inventory() {
        assert_eq!(InventoryStats::from_products(&[]), InventoryStats::default());
    }

    #[test]
    fn test_stats_sum_line_values() {
        let products = [
            product("100", "0.25", "4"),
            product("10", "0", "3"),
            product("abc", "0.1", "100"),
            product("50", "", "x"),
        ];
        let stats = InventoryStats::from_products(&products);
        assert_eq!(stats.total_products, 4);
        assert_eq!(stats.total_inventory_value, 330.0);
    }
}
