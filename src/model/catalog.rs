//! Fixed choices offered by the inventory form.

/// Product categories, in display order.
pub const CATEGORIES: [&str; 6] = ["Electronics", "Clothing", "Accessories", "Furniture", "Food", "Sports"];

/// Allowed ratings, as the form submits them.
pub const RATINGS: [&str; 5] = ["1", "2", "3", "4", "5"];

pub fn is_category(value: &str) -> bool {
    CATEGORIES.contains(&value)
}

pub fn is_rating(value: &str) -> bool {
    RATINGS.contains(&value)
}
