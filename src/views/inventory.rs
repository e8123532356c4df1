//! Inventory views.

use crate::models::Product;
use std::collections::HashSet;

/// Stock label shown next to a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    /// Quantity is zero
    OutOfStock,
    /// At or below the minimum stock threshold
    Low,
    /// Above the threshold
    InStock,
}

/// Whether a product is at or below its minimum stock. Zero quantity counts.
#[must_use]
pub const fn is_low_stock(product: &Product) -> bool {
    product.quantity <= product.min_stock
}

/// Products at or below their minimum stock, in snapshot order.
#[must_use]
pub fn low_stock(products: &[Product]) -> Vec<&Product> {
    products.iter().filter(|p| is_low_stock(p)).collect()
}

/// Stock label for one product.
#[must_use]
pub const fn stock_status(product: &Product) -> StockStatus {
    if product.quantity == 0 {
        StockStatus::OutOfStock
    } else if is_low_stock(product) {
        StockStatus::Low
    } else {
        StockStatus::InStock
    }
}

/// Per-category aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    /// Category label, exactly as stored
    pub category: String,
    /// Products in this category
    pub product_count: usize,
    /// Sum of their quantities
    pub total_quantity: u64,
}

/// Groups products by exact category label, in order of first appearance.
#[must_use]
pub fn category_summary(products: &[Product]) -> Vec<CategorySummary> {
    let mut summary: Vec<CategorySummary> = Vec::new();
    for product in products {
        match summary.iter_mut().find(|s| s.category == product.category) {
            Some(entry) => {
                entry.product_count += 1;
                entry.total_quantity += u64::from(product.quantity);
            }
            None => summary.push(CategorySummary {
                category: product.category.clone(),
                product_count: 1,
                total_quantity: u64::from(product.quantity),
            }),
        }
    }
    summary
}

/// Headline numbers for the inventory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InventoryTotals {
    /// Number of products
    pub product_count: usize,
    /// Sum of all quantities
    pub total_quantity: u64,
    /// Products at or below minimum stock
    pub low_stock_count: usize,
    /// Distinct category labels
    pub category_count: usize,
}

/// Computes [`InventoryTotals`].
#[must_use]
pub fn inventory_totals(products: &[Product]) -> InventoryTotals {
    InventoryTotals {
        product_count: products.len(),
        total_quantity: products.iter().map(|p| u64::from(p.quantity)).sum(),
        low_stock_count: products.iter().filter(|p| is_low_stock(p)).count(),
        category_count: products
            .iter()
            .map(|p| p.category.as_str())
            .collect::<HashSet<_>>()
            .len(),
    }
}

/// The `n` products with the highest quantity. Equal quantities keep snapshot order.
#[must_use]
pub fn top_by_quantity(products: &[Product], n: usize) -> Vec<&Product> {
    let mut sorted: Vec<&Product> = products.iter().collect();
    sorted.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    sorted.truncate(n);
    sorted
}

/// Case-insensitive substring search on name or category, optionally limited
/// to one exact category. An empty term matches everything.
#[must_use]
pub fn search_products<'a>(
    products: &'a [Product],
    term: &str,
    category: Option<&str>,
) -> Vec<&'a Product> {
    let term = term.to_lowercase();
    products
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&term) || p.category.to_lowercase().contains(&term)
        })
        .filter(|p| category.is_none_or(|c| p.category == c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(name: &str, category: &str, quantity: u32, min_stock: u32) -> Product {
        Product {
            id: name.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            quantity,
            unit: "กิโลกรัม".to_string(),
            min_stock,
            harvest_date: None,
            last_updated: Utc::now(),
        }
    }

    fn sample() -> Vec<Product> {
        vec![
            product("ข้าวหอมมะลิ", "ข้าว", 1500, 200),
            product("มะม่วงน้ำดอกไม้", "ผลไม้", 50, 100),
            product("ข้าวเหนียว", "ข้าว", 0, 100),
            product("Tomato", "Vegetable", 100, 100),
        ]
    }

    #[test]
    fn test_low_stock_is_inclusive() {
        let products = sample();
        let names: Vec<&str> = low_stock(&products).iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["มะม่วงน้ำดอกไม้", "ข้าวเหนียว", "Tomato"]);
        for p in &products {
            assert_eq!(low_stock(&products).contains(&p), p.quantity <= p.min_stock);
        }
    }

    #[test]
    fn test_stock_status() {
        let products = sample();
        assert_eq!(stock_status(&products[0]), StockStatus::InStock);
        assert_eq!(stock_status(&products[1]), StockStatus::Low);
        assert_eq!(stock_status(&products[2]), StockStatus::OutOfStock);
        assert_eq!(stock_status(&products[3]), StockStatus::Low);
    }

    #[test]
    fn test_category_summary_keeps_first_seen_order() {
        let summary = category_summary(&sample());
        let categories: Vec<&str> = summary.iter().map(|s| s.category.as_str()).collect();
        assert_eq!(categories, vec!["ข้าว", "ผลไม้", "Vegetable"]);
        assert_eq!(summary[0].product_count, 2);
        assert_eq!(summary[0].total_quantity, 1500);
    }

    #[test]
    fn test_category_labels_are_case_sensitive() {
        let products = vec![product("a", "Fruit", 1, 0), product("b", "fruit", 2, 0)];
        assert_eq!(category_summary(&products).len(), 2);
    }

    #[test]
    fn test_inventory_totals() {
        let totals = inventory_totals(&sample());
        assert_eq!(totals.product_count, 4);
        assert_eq!(totals.total_quantity, 1650);
        assert_eq!(totals.low_stock_count, 3);
        assert_eq!(totals.category_count, 3);
        assert_eq!(inventory_totals(&[]), InventoryTotals::default());
    }

    #[test]
    fn test_top_by_quantity() {
        let products = sample();
        let top: Vec<&str> = top_by_quantity(&products, 2)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(top, vec!["ข้าวหอมมะลิ", "Tomato"]);
        assert_eq!(top_by_quantity(&products, 10).len(), 4);
    }

    #[test]
    fn test_search_products() {
        let products = sample();
        assert_eq!(search_products(&products, "ข้าว", None).len(), 2);
        assert_eq!(search_products(&products, "toma", None).len(), 1);
        assert_eq!(search_products(&products, "VEG", None).len(), 1);
        assert_eq!(search_products(&products, "", Some("ผลไม้")).len(), 1);
        assert!(search_products(&products, "ข้าว", Some("ผลไม้")).is_empty());
    }
}
