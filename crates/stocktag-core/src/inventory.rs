//! # Inventory Math
//!
//! Pure aggregation, search and filtering over product sets.
//!
//! The persistence layer fetches the active product set and hands it to
//! these functions; nothing here touches a store.
//!
//! ## Summary Formulas
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  total_value  = Σ (price × stock)                                       │
//! │  total_cost   = Σ (cost × stock)                                        │
//! │  margin %     = (total_value − total_cost) / total_cost × 100           │
//! │                 (0 when total_cost is 0)                                │
//! │  low stock    = count where 0 < stock ≤ min_stock                       │
//! │  out of stock = count where stock == 0                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::types::{InventorySummary, Product, ProductFilters};

// =============================================================================
// Sorting
// =============================================================================

/// Sorts newest-created first (later timestamp wins), the default
/// ordering for product listings.
pub fn sort_newest_first(products: &mut [Product]) {
    products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

// =============================================================================
// Search & Filters
// =============================================================================

/// Case-insensitive substring search across name, SKU, description and
/// barcode data.
pub fn search(products: Vec<Product>, query: &str) -> Vec<Product> {
    let term = query.to_lowercase();
    if term.is_empty() {
        return products;
    }

    products
        .into_iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&term)
                || p.sku.to_lowercase().contains(&term)
                || p.description
                    .as_deref()
                    .map(|d| d.to_lowercase().contains(&term))
                    .unwrap_or(false)
                || p.barcode_data.to_lowercase().contains(&term)
        })
        .collect()
}

/// Applies a conjunctive filter set; every set field must match.
pub fn apply_filters(products: Vec<Product>, filters: &ProductFilters) -> Vec<Product> {
    products
        .into_iter()
        .filter(|p| {
            if let Some(category) = &filters.category {
                if &p.category != category {
                    return false;
                }
            }
            if let Some(supplier) = &filters.supplier {
                if p.supplier.as_deref() != Some(supplier.as_str()) {
                    return false;
                }
            }
            if let Some(min) = filters.min_price_cents {
                if p.price_cents < min {
                    return false;
                }
            }
            if let Some(max) = filters.max_price_cents {
                if p.price_cents > max {
                    return false;
                }
            }
            if let Some(in_stock) = filters.in_stock {
                if in_stock != (p.stock > 0) {
                    return false;
                }
            }
            if let Some(symbology) = filters.barcode_type {
                if p.barcode_type != symbology {
                    return false;
                }
            }
            true
        })
        .collect()
}

/// Products with positive stock at or below their low-stock threshold.
pub fn low_stock(products: Vec<Product>) -> Vec<Product> {
    products.into_iter().filter(|p| p.is_low_stock()).collect()
}

// =============================================================================
// Summary
// =============================================================================

/// Derives the inventory summary over a set of (active) products.
pub fn summarize(products: &[Product]) -> InventorySummary {
    let total_value_cents: i64 = products.iter().map(Product::stock_value_cents).sum();
    let total_cost_cents: i64 = products.iter().map(Product::stock_cost_cents).sum();

    let margin_percent = if total_cost_cents == 0 {
        0.0
    } else {
        (total_value_cents - total_cost_cents) as f64 / total_cost_cents as f64 * 100.0
    };

    InventorySummary {
        total_products: products.len(),
        total_value_cents,
        total_cost_cents,
        margin_percent,
        low_stock_products: products.iter().filter(|p| p.is_low_stock()).count(),
        out_of_stock_products: products.iter().filter(|p| p.stock == 0).count(),
    }
}

/// Clamped stock subtraction: never goes below zero.
#[inline]
pub fn subtract_stock(stock: i64, quantity: i64) -> i64 {
    (stock - quantity).max(0)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BarcodeSource, Symbology};
    use chrono::{Duration, Utc};

    fn product(name: &str, price_cents: i64, cost_cents: i64, stock: i64) -> Product {
        Product {
            id: name.to_string(),
            name: name.to_string(),
            sku: format!("{}-SKU", name.to_uppercase()),
            description: None,
            price_cents,
            cost_cents,
            category: "General".to_string(),
            supplier: None,
            barcode_type: Symbology::Code128,
            barcode_data: format!("{}-CODE", name.to_uppercase()),
            barcode_source: BarcodeSource::Internal,
            stock,
            min_stock: 2,
            max_stock: 100,
            location: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_summary_two_products() {
        // price 10 / cost 5 / stock 2 and price 20 / cost 15 / stock 1
        // → value 40, cost 25, margin 60%
        let products = vec![product("a", 1000, 500, 2), product("b", 2000, 1500, 1)];
        let summary = summarize(&products);

        assert_eq!(summary.total_products, 2);
        assert_eq!(summary.total_value_cents, 4000);
        assert_eq!(summary.total_cost_cents, 2500);
        assert!((summary.margin_percent - 60.0).abs() < f64::EPSILON);
        assert_eq!(summary.low_stock_products, 2);
        assert_eq!(summary.out_of_stock_products, 0);
    }

    #[test]
    fn test_summary_zero_cost_has_zero_margin() {
        let products = vec![product("free", 1000, 0, 3)];
        let summary = summarize(&products);
        assert_eq!(summary.margin_percent, 0.0);
        assert_eq!(summary.total_value_cents, 3000);
    }

    #[test]
    fn test_summary_counts_stock_states() {
        let mut gone = product("gone", 100, 50, 0);
        gone.min_stock = 5;
        let products = vec![
            product("low", 100, 50, 1),   // 0 < 1 ≤ 2 → low
            product("fine", 100, 50, 50), // above threshold
            gone,                         // out of stock, not low
        ];
        let summary = summarize(&products);
        assert_eq!(summary.low_stock_products, 1);
        assert_eq!(summary.out_of_stock_products, 1);
    }

    #[test]
    fn test_subtract_stock_clamps_at_zero() {
        assert_eq!(subtract_stock(3, 5), 0);
        assert_eq!(subtract_stock(5, 3), 2);
        assert_eq!(subtract_stock(0, 1), 0);
    }

    #[test]
    fn test_sort_newest_first() {
        let now = Utc::now();
        let mut old = product("old", 1, 1, 1);
        old.created_at = now - Duration::days(2);
        let mut fresh = product("fresh", 1, 1, 1);
        fresh.created_at = now;

        let mut products = vec![old, fresh];
        sort_newest_first(&mut products);
        assert_eq!(products[0].name, "fresh");
        assert_eq!(products[1].name, "old");
    }

    #[test]
    fn test_search_matches_all_text_fields() {
        let mut described = product("plain", 1, 1, 1);
        described.description = Some("Wireless Mouse".to_string());
        let products = vec![product("Laptop", 1, 1, 1), described];

        assert_eq!(search(products.clone(), "laptop").len(), 1);
        assert_eq!(search(products.clone(), "wireless").len(), 1);
        assert_eq!(search(products.clone(), "plain-code").len(), 1);
        assert_eq!(search(products.clone(), "").len(), 2);
        assert_eq!(search(products, "nothing-here").len(), 0);
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let mut cheap = product("cheap", 500, 100, 3);
        cheap.category = "Accessories".to_string();
        let mut pricey = product("pricey", 5000, 1000, 0);
        pricey.category = "Accessories".to_string();

        let filters = ProductFilters {
            category: Some("Accessories".to_string()),
            in_stock: Some(true),
            ..ProductFilters::default()
        };
        let out = apply_filters(vec![cheap, pricey], &filters);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "cheap");
    }

    #[test]
    fn test_filter_price_range_inclusive() {
        let products = vec![
            product("a", 100, 1, 1),
            product("b", 200, 1, 1),
            product("c", 300, 1, 1),
        ];
        let filters = ProductFilters {
            min_price_cents: Some(100),
            max_price_cents: Some(200),
            ..ProductFilters::default()
        };
        let out = apply_filters(products, &filters);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_filter_by_symbology_and_supplier() {
        let mut ean = product("ean", 100, 1, 1);
        ean.barcode_type = Symbology::Ean13;
        ean.supplier = Some("Acme".to_string());
        let code = product("code", 100, 1, 1);

        let filters = ProductFilters {
            barcode_type: Some(Symbology::Ean13),
            supplier: Some("Acme".to_string()),
            ..ProductFilters::default()
        };
        let out = apply_filters(vec![ean, code], &filters);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "ean");
    }
}
