//! Pure derivations over the product list: dashboard totals and filtering.
//!
//! Nothing here holds state or fails; both functions recompute from whatever
//! snapshot the caller passes in.

use crate::model::{Product, ProductStatus};

/// Dashboard summary over the full, unfiltered product list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stats {
    pub total: usize,
    pub pending: usize,
    pub delivered: usize,
    pub returned: usize,
    pub failed: usize,
    /// Sum of purchase prices over all products.
    pub total_spent: f64,
    /// Sum of selling prices over delivered products only.
    pub total_revenue: f64,
}

/// Computes the dashboard totals in one pass.
pub fn summarize(products: &[Product]) -> Stats {
    let mut stats = Stats {
        total: products.len(),
        ..Stats::default()
    };
    for product in products {
        match product.status {
            ProductStatus::Pending => stats.pending += 1,
            ProductStatus::Delivered => {
                stats.delivered += 1;
                stats.total_revenue += product.price;
            }
            ProductStatus::Returned => stats.returned += 1,
            ProductStatus::Failed => stats.failed += 1,
        }
        stats.total_spent += product.purchase_price;
    }
    stats
}

/// Products whose name contains `search` (case-insensitive) and whose status
/// matches the filter; `None` matches every status.
pub fn filter_products<'a>(
    products: &'a [Product],
    search: &str,
    status: Option<ProductStatus>,
) -> Vec<&'a Product> {
    let needle = search.to_lowercase();
    products
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .filter(|p| status.map_or(true, |wanted| p.status == wanted))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProductId;
    use chrono::Utc;
    use uuid::Uuid;

    fn product(name: &str, purchase_price: f64, price: f64, status: ProductStatus) -> Product {
        Product {
            id: ProductId(Uuid::new_v4()),
            name: name.to_string(),
            price,
            purchase_price,
            status,
            quantity: 1,
            category: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn empty_list_summarizes_to_zero() {
        assert_eq!(summarize(&[]), Stats::default());
    }

    #[test]
    fn totals_follow_status_rules() {
        let products = vec![
            product("Lamp", 10.0, 0.0, ProductStatus::Pending),
            product("Desk", 5.0, 20.0, ProductStatus::Delivered),
        ];
        let stats = summarize(&products);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.delivered, 1);
        assert_eq!(stats.returned, 0);
        assert_eq!(stats.failed, 0);
        // Spend counts every product; revenue counts delivered only.
        assert_eq!(stats.total_spent, 15.0);
        assert_eq!(stats.total_revenue, 20.0);
    }

    #[test]
    fn revenue_ignores_undelivered_prices() {
        let products = vec![
            product("Lamp", 10.0, 99.0, ProductStatus::Returned),
            product("Desk", 10.0, 50.0, ProductStatus::Failed),
        ];
        let stats = summarize(&products);
        assert_eq!(stats.total_revenue, 0.0);
        assert_eq!(stats.total_spent, 20.0);
    }

    #[test]
    fn filter_combines_search_and_status() {
        let products = vec![
            product("abc lamp", 1.0, 2.0, ProductStatus::Failed),
            product("ABC desk", 1.0, 2.0, ProductStatus::Pending),
            product("clock", 1.0, 2.0, ProductStatus::Failed),
        ];
        let hits = filter_products(&products, "abc", Some(ProductStatus::Failed));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "abc lamp");
    }

    #[test]
    fn empty_search_with_no_status_matches_all() {
        let products = vec![
            product("Lamp", 1.0, 2.0, ProductStatus::Pending),
            product("Desk", 1.0, 2.0, ProductStatus::Delivered),
        ];
        assert_eq!(filter_products(&products, "", None).len(), 2);
    }
}
