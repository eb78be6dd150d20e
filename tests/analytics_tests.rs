//! Analytics ledger and reporting tests
//!
//! Covers the ranking order and truncation of the revenue report, CSV
//! rendering of report rows, and the validation applied to incoming sale
//! facts.

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use unvent::models::{ProductSales, SaleFact, WarehouseRevenue};
use unvent::services::AnalyticsService;
use unvent::validation;

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Ranking order used by the revenue report: revenue descending, then
/// warehouse id ascending for ties.
fn ranking_order(a: &WarehouseRevenue, b: &WarehouseRevenue) -> std::cmp::Ordering {
    b.total_revenue
        .cmp(&a.total_revenue)
        .then(a.warehouse_id.cmp(&b.warehouse_id))
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Sale facts may record a zero quantity but never a negative one
    #[test]
    fn test_sale_quantity_bounds() {
        assert!(validation::validate_sale_quantity(0).is_ok());
        assert!(validation::validate_sale_quantity(12).is_ok());
        assert!(validation::validate_sale_quantity(-1).is_err());
    }

    /// Sale amounts may be zero but never negative
    #[test]
    fn test_sale_amount_bounds() {
        assert!(validation::validate_sale_amount(Decimal::ZERO).is_ok());
        assert!(validation::validate_sale_amount(dec("59.97")).is_ok());
        assert!(validation::validate_sale_amount(dec("-0.01")).is_err());
    }

    /// Sale facts deserialize from the wire shape
    #[test]
    fn test_sale_fact_deserializes() {
        let fact: SaleFact = serde_json::from_value(serde_json::json!({
            "warehouse_id": 1,
            "product_id": 5,
            "quantity": 3,
            "total_amount": "59.97"
        }))
        .unwrap();

        assert_eq!(fact.warehouse_id, 1);
        assert_eq!(fact.product_id, 5);
        assert_eq!(fact.quantity, 3);
        assert_eq!(fact.total_amount, dec("59.97"));
    }

    /// Ranking puts higher revenue first and breaks ties on warehouse id
    #[test]
    fn test_ranking_order() {
        let mut rows = vec![
            WarehouseRevenue {
                warehouse_id: 3,
                address: "3 Quay St".to_string(),
                total_revenue: dec("100.00"),
            },
            WarehouseRevenue {
                warehouse_id: 1,
                address: "1 Dock Rd".to_string(),
                total_revenue: dec("250.00"),
            },
            WarehouseRevenue {
                warehouse_id: 2,
                address: "2 Pier Ln".to_string(),
                total_revenue: dec("100.00"),
            },
        ];

        rows.sort_by(ranking_order);

        let ids: Vec<i64> = rows.iter().map(|r| r.warehouse_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    /// Warehouses without any recorded sales still rank, with zero revenue
    #[test]
    fn test_ranking_includes_zero_revenue() {
        let mut rows = vec![
            WarehouseRevenue {
                warehouse_id: 8,
                address: "8 Yard Way".to_string(),
                total_revenue: Decimal::ZERO,
            },
            WarehouseRevenue {
                warehouse_id: 4,
                address: "4 Bay Ave".to_string(),
                total_revenue: dec("10.00"),
            },
        ];

        rows.sort_by(ranking_order);

        assert_eq!(rows[0].warehouse_id, 4);
        assert_eq!(rows[1].warehouse_id, 8);
        assert_eq!(rows[1].total_revenue, Decimal::ZERO);
    }

    /// CSV export writes a header row then one line per record
    #[test]
    fn test_csv_export_product_sales() {
        let rows = vec![
            ProductSales {
                product_name: "beans".to_string(),
                total_sold: 12,
                total_revenue: dec("59.88"),
            },
            ProductSales {
                product_name: "filters".to_string(),
                total_sold: 3,
                total_revenue: dec("8.97"),
            },
        ];

        let csv = AnalyticsService::export_to_csv(&rows).unwrap();
        let mut lines = csv.lines();

        assert_eq!(lines.next(), Some("product_name,total_sold,total_revenue"));
        assert_eq!(lines.next(), Some("beans,12,59.88"));
        assert_eq!(lines.next(), Some("filters,3,8.97"));
        assert_eq!(lines.next(), None);
    }

    /// Revenue rankings export with their own column set
    #[test]
    fn test_csv_export_warehouse_revenue() {
        let rows = vec![WarehouseRevenue {
            warehouse_id: 5,
            address: "12 Dock Rd".to_string(),
            total_revenue: dec("0"),
        }];

        let csv = AnalyticsService::export_to_csv(&rows).unwrap();
        assert_eq!(csv, "warehouse_id,address,total_revenue\n5,12 Dock Rd,0\n");
    }

    /// Exporting zero records yields an empty document
    #[test]
    fn test_csv_export_empty() {
        let rows: Vec<ProductSales> = vec![];
        let csv = AnalyticsService::export_to_csv(&rows).unwrap();
        assert!(csv.is_empty());
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for revenue totals
    fn revenue_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..=10_000_000).prop_map(|n| Decimal::new(n, 2))
    }

    /// Strategy for ranking rows with distinct warehouse ids
    fn rows_strategy() -> impl Strategy<Value = Vec<WarehouseRevenue>> {
        prop::collection::vec((1i64..=500, revenue_strategy()), 0..40).prop_map(|pairs| {
            pairs
                .into_iter()
                .enumerate()
                .map(|(i, (id_seed, total_revenue))| WarehouseRevenue {
                    warehouse_id: id_seed * 1000 + i as i64,
                    address: format!("warehouse {}", i),
                    total_revenue,
                })
                .collect()
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Sorted rankings are monotonically non-increasing in revenue
        #[test]
        fn prop_ranking_revenue_non_increasing(mut rows in rows_strategy()) {
            rows.sort_by(ranking_order);
            for pair in rows.windows(2) {
                prop_assert!(pair[0].total_revenue >= pair[1].total_revenue);
            }
        }

        /// Ties always resolve to the smaller warehouse id first
        #[test]
        fn prop_ranking_ties_break_on_id(mut rows in rows_strategy()) {
            rows.sort_by(ranking_order);
            for pair in rows.windows(2) {
                if pair[0].total_revenue == pair[1].total_revenue {
                    prop_assert!(pair[0].warehouse_id < pair[1].warehouse_id);
                }
            }
        }

        /// A ranking never carries more rows than the limit allows
        #[test]
        fn prop_ranking_capped_at_limit(rows in rows_strategy(), limit in 1usize..=15) {
            let expected = rows.len().min(limit);
            let ranked = integration_helpers::rank_warehouses(rows, limit);
            prop_assert_eq!(ranked.len(), expected);
        }

        /// CSV export yields one line per record plus a header
        #[test]
        fn prop_csv_line_count(rows in rows_strategy()) {
            let csv = AnalyticsService::export_to_csv(&rows).unwrap();
            if rows.is_empty() {
                prop_assert!(csv.is_empty());
            } else {
                prop_assert_eq!(csv.lines().count(), rows.len() + 1);
            }
        }
    }
}

// ============================================================================
// Integration Helpers
// ============================================================================

#[cfg(test)]
mod integration_helpers {
    use super::*;
    use std::collections::BTreeMap;

    /// Mirror of the ranking query: revenue descending with warehouse id
    /// breaking ties, truncated to the limit.
    pub fn rank_warehouses(mut rows: Vec<WarehouseRevenue>, limit: usize) -> Vec<WarehouseRevenue> {
        rows.sort_by(ranking_order);
        rows.truncate(limit);
        rows
    }

    /// Mirror of the per-warehouse sales aggregation: facts grouped by
    /// product with quantities and amounts summed, ordered by product name.
    pub fn aggregate_sales(facts: &[(i64, &'static str, i64, Decimal)]) -> Vec<ProductSales> {
        let mut grouped: BTreeMap<(&'static str, i64), (i64, Decimal)> = BTreeMap::new();

        for &(product_id, name, quantity, amount) in facts {
            let entry = grouped.entry((name, product_id)).or_insert((0, Decimal::ZERO));
            entry.0 += quantity;
            entry.1 += amount;
        }

        grouped
            .into_iter()
            .map(|((name, _id), (total_sold, total_revenue))| ProductSales {
                product_name: name.to_string(),
                total_sold,
                total_revenue,
            })
            .collect()
    }

    #[test]
    fn test_aggregate_sums_by_product() {
        let facts = [
            (5i64, "beans", 2i64, dec("9.98")),
            (5, "beans", 3, dec("14.97")),
            (7, "filters", 1, dec("2.99")),
        ];

        let report = aggregate_sales(&facts);

        assert_eq!(report.len(), 2);
        assert_eq!(report[0].product_name, "beans");
        assert_eq!(report[0].total_sold, 5);
        assert_eq!(report[0].total_revenue, dec("24.95"));
        assert_eq!(report[1].product_name, "filters");
        assert_eq!(report[1].total_sold, 1);
    }

    #[test]
    fn test_aggregate_orders_by_name() {
        let facts = [
            (2i64, "kettles", 1i64, dec("30.00")),
            (1, "aprons", 1, dec("12.00")),
        ];

        let report = aggregate_sales(&facts);

        assert_eq!(report[0].product_name, "aprons");
        assert_eq!(report[1].product_name, "kettles");
    }

    #[test]
    fn test_zero_quantity_facts_still_count_revenue() {
        // Corrections are recorded as zero-quantity facts with an amount
        let facts = [(3i64, "mugs", 0i64, dec("5.00"))];

        let report = aggregate_sales(&facts);

        assert_eq!(report[0].total_sold, 0);
        assert_eq!(report[0].total_revenue, dec("5.00"));
    }

    /// Thirteen warehouses ranked with the default limit keep the ten
    /// highest earners and drop the rest
    #[test]
    fn test_ranking_truncates_to_limit() {
        let rows: Vec<WarehouseRevenue> = (1..=13)
            .map(|i| WarehouseRevenue {
                warehouse_id: i,
                address: format!("{} Dock Rd", i),
                total_revenue: Decimal::from(i * 10),
            })
            .collect();

        let ranked = rank_warehouses(rows, 10);

        assert_eq!(ranked.len(), 10);
        assert_eq!(ranked[0].warehouse_id, 13);
        assert_eq!(ranked[9].warehouse_id, 4);
    }

    #[test]
    fn test_ranking_shorter_than_limit_keeps_all() {
        let rows = vec![
            WarehouseRevenue {
                warehouse_id: 2,
                address: "2 Pier Ln".to_string(),
                total_revenue: dec("5.00"),
            },
            WarehouseRevenue {
                warehouse_id: 1,
                address: "1 Dock Rd".to_string(),
                total_revenue: dec("9.00"),
            },
        ];

        let ranked = rank_warehouses(rows, 10);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].warehouse_id, 1);
    }
}
