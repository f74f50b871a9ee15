//! Merging the overall and tag-filtered category views
//!
//! Combines two category views of the same entity into one comparison row
//! per sub-category, aligned on the two most recent periods shared by the
//! union of both views.

use std::collections::{BTreeMap, BTreeSet};

use tracing::warn;

use super::category::{CategoryLedger, CategoryView};
use super::delta::percent_delta;
use crate::models::{EntityId, Money, PeriodId};

/// Comparison metrics for one sub-category of one entity
///
/// Derived and read-only; recomputed each run, never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergedRow {
    /// Overall cost in the most recent period
    pub overall_current: Money,
    /// Overall percent change between the two periods, when defined
    pub overall_delta_pct: Option<f64>,
    /// Tag-filtered percent change between the two periods, when defined
    pub filtered_delta_pct: Option<f64>,
    /// Tag-filtered absolute change between the two periods. Well-defined at
    /// zero, so always computed.
    pub filtered_delta_abs: Money,
}

/// Merge one entity's overall and filtered views into per-sub-category rows.
///
/// Sub-categories are the union of both views, so a category billed only
/// under the tag (or only outside it) still gets a row, with the missing
/// side compared as zero. Fewer than two periods in the union means there is
/// nothing to compare: the merge yields an empty map and logs a warning, and
/// the renderer emits a headers-only table.
pub fn merge_entity_views(
    overall: &CategoryLedger,
    filtered: &CategoryLedger,
    entity: &EntityId,
) -> BTreeMap<String, MergedRow> {
    let empty = CategoryView::new();
    let overall_view = overall.view(entity).unwrap_or(&empty);
    let filtered_view = filtered.view(entity).unwrap_or(&empty);

    let periods: BTreeSet<PeriodId> = overall_view
        .values()
        .chain(filtered_view.values())
        .flat_map(|by_period| by_period.keys().copied())
        .collect();

    let mut recent = periods.iter().rev().copied();
    let (curr, prev) = match (recent.next(), recent.next()) {
        (Some(curr), Some(prev)) => (curr, prev),
        _ => {
            warn!(
                entity = %entity,
                periods = periods.len(),
                "not enough periods to compare; breakdown for this entity will be empty"
            );
            return BTreeMap::new();
        }
    };

    let sub_categories: BTreeSet<&String> =
        overall_view.keys().chain(filtered_view.keys()).collect();

    let amount_in = |view: &CategoryView, sub: &str, period: PeriodId| -> Money {
        view.get(sub)
            .and_then(|by_period| by_period.get(&period))
            .copied()
            .unwrap_or_else(Money::zero)
    };

    let mut rows = BTreeMap::new();
    for sub in sub_categories {
        let overall_prev = amount_in(overall_view, sub, prev);
        let overall_curr = amount_in(overall_view, sub, curr);
        let filtered_prev = amount_in(filtered_view, sub, prev);
        let filtered_curr = amount_in(filtered_view, sub, curr);

        rows.insert(
            sub.clone(),
            MergedRow {
                overall_current: overall_curr,
                overall_delta_pct: percent_delta(overall_prev, overall_curr),
                filtered_delta_pct: percent_delta(filtered_prev, filtered_curr),
                filtered_delta_abs: filtered_curr - filtered_prev,
            },
        );
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::build_category_ledger;
    use crate::models::CategoryCost;

    fn pid(s: &str) -> PeriodId {
        s.parse().unwrap()
    }

    fn record(entity: &str, sub: &str, period: &str, cents: i64) -> CategoryCost {
        CategoryCost {
            period: pid(period),
            entity: EntityId::new(entity),
            sub_category: sub.to_string(),
            amount: Money::from_cents(cents),
        }
    }

    fn ledger(records: &[CategoryCost]) -> CategoryLedger {
        build_category_ledger(&[EntityId::new("a")], records)
    }

    #[test]
    fn test_merge_basic_metrics() {
        // overall Compute: 100 -> 120, filtered Compute: 20 -> 20.
        let overall = ledger(&[
            record("a", "Compute", "2024-01-01", 100_00),
            record("a", "Compute", "2024-02-01", 120_00),
        ]);
        let filtered = ledger(&[
            record("a", "Compute", "2024-01-01", 20_00),
            record("a", "Compute", "2024-02-01", 20_00),
        ]);

        let rows = merge_entity_views(&overall, &filtered, &EntityId::new("a"));
        let row = &rows["Compute"];

        assert_eq!(row.overall_current, Money::from_cents(120_00));
        assert!((row.overall_delta_pct.unwrap() - 0.2).abs() < 1e-12);
        assert!(row.filtered_delta_pct.unwrap().abs() < 1e-12);
        assert_eq!(row.filtered_delta_abs, Money::zero());
    }

    #[test]
    fn test_sub_category_only_in_filtered_view() {
        let overall = ledger(&[
            record("a", "Compute", "2024-01-01", 50_00),
            record("a", "Compute", "2024-02-01", 60_00),
        ]);
        let filtered = ledger(&[record("a", "Support", "2024-02-01", 5_00)]);

        let rows = merge_entity_views(&overall, &filtered, &EntityId::new("a"));
        let support = &rows["Support"];

        assert_eq!(support.overall_current, Money::zero());
        assert_eq!(support.overall_delta_pct, None);
        assert_eq!(support.filtered_delta_pct, None);
        assert_eq!(support.filtered_delta_abs, Money::from_cents(5_00));
    }

    #[test]
    fn test_sub_category_only_in_overall_view() {
        let overall = ledger(&[
            record("a", "Storage", "2024-01-01", 10_00),
            record("a", "Storage", "2024-02-01", 8_00),
        ]);
        let filtered = ledger(&[]);

        let rows = merge_entity_views(&overall, &filtered, &EntityId::new("a"));
        let storage = &rows["Storage"];

        assert!((storage.overall_delta_pct.unwrap() + 0.2).abs() < 1e-12);
        assert_eq!(storage.filtered_delta_pct, None);
        assert_eq!(storage.filtered_delta_abs, Money::zero());
    }

    #[test]
    fn test_single_period_union_yields_empty_merge() {
        let overall = ledger(&[record("a", "Compute", "2024-02-01", 100)]);
        let filtered = ledger(&[record("a", "Compute", "2024-02-01", 10)]);

        let rows = merge_entity_views(&overall, &filtered, &EntityId::new("a"));
        assert!(rows.is_empty());
    }

    #[test]
    fn test_periods_aligned_on_two_most_recent_of_union() {
        // The filtered view alone carries the newest period; alignment must
        // use the union (2024-02, 2024-03), not each view's own tail.
        let overall = ledger(&[
            record("a", "Compute", "2024-01-01", 100_00),
            record("a", "Compute", "2024-02-01", 110_00),
        ]);
        let filtered = ledger(&[record("a", "Compute", "2024-03-01", 7_00)]);

        let rows = merge_entity_views(&overall, &filtered, &EntityId::new("a"));
        let row = &rows["Compute"];

        // Overall has no 2024-03 amount: current is zero, delta null.
        assert_eq!(row.overall_current, Money::zero());
        assert_eq!(row.overall_delta_pct, None);
        // Filtered went 0 -> 7.00 across the aligned periods.
        assert_eq!(row.filtered_delta_abs, Money::from_cents(7_00));
        assert_eq!(row.filtered_delta_pct, None);
    }

    #[test]
    fn test_unknown_entity_merges_empty() {
        let overall = ledger(&[record("a", "Compute", "2024-01-01", 1)]);
        let filtered = ledger(&[]);
        let rows = merge_entity_views(&overall, &filtered, &EntityId::new("nope"));
        assert!(rows.is_empty());
    }

    #[test]
    fn test_filtered_drop_to_zero_has_abs_but_no_pct() {
        let overall = ledger(&[
            record("a", "Compute", "2024-01-01", 100_00),
            record("a", "Compute", "2024-02-01", 100_00),
        ]);
        let filtered = ledger(&[
            record("a", "Compute", "2024-01-01", 30_00),
            record("a", "Compute", "2024-02-01", 0),
        ]);

        let rows = merge_entity_views(&overall, &filtered, &EntityId::new("a"));
        let row = &rows["Compute"];

        assert_eq!(row.filtered_delta_abs, Money::from_cents(-30_00));
        assert_eq!(row.filtered_delta_pct, None);
    }
}
