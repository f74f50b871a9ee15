//! Entity ledger construction
//!
//! Reshapes raw per-entity period totals into a period-keyed ledger and
//! injects the computed grand-total bucket per period.

use tracing::debug;

use super::Ledger;
use crate::models::{EntityCost, EntityKey, Money, PeriodIndex};

/// Build the entity-level ledger for a reporting window.
///
/// Every period of the configured index gets a row even when no entity
/// reported cost in it, so sparse windows still render as empty rows. A
/// record for a period outside the index is kept, not dropped: the ledger's
/// period set is the union of the configured index and whatever periods
/// appear in the data. After all records are placed, the grand-total cell of
/// each period is the exact sum of that period's real-entity costs.
///
/// An entity whose records are all zero simply contributes zero to the
/// totals; filtering such entities out is the caller's concern.
pub fn build_entity_ledger(index: &PeriodIndex, records: &[EntityCost]) -> Ledger {
    let mut ledger = Ledger::new();

    for period in index.periods() {
        ledger.ensure_period(*period);
    }

    for record in records {
        if !index.contains(record.period) {
            debug!(
                period = %record.period,
                entity = %record.entity,
                "cost record outside the configured window; keeping its period"
            );
        }
        ledger.add_cost(
            record.period,
            EntityKey::Real(record.entity.clone()),
            record.amount,
        );
    }

    // Grand total per period, summed over real entities only.
    let periods: Vec<_> = ledger.periods().collect();
    for period in periods {
        let total: Money = ledger
            .row(period)
            .map(|row| {
                row.iter()
                    .filter(|(key, _)| key.is_real())
                    .map(|(_, cell)| cell.cost)
                    .sum()
            })
            .unwrap_or_else(Money::zero);
        ledger.set_cost(period, EntityKey::Total, total);
    }

    ledger
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntityId, Granularity, PeriodId};
    use chrono::NaiveDate;

    fn pid(s: &str) -> PeriodId {
        s.parse().unwrap()
    }

    fn record(entity: &str, period: &str, cents: i64) -> EntityCost {
        EntityCost {
            entity: EntityId::new(entity),
            period: pid(period),
            amount: Money::from_cents(cents),
        }
    }

    fn two_month_index() -> PeriodIndex {
        PeriodIndex::trailing(
            Granularity::Monthly,
            2,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        )
    }

    #[test]
    fn test_grand_total_is_sum_of_real_entities() {
        let index = two_month_index();
        let records = vec![
            record("a", "2024-01-01", 10_00),
            record("b", "2024-01-01", 5_00),
            record("a", "2024-02-01", 7_50),
        ];

        let ledger = build_entity_ledger(&index, &records);

        let jan_total = ledger.cell(pid("2024-01-01"), &EntityKey::Total).unwrap();
        assert_eq!(jan_total.cost, Money::from_cents(15_00));

        let feb_total = ledger.cell(pid("2024-02-01"), &EntityKey::Total).unwrap();
        assert_eq!(feb_total.cost, Money::from_cents(7_50));
    }

    #[test]
    fn test_empty_window_periods_still_present() {
        let index = two_month_index();
        let records = vec![record("a", "2024-02-01", 100)];

        let ledger = build_entity_ledger(&index, &records);

        // January has no entity data but must exist, with a zero total.
        let jan = ledger.row(pid("2024-01-01")).unwrap();
        assert_eq!(jan.len(), 1);
        assert_eq!(
            jan.get(&EntityKey::Total).unwrap().cost,
            Money::zero()
        );
    }

    #[test]
    fn test_out_of_window_period_is_kept() {
        let index = two_month_index();
        let records = vec![record("a", "2023-12-01", 300)];

        let ledger = build_entity_ledger(&index, &records);

        assert_eq!(ledger.period_count(), 3);
        assert_eq!(
            ledger
                .cell(pid("2023-12-01"), &EntityKey::real("a"))
                .unwrap()
                .cost,
            Money::from_cents(300)
        );
        assert_eq!(
            ledger
                .cell(pid("2023-12-01"), &EntityKey::Total)
                .unwrap()
                .cost,
            Money::from_cents(300)
        );
    }

    #[test]
    fn test_all_zero_entity_contributes_zero() {
        let index = two_month_index();
        let records = vec![
            record("a", "2024-01-01", 0),
            record("b", "2024-01-01", 400),
        ];

        let ledger = build_entity_ledger(&index, &records);

        assert_eq!(
            ledger
                .cell(pid("2024-01-01"), &EntityKey::Total)
                .unwrap()
                .cost,
            Money::from_cents(400)
        );
        // The zero entity still has its explicit cell.
        assert_eq!(
            ledger
                .cell(pid("2024-01-01"), &EntityKey::real("a"))
                .unwrap()
                .cost,
            Money::zero()
        );
    }

    #[test]
    fn test_repeated_records_accumulate() {
        let index = two_month_index();
        let records = vec![
            record("a", "2024-01-01", 100),
            record("a", "2024-01-01", 250),
        ];

        let ledger = build_entity_ledger(&index, &records);

        assert_eq!(
            ledger
                .cell(pid("2024-01-01"), &EntityKey::real("a"))
                .unwrap()
                .cost,
            Money::from_cents(350)
        );
    }
}
