//! Display projection
//!
//! Collapses non-featured entities into a single "Others" bucket per period,
//! carrying featured entities and the grand total through unchanged.

use super::Ledger;
use crate::models::{EntityKey, Money};

/// Project a ledger down to the featured keys plus "Others".
///
/// Per period: featured keys are copied as-is; every other *real* entity's
/// cost is summed into `Others`. The grand total is carried through, never
/// re-summed, so the projection cannot change it. `Others` is always present,
/// at zero when no entity folds into it.
pub fn project_for_display(ledger: &Ledger, featured: &[EntityKey]) -> Ledger {
    let mut projected = Ledger::new();

    for period in ledger.periods() {
        projected.ensure_period(period);
        let mut others = Money::zero();

        if let Some(row) = ledger.row(period) {
            for (key, cell) in row {
                if featured.contains(key) {
                    projected.set_cost(period, key.clone(), cell.cost);
                } else if key.is_real() {
                    others += cell.cost;
                }
            }
        }

        projected.set_cost(period, EntityKey::Others, others);
    }

    projected
}
