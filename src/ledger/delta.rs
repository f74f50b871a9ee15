//! Period-over-period percent change
//!
//! Annotates every ledger cell with its fractional change against the
//! immediately preceding period. A change from or to zero cost is undefined
//! and stays unset; it must never surface as ±100% or infinity.

use std::collections::BTreeMap;

use super::Ledger;
use crate::models::{EntityKey, Money};

/// The percent-change policy shared by the ledger and merge paths.
///
/// Returns `None` when either side is zero, otherwise `curr/prev - 1`. A key
/// absent in the previous period is compared as zero, which the guard then
/// turns into `None`.
pub(crate) fn percent_delta(prev: Money, curr: Money) -> Option<f64> {
    if prev.is_zero() || curr.is_zero() {
        None
    } else {
        Some(curr.as_f64() / prev.as_f64() - 1.0)
    }
}

/// Annotate `percent_delta` on every cell, in place.
///
/// Periods are processed in ascending order. Every key of the earliest
/// period gets `None` (there is no prior period); afterwards each key is
/// compared against its own cost in the preceding period, key by key. The
/// result is a pure function of the cost values, so re-running over the same
/// snapshot yields identical deltas.
pub fn annotate_percent_deltas(ledger: &mut Ledger) {
    let periods: Vec<_> = ledger.periods().collect();
    let mut prev_costs: Option<BTreeMap<EntityKey, Money>> = None;

    for period in periods {
        let Some(row) = ledger.row_mut(period) else {
            continue;
        };

        for (key, cell) in row.iter_mut() {
            cell.percent_delta = match &prev_costs {
                None => None,
                Some(prev) => {
                    let prev_cost = prev.get(key).copied().unwrap_or_else(Money::zero);
                    percent_delta(prev_cost, cell.cost)
                }
            };
        }

        prev_costs = Some(
            row.iter()
                .map(|(key, cell)| (key.clone(), cell.cost))
                .collect(),
        );
    }
}
