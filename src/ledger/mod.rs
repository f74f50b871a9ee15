//! The cost-ledger engine
//!
//! A [`Ledger`] is a period-keyed table of entity costs with
//! period-over-period percent-change annotations. The submodules hold the
//! pipeline stages that produce and transform ledgers:
//!
//! - [`builder`]: reshape raw per-entity period totals into a ledger and
//!   inject the grand-total bucket
//! - [`projector`]: fold non-featured entities into "Others"
//! - [`delta`]: annotate percent change against the preceding period
//! - [`category`]: reshape grouped records into entity/sub-category ledgers
//! - [`merge`]: combine the overall and tag-filtered category views
//!
//! Every structure is built fresh per report run; nothing is cached across
//! runs.

pub mod builder;
pub mod category;
pub mod delta;
pub mod merge;
pub mod projector;

pub use builder::build_entity_ledger;
pub use category::{build_category_ledger, CategoryLedger, CategoryView};
pub use delta::annotate_percent_deltas;
pub use merge::{merge_entity_views, MergedRow};
pub use projector::project_for_display;

use std::collections::BTreeMap;

use crate::models::{EntityKey, Money, PeriodId};

/// One ledger cell: a cost and its change against the preceding period
///
/// `percent_delta` is `None` for the earliest period and whenever either side
/// of the comparison is zero (a percent change from or to zero is undefined
/// and must not be rendered as ±100%).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostCell {
    /// Cost of the key in the period
    pub cost: Money,
    /// Fractional change against the preceding period, when defined
    pub percent_delta: Option<f64>,
}

impl CostCell {
    /// A cell with a cost and no delta annotation yet
    pub const fn new(cost: Money) -> Self {
        Self {
            cost,
            percent_delta: None,
        }
    }
}

/// Period-keyed table of entity costs and computed deltas
///
/// The BTreeMap keying gives the ascending-period iteration order the delta
/// stage relies on. Invariant: for every period present, the grand-total cost
/// equals the sum of all real-entity costs in that period.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    periods: BTreeMap<PeriodId, BTreeMap<EntityKey, CostCell>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure a period row exists, empty if new
    pub fn ensure_period(&mut self, period: PeriodId) {
        self.periods.entry(period).or_default();
    }

    /// Add an amount to a cell, creating it at zero first if absent
    pub fn add_cost(&mut self, period: PeriodId, key: EntityKey, amount: Money) {
        let cell = self
            .periods
            .entry(period)
            .or_default()
            .entry(key)
            .or_insert_with(|| CostCell::new(Money::zero()));
        cell.cost += amount;
    }

    /// Overwrite a cell's cost, clearing any delta annotation
    pub fn set_cost(&mut self, period: PeriodId, key: EntityKey, amount: Money) {
        self.periods
            .entry(period)
            .or_default()
            .insert(key, CostCell::new(amount));
    }

    /// Look up a cell
    pub fn cell(&self, period: PeriodId, key: &EntityKey) -> Option<&CostCell> {
        self.periods.get(&period).and_then(|row| row.get(key))
    }

    /// A period's cells, keyed by entity
    pub fn row(&self, period: PeriodId) -> Option<&BTreeMap<EntityKey, CostCell>> {
        self.periods.get(&period)
    }

    pub(crate) fn row_mut(
        &mut self,
        period: PeriodId,
    ) -> Option<&mut BTreeMap<EntityKey, CostCell>> {
        self.periods.get_mut(&period)
    }

    /// Periods in ascending order
    pub fn periods(&self) -> impl Iterator<Item = PeriodId> + '_ {
        self.periods.keys().copied()
    }

    /// Earliest period present
    pub fn first_period(&self) -> Option<PeriodId> {
        self.periods.keys().next().copied()
    }

    /// Latest period present
    pub fn last_period(&self) -> Option<PeriodId> {
        self.periods.keys().next_back().copied()
    }

    pub fn period_count(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }
}
