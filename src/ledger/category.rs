//! Category ledger construction
//!
//! Reshapes grouped (entity, sub-category, period) records into nested
//! per-entity maps. The build is two-pass: pass 1 collects the full set of
//! sub-category names observed per entity across all periods and seeds empty
//! maps, pass 2 fills in amounts. Seeding first guarantees every observed
//! sub-category exists for an entity even in periods where it billed
//! nothing.

use std::collections::BTreeMap;

use tracing::debug;

use crate::models::{CategoryCost, EntityId, Money, PeriodId};

/// One entity's costs by sub-category and period
///
/// An absent (sub-category, period) cell means "no data", which the renderer
/// shows blank; an explicit zero record gets a `Money::zero()` entry and
/// renders as $0.00.
pub type CategoryView = BTreeMap<String, BTreeMap<PeriodId, Money>>;

/// Entity-keyed table of per-sub-category period costs
///
/// Sub-categories iterate in lexicographic order by construction (BTreeMap),
/// which keeps rendering deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryLedger {
    entities: BTreeMap<EntityId, CategoryView>,
}

impl CategoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// One entity's sub-category view, if the entity was requested
    pub fn view(&self, entity: &EntityId) -> Option<&CategoryView> {
        self.entities.get(entity)
    }

    /// Look up one amount
    pub fn amount(
        &self,
        entity: &EntityId,
        sub_category: &str,
        period: PeriodId,
    ) -> Option<Money> {
        self.entities
            .get(entity)?
            .get(sub_category)?
            .get(&period)
            .copied()
    }

    /// Entities present, in id order
    pub fn entities(&self) -> impl Iterator<Item = &EntityId> {
        self.entities.keys()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Build a category ledger for the requested entities.
///
/// Records referencing an entity outside `entity_ids` are silently dropped;
/// that is an expected shape of upstream data, not an error. Duplicate
/// (entity, sub-category, period) records overwrite, matching the upstream
/// service's one-record-per-group contract.
pub fn build_category_ledger(entity_ids: &[EntityId], records: &[CategoryCost]) -> CategoryLedger {
    let mut ledger = CategoryLedger::new();

    for id in entity_ids {
        ledger.entities.insert(id.clone(), CategoryView::new());
    }

    // Pass 1: seed every sub-category name observed for a requested entity.
    for record in records {
        if let Some(view) = ledger.entities.get_mut(&record.entity) {
            view.entry(record.sub_category.clone()).or_default();
        } else {
            debug!(
                entity = %record.entity,
                sub_category = %record.sub_category,
                "dropping record for entity outside the requested set"
            );
        }
    }

    // Pass 2: fill in amounts for seeded combinations.
    for record in records {
        if let Some(periods) = ledger
            .entities
            .get_mut(&record.entity)
            .and_then(|view| view.get_mut(&record.sub_category))
        {
            periods.insert(record.period, record.amount);
        }
    }

    ledger
}
