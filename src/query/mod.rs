//! Cost query interface
//!
//! The upstream cost service is an external collaborator: it owns pagination,
//! retries, and authentication, and hands the pipeline a final flattened
//! list of period records. This module defines the interface the core needs
//! plus a CSV-export-backed implementation for local runs and tests.

pub mod csv_source;

pub use csv_source::CsvCostSource;

use crate::error::CostwatchResult;
use crate::models::{CategoryCost, EntityCost, EntityId, PeriodIndex, TagFilter};

/// Supplies cost observations for a reporting window.
///
/// Implementations may return periods outside the requested window; the
/// ledger builder keeps them. A failure here is terminal for the run.
pub trait CostQuery {
    /// Per-entity period totals over the window
    fn entity_period_totals(
        &self,
        window: &PeriodIndex,
        entities: &[EntityId],
    ) -> CostwatchResult<Vec<EntityCost>>;

    /// Period totals grouped by (entity, sub-category), optionally restricted
    /// to costs carrying the given tag
    fn category_period_totals(
        &self,
        window: &PeriodIndex,
        entities: &[EntityId],
        tag: Option<&TagFilter>,
    ) -> CostwatchResult<Vec<CategoryCost>>;
}
