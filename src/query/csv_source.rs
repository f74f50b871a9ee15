//! CSV-backed cost source
//!
//! Reads a flat CSV export of cost observations and answers both query
//! shapes by aggregating in memory. Expected columns:
//!
//! ```text
//! period_start,entity,sub_category,amount,tag_key,tag_value
//! 2024-01-01,384352530920,Compute,1234.5678,project,Traverse
//! ```
//!
//! `tag_key`/`tag_value` may be empty for untagged costs. The same file
//! serves the overall and the tag-filtered views.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use super::CostQuery;
use crate::error::{CostwatchError, CostwatchResult};
use crate::models::{
    CategoryCost, EntityCost, EntityId, Money, PeriodId, PeriodIndex, TagFilter,
};

/// A cost query backed by a local CSV export
#[derive(Debug, Clone)]
pub struct CsvCostSource {
    path: PathBuf,
}

/// One CSV line as written by the exporter
#[derive(Debug, Deserialize)]
struct CostRow {
    period_start: PeriodId,
    entity: String,
    sub_category: String,
    amount: String,
    #[serde(default)]
    tag_key: String,
    #[serde(default)]
    tag_value: String,
}

impl CostRow {
    fn matches(&self, tag: Option<&TagFilter>) -> bool {
        match tag {
            None => true,
            Some(tag) => self.tag_key == tag.key && self.tag_value == tag.value,
        }
    }
}

impl CsvCostSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Read and parse every row, propagating malformed lines as data errors.
    fn read_rows(&self) -> CostwatchResult<Vec<CostRow>> {
        let mut reader = csv::Reader::from_path(&self.path).map_err(|e| {
            CostwatchError::Query(format!(
                "cannot open cost data {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let mut rows = Vec::new();
        for result in reader.deserialize::<CostRow>() {
            rows.push(result?);
        }

        info!(rows = rows.len(), path = %self.path.display(), "read cost data");
        Ok(rows)
    }

    fn parse_amount(row: &CostRow) -> CostwatchResult<Money> {
        Money::parse(&row.amount).map_err(|e| {
            CostwatchError::Data(format!(
                "bad amount for {} in {}: {}",
                row.entity, row.period_start, e
            ))
        })
    }

    fn in_window(window: &PeriodIndex, period: PeriodId) -> bool {
        match (window.first(), window.last()) {
            (Some(first), Some(last)) => period >= first && period <= last,
            _ => false,
        }
    }
}

impl CostQuery for CsvCostSource {
    fn entity_period_totals(
        &self,
        window: &PeriodIndex,
        entities: &[EntityId],
    ) -> CostwatchResult<Vec<EntityCost>> {
        let mut totals: BTreeMap<(EntityId, PeriodId), Money> = BTreeMap::new();

        for row in self.read_rows()? {
            let entity = EntityId::new(row.entity.clone());
            if !entities.contains(&entity) || !Self::in_window(window, row.period_start) {
                continue;
            }
            let amount = Self::parse_amount(&row)?;
            *totals
                .entry((entity, row.period_start))
                .or_insert_with(Money::zero) += amount;
        }

        Ok(totals
            .into_iter()
            .map(|((entity, period), amount)| EntityCost {
                entity,
                period,
                amount,
            })
            .collect())
    }

    fn category_period_totals(
        &self,
        window: &PeriodIndex,
        entities: &[EntityId],
        tag: Option<&TagFilter>,
    ) -> CostwatchResult<Vec<CategoryCost>> {
        let mut totals: BTreeMap<(EntityId, String, PeriodId), Money> = BTreeMap::new();

        for row in self.read_rows()? {
            let entity = EntityId::new(row.entity.clone());
            if !entities.contains(&entity)
                || !Self::in_window(window, row.period_start)
                || !row.matches(tag)
            {
                continue;
            }
            let amount = Self::parse_amount(&row)?;
            *totals
                .entry((entity, row.sub_category.clone(), row.period_start))
                .or_insert_with(Money::zero) += amount;
        }

        Ok(totals
            .into_iter()
            .map(|((entity, sub_category, period), amount)| CategoryCost {
                period,
                entity,
                sub_category,
                amount,
            })
            .collect())
    }
}
