//! Raw cost observations as returned by the cost query service
//!
//! Records are read-only inputs: the pipeline aggregates and derives from
//! them but never mutates the source numbers.

use serde::{Deserialize, Serialize};

use super::{EntityId, Money, PeriodId};

/// One entity's total cost for one period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityCost {
    /// The tracked entity
    pub entity: EntityId,
    /// Start of the reporting bucket
    pub period: PeriodId,
    /// Total cost of the entity in the bucket
    pub amount: Money,
}

/// One (entity, sub-category) cost for one period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCost {
    /// Start of the reporting bucket
    pub period: PeriodId,
    /// The tracked entity
    pub entity: EntityId,
    /// Finer-grained cost dimension within the entity (e.g. a service name)
    pub sub_category: String,
    /// Cost of the (entity, sub-category) pair in the bucket
    pub amount: Money,
}

/// Tag predicate restricting the filtered cost view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagFilter {
    /// Tag key, e.g. "project"
    pub key: String,
    /// Required tag value
    pub value: String,
}

impl TagFilter {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}
