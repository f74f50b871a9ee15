//! Tracked entities and ledger column keys
//!
//! Entities are opaque upstream identifiers (account numbers, project ids)
//! with an optional friendly display name from configuration. Ledger columns
//! additionally carry two synthetic keys: the per-period grand total and the
//! "Others" fold of non-featured entities. Those are modelled as enum
//! variants rather than magic strings so no code compares against sentinel
//! identifiers.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Opaque identifier of a tracked cost-bearing entity
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A catalog entry: entity id plus its configured display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Upstream identifier
    pub id: EntityId,
    /// Friendly name used in report headers
    pub name: String,
}

impl Entity {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(id),
            name: name.into(),
        }
    }
}

/// A ledger column key: a real entity or one of the two synthetic buckets
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityKey {
    /// A tracked entity
    Real(EntityId),
    /// Per-period grand total over all real entities
    Total,
    /// Sum of all non-featured real entities
    Others,
}

impl EntityKey {
    pub fn real(id: impl Into<String>) -> Self {
        Self::Real(EntityId::new(id))
    }

    pub const fn is_real(&self) -> bool {
        matches!(self, Self::Real(_))
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Real(id) => f.write_str(id.as_str()),
            Self::Total => f.write_str("total"),
            Self::Others => f.write_str("others"),
        }
    }
}

// Configuration lists featured keys as plain strings ("total", "others", or
// an entity id), so the serde form is the display form.
impl Serialize for EntityKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EntityKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.is_empty() {
            return Err(D::Error::custom("entity key must not be empty"));
        }
        Ok(match raw.as_str() {
            "total" => Self::Total,
            "others" => Self::Others,
            _ => Self::Real(EntityId::new(raw)),
        })
    }
}
