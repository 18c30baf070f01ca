//! Items, collections and the keys that identify them

use super::status::Status;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Stable identifier of one logical record
///
/// Repeated fetches of the same entity must produce the same key so the store
/// overwrites the record instead of duplicating it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemKey(String);

impl ItemKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for ItemKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ItemKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Named view of a resource, opaque to the engine
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Projection(String);

impl Projection {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Delta record for a single item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub values: Value,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projection: Option<Projection>,
}

impl Item {
    /// Blank template: empty values, `Fetching` status
    pub fn blank(projection: Option<Projection>) -> Self {
        Self {
            values: Value::Object(Map::new()),
            status: Status::Fetching,
            projection,
        }
    }

    /// Looks up a top-level field of the item's values
    pub fn value(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }
}

/// Delta record for a collection: the ordered keys of its items
///
/// `positions` keeps server order, duplicates included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub positions: Vec<ItemKey>,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projection: Option<Projection>,
}

impl Collection {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
