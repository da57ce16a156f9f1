//! Databases, tables and saved-question (virtual) tables.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::types::{BaseType, SpecialType};
use crate::fingerprint::Fingerprint;

/// Prefix of virtual table identifiers (`card__<id>`).
pub const VIRTUAL_TABLE_PREFIX: &str = "card__";

/// Identifier of a table the metadata endpoint can be asked about.
///
/// Physical tables serialize as their numeric id, virtual tables as the
/// string `card__<card id>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TableId {
    Physical(i64),
    Card(i64),
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableId::Physical(id) => write!(f, "{}", id),
            TableId::Card(id) => write!(f, "{}{}", VIRTUAL_TABLE_PREFIX, id),
        }
    }
}

/// Error returned when a table identifier cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid table identifier: '{0}'")]
pub struct ParseTableIdError(pub String);

impl FromStr for TableId {
    type Err = ParseTableIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let err = || ParseTableIdError(s.to_string());
        match s.strip_prefix(VIRTUAL_TABLE_PREFIX) {
            Some(card) => card.parse().map(TableId::Card).map_err(|_| err()),
            None => s.parse().map(TableId::Physical).map_err(|_| err()),
        }
    }
}

impl Serialize for TableId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TableId::Physical(id) => serializer.serialize_i64(*id),
            TableId::Card(_) => serializer.collect_str(self),
        }
    }
}

impl<'de> Deserialize<'de> for TableId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(i64),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(id) => Ok(TableId::Physical(id)),
            Repr::Text(s) => s.parse().map_err(de::Error::custom),
        }
    }
}

/// Optional capabilities of a database driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DriverFeature {
    Binning,
    ForeignKeys,
    NestedQueries,
    StandardDeviationAggregations,
    ExpressionAggregations,
}

/// A connected database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Database {
    pub id: i64,
    pub name: String,
    /// Engine identifier, e.g. `postgres` or `h2`.
    pub engine: String,
    #[serde(default)]
    pub features: BTreeSet<DriverFeature>,
    /// Cron expression for the metadata sync, if scheduled.
    #[serde(default)]
    pub sync_schedule: Option<String>,
}

impl Database {
    pub fn supports(&self, feature: DriverFeature) -> bool {
        self.features.contains(&feature)
    }
}

/// Table-level visibility classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableVisibility {
    Hidden,
    Technical,
    Cruft,
}

fn default_true() -> bool {
    true
}

/// A physical table discovered by sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub id: i64,
    pub db_id: i64,
    #[serde(default)]
    pub schema: Option<String>,
    pub name: String,
    pub display_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub visibility_type: Option<TableVisibility>,
    /// Entity classification, e.g. `entity/TransactionTable`.
    #[serde(default)]
    pub entity_type: Option<String>,
    #[serde(default)]
    pub rows: Option<i64>,
}

/// A saved question whose result set can be queried like a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: i64,
    pub database_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Collection name, used as the virtual table's schema.
    #[serde(default)]
    pub collection: Option<String>,
    #[serde(default)]
    pub result_metadata: Vec<ResultColumn>,
}

impl Card {
    pub fn table_id(&self) -> TableId {
        TableId::Card(self.id)
    }
}

/// One column of a saved question's result set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultColumn {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub base_type: Option<BaseType>,
    /// Carried through from the source field; dropped for virtual tables.
    #[serde(default)]
    pub special_type: Option<SpecialType>,
    #[serde(default)]
    pub fingerprint: Option<Fingerprint>,
}
