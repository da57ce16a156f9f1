//! In-memory catalog of synced records.
//!
//! The catalog is the imperative shell around [`assemble`](super::assemble):
//! it owns the records sync produced, applies the reader's access to FK
//! targets, and hands the assembler a finished [`TableSnapshot`].
//!
//! Catalogs are loaded from a JSON document:
//!
//! ```json
//! {
//!   "databases":  [{"id": 1, "name": "Sample", "engine": "h2", "features": ["binning"]}],
//!   "tables":     [{"id": 5, "db_id": 1, "name": "VENUES", "display_name": "Venues"}],
//!   "fields":     [{"id": 10, "table_id": 5, "name": "PRICE", "display_name": "Price",
//!                   "base_type": "type/Integer"}],
//!   "dimensions": [],
//!   "cards":      []
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::dimension::{dimension_for, suggest_external_remapping};
use crate::fingerprint::{hydrate, FingerprintStore, StoreResult};
use crate::model::{
    Card, Database, Dimension, Field, FieldId, FieldTarget, Table, TableId, TargetResolution,
};

use super::error::{MetadataError, MetadataResult};
use super::snapshot::{FieldSnapshot, TableSnapshot};

/// Errors loading a catalog document.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    Json(#[from] serde_json::Error),
}

/// Which physical tables the current reader may see.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReadAccess {
    #[default]
    All,
    Tables(BTreeSet<i64>),
}

impl ReadAccess {
    pub fn can_read(&self, table_id: i64) -> bool {
        match self {
            ReadAccess::All => true,
            ReadAccess::Tables(tables) => tables.contains(&table_id),
        }
    }
}

/// Records of every database, table, field, dimension and saved question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub databases: Vec<Database>,
    #[serde(default)]
    pub tables: Vec<Table>,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub dimensions: Vec<Dimension>,
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl Catalog {
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn database(&self, id: i64) -> Option<&Database> {
        self.databases.iter().find(|d| d.id == id)
    }

    pub fn table(&self, id: i64) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == id)
    }

    pub fn card(&self, id: i64) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn field(&self, id: FieldId) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn fields_of(&self, table_id: i64) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(move |f| f.table_id == table_id)
    }

    /// Resolve a field's FK target for a reader.
    ///
    /// A target id with no synced field is pending; a target in a table the
    /// reader cannot see is denied. Neither is an error.
    pub fn resolve_target(&self, field: &Field, access: &ReadAccess) -> TargetResolution {
        let Some(target_id) = field.fk_target_field_id else {
            return TargetResolution::None;
        };
        match self.field(target_id) {
            None => TargetResolution::PendingSync(target_id),
            Some(target) if !access.can_read(target.table_id) => {
                TargetResolution::PermissionDenied(target_id)
            }
            Some(target) => TargetResolution::Resolved(FieldTarget::from(target)),
        }
    }

    /// Build the snapshot the assembler needs for one table.
    ///
    /// A physical table the reader cannot see is reported as not found.
    pub fn snapshot(&self, table_id: TableId, access: &ReadAccess) -> MetadataResult<TableSnapshot> {
        match table_id {
            TableId::Physical(id) => {
                let table = self
                    .table(id)
                    .filter(|_| access.can_read(id))
                    .ok_or(MetadataError::TableNotFound(table_id))?;
                let database = self
                    .database(table.db_id)
                    .ok_or(MetadataError::DatabaseNotFound(table.db_id))?;

                let fields = self
                    .fields_of(id)
                    .map(|field| {
                        Ok(FieldSnapshot {
                            field: field.clone(),
                            dimension: dimension_for(field, &self.dimensions)?.cloned(),
                            target: self.resolve_target(field, access),
                        })
                    })
                    .collect::<MetadataResult<Vec<_>>>()?;

                Ok(TableSnapshot::Physical {
                    database: database.clone(),
                    table: table.clone(),
                    fields,
                })
            }
            TableId::Card(id) => {
                let card = self.card(id).ok_or(MetadataError::TableNotFound(table_id))?;
                let database = self
                    .database(card.database_id)
                    .ok_or(MetadataError::DatabaseNotFound(card.database_id))?;
                Ok(TableSnapshot::Virtual {
                    database: database.clone(),
                    card: card.clone(),
                })
            }
        }
    }

    /// Replace field fingerprints with the ones held in `store`.
    ///
    /// Fields the store knows nothing about keep what the document had.
    pub fn hydrate_fingerprints(&mut self, store: &dyn FingerprintStore) -> StoreResult<usize> {
        hydrate(&mut self.fields, store)
    }

    /// External remapping suggestions for the FK fields of a table that
    /// have no dimension yet.
    pub fn suggest_remappings(
        &self,
        table_id: i64,
        access: &ReadAccess,
    ) -> MetadataResult<Vec<Dimension>> {
        let mut suggestions = Vec::new();
        for field in self.fields_of(table_id) {
            if dimension_for(field, &self.dimensions)?.is_some() {
                continue;
            }
            let target = self.resolve_target(field, access);
            let Some(resolved) = target.resolved() else {
                continue;
            };
            let TableId::Physical(target_table) = resolved.table_id else {
                continue;
            };
            let target_fields: Vec<Field> = self.fields_of(target_table).cloned().collect();
            if let Some(dimension) = suggest_external_remapping(field, &target, &target_fields) {
                suggestions.push(dimension);
            }
        }
        Ok(suggestions)
    }
}
