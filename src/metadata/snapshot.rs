//! Immutable inputs to metadata assembly.
//!
//! A snapshot holds everything the assembler reads for one table: the
//! table (or saved question), its database, and every field with its
//! dimension and already-resolved FK target. Assembly never looks anything
//! else up.

use crate::config::MetadataSettings;
use crate::model::{Card, Database, Dimension, Field, Table, TableId, TargetResolution};

/// A field together with the records resolved around it.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSnapshot {
    pub field: Field,
    pub dimension: Option<Dimension>,
    pub target: TargetResolution,
}

impl FieldSnapshot {
    pub fn new(field: Field) -> Self {
        Self {
            field,
            dimension: None,
            target: TargetResolution::None,
        }
    }

    pub fn with_dimension(mut self, dimension: Dimension) -> Self {
        self.dimension = Some(dimension);
        self
    }

    pub fn with_target(mut self, target: TargetResolution) -> Self {
        self.target = target;
        self
    }
}

/// Everything needed to assemble metadata for one table.
#[derive(Debug, Clone, PartialEq)]
pub enum TableSnapshot {
    Physical {
        database: Database,
        table: Table,
        fields: Vec<FieldSnapshot>,
    },
    /// A saved question queried as a table. Its columns come from the
    /// card's result metadata.
    Virtual { database: Database, card: Card },
}

impl TableSnapshot {
    pub fn table_id(&self) -> TableId {
        match self {
            TableSnapshot::Physical { table, .. } => TableId::Physical(table.id),
            TableSnapshot::Virtual { card, .. } => card.table_id(),
        }
    }

    pub fn database(&self) -> &Database {
        match self {
            TableSnapshot::Physical { database, .. } | TableSnapshot::Virtual { database, .. } => {
                database
            }
        }
    }
}

/// Parameters of a metadata request.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataRequest {
    pub table_id: TableId,
    /// Keep fields with `sensitive` visibility in the field list.
    pub include_sensitive_fields: bool,
    /// Schema reported for virtual tables whose card is in no collection.
    pub virtual_table_schema: String,
}

impl MetadataRequest {
    pub fn new(table_id: TableId) -> Self {
        Self::from_settings(table_id, &MetadataSettings::default())
    }

    pub fn from_settings(table_id: TableId, settings: &MetadataSettings) -> Self {
        Self {
            table_id,
            include_sensitive_fields: settings.include_sensitive_fields,
            virtual_table_schema: settings.virtual_table_schema.clone(),
        }
    }

    pub fn with_sensitive_fields(mut self, include: bool) -> Self {
        self.include_sensitive_fields = include;
        self
    }
}
