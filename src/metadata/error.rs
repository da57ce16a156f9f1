//! Errors raised while computing table metadata.

use thiserror::Error;

use crate::model::{BaseType, FieldId, TableId, TypeClass};

/// Result type for metadata operations.
pub type MetadataResult<T> = Result<T, MetadataError>;

/// Errors that can occur while assembling metadata.
///
/// Missing fingerprints and unresolved FK targets are *not* errors; they
/// produce empty values or a suppressed `target`. The variants below mark
/// snapshots that an upstream sync bug left in an inconsistent state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetadataError {
    /// Fingerprint variant does not match the field's base type class.
    #[error("field {field_id} ({base_type}) has a {fingerprint} fingerprint")]
    FingerprintMismatch {
        field_id: FieldId,
        base_type: BaseType,
        fingerprint: TypeClass,
    },

    /// A saved question's result column carries a fingerprint that does not
    /// match the column's declared base type.
    #[error("column '{column}' of {table_id} ({base_type}) has a {fingerprint} fingerprint")]
    ColumnFingerprintMismatch {
        table_id: TableId,
        column: String,
        base_type: BaseType,
        fingerprint: TypeClass,
    },

    /// The distinct value list of a field repeats a value.
    #[error("field {field_id} lists value '{value}' more than once")]
    DuplicateValue { field_id: FieldId, value: String },

    /// An internal remap table maps the same raw value twice.
    #[error("dimension on field {field_id} remaps value '{value}' more than once")]
    DuplicateRemapping { field_id: FieldId, value: String },

    /// A dimension was attached to a field it does not belong to.
    #[error("dimension for field {dimension_field_id} attached to field {field_id}")]
    DimensionFieldMismatch {
        field_id: FieldId,
        dimension_field_id: FieldId,
    },

    /// More than one dimension exists for a field.
    #[error("field {0} has more than one dimension")]
    MultipleDimensions(FieldId),

    /// No table with this id in the catalog.
    #[error("table not found: {0}")]
    TableNotFound(TableId),

    /// A table or card references a database missing from the catalog.
    #[error("database not found: {0}")]
    DatabaseNotFound(i64),

    /// The table identifier could not be parsed.
    #[error("invalid table identifier: '{0}'")]
    InvalidTableId(String),
}

impl MetadataError {
    /// Check if this error is a precondition violation on a field snapshot.
    ///
    /// These are never retried or papered over; the snapshot must be fixed
    /// by a re-sync.
    pub fn is_invalid_field_state(&self) -> bool {
        matches!(
            self,
            Self::FingerprintMismatch { .. }
                | Self::ColumnFingerprintMismatch { .. }
                | Self::DuplicateValue { .. }
                | Self::DuplicateRemapping { .. }
                | Self::DimensionFieldMismatch { .. }
                | Self::MultipleDimensions(_)
        )
    }
}

impl From<crate::model::ParseTableIdError> for MetadataError {
    fn from(err: crate::model::ParseTableIdError) -> Self {
        Self::InvalidTableId(err.0)
    }
}
