//! The query metadata payload.
//!
//! Every key a client can see is an explicit struct field; optional keys
//! serialize as `null` rather than disappearing.

use serde::Serialize;

use crate::binning::DimensionOptionsTable;
use crate::dimension::{DimensionDescriptor, FieldValue, HasFieldValues};
use crate::fingerprint::Fingerprint;
use crate::model::{
    BaseType, FieldId, FieldRef, FieldTarget, SpecialType, TableId, TableVisibility,
    VisibilityType,
};

/// Metadata for one table, physical or virtual.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableMetadata {
    pub id: TableId,
    pub db_id: i64,
    pub schema: Option<String>,
    pub name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub active: bool,
    pub visibility_type: Option<TableVisibility>,
    pub entity_type: Option<String>,
    pub rows: Option<i64>,
    pub fields: Vec<FieldMetadata>,
    /// The full option table, referenced by index from each field.
    pub dimension_options: DimensionOptionsTable,
}

/// One field descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldMetadata {
    pub id: FieldRef,
    pub table_id: TableId,
    pub name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub base_type: BaseType,
    pub special_type: Option<SpecialType>,
    pub visibility_type: VisibilityType,
    pub fk_target_field_id: Option<FieldId>,
    /// Only present when the FK target resolved for this reader.
    pub target: Option<FieldTarget>,
    pub position: i32,
    pub preview_display: bool,
    pub fingerprint: Option<Fingerprint>,
    pub has_field_values: HasFieldValues,
    pub values: Vec<FieldValue>,
    pub dimensions: Option<DimensionDescriptor>,
    pub dimension_options: Vec<String>,
    pub default_dimension_option: Option<String>,
}

impl TableMetadata {
    pub fn field(&self, name: &str) -> Option<&FieldMetadata> {
        self.fields.iter().find(|f| f.name == name)
    }
}
