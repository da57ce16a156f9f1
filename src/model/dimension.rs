//! Display remappings attached to a field.

use serde::{Deserialize, Serialize};

use super::field::FieldId;
use super::value::RawValue;

/// A remapping rule for how a field's stored values are displayed.
///
/// A field has at most one dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    #[serde(default)]
    pub id: Option<i64>,
    /// The field whose values are remapped.
    pub field_id: FieldId,
    pub name: String,
    #[serde(flatten)]
    pub kind: DimensionKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DimensionKind {
    /// Inline value → label table owned by the field.
    Internal {
        #[serde(default)]
        remappings: Vec<Remapping>,
    },
    /// Display values come from another field, usually the FK target's name.
    External { human_readable_field_id: FieldId },
}

/// One entry of an internal remap table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Remapping {
    pub value: RawValue,
    pub label: String,
}

impl Dimension {
    pub fn internal(field_id: FieldId, name: impl Into<String>, remappings: Vec<Remapping>) -> Self {
        Self {
            id: None,
            field_id,
            name: name.into(),
            kind: DimensionKind::Internal { remappings },
        }
    }

    pub fn external(
        field_id: FieldId,
        name: impl Into<String>,
        human_readable_field_id: FieldId,
    ) -> Self {
        Self {
            id: None,
            field_id,
            name: name.into(),
            kind: DimensionKind::External {
                human_readable_field_id,
            },
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self.kind, DimensionKind::Internal { .. })
    }

    pub fn human_readable_field_id(&self) -> Option<FieldId> {
        match self.kind {
            DimensionKind::External {
                human_readable_field_id,
            } => Some(human_readable_field_id),
            DimensionKind::Internal { .. } => None,
        }
    }
}

impl Remapping {
    pub fn new(value: impl Into<RawValue>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}
