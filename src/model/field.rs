//! Fields and references to them.

use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, Serializer};

use super::table::TableId;
use super::types::{BaseType, SpecialType, VisibilityType};
use crate::fingerprint::Fingerprint;

/// Persisted numeric field id.
pub type FieldId = i64;

fn default_true() -> bool {
    true
}

/// A column of a physical table, as persisted by sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub id: FieldId,
    pub table_id: i64,
    pub name: String,
    pub display_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub base_type: BaseType,
    #[serde(default)]
    pub special_type: Option<SpecialType>,
    #[serde(default)]
    pub visibility_type: VisibilityType,
    /// For FK fields, the field the key points to.
    #[serde(default)]
    pub fk_target_field_id: Option<FieldId>,
    /// Stable ordering within the table.
    #[serde(default)]
    pub position: i32,
    #[serde(default)]
    pub fingerprint: Option<Fingerprint>,
    /// Fingerprint schema version the stored fingerprint was computed with.
    #[serde(default)]
    pub fingerprint_version: i32,
    #[serde(default = "default_true")]
    pub preview_display: bool,
}

impl Field {
    /// A field with only the required attributes set.
    pub fn new(id: FieldId, table_id: i64, name: impl Into<String>, base_type: BaseType) -> Self {
        let name = name.into();
        Self {
            id,
            table_id,
            display_name: crate::classify::humanize(&name),
            name,
            description: None,
            base_type,
            special_type: None,
            visibility_type: VisibilityType::Normal,
            fk_target_field_id: None,
            position: 0,
            fingerprint: None,
            fingerprint_version: 0,
            preview_display: true,
        }
    }

    pub fn with_special_type(mut self, special_type: SpecialType) -> Self {
        self.special_type = Some(special_type);
        self
    }

    pub fn with_position(mut self, position: i32) -> Self {
        self.position = position;
        self
    }

    pub fn with_fingerprint(mut self, fingerprint: Fingerprint, version: i32) -> Self {
        self.fingerprint = Some(fingerprint);
        self.fingerprint_version = version;
        self
    }

    pub fn with_visibility(mut self, visibility_type: VisibilityType) -> Self {
        self.visibility_type = visibility_type;
        self
    }

    pub fn with_fk_target(mut self, target: FieldId) -> Self {
        self.special_type = Some(SpecialType::ForeignKey);
        self.fk_target_field_id = Some(target);
        self
    }

    pub fn is_foreign_key(&self) -> bool {
        self.special_type == Some(SpecialType::ForeignKey)
    }
}

/// Identifier of a field in a metadata response.
///
/// Persisted fields use their numeric id. Columns of virtual tables have no
/// persisted row and are identified by `["field-literal", name, base_type]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldRef {
    Id(FieldId),
    Literal { name: String, base_type: BaseType },
}

impl Serialize for FieldRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldRef::Id(id) => serializer.serialize_i64(*id),
            FieldRef::Literal { name, base_type } => {
                let mut seq = serializer.serialize_seq(Some(3))?;
                seq.serialize_element("field-literal")?;
                seq.serialize_element(name)?;
                seq.serialize_element(base_type)?;
                seq.end()
            }
        }
    }
}

/// Summary of the field an FK points to, embedded as `target`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldTarget {
    pub id: FieldId,
    pub table_id: TableId,
    pub name: String,
    pub display_name: String,
    pub base_type: BaseType,
    pub special_type: Option<SpecialType>,
}

impl From<&Field> for FieldTarget {
    fn from(field: &Field) -> Self {
        Self {
            id: field.id,
            table_id: TableId::Physical(field.table_id),
            name: field.name.clone(),
            display_name: field.display_name.clone(),
            base_type: field.base_type,
            special_type: field.special_type,
        }
    }
}

/// Outcome of resolving a field's FK target for the current reader.
///
/// Both unresolved states are reported to clients the same way (no
/// `target`), but stay distinct here so callers can tell a pending sync
/// from a permission boundary.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TargetResolution {
    /// No FK target to resolve.
    #[default]
    None,
    Resolved(FieldTarget),
    /// The target id is set but its field has not been synced yet.
    PendingSync(FieldId),
    /// The reader cannot see the target's table.
    PermissionDenied(FieldId),
}

impl TargetResolution {
    pub fn resolved(&self) -> Option<&FieldTarget> {
        match self {
            TargetResolution::Resolved(target) => Some(target),
            _ => None,
        }
    }
}
