//! Field values and dimension descriptors.
//!
//! Turns a field, its fingerprint and its (optional) dimension into the
//! `values` and `dimensions` entries of a metadata response:
//!
//! ```text
//! special type    dimension   values                      dimensions
//! Category/Enum   internal    [[0, "a"], [1, "b"], ...]   {type: "internal", human_readable_field_id: null}
//! Category/Enum   external    []                          {type: "external", human_readable_field_id: <id>}
//! Category/Enum   none        [[raw], [raw], ...]         null
//! anything else   any         []                          descriptor or null
//! ```
//!
//! Ordinals are dense, 0-based positions in the distinct raw values sorted
//! ascending, so they stay stable as long as the value set does.

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

use crate::fingerprint::fingerprint_of;
use crate::metadata::{MetadataError, MetadataResult};
use crate::model::{
    Dimension, DimensionKind, Field, FieldId, RawValue, Remapping, SpecialType, TableId,
    TargetResolution, VisibilityType,
};

/// One entry of a field's `values`.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// `[ordinal, label]`, produced under an internal remap.
    Remapped { ordinal: usize, label: String },
    /// `[raw]`, produced when no remap exists.
    Raw(RawValue),
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Remapped { ordinal, label } => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element(ordinal)?;
                seq.serialize_element(label)?;
                seq.end()
            }
            FieldValue::Raw(value) => {
                let mut seq = serializer.serialize_seq(Some(1))?;
                seq.serialize_element(value)?;
                seq.end()
            }
        }
    }
}

/// Whether a field enumerates its values for filter widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HasFieldValues {
    List,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DimensionType {
    Internal,
    External,
}

/// The `dimensions` entry of a field descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DimensionDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DimensionType,
    pub field_id: FieldId,
    pub human_readable_field_id: Option<FieldId>,
}

/// Only discrete, low-cardinality fields enumerate values.
pub fn qualifies_for_values(field: &Field) -> bool {
    field.special_type.is_some_and(|s| s.is_category_like())
}

pub fn has_field_values(field: &Field) -> HasFieldValues {
    if qualifies_for_values(field) {
        HasFieldValues::List
    } else {
        HasFieldValues::None
    }
}

/// Pick the single dimension belonging to `field` out of a list.
///
/// More than one is a broken snapshot, not a choice to make here.
pub fn dimension_for<'a>(
    field: &Field,
    dimensions: &'a [Dimension],
) -> MetadataResult<Option<&'a Dimension>> {
    let mut matching = dimensions.iter().filter(|d| d.field_id == field.id);
    let first = matching.next();
    if matching.next().is_some() {
        return Err(MetadataError::MultipleDimensions(field.id));
    }
    Ok(first)
}

fn check_owner(field: &Field, dimension: &Dimension) -> MetadataResult<()> {
    if dimension.field_id != field.id {
        return Err(MetadataError::DimensionFieldMismatch {
            field_id: field.id,
            dimension_field_id: dimension.field_id,
        });
    }
    Ok(())
}

/// Compute the `values` of a field.
pub fn resolve_values(
    field: &Field,
    dimension: Option<&Dimension>,
) -> MetadataResult<Vec<FieldValue>> {
    if let Some(dimension) = dimension {
        check_owner(field, dimension)?;
    }
    let fingerprint = fingerprint_of(field)?;

    if !qualifies_for_values(field) {
        return Ok(Vec::new());
    }

    let remappings = match dimension.map(|d| &d.kind) {
        Some(DimensionKind::External { .. }) => return Ok(Vec::new()),
        Some(DimensionKind::Internal { remappings }) => Some(remap_table(field.id, remappings)?),
        None => None,
    };

    let distinct = fingerprint
        .and_then(|fp| fp.global.distinct_values.as_deref())
        .unwrap_or_default();
    let sorted = sorted_distinct(field.id, distinct)?;

    let values = match remappings {
        Some(labels) => sorted
            .into_iter()
            .enumerate()
            .map(|(ordinal, raw)| FieldValue::Remapped {
                ordinal,
                label: labels
                    .get(raw)
                    .map(|label| label.to_string())
                    .unwrap_or_else(|| raw.to_string()),
            })
            .collect(),
        None => sorted.into_iter().cloned().map(FieldValue::Raw).collect(),
    };
    Ok(values)
}

fn remap_table(
    field_id: FieldId,
    remappings: &[Remapping],
) -> MetadataResult<BTreeMap<&RawValue, &str>> {
    let mut labels = BTreeMap::new();
    for remapping in remappings {
        if labels
            .insert(&remapping.value, remapping.label.as_str())
            .is_some()
        {
            return Err(MetadataError::DuplicateRemapping {
                field_id,
                value: remapping.value.to_string(),
            });
        }
    }
    Ok(labels)
}

fn sorted_distinct(field_id: FieldId, values: &[RawValue]) -> MetadataResult<Vec<&RawValue>> {
    let mut sorted: Vec<&RawValue> = values.iter().collect();
    sorted.sort();
    if let Some(pair) = sorted.windows(2).find(|pair| pair[0] == pair[1]) {
        return Err(MetadataError::DuplicateValue {
            field_id,
            value: pair[0].to_string(),
        });
    }
    Ok(sorted)
}

/// Compute the `dimensions` entry of a field.
pub fn describe_dimension(
    field: &Field,
    dimension: Option<&Dimension>,
) -> MetadataResult<Option<DimensionDescriptor>> {
    let Some(dimension) = dimension else {
        return Ok(None);
    };
    check_owner(field, dimension)?;

    let (kind, human_readable_field_id) = match dimension.kind {
        DimensionKind::Internal { .. } => (DimensionType::Internal, None),
        DimensionKind::External {
            human_readable_field_id,
        } => (DimensionType::External, Some(human_readable_field_id)),
    };

    Ok(Some(DimensionDescriptor {
        id: dimension.id,
        name: dimension.name.clone(),
        kind,
        field_id: field.id,
        human_readable_field_id,
    }))
}

/// Suggest an external remap for an FK field.
///
/// If the FK's target resolved and the target table has a visible `Name`
/// field, the FK can be displayed through that field. Fields that already
/// have a dimension are left alone by the caller.
pub fn suggest_external_remapping(
    field: &Field,
    target: &TargetResolution,
    target_table_fields: &[Field],
) -> Option<Dimension> {
    if !field.is_foreign_key() {
        return None;
    }
    let target = target.resolved()?;
    let TableId::Physical(target_table) = target.table_id else {
        return None;
    };

    let name_field = target_table_fields
        .iter()
        .filter(|f| f.table_id == target_table)
        .filter(|f| f.special_type == Some(SpecialType::Name))
        .filter(|f| {
            !matches!(
                f.visibility_type,
                VisibilityType::Retired | VisibilityType::Sensitive
            )
        })
        .min_by_key(|f| (f.position, f.id))?;

    tracing::debug!(
        field = field.id,
        human_readable_field = name_field.id,
        "suggesting external remapping"
    );
    Some(Dimension::external(
        field.id,
        field.display_name.clone(),
        name_field.id,
    ))
}
