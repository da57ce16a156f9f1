//! Builds the query metadata payload from a table snapshot.

use crate::binning::{options_table, select_options, BinningInput};
use crate::dimension::{describe_dimension, has_field_values, resolve_values, HasFieldValues};
use crate::fingerprint::{fingerprint_of, Fingerprint};
use crate::model::{
    BaseType, Card, DriverFeature, FieldRef, ResultColumn, Table, TableId, TargetResolution,
    TypeClass, VisibilityType,
};

use super::error::{MetadataError, MetadataResult};
use super::response::{FieldMetadata, TableMetadata};
use super::snapshot::{FieldSnapshot, MetadataRequest, TableSnapshot};

/// Assemble metadata for the table a request names.
///
/// Pure over its inputs: the same request and snapshot always produce the
/// same payload, field for field and byte for byte once serialized.
pub fn assemble(
    request: &MetadataRequest,
    snapshot: &TableSnapshot,
) -> MetadataResult<TableMetadata> {
    if snapshot.table_id() != request.table_id {
        return Err(MetadataError::TableNotFound(request.table_id));
    }

    let supports_binning = snapshot.database().supports(DriverFeature::Binning);
    let metadata = match snapshot {
        TableSnapshot::Physical { table, fields, .. } => {
            assemble_physical(request, supports_binning, table, fields)?
        }
        TableSnapshot::Virtual { card, .. } => assemble_virtual(request, supports_binning, card)?,
    };

    tracing::debug!(
        table = %metadata.id,
        fields = metadata.fields.len(),
        "assembled table metadata"
    );
    Ok(metadata)
}

fn is_listed(visibility: VisibilityType, include_sensitive: bool) -> bool {
    match visibility {
        VisibilityType::Retired => false,
        VisibilityType::Sensitive => include_sensitive,
        _ => true,
    }
}

fn assemble_physical(
    request: &MetadataRequest,
    supports_binning: bool,
    table: &Table,
    fields: &[FieldSnapshot],
) -> MetadataResult<TableMetadata> {
    let mut listed: Vec<&FieldSnapshot> = fields
        .iter()
        .filter(|s| is_listed(s.field.visibility_type, request.include_sensitive_fields))
        .collect();
    listed.sort_by(|a, b| {
        (a.field.position, &a.field.name, a.field.id).cmp(&(
            b.field.position,
            &b.field.name,
            b.field.id,
        ))
    });

    let fields = listed
        .into_iter()
        .map(|snapshot| field_metadata(snapshot, supports_binning))
        .collect::<MetadataResult<Vec<_>>>()?;

    Ok(TableMetadata {
        id: TableId::Physical(table.id),
        db_id: table.db_id,
        schema: table.schema.clone(),
        name: table.name.clone(),
        display_name: table.display_name.clone(),
        description: table.description.clone(),
        active: table.active,
        visibility_type: table.visibility_type,
        entity_type: table.entity_type.clone(),
        rows: table.rows,
        fields,
        dimension_options: options_table(),
    })
}

fn field_metadata(snapshot: &FieldSnapshot, supports_binning: bool) -> MetadataResult<FieldMetadata> {
    let field = &snapshot.field;
    let dimension = snapshot.dimension.as_ref();
    let fingerprint = fingerprint_of(field)?;

    let values = resolve_values(field, dimension)?;
    let dimensions = describe_dimension(field, dimension)?;
    let binning = select_options(
        BinningInput {
            base_type: field.base_type,
            special_type: field.special_type,
            fingerprint,
        },
        supports_binning,
    );

    let target = match &snapshot.target {
        TargetResolution::Resolved(target) => Some(target.clone()),
        TargetResolution::None => None,
        TargetResolution::PendingSync(target_id) => {
            tracing::debug!(field = field.id, target_id, "FK target not synced yet");
            None
        }
        TargetResolution::PermissionDenied(target_id) => {
            tracing::debug!(field = field.id, target_id, "FK target hidden from reader");
            None
        }
    };

    Ok(FieldMetadata {
        id: FieldRef::Id(field.id),
        table_id: TableId::Physical(field.table_id),
        name: field.name.clone(),
        display_name: field.display_name.clone(),
        description: field.description.clone(),
        base_type: field.base_type,
        special_type: field.special_type,
        visibility_type: field.visibility_type,
        fk_target_field_id: field.fk_target_field_id,
        target,
        position: field.position,
        preview_display: field.preview_display,
        fingerprint: fingerprint.cloned(),
        has_field_values: has_field_values(field),
        values,
        dimensions,
        dimension_options: binning.dimension_options,
        default_dimension_option: binning.default_dimension_option,
    })
}

/// A result column's fingerprint, checked against its declared base type.
///
/// Columns without a declared type accept any fingerprint.
fn column_fingerprint<'a>(
    table_id: TableId,
    column: &'a ResultColumn,
) -> MetadataResult<Option<&'a Fingerprint>> {
    let (Some(fingerprint), Some(base_type)) = (column.fingerprint.as_ref(), column.base_type)
    else {
        return Ok(column.fingerprint.as_ref());
    };

    let class = fingerprint.class();
    if class != TypeClass::General && class != base_type.class() {
        return Err(MetadataError::ColumnFingerprintMismatch {
            table_id,
            column: column.name.clone(),
            base_type,
            fingerprint: class,
        });
    }
    Ok(Some(fingerprint))
}

fn assemble_virtual(
    request: &MetadataRequest,
    supports_binning: bool,
    card: &Card,
) -> MetadataResult<TableMetadata> {
    let table_id = card.table_id();

    let fields = card
        .result_metadata
        .iter()
        .enumerate()
        .map(|(position, column)| {
            let base_type = column.base_type.unwrap_or(BaseType::Unknown);
            let fingerprint = column_fingerprint(table_id, column)?;
            let binning = select_options(
                BinningInput {
                    base_type,
                    special_type: None,
                    fingerprint,
                },
                supports_binning,
            );

            Ok(FieldMetadata {
                id: FieldRef::Literal {
                    name: column.name.clone(),
                    base_type,
                },
                table_id,
                name: column.name.clone(),
                display_name: column
                    .display_name
                    .clone()
                    .unwrap_or_else(|| crate::classify::humanize(&column.name)),
                description: None,
                base_type,
                special_type: None,
                visibility_type: VisibilityType::Normal,
                fk_target_field_id: None,
                target: None,
                position: i32::try_from(position).unwrap_or(i32::MAX),
                preview_display: true,
                fingerprint: fingerprint.cloned(),
                has_field_values: HasFieldValues::None,
                values: Vec::new(),
                dimensions: None,
                dimension_options: binning.dimension_options,
                default_dimension_option: binning.default_dimension_option,
            })
        })
        .collect::<MetadataResult<Vec<_>>>()?;

    Ok(TableMetadata {
        id: table_id,
        db_id: card.database_id,
        schema: Some(
            card.collection
                .clone()
                .unwrap_or_else(|| request.virtual_table_schema.clone()),
        ),
        name: card.name.clone(),
        display_name: card.name.clone(),
        description: card.description.clone(),
        active: true,
        visibility_type: None,
        entity_type: None,
        rows: None,
        fields,
        dimension_options: options_table(),
    })
}
