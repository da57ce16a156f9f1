//! Special type classification.
//!
//! Sync calls this once per newly discovered field to guess a semantic type
//! from the field's name and fingerprint. Metadata reads never classify;
//! they use whatever special type is stored on the field.
//!
//! Precedence, highest first:
//!
//! 1. a manual override set by a user,
//! 2. a special type already on the field (e.g. PK/FK from constraints),
//! 3. name rules (`id`, `latitude`, `status`, ...),
//! 4. low distinct count → `Category`,
//! 5. text fingerprint ratios → `URL` / `Email` / `SerializedJSON`.

mod humanize;
mod naming;

pub use humanize::humanize;
pub use naming::infer_from_name;

use serde::Serialize;
use std::collections::BTreeMap;

use crate::config::ClassifierSettings;
use crate::fingerprint::{fingerprint_of, Fingerprint};
use crate::metadata::MetadataResult;
use crate::model::{Field, FieldId, SpecialType, TypeClass};

/// Where a classification came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationSource {
    Manual,
    Existing,
    Name,
    Cardinality,
    Fingerprint,
    Unclassified,
}

/// Result of classifying one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub special_type: Option<SpecialType>,
    pub source: ClassificationSource,
    /// Whether the field should be shown in table previews.
    pub preview_display: bool,
}

/// Classify a single field.
///
/// `manual_override` is the user's choice, if any; it is returned untouched.
pub fn classify(
    field: &Field,
    manual_override: Option<SpecialType>,
    settings: &ClassifierSettings,
) -> MetadataResult<Classification> {
    let fingerprint = fingerprint_of(field)?;
    let preview_display = field.preview_display && !is_long_text(fingerprint, settings);

    let (special_type, source) = if let Some(manual) = manual_override {
        (Some(manual), ClassificationSource::Manual)
    } else if let Some(existing) = field.special_type {
        (Some(existing), ClassificationSource::Existing)
    } else if let Some(by_name) = infer_from_name(&field.name, field.base_type) {
        (Some(by_name), ClassificationSource::Name)
    } else if is_category(field, fingerprint, settings) {
        (Some(SpecialType::Category), ClassificationSource::Cardinality)
    } else if let Some(by_text) = infer_from_text(fingerprint, settings) {
        (Some(by_text), ClassificationSource::Fingerprint)
    } else {
        (None, ClassificationSource::Unclassified)
    };

    Ok(Classification {
        special_type,
        source,
        preview_display,
    })
}

/// Classify every field of a table, keyed by field id.
pub fn classify_fields(
    fields: &[Field],
    overrides: &BTreeMap<FieldId, SpecialType>,
    settings: &ClassifierSettings,
) -> MetadataResult<BTreeMap<FieldId, Classification>> {
    fields
        .iter()
        .map(|field| {
            let classification = classify(field, overrides.get(&field.id).copied(), settings)?;
            tracing::debug!(
                field = %field.name,
                special_type = ?classification.special_type,
                source = ?classification.source,
                "classified field"
            );
            Ok((field.id, classification))
        })
        .collect()
}

fn is_category(
    field: &Field,
    fingerprint: Option<&Fingerprint>,
    settings: &ClassifierSettings,
) -> bool {
    if matches!(field.base_type.class(), TypeClass::DateTime | TypeClass::General) {
        return false;
    }

    fingerprint
        .and_then(|fp| fp.global.distinct_count)
        .is_some_and(|count| count < settings.category_cardinality_threshold)
}

fn infer_from_text(
    fingerprint: Option<&Fingerprint>,
    settings: &ClassifierSettings,
) -> Option<SpecialType> {
    let text = fingerprint?.as_text()?;
    let over = |ratio: Option<f64>| ratio.is_some_and(|r| r >= settings.percent_valid_threshold);

    if over(text.percent_url) {
        Some(SpecialType::Url)
    } else if over(text.percent_email) {
        Some(SpecialType::Email)
    } else if over(text.percent_json) {
        Some(SpecialType::SerializedJson)
    } else {
        None
    }
}

fn is_long_text(fingerprint: Option<&Fingerprint>, settings: &ClassifierSettings) -> bool {
    fingerprint
        .and_then(Fingerprint::as_text)
        .and_then(|t| t.average_length)
        .is_some_and(|len| len > settings.no_preview_display_length)
}
