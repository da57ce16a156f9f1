//! Per-field statistical fingerprints.
//!
//! A fingerprint is computed by the sync process over the physical data and
//! stored with the field. It has a global part shared by every field and a
//! part keyed by the field's data class:
//!
//! ```text
//! {
//!   "global": {"distinct-count": 4, "nil%": 0.0},
//!   "type":   {"type/Number": {"min": 1.0, "max": 4.0, "avg": 2.0, "sd": 0.8}}
//! }
//! ```
//!
//! Absent aggregates (`null`) mean "unknown", never zero. A field with no
//! fingerprint at all simply has no statistics; consumers must treat that as
//! an ordinary state.

mod store;
mod version;

pub use store::{
    hydrate, FingerprintStore, InMemoryFingerprintStore, SqliteFingerprintStore, StoreError,
    StoreResult, StoredFingerprint,
};
pub use version::{
    fields_to_refingerprint, needs_refingerprint, FingerprintVersions, CURRENT_FINGERPRINT_VERSION,
};

use serde::{Deserialize, Serialize};

use crate::metadata::{MetadataError, MetadataResult};
use crate::model::{Field, RawValue, TypeClass};

/// Statistical summary of a field's observed values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fingerprint {
    #[serde(default)]
    pub global: GlobalFingerprint,
    #[serde(rename = "type")]
    pub typed: TypedFingerprint,
}

/// Aggregates computed for every field regardless of type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalFingerprint {
    #[serde(rename = "distinct-count", default)]
    pub distinct_count: Option<u64>,
    #[serde(rename = "nil%", default)]
    pub nil_percent: Option<f64>,
    /// Distinct raw values, kept only for low-cardinality fields.
    #[serde(
        rename = "distinct-values",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub distinct_values: Option<Vec<RawValue>>,
}

/// Class-specific aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypedFingerprint {
    #[serde(rename = "type/Number")]
    Number(NumberFingerprint),
    #[serde(rename = "type/Text")]
    Text(TextFingerprint),
    #[serde(rename = "type/DateTime")]
    DateTime(DateTimeFingerprint),
    #[serde(rename = "type/Boolean")]
    Boolean(BooleanFingerprint),
    /// Only the global part is known.
    #[serde(rename = "type/*")]
    General(GeneralFingerprint),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NumberFingerprint {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub avg: Option<f64>,
    #[serde(default)]
    pub sd: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextFingerprint {
    #[serde(rename = "percent-json", default)]
    pub percent_json: Option<f64>,
    #[serde(rename = "percent-url", default)]
    pub percent_url: Option<f64>,
    #[serde(rename = "percent-email", default)]
    pub percent_email: Option<f64>,
    #[serde(rename = "average-length", default)]
    pub average_length: Option<f64>,
}

/// Temporal range as ISO-8601 strings, in the driver's own formatting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateTimeFingerprint {
    #[serde(default)]
    pub earliest: Option<String>,
    #[serde(default)]
    pub latest: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BooleanFingerprint {
    #[serde(rename = "percent-true", default)]
    pub percent_true: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneralFingerprint {}

impl TypedFingerprint {
    pub fn class(&self) -> TypeClass {
        match self {
            TypedFingerprint::Number(_) => TypeClass::Number,
            TypedFingerprint::Text(_) => TypeClass::Text,
            TypedFingerprint::DateTime(_) => TypeClass::DateTime,
            TypedFingerprint::Boolean(_) => TypeClass::Boolean,
            TypedFingerprint::General(_) => TypeClass::General,
        }
    }
}

impl Fingerprint {
    pub fn number(min: Option<f64>, max: Option<f64>) -> Self {
        Self {
            global: GlobalFingerprint::default(),
            typed: TypedFingerprint::Number(NumberFingerprint {
                min,
                max,
                ..Default::default()
            }),
        }
    }

    pub fn text(text: TextFingerprint) -> Self {
        Self {
            global: GlobalFingerprint::default(),
            typed: TypedFingerprint::Text(text),
        }
    }

    pub fn date_time(earliest: Option<&str>, latest: Option<&str>) -> Self {
        Self {
            global: GlobalFingerprint::default(),
            typed: TypedFingerprint::DateTime(DateTimeFingerprint {
                earliest: earliest.map(str::to_string),
                latest: latest.map(str::to_string),
            }),
        }
    }

    pub fn general() -> Self {
        Self {
            global: GlobalFingerprint::default(),
            typed: TypedFingerprint::General(GeneralFingerprint {}),
        }
    }

    /// Attach a distinct value list (and its count) to the global part.
    pub fn with_distinct_values(mut self, values: Vec<RawValue>) -> Self {
        self.global.distinct_count = Some(values.len() as u64);
        self.global.distinct_values = Some(values);
        self
    }

    pub fn with_distinct_count(mut self, count: u64) -> Self {
        self.global.distinct_count = Some(count);
        self
    }

    pub fn class(&self) -> TypeClass {
        self.typed.class()
    }

    pub fn as_number(&self) -> Option<&NumberFingerprint> {
        match &self.typed {
            TypedFingerprint::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextFingerprint> {
        match &self.typed {
            TypedFingerprint::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_date_time(&self) -> Option<&DateTimeFingerprint> {
        match &self.typed {
            TypedFingerprint::DateTime(d) => Some(d),
            _ => None,
        }
    }

    /// Min and max, only when both are known.
    pub fn number_bounds(&self) -> Option<(f64, f64)> {
        let n = self.as_number()?;
        Some((n.min?, n.max?))
    }
}

/// The fingerprint of a field, checked against the field's base type.
///
/// `Ok(None)` is a normal answer for never-synced fields. A fingerprint whose
/// class differs from the base type class is rejected; a `General`
/// fingerprint carries no class-specific data and is accepted for any field.
pub fn fingerprint_of(field: &Field) -> MetadataResult<Option<&Fingerprint>> {
    let Some(fingerprint) = field.fingerprint.as_ref() else {
        return Ok(None);
    };

    let class = fingerprint.class();
    if class != TypeClass::General && class != field.base_type.class() {
        return Err(MetadataError::FingerprintMismatch {
            field_id: field.id,
            base_type: field.base_type,
            fingerprint: class,
        });
    }

    Ok(Some(fingerprint))
}
