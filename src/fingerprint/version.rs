//! Fingerprint schema versioning.
//!
//! Every time the fingerprint format changes the version is bumped, and the
//! change records which data classes it affected. A field is stale when any
//! version newer than the one its fingerprint was computed with touches its
//! base type class.

use crate::model::{Field, TypeClass};

/// Version of the fingerprint format produced by the current sync.
pub const CURRENT_FINGERPRINT_VERSION: i32 = 2;

/// History of fingerprint format changes.
#[derive(Debug, Clone)]
pub struct FingerprintVersions {
    /// `(version, classes that must be re-fingerprinted to reach it)`,
    /// ascending by version.
    changes: Vec<(i32, Vec<TypeClass>)>,
}

impl Default for FingerprintVersions {
    fn default() -> Self {
        Self {
            changes: vec![
                // First fingerprints: everything.
                (1, TypeClass::ALL.to_vec()),
                // Distinct value lists for categorical fields.
                (2, vec![TypeClass::Number, TypeClass::Text, TypeClass::Boolean]),
            ],
        }
    }
}

impl FingerprintVersions {
    pub fn new(mut changes: Vec<(i32, Vec<TypeClass>)>) -> Self {
        changes.sort_by_key(|(version, _)| *version);
        Self { changes }
    }

    /// Latest version in the history.
    pub fn current(&self) -> i32 {
        self.changes.last().map(|(v, _)| *v).unwrap_or(0)
    }

    /// Check whether a fingerprint computed at `version` is stale for `class`.
    pub fn is_stale(&self, version: i32, class: TypeClass) -> bool {
        self.changes
            .iter()
            .filter(|(v, _)| *v > version)
            .any(|(_, classes)| classes.contains(&class))
    }
}

/// Check whether sync should recompute this field's fingerprint.
pub fn needs_refingerprint(field: &Field, versions: &FingerprintVersions) -> bool {
    if field.fingerprint.is_none() {
        return true;
    }
    versions.is_stale(field.fingerprint_version, field.base_type.class())
}

/// Fields whose fingerprints are missing or stale, in input order.
pub fn fields_to_refingerprint<'a>(
    fields: &'a [Field],
    versions: &FingerprintVersions,
) -> Vec<&'a Field> {
    fields
        .iter()
        .filter(|f| needs_refingerprint(f, versions))
        .collect()
}
