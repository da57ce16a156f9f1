//! Binning strategy selection.
//!
//! Every metadata response carries the full option table
//! ([`DimensionOptionsTable`]) and, per field, the subset of option indices
//! that apply to it plus a nominated default. Nothing here is persisted; the
//! selection is recomputed from the fingerprint and special type on every
//! request.
//!
//! | family     | eligible when                                          | default |
//! |------------|--------------------------------------------------------|---------|
//! | temporal   | temporal base/special type, fingerprint present        | `"4"`   |
//! | coordinate | Latitude/Longitude, known min & max, driver binning    | `"19"`  |
//! | numeric    | numeric base type, no or numeric special type, bounds  | `"15"`  |

mod options;

pub use options::{
    option_at, BinningStrategy, DimensionOption, DimensionOptionsTable, OptionFamily, OptionKind,
    TemporalUnit, DEFAULT_COORDINATE_OPTION, DEFAULT_NUMERIC_OPTION, DEFAULT_TEMPORAL_OPTION,
    DIMENSION_OPTIONS,
};

use serde::Serialize;
use std::sync::LazyLock;

use crate::fingerprint::Fingerprint;
use crate::model::{BaseType, SpecialType, TypeClass};

/// Option indices of one family, numeric order, as strings.
fn family_indexes(family: OptionFamily) -> Vec<String> {
    let mut indexes: Vec<usize> = DIMENSION_OPTIONS
        .iter()
        .enumerate()
        .filter(|(_, option)| option.family == family)
        .map(|(index, _)| index)
        .collect();
    // Sort as integers before stringifying: "10" must follow "9", not "1".
    indexes.sort_unstable();
    indexes.into_iter().map(|i| i.to_string()).collect()
}

static TEMPORAL_INDEXES: LazyLock<Vec<String>> =
    LazyLock::new(|| family_indexes(OptionFamily::DateTime));
static NUMERIC_INDEXES: LazyLock<Vec<String>> =
    LazyLock::new(|| family_indexes(OptionFamily::Number));
static COORDINATE_INDEXES: LazyLock<Vec<String>> =
    LazyLock::new(|| family_indexes(OptionFamily::Coordinate));

/// The binning part of a field descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldBinning {
    pub dimension_options: Vec<String>,
    pub default_dimension_option: Option<String>,
}

impl FieldBinning {
    /// No binning options.
    pub fn none() -> Self {
        Self::default()
    }

    fn family(family: OptionFamily) -> Self {
        let (indexes, default) = match family {
            OptionFamily::DateTime => (&*TEMPORAL_INDEXES, DEFAULT_TEMPORAL_OPTION),
            OptionFamily::Number => (&*NUMERIC_INDEXES, DEFAULT_NUMERIC_OPTION),
            OptionFamily::Coordinate => (&*COORDINATE_INDEXES, DEFAULT_COORDINATE_OPTION),
        };
        Self {
            dimension_options: indexes.clone(),
            default_dimension_option: Some(default.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.dimension_options.is_empty()
    }

    /// Family of the selected options, if any were selected.
    pub fn option_family(&self) -> Option<OptionFamily> {
        self.dimension_options
            .first()
            .and_then(|index| option_at(index))
            .map(|option| option.family)
    }

    /// Strategy ids of the selected options (`default`, `num-bins`, ...).
    pub fn strategies(&self) -> Vec<&'static str> {
        self.dimension_options
            .iter()
            .filter_map(|index| option_at(index))
            .filter_map(DimensionOption::strategy_id)
            .collect()
    }
}

/// What the selector needs to know about a field.
///
/// Built from a persisted [`Field`](crate::model::Field) or from a virtual
/// table's result column; both carry the same three facts.
#[derive(Debug, Clone, Copy)]
pub struct BinningInput<'a> {
    pub base_type: BaseType,
    pub special_type: Option<SpecialType>,
    pub fingerprint: Option<&'a Fingerprint>,
}

/// Choose the dimension options for a field.
///
/// `supports_binning` is the database driver's `binning` feature; temporal
/// bucketing does not depend on it.
pub fn select_options(input: BinningInput<'_>, supports_binning: bool) -> FieldBinning {
    let Some(fingerprint) = input.fingerprint else {
        return FieldBinning::none();
    };

    let temporal = input.base_type.is_temporal()
        || input.special_type.is_some_and(|s| s.is_temporal());
    if temporal && matches!(fingerprint.class(), TypeClass::DateTime | TypeClass::Number) {
        return FieldBinning::family(OptionFamily::DateTime);
    }

    // Binning needs both bounds; a null min or max suppresses everything.
    if fingerprint.number_bounds().is_none() || !supports_binning {
        return FieldBinning::none();
    }

    match input.special_type {
        Some(special) if special.is_coordinate() => FieldBinning::family(OptionFamily::Coordinate),
        None if input.base_type.is_numeric() => FieldBinning::family(OptionFamily::Number),
        Some(special) if special.is_numeric() && input.base_type.is_numeric() => {
            FieldBinning::family(OptionFamily::Number)
        }
        _ => FieldBinning::none(),
    }
}

/// The full option table, as embedded in every metadata response.
pub fn options_table() -> DimensionOptionsTable {
    DimensionOptionsTable
}
