//! Raw field values as observed in the physical database.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A single distinct value of a field.
///
/// Values of one field normally share a variant. Ordering is total so that
/// value lists can be sorted deterministically: booleans sort before numbers,
/// numbers before text, and integers compare numerically with floats.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl RawValue {
    fn rank(&self) -> u8 {
        match self {
            RawValue::Boolean(_) => 0,
            RawValue::Integer(_) | RawValue::Float(_) => 1,
            RawValue::Text(_) => 2,
        }
    }
}

/// Orders floats by value with `-0.0 == 0.0`; NaNs fall back to `total_cmp`
/// and so sort below or above every number depending on their sign.
fn cmp_floats(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b))
}

/// Exact comparison of an integer with a float, without rounding the integer.
fn cmp_integer_float(i: i64, f: f64) -> Ordering {
    // 2^63; every finite float at or above it exceeds i64::MAX.
    const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;

    if f.is_nan() {
        return if f.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    if f >= TWO_POW_63 {
        return Ordering::Less;
    }
    if f < -TWO_POW_63 {
        return Ordering::Greater;
    }

    // In range, so the truncated float converts to i64 without loss.
    let whole = f.trunc() as i64;
    i.cmp(&whole).then_with(|| cmp_floats(0.0, f.fract()))
}

impl Ord for RawValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (RawValue::Boolean(a), RawValue::Boolean(b)) => a.cmp(b),
            (RawValue::Integer(a), RawValue::Integer(b)) => a.cmp(b),
            (RawValue::Float(a), RawValue::Float(b)) => cmp_floats(*a, *b),
            (RawValue::Integer(a), RawValue::Float(b)) => cmp_integer_float(*a, *b),
            (RawValue::Float(a), RawValue::Integer(b)) => cmp_integer_float(*b, *a).reverse(),
            (RawValue::Text(a), RawValue::Text(b)) => a.cmp(b),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }
}

impl PartialOrd for RawValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for RawValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RawValue {}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Boolean(b) => write!(f, "{}", b),
            RawValue::Integer(i) => write!(f, "{}", i),
            RawValue::Float(x) => write!(f, "{}", x),
            RawValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RawValue {
    fn from(v: i64) -> Self {
        RawValue::Integer(v)
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        RawValue::Float(v)
    }
}

impl From<bool> for RawValue {
    fn from(v: bool) -> Self {
        RawValue::Boolean(v)
    }
}

impl From<&str> for RawValue {
    fn from(v: &str) -> Self {
        RawValue::Text(v.to_string())
    }
}

impl From<String> for RawValue {
    fn from(v: String) -> Self {
        RawValue::Text(v)
    }
}
