//! Snapshot types for databases, tables, fields and dimensions.
//!
//! These are plain immutable records: the sync process (outside this crate)
//! produces them, and the metadata core only reads them.

pub mod dimension;
pub mod field;
pub mod table;
pub mod types;
pub mod value;

pub use dimension::{Dimension, DimensionKind, Remapping};
pub use field::{Field, FieldId, FieldRef, FieldTarget, TargetResolution};
pub use table::{
    Card, Database, DriverFeature, ParseTableIdError, ResultColumn, Table, TableId,
    TableVisibility, VIRTUAL_TABLE_PREFIX,
};
pub use types::{BaseType, SpecialType, TypeClass, VisibilityType};
pub use value::RawValue;
