//! # Sextant
//!
//! Table and field metadata for a visual query builder.
//!
//! ## Architecture
//!
//! Sync (outside this crate) produces database, table and field records with
//! per-field fingerprints. Sextant turns those records into the metadata a
//! query builder needs to offer filters, remapped values and groupings:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │        Fingerprint Store (fingerprint)                   │
//! │  fingerprint_of · versions · SQLite / in-memory stores   │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [sync time only]
//! ┌─────────────────────────────────────────────────────────┐
//! │        Type Classifier (classify)                        │
//! │  manual override > existing > name > cardinality > text  │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼
//! ┌──────────────────────────┐  ┌──────────────────────────┐
//! │  Dimension Resolver      │  │  Binning Selector        │
//! │  (dimension)             │  │  (binning)               │
//! │  values · dimensions     │  │  dimension_options       │
//! └──────────────────────────┘  └──────────────────────────┘
//!                          │
//!                          ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │        Metadata Assembler (metadata)                     │
//! │  Catalog + ReadAccess → TableSnapshot → TableMetadata    │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod binning;
pub mod classify;
pub mod config;
pub mod dimension;
pub mod fingerprint;
pub mod logging;
pub mod metadata;
pub mod model;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::binning::{options_table, select_options, BinningInput, FieldBinning};
    pub use crate::dimension::{describe_dimension, resolve_values, FieldValue};
    pub use crate::fingerprint::{fingerprint_of, Fingerprint};
    pub use crate::metadata::{
        assemble, Catalog, MetadataError, MetadataRequest, MetadataResult, ReadAccess,
        TableMetadata, TableSnapshot,
    };
    pub use crate::model::{
        BaseType, Dimension, Field, SpecialType, TableId, TargetResolution, VisibilityType,
    };
}
