//! Table query metadata.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                           Catalog                               │
//! │   records from sync  +  ReadAccess  →  TableSnapshot            │
//! │   (FK targets resolved to Resolved / PendingSync / Denied)      │
//! └─────────────────────────────────────────────────────────────────┘
//!                           │
//!                           ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      assemble (pure)                            │
//! │  ┌──────────────┬──────────────────┬─────────────────────────┐  │
//! │  │ fingerprint  │ dimension        │ binning                 │  │
//! │  │ fingerprint_ │ resolve_values   │ select_options          │  │
//! │  │ of           │ describe_dim.    │ options_table           │  │
//! │  └──────────────┴──────────────────┴─────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//!                           │
//!                           ▼
//!                     TableMetadata (JSON)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use sextant::metadata::{assemble, Catalog, MetadataRequest, ReadAccess};
//! use sextant::model::TableId;
//!
//! let catalog = Catalog::load("catalog.json")?;
//! let table_id: TableId = "card__3".parse()?;
//! let snapshot = catalog.snapshot(table_id, &ReadAccess::All)?;
//! let metadata = assemble(&MetadataRequest::new(table_id), &snapshot)?;
//! println!("{}", serde_json::to_string_pretty(&metadata)?);
//! ```

mod assembler;
mod catalog;
mod digest;
mod error;
mod response;
mod snapshot;

pub use assembler::assemble;
pub use catalog::{Catalog, CatalogError, ReadAccess};
pub use digest::{compute_hash, metadata_digest};
pub use error::{MetadataError, MetadataResult};
pub use response::{FieldMetadata, TableMetadata};
pub use snapshot::{FieldSnapshot, MetadataRequest, TableSnapshot};
