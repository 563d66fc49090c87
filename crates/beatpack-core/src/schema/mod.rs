//! Schema descriptors and the extension-data carrier.
//!
//! - `Schema` / `FieldSpec` - ordered per-entity field lists with defaults
//! - `DocumentReader` / `DocumentWriter` - descriptor-driven decode and encode
//! - `Extensions` - fields outside the declared schema, kept verbatim
//! - `tables` - descriptor tables for each schema generation

mod descriptor;
mod document;
mod extension;
pub mod tables;

pub use descriptor::*;
pub use document::{DocumentReader, DocumentWriter};
pub use extension::*;
pub use tables::{SchemaTable, SetLayout};

pub(crate) use document::kind_of;
