//! Declarative layouts for versioned binary protocol objects.
//!
//! This crate describes what a wire struct looks like; it does not encode
//! anything. `codec` walks these descriptors to pack and unpack values.
//! - [`StructSchema`]: ordered fields, optionally sized by a length field
//! - [`FieldKind`]: integers, enums, bitmasks, padding, bytes, strings,
//!   nested structs, lists and discriminated bodies
//! - [`EnumDef`] / [`BitmaskDef`]: named value tables with forward-compatible bindings
//! - [`BodyDispatch`]: discriminant-driven body layouts
//! - [`schema_hash`]: deterministic fingerprint of a layout
//!
//! Schemas are `'static` data, normally declared as `static` items so a whole
//! protocol version can be built at compile time.

mod binding;
mod dispatch;
mod error;
mod field;
mod hash;
mod schema;

pub use binding::{BitmaskDef, BitmaskValue, EnumDef, EnumValue, Variant};
pub use dispatch::{BodyCase, BodyDispatch, BodyShape};
pub use error::{SchemaError, SchemaResult};
pub use field::{FieldDef, FieldKind, ListDef, ListExtent};
pub use hash::schema_hash;
pub use octets::Width;
pub use schema::StructSchema;
