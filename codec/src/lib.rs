//! Schema-driven pack and unpack of protocol structs.
//!
//! This crate ties the primitive codec in `octets` to the layouts in `schema`:
//! - [`StructValue`]: a struct instance with per-field defaults
//! - [`Value`]: integers, bound enums/bitmasks, bytes, strings, nested structs,
//!   lists and resolved bodies
//! - [`resolve_body`]: discriminant-driven body decoding
//! - [`CodecLimits`]: bounds applied to untrusted input
//!
//! # Design Principles
//!
//! - **Declared lengths win** - A struct with a length field is bounded by it.
//! - **Forward compatible** - Unknown enum values, flag bits and body
//!   discriminants decode and re-encode unchanged.
//! - **Derived fields are never stale** - Length fields and list counts are
//!   computed from content on every pack.

mod body;
mod error;
mod limits;
mod list;
mod pack;
mod structs;
mod unpack;
mod value;

pub use body::resolve_body;
pub use error::{CodecError, CodecResult, ErrorKind, LimitKind};
pub use limits::CodecLimits;
pub use structs::StructValue;
pub use value::{Body, Value};

#[cfg(test)]
mod tests {
    use super::*;
    use schema::{FieldDef, StructSchema};

    static HELLO: StructSchema = StructSchema::new("Hello", &[FieldDef::blob("elements")]);

    #[test]
    fn public_api_exports() {
        let _ = CodecLimits::default();
        let _ = StructValue::new(&HELLO);
        let _ = Value::from(1u8);
        let _ = Body::Empty;
        let _: CodecResult<()> = Ok(());
    }

    #[test]
    fn empty_blob_struct_roundtrips() {
        let value = StructValue::new(&HELLO);
        let bytes = value.pack().unwrap();
        assert!(bytes.is_empty());
        assert_eq!(StructValue::decode(&HELLO, &bytes).unwrap(), value);
    }
}
