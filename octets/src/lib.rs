//! Big-endian primitive codecs for the ofp protocol objects.
//!
//! This crate provides [`ByteWriter`] and [`ByteReader`] for fixed-width
//! network-order integers, padding, fixed-length byte fields, null-padded
//! strings and raw blobs. It is designed for bounded, panic-free operation
//! with explicit error handling.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Safety is paramount.
//! - **Bounded operations** - All reads are bounds-checked.
//! - **No silent truncation** - Values that do not fit their width are errors.
//! - **No domain knowledge** - This crate knows nothing about messages or versions.
//!
//! # Example
//!
//! ```
//! use octets::{ByteReader, ByteWriter, Width};
//!
//! let mut writer = ByteWriter::new();
//! writer.write_uint(2, Width::U8).unwrap();
//! writer.write_pad(1);
//! writer.write_cstr("s1", 4).unwrap();
//!
//! let bytes = writer.finish();
//!
//! let mut reader = ByteReader::new(&bytes);
//! assert_eq!(reader.read_uint(Width::U8).unwrap(), 2);
//! reader.skip(1).unwrap();
//! assert_eq!(reader.read_cstr(4).unwrap(), b"s1");
//! ```

mod error;
mod reader;
mod width;
mod writer;

pub use error::{OctetError, OctetResult};
pub use reader::ByteReader;
pub use width::{decode_uint, encode_uint, Width};
pub use writer::{check_cstr, ByteWriter};
