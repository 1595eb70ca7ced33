//! Message envelope and version/type resolution for ofp protocol objects.
//!
//! Every message starts with the same 8-byte header
//! (`version | type | length | xid`). This crate decodes that header with
//! the version's own header schema, resolves the type code to a registered
//! message class, and decodes the body from exactly the declared length.
//!
//! # Design Principles
//!
//! - **Header length is authoritative** - The body is bounded by the declared
//!   length, never by the buffer.
//! - **Explicit states** - A [`Message`] moves through [`MessageState`]s, so a
//!   body can be resolved before it is decoded.
//! - **No protocol data** - Version tables are registered from outside; the
//!   catalog crate ships the real ones.

mod class;
mod error;
mod frames;
mod header;
mod limits;
mod message;
mod registry;

pub use class::{Category, MessageSchema, VersionSchemas};
pub use codec::ErrorKind;
pub use error::{WireError, WireResult};
pub use frames::{frames, Frames};
pub use header::{Header, HEADER_SIZE};
pub use limits::Limits;
pub use message::{Message, MessageState};
pub use registry::Registry;
