//! OpenFlow message schemas for wire versions `0x01`, `0x02` and `0x04`.
//!
//! Each version module declares its own header, enumerations and message
//! bodies as `static` data; nothing is shared across versions. The modules
//! are registered into one process-wide [`Registry`] on first use.
//!
//! ```
//! let bytes = [0x01, 0x02, 0x00, 0x0a, 0x00, 0x00, 0x00, 0x07, 0xbe, 0xef];
//! let msg = catalog::unpack_message(&bytes).unwrap();
//! assert_eq!(msg.type_name(), Some("OFPT_ECHO_REQUEST"));
//! assert_eq!(msg.xid(), 7);
//! ```

pub mod v0x01;
pub mod v0x02;
pub mod v0x04;

use std::sync::OnceLock;

use tracing::debug;
use wire::{Limits, Message, Registry, VersionSchemas, WireResult};

/// Every built-in version, in ascending order.
pub static VERSIONS: [&VersionSchemas; 3] = [&v0x01::SCHEMAS, &v0x02::SCHEMAS, &v0x04::SCHEMAS];

/// The process-wide registry of built-in versions.
///
/// Built and validated once; later calls return the same result.
pub fn registry() -> WireResult<&'static Registry> {
    static REGISTRY: OnceLock<WireResult<Registry>> = OnceLock::new();
    REGISTRY
        .get_or_init(|| {
            let mut registry = Registry::new();
            for schemas in VERSIONS {
                registry.register(schemas)?;
                debug!(
                    version = schemas.version,
                    name = schemas.name,
                    messages = schemas.messages.len(),
                    "registered protocol version"
                );
            }
            Ok(registry)
        })
        .as_ref()
        .map_err(Clone::clone)
}

/// Decodes one message from the front of `bytes` with default limits.
pub fn unpack_message(bytes: &[u8]) -> WireResult<Message> {
    unpack_message_with(bytes, &Limits::default())
}

/// Decodes one message from the front of `bytes`.
pub fn unpack_message_with(bytes: &[u8], limits: &Limits) -> WireResult<Message> {
    registry()?.unpack_message(bytes, limits)
}

/// A fresh message with default body and a random xid.
pub fn new_message(version: u8, message_type: u8) -> WireResult<Message> {
    registry()?.new_message(version, message_type)
}
