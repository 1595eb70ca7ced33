//! Version/type resolution over registered schema tables.

use std::collections::BTreeMap;

use schema::{schema_hash, SchemaError, StructSchema};
use tracing::{debug, trace};

use crate::class::{MessageSchema, VersionSchemas};
use crate::error::{WireError, WireResult};
use crate::header::{Header, HEADER_SIZE};
use crate::limits::Limits;
use crate::message::Message;

/// Fields every header schema must declare, in wire order.
const HEADER_FIELDS: [&str; 4] = ["version", "type", "length", "xid"];

/// Registered protocol versions, keyed by version byte.
///
/// Registration validates every schema up front; lookups afterwards are
/// read-only.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    versions: BTreeMap<u8, &'static VersionSchemas>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one version's schemas.
    ///
    /// Two registrations of one type code are accepted when their body
    /// layouts fingerprint the same; the first one is used.
    pub fn register(&mut self, schemas: &'static VersionSchemas) -> WireResult<()> {
        if self.versions.contains_key(&schemas.version) {
            return Err(WireError::DuplicateVersion {
                version: schemas.version,
            });
        }
        check_header(schemas.header)?;
        schemas.header.validate()?;

        let mut seen: BTreeMap<u8, u64> = BTreeMap::new();
        for msg in schemas.messages {
            msg.body.validate()?;
            let hash = schema_hash(msg.body);
            match seen.get(&msg.type_code) {
                Some(&prior) if prior != hash => {
                    return Err(WireError::ConflictingSchema {
                        version: schemas.version,
                        message_type: msg.type_code,
                    });
                }
                Some(_) => {
                    debug!(
                        version = schemas.version,
                        message = msg.name,
                        "ignoring identical duplicate registration"
                    );
                }
                None => {
                    seen.insert(msg.type_code, hash);
                }
            }
        }

        self.versions.insert(schemas.version, schemas);
        Ok(())
    }

    /// Builder form of [`register`](Self::register).
    pub fn with(mut self, schemas: &'static VersionSchemas) -> WireResult<Self> {
        self.register(schemas)?;
        Ok(self)
    }

    /// Registered version bytes, ascending.
    pub fn versions(&self) -> impl Iterator<Item = u8> + '_ {
        self.versions.keys().copied()
    }

    /// Schemas of one version.
    pub fn version(&self, version: u8) -> WireResult<&'static VersionSchemas> {
        self.versions
            .get(&version)
            .copied()
            .ok_or(WireError::UnsupportedVersion { version })
    }

    /// Reads the version byte, then decodes the header with that version's
    /// header schema.
    pub fn resolve_header(&self, buf: &[u8]) -> WireResult<Header> {
        let version = Header::peek_version(buf).ok_or(WireError::Truncated {
            declared: HEADER_SIZE,
            available: 0,
        })?;
        let schemas = self.version(version)?;
        Header::unpack(schemas.header, buf)
    }

    /// Looks up the message class for a version and type code.
    pub fn resolve_message_class(
        &self,
        version: u8,
        message_type: u8,
    ) -> WireResult<&'static MessageSchema> {
        self.version(version)?
            .message(message_type)
            .ok_or(WireError::UnknownMessageType {
                version,
                message_type,
            })
    }

    /// A fresh message with default body and a random xid.
    pub fn new_message(&self, version: u8, message_type: u8) -> WireResult<Message> {
        let class = self.resolve_message_class(version, message_type)?;
        Ok(Message::new(self.version(version)?, class))
    }

    /// A fresh message for a decoded header, keeping its xid.
    pub fn new_message_from_header(&self, header: &Header) -> WireResult<Message> {
        Ok(self
            .new_message(header.version, header.message_type)?
            .with_xid(header.xid))
    }

    /// Decodes one whole message from the front of `buf`.
    ///
    /// The declared header length bounds the body. Bytes after it are left
    /// for the caller.
    pub fn unpack_message(&self, buf: &[u8], limits: &Limits) -> WireResult<Message> {
        let header = self.resolve_header(buf)?;
        let length = usize::from(header.length);
        if length < HEADER_SIZE {
            return Err(WireError::InvalidLength {
                length,
                min: HEADER_SIZE,
            });
        }
        if length > limits.max_message_bytes {
            return Err(WireError::LimitsExceeded {
                kind: codec::LimitKind::MessageBytes,
                limit: limits.max_message_bytes,
                actual: length,
            });
        }
        if length > buf.len() {
            return Err(WireError::Truncated {
                declared: length,
                available: buf.len(),
            });
        }
        if length < buf.len() {
            debug!(
                declared = length,
                available = buf.len(),
                "buffer extends past declared message length"
            );
        }

        let mut msg = Message::unpopulated(self.version(header.version)?);
        msg.set_header(header)?;
        let class = msg.resolve(&buf[HEADER_SIZE..length])?;
        trace!(
            version = header.version,
            message = class.name,
            xid = header.xid,
            length,
            "resolved message"
        );
        msg.unpack_body(&limits.codec)?;
        Ok(msg)
    }
}

fn check_header(header: &'static StructSchema) -> WireResult<()> {
    for name in HEADER_FIELDS {
        let is_integer = header.field(name).is_some_and(|field| field.kind.is_integer());
        if !is_integer {
            return Err(SchemaError::InvalidReference {
                schema: header.name,
                field: "header",
                reference: name,
            }
            .into());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::Category;
    use codec::{ErrorKind, Value};
    use schema::{EnumDef, FieldDef, Variant};

    static HEADER: StructSchema = StructSchema::new(
        "Header",
        &[
            FieldDef::u8("version").default(4),
            FieldDef::u8("type"),
            FieldDef::u16("length").default(8),
            FieldDef::u32("xid"),
        ],
    );
    static TYPES: EnumDef = EnumDef::new(
        "Type",
        &[Variant::new("HELLO", 0), Variant::new("ECHO_REQUEST", 2)],
    );
    static EMPTY: StructSchema = StructSchema::new("Hello", &[]);
    static ECHO: StructSchema = StructSchema::new("Echo", &[FieldDef::blob("data")]);
    static OTHER: StructSchema = StructSchema::new("Other", &[FieldDef::u32("x")]);
    static BAD: StructSchema = StructSchema::new("Bad", &[FieldDef::blob("a"), FieldDef::u8("b")]);

    static V4: VersionSchemas = VersionSchemas::new(
        4,
        "test",
        &HEADER,
        &TYPES,
        &[
            MessageSchema::new(0, "Hello", Category::Symmetric, &EMPTY),
            MessageSchema::new(2, "EchoRequest", Category::Symmetric, &ECHO),
            MessageSchema::new(2, "EchoRequest", Category::Symmetric, &ECHO),
        ],
    );
    static CONFLICT: VersionSchemas = VersionSchemas::new(
        5,
        "conflict",
        &HEADER,
        &TYPES,
        &[
            MessageSchema::new(2, "EchoRequest", Category::Symmetric, &ECHO),
            MessageSchema::new(2, "Other", Category::Symmetric, &OTHER),
        ],
    );
    static INVALID: VersionSchemas = VersionSchemas::new(
        6,
        "invalid",
        &HEADER,
        &TYPES,
        &[MessageSchema::new(0, "Bad", Category::Symmetric, &BAD)],
    );
    static HEADERLESS: VersionSchemas = VersionSchemas::new(7, "headerless", &EMPTY, &TYPES, &[]);

    fn registry() -> Registry {
        Registry::new().with(&V4).unwrap()
    }

    #[test]
    fn identical_duplicates_are_accepted() {
        let registry = registry();
        assert_eq!(registry.versions().collect::<Vec<_>>(), vec![4]);
        assert_eq!(
            registry.resolve_message_class(4, 2).unwrap().name,
            "EchoRequest"
        );
    }

    #[test]
    fn registration_errors() {
        let mut registry = registry();
        assert_eq!(
            registry.register(&V4).unwrap_err(),
            WireError::DuplicateVersion { version: 4 }
        );
        assert_eq!(
            registry.register(&CONFLICT).unwrap_err(),
            WireError::ConflictingSchema {
                version: 5,
                message_type: 2
            }
        );
        assert!(matches!(
            registry.register(&INVALID).unwrap_err(),
            WireError::Schema(SchemaError::UnboundedFieldNotLast { .. })
        ));
        assert!(matches!(
            registry.register(&HEADERLESS).unwrap_err(),
            WireError::Schema(SchemaError::InvalidReference { .. })
        ));
    }

    #[test]
    fn resolver_errors() {
        let registry = registry();
        assert_eq!(
            registry.resolve_header(&[3, 0, 0, 8, 0, 0, 0, 0]).unwrap_err(),
            WireError::UnsupportedVersion { version: 3 }
        );
        assert_eq!(
            registry.resolve_message_class(4, 99).unwrap_err().kind(),
            ErrorKind::UnknownMessageType
        );
        assert_eq!(
            registry.resolve_header(&[]).unwrap_err().kind(),
            ErrorKind::Truncated
        );
    }

    #[test]
    fn unpack_uses_declared_length() {
        let registry = registry();
        let buf = [4, 2, 0, 10, 0, 0, 0, 9, 0xde, 0xad, 0xff, 0xff];
        let msg = registry.unpack_message(&buf, &Limits::default()).unwrap();
        assert_eq!(msg.xid(), 9);
        assert_eq!(msg.get("data").unwrap(), Value::Blob(vec![0xde, 0xad]));
    }

    #[test]
    fn unpack_length_errors() {
        let registry = registry();
        let limits = Limits::default();
        assert_eq!(
            registry
                .unpack_message(&[4, 0, 0, 4, 0, 0, 0, 0], &limits)
                .unwrap_err(),
            WireError::InvalidLength { length: 4, min: 8 }
        );
        assert_eq!(
            registry
                .unpack_message(&[4, 0, 0, 12, 0, 0, 0, 0], &limits)
                .unwrap_err(),
            WireError::Truncated {
                declared: 12,
                available: 8
            }
        );
        let small = Limits {
            max_message_bytes: 8,
            ..Limits::default()
        };
        assert!(matches!(
            registry
                .unpack_message(&[4, 2, 0, 9, 0, 0, 0, 0, 1], &small)
                .unwrap_err(),
            WireError::LimitsExceeded { actual: 9, .. }
        ));
    }

    #[test]
    fn new_message_from_header_keeps_xid() {
        let registry = registry();
        let header = Header::new(4, 0, 42);
        let mut msg = registry.new_message_from_header(&header).unwrap();
        assert_eq!(msg.pack().unwrap(), vec![4, 0, 0, 8, 0, 0, 0, 42]);
    }
}
