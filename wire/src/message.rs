//! Message envelope: header plus typed body.

use std::fmt;

use codec::{CodecError, CodecLimits, StructValue, Value};
use octets::{ByteReader, ByteWriter, OctetError, Width};
use tracing::debug;

use crate::class::{MessageSchema, VersionSchemas};
use crate::error::{WireError, WireResult};
use crate::header::{Header, HEADER_SIZE};

/// Where a message is in its decode or build sequence.
///
/// Decoding runs `Unpopulated -> HeaderSet -> DiscriminantKnown ->
/// BodyDecoded`. Building runs `HeaderSet -> BodyAssigned`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageState {
    /// Nothing decoded yet.
    Unpopulated,
    /// Header fields are known.
    HeaderSet,
    /// The message type resolved to a body layout; body bytes are pending.
    DiscriminantKnown,
    /// The body was decoded from bytes.
    BodyDecoded,
    /// At least one body field was assigned by the caller.
    BodyAssigned,
}

impl fmt::Display for MessageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unpopulated => "unpopulated",
            Self::HeaderSet => "header-set",
            Self::DiscriminantKnown => "discriminant-known",
            Self::BodyDecoded => "body-decoded",
            Self::BodyAssigned => "body-assigned",
        };
        f.write_str(name)
    }
}

/// One protocol message.
#[derive(Debug, Clone)]
pub struct Message {
    versions: &'static VersionSchemas,
    header: Header,
    class: Option<&'static MessageSchema>,
    body: Option<StructValue>,
    pending: Vec<u8>,
    state: MessageState,
}

impl Message {
    /// A message of `versions` with nothing decoded.
    #[must_use]
    pub fn unpopulated(versions: &'static VersionSchemas) -> Self {
        Self {
            versions,
            header: Header::new(versions.version, 0, 0),
            class: None,
            body: None,
            pending: Vec::new(),
            state: MessageState::Unpopulated,
        }
    }

    /// A fresh message of type `class` with default body and a random xid.
    #[must_use]
    pub fn new(versions: &'static VersionSchemas, class: &'static MessageSchema) -> Self {
        let body = StructValue::new(class.body);
        let mut header = Header::new(versions.version, class.type_code, rand::random());
        header.length = u16::try_from(HEADER_SIZE + body.size()).unwrap_or(u16::MAX);
        Self {
            versions,
            header,
            class: Some(class),
            body: Some(body),
            pending: Vec::new(),
            state: MessageState::HeaderSet,
        }
    }

    /// Replaces the transaction id.
    #[must_use]
    pub const fn with_xid(mut self, xid: u32) -> Self {
        self.header.xid = xid;
        self
    }

    /// Installs decoded header fields. Any resolved class or body is dropped.
    pub fn set_header(&mut self, header: Header) -> WireResult<()> {
        if header.version != self.versions.version {
            return Err(WireError::UnsupportedVersion {
                version: header.version,
            });
        }
        self.header = header;
        self.class = None;
        self.body = None;
        self.pending.clear();
        self.state = MessageState::HeaderSet;
        Ok(())
    }

    /// Resolves the header type code to a message class and keeps `raw` as
    /// the pending body.
    pub fn resolve(&mut self, raw: &[u8]) -> WireResult<&'static MessageSchema> {
        self.expect_state(MessageState::HeaderSet)?;
        let class = self
            .versions
            .message(self.header.message_type)
            .ok_or(WireError::UnknownMessageType {
                version: self.header.version,
                message_type: self.header.message_type,
            })?;
        self.class = Some(class);
        self.pending = raw.to_vec();
        self.state = MessageState::DiscriminantKnown;
        Ok(class)
    }

    /// Decodes the pending body bytes.
    ///
    /// Bytes left over after a body with no unbounded tail are skipped.
    pub fn unpack_body(&mut self, limits: &CodecLimits) -> WireResult<()> {
        self.expect_state(MessageState::DiscriminantKnown)?;
        let class = self.class()?;
        let pending = std::mem::take(&mut self.pending);
        let mut reader = ByteReader::new(&pending);
        let body = StructValue::unpack(class.body, &mut reader, limits)?;
        if !reader.is_empty() {
            debug!(
                message = class.name,
                skipped = reader.remaining(),
                "skipping bytes after body inside declared length"
            );
        }
        self.body = Some(body);
        self.state = MessageState::BodyDecoded;
        Ok(())
    }

    #[must_use]
    pub const fn state(&self) -> MessageState {
        self.state
    }

    /// Header as last decoded or packed. `length` is refreshed by [`pack`](Self::pack).
    #[must_use]
    pub const fn header(&self) -> Header {
        self.header
    }

    #[must_use]
    pub const fn versions(&self) -> &'static VersionSchemas {
        self.versions
    }

    #[must_use]
    pub const fn version(&self) -> u8 {
        self.header.version
    }

    #[must_use]
    pub const fn message_type(&self) -> u8 {
        self.header.message_type
    }

    #[must_use]
    pub const fn xid(&self) -> u32 {
        self.header.xid
    }

    /// Name of the message type code, if the version names it.
    #[must_use]
    pub fn type_name(&self) -> Option<&'static str> {
        self.versions
            .types
            .name_of(u64::from(self.header.message_type))
    }

    /// Resolved message class.
    pub fn class(&self) -> WireResult<&'static MessageSchema> {
        self.class.ok_or(WireError::InvalidState {
            expected: MessageState::DiscriminantKnown,
            found: self.state,
        })
    }

    /// Decoded or assigned body.
    pub fn body(&self) -> WireResult<&StructValue> {
        self.body.as_ref().ok_or(WireError::InvalidState {
            expected: MessageState::BodyDecoded,
            found: self.state,
        })
    }

    /// Assigns a body field.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> WireResult<()> {
        let state = self.state;
        let body = self.body.as_mut().ok_or(WireError::InvalidState {
            expected: MessageState::HeaderSet,
            found: state,
        })?;
        body.set(name, value)?;
        self.state = MessageState::BodyAssigned;
        Ok(())
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> WireResult<Self> {
        self.set(name, value)?;
        Ok(self)
    }

    /// Replaces the whole body.
    pub fn set_body(&mut self, body: StructValue) -> WireResult<()> {
        let class = self.class()?;
        if !std::ptr::eq(class.body, body.schema()) && class.body != body.schema() {
            return Err(CodecError::TypeMismatch {
                schema: class.name,
                field: "body",
                expected: class.body.name,
                found: body.schema().name,
            }
            .into());
        }
        self.body = Some(body);
        self.state = MessageState::BodyAssigned;
        Ok(())
    }

    /// Effective value of a body field.
    pub fn get(&self, name: &str) -> WireResult<Value> {
        Ok(self.body()?.get(name)?)
    }

    /// Effective value of an integer body field.
    pub fn uint(&self, name: &str) -> WireResult<u64> {
        Ok(self.body()?.uint(name)?)
    }

    /// Encoded size: header plus body.
    #[must_use]
    pub fn size(&self) -> usize {
        HEADER_SIZE + self.body.as_ref().map_or(0, StructValue::size)
    }

    /// Packs the message, refreshing the header length from the body.
    pub fn pack(&mut self) -> WireResult<Vec<u8>> {
        let body = self.body()?.pack()?;
        let total = HEADER_SIZE + body.len();
        self.header.length = u16::try_from(total).map_err(|_| CodecError::Primitive {
            schema: self.versions.header.name,
            field: "length",
            source: OctetError::ValueOutOfRange {
                value: total as u64,
                width: Width::U16,
            },
        })?;

        let mut writer = ByteWriter::with_capacity(total);
        self.header
            .to_value(self.versions.header)?
            .pack_into(&mut writer)?;
        writer.write_bytes(&body);
        Ok(writer.finish())
    }

    fn expect_state(&self, expected: MessageState) -> WireResult<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(WireError::InvalidState {
                expected,
                found: self.state,
            })
        }
    }
}

/// Messages compare by version, type, xid and body. The header length is
/// derived, so it does not take part.
impl PartialEq for Message {
    fn eq(&self, other: &Self) -> bool {
        self.header.version == other.header.version
            && self.header.message_type == other.header.message_type
            && self.header.xid == other.header.xid
            && self.body == other.body
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self
            .class
            .map(|class| class.name)
            .or_else(|| self.type_name())
            .unwrap_or("?");
        write!(
            f,
            "{} v0x{:02x} xid={} len={}",
            name, self.header.version, self.header.xid, self.header.length
        )?;
        if let Some(body) = &self.body {
            write!(f, " {body}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::Category;
    use schema::{EnumDef, FieldDef, StructSchema, Variant};

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
        &[Variant::new("ECHO_REQUEST", 2), Variant::new("SET_CONFIG", 9)],
    );
    static ECHO: StructSchema = StructSchema::new("Echo", &[FieldDef::blob("data")]);
    static CONFIG: StructSchema = StructSchema::new(
        "SwitchConfig",
        &[FieldDef::u16("flags"), FieldDef::u16("miss_send_len").default(128)],
    );
    static V4: VersionSchemas = VersionSchemas::new(
        4,
        "test",
        &HEADER,
        &TYPES,
        &[
            MessageSchema::new(2, "EchoRequest", Category::Symmetric, &ECHO),
            MessageSchema::new(9, "SetConfig", Category::ControllerToSwitch, &CONFIG),
        ],
    );

    #[test]
    fn new_message_has_default_body() {
        let msg = Message::new(&V4, &V4.messages[1]).with_xid(7);
        assert_eq!(msg.state(), MessageState::HeaderSet);
        assert_eq!(msg.uint("miss_send_len").unwrap(), 128);
        assert_eq!(msg.size(), 12);
        assert_eq!(msg.header().length, 12);
        assert_eq!(msg.type_name(), Some("SET_CONFIG"));
    }

    #[test]
    fn pack_refreshes_length() {
        let mut msg = Message::new(&V4, &V4.messages[0])
            .with_xid(1)
            .with("data", Value::Blob(vec![1, 2, 3]))
            .unwrap();
        assert_eq!(msg.state(), MessageState::BodyAssigned);
        let bytes = msg.pack().unwrap();
        assert_eq!(bytes, vec![4, 2, 0, 11, 0, 0, 0, 1, 1, 2, 3]);
        assert_eq!(msg.header().length, 11);
    }

    #[test]
    fn oversized_body_is_range_error() {
        let mut msg = Message::new(&V4, &V4.messages[0])
            .with("data", Value::Blob(vec![0; 70_000]))
            .unwrap();
        let err = msg.pack().unwrap_err();
        assert_eq!(err.kind(), codec::ErrorKind::Range);
    }

    #[test]
    fn two_phase_decode() {
        let mut msg = Message::unpopulated(&V4);
        assert_eq!(msg.state(), MessageState::Unpopulated);
        assert!(msg.body().is_err());

        msg.set_header(Header {
            version: 4,
            message_type: 9,
            length: 12,
            xid: 3,
        })
        .unwrap();
        assert_eq!(msg.state(), MessageState::HeaderSet);

        let class = msg.resolve(&[0, 1, 0, 64]).unwrap();
        assert_eq!(class.name, "SetConfig");
        assert_eq!(msg.state(), MessageState::DiscriminantKnown);

        msg.unpack_body(&CodecLimits::default()).unwrap();
        assert_eq!(msg.state(), MessageState::BodyDecoded);
        assert_eq!(msg.uint("flags").unwrap(), 1);
        assert_eq!(msg.uint("miss_send_len").unwrap(), 64);
    }

    #[test]
    fn unknown_type_does_not_resolve() {
        let mut msg = Message::unpopulated(&V4);
        msg.set_header(Header::new(4, 77, 0)).unwrap();
        assert_eq!(
            msg.resolve(&[]).unwrap_err(),
            WireError::UnknownMessageType {
                version: 4,
                message_type: 77
            }
        );
    }

    #[test]
    fn out_of_order_steps_rejected() {
        let mut msg = Message::unpopulated(&V4);
        assert!(matches!(
            msg.unpack_body(&CodecLimits::default()).unwrap_err(),
            WireError::InvalidState {
                expected: MessageState::DiscriminantKnown,
                found: MessageState::Unpopulated
            }
        ));
        assert!(msg.set_header(Header::new(1, 0, 0)).is_err());
    }

    #[test]
    fn equality_ignores_stale_length() {
        let mut a = Message::new(&V4, &V4.messages[0]).with_xid(5);
        let b = a.clone().with("data", Value::Blob(Vec::new())).unwrap();
        a.pack().unwrap();
        assert_eq!(a, b);
    }
}
