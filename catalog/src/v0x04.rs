//! OpenFlow 1.3 (wire version `0x04`).
//!
//! Only the symmetric messages and the switch handshake are registered.
//! Other type codes of this version resolve to
//! [`WireError::UnknownMessageType`](wire::WireError::UnknownMessageType).

use schema::{BitmaskDef, EnumDef, FieldDef, ListExtent, StructSchema, Variant, Width};
use wire::Category::{Asynchronous, ControllerToSwitch, Symmetric};
use wire::{MessageSchema, VersionSchemas};

pub const VERSION: u8 = 0x04;

pub const OFPT_HELLO: u8 = 0;
pub const OFPT_ERROR: u8 = 1;
pub const OFPT_ECHO_REQUEST: u8 = 2;
pub const OFPT_ECHO_REPLY: u8 = 3;
pub const OFPT_EXPERIMENTER: u8 = 4;
pub const OFPT_FEATURES_REQUEST: u8 = 5;
pub const OFPT_FEATURES_REPLY: u8 = 6;
pub const OFPT_GET_CONFIG_REQUEST: u8 = 7;
pub const OFPT_GET_CONFIG_REPLY: u8 = 8;
pub const OFPT_SET_CONFIG: u8 = 9;
pub const OFPT_BARRIER_REQUEST: u8 = 20;
pub const OFPT_BARRIER_REPLY: u8 = 21;

pub static TYPES: EnumDef = EnumDef::new(
    "Type",
    &[
        Variant::new("OFPT_HELLO", 0),
        Variant::new("OFPT_ERROR", 1),
        Variant::new("OFPT_ECHO_REQUEST", 2),
        Variant::new("OFPT_ECHO_REPLY", 3),
        Variant::new("OFPT_EXPERIMENTER", 4),
        Variant::new("OFPT_FEATURES_REQUEST", 5),
        Variant::new("OFPT_FEATURES_REPLY", 6),
        Variant::new("OFPT_GET_CONFIG_REQUEST", 7),
        Variant::new("OFPT_GET_CONFIG_REPLY", 8),
        Variant::new("OFPT_SET_CONFIG", 9),
        Variant::new("OFPT_PACKET_IN", 10),
        Variant::new("OFPT_FLOW_REMOVED", 11),
        Variant::new("OFPT_PORT_STATUS", 12),
        Variant::new("OFPT_PACKET_OUT", 13),
        Variant::new("OFPT_FLOW_MOD", 14),
        Variant::new("OFPT_GROUP_MOD", 15),
        Variant::new("OFPT_PORT_MOD", 16),
        Variant::new("OFPT_TABLE_MOD", 17),
        Variant::new("OFPT_MULTIPART_REQUEST", 18),
        Variant::new("OFPT_MULTIPART_REPLY", 19),
        Variant::new("OFPT_BARRIER_REQUEST", 20),
        Variant::new("OFPT_BARRIER_REPLY", 21),
        Variant::new("OFPT_QUEUE_GET_CONFIG_REQUEST", 22),
        Variant::new("OFPT_QUEUE_GET_CONFIG_REPLY", 23),
        Variant::new("OFPT_ROLE_REQUEST", 24),
        Variant::new("OFPT_ROLE_REPLY", 25),
        Variant::new("OFPT_GET_ASYNC_REQUEST", 26),
        Variant::new("OFPT_GET_ASYNC_REPLY", 27),
        Variant::new("OFPT_SET_ASYNC", 28),
        Variant::new("OFPT_METER_MOD", 29),
    ],
);

pub static ERROR_TYPE: EnumDef = EnumDef::new(
    "ErrorType",
    &[
        Variant::new("OFPET_HELLO_FAILED", 0),
        Variant::new("OFPET_BAD_REQUEST", 1),
        Variant::new("OFPET_BAD_ACTION", 2),
        Variant::new("OFPET_BAD_INSTRUCTION", 3),
        Variant::new("OFPET_BAD_MATCH", 4),
        Variant::new("OFPET_FLOW_MOD_FAILED", 5),
        Variant::new("OFPET_GROUP_MOD_FAILED", 6),
        Variant::new("OFPET_PORT_MOD_FAILED", 7),
        Variant::new("OFPET_TABLE_MOD_FAILED", 8),
        Variant::new("OFPET_QUEUE_OP_FAILED", 9),
        Variant::new("OFPET_SWITCH_CONFIG_FAILED", 10),
        Variant::new("OFPET_ROLE_REQUEST_FAILED", 11),
        Variant::new("OFPET_METER_MOD_FAILED", 12),
        Variant::new("OFPET_TABLE_FEATURES_FAILED", 13),
        Variant::new("OFPET_EXPERIMENTER", 0xffff),
    ],
);

pub static HELLO_ELEM_TYPE: EnumDef =
    EnumDef::new("HelloElemType", &[Variant::new("OFPHET_VERSIONBITMAP", 1)]);

pub static CAPABILITIES: BitmaskDef = BitmaskDef::new(
    "Capabilities",
    &[
        Variant::new("OFPC_FLOW_STATS", 1 << 0),
        Variant::new("OFPC_TABLE_STATS", 1 << 1),
        Variant::new("OFPC_PORT_STATS", 1 << 2),
        Variant::new("OFPC_GROUP_STATS", 1 << 3),
        Variant::new("OFPC_IP_REASM", 1 << 5),
        Variant::new("OFPC_QUEUE_STATS", 1 << 6),
        Variant::new("OFPC_PORT_BLOCKED", 1 << 8),
    ],
);

pub static CONFIG_FLAGS: EnumDef = EnumDef::new(
    "ConfigFlags",
    &[
        Variant::new("OFPC_FRAG_NORMAL", 0),
        Variant::new("OFPC_FRAG_DROP", 1),
        Variant::new("OFPC_FRAG_REASM", 2),
    ],
);

pub static HEADER: StructSchema = StructSchema::new(
    "Header",
    &[
        FieldDef::u8("version").default(VERSION as u64),
        FieldDef::enumeration("type", Width::U8, &TYPES),
        FieldDef::u16("length").default(8),
        FieldDef::u32("xid"),
    ],
);

/// One hello element; `body` carries e.g. the version bitmap words.
/// `length` excludes the padding to the next 8-byte boundary.
pub static HELLO_ELEM: StructSchema = StructSchema::sized_by(
    "HelloElemHeader",
    "length",
    &[
        FieldDef::enumeration("elem_type", Width::U16, &HELLO_ELEM_TYPE),
        FieldDef::u16("length"),
        FieldDef::blob("body"),
    ],
)
.padded_to(8);

pub static HELLO: StructSchema = StructSchema::new(
    "Hello",
    &[FieldDef::list("elements", &HELLO_ELEM, ListExtent::Remaining)],
);

pub static EMPTY: StructSchema = StructSchema::new("Empty", &[]);

pub static ERROR_MSG: StructSchema = StructSchema::new(
    "ErrorMsg",
    &[
        FieldDef::enumeration("error_type", Width::U16, &ERROR_TYPE),
        FieldDef::u16("code"),
        FieldDef::blob("data"),
    ],
);

pub static ECHO: StructSchema = StructSchema::new("Echo", &[FieldDef::blob("data")]);

pub static EXPERIMENTER: StructSchema = StructSchema::new(
    "ExperimenterHeader",
    &[
        FieldDef::u32("experimenter"),
        FieldDef::u32("exp_type"),
        FieldDef::blob("data"),
    ],
);

pub static FEATURES_REPLY: StructSchema = StructSchema::new(
    "FeaturesReply",
    &[
        FieldDef::u64("datapath_id"),
        FieldDef::u32("n_buffers"),
        FieldDef::u8("n_tables"),
        FieldDef::u8("auxiliary_id"),
        FieldDef::pad("pad", 2),
        FieldDef::bitmask("capabilities", Width::U32, &CAPABILITIES),
        FieldDef::u32("reserved"),
    ],
);

pub static SWITCH_CONFIG: StructSchema = StructSchema::new(
    "SwitchConfig",
    &[
        FieldDef::enumeration("flags", Width::U16, &CONFIG_FLAGS),
        FieldDef::u16("miss_send_len").default(128),
    ],
);

pub static SCHEMAS: VersionSchemas = VersionSchemas::new(
    VERSION,
    "OpenFlow 1.3",
    &HEADER,
    &TYPES,
    &[
        MessageSchema::new(OFPT_HELLO, "Hello", Symmetric, &HELLO),
        MessageSchema::new(OFPT_ERROR, "ErrorMsg", Asynchronous, &ERROR_MSG),
        MessageSchema::new(OFPT_ECHO_REQUEST, "EchoRequest", Symmetric, &ECHO),
        MessageSchema::new(OFPT_ECHO_REPLY, "EchoReply", Symmetric, &ECHO),
        MessageSchema::new(OFPT_EXPERIMENTER, "ExperimenterHeader", Symmetric, &EXPERIMENTER),
        MessageSchema::new(OFPT_FEATURES_REQUEST, "FeaturesRequest", ControllerToSwitch, &EMPTY),
        MessageSchema::new(OFPT_FEATURES_REPLY, "FeaturesReply", ControllerToSwitch, &FEATURES_REPLY),
        MessageSchema::new(OFPT_GET_CONFIG_REQUEST, "GetConfigRequest", ControllerToSwitch, &EMPTY),
        MessageSchema::new(OFPT_GET_CONFIG_REPLY, "GetConfigReply", ControllerToSwitch, &SWITCH_CONFIG),
        MessageSchema::new(OFPT_SET_CONFIG, "SetConfig", ControllerToSwitch, &SWITCH_CONFIG),
        MessageSchema::new(OFPT_BARRIER_REQUEST, "BarrierRequest", ControllerToSwitch, &EMPTY),
        MessageSchema::new(OFPT_BARRIER_REPLY, "BarrierReply", ControllerToSwitch, &EMPTY),
    ],
);
