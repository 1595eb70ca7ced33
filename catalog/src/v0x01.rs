//! OpenFlow 1.0 (wire version `0x01`).

use schema::{
    BitmaskDef, BodyCase, BodyDispatch, EnumDef, FieldDef, ListExtent, StructSchema, Variant,
    Width,
};
use wire::Category::{Asynchronous, ControllerToSwitch, Symmetric};
use wire::{MessageSchema, VersionSchemas};

pub const VERSION: u8 = 0x01;

pub const OFPT_HELLO: u8 = 0;
pub const OFPT_ERROR: u8 = 1;
pub const OFPT_ECHO_REQUEST: u8 = 2;
pub const OFPT_ECHO_REPLY: u8 = 3;
pub const OFPT_VENDOR: u8 = 4;
pub const OFPT_FEATURES_REQUEST: u8 = 5;
pub const OFPT_FEATURES_REPLY: u8 = 6;
pub const OFPT_GET_CONFIG_REQUEST: u8 = 7;
pub const OFPT_GET_CONFIG_REPLY: u8 = 8;
pub const OFPT_SET_CONFIG: u8 = 9;
pub const OFPT_PACKET_IN: u8 = 10;
pub const OFPT_FLOW_REMOVED: u8 = 11;
pub const OFPT_PORT_STATUS: u8 = 12;
pub const OFPT_PACKET_OUT: u8 = 13;
pub const OFPT_FLOW_MOD: u8 = 14;
pub const OFPT_PORT_MOD: u8 = 15;
pub const OFPT_STATS_REQUEST: u8 = 16;
pub const OFPT_STATS_REPLY: u8 = 17;
pub const OFPT_BARRIER_REQUEST: u8 = 18;
pub const OFPT_BARRIER_REPLY: u8 = 19;
pub const OFPT_QUEUE_GET_CONFIG_REQUEST: u8 = 20;
pub const OFPT_QUEUE_GET_CONFIG_REPLY: u8 = 21;

/// Port numbers above the physical range.
pub const OFPP_IN_PORT: u16 = 0xfff8;
pub const OFPP_FLOOD: u16 = 0xfffb;
pub const OFPP_ALL: u16 = 0xfffc;
pub const OFPP_CONTROLLER: u16 = 0xfffd;
pub const OFPP_LOCAL: u16 = 0xfffe;
pub const OFPP_NONE: u16 = 0xffff;

/// `buffer_id` meaning "no buffered packet".
pub const NO_BUFFER: u32 = 0xffff_ffff;

// ---------------------------------------------------------------------------
// Enumerations and bitmasks
// ---------------------------------------------------------------------------

pub static TYPES: EnumDef = EnumDef::new(
    "Type",
    &[
        Variant::new("OFPT_HELLO", 0),
        Variant::new("OFPT_ERROR", 1),
        Variant::new("OFPT_ECHO_REQUEST", 2),
        Variant::new("OFPT_ECHO_REPLY", 3),
        Variant::new("OFPT_VENDOR", 4),
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
        Variant::new("OFPT_PORT_MOD", 15),
        Variant::new("OFPT_STATS_REQUEST", 16),
        Variant::new("OFPT_STATS_REPLY", 17),
        Variant::new("OFPT_BARRIER_REQUEST", 18),
        Variant::new("OFPT_BARRIER_REPLY", 19),
        Variant::new("OFPT_QUEUE_GET_CONFIG_REQUEST", 20),
        Variant::new("OFPT_QUEUE_GET_CONFIG_REPLY", 21),
    ],
);

pub static ERROR_TYPE: EnumDef = EnumDef::new(
    "ErrorType",
    &[
        Variant::new("OFPET_HELLO_FAILED", 0),
        Variant::new("OFPET_BAD_REQUEST", 1),
        Variant::new("OFPET_BAD_ACTION", 2),
        Variant::new("OFPET_FLOW_MOD_FAILED", 3),
        Variant::new("OFPET_PORT_MOD_FAILED", 4),
        Variant::new("OFPET_QUEUE_OP_FAILED", 5),
    ],
);

pub static CAPABILITIES: BitmaskDef = BitmaskDef::new(
    "Capabilities",
    &[
        Variant::new("OFPC_FLOW_STATS", 1 << 0),
        Variant::new("OFPC_TABLE_STATS", 1 << 1),
        Variant::new("OFPC_PORT_STATS", 1 << 2),
        Variant::new("OFPC_STP", 1 << 3),
        Variant::new("OFPC_RESERVED", 1 << 4),
        Variant::new("OFPC_IP_REASM", 1 << 5),
        Variant::new("OFPC_QUEUE_STATS", 1 << 6),
        Variant::new("OFPC_ARP_MATCH_IP", 1 << 7),
    ],
);

pub static ACTION_TYPE: EnumDef = EnumDef::new(
    "ActionType",
    &[
        Variant::new("OFPAT_OUTPUT", 0),
        Variant::new("OFPAT_SET_VLAN_VID", 1),
        Variant::new("OFPAT_SET_VLAN_PCP", 2),
        Variant::new("OFPAT_STRIP_VLAN", 3),
        Variant::new("OFPAT_SET_DL_SRC", 4),
        Variant::new("OFPAT_SET_DL_DST", 5),
        Variant::new("OFPAT_SET_NW_SRC", 6),
        Variant::new("OFPAT_SET_NW_DST", 7),
        Variant::new("OFPAT_SET_NW_TOS", 8),
        Variant::new("OFPAT_SET_TP_SRC", 9),
        Variant::new("OFPAT_SET_TP_DST", 10),
        Variant::new("OFPAT_ENQUEUE", 11),
        Variant::new("OFPAT_VENDOR", 0xffff),
    ],
);

/// Supported actions advertised in the features reply, one bit per action type.
pub static ACTION_FLAGS: BitmaskDef = BitmaskDef::new(
    "ActionFlags",
    &[
        Variant::new("OFPAT_OUTPUT", 1 << 0),
        Variant::new("OFPAT_SET_VLAN_VID", 1 << 1),
        Variant::new("OFPAT_SET_VLAN_PCP", 1 << 2),
        Variant::new("OFPAT_STRIP_VLAN", 1 << 3),
        Variant::new("OFPAT_SET_DL_SRC", 1 << 4),
        Variant::new("OFPAT_SET_DL_DST", 1 << 5),
        Variant::new("OFPAT_SET_NW_SRC", 1 << 6),
        Variant::new("OFPAT_SET_NW_DST", 1 << 7),
        Variant::new("OFPAT_SET_NW_TOS", 1 << 8),
        Variant::new("OFPAT_SET_TP_SRC", 1 << 9),
        Variant::new("OFPAT_SET_TP_DST", 1 << 10),
        Variant::new("OFPAT_ENQUEUE", 1 << 11),
    ],
);

pub static PORT_CONFIG: BitmaskDef = BitmaskDef::new(
    "PortConfig",
    &[
        Variant::new("OFPPC_PORT_DOWN", 1 << 0),
        Variant::new("OFPPC_NO_STP", 1 << 1),
        Variant::new("OFPPC_NO_RECV", 1 << 2),
        Variant::new("OFPPC_NO_RECV_STP", 1 << 3),
        Variant::new("OFPPC_NO_FLOOD", 1 << 4),
        Variant::new("OFPPC_NO_FWD", 1 << 5),
        Variant::new("OFPPC_NO_PACKET_IN", 1 << 6),
    ],
);

/// The STP state occupies bits 8-9; `LISTEN` is zero and `BLOCK` is both bits.
pub static PORT_STATE: BitmaskDef = BitmaskDef::new(
    "PortState",
    &[
        Variant::new("OFPPS_LINK_DOWN", 1 << 0),
        Variant::new("OFPPS_STP_LEARN", 1 << 8),
        Variant::new("OFPPS_STP_FORWARD", 2 << 8),
    ],
);

pub static PORT_FEATURES: BitmaskDef = BitmaskDef::new(
    "PortFeatures",
    &[
        Variant::new("OFPPF_10MB_HD", 1 << 0),
        Variant::new("OFPPF_10MB_FD", 1 << 1),
        Variant::new("OFPPF_100MB_HD", 1 << 2),
        Variant::new("OFPPF_100MB_FD", 1 << 3),
        Variant::new("OFPPF_1GB_HD", 1 << 4),
        Variant::new("OFPPF_1GB_FD", 1 << 5),
        Variant::new("OFPPF_10GB_FD", 1 << 6),
        Variant::new("OFPPF_COPPER", 1 << 7),
        Variant::new("OFPPF_FIBER", 1 << 8),
        Variant::new("OFPPF_AUTONEG", 1 << 9),
        Variant::new("OFPPF_PAUSE", 1 << 10),
        Variant::new("OFPPF_PAUSE_ASYM", 1 << 11),
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

/// The two 6-bit source/destination prefix fields are declared as whole
/// masks so that the OR of every flag is `OFPFW_ALL`.
pub static FLOW_WILDCARDS: BitmaskDef = BitmaskDef::new(
    "FlowWildCards",
    &[
        Variant::new("OFPFW_IN_PORT", 1 << 0),
        Variant::new("OFPFW_DL_VLAN", 1 << 1),
        Variant::new("OFPFW_DL_SRC", 1 << 2),
        Variant::new("OFPFW_DL_DST", 1 << 3),
        Variant::new("OFPFW_DL_TYPE", 1 << 4),
        Variant::new("OFPFW_NW_PROTO", 1 << 5),
        Variant::new("OFPFW_TP_SRC", 1 << 6),
        Variant::new("OFPFW_TP_DST", 1 << 7),
        Variant::new("OFPFW_NW_SRC_MASK", 0x3f << 8),
        Variant::new("OFPFW_NW_DST_MASK", 0x3f << 14),
        Variant::new("OFPFW_DL_VLAN_PCP", 1 << 20),
        Variant::new("OFPFW_NW_TOS", 1 << 21),
    ],
);

/// Every match field wildcarded.
pub const OFPFW_ALL: u64 = (1 << 22) - 1;

pub static PACKET_IN_REASON: EnumDef = EnumDef::new(
    "PacketInReason",
    &[
        Variant::new("OFPR_NO_MATCH", 0),
        Variant::new("OFPR_ACTION", 1),
    ],
);

pub static FLOW_REMOVED_REASON: EnumDef = EnumDef::new(
    "FlowRemovedReason",
    &[
        Variant::new("OFPRR_IDLE_TIMEOUT", 0),
        Variant::new("OFPRR_HARD_TIMEOUT", 1),
        Variant::new("OFPRR_DELETE", 2),
    ],
);

pub static PORT_REASON: EnumDef = EnumDef::new(
    "PortReason",
    &[
        Variant::new("OFPPR_ADD", 0),
        Variant::new("OFPPR_DELETE", 1),
        Variant::new("OFPPR_MODIFY", 2),
    ],
);

pub static FLOW_MOD_COMMAND: EnumDef = EnumDef::new(
    "FlowModCommand",
    &[
        Variant::new("OFPFC_ADD", 0),
        Variant::new("OFPFC_MODIFY", 1),
        Variant::new("OFPFC_MODIFY_STRICT", 2),
        Variant::new("OFPFC_DELETE", 3),
        Variant::new("OFPFC_DELETE_STRICT", 4),
    ],
);

pub static FLOW_MOD_FLAGS: BitmaskDef = BitmaskDef::new(
    "FlowModFlags",
    &[
        Variant::new("OFPFF_SEND_FLOW_REM", 1 << 0),
        Variant::new("OFPFF_CHECK_OVERLAP", 1 << 1),
        Variant::new("OFPFF_EMERG", 1 << 2),
    ],
);

pub static STATS_TYPE: EnumDef = EnumDef::new(
    "StatsTypes",
    &[
        Variant::new("OFPST_DESC", 0),
        Variant::new("OFPST_FLOW", 1),
        Variant::new("OFPST_AGGREGATE", 2),
        Variant::new("OFPST_TABLE", 3),
        Variant::new("OFPST_PORT", 4),
        Variant::new("OFPST_QUEUE", 5),
        Variant::new("OFPST_VENDOR", 0xffff),
    ],
);

pub static STATS_REPLY_FLAGS: BitmaskDef =
    BitmaskDef::new("StatsReplyFlags", &[Variant::new("OFPSF_REPLY_MORE", 1 << 0)]);

pub static QUEUE_PROPERTIES: EnumDef = EnumDef::new(
    "QueueProperties",
    &[
        Variant::new("OFPQT_NONE", 0),
        Variant::new("OFPQT_MIN_RATE", 1),
    ],
);

// ---------------------------------------------------------------------------
// Common structures
// ---------------------------------------------------------------------------

pub static HEADER: StructSchema = StructSchema::new(
    "Header",
    &[
        FieldDef::u8("version").default(VERSION as u64),
        FieldDef::enumeration("type", Width::U8, &TYPES),
        FieldDef::u16("length").default(8),
        FieldDef::u32("xid"),
    ],
);

pub static PHY_PORT: StructSchema = StructSchema::new(
    "PhyPort",
    &[
        FieldDef::u16("port_no"),
        FieldDef::bytes("hw_addr", 6),
        FieldDef::string("name", 16),
        FieldDef::bitmask("config", Width::U32, &PORT_CONFIG),
        FieldDef::bitmask("state", Width::U32, &PORT_STATE),
        FieldDef::bitmask("curr", Width::U32, &PORT_FEATURES),
        FieldDef::bitmask("advertised", Width::U32, &PORT_FEATURES),
        FieldDef::bitmask("supported", Width::U32, &PORT_FEATURES),
        FieldDef::bitmask("peer", Width::U32, &PORT_FEATURES),
    ],
);

pub static MATCH: StructSchema = StructSchema::new(
    "Match",
    &[
        FieldDef::bitmask("wildcards", Width::U32, &FLOW_WILDCARDS).default(OFPFW_ALL),
        FieldDef::u16("in_port"),
        FieldDef::bytes("dl_src", 6),
        FieldDef::bytes("dl_dst", 6),
        FieldDef::u16("dl_vlan"),
        FieldDef::u8("dl_vlan_pcp"),
        FieldDef::pad("pad1", 1),
        FieldDef::u16("dl_type"),
        FieldDef::u8("nw_tos"),
        FieldDef::u8("nw_proto"),
        FieldDef::pad("pad2", 2),
        FieldDef::u32("nw_src"),
        FieldDef::u32("nw_dst"),
        FieldDef::u16("tp_src"),
        FieldDef::u16("tp_dst"),
    ],
);

/// Generic action TLV; `body` holds the type-specific payload.
pub static ACTION: StructSchema = StructSchema::sized_by(
    "ActionHeader",
    "len",
    &[
        FieldDef::enumeration("type", Width::U16, &ACTION_TYPE),
        FieldDef::u16("len"),
        FieldDef::blob("body"),
    ],
);

pub static QUEUE_PROP: StructSchema = StructSchema::sized_by(
    "QueuePropHeader",
    "len",
    &[
        FieldDef::enumeration("property", Width::U16, &QUEUE_PROPERTIES),
        FieldDef::u16("len"),
        FieldDef::pad("pad", 4),
        FieldDef::blob("body"),
    ],
);

pub static PACKET_QUEUE: StructSchema = StructSchema::sized_by(
    "PacketQueue",
    "length",
    &[
        FieldDef::u32("queue_id"),
        FieldDef::u16("length"),
        FieldDef::pad("pad", 2),
        FieldDef::list("properties", &QUEUE_PROP, ListExtent::Remaining),
    ],
);

// ---------------------------------------------------------------------------
// Message bodies
// ---------------------------------------------------------------------------

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

pub static VENDOR: StructSchema = StructSchema::new(
    "VendorHeader",
    &[FieldDef::u32("vendor"), FieldDef::blob("data")],
);

pub static FEATURES_REPLY: StructSchema = StructSchema::new(
    "FeaturesReply",
    &[
        FieldDef::u64("datapath_id"),
        FieldDef::u32("n_buffers"),
        FieldDef::u8("n_tables"),
        FieldDef::pad("pad", 3),
        FieldDef::bitmask("capabilities", Width::U32, &CAPABILITIES),
        FieldDef::bitmask("actions", Width::U32, &ACTION_FLAGS),
        FieldDef::list("ports", &PHY_PORT, ListExtent::Remaining),
    ],
);

pub static SWITCH_CONFIG: StructSchema = StructSchema::new(
    "SwitchConfig",
    &[
        FieldDef::enumeration("flags", Width::U16, &CONFIG_FLAGS),
        FieldDef::u16("miss_send_len").default(128),
    ],
);

pub static PACKET_IN: StructSchema = StructSchema::new(
    "PacketIn",
    &[
        FieldDef::u32("buffer_id").default(NO_BUFFER as u64),
        FieldDef::u16("total_len"),
        FieldDef::u16("in_port"),
        FieldDef::enumeration("reason", Width::U8, &PACKET_IN_REASON),
        FieldDef::pad("pad", 1),
        FieldDef::blob("data"),
    ],
);

pub static FLOW_REMOVED: StructSchema = StructSchema::new(
    "FlowRemoved",
    &[
        FieldDef::nested("match", &MATCH),
        FieldDef::u64("cookie"),
        FieldDef::u16("priority"),
        FieldDef::enumeration("reason", Width::U8, &FLOW_REMOVED_REASON),
        FieldDef::pad("pad", 1),
        FieldDef::u32("duration_sec"),
        FieldDef::u32("duration_nsec"),
        FieldDef::u16("idle_timeout"),
        FieldDef::pad("pad2", 2),
        FieldDef::u64("packet_count"),
        FieldDef::u64("byte_count"),
    ],
);

pub static PORT_STATUS: StructSchema = StructSchema::new(
    "PortStatus",
    &[
        FieldDef::enumeration("reason", Width::U8, &PORT_REASON),
        FieldDef::pad("pad", 7),
        FieldDef::nested("desc", &PHY_PORT),
    ],
);

pub static PACKET_OUT: StructSchema = StructSchema::new(
    "PacketOut",
    &[
        FieldDef::u32("buffer_id").default(NO_BUFFER as u64),
        FieldDef::u16("in_port").default(OFPP_NONE as u64),
        FieldDef::u16("actions_len"),
        FieldDef::list("actions", &ACTION, ListExtent::BytesFrom("actions_len")),
        FieldDef::blob("data"),
    ],
);

pub static FLOW_MOD: StructSchema = StructSchema::new(
    "FlowMod",
    &[
        FieldDef::nested("match", &MATCH),
        FieldDef::u64("cookie"),
        FieldDef::enumeration("command", Width::U16, &FLOW_MOD_COMMAND),
        FieldDef::u16("idle_timeout"),
        FieldDef::u16("hard_timeout"),
        FieldDef::u16("priority").default(0x8000),
        FieldDef::u32("buffer_id").default(NO_BUFFER as u64),
        FieldDef::u16("out_port").default(OFPP_NONE as u64),
        FieldDef::bitmask("flags", Width::U16, &FLOW_MOD_FLAGS),
        FieldDef::list("actions", &ACTION, ListExtent::Remaining),
    ],
);

pub static PORT_MOD: StructSchema = StructSchema::new(
    "PortMod",
    &[
        FieldDef::u16("port_no"),
        FieldDef::bytes("hw_addr", 6),
        FieldDef::bitmask("config", Width::U32, &PORT_CONFIG),
        FieldDef::bitmask("mask", Width::U32, &PORT_CONFIG),
        FieldDef::bitmask("advertise", Width::U32, &PORT_FEATURES),
        FieldDef::pad("pad", 4),
    ],
);

// Stats request bodies.

pub static FLOW_STATS_REQUEST: StructSchema = StructSchema::new(
    "FlowStatsRequest",
    &[
        FieldDef::nested("match", &MATCH),
        FieldDef::u8("table_id").default(0xff),
        FieldDef::pad("pad", 1),
        FieldDef::u16("out_port").default(OFPP_NONE as u64),
    ],
);

pub static AGGREGATE_STATS_REQUEST: StructSchema = StructSchema::new(
    "AggregateStatsRequest",
    &[
        FieldDef::nested("match", &MATCH),
        FieldDef::u8("table_id").default(0xff),
        FieldDef::pad("pad", 1),
        FieldDef::u16("out_port").default(OFPP_NONE as u64),
    ],
);

pub static PORT_STATS_REQUEST: StructSchema = StructSchema::new(
    "PortStatsRequest",
    &[
        FieldDef::u16("port_no").default(OFPP_NONE as u64),
        FieldDef::pad("pad", 6),
    ],
);

pub static QUEUE_STATS_REQUEST: StructSchema = StructSchema::new(
    "QueueStatsRequest",
    &[
        FieldDef::u16("port_no").default(OFPP_ALL as u64),
        FieldDef::pad("pad", 2),
        FieldDef::u32("queue_id").default(0xffff_ffff),
    ],
);

pub static VENDOR_STATS: StructSchema = StructSchema::new(
    "VendorStats",
    &[FieldDef::u32("vendor"), FieldDef::blob("data")],
);

pub static STATS_REQUEST_BODY: BodyDispatch = BodyDispatch::new(
    "StatsRequestBody",
    "body_type",
    &[
        BodyCase::empty(0),
        BodyCase::single(1, &FLOW_STATS_REQUEST),
        BodyCase::single(2, &AGGREGATE_STATS_REQUEST),
        BodyCase::empty(3),
        BodyCase::single(4, &PORT_STATS_REQUEST),
        BodyCase::single(5, &QUEUE_STATS_REQUEST),
        BodyCase::single(0xffff, &VENDOR_STATS),
    ],
);

pub static STATS_REQUEST: StructSchema = StructSchema::new(
    "StatsRequest",
    &[
        FieldDef::enumeration("body_type", Width::U16, &STATS_TYPE),
        FieldDef::u16("flags"),
        FieldDef::body("body", &STATS_REQUEST_BODY),
    ],
);

// Stats reply bodies.

pub static DESC_STATS: StructSchema = StructSchema::new(
    "DescStats",
    &[
        FieldDef::string("mfr_desc", 256),
        FieldDef::string("hw_desc", 256),
        FieldDef::string("sw_desc", 256),
        FieldDef::string("serial_num", 32),
        FieldDef::string("dp_desc", 256),
    ],
);

pub static FLOW_STATS: StructSchema = StructSchema::sized_by(
    "FlowStats",
    "length",
    &[
        FieldDef::u16("length"),
        FieldDef::u8("table_id"),
        FieldDef::pad("pad", 1),
        FieldDef::nested("match", &MATCH),
        FieldDef::u32("duration_sec"),
        FieldDef::u32("duration_nsec"),
        FieldDef::u16("priority"),
        FieldDef::u16("idle_timeout"),
        FieldDef::u16("hard_timeout"),
        FieldDef::pad("pad2", 6),
        FieldDef::u64("cookie"),
        FieldDef::u64("packet_count"),
        FieldDef::u64("byte_count"),
        FieldDef::list("actions", &ACTION, ListExtent::Remaining),
    ],
);

pub static AGGREGATE_STATS_REPLY: StructSchema = StructSchema::new(
    "AggregateStatsReply",
    &[
        FieldDef::u64("packet_count"),
        FieldDef::u64("byte_count"),
        FieldDef::u32("flow_count"),
        FieldDef::pad("pad", 4),
    ],
);

pub static TABLE_STATS: StructSchema = StructSchema::new(
    "TableStats",
    &[
        FieldDef::u8("table_id"),
        FieldDef::pad("pad", 3),
        FieldDef::string("name", 32),
        FieldDef::bitmask("wildcards", Width::U32, &FLOW_WILDCARDS),
        FieldDef::u32("max_entries"),
        FieldDef::u32("active_count"),
        FieldDef::u64("lookup_count"),
        FieldDef::u64("matched_count"),
    ],
);

pub static PORT_STATS: StructSchema = StructSchema::new(
    "PortStats",
    &[
        FieldDef::u16("port_no"),
        FieldDef::pad("pad", 6),
        FieldDef::u64("rx_packets"),
        FieldDef::u64("tx_packets"),
        FieldDef::u64("rx_bytes"),
        FieldDef::u64("tx_bytes"),
        FieldDef::u64("rx_dropped"),
        FieldDef::u64("tx_dropped"),
        FieldDef::u64("rx_errors"),
        FieldDef::u64("tx_errors"),
        FieldDef::u64("rx_frame_err"),
        FieldDef::u64("rx_over_err"),
        FieldDef::u64("rx_crc_err"),
        FieldDef::u64("collisions"),
    ],
);

pub static QUEUE_STATS: StructSchema = StructSchema::new(
    "QueueStats",
    &[
        FieldDef::u16("port_no"),
        FieldDef::pad("pad", 2),
        FieldDef::u32("queue_id"),
        FieldDef::u64("tx_bytes"),
        FieldDef::u64("tx_packets"),
        FieldDef::u64("tx_errors"),
    ],
);

pub static STATS_REPLY_BODY: BodyDispatch = BodyDispatch::new(
    "StatsReplyBody",
    "body_type",
    &[
        BodyCase::single(0, &DESC_STATS),
        BodyCase::repeated(1, &FLOW_STATS),
        BodyCase::single(2, &AGGREGATE_STATS_REPLY),
        BodyCase::repeated(3, &TABLE_STATS),
        BodyCase::repeated(4, &PORT_STATS),
        BodyCase::repeated(5, &QUEUE_STATS),
        BodyCase::single(0xffff, &VENDOR_STATS),
    ],
);

pub static STATS_REPLY: StructSchema = StructSchema::new(
    "StatsReply",
    &[
        FieldDef::enumeration("body_type", Width::U16, &STATS_TYPE),
        FieldDef::bitmask("flags", Width::U16, &STATS_REPLY_FLAGS),
        FieldDef::body("body", &STATS_REPLY_BODY),
    ],
);

pub static QUEUE_GET_CONFIG_REQUEST: StructSchema = StructSchema::new(
    "QueueGetConfigRequest",
    &[FieldDef::u16("port"), FieldDef::pad("pad", 2)],
);

pub static QUEUE_GET_CONFIG_REPLY: StructSchema = StructSchema::new(
    "QueueGetConfigReply",
    &[
        FieldDef::u16("port"),
        FieldDef::pad("pad", 6),
        FieldDef::list("queues", &PACKET_QUEUE, ListExtent::Remaining),
    ],
);

// ---------------------------------------------------------------------------
// Registration table
// ---------------------------------------------------------------------------

pub static SCHEMAS: VersionSchemas = VersionSchemas::new(
    VERSION,
    "OpenFlow 1.0",
    &HEADER,
    &TYPES,
    &[
        MessageSchema::new(OFPT_HELLO, "Hello", Symmetric, &EMPTY),
        MessageSchema::new(OFPT_ERROR, "ErrorMsg", Asynchronous, &ERROR_MSG),
        MessageSchema::new(OFPT_ECHO_REQUEST, "EchoRequest", Symmetric, &ECHO),
        MessageSchema::new(OFPT_ECHO_REPLY, "EchoReply", Symmetric, &ECHO),
        MessageSchema::new(OFPT_VENDOR, "VendorHeader", Symmetric, &VENDOR),
        MessageSchema::new(OFPT_FEATURES_REQUEST, "FeaturesRequest", ControllerToSwitch, &EMPTY),
        MessageSchema::new(OFPT_FEATURES_REPLY, "FeaturesReply", ControllerToSwitch, &FEATURES_REPLY),
        MessageSchema::new(OFPT_GET_CONFIG_REQUEST, "GetConfigRequest", ControllerToSwitch, &EMPTY),
        MessageSchema::new(OFPT_GET_CONFIG_REPLY, "GetConfigReply", ControllerToSwitch, &SWITCH_CONFIG),
        MessageSchema::new(OFPT_SET_CONFIG, "SetConfig", ControllerToSwitch, &SWITCH_CONFIG),
        MessageSchema::new(OFPT_PACKET_IN, "PacketIn", Asynchronous, &PACKET_IN),
        MessageSchema::new(OFPT_FLOW_REMOVED, "FlowRemoved", Asynchronous, &FLOW_REMOVED),
        MessageSchema::new(OFPT_PORT_STATUS, "PortStatus", Asynchronous, &PORT_STATUS),
        MessageSchema::new(OFPT_PACKET_OUT, "PacketOut", ControllerToSwitch, &PACKET_OUT),
        MessageSchema::new(OFPT_FLOW_MOD, "FlowMod", ControllerToSwitch, &FLOW_MOD),
        MessageSchema::new(OFPT_PORT_MOD, "PortMod", ControllerToSwitch, &PORT_MOD),
        MessageSchema::new(OFPT_STATS_REQUEST, "StatsRequest", ControllerToSwitch, &STATS_REQUEST),
        MessageSchema::new(OFPT_STATS_REPLY, "StatsReply", ControllerToSwitch, &STATS_REPLY),
        MessageSchema::new(OFPT_BARRIER_REQUEST, "BarrierRequest", ControllerToSwitch, &EMPTY),
        MessageSchema::new(OFPT_BARRIER_REPLY, "BarrierReply", ControllerToSwitch, &EMPTY),
        MessageSchema::new(
            OFPT_QUEUE_GET_CONFIG_REQUEST,
            "QueueGetConfigRequest",
            ControllerToSwitch,
            &QUEUE_GET_CONFIG_REQUEST,
        ),
        MessageSchema::new(
            OFPT_QUEUE_GET_CONFIG_REPLY,
            "QueueGetConfigReply",
            ControllerToSwitch,
            &QUEUE_GET_CONFIG_REPLY,
        ),
    ],
);

#[cfg(test)]
mod tests {
    use super::*;
    use wire::HEADER_SIZE;

    #[test]
    fn every_type_code_is_registered() {
        for variant in TYPES.variants {
            let code = u8::try_from(variant.value).unwrap();
            assert!(SCHEMAS.message(code).is_some(), "{}", variant.name);
        }
    }

    #[test]
    fn wildcard_flags_cover_all() {
        assert_eq!(FLOW_WILDCARDS.all(), OFPFW_ALL);
        assert_eq!(OFPFW_ALL, 0x003f_ffff);
    }

    #[test]
    fn fixed_structure_sizes() {
        assert_eq!(MATCH.fixed_size(), Some(40));
        assert_eq!(PHY_PORT.fixed_size(), Some(48));
        assert_eq!(DESC_STATS.fixed_size(), Some(1056));
        assert_eq!(AGGREGATE_STATS_REPLY.fixed_size(), Some(24));
        assert_eq!(TABLE_STATS.fixed_size(), Some(64));
        assert_eq!(PORT_STATS.fixed_size(), Some(104));
        assert_eq!(QUEUE_STATS.fixed_size(), Some(32));
        assert_eq!(FLOW_STATS.min_size(), 88);
    }

    #[test]
    fn minimum_message_sizes() {
        let size = |schema: &StructSchema| HEADER_SIZE + schema.min_size();
        assert_eq!(size(&FLOW_MOD), 72);
        assert_eq!(size(&PACKET_IN), 18);
        assert_eq!(size(&SWITCH_CONFIG), 12);
        assert_eq!(size(&FEATURES_REPLY), 32);
        assert_eq!(size(&FLOW_REMOVED), 88);
        assert_eq!(size(&PORT_STATUS), 64);
        assert_eq!(size(&PORT_MOD), 32);
        assert_eq!(size(&PACKET_OUT), 16);
        assert_eq!(size(&STATS_REPLY), 12);
    }
}
