//! OpenFlow 1.1 (wire version `0x02`).
//!
//! Declared from scratch rather than derived from 1.0: ports grow to 32 bits,
//! the match becomes a typed 88-byte structure and actions move into
//! instructions.

use schema::{
    BitmaskDef, BodyCase, BodyDispatch, EnumDef, FieldDef, ListExtent, StructSchema, Variant,
    Width,
};
use wire::Category::{Asynchronous, ControllerToSwitch, Symmetric};
use wire::{MessageSchema, VersionSchemas};

pub const VERSION: u8 = 0x02;

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
pub const OFPT_PACKET_IN: u8 = 10;
pub const OFPT_FLOW_REMOVED: u8 = 11;
pub const OFPT_PORT_STATUS: u8 = 12;
pub const OFPT_PACKET_OUT: u8 = 13;
pub const OFPT_FLOW_MOD: u8 = 14;
pub const OFPT_GROUP_MOD: u8 = 15;
pub const OFPT_PORT_MOD: u8 = 16;
pub const OFPT_TABLE_MOD: u8 = 17;
pub const OFPT_STATS_REQUEST: u8 = 18;
pub const OFPT_STATS_REPLY: u8 = 19;
pub const OFPT_BARRIER_REQUEST: u8 = 20;
pub const OFPT_BARRIER_REPLY: u8 = 21;
pub const OFPT_QUEUE_GET_CONFIG_REQUEST: u8 = 22;
pub const OFPT_QUEUE_GET_CONFIG_REPLY: u8 = 23;

pub const OFPP_MAX: u32 = 0xffff_ff00;
pub const OFPP_IN_PORT: u32 = 0xffff_fff8;
pub const OFPP_TABLE: u32 = 0xffff_fff9;
pub const OFPP_NORMAL: u32 = 0xffff_fffa;
pub const OFPP_FLOOD: u32 = 0xffff_fffb;
pub const OFPP_ALL: u32 = 0xffff_fffc;
pub const OFPP_CONTROLLER: u32 = 0xffff_fffd;
pub const OFPP_LOCAL: u32 = 0xffff_fffe;
pub const OFPP_ANY: u32 = 0xffff_ffff;

pub const OFPG_ALL: u32 = 0xffff_fffc;
pub const OFPG_ANY: u32 = 0xffff_ffff;

pub const NO_BUFFER: u32 = 0xffff_ffff;

/// Length of a standard match.
pub const OFPMT_STANDARD_LENGTH: u64 = 88;

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
        Variant::new("OFPT_STATS_REQUEST", 18),
        Variant::new("OFPT_STATS_REPLY", 19),
        Variant::new("OFPT_BARRIER_REQUEST", 20),
        Variant::new("OFPT_BARRIER_REPLY", 21),
        Variant::new("OFPT_QUEUE_GET_CONFIG_REQUEST", 22),
        Variant::new("OFPT_QUEUE_GET_CONFIG_REPLY", 23),
    ],
);

pub static ERROR_TYPE: EnumDef = EnumDef::new(
    "ErrorType",
    &[
        Variant::new("OFPET_HELLO_FAILED", 0),
        Variant::new("OFPET_BAD_REQUEST", 1),
        Variant::new("OFPET_BAD_ACTION", 2),
        Variant::new("OFPET_BAD_MATCH", 3),
        Variant::new("OFPET_FLOW_MOD_FAILED", 4),
        Variant::new("OFPET_GROUP_MOD_FAILED", 5),
        Variant::new("OFPET_PORT_MOD_FAILED", 6),
        Variant::new("OFPET_TABLE_MOD_FAILED", 7),
        Variant::new("OFPET_QUEUE_OP_FAILED", 8),
    ],
);

pub static CAPABILITIES: BitmaskDef = BitmaskDef::new(
    "Capabilities",
    &[
        Variant::new("OFPC_FLOW_STATS", 1 << 0),
        Variant::new("OFPC_TABLE_STATS", 1 << 1),
        Variant::new("OFPC_PORT_STATS", 1 << 2),
        Variant::new("OFPC_GROUP_STATS", 1 << 3),
        Variant::new("OFPC_IP_REASM", 1 << 5),
        Variant::new("OFPC_QUEUE_STATS", 1 << 6),
        Variant::new("OFPC_ARP_MATCH_IP", 1 << 7),
    ],
);

pub static PORT_CONFIG: BitmaskDef = BitmaskDef::new(
    "PortConfig",
    &[
        Variant::new("OFPPC_PORT_DOWN", 1 << 0),
        Variant::new("OFPPC_NO_RECV", 1 << 2),
        Variant::new("OFPPC_NO_FWD", 1 << 5),
        Variant::new("OFPPC_NO_PACKET_IN", 1 << 6),
    ],
);

pub static PORT_STATE: BitmaskDef = BitmaskDef::new(
    "PortState",
    &[
        Variant::new("OFPPS_LINK_DOWN", 1 << 0),
        Variant::new("OFPPS_BLOCKED", 1 << 1),
        Variant::new("OFPPS_LIVE", 1 << 2),
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
        Variant::new("OFPPF_40GB_FD", 1 << 7),
        Variant::new("OFPPF_100GB_FD", 1 << 8),
        Variant::new("OFPPF_1TB_FD", 1 << 9),
        Variant::new("OFPPF_OTHER", 1 << 10),
        Variant::new("OFPPF_COPPER", 1 << 11),
        Variant::new("OFPPF_FIBER", 1 << 12),
        Variant::new("OFPPF_AUTONEG", 1 << 13),
        Variant::new("OFPPF_PAUSE", 1 << 14),
        Variant::new("OFPPF_PAUSE_ASYM", 1 << 15),
    ],
);

pub static CONFIG_FLAGS: EnumDef = EnumDef::new(
    "ConfigFlags",
    &[
        Variant::new("OFPC_FRAG_NORMAL", 0),
        Variant::new("OFPC_FRAG_DROP", 1),
        Variant::new("OFPC_FRAG_REASM", 2),
        Variant::new("OFPC_INVALID_TTL_TO_CONTROLLER", 4),
    ],
);

pub static MATCH_TYPE: EnumDef =
    EnumDef::new("MatchType", &[Variant::new("OFPMT_STANDARD", 0)]);

pub static FLOW_WILDCARDS: BitmaskDef = BitmaskDef::new(
    "FlowWildCards",
    &[
        Variant::new("OFPFW_IN_PORT", 1 << 0),
        Variant::new("OFPFW_DL_VLAN", 1 << 1),
        Variant::new("OFPFW_DL_VLAN_PCP", 1 << 2),
        Variant::new("OFPFW_DL_TYPE", 1 << 3),
        Variant::new("OFPFW_NW_TOS", 1 << 4),
        Variant::new("OFPFW_NW_PROTO", 1 << 5),
        Variant::new("OFPFW_TP_SRC", 1 << 6),
        Variant::new("OFPFW_TP_DST", 1 << 7),
        Variant::new("OFPFW_MPLS_LABEL", 1 << 8),
        Variant::new("OFPFW_MPLS_TC", 1 << 9),
    ],
);

pub const OFPFW_ALL: u64 = (1 << 10) - 1;

pub static ACTION_TYPE: EnumDef = EnumDef::new(
    "ActionType",
    &[
        Variant::new("OFPAT_OUTPUT", 0),
        Variant::new("OFPAT_SET_VLAN_VID", 1),
        Variant::new("OFPAT_SET_VLAN_PCP", 2),
        Variant::new("OFPAT_SET_DL_SRC", 3),
        Variant::new("OFPAT_SET_DL_DST", 4),
        Variant::new("OFPAT_SET_NW_SRC", 5),
        Variant::new("OFPAT_SET_NW_DST", 6),
        Variant::new("OFPAT_SET_NW_TOS", 7),
        Variant::new("OFPAT_SET_NW_ECN", 8),
        Variant::new("OFPAT_SET_TP_SRC", 9),
        Variant::new("OFPAT_SET_TP_DST", 10),
        Variant::new("OFPAT_COPY_TTL_OUT", 11),
        Variant::new("OFPAT_COPY_TTL_IN", 12),
        Variant::new("OFPAT_SET_MPLS_LABEL", 13),
        Variant::new("OFPAT_SET_MPLS_TC", 14),
        Variant::new("OFPAT_SET_MPLS_TTL", 15),
        Variant::new("OFPAT_DEC_MPLS_TTL", 16),
        Variant::new("OFPAT_PUSH_VLAN", 17),
        Variant::new("OFPAT_POP_VLAN", 18),
        Variant::new("OFPAT_PUSH_MPLS", 19),
        Variant::new("OFPAT_POP_MPLS", 20),
        Variant::new("OFPAT_SET_QUEUE", 21),
        Variant::new("OFPAT_GROUP", 22),
        Variant::new("OFPAT_SET_NW_TTL", 23),
        Variant::new("OFPAT_DEC_NW_TTL", 24),
        Variant::new("OFPAT_EXPERIMENTER", 0xffff),
    ],
);

pub static INSTRUCTION_TYPE: EnumDef = EnumDef::new(
    "InstructionType",
    &[
        Variant::new("OFPIT_GOTO_TABLE", 1),
        Variant::new("OFPIT_WRITE_METADATA", 2),
        Variant::new("OFPIT_WRITE_ACTIONS", 3),
        Variant::new("OFPIT_APPLY_ACTIONS", 4),
        Variant::new("OFPIT_CLEAR_ACTIONS", 5),
        Variant::new("OFPIT_EXPERIMENTER", 0xffff),
    ],
);

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
        Variant::new("OFPRR_GROUP_DELETE", 3),
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
    ],
);

pub static GROUP_MOD_COMMAND: EnumDef = EnumDef::new(
    "GroupModCommand",
    &[
        Variant::new("OFPGC_ADD", 0),
        Variant::new("OFPGC_MODIFY", 1),
        Variant::new("OFPGC_DELETE", 2),
    ],
);

pub static GROUP_TYPE: EnumDef = EnumDef::new(
    "GroupType",
    &[
        Variant::new("OFPGT_ALL", 0),
        Variant::new("OFPGT_SELECT", 1),
        Variant::new("OFPGT_INDIRECT", 2),
        Variant::new("OFPGT_FF", 3),
    ],
);

/// `OFPTC_TABLE_MISS_CONTROLLER` is the zero value.
pub static TABLE_CONFIG: BitmaskDef = BitmaskDef::new(
    "TableConfig",
    &[
        Variant::new("OFPTC_TABLE_MISS_CONTINUE", 1 << 0),
        Variant::new("OFPTC_TABLE_MISS_DROP", 1 << 1),
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
        Variant::new("OFPST_GROUP", 6),
        Variant::new("OFPST_GROUP_DESC", 7),
        Variant::new("OFPST_EXPERIMENTER", 0xffff),
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

pub static PORT: StructSchema = StructSchema::new(
    "Port",
    &[
        FieldDef::u32("port_no"),
        FieldDef::pad("pad", 4),
        FieldDef::bytes("hw_addr", 6),
        FieldDef::pad("pad2", 2),
        FieldDef::string("name", 16),
        FieldDef::bitmask("config", Width::U32, &PORT_CONFIG),
        FieldDef::bitmask("state", Width::U32, &PORT_STATE),
        FieldDef::bitmask("curr", Width::U32, &PORT_FEATURES),
        FieldDef::bitmask("advertised", Width::U32, &PORT_FEATURES),
        FieldDef::bitmask("supported", Width::U32, &PORT_FEATURES),
        FieldDef::bitmask("peer", Width::U32, &PORT_FEATURES),
        FieldDef::u32("curr_speed"),
        FieldDef::u32("max_speed"),
    ],
);

/// Standard match. `length` describes the match itself and is always 88 here.
pub static MATCH: StructSchema = StructSchema::new(
    "Match",
    &[
        FieldDef::enumeration("match_type", Width::U16, &MATCH_TYPE),
        FieldDef::u16("length").default(OFPMT_STANDARD_LENGTH),
        FieldDef::u32("in_port"),
        FieldDef::bitmask("wildcards", Width::U32, &FLOW_WILDCARDS).default(OFPFW_ALL),
        FieldDef::bytes("dl_src", 6),
        FieldDef::bytes("dl_src_mask", 6),
        FieldDef::bytes("dl_dst", 6),
        FieldDef::bytes("dl_dst_mask", 6),
        FieldDef::u16("dl_vlan"),
        FieldDef::u8("dl_vlan_pcp"),
        FieldDef::pad("pad1", 1),
        FieldDef::u16("dl_type"),
        FieldDef::u8("nw_tos"),
        FieldDef::u8("nw_proto"),
        FieldDef::u32("nw_src"),
        FieldDef::u32("nw_src_mask"),
        FieldDef::u32("nw_dst"),
        FieldDef::u32("nw_dst_mask"),
        FieldDef::u16("tp_src"),
        FieldDef::u16("tp_dst"),
        FieldDef::u32("mpls_label"),
        FieldDef::u8("mpls_tc"),
        FieldDef::pad("pad2", 3),
        FieldDef::u64("metadata"),
        FieldDef::u64("metadata_mask"),
    ],
);

pub static ACTION: StructSchema = StructSchema::sized_by(
    "ActionHeader",
    "len",
    &[
        FieldDef::enumeration("type", Width::U16, &ACTION_TYPE),
        FieldDef::u16("len"),
        FieldDef::blob("body"),
    ],
);

pub static INSTRUCTION: StructSchema = StructSchema::sized_by(
    "Instruction",
    "len",
    &[
        FieldDef::enumeration("type", Width::U16, &INSTRUCTION_TYPE),
        FieldDef::u16("len"),
        FieldDef::blob("body"),
    ],
);

pub static BUCKET: StructSchema = StructSchema::sized_by(
    "Bucket",
    "len",
    &[
        FieldDef::u16("len"),
        FieldDef::u16("weight"),
        FieldDef::u32("watch_port").default(OFPP_ANY as u64),
        FieldDef::u32("watch_group").default(OFPG_ANY as u64),
        FieldDef::pad("pad", 4),
        FieldDef::list("actions", &ACTION, ListExtent::Remaining),
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

pub static EXPERIMENTER: StructSchema = StructSchema::new(
    "ExperimenterHeader",
    &[
        FieldDef::u32("experimenter"),
        FieldDef::pad("pad", 4),
        FieldDef::blob("data"),
    ],
);

pub static FEATURES_REPLY: StructSchema = StructSchema::new(
    "FeaturesReply",
    &[
        FieldDef::u64("datapath_id"),
        FieldDef::u32("n_buffers"),
        FieldDef::u8("n_tables"),
        FieldDef::pad("pad", 3),
        FieldDef::bitmask("capabilities", Width::U32, &CAPABILITIES),
        FieldDef::u32("reserved"),
        FieldDef::list("ports", &PORT, ListExtent::Remaining),
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
        FieldDef::u32("in_port"),
        FieldDef::u32("in_phy_port"),
        FieldDef::u16("total_len"),
        FieldDef::enumeration("reason", Width::U8, &PACKET_IN_REASON),
        FieldDef::u8("table_id"),
        FieldDef::blob("data"),
    ],
);

pub static FLOW_REMOVED: StructSchema = StructSchema::new(
    "FlowRemoved",
    &[
        FieldDef::u64("cookie"),
        FieldDef::u16("priority"),
        FieldDef::enumeration("reason", Width::U8, &FLOW_REMOVED_REASON),
        FieldDef::u8("table_id"),
        FieldDef::u32("duration_sec"),
        FieldDef::u32("duration_nsec"),
        FieldDef::u16("idle_timeout"),
        FieldDef::pad("pad", 2),
        FieldDef::u64("packet_count"),
        FieldDef::u64("byte_count"),
        FieldDef::nested("match", &MATCH),
    ],
);

pub static PORT_STATUS: StructSchema = StructSchema::new(
    "PortStatus",
    &[
        FieldDef::enumeration("reason", Width::U8, &PORT_REASON),
        FieldDef::pad("pad", 7),
        FieldDef::nested("desc", &PORT),
    ],
);

pub static PACKET_OUT: StructSchema = StructSchema::new(
    "PacketOut",
    &[
        FieldDef::u32("buffer_id").default(NO_BUFFER as u64),
        FieldDef::u32("in_port").default(OFPP_CONTROLLER as u64),
        FieldDef::u16("actions_len"),
        FieldDef::pad("pad", 6),
        FieldDef::list("actions", &ACTION, ListExtent::BytesFrom("actions_len")),
        FieldDef::blob("data"),
    ],
);

pub static FLOW_MOD: StructSchema = StructSchema::new(
    "FlowMod",
    &[
        FieldDef::u64("cookie"),
        FieldDef::u64("cookie_mask"),
        FieldDef::u8("table_id"),
        FieldDef::enumeration("command", Width::U8, &FLOW_MOD_COMMAND),
        FieldDef::u16("idle_timeout"),
        FieldDef::u16("hard_timeout"),
        FieldDef::u16("priority").default(0x8000),
        FieldDef::u32("buffer_id").default(NO_BUFFER as u64),
        FieldDef::u32("out_port").default(OFPP_ANY as u64),
        FieldDef::u32("out_group").default(OFPG_ANY as u64),
        FieldDef::bitmask("flags", Width::U16, &FLOW_MOD_FLAGS),
        FieldDef::pad("pad", 2),
        FieldDef::nested("match", &MATCH),
        FieldDef::list("instructions", &INSTRUCTION, ListExtent::Remaining),
    ],
);

pub static GROUP_MOD: StructSchema = StructSchema::new(
    "GroupMod",
    &[
        FieldDef::enumeration("command", Width::U16, &GROUP_MOD_COMMAND),
        FieldDef::enumeration("group_type", Width::U8, &GROUP_TYPE),
        FieldDef::pad("pad", 1),
        FieldDef::u32("group_id"),
        FieldDef::list("buckets", &BUCKET, ListExtent::Remaining),
    ],
);

pub static PORT_MOD: StructSchema = StructSchema::new(
    "PortMod",
    &[
        FieldDef::u32("port_no"),
        FieldDef::pad("pad", 4),
        FieldDef::bytes("hw_addr", 6),
        FieldDef::pad("pad2", 2),
        FieldDef::bitmask("config", Width::U32, &PORT_CONFIG),
        FieldDef::bitmask("mask", Width::U32, &PORT_CONFIG),
        FieldDef::bitmask("advertise", Width::U32, &PORT_FEATURES),
        FieldDef::pad("pad3", 4),
    ],
);

pub static TABLE_MOD: StructSchema = StructSchema::new(
    "TableMod",
    &[
        FieldDef::u8("table_id"),
        FieldDef::pad("pad", 3),
        FieldDef::bitmask("config", Width::U32, &TABLE_CONFIG),
    ],
);

// Stats request bodies.

pub static FLOW_STATS_REQUEST: StructSchema = StructSchema::new(
    "FlowStatsRequest",
    &[
        FieldDef::u8("table_id").default(0xff),
        FieldDef::pad("pad", 3),
        FieldDef::u32("out_port").default(OFPP_ANY as u64),
        FieldDef::u32("out_group").default(OFPG_ANY as u64),
        FieldDef::pad("pad2", 4),
        FieldDef::u64("cookie"),
        FieldDef::u64("cookie_mask"),
        FieldDef::nested("match", &MATCH),
    ],
);

pub static AGGREGATE_STATS_REQUEST: StructSchema = StructSchema::new(
    "AggregateStatsRequest",
    &[
        FieldDef::u8("table_id").default(0xff),
        FieldDef::pad("pad", 3),
        FieldDef::u32("out_port").default(OFPP_ANY as u64),
        FieldDef::u32("out_group").default(OFPG_ANY as u64),
        FieldDef::pad("pad2", 4),
        FieldDef::u64("cookie"),
        FieldDef::u64("cookie_mask"),
        FieldDef::nested("match", &MATCH),
    ],
);

pub static PORT_STATS_REQUEST: StructSchema = StructSchema::new(
    "PortStatsRequest",
    &[
        FieldDef::u32("port_no").default(OFPP_ANY as u64),
        FieldDef::pad("pad", 4),
    ],
);

pub static QUEUE_STATS_REQUEST: StructSchema = StructSchema::new(
    "QueueStatsRequest",
    &[
        FieldDef::u32("port_no").default(OFPP_ANY as u64),
        FieldDef::u32("queue_id").default(0xffff_ffff),
    ],
);

pub static GROUP_STATS_REQUEST: StructSchema = StructSchema::new(
    "GroupStatsRequest",
    &[
        FieldDef::u32("group_id").default(OFPG_ALL as u64),
        FieldDef::pad("pad", 4),
    ],
);

pub static EXPERIMENTER_STATS: StructSchema = StructSchema::new(
    "ExperimenterStats",
    &[
        FieldDef::u32("experimenter"),
        FieldDef::pad("pad", 4),
        FieldDef::blob("data"),
    ],
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
        BodyCase::single(6, &GROUP_STATS_REQUEST),
        BodyCase::empty(7),
        BodyCase::single(0xffff, &EXPERIMENTER_STATS),
    ],
);

pub static STATS_REQUEST: StructSchema = StructSchema::new(
    "StatsRequest",
    &[
        FieldDef::enumeration("body_type", Width::U16, &STATS_TYPE),
        FieldDef::u16("flags"),
        FieldDef::pad("pad", 4),
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
        FieldDef::u32("duration_sec"),
        FieldDef::u32("duration_nsec"),
        FieldDef::u16("priority"),
        FieldDef::u16("idle_timeout"),
        FieldDef::u16("hard_timeout"),
        FieldDef::pad("pad2", 6),
        FieldDef::u64("cookie"),
        FieldDef::u64("packet_count"),
        FieldDef::u64("byte_count"),
        FieldDef::nested("match", &MATCH),
        FieldDef::list("instructions", &INSTRUCTION, ListExtent::Remaining),
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
        FieldDef::pad("pad", 7),
        FieldDef::string("name", 32),
        FieldDef::bitmask("wildcards", Width::U32, &FLOW_WILDCARDS),
        FieldDef::u32("match"),
        FieldDef::u32("instructions"),
        FieldDef::u32("write_actions"),
        FieldDef::u32("apply_actions"),
        FieldDef::bitmask("config", Width::U32, &TABLE_CONFIG),
        FieldDef::u32("max_entries"),
        FieldDef::u32("active_count"),
        FieldDef::u64("lookup_count"),
        FieldDef::u64("matched_count"),
    ],
);

pub static PORT_STATS: StructSchema = StructSchema::new(
    "PortStats",
    &[
        FieldDef::u32("port_no"),
        FieldDef::pad("pad", 4),
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
        FieldDef::u32("port_no"),
        FieldDef::u32("queue_id"),
        FieldDef::u64("tx_bytes"),
        FieldDef::u64("tx_packets"),
        FieldDef::u64("tx_errors"),
    ],
);

pub static BUCKET_COUNTER: StructSchema = StructSchema::new(
    "BucketCounter",
    &[FieldDef::u64("packet_count"), FieldDef::u64("byte_count")],
);

pub static GROUP_STATS: StructSchema = StructSchema::sized_by(
    "GroupStats",
    "length",
    &[
        FieldDef::u16("length"),
        FieldDef::pad("pad", 2),
        FieldDef::u32("group_id"),
        FieldDef::u32("ref_count"),
        FieldDef::pad("pad2", 4),
        FieldDef::u64("packet_count"),
        FieldDef::u64("byte_count"),
        FieldDef::list("bucket_stats", &BUCKET_COUNTER, ListExtent::Remaining),
    ],
);

pub static GROUP_DESC_STATS: StructSchema = StructSchema::sized_by(
    "GroupDescStats",
    "length",
    &[
        FieldDef::u16("length"),
        FieldDef::enumeration("group_type", Width::U8, &GROUP_TYPE),
        FieldDef::pad("pad", 1),
        FieldDef::u32("group_id"),
        FieldDef::list("buckets", &BUCKET, ListExtent::Remaining),
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
        BodyCase::repeated(6, &GROUP_STATS),
        BodyCase::repeated(7, &GROUP_DESC_STATS),
        BodyCase::single(0xffff, &EXPERIMENTER_STATS),
    ],
);

pub static STATS_REPLY: StructSchema = StructSchema::new(
    "StatsReply",
    &[
        FieldDef::enumeration("body_type", Width::U16, &STATS_TYPE),
        FieldDef::bitmask("flags", Width::U16, &STATS_REPLY_FLAGS),
        FieldDef::pad("pad", 4),
        FieldDef::body("body", &STATS_REPLY_BODY),
    ],
);

pub static QUEUE_GET_CONFIG_REQUEST: StructSchema = StructSchema::new(
    "QueueGetConfigRequest",
    &[FieldDef::u32("port"), FieldDef::pad("pad", 4)],
);

pub static QUEUE_GET_CONFIG_REPLY: StructSchema = StructSchema::new(
    "QueueGetConfigReply",
    &[
        FieldDef::u32("port"),
        FieldDef::pad("pad", 4),
        FieldDef::list("queues", &PACKET_QUEUE, ListExtent::Remaining),
    ],
);

// ---------------------------------------------------------------------------
// Registration table
// ---------------------------------------------------------------------------

pub static SCHEMAS: VersionSchemas = VersionSchemas::new(
    VERSION,
    "OpenFlow 1.1",
    &HEADER,
    &TYPES,
    &[
        MessageSchema::new(OFPT_HELLO, "Hello", Symmetric, &EMPTY),
        MessageSchema::new(OFPT_ERROR, "ErrorMsg", Asynchronous, &ERROR_MSG),
        MessageSchema::new(OFPT_ECHO_REQUEST, "EchoRequest", Symmetric, &ECHO),
        MessageSchema::new(OFPT_ECHO_REPLY, "EchoReply", Symmetric, &ECHO),
        MessageSchema::new(OFPT_EXPERIMENTER, "ExperimenterHeader", Symmetric, &EXPERIMENTER),
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
        MessageSchema::new(OFPT_GROUP_MOD, "GroupMod", ControllerToSwitch, &GROUP_MOD),
        MessageSchema::new(OFPT_PORT_MOD, "PortMod", ControllerToSwitch, &PORT_MOD),
        MessageSchema::new(OFPT_TABLE_MOD, "TableMod", ControllerToSwitch, &TABLE_MOD),
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
    fn nine_error_types() {
        assert_eq!(ERROR_TYPE.variants.len(), 9);
    }

    #[test]
    fn fixed_structure_sizes() {
        assert_eq!(MATCH.fixed_size(), Some(88));
        assert_eq!(PORT.fixed_size(), Some(64));
        assert_eq!(TABLE_STATS.fixed_size(), Some(88));
        assert_eq!(PORT_STATS.fixed_size(), Some(104));
        assert_eq!(QUEUE_STATS.fixed_size(), Some(32));
        assert_eq!(FLOW_STATS_REQUEST.fixed_size(), Some(120));
        assert_eq!(BUCKET.min_size(), 16);
        assert_eq!(GROUP_STATS.min_size(), 32);
        assert_eq!(FLOW_STATS.min_size(), 136);
    }

    #[test]
    fn minimum_message_sizes() {
        let size = |schema: &StructSchema| HEADER_SIZE + schema.min_size();
        assert_eq!(size(&FEATURES_REPLY), 32);
        assert_eq!(size(&FLOW_MOD), 136);
        assert_eq!(size(&GROUP_MOD), 16);
        assert_eq!(size(&PACKET_IN), 24);
        assert_eq!(size(&PACKET_OUT), 24);
        assert_eq!(size(&PORT_MOD), 40);
        assert_eq!(size(&TABLE_MOD), 16);
        assert_eq!(size(&FLOW_REMOVED), 136);
        assert_eq!(size(&PORT_STATUS), 80);
        assert_eq!(size(&STATS_REPLY), 16);
        assert_eq!(size(&STATS_REQUEST), 16);
    }
}
