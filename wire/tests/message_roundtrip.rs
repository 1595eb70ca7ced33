//! Message round-trips and stream framing through a small registry.

use codec::Value;
use proptest::prelude::*;
use schema::{EnumDef, FieldDef, StructSchema, Variant};
use wire::{frames, Category, Limits, MessageSchema, MessageState, Registry, VersionSchemas};

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

fn registry() -> Registry {
    Registry::new().with(&V4).unwrap()
}

#[test]
fn decoded_message_is_body_decoded() {
    let registry = registry();
    let msg = registry
        .unpack_message(&[4, 9, 0, 12, 0, 0, 0, 1, 0, 0, 0, 128], &Limits::default())
        .unwrap();
    assert_eq!(msg.state(), MessageState::BodyDecoded);
    assert_eq!(msg.type_name(), Some("SET_CONFIG"));
    assert_eq!(msg.class().unwrap().category, Category::ControllerToSwitch);
}

#[test]
fn frames_then_unpack_each() {
    let registry = registry();
    let mut stream = Vec::new();
    for xid in 0..3u32 {
        let mut msg = registry.new_message(4, 2).unwrap().with_xid(xid);
        msg.set("data", Value::Blob(vec![xid as u8; xid as usize]))
            .unwrap();
        stream.extend(msg.pack().unwrap());
    }

    let xids: Vec<u32> = frames(&stream)
        .map(|frame| {
            registry
                .unpack_message(frame.unwrap(), &Limits::default())
                .unwrap()
                .xid()
        })
        .collect();
    assert_eq!(xids, vec![0, 1, 2]);
}

proptest! {
    #[test]
    fn echo_roundtrip(xid in any::<u32>(), data in proptest::collection::vec(any::<u8>(), 0..256)) {
        let registry = registry();
        let mut msg = registry
            .new_message(4, 2)
            .unwrap()
            .with_xid(xid)
            .with("data", Value::Blob(data.clone()))
            .unwrap();
        let bytes = msg.pack().unwrap();
        prop_assert_eq!(bytes.len(), 8 + data.len());
        prop_assert_eq!(msg.size(), bytes.len());

        let decoded = registry.unpack_message(&bytes, &Limits::default()).unwrap();
        prop_assert_eq!(decoded.header().length as usize, bytes.len());
        prop_assert_eq!(&decoded, &msg);
    }

    #[test]
    fn trailing_stream_bytes_are_not_consumed(
        flags in any::<u16>(),
        extra in proptest::collection::vec(any::<u8>(), 0..16),
    ) {
        let registry = registry();
        let mut msg = registry
            .new_message(4, 9)
            .unwrap()
            .with("flags", flags)
            .unwrap();
        let mut bytes = msg.pack().unwrap();
        bytes.extend(&extra);

        let decoded = registry.unpack_message(&bytes, &Limits::default()).unwrap();
        prop_assert_eq!(decoded.uint("flags").unwrap(), u64::from(flags));
        prop_assert_eq!(decoded, msg);
    }

    #[test]
    fn arbitrary_bytes_never_panic(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
        let registry = registry();
        let _ = registry.unpack_message(&bytes, &Limits::for_testing());
        for frame in frames(&bytes) {
            let _ = frame;
        }
    }
}
