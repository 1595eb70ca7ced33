use codec::{resolve_body, Body, CodecError, CodecLimits, StructValue, Value};
use schema::{BodyCase, BodyDispatch, FieldDef, ListExtent, StructSchema, Width};

static ACTION: StructSchema = StructSchema::sized_by(
    "ActionHeader",
    "len",
    &[FieldDef::u16("type"), FieldDef::u16("len"), FieldDef::blob("body")],
);

static BUCKET: StructSchema = StructSchema::sized_by(
    "Bucket",
    "len",
    &[
        FieldDef::u16("len"),
        FieldDef::u16("weight"),
        FieldDef::u32("watch_port"),
        FieldDef::u32("watch_group"),
        FieldDef::pad("pad", 4),
        FieldDef::list("actions", &ACTION, ListExtent::Remaining),
    ],
);

static GROUP_MOD: StructSchema = StructSchema::new(
    "GroupMod",
    &[
        FieldDef::u16("command"),
        FieldDef::u8("type"),
        FieldDef::pad("pad", 1),
        FieldDef::u32("group_id"),
        FieldDef::list("buckets", &BUCKET, ListExtent::Remaining),
    ],
);

static DESC: StructSchema = StructSchema::new(
    "DescStats",
    &[FieldDef::string("mfr_desc", 256), FieldDef::string("serial_num", 32)],
);

static STATS_BODY: BodyDispatch = BodyDispatch::new(
    "StatsReplyBody",
    "type",
    &[BodyCase::single(0, &DESC), BodyCase::repeated(6, &BUCKET)],
);

static STATS_REPLY: StructSchema = StructSchema::new(
    "StatsReply",
    &[
        FieldDef::uint("type", Width::U16),
        FieldDef::u16("flags"),
        FieldDef::pad("pad", 4),
        FieldDef::body("body", &STATS_BODY),
    ],
);

fn output_action(port: u32) -> StructValue {
    StructValue::new(&ACTION)
        .with("body", Value::Blob(port.to_be_bytes().to_vec()))
        .unwrap()
}

#[test]
fn nested_variable_structs_roundtrip() {
    let bucket = StructValue::new(&BUCKET)
        .with("weight", 1u16)
        .unwrap()
        .with("actions", vec![output_action(1), output_action(2)])
        .unwrap();
    let group = StructValue::new(&GROUP_MOD)
        .with("group_id", 7u32)
        .unwrap()
        .with("buckets", vec![bucket.clone(), bucket])
        .unwrap();

    let bytes = group.pack().unwrap();
    assert_eq!(bytes.len(), 8 + 2 * (16 + 2 * 8));
    assert_eq!(&bytes[8..10], &[0, 32]);

    let decoded = StructValue::decode(&GROUP_MOD, &bytes).unwrap();
    assert_eq!(decoded, group);
    assert_eq!(decoded.pack().unwrap(), bytes);
}

#[test]
fn stats_reply_empty_repeated_body() {
    let reply = StructValue::new(&STATS_REPLY)
        .with("type", 6u16)
        .unwrap()
        .with("flags", 1u16)
        .unwrap();
    let bytes = reply.pack().unwrap();
    assert_eq!(bytes, vec![0, 6, 0, 1, 0, 0, 0, 0]);

    let decoded = StructValue::decode(&STATS_REPLY, &bytes).unwrap();
    assert_eq!(decoded.body("body").unwrap(), Body::Elements(Vec::new()));
    assert_eq!(decoded, reply);
}

#[test]
fn stats_reply_single_body() {
    let desc = StructValue::new(&DESC).with("mfr_desc", "Nicira, Inc.").unwrap();
    let reply = StructValue::new(&STATS_REPLY)
        .with("body", Body::Single(desc))
        .unwrap();
    let bytes = reply.pack().unwrap();
    assert_eq!(bytes.len(), 8 + 288);

    let body = resolve_body(&STATS_BODY, 0, &bytes[8..], &CodecLimits::default()).unwrap();
    match body {
        Body::Single(value) => {
            assert_eq!(value.get("mfr_desc").unwrap(), Value::from("Nicira, Inc."));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn body_must_match_discriminant_on_pack() {
    let reply = StructValue::new(&STATS_REPLY)
        .with("type", 6u16)
        .unwrap()
        .with("body", Body::Single(StructValue::new(&DESC)))
        .unwrap();
    assert!(matches!(
        reply.pack().unwrap_err(),
        CodecError::TypeMismatch { field: "body", .. }
    ));
}

#[test]
fn unknown_discriminant_roundtrips_opaque() {
    let bytes = [0xff, 0xff, 0, 0, 0, 0, 0, 0, 0xde, 0xad, 0xbe, 0xef];
    let decoded = StructValue::decode(&STATS_REPLY, &bytes).unwrap();
    assert_eq!(
        decoded.body("body").unwrap(),
        Body::Opaque(vec![0xde, 0xad, 0xbe, 0xef])
    );
    assert_eq!(decoded.pack().unwrap(), bytes);
}
