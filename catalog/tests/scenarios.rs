//! Decoding and encoding of concrete protocol messages.

use catalog::{new_message, registry, unpack_message, v0x01, v0x02, v0x04};
use codec::{Body, StructValue, Value};
use wire::{frames, ErrorKind, Header, MessageState, WireError};

fn mac(bytes: [u8; 6]) -> Value {
    Value::Bytes(bytes.to_vec())
}

#[test]
fn reference_header_decodes() {
    let bytes = [0x02, 0x04, 0x00, 0x08, 0x00, 0x00, 0x00, 0x01];
    let header = registry().unwrap().resolve_header(&bytes).unwrap();
    assert_eq!(
        header,
        Header {
            version: 2,
            message_type: 4,
            length: 8,
            xid: 1
        }
    );
    assert_eq!(header.pack(v0x02::SCHEMAS.header).unwrap(), bytes);

    // The experimenter body needs eight bytes and the header declares none.
    let err = unpack_message(&bytes).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Truncated);
}

#[test]
fn port_config_flags_decode_and_reencode() {
    let port = StructValue::new(&v0x02::PORT).with("config", 0x41u32).unwrap();
    let bytes = port.pack().unwrap();
    assert_eq!(bytes.len(), 64);
    assert_eq!(&bytes[32..36], &[0, 0, 0, 0x41]);

    let decoded = StructValue::decode(&v0x02::PORT, &bytes).unwrap();
    let Value::Bitmask(config) = decoded.get("config").unwrap() else {
        panic!("config is not a bitmask");
    };
    assert_eq!(config.flags(), vec!["OFPPC_PORT_DOWN", "OFPPC_NO_PACKET_IN"]);
    assert!(config.is_known());
    assert_eq!(decoded.pack().unwrap(), bytes);
}

#[test]
fn group_stats_reply_with_empty_body() {
    let mut msg = new_message(v0x02::VERSION, v0x02::OFPT_STATS_REPLY)
        .unwrap()
        .with_xid(1)
        .with("body_type", 6u16)
        .unwrap()
        .with("flags", 1u16)
        .unwrap();
    let bytes = msg.pack().unwrap();
    assert_eq!(
        bytes,
        vec![0x02, 19, 0, 16, 0, 0, 0, 1, 0, 6, 0, 1, 0, 0, 0, 0]
    );

    let decoded = unpack_message(&bytes).unwrap();
    assert_eq!(decoded.state(), MessageState::BodyDecoded);
    assert_eq!(
        decoded.body().unwrap().body("body").unwrap(),
        Body::Elements(Vec::new())
    );
    assert_eq!(decoded, msg);
}

#[test]
fn features_reply_with_ports() {
    let ports = vec![
        ("s1", 65534u32, [0x0e, 0xd3, 0x98, 0xa5, 0x30, 0x47], 1u32, 1u32, 0u32),
        ("s1-eth1", 1, [0x0a, 0x54, 0xcf, 0xfc, 0x4e, 0x6d], 0, 4, 0xc0),
        ("s1-eth2", 2, [0xf6, 0xb6, 0xab, 0xcc, 0xf8, 0x4f], 0, 2, 0xc0),
    ]
    .into_iter()
    .map(|(name, port_no, hw_addr, config, state, curr)| {
        StructValue::new(&v0x02::PORT)
            .with("port_no", port_no)
            .unwrap()
            .with("hw_addr", mac(hw_addr))
            .unwrap()
            .with("name", name)
            .unwrap()
            .with("config", config)
            .unwrap()
            .with("state", state)
            .unwrap()
            .with("curr", curr)
            .unwrap()
    })
    .collect::<Vec<_>>();

    let mut msg = new_message(v0x02::VERSION, v0x02::OFPT_FEATURES_REPLY)
        .unwrap()
        .with_xid(2)
        .with("datapath_id", 1u64)
        .unwrap()
        .with("n_buffers", 256u32)
        .unwrap()
        .with("n_tables", 254u8)
        .unwrap()
        .with("capabilities", 0xc7u32)
        .unwrap()
        .with("ports", ports)
        .unwrap();
    let bytes = msg.pack().unwrap();
    assert_eq!(bytes.len(), 32 + 3 * 64);

    let decoded = unpack_message(&bytes).unwrap();
    assert_eq!(decoded, msg);
    let ports = decoded.get("ports").unwrap();
    let names: Vec<_> = ports
        .as_list()
        .unwrap()
        .iter()
        .map(|port| port.get("name").unwrap().as_str().unwrap().to_owned())
        .collect();
    assert_eq!(names, vec!["s1", "s1-eth1", "s1-eth2"]);
}

#[test]
fn flow_mod_v0x01_roundtrip() {
    let flow_match = StructValue::new(&v0x01::MATCH)
        .with("in_port", 80u16)
        .unwrap()
        .with("dl_src", mac([1, 2, 3, 4, 5, 6]))
        .unwrap()
        .with("dl_dst", mac([1, 2, 3, 4, 5, 6]))
        .unwrap()
        .with("dl_vlan", 1u16)
        .unwrap()
        .with("nw_src", 10_000u32)
        .unwrap()
        .with("tp_dst", 80u16)
        .unwrap();
    let mut msg = new_message(v0x01::VERSION, v0x01::OFPT_FLOW_MOD)
        .unwrap()
        .with("match", flow_match)
        .unwrap()
        .with("idle_timeout", 300u16)
        .unwrap()
        .with("hard_timeout", 6000u16)
        .unwrap()
        .with("priority", 1u16)
        .unwrap()
        .with("flags", 4u16)
        .unwrap();
    assert_eq!(msg.size(), 72);

    let bytes = msg.pack().unwrap();
    assert_eq!(bytes.len(), 72);
    assert_eq!(&bytes[8..12], &[0x00, 0x3f, 0xff, 0xff]);

    let decoded = unpack_message(&bytes).unwrap();
    assert_eq!(decoded, msg);
    assert_eq!(decoded.uint("out_port").unwrap(), u64::from(v0x01::OFPP_NONE));
    let Value::Bitmask(flags) = decoded.get("flags").unwrap() else {
        panic!("flags is not a bitmask");
    };
    assert!(flags.contains("OFPFF_EMERG"));
}

#[test]
fn packet_in_v0x01_decodes() {
    let frame: Vec<u8> = (0..42).collect();
    let mut bytes = vec![0x01, 10, 0, 60, 0, 0, 0, 0x11];
    bytes.extend([0xff, 0xff, 0xff, 0xff, 0, 42, 0, 1, 0, 0]);
    bytes.extend(&frame);

    let msg = unpack_message(&bytes).unwrap();
    assert_eq!(msg.class().unwrap().name, "PacketIn");
    assert_eq!(msg.uint("total_len").unwrap(), 42);
    assert_eq!(msg.uint("in_port").unwrap(), 1);
    assert_eq!(msg.get("reason").unwrap().to_string(), "OFPR_NO_MATCH");
    assert_eq!(msg.get("data").unwrap(), Value::Blob(frame));
}

#[test]
fn unknown_enum_value_survives() {
    let bytes = [
        0x01, 10, 0, 18, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 3, 0x07, 0,
    ];
    let mut msg = unpack_message(&bytes).unwrap();
    let Value::Enum(reason) = msg.get("reason").unwrap() else {
        panic!("reason is not an enum");
    };
    assert!(!reason.is_known());
    assert_eq!(reason.raw(), 7);
    assert_eq!(msg.pack().unwrap(), bytes);
}

#[test]
fn declared_length_bounds_the_body() {
    // Set-config declares 14 bytes: two stray bytes after the body, then
    // two bytes that belong to the next message.
    let bytes = [
        0x01, 9, 0, 14, 0, 0, 0, 5, 0, 1, 0, 64, 0xaa, 0xbb, 0xcc, 0xdd,
    ];
    let mut msg = unpack_message(&bytes).unwrap();
    assert_eq!(msg.uint("flags").unwrap(), 1);
    assert_eq!(msg.uint("miss_send_len").unwrap(), 64);
    assert_eq!(msg.header().length, 14);

    let packed = msg.pack().unwrap();
    assert_eq!(packed, vec![0x01, 9, 0, 12, 0, 0, 0, 5, 0, 1, 0, 64]);
}

#[test]
fn echo_data_stops_at_declared_length() {
    let bytes = [0x04, 2, 0, 10, 0, 0, 0, 3, 0xbe, 0xef, 0x04, 0x00];
    let msg = unpack_message(&bytes).unwrap();
    assert_eq!(msg.get("data").unwrap(), Value::Blob(vec![0xbe, 0xef]));
}

#[test]
fn short_declared_length_is_rejected() {
    let err = unpack_message(&[0x01, 0, 0, 7, 0, 0, 0, 0]).unwrap_err();
    assert_eq!(err, WireError::InvalidLength { length: 7, min: 8 });
    assert_eq!(err.kind(), ErrorKind::Length);
}

#[test]
fn flow_stats_reply_roundtrip() {
    let output = StructValue::new(&v0x01::ACTION)
        .with("body", Value::Blob(vec![0, 2, 0xff, 0xe5]))
        .unwrap();
    let entry = |cookie: u64| {
        StructValue::new(&v0x01::FLOW_STATS)
            .with("cookie", cookie)
            .unwrap()
            .with("packet_count", 10u64)
            .unwrap()
            .with("actions", vec![output.clone()])
            .unwrap()
    };
    let mut msg = new_message(v0x01::VERSION, v0x01::OFPT_STATS_REPLY)
        .unwrap()
        .with("body_type", 1u16)
        .unwrap()
        .with("body", Body::Elements(vec![entry(1), entry(2)]))
        .unwrap();
    let bytes = msg.pack().unwrap();
    assert_eq!(bytes.len(), 12 + 2 * 96);
    // Each entry carries its own length.
    assert_eq!(&bytes[12..14], &[0, 96]);

    let decoded = unpack_message(&bytes).unwrap();
    assert_eq!(decoded, msg);
}

#[test]
fn unregistered_stats_type_stays_opaque() {
    let mut bytes = vec![0x01, 17, 0, 16, 0, 0, 0, 1, 0x12, 0x34, 0, 0];
    bytes.extend([1, 2, 3, 4]);
    let mut msg = unpack_message(&bytes).unwrap();
    assert_eq!(
        msg.body().unwrap().body("body").unwrap(),
        Body::Opaque(vec![1, 2, 3, 4])
    );
    assert_eq!(msg.pack().unwrap(), bytes);
}

#[test]
fn queue_config_reply_nests_properties() {
    let min_rate = StructValue::new(&v0x01::QUEUE_PROP)
        .with("property", 1u16)
        .unwrap()
        .with("body", Value::Blob(vec![0, 100, 0, 0, 0, 0, 0, 0]))
        .unwrap();
    let queue = StructValue::new(&v0x01::PACKET_QUEUE)
        .with("queue_id", 1u32)
        .unwrap()
        .with("properties", vec![min_rate])
        .unwrap();
    let mut msg = new_message(v0x01::VERSION, v0x01::OFPT_QUEUE_GET_CONFIG_REPLY)
        .unwrap()
        .with("port", 3u16)
        .unwrap()
        .with("queues", vec![queue.clone(), queue])
        .unwrap();
    let bytes = msg.pack().unwrap();
    assert_eq!(bytes.len(), 16 + 2 * (8 + 16));

    let decoded = unpack_message(&bytes).unwrap();
    assert_eq!(decoded, msg);
}

#[test]
fn packet_out_fills_actions_len() {
    let output = StructValue::new(&v0x01::ACTION)
        .with("body", Value::Blob(vec![0, 1, 0, 0]))
        .unwrap();
    let mut msg = new_message(v0x01::VERSION, v0x01::OFPT_PACKET_OUT)
        .unwrap()
        .with("actions", vec![output])
        .unwrap()
        .with("data", Value::Blob(vec![0xaa; 14]))
        .unwrap();
    let bytes = msg.pack().unwrap();
    assert_eq!(bytes.len(), 16 + 8 + 14);
    assert_eq!(&bytes[14..16], &[0, 8]);

    let decoded = unpack_message(&bytes).unwrap();
    assert_eq!(decoded.uint("actions_len").unwrap(), 8);
    assert_eq!(decoded, msg);
}

#[test]
fn group_mod_with_buckets() {
    let action = StructValue::new(&v0x02::ACTION)
        .with("body", Value::Blob(vec![0, 0, 0, 1, 0xff, 0xe5, 0, 0, 0, 0, 0, 0]))
        .unwrap();
    let bucket = StructValue::new(&v0x02::BUCKET)
        .with("weight", 1u16)
        .unwrap()
        .with("actions", vec![action])
        .unwrap();
    let mut msg = new_message(v0x02::VERSION, v0x02::OFPT_GROUP_MOD)
        .unwrap()
        .with("group_type", 1u8)
        .unwrap()
        .with("group_id", 9u32)
        .unwrap()
        .with("buckets", vec![bucket])
        .unwrap();
    let bytes = msg.pack().unwrap();
    assert_eq!(bytes.len(), 16 + 16 + 16);
    assert_eq!(unpack_message(&bytes).unwrap(), msg);
}

#[test]
fn hello_v0x04_with_version_bitmap() {
    let bytes = [
        0x04, 0, 0, 16, 0, 0, 0, 1, 0, 1, 0, 8, 0, 0, 0, 0x12,
    ];
    let msg = unpack_message(&bytes).unwrap();
    let elements = msg.get("elements").unwrap();
    let elements = elements.as_list().unwrap();
    assert_eq!(elements.len(), 1);
    assert_eq!(elements[0].get("body").unwrap(), Value::Blob(vec![0, 0, 0, 0x12]));
}

#[test]
fn hello_elements_are_padded_to_eight_bytes() {
    let bytes = [
        0x04, 0, 0, 0x18, 0, 0, 0, 1, // header
        0, 1, 0, 0x0c, 0, 0, 0, 0x12, 0, 0, 0, 1, // bitmap with two words
        0, 0, 0, 0, // padding
    ];
    let mut msg = unpack_message(&bytes).unwrap();
    let elements = msg.get("elements").unwrap();
    let elements = elements.as_list().unwrap();
    assert_eq!(elements.len(), 1);
    assert_eq!(elements[0].uint("length").unwrap(), 12);
    assert_eq!(
        elements[0].get("body").unwrap(),
        Value::Blob(vec![0, 0, 0, 0x12, 0, 0, 0, 1])
    );
    assert_eq!(msg.pack().unwrap(), bytes);
}

#[test]
fn hello_element_padding_is_added_on_pack() {
    let bitmap = StructValue::new(&v0x04::HELLO_ELEM)
        .with("elem_type", 1u16)
        .unwrap()
        .with("body", Value::Blob(vec![0, 0, 0, 0x12, 0, 0, 0, 1]))
        .unwrap();
    let mut msg = new_message(v0x04::VERSION, v0x04::OFPT_HELLO)
        .unwrap()
        .with_xid(1)
        .with("elements", vec![bitmap])
        .unwrap();
    let bytes = msg.pack().unwrap();
    assert_eq!(bytes.len(), 24);
    assert_eq!(&bytes[8..12], &[0, 1, 0, 0x0c]);
    assert_eq!(&bytes[20..], &[0, 0, 0, 0]);

    // Padding missing after the last element is a truncation.
    let mut short = bytes[..20].to_vec();
    short[3] = 20;
    assert_eq!(
        unpack_message(&short).unwrap_err().kind(),
        ErrorKind::Truncated
    );
}

#[test]
fn mixed_version_stream() {
    let mut stream = Vec::new();
    for (version, message_type) in [(1, 0), (2, 5), (4, 20), (1, 18)] {
        stream.extend(new_message(version, message_type).unwrap().pack().unwrap());
    }
    let names: Vec<_> = frames(&stream)
        .map(|frame| {
            unpack_message(frame.unwrap())
                .unwrap()
                .class()
                .unwrap()
                .name
        })
        .collect();
    assert_eq!(
        names,
        vec!["Hello", "FeaturesRequest", "BarrierRequest", "BarrierRequest"]
    );
}
