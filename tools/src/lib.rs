//! Inspection tools for raw OpenFlow message dumps.
//!
//! This crate turns captured bytes into something a person can read:
//!
//! - Split a dump into messages and decode each one
//! - Render decoded bodies as JSON or indented text
//! - List the registered message types of each protocol version
//!
//! # Design Principles
//!
//! - **Never stop at the first bad message** - A frame that fails to decode is
//!   reported with its error; framing errors end the walk.
//! - **Human-readable output** - Enum and flag names are printed next to raw
//!   values.

use std::fmt::Write as _;

use codec::{Body, StructValue, Value};
use schema::{schema_hash, StructSchema};
use serde::Serialize;
use serde_json::{json, Map};
use wire::{frames, Limits, Message, Registry, WireResult, HEADER_SIZE};

/// One message found in a dump.
#[derive(Debug, Clone, Serialize)]
pub struct FrameReport {
    /// Byte offset of the message in the dump.
    pub offset: usize,
    pub length: usize,
    pub version: Option<u8>,
    pub message_type: Option<u8>,
    pub xid: Option<u32>,
    /// Registered message name, when the type resolved.
    pub name: Option<&'static str>,
    pub category: Option<&'static str>,
    /// Decoded body as JSON.
    pub body: Option<serde_json::Value>,
    pub error: Option<String>,
}

impl FrameReport {
    fn decoded(offset: usize, msg: &Message) -> Self {
        let header = msg.header();
        let class = msg.class().ok();
        Self {
            offset,
            length: usize::from(header.length),
            version: Some(header.version),
            message_type: Some(header.message_type),
            xid: Some(header.xid),
            name: class.map(|class| class.name),
            category: class.map(|class| class.category.as_str()),
            body: msg.body().ok().map(struct_to_json),
            error: None,
        }
    }

    fn failed(offset: usize, frame: &[u8], error: String) -> Self {
        let header = |idx: usize| frame.get(idx).copied();
        let xid = frame
            .get(4..HEADER_SIZE)
            .and_then(|bytes| <[u8; 4]>::try_from(bytes).ok())
            .map(u32::from_be_bytes);
        Self {
            offset,
            length: frame.len(),
            version: header(0),
            message_type: header(1),
            xid,
            name: None,
            category: None,
            body: None,
            error: Some(error),
        }
    }

    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Walks every message in `bytes`.
///
/// Decode failures are recorded per message. A framing failure is recorded
/// once and ends the walk, since the next message boundary is unknown.
pub fn inspect_stream(registry: &Registry, bytes: &[u8], limits: &Limits) -> Vec<FrameReport> {
    let mut reports = Vec::new();
    let mut iter = frames(bytes);
    loop {
        let offset = iter.offset();
        let Some(frame) = iter.next() else {
            break;
        };
        let report = match frame {
            Ok(frame) => match registry.unpack_message(frame, limits) {
                Ok(msg) => FrameReport::decoded(offset, &msg),
                Err(err) => {
                    tracing::debug!(offset, error = %err, "message failed to decode");
                    FrameReport::failed(offset, frame, err.to_string())
                }
            },
            Err(err) => FrameReport::failed(offset, &bytes[offset..], err.to_string()),
        };
        reports.push(report);
    }
    reports
}

/// Converts a decoded struct into a JSON object in field order.
#[must_use]
pub fn struct_to_json(value: &StructValue) -> serde_json::Value {
    let mut object = Map::new();
    for (name, field) in value.fields() {
        object.insert(name.to_owned(), value_to_json(&field));
    }
    serde_json::Value::Object(object)
}

/// Converts one field value into JSON.
///
/// Enums and bitmasks keep their raw number next to the resolved names.
#[must_use]
pub fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::UInt(raw) => json!(raw),
        Value::Enum(value) => json!({ "raw": value.raw(), "name": value.name() }),
        Value::Bitmask(value) => json!({
            "raw": value.raw(),
            "flags": value.flags(),
            "unknown_bits": value.unknown_bits(),
        }),
        Value::Bytes(_) | Value::Blob(_) => json!(value.to_string()),
        Value::Str(_) => value
            .as_str()
            .map_or_else(|| json!(value.to_string()), |text| json!(text)),
        Value::Struct(inner) => struct_to_json(inner),
        Value::List(items) => items.iter().map(struct_to_json).collect(),
        Value::Body(body) => body_to_json(body),
    }
}

fn body_to_json(body: &Body) -> serde_json::Value {
    match body {
        Body::Empty => serde_json::Value::Null,
        Body::Single(inner) => struct_to_json(inner),
        Body::Elements(items) => items.iter().map(struct_to_json).collect(),
        Body::Opaque(bytes) => json!({ "opaque": Value::Blob(bytes.clone()).to_string() }),
    }
}

/// Renders a report as indented text.
#[must_use]
pub fn format_pretty(report: &FrameReport) -> String {
    let mut out = String::new();
    let opt = |value: Option<String>| value.unwrap_or_else(|| "?".to_owned());
    let _ = writeln!(
        out,
        "@{} {} v{} type={} xid={} len={}",
        report.offset,
        report.name.unwrap_or("<unknown>"),
        opt(report.version.map(|v| format!("0x{v:02x}"))),
        opt(report.message_type.map(|t| t.to_string())),
        opt(report.xid.map(|x| x.to_string())),
        report.length,
    );
    if let Some(category) = report.category {
        let _ = writeln!(out, "  category: {category}");
    }
    if let Some(error) = &report.error {
        let _ = writeln!(out, "  error: {error}");
    }
    if let Some(body) = &report.body {
        write_json(&mut out, body, 1);
    }
    out
}

fn write_json(out: &mut String, value: &serde_json::Value, depth: usize) {
    let indent = "  ".repeat(depth);
    match value {
        serde_json::Value::Object(map) => {
            for (key, field) in map {
                match field {
                    serde_json::Value::Object(inner) if !is_binding(inner) => {
                        let _ = writeln!(out, "{indent}{key}:");
                        write_json(out, field, depth + 1);
                    }
                    serde_json::Value::Array(items) => {
                        let _ = writeln!(out, "{indent}{key}: [{}]", items.len());
                        for (idx, item) in items.iter().enumerate() {
                            let _ = writeln!(out, "{indent}  [{idx}]");
                            write_json(out, item, depth + 2);
                        }
                    }
                    other => {
                        let _ = writeln!(out, "{indent}{key}: {}", scalar(other));
                    }
                }
            }
        }
        other => {
            let _ = writeln!(out, "{indent}{}", scalar(other));
        }
    }
}

fn is_binding(map: &Map<String, serde_json::Value>) -> bool {
    map.contains_key("raw")
}

fn scalar(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text.clone(),
        serde_json::Value::Object(map) if is_binding(map) => {
            let raw = map.get("raw").and_then(serde_json::Value::as_u64).unwrap_or_default();
            match (map.get("name"), map.get("flags")) {
                (Some(serde_json::Value::String(name)), _) => format!("{name} ({raw})"),
                (_, Some(serde_json::Value::Array(flags))) if !flags.is_empty() => {
                    let names: Vec<_> = flags.iter().filter_map(serde_json::Value::as_str).collect();
                    format!("{} (0x{raw:x})", names.join("|"))
                }
                _ => raw.to_string(),
            }
        }
        other => other.to_string(),
    }
}

/// One registered message type.
#[derive(Debug, Clone, Serialize)]
pub struct SchemaRow {
    pub version: u8,
    pub type_code: u8,
    pub name: &'static str,
    pub category: &'static str,
    /// Smallest encoded message, header included.
    pub min_size: usize,
    /// Encoded size when the body has no variable part.
    pub fixed_size: Option<usize>,
    pub fingerprint: String,
    /// Full body layout.
    pub body: &'static StructSchema,
}

/// Lists registered message types, optionally for a single version.
pub fn schema_rows(registry: &Registry, version: Option<u8>) -> WireResult<Vec<SchemaRow>> {
    let versions = match version {
        Some(version) => vec![registry.version(version)?],
        None => registry
            .versions()
            .map(|version| registry.version(version))
            .collect::<WireResult<Vec<_>>>()?,
    };
    Ok(versions
        .into_iter()
        .flat_map(|schemas| {
            schemas.messages.iter().map(move |class| SchemaRow {
                version: schemas.version,
                type_code: class.type_code,
                name: class.name,
                category: class.category.as_str(),
                min_size: HEADER_SIZE + class.body.min_size(),
                fixed_size: class.body.fixed_size().map(|size| HEADER_SIZE + size),
                fingerprint: format!("{:016x}", schema_hash(class.body)),
                body: class.body,
            })
        })
        .collect())
}

/// Renders schema rows as an aligned table.
#[must_use]
pub fn format_schema_table(rows: &[SchemaRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<4} {:<4} {:<24} {:<22} {:>8} {:<16}",
        "ver", "type", "name", "category", "min", "fingerprint"
    );
    for row in rows {
        let _ = writeln!(
            out,
            "0x{:02x} {:<4} {:<24} {:<22} {:>8} {}",
            row.version, row.type_code, row.name, row.category, row.min_size, row.fingerprint
        );
    }
    out
}
