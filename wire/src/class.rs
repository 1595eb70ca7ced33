//! Message classes and per-version schema tables.

use std::fmt;

use schema::{EnumDef, StructSchema};

/// Grouping of message types by direction. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Sent by either side.
    Symmetric,
    /// Sent by the controller.
    ControllerToSwitch,
    /// Sent by the switch without solicitation.
    Asynchronous,
}

impl Category {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Symmetric => "symmetric",
            Self::ControllerToSwitch => "controller-to-switch",
            Self::Asynchronous => "asynchronous",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One message type of one protocol version.
#[derive(Debug, PartialEq, Eq)]
pub struct MessageSchema {
    pub type_code: u8,
    pub name: &'static str,
    pub category: Category,
    /// Layout of everything after the header.
    pub body: &'static StructSchema,
}

impl MessageSchema {
    #[must_use]
    pub const fn new(
        type_code: u8,
        name: &'static str,
        category: Category,
        body: &'static StructSchema,
    ) -> Self {
        Self {
            type_code,
            name,
            category,
            body,
        }
    }
}

/// Everything registered for one protocol version.
#[derive(Debug, PartialEq, Eq)]
pub struct VersionSchemas {
    pub version: u8,
    pub name: &'static str,
    /// Header layout with `version`, `type`, `length` and `xid` fields.
    pub header: &'static StructSchema,
    /// Names of the message type codes.
    pub types: &'static EnumDef,
    pub messages: &'static [MessageSchema],
}

impl VersionSchemas {
    #[must_use]
    pub const fn new(
        version: u8,
        name: &'static str,
        header: &'static StructSchema,
        types: &'static EnumDef,
        messages: &'static [MessageSchema],
    ) -> Self {
        Self {
            version,
            name,
            header,
            types,
            messages,
        }
    }

    /// The first registration for a type code.
    #[must_use]
    pub fn message(&self, type_code: u8) -> Option<&'static MessageSchema> {
        self.messages.iter().find(|msg| msg.type_code == type_code)
    }

    /// Messages of one category, in registration order.
    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &'static MessageSchema> {
        let messages: &'static [MessageSchema] = self.messages;
        messages.iter().filter(move |msg| msg.category == category)
    }
}
