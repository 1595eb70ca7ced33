//! Named value tables and the bindings decoded against them.
//!
//! An [`EnumDef`] names discrete values and a [`BitmaskDef`] names single
//! bits. Bindings always carry the raw number, so values outside the table
//! survive a decode/encode cycle untouched.

use std::fmt;
use std::ops::BitOr;

/// A named value inside an enum or bitmask table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Variant {
    pub name: &'static str,
    pub value: u64,
}

impl Variant {
    #[must_use]
    pub const fn new(name: &'static str, value: u64) -> Self {
        Self { name, value }
    }
}

/// A closed set of named discrete values.
#[derive(Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EnumDef {
    pub name: &'static str,
    pub variants: &'static [Variant],
}

impl EnumDef {
    #[must_use]
    pub const fn new(name: &'static str, variants: &'static [Variant]) -> Self {
        Self { name, variants }
    }

    /// Returns the name registered for `raw`, if any.
    #[must_use]
    pub fn name_of(&self, raw: u64) -> Option<&'static str> {
        self.variants
            .iter()
            .find(|variant| variant.value == raw)
            .map(|variant| variant.name)
    }

    /// Returns the value registered under `name`, if any.
    #[must_use]
    pub fn value_of(&self, name: &str) -> Option<u64> {
        self.variants
            .iter()
            .find(|variant| variant.name == name)
            .map(|variant| variant.value)
    }

    /// Binds a raw value to this table. Unknown values are kept as-is.
    #[must_use]
    pub const fn bind(&'static self, raw: u64) -> EnumValue {
        EnumValue { def: self, raw }
    }

    /// Binds the value registered under `name`.
    #[must_use]
    pub fn get(&'static self, name: &str) -> Option<EnumValue> {
        self.value_of(name).map(|raw| self.bind(raw))
    }
}

/// A raw integer bound to an [`EnumDef`].
#[derive(Debug, Clone, Copy)]
pub struct EnumValue {
    def: &'static EnumDef,
    raw: u64,
}

impl EnumValue {
    #[must_use]
    pub const fn def(&self) -> &'static EnumDef {
        self.def
    }

    #[must_use]
    pub const fn raw(&self) -> u64 {
        self.raw
    }

    /// Name of the value, or `None` for an unrecognized value.
    #[must_use]
    pub fn name(&self) -> Option<&'static str> {
        self.def.name_of(self.raw)
    }

    /// Returns `true` if the raw value is listed in the table.
    #[must_use]
    pub fn is_known(&self) -> bool {
        self.name().is_some()
    }
}

impl PartialEq for EnumValue {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw && self.def.name == other.def.name
    }
}

impl Eq for EnumValue {}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "{}(0x{:x})", self.def.name, self.raw),
        }
    }
}

/// A set of named flags.
///
/// A flag value may span several bits, such as a wildcard mask. Such a flag
/// is set only when all of its bits are set.
#[derive(Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BitmaskDef {
    pub name: &'static str,
    pub flags: &'static [Variant],
}

impl BitmaskDef {
    #[must_use]
    pub const fn new(name: &'static str, flags: &'static [Variant]) -> Self {
        Self { name, flags }
    }

    /// The OR of every declared flag.
    #[must_use]
    pub const fn all(&self) -> u64 {
        let mut bits = 0;
        let mut idx = 0;
        while idx < self.flags.len() {
            bits |= self.flags[idx].value;
            idx += 1;
        }
        bits
    }

    /// Returns the bit registered under `name`, if any.
    #[must_use]
    pub fn flag(&self, name: &str) -> Option<u64> {
        self.flags
            .iter()
            .find(|flag| flag.name == name)
            .map(|flag| flag.value)
    }

    /// ORs the named flags together. Returns `None` if any name is unknown.
    #[must_use]
    pub fn combine(&self, names: &[&str]) -> Option<u64> {
        names
            .iter()
            .try_fold(0u64, |acc, name| self.flag(name).map(|bit| acc | bit))
    }

    /// Binds raw bits to this table. Unknown bits are kept as-is.
    #[must_use]
    pub const fn bind(&'static self, bits: u64) -> BitmaskValue {
        BitmaskValue { def: self, bits }
    }
}

/// Raw bits bound to a [`BitmaskDef`].
#[derive(Debug, Clone, Copy)]
pub struct BitmaskValue {
    def: &'static BitmaskDef,
    bits: u64,
}

impl BitmaskValue {
    #[must_use]
    pub const fn def(&self) -> &'static BitmaskDef {
        self.def
    }

    #[must_use]
    pub const fn raw(&self) -> u64 {
        self.bits
    }

    /// Returns `true` if the named flag is set.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.def
            .flag(name)
            .is_some_and(|bit| bit != 0 && self.bits & bit == bit)
    }

    /// Names of the set flags, in declaration order.
    #[must_use]
    pub fn flags(&self) -> Vec<&'static str> {
        self.def
            .flags
            .iter()
            .filter(|flag| flag.value != 0 && self.bits & flag.value == flag.value)
            .map(|flag| flag.name)
            .collect()
    }

    /// Bits that no declared flag accounts for.
    #[must_use]
    pub const fn unknown_bits(&self) -> u64 {
        self.bits & !self.def.all()
    }

    /// Returns `true` if every set bit is a declared flag.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        self.unknown_bits() == 0
    }

    /// Returns the union of both flag sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self {
            def: self.def,
            bits: self.bits | other.bits,
        }
    }
}

impl BitOr for BitmaskValue {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl PartialEq for BitmaskValue {
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits && self.def.name == other.def.name
    }
}

impl Eq for BitmaskValue {}

impl fmt::Display for BitmaskValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = self.flags().iter().map(ToString::to_string).collect();
        if self.unknown_bits() != 0 {
            parts.push(format!("0x{:x}", self.unknown_bits()));
        }
        if parts.is_empty() {
            write!(f, "0")
        } else {
            write!(f, "{}", parts.join("|"))
        }
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use serde::ser::{Serialize, SerializeStruct, Serializer};

    use super::{BitmaskValue, EnumValue};

    impl Serialize for EnumValue {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut state = serializer.serialize_struct("EnumValue", 2)?;
            state.serialize_field("raw", &self.raw())?;
            state.serialize_field("name", &self.name())?;
            state.end()
        }
    }

    impl Serialize for BitmaskValue {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut state = serializer.serialize_struct("BitmaskValue", 3)?;
            state.serialize_field("raw", &self.raw())?;
            state.serialize_field("flags", &self.flags())?;
            state.serialize_field("unknown_bits", &self.unknown_bits())?;
            state.end()
        }
    }
}
