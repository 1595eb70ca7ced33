//! Byte-level writer for encoding big-endian records.

use crate::error::{OctetError, OctetResult};
use crate::Width;

/// A growable big-endian writer.
///
/// Writes are accumulated in an internal buffer. Call [`finish`](Self::finish)
/// to get the final byte buffer.
#[derive(Debug, Default, Clone)]
pub struct ByteWriter {
    bytes: Vec<u8>,
}

impl ByteWriter {
    /// Creates a new empty `ByteWriter`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new `ByteWriter` with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bytes),
        }
    }

    /// Returns the number of bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn write_u8(&mut self, value: u8) {
        self.bytes.push(value);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_u32(&mut self, value: u32) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_u64(&mut self, value: u64) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    /// Writes `value` with the given width.
    ///
    /// # Errors
    ///
    /// Returns [`OctetError::ValueOutOfRange`] if `value` doesn't fit in `width`.
    /// Nothing is written in that case.
    pub fn write_uint(&mut self, value: u64, width: Width) -> OctetResult<()> {
        let value = width.check(value)?;
        let bytes = value.to_be_bytes();
        self.bytes.extend_from_slice(&bytes[8 - width.bytes()..]);
        Ok(())
    }

    /// Writes `len` zero bytes.
    pub fn write_pad(&mut self, len: usize) {
        self.bytes.resize(self.bytes.len() + len, 0);
    }

    /// Writes raw bytes as-is.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    /// Writes `bytes` into a fixed field of `len` bytes, zero-filling the tail.
    ///
    /// # Errors
    ///
    /// Returns [`OctetError::LengthExceeded`] if `bytes` is longer than `len`.
    pub fn write_fixed(&mut self, bytes: &[u8], len: usize) -> OctetResult<()> {
        if bytes.len() > len {
            return Err(OctetError::LengthExceeded {
                len: bytes.len(),
                max: len,
            });
        }
        self.bytes.extend_from_slice(bytes);
        self.write_pad(len - bytes.len());
        Ok(())
    }

    /// Writes a string into a null-padded field of `len` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`OctetError::InteriorNul`] if the string contains a null byte,
    /// or [`OctetError::LengthExceeded`] if it is longer than `len`.
    pub fn write_cstr(&mut self, value: impl AsRef<[u8]>, len: usize) -> OctetResult<()> {
        let value = value.as_ref();
        check_cstr(value)?;
        self.write_fixed(value, len)
    }

    /// Finishes writing and returns the byte buffer.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }

    /// Finishes writing and appends to the provided buffer.
    pub fn finish_into(mut self, buf: &mut Vec<u8>) {
        buf.append(&mut self.bytes);
    }
}

/// Rejects string contents that would not survive a null-padded field.
///
/// # Errors
///
/// Returns [`OctetError::InteriorNul`] at the first null byte.
pub fn check_cstr(value: &[u8]) -> OctetResult<()> {
    match value.iter().position(|b| *b == 0) {
        Some(position) => Err(OctetError::InteriorNul { position }),
        None => Ok(()),
    }
}
