//! Byte-level reader with bounded operations.

use crate::error::{OctetError, OctetResult};
use crate::Width;

/// A big-endian reader over a borrowed byte slice.
///
/// All read operations are bounds-checked and return errors on failure.
/// The reader never panics on malformed input.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Creates a new `ByteReader` from a byte slice.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the number of bytes remaining to read.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Returns `true` if there are no more bytes to read.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns the current byte position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Reads a `u8`.
    pub fn read_u8(&mut self) -> OctetResult<u8> {
        let [byte] = self.read_array::<1>()?;
        Ok(byte)
    }

    /// Reads a big-endian `u16`.
    pub fn read_u16(&mut self) -> OctetResult<u16> {
        Ok(u16::from_be_bytes(self.read_array()?))
    }

    /// Reads a big-endian `u32`.
    pub fn read_u32(&mut self) -> OctetResult<u32> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    /// Reads a big-endian `u64`.
    pub fn read_u64(&mut self) -> OctetResult<u64> {
        Ok(u64::from_be_bytes(self.read_array()?))
    }

    /// Reads an unsigned integer of the given width, widened to `u64`.
    pub fn read_uint(&mut self, width: Width) -> OctetResult<u64> {
        match width {
            Width::U8 => self.read_u8().map(u64::from),
            Width::U16 => self.read_u16().map(u64::from),
            Width::U32 => self.read_u32().map(u64::from),
            Width::U64 => self.read_u64(),
        }
    }

    /// Skips `len` padding bytes without inspecting them.
    pub fn skip(&mut self, len: usize) -> OctetResult<()> {
        self.ensure(len)?;
        self.pos += len;
        Ok(())
    }

    /// Reads exactly `len` bytes.
    pub fn read_bytes(&mut self, len: usize) -> OctetResult<&'a [u8]> {
        self.ensure(len)?;
        let out = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(out)
    }

    /// Reads a fixed-size array.
    pub fn read_array<const N: usize>(&mut self) -> OctetResult<[u8; N]> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Reads a null-padded string field of `len` bytes.
    ///
    /// Returns the raw bytes before the first null; the whole field is
    /// consumed. No text decoding is applied.
    pub fn read_cstr(&mut self, len: usize) -> OctetResult<&'a [u8]> {
        let bytes = self.read_bytes(len)?;
        let end = bytes.iter().position(|b| *b == 0).unwrap_or(bytes.len());
        Ok(&bytes[..end])
    }

    /// Reads every remaining byte.
    pub fn read_rest(&mut self) -> &'a [u8] {
        let out = &self.data[self.pos.min(self.data.len())..];
        self.pos = self.data.len();
        out
    }

    /// Splits off a reader over the next `len` bytes and advances past them.
    pub fn split_to(&mut self, len: usize) -> OctetResult<ByteReader<'a>> {
        self.read_bytes(len).map(ByteReader::new)
    }

    fn ensure(&self, len: usize) -> OctetResult<()> {
        let available = self.remaining();
        if len > available {
            return Err(OctetError::Truncated {
                requested: len,
                available,
            });
        }
        Ok(())
    }
}
