//! Splitting a byte stream into messages.

use octets::{decode_uint, Width};

use crate::error::{WireError, WireResult};
use crate::header::HEADER_SIZE;

/// Offset of the 16-bit length inside every header.
const LENGTH_OFFSET: usize = 2;

/// Iterator over back-to-back messages in a buffer.
///
/// Each item is one whole message, header included, cut at the header's
/// declared length. Iteration stops after the first error.
#[derive(Debug, Clone)]
pub struct Frames<'a> {
    rest: &'a [u8],
    offset: usize,
    failed: bool,
}

/// Iterates the messages in `buf`.
#[must_use]
pub const fn frames(buf: &[u8]) -> Frames<'_> {
    Frames {
        rest: buf,
        offset: 0,
        failed: false,
    }
}

impl<'a> Frames<'a> {
    /// Byte offset of the next frame in the original buffer.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    fn next_frame(&mut self) -> WireResult<&'a [u8]> {
        if self.rest.len() < HEADER_SIZE {
            return Err(WireError::Truncated {
                declared: HEADER_SIZE,
                available: self.rest.len(),
            });
        }
        let (length, _) = decode_uint(self.rest, LENGTH_OFFSET, Width::U16)
            .map_err(|_| WireError::Truncated {
                declared: HEADER_SIZE,
                available: self.rest.len(),
            })?;
        let length = usize::from(u16::try_from(length).unwrap_or(u16::MAX));
        if length < HEADER_SIZE {
            return Err(WireError::InvalidLength {
                length,
                min: HEADER_SIZE,
            });
        }
        if length > self.rest.len() {
            return Err(WireError::Truncated {
                declared: length,
                available: self.rest.len(),
            });
        }
        let (frame, rest) = self.rest.split_at(length);
        self.rest = rest;
        self.offset += length;
        Ok(frame)
    }
}

impl<'a> Iterator for Frames<'a> {
    type Item = WireResult<&'a [u8]>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.rest.is_empty() {
            return None;
        }
        let frame = self.next_frame();
        self.failed = frame.is_err();
        Some(frame)
    }
}
