use alloc::vec;
use alloc::vec::Vec;
use core::ops::Range;

use crate::{Error, Result};

/// Byte order of multi-byte values.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Hash)]
pub enum Endian {
    /// Most significant byte first.
    #[default]
    Big,
    /// Least significant byte first.
    Little,
}

impl Endian {
    /// Byte order of the host.
    #[cfg(target_endian = "little")]
    pub const NATIVE: Endian = Endian::Little;

    /// Byte order of the host.
    #[cfg(target_endian = "big")]
    pub const NATIVE: Endian = Endian::Big;

    /// Returns `Little` if `is_little` is set, `Big` otherwise.
    pub const fn from_little(is_little: bool) -> Self {
        if is_little {
            Endian::Little
        } else {
            Endian::Big
        }
    }
}

/// An owned, fixed-size byte buffer with a cursor and a default byte order.
///
/// This is the state shared by [`BinaryReader`](crate::BinaryReader) and
/// [`BinaryWriter`](crate::BinaryWriter). The buffer never grows on its own; use
/// [`resize`](Self::resize) to change its size.
///
/// Cursor arithmetic (`set_position`, `advance`, `retreat`) is unchecked. A cursor that has
/// been moved outside the buffer is only reported when a later operation touches bytes, as
/// [`Error::OutOfBounds`].
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct ByteStream {
    buf: Vec<u8>,
    pos: usize,
    endian: Endian,
}

impl ByteStream {
    /// Wraps `buf`, with the cursor at 0 and big-endian byte order.
    pub fn new(buf: impl Into<Vec<u8>>) -> Self {
        Self::with_endian(buf, Endian::Big)
    }

    /// Wraps `buf`, with the cursor at 0 and the given byte order.
    pub fn with_endian(buf: impl Into<Vec<u8>>, endian: Endian) -> Self {
        Self {
            buf: buf.into(),
            pos: 0,
            endian,
        }
    }

    /// Creates a stream over `size` zero bytes.
    pub fn zeroed(size: usize) -> Self {
        Self::new(vec![0; size])
    }

    /// Moves the cursor to `pos` and returns the stream.
    pub fn at_position(mut self, pos: usize) -> Self {
        self.pos = pos;
        self
    }

    /// Replaces the buffer with a zero-filled one of `new_size` bytes, into which the old bytes
    /// starting at `copy_from` are copied (as many as fit).
    ///
    /// The cursor is rebased by `copy_from`, saturating at 0. If `preserve_position` is set the
    /// cursor is left alone, even when that leaves it past the end of the new buffer.
    ///
    /// Fails without touching anything if `copy_from` is greater than the current length.
    pub fn resize(&mut self, new_size: usize, copy_from: usize, preserve_position: bool) -> Result<()> {
        if copy_from > self.buf.len() {
            tracing::debug!(
                copy_from,
                buffer_len = self.buf.len(),
                "resize copy offset out of bounds"
            );
            return Err(Error::ResizeOffset {
                offset: copy_from,
                buffer_len: self.buf.len(),
            });
        }

        let mut resized = vec![0; new_size];
        let tail = &self.buf[copy_from..];
        let n = tail.len().min(new_size);
        resized[..n].copy_from_slice(&tail[..n]);

        tracing::trace!(
            old_size = self.buf.len(),
            new_size,
            copy_from,
            position = self.pos,
            preserve_position,
            "resized stream"
        );

        self.buf = resized;
        if !preserve_position {
            self.pos = self.pos.saturating_sub(copy_from);
        }
        Ok(())
    }

    /// Current cursor position.
    #[inline(always)]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Moves the cursor to `pos`.
    #[inline(always)]
    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// Moves the cursor forward by `n` bytes.
    #[inline(always)]
    pub fn advance(&mut self, n: usize) {
        self.pos = self.pos.wrapping_add(n);
    }

    /// Moves the cursor back by `n` bytes.
    #[inline(always)]
    pub fn retreat(&mut self, n: usize) {
        self.pos = self.pos.wrapping_sub(n);
    }

    /// The default byte order for operations that are not given one explicitly.
    #[inline(always)]
    pub fn endian(&self) -> Endian {
        self.endian
    }

    /// Changes the default byte order for subsequent operations.
    pub fn set_endian(&mut self, endian: Endian) {
        self.endian = endian;
    }

    /// Whether the default byte order is little endian.
    pub fn is_little_endian(&self) -> bool {
        self.endian == Endian::Little
    }

    /// Length of the buffer in bytes.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Bytes between the cursor and the end of the buffer, 0 if the cursor is past the end.
    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    /// The whole buffer, regardless of the cursor.
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// The whole buffer as a `BStr`, which prints readably with `{:?}`.
    #[cfg(feature = "bstr")]
    pub fn as_bstr(&self) -> &bstr::BStr {
        bstr::BStr::new(&self.buf)
    }

    /// A bounds-checked sub-slice of the buffer, regardless of the cursor.
    pub fn slice(&self, range: Range<usize>) -> Result<&[u8]> {
        self.buf.get(range.clone()).ok_or(Error::OutOfBounds {
            offset: range.start,
            len: range.end.saturating_sub(range.start),
            buffer_len: self.buf.len(),
        })
    }

    /// Gives up the buffer.
    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }

    /// Range of the `len` bytes starting at the cursor, if they are all inside the buffer.
    fn span(&self, len: usize) -> Result<Range<usize>> {
        match self.pos.checked_add(len) {
            Some(end) if end <= self.buf.len() => Ok(self.pos..end),
            _ => {
                tracing::debug!(
                    offset = self.pos,
                    len,
                    buffer_len = self.buf.len(),
                    "out of bounds access"
                );
                Err(Error::OutOfBounds {
                    offset: self.pos,
                    len,
                    buffer_len: self.buf.len(),
                })
            }
        }
    }

    /// The `len` bytes at the cursor. Does not move the cursor.
    pub(crate) fn bytes_at(&self, len: usize) -> Result<&[u8]> {
        let span = self.span(len)?;
        Ok(&self.buf[span])
    }

    /// The `len` bytes at the cursor, mutably. Does not move the cursor.
    pub(crate) fn bytes_at_mut(&mut self, len: usize) -> Result<&mut [u8]> {
        let span = self.span(len)?;
        Ok(&mut self.buf[span])
    }

    /// Everything from the cursor to the end of the buffer.
    pub(crate) fn tail(&self) -> Result<&[u8]> {
        self.buf.get(self.pos..).ok_or(Error::OutOfBounds {
            offset: self.pos,
            len: 0,
            buffer_len: self.buf.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_overflow_is_out_of_bounds() {
        let mut s = ByteStream::zeroed(4);
        s.retreat(1);
        assert_eq!(s.position(), usize::MAX);
        assert!(matches!(s.bytes_at(2), Err(Error::OutOfBounds { .. })));
        s.advance(1);
        assert_eq!(s.bytes_at(4), Ok(&[0u8; 4][..]));
    }

    #[test]
    fn tail_past_end() {
        let s = ByteStream::zeroed(2).at_position(3);
        assert_eq!(s.remaining(), 0);
        assert!(s.tail().is_err());
        assert_eq!(s.clone().at_position(2).tail(), Ok(&[][..]));
    }
}
