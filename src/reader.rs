use alloc::string::String;
use alloc::vec::Vec;

use crate::pixel::{Color, PixelFormat};
use crate::scalar::{self, Scalar};
use crate::text::{self, StrLength, TextEncoding};
use crate::{ByteStream, Endian, Error, Result};

/// Reads values from an owned byte buffer, advancing a cursor.
///
/// Multi-byte values use the stream's byte order unless a `*_with` method is given one
/// explicitly. Every `read_*` method has a `peek_*` twin that decodes the same value without
/// moving the cursor.
///
/// Reads never run past the end of the buffer: they fail with [`Error::OutOfBounds`] and leave
/// the cursor where it was.
#[derive(Clone, Debug, Default)]
pub struct BinaryReader {
    /// The buffer being read, with its cursor and default byte order.
    pub stream: ByteStream,
}

impl BinaryReader {
    /// Reads `data` big-endian, starting at offset 0.
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self::from_stream(ByteStream::new(data))
    }

    /// Reads `data` in the given byte order, starting at offset 0.
    pub fn with_endian(data: impl Into<Vec<u8>>, endian: Endian) -> Self {
        Self::from_stream(ByteStream::with_endian(data, endian))
    }

    /// Reads from an existing stream, at its current position.
    pub fn from_stream(stream: ByteStream) -> Self {
        Self { stream }
    }

    /// Gives up the stream.
    pub fn into_inner(self) -> ByteStream {
        self.stream
    }

    /// Reads a slice of bytes whose length is `len`. This function returns a slice reference
    /// to the bytes; it does not copy them.
    pub fn read_bytes(&mut self, len: usize) -> Result<&[u8]> {
        self.stream.bytes_at(len)?;
        let start = self.stream.position();
        self.stream.advance(len);
        Ok(&self.stream.as_slice()[start..start + len])
    }

    /// Reads `len` bytes as a `bstr::BStr`, without copying or validating them.
    #[cfg(feature = "bstr")]
    pub fn read_bstr(&mut self, len: usize) -> Result<&bstr::BStr> {
        Ok(bstr::BStr::new(self.read_bytes(len)?))
    }

    /// Reads a small array of bytes, with a constant length.
    pub fn read_cbytes<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.stream.bytes_at(N)?);
        self.stream.advance(N);
        Ok(out)
    }

    /// Reads the bits of the next byte, most significant first.
    pub fn read_bits(&mut self) -> Result<[u8; 8]> {
        Ok(scalar::bits_of(self.read::<scalar::U8>()?))
    }

    /// Reads a `T` in the stream's byte order.
    #[inline]
    pub fn read<T: Scalar>(&mut self) -> Result<T::Value> {
        self.read_with::<T>(self.stream.endian())
    }

    /// Reads a `T` in the given byte order.
    #[inline]
    pub fn read_with<T: Scalar>(&mut self, endian: Endian) -> Result<T::Value> {
        let value = self.peek_with::<T>(endian)?;
        self.stream.advance(T::SIZE);
        Ok(value)
    }

    /// Decodes a `T` in the stream's byte order without moving the cursor.
    #[inline]
    pub fn peek<T: Scalar>(&self) -> Result<T::Value> {
        self.peek_with::<T>(self.stream.endian())
    }

    /// Decodes a `T` in the given byte order without moving the cursor.
    #[inline]
    pub fn peek_with<T: Scalar>(&self, endian: Endian) -> Result<T::Value> {
        Ok(T::decode(self.stream.bytes_at(T::SIZE)?, endian))
    }

    /// Reads a string in the stream's byte order.
    pub fn read_str(&mut self, encoding: TextEncoding, length: StrLength) -> Result<String> {
        self.read_str_with(encoding, length, self.stream.endian())
    }

    /// Reads a string in the given byte order, which also applies to a length prefix.
    ///
    /// UTF-16 and UTF-32 text has any trailing NUL characters removed; UTF-8 text is returned
    /// as decoded. UTF-16 surrogate pairs are
    /// combined; unpaired surrogates and invalid scalar values become U+FFFD. Use
    /// [`read_utf16_units`](Self::read_utf16_units) to see the units as stored.
    pub fn read_str_with(
        &mut self,
        encoding: TextEncoding,
        length: StrLength,
        endian: Endian,
    ) -> Result<String> {
        self.atomically(|r| {
            let text = match length {
                StrLength::NulTerminated => {
                    let body = r.read_terminated(encoding)?;
                    text::decode_units(&body, encoding, endian)?
                }
                StrLength::Prefixed => {
                    let len = usize::from(r.read_with::<scalar::U16>(endian)?);
                    r.read_sized_str(encoding, len, endian)?
                }
                StrLength::PrefixedNulTerminated => {
                    let len = usize::from(r.read_with::<scalar::U16>(endian)?);
                    let mut text = r.read_sized_str(encoding, len, endian)?;
                    if text.ends_with('\0') {
                        text.pop();
                    }
                    text
                }
                StrLength::Bytes(len) => r.read_sized_str(encoding, len, endian)?,
            };
            Ok(text::strip_trailing_nuls(text, encoding))
        })
    }

    /// Reads a UTF-16 string as raw code units, with no surrogate handling and nothing stripped.
    /// A null terminator, if that is how the length is given, is consumed but not returned.
    pub fn read_utf16_units(&mut self, length: StrLength, endian: Endian) -> Result<Vec<u16>> {
        self.atomically(|r| match length {
            StrLength::NulTerminated => {
                let body = r.read_terminated(TextEncoding::Utf16)?;
                text::utf16_units(&body, endian)
            }
            StrLength::Prefixed => {
                let len = usize::from(r.read_with::<scalar::U16>(endian)?);
                let body = r.read_units_body(TextEncoding::Utf16, len)?;
                text::utf16_units(body, endian)
            }
            StrLength::PrefixedNulTerminated => {
                let len = usize::from(r.read_with::<scalar::U16>(endian)?);
                let body = r.read_units_body(TextEncoding::Utf16, len)?;
                let mut units = text::utf16_units(body, endian)?;
                if units.last() == Some(&0) {
                    units.pop();
                }
                Ok(units)
            }
            StrLength::Bytes(len) => {
                let body = r.read_units_body(TextEncoding::Utf16, len)?;
                text::utf16_units(body, endian)
            }
        })
    }

    /// Reads one pixel.
    pub fn read_color(&mut self, format: PixelFormat) -> Result<Color> {
        let raw = self.read_bytes(format.size())?;
        Ok(format.unpack(raw))
    }

    /// Reads one pixel whose format is given by its tag, e.g. `"BGRA"`. An unknown tag fails
    /// before anything is read.
    pub fn read_color_tag(&mut self, tag: &str) -> Result<Color> {
        self.read_color(tag.parse()?)
    }

    /// Runs `f`, putting the cursor back if it fails.
    fn atomically<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let start = self.stream.position();
        let result = f(self);
        if result.is_err() {
            self.stream.set_position(start);
        }
        result
    }

    fn read_sized_str(&mut self, encoding: TextEncoding, len: usize, endian: Endian) -> Result<String> {
        if encoding != TextEncoding::Utf8 {
            let body = self.read_units_body(encoding, len)?;
            return text::decode_units(body, encoding, endian);
        }

        let offset = self.stream.position();
        let (text, consumed) =
            text::decode_utf8(self.stream.tail()?, len).ok_or(Error::OutOfBounds {
                offset,
                len,
                buffer_len: self.stream.len(),
            })?;
        self.stream.advance(consumed);
        Ok(text)
    }

    fn read_units_body(&mut self, encoding: TextEncoding, len: usize) -> Result<&[u8]> {
        let unit = encoding.unit_size();
        if len % unit != 0 {
            return Err(Error::MisalignedString {
                encoding: encoding.name(),
                len,
                unit,
            });
        }
        self.read_bytes(len)
    }

    /// Consumes a null-terminated string and its terminator, returning the body.
    fn read_terminated(&mut self, encoding: TextEncoding) -> Result<Vec<u8>> {
        let offset = self.stream.position();
        let tail = self.stream.tail()?;
        let end = text::find_terminator(tail, encoding).ok_or(Error::Unterminated {
            encoding: encoding.name(),
            offset,
        })?;
        let body = tail[..end].to_vec();
        self.stream.advance(end + encoding.unit_size());
        Ok(body)
    }
}

macro_rules! named_reads {
    ($($name:ident => $marker:ident),* $(,)?) => {
        paste::paste! {
            impl BinaryReader {
                $(
                    #[doc = "Reads a `" $name "` in the stream's byte order."]
                    #[inline]
                    pub fn [<read_ $name>](&mut self) -> Result<<scalar::$marker as Scalar>::Value> {
                        self.read::<scalar::$marker>()
                    }

                    #[doc = "Decodes a `" $name "` in the stream's byte order without moving the cursor."]
                    #[inline]
                    pub fn [<peek_ $name>](&self) -> Result<<scalar::$marker as Scalar>::Value> {
                        self.peek::<scalar::$marker>()
                    }
                )*
            }
        }
    };
}

named_reads! {
    u8 => U8,
    i8 => I8,
    u16 => U16,
    i16 => I16,
    u24 => U24,
    i24 => I24,
    u32 => U32,
    i32 => I32,
    u40 => U40,
    i40 => I40,
    u48 => U48,
    i48 => I48,
    u56 => U56,
    i56 => I56,
    u64 => U64,
    i64 => I64,
    u128 => U128,
    i128 => I128,
    u256 => U256,
    i256 => I256,
    f32 => F32,
    f64 => F64,
}
