use alloc::string::ToString;
use alloc::vec::Vec;

use crate::pixel::{Color, PixelFormat};
use crate::scalar::{self, Scalar};
use crate::text::{self, Framing, TextEncoding};
use crate::{ByteStream, Endian, Error, Result};

/// Writes values into an owned, fixed-size byte buffer, advancing a cursor.
///
/// The buffer does not grow: a write that does not fit fails with [`Error::OutOfBounds`].
/// Integer writes are range checked against the target width and fail with
/// [`Error::OutOfRange`]. In both cases nothing is written and the cursor does not move.
#[derive(Clone, Debug, Default)]
pub struct BinaryWriter {
    /// The buffer being written, with its cursor and default byte order.
    pub stream: ByteStream,
}

impl BinaryWriter {
    /// Creates a big-endian writer over `size` zero bytes.
    pub fn new(size: usize) -> Self {
        Self::from_stream(ByteStream::zeroed(size))
    }

    /// Creates a writer over `size` zero bytes with the given byte order.
    pub fn with_endian(size: usize, endian: Endian) -> Self {
        let mut stream = ByteStream::zeroed(size);
        stream.set_endian(endian);
        Self::from_stream(stream)
    }

    /// Writes over an existing buffer, big-endian, starting at offset 0.
    pub fn wrap(out: impl Into<Vec<u8>>) -> Self {
        Self::from_stream(ByteStream::new(out))
    }

    /// Writes into an existing stream, at its current position.
    pub fn from_stream(stream: ByteStream) -> Self {
        Self { stream }
    }

    /// Gives up the stream.
    pub fn into_inner(self) -> ByteStream {
        self.stream
    }

    /// Gives up the buffer.
    pub fn into_bytes(self) -> Vec<u8> {
        self.stream.into_inner()
    }

    /// Writes `bytes` to the output.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.stream.bytes_at_mut(bytes.len())?.copy_from_slice(bytes);
        self.stream.advance(bytes.len());
        Ok(())
    }

    /// Writes a small, fixed-size array of bytes.
    pub fn write_cbytes<const N: usize>(&mut self, value: [u8; N]) -> Result<()> {
        self.write_bytes(&value)
    }

    /// Writes `byte` `count` times.
    pub fn write_repeated(&mut self, byte: u8, count: usize) -> Result<()> {
        self.stream.bytes_at_mut(count)?.fill(byte);
        self.stream.advance(count);
        Ok(())
    }

    /// Writes a `T` in the stream's byte order.
    #[inline]
    pub fn write<T: Scalar>(&mut self, value: T::Value) -> Result<()> {
        self.write_with::<T>(value, self.stream.endian())
    }

    /// Writes a `T` in the given byte order.
    #[inline]
    pub fn write_with<T: Scalar>(&mut self, value: T::Value, endian: Endian) -> Result<()> {
        T::validate(value)?;
        T::encode(value, self.stream.bytes_at_mut(T::SIZE)?, endian);
        self.stream.advance(T::SIZE);
        Ok(())
    }

    /// Writes a string in the stream's byte order.
    pub fn write_str(&mut self, s: &str, encoding: TextEncoding, framing: Framing) -> Result<()> {
        self.write_str_with(s, encoding, framing, self.stream.endian())
    }

    /// Writes a string in the given byte order, which also applies to a length prefix.
    pub fn write_str_with(
        &mut self,
        s: &str,
        encoding: TextEncoding,
        framing: Framing,
        endian: Endian,
    ) -> Result<()> {
        self.write_code_points(s.chars().map(u32::from), encoding, framing, endian)
    }

    /// Writes text held as UTF-16 code units.
    ///
    /// Surrogate pairs are combined into one code point before encoding, so a pair becomes a
    /// single UTF-32 unit or a 4-byte UTF-8 sequence. An unpaired surrogate is written as is in
    /// UTF-16 and UTF-32, and as U+FFFD in UTF-8.
    pub fn write_units(
        &mut self,
        units: &[u16],
        encoding: TextEncoding,
        framing: Framing,
        endian: Endian,
    ) -> Result<()> {
        self.write_code_points(text::code_points(units), encoding, framing, endian)
    }

    /// Writes one pixel.
    pub fn write_color(&mut self, color: Color, format: PixelFormat) -> Result<()> {
        format.pack(color, self.stream.bytes_at_mut(format.size())?);
        self.stream.advance(format.size());
        Ok(())
    }

    /// Writes one pixel whose format is given by its tag, e.g. `"BGRA"`. An unknown tag fails
    /// before anything is written.
    pub fn write_color_tag(&mut self, color: Color, tag: &str) -> Result<()> {
        self.write_color(color, tag.parse()?)
    }

    /// Encodes the whole string up front so that a failure writes nothing.
    fn write_code_points(
        &mut self,
        code_points: impl Iterator<Item = u32>,
        encoding: TextEncoding,
        framing: Framing,
        endian: Endian,
    ) -> Result<()> {
        let prefix = if framing.length_prefix {
            scalar::U16::SIZE
        } else {
            0
        };
        let mut out = Vec::new();
        out.resize(prefix, 0);
        text::encode_into(code_points, encoding, endian, &mut out);
        if framing.nul_terminated {
            out.resize(out.len() + encoding.unit_size(), 0);
        }

        if framing.length_prefix {
            let body = out.len() - prefix;
            let len = u16::try_from(body).map_err(|_| {
                tracing::debug!(body, "string too long for a u16 length prefix");
                Error::OutOfRange {
                    ty: scalar::U16::NAME,
                    value: body.to_string(),
                    min: scalar::U16::MIN.to_string(),
                    max: scalar::U16::MAX.to_string(),
                }
            })?;
            scalar::U16::encode(len, &mut out[..prefix], endian);
        }

        self.write_bytes(&out)
    }
}

macro_rules! named_writes {
    ($($name:ident => $marker:ident),* $(,)?) => {
        paste::paste! {
            impl BinaryWriter {
                $(
                    #[doc = "Writes a `" $name "` in the stream's byte order."]
                    #[inline]
                    pub fn [<write_ $name>](&mut self, value: <scalar::$marker as Scalar>::Value) -> Result<()> {
                        self.write::<scalar::$marker>(value)
                    }
                )*
            }
        }
    };
}

named_writes! {
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
