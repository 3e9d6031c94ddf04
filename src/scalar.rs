//! Fixed-width integer and float codecs.
//!
//! Each width/signedness pair is a marker type (`U24`, `I40`, ...) implementing [`Scalar`].
//! The marker carries the layout (size, range, name) and the value type is whatever native
//! integer holds that range: `U24` decodes to `u32`, `I48` to `i64`, `U256` to [`Uint256`].
//!
//! Integers up to 128 bits share one path: the bytes are folded into a `u128` in big- or
//! little-endian order, then signed types subtract `2^BITS` when the top bit is set. Encoding
//! runs the same steps backwards. Odd widths (24, 40, 48, 56) need nothing special beyond
//! their own `BITS` constant.

use alloc::string::ToString;
use core::fmt::Display;

use crate::{Endian, Error, Int256, Result, Uint256};

/// A fixed-size value that can be decoded from and encoded to raw bytes.
pub trait Scalar {
    /// Rust type the value is decoded into.
    type Value: Copy + PartialOrd + Display;

    /// Encoded size in bytes.
    const SIZE: usize;

    /// Short type name used in error messages, e.g. `u24`.
    const NAME: &'static str;

    /// Smallest encodable value.
    const MIN: Self::Value;

    /// Largest encodable value.
    const MAX: Self::Value;

    /// Decodes `raw`, which is exactly `SIZE` bytes long.
    fn decode(raw: &[u8], endian: Endian) -> Self::Value;

    /// Encodes `value` into `out`, which is exactly `SIZE` bytes long. `value` must already have
    /// passed [`validate`](Self::validate).
    fn encode(value: Self::Value, out: &mut [u8], endian: Endian);

    /// Checks that `value` lies in `[MIN, MAX]`.
    fn validate(value: Self::Value) -> Result<()> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(())
        } else {
            tracing::debug!(ty = Self::NAME, %value, "value out of range");
            Err(Error::OutOfRange {
                ty: Self::NAME,
                value: value.to_string(),
                min: Self::MIN.to_string(),
                max: Self::MAX.to_string(),
            })
        }
    }
}

/// Folds `raw` into an unsigned accumulator. `raw` is at most 16 bytes.
#[inline]
pub(crate) fn assemble(raw: &[u8], endian: Endian) -> u128 {
    let fold = |acc: u128, b: &u8| (acc << 8) | u128::from(*b);
    match endian {
        Endian::Big => raw.iter().fold(0, fold),
        Endian::Little => raw.iter().rev().fold(0, fold),
    }
}

/// Writes the low `out.len()` bytes of `value` into `out`.
#[inline]
pub(crate) fn disassemble(mut value: u128, out: &mut [u8], endian: Endian) {
    let mut put = |b: &mut u8| {
        *b = value as u8;
        value >>= 8;
    };
    match endian {
        Endian::Big => out.iter_mut().rev().for_each(&mut put),
        Endian::Little => out.iter_mut().for_each(&mut put),
    }
}

/// Interprets the low `bits` bits of `raw` as two's complement.
#[inline]
pub(crate) fn to_signed(raw: u128, bits: u32) -> i128 {
    if bits == 128 {
        return raw as i128;
    }
    if raw >= 1 << (bits - 1) {
        raw as i128 - (1 << bits)
    } else {
        raw as i128
    }
}

/// The unsigned `bits`-bit pattern of `value`, which must fit in `bits` bits.
#[inline]
pub(crate) fn to_unsigned(value: i128, bits: u32) -> u128 {
    if value < 0 && bits < 128 {
        (value + (1 << bits)) as u128
    } else {
        value as u128
    }
}

macro_rules! unsigned_scalar {
    ($(#[$attr:meta])* $marker:ident, $value:ty, $bits:literal, $name:literal, $max:expr) => {
        $(#[$attr])*
        #[derive(Copy, Clone, Debug)]
        pub enum $marker {}

        impl $marker {
            /// Width in bits.
            pub const BITS: u32 = $bits;
        }

        impl Scalar for $marker {
            type Value = $value;
            const SIZE: usize = $bits / 8;
            const NAME: &'static str = $name;
            const MIN: $value = 0;
            const MAX: $value = $max;

            #[inline]
            fn decode(raw: &[u8], endian: Endian) -> $value {
                assemble(raw, endian) as $value
            }

            #[inline]
            fn encode(value: $value, out: &mut [u8], endian: Endian) {
                disassemble(u128::from(value), out, endian)
            }
        }
    };
}

macro_rules! signed_scalar {
    ($(#[$attr:meta])* $marker:ident, $value:ty, $bits:literal, $name:literal, $min:expr, $max:expr) => {
        $(#[$attr])*
        #[derive(Copy, Clone, Debug)]
        pub enum $marker {}

        impl $marker {
            /// Width in bits.
            pub const BITS: u32 = $bits;
        }

        impl Scalar for $marker {
            type Value = $value;
            const SIZE: usize = $bits / 8;
            const NAME: &'static str = $name;
            const MIN: $value = $min;
            const MAX: $value = $max;

            #[inline]
            fn decode(raw: &[u8], endian: Endian) -> $value {
                to_signed(assemble(raw, endian), $bits) as $value
            }

            #[inline]
            fn encode(value: $value, out: &mut [u8], endian: Endian) {
                disassemble(to_unsigned(i128::from(value), $bits), out, endian)
            }
        }
    };
}

unsigned_scalar!(
    /// Unsigned 8-bit integer.
    U8, u8, 8, "u8", u8::MAX
);
signed_scalar!(
    /// Signed 8-bit integer.
    I8, i8, 8, "i8", i8::MIN, i8::MAX
);
unsigned_scalar!(
    /// Unsigned 16-bit integer.
    U16, u16, 16, "u16", u16::MAX
);
signed_scalar!(
    /// Signed 16-bit integer.
    I16, i16, 16, "i16", i16::MIN, i16::MAX
);
unsigned_scalar!(
    /// Unsigned 24-bit integer, held in a `u32`.
    U24, u32, 24, "u24", 0xFF_FFFF
);
signed_scalar!(
    /// Signed 24-bit integer, held in an `i32`.
    I24, i32, 24, "i24", -0x80_0000, 0x7F_FFFF
);
unsigned_scalar!(
    /// Unsigned 32-bit integer.
    U32, u32, 32, "u32", u32::MAX
);
signed_scalar!(
    /// Signed 32-bit integer.
    I32, i32, 32, "i32", i32::MIN, i32::MAX
);
unsigned_scalar!(
    /// Unsigned 40-bit integer, held in a `u64`.
    U40, u64, 40, "u40", 0xFF_FFFF_FFFF
);
signed_scalar!(
    /// Signed 40-bit integer, held in an `i64`.
    I40, i64, 40, "i40", -0x80_0000_0000, 0x7F_FFFF_FFFF
);
unsigned_scalar!(
    /// Unsigned 48-bit integer, held in a `u64`.
    U48, u64, 48, "u48", 0xFFFF_FFFF_FFFF
);
signed_scalar!(
    /// Signed 48-bit integer, held in an `i64`.
    I48, i64, 48, "i48", -0x8000_0000_0000, 0x7FFF_FFFF_FFFF
);
unsigned_scalar!(
    /// Unsigned 56-bit integer, held in a `u64`.
    U56, u64, 56, "u56", 0xFF_FFFF_FFFF_FFFF
);
signed_scalar!(
    /// Signed 56-bit integer, held in an `i64`.
    I56, i64, 56, "i56", -0x80_0000_0000_0000, 0x7F_FFFF_FFFF_FFFF
);
unsigned_scalar!(
    /// Unsigned 64-bit integer.
    U64, u64, 64, "u64", u64::MAX
);
signed_scalar!(
    /// Signed 64-bit integer.
    I64, i64, 64, "i64", i64::MIN, i64::MAX
);
unsigned_scalar!(
    /// Unsigned 128-bit integer.
    U128, u128, 128, "u128", u128::MAX
);
signed_scalar!(
    /// Signed 128-bit integer.
    I128, i128, 128, "i128", i128::MIN, i128::MAX
);

/// Unsigned 256-bit integer, held in a [`Uint256`].
#[derive(Copy, Clone, Debug)]
pub enum U256 {}

impl U256 {
    /// Width in bits.
    pub const BITS: u32 = 256;
}

impl Scalar for U256 {
    type Value = Uint256;
    const SIZE: usize = 32;
    const NAME: &'static str = "u256";
    const MIN: Uint256 = Uint256::ZERO;
    const MAX: Uint256 = Uint256::MAX;

    fn decode(raw: &[u8], endian: Endian) -> Uint256 {
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(raw);
        match endian {
            Endian::Big => Uint256::from_be_bytes(bytes),
            Endian::Little => Uint256::from_le_bytes(bytes),
        }
    }

    fn encode(value: Uint256, out: &mut [u8], endian: Endian) {
        match endian {
            Endian::Big => out.copy_from_slice(&value.to_be_bytes::<32>()),
            Endian::Little => out.copy_from_slice(&value.to_le_bytes::<32>()),
        }
    }
}

/// Signed 256-bit integer, held in an [`Int256`].
///
/// `Int256` already stores the two's-complement pattern, so the bias is a reinterpretation of
/// the same 32 bytes.
#[derive(Copy, Clone, Debug)]
pub enum I256 {}

impl I256 {
    /// Width in bits.
    pub const BITS: u32 = 256;
}

impl Scalar for I256 {
    type Value = Int256;
    const SIZE: usize = 32;
    const NAME: &'static str = "i256";
    const MIN: Int256 = Int256::MIN;
    const MAX: Int256 = Int256::MAX;

    fn decode(raw: &[u8], endian: Endian) -> Int256 {
        Int256::from_raw(U256::decode(raw, endian))
    }

    fn encode(value: Int256, out: &mut [u8], endian: Endian) {
        U256::encode(value.into_raw(), out, endian)
    }
}

/// IEEE-754 single-precision float.
#[derive(Copy, Clone, Debug)]
pub enum F32 {}

impl Scalar for F32 {
    type Value = f32;
    const SIZE: usize = 4;
    const NAME: &'static str = "f32";
    const MIN: f32 = f32::MIN;
    const MAX: f32 = f32::MAX;

    fn decode(raw: &[u8], endian: Endian) -> f32 {
        f32::from_bits(assemble(raw, endian) as u32)
    }

    fn encode(value: f32, out: &mut [u8], endian: Endian) {
        disassemble(u128::from(value.to_bits()), out, endian)
    }

    fn validate(_: f32) -> Result<()> {
        Ok(())
    }
}

/// IEEE-754 double-precision float.
#[derive(Copy, Clone, Debug)]
pub enum F64 {}

impl Scalar for F64 {
    type Value = f64;
    const SIZE: usize = 8;
    const NAME: &'static str = "f64";
    const MIN: f64 = f64::MIN;
    const MAX: f64 = f64::MAX;

    fn decode(raw: &[u8], endian: Endian) -> f64 {
        f64::from_bits(assemble(raw, endian) as u64)
    }

    fn encode(value: f64, out: &mut [u8], endian: Endian) {
        disassemble(u128::from(value.to_bits()), out, endian)
    }

    fn validate(_: f64) -> Result<()> {
        Ok(())
    }
}

/// The bits of `byte`, most significant first.
pub fn bits_of(byte: u8) -> [u8; 8] {
    core::array::from_fn(|i| (byte >> (7 - i)) & 1)
}
