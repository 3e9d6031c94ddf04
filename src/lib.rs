//! Reads and writes fixed-size byte buffers with an explicit cursor and a byte order chosen at
//! runtime.
//!
//! * Integers of 8, 16, 24, 32, 40, 48, 56, 64, 128 and 256 bits, signed and unsigned, range
//!   checked on write.
//! * IEEE-754 `f32` and `f64`.
//! * UTF-8, UTF-16 and UTF-32 strings with an explicit length, a `u16` length prefix, or a
//!   null terminator.
//! * 8-bit-per-channel colors in twelve channel orders.
//!
//! Multi-byte values are laid out most significant byte first (big endian) or least
//! significant byte first (little endian), with no padding between fields.
//!
//! ```
//! use endian_binary_io::{BinaryReader, BinaryWriter, Endian};
//!
//! let mut w = BinaryWriter::with_endian(8, Endian::Little);
//! w.write_i24(-2).unwrap();
//! w.write_u40(0x01_0203_0405).unwrap();
//!
//! let mut r = BinaryReader::with_endian(w.into_bytes(), Endian::Little);
//! assert_eq!(r.read_i24(), Ok(-2));
//! assert_eq!(r.read_u40(), Ok(0x01_0203_0405));
//! ```

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![forbid(unsafe_code)]
#![forbid(unused_must_use)]
#![warn(missing_docs)]

extern crate alloc;

mod error;
pub mod pixel;
mod reader;
pub mod scalar;
mod stream;
pub mod text;
mod writer;

#[cfg(test)]
mod tests;

pub use error::{Error, Result};
pub use pixel::{Channel, Color, PixelFormat};
pub use reader::BinaryReader;
pub use scalar::Scalar;
pub use stream::{ByteStream, Endian};
pub use text::{Framing, StrLength, TextEncoding};
pub use writer::BinaryWriter;

/// Value type of [`scalar::U256`].
pub use alloy_primitives::U256 as Uint256;

/// Value type of [`scalar::I256`], stored as its two's-complement bit pattern.
pub use alloy_primitives::I256 as Int256;
