//! Error type shared by the reader, the writer and the stream they wrap.

use alloc::string::String;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Everything that can go wrong while reading or writing a [`ByteStream`](crate::ByteStream).
///
/// Every failing operation leaves both the buffer and the cursor untouched.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// An access of `len` bytes at `offset` runs past the end of the buffer.
    #[error("access of {len} bytes at offset {offset} exceeds buffer length {buffer_len}")]
    OutOfBounds {
        /// Cursor position the access started at.
        offset: usize,
        /// Number of bytes requested.
        len: usize,
        /// Length of the buffer at the time of the access.
        buffer_len: usize,
    },

    /// A value cannot be represented by the requested type.
    #[error("value {value} is out of range for {ty} [{min}, {max}]")]
    OutOfRange {
        /// Name of the target type, e.g. `i24`.
        ty: &'static str,
        /// The offending value.
        value: String,
        /// Smallest representable value.
        min: String,
        /// Largest representable value.
        max: String,
    },

    /// A pixel format tag that is not one of the twelve supported orderings.
    #[error("unsupported pixel format `{0}`")]
    UnsupportedFormat(String),

    /// `resize` was asked to copy from beyond the end of the buffer.
    #[error("copy offset {offset} is greater than the buffer length {buffer_len}")]
    ResizeOffset {
        /// Requested copy offset.
        offset: usize,
        /// Length of the buffer being resized.
        buffer_len: usize,
    },

    /// A 16- or 32-bit string length that is not a whole number of code units.
    #[error("{encoding} string length {len} is not a multiple of {unit} bytes")]
    MisalignedString {
        /// Name of the encoding.
        encoding: &'static str,
        /// Length in bytes that was asked for.
        len: usize,
        /// Size of one code unit.
        unit: usize,
    },

    /// A null-terminated string ran into the end of the buffer.
    #[error("{encoding} string starting at offset {offset} has no terminator")]
    Unterminated {
        /// Name of the encoding.
        encoding: &'static str,
        /// Where the string started.
        offset: usize,
    },
}
