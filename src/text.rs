//! String codecs for 8-, 16- and 32-bit code units.
//!
//! Encoders work from a sequence of code points, so text can come from a `&str` or from
//! UTF-16 code units (see [`code_points`]). Decoders for 16- and 32-bit units read the body
//! through `zerocopy` byte-order views.

use alloc::string::String;
use alloc::vec::Vec;

use zerocopy::byteorder::{BigEndian, ByteOrder, LittleEndian, U16, U32};
use zerocopy::FromBytes;

use crate::{Endian, Error, Result};

/// Which Unicode transformation format a string is stored in.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum TextEncoding {
    /// One to four bytes per code point.
    Utf8,
    /// One or two 16-bit units per code point.
    Utf16,
    /// One 32-bit unit per code point.
    Utf32,
}

impl TextEncoding {
    /// Size of one code unit in bytes.
    pub const fn unit_size(self) -> usize {
        match self {
            Self::Utf8 => 1,
            Self::Utf16 => 2,
            Self::Utf32 => 4,
        }
    }

    /// Name used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Utf16 => "UTF-16",
            Self::Utf32 => "UTF-32",
        }
    }
}

/// How a reader finds the end of a string.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum StrLength {
    /// The string occupies this many bytes.
    Bytes(usize),
    /// A `u16` byte count is read first, then that many bytes.
    Prefixed,
    /// As [`Prefixed`](Self::Prefixed), but the counted bytes end in one zero code unit,
    /// which is dropped. This reads what [`Framing::PREFIXED_NUL_TERMINATED`] writes.
    PrefixedNulTerminated,
    /// The string ends at the first zero code unit, which is consumed.
    NulTerminated,
}

/// What a writer puts around the encoded string.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Default)]
pub struct Framing {
    /// Write a `u16` byte count (body plus terminator) before the string.
    pub length_prefix: bool,
    /// Write a zero code unit after the string.
    pub nul_terminated: bool,
}

impl Framing {
    /// Just the encoded body.
    pub const RAW: Self = Self {
        length_prefix: false,
        nul_terminated: false,
    };
    /// `u16` byte count, then the body.
    pub const PREFIXED: Self = Self {
        length_prefix: true,
        nul_terminated: false,
    };
    /// Body, then a zero code unit.
    pub const NUL_TERMINATED: Self = Self {
        length_prefix: false,
        nul_terminated: true,
    };
    /// `u16` byte count, body, then a zero code unit. The count includes the terminator.
    pub const PREFIXED_NUL_TERMINATED: Self = Self {
        length_prefix: true,
        nul_terminated: true,
    };
}

/// Whether `unit` is a high (leading) surrogate.
pub const fn is_high_surrogate(unit: u16) -> bool {
    matches!(unit, 0xD800..=0xDBFF)
}

/// Whether `unit` is a low (trailing) surrogate.
pub const fn is_low_surrogate(unit: u16) -> bool {
    matches!(unit, 0xDC00..=0xDFFF)
}

/// Combines a surrogate pair into the code point it stands for.
pub const fn join_surrogates(high: u16, low: u16) -> u32 {
    0x1_0000 + (((high as u32) - 0xD800) << 10) + ((low as u32) - 0xDC00)
}

/// Splits a code point above `0xFFFF` into a high and a low surrogate.
pub const fn split_surrogates(code_point: u32) -> (u16, u16) {
    let offset = code_point - 0x1_0000;
    (
        0xD800 + (offset >> 10) as u16,
        0xDC00 + (offset & 0x3FF) as u16,
    )
}

/// Walks UTF-16 code units as code points.
///
/// A high surrogate followed by a low surrogate yields the combined code point. Any other
/// surrogate is yielded unchanged.
pub fn code_points(units: &[u16]) -> impl Iterator<Item = u32> + '_ {
    let mut iter = units.iter().copied().peekable();
    core::iter::from_fn(move || {
        let unit = iter.next()?;
        if is_high_surrogate(unit) {
            if let Some(low) = iter.next_if(|&next| is_low_surrogate(next)) {
                return Some(join_surrogates(unit, low));
            }
        }
        Some(u32::from(unit))
    })
}

/// Appends the encoding of `code_points` to `out`.
pub(crate) fn encode_into(
    code_points: impl Iterator<Item = u32>,
    encoding: TextEncoding,
    endian: Endian,
    out: &mut Vec<u8>,
) {
    for cp in code_points {
        match encoding {
            TextEncoding::Utf8 => {
                let ch = char::from_u32(cp).unwrap_or(char::REPLACEMENT_CHARACTER);
                let mut buf = [0u8; 4];
                out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
            }
            TextEncoding::Utf16 => {
                if cp > 0xFFFF {
                    let (high, low) = split_surrogates(cp);
                    push_u16(out, high, endian);
                    push_u16(out, low, endian);
                } else {
                    push_u16(out, cp as u16, endian);
                }
            }
            TextEncoding::Utf32 => match endian {
                Endian::Big => out.extend_from_slice(&cp.to_be_bytes()),
                Endian::Little => out.extend_from_slice(&cp.to_le_bytes()),
            },
        }
    }
}

fn push_u16(out: &mut Vec<u8>, unit: u16, endian: Endian) {
    match endian {
        Endian::Big => out.extend_from_slice(&unit.to_be_bytes()),
        Endian::Little => out.extend_from_slice(&unit.to_le_bytes()),
    }
}

/// Decodes UTF-8 from the start of `data` until at least `len` bytes have been consumed.
///
/// The lead byte decides how many bytes a character takes, and a character that starts
/// before `len` is consumed whole even if it ends past it. Returns the text and the number
/// of bytes consumed, or `None` if a character runs off the end of `data`. Sequences that do
/// not form a valid scalar value decode to U+FFFD.
pub(crate) fn decode_utf8(data: &[u8], len: usize) -> Option<(String, usize)> {
    let walk = walk_utf8(data, len);
    (!walk.truncated).then_some((walk.text, walk.consumed))
}

struct Utf8Walk {
    text: String,
    consumed: usize,
    truncated: bool,
}

fn walk_utf8(data: &[u8], len: usize) -> Utf8Walk {
    let mut walk = Utf8Walk {
        text: String::new(),
        consumed: 0,
        truncated: false,
    };
    while walk.consumed < len {
        let Some(&lead) = data.get(walk.consumed) else {
            walk.truncated = true;
            break;
        };
        let (width, init) = match lead {
            0x00..=0x7F => (1, u32::from(lead)),
            0x80..=0xDF => (2, u32::from(lead & 0x1F)),
            0xE0..=0xEF => (3, u32::from(lead & 0x0F)),
            _ => (4, u32::from(lead & 0x07)),
        };
        let Some(tail) = data.get(walk.consumed + 1..walk.consumed + width) else {
            walk.truncated = true;
            break;
        };
        let cp = tail
            .iter()
            .fold(init, |acc, &b| (acc << 6) | u32::from(b & 0x3F));
        walk.text
            .push(char::from_u32(cp).unwrap_or(char::REPLACEMENT_CHARACTER));
        walk.consumed += width;
    }
    walk
}

/// Reads `bytes` as 16-bit code units. `bytes` must be a whole number of units.
pub(crate) fn utf16_units(bytes: &[u8], endian: Endian) -> Result<Vec<u16>> {
    fn units<O: ByteOrder>(bytes: &[u8]) -> Result<Vec<u16>> {
        let units = <[U16<O>]>::ref_from_bytes(bytes).map_err(|_| Error::MisalignedString {
            encoding: TextEncoding::Utf16.name(),
            len: bytes.len(),
            unit: 2,
        })?;
        Ok(units.iter().map(|u| u.get()).collect())
    }

    match endian {
        Endian::Big => units::<BigEndian>(bytes),
        Endian::Little => units::<LittleEndian>(bytes),
    }
}

/// Reads `bytes` as 32-bit code units. `bytes` must be a whole number of units.
pub(crate) fn utf32_units(bytes: &[u8], endian: Endian) -> Result<Vec<u32>> {
    fn units<O: ByteOrder>(bytes: &[u8]) -> Result<Vec<u32>> {
        let units = <[U32<O>]>::ref_from_bytes(bytes).map_err(|_| Error::MisalignedString {
            encoding: TextEncoding::Utf32.name(),
            len: bytes.len(),
            unit: 4,
        })?;
        Ok(units.iter().map(|u| u.get()).collect())
    }

    match endian {
        Endian::Big => units::<BigEndian>(bytes),
        Endian::Little => units::<LittleEndian>(bytes),
    }
}

/// Decodes a whole number of code units of `encoding` from `bytes`.
pub(crate) fn decode_units(bytes: &[u8], encoding: TextEncoding, endian: Endian) -> Result<String> {
    let text = match encoding {
        TextEncoding::Utf8 => {
            // A lead byte whose sequence runs past the body ends it with U+FFFD.
            let mut walk = walk_utf8(bytes, bytes.len());
            if walk.truncated {
                walk.text.push(char::REPLACEMENT_CHARACTER);
            }
            walk.text
        }
        TextEncoding::Utf16 => String::from_utf16_lossy(&utf16_units(bytes, endian)?),
        TextEncoding::Utf32 => utf32_units(bytes, endian)?
            .into_iter()
            .map(|cp| char::from_u32(cp).unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect(),
    };
    Ok(text)
}

/// Offset of the first all-zero code unit of `encoding` in `data`.
pub(crate) fn find_terminator(data: &[u8], encoding: TextEncoding) -> Option<usize> {
    let unit = encoding.unit_size();
    data.chunks_exact(unit)
        .position(|c| c.iter().all(|&b| b == 0))
        .map(|i| i * unit)
}

/// Drops NUL padding from the end of a decoded 16- or 32-bit string. UTF-8 text is returned
/// as decoded.
pub(crate) fn strip_trailing_nuls(mut text: String, encoding: TextEncoding) -> String {
    if encoding == TextEncoding::Utf8 {
        return text;
    }
    let keep = text.trim_end_matches('\0').len();
    text.truncate(keep);
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn surrogates() {
        assert_eq!(split_surrogates(0x1F600), (0xD83D, 0xDE00));
        assert_eq!(join_surrogates(0xD83D, 0xDE00), 0x1F600);
        assert_eq!(split_surrogates(0x10FFFF), (0xDBFF, 0xDFFF));
        assert_eq!(split_surrogates(0x10000), (0xD800, 0xDC00));
    }

    #[test]
    fn code_points_recombine_pairs() {
        let units: Vec<u16> = "a😀b".encode_utf16().collect();
        let cps: Vec<u32> = code_points(&units).collect();
        assert_eq!(cps, vec![0x61, 0x1F600, 0x62]);
    }

    #[test]
    fn code_points_keep_lone_surrogates() {
        let cps: Vec<u32> = code_points(&[0xD83D, 0x41, 0xDE00, 0xD800]).collect();
        assert_eq!(cps, vec![0xD83D, 0x41, 0xDE00, 0xD800]);
    }

    #[test]
    fn utf8_walk_finishes_straddling_char() {
        // "é" is two bytes; asking for one still consumes both.
        let (s, n) = decode_utf8("é!".as_bytes(), 1).unwrap();
        assert_eq!(s, "é");
        assert_eq!(n, 2);
    }

    #[test]
    fn utf8_walk_truncated_sequence() {
        assert_eq!(decode_utf8(&[0xE4, 0xB8], 2), None);
    }

    #[test]
    fn terminator_is_unit_aligned() {
        // The zero bytes at offsets 1..3 straddle two units and do not count.
        let data = [0x41, 0x00, 0x00, 0x42, 0x00, 0x00];
        assert_eq!(find_terminator(&data, TextEncoding::Utf16), Some(4));
        assert_eq!(find_terminator(&data, TextEncoding::Utf8), Some(1));
        assert_eq!(find_terminator(&data[..3], TextEncoding::Utf32), None);
    }

    #[test]
    fn strip_only_trailing() {
        assert_eq!(
            strip_trailing_nuls("a\0b\0\0".into(), TextEncoding::Utf16),
            "a\0b"
        );
        assert_eq!(
            strip_trailing_nuls("a\0".into(), TextEncoding::Utf8),
            "a\0"
        );
    }

    #[test]
    fn terminated_utf8_body_uses_the_walk() {
        // 0xC3 takes the next byte as a continuation whatever its top bits.
        assert_eq!(
            decode_units(&[0xC3, 0x28], TextEncoding::Utf8, Endian::Big).unwrap(),
            "\u{E8}"
        );
        assert_eq!(
            decode_units(&[0x41, 0xE4, 0xB8], TextEncoding::Utf8, Endian::Big).unwrap(),
            "A\u{FFFD}"
        );
    }
}
