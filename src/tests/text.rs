use crate::*;
use rstest::rstest;

const HELLO: &str = "Hello, world!";
const CJK: &str = "你好，世界";

#[rstest]
fn roundtrip(
    #[values(HELLO, CJK, "emoji 😀 outside the BMP")] s: &str,
    #[values(TextEncoding::Utf8, TextEncoding::Utf16, TextEncoding::Utf32)] encoding: TextEncoding,
    #[values(Endian::Big, Endian::Little)] endian: Endian,
) {
    // Explicit length.
    let mut w = BinaryWriter::with_endian(256, endian);
    w.write_str(s, encoding, Framing::RAW).unwrap();
    let len = w.stream.position();
    let mut r = BinaryReader::from_stream(w.into_inner().at_position(0));
    assert_eq!(r.read_str(encoding, StrLength::Bytes(len)).unwrap(), s);
    assert_eq!(r.stream.position(), len);

    // Length prefixed.
    let mut w = BinaryWriter::with_endian(256, endian);
    w.write_str(s, encoding, Framing::PREFIXED).unwrap();
    let end = w.stream.position();
    assert_eq!(end, len + 2);
    let mut r = BinaryReader::from_stream(w.into_inner().at_position(0));
    assert_eq!(r.read_str(encoding, StrLength::Prefixed).unwrap(), s);
    assert_eq!(r.stream.position(), end);

    // Null terminated.
    let mut w = BinaryWriter::with_endian(256, endian);
    w.write_str(s, encoding, Framing::NUL_TERMINATED).unwrap();
    let end = w.stream.position();
    assert_eq!(end, len + encoding.unit_size());
    let mut r = BinaryReader::from_stream(w.into_inner().at_position(0));
    assert_eq!(r.read_str(encoding, StrLength::NulTerminated).unwrap(), s);
    assert_eq!(r.stream.position(), end);

    // Length prefixed, counting a terminator.
    let mut w = BinaryWriter::with_endian(256, endian);
    w.write_str(s, encoding, Framing::PREFIXED_NUL_TERMINATED).unwrap();
    let end = w.stream.position();
    assert_eq!(end, len + 2 + encoding.unit_size());
    let mut r = BinaryReader::from_stream(w.into_inner().at_position(0));
    assert_eq!(
        r.read_str(encoding, StrLength::PrefixedNulTerminated).unwrap(),
        s
    );
    assert_eq!(r.stream.position(), end);
}

#[test]
fn utf8_keeps_trailing_nul() {
    let mut w = BinaryWriter::new(9);
    w.write_str("a\0", TextEncoding::Utf8, Framing::PREFIXED).unwrap();
    w.write_str("b\0", TextEncoding::Utf8, Framing::PREFIXED_NUL_TERMINATED)
        .unwrap();
    assert_eq!(hex::encode(w.stream.as_slice()), "000261000003620000");

    let mut r = BinaryReader::from_stream(w.into_inner().at_position(0));
    assert_eq!(
        r.read_str(TextEncoding::Utf8, StrLength::Prefixed).unwrap(),
        "a\0"
    );
    assert_eq!(
        r.read_str(TextEncoding::Utf8, StrLength::PrefixedNulTerminated)
            .unwrap(),
        "b\0"
    );
    assert_eq!(r.stream.position(), 9);
}

#[test]
fn utf8_fixed_field_keeps_padding() {
    let mut r = BinaryReader::new(*b"ab\0\0");
    assert_eq!(
        r.read_str(TextEncoding::Utf8, StrLength::Bytes(4)).unwrap(),
        "ab\0\0"
    );
}

#[test]
fn terminated_utf8_decodes_like_sized_utf8() {
    let bytes = [0xC3u8, 0x28, 0x00];
    let mut r = BinaryReader::new(bytes);
    let terminated = r
        .read_str(TextEncoding::Utf8, StrLength::NulTerminated)
        .unwrap();
    assert_eq!(r.stream.position(), 3);

    r.stream.set_position(0);
    let sized = r.read_str(TextEncoding::Utf8, StrLength::Bytes(2)).unwrap();
    assert_eq!(terminated, sized);
    assert_eq!(terminated, "\u{E8}");
}

#[test]
fn prefixed_nul_terminated_units_drop_terminator() {
    let mut w = BinaryWriter::new(8);
    w.write_units(
        &[0x0041, 0xD800],
        TextEncoding::Utf16,
        Framing::PREFIXED_NUL_TERMINATED,
        Endian::Big,
    )
    .unwrap();
    assert_eq!(hex::encode(w.stream.as_slice()), "00060041d8000000");

    let mut r = BinaryReader::from_stream(w.into_inner().at_position(0));
    assert_eq!(
        r.read_utf16_units(StrLength::PrefixedNulTerminated, Endian::Big),
        Ok(vec![0x0041, 0xD800])
    );
    assert_eq!(r.stream.position(), 8);
}

#[test]
fn prefixed_utf8_layout() {
    let mut w = BinaryWriter::new(5);
    w.write_str("Hé", TextEncoding::Utf8, Framing::PREFIXED).unwrap();
    assert_eq!(hex::encode(w.into_bytes()), "000348c3a9");
}

#[test]
fn utf16_layout_splits_supplementary_chars() {
    let mut w = BinaryWriter::with_endian(6, Endian::Little);
    w.write_str("A😀", TextEncoding::Utf16, Framing::RAW).unwrap();
    assert_eq!(hex::encode(w.into_bytes()), "41003dd800de");
}

#[test]
fn utf32_from_units_recombines_pairs() {
    let units: Vec<u16> = "A😀".encode_utf16().collect();
    assert_eq!(units.len(), 3);

    let mut w = BinaryWriter::new(8);
    w.write_units(&units, TextEncoding::Utf32, Framing::RAW, Endian::Big)
        .unwrap();
    assert_eq!(hex::encode(w.into_bytes()), "000000410001f600");
}

#[test]
fn utf8_from_units_emits_four_byte_sequence() {
    let units: Vec<u16> = "😀".encode_utf16().collect();
    let mut w = BinaryWriter::new(4);
    w.write_units(&units, TextEncoding::Utf8, Framing::RAW, Endian::Big)
        .unwrap();
    assert_eq!(w.into_bytes(), "😀".as_bytes());
}

#[test]
fn lone_surrogate_survives_raw_units() {
    let units = [0x0041, 0xD800, 0x0042];
    let mut w = BinaryWriter::new(6);
    w.write_units(&units, TextEncoding::Utf16, Framing::RAW, Endian::Big)
        .unwrap();

    let mut r = BinaryReader::from_stream(w.into_inner().at_position(0));
    assert_eq!(
        r.read_utf16_units(StrLength::Bytes(6), Endian::Big),
        Ok(units.to_vec())
    );
    r.stream.set_position(0);
    assert_eq!(
        r.read_str(TextEncoding::Utf16, StrLength::Bytes(6)).unwrap(),
        "A\u{FFFD}B"
    );
}

#[test]
fn utf8_reads_four_byte_char_as_one_code_point() {
    let mut r = BinaryReader::new("😀x".as_bytes());
    let s = r.read_str(TextEncoding::Utf8, StrLength::Bytes(4)).unwrap();
    assert_eq!(s.chars().count(), 1);
    assert_eq!(s, "😀");
    assert_eq!(r.stream.position(), 4);
}

#[test]
fn utf8_length_counts_bytes_not_chars() {
    let mut r = BinaryReader::new("日本語".as_bytes());
    assert_eq!(
        r.read_str(TextEncoding::Utf8, StrLength::Bytes(6)).unwrap(),
        "日本"
    );
    assert_eq!(r.stream.position(), 6);
}

#[test]
fn fixed_field_padding_is_stripped() {
    let mut w = BinaryWriter::with_endian(16, Endian::Little);
    w.write_str("abc", TextEncoding::Utf16, Framing::RAW).unwrap();

    let mut r = BinaryReader::with_endian(w.into_bytes(), Endian::Little);
    assert_eq!(
        r.read_str(TextEncoding::Utf16, StrLength::Bytes(16)).unwrap(),
        "abc"
    );
    assert_eq!(r.stream.position(), 16);
}

#[test]
fn prefix_counts_terminator() {
    let mut w = BinaryWriter::new(16);
    w.write_str("hi", TextEncoding::Utf32, Framing::PREFIXED_NUL_TERMINATED)
        .unwrap();
    assert_eq!(w.stream.position(), 2 + 12);
    assert_eq!(&w.stream.as_slice()[..2], &[0, 12]);

    let mut r = BinaryReader::from_stream(w.into_inner().at_position(0));
    assert_eq!(
        r.read_str(TextEncoding::Utf32, StrLength::Prefixed).unwrap(),
        "hi"
    );
    assert_eq!(r.stream.position(), 14);
}

#[test]
fn prefix_uses_given_byte_order() {
    let mut r = BinaryReader::new([0x02u8, 0x00, b'o', b'k']);
    assert_eq!(
        r.read_str_with(TextEncoding::Utf8, StrLength::Prefixed, Endian::Little),
        Ok("ok".into())
    );
}

#[test]
fn misaligned_length() {
    let mut r = BinaryReader::new([0u8; 8]);
    assert_eq!(
        r.read_str(TextEncoding::Utf16, StrLength::Bytes(3)),
        Err(Error::MisalignedString {
            encoding: "UTF-16",
            len: 3,
            unit: 2
        })
    );
    assert!(matches!(
        r.read_str(TextEncoding::Utf32, StrLength::Bytes(6)),
        Err(Error::MisalignedString { unit: 4, .. })
    ));
    assert_eq!(r.stream.position(), 0);
}

#[test]
fn unterminated_leaves_cursor() {
    let mut r = BinaryReader::new(*b"xabc");
    r.stream.set_position(1);
    assert_eq!(
        r.read_str(TextEncoding::Utf8, StrLength::NulTerminated),
        Err(Error::Unterminated {
            encoding: "UTF-8",
            offset: 1
        })
    );
    assert_eq!(r.stream.position(), 1);
}

#[test]
fn failed_prefixed_read_restores_cursor() {
    // Prefix claims 10 bytes but only 2 follow.
    let mut r = BinaryReader::new([0x00u8, 0x0a, b'h', b'i']);
    assert!(matches!(
        r.read_str(TextEncoding::Utf8, StrLength::Prefixed),
        Err(Error::OutOfBounds { .. })
    ));
    assert_eq!(r.stream.position(), 0);
}

#[test]
fn oversized_prefix_writes_nothing() {
    let long = "x".repeat(usize::from(u16::MAX) + 1);
    let mut w = BinaryWriter::new(70_000);
    assert!(matches!(
        w.write_str(&long, TextEncoding::Utf8, Framing::PREFIXED),
        Err(Error::OutOfRange { ty: "u16", .. })
    ));
    assert_eq!(w.stream.position(), 0);

    w.write_str(&long, TextEncoding::Utf8, Framing::RAW).unwrap();
    assert_eq!(w.stream.position(), long.len());
}

#[test]
fn string_that_does_not_fit_writes_nothing() {
    let mut w = BinaryWriter::new(8);
    assert!(matches!(
        w.write_str(HELLO, TextEncoding::Utf16, Framing::RAW),
        Err(Error::OutOfBounds { len: 26, .. })
    ));
    assert_eq!(w.stream.position(), 0);
    assert_eq!(w.stream.as_slice(), &[0; 8]);
}

#[test]
fn invalid_utf32_scalar_decodes_to_replacement() {
    let mut r = BinaryReader::new([0x00u8, 0x11, 0x00, 0x00, 0x00, 0x00, 0x00, 0x41]);
    assert_eq!(
        r.read_str(TextEncoding::Utf32, StrLength::Bytes(8)).unwrap(),
        "\u{FFFD}A"
    );
}

#[cfg(feature = "bstr")]
#[test]
fn read_bstr() {
    let mut r = BinaryReader::new(*b"ab\xffcd");
    assert_eq!(r.read_bstr(3).unwrap(), bstr::BStr::new(b"ab\xff"));
    assert_eq!(r.stream.position(), 3);
}
