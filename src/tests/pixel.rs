use crate::*;
use rstest::rstest;

#[rstest]
#[case("RGB", &[0x11, 0x22, 0x33])]
#[case("RGBA", &[0x11, 0x22, 0x33, 0x44])]
#[case("ARGB", &[0x44, 0x11, 0x22, 0x33])]
#[case("BGR", &[0x33, 0x22, 0x11])]
#[case("BGRA", &[0x33, 0x22, 0x11, 0x44])]
#[case("ABGR", &[0x44, 0x33, 0x22, 0x11])]
#[case("GBR", &[0x22, 0x33, 0x11])]
#[case("GBRA", &[0x22, 0x33, 0x11, 0x44])]
#[case("AGBR", &[0x44, 0x22, 0x33, 0x11])]
#[case("GRB", &[0x22, 0x11, 0x33])]
#[case("GRBA", &[0x22, 0x11, 0x33, 0x44])]
#[case("AGRB", &[0x44, 0x22, 0x11, 0x33])]
fn layout_and_roundtrip(#[case] tag: &str, #[case] bytes: &[u8]) {
    let color = Color::new(0x11, 0x22, 0x33, 0x44);
    let format: PixelFormat = tag.parse().unwrap();
    assert_eq!(format.to_string(), tag);
    assert_eq!(format.size(), bytes.len());

    let mut w = BinaryWriter::new(8);
    w.write_color(color, format).unwrap();
    assert_eq!(w.stream.position(), bytes.len());
    assert_eq!(&w.stream.as_slice()[..bytes.len()], bytes);

    let mut r = BinaryReader::from_stream(w.into_inner().at_position(0));
    let expected = if format.has_alpha() {
        color
    } else {
        Color::rgb(0x11, 0x22, 0x33)
    };
    assert_eq!(r.read_color(format), Ok(expected));
    assert_eq!(r.stream.position(), bytes.len());
}

#[test]
fn every_format_roundtrips_by_tag() {
    let color = Color::new(1, 2, 3, 4);
    for format in PixelFormat::ALL {
        let mut w = BinaryWriter::new(4);
        w.write_color_tag(color, format.tag()).unwrap();
        let mut r = BinaryReader::new(w.into_bytes());
        let back = r.read_color_tag(format.tag()).unwrap();
        assert_eq!(back.red, 1, "{format}");
        assert_eq!(back.green, 2, "{format}");
        assert_eq!(back.blue, 3, "{format}");
        assert_eq!(back.alpha, if format.has_alpha() { 4 } else { 255 }, "{format}");
    }
}

#[test]
fn unknown_tag_consumes_nothing() {
    let mut r = BinaryReader::new([1u8, 2, 3, 4]);
    assert_eq!(
        r.read_color_tag("RGBX"),
        Err(Error::UnsupportedFormat("RGBX".into()))
    );
    assert!(r.read_color_tag("rgb").is_err());
    assert_eq!(r.stream.position(), 0);

    let mut w = BinaryWriter::new(4);
    assert!(w.write_color_tag(Color::rgb(1, 2, 3), "BRG").is_err());
    assert_eq!(w.stream.position(), 0);
}

#[test]
fn short_buffer() {
    let mut r = BinaryReader::new([1u8, 2, 3]);
    assert!(matches!(
        r.read_color(PixelFormat::Argb),
        Err(Error::OutOfBounds { len: 4, .. })
    ));
    assert_eq!(r.read_color(PixelFormat::Bgr), Ok(Color::rgb(3, 2, 1)));
}

#[test]
fn packed_u32() {
    let c = Color::new(0x12, 0x34, 0x56, 0x78);
    assert_eq!(c.to_u32(), 0x1234_5678);
    assert_eq!(Color::from_u32(0x1234_5678), c);
    assert_eq!(Color::rgb(0xff, 0, 0).to_u32(), 0xff00_00ff);
}
