//! Packed pixel colors.

use alloc::string::ToString;
use core::fmt;
use core::str::FromStr;

use crate::Error;

/// An 8-bit-per-channel color. Formats without an alpha channel read as fully opaque.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Color {
    /// Red channel.
    pub red: u8,
    /// Green channel.
    pub green: u8,
    /// Blue channel.
    pub blue: u8,
    /// Alpha channel, 255 is opaque.
    pub alpha: u8,
}

impl Color {
    /// A color with every channel given.
    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// An opaque color.
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::new(red, green, blue, 255)
    }

    /// Packs the color as `R << 24 | G << 16 | B << 8 | A`.
    pub const fn to_u32(self) -> u32 {
        u32::from_be_bytes([self.red, self.green, self.blue, self.alpha])
    }

    /// Unpacks a value produced by [`to_u32`](Self::to_u32).
    pub const fn from_u32(packed: u32) -> Self {
        let [red, green, blue, alpha] = packed.to_be_bytes();
        Self::new(red, green, blue, alpha)
    }

    /// Value of one channel.
    pub const fn channel(&self, channel: Channel) -> u8 {
        match channel {
            Channel::Red => self.red,
            Channel::Green => self.green,
            Channel::Blue => self.blue,
            Channel::Alpha => self.alpha,
        }
    }

    /// Mutable access to one channel.
    pub fn channel_mut(&mut self, channel: Channel) -> &mut u8 {
        match channel {
            Channel::Red => &mut self.red,
            Channel::Green => &mut self.green,
            Channel::Blue => &mut self.blue,
            Channel::Alpha => &mut self.alpha,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::rgb(0, 0, 0)
    }
}

/// One color channel.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Channel {
    /// Red
    Red,
    /// Green
    Green,
    /// Blue
    Blue,
    /// Alpha
    Alpha,
}

/// Byte order of the channels of a packed pixel, named after the order the bytes appear in.
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum PixelFormat {
    Rgb,
    Rgba,
    Argb,
    Bgr,
    Bgra,
    Abgr,
    Gbr,
    Gbra,
    Agbr,
    Grb,
    Grba,
    Agrb,
}

impl PixelFormat {
    /// Every supported format.
    pub const ALL: [PixelFormat; 12] = [
        Self::Rgb,
        Self::Rgba,
        Self::Argb,
        Self::Bgr,
        Self::Bgra,
        Self::Abgr,
        Self::Gbr,
        Self::Gbra,
        Self::Agbr,
        Self::Grb,
        Self::Grba,
        Self::Agrb,
    ];

    /// Channels in the order their bytes appear.
    pub const fn channels(self) -> &'static [Channel] {
        use Channel::*;
        match self {
            Self::Rgb => &[Red, Green, Blue],
            Self::Rgba => &[Red, Green, Blue, Alpha],
            Self::Argb => &[Alpha, Red, Green, Blue],
            Self::Bgr => &[Blue, Green, Red],
            Self::Bgra => &[Blue, Green, Red, Alpha],
            Self::Abgr => &[Alpha, Blue, Green, Red],
            Self::Gbr => &[Green, Blue, Red],
            Self::Gbra => &[Green, Blue, Red, Alpha],
            Self::Agbr => &[Alpha, Green, Blue, Red],
            Self::Grb => &[Green, Red, Blue],
            Self::Grba => &[Green, Red, Blue, Alpha],
            Self::Agrb => &[Alpha, Green, Red, Blue],
        }
    }

    /// Bytes per pixel.
    pub const fn size(self) -> usize {
        self.channels().len()
    }

    /// Whether the format stores alpha.
    pub const fn has_alpha(self) -> bool {
        self.size() == 4
    }

    /// The format's tag, e.g. `"BGRA"`.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Rgb => "RGB",
            Self::Rgba => "RGBA",
            Self::Argb => "ARGB",
            Self::Bgr => "BGR",
            Self::Bgra => "BGRA",
            Self::Abgr => "ABGR",
            Self::Gbr => "GBR",
            Self::Gbra => "GBRA",
            Self::Agbr => "AGBR",
            Self::Grb => "GRB",
            Self::Grba => "GRBA",
            Self::Agrb => "AGRB",
        }
    }

    /// Decodes one pixel from exactly [`size`](Self::size) bytes.
    pub(crate) fn unpack(self, raw: &[u8]) -> Color {
        let mut color = Color::default();
        for (&channel, &byte) in self.channels().iter().zip(raw) {
            *color.channel_mut(channel) = byte;
        }
        color
    }

    /// Encodes one pixel into exactly [`size`](Self::size) bytes.
    pub(crate) fn pack(self, color: Color, out: &mut [u8]) {
        for (&channel, byte) in self.channels().iter().zip(out) {
            *byte = color.channel(channel);
        }
    }
}

impl FromStr for PixelFormat {
    type Err = Error;

    fn from_str(tag: &str) -> Result<Self, Error> {
        Self::ALL
            .into_iter()
            .find(|f| f.tag() == tag)
            .ok_or_else(|| {
                tracing::debug!(tag, "unsupported pixel format");
                Error::UnsupportedFormat(tag.to_string())
            })
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
