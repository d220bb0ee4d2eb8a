use std::str::FromStr;
use std::{error, fmt};

/// An 8-bit per component RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorU8 {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

/// Opaque black, the default text color
pub const BLACK: ColorU8 = ColorU8::from_rgb(0, 0, 0);
/// Opaque red
pub const RED: ColorU8 = ColorU8::from_rgb(255, 0, 0);

impl Default for ColorU8 {
    fn default() -> Self {
        BLACK
    }
}

impl ColorU8 {
    /// Build an opaque color
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        ColorU8 { r, g, b, a: 255 }
    }

    /// Build a color with alpha
    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        ColorU8 { r, g, b, a }
    }

    /// The RGBA components
    pub const fn rgba(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

const fn hex_to_u8(hex: u8) -> Result<u8, ParseError> {
    match hex {
        b'0'..=b'9' => Ok(hex - b'0'),
        b'a'..=b'f' => Ok(hex - b'a' + 10),
        b'A'..=b'F' => Ok(hex - b'A' + 10),
        _ => Err(ParseError::InvalidHex),
    }
}

const fn hex_pair(hi: u8, lo: u8) -> Result<u8, ParseError> {
    match (hex_to_u8(hi), hex_to_u8(lo)) {
        (Ok(hi), Ok(lo)) => Ok(hi << 4 | lo),
        _ => Err(ParseError::InvalidHex),
    }
}

const fn hex_single(c: u8) -> Result<u8, ParseError> {
    hex_pair(c, c)
}

const fn parse_hex(hex: &[u8]) -> Result<ColorU8, ParseError> {
    if hex.is_empty() || hex[0] != b'#' {
        return Err(ParseError::InvalidFormat);
    }
    let comps = match hex.len() {
        4 => [hex_single(hex[1]), hex_single(hex[2]), hex_single(hex[3]), Ok(255)],
        5 => [
            hex_single(hex[1]),
            hex_single(hex[2]),
            hex_single(hex[3]),
            hex_single(hex[4]),
        ],
        7 => [
            hex_pair(hex[1], hex[2]),
            hex_pair(hex[3], hex[4]),
            hex_pair(hex[5], hex[6]),
            Ok(255),
        ],
        9 => [
            hex_pair(hex[1], hex[2]),
            hex_pair(hex[3], hex[4]),
            hex_pair(hex[5], hex[6]),
            hex_pair(hex[7], hex[8]),
        ],
        _ => return Err(ParseError::InvalidHex),
    };
    match comps {
        [Ok(r), Ok(g), Ok(b), Ok(a)] => Ok(ColorU8::from_rgba(r, g, b, a)),
        _ => Err(ParseError::InvalidHex),
    }
}

fn named(name: &str) -> Option<ColorU8> {
    let c = match name.to_ascii_lowercase().as_str() {
        "black" => BLACK,
        "white" => ColorU8::from_rgb(255, 255, 255),
        "red" => RED,
        "green" => ColorU8::from_rgb(0, 255, 0),
        "blue" => ColorU8::from_rgb(0, 0, 255),
        "yellow" => ColorU8::from_rgb(255, 255, 0),
        "cyan" | "aqua" => ColorU8::from_rgb(0, 255, 255),
        "magenta" | "fuchsia" => ColorU8::from_rgb(255, 0, 255),
        "gray" | "grey" => ColorU8::from_rgb(0x88, 0x88, 0x88),
        "lightgray" | "lightgrey" => ColorU8::from_rgb(0xcc, 0xcc, 0xcc),
        "darkgray" | "darkgrey" => ColorU8::from_rgb(0x44, 0x44, 0x44),
        "lime" => ColorU8::from_rgb(0, 255, 0),
        "maroon" => ColorU8::from_rgb(0x80, 0, 0),
        "navy" => ColorU8::from_rgb(0, 0, 0x80),
        "olive" => ColorU8::from_rgb(0x80, 0x80, 0),
        "purple" => ColorU8::from_rgb(0x80, 0, 0x80),
        "silver" => ColorU8::from_rgb(0xc0, 0xc0, 0xc0),
        "teal" => ColorU8::from_rgb(0, 0x80, 0x80),
        _ => return None,
    };
    Some(c)
}

/// Color parsing error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// Neither a known color name nor a `#` prefixed hex literal
    InvalidFormat,
    /// Wrong length or non hex digit
    InvalidHex,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::InvalidFormat => write!(f, "invalid color format"),
            ParseError::InvalidHex => write!(f, "invalid hex color"),
        }
    }
}

impl error::Error for ParseError {}

impl FromStr for ColorU8 {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(c) = named(s) {
            return Ok(c);
        }
        parse_hex(s.as_bytes())
    }
}
