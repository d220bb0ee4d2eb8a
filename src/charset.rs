//! Mapping of letters and digits to the Unicode mathematical alphanumeric symbols.

use crate::atom::FontStyle;

const GREEK_LOWER: std::ops::RangeInclusive<char> = '\u{03B1}'..='\u{03C9}';
const GREEK_CAPITAL: std::ops::RangeInclusive<char> = '\u{0391}'..='\u{03A9}';

/// epsilon, vartheta, varkappa, phi, varrho, varpi,
/// in the order they follow the Greek alphabets of each style
const GREEK_SYMBOLS: [char; 6] = [
    '\u{03F5}', '\u{03D1}', '\u{03F0}', '\u{03D5}', '\u{03F1}', '\u{03D6}',
];

const PLANCK: u32 = 0x210E;

/// First code points of a styled alphabet, `0` where the style has none
struct Alphabet {
    upper: u32,
    lower: u32,
    greek_upper: u32,
    greek_lower: u32,
    greek_symbol: u32,
    digit: u32,
}

const ITALIC: Alphabet = Alphabet {
    upper: 0x1D434,
    lower: 0x1D44E,
    greek_upper: 0x1D6E2,
    greek_lower: 0x1D6FC,
    greek_symbol: 0x1D716,
    digit: 0,
};

const BOLD: Alphabet = Alphabet {
    upper: 0x1D400,
    lower: 0x1D41A,
    greek_upper: 0x1D6A8,
    greek_lower: 0x1D6C2,
    greek_symbol: 0x1D6DC,
    digit: 0x1D7CE,
};

const BOLD_ITALIC: Alphabet = Alphabet {
    upper: 0x1D468,
    lower: 0x1D482,
    greek_upper: 0x1D71C,
    greek_lower: 0x1D736,
    greek_symbol: 0x1D750,
    // no bold italic digits, bold ones are used
    digit: 0x1D7CE,
};

const CALIGRAPHIC_UPPER: u32 = 0x1D49C;
const TYPEWRITER: (u32, u32, u32) = (0x1D670, 0x1D68A, 0x1D7F6);
const SANS_SERIF: (u32, u32, u32) = (0x1D5A0, 0x1D5BA, 0x1D7E2);
const FRAKTUR: (u32, u32) = (0x1D504, 0x1D51E);
const BLACKBOARD: (u32, u32, u32) = (0x1D538, 0x1D552, 0x1D7D8);

fn offset(ch: char, start: char) -> u32 {
    ch as u32 - start as u32
}

fn from_code(code: u32, fallback: char) -> char {
    char::from_u32(code).unwrap_or(fallback)
}

fn greek_symbol_order(ch: char) -> Option<u32> {
    GREEK_SYMBOLS.iter().position(|&c| c == ch).map(|i| i as u32)
}

fn alphabet(ch: char, a: &Alphabet) -> Option<char> {
    let code = match ch {
        'A'..='Z' => a.upper + offset(ch, 'A'),
        'a'..='z' => a.lower + offset(ch, 'a'),
        _ if GREEK_CAPITAL.contains(&ch) => a.greek_upper + offset(ch, *GREEK_CAPITAL.start()),
        _ if GREEK_LOWER.contains(&ch) => a.greek_lower + offset(ch, *GREEK_LOWER.start()),
        '0'..='9' if a.digit != 0 => a.digit + offset(ch, '0'),
        _ => a.greek_symbol + greek_symbol_order(ch)?,
    };
    Some(from_code(code, ch))
}

fn latin_and_digits(ch: char, (upper, lower, digit): (u32, u32, u32)) -> Option<char> {
    let code = match ch {
        'A'..='Z' => upper + offset(ch, 'A'),
        'a'..='z' => lower + offset(ch, 'a'),
        '0'..='9' => digit + offset(ch, '0'),
        _ => return None,
    };
    Some(from_code(code, ch))
}

fn italic(ch: char) -> char {
    if ch == 'h' {
        return from_code(PLANCK, ch);
    }
    alphabet(ch, &ITALIC).unwrap_or(ch)
}

fn default_style(ch: char) -> char {
    let italicized = ch.is_ascii_alphabetic()
        || GREEK_LOWER.contains(&ch)
        || greek_symbol_order(ch).is_some();
    if italicized { italic(ch) } else { ch }
}

fn caligraphic(ch: char) -> char {
    let code = match ch {
        'B' => 0x212C,
        'E' => 0x2130,
        'F' => 0x2131,
        'H' => 0x210B,
        'I' => 0x2110,
        'L' => 0x2112,
        'M' => 0x2133,
        'R' => 0x211B,
        'e' => 0x212F,
        'g' => 0x210A,
        'o' => 0x2134,
        'A'..='Z' => CALIGRAPHIC_UPPER + offset(ch, 'A'),
        // no lowercase, greek or digits
        _ => return default_style(ch),
    };
    from_code(code, ch)
}

fn fraktur(ch: char) -> char {
    let code = match ch {
        'C' => 0x212D,
        'H' => 0x210C,
        'I' => 0x2111,
        'R' => 0x211C,
        'Z' => 0x2128,
        'A'..='Z' => FRAKTUR.0 + offset(ch, 'A'),
        'a'..='z' => FRAKTUR.1 + offset(ch, 'a'),
        _ => return default_style(ch),
    };
    from_code(code, ch)
}

fn blackboard(ch: char) -> char {
    let code = match ch {
        'C' => 0x2102,
        'H' => 0x210D,
        'N' => 0x2115,
        'P' => 0x2119,
        'Q' => 0x211A,
        'R' => 0x211D,
        'Z' => 0x2124,
        _ => return latin_and_digits(ch, BLACKBOARD).unwrap_or_else(|| default_style(ch)),
    };
    from_code(code, ch)
}

/// The styled variant of a character.
/// Characters without a variant in `style` get the default style,
/// and characters unknown to the default style are returned unchanged.
pub fn style_char(ch: char, style: FontStyle) -> char {
    match style {
        FontStyle::Default => default_style(ch),
        FontStyle::Roman => ch,
        FontStyle::Bold => alphabet(ch, &BOLD).unwrap_or(ch),
        FontStyle::Italic => italic(ch),
        FontStyle::BoldItalic => alphabet(ch, &BOLD_ITALIC).unwrap_or(ch),
        FontStyle::Caligraphic => caligraphic(ch),
        FontStyle::Typewriter => {
            latin_and_digits(ch, TYPEWRITER).unwrap_or_else(|| default_style(ch))
        }
        FontStyle::SansSerif => {
            latin_and_digits(ch, SANS_SERIF).unwrap_or_else(|| default_style(ch))
        }
        FontStyle::Fraktur => fraktur(ch),
        FontStyle::Blackboard => blackboard(ch),
    }
}

/// Apply [`style_char`] to every character of `s`
pub fn change_font(s: &str, style: FontStyle) -> String {
    s.chars().map(|c| style_char(c, style)).collect()
}
