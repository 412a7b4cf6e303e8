/// Points per millimetre.
pub const K: f32 = 72.0 / 25.4;

/// Average glyph advance as a fraction of the font size.
pub const AVG_CHAR_WIDTH_EM: f32 = 0.5;

/// Bold/italic/underline flags decoded from a style variant string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FontVariant {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl FontVariant {
    pub fn parse(variant: &str) -> Self {
        let variant = variant.to_uppercase();
        Self {
            bold: variant.contains('B'),
            italic: variant.contains('I'),
            underline: variant.contains('U'),
        }
    }
}

/// Get the standard PDF font name for a family and variant,
/// e.g. `Helvetica-BoldOblique`.
pub fn get_styled_font_name(base_name: &str, variant: FontVariant) -> String {
    let mut name = base_name.to_string();
    if variant.bold || variant.italic {
        name.push('-');
        if variant.bold {
            name.push_str("Bold");
        }
        if variant.italic {
            name.push_str("Oblique");
        }
    }
    name
}

/// Millimetres to points.
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * K
}

/// Convert a top-down millimetre Y coordinate to PDF points (flip origin).
pub fn flip_y(y: f32, page_height: f32) -> f32 {
    (page_height - y) * K
}

/// Approximate width of `text` in millimetres at `font_size` points.
pub fn measure_text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * AVG_CHAR_WIDTH_EM / K
}

/// Characters at bytes 0x80..=0x9F of WinAnsiEncoding. `None` marks unused codes.
const WIN_ANSI_HIGH: [Option<char>; 32] = [
    Some('\u{20ac}'), None, Some('\u{201a}'), Some('\u{0192}'),
    Some('\u{201e}'), Some('\u{2026}'), Some('\u{2020}'), Some('\u{2021}'),
    Some('\u{02c6}'), Some('\u{2030}'), Some('\u{0160}'), Some('\u{2039}'),
    Some('\u{0152}'), None, Some('\u{017d}'), None,
    None, Some('\u{2018}'), Some('\u{2019}'), Some('\u{201c}'),
    Some('\u{201d}'), Some('\u{2022}'), Some('\u{2013}'), Some('\u{2014}'),
    Some('\u{02dc}'), Some('\u{2122}'), Some('\u{0161}'), Some('\u{203a}'),
    Some('\u{0153}'), None, Some('\u{017e}'), Some('\u{0178}'),
];

/// WinAnsi byte for `c`, if the encoding has one.
pub fn win_ansi_byte(c: char) -> Option<u8> {
    match c as u32 {
        code @ (0x00..=0x7F | 0xA0..=0xFF) => Some(code as u8),
        _ => WIN_ANSI_HIGH
            .iter()
            .position(|mapped| *mapped == Some(c))
            .map(|index| 0x80 + index as u8),
    }
}

/// Encodes text for a WinAnsi Type1 font. Characters the encoding lacks,
/// C1 controls included, become `?`; the flag reports whether any were replaced.
pub fn to_win_ansi(s: &str) -> (Vec<u8>, bool) {
    let mut replaced = false;
    let bytes = s
        .chars()
        .map(|c| {
            win_ansi_byte(c).unwrap_or_else(|| {
                replaced = true;
                b'?'
            })
        })
        .collect();
    (bytes, replaced)
}
