//! Glyph widths for the PDF base-14 Times faces.
//!
//! Widths are in 1/1000 em, indexed by WinAnsi code, taken from the Adobe
//! AFM files. Codes WinAnsi leaves undefined carry width 0 and are never
//! produced by [`encode_win_ansi`].

use tracing::warn;

/// Byte written for characters WinAnsi cannot represent.
const REPLACEMENT: u8 = b'?';

/// Times-Roman, codes 0x20..=0x7E.
const TIMES_ROMAN: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278, // sp .. /
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, // 0-9
    278, 278, 564, 564, 564, 444, 921, // : .. @
    722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, // A-M
    722, 722, 556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, // N-Z
    333, 278, 333, 469, 500, 333, // [ .. `
    444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, // a-m
    500, 500, 500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, // n-z
    480, 200, 480, 541, // { .. ~
];

/// Times-Bold, codes 0x20..=0x7E.
const TIMES_BOLD: [u16; 95] = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278, // sp .. /
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, // 0-9
    333, 333, 570, 570, 570, 500, 930, // : .. @
    722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944, // A-M
    722, 778, 611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667, // N-Z
    333, 278, 333, 581, 500, 333, // [ .. `
    500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833, // a-m
    556, 500, 556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444, // n-z
    394, 220, 394, 520, // { .. ~
];

/// Times-Roman, codes 0x80..=0xFF.
const TIMES_ROMAN_HIGH: [u16; 128] = [
    500, 0, 333, 500, 444, 1000, 500, 500, 333, 1000, 556, 333, 889, 0, 611, 0, // € .. Ž
    0, 333, 333, 444, 444, 350, 500, 1000, 333, 980, 389, 333, 722, 0, 444, 722, // ‘ .. Ÿ
    250, 333, 500, 500, 500, 500, 200, 500, 333, 760, 276, 500, 564, 333, 760, 333, // nbsp .. ¯
    400, 564, 300, 300, 333, 500, 453, 250, 333, 300, 310, 500, 750, 750, 750, 444, // ° .. ¿
    722, 722, 722, 722, 722, 722, 889, 667, 611, 611, 611, 611, 333, 333, 333, 333, // À .. Ï
    722, 722, 722, 722, 722, 722, 722, 564, 722, 722, 722, 722, 722, 722, 556, 500, // Ð .. ß
    444, 444, 444, 444, 444, 444, 667, 444, 444, 444, 444, 444, 278, 278, 278, 278, // à .. ï
    500, 500, 500, 500, 500, 500, 500, 564, 500, 500, 500, 500, 500, 500, 500, 500, // ð .. ÿ
];

/// Times-Bold, codes 0x80..=0xFF.
const TIMES_BOLD_HIGH: [u16; 128] = [
    500, 0, 333, 500, 500, 1000, 500, 500, 333, 1000, 556, 333, 1000, 0, 667, 0, // € .. Ž
    0, 333, 333, 500, 500, 350, 500, 1000, 333, 1000, 389, 333, 722, 0, 444, 722, // ‘ .. Ÿ
    250, 333, 500, 500, 500, 500, 220, 500, 333, 747, 300, 500, 570, 333, 747, 333, // nbsp .. ¯
    400, 570, 300, 300, 333, 556, 540, 250, 333, 300, 330, 500, 750, 750, 750, 500, // ° .. ¿
    722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 389, 389, 389, 389, // À .. Ï
    722, 722, 778, 778, 778, 778, 778, 570, 778, 722, 722, 722, 722, 722, 611, 556, // Ð .. ß
    500, 500, 500, 500, 500, 500, 722, 444, 444, 444, 444, 444, 278, 278, 278, 278, // à .. ï
    500, 556, 500, 500, 500, 500, 500, 570, 500, 556, 556, 556, 556, 500, 556, 500, // ð .. ÿ
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
}

impl FontStyle {
    /// Resource name used in page content streams.
    pub fn resource_name(&self) -> &'static str {
        match self {
            FontStyle::Regular => "F1",
            FontStyle::Bold => "F2",
        }
    }

    pub fn base_font(&self) -> &'static str {
        match self {
            FontStyle::Regular => "Times-Roman",
            FontStyle::Bold => "Times-Bold",
        }
    }

    /// Width of one WinAnsi code in 1/1000 em. Control codes are zero.
    pub fn glyph_width(&self, code: u8) -> u16 {
        let (low, high) = match self {
            FontStyle::Regular => (&TIMES_ROMAN, &TIMES_ROMAN_HIGH),
            FontStyle::Bold => (&TIMES_BOLD, &TIMES_BOLD_HIGH),
        };
        match code {
            0x20..=0x7E => low[(code - 0x20) as usize],
            0x80..=0xFF => high[(code - 0x80) as usize],
            _ => 0,
        }
    }

    /// Width of an encoded string in points at `size`.
    pub fn measure(&self, encoded: &[u8], size: f32) -> f32 {
        let units: u32 = encoded.iter().map(|&b| u32::from(self.glyph_width(b))).sum();
        units as f32 * size / 1000.0
    }
}

/// WinAnsi (cp1252) code for `c`, if it has one.
pub fn win_ansi_code(c: char) -> Option<u8> {
    let code = match c {
        ' '..='~' | '\u{A0}'..='\u{FF}' => c as u32 as u8,
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => return None,
    };
    Some(code)
}

/// Encode text for a WinAnsi simple font. Control characters are dropped
/// and unmappable characters become `?`; see [`unsupported_chars`].
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .filter(|c| !c.is_control())
        .map(|c| win_ansi_code(c).unwrap_or(REPLACEMENT))
        .collect()
}

/// Distinct printable characters of `text` that [`encode_win_ansi`] has to
/// replace, in order of first appearance.
pub fn unsupported_chars(text: &str) -> Vec<char> {
    let mut found: Vec<char> = Vec::new();
    for c in text.chars().filter(|c| !c.is_control()) {
        if win_ansi_code(c).is_none() && !found.contains(&c) {
            found.push(c);
        }
    }
    if !found.is_empty() {
        warn!("{} character(s) cannot be encoded for the PDF: {:?}", found.len(), found);
    }
    found
}
