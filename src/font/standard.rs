//! Metrics for the PDF standard fonts the debtor layout uses. Standard fonts are
//! never embedded; viewers supply the glyphs, so only advance widths (AFM, 1000
//! units per em) are needed to measure text.

/// One of the built-in PDF Type 1 fonts
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
}

#[rustfmt::skip]
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_ASCII: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Used for characters outside the tables
const FALLBACK_WIDTH: u16 = 556;

impl StandardFont {
    /// The PostScript name written as `BaseFont`
    pub fn base_name(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Advance width of `ch` in 1/1000 em
    pub fn char_width(&self, ch: char) -> u16 {
        let code = ch as u32;
        if (32..=126).contains(&code) {
            let index = (code - 32) as usize;
            return match self {
                StandardFont::Helvetica => HELVETICA_ASCII[index],
                StandardFont::HelveticaBold => HELVETICA_BOLD_ASCII[index],
            };
        }

        let bold = *self == StandardFont::HelveticaBold;
        match ch {
            '\u{a0}' => 278,
            'æ' | 'œ' => 889,
            'Æ' | 'Œ' | '—' | '‰' => 1000,
            'ø' | 'ß' => 611,
            'Ø' | 'Ö' | 'Ó' | 'Ô' => 778,
            'Å' | 'Ä' | 'Á' | 'À' if bold => 722,
            'Å' | 'Ä' | 'Á' | 'À' => 667,
            'É' | 'È' | 'Ë' => 667,
            'Ü' | 'Ú' => 722,
            'ö' | 'ó' | 'ü' | 'ú' | 'ñ' if bold => 611,
            'í' | 'ì' | 'ï' => 278,
            '°' => 400,
            '´' | '¨' => 333,
            '©' | '®' => 737,
            '×' | '±' => 584,
            '½' | '¼' => 834,
            '•' => 350,
            '…' => 1000,
            '‘' | '’' if bold => 278,
            '‘' | '’' => 222,
            '“' | '”' if bold => 500,
            '“' | '”' => 333,
            _ => FALLBACK_WIDTH,
        }
    }
}

/// Map a char onto its WinAnsi (Windows-1252) code, which is how standard fonts
/// are addressed in content streams
pub(crate) fn to_winansi(ch: char) -> Option<u8> {
    let code = ch as u32;
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(code as u8),
        _ => match ch {
            '€' => Some(0x80),
            '‚' => Some(0x82),
            'ƒ' => Some(0x83),
            '„' => Some(0x84),
            '…' => Some(0x85),
            '†' => Some(0x86),
            '‡' => Some(0x87),
            'ˆ' => Some(0x88),
            '‰' => Some(0x89),
            'Š' => Some(0x8A),
            '‹' => Some(0x8B),
            'Œ' => Some(0x8C),
            'Ž' => Some(0x8E),
            '‘' => Some(0x91),
            '’' => Some(0x92),
            '“' => Some(0x93),
            '”' => Some(0x94),
            '•' => Some(0x95),
            '–' => Some(0x96),
            '—' => Some(0x97),
            '˜' => Some(0x98),
            '™' => Some(0x99),
            'š' => Some(0x9A),
            '›' => Some(0x9B),
            'œ' => Some(0x9C),
            'ž' => Some(0x9E),
            'Ÿ' => Some(0x9F),
            _ => None,
        },
    }
}
