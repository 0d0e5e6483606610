use crate::{
    refs::{ObjectReferences, RefType},
    Error, Pt,
};
use id_arena::Id;
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use owned_ttf_parser::{AsFaceRef, GlyphId, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Filter, Finish, Name, Pdf, Ref, Str,
};
use std::collections::BTreeMap;

mod standard;
pub use standard::StandardFont;

enum Face {
    Standard(StandardFont),
    TrueType(OwnedFace),
}

/// A font the canvas can measure and draw with.
///
/// Standard fonts cost nothing to include: they are referenced by name and rendered by
/// the viewer. TrueType / OpenType fonts are embedded in their entirety (compressed), so
/// large fonts will noticeably grow the generated PDF.
///
/// Fonts are referred to from page contents by their [Id] within the
/// [Document](crate::Document).
pub struct Font {
    face: Face,
}

impl Font {
    /// Reference one of the built-in PDF fonts
    pub fn standard(font: StandardFont) -> Font {
        Font {
            face: Face::Standard(font),
        }
    }

    /// Load a TrueType / OpenType font from raw bytes, returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, Error> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        Ok(Font {
            face: Face::TrueType(face),
        })
    }

    fn units_per_em(&self) -> f32 {
        match &self.face {
            Face::Standard(_) => 1000.0,
            Face::TrueType(face) => face.as_face_ref().units_per_em() as f32,
        }
    }

    /// Calculate the width of a given string of text at the given font size. Newlines
    /// and characters the font cannot show do not count.
    pub fn width_of_text(&self, text: &str, size: Pt) -> Pt {
        let units: f32 = match &self.face {
            Face::Standard(font) => text
                .chars()
                .filter(|ch| !ch.is_control())
                .map(|ch| font.char_width(ch) as f32)
                .sum(),
            Face::TrueType(face) => {
                let face = face.as_face_ref();
                text.chars()
                    .filter_map(|ch| face.glyph_index(ch))
                    .map(|gid| face.glyph_hor_advance(gid).unwrap_or_default() as f32)
                    .sum()
            }
        };
        size * (units / self.units_per_em())
    }

    /// Encode text the way the content stream addresses this font: one WinAnsi byte per
    /// char for standard fonts, two-byte glyph ids for embedded fonts
    pub(crate) fn encode(&self, text: &str) -> Vec<u8> {
        match &self.face {
            Face::Standard(_) => text
                .chars()
                .map(|ch| standard::to_winansi(ch).unwrap_or(b'?'))
                .collect(),
            Face::TrueType(face) => {
                let face = face.as_face_ref();
                let fallback = face
                    .glyph_index('\u{FFFD}')
                    .or_else(|| face.glyph_index('?'))
                    .unwrap_or(GlyphId(0));
                text.chars()
                    .flat_map(|ch| {
                        let gid = face.glyph_index(ch).unwrap_or_else(|| {
                            log::debug!("no glyph for {ch:?}, using the replacement glyph");
                            fallback
                        });
                        gid.0.to_be_bytes()
                    })
                    .collect()
            }
        }
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, id: Id<Font>, writer: &mut Pdf) {
        let font_index = id.index();
        let font_id = refs.gen(RefType::Font(font_index));

        match &self.face {
            Face::Standard(font) => {
                writer
                    .type1_font(font_id)
                    .base_font(Name(font.base_name().as_bytes()))
                    .encoding_predefined(Name(b"WinAnsiEncoding"));
            }
            Face::TrueType(face) => {
                let glyphs = glyph_chars(face);
                let cid_font_id = write_cid(face, &glyphs, refs, font_index, writer);
                let to_unicode_id = write_to_unicode(&glyphs, refs, font_index, writer);

                let mut font = writer.type0_font(font_id);
                font.base_font(Name(format!("F{font_index}").as_bytes()));
                font.encoding_predefined(Name(b"Identity-H"));
                font.descendant_font(cid_font_id);
                font.to_unicode(to_unicode_id);
            }
        }
    }
}

/// Every glyph reachable from a unicode cmap subtable, with the first char that maps to it
fn glyph_chars(face: &OwnedFace) -> BTreeMap<u16, char> {
    let mut map: BTreeMap<u16, char> = BTreeMap::new();
    let Some(cmap) = face.as_face_ref().tables().cmap else {
        return map;
    };

    for subtable in cmap.subtables.into_iter().filter(|table| table.is_unicode()) {
        subtable.codepoints(|codepoint: u32| {
            if let (Ok(ch), Some(gid)) = (char::try_from(codepoint), subtable.glyph_index(codepoint))
            {
                if gid.0 > 0 {
                    map.entry(gid.0).or_insert(ch);
                }
            }
        });
    }

    map
}

fn write_cid(
    face: &OwnedFace,
    glyphs: &BTreeMap<u16, char>,
    refs: &mut ObjectReferences,
    font_index: usize,
    writer: &mut Pdf,
) -> Ref {
    let descriptor_id = write_descriptor(face, refs, font_index, writer);
    let id = refs.gen(RefType::CidFont(font_index));

    let face_ref = face.as_face_ref();
    let scaling = 1000.0 / face_ref.units_per_em() as f32;

    let mut cid_font = writer.cid_font(id);
    cid_font.subtype(CidFontType::Type2);
    cid_font.base_font(Name(format!("F{font_index}").as_bytes()));
    cid_font.system_info(SystemInfo {
        registry: Str(b"Adobe"),
        ordering: Str(b"Identity"),
        supplement: 0,
    });
    cid_font.font_descriptor(descriptor_id);
    cid_font.default_width(1000.0);

    let mut widths = cid_font.widths();
    for &gid in glyphs.keys() {
        let advance = face_ref.glyph_hor_advance(GlyphId(gid)).unwrap_or_default();
        widths.consecutive(gid, [advance as f32 * scaling]);
    }
    widths.finish();

    cid_font.cid_to_gid_map_predefined(Name(b"Identity"));
    id
}

fn write_descriptor(
    face: &OwnedFace,
    refs: &mut ObjectReferences,
    font_index: usize,
    writer: &mut Pdf,
) -> Ref {
    let data_id = refs.gen(RefType::FontData(font_index));
    let compressed = compress_to_vec_zlib(
        face.as_slice(),
        CompressionLevel::DefaultLevel as u8,
    );
    writer
        .stream(data_id, compressed.as_slice())
        .filter(Filter::FlateDecode)
        .pair(Name(b"Length1"), face.as_slice().len() as i32);

    let face_ref = face.as_face_ref();
    let scaling = 1000.0 / face_ref.units_per_em() as f32;
    let bbox = face_ref.global_bounding_box();

    let id = refs.gen(RefType::FontDescriptor(font_index));
    let mut descriptor = writer.font_descriptor(id);
    descriptor.name(Name(format!("F{font_index}").as_bytes()));

    let mut flags = FontFlags::NON_SYMBOLIC;
    if face_ref.is_monospaced() {
        flags.insert(FontFlags::FIXED_PITCH);
    }
    descriptor.flags(flags);
    descriptor.bbox(pdf_writer::Rect {
        x1: bbox.x_min as f32 * scaling,
        y1: bbox.y_min as f32 * scaling,
        x2: bbox.x_max as f32 * scaling,
        y2: bbox.y_max as f32 * scaling,
    });
    descriptor.italic_angle(0.0);
    descriptor.ascent(face_ref.ascender() as f32 * scaling);
    descriptor.descent(face_ref.descender() as f32 * scaling);
    descriptor.cap_height(
        face_ref
            .capital_height()
            .unwrap_or_else(|| face_ref.ascender()) as f32
            * scaling,
    );
    descriptor.stem_v(80.0);
    descriptor.font_file2(data_id);

    id
}

fn write_to_unicode(
    glyphs: &BTreeMap<u16, char>,
    refs: &mut ObjectReferences,
    font_index: usize,
    writer: &mut Pdf,
) -> Ref {
    let id = refs.gen(RefType::ToUnicode(font_index));

    let mut map = String::from(
        "/CIDInit /ProcSet findresource begin\n\
         12 dict begin\n\
         begincmap\n\
         /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
         /CMapName /Adobe-Identity-UCS def\n\
         /CMapType 2 def\n\
         1 begincodespacerange\n\
         <0000> <FFFF>\n\
         endcodespacerange\n",
    );

    // bfchar blocks are limited to 100 entries each
    let entries: Vec<(u16, char)> = glyphs.iter().map(|(&gid, &ch)| (gid, ch)).collect();
    for block in entries.chunks(100) {
        map.push_str(&format!("{} beginbfchar\n", block.len()));
        for (gid, ch) in block {
            let mut utf16 = [0u16; 2];
            let units: String = ch
                .encode_utf16(&mut utf16)
                .iter()
                .map(|unit| format!("{unit:04x}"))
                .collect();
            map.push_str(&format!("<{gid:04x}> <{units}>\n"));
        }
        map.push_str("endbfchar\n");
    }
    map.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");

    let compressed = compress_to_vec_zlib(map.as_bytes(), CompressionLevel::DefaultLevel as u8);
    writer
        .stream(id, compressed.as_slice())
        .filter(Filter::FlateDecode);

    id
}
