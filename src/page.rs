use crate::{
    colour::Colour,
    content::render_contents,
    font::Font,
    image::Image,
    layout::Margins,
    pagesize::PageSize,
    rect::Rect,
    refs::{ObjectReferences, RefType},
    units::Pt,
    Error,
};
use id_arena::{Arena, Id};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Name, Pdf, Ref};

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub id: Id<Font>,
    pub size: Pt,
}

/// A run of text drawn in one font, starting on the baseline at `coords`
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub font: SpanFont,
    pub colour: Colour,
    pub coords: (Pt, Pt),
}

#[derive(Clone, PartialEq, Debug)]
pub enum Shape {
    Line { from: (Pt, Pt), to: (Pt, Pt) },
    Rect(Rect),
    RoundedRect { rect: Rect, radius: Pt },
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub enum PathPaint {
    Stroke { colour: Colour, width: Pt },
    Fill { colour: Colour },
}

#[derive(Clone, PartialEq, Debug)]
pub struct PathLayout {
    pub shape: Shape,
    pub paint: PathPaint,
}

#[derive(Clone, PartialEq, Debug)]
pub struct ImageLayout {
    pub image: Id<Image>,
    pub position: Rect,
}

#[derive(Clone, PartialEq, Debug)]
pub enum PageContents {
    Text(Vec<SpanLayout>),
    Path(PathLayout),
    Image(ImageLayout),
}

pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// Where content can live, i.e. within the margins
    pub content_box: Rect,
    /// Everything drawn on the page, in painting order
    pub contents: Vec<PageContents>,
}

impl Page {
    pub fn new(size: PageSize, margins: &Margins) -> Page {
        let (width, height) = size;
        Page {
            media_box: Rect {
                x1: Pt(0.0),
                y1: Pt(0.0),
                x2: width,
                y2: height,
            },
            content_box: Rect {
                x1: margins.left,
                y1: margins.bottom,
                x2: width - margins.right,
                y2: height - margins.top,
            },
            contents: Vec::default(),
        }
    }

    /// Add a line of text. Spans are kept in one text object so the renderer only
    /// switches fonts when the next span needs another one
    pub fn add_span(&mut self, span: SpanLayout) {
        if let Some(PageContents::Text(spans)) = self.contents.last_mut() {
            spans.push(span);
        } else {
            self.contents.push(PageContents::Text(vec![span]));
        }
    }

    pub fn add_path(&mut self, path: PathLayout) {
        self.contents.push(PageContents::Path(path));
    }

    pub fn add_image(&mut self, image: ImageLayout) {
        self.contents.push(PageContents::Image(image));
    }

    /// Every text span on the page, in drawing order
    pub fn text_spans(&self) -> impl Iterator<Item = &SpanLayout> {
        self.contents
            .iter()
            .filter_map(|content| match content {
                PageContents::Text(spans) => Some(spans.iter()),
                _ => None,
            })
            .flatten()
    }

    /// Every path on the page, in drawing order
    pub fn paths(&self) -> impl Iterator<Item = &PathLayout> {
        self.contents.iter().filter_map(|content| match content {
            PageContents::Path(path) => Some(path),
            _ => None,
        })
    }

    /// Concatenated page text, one span per line, handy for searching the output
    pub fn plain_text(&self) -> String {
        self.text_spans()
            .map(|span| span.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        parent: Ref,
        fonts: &Arena<Font>,
        images: &Arena<Image>,
        writer: &mut Pdf,
        compress: bool,
    ) -> Result<(), Error> {
        let id = refs.get(RefType::Page(page_index)).ok_or(Error::PageMissing)?;
        let content_id = refs.gen(RefType::ContentForPage(page_index));

        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.art_box(self.content_box.into());
        page.parent(parent);

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for (font_id, _) in fonts.iter() {
            if let Some(font_ref) = refs.get(RefType::Font(font_id.index())) {
                resource_fonts.pair(Name(format!("F{}", font_id.index()).as_bytes()), font_ref);
            }
        }
        resource_fonts.finish();
        let mut resource_xobjects = resources.x_objects();
        for (image_id, _) in images.iter() {
            if let Some(image_ref) = refs.get(RefType::Image(image_id.index())) {
                resource_xobjects.pair(
                    Name(format!("I{}", image_id.index()).as_bytes()),
                    image_ref,
                );
            }
        }
        resource_xobjects.finish();
        resources.finish();

        page.contents(content_id);
        page.finish();

        let rendered = render_contents(&self.contents, fonts)?;
        if compress {
            let compressed =
                compress_to_vec_zlib(rendered.as_slice(), CompressionLevel::DefaultLevel as u8);
            writer
                .stream(content_id, compressed.as_slice())
                .filter(Filter::FlateDecode);
        } else {
            writer.stream(content_id, rendered.as_slice());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{colours, font::StandardFont, pagesize};

    #[test]
    fn content_box_sits_inside_the_margins() {
        let margins = Margins::trbl(Pt(40.0), Pt(30.0), Pt(50.0), Pt(20.0));
        let page = Page::new(pagesize::A4, &margins);
        assert_eq!(page.content_box.x1, Pt(20.0));
        assert_eq!(page.content_box.y1, Pt(50.0));
        assert_eq!(page.content_box.x2, pagesize::A4.0 - Pt(30.0));
        assert_eq!(page.content_box.y2, pagesize::A4.1 - Pt(40.0));
    }

    #[test]
    fn consecutive_spans_share_a_text_object() {
        let mut fonts: Arena<Font> = Arena::new();
        let font = fonts.alloc(Font::standard(StandardFont::Helvetica));
        let span = |text: &str| SpanLayout {
            text: text.into(),
            font: SpanFont {
                id: font,
                size: Pt(10.0),
            },
            colour: colours::BLACK,
            coords: (Pt(0.0), Pt(0.0)),
        };

        let mut page = Page::new(pagesize::A4, &Margins::all(Pt(10.0)));
        page.add_span(span("a"));
        page.add_span(span("b"));
        page.add_path(PathLayout {
            shape: Shape::Line {
                from: (Pt(0.0), Pt(0.0)),
                to: (Pt(1.0), Pt(0.0)),
            },
            paint: PathPaint::Stroke {
                colour: colours::BLACK,
                width: Pt(1.0),
            },
        });
        page.add_span(span("c"));

        assert_eq!(page.contents.len(), 3);
        assert_eq!(page.plain_text(), "a\nb\nc");
        assert_eq!(page.paths().count(), 1);
    }
}
