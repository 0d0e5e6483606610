//! The drawing surface the layout engine talks to.
//!
//! [Canvas] is the narrow set of primitives the flow engine and the debtor renderers
//! need. [PdfCanvas] implements it on top of [Document], placing everything on the
//! current page and opening new pages on request.

use crate::{
    colour::{colours, Colour},
    document::Document,
    font::{Font, StandardFont},
    image::Image,
    layout::{parse_markup, PageMetrics},
    page::{ImageLayout, Page, PathLayout, PathPaint, Shape, SpanFont, SpanLayout},
    rect::Rect,
    units::Pt,
};
use id_arena::Id;

/// Primitive drawing operations. Coordinates are PDF user space in points with the
/// origin at the bottom left of the page; `y` is the text baseline for text.
pub trait Canvas {
    /// Geometry of the pages this canvas produces
    fn metrics(&self) -> &PageMetrics;

    /// Width of `markup` at `size`, with bold runs measured in the bold font and the
    /// tags themselves taking no room
    fn text_width(&self, size: Pt, markup: &str) -> Pt;

    /// Draw a single line of text in the current colour. `<b>..</b>` switches to bold.
    fn draw_text(&mut self, x: Pt, y: Pt, size: Pt, markup: &str);

    fn draw_line(&mut self, x1: Pt, y1: Pt, x2: Pt, y2: Pt);

    /// Stroke the outline of a rectangle given by its lower-left corner and size
    fn draw_rect(&mut self, x: Pt, y: Pt, width: Pt, height: Pt);

    fn fill_rect(&mut self, x: Pt, y: Pt, width: Pt, height: Pt);

    fn draw_rounded_rect(&mut self, x: Pt, y: Pt, width: Pt, height: Pt, radius: Pt);

    fn set_line_width(&mut self, width: Pt);

    /// Colour for subsequent text, strokes and fills
    fn set_colour(&mut self, colour: Colour);

    /// Finish the current page and start a new one, optionally drawing the page
    /// header on it. Returns the y coordinate where content starts on the new page.
    fn new_page(&mut self, repeat_header: bool) -> Pt;

    /// Where content starts on the current page
    fn content_top(&self) -> Pt;

    fn page_count(&self) -> usize;
}

/// A [Canvas] that builds a [Document]
pub struct PdfCanvas {
    document: Document,
    metrics: PageMetrics,
    regular: Id<Font>,
    bold: Id<Font>,
    header: Option<Id<Image>>,
    current_page: usize,
    content_top: Pt,
    line_width: Pt,
    colour: Colour,
}

impl PdfCanvas {
    /// A canvas using the built-in Helvetica fonts. The first page is opened right away,
    /// with the header image on it when one is given.
    pub fn new(metrics: PageMetrics, header: Option<Image>) -> PdfCanvas {
        PdfCanvas::with_fonts(
            metrics,
            Font::standard(StandardFont::Helvetica),
            Font::standard(StandardFont::HelveticaBold),
            header,
        )
    }

    /// Like [PdfCanvas::new], drawing with the given regular and bold fonts
    pub fn with_fonts(
        metrics: PageMetrics,
        regular: Font,
        bold: Font,
        header: Option<Image>,
    ) -> PdfCanvas {
        let mut document = Document::default();
        let regular = document.add_font(regular);
        let bold = document.add_font(bold);
        let header = header.map(|image| document.add_image(image));

        let mut canvas = PdfCanvas {
            document,
            metrics,
            regular,
            bold,
            header,
            current_page: 0,
            content_top: Pt(0.0),
            line_width: Pt(1.0),
            colour: colours::BLACK,
        };
        canvas.open_page(true);
        canvas
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Stop drawing and hand over the document for writing
    pub fn into_document(self) -> Document {
        self.document
    }

    fn open_page(&mut self, with_header: bool) -> Pt {
        let page = Page::new(self.metrics.page_size, &self.metrics.margins);
        self.document.add_page(page);
        self.current_page = self.document.page_count() - 1;

        let top = self.metrics.page_height() - self.metrics.margin_top();
        self.content_top = match (with_header, self.header) {
            (true, Some(image)) => {
                self.draw_header(image, top);
                top - self.metrics.header_height
            }
            _ => top,
        };
        self.content_top
    }

    /// Header images are scaled to the header height and aligned to the right margin
    fn draw_header(&mut self, image: Id<Image>, top: Pt) {
        let height = self.metrics.header_height;
        let aspect = self
            .document
            .images
            .get(image)
            .map(Image::aspect_ratio)
            .unwrap_or(1.0);
        let width = (height * aspect).min(self.metrics.content_width());
        let x = self.metrics.right_margin_position() - width;

        self.page().add_image(ImageLayout {
            image,
            position: Rect::from_origin(x, top - height, width, height),
        });
    }

    fn page(&mut self) -> &mut Page {
        let id = self.document.page_order[self.current_page];
        &mut self.document.pages[id]
    }

    fn stroke(&mut self, shape: Shape) {
        let paint = PathPaint::Stroke {
            colour: self.colour,
            width: self.line_width,
        };
        self.page().add_path(PathLayout { shape, paint });
    }

    fn font(&self, bold: bool) -> Id<Font> {
        if bold {
            self.bold
        } else {
            self.regular
        }
    }
}

impl Canvas for PdfCanvas {
    fn metrics(&self) -> &PageMetrics {
        &self.metrics
    }

    fn text_width(&self, size: Pt, markup: &str) -> Pt {
        parse_markup(markup)
            .into_iter()
            .map(|run| self.document.fonts[self.font(run.bold)].width_of_text(run.text, size))
            .sum()
    }

    fn draw_text(&mut self, x: Pt, y: Pt, size: Pt, markup: &str) {
        let mut x = x;
        for run in parse_markup(markup) {
            let id = self.font(run.bold);
            let width = self.document.fonts[id].width_of_text(run.text, size);
            let span = SpanLayout {
                text: run.text.to_string(),
                font: SpanFont { id, size },
                colour: self.colour,
                coords: (x, y),
            };
            self.page().add_span(span);
            x += width;
        }
    }

    fn draw_line(&mut self, x1: Pt, y1: Pt, x2: Pt, y2: Pt) {
        self.stroke(Shape::Line {
            from: (x1, y1),
            to: (x2, y2),
        });
    }

    fn draw_rect(&mut self, x: Pt, y: Pt, width: Pt, height: Pt) {
        self.stroke(Shape::Rect(Rect::from_origin(x, y, width, height)));
    }

    fn fill_rect(&mut self, x: Pt, y: Pt, width: Pt, height: Pt) {
        let path = PathLayout {
            shape: Shape::Rect(Rect::from_origin(x, y, width, height)),
            paint: PathPaint::Fill {
                colour: self.colour,
            },
        };
        self.page().add_path(path);
    }

    fn draw_rounded_rect(&mut self, x: Pt, y: Pt, width: Pt, height: Pt, radius: Pt) {
        self.stroke(Shape::RoundedRect {
            rect: Rect::from_origin(x, y, width, height),
            radius,
        });
    }

    fn set_line_width(&mut self, width: Pt) {
        self.line_width = width;
    }

    fn set_colour(&mut self, colour: Colour) {
        self.colour = colour;
    }

    fn new_page(&mut self, repeat_header: bool) -> Pt {
        self.open_page(repeat_header)
    }

    fn content_top(&self) -> Pt {
        self.content_top
    }

    fn page_count(&self) -> usize {
        self.document.page_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, RgbImage};

    fn logo() -> Image {
        Image::from_image(DynamicImage::ImageRgb8(RgbImage::new(200, 100)))
    }

    #[test]
    fn content_starts_below_the_header() {
        let metrics = PageMetrics::default();
        let top = metrics.page_height() - metrics.margin_top();

        let plain = PdfCanvas::new(metrics.clone(), None);
        assert_eq!(plain.content_top(), top);

        let mut branded = PdfCanvas::new(metrics.clone(), Some(logo()));
        assert_eq!(branded.content_top(), top - metrics.header_height);
        assert_eq!(branded.new_page(false), top);
        assert_eq!(branded.new_page(true), top - metrics.header_height);
        assert_eq!(branded.page_count(), 3);
    }

    #[test]
    fn bold_runs_are_measured_and_drawn_in_the_bold_font() {
        let mut canvas = PdfCanvas::new(PageMetrics::default(), None);
        let plain = canvas.text_width(Pt(10.0), "Total");
        let bold = canvas.text_width(Pt(10.0), "<b>Total</b>");
        assert!(bold > plain);

        canvas.draw_text(Pt(50.0), Pt(500.0), Pt(10.0), "Total <b>DKK</b>");
        let page = canvas.document().page(0).unwrap();
        let spans: Vec<_> = page.text_spans().collect();
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].text, "Total ");
        assert_eq!(spans[1].text, "DKK");
        assert_ne!(spans[0].font.id, spans[1].font.id);
        assert_eq!(
            spans[1].coords.0,
            Pt(50.0) + canvas.text_width(Pt(10.0), "Total ")
        );
    }

    #[test]
    fn shapes_carry_the_current_line_width_and_colour() {
        let mut canvas = PdfCanvas::new(PageMetrics::default(), None);
        canvas.set_line_width(Pt(0.5));
        canvas.set_colour(colours::BAND);
        canvas.draw_line(Pt(0.0), Pt(0.0), Pt(10.0), Pt(0.0));

        let page = canvas.document().page(0).unwrap();
        let path = page.paths().next().unwrap();
        assert_eq!(
            path.paint,
            PathPaint::Stroke {
                colour: colours::BAND,
                width: Pt(0.5)
            }
        );
    }
}
