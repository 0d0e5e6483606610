//! Content stream rendering for pages.

use crate::colour::Colour;
use crate::font::Font;
use crate::page::{PageContents, PathLayout, PathPaint, Shape, SpanFont, SpanLayout};
use crate::units::Pt;
use id_arena::Arena;
use std::io::Write;

/// Control point distance for approximating a quarter circle with one cubic bezier
const KAPPA: f32 = 0.552_284_8;

/// Renders page contents to a PDF content stream, converting high-level content items
/// into low-level PDF operators.
#[allow(clippy::write_with_newline)]
pub(crate) fn render_contents(
    contents: &[PageContents],
    fonts: &Arena<Font>,
) -> Result<Vec<u8>, std::io::Error> {
    if contents.is_empty() {
        return Ok(Vec::default());
    }

    let mut content: Vec<u8> = Vec::default();

    for page_content in contents.iter() {
        match page_content {
            PageContents::Text(spans) => {
                render_text_spans(&mut content, spans, fonts)?;
            }
            PageContents::Path(path) => {
                render_path(&mut content, path)?;
            }
            PageContents::Image(image) => {
                write!(&mut content, "q\n")?;
                write!(
                    &mut content,
                    "{} 0 0 {} {} {} cm\n",
                    image.position.width(),
                    image.position.height(),
                    image.position.x1,
                    image.position.y1
                )?;
                write!(&mut content, "/I{} Do\n", image.image.index())?;
                write!(&mut content, "Q\n")?;
            }
        }
    }

    Ok(content)
}

#[allow(clippy::write_with_newline)]
fn render_text_spans(
    content: &mut Vec<u8>,
    spans: &[SpanLayout],
    fonts: &Arena<Font>,
) -> Result<(), std::io::Error> {
    let Some(first) = spans.first() else {
        return Ok(());
    };

    write!(content, "q\n")?;

    let mut current_font: SpanFont = first.font;
    let mut current_colour: Colour = first.colour;

    write!(
        content,
        "/F{} {} Tf\n",
        current_font.id.index(),
        current_font.size
    )?;
    current_colour.write_fill(content)?;

    for span in spans.iter() {
        if span.font != current_font {
            current_font = span.font;
            write!(
                content,
                "/F{} {} Tf\n",
                current_font.id.index(),
                current_font.size
            )?;
        }
        if span.colour != current_colour {
            current_colour = span.colour;
            current_colour.write_fill(content)?;
        }

        let Some(font) = fonts.get(current_font.id) else {
            log::warn!("span refers to a font that is not in the document, skipping it");
            continue;
        };

        write!(content, "BT\n")?;
        write!(content, "{} {} Td\n", span.coords.0, span.coords.1)?;
        write!(content, "<")?;
        for byte in font.encode(&span.text) {
            write!(content, "{byte:02x}")?;
        }
        write!(content, "> Tj\n")?;
        write!(content, "ET\n")?;
    }

    write!(content, "Q\n")?;
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn render_path(content: &mut Vec<u8>, path: &PathLayout) -> Result<(), std::io::Error> {
    write!(content, "q\n")?;
    match path.paint {
        PathPaint::Stroke { colour, width } => {
            write!(content, "{width} w\n")?;
            colour.write_stroke(content)?;
        }
        PathPaint::Fill { colour } => colour.write_fill(content)?,
    }

    match &path.shape {
        Shape::Line { from, to } => {
            write!(content, "{} {} m\n", from.0, from.1)?;
            write!(content, "{} {} l\n", to.0, to.1)?;
        }
        Shape::Rect(rect) => {
            write!(
                content,
                "{} {} {} {} re\n",
                rect.x1,
                rect.y1,
                rect.width(),
                rect.height()
            )?;
        }
        Shape::RoundedRect { rect, radius } => {
            let half = (rect.width().abs().min(rect.height().abs())) / 2.0;
            let r = radius.min(half).max(Pt(0.0));
            let k = r * KAPPA;
            let (x1, y1, x2, y2) = (rect.x1, rect.y1, rect.x2, rect.y2);

            write!(content, "{} {} m\n", x1 + r, y1)?;
            write!(content, "{} {} l\n", x2 - r, y1)?;
            write!(
                content,
                "{} {} {} {} {} {} c\n",
                x2 - r + k,
                y1,
                x2,
                y1 + r - k,
                x2,
                y1 + r
            )?;
            write!(content, "{} {} l\n", x2, y2 - r)?;
            write!(
                content,
                "{} {} {} {} {} {} c\n",
                x2,
                y2 - r + k,
                x2 - r + k,
                y2,
                x2 - r,
                y2
            )?;
            write!(content, "{} {} l\n", x1 + r, y2)?;
            write!(
                content,
                "{} {} {} {} {} {} c\n",
                x1 + r - k,
                y2,
                x1,
                y2 - r + k,
                x1,
                y2 - r
            )?;
            write!(content, "{} {} l\n", x1, y1 + r)?;
            write!(
                content,
                "{} {} {} {} {} {} c\n",
                x1,
                y1 + r - k,
                x1 + r - k,
                y1,
                x1 + r,
                y1
            )?;
            write!(content, "h\n")?;
        }
    }

    match path.paint {
        PathPaint::Stroke { .. } => write!(content, "S\n")?,
        PathPaint::Fill { .. } => write!(content, "f\n")?,
    }
    write!(content, "Q\n")?;
    Ok(())
}
