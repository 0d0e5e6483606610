//! Width-constrained line breaking driven by font metrics.
//!
//! Every function here hands back the text it did not draw, so callers loop until the
//! remainder is empty and can do their own work (bands, overflow checks) between lines.

use super::{markup::strip_markup, Flow};
use crate::{canvas::Canvas, units::Pt};

/// Split `text` into the longest prefix whose measured width fits in `width` and the
/// remainder.
///
/// Lines break after the last whitespace that fits. A word wider than the whole column
/// is broken between characters, and at least one character is always taken so callers
/// looping on the remainder make progress. The remainder has its leading whitespace
/// removed.
///
/// `text` is split as plain text. A `<b>` tag would be cut like any other word, so
/// markup has to be stripped before wrapping.
pub fn fit_line<'t, M>(measure: M, text: &'t str, width: Pt) -> (&'t str, &'t str)
where
    M: Fn(&str) -> Pt,
{
    if measure(text) <= width {
        return (text, "");
    }

    let mut fit_end = 0;
    let mut last_space: Option<usize> = None;
    for (i, ch) in text.char_indices() {
        let end = i + ch.len_utf8();
        if measure(&text[..end]) > width {
            break;
        }
        if ch.is_whitespace() {
            last_space = Some(i);
        }
        fit_end = end;
    }

    let breaks_at_space = text[fit_end..].starts_with(char::is_whitespace);
    let split = match last_space {
        _ if breaks_at_space && fit_end > 0 => fit_end,
        Some(space) if !text[..space].trim_end().is_empty() => space,
        _ if fit_end > 0 => fit_end,
        // not even one character fits
        _ => text.chars().next().map(char::len_utf8).unwrap_or(text.len()),
    };

    (text[..split].trim_end(), text[split..].trim_start())
}

/// Draw as much of `text` as fits in `width` on the baseline at `(x, y)` and return
/// the rest. The cursor is not moved. `text` must be free of markup, see [fit_line].
pub fn wrap_at<'t, C: Canvas>(
    flow: &mut Flow<C>,
    x: Pt,
    y: Pt,
    width: Pt,
    size: Pt,
    text: &'t str,
) -> &'t str {
    let (line, rest) = fit_line(|s| flow.text_width(size, s), text, width);
    flow.text(x, y, size, line);
    rest
}

/// Emit one body line: move down to the baseline, draw what fits, move down by the
/// bottom padding and break the page if the next line would not fit.
pub fn flow_line<'t, C: Canvas>(flow: &mut Flow<C>, x: Pt, width: Pt, text: &'t str) -> &'t str {
    let metrics = flow.metrics();
    let (to_baseline, padding_bottom, size) = (
        metrics.font_padding_top + metrics.font_size,
        metrics.font_padding_bottom,
        metrics.font_size,
    );

    flow.advance(-to_baseline);
    let y = flow.y();
    let rest = wrap_at(flow, x, y, width, size, text);
    flow.advance(-padding_bottom);
    flow.break_page_if_needed(true);
    rest
}

/// Flow free text paragraph by paragraph. Paragraphs are separated by `\r\n` (a lone
/// `\n` works too); an empty paragraph takes up one line pitch and is overflow checked
/// like any other line. Bold tags are dropped, free text is printed plain.
pub fn flow_paragraphs<C: Canvas>(flow: &mut Flow<C>, x: Pt, width: Pt, text: &str) {
    let text = strip_markup(text);
    for paragraph in paragraphs(&text) {
        if paragraph.is_empty() {
            let spacing = flow.metrics().font_spacing();
            flow.advance(-spacing);
            flow.break_page_if_needed(true);
            continue;
        }

        let mut rest = paragraph;
        while !rest.is_empty() {
            rest = flow_line(flow, x, width, rest);
        }
    }
}

/// Split on line breaks, keeping empty paragraphs
pub fn paragraphs(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{canvas::PdfCanvas, layout::PageMetrics};
    use pretty_assertions::assert_eq;

    /// Every char is 1pt wide
    fn chars(text: &str) -> Pt {
        Pt(text.chars().count() as f32)
    }

    #[test]
    fn short_text_fits_whole() {
        assert_eq!(fit_line(chars, "hello world", Pt(20.0)), ("hello world", ""));
        assert_eq!(fit_line(chars, "", Pt(20.0)), ("", ""));
    }

    #[test]
    fn breaks_at_the_last_space_that_fits() {
        assert_eq!(
            fit_line(chars, "the quick brown fox", Pt(12.0)),
            ("the quick", "brown fox")
        );
        // the break falls exactly on a space
        assert_eq!(
            fit_line(chars, "the quick brown fox", Pt(9.0)),
            ("the quick", "brown fox")
        );
    }

    #[test]
    fn long_words_break_between_characters() {
        assert_eq!(
            fit_line(chars, "abcdefghij klm", Pt(4.0)),
            ("abcd", "efghij klm")
        );
        assert_eq!(fit_line(chars, "æøå", Pt(0.5)), ("æ", "øå"));
    }

    #[test]
    fn paragraphs_keep_empty_lines() {
        let split: Vec<&str> = paragraphs("one\r\n\r\ntwo\nthree").collect();
        assert_eq!(split, vec!["one", "", "two", "three"]);
    }

    #[test]
    fn lines_advance_by_one_pitch() {
        let mut flow = Flow::new(PdfCanvas::new(PageMetrics::default(), None));
        let start = flow.y();
        let width = flow.metrics().content_width();
        let x = flow.metrics().margin_left();

        flow_paragraphs(&mut flow, x, width, "first\r\n\r\nsecond");
        assert_eq!(flow.y(), start - Pt(45.0));

        let page = flow.canvas().document().page(0).unwrap();
        let texts: Vec<&str> = page.text_spans().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second"]);
        let first = page.text_spans().next().unwrap();
        assert_eq!(first.coords, (x, start - Pt(11.0)));
    }

    #[test]
    fn empty_paragraph_at_the_bottom_breaks_the_page() {
        let mut flow = Flow::new(PdfCanvas::new(PageMetrics::default(), None));
        let threshold = flow.metrics().margin_bottom() + flow.metrics().font_spacing() * 2.0;
        flow.set_exact(threshold + Pt(10.0));

        let width = flow.metrics().content_width();
        flow_paragraphs(&mut flow, Pt(42.0), width, "\r\n");
        // two empty paragraphs: the first crosses the threshold
        assert_eq!(flow.canvas().page_count(), 2);
    }

    #[test]
    fn tags_in_free_text_are_never_split() {
        let mut flow = Flow::new(PdfCanvas::new(PageMetrics::default(), None));
        let text = "<b>Bemærk</b> levering sker <b>efter</b> aftale ".repeat(6);
        flow_paragraphs(&mut flow, Pt(42.0), Pt(80.0), text.trim_end());

        let page = flow.canvas().document().page(0).unwrap();
        let lines: Vec<&str> = page.text_spans().map(|s| s.text.as_str()).collect();
        assert!(lines.len() > 3);
        assert!(lines.iter().all(|line| !line.contains('<') && !line.contains('>')));
        assert_eq!(lines.join(" "), strip_markup(text.trim_end()));
    }

    #[test]
    fn long_text_wraps_onto_several_lines() {
        let mut flow = Flow::new(PdfCanvas::new(PageMetrics::default(), None));
        let text = "lorem ipsum dolor sit amet ".repeat(12);
        flow_paragraphs(&mut flow, Pt(42.0), Pt(150.0), text.trim_end());

        let page = flow.canvas().document().page(0).unwrap();
        let lines: Vec<&str> = page.text_spans().map(|s| s.text.as_str()).collect();
        assert!(lines.len() > 5);
        for line in &lines {
            assert!(flow.text_width(Pt(10.0), line) <= Pt(150.0));
        }
        assert_eq!(lines.join(" "), text.trim_end());
    }
}
