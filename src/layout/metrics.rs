use crate::{pagesize, pagesize::PageSize, units::Pt};

/// Margins are used when laying out objects on a page. There is no control
/// preventing objects on pages from overflowing the margins; the flow engine only
/// checks them when asked. The margins are also applied to [`Page`](crate::Page)s
/// to determine the `ArtBox` attribute of each page in the generated PDF
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Margins {
    pub top: Pt,
    pub right: Pt,
    pub bottom: Pt,
    pub left: Pt,
}

impl Margins {
    /// Create margins by specifying individual components in a clockwise fashion
    /// starting at the top (in the same order as CSS margins)
    pub fn trbl(top: Pt, right: Pt, bottom: Pt, left: Pt) -> Margins {
        Margins {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Create margins where all values are equal
    pub fn all<D: Into<Pt>>(value: D) -> Margins {
        let value: Pt = value.into();
        Margins {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

/// Read-only page geometry and type metrics shared by every renderer.
///
/// `font_spacing` is the line pitch: `font_padding_top + font_size + font_padding_bottom`.
/// Text is drawn on its baseline, `font_padding_top + font_size` below the top of its line.
#[derive(Debug, Clone, PartialEq)]
pub struct PageMetrics {
    pub page_size: PageSize,
    pub margins: Margins,
    pub font_size: Pt,
    pub font_padding_top: Pt,
    pub font_padding_bottom: Pt,
    /// Height reserved for the header image, when the document has one
    pub header_height: Pt,
}

impl Default for PageMetrics {
    fn default() -> Self {
        PageMetrics {
            page_size: pagesize::A4,
            margins: Margins::trbl(Pt(42.0), Pt(42.0), Pt(50.0), Pt(42.0)),
            font_size: Pt(10.0),
            font_padding_top: Pt(1.0),
            font_padding_bottom: Pt(4.0),
            header_height: Pt(51.0),
        }
    }
}

impl PageMetrics {
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Set the body font size, keeping the paddings
    pub fn with_font_size<D: Into<Pt>>(mut self, size: D) -> Self {
        self.font_size = size.into();
        self
    }

    pub fn with_font_padding(mut self, top: Pt, bottom: Pt) -> Self {
        self.font_padding_top = top;
        self.font_padding_bottom = bottom;
        self
    }

    pub fn with_header_height<D: Into<Pt>>(mut self, height: D) -> Self {
        self.header_height = height.into();
        self
    }

    pub fn page_width(&self) -> Pt {
        self.page_size.0
    }

    pub fn page_height(&self) -> Pt {
        self.page_size.1
    }

    pub fn margin_left(&self) -> Pt {
        self.margins.left
    }

    pub fn margin_bottom(&self) -> Pt {
        self.margins.bottom
    }

    pub fn margin_top(&self) -> Pt {
        self.margins.top
    }

    /// X coordinate of the right margin
    pub fn right_margin_position(&self) -> Pt {
        self.page_width() - self.margins.right
    }

    pub fn content_width(&self) -> Pt {
        self.right_margin_position() - self.margins.left
    }

    pub fn font_spacing(&self) -> Pt {
        self.font_padding_top + self.font_size + self.font_padding_bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_line_pitch_is_fifteen_points() {
        let metrics = PageMetrics::default();
        assert_eq!(metrics.font_spacing(), Pt(15.0));
        assert_eq!(
            metrics.right_margin_position(),
            pagesize::A4.0 - Pt(42.0)
        );
        assert_eq!(
            metrics.content_width(),
            metrics.right_margin_position() - Pt(42.0)
        );
    }

    #[test]
    fn builders_replace_fields() {
        let metrics = PageMetrics::default()
            .with_font_size(Pt(12.0))
            .with_font_padding(Pt(2.0), Pt(2.0))
            .with_margins(Margins::all(Pt(20.0)));
        assert_eq!(metrics.font_spacing(), Pt(16.0));
        assert_eq!(metrics.margin_bottom(), Pt(20.0));

        let letter = PageMetrics::default().with_page_size(pagesize::LETTER);
        assert_eq!(letter.page_width(), Pt(612.0));
        assert_eq!(letter.right_margin_position(), Pt(570.0));
    }
}
