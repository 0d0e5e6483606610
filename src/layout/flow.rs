use super::{Cursor, PageMetrics};
use crate::{canvas::Canvas, colour::colours, units::Pt};

/// The pagination engine: a [Canvas] plus the cursor every renderer reads and moves.
///
/// Renderers receive the flow by `&mut` and call [Flow::break_page_if_needed] after
/// every line they emit. The flow itself never breaks a page on its own.
pub struct Flow<C: Canvas> {
    canvas: C,
    metrics: PageMetrics,
    cursor: Cursor,
}

impl<C: Canvas> Flow<C> {
    /// Start flowing at the top left of the canvas' current page
    pub fn new(canvas: C) -> Flow<C> {
        let metrics = canvas.metrics().clone();
        let cursor = Cursor::new(metrics.margin_left(), canvas.content_top());
        Flow {
            canvas,
            metrics,
            cursor,
        }
    }

    pub fn metrics(&self) -> &PageMetrics {
        &self.metrics
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    pub fn into_canvas(self) -> C {
        self.canvas
    }

    pub fn x(&self) -> Pt {
        self.cursor.x
    }

    pub fn y(&self) -> Pt {
        self.cursor.y
    }

    /// Signed vertical move; negative deltas move down the page
    pub fn advance(&mut self, delta_y: Pt) {
        self.cursor.advance(delta_y);
    }

    /// Jump to an absolute y, e.g. back to a remembered panel top
    pub fn set_exact(&mut self, y: Pt) {
        self.cursor.set_y(y);
    }

    /// Place the horizontal anchor `offset` to the right of the left margin
    pub fn set_x(&mut self, offset: Pt) {
        self.cursor.set_x(self.metrics.margin_left() + offset);
    }

    /// Less than two lines of room left above the bottom margin
    pub fn needs_page_break(&self) -> bool {
        self.cursor.y < self.metrics.margin_bottom() + self.metrics.font_spacing() * 2.0
    }

    /// Less than `height` of room left above the bottom margin
    pub fn needs_room(&self, height: Pt) -> bool {
        self.cursor.y < self.metrics.margin_bottom() + height
    }

    /// Start a new page and move the cursor to its content top. Section headings are
    /// not repeated; that is up to the caller.
    pub fn break_page(&mut self, repeat_header: bool) {
        let top = self.canvas.new_page(repeat_header);
        log::debug!(
            "page break at y={} onto page {}",
            self.cursor.y,
            self.canvas.page_count()
        );
        self.cursor.set_y(top);
    }

    /// The standard overflow check. Returns whether a page was started.
    pub fn break_page_if_needed(&mut self, repeat_header: bool) -> bool {
        if self.needs_page_break() {
            self.break_page(repeat_header);
            true
        } else {
            false
        }
    }

    pub fn text_width(&self, size: Pt, markup: &str) -> Pt {
        self.canvas.text_width(size, markup)
    }

    pub fn text(&mut self, x: Pt, y: Pt, size: Pt, markup: &str) {
        self.canvas.draw_text(x, y, size, markup);
    }

    /// Body-size text at the cursor's y
    pub fn text_at(&mut self, x: Pt, markup: &str) {
        let size = self.metrics.font_size;
        let y = self.cursor.y;
        self.canvas.draw_text(x, y, size, markup);
    }

    /// Body-size text at the cursor's y, ending at `right`
    pub fn text_right(&mut self, right: Pt, markup: &str) {
        let size = self.metrics.font_size;
        let x = right - self.canvas.text_width(size, markup);
        self.text_at(x, markup);
    }

    /// Shade one line pitch below the cursor across the content width
    pub fn band(&mut self) {
        let height = self.metrics.font_spacing();
        self.band_with_height(self.cursor.y - height, height);
    }

    /// Shade a strip of `height` starting at `bottom` across the content width
    pub fn band_with_height(&mut self, bottom: Pt, height: Pt) {
        let left = self.metrics.margin_left();
        let width = self.metrics.content_width();
        self.canvas.set_colour(colours::BAND);
        self.canvas.fill_rect(left, bottom, width, height);
        self.canvas.set_colour(colours::BLACK);
    }

    /// Horizontal rule at the cursor between two x positions
    pub fn rule(&mut self, from_x: Pt, to_x: Pt) {
        let y = self.cursor.y;
        self.canvas.draw_line(from_x, y, to_x, y);
    }

    /// Horizontal rule at the cursor across the content width
    pub fn full_rule(&mut self) {
        let (left, right) = (
            self.metrics.margin_left(),
            self.metrics.right_margin_position(),
        );
        self.rule(left, right);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::PdfCanvas;

    fn flow() -> Flow<PdfCanvas> {
        Flow::new(PdfCanvas::new(PageMetrics::default(), None))
    }

    #[test]
    fn starts_at_the_content_top_left() {
        let flow = flow();
        assert_eq!(flow.x(), flow.metrics().margin_left());
        assert_eq!(flow.y(), flow.canvas().content_top());
    }

    #[test]
    fn page_break_threshold_is_two_line_pitches() {
        let mut flow = flow();
        let threshold = flow.metrics().margin_bottom() + flow.metrics().font_spacing() * 2.0;

        flow.set_exact(threshold);
        assert!(!flow.needs_page_break());
        assert!(!flow.break_page_if_needed(true));

        flow.advance(Pt(-0.5));
        assert!(flow.needs_page_break());
        assert!(flow.break_page_if_needed(true));
        assert_eq!(flow.canvas().page_count(), 2);
        assert_eq!(flow.y(), flow.canvas().content_top());
    }

    #[test]
    fn needs_room_compares_against_the_bottom_margin() {
        let mut flow = flow();
        let bottom = flow.metrics().margin_bottom();
        flow.set_exact(bottom + Pt(97.0));
        assert!(!flow.needs_room(Pt(97.0)));
        assert!(flow.needs_room(Pt(97.5)));
    }

    #[test]
    fn set_x_is_relative_to_the_left_margin() {
        let mut flow = flow();
        flow.set_x(Pt(285.0));
        assert_eq!(flow.x(), flow.metrics().margin_left() + Pt(285.0));
    }
}
