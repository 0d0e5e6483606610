use crate::units::Pt;

/// The current drawing position.
///
/// Coordinates are PDF user space, so `y` shrinks as content is added down the page.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Cursor {
    pub x: Pt,
    pub y: Pt,
}

impl Cursor {
    pub fn new(x: Pt, y: Pt) -> Cursor {
        Cursor { x, y }
    }

    /// Signed vertical move; pass a negative delta to move down the page
    pub fn advance(&mut self, delta_y: Pt) {
        self.y += delta_y;
    }

    pub fn set_y(&mut self, y: Pt) {
        self.y = y;
    }

    pub fn set_x(&mut self, x: Pt) {
        self.x = x;
    }
}
