use std::io::Write;

/// A colour used for both strokes and fills
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Colour {
    /// DeviceRGB colour; r, g, b, range from 0.0 to 1.0
    RGB { r: f32, g: f32, b: f32 },
    /// DeviceGray colour; g ranges from 0.0 to 1.0
    Grey { g: f32 },
}

impl Colour {
    /// Create a new colour in the RGB space. r, g, and b range from 0.0 to 1.0
    /// and are clamped into that range
    pub fn new_rgb(r: f32, g: f32, b: f32) -> Colour {
        Colour::RGB {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
        }
    }

    /// Create a new colour in the Gray space, g ranges from 0.0 to 1.0
    pub fn new_grey(g: f32) -> Colour {
        Colour::Grey {
            g: g.clamp(0.0, 1.0),
        }
    }

    pub(crate) fn write_fill<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        match *self {
            Colour::RGB { r, g, b } => writeln!(w, "{r} {g} {b} rg"),
            Colour::Grey { g } => writeln!(w, "{g} g"),
        }
    }

    pub(crate) fn write_stroke<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        match *self {
            Colour::RGB { r, g, b } => writeln!(w, "{r} {g} {b} RG"),
            Colour::Grey { g } => writeln!(w, "{g} G"),
        }
    }
}

impl<T: Into<f32>> From<(T, T, T)> for Colour {
    fn from(c: (T, T, T)) -> Self {
        Colour::new_rgb(c.0.into(), c.1.into(), c.2.into())
    }
}

/// Colours used by the debtor layout
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::RGB {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };
    pub const WHITE: Colour = Colour::RGB {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };
    /// Background of shaded table rows
    pub const BAND: Colour = Colour::RGB {
        r: 0.8,
        g: 0.8,
        b: 0.8,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_fill_and_stroke_operators() {
        let mut out = Vec::new();
        colours::BAND.write_fill(&mut out).unwrap();
        Colour::new_grey(0.5).write_stroke(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "0.8 0.8 0.8 rg\n0.5 G\n");
    }

    #[test]
    fn clamps_components() {
        assert_eq!(
            Colour::from((2.0f32, -1.0, 0.5)),
            Colour::RGB {
                r: 1.0,
                g: 0.0,
                b: 0.5
            }
        );
    }
}
