//! Paginated PDF rendering of invoices, credit notes and orders.
//!
//! The [render::DebtorPdf] composer lays a [Debtor] out with the flow engine in
//! [layout] onto a [Canvas]. [PdfCanvas] is the canvas that builds a [Document], which
//! is finally serialized with `pdf-writer`.

mod canvas;
pub use canvas::*;

mod colour;
pub use colour::*;

mod content;

mod debtor;
pub use debtor::*;

mod document;
pub use document::*;

mod font;
pub use font::*;

mod image;
pub use self::image::*;

mod info;
pub use info::*;

/// Flow layout, pagination and text wrapping
pub mod layout;

/// Danish amount formatting
pub mod money;

mod page;
pub use page::*;

/// Paper sizes in points
pub mod pagesize;

mod rect;
pub use rect::*;

pub(crate) mod refs;

/// The sections of a debtor document and the composer that puts them together
pub mod render;

mod translation;
pub use translation::*;

mod units;
pub use units::*;

mod error;
pub use error::*;

/// Re-export PDF-writer functionality, mostly for inspecting generated objects
pub use pdf_writer;
