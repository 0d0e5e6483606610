//! Flow layout and pagination.
//!
//! A [Flow] owns the [Canvas](crate::Canvas) and a single [Cursor]. Renderers move the
//! cursor down the page line by line and ask the flow whether a page break is due;
//! [wrap] breaks text into lines that fit a column, measured with the canvas' fonts.
//!
//! # Example
//!
//! ```
//! use debtor_pdf::layout::{wrap, Flow, PageMetrics};
//! use debtor_pdf::PdfCanvas;
//!
//! let mut flow = Flow::new(PdfCanvas::new(PageMetrics::default(), None));
//! let x = flow.metrics().margin_left();
//! let width = flow.metrics().content_width();
//! wrap::flow_paragraphs(&mut flow, x, width, "Tak for handlen!\r\n\r\nVenlig hilsen");
//!
//! let document = flow.into_canvas().into_document();
//! assert_eq!(document.page_count(), 1);
//! ```

mod cursor;
mod flow;
mod markup;
mod metrics;
pub mod wrap;

pub use cursor::*;
pub use flow::*;
pub use markup::*;
pub use metrics::*;
