//! The framed boxes at the top of the first page: receiver, sender and the document
//! facts (number, date, due date).
//!
//! Boxes are drawn in two phases. The content goes first, moving the cursor down; the
//! rounded frame follows once the height is known, and the height is handed back in a
//! [PanelExtent] so the neighbouring box can match it.

use crate::{
    canvas::Canvas,
    debtor::{Address, Sender},
    layout::Flow,
    units::Pt,
};

pub const BOX_PADDING_TOP: Pt = Pt(8.0);
pub const BOX_PADDING_BOTTOM: Pt = Pt(9.0);
pub const BOX_WIDTH: Pt = Pt(275.0);
const BOX_RADIUS: Pt = Pt(10.0);
const MAX_ADDRESS_LINES: usize = 3;
/// Distance from a label to its value
const VALUE_OFFSET: Pt = Pt(60.0);

/// Top and height of a drawn box
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PanelExtent {
    pub top: Pt,
    pub height: Pt,
}

impl PanelExtent {
    pub fn bottom(&self) -> Pt {
        self.top - self.height
    }
}

/// Who the document is for
#[derive(Debug, Clone)]
pub struct Receiver<'a> {
    pub address: &'a Address,
    /// Printed as an "Att:" line under the name
    pub attention: Option<&'a str>,
    /// Customer number
    pub number: &'a str,
}

/// One line of the document facts box
#[derive(Debug, Clone, PartialEq)]
pub struct DocInfoEntry {
    pub label: String,
    pub value: String,
}

impl DocInfoEntry {
    pub fn new<L: ToString, V: ToString>(label: L, value: V) -> DocInfoEntry {
        DocInfoEntry {
            label: label.to_string(),
            value: value.to_string(),
        }
    }
}

/// Title at the left margin in a larger size
pub fn add_headline<C: Canvas>(flow: &mut Flow<C>, title: &str) {
    flow.set_x(Pt(0.0));
    let size = flow.metrics().font_size + Pt(8.0);
    let (x, y) = (flow.x(), flow.y());
    flow.text(x, y, size, title);
    let spacing = flow.metrics().font_spacing();
    flow.advance(-spacing);
}

/// Small caption in the top right corner of a box
fn caption<C: Canvas>(flow: &mut Flow<C>, right: Pt, text: &str) {
    let size = flow.metrics().font_size - Pt(4.0);
    let y = flow.y() + Pt(4.0);
    flow.text(right - Pt(40.0), y, size, text);
}

fn next_line<C: Canvas>(flow: &mut Flow<C>) {
    let spacing = flow.metrics().font_spacing();
    flow.advance(-spacing);
}

fn labelled<C: Canvas>(flow: &mut Flow<C>, label: &str, value: &str) {
    let x = flow.x() + Pt(10.0);
    flow.text_at(x, label);
    flow.text_at(x + VALUE_OFFSET, value);
}

/// The receiver box in the left column
pub fn add_receiver<C: Canvas>(flow: &mut Flow<C>, receiver: &Receiver<'_>) -> PanelExtent {
    let address = receiver.address;

    flow.advance(Pt(-5.0));
    let top = flow.y();
    let x = flow.x();

    next_line(flow);
    caption(flow, x + BOX_WIDTH, "Modtager");
    flow.advance(-BOX_PADDING_TOP);
    flow.text_at(x + Pt(10.0), &format!("<b>{}</b>", address.name));
    next_line(flow);

    if let Some(attention) = receiver.attention.filter(|name| !name.is_empty()) {
        flow.text_at(x + Pt(10.0), &format!("Att: {attention}"));
        next_line(flow);
    }

    for line in address.lines(MAX_ADDRESS_LINES) {
        flow.text_at(x + Pt(10.0), line);
        next_line(flow);
    }
    flow.text_at(x + Pt(10.0), &address.postcode_and_city());
    next_line(flow);

    if !address.country.is_empty() {
        flow.text_at(x + Pt(10.0), &address.country);
        next_line(flow);
    }
    next_line(flow);

    if !address.cvr.is_empty() {
        labelled(flow, "CVR.:", &address.cvr);
        next_line(flow);
    }
    labelled(flow, "Kontaktnr.:", receiver.number);
    if !address.ean.is_empty() {
        // below the contact number, without moving the cursor
        let y = flow.y() - Pt(15.0);
        let size = flow.metrics().font_size;
        flow.text(x + Pt(10.0), y, size, "EANnr.:");
        flow.text(x + Pt(10.0) + VALUE_OFFSET, y, size, &address.ean);
    }

    let extent = PanelExtent {
        top,
        height: top - flow.y() + BOX_PADDING_BOTTOM,
    };
    flow.set_exact(extent.bottom());

    let left = flow.metrics().margin_left();
    flow.canvas_mut()
        .draw_rounded_rect(left, extent.bottom(), BOX_WIDTH, extent.height, BOX_RADIUS);
    extent
}

/// The sender box in the right column, level with the receiver box and at least as tall
pub fn add_sender<C: Canvas>(
    flow: &mut Flow<C>,
    sender: &Sender,
    receiver: PanelExtent,
) -> PanelExtent {
    flow.set_x(BOX_WIDTH + Pt(10.0));
    flow.set_exact(receiver.top);
    let top = receiver.top;
    let x = flow.x();
    let right = flow.metrics().right_margin_position();

    next_line(flow);
    caption(flow, right, "Afsender");
    flow.advance(-BOX_PADDING_TOP);
    flow.text_at(x + Pt(10.0), &format!("<b>{}</b>", sender.name));
    next_line(flow);

    for line in sender.lines(MAX_ADDRESS_LINES) {
        flow.text_at(x + Pt(10.0), line);
        next_line(flow);
    }
    flow.text_at(x + Pt(10.0), &format!("{} {}", sender.postcode, sender.city));
    next_line(flow);
    next_line(flow);

    labelled(flow, "CVR.:", &sender.cvr);
    next_line(flow);

    if !sender.contact_person.is_empty() && sender.contact_person != sender.name {
        labelled(flow, "Kontakt:", &sender.contact_person);
        next_line(flow);
    }

    labelled(flow, "Telefon:", &sender.phone);
    next_line(flow);
    labelled(flow, "E-mail:", &sender.email);

    let own_height = top - flow.y() + BOX_PADDING_BOTTOM;
    let extent = PanelExtent {
        top,
        height: own_height.max(receiver.height),
    };
    flow.set_exact(extent.bottom());
    flow.canvas_mut()
        .draw_rounded_rect(x, extent.bottom(), right - x, extent.height, BOX_RADIUS);
    extent
}

/// The document facts box under the sender box. With no entries only a fixed gap is
/// left and no box is drawn.
pub fn add_debtor_data<C: Canvas>(flow: &mut Flow<C>, entries: &[DocInfoEntry]) -> Option<PanelExtent> {
    let spacing = flow.metrics().font_spacing();

    if entries.is_empty() {
        let gap = flow.metrics().font_size + Pt(12.0);
        flow.advance(-gap);
        return None;
    }

    flow.advance(Pt(-10.0));
    let extent = PanelExtent {
        top: flow.y(),
        height: spacing * entries.len() as f32 + BOX_PADDING_TOP + BOX_PADDING_BOTTOM,
    };
    let x = flow.x();
    let right = flow.metrics().right_margin_position();

    flow.advance(-BOX_PADDING_TOP);
    for entry in entries {
        flow.advance(-spacing);
        flow.text_at(x + Pt(10.0), &entry.label);
        flow.text_right(right - Pt(40.0), &entry.value);
    }

    flow.set_exact(extent.bottom());
    flow.canvas_mut()
        .draw_rounded_rect(x, extent.bottom(), right - x, extent.height, BOX_RADIUS);
    Some(extent)
}

/// Headline, receiver and sender side by side, then the document facts under the
/// sender. Leaves the cursor under the lowest box, back at the left margin.
pub fn add_receiver_and_sender<C: Canvas>(
    flow: &mut Flow<C>,
    title: &str,
    receiver: &Receiver<'_>,
    sender: &Sender,
    docinfo: &[DocInfoEntry],
) {
    add_headline(flow, title);
    let receiver_extent = add_receiver(flow, receiver);
    add_sender(flow, sender, receiver_extent);
    add_debtor_data(flow, docinfo);
    flow.set_x(Pt(0.0));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{canvas::PdfCanvas, layout::PageMetrics, page::Shape};
    use pretty_assertions::assert_eq;

    fn assert_close(a: Pt, b: Pt) {
        assert!((a.0 - b.0).abs() < 1e-3, "{a} != {b}");
    }

    fn flow() -> Flow<PdfCanvas> {
        let mut flow = Flow::new(PdfCanvas::new(PageMetrics::default(), None));
        flow.set_x(Pt(0.0));
        flow
    }

    fn address(lines: &str) -> Address {
        Address {
            name: "Kunde ApS".into(),
            address: lines.into(),
            postcode: "8000".into(),
            city: "Aarhus C".into(),
            ..Address::default()
        }
    }

    fn frames(flow: &Flow<PdfCanvas>) -> Vec<crate::rect::Rect> {
        let page = flow.canvas().document().page(0).unwrap();
        page.paths()
            .filter_map(|path| match &path.shape {
                Shape::RoundedRect { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn receiver_prints_at_most_three_address_lines() {
        let mut flow = flow();
        let address = address("Vej 1\r\nBygning 2\r\n3. sal\r\nDør 4");
        let receiver = Receiver {
            address: &address,
            attention: Some("Hans Hansen"),
            number: "1001",
        };
        add_receiver(&mut flow, &receiver);

        let text = flow.canvas().document().page(0).unwrap().plain_text();
        assert!(text.contains("Att: Hans Hansen"));
        assert!(text.contains("3. sal"));
        assert!(!text.contains("Dør 4"));
        assert!(text.contains("Kunde ApS"));
    }

    #[test]
    fn receiver_height_follows_its_content() {
        let mut short = flow();
        let one_line = address("Vej 1");
        let a = add_receiver(
            &mut short,
            &Receiver {
                address: &one_line,
                attention: None,
                number: "1",
            },
        );

        let mut tall = flow();
        let three_lines = address("Vej 1\r\nBygning 2\r\n3. sal");
        let b = add_receiver(
            &mut tall,
            &Receiver {
                address: &three_lines,
                attention: None,
                number: "1",
            },
        );

        assert_close(b.height - a.height, Pt(30.0));
        assert_eq!(short.y(), a.bottom());
        assert_close(frames(&short)[0].height(), a.height);
    }

    #[test]
    fn sender_box_matches_a_taller_receiver() {
        let mut flow = flow();
        let receiver = PanelExtent {
            top: flow.y(),
            height: Pt(400.0),
        };
        let sender = Sender {
            name: "Intraface".into(),
            ..Sender::default()
        };
        let extent = add_sender(&mut flow, &sender, receiver);

        assert_eq!(extent.height, Pt(400.0));
        assert_eq!(flow.y(), receiver.top - Pt(400.0));
        let frame = frames(&flow)[0];
        assert_close(frame.x1, flow.metrics().margin_left() + BOX_WIDTH + Pt(10.0));
        assert_close(frame.x2, flow.metrics().right_margin_position());
    }

    #[test]
    fn contact_person_is_skipped_when_it_is_the_sender() {
        let mut flow = flow();
        let receiver = PanelExtent {
            top: flow.y(),
            height: Pt(0.0),
        };
        let sender = Sender {
            name: "Intraface".into(),
            contact_person: "Intraface".into(),
            ..Sender::default()
        };
        add_sender(&mut flow, &sender, receiver);
        let text = flow.canvas().document().page(0).unwrap().plain_text();
        assert!(!text.contains("Kontakt:"));
        assert!(text.contains("Telefon:"));
    }

    #[test]
    fn debtor_data_box_holds_every_entry() {
        let mut flow = flow();
        let start = flow.y();
        let entries = vec![
            DocInfoEntry::new("Fakturanr.:", "12"),
            DocInfoEntry::new("Dato:", "01.03.2024"),
        ];
        let extent = add_debtor_data(&mut flow, &entries).unwrap();

        assert_eq!(extent.top, start - Pt(10.0));
        assert_eq!(extent.height, Pt(2.0 * 15.0 + 8.0 + 9.0));
        assert_eq!(flow.y(), extent.bottom());
    }

    #[test]
    fn empty_debtor_data_only_leaves_a_gap() {
        let mut flow = flow();
        let start = flow.y();
        assert_eq!(add_debtor_data(&mut flow, &[]), None);
        assert_eq!(flow.y(), start - Pt(22.0));
        assert!(frames(&flow).is_empty());
    }
}
