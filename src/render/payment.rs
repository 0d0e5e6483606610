//! Received payments and the payment instructions box.
//!
//! The three payment methods share one drawing loop. Each [PaymentLayout] only
//! describes its grid: the rules between the cells and what goes in each cell.

use crate::{
    canvas::Canvas,
    colour::colours,
    debtor::{Address, PaymentInformation},
    layout::Flow,
    money::{format_amount, to_cents},
    units::Pt,
};

/// Height of one row of the payment box
pub const PAYMENT_LINE: Pt = Pt(26.0);
/// Width of the left column of the payment box
pub const PAYMENT_LEFT: Pt = Pt(230.0);
const MAX_PAYER_ADDRESS_LINES: usize = 3;

/// Everything the payment box prints besides the creditor's bank details
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentParameters<'a> {
    /// "Tekst til modtager", e.g. `Faktura 1042`
    pub payment_text: &'a str,
    /// The document total
    pub amount: f64,
    /// Payments already received
    pub paid: f64,
    /// Online payments authorized but not captured yet
    pub pending_online: f64,
    pub due_date: &'a str,
    pub girocode: &'a str,
}

/// The payment methods with a payment box
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PaymentLayout {
    /// Registration and account number
    BankTransfer,
    /// Giro payment slip with the payer's address
    GiroAccount,
    /// Giro +71 with a payment id
    Giro71,
}

/// Vertical grid lines of the payment box, as offsets from the left margin
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Edge {
    Left,
    /// Middle of the left column
    LeftHalf,
    /// Between the left and right column
    Middle,
    /// Middle of the right column
    RightHalf,
    Right,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Rule {
    /// From the top of `from_row` to the top of `to_row`
    Vertical { at: Edge, from_row: u8, to_row: u8 },
    /// Along the top of `row`
    Horizontal { row: u8, from: Edge, to: Edge },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Field {
    BankName,
    PaymentText,
    Amount,
    DueDate,
    BankAccount,
    Payer,
    GiroCodeLine,
    Giro71CodeLine,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct Cell {
    row: u8,
    column: Edge,
    label: &'static str,
    field: Field,
}

const fn cell(row: u8, column: Edge, label: &'static str, field: Field) -> Cell {
    Cell {
        row,
        column,
        label,
        field,
    }
}

const AMOUNT_LABEL: &str = "Beløb DKK:";
const DUE_DATE_LABEL: &str = "Betalingsdato:";
const PAYMENT_TEXT_LABEL: &str = "Tekst til modtager:";
const CODE_LINE_LABEL: &str = "Kodelinje: (Ej til maskinel aflæsning)";

const BANK_TRANSFER_RULES: &[Rule] = &[
    Rule::Vertical {
        at: Edge::Middle,
        from_row: 0,
        to_row: 2,
    },
    Rule::Horizontal {
        row: 1,
        from: Edge::Left,
        to: Edge::Right,
    },
    Rule::Vertical {
        at: Edge::LeftHalf,
        from_row: 1,
        to_row: 2,
    },
];

const BANK_TRANSFER_CELLS: &[Cell] = &[
    cell(0, Edge::Left, "Bank:", Field::BankName),
    cell(0, Edge::Middle, PAYMENT_TEXT_LABEL, Field::PaymentText),
    cell(1, Edge::Left, AMOUNT_LABEL, Field::Amount),
    cell(1, Edge::LeftHalf, DUE_DATE_LABEL, Field::DueDate),
    cell(
        1,
        Edge::Middle,
        "Regnr.:            Kontonr.:",
        Field::BankAccount,
    ),
];

const GIRO_ACCOUNT_RULES: &[Rule] = &[
    Rule::Vertical {
        at: Edge::Middle,
        from_row: 0,
        to_row: 3,
    },
    Rule::Horizontal {
        row: 1,
        from: Edge::Middle,
        to: Edge::Right,
    },
    Rule::Horizontal {
        row: 2,
        from: Edge::Middle,
        to: Edge::Right,
    },
    Rule::Vertical {
        at: Edge::RightHalf,
        from_row: 1,
        to_row: 2,
    },
];

const GIRO_ACCOUNT_CELLS: &[Cell] = &[
    cell(0, Edge::Left, "Indbetaler:", Field::Payer),
    cell(0, Edge::Middle, PAYMENT_TEXT_LABEL, Field::PaymentText),
    cell(1, Edge::Middle, AMOUNT_LABEL, Field::Amount),
    cell(1, Edge::RightHalf, DUE_DATE_LABEL, Field::DueDate),
    cell(2, Edge::Middle, CODE_LINE_LABEL, Field::GiroCodeLine),
];

const GIRO_71_RULES: &[Rule] = &[
    Rule::Horizontal {
        row: 1,
        from: Edge::Left,
        to: Edge::Right,
    },
    Rule::Vertical {
        at: Edge::Middle,
        from_row: 0,
        to_row: 1,
    },
];

const GIRO_71_CELLS: &[Cell] = &[
    cell(0, Edge::Left, AMOUNT_LABEL, Field::Amount),
    cell(0, Edge::Middle, DUE_DATE_LABEL, Field::DueDate),
    cell(1, Edge::Left, CODE_LINE_LABEL, Field::Giro71CodeLine),
];

impl PaymentLayout {
    /// 1: bank transfer, 2: giro account, 3: giro +71
    pub fn from_code(code: u8) -> Option<PaymentLayout> {
        match code {
            1 => Some(PaymentLayout::BankTransfer),
            2 => Some(PaymentLayout::GiroAccount),
            3 => Some(PaymentLayout::Giro71),
            _ => None,
        }
    }

    pub fn rows(&self) -> u8 {
        match self {
            PaymentLayout::BankTransfer => 2,
            PaymentLayout::GiroAccount => 3,
            PaymentLayout::Giro71 => 2,
        }
    }

    /// Height of the box under the title bar
    pub fn height(&self) -> Pt {
        PAYMENT_LINE * self.rows() as f32
    }

    fn rules(&self) -> &'static [Rule] {
        match self {
            PaymentLayout::BankTransfer => BANK_TRANSFER_RULES,
            PaymentLayout::GiroAccount => GIRO_ACCOUNT_RULES,
            PaymentLayout::Giro71 => GIRO_71_RULES,
        }
    }

    fn cells(&self) -> &'static [Cell] {
        match self {
            PaymentLayout::BankTransfer => BANK_TRANSFER_CELLS,
            PaymentLayout::GiroAccount => GIRO_ACCOUNT_CELLS,
            PaymentLayout::Giro71 => GIRO_71_CELLS,
        }
    }
}

/// Code line of a giro payment slip
pub fn giro_code_line(giro_account: &str) -> String {
    format!("+01-{}+{giro_account}-", " ".repeat(20))
}

/// Code line of a giro +71 payment, with the payment id padded to 15 digits
pub fn giro71_code_line(girocode: &str, giro_account: &str) -> String {
    format!("+71- {girocode:0>15} +{giro_account}-")
}

struct Grid {
    left: Pt,
    width: Pt,
    payment_right: Pt,
    top: Pt,
}

impl Grid {
    fn x(&self, edge: Edge) -> Pt {
        self.left
            + match edge {
                Edge::Left => Pt(0.0),
                Edge::LeftHalf => PAYMENT_LEFT / 2.0,
                Edge::Middle => PAYMENT_LEFT,
                Edge::RightHalf => PAYMENT_LEFT + self.payment_right / 2.0,
                Edge::Right => self.width,
            }
    }

    fn y(&self, row: u8) -> Pt {
        self.top - PAYMENT_LINE * row as f32
    }
}

fn deduction_row<C: Canvas>(flow: &mut Flow<C>, label: &str, amount: f64) {
    let metrics = flow.metrics();
    let (padding_top, size, padding_bottom) = (
        metrics.font_padding_top,
        metrics.font_size,
        metrics.font_padding_bottom,
    );
    let (left, right) = (metrics.margin_left(), metrics.right_margin_position());

    flow.canvas_mut().set_line_width(Pt(1.5));
    flow.canvas_mut().set_colour(colours::BLACK);
    flow.full_rule();
    flow.advance(-padding_top);
    flow.advance(-size);
    flow.text_at(left + Pt(4.0), label);
    flow.text_right(right, &format_amount(amount));
    flow.advance(-padding_bottom);
}

/// Rows for payments already made against the document. Returns what is left to pay.
pub fn add_payments<C: Canvas>(flow: &mut Flow<C>, paid: f64, pending_online: f64, amount: f64) -> f64 {
    if paid != 0.0 || pending_online != 0.0 {
        flow.advance(Pt(-20.0));
        flow.break_page_if_needed(true);

        if paid != 0.0 {
            deduction_row(flow, "Betalt", paid);
            flow.break_page_if_needed(true);
        }
        if pending_online != 0.0 {
            deduction_row(flow, "Ventende betalinger", pending_online);
            flow.break_page_if_needed(true);
        }
        flow.full_rule();
    }

    amount - pending_online - paid
}

/// Deductions, then the payment instructions for what is left to pay. Nothing but the
/// deductions is drawn when the document is settled or the payment method is unknown.
pub fn add_payment_condition<C: Canvas>(
    flow: &mut Flow<C>,
    payment_method: u8,
    parameters: &PaymentParameters<'_>,
    information: &PaymentInformation,
    payer: &Address,
) {
    let remaining = add_payments(
        flow,
        parameters.paid,
        parameters.pending_online,
        parameters.amount,
    );
    // a remainder that prints as 0,00 is settled
    if to_cents(remaining) <= 0 {
        log::debug!("nothing left to pay, skipping the payment box");
        return;
    }

    let layout = match PaymentLayout::from_code(payment_method) {
        Some(layout) => layout,
        None => {
            log::warn!("unknown payment method {payment_method}, no payment box drawn");
            return;
        }
    };

    flow.advance(Pt(-20.0));
    let metrics = flow.metrics();
    let (size, spacing) = (metrics.font_size, metrics.font_spacing());
    let mut needed = spacing + Pt(4.0) + PAYMENT_LINE * 3.0;
    if layout == PaymentLayout::GiroAccount {
        // the payer's address can reach below the last row
        let payer_lines = 2 + payer.lines(MAX_PAYER_ADDRESS_LINES).count();
        needed = needed.max(spacing + Pt(11.0) + spacing * payer_lines as f32);
    }
    if flow.needs_room(needed) {
        flow.break_page(true);
    }

    let metrics = flow.metrics();
    let (padding_top, padding_bottom) = (metrics.font_padding_top, metrics.font_padding_bottom);
    let left = metrics.margin_left();
    let width = metrics.content_width();

    // title bar
    flow.canvas_mut().set_line_width(Pt(1.0));
    flow.canvas_mut().set_colour(colours::BLACK);
    let bar_height = spacing + Pt(4.0);
    let bar_bottom = flow.y() - bar_height;
    flow.canvas_mut().fill_rect(left, bar_bottom, width, bar_height);
    flow.canvas_mut().set_colour(colours::WHITE);
    flow.advance(-(size + padding_top + Pt(2.0)));
    let y = flow.y();
    flow.text(left + Pt(4.0), y, size + Pt(2.0), "Indbetalingsoplysninger");
    flow.canvas_mut().set_colour(colours::BLACK);
    flow.advance(-(padding_bottom + Pt(2.0)));

    let grid = Grid {
        left,
        width,
        payment_right: width - PAYMENT_LEFT,
        top: flow.y(),
    };
    let bottom = grid.y(layout.rows());

    flow.canvas_mut().draw_rect(left, bottom, width, layout.height());
    for rule in layout.rules() {
        let (x1, y1, x2, y2) = match *rule {
            Rule::Vertical {
                at,
                from_row,
                to_row,
            } => (grid.x(at), grid.y(from_row), grid.x(at), grid.y(to_row)),
            Rule::Horizontal { row, from, to } => {
                (grid.x(from), grid.y(row), grid.x(to), grid.y(row))
            }
        };
        flow.canvas_mut().draw_line(x1, y1, x2, y2);
    }

    let amount = format_amount(remaining);
    for cell in layout.cells() {
        let x = grid.x(cell.column);
        flow.set_exact(grid.y(cell.row));
        flow.advance(Pt(-7.0));
        let y = flow.y();
        flow.text(x + Pt(4.0), y, size - Pt(4.0), cell.label);

        let value = match cell.field {
            Field::Payer => {
                let lines = std::iter::once(payer.name.clone())
                    .chain(payer.lines(MAX_PAYER_ADDRESS_LINES).map(str::to_string))
                    .chain(std::iter::once(payer.postcode_and_city()));
                for line in lines {
                    flow.advance(-spacing);
                    flow.text_at(x + Pt(10.0), &line);
                }
                continue;
            }
            Field::BankName => information.bank_name.clone(),
            Field::PaymentText => parameters.payment_text.to_string(),
            Field::Amount => amount.clone(),
            Field::DueDate => parameters.due_date.to_string(),
            Field::BankAccount => format!(
                "{}       {}",
                information.bank_reg_number, information.bank_account_number
            ),
            Field::GiroCodeLine => giro_code_line(&information.giro_account_number),
            Field::Giro71CodeLine => {
                giro71_code_line(parameters.girocode.trim(), &information.giro_account_number)
            }
        };
        flow.advance(-(PAYMENT_LINE - Pt(12.0)));
        flow.text_at(x + Pt(10.0), &value);
    }

    flow.set_exact(bottom);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        canvas::PdfCanvas,
        layout::PageMetrics,
        page::{PathPaint, Shape},
    };
    use pretty_assertions::assert_eq;

    fn flow() -> Flow<PdfCanvas> {
        Flow::new(PdfCanvas::new(PageMetrics::default(), None))
    }

    fn parameters(amount: f64) -> PaymentParameters<'static> {
        PaymentParameters {
            payment_text: "Faktura 12",
            amount,
            paid: 0.0,
            pending_online: 0.0,
            due_date: "15.03.2024",
            girocode: "4711",
        }
    }

    fn information() -> PaymentInformation {
        PaymentInformation {
            bank_name: "SparNord".into(),
            bank_reg_number: "1243".into(),
            bank_account_number: "12312345678".into(),
            giro_account_number: "112321321".into(),
        }
    }

    fn payer() -> Address {
        Address {
            name: "Kunde ApS".into(),
            address: "Vej 1\r\nBygning 2".into(),
            postcode: "8000".into(),
            city: "Aarhus C".into(),
            ..Address::default()
        }
    }

    fn text(flow: &Flow<PdfCanvas>) -> String {
        flow.canvas().document().page(0).unwrap().plain_text()
    }

    #[test]
    fn deductions_are_subtracted() {
        let mut flow = flow();
        let start = flow.y();
        assert_eq!(add_payments(&mut flow, 0.0, 0.0, 100.0), 100.0);
        assert_eq!(flow.y(), start);

        let remaining = add_payments(&mut flow, 30.0, 20.0, 100.0);
        assert_eq!(remaining, 50.0);
        let text = text(&flow);
        assert!(text.contains("Betalt"));
        assert!(text.contains("30,00"));
        assert!(text.contains("Ventende betalinger"));
    }

    #[test]
    fn deduction_rows_break_the_page_when_low() {
        let mut flow = flow();
        let metrics = flow.metrics();
        let threshold = metrics.margin_bottom() + metrics.font_spacing() * 2.0;
        // room for the gap and the first row only
        flow.set_exact(threshold + Pt(20.0) + Pt(5.0));
        add_payments(&mut flow, 30.0, 20.0, 100.0);

        assert_eq!(flow.canvas().page_count(), 2);
        let first = text(&flow);
        let second = flow.canvas().document().page(1).unwrap().plain_text();
        assert!(first.contains("Betalt"));
        assert!(!first.contains("Ventende betalinger"));
        assert!(second.contains("Ventende betalinger"));
    }

    #[test]
    fn remainders_below_a_cent_are_settled() {
        let mut flow = flow();
        let mut parameters = parameters(1.10);
        parameters.paid = 0.10;
        parameters.pending_online = 1.00;
        add_payment_condition(&mut flow, 1, &parameters, &information(), &payer());
        let text = text(&flow);
        assert!(text.contains("Ventende betalinger"));
        assert!(!text.contains("Indbetalingsoplysninger"));
    }

    #[test]
    fn settled_documents_get_no_payment_box() {
        let mut flow = flow();
        let mut parameters = parameters(100.0);
        parameters.paid = 100.0;
        add_payment_condition(&mut flow, 1, &parameters, &information(), &payer());
        assert!(!text(&flow).contains("Indbetalingsoplysninger"));
    }

    #[test]
    fn unknown_method_draws_no_box() {
        let mut flow = flow();
        add_payment_condition(&mut flow, 9, &parameters(100.0), &information(), &payer());
        assert!(!text(&flow).contains("Indbetalingsoplysninger"));
    }

    #[test]
    fn bank_transfer_box_has_two_rows() {
        let mut flow = flow();
        add_payment_condition(&mut flow, 1, &parameters(1250.0), &information(), &payer());

        let page = flow.canvas().document().page(0).unwrap();
        let frame = page
            .paths()
            .find_map(|path| match (&path.shape, &path.paint) {
                (Shape::Rect(rect), PathPaint::Stroke { .. }) => Some(*rect),
                _ => None,
            })
            .unwrap();
        assert!((frame.height().0 - 52.0).abs() < 1e-3);
        assert!((flow.y().0 - frame.y1.0).abs() < 1e-3);

        let text = page.plain_text();
        assert!(text.contains("SparNord"));
        assert!(text.contains("1243       12312345678"));
        assert!(text.contains("1.250,00"));
        assert!(text.contains("Faktura 12"));
    }

    #[test]
    fn giro_box_lists_the_payer() {
        let mut flow = flow();
        add_payment_condition(&mut flow, 2, &parameters(10.0), &information(), &payer());
        let text = text(&flow);
        assert!(text.contains("Indbetaler:"));
        assert!(text.contains("Bygning 2"));
        assert!(text.contains("8000 Aarhus C"));
        assert!(text.contains(&giro_code_line("112321321")));
    }

    #[test]
    fn code_lines() {
        assert_eq!(
            giro_code_line("112321321"),
            "+01-                    +112321321-"
        );
        assert_eq!(
            giro71_code_line("4711", "112321321"),
            "+71- 000000000004711 +112321321-"
        );
    }

    #[test]
    fn layouts_by_code() {
        let rows: Vec<u8> = (1..=3)
            .filter_map(PaymentLayout::from_code)
            .map(|layout| layout.rows())
            .collect();
        assert_eq!(rows, vec![2, 3, 2]);
        assert_eq!(PaymentLayout::from_code(0), None);
    }

    #[test]
    fn box_moves_to_a_new_page_when_it_does_not_fit() {
        let mut flow = flow();
        let bottom = flow.metrics().margin_bottom();
        flow.set_exact(bottom + Pt(100.0));
        add_payment_condition(&mut flow, 3, &parameters(10.0), &information(), &payer());
        assert_eq!(flow.canvas().page_count(), 2);
        let second = flow.canvas().document().page(1).unwrap().plain_text();
        assert!(second.contains("Indbetalingsoplysninger"));
        assert!(second.contains("+71- 000000000004711 +112321321-"));
    }
}
