//! The itemized product table and the totals under it.
//!
//! Rows are shaded in alternating bands. Taxable items are grouped: after the last item
//! of a run of taxable items a subtotal row states the 25% VAT of everything so far and
//! folds it into the running total. The band flips once per item and once more at each
//! subtotal row, so the rows after a subtotal keep the shading the subtotal row had.

use crate::{
    canvas::Canvas,
    debtor::{Debtor, DebtorKind, LineItem},
    layout::{
        strip_markup,
        wrap::{paragraphs, wrap_at},
        Flow, PageMetrics,
    },
    money::{format_amount, same_cents},
    translation::Translation,
    units::Pt,
};

pub const VAT_RATE: f64 = 0.25;

/// Room kept free left of a right-aligned column for the wrapped text next to it
const COLUMN_GAP: Pt = Pt(42.0);

/// Horizontal anchors of the table, fixed for the whole document
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColumnLayout {
    /// Item numbers are right-aligned here
    pub number_right: Pt,
    /// Names, descriptions and the subtotal text start here
    pub description_x: Pt,
    pub quantity_right: Pt,
    /// Units start here, as do the total labels
    pub unit_x: Pt,
    pub price_right: Pt,
    pub amount_right: Pt,
    /// Wrap width of item names, which share their line with the figures
    pub name_width: Pt,
    /// Wrap width of descriptions, which only have the amount column beside them
    pub description_width: Pt,
}

impl ColumnLayout {
    pub fn new(metrics: &PageMetrics) -> ColumnLayout {
        let left = metrics.margin_left();
        let right = metrics.right_margin_position();

        let description_x = left + Pt(48.0);
        let quantity_right = right - Pt(150.0);
        let price_right = right - Pt(60.0);

        ColumnLayout {
            number_right: left + Pt(38.0),
            description_x,
            quantity_right,
            unit_x: right - Pt(145.0),
            price_right,
            amount_right: right,
            name_width: quantity_right - description_x - COLUMN_GAP,
            description_width: price_right - description_x - COLUMN_GAP,
        }
    }
}

/// Whether the item at `index` closes a run of taxable items: it is taxable and the
/// next item is not, or there is no next item
pub fn is_vat_group_boundary(items: &[LineItem], index: usize) -> bool {
    match items.get(index) {
        Some(item) if item.vat => items.get(index + 1).map_or(true, |next| !next.vat),
        _ => false,
    }
}

/// Shading of one item and of the subtotal row after it, if it closes a VAT group
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RowBanding {
    pub item: bool,
    pub subtotal: Option<bool>,
}

/// The shading of every row of the table, starting unshaded
pub fn banding_plan(items: &[LineItem]) -> Vec<RowBanding> {
    let mut band_on = false;
    (0..items.len())
        .map(|index| {
            let item = band_on;
            let subtotal = is_vat_group_boundary(items, index).then(|| {
                band_on = !band_on;
                band_on
            });
            band_on = !band_on;
            RowBanding { item, subtotal }
        })
        .collect()
}

/// Column headings and the rule under them
pub fn add_product_list_headlines<C: Canvas>(flow: &mut Flow<C>) -> ColumnLayout {
    flow.advance(Pt(-40.0));
    let metrics = flow.metrics();
    let gap = metrics.font_spacing() - metrics.font_size;
    // the headings and the first item line stay together
    if flow.needs_room(metrics.font_spacing() * 2.0 + gap) {
        flow.break_page(true);
    }

    let columns = ColumnLayout::new(flow.metrics());
    flow.text_right(columns.number_right, "Varenr.");
    flow.text_at(columns.description_x, "Tekst");
    flow.text_right(columns.quantity_right, "Antal");
    flow.text_right(columns.price_right, "Pris");
    flow.text_right(columns.amount_right - Pt(3.0), "Beløb");

    flow.advance(-gap);
    flow.full_rule();
    columns
}

/// Draw every item with its subtotal rows, then the totals. Returns the running
/// total, VAT included.
pub fn add_products_list<C: Canvas>(
    flow: &mut Flow<C>,
    columns: &ColumnLayout,
    debtor: &Debtor,
    translation: &dyn Translation,
) -> f64 {
    let items = &debtor.items;
    let foreign = debtor.is_foreign();
    let mut running_total = 0.0;

    for (index, (item, banding)) in items.iter().zip(banding_plan(items)).enumerate() {
        running_total += add_item(flow, columns, item, banding.item, foreign, translation);
        flow.break_page_if_needed(true);

        if let Some(banded) = banding.subtotal {
            log::debug!("VAT group closes at item {index}");
            running_total = add_vat_subtotal(flow, columns, running_total, banded);
            flow.break_page_if_needed(true);
        }
    }

    if flow.needs_page_break() {
        flow.break_page(false);
    }
    add_total_amount(flow, columns, debtor, running_total);
    running_total
}

/// One body line: optional band, move to the baseline
fn start_line<C: Canvas>(flow: &mut Flow<C>, banded: bool) {
    if banded {
        flow.band();
    }
    let metrics = flow.metrics();
    let to_baseline = metrics.font_padding_top + metrics.font_size;
    flow.advance(-to_baseline);
}

fn end_line<C: Canvas>(flow: &mut Flow<C>) {
    let padding = flow.metrics().font_padding_bottom;
    flow.advance(-padding);
    flow.break_page_if_needed(true);
}

/// Draw one item and return its amount
fn add_item<C: Canvas>(
    flow: &mut Flow<C>,
    columns: &ColumnLayout,
    item: &LineItem,
    banded: bool,
    foreign: bool,
    translation: &dyn Translation,
) -> f64 {
    let size = flow.metrics().font_size;

    start_line(flow, banded);
    flow.text_right(columns.number_right, &item.number);

    if !item.unit.is_empty() {
        flow.text_right(columns.quantity_right, &format_amount(item.quantity));
        flow.text_at(columns.unit_x, &translation.get(&item.unit, Some("product")));
        flow.text_right(columns.price_right, &format_amount(item.unit_price(foreign)));
    }

    let amount = item.amount(foreign);
    flow.text_right(columns.amount_right, &format_amount(amount));

    // the first name line shares the baseline with the figures
    let name = strip_markup(&item.name);
    let mut rest = name.as_str();
    let mut first = true;
    loop {
        if !first {
            start_line(flow, banded);
        }
        first = false;

        let y = flow.y();
        rest = wrap_at(flow, columns.description_x, y, columns.name_width, size, rest);
        end_line(flow);
        if rest.is_empty() {
            break;
        }
    }

    if !item.description.is_empty() {
        add_description(flow, columns, &item.description, banded);
    }

    amount
}

fn add_description<C: Canvas>(
    flow: &mut Flow<C>,
    columns: &ColumnLayout,
    description: &str,
    banded: bool,
) {
    let metrics = flow.metrics();
    let (size, spacing) = (metrics.font_size, metrics.font_spacing());

    // the half-line gap and the first description line stay together
    if flow.needs_room(spacing * 2.0 + spacing / 2.0) {
        flow.break_page(true);
    }

    flow.advance(-spacing / 2.0);
    if banded {
        let y = flow.y();
        flow.band_with_height(y, spacing / 2.0);
    }

    let description = strip_markup(description);
    for paragraph in paragraphs(&description) {
        if paragraph.is_empty() {
            if banded {
                flow.band();
            }
            flow.advance(-spacing);
            flow.break_page_if_needed(true);
            continue;
        }

        let mut rest = paragraph;
        while !rest.is_empty() {
            start_line(flow, banded);
            // raised a point so descenders stay inside the band
            let y = flow.y() + Pt(1.0);
            rest = wrap_at(flow, columns.description_x, y, columns.description_width, size, rest);
            end_line(flow);
        }
    }
}

/// The "25% moms" row closing a VAT group. Returns the running total with VAT folded in.
fn add_vat_subtotal<C: Canvas>(
    flow: &mut Flow<C>,
    columns: &ColumnLayout,
    running_total: f64,
    banded: bool,
) -> f64 {
    if banded {
        flow.band();
    }

    flow.canvas_mut().set_line_width(Pt(0.5));
    flow.full_rule();

    let metrics = flow.metrics();
    let (to_baseline, padding) = (
        metrics.font_size + metrics.font_padding_top,
        metrics.font_padding_bottom,
    );
    flow.advance(-to_baseline);
    flow.text_at(
        columns.description_x,
        &format!(
            "<b>{}% moms af {}</b>",
            VAT_RATE * 100.0,
            format_amount(running_total)
        ),
    );
    flow.text_right(
        columns.amount_right,
        &format!("<b>{}</b>", format_amount(running_total * VAT_RATE)),
    );

    flow.advance(-padding);
    flow.full_rule();
    flow.canvas_mut().set_line_width(Pt(1.0));
    flow.advance(Pt(-1.0));

    running_total * (1.0 + VAT_RATE)
}

/// Total line, preceded by the unrounded sum when an invoice total was rounded
pub fn add_total_amount<C: Canvas>(
    flow: &mut Flow<C>,
    columns: &ColumnLayout,
    debtor: &Debtor,
    running_total: f64,
) {
    let metrics = flow.metrics();
    let (to_baseline, padding) = (
        metrics.font_size + metrics.font_padding_top,
        metrics.font_padding_bottom,
    );

    flow.canvas_mut().set_line_width(Pt(1.0));
    flow.full_rule();

    let currency = debtor.currency_code();
    let debtor_total = debtor.printed_total();

    let rounded = debtor.round_off
        && debtor.kind == DebtorKind::Invoice
        && !same_cents(running_total, debtor_total);
    let label = if rounded {
        flow.advance(-to_baseline);
        flow.text_at(columns.unit_x, "I alt:");
        flow.text_right(columns.amount_right, &format_amount(running_total));
        flow.advance(-padding);
        format!("Total afrundet {currency}:")
    } else {
        format!("Total {currency}:")
    };

    flow.break_page_if_needed(true);

    flow.advance(-to_baseline);
    flow.text_at(columns.unit_x, &format!("<b>{label}</b>"));
    flow.text_right(
        columns.amount_right,
        &format!("<b>{}</b>", format_amount(debtor_total)),
    );
    flow.advance(-padding);

    let right = flow.metrics().right_margin_position();
    flow.rule(columns.unit_x, right);
}
