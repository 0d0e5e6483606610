#![allow(dead_code)]

use chrono::NaiveDate;
use debtor_pdf::{
    render::{DebtorPdf, RenderedDebtor},
    Address, Contact, ContactPerson, Danish, Debtor, DebtorKind, LineItem, PaymentInformation,
    SpanLayout,
};

pub fn payment_information() -> PaymentInformation {
    PaymentInformation {
        bank_name: "SparNord".into(),
        bank_reg_number: "1243".into(),
        bank_account_number: "12312345678".into(),
        giro_account_number: "112321321".into(),
    }
}

pub fn item(number: usize, quantity: f64, price: f64, vat: bool) -> LineItem {
    LineItem {
        number: number.to_string(),
        name: format!("Product {number}"),
        quantity,
        unit: "pcs.".into(),
        price,
        description: String::new(),
        vat,
        ..LineItem::default()
    }
}

/// An invoice for one taxable item at 100,00
pub fn invoice() -> Debtor {
    Debtor {
        kind: DebtorKind::Invoice,
        number: "1042".into(),
        date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        due_date: NaiveDate::from_ymd_opt(2024, 3, 15),
        contact: Contact {
            number: "1001".into(),
            address: Some(Address {
                name: "Kunde ApS".into(),
                address: "Søndergade 1\r\n2. sal".into(),
                postcode: "8000".into(),
                city: "Aarhus C".into(),
                cvr: "12345678".into(),
                ..Address::default()
            }),
        },
        contact_person: Some(ContactPerson {
            name: "Hans Hansen".into(),
        }),
        sender: debtor_pdf::Sender {
            name: "Intraface ApS".into(),
            address: "Algade 10".into(),
            postcode: "9000".into(),
            city: "Aalborg".into(),
            cvr: "87654321".into(),
            contact_person: "Sune Jensen".into(),
            phone: "12 34 56 78".into(),
            email: "faktura@example.com".into(),
        },
        items: vec![item(1, 1.0, 100.0, true)],
        total: 125.0,
        currency: None,
        total_currency: None,
        payment_total: 0.0,
        payment_method: 1,
        payment_information: payment_information(),
        girocode: "4711".into(),
        round_off: false,
        message: String::new(),
        invoice_text: "Betaling senest på forfaldsdatoen.".into(),
    }
}

/// One taxable product and thirteen untaxed ones, each with a one-line description.
/// Too long for one page. The total is the record's own and does not add up.
pub fn many_products() -> Debtor {
    let product = |number: u32, quantity: f64, unit: &str, price: f64, vat: bool| LineItem {
        number: number.to_string(),
        name: format!("product {number}"),
        quantity,
        unit: unit.into(),
        price,
        description: format!("test product {number}"),
        vat,
        ..LineItem::default()
    };
    let mut items = vec![product(1, 1.0, "unit", 100.0, true)];
    items.extend((0..13).map(|_| product(2, 10.0, "days", 200.0, false)));

    Debtor {
        number: "1".into(),
        items,
        total: 2125.0,
        payment_method: 2,
        girocode: String::new(),
        ..invoice()
    }
}

/// Nothing bought, nothing to pay
pub fn no_amount() -> Debtor {
    Debtor {
        items: vec![],
        total: 0.0,
        ..invoice()
    }
}

pub fn render(debtor: &Debtor) -> RenderedDebtor {
    DebtorPdf::new(Danish)
        .visit(debtor, &[])
        .expect("debtor renders")
}

/// Every text span of every page, with its page index
pub fn spans(rendered: &RenderedDebtor) -> Vec<(usize, SpanLayout)> {
    (0..rendered.page_count())
        .flat_map(|index| {
            let page = rendered.document().page(index).expect("page exists");
            page.text_spans()
                .cloned()
                .map(move |span| (index, span))
                .collect::<Vec<_>>()
        })
        .collect()
}

pub fn texts(rendered: &RenderedDebtor) -> Vec<String> {
    spans(rendered).into_iter().map(|(_, span)| span.text).collect()
}

pub fn count(rendered: &RenderedDebtor, text: &str) -> usize {
    texts(rendered).iter().filter(|span| span.as_str() == text).count()
}

/// The span drawn right after `label`, which is the value of a labelled cell
pub fn value_after(rendered: &RenderedDebtor, label: &str) -> Option<String> {
    let texts = texts(rendered);
    let position = texts.iter().position(|text| text == label)?;
    texts.get(position + 1).cloned()
}
