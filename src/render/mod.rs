//! Composition of a whole debtor document.
//!
//! [DebtorPdf] holds the settings shared by every document (page geometry, header
//! image, fonts, translation) and renders one [Debtor] per [DebtorPdf::visit] call.
//! Every call starts from a fresh canvas, so one `DebtorPdf` can render any number of
//! documents.
//!
//! ```
//! use debtor_pdf::{render::DebtorPdf, Danish};
//!
//! let renderer = DebtorPdf::new(Danish).with_compression(false);
//! # let _ = renderer;
//! ```

pub mod panel;
pub mod payment;
pub mod table;

use crate::{
    canvas::PdfCanvas,
    debtor::{pending_online_total, Debtor, DebtorKind, OnlinePayment},
    document::Document,
    font::Font,
    image::Image,
    info::Info,
    layout::{wrap::flow_paragraphs, Flow, PageMetrics},
    translation::{capitalize, Danish, Translation},
    units::Pt,
    Error,
};
use chrono::{DateTime, FixedOffset};
use panel::{add_receiver_and_sender, DocInfoEntry, Receiver};
use payment::{add_payment_condition, PaymentParameters};
use std::{fs::File, io::Write, path::Path, time::Instant};
use table::{add_product_list_headlines, add_products_list};

/// Renders invoices, credit notes and orders
pub struct DebtorPdf<T: Translation = Danish> {
    translation: T,
    metrics: PageMetrics,
    header: Option<Image>,
    fonts: Option<(Vec<u8>, Vec<u8>)>,
    compress: bool,
    creation_date: Option<DateTime<FixedOffset>>,
}

impl<T: Translation> DebtorPdf<T> {
    /// A4 with the default margins, Helvetica, no header, compressed output
    pub fn new(translation: T) -> DebtorPdf<T> {
        DebtorPdf {
            translation,
            metrics: PageMetrics::default(),
            header: None,
            fonts: None,
            compress: true,
            creation_date: None,
        }
    }

    pub fn with_metrics(mut self, metrics: PageMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Image printed at the top right of the first page and of every page a page
    /// break repeats the header on
    pub fn with_header(mut self, header: Image) -> Self {
        self.header = Some(header);
        self
    }

    /// Embed TrueType/OpenType fonts instead of using Helvetica. Both fonts are parsed
    /// right away so a broken font is reported here and not at render time.
    pub fn with_fonts(mut self, regular: Vec<u8>, bold: Vec<u8>) -> Result<Self, Error> {
        Font::load(regular.clone())?;
        Font::load(bold.clone())?;
        self.fonts = Some((regular, bold));
        Ok(self)
    }

    /// Whether content streams, fonts and images are deflated. On by default.
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Creation date written into the document info. Without one the output depends on
    /// nothing but the input.
    pub fn with_creation_date(mut self, date: DateTime<FixedOffset>) -> Self {
        self.creation_date = Some(date);
        self
    }

    pub fn metrics(&self) -> &PageMetrics {
        &self.metrics
    }

    fn canvas(&self) -> Result<PdfCanvas, Error> {
        let metrics = self.metrics.clone();
        let header = self.header.clone();
        Ok(match &self.fonts {
            Some((regular, bold)) => PdfCanvas::with_fonts(
                metrics,
                Font::load(regular.clone())?,
                Font::load(bold.clone())?,
                header,
            ),
            None => PdfCanvas::new(metrics, header),
        })
    }

    /// Lay out one debtor document. `online_payments` are the card payments made
    /// against it; the authorized ones are deducted from the amount to pay.
    ///
    /// The debtor is validated before anything is drawn. Nothing is written anywhere
    /// until the returned [RenderedDebtor] is output.
    pub fn visit(
        &self,
        debtor: &Debtor,
        online_payments: &[OnlinePayment],
    ) -> Result<RenderedDebtor, Error> {
        debtor.validate()?;
        let address = debtor
            .contact
            .address
            .as_ref()
            .ok_or(Error::MissingField("contact.address"))?;

        let started = Instant::now();
        let mut flow = Flow::new(self.canvas()?);
        flow.advance(Pt(-5.0));

        let receiver = Receiver {
            address,
            attention: debtor
                .contact_person
                .as_ref()
                .map(|person| person.name.as_str()),
            number: &debtor.contact.number,
        };

        let kind = debtor.kind.key();
        let mut docinfo = vec![
            DocInfoEntry::new(
                format!("{}:", self.translation.get(&format!("{kind} number"), None)),
                &debtor.number,
            ),
            DocInfoEntry::new("Dato:", debtor.formatted_date()),
        ];
        if debtor.kind != DebtorKind::CreditNote && debtor.due_date.is_some() {
            docinfo.push(DocInfoEntry::new(
                format!("{}:", self.translation.get(&format!("{kind} due date"), None)),
                debtor.formatted_due_date(),
            ));
        }

        let title = self.translation.get(kind, None);
        add_receiver_and_sender(&mut flow, &title, &receiver, &debtor.sender, &docinfo);

        let spacing = flow.metrics().font_spacing();
        flow.advance(-spacing);
        flow.break_page_if_needed(true);

        let (left, width) = (flow.metrics().margin_left(), flow.metrics().content_width());
        if !debtor.message.is_empty() {
            flow_paragraphs(&mut flow, left, width, &debtor.message);
        }

        let columns = add_product_list_headlines(&mut flow);
        add_products_list(&mut flow, &columns, debtor, &self.translation);

        if debtor.kind.is_payable() {
            let payment_text = format!("{} {}", capitalize(&title), debtor.number);
            let due_date = debtor.formatted_due_date();
            let parameters = PaymentParameters {
                payment_text: &payment_text,
                amount: debtor.total,
                paid: debtor.payment_total,
                pending_online: pending_online_total(online_payments),
                due_date: &due_date,
                girocode: &debtor.girocode,
            };
            add_payment_condition(
                &mut flow,
                debtor.payment_method,
                &parameters,
                &debtor.payment_information,
                address,
            );

            flow.advance(-spacing);
            flow.break_page_if_needed(true);
            flow_paragraphs(&mut flow, left, width, &debtor.invoice_text);
        }

        let mut document = flow.into_canvas().into_document();
        log::info!(
            "{} {} laid out on {} page(s) in {:?}",
            kind,
            debtor.number,
            document.page_count(),
            started.elapsed()
        );

        let mut info = Info::new();
        info.title(format!("{} {}", capitalize(&title), debtor.number))
            .author(&debtor.sender.name);
        if let Some(date) = self.creation_date {
            info.creation_date(date);
        }
        document.set_info(info);

        Ok(RenderedDebtor {
            document,
            compress: self.compress,
        })
    }
}

/// A laid out document waiting to be written. Each output method consumes it, so a
/// document is serialized exactly once.
pub struct RenderedDebtor {
    document: Document,
    compress: bool,
}

impl RenderedDebtor {
    pub fn page_count(&self) -> usize {
        self.document.page_count()
    }

    /// The pages, for inspecting what was drawn where
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn to_bytes(self) -> Result<Vec<u8>, Error> {
        self.document.to_bytes(self.compress)
    }

    pub fn write_to<W: Write>(self, writer: W) -> Result<(), Error> {
        self.document.write(writer, self.compress)
    }

    pub fn save<P: AsRef<Path>>(self, path: P) -> Result<(), Error> {
        let file = File::create(path)?;
        self.write_to(std::io::BufWriter::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debtor::{Address, Contact, LineItem, PaymentInformation, Sender};
    use chrono::NaiveDate;

    fn debtor(kind: DebtorKind) -> Debtor {
        Debtor {
            kind,
            number: "42".into(),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2024, 3, 15),
            contact: Contact {
                number: "1001".into(),
                address: Some(Address {
                    name: "Kunde ApS".into(),
                    ..Address::default()
                }),
            },
            contact_person: None,
            sender: Sender {
                name: "Intraface".into(),
                ..Sender::default()
            },
            items: vec![LineItem {
                number: "1".into(),
                name: "Konsulenttimer".into(),
                quantity: 1.0,
                unit: "hours".into(),
                price: 100.0,
                vat: true,
                ..LineItem::default()
            }],
            total: 125.0,
            currency: None,
            total_currency: None,
            payment_total: 0.0,
            payment_method: 1,
            payment_information: PaymentInformation::default(),
            girocode: String::new(),
            round_off: false,
            message: String::new(),
            invoice_text: String::new(),
        }
    }

    fn text(rendered: &RenderedDebtor) -> String {
        (0..rendered.page_count())
            .filter_map(|index| rendered.document().page(index))
            .map(|page| page.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn credit_notes_have_no_due_date_or_payment_box() {
        let rendered = DebtorPdf::new(Danish)
            .visit(&debtor(DebtorKind::CreditNote), &[])
            .unwrap();
        let text = text(&rendered);
        assert!(text.contains("Kreditnota"));
        assert!(text.contains("Kreditnotanr.:"));
        assert!(!text.contains("Forfaldsdato:"));
        assert!(!text.contains("Indbetalingsoplysninger"));
    }

    #[test]
    fn orders_show_a_delivery_date() {
        let rendered = DebtorPdf::new(Danish)
            .visit(&debtor(DebtorKind::Order), &[])
            .unwrap();
        let text = text(&rendered);
        assert!(text.contains("Leveringsdato:"));
        assert!(text.contains("Ordrebekræftelse 42"));
    }

    #[test]
    fn units_are_translated() {
        let rendered = DebtorPdf::new(Danish)
            .visit(&debtor(DebtorKind::Invoice), &[])
            .unwrap();
        assert!(text(&rendered).contains("timer"));
    }

    #[test]
    fn broken_fonts_are_rejected_up_front() {
        let result = DebtorPdf::new(Danish).with_fonts(vec![0; 16], vec![0; 16]);
        assert!(matches!(result, Err(Error::FontParsing(_))));
    }
}
