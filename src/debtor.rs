//! The debtor record: everything printed on an invoice, credit note or order.
//!
//! All types deserialize from JSON with `serde`. Multi-line addresses use `\r\n` between
//! lines (a lone `\n` is accepted as well); optional text fields default to empty.

use crate::Error;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtorKind {
    Invoice,
    CreditNote,
    Order,
}

impl DebtorKind {
    /// The key the kind is translated by
    pub fn key(&self) -> &'static str {
        match self {
            DebtorKind::Invoice => "invoice",
            DebtorKind::CreditNote => "credit_note",
            DebtorKind::Order => "order",
        }
    }

    /// Invoices and orders carry payment instructions, credit notes don't
    pub fn is_payable(&self) -> bool {
        matches!(self, DebtorKind::Invoice | DebtorKind::Order)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub name: String,
    /// Street lines, separated by line breaks. At most three are printed.
    pub address: String,
    pub postcode: String,
    pub city: String,
    pub country: String,
    pub cvr: String,
    pub ean: String,
    pub phone: String,
    pub email: String,
}

impl Address {
    /// The street lines, at most `max`
    pub fn lines(&self, max: usize) -> impl Iterator<Item = &str> {
        crate::layout::wrap::paragraphs(&self.address).take(max)
    }

    pub fn postcode_and_city(&self) -> String {
        format!("{} {}", self.postcode, self.city)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Customer number
    #[serde(default)]
    pub number: String,
    pub address: Option<Address>,
}

/// The person at the customer the document is addressed to
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactPerson {
    pub name: String,
}

/// The company issuing the document
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sender {
    pub name: String,
    pub address: String,
    pub postcode: String,
    pub city: String,
    pub cvr: String,
    pub contact_person: String,
    pub phone: String,
    pub email: String,
}

impl Sender {
    pub fn lines(&self, max: usize) -> impl Iterator<Item = &str> {
        crate::layout::wrap::paragraphs(&self.address).take(max)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineItem {
    pub number: String,
    pub name: String,
    pub quantity: f64,
    /// Untranslated unit key. An empty unit marks a text-only line: no quantity or
    /// price is printed.
    pub unit: String,
    pub price: f64,
    /// Price in the debtor's foreign currency, when it has one
    pub price_currency: Option<f64>,
    pub description: String,
    #[serde(deserialize_with = "flag")]
    pub vat: bool,
}

impl LineItem {
    /// Unit price in the currency the document is printed in
    pub fn unit_price(&self, foreign: bool) -> f64 {
        match (foreign, self.price_currency) {
            (true, Some(price)) => price,
            _ => self.price,
        }
    }

    pub fn amount(&self, foreign: bool) -> f64 {
        self.quantity * self.unit_price(foreign)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    pub iso_code: String,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentInformation {
    pub bank_name: String,
    pub bank_reg_number: String,
    pub bank_account_number: String,
    pub giro_account_number: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debtor {
    #[serde(rename = "type")]
    pub kind: DebtorKind,
    pub number: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    pub contact: Contact,
    #[serde(default)]
    pub contact_person: Option<ContactPerson>,
    pub sender: Sender,
    #[serde(default)]
    pub items: Vec<LineItem>,
    pub total: f64,
    #[serde(default)]
    pub currency: Option<Currency>,
    #[serde(default)]
    pub total_currency: Option<f64>,
    /// Payments already received
    #[serde(default)]
    pub payment_total: f64,
    /// 1: bank transfer, 2: giro account, 3: giro +71
    #[serde(default)]
    pub payment_method: u8,
    #[serde(default)]
    pub payment_information: PaymentInformation,
    #[serde(default)]
    pub girocode: String,
    #[serde(default, deserialize_with = "flag")]
    pub round_off: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub invoice_text: String,
}

impl Debtor {
    /// Check the record before anything is drawn
    pub fn validate(&self) -> Result<(), Error> {
        if self.contact.address.is_none() {
            return Err(Error::MissingField("contact.address"));
        }
        if self.currency.is_some() {
            if self.total_currency.is_none() {
                return Err(Error::MissingField("total_currency"));
            }
            if let Some(item) = self.items.iter().find(|item| item.price_currency.is_none()) {
                log::debug!("item `{}` has no foreign price", item.number);
                return Err(Error::MissingField("items.price_currency"));
            }
        }
        if self.payment_method == 3 {
            let girocode = self.girocode.trim();
            if girocode.len() > 15 || !girocode.chars().all(|ch| ch.is_ascii_digit()) {
                return Err(Error::InvalidInput(format!(
                    "girocode `{}` is not a number of at most 15 digits",
                    self.girocode
                )));
            }
        }
        Ok(())
    }

    /// Whether amounts are printed in a foreign currency
    pub fn is_foreign(&self) -> bool {
        self.currency.is_some()
    }

    pub fn currency_code(&self) -> &str {
        self.currency
            .as_ref()
            .map(|currency| currency.iso_code.as_str())
            .unwrap_or("DKK")
    }

    /// The total in the currency the document is printed in
    pub fn printed_total(&self) -> f64 {
        match (&self.currency, self.total_currency) {
            (Some(_), Some(total)) => total,
            _ => self.total,
        }
    }

    /// Danish date format, `dd.mm.yyyy`
    pub fn formatted_date(&self) -> String {
        self.date.format("%d.%m.%Y").to_string()
    }

    pub fn formatted_due_date(&self) -> String {
        self.due_date
            .map(|date| date.format("%d.%m.%Y").to_string())
            .unwrap_or_default()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnlinePaymentStatus {
    Created,
    Authorized,
    Captured,
    Reversed,
    Cancelled,
}

impl OnlinePaymentStatus {
    /// Status codes as stored by the payment provider integration
    pub fn from_code(code: u8) -> Option<OnlinePaymentStatus> {
        match code {
            1 => Some(OnlinePaymentStatus::Created),
            2 => Some(OnlinePaymentStatus::Authorized),
            3 => Some(OnlinePaymentStatus::Captured),
            4 => Some(OnlinePaymentStatus::Reversed),
            5 => Some(OnlinePaymentStatus::Cancelled),
            _ => None,
        }
    }
}

/// A card payment made online against the debtor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnlinePayment {
    pub amount: f64,
    pub status: OnlinePaymentStatus,
}

/// Sum of the payments that are authorized but not yet captured
pub fn pending_online_total(payments: &[OnlinePayment]) -> f64 {
    payments
        .iter()
        .filter(|payment| payment.status == OnlinePaymentStatus::Authorized)
        .map(|payment| payment.amount)
        .sum()
}

/// Flags come as `true`/`false` or as `1`/`0`
fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => value,
        Flag::Int(value) => value != 0,
    })
}
