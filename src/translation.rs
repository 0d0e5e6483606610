//! Lookup of the localized words printed on debtor documents.

/// Source of localized strings: section titles, document kinds and unit names.
///
/// `context` narrows a key that means different things in different places; units
/// are looked up with the `product` context.
pub trait Translation {
    fn get(&self, key: &str, context: Option<&str>) -> String;
}

/// The built-in Danish dictionary. Keys it does not know are returned unchanged.
#[derive(Debug, Default, Copy, Clone)]
pub struct Danish;

impl Translation for Danish {
    fn get(&self, key: &str, context: Option<&str>) -> String {
        let found = match (context, key) {
            (Some("product"), "pcs.") => Some("stk."),
            (Some("product"), "piece") => Some("stk."),
            (Some("product"), "hours") => Some("timer"),
            (Some("product"), "hour") => Some("time"),
            (Some("product"), "days") => Some("dage"),
            (Some("product"), "months") => Some("mdr."),
            (Some("product"), "kg") => Some("kg"),
            (Some("product"), "m") => Some("m"),
            (Some("product"), "package") => Some("pakke"),
            (_, "invoice") => Some("Faktura"),
            (_, "credit_note") => Some("Kreditnota"),
            (_, "order") => Some("Ordrebekræftelse"),
            (_, "invoice number") => Some("Fakturanr."),
            (_, "credit_note number") => Some("Kreditnotanr."),
            (_, "order number") => Some("Ordrenr."),
            (_, "invoice due date") => Some("Forfaldsdato"),
            (_, "order due date") => Some("Leveringsdato"),
            (_, "credit_note due date") => Some("Forfaldsdato"),
            _ => None,
        };
        found.map(str::to_string).unwrap_or_else(|| key.to_string())
    }
}

impl<T: Translation + ?Sized> Translation for &T {
    fn get(&self, key: &str, context: Option<&str>) -> String {
        (**self).get(key, context)
    }
}

impl<T: Translation + ?Sized> Translation for Box<T> {
    fn get(&self, key: &str, context: Option<&str>) -> String {
        (**self).get(key, context)
    }
}

/// Upper-case the first letter
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
