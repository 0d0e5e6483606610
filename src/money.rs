//! Danish number formatting for amounts and quantities.

/// Round to whole cents, rounding halves away from zero.
///
/// The value is pre-rounded at a finer precision first so amounts like `1.005`, which
/// are stored as `1.00499999...`, still round up the way they read.
pub fn to_cents(value: f64) -> i64 {
    let scaled = value * 100.0;
    let pre_rounded = (scaled * 1e6).round() / 1e6;
    pre_rounded.round() as i64
}

/// Whether two amounts show the same at two decimals
pub fn same_cents(a: f64, b: f64) -> bool {
    to_cents(a) == to_cents(b)
}

/// Two decimals, comma as the decimal separator and dot between thousands:
/// `1234567.891` becomes `1.234.567,89`
pub fn format_amount(value: f64) -> String {
    let cents = to_cents(value);
    let negative = cents < 0;
    let cents = cents.unsigned_abs();

    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    format!(
        "{}{},{:02}",
        if negative { "-" } else { "" },
        grouped,
        cents % 100
    )
}
