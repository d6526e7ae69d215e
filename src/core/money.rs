use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// Read a backend amount leniently.
///
/// Numbers are taken as-is. Strings are read up to the end of their longest
/// leading numeric prefix (`"10.5 BDT"` is `10.5`), after leading whitespace.
/// Anything else, including an empty or non-numeric string, is `None`.
pub fn parse_amount(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => parse_numeric_prefix(&n.to_string()),
        Value::String(s) => parse_numeric_prefix(s),
        _ => None,
    }
}

/// Like [`parse_amount`] but coerces unreadable values to zero.
pub fn amount_or_zero(value: Option<&Value>) -> Decimal {
    match value {
        None | Some(Value::Null) => Decimal::ZERO,
        Some(v) => parse_amount(v).unwrap_or_else(|| {
            log::warn!("Non-numeric amount {} treated as zero", v);
            Decimal::ZERO
        }),
    }
}

fn parse_numeric_prefix(s: &str) -> Option<Decimal> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut pos = 0;

    let negative = match bytes.first() {
        Some(b'-') => {
            pos += 1;
            true
        }
        Some(b'+') => {
            pos += 1;
            false
        }
        _ => false,
    };

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let int_part = &s[int_start..pos];

    let mut frac_part = "";
    if pos < bytes.len() && bytes[pos] == b'.' {
        let frac_start = pos + 1;
        let mut end = frac_start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        frac_part = &s[frac_start..end];
        pos = end;
    }

    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    // exponent only counts when at least one digit follows it
    let mut exponent = "";
    if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
        let mut end = pos + 1;
        if end < bytes.len() && (bytes[end] == b'-' || bytes[end] == b'+') {
            end += 1;
        }
        let digits_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end > digits_start {
            exponent = &s[pos + 1..end];
        }
    }

    let mut mantissa = String::new();
    if negative {
        mantissa.push('-');
    }
    mantissa.push_str(if int_part.is_empty() { "0" } else { int_part });
    if !frac_part.is_empty() {
        mantissa.push('.');
        mantissa.push_str(frac_part);
    }

    let parsed = if exponent.is_empty() {
        Decimal::from_str(&mantissa)
    } else {
        Decimal::from_scientific(&format!("{}e{}", mantissa, exponent))
    };
    parsed.ok()
}

/// Format an amount with an optional currency sign, e.g. `৳1200.00` or `-$5.50`.
pub fn format_amount(sign: Option<&str>, amount: Decimal) -> String {
    let sign = sign.unwrap_or("");
    if amount < Decimal::ZERO {
        format!("-{}{:.2}", sign, amount.abs())
    } else {
        format!("{}{:.2}", sign, amount)
    }
}
