//! Loose coercion of persisted JSON values.
//!
//! Carts written by older storefront builds (or edited by hand) may carry
//! numbers where strings are expected, prices as `"1.5 DT"`, or quantities
//! as `"3"`. These helpers fold such values into the typed fields of a
//! [`LineItem`](crate::LineItem) the same way the storefront always has:
//! falsy values become empty, numeric prefixes are honored, and anything
//! else falls back to a default that validation later rejects or accepts.

use serde_json::Value;

/// Largest integer an `f64` represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Coerce a value to text.
///
/// - strings are returned unchanged
/// - numbers use their canonical decimal form (`7.0` becomes `"7"`)
/// - `true` becomes `"true"`
/// - falsy values (`null`, `false`, `0`) and containers become `""`
#[must_use]
pub fn to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(true) => "true".to_owned(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                if i == 0 { String::new() } else { i.to_string() }
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                n.as_f64().map_or_else(String::new, format_float)
            }
        }
        Value::Null | Value::Bool(false) | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn format_float(f: f64) -> String {
    if f == 0.0 || !f.is_finite() {
        String::new()
    } else if f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER {
        (f as i64).to_string()
    } else {
        f.to_string()
    }
}

/// Coerce a value to a price.
///
/// Numbers are taken as-is, strings contribute their leading float prefix
/// (`"1.5 DT"` is `1.5`). Anything else, including non-finite results,
/// coerces to `0.0`, which no valid line item carries.
#[must_use]
pub fn to_price(value: &Value) -> f64 {
    let price = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_float_prefix(s),
        _ => None,
    };
    price.filter(|p| p.is_finite()).unwrap_or(0.0)
}

/// Coerce a value to a quantity.
///
/// Numbers are truncated toward zero, strings contribute their leading
/// integer prefix (`"3.7"` is `3`). A missing prefix or a zero result
/// defaults to `1`; negative results are kept so validation can reject them.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn to_quantity(value: &Value) -> i64 {
    let quantity = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|_| i64::MAX))
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => parse_int_prefix(s),
        _ => None,
    };
    match quantity {
        None | Some(0) => 1,
        Some(q) => q,
    }
}

/// Parse the longest leading decimal float of `s`, ignoring leading whitespace.
///
/// Returns `None` when `s` does not start with a number.
#[must_use]
pub fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_digits = count_digits(bytes, end);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(bytes, end + 1);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(bytes, exp_end);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s.get(..end)?.parse().ok()
}

/// Parse the leading decimal integer of `s`, ignoring leading whitespace.
///
/// Values beyond the `i64` range saturate.
#[must_use]
pub fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, s.get(1..)?),
        Some(b'+') => (false, s.get(1..)?),
        _ => (false, s),
    };

    let mut seen = false;
    let mut value: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        seen = true;
        let digit = i64::from(b - b'0');
        value = value.saturating_mul(10).saturating_add(digit);
    }

    if !seen {
        return None;
    }
    Some(if negative { -value } else { value })
}

fn count_digits(bytes: &[u8], start: usize) -> usize {
    bytes
        .get(start..)
        .map_or(0, |rest| rest.iter().take_while(|b| b.is_ascii_digit()).count())
}
