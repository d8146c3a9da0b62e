//! Parsing and validation of book identities coming from request bodies and
//! URL path segments.
//!
//! Path segments are parsed with the same leniency clients of this API rely
//! on: `Number()`-style for reads and `parseInt`-style for update/delete.

use serde_json::Value as JsonValue;

use super::BookId;

/// Returns the identity if `value` is a JSON number with no fractional part
/// and at least 1. Strings, booleans, nulls and missing values are rejected.
pub fn positive_book_id(value: Option<&JsonValue>) -> Option<BookId> {
    let number = match value? {
        JsonValue::Number(n) => n,
        _ => return None,
    };

    let id = if let Some(i) = number.as_i64() {
        i
    } else {
        // u64 beyond i64::MAX or a float such as `4.0` / `4.5`.
        let f = number.as_f64()?;
        if !f.is_finite() || f.fract() != 0.0 || f >= i64::MAX as f64 || f <= i64::MIN as f64 {
            return None;
        }
        f as i64
    };

    (id >= 1).then_some(id)
}

/// Whole-string numeric parse. Integral values (negative and zero included)
/// map to a key; fractional or non-numeric input yields `None`, which can
/// never match a stored book. Unsigned `0x`, `0o` and `0b` literals are
/// accepted as numbers too.
pub fn numeric_key(raw: &str) -> Option<BookId> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0);
    }
    if let Some((radix, digits)) = radix_literal(trimmed) {
        if digits.is_empty() {
            return None;
        }
        return i64::from_str_radix(digits, radix).ok();
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return Some(i);
    }
    // Reject spellings like "inf" / "NaN" that `f64::from_str` accepts.
    if trimmed.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return None;
    }
    let f = trimmed.parse::<f64>().ok()?;
    if !f.is_finite() || f.fract() != 0.0 || f >= i64::MAX as f64 || f <= i64::MIN as f64 {
        return None;
    }
    Some(f as i64)
}

fn radix_literal(s: &str) -> Option<(u32, &str)> {
    let prefix = s.get(..2)?;
    let radix = match prefix {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };
    Some((radix, &s[2..]))
}

/// Result of a leading-integer parse of a path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadingInteger {
    Key(BookId),
    /// Digits were found but the value does not fit a key, so no book can
    /// be stored under it.
    OutOfRange,
    NotANumber,
}

/// Leading-integer parse: skips leading whitespace, accepts an optional sign
/// and consumes digits until the first non-digit (`"12abc"` is 12, `"4.5"`
/// is 4). A `0x` prefix switches to hexadecimal.
pub fn leading_integer(raw: &str) -> LeadingInteger {
    let s = raw.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, s) = if s.starts_with("0x") || s.starts_with("0X") {
        (16, &s[2..])
    } else {
        (10, s)
    };

    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_digit(radix))
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    let digits = &s[..end];
    if digits.is_empty() {
        return LeadingInteger::NotANumber;
    }

    let signed = if negative {
        format!("-{}", digits)
    } else {
        digits.to_string()
    };
    match i64::from_str_radix(&signed, radix) {
        Ok(id) => LeadingInteger::Key(id),
        Err(_) => LeadingInteger::OutOfRange,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn positive_ids_are_accepted() {
        assert_eq!(positive_book_id(Some(&json!(1))), Some(1));
        assert_eq!(positive_book_id(Some(&json!(56))), Some(56));
        assert_eq!(positive_book_id(Some(&json!(7.0))), Some(7));
    }

    #[test]
    fn non_positive_fractional_and_non_numeric_ids_are_rejected() {
        for bad in [
            json!(-5),
            json!(0),
            json!(4.5),
            json!("QQQ"),
            json!("5"),
            json!(null),
            json!(true),
            json!([1]),
            json!(1e20),
        ] {
            assert_eq!(positive_book_id(Some(&bad)), None, "accepted {}", bad);
        }
        assert_eq!(positive_book_id(None), None);
    }

    #[test]
    fn numeric_key_passes_integral_values_through() {
        assert_eq!(numeric_key("2"), Some(2));
        assert_eq!(numeric_key("-3"), Some(-3));
        assert_eq!(numeric_key("0"), Some(0));
        assert_eq!(numeric_key(" 12 "), Some(12));
        assert_eq!(numeric_key("1e2"), Some(100));
        assert_eq!(numeric_key("4.0"), Some(4));
    }

    #[test]
    fn numeric_key_rejects_fractional_and_text() {
        assert_eq!(numeric_key("4.5"), None);
        assert_eq!(numeric_key("abc"), None);
        assert_eq!(numeric_key("12abc"), None);
        assert_eq!(numeric_key("NaN"), None);
        assert_eq!(numeric_key("inf"), None);
    }

    #[test]
    fn numeric_key_accepts_radix_literals() {
        assert_eq!(numeric_key("0x10"), Some(16));
        assert_eq!(numeric_key("0o17"), Some(15));
        assert_eq!(numeric_key("0b11"), Some(3));
        assert_eq!(numeric_key("0x"), None);
        assert_eq!(numeric_key("-0x10"), None);
        assert_eq!(numeric_key("0b12"), None);
    }

    #[test]
    fn leading_integer_stops_at_first_non_digit() {
        assert_eq!(leading_integer("445"), LeadingInteger::Key(445));
        assert_eq!(leading_integer("12abc"), LeadingInteger::Key(12));
        assert_eq!(leading_integer("4.5"), LeadingInteger::Key(4));
        assert_eq!(leading_integer("  -7"), LeadingInteger::Key(-7));
        assert_eq!(leading_integer("+9"), LeadingInteger::Key(9));
        assert_eq!(leading_integer("0x1A"), LeadingInteger::Key(26));
        assert_eq!(leading_integer("-9223372036854775808"), LeadingInteger::Key(i64::MIN));
    }

    #[test]
    fn leading_integer_without_digits_is_not_a_number() {
        assert_eq!(leading_integer("df"), LeadingInteger::NotANumber);
        assert_eq!(leading_integer(""), LeadingInteger::NotANumber);
        assert_eq!(leading_integer("-"), LeadingInteger::NotANumber);
        assert_eq!(leading_integer("0x"), LeadingInteger::NotANumber);
    }

    #[test]
    fn leading_integer_too_large_for_a_key_is_out_of_range() {
        assert_eq!(leading_integer("99999999999999999999"), LeadingInteger::OutOfRange);
        assert_eq!(leading_integer("-99999999999999999999x"), LeadingInteger::OutOfRange);
    }
}
