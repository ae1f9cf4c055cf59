// SPDX-License-Identifier: Apache-2.0

//! Numeric literal scanning and float output formatting.
//!
//! Classification rule: a literal is a Float iff a fractional part or a
//! well-formed exponent was consumed, otherwise it is an Integer. An
//! exponent without digits is left unconsumed, so `1e` scans as the integer
//! `1` with the `e` remaining for the caller to reject in context.

use core::str;

use crate::error::ParseErrorKind;

/// A scanned numeric literal.
#[derive(Debug, PartialEq)]
pub(crate) enum NumberToken {
    Integer(i64),
    Float(f64),
}

/// Scans one numeric literal starting at `start` and returns the token plus
/// the position one past its final byte.
///
/// Integers that overflow `i64` fall back to a Float of the same text.
pub(crate) fn scan_number(
    input: &[u8],
    start: usize,
) -> Result<(NumberToken, usize), ParseErrorKind> {
    let mut pos = start;
    if input.get(pos) == Some(&b'-') {
        pos += 1;
    }
    while matches!(input.get(pos), Some(b) if b.is_ascii_digit()) {
        pos += 1;
    }

    let mut is_float = false;
    if input.get(pos) == Some(&b'.') {
        is_float = true;
        pos += 1;
        while matches!(input.get(pos), Some(b) if b.is_ascii_digit()) {
            pos += 1;
        }
    }

    if matches!(input.get(pos), Some(b'e' | b'E')) {
        let mut exp_pos = pos + 1;
        if matches!(input.get(exp_pos), Some(b'+' | b'-')) {
            exp_pos += 1;
        }
        let exp_digits_start = exp_pos;
        while matches!(input.get(exp_pos), Some(b) if b.is_ascii_digit()) {
            exp_pos += 1;
        }
        if exp_pos > exp_digits_start {
            is_float = true;
            pos = exp_pos;
        }
    }

    let bytes = input
        .get(start..pos)
        .ok_or(ParseErrorKind::InvalidNumber)?;
    let text = str::from_utf8(bytes).map_err(|_| ParseErrorKind::InvalidNumber)?;

    let token = if is_float {
        NumberToken::Float(text.parse::<f64>().map_err(|_| ParseErrorKind::InvalidNumber)?)
    } else {
        match text.parse::<i64>() {
            Ok(value) => NumberToken::Integer(value),
            // Out of i64 range (or a bare sign, which f64 rejects too).
            Err(_) => NumberToken::Float(
                text.parse::<f64>().map_err(|_| ParseErrorKind::InvalidNumber)?,
            ),
        }
    };
    Ok((token, pos))
}

/// Formats a float for output: shortest round-trip text, with `.0` appended
/// when the result has no fractional marker so a re-parse yields a Float
/// again. Non-finite values render as the bare extension keywords.
pub(crate) fn format_float(value: f64) -> String {
    if value.is_nan() {
        return String::from("NaN");
    }
    if value.is_infinite() {
        return String::from(if value < 0.0 { "-Infinity" } else { "Infinity" });
    }
    let mut text = value.to_string();
    if !text.contains(['.', 'e', 'E']) {
        text.push_str(".0");
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(text: &str) -> Result<(NumberToken, usize), ParseErrorKind> {
        scan_number(text.as_bytes(), 0)
    }

    #[test]
    fn scans_integers() {
        assert_eq!(scan("42"), Ok((NumberToken::Integer(42), 2)));
        assert_eq!(scan("-7"), Ok((NumberToken::Integer(-7), 2)));
        assert_eq!(scan("0"), Ok((NumberToken::Integer(0), 1)));
    }

    #[test]
    fn scans_floats() {
        assert_eq!(scan("1.5"), Ok((NumberToken::Float(1.5), 3)));
        assert_eq!(scan("1.5e2"), Ok((NumberToken::Float(150.0), 5)));
        assert_eq!(scan("-2.5E-1"), Ok((NumberToken::Float(-0.25), 7)));
        assert_eq!(scan("3e4"), Ok((NumberToken::Float(30000.0), 3)));
    }

    #[test]
    fn trailing_dot_is_a_float() {
        assert_eq!(scan("1."), Ok((NumberToken::Float(1.0), 2)));
    }

    #[test]
    fn leading_dot_after_sign_is_a_float() {
        assert_eq!(scan("-.5"), Ok((NumberToken::Float(-0.5), 3)));
    }

    #[test]
    fn dangling_exponent_is_left_unconsumed() {
        assert_eq!(scan("1e"), Ok((NumberToken::Integer(1), 1)));
        assert_eq!(scan("2e+"), Ok((NumberToken::Integer(2), 1)));
    }

    #[test]
    fn stops_at_delimiters() {
        assert_eq!(scan("12,34"), Ok((NumberToken::Integer(12), 2)));
        assert_eq!(scan("5]"), Ok((NumberToken::Integer(5), 1)));
    }

    #[test]
    fn bare_sign_is_rejected() {
        assert_eq!(scan("-"), Err(ParseErrorKind::InvalidNumber));
        assert_eq!(scan("-x"), Err(ParseErrorKind::InvalidNumber));
    }

    #[test]
    fn integer_overflow_falls_back_to_float() {
        let (token, end) = scan("123456789012345678901234567890").unwrap();
        assert_eq!(end, 30);
        match token {
            NumberToken::Float(value) => {
                assert!(value > 1.234e29 && value < 1.235e29, "got {value}");
            }
            other => panic!("expected float fallback, got {other:?}"),
        }
    }

    #[test]
    fn formats_floats_with_type_marker() {
        assert_eq!(format_float(1.5), "1.5");
        assert_eq!(format_float(150.0), "150.0");
        assert_eq!(format_float(-0.25), "-0.25");
        assert_eq!(format_float(0.1), "0.1");
    }

    #[test]
    fn formats_non_finite_keywords() {
        assert_eq!(format_float(f64::NAN), "NaN");
        assert_eq!(format_float(f64::INFINITY), "Infinity");
        assert_eq!(format_float(f64::NEG_INFINITY), "-Infinity");
    }
}
