// SPDX-License-Identifier: Apache-2.0

//! Recursive-descent JSON parser.
//!
//! Single pass over a byte cursor with one token of lookahead. Accepts the
//! documented extensions (`NaN`, `Infinity`, `-Infinity`). On failure the
//! cursor position marks the error point, from which the 1-based line
//! number is computed.

use log::{debug, trace};

use crate::buffer::ScratchBuffer;
use crate::error::{ParseError, ParseErrorKind};
use crate::escape;
use crate::number::{self, NumberToken};
use crate::value::JsonValue;

/// Nesting cap: deeper documents fail with `DepthLimitExceeded` instead of
/// exhausting the call stack.
const MAX_DEPTH: u32 = 512;

struct Cursor<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Cursor {
            input: text.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn bump(&mut self) {
        self.pos = self.pos.saturating_add(1);
    }

    /// Consumes `token` if the input continues with exactly it.
    fn eat(&mut self, token: &[u8]) -> bool {
        let matches = self
            .input
            .get(self.pos..)
            .is_some_and(|rest| rest.starts_with(token));
        if matches {
            self.pos += token.len();
        }
        matches
    }

    fn skip_whitespace(&mut self) {
        while let Some(byte) = self.peek() {
            if byte == b' ' || (0x09..=0x0D).contains(&byte) {
                self.bump();
            } else {
                break;
            }
        }
    }
}

/// Parses one document. Trailing input after the top-level value is
/// ignored, matching the historical reader contract.
pub(crate) fn parse_document(text: &str) -> Result<JsonValue, ParseError> {
    trace!("parsing document of {} bytes", text.len());
    let mut cursor = Cursor::new(text);
    let mut scratch: ScratchBuffer = ScratchBuffer::new();
    match parse_value(&mut cursor, &mut scratch, 0) {
        Ok(value) => Ok(value),
        Err(kind) => {
            let line = error_line(cursor.input, cursor.pos);
            debug!("parse failed at line {line}: {kind}");
            Err(ParseError::new(kind, line))
        }
    }
}

/// Best-effort line heuristic: the larger of the newline and carriage-return
/// counts over the consumed prefix, plus one.
fn error_line(input: &[u8], pos: usize) -> u32 {
    let consumed = input.get(..pos).unwrap_or(input);
    let newlines = consumed.iter().filter(|&&byte| byte == b'\n').count();
    let returns = consumed.iter().filter(|&&byte| byte == b'\r').count();
    u32::try_from(1 + newlines.max(returns)).unwrap_or(u32::MAX)
}

fn parse_value(
    cursor: &mut Cursor,
    scratch: &mut ScratchBuffer,
    depth: u32,
) -> Result<JsonValue, ParseErrorKind> {
    if depth >= MAX_DEPTH {
        return Err(ParseErrorKind::DepthLimitExceeded);
    }
    cursor.skip_whitespace();
    let Some(byte) = cursor.peek() else {
        return Err(ParseErrorKind::UnexpectedEnd);
    };
    match byte {
        b'"' => {
            cursor.bump();
            parse_string(cursor, scratch).map(JsonValue::from)
        }
        b'{' => {
            cursor.bump();
            parse_object(cursor, scratch, depth)
        }
        b'[' => {
            cursor.bump();
            parse_array(cursor, scratch, depth)
        }
        _ => {
            if cursor.eat(b"true") {
                return Ok(JsonValue::from(true));
            }
            if cursor.eat(b"false") {
                return Ok(JsonValue::from(false));
            }
            if cursor.eat(b"null") {
                return Ok(JsonValue::new());
            }
            if cursor.eat(b"NaN") {
                return Ok(JsonValue::from(f64::NAN));
            }
            if cursor.eat(b"Infinity") {
                return Ok(JsonValue::from(f64::INFINITY));
            }
            // Before numeric dispatch: the token shares the leading minus.
            if cursor.eat(b"-Infinity") {
                return Ok(JsonValue::from(f64::NEG_INFINITY));
            }
            if byte == b'-' || byte.is_ascii_digit() {
                return parse_number(cursor);
            }
            Err(ParseErrorKind::UnexpectedCharacter)
        }
    }
}

/// Reads a string literal. The opening quote is already consumed; the
/// decoded contents accumulate in the scratch buffer and are taken as one
/// owned allocation on the closing quote.
fn parse_string(cursor: &mut Cursor, scratch: &mut ScratchBuffer) -> Result<String, ParseErrorKind> {
    scratch.clear();
    loop {
        let Some(byte) = cursor.peek() else {
            return Err(ParseErrorKind::UnterminatedString);
        };
        cursor.bump();
        match byte {
            b'"' => {
                let bytes = scratch.take();
                // Contents are UTF-8 by construction: unescaped bytes come
                // from a &str and escapes encode through char.
                return Ok(String::from_utf8(bytes).unwrap_or_else(|err| {
                    String::from_utf8_lossy(err.as_bytes()).into_owned()
                }));
            }
            b'\\' => read_escape(cursor, scratch)?,
            byte if byte < 0x20 || byte == 0x7F => {
                return Err(ParseErrorKind::ControlCharacterInString);
            }
            byte => scratch.push(byte),
        }
    }
}

fn read_escape(cursor: &mut Cursor, scratch: &mut ScratchBuffer) -> Result<(), ParseErrorKind> {
    let Some(byte) = cursor.peek() else {
        return Err(ParseErrorKind::UnterminatedString);
    };
    cursor.bump();
    if byte != b'u' {
        scratch.push(escape::decode_simple_escape(byte)?);
        return Ok(());
    }
    let first = read_hex4(cursor)?;
    let codepoint = if escape::is_high_surrogate(first) {
        // A high surrogate must be immediately followed by its low half.
        if !cursor.eat(b"\\u") {
            return Err(ParseErrorKind::InvalidUnicodeCodepoint);
        }
        let low = read_hex4(cursor)?;
        escape::combine_surrogate_pair(first, low)?
    } else if escape::is_low_surrogate(first) {
        return Err(ParseErrorKind::InvalidUnicodeCodepoint);
    } else {
        first
    };
    let (utf8, len) = escape::encode_codepoint(codepoint)?;
    scratch.push_slice(utf8.get(..len).unwrap_or(&utf8));
    Ok(())
}

fn read_hex4(cursor: &mut Cursor) -> Result<u32, ParseErrorKind> {
    let mut value = 0u32;
    for _ in 0..4 {
        let Some(byte) = cursor.peek() else {
            return Err(ParseErrorKind::InvalidUnicodeHex);
        };
        cursor.bump();
        value = (value << 4) | escape::hex_value(byte)?;
    }
    Ok(value)
}

fn parse_number(cursor: &mut Cursor) -> Result<JsonValue, ParseErrorKind> {
    let (token, end) = number::scan_number(cursor.input, cursor.pos)?;
    cursor.pos = end;
    Ok(match token {
        NumberToken::Integer(value) => JsonValue::from(value),
        NumberToken::Float(value) => JsonValue::from(value),
    })
}

fn parse_object(
    cursor: &mut Cursor,
    scratch: &mut ScratchBuffer,
    depth: u32,
) -> Result<JsonValue, ParseErrorKind> {
    let mut object = JsonValue::new_object();
    cursor.skip_whitespace();
    if cursor.peek() == Some(b'}') {
        cursor.bump();
        return Ok(object);
    }
    loop {
        cursor.skip_whitespace();
        if cursor.peek() != Some(b'"') {
            return Err(ParseErrorKind::ExpectedMemberName);
        }
        cursor.bump();
        let name = parse_string(cursor, scratch)?;
        cursor.skip_whitespace();
        if cursor.peek() != Some(b':') {
            return Err(ParseErrorKind::ExpectedColon);
        }
        cursor.bump();
        let mut member = parse_value(cursor, scratch, depth + 1)?;
        member.give_name(name);
        object.push_child(member);
        cursor.skip_whitespace();
        match cursor.peek() {
            Some(b'}') => {
                cursor.bump();
                return Ok(object);
            }
            Some(b',') => cursor.bump(),
            Some(_) => return Err(ParseErrorKind::ExpectedCommaOrClose),
            None => return Err(ParseErrorKind::UnexpectedEnd),
        }
    }
}

fn parse_array(
    cursor: &mut Cursor,
    scratch: &mut ScratchBuffer,
    depth: u32,
) -> Result<JsonValue, ParseErrorKind> {
    let mut array = JsonValue::new_array();
    cursor.skip_whitespace();
    if cursor.peek() == Some(b']') {
        cursor.bump();
        return Ok(array);
    }
    loop {
        let element = parse_value(cursor, scratch, depth + 1)?;
        array.push_child(element);
        cursor.skip_whitespace();
        match cursor.peek() {
            Some(b']') => {
                cursor.bump();
                return Ok(array);
            }
            Some(b',') => cursor.bump(),
            Some(_) => return Err(ParseErrorKind::ExpectedCommaOrClose),
            None => return Err(ParseErrorKind::UnexpectedEnd),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::JsonType;
    use test_log::test;

    #[test]
    fn parses_scalars() {
        assert!(JsonValue::parse("true").unwrap().to_boolean());
        assert!(!JsonValue::parse("false").unwrap().to_boolean());
        assert!(JsonValue::parse("null").unwrap().is_null());
        assert_eq!(JsonValue::parse("42").unwrap().to_integer(), 42);
        assert_eq!(JsonValue::parse("-1.5").unwrap().to_float(), -1.5);
        assert_eq!(JsonValue::parse("\"hi\"").unwrap().to_str(), "hi");
    }

    #[test]
    fn parses_extension_keywords() {
        assert!(JsonValue::parse("NaN").unwrap().to_float().is_nan());
        assert_eq!(
            JsonValue::parse("Infinity").unwrap().to_float(),
            f64::INFINITY
        );
        assert_eq!(
            JsonValue::parse("-Infinity").unwrap().to_float(),
            f64::NEG_INFINITY
        );
    }

    #[test]
    fn parses_nested_containers() {
        let doc = JsonValue::parse(r#"{"a":1,"b":[1,2,3],"c":{"d":null}}"#).unwrap();
        assert_eq!(doc["a"].to_integer(), 1);
        assert_eq!(doc["b"].member_count(), 3);
        assert_eq!(doc["b"][2].to_integer(), 3);
        assert!(doc["c"]["d"].is_null());
    }

    #[test]
    fn number_classification() {
        assert_eq!(JsonValue::parse("150").unwrap().json_type(), JsonType::Integer);
        assert_eq!(
            JsonValue::parse("1.5e2").unwrap().json_type(),
            JsonType::Float
        );
        assert_eq!(JsonValue::parse("1.5e2").unwrap().to_float(), 150.0);
    }

    #[test]
    fn decodes_escapes() {
        let doc = JsonValue::parse(r#""a\nb\t\"\\\/""#).unwrap();
        assert_eq!(doc.to_str(), "a\nb\t\"\\/");
    }

    #[test]
    fn decodes_unicode_escapes() {
        assert_eq!(JsonValue::parse(r#""\u0041""#).unwrap().to_str(), "A");
        assert_eq!(JsonValue::parse(r#""\u03B1""#).unwrap().to_str(), "α");
        // Surrogate pair for U+10437.
        assert_eq!(
            JsonValue::parse(r#""\uD801\uDC37""#).unwrap().to_str(),
            "\u{10437}"
        );
    }

    #[test]
    fn rejects_lone_surrogates() {
        assert!(JsonValue::parse(r#""\uD801""#).is_err());
        assert!(JsonValue::parse(r#""\uDC37""#).is_err());
        assert!(JsonValue::parse(r#""\uD801\n""#).is_err());
    }

    #[test]
    fn rejects_control_characters_in_strings() {
        let err = JsonValue::parse("\"a\u{0001}b\"").unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::ControlCharacterInString);
        assert!(JsonValue::parse("\"a\u{007F}b\"").is_err());
    }

    #[test]
    fn rejects_unterminated_string() {
        let err = JsonValue::parse("\"abc").unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::UnterminatedString);
    }

    #[test]
    fn empty_member_names_are_accepted() {
        let doc = JsonValue::parse(r#"{"":7}"#).unwrap();
        assert_eq!(doc.at(0).to_integer(), 7);
        assert_eq!(doc.at(0).name(), Some(""));
    }

    #[test]
    fn whitespace_between_tokens() {
        let doc = JsonValue::parse(" {\r\n\t\"a\" :\n 1 , \"b\" : [ ] } ").unwrap();
        assert_eq!(doc["a"].to_integer(), 1);
        assert!(doc["b"].is_array());
        assert_eq!(doc["b"].member_count(), 0);
    }

    #[test]
    fn trailing_input_is_ignored() {
        let doc = JsonValue::parse("{\"a\":1} trailing").unwrap();
        assert_eq!(doc["a"].to_integer(), 1);
    }

    #[test]
    fn error_line_counts_newlines() {
        let err = JsonValue::parse("{\n\"a\": 1,\n\"b\": x\n}").unwrap_err();
        assert_eq!(err.line(), 3);
    }

    #[test]
    fn error_line_uses_larger_of_lf_and_cr() {
        let err = JsonValue::parse("{\r\r\r\"a\": x}").unwrap_err();
        assert_eq!(err.line(), 4);
    }

    #[test]
    fn depth_limit_is_enforced() {
        let mut text = String::new();
        for _ in 0..600 {
            text.push('[');
        }
        let err = JsonValue::parse(&text).unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::DepthLimitExceeded);

        let mut ok = String::new();
        for _ in 0..100 {
            ok.push('[');
        }
        for _ in 0..100 {
            ok.push(']');
        }
        assert!(JsonValue::parse(&ok).is_ok());
    }

    #[test]
    fn keyword_prefix_must_match_exactly() {
        assert!(JsonValue::parse("tru").is_err());
        assert!(JsonValue::parse("Nan").is_err());
        assert!(JsonValue::parse("Infinit").is_err());
    }

    #[test]
    fn empty_input_fails_on_line_one() {
        let err = JsonValue::parse("").unwrap_err();
        assert_eq!(err.line(), 1);
        assert!(JsonValue::parse("   \n ").is_err());
    }
}
