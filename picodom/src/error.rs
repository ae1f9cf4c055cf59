// SPDX-License-Identifier: Apache-2.0

//! Error types for parsing and file I/O.
//!
//! Value-level operations never fail; see the silent-miss contract on
//! [`crate::JsonValue`]. Only the document-level operations (parse a text,
//! read or write a file) produce errors.

use core::fmt;

/// The specific cause of a structural parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A value started with a character no JSON token can start with.
    UnexpectedCharacter,
    /// Input ended in the middle of a value or container.
    UnexpectedEnd,
    /// A string literal reached end of input without a closing quote.
    UnterminatedString,
    /// An unescaped control character (below 0x20, or DEL) inside a string.
    ControlCharacterInString,
    /// A backslash escape outside the recognized set.
    InvalidEscape,
    /// A `\uXXXX` escape with a non-hex digit.
    InvalidUnicodeHex,
    /// A `\uXXXX` escape that does not decode to a Unicode scalar value.
    InvalidUnicodeCodepoint,
    /// A numeric literal that could not be parsed.
    InvalidNumber,
    /// An object member name that was not a quoted string.
    ExpectedMemberName,
    /// A missing `:` between a member name and its value.
    ExpectedColon,
    /// A missing `,` or closing bracket after a container element.
    ExpectedCommaOrClose,
    /// Nesting deeper than the parser's depth cap.
    DepthLimitExceeded,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            ParseErrorKind::UnexpectedCharacter => "unexpected character",
            ParseErrorKind::UnexpectedEnd => "unexpected end of input",
            ParseErrorKind::UnterminatedString => "unterminated string",
            ParseErrorKind::ControlCharacterInString => "control character in string",
            ParseErrorKind::InvalidEscape => "invalid escape sequence",
            ParseErrorKind::InvalidUnicodeHex => "invalid hex digit in unicode escape",
            ParseErrorKind::InvalidUnicodeCodepoint => "invalid unicode codepoint",
            ParseErrorKind::InvalidNumber => "invalid number",
            ParseErrorKind::ExpectedMemberName => "expected quoted member name",
            ParseErrorKind::ExpectedColon => "expected ':' after member name",
            ParseErrorKind::ExpectedCommaOrClose => "expected ',' or closing bracket",
            ParseErrorKind::DepthLimitExceeded => "nesting depth limit exceeded",
        };
        f.write_str(message)
    }
}

/// A structural parse failure and the 1-based line it was detected on.
///
/// The line is a best-effort diagnostic: the larger of the newline and
/// carriage-return counts over the consumed input, plus one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseError {
    kind: ParseErrorKind,
    line: u32,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, line: u32) -> Self {
        ParseError { kind, line }
    }

    /// The specific cause of the failure.
    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }

    /// 1-based line number the failure was detected on.
    pub fn line(&self) -> u32 {
        self.line
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.kind)
    }
}

impl std::error::Error for ParseError {}

/// Errors from the whole-file helpers.
#[derive(Debug)]
pub enum JsonError {
    /// The file could not be opened, read, or written.
    Io(std::io::Error),
    /// The file contents failed to parse.
    Parse(ParseError),
}

impl JsonError {
    /// The error-line signal: `-1` for I/O failures, the positive 1-based
    /// line for parse failures.
    pub fn error_line(&self) -> i32 {
        match self {
            JsonError::Io(_) => -1,
            JsonError::Parse(err) => i32::try_from(err.line()).unwrap_or(i32::MAX),
        }
    }
}

impl From<std::io::Error> for JsonError {
    fn from(err: std::io::Error) -> Self {
        JsonError::Io(err)
    }
}

impl From<ParseError> for JsonError {
    fn from(err: ParseError) -> Self {
        JsonError::Parse(err)
    }
}

impl fmt::Display for JsonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonError::Io(err) => write!(f, "i/o error: {err}"),
            JsonError::Parse(err) => write!(f, "parse error: {err}"),
        }
    }
}

impl std::error::Error for JsonError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            JsonError::Io(err) => Some(err),
            JsonError::Parse(err) => Some(err),
        }
    }
}
