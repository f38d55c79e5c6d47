//! HJSON parsing.
//!
//! This module provides the recursive-descent [`Parser`] that turns HJSON
//! text into a dynamic [`Value`] tree.
//!
//! ## Overview
//!
//! HJSON is a superset of JSON tuned for hand-edited configuration:
//!
//! - keys and strings may be unquoted
//! - `#`, `//` and `/* … */` comments are insignificant
//! - commas between members are optional (newlines separate)
//! - multi-line strings use triple quotes with indent stripping
//!
//! The subtle part is context-sensitive lexing: after a key's `:`, the rest
//! of the line is a *quoteless string* unless it forms a complete keyword
//! or number. That test runs incrementally at every `,`, `}`, `]`, comment
//! start and end-of-line, so `{a: 1, b: 2}` parses as two numbers while
//! `a: one,two` stays one string (a non-numeric span keeps the comma and
//! runs to the end of the line).
//!
//! ## Usage
//!
//! Most users should use the crate-root functions:
//!
//! ```rust
//! use hjson::parse;
//!
//! let value = parse(b"
//!     # comments are fine
//!     rate: 1000
//!     motto: everything on this line
//! ").unwrap();
//! let obj = value.as_object().unwrap();
//! assert_eq!(obj.get("rate").unwrap().as_f64(), Some(1000.0));
//! assert_eq!(obj.get("motto").unwrap().as_str(), Some("everything on this line"));
//! ```

use crate::scanner::Scanner;
use crate::{DecoderOptions, Error, HjsonMap, Number, Result, Value};

/// Deepest allowed nesting of objects and arrays. Inputs beyond this fail
/// with a syntax error instead of exhausting the stack.
const MAX_DEPTH: usize = 512;

/// The HJSON parser.
///
/// Parses a complete document into a [`Value`]. Created via
/// [`Parser::new`]; most callers go through [`parse`](crate::parse) or
/// [`unmarshal`](crate::unmarshal) instead.
pub struct Parser<'a> {
    input: &'a str,
    scan: Scanner<'a>,
    options: DecoderOptions,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str, options: DecoderOptions) -> Self {
        Parser {
            input,
            scan: Scanner::new(input.as_bytes()),
            options,
            depth: 0,
        }
    }

    /// Parses the whole input as one document.
    ///
    /// At the root, an object without braces is allowed; if that fails, the
    /// input is re-read as a single value (`35e-7`, `true`, a quoted or
    /// quoteless string). Anything but whitespace and comments after the
    /// root value is an error.
    pub fn parse(mut self) -> Result<Value> {
        self.scan.skip_insignificant()?;
        match self.scan.peek() {
            None => Err(Error::eof(self.scan.position(), "a value")),
            Some(b'{') => {
                let value = self.read_object(true)?;
                self.check_trailing()?;
                Ok(value)
            }
            Some(b'[') => {
                let value = self.read_array()?;
                self.check_trailing()?;
                Ok(value)
            }
            _ => {
                // Assume a root object without braces; fall back to a
                // single value if that does not parse.
                let mark = self.scan.position();
                let attempt = self
                    .read_object(false)
                    .and_then(|v| self.check_trailing().map(|_| v));
                match attempt {
                    Ok(value) => Ok(value),
                    Err(object_err) => {
                        self.scan.rewind(mark);
                        self.depth = 0;
                        match self.read_value().and_then(|v| self.check_trailing().map(|_| v)) {
                            Ok(value) => Ok(value),
                            Err(_) => Err(object_err),
                        }
                    }
                }
            }
        }
    }

    fn check_trailing(&mut self) -> Result<()> {
        self.scan.skip_insignificant()?;
        if self.scan.at_end() {
            Ok(())
        } else {
            Err(Error::syntax(
                self.scan.position(),
                "unexpected characters after the root value",
            ))
        }
    }

    fn push_depth(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(Error::syntax(
                self.scan.position(),
                "structure nested too deeply",
            ));
        }
        Ok(())
    }

    /// Reads a value in object-member or root position, where quoteless
    /// strings are allowed.
    fn read_value(&mut self) -> Result<Value> {
        self.scan.skip_insignificant()?;
        match self.scan.peek() {
            None => Err(Error::eof(self.scan.position(), "a value")),
            Some(b'{') => self.read_object(true),
            Some(b'[') => self.read_array(),
            Some(q @ (b'"' | b'\'')) => self.read_string(q),
            Some(_) => self.read_quoteless(),
        }
    }

    /// Reads an array element. Inside arrays scalars are strict: keywords
    /// and numbers must be complete tokens, and there is no quoteless
    /// fallback.
    fn read_element(&mut self) -> Result<Value> {
        match self.scan.peek() {
            None => Err(Error::eof(self.scan.position(), "a value")),
            Some(b'{') => self.read_object(true),
            Some(b'[') => self.read_array(),
            Some(q @ (b'"' | b'\'')) => self.read_string(q),
            Some(b't' | b'f' | b'n') => self.read_keyword(),
            Some(b'-' | b'0'..=b'9') => self.read_number(),
            Some(b) => Err(Error::syntax(
                self.scan.position(),
                format!(
                    "unexpected character {:?} in array; strings inside arrays must be quoted",
                    b as char
                ),
            )),
        }
    }

    fn read_object(&mut self, braced: bool) -> Result<Value> {
        if braced {
            self.scan.next(); // '{'
        }
        self.push_depth()?;
        let mut map = HjsonMap::new();
        loop {
            self.scan.skip_insignificant()?;
            match self.scan.peek() {
                None => {
                    if braced {
                        return Err(Error::eof(self.scan.position(), "'}'"));
                    }
                    break;
                }
                Some(b'}') if braced => {
                    self.scan.next();
                    break;
                }
                _ => {
                    let (key, key_at) = self.read_keyname()?;
                    self.expect_colon(&key)?;
                    let value = self.read_value()?;
                    if map.contains_key(&key) {
                        return Err(Error::duplicate_key(key_at, key));
                    }
                    map.insert(key, value);
                    self.member_separator(b'}')?;
                }
            }
        }
        self.depth -= 1;
        Ok(Value::Object(map))
    }

    fn read_array(&mut self) -> Result<Value> {
        self.scan.next(); // '['
        self.push_depth()?;
        let mut items = Vec::new();
        loop {
            self.scan.skip_insignificant()?;
            match self.scan.peek() {
                None => return Err(Error::eof(self.scan.position(), "']'")),
                Some(b']') => {
                    self.scan.next();
                    break;
                }
                _ => {
                    items.push(self.read_element()?);
                    self.member_separator(b']')?;
                }
            }
        }
        self.depth -= 1;
        Ok(Value::Array(items))
    }

    /// Consumes an optional `,` after a member. Without a comma the next
    /// member must start on a new line (or the structure must close).
    fn member_separator(&mut self, close: u8) -> Result<()> {
        let line_before = self.scan.position().line;
        self.scan.skip_insignificant()?;
        match self.scan.peek() {
            Some(b',') => {
                self.scan.next();
                Ok(())
            }
            Some(b) if b == close => Ok(()),
            None => Ok(()),
            _ => {
                if self.scan.position().line == line_before {
                    Err(Error::syntax(
                        self.scan.position(),
                        "expected ',' or a newline between members",
                    ))
                } else {
                    Ok(())
                }
            }
        }
    }

    fn read_keyname(&mut self) -> Result<(String, crate::Position)> {
        let at = self.scan.position();
        if let Some(q @ (b'"' | b'\'')) = self.scan.peek() {
            // A quoted key is a single-line string; the empty key is legal.
            let key = self.read_quoted(q)?;
            return Ok((key, at));
        }
        let start = at.offset;
        while let Some(b) = self.scan.peek() {
            match b {
                b' ' | b'\t' | b'\r' | b'\n' | b':' => break,
                b'{' | b'}' | b'[' | b']' | b',' => break,
                _ => {
                    self.scan.next();
                }
            }
        }
        let key = &self.input[start..self.scan.position().offset];
        if key.is_empty() {
            return Err(match self.scan.peek() {
                None => Error::eof(at, "a key name"),
                Some(b':') => Error::syntax(at, "found ':' but no key name"),
                Some(b) => Error::syntax(
                    at,
                    format!("found {:?} where a key name was expected", b as char),
                ),
            });
        }
        Ok((key.to_string(), at))
    }

    fn expect_colon(&mut self, key: &str) -> Result<()> {
        self.scan.skip_insignificant()?;
        match self.scan.peek() {
            Some(b':') => {
                self.scan.next();
                Ok(())
            }
            None => Err(Error::eof(self.scan.position(), "':'")),
            Some(b) => Err(Error::syntax(
                self.scan.position(),
                format!("expected ':' after key {:?}, found {:?}", key, b as char),
            )),
        }
    }

    /// Reads a keyword, number, or quoteless string.
    ///
    /// Accumulates bytes and, at every `,`, `}`, `]`, comment start,
    /// end-of-line or end of input, tests the accumulated span: a complete
    /// keyword or number is returned with the rest of the line left in
    /// place; otherwise at end-of-line the span becomes a quoteless string
    /// with trailing whitespace removed.
    fn read_quoteless(&mut self) -> Result<Value> {
        let at = self.scan.position();
        if let Some(b @ (b'}' | b']' | b',' | b':')) = self.scan.peek() {
            return Err(Error::syntax(
                at,
                format!(
                    "found {:?} where a value was expected",
                    b as char
                ),
            ));
        }
        let start = at.offset;
        loop {
            let b = self.scan.peek();
            let at_eol = matches!(b, None | Some(b'\n') | Some(b'\r'));
            let at_checkpoint = at_eol
                || matches!(b, Some(b',' | b'}' | b']' | b'#'))
                || (b == Some(b'/') && matches!(self.scan.peek_at(1), Some(b'/' | b'*')));
            if at_checkpoint {
                let span = &self.input[start..self.scan.position().offset];
                let trimmed = trim_ascii(span);
                match span.as_bytes()[0] {
                    b't' if trimmed == "true" => return Ok(Value::Bool(true)),
                    b'f' if trimmed == "false" => return Ok(Value::Bool(false)),
                    b'n' if trimmed == "null" => return Ok(Value::Null),
                    b'-' | b'0'..=b'9' => {
                        if let Some(n) = lex_number(trimmed, self.options.use_json_number) {
                            return Ok(Value::Number(n));
                        }
                    }
                    _ => {}
                }
                if at_eol {
                    return Ok(Value::String(trimmed.to_string()));
                }
            }
            self.scan.next();
        }
    }

    /// Reads `true`, `false` or `null` in array position.
    fn read_keyword(&mut self) -> Result<Value> {
        let at = self.scan.position();
        let rest = self.scan.rest();
        let (word, value) = if rest.starts_with(b"true") {
            ("true", Value::Bool(true))
        } else if rest.starts_with(b"false") {
            ("false", Value::Bool(false))
        } else if rest.starts_with(b"null") {
            ("null", Value::Null)
        } else {
            return Err(Error::syntax(
                at,
                "unexpected token in array; strings inside arrays must be quoted",
            ));
        };
        for _ in 0..word.len() {
            self.scan.next();
        }
        self.check_scalar_end(at)?;
        Ok(value)
    }

    /// Reads a number in array position, where it must be a complete token.
    fn read_number(&mut self) -> Result<Value> {
        let at = self.scan.position();
        let start = at.offset;
        while let Some(b) = self.scan.peek() {
            match b {
                b'0'..=b'9' | b'-' | b'+' | b'.' | b'e' | b'E' => {
                    self.scan.next();
                }
                _ => break,
            }
        }
        let span = &self.input[start..self.scan.position().offset];
        let number = lex_number(span, self.options.use_json_number)
            .ok_or_else(|| Error::syntax(at, format!("invalid number {:?}", span)))?;
        self.check_scalar_end(at)?;
        Ok(Value::Number(number))
    }

    /// After a strict scalar the next byte must close, separate, or start
    /// insignificant text.
    fn check_scalar_end(&mut self, at: crate::Position) -> Result<()> {
        match self.scan.peek() {
            None => Ok(()),
            Some(b' ' | b'\t' | b'\r' | b'\n' | b',' | b']' | b'}' | b'#') => Ok(()),
            Some(b'/') if matches!(self.scan.peek_at(1), Some(b'/' | b'*')) => Ok(()),
            Some(_) => Err(Error::syntax(
                at,
                "unexpected token in array; strings inside arrays must be quoted",
            )),
        }
    }

    /// Reads a quoted string value, dispatching to the triple-quoted block
    /// form when the opening quote is tripled.
    fn read_string(&mut self, quote: u8) -> Result<Value> {
        if self.scan.peek_at(1) == Some(quote) && self.scan.peek_at(2) == Some(quote) {
            return self.read_block_string(quote);
        }
        Ok(Value::String(self.read_quoted(quote)?))
    }

    /// Reads a single-line quoted string with JSON escape processing.
    fn read_quoted(&mut self, quote: u8) -> Result<String> {
        let at = self.scan.position();
        self.scan.next(); // opening quote
        let mut out = String::new();
        loop {
            match self.scan.next() {
                None => return Err(Error::eof(self.scan.position(), "a closing quote")),
                Some(b) if b == quote => return Ok(out),
                Some(b'\n') => {
                    return Err(Error::syntax(at, "unterminated string (newline in string)"))
                }
                Some(b'\\') => out.push(self.read_escape()?),
                Some(b) if b < 0x80 => out.push(b as char),
                Some(b) => {
                    // Continuation of a multi-byte UTF-8 sequence; the
                    // input was validated, so pass the bytes through.
                    out.push(self.take_utf8_tail(b)?);
                }
            }
        }
    }

    fn take_utf8_tail(&mut self, first: u8) -> Result<char> {
        let width = match first {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            _ => 4,
        };
        let mut buf = [first, 0, 0, 0];
        for slot in buf.iter_mut().take(width).skip(1) {
            *slot = self
                .scan
                .next()
                .ok_or_else(|| Error::eof(self.scan.position(), "a closing quote"))?;
        }
        std::str::from_utf8(&buf[..width])
            .ok()
            .and_then(|s| s.chars().next())
            .ok_or_else(|| Error::syntax(self.scan.position(), "invalid UTF-8 in string"))
    }

    fn read_escape(&mut self) -> Result<char> {
        let at = self.scan.position();
        match self.scan.next() {
            None => Err(Error::eof(self.scan.position(), "an escape character")),
            Some(b'"') => Ok('"'),
            Some(b'\'') => Ok('\''),
            Some(b'\\') => Ok('\\'),
            Some(b'/') => Ok('/'),
            Some(b'b') => Ok('\u{0008}'),
            Some(b'f') => Ok('\u{000C}'),
            Some(b'n') => Ok('\n'),
            Some(b'r') => Ok('\r'),
            Some(b't') => Ok('\t'),
            Some(b'u') => self.read_unicode_escape(at),
            Some(b) => Err(Error::syntax(
                at,
                format!("invalid escape character {:?}", b as char),
            )),
        }
    }

    fn read_unicode_escape(&mut self, at: crate::Position) -> Result<char> {
        let first = self.read_hex4(at)?;
        if (0xDC00..=0xDFFF).contains(&first) {
            return Err(Error::syntax(at, "unexpected low surrogate in \\u escape"));
        }
        if (0xD800..=0xDBFF).contains(&first) {
            // Surrogate pair: a second \uXXXX must follow.
            if self.scan.next() != Some(b'\\') || self.scan.next() != Some(b'u') {
                return Err(Error::syntax(at, "unpaired high surrogate in \\u escape"));
            }
            let second = self.read_hex4(at)?;
            if !(0xDC00..=0xDFFF).contains(&second) {
                return Err(Error::syntax(at, "unpaired high surrogate in \\u escape"));
            }
            let code = 0x10000 + ((first - 0xD800) << 10) + (second - 0xDC00);
            return char::from_u32(code)
                .ok_or_else(|| Error::syntax(at, "invalid \\u escape"));
        }
        char::from_u32(first).ok_or_else(|| Error::syntax(at, "invalid \\u escape"))
    }

    fn read_hex4(&mut self, at: crate::Position) -> Result<u32> {
        let mut code = 0u32;
        for _ in 0..4 {
            let b = self
                .scan
                .next()
                .ok_or_else(|| Error::eof(self.scan.position(), "4 hex digits"))?;
            let digit = (b as char)
                .to_digit(16)
                .ok_or_else(|| Error::syntax(at, "expected 4 hex digits in \\u escape"))?;
            code = code * 16 + digit;
        }
        Ok(code)
    }

    /// Reads a `'''`/`"""` block string.
    ///
    /// The opening triple quote must be followed by a newline. The column
    /// of the closing triple quote sets the indent baseline: up to that
    /// many leading spaces are removed from every content line. No escape
    /// processing happens inside.
    fn read_block_string(&mut self, quote: u8) -> Result<Value> {
        self.scan.next();
        self.scan.next();
        self.scan.next(); // opening triple quote
        while matches!(self.scan.peek(), Some(b' ' | b'\t' | b'\r')) {
            self.scan.next();
        }
        match self.scan.peek() {
            Some(b'\n') => {
                self.scan.next();
            }
            _ => {
                return Err(Error::syntax(
                    self.scan.position(),
                    "expected a newline after the opening triple quote",
                ))
            }
        }
        let start = self.scan.position().offset;
        loop {
            if self.scan.peek() == Some(quote)
                && self.scan.peek_at(1) == Some(quote)
                && self.scan.peek_at(2) == Some(quote)
            {
                let baseline = self.scan.position().column - 1;
                let raw = &self.input[start..self.scan.position().offset];
                self.scan.next();
                self.scan.next();
                self.scan.next();
                return Ok(Value::String(strip_block_indent(raw, baseline)));
            }
            if self.scan.next().is_none() {
                return Err(Error::eof(self.scan.position(), "a closing triple quote"));
            }
        }
    }
}

/// ASCII-only trim. Unicode whitespace is content: a quoteless string
/// keeps it, and the emitter reproduces it byte for byte.
fn trim_ascii(s: &str) -> &str {
    s.trim_matches(|c: char| matches!(c, ' ' | '\t' | '\r'))
}

/// Removes up to `baseline` leading spaces from every line of a block
/// string and drops the closing line's indentation.
fn strip_block_indent(raw: &str, baseline: usize) -> String {
    let raw = raw.replace('\r', "");
    let mut lines: Vec<&str> = raw
        .split('\n')
        .map(|line| {
            let mut rest = line;
            let mut removed = 0;
            while removed < baseline {
                match rest.strip_prefix(' ') {
                    Some(r) => {
                        rest = r;
                        removed += 1;
                    }
                    None => break,
                }
            }
            rest
        })
        .collect();
    // The final fragment is the closing quote's indentation, not content,
    // unless text butts up against the closing quotes.
    if lines.last() == Some(&"") {
        lines.pop();
    }
    lines.join("\n")
}

/// Validates `text` against the JSON number grammar and converts it.
///
/// A leading `+` is not part of the grammar, so `+3` stays a quoteless
/// string. Returns `None` when the text is not a complete number.
pub(crate) fn lex_number(text: &str, keep_raw: bool) -> Option<Number> {
    if !is_json_number(text) {
        return None;
    }
    if keep_raw {
        Some(Number::Raw(text.to_string()))
    } else {
        text.parse::<f64>().ok().map(Number::Float)
    }
}

/// `true` when `text` is exactly one JSON number: optional `-`, `0` or a
/// non-zero digit run, optional fraction, optional exponent.
pub(crate) fn is_json_number(text: &str) -> bool {
    let b = text.as_bytes();
    let mut i = 0;
    if i < b.len() && b[i] == b'-' {
        i += 1;
    }
    match b.get(i) {
        Some(b'0') => i += 1,
        Some(b'1'..=b'9') => {
            while matches!(b.get(i), Some(b'0'..=b'9')) {
                i += 1;
            }
        }
        _ => return false,
    }
    if b.get(i) == Some(&b'.') {
        i += 1;
        if !matches!(b.get(i), Some(b'0'..=b'9')) {
            return false;
        }
        while matches!(b.get(i), Some(b'0'..=b'9')) {
            i += 1;
        }
    }
    if matches!(b.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(b.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        if !matches!(b.get(i), Some(b'0'..=b'9')) {
            return false;
        }
        while matches!(b.get(i), Some(b'0'..=b'9')) {
            i += 1;
        }
    }
    i == b.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_grammar() {
        for ok in ["0", "-0", "3", "42", "3.5", "-2.75", "35e-7", "1E+10", "0.5"] {
            assert!(is_json_number(ok), "{ok} should lex as a number");
        }
        for bad in ["", "+3", "01", "3.", ".5", "3e", "1 2", "0x10", "--1", "3b"] {
            assert!(!is_json_number(bad), "{bad} should not lex as a number");
        }
    }

    #[test]
    fn strip_indent_uses_closing_column() {
        assert_eq!(strip_block_indent("  a\n  b\n  ", 2), "a\nb");
        assert_eq!(strip_block_indent("    a\n  ", 2), "  a");
        assert_eq!(strip_block_indent("  a\n\n  b\n  ", 2), "a\n\nb");
        assert_eq!(strip_block_indent("  a\n  tail", 2), "a\ntail");
    }
}
