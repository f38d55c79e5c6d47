//! HJSON emission.
//!
//! This module renders a [`Value`] tree back to text in three forms:
//!
//! - [`marshal`](crate::marshal): canonical pretty-printed HJSON — two-space
//!   indent, one member per line, quoteless strings wherever re-parsing
//!   would reproduce them exactly, `'''` blocks for embedded newlines
//! - [`to_json`]: strict JSON, preserving object key order — also the form
//!   handed to user JSON decode hooks
//! - [`to_text`]: the canonical text of a scalar, as handed to user text
//!   decode hooks and used when binding scalars into string destinations
//!
//! Output always uses `\n` line endings and carries no trailing newline.
//! Emitting then re-parsing a tree yields an equal tree (numbers up to
//! IEEE-754 round-trip; raw numbers byte for byte).
//!
//! ## Examples
//!
//! ```rust
//! use hjson::{hjson, marshal};
//!
//! let value = hjson!({
//!     "hello": "world",
//!     "count": 2
//! });
//! assert_eq!(marshal(&value).unwrap(), "{\n  hello: world\n  count: 2\n}");
//! ```

use crate::de::is_json_number;
use crate::{Error, Number, Result, Value};

/// Emits a value as canonical pretty-printed HJSON.
///
/// See the crate-root [`marshal`](crate::marshal) for details and examples.
pub fn marshal(value: &Value) -> Result<String> {
    let mut out = String::with_capacity(256);
    write_value(&mut out, value, 0, false)?;
    Ok(out)
}

fn write_value(out: &mut String, value: &Value, level: usize, in_array: bool) -> Result<()> {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => write_number(out, n)?,
        Value::String(s) => write_string(out, s, level, in_array),
        Value::Array(items) => {
            if items.is_empty() {
                out.push_str("[]");
            } else {
                out.push('[');
                for item in items {
                    out.push('\n');
                    push_indent(out, level + 1);
                    write_value(out, item, level + 1, true)?;
                }
                out.push('\n');
                push_indent(out, level);
                out.push(']');
            }
        }
        Value::Object(map) => {
            if map.is_empty() {
                out.push_str("{}");
            } else {
                out.push('{');
                for (key, item) in map.iter() {
                    out.push('\n');
                    push_indent(out, level + 1);
                    write_key(out, key);
                    out.push(':');
                    if !starts_own_line(item) {
                        out.push(' ');
                    }
                    write_value(out, item, level + 1, false)?;
                }
                out.push('\n');
                push_indent(out, level);
                out.push('}');
            }
        }
    }
    Ok(())
}

fn push_indent(out: &mut String, level: usize) {
    for _ in 0..level {
        out.push_str("  ");
    }
}

/// Block strings begin with a newline of their own, so the `key:` line
/// takes no separating space.
fn starts_own_line(value: &Value) -> bool {
    match value {
        Value::String(s) => !s.is_empty() && s.contains('\n') && block_safe(s),
        _ => false,
    }
}

fn write_number(out: &mut String, n: &Number) -> Result<()> {
    match n {
        Number::Float(f) => {
            if !f.is_finite() {
                return Err(Error::unsupported_value(format!(
                    "non-finite number {} has no HJSON form",
                    f
                )));
            }
            out.push_str(&f.to_string());
        }
        // Raw numeric text is spliced back untouched.
        Number::Raw(s) => out.push_str(s),
    }
    Ok(())
}

fn write_key(out: &mut String, key: &str) {
    let bare = !key.is_empty()
        && key.bytes().all(|b| {
            !b.is_ascii_whitespace() && !matches!(b, b'{' | b'}' | b'[' | b']' | b',' | b':')
        })
        && !key.starts_with('#')
        && !key.starts_with("//")
        && !key.starts_with("/*")
        && !key.starts_with('"')
        && !key.starts_with('\'')
        && !key.bytes().any(|b| b < 0x20);
    if bare {
        out.push_str(key);
    } else {
        write_quoted(out, key);
    }
}

fn write_string(out: &mut String, s: &str, level: usize, in_array: bool) {
    if s.is_empty() {
        out.push_str("\"\"");
    } else if s.contains('\n') {
        if block_safe(s) {
            write_block(out, s, level);
        } else {
            write_quoted(out, s);
        }
    } else if in_array || needs_quotes(s) {
        // Array scalars have no quoteless form.
        write_quoted(out, s);
    } else if level == 0 && !root_quoteless_safe(s) {
        // At the root, a quoteless string containing a colon would read
        // back as an implicit object.
        write_quoted(out, s);
    } else {
        out.push_str(s);
    }
}

/// A quoteless string at document root must survive the root production,
/// which tries a braceless object before falling back to a single value.
fn root_quoteless_safe(s: &str) -> bool {
    matches!(
        crate::de::Parser::new(s, crate::DecoderOptions::default()).parse(),
        Ok(Value::String(back)) if back == s
    )
}

/// `true` when a quoteless rendering of `s` would not survive re-parsing.
fn needs_quotes(s: &str) -> bool {
    let first = match s.bytes().next() {
        Some(b) => b,
        None => return true,
    };
    matches!(
        first,
        b' ' | b'\t' | b'"' | b'\'' | b'#' | b'{' | b'}' | b'[' | b']' | b':' | b','
    ) || s.starts_with("//")
        || s.starts_with("/*")
        || s.ends_with(' ')
        || s.ends_with('\t')
        || s.bytes().any(|b| b < 0x20 || b == 0x7f)
        || lexes_as_keyword(s)
        || lexes_as_number(s)
}

/// `true` when re-parsing would cut `s` short at a checkpoint and return a
/// keyword instead of the full string.
fn lexes_as_keyword(s: &str) -> bool {
    for word in ["true", "false", "null"] {
        if let Some(rest) = s.strip_prefix(word) {
            if quoteless_checkpoint_follows(rest) {
                return true;
            }
        }
    }
    false
}

/// Like [`lexes_as_keyword`], for the number grammar.
fn lexes_as_number(s: &str) -> bool {
    let b = s.as_bytes();
    if !matches!(b[0], b'-' | b'0'..=b'9') {
        return false;
    }
    // Find the longest prefix ending at a checkpoint; the parser tests the
    // trimmed span at each one.
    let mut end = s.len();
    for (i, &byte) in b.iter().enumerate() {
        if matches!(byte, b',' | b'}' | b']' | b'#')
            || (byte == b'/' && matches!(b.get(i + 1), Some(b'/') | Some(b'*')))
        {
            end = i;
            break;
        }
    }
    is_json_number(s[..end].trim())
}

fn quoteless_checkpoint_follows(rest: &str) -> bool {
    let rest = rest.trim_start();
    rest.is_empty()
        || rest.starts_with(',')
        || rest.starts_with(']')
        || rest.starts_with('}')
        || rest.starts_with('#')
        || rest.starts_with("//")
        || rest.starts_with("/*")
}

/// `true` when `s` can round-trip through a `'''` block: no control bytes
/// besides the newlines, and no triple quote of its own.
fn block_safe(s: &str) -> bool {
    !s.contains("'''") && s.chars().all(|c| c == '\n' || c == '\t' || !c.is_control())
}

fn write_block(out: &mut String, s: &str, level: usize) {
    out.push('\n');
    push_indent(out, level + 1);
    out.push_str("'''");
    for line in s.split('\n') {
        out.push('\n');
        if !line.is_empty() {
            push_indent(out, level + 1);
            out.push_str(line);
        }
    }
    out.push('\n');
    push_indent(out, level + 1);
    out.push_str("'''");
}

fn write_quoted(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 || c as u32 == 0x7f => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

/// Emits a value as strict JSON, preserving object key order.
///
/// This is the serialization handed to user JSON decode hooks, and a
/// convenient bridge to JSON-only consumers.
///
/// # Examples
///
/// ```rust
/// use hjson::{parse, to_json};
///
/// let value = parse(b"b: first\na: second").unwrap();
/// assert_eq!(to_json(&value), r#"{"b":"first","a":"second"}"#);
/// ```
#[must_use]
pub fn to_json(value: &Value) -> String {
    let mut out = String::with_capacity(128);
    write_json(&mut out, value);
    out
}

fn write_json(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(Number::Float(f)) => {
            if f.is_finite() {
                out.push_str(&f.to_string());
            } else {
                out.push_str("null");
            }
        }
        Value::Number(Number::Raw(s)) => out.push_str(s),
        Value::String(s) => write_quoted(out, s),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_json(out, item);
            }
            out.push(']');
        }
        Value::Object(map) => {
            out.push('{');
            for (i, (key, item)) in map.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_quoted(out, key);
                out.push(':');
                write_json(out, item);
            }
            out.push('}');
        }
    }
}

/// Renders a scalar as its canonical text: `null`, `true`/`false`, the
/// numeric text, or the string's own content.
///
/// This is the form handed to user text decode hooks. Arrays and objects
/// have no scalar text and fail with a type mismatch.
///
/// # Examples
///
/// ```rust
/// use hjson::{to_text, Value};
///
/// assert_eq!(to_text(&Value::Null).unwrap(), "null");
/// assert_eq!(to_text(&Value::from(2.0)).unwrap(), "2");
/// assert!(to_text(&Value::Array(vec![])).is_err());
/// ```
pub fn to_text(value: &Value) -> Result<String> {
    match value {
        Value::Null => Ok("null".to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::String(s) => Ok(s.clone()),
        other => Err(Error::type_mismatch("a scalar", other.kind())),
    }
}
