//! # hjson
//!
//! A bidirectional codec between the HJSON configuration format and Rust
//! values.
//!
//! ## What is HJSON?
//!
//! HJSON is a superset of JSON designed for files that humans edit by
//! hand: quotes around keys and strings are optional, commas are optional,
//! comments are allowed, and multi-line strings have a dedicated block
//! syntax. Every valid JSON document is also valid HJSON.
//!
//! ```text
//! {
//!   # specify rate in requests/second
//!   rate: 1000
//!   motto: everything on this line is one string
//!   limits: {
//!     burst: 10
//!     window: 2.5
//!   }
//! }
//! ```
//!
//! ## Key Features
//!
//! - **Order-preserving dynamic tree**: [`Value`] keeps object keys in
//!   their textual order, and re-emission preserves it
//! - **Merge-aware binder**: [`unmarshal`] binds *into* an existing
//!   destination — records merge field by field, maps replace per key —
//!   so layered configuration files compose naturally
//! - **Alternate names, case folding, embedded records**: the
//!   [`hjson_record!`] macro describes struct fields the way a reflective
//!   binder would see them
//! - **User decode hooks**: types can take over their own decoding from
//!   canonical text ([`DecodeText`]) or strict JSON ([`DecodeJson`])
//! - **Canonical emitter**: [`marshal`] pretty-prints a tree back to HJSON
//!
//! ## Quick Start
//!
//! ```rust
//! use hjson::{hjson_record, unmarshal};
//!
//! #[derive(Default, Debug, PartialEq)]
//! struct Sample {
//!     rate: i32,
//!     array: Vec<String>,
//! }
//! hjson_record!(Sample { rate, array });
//!
//! let text = br#"
//! {
//!     # specify rate in requests/second
//!     rate: 1000
//!     array:
//!     [
//!         "foo"
//!         "bar"
//!     ]
//! }"#;
//!
//! let mut sample = Sample::default();
//! unmarshal(text, &mut sample).unwrap();
//! assert_eq!(sample.rate, 1000);
//! assert_eq!(sample.array, vec!["foo", "bar"]);
//! ```
//!
//! ## Working with Dynamic Values
//!
//! ```rust
//! use hjson::{marshal, parse};
//!
//! let value = parse(b"b: first\na: second").unwrap();
//! // Key order survives the round trip.
//! assert_eq!(marshal(&value).unwrap(), "{\n  b: first\n  a: second\n}");
//! ```
//!
//! ## Layered Configuration
//!
//! ```rust
//! use hjson::{hjson_record, unmarshal};
//!
//! #[derive(Default)]
//! struct Config {
//!     host: String,
//!     port: u16,
//! }
//! hjson_record!(Config { host, port });
//!
//! let mut config = Config::default();
//! unmarshal(b"host: localhost\nport: 8080", &mut config).unwrap();
//! // A later file only overrides what it mentions.
//! unmarshal(b"port: 9090", &mut config).unwrap();
//! assert_eq!(config.host, "localhost");
//! assert_eq!(config.port, 9090);
//! ```
//!
//! ## Concurrency
//!
//! All operations are synchronous and single-threaded. A call owns its
//! input and destination exclusively for its duration; share trees across
//! threads only with external synchronization.

pub mod bind;
pub mod de;
pub mod error;
pub mod format;
pub mod macros;
pub mod map;
pub mod options;
pub mod scanner;
pub mod ser;
pub mod value;

pub use bind::{
    bind_record, bind_via_json, bind_via_text, Bind, DecodeJson, DecodeText, EncodeJson,
    FieldSlot, HookError, MapKey, Poly, Record,
};
pub use de::Parser;
pub use error::{Error, Result};
pub use map::HjsonMap;
pub use options::DecoderOptions;
pub use scanner::{Position, Scanner};
pub use ser::{to_json, to_text};
pub use value::{Number, Value};

/// Parses HJSON text into a dynamic [`Value`] tree.
///
/// The input must be UTF-8. At the root an object may omit its braces; a
/// bare scalar is also a valid document.
///
/// # Examples
///
/// ```rust
/// use hjson::parse;
///
/// let value = parse(b"key: 1\ncool: { foo: 1, bar: 2 }").unwrap();
/// assert_eq!(
///     value.as_object().unwrap().get("key").unwrap().as_f64(),
///     Some(1.0)
/// );
/// ```
///
/// # Errors
///
/// Returns an error for malformed input, including duplicate keys within
/// one object. Errors carry line and column information.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse(input: &[u8]) -> Result<Value> {
    parse_with_options(input, DecoderOptions::default())
}

/// Parses HJSON text with explicit [`DecoderOptions`].
///
/// # Examples
///
/// ```rust
/// use hjson::{parse_with_options, DecoderOptions, Number, Value};
///
/// let options = DecoderOptions::new().with_json_number(true);
/// let value = parse_with_options(b"35e-7", options).unwrap();
/// assert_eq!(value, Value::Number(Number::Raw("35e-7".to_string())));
/// ```
///
/// # Errors
///
/// As [`parse`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_with_options(input: &[u8], options: DecoderOptions) -> Result<Value> {
    let text = decode_utf8(input)?;
    Parser::new(text, options).parse()
}

/// Parses HJSON text and binds it into `destination`.
///
/// The destination is bound *into*, not overwritten: see the
/// [`bind`](crate::bind) module for the merge semantics per destination
/// shape. On error the destination may have been partially updated.
///
/// # Examples
///
/// ```rust
/// use std::collections::HashMap;
/// use hjson::{unmarshal, Value};
///
/// let mut config: HashMap<i64, String> = HashMap::new();
/// unmarshal(b"4: four\n3: true\n2: 2\n1: null", &mut config).unwrap();
/// assert_eq!(config[&4], "four");
/// assert_eq!(config[&3], "true");
/// assert_eq!(config[&1], "null");
/// ```
///
/// # Errors
///
/// Returns parse errors as [`parse`] does, and binder errors when the
/// value's shape does not fit the destination.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn unmarshal<T>(input: &[u8], destination: &mut T) -> Result<()>
where
    T: Bind + ?Sized,
{
    unmarshal_with_options(input, destination, DecoderOptions::default())
}

/// Parses and binds with explicit [`DecoderOptions`].
///
/// # Examples
///
/// ```rust
/// use hjson::{unmarshal_with_options, DecoderOptions, Error};
///
/// #[derive(Default)]
/// struct Known { b: String }
/// hjson::hjson_record!(Known { b });
///
/// let mut known = Known::default();
/// let options = DecoderOptions::new().with_disallow_unknown_fields(true);
/// let err = unmarshal_with_options(b"b: x\nd: 4", &mut known, options).unwrap_err();
/// assert!(matches!(err, Error::UnknownField { .. }));
/// ```
///
/// # Errors
///
/// As [`unmarshal`], plus [`Error::UnknownField`] under
/// `disallow_unknown_fields`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn unmarshal_with_options<T>(
    input: &[u8],
    destination: &mut T,
    options: DecoderOptions,
) -> Result<()>
where
    T: Bind + ?Sized,
{
    let value = parse_with_options(input, options)?;
    destination.bind(value, &options)
}

/// Emits a dynamic value as canonical pretty-printed HJSON.
///
/// Output uses two-space indentation, one member per line, `\n` line
/// endings, and no trailing newline. Object key order is preserved. Raw
/// numbers ([`Number::Raw`]) are spliced back byte for byte.
///
/// # Examples
///
/// ```rust
/// use hjson::{hjson, marshal};
///
/// let value = hjson!({"key": 1, "text": "look ma, no quotes"});
/// assert_eq!(
///     marshal(&value).unwrap(),
///     "{\n  key: 1\n  text: look ma, no quotes\n}"
/// );
/// ```
///
/// # Errors
///
/// Returns [`Error::UnsupportedValue`] for non-finite numbers.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn marshal(value: &Value) -> Result<String> {
    ser::marshal(value)
}

/// Emits a value that encodes itself as JSON ([`EncodeJson`]) as HJSON.
///
/// The hook's JSON output is re-parsed with this crate's order-preserving
/// parser and pretty-printed, so whatever key order the encoder produced
/// survives into the HJSON text.
///
/// # Errors
///
/// Returns [`Error::Hook`] when the encoder fails, and parse errors when
/// its output is not valid JSON.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn marshal_encoded<T>(value: &T) -> Result<String>
where
    T: EncodeJson + ?Sized,
{
    let json = value.encode_json().map_err(Error::hook)?;
    let tree = parse(json.as_bytes())?;
    ser::marshal(&tree)
}

fn decode_utf8(input: &[u8]) -> Result<&str> {
    std::str::from_utf8(input).map_err(|e| {
        let offset = e.valid_up_to();
        let prefix = &input[..offset];
        let line = 1 + prefix.iter().filter(|&&b| b == b'\n').count();
        let line_start = prefix
            .iter()
            .rposition(|&b| b == b'\n')
            .map(|p| p + 1)
            .unwrap_or(0);
        Error::syntax(
            Position::new(line, offset - line_start + 1, offset),
            "input is not valid UTF-8",
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readme_example() {
        // This example comes from https://hjson.github.io/
        let text = br#"
{
  // use #, // or /**/ comments,
  // omit quotes for keys
  key: 1
  // omit quotes for strings
  contains: everything on this line
  // omit commas at the end of a line
  cool: {
    foo: 1
    bar: 2
  }
  // allow trailing commas
  list: [
    1,
    2,
  ]
  // and use multiline strings
  realist:
    '''
    My half empty glass,
    I will fill your empty half.
    Now you are half full.
    '''
}
"#;
        let value = parse(text).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.get("key").unwrap().as_f64(), Some(1.0));
        assert_eq!(
            obj.get("contains").unwrap().as_str(),
            Some("everything on this line")
        );
        assert_eq!(
            obj.get("cool").unwrap().as_object().unwrap().get("bar").unwrap().as_f64(),
            Some(2.0)
        );
        assert_eq!(obj.get("list").unwrap().as_array().unwrap().len(), 2);
        assert_eq!(
            obj.get("realist").unwrap().as_str(),
            Some("My half empty glass,\nI will fill your empty half.\nNow you are half full.")
        );
    }

    #[test]
    fn roundtrip_preserves_order() {
        let input = b"{\n  B: first\n  A: second\n}";
        let value = parse(input).unwrap();
        let emitted = marshal(&value).unwrap();
        assert_eq!(emitted.as_bytes(), input);
    }

    #[test]
    fn unmarshal_into_value() {
        let mut value = Value::Null;
        unmarshal(b"[1,2,3,4]", &mut value).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 4);
    }

    #[test]
    fn array_into_map_is_a_type_mismatch() {
        let mut map: std::collections::HashMap<String, Value> = Default::default();
        let err = unmarshal(b"[1,2,3,4]", &mut map).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
    }

    #[test]
    fn invalid_utf8_is_a_syntax_error() {
        let err = parse(b"a: 1\n\xff").unwrap_err();
        match err {
            Error::Syntax { at, .. } => assert_eq!(at.line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }
}
