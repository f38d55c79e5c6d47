//! Binding dynamic values into typed destinations.
//!
//! Where a reflective language inspects the destination at runtime, this
//! crate describes destinations through the [`Bind`] trait: every type that
//! can receive an HJSON value knows how to bind one into itself. Impls for
//! the standard shapes (scalars, `String`, `Option`, `Box`, `Vec`, maps,
//! [`Value`] itself) live here; record types get their impl from the
//! [`hjson_record!`](crate::hjson_record) macro, which also describes their
//! fields for name matching, case folding and embedded-field promotion.
//!
//! ## Merge semantics
//!
//! Binding happens *into* the destination, which is what gives repeated
//! [`unmarshal`](crate::unmarshal) calls their merge behavior:
//!
//! - record fields not mentioned by the input keep their values, and
//!   mentioned fields are bound in place, recursively (deep merge)
//! - map entries are replaced wholesale per key; unmentioned keys survive
//! - sequences discard their previous contents
//!
//! ## Examples
//!
//! ```rust
//! use hjson::{hjson_record, unmarshal};
//!
//! #[derive(Default, Debug, PartialEq)]
//! struct Server {
//!     host: String,
//!     port: u16,
//! }
//! hjson_record!(Server { host, port });
//!
//! let mut server = Server::default();
//! unmarshal(b"host: localhost\nport: 8080", &mut server).unwrap();
//! assert_eq!(server, Server { host: "localhost".to_string(), port: 8080 });
//!
//! // A second call merges: only the mentioned field changes.
//! unmarshal(b"port: 9090", &mut server).unwrap();
//! assert_eq!(server.host, "localhost");
//! assert_eq!(server.port, 9090);
//! ```

use crate::{DecoderOptions, Error, HjsonMap, Number, Result, Value};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::Hash;

/// Error type returned by user decode and encode hooks.
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// A destination that HJSON values can be bound into.
///
/// `bind` consumes the dynamic value and mutates `self` accordingly. All
/// destinations are merge targets: what "merge" means per shape is
/// documented on the module.
pub trait Bind {
    fn bind(&mut self, value: Value, options: &DecoderOptions) -> Result<()>;
}

/// A destination type that decodes itself from the canonical text of a
/// scalar.
///
/// Wire the impl into [`Bind`] with
/// [`hjson_text_decoder!`](crate::hjson_text_decoder). Numbers, booleans
/// and null arrive as their textual form (`"2"`, `"true"`, `"null"`);
/// strings arrive as their content. A type that also implements
/// [`DecodeJson`] must be wired through
/// [`hjson_json_decoder!`](crate::hjson_json_decoder) instead — the JSON
/// hook takes precedence.
pub trait DecodeText {
    fn decode_text(&mut self, text: &str) -> std::result::Result<(), HookError>;
}

/// A destination type that decodes itself from a strict-JSON rendering of
/// the dynamic value.
///
/// Wire the impl into [`Bind`] with
/// [`hjson_json_decoder!`](crate::hjson_json_decoder). The JSON it receives
/// preserves object key order, so order-aware containers can rebuild it.
pub trait DecodeJson {
    fn decode_json(&mut self, json: &str) -> std::result::Result<(), HookError>;

    /// Coercion applied to every direct child of a sequence or map value
    /// before it is serialized for [`decode_json`](DecodeJson::decode_json).
    /// The default keeps children untouched; an ordered-map wrapper that
    /// wants every value as text can rewrite them here.
    fn element_coercion(child: Value) -> Value
    where
        Self: Sized,
    {
        child
    }
}

/// A source type that encodes itself as strict JSON.
///
/// [`marshal_encoded`](crate::marshal_encoded) invokes this hook and
/// splices the result into HJSON output, preserving whatever key order the
/// hook produced.
pub trait EncodeJson {
    fn encode_json(&self) -> std::result::Result<String, HookError>;
}

/// Binds `value` through a [`DecodeText`] hook.
///
/// Sequences and objects have no scalar text and fail with a type
/// mismatch. Used by the wiring macro; callable directly from handwritten
/// `Bind` impls.
pub fn bind_via_text<T: DecodeText>(dest: &mut T, value: &Value) -> Result<()> {
    let text = crate::ser::to_text(value)?;
    dest.decode_text(&text).map_err(Error::hook)
}

/// Binds `value` through a [`DecodeJson`] hook, applying the hook's
/// element coercion to every direct child first.
pub fn bind_via_json<T: DecodeJson>(dest: &mut T, value: Value) -> Result<()> {
    let value = match value {
        Value::Array(items) => {
            Value::Array(items.into_iter().map(T::element_coercion).collect())
        }
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, T::element_coercion(v)))
                .collect(),
        ),
        other => other,
    };
    dest.decode_json(&crate::ser::to_json(&value))
        .map_err(Error::hook)
}

// ---------------------------------------------------------------------------
// Records

/// One bindable field of a record: its canonical (declared) name, an
/// optional alternate name, and the destination slot.
pub struct FieldSlot<'a> {
    name: &'static str,
    alias: Option<&'static str>,
    dest: &'a mut dyn Bind,
}

impl<'a> FieldSlot<'a> {
    pub fn new(name: &'static str, dest: &'a mut dyn Bind) -> Self {
        FieldSlot {
            name,
            alias: None,
            dest,
        }
    }

    pub fn aliased(name: &'static str, alias: &'static str, dest: &'a mut dyn Bind) -> Self {
        FieldSlot {
            name,
            alias: Some(alias),
            dest,
        }
    }

    /// The canonical field name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// A destination with named fields.
///
/// `field_slots` lists the fields in declaration order, which drives both
/// case-insensitive matching (first declared wins among equal-ignoring-case
/// candidates) and shadowing (a record's own fields come before the fields
/// promoted from embedded records). Implemented by
/// [`hjson_record!`](crate::hjson_record).
pub trait Record {
    fn field_slots(&mut self) -> Vec<FieldSlot<'_>>;
}

/// Embedded optional records allocate themselves on first use, so a field
/// chain behind `Option<Inner>` or `Option<Box<Inner>>` is reachable.
impl<R: Record + Default> Record for Option<R> {
    fn field_slots(&mut self) -> Vec<FieldSlot<'_>> {
        self.get_or_insert_with(R::default).field_slots()
    }
}

impl<R: Record + ?Sized> Record for Box<R> {
    fn field_slots(&mut self) -> Vec<FieldSlot<'_>> {
        (**self).field_slots()
    }
}

/// Binds an object into a record described by `slots`.
///
/// Each incoming key picks a field by, in order: exact match of the
/// alternate name, exact match of the canonical name, case-insensitive
/// match preferring the first declared candidate. Unknown keys are ignored
/// unless `options.disallow_unknown_fields`. Fields not mentioned keep
/// their values.
pub fn bind_record(
    value: Value,
    slots: &mut [FieldSlot<'_>],
    options: &DecoderOptions,
) -> Result<()> {
    let entries = match value {
        Value::Object(map) => map,
        other => return Err(Error::type_mismatch("a record", other.kind())),
    };
    for (key, item) in entries {
        match match_field(slots, &key) {
            Some(i) => slots[i].dest.bind(item, options)?,
            None if options.disallow_unknown_fields => {
                return Err(Error::unknown_field(key));
            }
            None => {}
        }
    }
    Ok(())
}

fn match_field(slots: &[FieldSlot<'_>], key: &str) -> Option<usize> {
    if let Some(i) = slots.iter().position(|s| s.alias == Some(key)) {
        return Some(i);
    }
    if let Some(i) = slots.iter().position(|s| s.name == key) {
        return Some(i);
    }
    slots.iter().position(|s| {
        s.alias.map_or(false, |a| fold_eq(a, key)) || fold_eq(s.name, key)
    })
}

fn fold_eq(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

// ---------------------------------------------------------------------------
// Polymorphic destinations

/// A polymorphic destination: a trait-object slot that may hold a concrete
/// value.
///
/// Binding delegates to the concrete value's own [`Bind`] impl, so repeated
/// calls merge into the same instance. An empty `Poly` cannot conjure a
/// concrete type and fails with
/// [`InvalidDestination`](crate::Error::InvalidDestination).
///
/// # Examples
///
/// ```rust
/// use hjson::{hjson_record, unmarshal, Bind, Poly};
///
/// trait Plugin: Bind {
///     fn describe(&self) -> String;
/// }
///
/// #[derive(Default)]
/// struct Echo { text: String }
/// hjson_record!(Echo { text });
/// impl Plugin for Echo {
///     fn describe(&self) -> String { self.text.clone() }
/// }
///
/// let mut slot: Poly<dyn Plugin> = Poly::new(Box::new(Echo::default()));
/// unmarshal(b"text: hello", &mut slot).unwrap();
/// assert_eq!(slot.get().unwrap().describe(), "hello");
///
/// let mut empty: Poly<dyn Plugin> = Poly::empty();
/// assert!(unmarshal(b"text: hello", &mut empty).is_err());
/// ```
pub struct Poly<T: ?Sized>(Option<Box<T>>);

impl<T: ?Sized> Poly<T> {
    /// Wraps a concrete value for the slot to bind into.
    #[must_use]
    pub fn new(concrete: Box<T>) -> Self {
        Poly(Some(concrete))
    }

    /// An empty slot; binding into it fails until a value is supplied.
    #[must_use]
    pub fn empty() -> Self {
        Poly(None)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    #[must_use]
    pub fn get(&self) -> Option<&T> {
        self.0.as_deref()
    }

    #[must_use]
    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.0.as_deref_mut()
    }

    #[must_use]
    pub fn into_inner(self) -> Option<Box<T>> {
        self.0
    }
}

impl<T: ?Sized> Default for Poly<T> {
    fn default() -> Self {
        Poly::empty()
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Poly<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Poly").field(&self.0).finish()
    }
}

impl<T: Bind + ?Sized> Bind for Poly<T> {
    fn bind(&mut self, value: Value, options: &DecoderOptions) -> Result<()> {
        match self.0.as_deref_mut() {
            Some(inner) => inner.bind(value, options),
            None => Err(Error::invalid_destination(
                "empty polymorphic destination has no concrete value to bind into",
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Map keys

/// Key types for map destinations, parsed from the textual key.
///
/// HJSON keys are always text; a `HashMap<i64, _>` destination parses each
/// key in base 10. Implemented for `String` and the integer widths.
pub trait MapKey: Sized {
    fn from_key_text(key: &str) -> Result<Self>;
}

impl MapKey for String {
    fn from_key_text(key: &str) -> Result<Self> {
        Ok(key.to_string())
    }
}

macro_rules! int_map_key {
    ($($ty:ty)*) => {$(
        impl MapKey for $ty {
            fn from_key_text(key: &str) -> Result<Self> {
                key.parse()
                    .map_err(|_| Error::invalid_key(key, stringify!($ty)))
            }
        }
    )*};
}

int_map_key!(i8 i16 i32 i64 i128 isize u8 u16 u32 u64 u128 usize);

// ---------------------------------------------------------------------------
// Bind impls for the standard shapes

/// The opaque destination: accepts any value as-is.
impl Bind for Value {
    fn bind(&mut self, value: Value, _options: &DecoderOptions) -> Result<()> {
        *self = value;
        Ok(())
    }
}

/// Booleans bind only from `true`/`false`, never from strings.
impl Bind for bool {
    fn bind(&mut self, value: Value, _options: &DecoderOptions) -> Result<()> {
        match value {
            Value::Bool(b) => {
                *self = b;
                Ok(())
            }
            other => Err(Error::type_mismatch("bool", other.kind())),
        }
    }
}

/// Strings accept string values directly; null, booleans and numbers bind
/// as their canonical text (`"null"`, `"true"`, `"2"`).
impl Bind for String {
    fn bind(&mut self, value: Value, _options: &DecoderOptions) -> Result<()> {
        match value {
            Value::String(s) => *self = s,
            Value::Null => *self = "null".to_string(),
            Value::Bool(b) => *self = b.to_string(),
            Value::Number(n) => *self = n.to_string(),
            other => return Err(Error::type_mismatch("string", other.kind())),
        }
        Ok(())
    }
}

macro_rules! bind_integer {
    ($($ty:ty)*) => {$(
        impl Bind for $ty {
            fn bind(&mut self, value: Value, _options: &DecoderOptions) -> Result<()> {
                let number = match value {
                    Value::Number(n) => n,
                    other => return Err(Error::type_mismatch(stringify!($ty), other.kind())),
                };
                match number {
                    Number::Float(f) => {
                        if f.fract() != 0.0 {
                            return Err(Error::range(format!(
                                "{} is not an integer", f
                            )));
                        }
                        if f < <$ty>::MIN as f64 || f > <$ty>::MAX as f64 {
                            return Err(Error::range(format!(
                                "{} does not fit in {}", f, stringify!($ty)
                            )));
                        }
                        *self = f as $ty;
                    }
                    Number::Raw(s) => {
                        *self = s.parse().map_err(|_| {
                            Error::range(format!("{} does not fit in {}", s, stringify!($ty)))
                        })?;
                    }
                }
                Ok(())
            }
        }
    )*};
}

bind_integer!(i8 i16 i32 i64 i128 isize u8 u16 u32 u64 u128 usize);

impl Bind for f64 {
    fn bind(&mut self, value: Value, _options: &DecoderOptions) -> Result<()> {
        match value {
            Value::Number(Number::Float(f)) => {
                *self = f;
                Ok(())
            }
            Value::Number(Number::Raw(s)) => {
                *self = s
                    .parse()
                    .map_err(|_| Error::range(format!("{} does not fit in f64", s)))?;
                Ok(())
            }
            other => Err(Error::type_mismatch("f64", other.kind())),
        }
    }
}

impl Bind for f32 {
    fn bind(&mut self, value: Value, _options: &DecoderOptions) -> Result<()> {
        let wide = match value {
            Value::Number(Number::Float(f)) => f,
            Value::Number(Number::Raw(s)) => s
                .parse()
                .map_err(|_| Error::range(format!("{} does not fit in f32", s)))?,
            other => return Err(Error::type_mismatch("f32", other.kind())),
        };
        if wide.is_finite() && wide.abs() > f64::from(f32::MAX) {
            return Err(Error::range(format!("{} does not fit in f32", wide)));
        }
        *self = wide as f32;
        Ok(())
    }
}

/// `Option` is the nullable pointer: `null` clears it, anything else
/// allocates a default value when empty and binds into the existing value
/// otherwise.
impl<T: Bind + Default> Bind for Option<T> {
    fn bind(&mut self, value: Value, options: &DecoderOptions) -> Result<()> {
        if let Value::Null = value {
            *self = None;
            return Ok(());
        }
        self.get_or_insert_with(T::default).bind(value, options)
    }
}

impl<T: Bind + ?Sized> Bind for Box<T> {
    fn bind(&mut self, value: Value, options: &DecoderOptions) -> Result<()> {
        (**self).bind(value, options)
    }
}

/// Sequences replace their previous contents; each element binds into a
/// fresh default slot.
impl<T: Bind + Default> Bind for Vec<T> {
    fn bind(&mut self, value: Value, options: &DecoderOptions) -> Result<()> {
        let items = match value {
            Value::Array(items) => items,
            other => return Err(Error::type_mismatch("an array", other.kind())),
        };
        self.clear();
        self.reserve(items.len());
        for item in items {
            let mut slot = T::default();
            slot.bind(item, options)?;
            self.push(slot);
        }
        Ok(())
    }
}

macro_rules! bind_map {
    ($map:ident, $($bound:tt)*) => {
        /// Map entries are replaced wholesale per incoming key; keys not
        /// mentioned by the input survive.
        impl<K, V> Bind for $map<K, V>
        where
            K: MapKey + $($bound)*,
            V: Bind + Default,
        {
            fn bind(&mut self, value: Value, options: &DecoderOptions) -> Result<()> {
                let entries = match value {
                    Value::Object(map) => map,
                    other => return Err(Error::type_mismatch("a map", other.kind())),
                };
                for (key, item) in entries {
                    let parsed = K::from_key_text(&key)?;
                    let mut slot = V::default();
                    slot.bind(item, options)?;
                    self.insert(parsed, slot);
                }
                Ok(())
            }
        }
    };
}

bind_map!(HashMap, Eq + Hash);
bind_map!(BTreeMap, Ord);

/// The ordered dynamic map follows map semantics: per-key replacement.
impl Bind for HjsonMap {
    fn bind(&mut self, value: Value, _options: &DecoderOptions) -> Result<()> {
        let entries = match value {
            Value::Object(map) => map,
            other => return Err(Error::type_mismatch("a map", other.kind())),
        };
        for (key, item) in entries {
            self.insert(key, item);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> DecoderOptions {
        DecoderOptions::default()
    }

    #[test]
    fn string_destination_stringifies_scalars() {
        let mut s = String::new();
        s.bind(Value::Null, &opts()).unwrap();
        assert_eq!(s, "null");
        s.bind(Value::Bool(true), &opts()).unwrap();
        assert_eq!(s, "true");
        s.bind(Value::Number(Number::Float(2.0)), &opts()).unwrap();
        assert_eq!(s, "2");
        assert!(s.bind(Value::Array(vec![]), &opts()).is_err());
    }

    #[test]
    fn bool_rejects_strings() {
        let mut b = false;
        assert!(b.bind(Value::from("true"), &opts()).is_err());
        b.bind(Value::Bool(true), &opts()).unwrap();
        assert!(b);
    }

    #[test]
    fn integer_rejects_fractions_and_overflow() {
        let mut n = 0u8;
        assert!(n.bind(Value::from(2.5), &opts()).is_err());
        assert!(n.bind(Value::from(300.0), &opts()).is_err());
        assert!(n.bind(Value::from(-1.0), &opts()).is_err());
        n.bind(Value::from(255.0), &opts()).unwrap();
        assert_eq!(n, 255);
    }

    #[test]
    fn wide_integers_bind_like_their_keys_parse() {
        let mut n = 0i128;
        n.bind(Value::from(-42.0), &opts()).unwrap();
        assert_eq!(n, -42);

        // Raw text reaches values the f64 path cannot represent exactly.
        let mut u = 0u128;
        u.bind(
            Value::Number(Number::Raw("18446744073709551616".to_string())),
            &opts(),
        )
        .unwrap();
        assert_eq!(u, 18_446_744_073_709_551_616u128);

        assert_eq!(i128::from_key_text("-7").unwrap(), -7);
    }

    #[test]
    fn option_clears_on_null_and_allocates_on_value() {
        let mut o: Option<i64> = Some(5);
        o.bind(Value::Null, &opts()).unwrap();
        assert_eq!(o, None);
        o.bind(Value::from(7.0), &opts()).unwrap();
        assert_eq!(o, Some(7));
    }

    #[test]
    fn vec_replaces_contents() {
        let mut v = vec![9i64, 9, 9];
        v.bind(
            Value::Array(vec![Value::from(1.0), Value::from(2.0)]),
            &opts(),
        )
        .unwrap();
        assert_eq!(v, vec![1, 2]);
    }

    #[test]
    fn field_match_precedence() {
        let mut a = 0i64;
        let mut b = 0i64;
        let mut c = 0i64;
        let slots = vec![
            FieldSlot::aliased("one", "uno", &mut a),
            FieldSlot::new("Two", &mut b),
            FieldSlot::new("TWO", &mut c),
        ];
        assert_eq!(match_field(&slots, "uno"), Some(0));
        assert_eq!(match_field(&slots, "one"), Some(0));
        assert_eq!(match_field(&slots, "TWO"), Some(2)); // exact beats declared order
        assert_eq!(match_field(&slots, "two"), Some(1)); // fold prefers first declared
        assert_eq!(match_field(&slots, "three"), None);
    }

    #[test]
    fn invalid_map_key_is_reported() {
        let err = i64::from_key_text("four").unwrap_err();
        assert!(matches!(err, Error::InvalidKey { .. }));
    }
}
