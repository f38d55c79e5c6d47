//! Macros for building values and describing record destinations.

/// Builds a [`Value`](crate::Value) from JSON-like syntax.
///
/// # Examples
///
/// ```rust
/// use hjson::hjson;
///
/// let value = hjson!({
///     "name": "Alice",
///     "age": 30,
///     "tags": ["rust", "hjson"]
/// });
/// assert!(value.is_object());
/// ```
#[macro_export]
macro_rules! hjson {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::hjson!($elem)),*])
    };

    ({}) => {
        $crate::Value::Object($crate::HjsonMap::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::HjsonMap::new();
        $(
            object.insert($key.to_string(), $crate::hjson!($value));
        )*
        $crate::Value::Object(object)
    }};

    // Any other expression goes through the From impls.
    ($other:expr) => {
        $crate::Value::from($other)
    };
}

/// Describes a struct's fields to the binder and implements
/// [`Bind`](crate::Bind) and [`Record`](crate::Record) for it.
///
/// Field forms, in declaration order:
///
/// - `field` — bound by its own name (case-insensitively as a fallback)
/// - `field as "alt"` — additionally matched by the alternate name, which
///   takes precedence over any exact field-name match
/// - `..field` — an embedded record whose fields are promoted into this
///   record's namespace; fields declared earlier shadow promoted ones.
///   `Option<Inner>` and `Option<Box<Inner>>` embedded fields allocate
///   themselves on first use.
///
/// # Examples
///
/// ```rust
/// use hjson::{hjson_record, unmarshal};
///
/// #[derive(Default)]
/// struct Limits { burst: u32 }
/// hjson_record!(Limits { burst });
///
/// #[derive(Default)]
/// struct Config {
///     rate: u32,
///     limits: Limits,
/// }
/// hjson_record!(Config { rate as "requests_per_second", ..limits });
///
/// let mut config = Config::default();
/// unmarshal(b"requests_per_second: 100\nburst: 10", &mut config).unwrap();
/// assert_eq!(config.rate, 100);
/// assert_eq!(config.limits.burst, 10);
/// ```
#[macro_export]
macro_rules! hjson_record {
    ($ty:ty { $($body:tt)* }) => {
        impl $crate::Record for $ty {
            fn field_slots(&mut self) -> ::std::vec::Vec<$crate::FieldSlot<'_>> {
                let mut slots = ::std::vec::Vec::new();
                $crate::hjson_record!(@slots self, slots, $($body)*);
                slots
            }
        }

        impl $crate::Bind for $ty {
            fn bind(
                &mut self,
                value: $crate::Value,
                options: &$crate::DecoderOptions,
            ) -> $crate::Result<()> {
                let mut slots = $crate::Record::field_slots(self);
                $crate::bind_record(value, &mut slots, options)
            }
        }
    };

    (@slots $self:ident, $slots:ident $(,)?) => {};

    (@slots $self:ident, $slots:ident, ..$field:ident $(, $($rest:tt)*)?) => {
        $slots.extend($crate::Record::field_slots(&mut $self.$field));
        $($crate::hjson_record!(@slots $self, $slots, $($rest)*);)?
    };

    (@slots $self:ident, $slots:ident, $field:ident as $alias:literal $(, $($rest:tt)*)?) => {
        $slots.push($crate::FieldSlot::aliased(
            stringify!($field),
            $alias,
            &mut $self.$field,
        ));
        $($crate::hjson_record!(@slots $self, $slots, $($rest)*);)?
    };

    (@slots $self:ident, $slots:ident, $field:ident $(, $($rest:tt)*)?) => {
        $slots.push($crate::FieldSlot::new(stringify!($field), &mut $self.$field));
        $($crate::hjson_record!(@slots $self, $slots, $($rest)*);)?
    };
}

/// Implements [`Bind`](crate::Bind) for a type through its
/// [`DecodeText`](crate::DecodeText) hook.
///
/// # Examples
///
/// ```rust
/// use hjson::{hjson_text_decoder, unmarshal, DecodeText, HookError};
///
/// #[derive(Default)]
/// struct Tag(String);
///
/// impl DecodeText for Tag {
///     fn decode_text(&mut self, text: &str) -> Result<(), HookError> {
///         self.0 = text.to_uppercase();
///         Ok(())
///     }
/// }
/// hjson_text_decoder!(Tag);
///
/// let mut tag = Tag::default();
/// unmarshal(b"loud", &mut tag).unwrap();
/// assert_eq!(tag.0, "LOUD");
/// ```
#[macro_export]
macro_rules! hjson_text_decoder {
    ($ty:ty) => {
        impl $crate::Bind for $ty {
            fn bind(
                &mut self,
                value: $crate::Value,
                _options: &$crate::DecoderOptions,
            ) -> $crate::Result<()> {
                $crate::bind_via_text(self, &value)
            }
        }
    };
}

/// Implements [`Bind`](crate::Bind) for a type through its
/// [`DecodeJson`](crate::DecodeJson) hook.
///
/// Use this wiring, not [`hjson_text_decoder!`], for a type that carries
/// both hooks: the JSON decoder takes precedence.
#[macro_export]
macro_rules! hjson_json_decoder {
    ($ty:ty) => {
        impl $crate::Bind for $ty {
            fn bind(
                &mut self,
                value: $crate::Value,
                _options: &$crate::DecoderOptions,
            ) -> $crate::Result<()> {
                $crate::bind_via_json(self, value)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{HjsonMap, Number, Value};

    #[test]
    fn primitives() {
        assert_eq!(hjson!(null), Value::Null);
        assert_eq!(hjson!(true), Value::Bool(true));
        assert_eq!(hjson!(false), Value::Bool(false));
        assert_eq!(hjson!(42), Value::Number(Number::Float(42.0)));
        assert_eq!(hjson!(3.5), Value::Number(Number::Float(3.5)));
        assert_eq!(hjson!("hello"), Value::String("hello".to_string()));
    }

    #[test]
    fn arrays() {
        assert_eq!(hjson!([]), Value::Array(vec![]));

        let arr = hjson!([1, 2, 3]);
        match arr {
            Value::Array(vec) => {
                assert_eq!(vec.len(), 3);
                assert_eq!(vec[0], Value::Number(Number::Float(1.0)));
                assert_eq!(vec[2], Value::Number(Number::Float(3.0)));
            }
            _ => panic!("expected array"),
        }
    }

    #[test]
    fn objects_preserve_order() {
        assert_eq!(hjson!({}), Value::Object(HjsonMap::new()));

        let obj = hjson!({
            "zebra": 1,
            "aardvark": [true, null]
        });
        match obj {
            Value::Object(map) => {
                let keys: Vec<_> = map.keys().cloned().collect();
                assert_eq!(keys, vec!["zebra", "aardvark"]);
            }
            _ => panic!("expected object"),
        }
    }
}
