//! Configuration options for HJSON decoding.
//!
//! [`DecoderOptions`] controls two aspects of a decode call:
//!
//! - **Number representation**: whether numbers keep their raw text or are
//!   converted to 64-bit floats when stored in dynamic destinations
//! - **Strictness**: whether keys without a matching record field are an
//!   error or silently ignored
//!
//! ## Examples
//!
//! ```rust
//! use hjson::{parse_with_options, DecoderOptions, Number, Value};
//!
//! let options = DecoderOptions::new().with_json_number(true);
//! let value = parse_with_options(b"35e-7", options).unwrap();
//! assert_eq!(value, Value::Number(Number::Raw("35e-7".to_string())));
//! ```

/// Options accepted by [`unmarshal_with_options`](crate::unmarshal_with_options)
/// and [`parse_with_options`](crate::parse_with_options).
///
/// # Examples
///
/// ```rust
/// use hjson::DecoderOptions;
///
/// // Defaults: numbers as f64, unknown fields ignored
/// let options = DecoderOptions::new();
///
/// // Strict field matching, raw number text
/// let options = DecoderOptions::new()
///     .with_json_number(true)
///     .with_disallow_unknown_fields(true);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecoderOptions {
    /// Store numbers as their raw numeric text ([`Number::Raw`](crate::Number))
    /// instead of converting to 64-bit floats. The raw text survives
    /// re-emission byte for byte.
    pub use_json_number: bool,
    /// Treat keys with no matching record field as an error instead of
    /// ignoring them.
    pub disallow_unknown_fields: bool,
}

impl DecoderOptions {
    /// Creates the default options (floats, unknown fields ignored).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hjson::DecoderOptions;
    ///
    /// let options = DecoderOptions::new();
    /// assert!(!options.use_json_number);
    /// assert!(!options.disallow_unknown_fields);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether numbers keep their raw text.
    #[must_use]
    pub fn with_json_number(mut self, on: bool) -> Self {
        self.use_json_number = on;
        self
    }

    /// Sets whether unknown keys against a record destination are an error.
    #[must_use]
    pub fn with_disallow_unknown_fields(mut self, on: bool) -> Self {
        self.disallow_unknown_fields = on;
        self
    }
}
