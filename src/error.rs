//! Error types for HJSON parsing and binding.
//!
//! Every failure in this crate surfaces as a single [`Error`] enum. Parse
//! errors carry a [`Position`] (line, column, byte offset) pointing at the
//! offending input; binder errors describe the destination that rejected
//! the value.
//!
//! A failed call never rolls the destination back: fields bound before the
//! failing one keep their new values. Callers that need transactional
//! behavior should bind into a scratch value first.
//!
//! ## Examples
//!
//! ```rust
//! use hjson::{parse, Error};
//!
//! let err = parse(b"{ a: 1, a: 2 }").unwrap_err();
//! assert!(matches!(err, Error::DuplicateKey { .. }));
//! assert!(err.to_string().contains("duplicate key"));
//! ```

use crate::scanner::Position;
use std::fmt;
use thiserror::Error;

/// All errors produced by parsing, binding, or emitting HJSON.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Unexpected byte, unterminated construct, missing `:`, bad escape,
    /// bad number.
    #[error("syntax error at {at}: {msg}")]
    Syntax { at: Position, msg: String },

    /// The input ended inside an unfinished structure.
    #[error("unexpected end of input at {at}: expected {expected}")]
    UnexpectedEof { at: Position, expected: String },

    /// The same key appeared twice in one map; never silent last-wins.
    #[error("duplicate key {key:?} at {at}")]
    DuplicateKey { at: Position, key: String },

    /// A key had no matching record field under `DisallowUnknownFields`.
    #[error("unknown field {field:?}")]
    UnknownField { field: String },

    /// The dynamic value cannot bind to the destination kind.
    #[error("type mismatch: cannot bind {found} to {expected}")]
    TypeMismatch { expected: String, found: String },

    /// Number outside the destination scalar's representable range, or a
    /// non-integral number bound to an integer destination.
    #[error("number out of range: {0}")]
    Range(String),

    /// A map key's text could not be parsed as the destination key type.
    #[error("invalid map key {key:?}: expected {expected}")]
    InvalidKey { key: String, expected: String },

    /// The destination cannot accept any value in its current state, e.g.
    /// an empty polymorphic slot with no concrete type to bind into.
    #[error("invalid destination: {0}")]
    InvalidDestination(String),

    /// A value the emitter cannot represent, e.g. a non-finite number.
    #[error("unsupported value: {0}")]
    UnsupportedValue(String),

    /// A user decode or encode hook returned an error.
    #[error("user hook failed: {0}")]
    Hook(String),
}

impl Error {
    /// Creates a syntax error at the given position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hjson::{Error, Position};
    ///
    /// let err = Error::syntax(Position::new(10, 5, 42), "unexpected token");
    /// assert!(err.to_string().contains("line 10"));
    /// ```
    pub fn syntax(at: Position, msg: impl Into<String>) -> Self {
        Error::Syntax {
            at,
            msg: msg.into(),
        }
    }

    /// Creates an unexpected end-of-input error.
    pub fn eof(at: Position, expected: impl Into<String>) -> Self {
        Error::UnexpectedEof {
            at,
            expected: expected.into(),
        }
    }

    /// Creates a duplicate-key error for a map that names `key` twice.
    pub fn duplicate_key(at: Position, key: impl Into<String>) -> Self {
        Error::DuplicateKey {
            at,
            key: key.into(),
        }
    }

    /// Creates an unknown-field error (only raised under
    /// `DisallowUnknownFields`).
    pub fn unknown_field(field: impl Into<String>) -> Self {
        Error::UnknownField {
            field: field.into(),
        }
    }

    /// Creates a type-mismatch error when a value cannot bind to a
    /// destination kind.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hjson::Error;
    ///
    /// let err = Error::type_mismatch("bool", "string");
    /// assert!(err.to_string().contains("cannot bind string to bool"));
    /// ```
    pub fn type_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Error::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Creates a range error for a number the destination cannot hold.
    pub fn range(msg: impl fmt::Display) -> Self {
        Error::Range(msg.to_string())
    }

    /// Creates an invalid-map-key error.
    pub fn invalid_key(key: impl Into<String>, expected: impl Into<String>) -> Self {
        Error::InvalidKey {
            key: key.into(),
            expected: expected.into(),
        }
    }

    /// Creates an invalid-destination error.
    pub fn invalid_destination(msg: impl Into<String>) -> Self {
        Error::InvalidDestination(msg.into())
    }

    /// Creates an unsupported-value error.
    pub fn unsupported_value(msg: impl Into<String>) -> Self {
        Error::UnsupportedValue(msg.into())
    }

    /// Wraps a user hook error.
    pub fn hook(err: impl fmt::Display) -> Self {
        Error::Hook(err.to_string())
    }

    /// The position this error points at, when it has one.
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        match self {
            Error::Syntax { at, .. }
            | Error::UnexpectedEof { at, .. }
            | Error::DuplicateKey { at, .. } => Some(*at),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
