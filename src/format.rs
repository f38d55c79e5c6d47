//! The HJSON text format
//!
//! This module documents the format as this crate implements it. HJSON is
//! a superset of JSON: every JSON document parses unchanged, and the
//! extensions below make the format comfortable to edit by hand.
//!
//! # Comments and whitespace
//!
//! Three comment styles are insignificant anywhere whitespace is:
//!
//! ```text
//! # hash comments run to the end of the line
//! // so do double-slash comments
//! /* block comments
//!    may span lines but do not nest */
//! ```
//!
//! Both `\n` and `\r\n` end a line; a lone `\r` is ordinary whitespace.
//! Comments are not preserved through a parse → emit round trip.
//!
//! # Objects
//!
//! Members are `key: value` pairs separated by newlines, commas, or both;
//! a trailing comma before `}` is fine. At the root the braces may be
//! omitted entirely.
//!
//! ```text
//! rate: 1000
//! cool: {
//!   foo: 1, bar: 2
//! }
//! ```
//!
//! Keys may be quoted (single or double) or bare. A bare key is any run of
//! characters without whitespace or one of `{}[],:`. Duplicate keys within
//! one object are an error, and key order is significant: it survives into
//! the parsed tree and back out through the emitter.
//!
//! # Strings
//!
//! Four flavors:
//!
//! | Flavor | Example | Notes |
//! |--------|---------|-------|
//! | Double-quoted | `"a\nb"` | JSON escapes, including `\uXXXX` surrogate pairs |
//! | Single-quoted | `'a\nb'` | same escape vocabulary |
//! | Block | `'''` … `'''` | multi-line, no escapes, indent-stripped |
//! | Quoteless | `everything on this line` | runs to end of line, no escapes |
//!
//! A value that is not quoted and not a complete keyword or number is a
//! *quoteless string*: the rest of the line, trailing whitespace removed.
//! The keyword/number test runs at every `,`, `}`, `]`, comment start and
//! end of line, which is why
//!
//! ```text
//! a: 1, b: 2      # inside braces: two numeric members
//! a: one,two      # one string member "one,two"
//! b: 3 # three    # the number 3, then a comment
//! c: 3 times      # the string "3 times"
//! ```
//!
//! A span whose prefix is a complete number is cut at the checkpoint, so
//! `1,word` is never one quoteless member: inside braces `{a: 1,word}`
//! reads the number `1` and then fails on the stray `word`, and at the
//! braceless root the fallback turns the whole line `a: 1,word` into a
//! single root string.
//!
//! Inside arrays there is no quoteless fallback: strings must be quoted,
//! and a malformed scalar is an error.
//!
//! Block strings open with `'''` (or `"""`) followed by a newline. Content
//! ends at the next triple quote; the closing quote's column sets the
//! indent baseline, and up to that many leading spaces are stripped from
//! each line:
//!
//! ```text
//! realist:
//!     '''
//!     My half empty glass,
//!     I will fill your empty half.
//!     '''
//! ```
//!
//! # Numbers and keywords
//!
//! `true`, `false` and `null` are keywords only as complete values.
//! Numbers follow the JSON grammar: optional `-`, an integer part (`0` or
//! a non-zero digit run), optional fraction, optional exponent. A leading
//! `+` is not part of the grammar — `+3` is the string `"+3"`. Numbers are
//! stored as 64-bit floats, or as their raw text under the
//! [`use_json_number`](crate::DecoderOptions::use_json_number) option.
//!
//! # Root values
//!
//! A document may be an object (braced or not), an array, or a single
//! scalar — `35e-7` alone is a valid document.
//!
//! # Emitter output
//!
//! [`marshal`](crate::marshal) pretty-prints with two-space indentation,
//! one member per line without commas, quoteless strings wherever
//! re-parsing would reproduce them exactly, and `'''` blocks for embedded
//! newlines. Output always uses `\n` and ends without a trailing newline.
