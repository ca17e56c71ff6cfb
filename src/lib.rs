//! # tomlite
//!
//! A small parser, document model, and serializer for TOML-like
//! configuration files.
//!
//! The dialect covers the everyday subset of the format: key-value pairs
//! with dotted keys, `[table]` and `[[array-of-tables]]` headers, basic and
//! literal strings (including triple-quoted multiline forms), integers,
//! floats, booleans, `YYYY-MM-DD` dates, inline arrays, and `#` comments.
//! Parsed documents keep key order, are addressable with dotted/indexed
//! paths, and serialize back to text that re-parses to an equal document.
//!
//! ## Quick start
//!
//! ```rust
//! let input = r#"
//! title = "My Service"
//!
//! [database]
//! host = "localhost"
//! ports = [ 8001, 8002 ]
//!
//! [[products]]
//! name = "hammer"
//! "#;
//!
//! let doc = tomlite::parse(input).unwrap();
//!
//! assert_eq!(doc.get_str("database.host", "127.0.0.1"), "localhost");
//! assert_eq!(doc.get_int("database.ports[1]", 0), 8002);
//! assert_eq!(doc.get_str("products[0].name", ""), "hammer");
//!
//! // Missing paths fall back to the supplied default.
//! assert_eq!(doc.get_int("database.timeout", 30), 30);
//!
//! let text = tomlite::to_string(&doc);
//! assert_eq!(tomlite::parse(&text).unwrap(), doc);
//! ```
//!
//! ## Errors
//!
//! Parsing is all-or-nothing. The first problem found wins and carries the
//! line and column of the last consumed token:
//!
//! ```rust
//! let err = tomlite::parse("key = [ 1, 2, ]").unwrap_err();
//! assert!(err.to_string().starts_with("Error at line 1"));
//! ```
//!
//! Lookups, on the other hand, never fail: the typed getters on
//! [`Document`] take a default, and [`Document::get`] returns an `Option`.
//!
//! ## INI scanning
//!
//! For flat `key = value` files with `[section]` headers, [`ini::scan`]
//! walks the input with a callback and skips building a tree entirely.

pub mod document;
pub mod error;
pub mod ini;
pub mod lexer;
pub mod parser;
pub mod ser;
pub mod table;
pub mod value;

pub use document::Document;
pub use error::{Error, Result};
pub use lexer::{Lexer, Token, TokenKind};
pub use table::Table;
pub use value::Value;

/// Parses a configuration document from a string.
///
/// # Errors
///
/// Returns the first lexical or syntax error encountered; no partial
/// document is produced.
///
/// # Examples
///
/// ```rust
/// let doc = tomlite::parse("answer = 42\n").unwrap();
/// assert_eq!(doc.get_int("answer", 0), 42);
/// ```
pub fn parse(input: &str) -> Result<Document> {
    parser::parse(input)
}

/// Serializes a document back to configuration text.
///
/// The output re-parses to a document structurally equal to `doc`, and
/// serializing is idempotent: serializing the re-parsed document yields the
/// same text.
#[must_use]
pub fn to_string(doc: &Document) -> String {
    ser::to_string(doc)
}
