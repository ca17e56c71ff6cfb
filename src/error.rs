//! Error types for parsing.
//!
//! Parsing is all-or-nothing: the first error encountered invalidates the
//! whole document and is the only one reported. The error message carries the
//! line and column of the last token consumed before the problem was
//! detected, which is the most useful anchor for `key = value` grammars where
//! the offending token is usually one past the last good one.
//!
//! Path lookups and the typed getters on [`Document`](crate::Document) never
//! produce an `Error`; they fall back to caller-supplied defaults instead.
//!
//! ## Examples
//!
//! ```rust
//! let err = tomlite::parse("key = [ 1, 2, ]").unwrap_err();
//! assert!(err.to_string().contains("Expected ']' to close array"));
//! ```

use thiserror::Error;

/// All errors that can occur while parsing a configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A lexical or syntax error, positioned at the last consumed token.
    #[error("Error at line {line}, col {col}: {msg}")]
    Parse {
        line: usize,
        col: usize,
        msg: String,
    },
}

impl Error {
    /// Creates a parse error anchored at `line`/`col`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomlite::Error;
    ///
    /// let err = Error::parse(3, 7, "Expected '=' after key.");
    /// assert!(err.to_string().contains("line 3, col 7"));
    /// ```
    pub fn parse(line: usize, col: usize, msg: &str) -> Self {
        Error::Parse {
            line,
            col,
            msg: msg.to_string(),
        }
    }

    /// The line the error was reported at.
    #[must_use]
    pub fn line(&self) -> usize {
        match self {
            Error::Parse { line, .. } => *line,
        }
    }

    /// The column the error was reported at.
    #[must_use]
    pub fn column(&self) -> usize {
        match self {
            Error::Parse { col, .. } => *col,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
