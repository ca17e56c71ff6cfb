//! Parsed document and path-based access.
//!
//! A [`Document`] owns the root [`Table`] produced by [`crate::parse`].
//! Values are reached with dotted paths, optionally indexed into arrays:
//!
//! ```text
//! database.port          key lookup through nested tables
//! database.ports[1]      array element by zero-based index
//! matrix[1][0]           chained indexes for nested arrays
//! products[0].name       array-of-tables element field
//! ```
//!
//! [`get`](Document::get) resolves a path to a value reference; the typed
//! getters wrap it with a caller-supplied default, so configuration reads
//! never fail. A missing path and a present-but-wrong-typed value are
//! indistinguishable through the defaults, which is the point: callers state
//! what they need and what to use otherwise.
//!
//! ## Examples
//!
//! ```rust
//! let doc = tomlite::parse("[database]\nports = [ 8001, 8002 ]\n").unwrap();
//! assert_eq!(doc.get_int("database.ports[0]", 0), 8001);
//! assert_eq!(doc.get_int("database.ports[9]", -1), -1);
//! ```

use crate::{Table, Value};

/// A parsed configuration document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    root: Table,
}

impl Document {
    pub(crate) fn new(root: Table) -> Self {
        Document { root }
    }

    /// The root table of the document.
    #[must_use]
    pub fn root(&self) -> &Table {
        &self.root
    }

    /// Resolves a dotted, optionally indexed path to a value.
    ///
    /// Returns `None` for empty paths, missing keys, out-of-range or
    /// malformed indexes, and segments applied to the wrong kind of value
    /// (a `.key` on a non-table, a `[i]` on a non-array).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomlite::Value;
    ///
    /// let doc = tomlite::parse("[[servers]]\nhost = \"alpha\"\n").unwrap();
    /// assert_eq!(
    ///     doc.get("servers[0].host"),
    ///     Some(&Value::String("alpha".to_string()))
    /// );
    /// assert_eq!(doc.get("servers[1].host"), None);
    /// ```
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        let (segment, mut rest) = split_segment(path);
        if segment.is_empty() {
            return None;
        }
        let mut current = self.root.get(segment)?;

        loop {
            if rest.is_empty() {
                return Some(current);
            }
            if let Some(after) = rest.strip_prefix('[') {
                let close = after.find(']')?;
                let index: usize = after[..close].parse().ok()?;
                current = current.as_array()?.get(index)?;
                rest = &after[close + 1..];
            } else if let Some(after) = rest.strip_prefix('.') {
                let (segment, remainder) = split_segment(after);
                if segment.is_empty() {
                    return None;
                }
                current = current.as_table()?.get(segment)?;
                rest = remainder;
            } else {
                return None;
            }
        }
    }

    /// Looks up a string at `path`, or `default` if absent or not a string.
    #[must_use]
    pub fn get_str<'a>(&'a self, path: &str, default: &'a str) -> &'a str {
        self.get(path).and_then(Value::as_str).unwrap_or(default)
    }

    /// Looks up an integer at `path`, or `default` if absent or not an
    /// integer.
    #[must_use]
    pub fn get_int(&self, path: &str, default: i64) -> i64 {
        self.get(path).and_then(Value::as_i64).unwrap_or(default)
    }

    /// Looks up a float at `path`, or `default` if absent or not numeric.
    /// Integer values are promoted.
    #[must_use]
    pub fn get_float(&self, path: &str, default: f64) -> f64 {
        self.get(path).and_then(Value::as_f64).unwrap_or(default)
    }

    /// Looks up a boolean at `path`, or `default` if absent or not a
    /// boolean.
    #[must_use]
    pub fn get_bool(&self, path: &str, default: bool) -> bool {
        self.get(path).and_then(Value::as_bool).unwrap_or(default)
    }

    /// Looks up a table at `path`. Unlike the scalar getters there is no
    /// useful default, so absence is surfaced as `None`.
    #[must_use]
    pub fn get_table(&self, path: &str) -> Option<&Table> {
        self.get(path).and_then(Value::as_table)
    }

    /// Looks up an array at `path` as a slice of values.
    #[must_use]
    pub fn get_array(&self, path: &str) -> Option<&[Value]> {
        self.get(path).and_then(Value::as_array)
    }
}

impl From<Table> for Document {
    fn from(root: Table) -> Self {
        Document { root }
    }
}

/// Splits off the leading key segment, ending at the next `.` or `[`.
fn split_segment(path: &str) -> (&str, &str) {
    let end = path.find(['.', '[']).unwrap_or(path.len());
    (&path[..end], &path[end..])
}
