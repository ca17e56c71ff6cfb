//! Serialization of documents back to text.
//!
//! The output always re-parses to a structurally equal document. Tables are
//! grouped under `[dotted.path]` headers, arrays-of-tables under repeated
//! `[[dotted.path]]` headers, and everything else is emitted as `key = value`
//! lines in insertion order. Strings are re-escaped with the same escape set
//! the parser decodes, and floats use the shortest representation that
//! round-trips (which keeps a trailing `.0` so they stay floats).
//!
//! ## Examples
//!
//! ```rust
//! let doc = tomlite::parse("[owner]\nname = \"Tom\"\n").unwrap();
//! assert_eq!(tomlite::to_string(&doc), "[owner]\nname = \"Tom\"\n\n");
//! ```

use crate::{Document, Table, Value};

/// Serializes a document. See [`crate::to_string`].
#[must_use]
pub fn to_string(doc: &Document) -> String {
    let mut out = String::new();
    write_table_contents(&mut out, doc.root(), "");
    out
}

/// An array whose first element is a table serializes as `[[path]]` blocks.
fn is_array_of_tables(value: &Value) -> bool {
    match value {
        Value::Array(elements) => matches!(elements.first(), Some(Value::Table(_))),
        _ => false,
    }
}

/// Writes one table: its scalar and plain-array entries first (under a
/// `[path]` header when the table is not the root), then its sub-tables and
/// arrays-of-tables, each under its own extended path.
fn write_table_contents(out: &mut String, table: &Table, path: &str) {
    let mut wrote_header = false;

    for (key, value) in table {
        if value.is_table() || is_array_of_tables(value) {
            continue;
        }
        if !wrote_header && !path.is_empty() {
            out.push('[');
            out.push_str(path);
            out.push_str("]\n");
            wrote_header = true;
        }
        out.push_str(key);
        out.push_str(" = ");
        write_value(out, value);
        out.push('\n');
    }
    if wrote_header {
        out.push('\n');
    }

    for (key, value) in table {
        let child_path = if path.is_empty() {
            key.clone()
        } else {
            format!("{path}.{key}")
        };
        match value {
            Value::Table(child) => write_table_contents(out, child, &child_path),
            Value::Array(elements) if is_array_of_tables(value) => {
                for element in elements {
                    if let Value::Table(child) = element {
                        out.push_str("[[");
                        out.push_str(&child_path);
                        out.push_str("]]\n");
                        write_table_contents(out, child, "");
                        out.push('\n');
                    }
                }
            }
            _ => {}
        }
    }
}

/// Writes a single value in source form. Tables are handled by the header
/// grouping above and write nothing here; `Value::None` is silent.
pub(crate) fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::None | Value::Table(_) => {}
        Value::String(s) => write_escaped_string(out, s),
        Value::Integer(i) => out.push_str(&i.to_string()),
        Value::Float(f) => out.push_str(&format!("{f:?}")),
        Value::Boolean(true) => out.push_str("true"),
        Value::Boolean(false) => out.push_str("false"),
        Value::Date(d) => out.push_str(&d.format("%Y-%m-%d").to_string()),
        Value::Array(elements) => {
            out.push_str("[ ");
            for (i, element) in elements.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_value(out, element);
            }
            out.push_str(" ]");
        }
    }
}

fn write_escaped_string(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{8}' => out.push_str("\\b"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\u{c}' => out.push_str("\\f"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reserialize(input: &str) -> String {
        to_string(&crate::parse(input).unwrap())
    }

    #[test]
    fn test_root_scalars() {
        assert_eq!(
            reserialize("a = 1\nb = \"hi\"\n"),
            "a = 1\nb = \"hi\"\n"
        );
    }

    #[test]
    fn test_table_header_and_blank_line() {
        assert_eq!(
            reserialize("[db]\nhost = \"x\"\nport = 1\n"),
            "[db]\nhost = \"x\"\nport = 1\n\n"
        );
    }

    #[test]
    fn test_nested_table_paths() {
        assert_eq!(
            reserialize("[a.b]\nk = 1\n"),
            "[a.b]\nk = 1\n\n"
        );
    }

    #[test]
    fn test_empty_intermediate_table_writes_no_header() {
        // `a` holds only the sub-table `b`, so no `[a]` header appears.
        let out = reserialize("[a.b]\nk = 1\n[a]\n");
        assert!(!out.contains("[a]\n"));
        assert!(out.contains("[a.b]\n"));
    }

    #[test]
    fn test_inline_arrays() {
        assert_eq!(
            reserialize("ports = [ 8001, 8002 ]\n"),
            "ports = [ 8001, 8002 ]\n"
        );
        assert_eq!(reserialize("empty = []\n"), "empty = [  ]\n");
    }

    #[test]
    fn test_array_of_tables_blocks() {
        let out = reserialize("[[p]]\nsku = 1\n[[p]]\nsku = 2\n");
        assert_eq!(out, "[[p]]\nsku = 1\n\n[[p]]\nsku = 2\n\n");
    }

    #[test]
    fn test_float_keeps_point_zero() {
        let out = reserialize("x = 2.0\n");
        assert_eq!(out, "x = 2.0\n");
        // Still a float after a round trip.
        let doc = crate::parse(&out).unwrap();
        assert!(doc.get("x").is_some_and(Value::is_float));
    }

    #[test]
    fn test_string_escapes_round_trip() {
        let doc = crate::parse("s = \"a\\tb\\n\\\"q\\\" \\\\end\"\n").unwrap();
        let out = to_string(&doc);
        assert_eq!(out, "s = \"a\\tb\\n\\\"q\\\" \\\\end\"\n");
        assert_eq!(crate::parse(&out).unwrap(), doc);
    }

    #[test]
    fn test_date_round_trip() {
        assert_eq!(reserialize("d = 2024-01-15\n"), "d = 2024-01-15\n");
    }

    #[test]
    fn test_serialization_is_idempotent() {
        let input = concat!(
            "title = \"demo\"\n",
            "[database]\n",
            "ports = [ 1, 2, 3 ]\n",
            "[[products]]\n",
            "name = \"hammer\"\n",
        );
        let once = reserialize(input);
        let twice = reserialize(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_display_uses_source_form() {
        let doc = crate::parse("v = [ 1, true, \"x\" ]\n").unwrap();
        assert_eq!(
            doc.get("v").map(ToString::to_string),
            Some("[ 1, true, \"x\" ]".to_string())
        );
    }
}
