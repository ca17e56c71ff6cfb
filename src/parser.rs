//! The recursive-descent parser.
//!
//! Consumes the token stream from [`Lexer`] and builds a [`Document`].
//! Parsing is single-pass and all-or-nothing: the first error latches a
//! panic flag, further diagnostics are suppressed, and the partially built
//! tree is dropped before the error is returned.
//!
//! Table scoping follows the source format: a `[a.b]` header switches the
//! current table for subsequent key-value statements, `[[a.b]]` appends a
//! fresh table to an array-of-tables and makes it current, and dotted keys
//! (`x.y = 1`) create intermediate tables inside the current table. The
//! current table is tracked as a key path from the root and re-resolved per
//! statement, which keeps borrows local while matching the original
//! pointer-chasing semantics.

use crate::error::{Error, Result};
use crate::lexer::{decode_string, Lexer, Token, TokenKind};
use crate::{Document, Table, Value};

/// Parses a complete document. See [`crate::parse`].
pub fn parse(input: &str) -> Result<Document> {
    let mut parser = Parser::new(input);
    parser.advance();
    parser.run();
    match parser.error {
        Some(err) => Err(err),
        None => Ok(Document::new(parser.root)),
    }
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token<'a>,
    previous: Token<'a>,
    /// First-error-wins latch; once set, no further error is recorded.
    panic_mode: bool,
    error: Option<Error>,
    root: Table,
    /// Key path from the root to the table receiving key-value statements.
    /// A segment resolving to an array-of-tables means its last element.
    context: Vec<String>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        let placeholder = Token {
            kind: TokenKind::Eof,
            text: "",
            line: 1,
            col: 1,
        };
        Parser {
            lexer: Lexer::new(input),
            current: placeholder,
            previous: placeholder,
            panic_mode: false,
            error: None,
            root: Table::new(),
            context: Vec::new(),
        }
    }

    /// Records the first error at the previously consumed token's position.
    fn report(&mut self, message: &str) {
        if self.panic_mode {
            return;
        }
        self.error = Some(Error::parse(
            self.previous.line,
            self.previous.col,
            message,
        ));
        self.panic_mode = true;
    }

    fn advance(&mut self) {
        self.previous = self.current;
        self.current = self.lexer.next_token();
        // Lexical errors surface as tokens; record and keep scanning so the
        // lexer position stays consistent.
        while self.current.kind == TokenKind::Error {
            let message = self.current.text;
            self.report(message);
            self.current = self.lexer.next_token();
        }
    }

    fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.current.kind == kind {
            self.advance();
            return true;
        }
        false
    }

    fn consume(&mut self, kind: TokenKind, message: &str) -> bool {
        if self.current.kind == kind {
            self.advance();
            return true;
        }
        self.report(message);
        false
    }

    fn run(&mut self) {
        while self.current.kind != TokenKind::Eof {
            if self.panic_mode {
                return;
            }

            match self.current.kind {
                TokenKind::Newline | TokenKind::Comment => self.advance(),
                TokenKind::LBracket => {
                    self.advance();
                    if self.match_token(TokenKind::LBracket) {
                        self.array_of_tables_header();
                    } else {
                        self.table_header();
                    }
                }
                _ => {
                    if self.key_value() {
                        // A completed statement may only be followed by a
                        // newline, a comment, or the end of input.
                        if !matches!(
                            self.current.kind,
                            TokenKind::Newline | TokenKind::Comment | TokenKind::Eof
                        ) {
                            self.report("Unexpected token after key-value pair.");
                        }
                    } else {
                        self.report(
                            "Invalid syntax. Expected key-value pair or table definition.",
                        );
                        self.advance();
                    }
                }
            }
        }
    }

    /// Resolves the table the given relative path points at, starting from
    /// the current context. Context segments holding an array-of-tables
    /// resolve to the last appended element; relative segments are plain
    /// tables created by dotted keys.
    fn context_table_mut(&mut self, rel: &[String]) -> &mut Table {
        let mut table = &mut self.root;
        for key in &self.context {
            table = match table.get_mut(key) {
                Some(Value::Table(t)) => t,
                Some(Value::Array(arr)) => match arr.last_mut() {
                    Some(Value::Table(t)) => t,
                    // Context segments are validated before being recorded.
                    _ => unreachable!("array-of-tables context without a table element"),
                },
                _ => unreachable!("context segment is not a table"),
            };
        }
        for key in rel {
            table = match table.get_mut(key) {
                Some(Value::Table(t)) => t,
                _ => unreachable!("dotted-key segment is not a table"),
            };
        }
        table
    }

    /// Resolves a plain-table path from the root, used while building
    /// headers (header paths never traverse array elements).
    fn root_table_mut(&mut self, path: &[String]) -> &mut Table {
        let mut table = &mut self.root;
        for key in path {
            table = match table.get_mut(key) {
                Some(Value::Table(t)) => t,
                _ => unreachable!("header segment is not a table"),
            };
        }
        table
    }

    /// Finds or creates the table `key` inside the table at `path` under the
    /// root. Returns `false` if the key exists with a non-table value.
    fn ensure_table_at_root(&mut self, path: &[String], key: &str) -> bool {
        let table = self.root_table_mut(path);
        match table.get(key).map(Value::is_table) {
            Some(true) => true,
            Some(false) => false,
            None => {
                table.insert(key.to_string(), Value::Table(Table::new()));
                true
            }
        }
    }

    /// Same as [`ensure_table_at_root`](Self::ensure_table_at_root), but
    /// relative to the current context (dotted-key traversal).
    fn ensure_table_in_context(&mut self, rel: &[String], key: &str) -> bool {
        let table = self.context_table_mut(rel);
        match table.get(key).map(Value::is_table) {
            Some(true) => true,
            Some(false) => false,
            None => {
                table.insert(key.to_string(), Value::Table(Table::new()));
                true
            }
        }
    }

    /// Parses one `key = value` statement, including dotted keys. Returns
    /// `true` on success; the caller reports the generic syntax error on
    /// `false` unless a more specific one was already recorded.
    fn key_value(&mut self) -> bool {
        let mut rel: Vec<String> = Vec::new();

        while self.current.kind == TokenKind::Ident {
            let key = self.current.text.to_string();
            self.advance();

            if self.current.kind == TokenKind::Dot {
                // Intermediate segment of a dotted key, e.g. the `a` in
                // `a.b = 1`.
                if !self.ensure_table_in_context(&rel, &key) {
                    self.report("Failed to create table for dotted key.");
                    return false;
                }
                rel.push(key);
                self.advance();
            } else if self.current.kind == TokenKind::Equal {
                if !self.consume(TokenKind::Equal, "Expected '=' after key.") {
                    return false;
                }

                let value = match self.parse_value() {
                    Some(v) => v,
                    None => return false,
                };

                if self.context_table_mut(&rel).contains_key(&key) {
                    self.report("Duplicate key.");
                    return false;
                }
                self.context_table_mut(&rel).insert(key, value);
                return true;
            }
        }

        false
    }

    /// Parses a value at the current token: a scalar, or an array on `[`.
    /// Returns `None` on error; a specific message may already be latched.
    fn parse_value(&mut self) -> Option<Value> {
        let value = match self.current.kind {
            TokenKind::Str => Value::String(decode_string(self.current.text)),
            TokenKind::Integer => match self.current.text.parse::<i64>() {
                Ok(i) => Value::Integer(i),
                Err(_) => {
                    self.report("Invalid integer.");
                    return None;
                }
            },
            TokenKind::Float => match self.current.text.parse::<f64>() {
                Ok(f) => Value::Float(f),
                Err(_) => {
                    self.report("Invalid float.");
                    return None;
                }
            },
            TokenKind::Boolean => Value::Boolean(self.current.text == "true"),
            TokenKind::Date => match self.parse_date(self.current.text) {
                Some(d) => Value::Date(d),
                None => {
                    self.report("Invalid date.");
                    return None;
                }
            },
            TokenKind::LBracket => return self.parse_array(),
            _ => return None,
        };

        self.advance();
        Some(value)
    }

    /// The lexer guarantees the `YYYY-MM-DD` shape; only the calendar can
    /// still reject the value here.
    fn parse_date(&self, text: &str) -> Option<chrono::NaiveDate> {
        let year = text[0..4].parse::<i32>().ok()?;
        let month = text[5..7].parse::<u32>().ok()?;
        let day = text[8..10].parse::<u32>().ok()?;
        chrono::NaiveDate::from_ymd_opt(year, month, day)
    }

    fn parse_array(&mut self) -> Option<Value> {
        self.advance(); // consume '['
        let mut elements: Vec<Value> = Vec::new();

        if self.current.kind == TokenKind::RBracket {
            self.advance();
            return Some(Value::Array(elements));
        }

        while self.current.kind != TokenKind::RBracket && self.current.kind != TokenKind::Eof {
            let element = self.parse_value()?;
            elements.push(element);

            if self.current.kind == TokenKind::RBracket {
                break;
            }

            let comma = self.current;
            if !self.consume(TokenKind::Comma, "Expected ',' or ']' in array.") {
                return None;
            }

            // A single trailing comma is allowed, but only with the closing
            // bracket directly against it: `[1, 2, 3,]` parses, while a
            // comma separated from `]` by whitespace, a newline, or a
            // comment means a missing element.
            if self.current.kind == TokenKind::RBracket
                && self.current.line == comma.line
                && self.current.col == comma.col + 1
            {
                break;
            }
            while matches!(
                self.current.kind,
                TokenKind::Comment | TokenKind::Newline
            ) {
                self.advance();
            }
            if matches!(self.current.kind, TokenKind::RBracket | TokenKind::Comma) {
                self.report("Expected ']' to close array.");
                return None;
            }
        }

        if !self.consume(TokenKind::RBracket, "Expected ']' to close array.") {
            return None;
        }
        Some(Value::Array(elements))
    }

    /// Parses `a.b.c]` after a `[` header opener, walking each dotted
    /// segment from the root and making the innermost table current.
    fn table_header(&mut self) {
        let mut path: Vec<String> = Vec::new();

        while self.current.kind == TokenKind::Ident {
            let key = self.current.text.to_string();
            if !self.ensure_table_at_root(&path, &key) {
                self.report("Failed to create or find table.");
                return;
            }
            path.push(key);
            self.advance();
            if self.current.kind == TokenKind::Dot {
                self.advance();
            } else {
                break;
            }
        }

        self.context = path;
        self.consume(TokenKind::RBracket, "Expected ']' after table name.");
    }

    /// Parses `a.b.c]]` after a `[[` header opener. Intermediate segments
    /// are plain tables; the final segment finds or creates an
    /// array-of-tables, to which a fresh table is appended and made current.
    fn array_of_tables_header(&mut self) {
        let mut path: Vec<String> = Vec::new();
        let mut have_target = false;

        while self.current.kind == TokenKind::Ident {
            let key = self.current.text.to_string();
            self.advance();

            if self.current.kind == TokenKind::Dot {
                if !self.ensure_table_at_root(&path, &key) {
                    self.report("Failed to create table path.");
                    return;
                }
                path.push(key);
                self.advance();
            } else {
                if !self.ensure_array_of_tables(&path, &key) {
                    return;
                }
                path.push(key);
                have_target = true;
                break;
            }
        }

        if !have_target {
            self.report("Invalid array of tables declaration.");
            return;
        }

        self.append_table_to_array(&path);
        self.context = path;

        if !self.consume(TokenKind::RBracket, "Expected ']]' to close array of tables.") {
            return;
        }
        self.consume(TokenKind::RBracket, "Expected ']]' to close array of tables.");
    }

    /// Finds or creates the array-of-tables `key` under the table at `path`.
    /// Re-using the key for anything that is not an array is an error.
    fn ensure_array_of_tables(&mut self, path: &[String], key: &str) -> bool {
        let table = self.root_table_mut(path);
        let ok = match table.get(key).map(Value::is_array) {
            Some(true) => true,
            Some(false) => false,
            None => {
                table.insert(key.to_string(), Value::Array(Vec::new()));
                true
            }
        };
        if !ok {
            self.report("Key redefined as an array of tables.");
        }
        ok
    }

    /// Appends a fresh empty table to the array-of-tables at `path`. The
    /// final segment was just validated by `ensure_array_of_tables`.
    fn append_table_to_array(&mut self, path: &[String]) {
        let (last, parents) = match path.split_last() {
            Some(split) => split,
            None => return,
        };
        let table = self.root_table_mut(parents);
        if let Some(Value::Array(arr)) = table.get_mut(last) {
            arr.push(Value::Table(Table::new()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalars() {
        let doc = parse(
            "name = \"widget\"\ncount = 12\nratio = 0.5\nok = true\nshipped = 2024-01-15\n",
        )
        .unwrap();
        assert_eq!(doc.get_str("name", ""), "widget");
        assert_eq!(doc.get_int("count", 0), 12);
        assert_eq!(doc.get_float("ratio", 0.0), 0.5);
        assert!(doc.get_bool("ok", false));
        assert_eq!(
            doc.get("shipped").and_then(Value::as_date),
            chrono::NaiveDate::from_ymd_opt(2024, 1, 15)
        );
    }

    #[test]
    fn test_negative_and_exponent_numbers() {
        let doc = parse("a = -3\nb = +7\nc = 6.02e23\nd = -1.5E-3\n").unwrap();
        assert_eq!(doc.get_int("a", 0), -3);
        assert_eq!(doc.get_int("b", 0), 7);
        assert_eq!(doc.get_float("c", 0.0), 6.02e23);
        assert_eq!(doc.get_float("d", 0.0), -1.5e-3);
    }

    #[test]
    fn test_string_flavors() {
        let input = concat!(
            "basic = \"tab\\there\"\n",
            "literal = 'no\\tescape'\n",
            "multi = \"\"\"line one\nline two\"\"\"\n",
        );
        let doc = parse(input).unwrap();
        assert_eq!(doc.get_str("basic", ""), "tab\there");
        assert_eq!(doc.get_str("literal", ""), "no\\tescape");
        assert_eq!(doc.get_str("multi", ""), "line one\nline two");
    }

    #[test]
    fn test_dotted_key_creates_tables() {
        let doc = parse("owner.name = \"Tom\"\nowner.dob.year = 1979\n").unwrap();
        assert_eq!(doc.get_str("owner.name", ""), "Tom");
        assert_eq!(doc.get_int("owner.dob.year", 0), 1979);
    }

    #[test]
    fn test_dotted_key_equivalent_to_header() {
        let via_dots = parse("a.b = 1\n").unwrap();
        let via_header = parse("[a]\nb = 1\n").unwrap();
        assert_eq!(via_dots.get_int("a.b", 0), 1);
        assert_eq!(via_header.get_int("a.b", 0), 1);
    }

    #[test]
    fn test_table_header_scoping() {
        let doc = parse("[server]\nhost = \"example.com\"\n[server.tls]\nenabled = true\n")
            .unwrap();
        assert_eq!(doc.get_str("server.host", ""), "example.com");
        assert!(doc.get_bool("server.tls.enabled", false));
    }

    #[test]
    fn test_array_of_tables_accumulates() {
        let input = "[[products]]\nsku = 1\n[[products]]\nsku = 2\n[[products]]\nsku = 3\n";
        let doc = parse(input).unwrap();
        let products = doc.get_array("products").unwrap();
        assert_eq!(products.len(), 3);
        assert_eq!(doc.get_int("products[0].sku", 0), 1);
        assert_eq!(doc.get_int("products[1].sku", 0), 2);
        assert_eq!(doc.get_int("products[2].sku", 0), 3);
    }

    #[test]
    fn test_nested_array_of_tables_path() {
        let doc = parse("[[fruit.variety]]\nname = \"gala\"\n").unwrap();
        assert_eq!(doc.get_str("fruit.variety[0].name", ""), "gala");
    }

    #[test]
    fn test_arrays() {
        let doc = parse("ports = [ 8001, 8002, 8003 ]\nnested = [ [ 1.0, 2.0 ], [ 3.0 ] ]\n")
            .unwrap();
        assert_eq!(doc.get_int("ports[1]", 0), 8002);
        assert_eq!(doc.get_float("nested[0][1]", 0.0), 2.0);
        assert_eq!(doc.get_float("nested[1][0]", 0.0), 3.0);
    }

    #[test]
    fn test_heterogeneous_array() {
        let doc = parse("mixed = [ 1, \"two\", true ]\n").unwrap();
        assert_eq!(doc.get_int("mixed[0]", 0), 1);
        assert_eq!(doc.get_str("mixed[1]", ""), "two");
        assert!(doc.get_bool("mixed[2]", false));
    }

    #[test]
    fn test_single_trailing_comma_allowed() {
        let doc = parse("key = [1, 2, 3,]\n").unwrap();
        assert_eq!(doc.get_array("key").unwrap().len(), 3);
    }

    #[test]
    fn test_comma_before_close_is_error() {
        let err = parse("key = [ 1, 2, ]").unwrap_err();
        assert!(err.to_string().contains("Expected ']' to close array"));
    }

    #[test]
    fn test_empty_array() {
        let doc = parse("key = []\n").unwrap();
        assert_eq!(doc.get_array("key").unwrap().len(), 0);
    }

    #[test]
    fn test_missing_equals_is_error() {
        assert!(parse("key 42\n").is_err());
    }

    #[test]
    fn test_trailing_garbage_after_statement() {
        let err = parse("a = 1 b = 2\n").unwrap_err();
        assert!(err.to_string().contains("Unexpected token after key-value pair"));
    }

    #[test]
    fn test_comment_after_statement_is_fine() {
        let doc = parse("a = 1 # trailing comment\n").unwrap();
        assert_eq!(doc.get_int("a", 0), 1);
    }

    #[test]
    fn test_duplicate_key_is_error() {
        let err = parse("a = 1\na = 2\n").unwrap_err();
        assert!(err.to_string().contains("Duplicate key"));
    }

    #[test]
    fn test_dotted_segment_over_scalar_is_error() {
        let err = parse("a = 1\na.b = 2\n").unwrap_err();
        assert!(err
            .to_string()
            .contains("Failed to create table for dotted key"));
    }

    #[test]
    fn test_plain_header_over_array_of_tables_is_error() {
        let err = parse("[[items]]\nx = 1\n[items]\ny = 2\n").unwrap_err();
        assert!(err.to_string().contains("Failed to create or find table"));
    }

    #[test]
    fn test_aot_header_over_scalar_is_error() {
        let err = parse("items = 1\n[[items]]\nx = 2\n").unwrap_err();
        assert!(err
            .to_string()
            .contains("Key redefined as an array of tables"));
    }

    #[test]
    fn test_invalid_calendar_date_is_error() {
        let err = parse("d = 2024-13-40\n").unwrap_err();
        assert!(err.to_string().contains("Invalid date"));
    }

    #[test]
    fn test_first_error_wins() {
        // Both lines are bad; only the first is reported.
        let err = parse("a = @\nb = [1,,2]\n").unwrap_err();
        assert!(err.to_string().contains("Unexpected character"));
    }

    #[test]
    fn test_error_position_reported() {
        let err = parse("ok = 1\nbad = \"unterminated").unwrap_err();
        assert_eq!(err.line(), 2);
        assert!(err.to_string().contains("Unterminated string"));
    }

    #[test]
    fn test_blank_lines_and_comments_skipped() {
        let doc = parse("# header comment\n\n\na = 1\n\n# middle\nb = 2\n").unwrap();
        assert_eq!(doc.get_int("a", 0), 1);
        assert_eq!(doc.get_int("b", 0), 2);
    }

    #[test]
    fn test_keys_after_aot_attach_to_latest_element() {
        let input = "[[run]]\nid = 1\nname = \"first\"\n[[run]]\nid = 2\n";
        let doc = parse(input).unwrap();
        assert_eq!(doc.get_str("run[0].name", ""), "first");
        assert_eq!(doc.get_int("run[1].id", 0), 2);
        assert_eq!(doc.get_str("run[1].name", "none"), "none");
    }
}
