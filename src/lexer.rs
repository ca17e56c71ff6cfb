//! The lexer and string-literal decoder.
//!
//! [`Lexer`] is a stateful scanner over a borrowed input buffer. It hands out
//! one [`Token`] at a time, never re-reads, and never allocates: every token
//! borrows its text straight from the input. Escape resolution is deferred to
//! [`decode_string`], which is the only place string content is copied.
//!
//! Newlines are significant (they separate statements), so they are tokens
//! rather than skipped whitespace. Comments are tokenized and discarded by
//! the parser.

/// The class of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Eof,
    /// A lexical error; the token text is the human-readable message.
    Error,
    Ident,
    /// A quoted string, delimiters included. See [`decode_string`].
    Str,
    Integer,
    Float,
    /// `true` or `false`, recognized as its own class rather than an ident.
    Boolean,
    /// A 10-character `YYYY-MM-DD` literal, recognized by lookahead.
    Date,
    Equal,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Dot,
    Newline,
    Comment,
}

/// A single token with its source text and position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// The raw source slice, or the error message for [`TokenKind::Error`].
    pub text: &'a str,
    pub line: usize,
    pub col: usize,
}

/// A positional scanner over the input text.
///
/// # Examples
///
/// ```rust
/// use tomlite::{Lexer, TokenKind};
///
/// let mut lexer = Lexer::new("port = 8080");
/// assert_eq!(lexer.next_token().kind, TokenKind::Ident);
/// assert_eq!(lexer.next_token().kind, TokenKind::Equal);
/// assert_eq!(lexer.next_token().kind, TokenKind::Integer);
/// assert_eq!(lexer.next_token().kind, TokenKind::Eof);
/// ```
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
    col: usize,
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek(&self) -> u8 {
        self.byte_at(self.pos)
    }

    fn byte_at(&self, pos: usize) -> u8 {
        if pos < self.input.len() {
            self.input.as_bytes()[pos]
        } else {
            0
        }
    }

    fn advance(&mut self) -> u8 {
        let b = self.peek();
        self.pos += 1;
        self.col += 1;
        b
    }

    fn make_token(&self, kind: TokenKind, start: usize, line: usize, col: usize) -> Token<'a> {
        Token {
            kind,
            text: &self.input[start..self.pos.min(self.input.len())],
            line,
            col,
        }
    }

    fn error_token(&self, message: &'static str) -> Token<'a> {
        Token {
            kind: TokenKind::Error,
            text: message,
            line: self.line,
            col: self.col,
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), b' ' | b'\r' | b'\t') {
            self.advance();
        }
    }

    /// Returns the next token, or an `Eof` end-marker once the input is
    /// exhausted. Never blocks and never backtracks past a produced token.
    pub fn next_token(&mut self) -> Token<'a> {
        self.skip_whitespace();

        let start = self.pos;
        let start_line = self.line;
        let start_col = self.col;

        if self.is_at_end() {
            return self.make_token(TokenKind::Eof, start, start_line, start_col);
        }

        let c = self.advance();

        if c.is_ascii_alphabetic() || c == b'_' {
            return self.identifier_token(start, start_line, start_col);
        }
        if c.is_ascii_digit() || c == b'-' || c == b'+' {
            return self.number_token(start, start_line, start_col);
        }

        let kind = match c {
            b'=' => TokenKind::Equal,
            b'[' => TokenKind::LBracket,
            b']' => TokenKind::RBracket,
            b'{' => TokenKind::LBrace,
            b'}' => TokenKind::RBrace,
            b',' => TokenKind::Comma,
            b'.' => TokenKind::Dot,
            b'\n' => {
                let token = self.make_token(TokenKind::Newline, start, start_line, start_col);
                self.line += 1;
                self.col = 1;
                return token;
            }
            b'"' => return self.string_token(b'"', start, start_line, start_col),
            b'\'' => return self.string_token(b'\'', start, start_line, start_col),
            b'#' => {
                while self.peek() != b'\n' && !self.is_at_end() {
                    self.advance();
                }
                TokenKind::Comment
            }
            _ => return self.error_token("Unexpected character."),
        };

        self.make_token(kind, start, start_line, start_col)
    }

    fn identifier_token(&mut self, start: usize, line: usize, col: usize) -> Token<'a> {
        while self.peek().is_ascii_alphanumeric() || self.peek() == b'_' || self.peek() == b'-' {
            self.advance();
        }

        let mut token = self.make_token(TokenKind::Ident, start, line, col);
        if token.text == "true" || token.text == "false" {
            token.kind = TokenKind::Boolean;
        }
        token
    }

    /// Checks for the exact `YYYY-MM-DD` shape starting at `start`. Anything
    /// that does not match falls through to number lexing.
    fn looks_like_date(&self, start: usize) -> bool {
        let rest = self.input.as_bytes().get(start..start + 10);
        match rest {
            Some(b) => {
                b[0..4].iter().all(u8::is_ascii_digit)
                    && b[4] == b'-'
                    && b[5].is_ascii_digit()
                    && b[6].is_ascii_digit()
                    && b[7] == b'-'
                    && b[8].is_ascii_digit()
                    && b[9].is_ascii_digit()
            }
            None => false,
        }
    }

    fn number_token(&mut self, start: usize, line: usize, col: usize) -> Token<'a> {
        if self.looks_like_date(start) {
            self.pos = start + 10;
            self.col = col + 10;
            return self.make_token(TokenKind::Date, start, line, col);
        }

        let mut is_float = false;
        while self.peek().is_ascii_digit() {
            self.advance();
        }
        if self.peek() == b'.' {
            is_float = true;
            self.advance();
            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }
        if self.peek() == b'e' || self.peek() == b'E' {
            is_float = true;
            self.advance();
            if self.peek() == b'+' || self.peek() == b'-' {
                self.advance();
            }
            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        let kind = if is_float {
            TokenKind::Float
        } else {
            TokenKind::Integer
        };
        self.make_token(kind, start, line, col)
    }

    fn string_token(&mut self, quote: u8, start: usize, line: usize, col: usize) -> Token<'a> {
        // Triple quotes open a multi-line string.
        let is_multiline = self.peek() == quote && self.byte_at(self.pos + 1) == quote;
        if is_multiline {
            self.advance();
            self.advance();
        }

        while !self.is_at_end() {
            if self.peek() == quote {
                if is_multiline {
                    if self.byte_at(self.pos + 1) == quote && self.byte_at(self.pos + 2) == quote {
                        self.advance();
                        self.advance();
                        self.advance();
                        return self.make_token(TokenKind::Str, start, line, col);
                    }
                } else {
                    self.advance();
                    return self.make_token(TokenKind::Str, start, line, col);
                }
            }

            if self.peek() == b'\n' {
                if !is_multiline {
                    return self
                        .error_token("Unterminated string (newline in single-line string).");
                }
                self.line += 1;
                self.col = 0; // advance() brings it back to 1
            }

            // Escapes exist only in double-quoted strings; skip the escaped
            // byte so an escaped quote does not terminate the scan.
            if quote == b'"' && self.peek() == b'\\' {
                self.advance();
            }
            self.advance();
        }

        self.error_token("Unterminated string.")
    }
}

/// Decodes a raw string token (delimiters included) into its content.
///
/// Literal (single-quoted) strings are copied verbatim. Basic (double-quoted)
/// strings resolve the escapes `\b \t \n \f \r \" \\`; any other escape is
/// kept as backslash-plus-character rather than rejected. Triple-quoted
/// strings of either flavor have their three-character delimiters stripped
/// and newlines preserved literally.
///
/// # Examples
///
/// ```rust
/// use tomlite::lexer::decode_string;
///
/// assert_eq!(decode_string(r#""a\tb""#), "a\tb");
/// assert_eq!(decode_string(r"'a\tb'"), r"a\tb");
/// assert_eq!(decode_string("\"\"\"two\nlines\"\"\""), "two\nlines");
/// ```
#[must_use]
pub fn decode_string(raw: &str) -> String {
    let bytes = raw.as_bytes();
    if bytes.is_empty() {
        return String::new();
    }
    let quote = bytes[0];
    let is_multiline = raw.len() > 5 && bytes[1] == quote && bytes[2] == quote;
    let delim = if is_multiline { 3 } else { 1 };
    let content = &raw[delim..raw.len().saturating_sub(delim).max(delim)];

    // Literal strings carry no escapes.
    if quote == b'\'' {
        return content.to_string();
    }

    let mut out = String::with_capacity(content.len());
    let mut chars = content.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('b') => out.push('\u{0008}'),
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('f') => out.push('\u{000C}'),
            Some('r') => out.push('\r'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            // Unrecognized escape (e.g. \u): pass through verbatim.
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
