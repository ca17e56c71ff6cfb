//! Lightweight line scanner for INI-style input.
//!
//! This is a separate, much simpler entry point than [`crate::parse`]: no
//! document is built, and values are handed to a callback as raw trimmed
//! text. It covers the "just read the settings file" case where allocating a
//! tree is overkill.
//!
//! Rules per line, after trimming surrounding whitespace:
//! - lines starting with `#` or `;` are comments,
//! - `[section]` switches the current section (only if the `]` is present),
//! - the first `=` splits key from value, both trimmed,
//! - anything else is ignored.
//!
//! Keys before the first section header are reported with the empty section
//! name.
//!
//! ## Examples
//!
//! ```rust
//! let mut seen = Vec::new();
//! tomlite::ini::scan("a = 1\n[net]\nhost = local\n", |section, key, value| {
//!     seen.push(format!("{section}/{key}/{value}"));
//!     true
//! });
//! assert_eq!(seen, vec!["/a/1", "net/host/local"]);
//! ```

/// Scans `input` line by line, invoking `handler(section, key, value)` for
/// every key-value pair. The handler returns `true` to keep scanning or
/// `false` to stop early.
pub fn scan<F>(input: &str, mut handler: F)
where
    F: FnMut(&str, &str, &str) -> bool,
{
    let mut section = String::new();

    for raw in input.lines() {
        let line = raw.trim();

        if line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if let Some(rest) = line.strip_prefix('[') {
            if let Some(close) = rest.find(']') {
                section = rest[..close].trim().to_string();
            }
            continue;
        }

        if let Some(eq) = line.find('=') {
            let key = line[..eq].trim();
            let value = line[eq + 1..].trim();
            if !handler(&section, key, value) {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(input: &str) -> Vec<(String, String, String)> {
        let mut pairs = Vec::new();
        scan(input, |section, key, value| {
            pairs.push((section.to_string(), key.to_string(), value.to_string()));
            true
        });
        pairs
    }

    #[test]
    fn test_sections_and_pairs() {
        let pairs = collect("global = 1\n[net]\nhost = localhost\nport = 80\n");
        assert_eq!(
            pairs,
            vec![
                ("".into(), "global".into(), "1".into()),
                ("net".into(), "host".into(), "localhost".into()),
                ("net".into(), "port".into(), "80".into()),
            ]
        );
    }

    #[test]
    fn test_comments_and_blanks_ignored() {
        let pairs = collect("# comment\n; also a comment\n\n  \nkey = v\n");
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].1, "key");
    }

    #[test]
    fn test_whitespace_trimmed() {
        let pairs = collect("  [ app ]  \n   spaced key   =   some value  \n");
        assert_eq!(pairs, vec![("app".into(), "spaced key".into(), "some value".into())]);
    }

    #[test]
    fn test_value_keeps_later_equals() {
        let pairs = collect("expr = a = b\n");
        assert_eq!(pairs[0].2, "a = b");
    }

    #[test]
    fn test_unclosed_section_keeps_previous() {
        let pairs = collect("[one]\na = 1\n[broken\nb = 2\n");
        assert_eq!(pairs[1].0, "one");
    }

    #[test]
    fn test_handler_stops_early() {
        let mut count = 0;
        scan("a = 1\nb = 2\nc = 3\n", |_, _, _| {
            count += 1;
            count < 2
        });
        assert_eq!(count, 2);
    }

    #[test]
    fn test_crlf_input() {
        let pairs = collect("[s]\r\nk = v\r\n");
        assert_eq!(pairs, vec![("s".into(), "k".into(), "v".into())]);
    }
}
