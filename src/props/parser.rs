//! Properties text parser.
//!
//! Implements the conventional `key=value` properties format:
//! - `\n`, `\r` and `\r\n` all terminate a natural line
//! - blank lines and lines starting with `#` or `!` are skipped
//! - a line ending in an odd number of backslashes continues on the next one
//! - the key ends at the first unescaped `=`, `:` or whitespace
//! - `\t \n \r \f \uXXXX` escapes are decoded, any other `\c` yields `c`

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct PropertiesParseError {
    pub line: usize,
    pub message: String,
}

/// Parse properties text into `(key, value)` pairs in file order.
///
/// Duplicates are kept; callers decide which one wins.
pub fn parse_properties(text: &str) -> Result<Vec<(String, String)>, PropertiesParseError> {
    let lines = natural_lines(text);
    let mut entries = Vec::new();
    let mut idx = 0usize;

    while idx < lines.len() {
        let line_no = idx + 1;
        let trimmed = lines[idx].trim_start_matches(is_whitespace);
        idx += 1;

        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }

        let mut logical = trimmed.to_string();
        while ends_with_continuation(&logical) {
            logical.pop();
            match lines.get(idx) {
                Some(next) => {
                    logical.push_str(next.trim_start_matches(is_whitespace));
                    idx += 1;
                }
                None => break,
            }
        }

        let (raw_key, raw_value) = split_key_value(&logical);
        let key = unescape(raw_key)
            .map_err(|message| PropertiesParseError { line: line_no, message })?;
        let value = unescape(raw_value)
            .map_err(|message| PropertiesParseError { line: line_no, message })?;
        entries.push((key, value));
    }

    Ok(entries)
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

fn natural_lines(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0usize;
    let mut i = 0usize;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&text[start..i]);
                i += 1;
                start = i;
            }
            b'\r' => {
                lines.push(&text[start..i]);
                i += if bytes.get(i + 1) == Some(&b'\n') { 2 } else { 1 };
                start = i;
            }
            _ => i += 1,
        }
    }
    if start < bytes.len() {
        lines.push(&text[start..]);
    }

    lines
}

fn ends_with_continuation(line: &str) -> bool {
    let trailing = line.chars().rev().take_while(|&c| c == '\\').count();
    trailing % 2 == 1
}

/// Split a logical line into its raw (still escaped) key and value.
fn split_key_value(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();

    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        if c == '\\' {
            escaped = true;
            continue;
        }
        if c == '=' || c == ':' || is_whitespace(c) {
            key_end = i;
            break;
        }
    }

    let key = &line[..key_end];
    let mut rest = &line[key_end..];

    let mut has_separator = false;
    if rest.starts_with(['=', ':']) {
        rest = &rest[1..];
        has_separator = true;
    }
    rest = rest.trim_start_matches(is_whitespace);
    if !has_separator && rest.starts_with(['=', ':']) {
        rest = rest[1..].trim_start_matches(is_whitespace);
    }

    (key, rest)
}

fn unescape(raw: &str) -> Result<String, String> {
    if !raw.contains('\\') {
        return Ok(raw.to_string());
    }

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let unit = read_hex4(&mut chars)?;
                out.push(decode_unit(unit, &mut chars)?);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    Ok(out)
}

fn read_hex4(chars: &mut std::str::Chars<'_>) -> Result<u16, String> {
    let mut value: u16 = 0;
    for _ in 0..4 {
        let digit = chars
            .next()
            .and_then(|c| c.to_digit(16))
            .ok_or_else(|| "malformed \\uXXXX encoding".to_string())?;
        value = (value << 4) | digit as u16;
    }
    Ok(value)
}

/// Turn a UTF-16 code unit into a char, pairing a high surrogate with a
/// following `\uXXXX` low surrogate when one is present.
fn decode_unit(unit: u16, chars: &mut std::str::Chars<'_>) -> Result<char, String> {
    if !(0xD800..0xDC00).contains(&unit) {
        return Ok(char::from_u32(unit as u32).unwrap_or(char::REPLACEMENT_CHARACTER));
    }

    if chars.as_str().starts_with("\\u") {
        let mut lookahead = chars.clone();
        lookahead.nth(1);
        if let Ok(low) = read_hex4(&mut lookahead) {
            if (0xDC00..0xE000).contains(&low) {
                *chars = lookahead;
                let combined = 0x10000 + (((unit as u32) - 0xD800) << 10) + ((low as u32) - 0xDC00);
                return Ok(char::from_u32(combined).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
        }
    }

    Ok(char::REPLACEMENT_CHARACTER)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Vec<(String, String)> {
        parse_properties(text).expect("parse")
    }

    fn pair(k: &str, v: &str) -> (String, String) {
        (k.to_string(), v.to_string())
    }

    #[test]
    fn test_simple_pairs_and_separators() {
        let entries = parse("a=1\nb:2\nc 3\nd = 4\ne\t:\t5\n");
        assert_eq!(
            entries,
            vec![pair("a", "1"), pair("b", "2"), pair("c", "3"), pair("d", "4"), pair("e", "5")]
        );
    }

    #[test]
    fn test_comments_and_blank_lines_are_skipped() {
        let entries = parse("# comment\n! bang comment\n\n   \nfester.http.port=8888\n");
        assert_eq!(entries, vec![pair("fester.http.port", "8888")]);
    }

    #[test]
    fn test_value_keeps_trailing_whitespace_and_later_separators() {
        let entries = parse("url=http://host:8080/a=b  \n");
        assert_eq!(entries, vec![pair("url", "http://host:8080/a=b  ")]);
    }

    #[test]
    fn test_key_without_value() {
        let entries = parse("lonely\nempty=\n");
        assert_eq!(entries, vec![pair("lonely", ""), pair("empty", "")]);
    }

    #[test]
    fn test_line_continuation_strips_leading_whitespace() {
        let entries = parse("list=a,\\\n    b,\\\n    c\nnext=1\n");
        assert_eq!(entries, vec![pair("list", "a,b,c"), pair("next", "1")]);
    }

    #[test]
    fn test_even_backslashes_do_not_continue() {
        let entries = parse("path=C:\\\\\nnext=1\n");
        assert_eq!(entries, vec![pair("path", "C:\\"), pair("next", "1")]);
    }

    #[test]
    fn test_trailing_backslash_at_eof_is_dropped() {
        let entries = parse("key=value\\");
        assert_eq!(entries, vec![pair("key", "value")]);
    }

    #[test]
    fn test_escaped_separators_in_key() {
        let entries = parse("my\\ key\\=x\\:y=value\n");
        assert_eq!(entries, vec![pair("my key=x:y", "value")]);
    }

    #[test]
    fn test_standard_escapes() {
        let entries = parse("k=tab\\there\\nnew\\rret\\fff\\q\n");
        assert_eq!(entries, vec![pair("k", "tab\there\nnew\rret\x0cffq")]);
    }

    #[test]
    fn test_unicode_escapes() {
        let entries = parse("k=caf\\u00e9 \\uD83D\\uDE00\n");
        assert_eq!(entries, vec![pair("k", "caf\u{e9} \u{1F600}")]);
    }

    #[test]
    fn test_lone_surrogate_becomes_replacement_char() {
        let entries = parse("k=\\uD800x\n");
        assert_eq!(entries, vec![pair("k", "\u{FFFD}x")]);
    }

    #[test]
    fn test_malformed_unicode_escape_is_an_error() {
        let err = parse_properties("ok=1\nbad=\\u12G4\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert!(err.message.contains("malformed"));
    }

    #[test]
    fn test_crlf_and_cr_terminators() {
        let entries = parse("a=1\r\nb=2\rc=3");
        assert_eq!(entries, vec![pair("a", "1"), pair("b", "2"), pair("c", "3")]);
    }

    #[test]
    fn test_comment_lines_do_not_continue() {
        let entries = parse("# note \\\nkey=value\n");
        assert_eq!(entries, vec![pair("key", "value")]);
    }

    #[test]
    fn test_duplicates_are_kept_in_order() {
        let entries = parse("k=1\nk=2\n");
        assert_eq!(entries, vec![pair("k", "1"), pair("k", "2")]);
    }
}
