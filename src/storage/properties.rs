//! `.properties` text codec
//!
//! Reads and writes the line-oriented `key=value` format used by Java
//! `Properties` files:
//! - `#` and `!` start comment lines, blank lines are skipped
//! - keys end at the first unescaped `=`, `:` or whitespace
//! - a line ending in an odd number of backslashes continues on the next line
//! - `\t`, `\n`, `\r`, `\f` and `\uXXXX` escapes; any other escaped character
//!   stands for itself
//!
//! Files are read and written as UTF-8; only control characters are written
//! as `\uXXXX`.

use super::Entries;
use crate::error::{Error, Result};
use std::str::Chars;

const WHITESPACE: [char; 3] = [' ', '\t', '\x0c'];

/// Decode properties text into key/value entries. Later duplicates win.
///
/// # Errors
///
/// Returns [`Error::Parse`] on a malformed `\uXXXX` escape.
pub fn decode(content: &str) -> Result<Entries> {
    let mut entries = Entries::new();
    for line in logical_lines(content) {
        let (key, value) = split_entry(&line);
        entries.insert(unescape(key)?, unescape(value)?);
    }
    Ok(entries)
}

/// Encode entries as properties text.
///
/// `comments` are written first, one `#` line each.
#[must_use]
pub fn encode(entries: &Entries, comments: &[&str]) -> String {
    let mut out = String::new();
    for comment in comments {
        for line in comment.lines() {
            out.push('#');
            out.push_str(line);
            out.push('\n');
        }
    }
    for (key, value) in entries {
        out.push_str(&escape(key, true));
        out.push('=');
        out.push_str(&escape(value, false));
        out.push('\n');
    }
    out
}

/// Join continuation lines and drop comments and blank lines
fn logical_lines(content: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut pending: Option<String> = None;

    for natural in natural_lines(content) {
        let trimmed = natural.trim_start_matches(WHITESPACE);
        let mut line = match pending.take() {
            Some(mut joined) => {
                joined.push_str(trimmed);
                joined
            }
            None => {
                if trimmed.is_empty() || trimmed.starts_with(['#', '!']) {
                    continue;
                }
                trimmed.to_string()
            }
        };

        if continues(&line) {
            line.pop();
            pending = Some(line);
        } else {
            lines.push(line);
        }
    }

    lines.extend(pending);
    lines
}

/// Split on `\n`, `\r\n` and a lone `\r`
fn natural_lines(content: &str) -> impl Iterator<Item = &str> {
    let mut rest = content;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let end = rest.find(['\r', '\n']).unwrap_or(rest.len());
        let line = &rest[..end];
        let terminator = if rest[end..].starts_with("\r\n") {
            2
        } else {
            usize::from(end < rest.len())
        };
        rest = &rest[end + terminator..];
        Some(line)
    })
}

fn continues(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Split a logical line into raw (still escaped) key and value
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut split = None;

    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                split = Some((i, true));
                break;
            }
            c if WHITESPACE.contains(&c) => {
                split = Some((i, false));
                break;
            }
            _ => {}
        }
    }

    let Some((key_end, explicit)) = split else {
        return (line, "");
    };

    let key = &line[..key_end];
    let mut value = line[key_end + 1..].trim_start_matches(WHITESPACE);
    if !explicit {
        if let Some(rest) = value.strip_prefix(['=', ':']) {
            value = rest.trim_start_matches(WHITESPACE);
        }
    }
    (key, value)
}

fn unescape(raw: &str) -> Result<String> {
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
            Some('u') => out.push(unicode_escape(&mut chars)?),
            Some(other) => out.push(other),
            None => {}
        }
    }

    Ok(out)
}

/// Decode the digits of a `\uXXXX` escape, joining UTF-16 surrogate pairs
fn unicode_escape(chars: &mut Chars<'_>) -> Result<char> {
    let unit = hex4(chars)?;
    if !(0xD800..=0xDBFF).contains(&unit) {
        return char::from_u32(unit)
            .ok_or_else(|| Error::Parse(format!("Unpaired surrogate \\u{unit:04X}")));
    }

    let low = match (chars.next(), chars.next()) {
        (Some('\\'), Some('u')) => hex4(chars)?,
        _ => return Err(Error::Parse(format!("Unpaired surrogate \\u{unit:04X}"))),
    };
    if !(0xDC00..=0xDFFF).contains(&low) {
        return Err(Error::Parse(format!(
            "Invalid surrogate pair \\u{unit:04X}\\u{low:04X}"
        )));
    }

    let code = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
    char::from_u32(code).ok_or_else(|| Error::Parse(format!("Invalid code point {code:#X}")))
}

fn hex4(chars: &mut Chars<'_>) -> Result<u32> {
    let digits: String = chars.by_ref().take(4).collect();
    if digits.chars().count() != 4 {
        return Err(Error::Parse(format!("Malformed \\uXXXX escape: \\u{digits}")));
    }
    u32::from_str_radix(&digits, 16)
        .map_err(|_| Error::Parse(format!("Malformed \\uXXXX escape: \\u{digits}")))
}

fn escape(text: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, c) in text.chars().enumerate() {
        match c {
            ' ' if is_key || i == 0 => out.push_str("\\ "),
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x0c' => out.push_str("\\f"),
            '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", u32::from(c))),
            c => out.push(c),
        }
    }
    out
}
