//! Author list normalization.
//!
//! The clustered dataset stores authors as a Python list literal, e.g.
//! `['Neil Gaiman', "Terry Pratchett"]`. Only a list of plain string literals
//! is accepted; everything else normalizes to an empty string.

use std::iter::Peekable;
use std::str::Chars;

/// Join the authors of a list literal with `", "`.
///
/// Missing values and anything that is not a list of strings give `""`.
pub fn clean_author(raw: Option<&str>) -> String {
    raw.and_then(parse_string_list)
        .map(|authors| authors.join(", "))
        .unwrap_or_default()
}

/// Parse `[<str>, <str>, ...]` with an optional trailing comma.
fn parse_string_list(raw: &str) -> Option<Vec<String>> {
    let mut chars = raw.trim().chars().peekable();
    if chars.next()? != '[' {
        return None;
    }

    let mut items = Vec::new();
    loop {
        skip_whitespace(&mut chars);
        match chars.peek()? {
            ']' => {
                chars.next();
                break;
            }
            '\'' | '"' => items.push(parse_string(&mut chars)?),
            _ => return None,
        }

        skip_whitespace(&mut chars);
        match chars.next()? {
            ',' => continue,
            ']' => break,
            _ => return None,
        }
    }

    // Nothing may follow the closing bracket
    if chars.next().is_some() {
        return None;
    }
    Some(items)
}

/// One quoted literal; adjacent literals are concatenated like Python does.
fn parse_string(chars: &mut Peekable<Chars<'_>>) -> Option<String> {
    let mut value = String::new();
    while let Some(&quote) = chars.peek() {
        if quote != '\'' && quote != '"' {
            break;
        }
        chars.next();
        loop {
            match chars.next()? {
                '\\' => push_escape(chars, &mut value)?,
                c if c == quote => break,
                c => value.push(c),
            }
        }
        skip_whitespace(chars);
    }
    Some(value)
}

/// Decode one backslash escape the way a Python string literal does.
///
/// `\N{..}` names are not resolved, so they reject the whole literal.
fn push_escape(chars: &mut Peekable<Chars<'_>>, value: &mut String) -> Option<()> {
    let c = chars.next()?;
    match c {
        'n' => value.push('\n'),
        't' => value.push('\t'),
        'r' => value.push('\r'),
        'a' => value.push('\u{07}'),
        'b' => value.push('\u{08}'),
        'f' => value.push('\u{0c}'),
        'v' => value.push('\u{0b}'),
        '\\' | '\'' | '"' => value.push(c),
        '\n' => {}
        '0'..='7' => {
            let mut code = c.to_digit(8)?;
            for _ in 0..2 {
                match chars.next_if(|d| d.is_digit(8)) {
                    Some(d) => code = code * 8 + d.to_digit(8)?,
                    None => break,
                }
            }
            value.push(char::from_u32(code)?);
        }
        'x' => value.push(hex_escape(chars, 2)?),
        'u' => value.push(hex_escape(chars, 4)?),
        'U' => value.push(hex_escape(chars, 8)?),
        'N' => return None,
        other => {
            value.push('\\');
            value.push(other);
        }
    }
    Some(())
}

/// Exactly `digits` hex digits forming a valid scalar value
fn hex_escape(chars: &mut Peekable<Chars<'_>>, digits: usize) -> Option<char> {
    let mut code = 0u32;
    for _ in 0..digits {
        code = code * 16 + chars.next()?.to_digit(16)?;
    }
    char::from_u32(code)
}

fn skip_whitespace(chars: &mut Peekable<Chars<'_>>) {
    while chars.next_if(|c| c.is_whitespace()).is_some() {}
}
