//! Lexical helpers over already-captured head text.
//!
//! All scanners here skip string and character literals so that brackets,
//! commas and colons inside them never count.

/// Java identifier: letters, digits, `_` and `$`, not starting with a digit.
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }
    chars.all(is_identifier_char)
}

pub fn is_identifier_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}

const RESERVED: &[&str] = &[
    "abstract", "assert", "break", "case", "catch", "class", "continue", "default", "do", "else",
    "enum", "extends", "final", "finally", "for", "if", "implements", "import", "instanceof",
    "interface", "native", "new", "package", "private", "protected", "public", "return", "static",
    "super", "switch", "synchronized", "this", "throw", "throws", "transient", "try", "volatile",
    "while",
];

pub fn is_reserved(word: &str) -> bool {
    RESERVED.contains(&word)
}

/// If `text` starts with `keyword` as a whole word, return the rest.
pub fn strip_keyword<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = text.strip_prefix(keyword)?;
    match rest.chars().next() {
        Some(ch) if is_identifier_char(ch) => None,
        _ => Some(rest),
    }
}

/// Byte length of the literal starting at `start`, or `None` if `start` is
/// not a quote.
fn literal_len(text: &str, start: usize) -> Option<usize> {
    let quote = text[start..].chars().next().filter(|ch| *ch == '"' || *ch == '\'')?;
    let mut escaped = false;
    for (offset, ch) in text[start + 1..].char_indices() {
        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == quote {
            return Some(offset + 2);
        }
    }
    Some(text.len() - start)
}

/// Walk `text` yielding `(byte_offset, char, depth)` for every character
/// outside literals, where depth counts `()`, `[]`, `{}` and optionally `<>`.
/// The depth reported for an opening bracket is the depth before it.
fn walk_top_level(text: &str, angle: bool, mut visit: impl FnMut(usize, char, usize) -> bool) {
    let mut depth: usize = 0;
    let mut offset = 0;
    while offset < text.len() {
        if let Some(len) = literal_len(text, offset) {
            offset += len;
            continue;
        }
        let Some(ch) = text[offset..].chars().next() else {
            break;
        };
        let closes = matches!(ch, ')' | ']' | '}') || (angle && ch == '>');
        if closes {
            depth = depth.saturating_sub(1);
        }
        if !visit(offset, ch, depth) {
            return;
        }
        let opens = matches!(ch, '(' | '[' | '{') || (angle && ch == '<');
        if opens {
            depth += 1;
        }
        offset += ch.len_utf8();
    }
}

/// First occurrence of `needle` at bracket depth zero.
pub fn find_top_level(text: &str, needle: char, angle: bool) -> Option<usize> {
    let mut found = None;
    walk_top_level(text, angle, |offset, ch, depth| {
        if depth == 0 && ch == needle {
            found = Some(offset);
            return false;
        }
        true
    });
    found
}

/// First `:` at depth zero that is not part of `::`.
pub fn find_label_colon(text: &str) -> Option<usize> {
    let mut found = None;
    let bytes = text.as_bytes();
    walk_top_level(text, false, |offset, ch, depth| {
        if depth == 0 && ch == ':' {
            let doubled = bytes.get(offset + 1) == Some(&b':')
                || (offset > 0 && bytes.get(offset - 1) == Some(&b':'));
            if !doubled {
                found = Some(offset);
                return false;
            }
        }
        true
    });
    found
}

/// Split on `separator` at depth zero. Pieces are trimmed; empty pieces are dropped.
pub fn split_top_level(text: &str, separator: char, angle: bool) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    walk_top_level(text, angle, |offset, ch, depth| {
        if depth == 0 && ch == separator {
            parts.push(text[start..offset].trim());
            start = offset + ch.len_utf8();
        }
        true
    });
    parts.push(text[start..].trim());
    parts.retain(|part| !part.is_empty());
    parts
}

/// Offset of the bracket closing the one at `open`.
pub fn matching_close(text: &str, open: usize) -> Option<usize> {
    let open_char = text[open..].chars().next()?;
    let close_char = match open_char {
        '(' => ')',
        '[' => ']',
        '{' => '}',
        '<' => '>',
        _ => return None,
    };
    let mut depth = 0usize;
    let mut found = None;
    walk_top_level(&text[open..], false, |offset, ch, _| {
        if ch == open_char {
            depth += 1;
        } else if ch == close_char {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                found = Some(open + offset);
                return false;
            }
        }
        true
    });
    found
}

/// Split into whitespace-separated words, keeping generic arguments and
/// array brackets attached to the word they belong to.
pub fn split_words(text: &str) -> Vec<String> {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    for ch in text.chars() {
        match ch {
            '<' | '(' | '[' => depth += 1,
            '>' | ')' | ']' => depth = depth.saturating_sub(1),
            _ => {}
        }
        if ch.is_whitespace() && depth == 0 {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if current.is_empty() && matches!(ch, '<' | '[') && depth == 1 {
            // `List <T>` and `String []` belong to the preceding word,
            // except a leading type parameter list like `<T> void f()`.
            if let Some(previous) = words.last_mut() {
                if ch == '[' || !is_modifier_word(previous) {
                    previous.push(ch);
                    current = words.pop().unwrap_or_default();
                    continue;
                }
            }
        }
        if current.is_empty() && ch == '.' {
            if let Some(previous) = words.pop() {
                current = previous;
            }
        }
        current.push(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn is_modifier_word(word: &str) -> bool {
    matches!(
        word,
        "public"
            | "protected"
            | "private"
            | "static"
            | "final"
            | "abstract"
            | "synchronized"
            | "native"
            | "default"
            | "strictfp"
    )
}

/// Remove `<...>` type arguments and whitespace: `Map<K, V>` becomes `Map`.
pub fn strip_generics(text: &str) -> String {
    let mut depth = 0usize;
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ch if depth == 0 && !ch.is_whitespace() => out.push(ch),
            _ => {}
        }
    }
    out
}

/// Peel leading annotations (`@Name`, `@Name(...)`) off a declaration head.
///
/// `@interface` is a keyword, not an annotation, and stops the scan.
pub fn strip_annotations(text: &str) -> (Vec<String>, &str) {
    let mut annotations = Vec::new();
    let mut rest = text.trim_start();
    while let Some(after_at) = rest.strip_prefix('@') {
        if strip_keyword(after_at, "interface").is_some() {
            break;
        }
        let name_len = after_at
            .char_indices()
            .find(|(_, ch)| !(is_identifier_char(*ch) || *ch == '.'))
            .map(|(idx, _)| idx)
            .unwrap_or(after_at.len());
        if name_len == 0 {
            break;
        }
        let mut end = 1 + name_len;
        let after_name = &rest[end..];
        let spaces = after_name.len() - after_name.trim_start().len();
        if after_name.trim_start().starts_with('(') {
            match matching_close(rest, end + spaces) {
                Some(close) => end = close + 1,
                None => break,
            }
        }
        annotations.push(rest[..end].trim().to_string());
        rest = rest[end..].trim_start();
    }
    (annotations, rest)
}

/// Parse `keyword (inner)` with nothing after the closing parenthesis.
pub fn parenthesized_after<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = strip_keyword(text, keyword)?.trim_start();
    if !rest.starts_with('(') {
        return None;
    }
    let close = matching_close(rest, 0)?;
    if !rest[close + 1..].trim().is_empty() {
        return None;
    }
    Some(rest[1..close].trim())
}
