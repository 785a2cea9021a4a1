//! Character cursor over an immutable source buffer.
//!
//! The cursor is the only component that moves through the text. It keeps the
//! current byte offset and 1-based line number in lockstep, so every read
//! updates the line counter for each newline it consumes. Reading past the
//! end of input yields empty results or `None`, never a panic.

/// Saved cursor position. Offset and line are restored together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    offset: usize,
    line: u32,
}

impl Checkpoint {
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn line(&self) -> u32 {
        self.line
    }
}

#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    text: &'a str,
    offset: usize,
    line: u32,
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            offset: 0,
            line: 1,
        }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Current byte offset
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Current 1-based line
    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn can_read(&self) -> bool {
        self.offset < self.text.len()
    }

    /// Advance by `skip + 1` characters and return the last one consumed.
    ///
    /// Returns `None` when the input runs out before that many characters
    /// could be consumed; whatever was available is still consumed.
    pub fn next_char(&mut self, skip: usize) -> Option<char> {
        let mut last = None;
        for _ in 0..=skip {
            let ch = self.text[self.offset..].chars().next()?;
            if ch == '\n' {
                self.line += 1;
            }
            self.offset += ch.len_utf8();
            last = Some(ch);
        }
        last
    }

    pub fn skip_spaces(&mut self) {
        while self.read_ahead_char().is_some_and(char::is_whitespace) {
            self.next_char(0);
        }
    }

    /// Read `length` characters plus `beyond` more.
    pub fn read(&mut self, length: usize, beyond: usize) -> &'a str {
        let start = self.offset;
        let total = length + beyond;
        if total > 0 {
            self.next_char(total - 1);
        }
        &self.text[start..self.offset]
    }

    /// Read up to the absolute byte offset `to`, then `beyond` more characters.
    pub fn read_to(&mut self, to: usize, beyond: usize) -> &'a str {
        let start = self.offset;
        let to = to.min(self.text.len());
        while self.offset < to {
            if self.next_char(0).is_none() {
                break;
            }
        }
        if beyond > 0 {
            self.next_char(beyond - 1);
        }
        &self.text[start..self.offset]
    }

    /// Read while `cond` holds for the next character, then `beyond` more.
    pub fn read_while<F>(&mut self, cond: F, beyond: usize) -> &'a str
    where
        F: Fn(char) -> bool,
    {
        let start = self.offset;
        while self.read_ahead_char().is_some_and(&cond) {
            self.next_char(0);
        }
        if beyond > 0 {
            self.next_char(beyond - 1);
        }
        &self.text[start..self.offset]
    }

    /// Read up to the next occurrence of `sub`, then `beyond` more characters.
    ///
    /// Returns `None` and leaves the cursor untouched when `sub` does not occur.
    pub fn read_find(&mut self, sub: &str, beyond: usize) -> Option<&'a str> {
        let to = self.find_ahead(sub)?;
        Some(self.read_to(to, beyond))
    }

    /// Peek at the next `length` characters without consuming them.
    pub fn read_ahead(&self, length: usize) -> &'a str {
        let rest = &self.text[self.offset..];
        let end = rest
            .char_indices()
            .nth(length)
            .map(|(idx, _)| idx)
            .unwrap_or(rest.len());
        &rest[..end]
    }

    pub fn read_ahead_char(&self) -> Option<char> {
        self.text[self.offset..].chars().next()
    }

    /// Absolute byte offset of the next occurrence of `sub`.
    pub fn find_ahead(&self, sub: &str) -> Option<usize> {
        self.text[self.offset..]
            .find(sub)
            .map(|relative| self.offset + relative)
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            offset: self.offset,
            line: self.line,
        }
    }

    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.offset = checkpoint.offset;
        self.line = checkpoint.line;
    }

    /// Raw text between two absolute byte offsets.
    pub fn slice(&self, from: usize, to: usize) -> &'a str {
        let to = to.min(self.text.len());
        &self.text[from.min(to)..to]
    }

    /// True when a `//` or `/*` comment starts at the cursor.
    pub fn at_comment(&self) -> bool {
        matches!(self.read_ahead(2), "//" | "/*")
    }

    /// Consume a comment starting at the cursor.
    ///
    /// Line comments stop before their newline. An unterminated block comment
    /// runs to the end of input.
    pub fn read_comment(&mut self) -> Option<&'a str> {
        match self.read_ahead(2) {
            "//" => Some(self.read_while(|ch| ch != '\n', 0)),
            "/*" => {
                let start = self.offset;
                self.next_char(1);
                match self.read_find("*/", 2) {
                    Some(_) => {}
                    None => {
                        self.read_to(self.text.len(), 0);
                    }
                }
                Some(&self.text[start..self.offset])
            }
            _ => None,
        }
    }

    /// Consume a string or character literal starting at the cursor.
    ///
    /// Backslash escapes are honored. Text blocks (`"""`) are consumed whole.
    pub fn read_literal(&mut self) -> Option<&'a str> {
        let quote = self.read_ahead_char().filter(|ch| *ch == '"' || *ch == '\'')?;
        let start = self.offset;
        if quote == '"' && self.read_ahead(3) == "\"\"\"" {
            self.next_char(2);
            if self.read_find("\"\"\"", 3).is_none() {
                self.read_to(self.text.len(), 0);
            }
            return Some(&self.text[start..self.offset]);
        }
        self.next_char(0);
        while let Some(ch) = self.next_char(0) {
            match ch {
                '\\' => {
                    self.next_char(0);
                }
                '\n' => break,
                ch if ch == quote => break,
                _ => {}
            }
        }
        Some(&self.text[start..self.offset])
    }
}
