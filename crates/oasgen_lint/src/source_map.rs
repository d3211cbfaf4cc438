//! Mapping from document nodes back to source text.
//!
//! All offsets are character offsets (Unicode scalar values), not bytes.
//! Lines are 1-based, columns 0-based.

use std::collections::HashMap;

use crate::error::{LintError, LintResult};

/// Half-open character range `[from, to)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub from: usize,
    pub to: usize,
}

impl Span {
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }
}

/// Line-start table for converting offsets to line/column and back.
#[derive(Debug, Clone)]
pub struct LineIndex {
    starts: Vec<usize>,
    ends: Vec<usize>,
    len: usize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut starts = vec![0];
        let mut ends = Vec::new();
        let mut prev = None;
        let mut len = 0;

        for (i, c) in text.chars().enumerate() {
            if c == '\n' {
                ends.push(if prev == Some('\r') { i - 1 } else { i });
                starts.push(i + 1);
            }
            prev = Some(c);
            len = i + 1;
        }
        ends.push(len);

        Self { starts, ends, len }
    }

    /// Length of the text in characters.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    /// Line and column of an offset; offsets past the end clamp to the end.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.len);
        let line = match self.starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i - 1,
        };
        (line + 1, offset - self.starts[line])
    }

    /// First offset of a line, clamped to the last line.
    pub fn line_start(&self, line: usize) -> usize {
        self.starts[self.clamp_line(line)]
    }

    /// Offset just past the last visible character of a line (before `\r\n`).
    pub fn line_end(&self, line: usize) -> usize {
        self.ends[self.clamp_line(line)]
    }

    /// Absolute offset of a line/column pair.
    pub fn offset(&self, line: usize, column: usize) -> usize {
        (self.line_start(line) + column).min(self.len)
    }

    fn clamp_line(&self, line: usize) -> usize {
        line.clamp(1, self.starts.len()) - 1
    }
}

/// Source ranges of every value in a JSON document, keyed by JSON pointer.
#[derive(Debug, Clone, Default)]
pub struct SourceMap {
    spans: HashMap<String, Span>,
}

impl SourceMap {
    /// Scan JSON text and record where each value sits.
    pub fn parse(text: &str) -> LintResult<Self> {
        let chars: Vec<char> = text.chars().collect();
        let mut scanner = Scanner {
            chars: &chars,
            pos: 0,
            spans: HashMap::new(),
        };

        scanner.value(String::new())?;
        scanner.skip_whitespace();
        if scanner.pos < chars.len() {
            return Err(scanner.error("trailing characters"));
        }

        Ok(Self {
            spans: scanner.spans,
        })
    }

    /// Range of the value at `pointer` (`""` is the root).
    pub fn span(&self, pointer: &str) -> Option<Span> {
        self.spans.get(pointer).copied()
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

/// Append a reference token to a JSON pointer, escaping `~` and `/`.
pub fn push_pointer(pointer: &str, token: &str) -> String {
    let escaped = token.replace('~', "~0").replace('/', "~1");
    format!("{}/{}", pointer, escaped)
}

struct Scanner<'a> {
    chars: &'a [char],
    pos: usize,
    spans: HashMap<String, Span>,
}

impl Scanner<'_> {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn expect(&mut self, expected: char) -> LintResult<()> {
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            _ => Err(self.error(&format!("expected '{}'", expected))),
        }
    }

    fn error(&self, message: &str) -> LintError {
        LintError::Scan {
            offset: self.pos,
            message: message.to_string(),
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if matches!(c, ' ' | '\t' | '\n' | '\r') {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn value(&mut self, pointer: String) -> LintResult<()> {
        self.skip_whitespace();
        let start = self.pos;

        match self.peek() {
            Some('{') => self.object(&pointer)?,
            Some('[') => self.array(&pointer)?,
            Some('"') => {
                self.string()?;
            }
            Some('t') => self.literal("true")?,
            Some('f') => self.literal("false")?,
            Some('n') => self.literal("null")?,
            Some(c) if c == '-' || c.is_ascii_digit() => self.number(),
            Some(_) => return Err(self.error("unexpected character")),
            None => return Err(self.error("unexpected end of input")),
        }

        self.spans.insert(pointer, Span::new(start, self.pos));
        Ok(())
    }

    fn object(&mut self, pointer: &str) -> LintResult<()> {
        self.expect('{')?;
        self.skip_whitespace();
        if self.peek() == Some('}') {
            self.pos += 1;
            return Ok(());
        }

        loop {
            self.skip_whitespace();
            let key = self.string()?;
            self.skip_whitespace();
            self.expect(':')?;
            self.value(push_pointer(pointer, &key))?;
            self.skip_whitespace();

            match self.bump() {
                Some(',') => continue,
                Some('}') => return Ok(()),
                _ => return Err(self.error("expected ',' or '}'")),
            }
        }
    }

    fn array(&mut self, pointer: &str) -> LintResult<()> {
        self.expect('[')?;
        self.skip_whitespace();
        if self.peek() == Some(']') {
            self.pos += 1;
            return Ok(());
        }

        let mut index = 0;
        loop {
            self.value(push_pointer(pointer, &index.to_string()))?;
            index += 1;
            self.skip_whitespace();

            match self.bump() {
                Some(',') => continue,
                Some(']') => return Ok(()),
                _ => return Err(self.error("expected ',' or ']'")),
            }
        }
    }

    /// Consume a string literal and return its decoded contents.
    fn string(&mut self) -> LintResult<String> {
        self.expect('"')?;
        let mut out = String::new();

        loop {
            match self.bump() {
                Some('"') => return Ok(out),
                Some('\\') => match self.bump() {
                    Some('"') => out.push('"'),
                    Some('\\') => out.push('\\'),
                    Some('/') => out.push('/'),
                    Some('b') => out.push('\u{8}'),
                    Some('f') => out.push('\u{c}'),
                    Some('n') => out.push('\n'),
                    Some('r') => out.push('\r'),
                    Some('t') => out.push('\t'),
                    Some('u') => out.push(self.unicode_escape()?),
                    _ => return Err(self.error("invalid escape")),
                },
                Some(c) => out.push(c),
                None => return Err(self.error("unterminated string")),
            }
        }
    }

    fn unicode_escape(&mut self) -> LintResult<char> {
        let high = self.hex4()?;
        if (0xD800..0xDC00).contains(&high) {
            // Surrogate pair: expect a following \uDC00-\uDFFF.
            if self.peek() == Some('\\') && self.chars.get(self.pos + 1) == Some(&'u') {
                self.pos += 2;
                let low = self.hex4()?;
                if (0xDC00..0xE000).contains(&low) {
                    let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                    return Ok(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
                }
            }
            return Ok(char::REPLACEMENT_CHARACTER);
        }
        Ok(char::from_u32(high).unwrap_or(char::REPLACEMENT_CHARACTER))
    }

    fn hex4(&mut self) -> LintResult<u32> {
        let mut code = 0;
        for _ in 0..4 {
            let digit = self
                .bump()
                .and_then(|c| c.to_digit(16))
                .ok_or_else(|| self.error("invalid unicode escape"))?;
            code = code * 16 + digit;
        }
        Ok(code)
    }

    fn literal(&mut self, word: &str) -> LintResult<()> {
        for expected in word.chars() {
            if self.bump() != Some(expected) {
                return Err(self.error(&format!("invalid literal, expected {}", word)));
            }
        }
        Ok(())
    }

    fn number(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E') {
                self.pos += 1;
            } else {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_index_round_trip() {
        let index = LineIndex::new("ab\ncde\r\nf");
        assert_eq!(index.line_count(), 3);
        assert_eq!(index.line_col(0), (1, 0));
        assert_eq!(index.line_col(4), (2, 1));
        assert_eq!(index.line_col(8), (3, 0));
        assert_eq!(index.offset(2, 1), 4);
        assert_eq!(index.line_end(1), 2);
        assert_eq!(index.line_end(2), 6);
        assert_eq!(index.line_end(3), 9);
    }

    #[test]
    fn test_line_index_clamps() {
        let index = LineIndex::new("abc");
        assert_eq!(index.line_col(99), (1, 3));
        assert_eq!(index.line_start(7), 0);
        assert_eq!(index.line_end(0), 3);
    }

    #[test]
    fn test_source_map_spans() {
        let text = "{\n  \"title\": \"Orders\",\n  \"resources\": [{\"name\": \"a\"}]\n}";
        let map = SourceMap::parse(text).unwrap();

        let title = map.span("/title").unwrap();
        assert_eq!(&text[title.from..title.to], "\"Orders\"");

        let name = map.span("/resources/0/name").unwrap();
        assert_eq!(&text[name.from..name.to], "\"a\"");

        let root = map.span("").unwrap();
        assert_eq!((root.from, root.to), (0, text.len()));
    }

    #[test]
    fn test_source_map_counts_characters() {
        let text = r#"{"é": "ü", "k": 1}"#;
        let map = SourceMap::parse(text).unwrap();
        assert_eq!(map.span("/k"), Some(Span::new(16, 17)));
    }

    #[test]
    fn test_pointer_escaping() {
        let text = r#"{"a/b": {"~c": true}}"#;
        let map = SourceMap::parse(text).unwrap();
        assert!(map.span("/a~1b/~0c").is_some());
        assert_eq!(push_pointer("", "a/b"), "/a~1b");
    }

    #[test]
    fn test_source_map_rejects_malformed() {
        assert!(SourceMap::parse("{\"a\": }").is_err());
        assert!(SourceMap::parse("[1, 2").is_err());
        assert!(SourceMap::parse("{} x").is_err());
    }
}
