//! The pull parser.
//!
//! A byte-cursor scanner over UTF-8 text that drives a [`Bricolage`]
//! builder. Newlines only occur legally in whitespace and comments, so
//! line accounting lives in `skip_trivia`; everything else advances the
//! cursor within the current line.

use super::bricolage::Bricolage;
use super::error::{ParseError, ParseErrorKind};
use super::options::ParseOptions;

pub struct Parser<'a, B: Bricolage> {
    text: &'a str,
    data: &'a [u8],
    pos: usize,
    line: usize,
    line_start: usize,
    options: ParseOptions,
    builder: &'a mut B,
}

/// A saved cursor position, used to report errors at token starts.
#[derive(Clone, Copy)]
struct Mark {
    offset: usize,
    line: usize,
    column: usize,
}

impl<'a, B: Bricolage> Parser<'a, B> {
    pub fn new(text: &'a str, options: ParseOptions, builder: &'a mut B) -> Self {
        Self {
            text,
            data: text.as_bytes(),
            pos: 0,
            line: 1,
            line_start: 0,
            options,
            builder,
        }
    }

    /// Parse a complete document: one value, nothing but trivia after it.
    pub fn parse_document(mut self) -> Result<B::Value, ParseError> {
        self.skip_trivia()?;
        let value = self.parse_value(0)?;
        self.skip_trivia()?;
        if self.pos < self.data.len() {
            return Err(self.err(ParseErrorKind::TrailingGarbage));
        }
        Ok(value)
    }

    fn mark(&self) -> Mark {
        Mark {
            offset: self.pos,
            line: self.line,
            column: self.pos - self.line_start + 1,
        }
    }

    fn err(&self, kind: ParseErrorKind) -> ParseError {
        self.err_at(kind, self.mark())
    }

    fn err_at(&self, kind: ParseErrorKind, mark: Mark) -> ParseError {
        ParseError {
            kind,
            offset: mark.offset,
            line: mark.line,
            column: mark.column,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    fn newline(&mut self) {
        self.pos += 1;
        self.line += 1;
        self.line_start = self.pos;
    }

    /// Skip whitespace and, under the compatibility options, comments.
    fn skip_trivia(&mut self) -> Result<(), ParseError> {
        loop {
            while let Some(b) = self.peek() {
                match b {
                    b' ' | b'\t' | b'\r' => self.pos += 1,
                    b'\n' => self.newline(),
                    _ => break,
                }
            }
            if !self.options.comments() {
                return Ok(());
            }
            match (self.peek(), self.data.get(self.pos + 1).copied()) {
                (Some(b'/'), Some(b'/')) => {
                    self.pos += 2;
                    while let Some(b) = self.peek() {
                        if b == b'\n' {
                            break;
                        }
                        self.pos += 1;
                    }
                }
                (Some(b'/'), Some(b'*')) => {
                    self.pos += 2;
                    loop {
                        match self.peek() {
                            None => return Err(self.err(ParseErrorKind::UnexpectedChar)),
                            Some(b'\n') => self.newline(),
                            Some(b'*') if self.data.get(self.pos + 1) == Some(&b'/') => {
                                self.pos += 2;
                                break;
                            }
                            Some(_) => self.pos += 1,
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn parse_value(&mut self, depth: usize) -> Result<B::Value, ParseError> {
        match self.peek() {
            None => Err(self.err(ParseErrorKind::UnexpectedChar)),
            Some(b'{') => self.parse_object(depth),
            Some(b'[') => self.parse_array(depth),
            Some(b'"') => {
                let s = self.read_string()?;
                Ok(self.builder.create_string(&s))
            }
            Some(b'n') => {
                self.expect_word("null")?;
                Ok(self.builder.create_null())
            }
            Some(b't') => {
                self.expect_word("true")?;
                Ok(self.builder.create_true())
            }
            Some(b'f') => {
                self.expect_word("false")?;
                Ok(self.builder.create_false())
            }
            Some(b'N') if self.options.nan_infinity() => self.named_number("NaN"),
            Some(b'I') if self.options.nan_infinity() => self.named_number("Infinity"),
            Some(b'-')
                if self.options.nan_infinity()
                    && self.data.get(self.pos + 1) == Some(&b'I') =>
            {
                self.named_number("-Infinity")
            }
            Some(b'-') | Some(b'0'..=b'9') => self.parse_number(),
            Some(_) => Err(self.err(ParseErrorKind::UnexpectedChar)),
        }
    }

    fn expect_word(&mut self, word: &str) -> Result<(), ParseError> {
        let start = self.mark();
        let end = self.pos + word.len();
        if end > self.data.len() || &self.data[self.pos..end] != word.as_bytes() {
            return Err(self.err_at(ParseErrorKind::InvalidLiteral, start));
        }
        self.pos = end;
        Ok(())
    }

    fn named_number(&mut self, word: &str) -> Result<B::Value, ParseError> {
        let start = self.mark();
        self.expect_word(word)?;
        self.builder
            .create_number(word)
            .ok_or_else(|| self.err_at(ParseErrorKind::InvalidNumber, start))
    }

    fn parse_number(&mut self) -> Result<B::Value, ParseError> {
        let start = self.mark();
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        match self.peek() {
            Some(b'0') => {
                self.pos += 1;
                // JSON forbids leading zeros
                if matches!(self.peek(), Some(b'0'..=b'9')) {
                    return Err(self.err_at(ParseErrorKind::InvalidNumber, start));
                }
            }
            Some(b'1'..=b'9') => self.eat_digits(),
            _ => return Err(self.err_at(ParseErrorKind::InvalidNumber, start)),
        }
        if self.peek() == Some(b'.') {
            self.pos += 1;
            if !matches!(self.peek(), Some(b'0'..=b'9')) {
                return Err(self.err_at(ParseErrorKind::InvalidNumber, start));
            }
            self.eat_digits();
        }
        if matches!(self.peek(), Some(b'e') | Some(b'E')) {
            self.pos += 1;
            if matches!(self.peek(), Some(b'+') | Some(b'-')) {
                self.pos += 1;
            }
            if !matches!(self.peek(), Some(b'0'..=b'9')) {
                return Err(self.err_at(ParseErrorKind::InvalidNumber, start));
            }
            self.eat_digits();
        }
        let text = &self.text[start.offset..self.pos];
        self.builder
            .create_number(text)
            .ok_or_else(|| self.err_at(ParseErrorKind::InvalidNumber, start))
    }

    fn eat_digits(&mut self) {
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
    }

    /// Read a quoted string body, resolving escapes.
    fn read_string(&mut self) -> Result<String, ParseError> {
        let open = self.mark();
        self.pos += 1; // opening quote
        let mut out = String::new();
        let mut seg_start = self.pos;
        loop {
            let Some(b) = self.peek() else {
                return Err(self.err_at(ParseErrorKind::UnterminatedString, open));
            };
            match b {
                b'"' => {
                    out.push_str(&self.text[seg_start..self.pos]);
                    self.pos += 1;
                    return Ok(out);
                }
                b'\\' => {
                    out.push_str(&self.text[seg_start..self.pos]);
                    let esc = self.mark();
                    self.pos += 1;
                    let resolved = self.read_escape(esc, open)?;
                    out.push(resolved);
                    seg_start = self.pos;
                }
                0x00..=0x1f => return Err(self.err(ParseErrorKind::UnexpectedChar)),
                _ => self.pos += 1,
            }
        }
    }

    fn read_escape(&mut self, esc: Mark, open: Mark) -> Result<char, ParseError> {
        let Some(b) = self.peek() else {
            return Err(self.err_at(ParseErrorKind::UnterminatedString, open));
        };
        self.pos += 1;
        Ok(match b {
            b'"' => '"',
            b'\\' => '\\',
            b'/' => '/',
            b'b' => '\u{08}',
            b'f' => '\u{0c}',
            b'n' => '\n',
            b'r' => '\r',
            b't' => '\t',
            b'u' => return self.read_unicode_escape(esc),
            _ => return Err(self.err_at(ParseErrorKind::InvalidEscape, esc)),
        })
    }

    fn read_unicode_escape(&mut self, esc: Mark) -> Result<char, ParseError> {
        let high = self.read_hex4(esc)?;
        let code = match high {
            0xd800..=0xdbff => {
                // surrogate pair: a low surrogate escape must follow
                if self.peek() != Some(b'\\') || self.data.get(self.pos + 1) != Some(&b'u') {
                    return Err(self.err_at(ParseErrorKind::InvalidEscape, esc));
                }
                self.pos += 2;
                let low = self.read_hex4(esc)?;
                if !(0xdc00..=0xdfff).contains(&low) {
                    return Err(self.err_at(ParseErrorKind::InvalidEscape, esc));
                }
                0x10000 + ((high - 0xd800) << 10) + (low - 0xdc00)
            }
            0xdc00..=0xdfff => return Err(self.err_at(ParseErrorKind::InvalidEscape, esc)),
            cp => cp,
        };
        char::from_u32(code).ok_or_else(|| self.err_at(ParseErrorKind::InvalidEscape, esc))
    }

    fn read_hex4(&mut self, esc: Mark) -> Result<u32, ParseError> {
        let end = self.pos + 4;
        if end > self.data.len() {
            return Err(self.err_at(ParseErrorKind::InvalidEscape, esc));
        }
        let mut code = 0u32;
        for i in self.pos..end {
            let digit = (self.data[i] as char)
                .to_digit(16)
                .ok_or_else(|| self.err_at(ParseErrorKind::InvalidEscape, esc))?;
            code = code * 16 + digit;
        }
        self.pos = end;
        Ok(code)
    }

    /// Read an unquoted identifier-like object key.
    fn read_ident_key(&mut self) -> Result<String, ParseError> {
        let start = self.pos;
        match self.peek() {
            Some(b) if b.is_ascii_alphabetic() || b == b'_' || b == b'$' => self.pos += 1,
            _ => return Err(self.err(ParseErrorKind::UnexpectedChar)),
        }
        while let Some(b) = self.peek() {
            if b.is_ascii_alphanumeric() || b == b'_' || b == b'$' {
                self.pos += 1;
            } else {
                break;
            }
        }
        Ok(self.text[start..self.pos].to_string())
    }

    fn parse_object(&mut self, depth: usize) -> Result<B::Value, ParseError> {
        if depth >= self.options.max_depth {
            return Err(self.err(ParseErrorKind::DepthExceeded));
        }
        self.pos += 1; // '{'
        let mut obj = self.builder.create_object();
        self.skip_trivia()?;
        if self.peek() == Some(b'}') {
            self.pos += 1;
            return Ok(self.builder.finish_object(obj));
        }
        loop {
            self.skip_trivia()?;
            let key_mark = self.mark();
            let key = match self.peek() {
                Some(b'"') => self.read_string()?,
                Some(_) if self.options.unquoted_keys() => self.read_ident_key()?,
                _ => return Err(self.err(ParseErrorKind::UnexpectedChar)),
            };
            self.skip_trivia()?;
            if self.peek() != Some(b':') {
                return Err(self.err(ParseErrorKind::UnexpectedChar));
            }
            self.pos += 1;
            self.skip_trivia()?;
            let value = self.parse_value(depth + 1)?;
            let duplicate = self.builder.put_key_value(&mut obj, &key, value);
            if duplicate && self.options.strict {
                return Err(self.err_at(ParseErrorKind::DuplicateKey, key_mark));
            }
            self.skip_trivia()?;
            match self.peek() {
                Some(b',') => {
                    self.pos += 1;
                    self.skip_trivia()?;
                    if self.peek() == Some(b'}') {
                        if self.options.trailing_commas() {
                            self.pos += 1;
                            return Ok(self.builder.finish_object(obj));
                        }
                        return Err(self.err(ParseErrorKind::UnexpectedChar));
                    }
                }
                Some(b'}') => {
                    self.pos += 1;
                    return Ok(self.builder.finish_object(obj));
                }
                _ => return Err(self.err(ParseErrorKind::UnexpectedChar)),
            }
        }
    }

    fn parse_array(&mut self, depth: usize) -> Result<B::Value, ParseError> {
        if depth >= self.options.max_depth {
            return Err(self.err(ParseErrorKind::DepthExceeded));
        }
        self.pos += 1; // '['
        let mut arr = self.builder.create_array();
        self.skip_trivia()?;
        if self.peek() == Some(b']') {
            self.pos += 1;
            return Ok(self.builder.finish_array(arr));
        }
        loop {
            self.skip_trivia()?;
            let element = self.parse_value(depth + 1)?;
            self.builder.put_element(&mut arr, element);
            self.skip_trivia()?;
            match self.peek() {
                Some(b',') => {
                    self.pos += 1;
                    self.skip_trivia()?;
                    if self.peek() == Some(b']') {
                        if self.options.trailing_commas() {
                            self.pos += 1;
                            return Ok(self.builder.finish_array(arr));
                        }
                        return Err(self.err(ParseErrorKind::UnexpectedChar));
                    }
                }
                Some(b']') => {
                    self.pos += 1;
                    return Ok(self.builder.finish_array(arr));
                }
                _ => return Err(self.err(ParseErrorKind::UnexpectedChar)),
            }
        }
    }
}
