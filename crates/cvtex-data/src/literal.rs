//! Literal evaluator
//!
//! Evaluates the `{...}` part of a record file into a [`Value`]. Only
//! literals are accepted: strings, numbers, `True`/`False`/`None`, lists,
//! tuples and mappings. Names, calls and operators other than a leading sign
//! on a number are rejected, so evaluating a record never runs anything.
//!
//! # Supported syntax
//!
//! - Strings in single, double or triple quotes, with optional `r`/`u`
//!   prefix and the usual backslash escapes
//! - Adjacent string literals, concatenated: `"a" "b"` is `"ab"`
//! - Integers (decimal, `0x`, `0o`, `0b`, `_` separators) and floats
//! - `[a, b]`, `(a, b)`, `(a,)`, `()` and `{k: v}`, trailing commas allowed
//! - `#` comments between tokens

use cvtex_ast::{Mapping, Value};

use crate::error::{DataError, Result};

/// Evaluate a literal expression
pub fn parse_literal(source: &str) -> Result<Value> {
    let mut parser = LiteralParser::new(source);
    parser.skip_trivia();
    let value = parser.parse_value()?;
    parser.skip_trivia();
    if !parser.at_end() {
        return Err(parser.error("unexpected content after literal"));
    }
    Ok(value)
}

/// Recursive-descent parser over the literal's characters
struct LiteralParser {
    chars: Vec<char>,
    pos: usize,
}

impl LiteralParser {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        Some(ch)
    }

    /// Build a syntax error at the current position
    fn error(&self, message: impl Into<String>) -> DataError {
        self.error_at(self.pos, message)
    }

    fn error_at(&self, pos: usize, message: impl Into<String>) -> DataError {
        let upto = &self.chars[..pos.min(self.chars.len())];
        let line = upto.iter().filter(|&&c| c == '\n').count() + 1;
        let column = upto.iter().rev().take_while(|&&c| c != '\n').count() + 1;
        DataError::Syntax {
            line,
            column,
            message: message.into(),
        }
    }

    /// Skip whitespace, line continuations and `#` comments
    fn skip_trivia(&mut self) {
        while let Some(ch) = self.peek() {
            match ch {
                ' ' | '\t' | '\n' | '\r' | '\x0c' => {
                    self.pos += 1;
                }
                '\\' if matches!(self.peek_at(1), Some('\n')) => {
                    self.pos += 2;
                }
                '#' => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.pos += 1;
                    }
                }
                _ => break,
            }
        }
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        match self.peek() {
            Some(ch) if ch == expected => {
                self.pos += 1;
                Ok(())
            }
            Some(ch) => Err(self.error(format!("expected '{}', found '{}'", expected, ch))),
            None => Err(self.error(format!("expected '{}', found end of input", expected))),
        }
    }

    fn parse_value(&mut self) -> Result<Value> {
        match self.peek() {
            None => Err(self.error("unexpected end of input")),
            Some('{') => self.parse_mapping(),
            Some('[') => self.parse_list(),
            Some('(') => self.parse_paren(),
            Some('-') | Some('+') => self.parse_signed(),
            Some(c) if c.is_ascii_digit() => self.parse_number(),
            Some('.') if matches!(self.peek_at(1), Some(d) if d.is_ascii_digit()) => {
                self.parse_number()
            }
            Some(_) if self.string_start().is_some() => self.parse_strings(),
            Some(c) if c.is_alphabetic() || c == '_' => self.parse_name(),
            Some(c) => Err(self.error(format!("unexpected character '{}'", c))),
        }
    }

    fn parse_mapping(&mut self) -> Result<Value> {
        self.expect('{')?;
        let mut mapping = Mapping::new();
        loop {
            self.skip_trivia();
            if self.peek() == Some('}') {
                self.pos += 1;
                break;
            }
            let key_pos = self.pos;
            let key = self.parse_value()?;
            self.skip_trivia();
            if self.peek() != Some(':') {
                return Err(self.error("expected ':' after mapping key (sets are not supported)"));
            }
            self.pos += 1;
            self.skip_trivia();
            let value = self.parse_value()?;
            mapping.insert(self.key_text(&key, key_pos)?, value);

            self.skip_trivia();
            match self.peek() {
                Some(',') => self.pos += 1,
                Some('}') => {
                    self.pos += 1;
                    break;
                }
                _ => return Err(self.error("expected ',' or '}' in mapping")),
            }
        }
        Ok(Value::Map(mapping))
    }

    /// Keys must be hashable; they are stored in their string form
    fn key_text(&self, key: &Value, pos: usize) -> Result<String> {
        match key {
            Value::List(_) | Value::Map(_) => {
                Err(self.error_at(pos, "unhashable mapping key"))
            }
            other => Ok(other.to_text()),
        }
    }

    fn parse_list(&mut self) -> Result<Value> {
        self.expect('[')?;
        let items = self.parse_items(']')?;
        Ok(Value::List(items))
    }

    /// `()` is an empty tuple, `(x)` is `x`, `(x,)` and `(x, y)` are tuples
    fn parse_paren(&mut self) -> Result<Value> {
        self.expect('(')?;
        self.skip_trivia();
        if self.peek() == Some(')') {
            self.pos += 1;
            return Ok(Value::Tuple(Vec::new()));
        }
        let first = self.parse_value()?;
        self.skip_trivia();
        match self.peek() {
            Some(')') => {
                self.pos += 1;
                Ok(first)
            }
            Some(',') => {
                self.pos += 1;
                let mut items = vec![first];
                items.extend(self.parse_items(')')?);
                Ok(Value::Tuple(items))
            }
            _ => Err(self.error("expected ',' or ')' in tuple")),
        }
    }

    /// Comma-separated values up to `close`, trailing comma allowed
    fn parse_items(&mut self, close: char) -> Result<Vec<Value>> {
        let mut items = Vec::new();
        loop {
            self.skip_trivia();
            if self.peek() == Some(close) {
                self.pos += 1;
                return Ok(items);
            }
            items.push(self.parse_value()?);
            self.skip_trivia();
            match self.peek() {
                Some(',') => self.pos += 1,
                Some(c) if c == close => {
                    self.pos += 1;
                    return Ok(items);
                }
                _ => return Err(self.error(format!("expected ',' or '{}'", close))),
            }
        }
    }

    fn parse_signed(&mut self) -> Result<Value> {
        let negative = self.bump() == Some('-');
        self.skip_trivia();
        let start = self.pos;
        match self.parse_value()? {
            Value::Int(i) => Ok(Value::Int(if negative { -i } else { i })),
            Value::Float(f) => Ok(Value::Float(if negative { -f } else { f })),
            _ => Err(self.error_at(start, "sign applied to a non-numeric literal")),
        }
    }

    fn parse_number(&mut self) -> Result<Value> {
        let start = self.pos;

        if self.peek() == Some('0') {
            let radix = match self.peek_at(1) {
                Some('x') | Some('X') => Some(16),
                Some('o') | Some('O') => Some(8),
                Some('b') | Some('B') => Some(2),
                _ => None,
            };
            if let Some(radix) = radix {
                self.pos += 2;
                let digits = self.take_while(|c| c.is_ascii_alphanumeric() || c == '_');
                let digits: String = digits.chars().filter(|&c| c != '_').collect();
                return i64::from_str_radix(&digits, radix)
                    .map(Value::Int)
                    .map_err(|_| self.error_at(start, "invalid integer literal"));
            }
        }

        let mut text = self.take_while(|c| c.is_ascii_digit() || c == '_');
        let mut is_float = false;

        if self.peek() == Some('.') {
            is_float = true;
            self.pos += 1;
            text.push('.');
            text.push_str(&self.take_while(|c| c.is_ascii_digit() || c == '_'));
        }

        if matches!(self.peek(), Some('e') | Some('E')) {
            let save = self.pos;
            let mut exponent = String::from("e");
            self.pos += 1;
            if let Some(sign @ ('+' | '-')) = self.peek() {
                exponent.push(sign);
                self.pos += 1;
            }
            let digits = self.take_while(|c| c.is_ascii_digit() || c == '_');
            if digits.is_empty() {
                self.pos = save;
            } else {
                is_float = true;
                text.push_str(&exponent);
                text.push_str(&digits);
            }
        }

        if matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
            return Err(self.error("invalid numeric literal"));
        }

        let text: String = text.chars().filter(|&c| c != '_').collect();
        if is_float {
            text.parse::<f64>()
                .map(Value::Float)
                .map_err(|_| self.error_at(start, "invalid float literal"))
        } else {
            text.parse::<i64>()
                .map(Value::Int)
                .map_err(|_| self.error_at(start, "integer literal out of range"))
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut out = String::new();
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            out.push(ch);
            self.pos += 1;
        }
        out
    }

    fn parse_name(&mut self) -> Result<Value> {
        let start = self.pos;
        let name = self.take_while(|c| c.is_alphanumeric() || c == '_');
        match name.as_str() {
            "True" => Ok(Value::Bool(true)),
            "False" => Ok(Value::Bool(false)),
            "None" => Ok(Value::None),
            other => Err(self.error_at(start, format!("names are not literals: '{}'", other))),
        }
    }

    /// If a string literal starts here, return (prefix length, is_raw)
    fn string_start(&self) -> Option<(usize, bool)> {
        let mut len = 0;
        let mut raw = false;
        while let Some(c) = self.peek_at(len) {
            match c {
                'r' | 'R' if !raw => raw = true,
                'u' | 'U' if len == 0 => {}
                '"' | '\'' => return Some((len, raw)),
                _ => return None,
            }
            len += 1;
            if len > 2 {
                return None;
            }
        }
        None
    }

    /// One or more adjacent string literals, concatenated
    fn parse_strings(&mut self) -> Result<Value> {
        let mut out = String::new();
        while let Some((prefix_len, raw)) = self.string_start() {
            self.pos += prefix_len;
            out.push_str(&self.parse_string(raw)?);
            self.skip_trivia();
        }
        Ok(Value::Str(out))
    }

    fn parse_string(&mut self, raw: bool) -> Result<String> {
        let start = self.pos;
        let quote = self.bump().ok_or_else(|| self.error("expected string"))?;
        let triple = self.peek() == Some(quote) && self.peek_at(1) == Some(quote);
        if triple {
            self.pos += 2;
        }

        let mut out = String::new();
        loop {
            let ch = match self.bump() {
                Some(ch) => ch,
                None => return Err(self.error_at(start, "unterminated string literal")),
            };

            if ch == quote {
                if !triple {
                    return Ok(out);
                }
                if self.peek() == Some(quote) && self.peek_at(1) == Some(quote) {
                    self.pos += 2;
                    return Ok(out);
                }
                out.push(ch);
                continue;
            }

            match ch {
                '\n' if !triple => {
                    return Err(self.error_at(start, "unterminated string literal"));
                }
                '\\' if raw => {
                    out.push('\\');
                    if let Some(next) = self.bump() {
                        out.push(next);
                    }
                }
                '\\' => self.parse_escape(&mut out)?,
                other => out.push(other),
            }
        }
    }

    fn parse_escape(&mut self, out: &mut String) -> Result<()> {
        let esc_pos = self.pos - 1;
        let ch = match self.bump() {
            Some(ch) => ch,
            None => return Err(self.error_at(esc_pos, "unterminated string literal")),
        };
        match ch {
            '\n' => {}
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'a' => out.push('\x07'),
            'b' => out.push('\x08'),
            'f' => out.push('\x0c'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\x0b'),
            '0'..='7' => {
                let mut digits = String::from(ch);
                while digits.len() < 3 {
                    match self.peek() {
                        Some(d @ '0'..='7') => {
                            digits.push(d);
                            self.pos += 1;
                        }
                        _ => break,
                    }
                }
                let code = u32::from_str_radix(&digits, 8)
                    .map_err(|_| self.error_at(esc_pos, "invalid octal escape"))?;
                out.push(self.code_point(code, esc_pos)?);
            }
            'x' => out.push(self.hex_escape(2, esc_pos)?),
            'u' => out.push(self.hex_escape(4, esc_pos)?),
            'U' => out.push(self.hex_escape(8, esc_pos)?),
            other => {
                out.push('\\');
                out.push(other);
            }
        }
        Ok(())
    }

    fn hex_escape(&mut self, width: usize, esc_pos: usize) -> Result<char> {
        let mut digits = String::with_capacity(width);
        for _ in 0..width {
            match self.peek() {
                Some(d) if d.is_ascii_hexdigit() => {
                    digits.push(d);
                    self.pos += 1;
                }
                _ => return Err(self.error_at(esc_pos, "truncated escape sequence")),
            }
        }
        let code = u32::from_str_radix(&digits, 16)
            .map_err(|_| self.error_at(esc_pos, "invalid escape sequence"))?;
        self.code_point(code, esc_pos)
    }

    fn code_point(&self, code: u32, esc_pos: usize) -> Result<char> {
        char::from_u32(code).ok_or_else(|| self.error_at(esc_pos, "invalid code point"))
    }
}
