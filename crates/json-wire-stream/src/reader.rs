//! `JsonReader` — forward-only JSON tokenizer.
//!
//! The reader walks a byte slice with a single cursor and a stack of
//! structural frames. `peek` reports the kind of the next token without
//! consuming it; every `next_*` read consumes exactly one token and keeps
//! the frame stack consistent, so a structurally misplaced call (a value
//! read where a name is due, `end_object` with entries remaining) fails
//! instead of silently desynchronizing the parse.

use crate::StreamError;

/// Kind of the next token in the document, as reported by [`JsonReader::peek`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonType {
    BeginObject,
    EndObject,
    BeginArray,
    EndArray,
    /// An object entry name. Only reported directly inside an object,
    /// before the entry's value.
    Name,
    String,
    Number,
    Boolean,
    Null,
    /// The end of the document, after the single top-level value.
    End,
}

/// Lossless intermediate representation of a JSON number.
///
/// The reader classifies but never narrows; narrowing to a requested
/// integral or floating width is the caller's business.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JsonNumber {
    /// Signed integer (no fraction, no exponent, fits in i64).
    Int(i64),
    /// Unsigned integer above `i64::MAX`.
    UInt(u64),
    /// Anything with a fraction or exponent, or beyond u64 range.
    Float(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameKind {
    Document,
    Array,
    Object,
}

#[derive(Debug)]
struct Frame {
    kind: FrameKind,
    /// Completed values (or entries) in this frame, for separator logic.
    count: usize,
    /// Inside an object: true when an entry name (or `}`) is due next.
    name_due: bool,
}

pub struct JsonReader<'a> {
    data: &'a [u8],
    x: usize,
    stack: Vec<Frame>,
    peeked: Option<JsonType>,
}

impl<'a> JsonReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            x: 0,
            stack: vec![Frame {
                kind: FrameKind::Document,
                count: 0,
                name_due: false,
            }],
            peeked: None,
        }
    }

    /// Byte offset of the cursor, for error reporting.
    pub fn offset(&self) -> usize {
        self.x
    }

    /// Report the kind of the next token without consuming it.
    ///
    /// Idempotent: whitespace and structural separators may be consumed
    /// while peeking, but the result is cached until the token itself is
    /// consumed by a read.
    pub fn peek(&mut self) -> Result<JsonType, StreamError> {
        if let Some(t) = self.peeked {
            return Ok(t);
        }
        let t = self.advance_to_token()?;
        self.peeked = Some(t);
        Ok(t)
    }

    pub fn begin_object(&mut self) -> Result<(), StreamError> {
        self.expect(JsonType::BeginObject, "'{'")?;
        self.x += 1;
        self.stack.push(Frame {
            kind: FrameKind::Object,
            count: 0,
            name_due: true,
        });
        Ok(())
    }

    pub fn end_object(&mut self) -> Result<(), StreamError> {
        self.expect(JsonType::EndObject, "'}'")?;
        self.x += 1;
        self.stack.pop();
        self.value_done();
        Ok(())
    }

    pub fn begin_array(&mut self) -> Result<(), StreamError> {
        self.expect(JsonType::BeginArray, "'['")?;
        self.x += 1;
        self.stack.push(Frame {
            kind: FrameKind::Array,
            count: 0,
            name_due: false,
        });
        Ok(())
    }

    pub fn end_array(&mut self) -> Result<(), StreamError> {
        self.expect(JsonType::EndArray, "']'")?;
        self.x += 1;
        self.stack.pop();
        self.value_done();
        Ok(())
    }

    /// Read the next object entry name and its trailing `:`.
    pub fn next_name(&mut self) -> Result<String, StreamError> {
        self.expect(JsonType::Name, "name")?;
        let name = self.read_string_body()?;
        self.skip_whitespace();
        if self.x >= self.data.len() {
            return Err(StreamError::Eof(self.x));
        }
        if self.data[self.x] != b':' {
            return Err(StreamError::Syntax(self.x));
        }
        self.x += 1;
        if let Some(frame) = self.stack.last_mut() {
            frame.name_due = false;
        }
        Ok(name)
    }

    pub fn next_string(&mut self) -> Result<String, StreamError> {
        self.expect(JsonType::String, "string")?;
        let s = self.read_string_body()?;
        self.value_done();
        Ok(s)
    }

    pub fn next_boolean(&mut self) -> Result<bool, StreamError> {
        self.expect(JsonType::Boolean, "boolean")?;
        let b = if self.literal(b"true") {
            true
        } else if self.literal(b"false") {
            false
        } else {
            return Err(StreamError::Syntax(self.x));
        };
        self.value_done();
        Ok(b)
    }

    pub fn next_null(&mut self) -> Result<(), StreamError> {
        self.expect(JsonType::Null, "null")?;
        if !self.literal(b"null") {
            return Err(StreamError::Syntax(self.x));
        }
        self.value_done();
        Ok(())
    }

    /// Read one number into its lossless intermediate form.
    pub fn next_number(&mut self) -> Result<JsonNumber, StreamError> {
        self.expect(JsonType::Number, "number")?;
        let start = self.x;
        let data = self.data;
        let len = data.len();
        let mut x = self.x;

        // Sign, digits, fraction, exponent. Strict JSON grammar: the
        // integer part is one digit or a nonzero digit followed by more,
        // and a fraction or exponent marker must be followed by a digit.
        if x < len && data[x] == b'-' {
            x += 1;
        }
        if x >= len || !data[x].is_ascii_digit() {
            return Err(StreamError::Syntax(x));
        }
        if data[x] == b'0' {
            x += 1;
            if x < len && data[x].is_ascii_digit() {
                return Err(StreamError::Syntax(x));
            }
        } else {
            while x < len && data[x].is_ascii_digit() {
                x += 1;
            }
        }
        let mut is_float = false;
        if x < len && data[x] == b'.' {
            is_float = true;
            x += 1;
            if x >= len || !data[x].is_ascii_digit() {
                return Err(StreamError::Syntax(x));
            }
            while x < len && data[x].is_ascii_digit() {
                x += 1;
            }
        }
        if x < len && (data[x] == b'e' || data[x] == b'E') {
            is_float = true;
            x += 1;
            if x < len && (data[x] == b'+' || data[x] == b'-') {
                x += 1;
            }
            if x >= len || !data[x].is_ascii_digit() {
                return Err(StreamError::Syntax(x));
            }
            while x < len && data[x].is_ascii_digit() {
                x += 1;
            }
        }
        self.x = x;

        let s = std::str::from_utf8(&data[start..x])
            .map_err(|_| StreamError::InvalidUtf8(start))?;
        let num = if is_float {
            let f: f64 = s.parse().map_err(|_| StreamError::Syntax(start))?;
            JsonNumber::Float(f)
        } else if let Ok(i) = s.parse::<i64>() {
            JsonNumber::Int(i)
        } else if let Ok(u) = s.parse::<u64>() {
            JsonNumber::UInt(u)
        } else {
            let f: f64 = s.parse().map_err(|_| StreamError::Syntax(start))?;
            JsonNumber::Float(f)
        };
        self.value_done();
        Ok(num)
    }

    /// Consume exactly one value of any shape, discarding it.
    pub fn skip_value(&mut self) -> Result<(), StreamError> {
        match self.peek()? {
            JsonType::Null => {
                self.next_null()?;
            }
            JsonType::Boolean => {
                self.next_boolean()?;
            }
            JsonType::Number => {
                self.next_number()?;
            }
            JsonType::String => {
                self.next_string()?;
            }
            JsonType::BeginArray => {
                self.begin_array()?;
                while self.peek()? != JsonType::EndArray {
                    self.skip_value()?;
                }
                self.end_array()?;
            }
            JsonType::BeginObject => {
                self.begin_object()?;
                while self.peek()? != JsonType::EndObject {
                    self.next_name()?;
                    self.skip_value()?;
                }
                self.end_object()?;
            }
            JsonType::Name | JsonType::EndObject | JsonType::EndArray | JsonType::End => {
                return Err(StreamError::Expected {
                    expected: "value",
                    offset: self.x,
                });
            }
        }
        Ok(())
    }

    /// Verify that nothing but whitespace follows the document.
    pub fn expect_end(&mut self) -> Result<(), StreamError> {
        match self.peek()? {
            JsonType::End => Ok(()),
            _ => Err(StreamError::Expected {
                expected: "end of document",
                offset: self.x,
            }),
        }
    }

    fn expect(&mut self, want: JsonType, what: &'static str) -> Result<(), StreamError> {
        if self.peek()? != want {
            return Err(StreamError::Expected {
                expected: what,
                offset: self.x,
            });
        }
        self.peeked = None;
        Ok(())
    }

    /// Skip whitespace and separators as allowed by the current frame,
    /// then classify the next token.
    fn advance_to_token(&mut self) -> Result<JsonType, StreamError> {
        self.skip_whitespace();
        let (kind, count, name_due) = match self.stack.last() {
            Some(f) => (f.kind, f.count, f.name_due),
            None => return Err(StreamError::Misplaced("document already complete")),
        };
        let len = self.data.len();
        match kind {
            FrameKind::Document => {
                if count > 0 {
                    if self.x >= len {
                        Ok(JsonType::End)
                    } else {
                        Err(StreamError::Syntax(self.x))
                    }
                } else if self.x >= len {
                    Err(StreamError::Eof(self.x))
                } else {
                    self.value_kind()
                }
            }
            FrameKind::Array => {
                if self.x >= len {
                    return Err(StreamError::Eof(self.x));
                }
                if self.data[self.x] == b']' {
                    return Ok(JsonType::EndArray);
                }
                if count > 0 {
                    if self.data[self.x] != b',' {
                        return Err(StreamError::Syntax(self.x));
                    }
                    self.x += 1;
                    self.skip_whitespace();
                    if self.x >= len {
                        return Err(StreamError::Eof(self.x));
                    }
                    // No trailing comma before ']'.
                    if self.data[self.x] == b']' {
                        return Err(StreamError::Syntax(self.x));
                    }
                }
                self.value_kind()
            }
            FrameKind::Object => {
                if self.x >= len {
                    return Err(StreamError::Eof(self.x));
                }
                if name_due {
                    if self.data[self.x] == b'}' {
                        return Ok(JsonType::EndObject);
                    }
                    if count > 0 {
                        if self.data[self.x] != b',' {
                            return Err(StreamError::Syntax(self.x));
                        }
                        self.x += 1;
                        self.skip_whitespace();
                        if self.x >= len {
                            return Err(StreamError::Eof(self.x));
                        }
                        if self.data[self.x] == b'}' {
                            return Err(StreamError::Syntax(self.x));
                        }
                    }
                    if self.data[self.x] == b'"' {
                        Ok(JsonType::Name)
                    } else {
                        Err(StreamError::Syntax(self.x))
                    }
                } else {
                    self.value_kind()
                }
            }
        }
    }

    fn value_kind(&self) -> Result<JsonType, StreamError> {
        match self.data[self.x] {
            b'{' => Ok(JsonType::BeginObject),
            b'[' => Ok(JsonType::BeginArray),
            b'"' => Ok(JsonType::String),
            b't' | b'f' => Ok(JsonType::Boolean),
            b'n' => Ok(JsonType::Null),
            c if c.is_ascii_digit() || c == b'-' => Ok(JsonType::Number),
            _ => Err(StreamError::Syntax(self.x)),
        }
    }

    /// Bookkeeping after one complete value in the current frame.
    fn value_done(&mut self) {
        if let Some(frame) = self.stack.last_mut() {
            frame.count += 1;
            if frame.kind == FrameKind::Object {
                frame.name_due = true;
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while self.x < self.data.len() {
            match self.data[self.x] {
                b' ' | b'\t' | b'\n' | b'\r' => self.x += 1,
                _ => break,
            }
        }
    }

    fn literal(&mut self, lit: &'static [u8]) -> bool {
        if self.x + lit.len() > self.data.len() || &self.data[self.x..self.x + lit.len()] != lit {
            return false;
        }
        self.x += lit.len();
        true
    }

    /// Read a quoted string starting at the cursor, returning its decoded
    /// body. The cursor ends just past the closing quote.
    fn read_string_body(&mut self) -> Result<String, StreamError> {
        let data = self.data;
        if self.x >= data.len() || data[self.x] != b'"' {
            return Err(StreamError::Syntax(self.x));
        }
        self.x += 1;
        let start = self.x;
        let mut i = start;
        loop {
            if i >= data.len() {
                return Err(StreamError::Eof(i));
            }
            match data[i] {
                b'"' => break,
                b'\\' => i += 2,
                _ => i += 1,
            }
        }
        let s = decode_string_body(&data[start..i], start)?;
        self.x = i + 1;
        Ok(s)
    }
}

/// Decode a JSON string body (between the quotes) handling escape
/// sequences. Uses serde_json for correct unescaping when needed.
fn decode_string_body(bytes: &[u8], offset: usize) -> Result<String, StreamError> {
    // Fast path: no backslash
    if !bytes.contains(&b'\\') {
        return std::str::from_utf8(bytes)
            .map(|s| s.to_string())
            .map_err(|_| StreamError::InvalidUtf8(offset));
    }
    let mut quoted = Vec::with_capacity(bytes.len() + 2);
    quoted.push(b'"');
    quoted.extend_from_slice(bytes);
    quoted.push(b'"');
    let s: String =
        serde_json::from_slice(&quoted).map_err(|_| StreamError::Syntax(offset))?;
    Ok(s)
}
