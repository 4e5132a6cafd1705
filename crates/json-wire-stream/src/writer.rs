//! `JsonWriter` — mirrored streaming JSON emitter.
//!
//! Writes UTF-8 JSON into a single output buffer. A context stack inserts
//! `,` and `:` automatically and validates that names and values alternate
//! correctly inside objects, that only open containers are closed, and
//! that the document holds exactly one top-level value.

use crate::StreamError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameKind {
    Document,
    Array,
    Object,
}

#[derive(Debug)]
struct Frame {
    kind: FrameKind,
    count: usize,
    /// Inside an object: a name has been written and its value is pending.
    value_due: bool,
}

pub struct JsonWriter {
    out: Vec<u8>,
    stack: Vec<Frame>,
}

impl Default for JsonWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonWriter {
    pub fn new() -> Self {
        Self {
            out: Vec::new(),
            stack: vec![Frame {
                kind: FrameKind::Document,
                count: 0,
                value_due: false,
            }],
        }
    }

    pub fn begin_object(&mut self) -> Result<(), StreamError> {
        self.before_value()?;
        self.out.push(b'{');
        self.stack.push(Frame {
            kind: FrameKind::Object,
            count: 0,
            value_due: false,
        });
        Ok(())
    }

    pub fn end_object(&mut self) -> Result<(), StreamError> {
        match self.stack.last() {
            Some(f) if f.kind == FrameKind::Object => {
                if f.value_due {
                    return Err(StreamError::Misplaced("dangling name in object"));
                }
            }
            _ => return Err(StreamError::Misplaced("no open object to close")),
        }
        self.out.push(b'}');
        self.stack.pop();
        self.value_done();
        Ok(())
    }

    pub fn begin_array(&mut self) -> Result<(), StreamError> {
        self.before_value()?;
        self.out.push(b'[');
        self.stack.push(Frame {
            kind: FrameKind::Array,
            count: 0,
            value_due: false,
        });
        Ok(())
    }

    pub fn end_array(&mut self) -> Result<(), StreamError> {
        match self.stack.last() {
            Some(f) if f.kind == FrameKind::Array => {}
            _ => return Err(StreamError::Misplaced("no open array to close")),
        }
        self.out.push(b']');
        self.stack.pop();
        self.value_done();
        Ok(())
    }

    /// Write an object entry name and its `:`.
    pub fn name(&mut self, name: &str) -> Result<(), StreamError> {
        match self.stack.last() {
            Some(f) if f.kind == FrameKind::Object && !f.value_due => {
                if f.count > 0 {
                    self.out.push(b',');
                }
            }
            Some(f) if f.kind == FrameKind::Object => {
                return Err(StreamError::Misplaced("name written where a value is due"));
            }
            _ => return Err(StreamError::Misplaced("name written outside an object")),
        }
        self.write_escaped(name);
        self.out.push(b':');
        if let Some(f) = self.stack.last_mut() {
            f.value_due = true;
        }
        Ok(())
    }

    pub fn string(&mut self, s: &str) -> Result<(), StreamError> {
        self.before_value()?;
        self.write_escaped(s);
        self.value_done();
        Ok(())
    }

    pub fn boolean(&mut self, b: bool) -> Result<(), StreamError> {
        self.before_value()?;
        self.out
            .extend_from_slice(if b { b"true" } else { b"false" });
        self.value_done();
        Ok(())
    }

    pub fn null(&mut self) -> Result<(), StreamError> {
        self.before_value()?;
        self.out.extend_from_slice(b"null");
        self.value_done();
        Ok(())
    }

    pub fn int(&mut self, i: i64) -> Result<(), StreamError> {
        self.before_value()?;
        self.out.extend_from_slice(i.to_string().as_bytes());
        self.value_done();
        Ok(())
    }

    pub fn uint(&mut self, u: u64) -> Result<(), StreamError> {
        self.before_value()?;
        self.out.extend_from_slice(u.to_string().as_bytes());
        self.value_done();
        Ok(())
    }

    pub fn float(&mut self, f: f64) -> Result<(), StreamError> {
        self.before_value()?;
        self.out.extend_from_slice(format_float(f).as_bytes());
        self.value_done();
        Ok(())
    }

    /// Finish the document, validating that exactly one complete value was
    /// written, and return it as a string.
    pub fn finish(mut self) -> Result<String, StreamError> {
        match self.stack.pop() {
            Some(f) if f.kind == FrameKind::Document && f.count == 1 => {}
            Some(f) if f.kind == FrameKind::Document => {
                return Err(StreamError::Misplaced("document has no value"));
            }
            _ => return Err(StreamError::Misplaced("unclosed container")),
        }
        // The writer only ever appends valid UTF-8.
        String::from_utf8(self.out).map_err(|_| StreamError::InvalidUtf8(0))
    }

    fn before_value(&mut self) -> Result<(), StreamError> {
        match self.stack.last() {
            Some(f) => match f.kind {
                FrameKind::Document => {
                    if f.count > 0 {
                        return Err(StreamError::Misplaced(
                            "document may hold only one top-level value",
                        ));
                    }
                }
                FrameKind::Array => {
                    if f.count > 0 {
                        self.out.push(b',');
                    }
                }
                FrameKind::Object => {
                    if !f.value_due {
                        return Err(StreamError::Misplaced("value written where a name is due"));
                    }
                }
            },
            None => return Err(StreamError::Misplaced("document already complete")),
        }
        Ok(())
    }

    fn value_done(&mut self) {
        if let Some(f) = self.stack.last_mut() {
            f.count += 1;
            if f.kind == FrameKind::Object {
                f.value_due = false;
            }
        }
    }

    /// Write a JSON-encoded string (with escaping).
    fn write_escaped(&mut self, s: &str) {
        let bytes = s.as_bytes();

        // Fast path: printable ASCII, no quotes or backslash
        let mut has_special = false;
        for &b in bytes {
            if b < 32 || b > 126 || b == b'"' || b == b'\\' {
                has_special = true;
                break;
            }
        }
        if !has_special {
            self.out.reserve(bytes.len() + 2);
            self.out.push(b'"');
            self.out.extend_from_slice(bytes);
            self.out.push(b'"');
            return;
        }

        // Fall back to serde_json for proper escaping
        let json_str = serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string());
        self.out.extend_from_slice(json_str.as_bytes());
    }
}

/// Render a float so that it re-reads as a float: integral finite values
/// keep a `.0` suffix, non-finite values degrade to null.
fn format_float(f: f64) -> String {
    if f.is_nan() || f.is_infinite() {
        "null".to_string()
    } else if f.fract() == 0.0 {
        format!("{f:.1}")
    } else {
        format!("{f}")
    }
}
