//! `.npy` header framing and the header dictionary grammar.
//!
//! The header text is a structured-but-informal Python dict literal. It is
//! parsed with a dedicated small grammar (key: string, value: string, bool,
//! or tuple of non-negative integers) rather than a general-purpose
//! evaluator, so nothing outside that closed set can be accepted.

use std::io::Read;

use crate::error::{Result, VertexIoError};

/// Magic bytes identifying the container format.
pub const NPY_MAGIC: [u8; 6] = *b"\x93NUMPY";

/// The three required header fields.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderFields {
    /// Dtype descriptor string, e.g. `<f8`.
    pub descr: String,
    /// Column-major flag; `true` is rejected downstream.
    pub fortran_order: bool,
    /// Array shape. Empty means a single scalar element.
    pub shape: Vec<usize>,
}

fn read_or_not_npy<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<()> {
    reader.read_exact(buf).map_err(|e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            VertexIoError::NotNpy
        } else {
            VertexIoError::Io(e)
        }
    })
}

fn read_or_header_eof<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<()> {
    reader.read_exact(buf).map_err(|e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            VertexIoError::Header {
                message: "unexpected EOF while reading header".to_string(),
            }
        } else {
            VertexIoError::Io(e)
        }
    })
}

/// Read the magic, version, header-length field, and header text, returning
/// the parsed header fields. Leaves the reader positioned at the payload.
pub fn read_header<R: Read>(reader: &mut R) -> Result<HeaderFields> {
    let mut magic = [0u8; 6];
    read_or_not_npy(reader, &mut magic)?;
    if magic != NPY_MAGIC {
        return Err(VertexIoError::NotNpy);
    }

    let mut version = [0u8; 2];
    read_or_header_eof(reader, &mut version)?;
    let (major, minor) = (version[0], version[1]);

    let header_len = match (major, minor) {
        (1, 0) => {
            let mut len = [0u8; 2];
            read_or_header_eof(reader, &mut len)?;
            u16::from_le_bytes(len) as usize
        }
        (2, 0) | (3, 0) => {
            let mut len = [0u8; 4];
            read_or_header_eof(reader, &mut len)?;
            u32::from_le_bytes(len) as usize
        }
        _ => return Err(VertexIoError::UnsupportedVersion { major, minor }),
    };

    let mut header_bytes = vec![0u8; header_len];
    read_or_header_eof(reader, &mut header_bytes)?;

    // Latin-1: every byte is one char, never multi-byte.
    let header_text: String = header_bytes.iter().map(|&b| b as char).collect();
    parse_header_dict(&header_text)
}

/// One parsed header value.
#[derive(Debug, Clone, PartialEq)]
enum HeaderValue {
    Str(String),
    Bool(bool),
    Tuple(Vec<usize>),
}

struct Scanner<'a> {
    chars: Vec<char>,
    pos: usize,
    src: &'a str,
}

impl<'a> Scanner<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            chars: src.chars().collect(),
            pos: 0,
            src,
        }
    }

    fn err(&self, message: impl Into<String>) -> VertexIoError {
        VertexIoError::Header {
            message: format!("{} (at offset {} in {:?})", message.into(), self.pos, self.src.trim_end()),
        }
    }

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

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, c: char) -> Result<()> {
        self.skip_ws();
        match self.bump() {
            Some(got) if got == c => Ok(()),
            Some(got) => Err(self.err(format!("expected {:?}, found {:?}", c, got))),
            None => Err(self.err(format!("expected {:?}, found end of header", c))),
        }
    }

    fn eat(&mut self, c: char) -> bool {
        self.skip_ws();
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn parse_quoted(&mut self) -> Result<String> {
        self.skip_ws();
        let quote = match self.bump() {
            Some(q @ ('\'' | '"')) => q,
            other => return Err(self.err(format!("expected quoted string, found {:?}", other))),
        };
        let mut out = String::new();
        loop {
            match self.bump() {
                Some(c) if c == quote => return Ok(out),
                Some(c) => out.push(c),
                None => return Err(self.err("unterminated string")),
            }
        }
    }

    fn parse_uint(&mut self) -> Result<usize> {
        self.skip_ws();
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.err("expected a non-negative integer"));
        }
        let digits: String = self.chars[start..self.pos].iter().collect();
        digits
            .parse::<usize>()
            .map_err(|_| self.err(format!("integer out of range: {}", digits)))
    }

    fn parse_value(&mut self) -> Result<HeaderValue> {
        self.skip_ws();
        match self.peek() {
            Some('\'' | '"') => Ok(HeaderValue::Str(self.parse_quoted()?)),
            Some('(') => {
                self.bump();
                let mut items = Vec::new();
                loop {
                    self.skip_ws();
                    if self.eat(')') {
                        break;
                    }
                    items.push(self.parse_uint()?);
                    self.skip_ws();
                    if !self.eat(',') {
                        self.expect(')')?;
                        break;
                    }
                }
                Ok(HeaderValue::Tuple(items))
            }
            Some('T' | 'F') => {
                let rest: String = self.chars[self.pos..].iter().collect();
                if rest.starts_with("True") {
                    self.pos += 4;
                    Ok(HeaderValue::Bool(true))
                } else if rest.starts_with("False") {
                    self.pos += 5;
                    Ok(HeaderValue::Bool(false))
                } else {
                    Err(self.err("expected True or False"))
                }
            }
            other => Err(self.err(format!("unsupported value starting with {:?}", other))),
        }
    }
}

/// Parse the header dict text into its three required fields.
///
/// Unknown keys are tolerated as long as their values fit the closed
/// grammar; missing or ill-typed required keys are errors.
pub(crate) fn parse_header_dict(text: &str) -> Result<HeaderFields> {
    let mut s = Scanner::new(text);

    let mut descr: Option<String> = None;
    let mut fortran_order: Option<bool> = None;
    let mut shape: Option<Vec<usize>> = None;

    s.expect('{')?;
    loop {
        s.skip_ws();
        if s.eat('}') {
            break;
        }
        let key = s.parse_quoted()?;
        s.expect(':')?;
        let value = s.parse_value()?;

        match (key.as_str(), value) {
            ("descr", HeaderValue::Str(v)) => descr = Some(v),
            ("fortran_order", HeaderValue::Bool(v)) => fortran_order = Some(v),
            ("shape", HeaderValue::Tuple(v)) => shape = Some(v),
            ("descr" | "fortran_order" | "shape", other) => {
                return Err(s.err(format!("wrong type for key {:?}: {:?}", key, other)))
            }
            // Unknown key with a well-formed value: ignored.
            (_, _) => {}
        }

        if !s.eat(',') {
            s.expect('}')?;
            break;
        }
    }

    // Only padding may follow the closing brace.
    s.skip_ws();
    if s.peek().is_some() {
        return Err(s.err("trailing content after header dict"));
    }

    Ok(HeaderFields {
        descr: descr.ok_or_else(|| VertexIoError::Header {
            message: "missing required key 'descr'".to_string(),
        })?,
        fortran_order: fortran_order.ok_or_else(|| VertexIoError::Header {
            message: "missing required key 'fortran_order'".to_string(),
        })?,
        shape: shape.ok_or_else(|| VertexIoError::Header {
            message: "missing required key 'shape'".to_string(),
        })?,
    })
}
