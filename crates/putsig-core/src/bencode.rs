//! Canonical bencode.
//!
//! Encoding is deterministic:
//! - Integers are `i<decimal>e` with no leading zeros and no `-0`
//! - Byte strings are `<len>:<bytes>`
//! - Dictionary keys are byte strings sorted by raw byte comparison
//!
//! The decoder is strict and accepts only canonical input, so
//! `encode(decode(b)?) == b` for every accepted `b`.

use crate::error::DecodeError;

/// Maximum nesting depth accepted by [`decode`].
pub const MAX_DEPTH: usize = 64;

/// A bencode value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Integer(i128),
    Bytes(Vec<u8>),
    List(Vec<Value>),
    /// Entries in any order; the encoder sorts them.
    Dict(Vec<(Vec<u8>, Value)>),
}

impl Value {
    /// The integer, if this is one.
    pub fn as_integer(&self) -> Option<i128> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// The byte string, if this is one.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Look up a dictionary entry by key.
    pub fn get(&self, key: &[u8]) -> Option<&Value> {
        match self {
            Value::Dict(entries) => entries
                .iter()
                .find(|(k, _)| k.as_slice() == key)
                .map(|(_, v)| v),
            _ => None,
        }
    }
}

/// Encode a value to canonical bencode.
pub fn encode(value: &Value) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_value_to(&mut buf, value);
    buf
}

/// Encode the sorted key/value pairs of a dictionary without the enclosing
/// `d` and `e` markers.
pub fn encode_dict_body(entries: &[(Vec<u8>, Value)]) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_pairs_sorted(&mut buf, entries);
    buf
}

/// Recursively encode a value.
fn encode_value_to(buf: &mut Vec<u8>, value: &Value) {
    match value {
        Value::Integer(i) => encode_integer(buf, *i),
        Value::Bytes(b) => encode_bytes(buf, b),
        Value::List(items) => {
            buf.push(b'l');
            for item in items {
                encode_value_to(buf, item);
            }
            buf.push(b'e');
        }
        Value::Dict(entries) => {
            buf.push(b'd');
            encode_pairs_sorted(buf, entries);
            buf.push(b'e');
        }
    }
}

fn encode_integer(buf: &mut Vec<u8>, i: i128) {
    buf.push(b'i');
    buf.extend_from_slice(i.to_string().as_bytes());
    buf.push(b'e');
}

fn encode_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    buf.extend_from_slice(bytes.len().to_string().as_bytes());
    buf.push(b':');
    buf.extend_from_slice(bytes);
}

/// Write `key value` pairs ordered by raw key bytes.
fn encode_pairs_sorted(buf: &mut Vec<u8>, entries: &[(Vec<u8>, Value)]) {
    let mut sorted: Vec<&(Vec<u8>, Value)> = entries.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));

    for (key, value) in sorted {
        encode_bytes(buf, key);
        encode_value_to(buf, value);
    }
}

/// Decode a single canonical bencode value spanning all of `input`.
pub fn decode(input: &[u8]) -> Result<Value, DecodeError> {
    let mut decoder = Decoder { input, pos: 0 };
    let value = decoder.value(0)?;
    if decoder.pos != input.len() {
        return Err(DecodeError::TrailingBytes(input.len() - decoder.pos));
    }
    Ok(value)
}

struct Decoder<'a> {
    input: &'a [u8],
    pos: usize,
}

impl Decoder<'_> {
    fn peek(&self) -> Result<u8, DecodeError> {
        self.input
            .get(self.pos)
            .copied()
            .ok_or(DecodeError::UnexpectedEof(self.pos))
    }

    /// Position of the next `delim` at or after the cursor.
    fn find(&self, delim: u8) -> Result<usize, DecodeError> {
        self.input[self.pos..]
            .iter()
            .position(|&b| b == delim)
            .map(|i| self.pos + i)
            .ok_or(DecodeError::UnexpectedEof(self.input.len()))
    }

    fn value(&mut self, depth: usize) -> Result<Value, DecodeError> {
        if depth > MAX_DEPTH {
            return Err(DecodeError::TooDeep(MAX_DEPTH));
        }

        match self.peek()? {
            b'i' => self.integer().map(Value::Integer),
            b'0'..=b'9' => self.byte_string().map(Value::Bytes),
            b'l' => self.list(depth),
            b'd' => self.dict(depth),
            byte => Err(DecodeError::UnexpectedByte {
                byte,
                offset: self.pos,
            }),
        }
    }

    fn integer(&mut self) -> Result<i128, DecodeError> {
        let start = self.pos;
        self.pos += 1;
        let end = self.find(b'e')?;
        let digits = &self.input[self.pos..end];

        let magnitude = digits.strip_prefix(b"-").unwrap_or(digits);
        let canonical = !magnitude.is_empty()
            && magnitude.iter().all(u8::is_ascii_digit)
            && !(magnitude[0] == b'0' && (magnitude.len() > 1 || magnitude.len() < digits.len()));
        if !canonical {
            return Err(DecodeError::MalformedInteger(start));
        }

        let n = std::str::from_utf8(digits)
            .ok()
            .and_then(|s| s.parse::<i128>().ok())
            .ok_or(DecodeError::MalformedInteger(start))?;

        self.pos = end + 1;
        Ok(n)
    }

    fn byte_string(&mut self) -> Result<Vec<u8>, DecodeError> {
        let start = self.pos;
        let colon = self.find(b':')?;
        let digits = &self.input[start..colon];

        let canonical = !digits.is_empty()
            && digits.iter().all(u8::is_ascii_digit)
            && !(digits[0] == b'0' && digits.len() > 1);
        if !canonical {
            return Err(DecodeError::MalformedInteger(start));
        }

        let len = std::str::from_utf8(digits)
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .ok_or(DecodeError::MalformedInteger(start))?;

        let body = colon + 1;
        let end = body
            .checked_add(len)
            .filter(|&end| end <= self.input.len())
            .ok_or(DecodeError::UnexpectedEof(self.input.len()))?;

        self.pos = end;
        Ok(self.input[body..end].to_vec())
    }

    fn list(&mut self, depth: usize) -> Result<Value, DecodeError> {
        self.pos += 1;
        let mut items = Vec::new();
        while self.peek()? != b'e' {
            items.push(self.value(depth + 1)?);
        }
        self.pos += 1;
        Ok(Value::List(items))
    }

    fn dict(&mut self, depth: usize) -> Result<Value, DecodeError> {
        self.pos += 1;
        let mut entries: Vec<(Vec<u8>, Value)> = Vec::new();
        loop {
            let offset = self.pos;
            match self.peek()? {
                b'e' => break,
                b'0'..=b'9' => {}
                byte => return Err(DecodeError::UnexpectedByte { byte, offset }),
            }

            let key = self.byte_string()?;
            if let Some((prev, _)) = entries.last() {
                if key <= *prev {
                    return Err(DecodeError::UnsortedKeys(offset));
                }
            }

            let value = self.value(depth + 1)?;
            entries.push((key, value));
        }
        self.pos += 1;
        Ok(Value::Dict(entries))
    }
}
