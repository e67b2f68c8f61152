//! The CBOR subset Cardano Byron addresses are built from: unsigned
//! integers, byte strings, arrays (definite and indefinite), maps and tags.
//! Encoding is canonical (shortest head) so hashes over the bytes are
//! reproducible.

use crate::error::{ErrorDetail, WalletError};

const MAJOR_UNSIGNED: u8 = 0;
const MAJOR_BYTES: u8 = 2;
const MAJOR_ARRAY: u8 = 4;
const MAJOR_MAP: u8 = 5;
const MAJOR_TAG: u8 = 6;

const INDEFINITE_ARRAY: u8 = 0x9f;
const BREAK: u8 = 0xff;

/// Nesting limit when decoding untrusted input.
const MAX_DEPTH: usize = 16;

/// A CBOR data item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    /// Major type 0.
    Unsigned(u64),
    /// Major type 2.
    Bytes(Vec<u8>),
    /// Major type 4 with a length head.
    Array(Vec<Value>),
    /// Major type 4 written as `0x9f … 0xff`.
    IndefiniteArray(Vec<Value>),
    /// Major type 5, entries kept in insertion order.
    Map(Vec<(Value, Value)>),
    /// Major type 6.
    Tag(u64, Box<Value>),
}

impl Value {
    /// The byte string payload, if this is a byte string.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// The integer payload, if this is an unsigned integer.
    #[must_use]
    pub const fn as_unsigned(&self) -> Option<u64> {
        match self {
            Self::Unsigned(n) => Some(*n),
            _ => None,
        }
    }

    /// The items of either array form.
    #[must_use]
    pub fn as_array(&self) -> Option<&[Self]> {
        match self {
            Self::Array(items) | Self::IndefiniteArray(items) => Some(items),
            _ => None,
        }
    }

    /// The entries, if this is a map.
    #[must_use]
    pub fn as_map(&self) -> Option<&[(Self, Self)]> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Look up an unsigned-integer key in a map.
    #[must_use]
    pub fn map_get(&self, key: u64) -> Option<&Self> {
        self.as_map()?
            .iter()
            .find(|(k, _)| k.as_unsigned() == Some(key))
            .map(|(_, v)| v)
    }
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

fn write_head(out: &mut Vec<u8>, major: u8, value: u64) {
    let major = major << 5;
    if value < 24 {
        out.push(major | value as u8);
    } else if let Ok(v) = u8::try_from(value) {
        out.push(major | 24);
        out.push(v);
    } else if let Ok(v) = u16::try_from(value) {
        out.push(major | 25);
        out.extend_from_slice(&v.to_be_bytes());
    } else if let Ok(v) = u32::try_from(value) {
        out.push(major | 26);
        out.extend_from_slice(&v.to_be_bytes());
    } else {
        out.push(major | 27);
        out.extend_from_slice(&value.to_be_bytes());
    }
}

fn write_value(out: &mut Vec<u8>, value: &Value) {
    match value {
        Value::Unsigned(n) => write_head(out, MAJOR_UNSIGNED, *n),
        Value::Bytes(bytes) => {
            write_head(out, MAJOR_BYTES, bytes.len() as u64);
            out.extend_from_slice(bytes);
        }
        Value::Array(items) => {
            write_head(out, MAJOR_ARRAY, items.len() as u64);
            for item in items {
                write_value(out, item);
            }
        }
        Value::IndefiniteArray(items) => {
            out.push(INDEFINITE_ARRAY);
            for item in items {
                write_value(out, item);
            }
            out.push(BREAK);
        }
        Value::Map(entries) => {
            write_head(out, MAJOR_MAP, entries.len() as u64);
            for (k, v) in entries {
                write_value(out, k);
                write_value(out, v);
            }
        }
        Value::Tag(tag, inner) => {
            write_head(out, MAJOR_TAG, *tag);
            write_value(out, inner);
        }
    }
}

/// Serialize a value.
#[must_use]
pub fn encode(value: &Value) -> Vec<u8> {
    let mut out = Vec::new();
    write_value(&mut out, value);
    out
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

fn malformed(message: &str) -> WalletError {
    WalletError::Semantic(ErrorDetail::msg(format!("invalid CBOR: {message}")))
}

struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8], WalletError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.data.len())
            .ok_or_else(|| malformed("unexpected end of input"))?;
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn byte(&mut self) -> Result<u8, WalletError> {
        Ok(self.take(1)?[0])
    }

    fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    fn argument(&mut self, additional: u8) -> Result<u64, WalletError> {
        match additional {
            0..=23 => Ok(u64::from(additional)),
            24 => Ok(u64::from(self.byte()?)),
            25 => Ok(self.take(2)?.iter().fold(0, |acc, &b| (acc << 8) | u64::from(b))),
            26 => Ok(self.take(4)?.iter().fold(0, |acc, &b| (acc << 8) | u64::from(b))),
            27 => Ok(self.take(8)?.iter().fold(0, |acc, &b| (acc << 8) | u64::from(b))),
            _ => Err(malformed("unsupported length encoding")),
        }
    }

    fn length(&mut self, additional: u8) -> Result<usize, WalletError> {
        let len = self.argument(additional)?;
        let len = usize::try_from(len).map_err(|_| malformed("length overflow"))?;
        if len > self.data.len() {
            return Err(malformed("length exceeds input"));
        }
        Ok(len)
    }

    fn value(&mut self, depth: usize) -> Result<Value, WalletError> {
        if depth > MAX_DEPTH {
            return Err(malformed("nesting too deep"));
        }
        let initial = self.byte()?;
        if initial == INDEFINITE_ARRAY {
            let mut items = Vec::new();
            loop {
                match self.peek() {
                    Some(BREAK) => {
                        self.pos += 1;
                        return Ok(Value::IndefiniteArray(items));
                    }
                    Some(_) => items.push(self.value(depth + 1)?),
                    None => return Err(malformed("unterminated array")),
                }
            }
        }
        let (major, additional) = (initial >> 5, initial & 0x1f);
        match major {
            MAJOR_UNSIGNED => Ok(Value::Unsigned(self.argument(additional)?)),
            MAJOR_BYTES => {
                let len = self.length(additional)?;
                Ok(Value::Bytes(self.take(len)?.to_vec()))
            }
            MAJOR_ARRAY => {
                let len = self.length(additional)?;
                let items = (0..len)
                    .map(|_| self.value(depth + 1))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::Array(items))
            }
            MAJOR_MAP => {
                let len = self.length(additional)?;
                let mut entries = Vec::with_capacity(len);
                for _ in 0..len {
                    let k = self.value(depth + 1)?;
                    let v = self.value(depth + 1)?;
                    entries.push((k, v));
                }
                Ok(Value::Map(entries))
            }
            MAJOR_TAG => {
                let tag = self.argument(additional)?;
                Ok(Value::Tag(tag, Box::new(self.value(depth + 1)?)))
            }
            _ => Err(malformed("unsupported major type")),
        }
    }
}

/// Parse exactly one value spanning all of `data`.
///
/// # Errors
///
/// Returns `WalletError::Semantic` on truncated, trailing or unsupported
/// input.
pub fn decode(data: &[u8]) -> Result<Value, WalletError> {
    let mut reader = Reader { data, pos: 0 };
    let value = reader.value(0)?;
    if reader.pos != data.len() {
        return Err(malformed("trailing bytes"));
    }
    Ok(value)
}
