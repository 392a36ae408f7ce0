//! Canonical binary encoding
//!
//! The byte layout consumed by steemd for signature verification:
//! - counts, lengths and wrapper integers are unsigned varints
//! - fixed-width struct fields are little-endian
//! - strings are a varint length followed by the raw bytes
//! - sequences are a varint count followed by each element, in order

pub mod varint;

use crate::error::EncodeError;
pub use varint::{decode_uvarint, encode_uvarint};

/// A value with a canonical binary form
pub trait Encode {
    fn encode(&self, enc: &mut Encoder) -> Result<(), EncodeError>;
}

/// Append-only byte sink for canonical encoding
#[derive(Debug, Default)]
pub struct Encoder {
    buf: Vec<u8>,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn write_uvarint(&mut self, value: u64) {
        self.buf.extend_from_slice(&encode_uvarint(value));
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn write_bool(&mut self, value: bool) {
        self.buf.push(value as u8);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_i16(&mut self, value: i16) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_i64(&mut self, value: i64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Raw bytes, no length prefix
    pub fn write_raw(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_string(&mut self, value: &str) {
        self.write_uvarint(value.len() as u64);
        self.buf.extend_from_slice(value.as_bytes());
    }

    pub fn encode<T: Encode + ?Sized>(&mut self, value: &T) -> Result<(), EncodeError> {
        value.encode(self)
    }

    /// Count prefix, then every element in its existing order
    pub fn encode_seq<T: Encode>(&mut self, items: &[T]) -> Result<(), EncodeError> {
        self.write_uvarint(items.len() as u64);
        for item in items {
            item.encode(self)?;
        }
        Ok(())
    }
}

/// Encode a single value into a fresh buffer
pub fn encode_to_vec<T: Encode + ?Sized>(value: &T) -> Result<Vec<u8>, EncodeError> {
    let mut enc = Encoder::new();
    value.encode(&mut enc)?;
    Ok(enc.into_bytes())
}

impl Encode for str {
    fn encode(&self, enc: &mut Encoder) -> Result<(), EncodeError> {
        enc.write_string(self);
        Ok(())
    }
}

impl Encode for String {
    fn encode(&self, enc: &mut Encoder) -> Result<(), EncodeError> {
        enc.write_string(self);
        Ok(())
    }
}

impl Encode for bool {
    fn encode(&self, enc: &mut Encoder) -> Result<(), EncodeError> {
        enc.write_bool(*self);
        Ok(())
    }
}

impl Encode for u8 {
    fn encode(&self, enc: &mut Encoder) -> Result<(), EncodeError> {
        enc.write_u8(*self);
        Ok(())
    }
}

impl Encode for u16 {
    fn encode(&self, enc: &mut Encoder) -> Result<(), EncodeError> {
        enc.write_u16(*self);
        Ok(())
    }
}

impl Encode for u32 {
    fn encode(&self, enc: &mut Encoder) -> Result<(), EncodeError> {
        enc.write_u32(*self);
        Ok(())
    }
}

impl Encode for i16 {
    fn encode(&self, enc: &mut Encoder) -> Result<(), EncodeError> {
        enc.write_i16(*self);
        Ok(())
    }
}

impl Encode for i64 {
    fn encode(&self, enc: &mut Encoder) -> Result<(), EncodeError> {
        enc.write_i64(*self);
        Ok(())
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode(&self, enc: &mut Encoder) -> Result<(), EncodeError> {
        enc.encode_seq(self)
    }
}

impl<T: Encode + ?Sized> Encode for &T {
    fn encode(&self, enc: &mut Encoder) -> Result<(), EncodeError> {
        (**self).encode(enc)
    }
}
