//! # Positional Encoding
//!
//! Maps records to their byte representation: fixed-width little-endian
//! fields, written in declaration order, no padding, no headers.
//!
//! ## Design
//!
//! - The encoder only appends; a record is encoded "at the current position"
//! - Multi-byte integers always go through the typed writers (little-endian)
//! - Raw byte arrays go through `write_pod` (already endian-free)
//! - The decoder mirrors the encoder and exists to verify produced payloads

use bytemuck::{bytes_of, Pod};

use crate::error::{FormatError, FormatResult};

/// A value with a fixed positional byte layout.
pub trait Encode {
    /// Number of bytes `encode` appends.
    fn encoded_len(&self) -> usize;

    /// Appends the value at the encoder's current position.
    fn encode(&self, encoder: &mut PositionalEncoder);
}

/// A fixed-size record that can also be read back.
pub trait Record: Encode + Sized {
    /// Encoded size in bytes.
    const SIZE: usize;

    /// Reads one record at the decoder's current position.
    fn decode(decoder: &mut PositionalDecoder<'_>) -> FormatResult<Self>;
}

/// Append-only little-endian encoder.
#[derive(Debug, Default)]
pub struct PositionalEncoder {
    buffer: Vec<u8>,
}

impl PositionalEncoder {
    /// Creates a new encoder with an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Creates an encoder with room for `capacity` bytes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    /// Returns the current position (bytes written so far).
    #[inline]
    #[must_use]
    pub fn position(&self) -> usize {
        self.buffer.len()
    }

    /// Returns a slice of the written data.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    /// Consumes the encoder and returns the written data.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    /// Writes a single byte.
    #[inline]
    pub fn write_u8(&mut self, value: u8) {
        self.buffer.push(value);
    }

    /// Writes a u16 in little-endian format.
    #[inline]
    pub fn write_u16(&mut self, value: u16) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a u32 in little-endian format.
    #[inline]
    pub fn write_u32(&mut self, value: u32) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes raw bytes unchanged.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    /// Writes `count` zero bytes.
    #[inline]
    pub fn write_zeros(&mut self, count: usize) {
        self.buffer.resize(self.buffer.len() + count, 0);
    }

    /// Writes a Pod value byte for byte.
    ///
    /// Only meant for byte arrays; integers wider than a byte must use the
    /// typed writers to stay little-endian on every host.
    #[inline]
    pub fn write_pod<T: Pod>(&mut self, value: &T) {
        self.buffer.extend_from_slice(bytes_of(value));
    }

    /// Encodes a value at the current position and returns its length.
    pub fn code<E: Encode + ?Sized>(&mut self, value: &E) -> usize {
        let start = self.position();
        value.encode(self);
        self.position() - start
    }
}

/// Encodes a single value into a fresh byte block.
#[must_use]
pub fn encode_to_vec<E: Encode + ?Sized>(value: &E) -> Vec<u8> {
    let mut encoder = PositionalEncoder::with_capacity(value.encoded_len());
    encoder.code(value);
    encoder.into_bytes()
}

/// Little-endian decoder over a borrowed buffer.
pub struct PositionalDecoder<'a> {
    buffer: &'a [u8],
    position: usize,
}

impl<'a> PositionalDecoder<'a> {
    /// Creates a new decoder from a buffer.
    #[must_use]
    pub const fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, position: 0 }
    }

    /// Returns the number of bytes remaining.
    #[inline]
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.position)
    }

    /// Returns the current read position.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    fn take(&mut self, needed: usize) -> FormatResult<&'a [u8]> {
        if needed > self.remaining() {
            return Err(FormatError::UnexpectedEnd {
                offset: self.position,
                needed,
                available: self.remaining(),
            });
        }
        let buffer: &'a [u8] = self.buffer;
        let slice = &buffer[self.position..self.position + needed];
        self.position += needed;
        Ok(slice)
    }

    /// Reads a single byte.
    #[inline]
    pub fn read_u8(&mut self) -> FormatResult<u8> {
        Ok(self.take(1)?[0])
    }

    /// Reads a u16 in little-endian format.
    #[inline]
    pub fn read_u16(&mut self) -> FormatResult<u16> {
        let bytes = self.take(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    /// Reads a u32 in little-endian format.
    #[inline]
    pub fn read_u32(&mut self) -> FormatResult<u32> {
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Reads `count` raw bytes.
    pub fn read_bytes(&mut self, count: usize) -> FormatResult<&'a [u8]> {
        self.take(count)
    }

    /// Reads a Pod value byte for byte.
    pub fn read_pod<T: Pod>(&mut self) -> FormatResult<T> {
        let size = std::mem::size_of::<T>();
        let slice = self.take(size)?;
        Ok(bytemuck::pod_read_unaligned(slice))
    }

    /// Reads one record.
    pub fn decode<R: Record>(&mut self) -> FormatResult<R> {
        R::decode(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_little_endian_fields() {
        let mut encoder = PositionalEncoder::new();
        encoder.write_u8(0xAB);
        encoder.write_u16(0x1234);
        encoder.write_u32(0xDEAD_BEEF);
        encoder.write_pod(&[7u8, 8, 9]);
        encoder.write_zeros(2);

        assert_eq!(
            encoder.as_slice(),
            &[0xAB, 0x34, 0x12, 0xEF, 0xBE, 0xAD, 0xDE, 7, 8, 9, 0, 0]
        );
    }

    #[test]
    fn test_decoder_reads_back() {
        let data = [0x01, 0x34, 0x12, 0x78, 0x56, 0x34, 0x12, 0xAA, 0xBB];
        let mut decoder = PositionalDecoder::new(&data);

        assert_eq!(decoder.read_u8().unwrap(), 0x01);
        assert_eq!(decoder.read_u16().unwrap(), 0x1234);
        assert_eq!(decoder.read_u32().unwrap(), 0x1234_5678);
        assert_eq!(decoder.read_pod::<[u8; 2]>().unwrap(), [0xAA, 0xBB]);
        assert_eq!(decoder.remaining(), 0);
    }

    #[test]
    fn test_decoder_unexpected_end() {
        let data = [0x01];
        let mut decoder = PositionalDecoder::new(&data);

        let err = decoder.read_u16().unwrap_err();
        assert_eq!(
            err,
            FormatError::UnexpectedEnd {
                offset: 0,
                needed: 2,
                available: 1
            }
        );
        // Failed read does not advance.
        assert_eq!(decoder.position(), 0);
    }
}
