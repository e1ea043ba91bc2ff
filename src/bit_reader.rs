//! Bit-level reading over a byte buffer.
//!
//! SCTE-35 fields are not byte-aligned; this module provides the
//! sequential cursor every parser in the crate drives forward. There is
//! no rewind and no random access.

use crate::DecodeError;

/// A stateful cursor that extracts values at the bit level from a fixed
/// byte buffer, advancing on every read.
pub(crate) struct BitReader<'a> {
    buffer: &'a [u8],
    offset: usize,
}

impl<'a> BitReader<'a> {
    /// Creates a reader positioned at bit offset 0.
    pub fn new(buffer: &'a [u8]) -> Self {
        BitReader { buffer, offset: 0 }
    }

    /// Reads the next `num_bits` bits (1-64) as a big-endian unsigned
    /// integer, right-aligned in the result.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::OutOfData`] if fewer than `num_bits` bits
    /// remain in the buffer.
    ///
    /// # Panics
    ///
    /// Panics if `num_bits` exceeds 64; the result would not fit in the
    /// returned `u64`.
    pub fn read_bits(&mut self, num_bits: usize) -> Result<u64, DecodeError> {
        assert!(num_bits <= 64, "read_bits supports at most 64 bits");
        if num_bits > self.remaining_bits() {
            return Err(DecodeError::OutOfData {
                needed: num_bits,
                remaining: self.remaining_bits(),
            });
        }

        let mut value: u64 = 0;
        let mut bits_read = 0;
        while bits_read < num_bits {
            let byte = self.buffer[self.offset / 8];
            let bit_offset = self.offset % 8;
            let bits_to_read = std::cmp::min(num_bits - bits_read, 8 - bit_offset);
            let mask = if bits_to_read >= 8 {
                0xFF
            } else {
                (1u8 << bits_to_read) - 1
            };
            let chunk = (byte >> (8 - bit_offset - bits_to_read)) & mask;

            value = (value << bits_to_read) | (chunk as u64);
            self.offset += bits_to_read;
            bits_read += bits_to_read;
        }

        Ok(value)
    }

    /// Reads a single bit as a boolean flag.
    pub fn read_bool(&mut self) -> Result<bool, DecodeError> {
        Ok(self.read_bits(1)? == 1)
    }

    /// Reads `num_bytes` bytes and renders them as a lowercase hex
    /// string, two digits per byte, no separator.
    pub fn read_hex(&mut self, num_bytes: usize) -> Result<String, DecodeError> {
        let mut hex = String::with_capacity(num_bytes * 2);
        for _ in 0..num_bytes {
            let byte = self.read_bits(8)? as u8;
            hex.push_str(&format!("{:02x}", byte));
        }
        Ok(hex)
    }

    /// Advances the cursor `num_bits` bits without interpreting them.
    /// Used for reserved and padding fields.
    pub fn skip_bits(&mut self, num_bits: usize) -> Result<(), DecodeError> {
        if num_bits > self.remaining_bits() {
            return Err(DecodeError::OutOfData {
                needed: num_bits,
                remaining: self.remaining_bits(),
            });
        }
        self.offset += num_bits;
        Ok(())
    }

    /// Bits left between the cursor and the end of the buffer.
    pub fn remaining_bits(&self) -> usize {
        self.buffer.len() * 8 - self.offset
    }

    /// Current bit offset from the start of the buffer.
    pub fn position(&self) -> usize {
        self.offset
    }
}
