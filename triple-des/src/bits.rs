//! Fixed-length bit blocks

use std::fmt;

use crate::error::{Result, TripleDesError};

/// A fixed-length sequence of bits.
///
/// Bits are stored MSB first: bit index 0 is the most significant bit of
/// `data[0]`. Unused trailing bits of the last byte are always zero.
#[derive(Clone, PartialEq, Eq)]
pub struct BitArray {
    len: usize,
    data: Vec<u8>,
}

impl BitArray {
    /// Creates a zero-filled block of `bit_count` bits.
    pub fn create(bit_count: usize) -> Self {
        Self {
            len: bit_count,
            data: vec![0u8; bit_count.div_ceil(8)],
        }
    }

    /// Creates a block holding exactly the given bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            len: bytes.len() * 8,
            data: bytes.to_vec(),
        }
    }

    /// Parses a hex string, ignoring any whitespace.
    pub fn from_hex(text: &str) -> Result<Self> {
        let digits: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        let bytes = hex::decode(digits)?;
        Ok(Self::from_bytes(&bytes))
    }

    /// Number of bits in the block.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.len {
            return None;
        }

        Some((self.data[index / 8] >> (7 - index % 8)) & 1 == 1)
    }

    pub fn set(&mut self, index: usize, bit: bool) -> Result<()> {
        if index >= self.len {
            return Err(TripleDesError::BitRange {
                start: index,
                length: 1,
                available: self.len,
            });
        }

        let mask = 1u8 << (7 - index % 8);
        if bit {
            self.data[index / 8] |= mask;
        } else {
            self.data[index / 8] &= !mask;
        }
        Ok(())
    }

    /// Copies bits `[src_start, src_start + length)` of `source` into this
    /// block starting at `dst_start`.
    pub fn copy_from(
        &mut self,
        source: &BitArray,
        src_start: usize,
        dst_start: usize,
        length: usize,
    ) -> Result<()> {
        check_range(src_start, length, source.len)?;
        check_range(dst_start, length, self.len)?;

        for offset in 0..length {
            let from = src_start + offset;
            let bit = (source.data[from / 8] >> (7 - from % 8)) & 1;
            let index = dst_start + offset;
            let mask = 1u8 << (7 - index % 8);
            if bit == 1 {
                self.data[index / 8] |= mask;
            } else {
                self.data[index / 8] &= !mask;
            }
        }

        Ok(())
    }

    /// Returns the bits packed into bytes. A trailing partial byte is
    /// padded with zero bits.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.data.clone()
    }
}

fn check_range(start: usize, length: usize, available: usize) -> Result<()> {
    match start.checked_add(length) {
        Some(end) if end <= available => Ok(()),
        _ => Err(TripleDesError::BitRange {
            start,
            length,
            available,
        }),
    }
}

impl fmt::Display for BitArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.data))
    }
}

impl fmt::Debug for BitArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitArray({} bits: {})", self.len, self)
    }
}
