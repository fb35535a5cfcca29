//! Hexadecimal packing of bit streams.
//!
//! [`to_hex`] is the display form: one uppercase digit per nibble, with the
//! last nibble zero padded on the right. It cannot be reversed on its own
//! because the padding is not recorded. [`PackedBits`] keeps the bit length
//! next to the digits so the exact stream can be restored.

use crate::error::{HuffmanError, Result};
use bitvec::prelude::*;
use serde::{Deserialize, Serialize};

const DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Packs `bits` four at a time into uppercase hex digits, MSB first.
pub fn to_hex(bits: &BitSlice) -> String {
    bits.chunks(4)
        .map(|nibble| {
            let mut v = nibble
                .iter()
                .by_vals()
                .fold(0usize, |acc, b| (acc << 1) | b as usize);
            v <<= 4 - nibble.len();
            DIGITS[v] as char
        })
        .collect()
}

/// Hex digits together with the number of meaningful bits they carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackedBits {
    pub bit_len: usize,
    pub hex: String,
}

impl PackedBits {
    pub fn pack(bits: &BitSlice) -> Self {
        Self {
            bit_len: bits.len(),
            hex: to_hex(bits),
        }
    }

    /// Restores the original bit stream, dropping the padding.
    ///
    /// Padding must be zero, as [`to_hex`] writes it.
    pub fn unpack(&self) -> Result<BitVec> {
        let mut bv = BitVec::with_capacity(self.hex.len() * 4);
        for (position, digit) in self.hex.chars().enumerate() {
            let v = digit
                .to_digit(16)
                .ok_or(HuffmanError::InvalidHexDigit { position, digit })?;
            for shift in (0..4).rev() {
                bv.push((v >> shift) & 1 == 1);
            }
        }

        let available = bv.len();
        if self.bit_len > available || available - self.bit_len >= 4 {
            return Err(HuffmanError::BitLengthOutOfRange {
                bit_len: self.bit_len,
                available,
            });
        }

        if bv[self.bit_len..].any() {
            return Err(HuffmanError::NonZeroPadding {
                bit_len: self.bit_len,
            });
        }

        bv.truncate(self.bit_len);
        Ok(bv)
    }
}
