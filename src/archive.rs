//! Self-contained compressed form that can be stored and decoded later.
//!
//! Only the symbol counts are kept, not the tree: building a tree from the
//! same table always gives the same shape.

use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::tree::huffman;
use bitvec::prelude::*;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "Symbol: Ord + Serialize",
    deserialize = "Symbol: Ord + Deserialize<'de>"
))]
pub struct Archive<Symbol> {
    frequencies: FrequencyTable<Symbol>,
    data: Box<[u8]>,
    bit_len: usize,
}

impl<Symbol> Archive<Symbol>
where
    Symbol: Ord + Clone,
{
    pub fn encode(symbols: &[Symbol]) -> Result<Self> {
        let frequencies = FrequencyTable::count(symbols.iter().cloned());

        let bv = match huffman(&frequencies) {
            Some(tree) => {
                let (e, _) = tree.into_encoder_decoder_pair();
                e.encode(symbols.iter().cloned())?
            }
            None => BitVec::new(),
        };
        let bit_len = bv.len();
        let bytes: BitVec<u8, Msb0> = bv.iter().by_vals().collect();

        Ok(Self {
            frequencies,
            data: bytes.into_vec().into_boxed_slice(),
            bit_len,
        })
    }

    pub fn frequencies(&self) -> &FrequencyTable<Symbol> {
        &self.frequencies
    }

    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// The stored bit stream, without the padding of the last byte.
    pub fn bits(&self) -> Result<BitVec> {
        let stored = BitSlice::<u8, Msb0>::from_slice(&self.data);
        if self.bit_len > stored.len() || stored.len() - self.bit_len >= 8 {
            return Err(HuffmanError::BitLengthOutOfRange {
                bit_len: self.bit_len,
                available: stored.len(),
            });
        }

        Ok(stored[..self.bit_len].iter().by_vals().collect())
    }

    /// Recovers the symbols, rejecting counts no input could have produced.
    pub fn decode(&self) -> Result<Vec<Symbol>> {
        self.frequencies.validate()?;
        let bits = self.bits()?;

        match huffman(&self.frequencies) {
            Some(tree) => {
                let (_, d) = tree.into_encoder_decoder_pair();
                d.decode(&bits)
            }
            None if bits.is_empty() => Ok(Vec::new()),
            None => Err(HuffmanError::TruncatedCode {
                bit_len: bits.len(),
            }),
        }
    }
}

impl<Symbol> Archive<Symbol>
where
    Symbol: Ord + Serialize + DeserializeOwned,
{
    /// Serializes to MessagePack.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(rmp_serde::to_vec(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(rmp_serde::from_slice(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn archive_roundtrip() {
        let text = chars("Hello World!");
        let archive = Archive::encode(&text).unwrap();

        assert_eq!(archive.frequencies().total(), 12);
        assert_eq!(archive.decode().unwrap(), text);
    }

    #[test]
    fn archive_through_bytes() {
        let text = chars("she sells sea shells by the sea shore");
        let bytes = Archive::encode(&text).unwrap().to_bytes().unwrap();

        let restored: Archive<char> = Archive::from_bytes(&bytes).unwrap();
        assert_eq!(restored.decode().unwrap(), text);
    }

    #[test]
    fn archive_keeps_exact_length() {
        // three one bit codes do not fill a nibble
        let text = chars("aab");
        let archive = Archive::encode(&text).unwrap();

        assert_eq!(archive.bit_len(), 3);
        assert_eq!(archive.bits().unwrap().len(), 3);
        assert_eq!(archive.decode().unwrap(), text);
    }

    #[test]
    fn archive_single_symbol() {
        let text = chars("zzzzz");
        let archive = Archive::encode(&text).unwrap();

        assert_eq!(archive.bit_len(), 5);
        assert_eq!(archive.decode().unwrap(), text);
    }

    #[test]
    fn archive_empty() {
        let archive = Archive::<char>::encode(&[]).unwrap();

        assert_eq!(archive.bit_len(), 0);
        assert!(archive.decode().unwrap().is_empty());
    }

    #[test]
    fn archive_of_bytes() {
        let data = b"\x00\x01\x01\x02\x02\x02\xff".to_vec();
        let bytes = Archive::encode(&data).unwrap().to_bytes().unwrap();

        let restored: Archive<u8> = Archive::from_bytes(&bytes).unwrap();
        assert_eq!(restored.decode().unwrap(), data);
    }

    #[test]
    fn archive_bytes_are_msb_first() {
        // 'a' -> 0, 'b' -> 1
        let archive = Archive::encode(&chars("abba")).unwrap();
        assert_eq!(archive.data, vec![0b0110_0000u8].into_boxed_slice());
    }

    #[test]
    fn archive_rejects_overflowing_counts() {
        let counts = BTreeMap::from([('a', usize::MAX), ('b', 1)]);
        let bytes = rmp_serde::to_vec(&((counts,), vec![0u8], 1usize)).unwrap();

        let archive: Archive<char> = Archive::from_bytes(&bytes).unwrap();
        assert!(matches!(
            archive.decode(),
            Err(HuffmanError::InvalidFrequencies { .. })
        ));
    }

    #[test]
    fn archive_rejects_zero_counts() {
        let counts = BTreeMap::from([('a', 2), ('b', 0)]);
        let bytes = rmp_serde::to_vec(&((counts,), vec![0u8], 2usize)).unwrap();

        let archive: Archive<char> = Archive::from_bytes(&bytes).unwrap();
        assert!(matches!(
            archive.decode(),
            Err(HuffmanError::InvalidFrequencies { .. })
        ));
    }

    #[test]
    fn archive_rejects_bad_bit_len() {
        let counts = BTreeMap::from([('a', 2), ('b', 1)]);
        let bytes = rmp_serde::to_vec(&((counts,), vec![0u8], 9usize)).unwrap();

        let archive: Archive<char> = Archive::from_bytes(&bytes).unwrap();
        assert!(matches!(
            archive.decode(),
            Err(HuffmanError::BitLengthOutOfRange { bit_len: 9, available: 8 })
        ));
    }

    #[test]
    fn archive_rejects_garbage() {
        assert!(matches!(
            Archive::<char>::from_bytes(&[0xc1]),
            Err(HuffmanError::Decode(_))
        ));
    }
}
