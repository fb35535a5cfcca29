//! Error types for encoding, decoding and packing.

use thiserror::Error;

/// Errors raised while running the Huffman pipeline.
///
/// Apart from the hex and archive variants, every error here means the tree,
/// the code table and the bit stream disagree with each other. They are never
/// produced for input that went through [`crate::compress`] unchanged.
#[derive(Debug, Error)]
pub enum HuffmanError {
    /// Encoder met a symbol the code table has no entry for.
    #[error("No code for symbol at position {position}")]
    MissingCode {
        /// Index of the symbol in the input sequence.
        position: usize,
    },

    /// Decoder was asked to descend from a leaf.
    #[error("No branch to follow at bit {position}")]
    InvalidBranch {
        /// Bit index that could not be followed.
        position: usize,
    },

    /// Bit stream ended between the root and a leaf.
    #[error("Bit stream of {bit_len} bits ends inside a code")]
    TruncatedCode {
        /// Length of the offending stream.
        bit_len: usize,
    },

    /// Packed text contained something other than a hexadecimal digit.
    #[error("Invalid hex digit {digit:?} at position {position}")]
    InvalidHexDigit {
        /// Index of the digit in the packed text.
        position: usize,
        /// The rejected character.
        digit: char,
    },

    /// Recorded bit length does not fit the packed digits.
    #[error("Bit length {bit_len} does not match {available} packed bits")]
    BitLengthOutOfRange {
        /// Recorded bit length.
        bit_len: usize,
        /// Number of bits carried by the packed digits.
        available: usize,
    },

    /// Padding after the last meaningful bit was not all zero.
    #[error("Non-zero padding after bit {bit_len}")]
    NonZeroPadding {
        /// Recorded bit length.
        bit_len: usize,
    },

    /// Stored symbol counts cannot come from any input.
    #[error("Invalid frequency table: {reason}")]
    InvalidFrequencies {
        /// What is wrong with the table.
        reason: &'static str,
    },

    /// Archive serialization failed.
    #[error("Archive encode error: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    /// Archive deserialization failed.
    #[error("Archive decode error: {0}")]
    Decode(#[from] rmp_serde::decode::Error),
}

/// Result type for Huffman operations.
pub type Result<T> = std::result::Result<T, HuffmanError>;
