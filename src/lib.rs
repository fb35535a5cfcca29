//! Huffman coding of text with a hexadecimal display form.
//!
//! The pipeline counts symbols, builds a tree, derives prefix codes, encodes
//! the input to a bit stream, packs that stream into hex digits and decodes
//! the stream again to check that nothing was lost.
//!
//! ```
//! let (hex, decoded) = huffhex::compress("Hello World!").unwrap();
//! assert_eq!(decoded, "Hello World!");
//! assert!(hex.len() < 12);
//! ```

pub mod archive;
pub mod codec;
pub mod error;
pub mod frequency;
pub mod hex;
pub mod tree;

pub use archive::Archive;
pub use codec::{bit_string, CodeTable, Decoder, Encoder};
pub use error::{HuffmanError, Result};
pub use frequency::FrequencyTable;
pub use hex::{to_hex, PackedBits};
pub use tree::{huffman, Node, NodeKind};

use bitvec::prelude::*;

/// Everything one pipeline run produces.
#[derive(Debug, Clone)]
pub struct Compression<Symbol> {
    /// Code assigned to every distinct input symbol.
    pub codes: CodeTable<Symbol>,
    /// The encoded message body.
    pub bits: BitVec,
    /// `bits` packed for display, last nibble zero padded.
    pub hex: String,
    /// Symbols recovered by decoding `bits`.
    pub decoded: Vec<Symbol>,
}

/// Runs the whole pipeline over `symbols`.
///
/// Empty input short-circuits before any tree is built and yields empty
/// output.
pub fn compress_symbols<Symbol>(symbols: &[Symbol]) -> Result<Compression<Symbol>>
where
    Symbol: Ord + Clone,
{
    let freq = FrequencyTable::count(symbols.iter().cloned());
    let Some(tree) = huffman(&freq) else {
        log::debug!("empty input, nothing to encode");
        return Ok(Compression {
            codes: CodeTable::default(),
            bits: BitVec::new(),
            hex: String::new(),
            decoded: Vec::new(),
        });
    };

    let (e, d) = tree.into_encoder_decoder_pair();
    let bits = e.encode(symbols.iter().cloned())?;
    let hex = to_hex(&bits);
    let decoded = d.decode(&bits)?;

    log::debug!(
        "compressed {} symbols to {} bits ({} hex digits)",
        symbols.len(),
        bits.len(),
        hex.len()
    );

    Ok(Compression {
        codes: e.table().clone(),
        bits,
        hex,
        decoded,
    })
}

/// Compresses `text` and returns its hex form together with the text decoded
/// back from the bit stream.
pub fn compress(text: &str) -> Result<(String, String)> {
    let symbols: Vec<char> = text.chars().collect();
    let Compression { hex, decoded, .. } = compress_symbols(&symbols)?;

    Ok((hex, decoded.into_iter().collect()))
}
