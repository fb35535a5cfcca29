use crate::error::{HuffmanError, Result};
use crate::tree::{Node, NodeKind};
use bitvec::prelude::*;
use std::collections::BTreeMap;

/// Prefix code for every leaf of a tree, `0` for left and `1` for right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable<Symbol> {
    codes: BTreeMap<Symbol, BitBox>,
}

impl<Symbol> Default for CodeTable<Symbol> {
    fn default() -> Self {
        Self {
            codes: BTreeMap::new(),
        }
    }
}

impl<Symbol> CodeTable<Symbol>
where
    Symbol: Ord,
{
    pub fn get(&self, symbol: &Symbol) -> Option<&BitSlice> {
        self.codes.get(symbol).map(|c| c.as_bitslice())
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Codes in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, &BitSlice)> {
        self.codes.iter().map(|(s, c)| (s, c.as_bitslice()))
    }
}

/// Renders bits as a string of `0` and `1`.
pub fn bit_string(bits: &BitSlice) -> String {
    bits.iter()
        .by_vals()
        .map(|b| if b { '1' } else { '0' })
        .collect()
}

impl<Symbol> Node<Symbol>
where
    Symbol: Ord + Clone,
{
    /// Assigns every leaf the path leading to it from this node.
    ///
    /// A lone leaf has an empty path, so it is given the code `0` instead.
    pub fn code_table(&self) -> CodeTable<Symbol> {
        fn traverse<Symbol: Ord + Clone>(
            node: &Node<Symbol>,
            path: BitVec,
            codes: &mut BTreeMap<Symbol, BitBox>,
        ) {
            match node.kind() {
                NodeKind::Leaf(sym) => {
                    log::trace!("code {} assigned", bit_string(&path));
                    codes.insert(sym.clone(), path.into_boxed_bitslice());
                }
                NodeKind::Internal { left, right } => {
                    let mut l = path.clone();
                    l.push(false);
                    traverse(left, l, codes);

                    let mut r = path;
                    r.push(true);
                    traverse(right, r, codes);
                }
            }
        }

        let root_path = if self.is_leaf() {
            bitvec![0]
        } else {
            BitVec::new()
        };

        let mut codes = BTreeMap::new();
        traverse(self, root_path, &mut codes);
        log::debug!("generated {} codes", codes.len());

        CodeTable { codes }
    }

    pub fn into_encoder_decoder_pair(self) -> (Encoder<Symbol>, Decoder<Symbol>) {
        let table = self.code_table();
        (Encoder { table }, Decoder { root: self })
    }
}

#[derive(Debug, Clone)]
pub struct Encoder<Symbol> {
    table: CodeTable<Symbol>,
}

impl<Symbol> Encoder<Symbol>
where
    Symbol: Ord,
{
    pub fn table(&self) -> &CodeTable<Symbol> {
        &self.table
    }

    /// Concatenates the code of every symbol in `stream`.
    ///
    /// Fails on the first symbol the table does not know.
    pub fn encode(&self, stream: impl IntoIterator<Item = Symbol>) -> Result<BitVec> {
        let mut out = BitVec::new();
        for (position, s) in stream.into_iter().enumerate() {
            let code = self
                .table
                .get(&s)
                .ok_or(HuffmanError::MissingCode { position })?;
            out.extend_from_bitslice(code);
        }

        log::debug!("encoded {} bits", out.len());
        Ok(out)
    }
}

/// Walks a tree bit by bit to recover symbols.
#[derive(Debug, Clone)]
pub struct Decoder<Symbol> {
    root: Node<Symbol>,
}

impl<Symbol> Decoder<Symbol>
where
    Symbol: Clone,
{
    pub fn decode(&self, input: &BitSlice) -> Result<Vec<Symbol>> {
        let mut out = Vec::new();

        // a lone leaf answers to the single bit `0`
        if let NodeKind::Leaf(sym) = self.root.kind() {
            for (position, b) in input.iter().by_vals().enumerate() {
                if b {
                    return Err(HuffmanError::InvalidBranch { position });
                }
                out.push(sym.clone());
            }
            return Ok(out);
        }

        let mut cursor = &self.root;
        let mut depth = 0;
        for (position, b) in input.iter().by_vals().enumerate() {
            cursor = cursor
                .child(b)
                .ok_or(HuffmanError::InvalidBranch { position })?;
            depth += 1;

            if let Some(sym) = cursor.symbol() {
                out.push(sym.clone());
                cursor = &self.root;
                depth = 0;
            }
        }

        if depth != 0 {
            return Err(HuffmanError::TruncatedCode {
                bit_len: input.len(),
            });
        }

        Ok(out)
    }
}
