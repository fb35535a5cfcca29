use crate::frequency::FrequencyTable;
use derivative::Derivative;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// A node of a Huffman tree.
///
/// Nodes order by weight, then by creation rank, so the priority queue pops
/// them in the same sequence on every build of the same table. Rank is unique
/// within one tree.
#[derive(Debug, Clone, Derivative)]
#[derivative(PartialEq, Eq, PartialOrd, Ord)]
pub struct Node<Symbol> {
    weight: usize,

    rank: usize,

    #[derivative(PartialEq = "ignore")]
    #[derivative(PartialOrd = "ignore")]
    #[derivative(Ord = "ignore")]
    kind: NodeKind<Symbol>,
}

/// Leaf or internal node payload.
#[derive(Debug, Clone)]
pub enum NodeKind<Symbol> {
    Leaf(Symbol),
    Internal {
        left: Box<Node<Symbol>>,
        right: Box<Node<Symbol>>,
    },
}

impl<Symbol> Node<Symbol> {
    pub(crate) fn new(s: Symbol, weight: usize, rank: usize) -> Self {
        Self {
            weight,
            rank,
            kind: NodeKind::Leaf(s),
        }
    }

    pub(crate) fn from_children(left: Node<Symbol>, right: Node<Symbol>, rank: usize) -> Self {
        Self {
            weight: left.weight + right.weight,
            rank,
            kind: NodeKind::Internal {
                left: Box::new(left),
                right: Box::new(right),
            },
        }
    }

    /// Sum of the counts of every leaf below this node.
    pub fn weight(&self) -> usize {
        self.weight
    }

    pub fn kind(&self) -> &NodeKind<Symbol> {
        &self.kind
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }

    /// The symbol carried by a leaf, `None` for internal nodes.
    pub fn symbol(&self) -> Option<&Symbol> {
        match &self.kind {
            NodeKind::Leaf(s) => Some(s),
            NodeKind::Internal { .. } => None,
        }
    }

    /// The child reached by following `bit` (`false` is left).
    pub fn child(&self, bit: bool) -> Option<&Node<Symbol>> {
        match &self.kind {
            NodeKind::Leaf(_) => None,
            NodeKind::Internal { left, .. } if !bit => Some(&**left),
            NodeKind::Internal { right, .. } => Some(&**right),
        }
    }

    /// Number of leaves below this node.
    pub fn leaf_count(&self) -> usize {
        match &self.kind {
            NodeKind::Leaf(_) => 1,
            NodeKind::Internal { left, right } => left.leaf_count() + right.leaf_count(),
        }
    }
}

/// Builds a Huffman tree from symbol counts.
///
/// Returns `None` for an empty table. A table with one symbol yields a lone
/// leaf; code generation gives it a one bit code.
pub fn huffman<Symbol: Ord + Clone>(freq: &FrequencyTable<Symbol>) -> Option<Node<Symbol>> {
    let mut pq: BinaryHeap<_> = freq
        .iter()
        .enumerate()
        .map(|(rank, (s, count))| Reverse(Node::new(s.clone(), count, rank)))
        .collect();

    let mut next_rank = pq.len();
    while pq.len() > 1 {
        let (Some(Reverse(left)), Some(Reverse(right))) = (pq.pop(), pq.pop()) else {
            break;
        };
        pq.push(Reverse(Node::from_children(left, right, next_rank)));
        next_rank += 1;
    }

    let root = pq.pop().map(|r| r.0);
    if let Some(root) = &root {
        log::debug!(
            "built huffman tree: {} leaves, weight {}",
            root.leaf_count(),
            root.weight()
        );
    }

    root
}
