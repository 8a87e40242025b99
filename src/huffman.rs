use crate::error::HuffmanError;
use crate::heap::Heap;
use crate::order::order_fn;
use ordered_float::OrderedFloat;
use std::collections::VecDeque;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Code {
    pub bits: u32,
    pub len: u8,
}

impl Code {
    pub const EMPTY: Self = Self { bits: 0, len: 0 };

    #[inline]
    pub const fn new(bits: u32, len: u8) -> Self {
        Self { bits, len }
    }

    /// Bits from the most significant (first emitted) to the least significant.
    pub fn iter_bits(self) -> impl Iterator<Item = bool> {
        (0..self.len).rev().map(move |i| (self.bits >> i) & 1 == 1)
    }

    /// Whether `self` is a prefix of `other`.
    pub fn is_prefix_of(self, other: Code) -> bool {
        self.len <= other.len
            && other.bits.checked_shr(u32::from(other.len - self.len)).unwrap_or(0) == self.bits
    }
}

/// A packed bit string, most significant bit of each byte first.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    pub bytes: Vec<u8>,
    pub bits: usize,
}

impl Encoded {
    fn push(&mut self, bit: bool) {
        if self.bits % 8 == 0 {
            self.bytes.push(0);
        }
        if bit {
            // `bytes` is non-empty after the push above
            let last = self.bytes.len() - 1;
            self.bytes[last] |= 0x80 >> (self.bits % 8);
        }
        self.bits += 1;
    }

    fn bit(&self, i: usize) -> bool {
        self.bytes[i / 8] & (0x80 >> (i % 8)) != 0
    }
}

/// A symbol weight. Merging two weights fails instead of wrapping.
pub trait Weight: num::Num + Copy + Ord {
    fn checked_sum(self, rhs: Self) -> Option<Self>;
}

macro_rules! int_weight {
    ($($t:ty)*) => {$(
        impl Weight for $t {
            #[inline]
            fn checked_sum(self, rhs: Self) -> Option<Self> {
                num::CheckedAdd::checked_add(&self, &rhs)
            }
        }
    )*};
}

int_weight!(u8 u16 u32 u64 u128 usize i8 i16 i32 i64 i128 isize);

impl<T: num::Float> Weight for OrderedFloat<T> {
    /// Floats saturate to infinity.
    #[inline]
    fn checked_sum(self, rhs: Self) -> Option<Self> {
        Some(self + rhs)
    }
}

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
struct Node {
    code: Code,
    left_child: usize,
    right_child: usize,
}

impl Node {
    #[inline]
    const fn new(left_child: usize, right_child: usize) -> Self {
        Self {
            code: Code::EMPTY,
            left_child,
            right_child,
        }
    }

    #[inline]
    const fn leaf(id: usize) -> Self {
        Self {
            code: Code::EMPTY,
            left_child: id,
            right_child: id,
        }
    }

    #[inline]
    const fn is_leaf(&self) -> bool {
        self.left_child == self.right_child
    }
}

/// An optimal prefix code over the symbols `0..len`.
///
/// Leaves occupy `forest[..len]`, so a leaf's id is its symbol. Merged nodes follow in the
/// order they were created.
#[derive(Clone, Debug)]
pub struct Huffman<W> {
    forest: Vec<Node>,
    root: usize,
    symbols: usize,
    weight: W,
}

impl<W: Weight> Huffman<W> {
    /// O(n log n)
    pub fn new(weights: &[W]) -> Result<Self, HuffmanError> {
        #[derive(Clone, Copy)]
        struct HeapCell<W> {
            id: usize,
            weight: W,
        }

        if weights.is_empty() {
            return Err(HuffmanError::EmptyAlphabet);
        }
        if let Some(symbol) = weights.iter().position(|&w| w < W::zero()) {
            return Err(HuffmanError::InvalidWeight { symbol });
        }

        // lighter first, ties go to the older node so codes are reproducible
        let mut heap = Heap::build(
            weights
                .iter()
                .enumerate()
                .map(|(id, &weight)| HeapCell { id, weight }),
            order_fn(|a: &HeapCell<W>, b: &HeapCell<W>| (a.weight, a.id) < (b.weight, b.id)),
        );
        let mut forest: Vec<Node> = (0..weights.len()).map(Node::leaf).collect();

        while 1 < heap.len() {
            let parent_id = forest.len();

            let p = heap.extract_root()?;
            let q = heap.extract_root()?;

            heap.insert(HeapCell {
                id: parent_id,
                weight: p
                    .weight
                    .checked_sum(q.weight)
                    .ok_or(HuffmanError::WeightOverflow)?,
            });
            forest.push(Node::new(p.id, q.id));
        }
        let root = heap.extract_root()?;

        let mut huffman = Self {
            forest,
            root: root.id,
            symbols: weights.len(),
            weight: root.weight,
        };
        huffman.assign_codes()?;

        Ok(huffman)
    }

    fn assign_codes(&mut self) -> Result<(), HuffmanError> {
        let forest = &mut self.forest;

        if forest[self.root].is_leaf() {
            forest[self.root].code = Code::new(0, 1);
            return Ok(());
        }

        let mut bfs_queue = VecDeque::with_capacity(forest.len());
        bfs_queue.push_back(self.root);
        while let Some(id) = bfs_queue.pop_front() {
            let node = forest[id];

            if u32::from(node.code.len) == u32::BITS {
                let mut symbol = node.left_child;
                while !forest[symbol].is_leaf() {
                    symbol = forest[symbol].left_child;
                }
                return Err(HuffmanError::CodeTooLong { symbol });
            }

            let new_code = Code::new(node.code.bits << 1, node.code.len + 1);
            forest[node.left_child].code = new_code;
            forest[node.right_child].code = Code::new(new_code.bits | 1, new_code.len);

            for &child in [node.left_child, node.right_child].iter() {
                if !forest[child].is_leaf() {
                    bfs_queue.push_back(child);
                }
            }
        }

        Ok(())
    }
}

impl Huffman<OrderedFloat<f64>> {
    pub fn from_probabilities(probs: &[f64]) -> Result<Self, HuffmanError> {
        if let Some(symbol) = probs.iter().position(|p| p.is_nan()) {
            return Err(HuffmanError::InvalidWeight { symbol });
        }

        let weights: Vec<_> = probs.iter().map(|&p| OrderedFloat(p)).collect();
        Self::new(&weights)
    }
}

impl<W: Copy> Huffman<W> {
    /// Number of symbols.
    #[inline]
    pub fn len(&self) -> usize {
        self.symbols
    }

    /// Always `false`, an alphabet is never empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Sum of all weights.
    #[inline]
    pub fn weight(&self) -> W {
        self.weight
    }

    pub fn code(&self, symbol: usize) -> Result<Code, HuffmanError> {
        if symbol < self.symbols {
            Ok(self.forest[symbol].code)
        } else {
            Err(HuffmanError::UnknownSymbol(symbol))
        }
    }

    /// Codes indexed by symbol.
    pub fn codes(&self) -> impl Iterator<Item = Code> + '_ {
        self.forest[..self.symbols].iter().map(|node| node.code)
    }

    /// O(total code length)
    pub fn encode<Iter: IntoIterator<Item = usize>>(
        &self,
        iter: Iter,
    ) -> Result<Encoded, HuffmanError> {
        let mut out = Encoded::default();
        for symbol in iter {
            for bit in self.code(symbol)?.iter_bits() {
                out.push(bit);
            }
        }
        Ok(out)
    }

    /// O(encoded.bits)
    pub fn decode(&self, encoded: &Encoded) -> Result<Vec<usize>, HuffmanError> {
        if encoded.bytes.len() * 8 < encoded.bits {
            return Err(HuffmanError::TruncatedInput);
        }

        let mut symbols = Vec::new();
        if self.forest[self.root].is_leaf() {
            symbols.resize(encoded.bits, self.root);
            return Ok(symbols);
        }

        let mut node = self.root;
        for i in 0..encoded.bits {
            let current = &self.forest[node];
            node = if encoded.bit(i) {
                current.right_child
            } else {
                current.left_child
            };

            if self.forest[node].is_leaf() {
                symbols.push(node);
                node = self.root;
            }
        }

        if node == self.root {
            Ok(symbols)
        } else {
            Err(HuffmanError::TruncatedInput)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // a..f from the classic 100-character file example
    const FREQS: [u32; 6] = [45, 13, 12, 16, 9, 5];

    #[test]
    fn textbook_code_lengths() {
        let huffman = Huffman::new(&FREQS).unwrap();
        let lens: Vec<u8> = huffman.codes().map(|c| c.len).collect();

        assert_eq!(lens, vec![1, 3, 3, 3, 4, 4]);
        assert_eq!(huffman.weight(), 100);

        let cost: u32 = FREQS
            .iter()
            .zip(huffman.codes())
            .map(|(f, c)| f * u32::from(c.len))
            .sum();
        assert_eq!(cost, 224);
    }

    #[test]
    fn codes_are_prefix_free() {
        let huffman = Huffman::new(&[3u64, 1, 4, 1, 5, 9, 2, 6, 5, 3, 5]).unwrap();
        let codes: Vec<_> = huffman.codes().collect();

        for (i, a) in codes.iter().enumerate() {
            for (j, b) in codes.iter().enumerate() {
                if i != j {
                    assert!(!a.is_prefix_of(*b), "{:?} is a prefix of {:?}", a, b);
                }
            }
        }
    }

    #[test]
    fn encode_decode() {
        let huffman = Huffman::new(&FREQS).unwrap();
        let message = vec![0, 5, 1, 0, 0, 4, 3, 2, 2, 5, 0];

        let encoded = huffman.encode(message.iter().copied()).unwrap();
        let expected_bits: usize = message
            .iter()
            .map(|&s| usize::from(huffman.code(s).unwrap().len))
            .sum();
        assert_eq!(encoded.bits, expected_bits);
        assert_eq!(huffman.decode(&encoded), Ok(message));
    }

    #[test]
    fn single_symbol() {
        let huffman = Huffman::new(&[7u8]).unwrap();
        assert_eq!(huffman.code(0), Ok(Code::new(0, 1)));

        let encoded = huffman.encode(vec![0, 0, 0]).unwrap();
        assert_eq!(encoded.bits, 3);
        assert_eq!(huffman.decode(&encoded), Ok(vec![0, 0, 0]));
    }

    #[test]
    fn probabilities() {
        let huffman = Huffman::from_probabilities(&[0.5, 0.25, 0.125, 0.125]).unwrap();
        let codes: Vec<_> = huffman.codes().collect();

        assert_eq!(huffman.weight(), OrderedFloat(1.0));
        assert_eq!(
            codes.iter().map(|c| c.len).collect::<Vec<_>>(),
            vec![1, 2, 3, 3]
        );

        assert_eq!(
            Huffman::from_probabilities(&[0.5, f64::NAN]).unwrap_err(),
            HuffmanError::InvalidWeight { symbol: 1 }
        );
        assert_eq!(
            Huffman::from_probabilities(&[0.5, -0.1]).unwrap_err(),
            HuffmanError::InvalidWeight { symbol: 1 }
        );
    }

    #[test]
    fn errors() {
        let empty: [u32; 0] = [];
        assert_eq!(
            Huffman::new(&empty).unwrap_err(),
            HuffmanError::EmptyAlphabet
        );
        assert_eq!(
            Huffman::new(&[1i32, -2]).unwrap_err(),
            HuffmanError::InvalidWeight { symbol: 1 }
        );

        let huffman = Huffman::new(&FREQS).unwrap();
        assert_eq!(huffman.code(6), Err(HuffmanError::UnknownSymbol(6)));
        assert_eq!(
            huffman.encode(vec![0, 9]).unwrap_err(),
            HuffmanError::UnknownSymbol(9)
        );

        // symbol 5 has a 4-bit code, drop its last bit
        let mut encoded = huffman.encode(vec![5]).unwrap();
        encoded.bits -= 1;
        assert_eq!(huffman.decode(&encoded), Err(HuffmanError::TruncatedInput));

        encoded.bits = 100;
        assert_eq!(huffman.decode(&encoded), Err(HuffmanError::TruncatedInput));
    }

    #[test]
    fn narrow_weights_overflow() {
        assert_eq!(
            Huffman::new(&[200u8, 100]).unwrap_err(),
            HuffmanError::WeightOverflow
        );
        assert_eq!(
            Huffman::new(&[100i8, 27, 1]).unwrap_err(),
            HuffmanError::WeightOverflow
        );

        let huffman = Huffman::new(&[200u16, 100]).unwrap();
        assert_eq!(huffman.weight(), 300);
        assert!(!huffman.is_empty());
        assert_eq!(huffman.len(), 2);
    }

    #[test]
    fn fibonacci_weights_overflow_code() {
        let mut fib = vec![1u64, 1];
        while fib.len() < 40 {
            let next = fib[fib.len() - 1] + fib[fib.len() - 2];
            fib.push(next);
        }

        assert!(Huffman::new(&fib[..33]).is_ok());
        assert!(matches!(
            Huffman::new(&fib[..]),
            Err(HuffmanError::CodeTooLong { .. })
        ));
    }
}
