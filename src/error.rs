use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeapError {
    #[error("heap underflow: the heap is empty")]
    Underflow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HuffmanError {
    #[error("cannot build a code for an empty alphabet")]
    EmptyAlphabet,
    #[error("symbol {symbol} has a negative or NaN weight")]
    InvalidWeight { symbol: usize },
    #[error("code for symbol {symbol} is longer than 32 bits")]
    CodeTooLong { symbol: usize },
    #[error("unknown symbol {0}")]
    UnknownSymbol(usize),
    #[error("sum of weights overflows the weight type")]
    WeightOverflow,
    #[error("input ends in the middle of a code")]
    TruncatedInput,
    #[error(transparent)]
    Heap(#[from] HeapError),
}
