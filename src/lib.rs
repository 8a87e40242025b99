mod error;
mod heap;
mod huffman;
mod order;
mod sort;

pub use error::{HeapError, HuffmanError};
pub use heap::{Heap, MaxHeap, MinHeap};
pub use huffman::{Code, Encoded, Huffman, Weight};
pub use order::{order_fn, ByKey, FnOrder, Greater, Less, Order, Reversed};
pub use sort::{heap_sort, heap_sort_by};

use rand::prelude::*;

fn bench<F: FnOnce()>(name: &str, num_tabs: usize, f: F) {
    use std::time::{Duration, Instant};
    let start = Instant::now();
    f();
    let elapsed = start.elapsed();

    print!("BENCH `{}` :", name);
    for _ in 0..num_tabs {
        print!("\t");
    }

    if elapsed < Duration::from_millis(1) {
        println!(
            "{} {:03} nanos",
            elapsed.as_micros(),
            elapsed.as_nanos() % 1000,
        );
    } else if elapsed < Duration::from_secs(1) {
        println!(
            "{} {:03} micros",
            elapsed.as_millis(),
            elapsed.as_micros() % 1000,
        );
    } else {
        println!(
            "{} {:03} millis",
            elapsed.as_secs(),
            elapsed.subsec_millis(),
        );
    }
}

#[allow(dead_code)]
fn bench_heap_cmpheap() {
    use std::collections::BinaryHeap;

    let mut rng = SmallRng::from_entropy();

    const N: usize = 1 << 16;

    let values: Vec<u32> = (0..N).map(|_| rng.gen_range(0..1000_000)).collect();
    let updates: Vec<(usize, u32)> = (0..N)
        .map(|_| (rng.gen_range(0..N), rng.gen_range(0..1000_000)))
        .collect();

    let mut expected = values.clone();
    expected.sort_unstable_by(|a, b| b.cmp(a));

    let mut std_heap = BinaryHeap::new();
    bench("std::collections::BinaryHeap::from", 2, || {
        std_heap = BinaryHeap::from(values.clone());
    });
    bench("std::collections::BinaryHeap::pop", 2, || {
        for &x in expected.iter() {
            assert_eq!(std_heap.pop(), Some(x));
        }
    });
    bench("std::collections::BinaryHeap::push", 2, || {
        for &x in values.iter() {
            std_heap.push(x);
        }
    });
    println!();

    let mut heap = MaxHeap::new(Greater);
    bench("MaxHeap::from_vec", 5, || {
        heap = MaxHeap::from_vec(values.clone(), Greater);
    });
    bench("MaxHeap::extract_root", 4, || {
        for &x in expected.iter() {
            assert_eq!(heap.extract_root(), Ok(x));
        }
    });
    bench("MaxHeap::insert", 5, || {
        for (len, &x) in values.iter().enumerate() {
            assert_eq!(heap.len(), len);
            heap.insert(x);
        }
    });
    bench("MaxHeap::update_key", 4, || {
        for &(i, x) in updates.iter() {
            heap.update_key(i, x);
        }
    });
    assert!(heap.is_heap());
    println!();

    let mut a = values.clone();
    bench("slice::sort_unstable", 4, || a.sort_unstable());
    let mut b = values;
    bench("heap_sort", 6, || heap_sort(&mut b));
    assert_eq!(a, b);
}

#[allow(dead_code)]
fn validate_huffman_cmpheap() {
    let mut rng = SmallRng::from_entropy();

    const SYMBOLS: usize = 256;
    const N: usize = 64 * 1024;

    let weights: Vec<u64> = (0..SYMBOLS).map(|_| rng.gen_range(1..1000)).collect();
    let huffman = Huffman::new(&weights[..]).unwrap();

    let message: Vec<usize> = (0..N).map(|_| rng.gen_range(0..SYMBOLS)).collect();

    println!("[Validate Huffman]");
    let mut encoded = Encoded::default();
    bench("Huffman::encode", 1, || {
        encoded = huffman.encode(message.iter().copied()).unwrap();
    });
    let mut decoded = Vec::new();
    bench("Huffman::decode", 1, || {
        decoded = huffman.decode(&encoded).unwrap();
    });
    assert_eq!(decoded, message);
    println!("Huffman VALIDATED");
    println!();
}

#[test]
pub fn main() {
    validate_huffman_cmpheap();
    bench_heap_cmpheap();
}
