use crate::heap::{build_heap, sift_down};
use crate::order::{Greater, Order};

/// Sorts `data` ascending in place.
///
/// O(n log n), O(1) extra space
#[inline]
pub fn heap_sort<T: Ord>(data: &mut [T]) {
    heap_sort_by(data, &Greater);
}

/// Sorts `data` in place so that the best element under `order` ends up last.
///
/// `Greater` sorts ascending, `Less` sorts descending.
///
/// O(n log n), O(1) extra space
pub fn heap_sort_by<T, O: Order<T>>(data: &mut [T], order: &O) {
    build_heap(data, order);
    sort_heap(data, order);
}

/// `data` must already be a heap under `order`.
pub(crate) fn sort_heap<T, O: Order<T>>(data: &mut [T], order: &O) {
    for end in (1..data.len()).rev() {
        // the root is the best of the active region `data[..=end]`
        data.swap(0, end);
        sift_down(&mut data[..end], order, 0);
    }
}
