use crate::error::HeapError;
use crate::order::{Greater, Less, Order};

/// A binary heap over a `Vec`, ordered by an [`Order`] strategy fixed at construction.
///
/// The element at index 0 is the root. For every other index `i`, the element at `i` is never
/// better than the element at its parent `(i - 1) / 2`.
#[derive(Clone, Debug)]
pub struct Heap<T, O> {
    data: Vec<T>,
    order: O,
}

pub type MaxHeap<T> = Heap<T, Greater>;
pub type MinHeap<T> = Heap<T, Less>;

/// Moves `data[node]` down until neither child is better than it.
/// Both subtrees of `node` must already be heaps.
///
/// O(log n)
pub(crate) fn sift_down<T, O: Order<T>>(data: &mut [T], order: &O, mut node: usize) {
    let len = data.len();
    loop {
        let left = 2 * node + 1;
        let right = left + 1;

        let mut best = node;
        if left < len && order.better(&data[left], &data[best]) {
            best = left;
        }
        if right < len && order.better(&data[right], &data[best]) {
            best = right;
        }

        if best == node {
            break;
        }
        data.swap(node, best);
        node = best;
    }
}

/// Moves `data[node]` up while it is better than its parent.
///
/// O(log n)
pub(crate) fn sift_up<T, O: Order<T>>(data: &mut [T], order: &O, mut node: usize) {
    while node != 0 {
        let parent = (node - 1) / 2;

        if order.better(&data[node], &data[parent]) {
            data.swap(parent, node);
            node = parent;
        } else {
            break;
        }
    }
}

/// Bottom-up heap construction, children before parents.
///
/// O(n)
pub(crate) fn build_heap<T, O: Order<T>>(data: &mut [T], order: &O) {
    for i in (0..data.len() / 2).rev() {
        sift_down(data, order, i);
    }
}

pub(crate) fn is_heap<T, O: Order<T>>(data: &[T], order: &O) -> bool {
    (1..data.len()).all(|i| !order.better(&data[i], &data[(i - 1) / 2]))
}

impl<T, O: Order<T>> Heap<T, O> {
    /// O(1)
    #[inline]
    pub fn new(order: O) -> Self {
        Self {
            data: Vec::new(),
            order,
        }
    }

    /// O(1)
    #[inline]
    pub fn with_capacity(order: O, capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            order,
        }
    }

    /// Turns `data` into a heap in place.
    ///
    /// O(n)
    pub fn from_vec(mut data: Vec<T>, order: O) -> Self {
        build_heap(&mut data, &order);
        Self { data, order }
    }

    /// O(n)
    pub fn build<Iter: IntoIterator<Item = T>>(iter: Iter, order: O) -> Self {
        Self::from_vec(iter.into_iter().collect(), order)
    }

    /// O(1)
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// O(1)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    pub fn reserve(&mut self, additional: usize) {
        self.data.reserve(additional);
    }

    #[inline]
    pub fn order(&self) -> &O {
        &self.order
    }

    /// The backing storage in array order (root first, then level by level).
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// O(1)
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }

    /// O(1)
    #[inline]
    pub fn peek(&self) -> Result<&T, HeapError> {
        self.data.first().ok_or(HeapError::Underflow)
    }

    /// O(log n)
    pub fn insert(&mut self, value: T) {
        self.data.push(value);
        let last = self.len() - 1;
        sift_up(&mut self.data, &self.order, last);
    }

    /// Removes the root. The heap is left untouched when it is empty.
    ///
    /// O(log n)
    pub fn extract_root(&mut self) -> Result<T, HeapError> {
        if self.data.is_empty() {
            return Err(HeapError::Underflow);
        }

        let root = self.data.swap_remove(0);
        if !self.data.is_empty() {
            sift_down(&mut self.data, &self.order, 0);
        }

        Ok(root)
    }

    /// Replaces the element at `index` and restores the heap, returning the old element.
    ///
    /// A value better than the one it replaces can only conflict with its ancestors, so it is
    /// sifted up; anything else is sifted down.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    ///
    /// O(log n)
    pub fn update_key(&mut self, index: usize, value: T) -> T {
        let old = std::mem::replace(&mut self.data[index], value);

        if self.order.better(&self.data[index], &old) {
            sift_up(&mut self.data, &self.order, index);
        } else {
            sift_down(&mut self.data, &self.order, index);
        }

        old
    }

    /// O(n)
    pub fn is_heap(&self) -> bool {
        is_heap(&self.data, &self.order)
    }

    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// All elements in extraction order, best first.
    ///
    /// O(n log n)
    pub fn into_sorted_vec(self) -> Vec<T> {
        let Self { mut data, order } = self;
        crate::sort::sort_heap(&mut data, &order);
        data.reverse();
        data
    }
}

impl<T, O: Order<T> + Default> Default for Heap<T, O> {
    #[inline]
    fn default() -> Self {
        Self::new(O::default())
    }
}

impl<T, O: Order<T> + Default> std::iter::FromIterator<T> for Heap<T, O> {
    /// O(n)
    fn from_iter<Iter: IntoIterator<Item = T>>(iter: Iter) -> Self {
        Self::build(iter, O::default())
    }
}

impl<T, O: Order<T>> Extend<T> for Heap<T, O> {
    fn extend<Iter: IntoIterator<Item = T>>(&mut self, iter: Iter) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        self.reserve(lower);

        for x in iter {
            self.insert(x);
        }
    }
}
