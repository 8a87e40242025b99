/// A strict "better-than" relation deciding which element belongs closer to the root.
///
/// `better(a, b)` must be a strict total order: irreflexive, transitive and consistent for the
/// lifetime of the heap that owns it. A heap never checks this.
pub trait Order<T: ?Sized> {
    fn better(&self, a: &T, b: &T) -> bool;
}

impl<T: ?Sized, O: Order<T> + ?Sized> Order<T> for &O {
    #[inline]
    fn better(&self, a: &T, b: &T) -> bool {
        (**self).better(a, b)
    }
}

/// `a > b`. Makes a max-heap.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct Greater;

impl<T: PartialOrd + ?Sized> Order<T> for Greater {
    #[inline]
    fn better(&self, a: &T, b: &T) -> bool {
        a > b
    }
}

/// `a < b`. Makes a min-heap.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct Less;

impl<T: PartialOrd + ?Sized> Order<T> for Less {
    #[inline]
    fn better(&self, a: &T, b: &T) -> bool {
        a < b
    }
}

/// An order backed by a closure, see [`order_fn`].
#[derive(Clone, Copy, Default, Debug)]
pub struct FnOrder<F>(F);

/// Uses `f(a, b)` as the better-than predicate.
#[inline]
pub const fn order_fn<F>(f: F) -> FnOrder<F> {
    FnOrder(f)
}

impl<T: ?Sized, F: Fn(&T, &T) -> bool> Order<T> for FnOrder<F> {
    #[inline]
    fn better(&self, a: &T, b: &T) -> bool {
        (self.0)(a, b)
    }
}

/// Compares the keys extracted by `key` under `order`.
#[derive(Clone, Copy, Default, Debug)]
pub struct ByKey<F, O> {
    key: F,
    order: O,
}

impl<F, O> ByKey<F, O> {
    #[inline]
    pub const fn new(key: F, order: O) -> Self {
        Self { key, order }
    }
}

impl<T: ?Sized, K, F: Fn(&T) -> K, O: Order<K>> Order<T> for ByKey<F, O> {
    #[inline]
    fn better(&self, a: &T, b: &T) -> bool {
        self.order.better(&(self.key)(a), &(self.key)(b))
    }
}

/// Flips the direction of the inner order.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct Reversed<O>(pub O);

impl<T: ?Sized, O: Order<T>> Order<T> for Reversed<O> {
    #[inline]
    fn better(&self, a: &T, b: &T) -> bool {
        self.0.better(b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greater_and_less_are_strict() {
        assert!(Greater.better(&3, &2));
        assert!(!Greater.better(&2, &2));
        assert!(Less.better(&2, &3));
        assert!(!Less.better(&2, &2));
    }

    #[test]
    fn reversed_swaps_direction() {
        assert!(Reversed(Greater).better(&2, &3));
        assert!(!Reversed(Less).better(&2, &3));
    }

    #[test]
    fn by_key_and_closures() {
        let by_len = ByKey::new(|s: &&str| s.len(), Greater);
        assert!(by_len.better(&"abc", &"z"));

        let even_first = order_fn(|a: &u32, b: &u32| (a % 2, a) < (b % 2, b));
        assert!(even_first.better(&4, &1));
        assert!(even_first.better(&2, &4));
        assert!(!even_first.better(&3, &2));
        assert!((&even_first).better(&0, &1));
    }
}
