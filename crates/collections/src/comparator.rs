//! Total-order comparators injected into ordered collections.

use core::cmp::Ordering;
use core::fmt;
use std::sync::Arc;

type CompareFn<T> = dyn Fn(&T, &T) -> Ordering + Send + Sync;

/// Shareable total order over `T`.
///
/// The order must stay the same for the lifetime of any collection using it;
/// a collection sorted under one order is not re-sorted if the semantics of
/// the function change.
pub struct Comparator<T> {
    compare: Arc<CompareFn<T>>,
}

impl<T: 'static> Comparator<T> {
    pub fn new<F>(compare: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        Self {
            compare: Arc::new(compare),
        }
    }

    /// The element type's own `Ord`.
    pub fn natural() -> Self
    where
        T: Ord,
    {
        Self::new(|a: &T, b: &T| a.cmp(b))
    }

    /// Order by a key extracted from each element.
    pub fn by_key<K, F>(key: F) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        Self::new(move |a, b| key(a).cmp(&key(b)))
    }

    pub fn reversed(&self) -> Self {
        let inner = Arc::clone(&self.compare);
        Self::new(move |a, b| inner(b, a))
    }
}

impl<T> Comparator<T> {
    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.compare)(a, b)
    }
}

impl<T> Clone for Comparator<T> {
    fn clone(&self) -> Self {
        Self {
            compare: Arc::clone(&self.compare),
        }
    }
}

impl<T> fmt::Debug for Comparator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Comparator").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_order_uses_ord() {
        let cmp = Comparator::<i32>::natural();
        assert_eq!(cmp.compare(&1, &2), Ordering::Less);
        assert_eq!(cmp.compare(&2, &2), Ordering::Equal);
    }

    #[test]
    fn by_key_and_reversed() {
        let by_len = Comparator::<String>::by_key(|s| s.len());
        assert_eq!(by_len.compare(&"ab".into(), &"a".into()), Ordering::Greater);
        assert_eq!(
            by_len.reversed().compare(&"ab".into(), &"a".into()),
            Ordering::Less
        );
    }

    #[test]
    fn clones_share_the_same_order() {
        let cmp = Comparator::<i32>::new(|a, b| b.cmp(a));
        let copy = cmp.clone();
        assert_eq!(copy.compare(&1, &2), Ordering::Greater);
    }
}
