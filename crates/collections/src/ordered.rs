//! Sorted collection of value objects.

use core::cmp::Ordering;
use core::hash::{Hash, Hasher};
use std::sync::Arc;

use ddd_blocks_core::error::check_copy_bounds;
use ddd_blocks_core::{DomainResult, FieldValue, HashCode, ValueObject};

use crate::comparator::Comparator;

/// Value objects kept sorted by an injected comparator.
///
/// The collection is itself a value object. Equality pairs elements position
/// by position across the two sorted sequences and compares each pair
/// structurally, so two collections filled in different orders compare equal
/// once they converge to the same sorted order.
///
/// Only the shared prefix is compared: a collection holding extra trailing
/// elements still equals the shorter one. Hashes of such collections differ.
///
/// Elements are held behind `Arc`; [`OrderedValueObjects::copy`] shares them
/// with the original.
#[derive(Debug, Clone)]
pub struct OrderedValueObjects<T> {
    comparator: Comparator<T>,
    items: Vec<Arc<T>>,
}

impl<T: ValueObject + Ord> OrderedValueObjects<T> {
    /// Empty collection ordered by `T`'s own `Ord`.
    pub fn new() -> Self {
        Self::with_comparator(Comparator::natural())
    }
}

impl<T: ValueObject + Ord> Default for OrderedValueObjects<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ValueObject> OrderedValueObjects<T> {
    pub fn with_comparator(comparator: Comparator<T>) -> Self {
        Self {
            comparator,
            items: Vec::new(),
        }
    }

    pub fn comparator(&self) -> &Comparator<T> {
        &self.comparator
    }

    fn search(&self, item: &T) -> Result<usize, usize> {
        self.items
            .binary_search_by(|probe| self.comparator.compare(probe, item))
    }

    /// Insert `item` at its sorted position.
    ///
    /// An item ranked equal to existing ones goes in front of them.
    ///
    /// # Panics
    ///
    /// Panics when the comparator ranks the new item out of order with its
    /// neighbours, i.e. the comparator is not a total order.
    pub fn add(&mut self, item: impl Into<Arc<T>>) {
        let item = item.into();
        let index = self
            .items
            .partition_point(|probe| self.comparator.compare(probe, &item) == Ordering::Less);
        self.items.insert(index, item);

        assert!(
            self.is_sorted_around(index),
            "comparator is not a total order over the collection"
        );
        tracing::trace!(index, len = self.items.len(), "inserted value object");
    }

    /// Remove an element ranked equal to `item`.
    ///
    /// When several elements share the rank, which one is removed is
    /// unspecified.
    pub fn remove(&mut self, item: &T) -> bool {
        match self.search(item) {
            Ok(index) => {
                self.items.remove(index);
                tracing::trace!(index, len = self.items.len(), "removed value object");
                true
            }
            Err(_) => false,
        }
    }

    /// Whether an element ranked equal to `item` is present.
    pub fn contains(&self, item: &T) -> bool {
        self.search(item).is_ok()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Arc<T>> {
        self.items.get(index)
    }

    pub fn first(&self) -> Option<&Arc<T>> {
        self.items.first()
    }

    pub fn last(&self) -> Option<&Arc<T>> {
        self.items.last()
    }

    pub fn as_slice(&self) -> &[Arc<T>] {
        &self.items
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Arc<T>> {
        self.items.iter()
    }

    /// Copy the element references into `destination`, starting at `index`.
    ///
    /// Nothing is written unless every element fits.
    pub fn copy_to(&self, destination: &mut [Arc<T>], index: usize) -> DomainResult<()> {
        if let Err(err) = check_copy_bounds(self.items.len(), destination.len(), index) {
            tracing::debug!(error = %err, "rejected copy of ordered value objects");
            return Err(err);
        }
        destination[index..index + self.items.len()].clone_from_slice(&self.items);
        Ok(())
    }

    /// New collection with the same comparator over the same element references.
    pub fn copy(&self) -> Self {
        Self {
            comparator: self.comparator.clone(),
            items: self.items.clone(),
        }
    }

    fn is_sorted_around(&self, index: usize) -> bool {
        let start = index.saturating_sub(1);
        let end = (index + 2).min(self.items.len());
        self.items[start..end]
            .is_sorted_by(|a, b| self.comparator.compare(a, b) != Ordering::Greater)
    }
}

impl<T: ValueObject> ValueObject for OrderedValueObjects<T> {
    fn equals(&self, other: &Self) -> bool {
        self.items
            .iter()
            .zip(&other.items)
            .all(|(a, b)| Arc::ptr_eq(a, b) || a.equals(b))
    }

    fn hash_fields(&self, hasher: &mut HashCode) {
        hasher.extend(self.items.iter().map(|item| item.value_hash()));
    }

    fn copy_into(&self, destination: &mut Self) {
        *destination = self.copy();
    }
}

impl<T: ValueObject> FieldValue for OrderedValueObjects<T> {
    fn field_eq(&self, other: &Self) -> bool {
        self.equals_opt(Some(other))
    }

    fn field_hash(&self) -> Option<i32> {
        Some(self.value_hash())
    }
}

impl<T: ValueObject> PartialEq for OrderedValueObjects<T> {
    fn eq(&self, other: &Self) -> bool {
        self.equals_opt(Some(other))
    }
}

impl<T: ValueObject> Hash for OrderedValueObjects<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i32(self.value_hash());
    }
}

impl<T: ValueObject> Extend<T> for OrderedValueObjects<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

impl<T: ValueObject + Ord> FromIterator<T> for OrderedValueObjects<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut collection = Self::new();
        collection.extend(iter);
        collection
    }
}

impl<'a, T> IntoIterator for &'a OrderedValueObjects<T> {
    type Item = &'a Arc<T>;
    type IntoIter = core::slice::Iter<'a, Arc<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ddd_blocks_core::DomainError;
    use proptest::prelude::*;

    #[derive(Debug, Clone, Default)]
    struct Grade {
        label: String,
        rank: i32,
    }

    ddd_blocks_core::value_object!(Grade { label, rank });

    impl Eq for Grade {}

    impl PartialOrd for Grade {
        fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
            Some(self.cmp(other))
        }
    }

    impl Ord for Grade {
        fn cmp(&self, other: &Self) -> Ordering {
            self.rank.cmp(&other.rank)
        }
    }

    fn grade(label: &str, rank: i32) -> Grade {
        Grade {
            label: label.to_string(),
            rank,
        }
    }

    fn labels(collection: &OrderedValueObjects<Grade>) -> Vec<String> {
        collection.iter().map(|g| g.label.clone()).collect()
    }

    #[test]
    fn add_keeps_natural_order() {
        let collection: OrderedValueObjects<Grade> =
            [grade("c", 3), grade("a", 1), grade("b", 2)].into_iter().collect();

        assert_eq!(labels(&collection), ["a", "b", "c"]);
        assert_eq!(collection.len(), 3);
    }

    #[test]
    fn equal_ranked_items_go_in_front() {
        let mut collection = OrderedValueObjects::new();
        collection.add(grade("low", 1));
        collection.add(grade("first", 2));
        collection.add(grade("high", 3));
        collection.add(grade("second", 2));

        assert_eq!(labels(&collection), ["low", "second", "first", "high"]);
    }

    #[test]
    fn injected_comparator_wins_over_natural_order() {
        let mut collection =
            OrderedValueObjects::with_comparator(Comparator::by_key(|g: &Grade| g.label.clone()));
        collection.add(grade("b", 1));
        collection.add(grade("a", 2));

        assert_eq!(labels(&collection), ["a", "b"]);
    }

    #[test]
    fn remove_by_rank() {
        let mut collection: OrderedValueObjects<Grade> =
            [grade("a", 1), grade("b", 2)].into_iter().collect();

        assert!(collection.remove(&grade("anything", 2)));
        assert!(!collection.remove(&grade("b", 2)));
        assert_eq!(labels(&collection), ["a"]);
    }

    #[test]
    fn contains_and_clear() {
        let mut collection: OrderedValueObjects<Grade> = [grade("a", 1)].into_iter().collect();
        assert!(collection.contains(&grade("a", 1)));
        assert!(!collection.contains(&grade("a", 5)));

        collection.clear();
        assert!(collection.is_empty());
        assert!(!collection.contains(&grade("a", 1)));
    }

    #[test]
    fn copy_shares_element_references() {
        let collection: OrderedValueObjects<Grade> =
            [grade("a", 1), grade("b", 2)].into_iter().collect();
        let copy = collection.copy();

        assert_eq!(collection, copy);
        for (a, b) in collection.iter().zip(&copy) {
            assert!(Arc::ptr_eq(a, b));
        }
    }

    #[test]
    fn copy_keeps_the_comparator() {
        let mut collection =
            OrderedValueObjects::with_comparator(Comparator::<Grade>::natural().reversed());
        collection.add(grade("a", 1));
        let mut copy = collection.copy();
        copy.add(grade("b", 2));

        assert_eq!(labels(&copy), ["b", "a"]);
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn extra_trailing_elements_are_ignored_by_equality() {
        let short: OrderedValueObjects<Grade> = [grade("a", 1)].into_iter().collect();
        let long: OrderedValueObjects<Grade> =
            [grade("a", 1), grade("b", 2)].into_iter().collect();

        assert_eq!(short, long);
        assert_ne!(short.value_hash(), long.value_hash());
        assert_eq!(OrderedValueObjects::<Grade>::new(), long);
    }

    #[test]
    fn hash_folds_element_hashes_in_order() {
        let collection: OrderedValueObjects<Grade> =
            [grade("b", 2), grade("a", 1)].into_iter().collect();

        let mut expected = HashCode::new();
        expected.add(grade("a", 1).value_hash());
        expected.add(grade("b", 2).value_hash());
        assert_eq!(collection.value_hash(), expected.finish());
        assert_eq!(OrderedValueObjects::<Grade>::new().value_hash(), 17);
    }

    #[test]
    #[should_panic(expected = "comparator is not a total order")]
    fn add_rejects_an_inconsistent_comparator() {
        let mut collection =
            OrderedValueObjects::with_comparator(Comparator::new(|_: &Grade, _: &Grade| {
                Ordering::Greater
            }));
        collection.add(grade("a", 1));
        collection.add(grade("b", 2));
    }

    #[test]
    fn copy_to_writes_at_offset() {
        let collection: OrderedValueObjects<Grade> =
            [grade("a", 1), grade("b", 2)].into_iter().collect();
        let filler = Arc::new(grade("x", 0));
        let mut destination = vec![Arc::clone(&filler); 3];

        collection.copy_to(&mut destination, 1).unwrap();
        assert_eq!(destination[0].label, "x");
        assert_eq!(destination[1].label, "a");
        assert_eq!(destination[2].label, "b");
    }

    #[test]
    fn copy_to_rejects_short_destination() {
        let collection: OrderedValueObjects<Grade> =
            [grade("a", 1), grade("b", 2)].into_iter().collect();
        let filler = Arc::new(grade("x", 0));
        let mut destination = vec![Arc::clone(&filler); 2];

        let err = collection.copy_to(&mut destination, 1).unwrap_err();
        assert_eq!(err, DomainError::insufficient_capacity(2, 1));
        assert!(destination.iter().all(|g| g.label == "x"));

        let err = collection.copy_to(&mut destination, 3).unwrap_err();
        assert_eq!(err, DomainError::index_out_of_range(3, 2));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: iteration is non-decreasing after any sequence of adds.
        #[test]
        fn stays_sorted(ranks in prop::collection::vec(-50i32..50, 0..40)) {
            let mut collection = OrderedValueObjects::new();
            for (i, rank) in ranks.iter().enumerate() {
                collection.add(grade(&i.to_string(), *rank));
            }

            prop_assert_eq!(collection.len(), ranks.len());
            let sorted: Vec<i32> = collection.iter().map(|g| g.rank).collect();
            prop_assert!(sorted.windows(2).all(|w| w[0] <= w[1]));
        }

        /// Property: insertion order does not matter once ranks are distinct.
        #[test]
        fn permutation_converges(ranks in prop::collection::btree_set(0i32..1000, 0..20)) {
            let mut ranks: Vec<i32> = ranks.into_iter().collect();
            let forward: OrderedValueObjects<Grade> =
                ranks.iter().map(|r| grade("g", *r)).collect();
            ranks.reverse();
            let backward: OrderedValueObjects<Grade> =
                ranks.iter().map(|r| grade("G", *r)).collect();

            prop_assert_eq!(&forward, &backward);
            prop_assert_eq!(forward.value_hash(), backward.value_hash());
        }
    }
}
