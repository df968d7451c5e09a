//! Insertion-ordered collection of value objects.

use core::hash::{Hash, Hasher};
use std::sync::Arc;

use ddd_blocks_core::error::check_copy_bounds;
use ddd_blocks_core::{DomainResult, FieldValue, HashCode, ValueObject};

/// Value objects in insertion order, with no sort discipline.
///
/// Despite the name, equality and hashing are positional: elements are paired
/// by insertion position, so the same elements added in a different order
/// generally do not compare equal. As with
/// [`OrderedValueObjects`](crate::OrderedValueObjects) only the shared prefix
/// is compared.
#[derive(Debug, Clone)]
pub struct UnorderedValueObjects<T> {
    items: Vec<Arc<T>>,
}

impl<T: ValueObject> UnorderedValueObjects<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append `item`.
    pub fn add(&mut self, item: impl Into<Arc<T>>) {
        self.items.push(item.into());
        tracing::trace!(len = self.items.len(), "appended value object");
    }

    fn position(&self, item: &T) -> Option<usize> {
        self.items
            .iter()
            .position(|probe| core::ptr::eq(&**probe, item) || probe.equals(item))
    }

    /// Remove the first element that is `item` or structurally equal to it.
    pub fn remove(&mut self, item: &T) -> bool {
        match self.position(item) {
            Some(index) => {
                self.items.remove(index);
                tracing::trace!(index, len = self.items.len(), "removed value object");
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, item: &T) -> bool {
        self.position(item).is_some()
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

    pub fn as_slice(&self) -> &[Arc<T>] {
        &self.items
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Arc<T>> {
        self.items.iter()
    }

    /// Copy the element references into `destination`, starting at `index`.
    pub fn copy_to(&self, destination: &mut [Arc<T>], index: usize) -> DomainResult<()> {
        if let Err(err) = check_copy_bounds(self.items.len(), destination.len(), index) {
            tracing::debug!(error = %err, "rejected copy of unordered value objects");
            return Err(err);
        }
        destination[index..index + self.items.len()].clone_from_slice(&self.items);
        Ok(())
    }

    /// New collection over the same element references.
    pub fn copy(&self) -> Self {
        Self {
            items: self.items.clone(),
        }
    }
}

impl<T: ValueObject> Default for UnorderedValueObjects<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ValueObject> ValueObject for UnorderedValueObjects<T> {
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

impl<T: ValueObject> FieldValue for UnorderedValueObjects<T> {
    fn field_eq(&self, other: &Self) -> bool {
        self.equals_opt(Some(other))
    }

    fn field_hash(&self) -> Option<i32> {
        Some(self.value_hash())
    }
}

impl<T: ValueObject> PartialEq for UnorderedValueObjects<T> {
    fn eq(&self, other: &Self) -> bool {
        self.equals_opt(Some(other))
    }
}

impl<T: ValueObject> Hash for UnorderedValueObjects<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i32(self.value_hash());
    }
}

impl<T: ValueObject> Extend<T> for UnorderedValueObjects<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

impl<T: ValueObject> FromIterator<T> for UnorderedValueObjects<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut collection = Self::new();
        collection.extend(iter);
        collection
    }
}

impl<'a, T> IntoIterator for &'a UnorderedValueObjects<T> {
    type Item = &'a Arc<T>;
    type IntoIter = core::slice::Iter<'a, Arc<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
