//! `ddd-blocks-collections` — groups of value objects with value semantics.
//!
//! Both collections are value objects themselves and compare their elements
//! positionally with the structural equality of `ddd-blocks-core`.

pub mod comparator;
pub mod ordered;
pub mod unordered;

pub use comparator::Comparator;
pub use ordered::OrderedValueObjects;
pub use unordered::UnorderedValueObjects;
