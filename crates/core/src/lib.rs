//! `ddd-blocks-core` — structural equality for domain value objects.
//!
//! This crate contains the equality/hashing/copy engine (no collections, no
//! infrastructure concerns).

pub mod error;
pub mod field;
pub mod hash;
pub mod value_object;

pub use error::{DomainError, DomainResult};
pub use field::FieldValue;
pub use hash::HashCode;
pub use value_object::{ValueObject, equal, not_equal};
