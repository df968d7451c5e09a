//! Value object trait: equality by value, not identity.
//!
//! Value objects are domain objects that have **no identity** - they are defined entirely
//! by their attribute values. Two value objects with the same values are considered equal.

use core::any::Any;

use crate::hash::HashCode;

/// Structural equality, hashing and shallow copy for value objects.
///
/// Equality walks every field in declaration order and applies the per-type
/// rule of [`FieldValue`](crate::FieldValue): absent values, dates compared on
/// the calendar date, strings compared case-insensitively, sequences compared
/// element by element. Hashing folds the same fields into a [`HashCode`].
///
/// ## Value Object vs Entity
///
/// - **Value Object**: No identity (two value objects with same values are equal)
/// - **Entity**: Has identity (two entities with same ID are the same entity)
///
/// ## Inheritance
///
/// A value object may embed a *base* value object. The base fields are walked
/// first, as if they were declared on the embedding type, for equality,
/// hashing and copy alike.
///
/// ## Usage Pattern
///
/// Implement the trait through [`value_object!`](crate::value_object), listing
/// the fields in declaration order. The macro also provides `PartialEq` and
/// `Hash`, so do not derive those.
///
/// ```ignore
/// #[derive(Debug, Clone, Default)]
/// struct Person {
///     name: String,
///     age: u32,
///     birth_date: Option<NaiveDateTime>,
/// }
///
/// value_object!(Person { name, age, birth_date });
///
/// #[derive(Debug, Clone, Default)]
/// struct Employee {
///     person: Person,
///     title: Option<String>,
/// }
///
/// value_object!(Employee { ..person; title });
/// ```
pub trait ValueObject: Clone + core::fmt::Debug + 'static {
    /// Compare every field against `other`, stopping at the first mismatch.
    fn equals(&self, other: &Self) -> bool;

    /// Fold every present field into `hasher`, base fields first.
    fn hash_fields(&self, hasher: &mut HashCode);

    /// Shallow-copy every present field into `destination`.
    ///
    /// Fields that are absent on `self` are left as they are on `destination`.
    fn copy_into(&self, destination: &mut Self);

    /// Hash code derived from the fields, seeded at 17 with multiplier 59.
    fn value_hash(&self) -> i32 {
        let mut hasher = HashCode::new();
        self.hash_fields(&mut hasher);
        hasher.finish()
    }

    /// Equality against a possibly absent instance. Absent is never equal.
    fn equals_opt(&self, other: Option<&Self>) -> bool {
        match other {
            None => false,
            Some(other) => core::ptr::eq(self, other) || self.equals(other),
        }
    }

    /// Equality against a value of unknown type.
    ///
    /// Instances of a different concrete type are never equal, even when
    /// their fields line up.
    fn equals_any(&self, other: &dyn Any) -> bool {
        other
            .downcast_ref::<Self>()
            .is_some_and(|other| self.equals_opt(Some(other)))
    }
}

/// `==` over possibly absent references.
///
/// Two absent values are equal, the same reference is equal to itself, and an
/// absent value is never equal to a present one.
pub fn equal<T: ValueObject>(x: Option<&T>, y: Option<&T>) -> bool {
    match x {
        None => y.is_none(),
        Some(x) => x.equals_opt(y),
    }
}

/// `!=` over possibly absent references.
pub fn not_equal<T: ValueObject>(x: Option<&T>, y: Option<&T>) -> bool {
    !equal(x, y)
}

/// Implement [`ValueObject`], [`FieldValue`](crate::FieldValue), `PartialEq`
/// and `Hash` for a struct by listing its fields in declaration order.
///
/// An embedded base value object is named first with `..field;`.
#[macro_export]
macro_rules! value_object {
    ($name:ident { $(.. $base:ident ;)? $($field:ident),* $(,)? }) => {
        impl $crate::ValueObject for $name {
            #[allow(unused_variables)]
            fn equals(&self, other: &Self) -> bool {
                $(
                    if !$crate::ValueObject::equals(&self.$base, &other.$base) {
                        return false;
                    }
                )?
                $(
                    if !$crate::FieldValue::field_eq(&self.$field, &other.$field) {
                        return false;
                    }
                )*
                true
            }

            #[allow(unused_variables)]
            fn hash_fields(&self, hasher: &mut $crate::HashCode) {
                $( $crate::ValueObject::hash_fields(&self.$base, hasher); )?
                $( hasher.add_field(&self.$field); )*
            }

            #[allow(unused_variables)]
            fn copy_into(&self, destination: &mut Self) {
                $( $crate::ValueObject::copy_into(&self.$base, &mut destination.$base); )?
                $( $crate::FieldValue::copy_field(&self.$field, &mut destination.$field); )*
            }
        }

        impl $crate::FieldValue for $name {
            fn field_eq(&self, other: &Self) -> bool {
                $crate::ValueObject::equals_opt(self, Some(other))
            }

            fn field_hash(&self) -> Option<i32> {
                Some($crate::ValueObject::value_hash(self))
            }
        }

        impl ::core::cmp::PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                $crate::ValueObject::equals_opt(self, Some(other))
            }
        }

        impl ::core::hash::Hash for $name {
            fn hash<H: ::core::hash::Hasher>(&self, state: &mut H) {
                state.write_i32($crate::ValueObject::value_hash(self));
            }
        }
    };
}
