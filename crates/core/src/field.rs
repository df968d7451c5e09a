//! Per-type comparison rules applied to each field of a value object.
//!
//! Every field type a value object can hold implements [`FieldValue`]. The
//! rules mirror what domain code expects from business data:
//!
//! - `Option<_>`: two absent values are equal, one absent value is not.
//! - dates: compared on the calendar date only, time of day and zone ignored.
//! - `String`: ordinal, case-insensitive.
//! - `Vec<_>`: element by element with each element's own equality, up to
//!   the shorter length.
//! - everything else: the value's own equality.

use std::sync::Arc;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Timelike};

use crate::hash::HashCode;

/// Equality, hashing and copy rule for a single field.
pub trait FieldValue: Clone {
    /// Compare with the corresponding field of another instance.
    fn field_eq(&self, other: &Self) -> bool;

    /// Hash contribution of this field, `None` when the value is absent.
    ///
    /// Values equal under [`FieldValue::field_eq`] yield the same hash.
    fn field_hash(&self) -> Option<i32>;

    /// The value's own equality, used when it is an element of a sequence.
    ///
    /// The field rules above apply to a field's declared type only; elements
    /// compare exactly (case-sensitive strings, full timestamps).
    fn own_eq(&self, other: &Self) -> bool {
        self.field_eq(other)
    }

    /// Hash consistent with [`FieldValue::own_eq`].
    fn own_hash(&self) -> Option<i32> {
        self.field_hash()
    }

    /// Shallow-copy this value over `destination`.
    ///
    /// Absent values leave the destination untouched.
    fn copy_field(&self, destination: &mut Self) {
        *destination = self.clone();
    }
}

macro_rules! impl_narrow_integer {
    ($($t:ty),* $(,)?) => {
        $(
            impl FieldValue for $t {
                fn field_eq(&self, other: &Self) -> bool {
                    self == other
                }

                fn field_hash(&self) -> Option<i32> {
                    Some(*self as i32)
                }
            }
        )*
    };
}

macro_rules! impl_wide_integer {
    ($($t:ty),* $(,)?) => {
        $(
            impl FieldValue for $t {
                fn field_eq(&self, other: &Self) -> bool {
                    self == other
                }

                fn field_hash(&self) -> Option<i32> {
                    Some(fold_u64(*self as u64))
                }
            }
        )*
    };
}

impl_narrow_integer!(i8, i16, i32, u8, u16, u32, char);
impl_wide_integer!(i64, u64, isize, usize);

fn fold_u64(bits: u64) -> i32 {
    (bits as u32 ^ (bits >> 32) as u32) as i32
}

impl FieldValue for bool {
    fn field_eq(&self, other: &Self) -> bool {
        self == other
    }

    fn field_hash(&self) -> Option<i32> {
        Some(i32::from(*self))
    }
}

// NaN equals NaN and both zeroes hash alike, so equality stays reflexive.
impl FieldValue for f64 {
    fn field_eq(&self, other: &Self) -> bool {
        self == other || (self.is_nan() && other.is_nan())
    }

    fn field_hash(&self) -> Option<i32> {
        if *self == 0.0 {
            return Some(0);
        }
        if self.is_nan() {
            return Some(fold_u64(f64::NAN.to_bits()));
        }
        Some(fold_u64(self.to_bits()))
    }
}

impl FieldValue for f32 {
    fn field_eq(&self, other: &Self) -> bool {
        self == other || (self.is_nan() && other.is_nan())
    }

    fn field_hash(&self) -> Option<i32> {
        if *self == 0.0 {
            return Some(0);
        }
        if self.is_nan() {
            return Some(f32::NAN.to_bits() as i32);
        }
        Some(self.to_bits() as i32)
    }
}

// One codepoint maps to exactly one; multi-char expansions (ß, ﬁ) stay as-is.
fn fold_char(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

fn folded(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().map(fold_char)
}

fn hash_chars(chars: impl Iterator<Item = char>) -> i32 {
    let mut hash = HashCode::new();
    hash.extend(chars.map(|c| c as i32));
    hash.finish()
}

/// Ordinal case-insensitive comparison (simple uppercase folding per codepoint).
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a == b || folded(a).eq(folded(b))
}

/// Hash consistent with [`eq_ignore_case`].
pub fn hash_ignore_case(s: &str) -> i32 {
    hash_chars(folded(s))
}

impl FieldValue for String {
    fn field_eq(&self, other: &Self) -> bool {
        eq_ignore_case(self, other)
    }

    fn field_hash(&self) -> Option<i32> {
        Some(hash_ignore_case(self))
    }

    fn own_eq(&self, other: &Self) -> bool {
        self == other
    }

    fn own_hash(&self) -> Option<i32> {
        Some(hash_chars(self.chars()))
    }
}

fn date_hash(date: NaiveDate) -> i32 {
    date.num_days_from_ce()
}

impl FieldValue for NaiveDate {
    fn field_eq(&self, other: &Self) -> bool {
        self == other
    }

    fn field_hash(&self) -> Option<i32> {
        Some(date_hash(*self))
    }
}

impl FieldValue for NaiveDateTime {
    fn field_eq(&self, other: &Self) -> bool {
        self.date() == other.date()
    }

    fn field_hash(&self) -> Option<i32> {
        Some(date_hash(self.date()))
    }

    fn own_eq(&self, other: &Self) -> bool {
        self == other
    }

    fn own_hash(&self) -> Option<i32> {
        Some(timestamp_hash(*self))
    }
}

fn timestamp_hash(at: NaiveDateTime) -> i32 {
    let mut hash = HashCode::new();
    hash.add(date_hash(at.date()));
    hash.add(at.num_seconds_from_midnight() as i32);
    hash.add(at.nanosecond() as i32);
    hash.finish()
}

/// Compared on the local date in each value's own zone.
impl<Tz> FieldValue for DateTime<Tz>
where
    Tz: TimeZone,
    DateTime<Tz>: Clone,
{
    fn field_eq(&self, other: &Self) -> bool {
        self.date_naive() == other.date_naive()
    }

    fn field_hash(&self) -> Option<i32> {
        Some(date_hash(self.date_naive()))
    }

    /// Same instant, whatever the zone.
    fn own_eq(&self, other: &Self) -> bool {
        self == other
    }

    fn own_hash(&self) -> Option<i32> {
        Some(timestamp_hash(self.naive_utc()))
    }
}

impl<F: FieldValue> FieldValue for Option<F> {
    fn field_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (None, None) => true,
            (Some(a), Some(b)) => a.field_eq(b),
            _ => false,
        }
    }

    fn field_hash(&self) -> Option<i32> {
        self.as_ref().and_then(FieldValue::field_hash)
    }

    fn own_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (None, None) => true,
            (Some(a), Some(b)) => a.own_eq(b),
            _ => false,
        }
    }

    fn own_hash(&self) -> Option<i32> {
        self.as_ref().and_then(FieldValue::own_hash)
    }

    fn copy_field(&self, destination: &mut Self) {
        if let Some(value) = self {
            *destination = Some(value.clone());
        }
    }
}

/// Positional comparison with each element's own equality, stopping at the
/// shorter sequence.
///
/// A longer sequence sharing a prefix with a shorter one compares equal.
pub fn sequence_eq<F: FieldValue>(a: &[F], b: &[F]) -> bool {
    a.iter().zip(b).all(|(x, y)| x.own_eq(y))
}

/// Hash of every element in order, consistent with [`sequence_eq`] for
/// sequences of the same length.
pub fn sequence_hash<F: FieldValue>(items: &[F]) -> i32 {
    let mut hash = HashCode::new();
    for item in items {
        if let Some(value) = item.own_hash() {
            hash.add(value);
        }
    }
    hash.finish()
}

impl<F: FieldValue> FieldValue for Vec<F> {
    fn field_eq(&self, other: &Self) -> bool {
        sequence_eq(self, other)
    }

    fn field_hash(&self) -> Option<i32> {
        Some(sequence_hash(self))
    }
}

impl<F: FieldValue> FieldValue for Arc<F> {
    fn field_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other) || (**self).field_eq(other)
    }

    fn field_hash(&self) -> Option<i32> {
        (**self).field_hash()
    }

    fn own_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other) || (**self).own_eq(other)
    }

    fn own_hash(&self) -> Option<i32> {
        (**self).own_hash()
    }
}

impl<F: FieldValue> FieldValue for Box<F> {
    fn field_eq(&self, other: &Self) -> bool {
        (**self).field_eq(other)
    }

    fn field_hash(&self) -> Option<i32> {
        (**self).field_hash()
    }
    fn own_eq(&self, other: &Self) -> bool {
        (**self).own_eq(other)
    }

    fn own_hash(&self) -> Option<i32> {
        (**self).own_hash()
    }
}
