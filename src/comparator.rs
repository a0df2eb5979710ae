//! Total orders over keys.
//!
//! Every structural decision a tree makes routes through a `Comparator`. A comparator must be a
//! strict total order that does not change while keys are stored; an inconsistent comparator
//! silently breaks the ordering invariant of the tree that uses it.

use std::cmp::Ordering;
use std::marker::PhantomData;

/// A total order over values of type `T`.
///
/// Any closure or function of type `Fn(&T, &T) -> Ordering` is a comparator.
///
/// # Examples
///
/// ```
/// use rbtree_collections::comparator::{Comparator, NaturalOrder, ReverseOrder};
/// use std::cmp::Ordering;
///
/// assert_eq!(NaturalOrder.compare(&1, &2), Ordering::Less);
/// assert_eq!(ReverseOrder::new(NaturalOrder).compare(&1, &2), Ordering::Greater);
///
/// let by_len = |a: &&str, b: &&str| a.len().cmp(&b.len());
/// assert_eq!(by_len.compare(&"abc", &"de"), Ordering::Greater);
/// ```
pub trait Comparator<T: ?Sized> {
    fn compare(&self, left: &T, right: &T) -> Ordering;
}

impl<T, F> Comparator<T> for F
where
    T: ?Sized,
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, left: &T, right: &T) -> Ordering {
        self(left, right)
    }
}

/// The order given by `Ord`. Covers integers, strings, and any other totally ordered type.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct NaturalOrder;

impl<T> Comparator<T> for NaturalOrder
where
    T: Ord + ?Sized,
{
    fn compare(&self, left: &T, right: &T) -> Ordering {
        left.cmp(right)
    }
}

/// The reverse of another comparator.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ReverseOrder<C> {
    inner: C,
}

impl<C> ReverseOrder<C> {
    pub fn new(inner: C) -> Self {
        ReverseOrder { inner }
    }
}

impl<T, C> Comparator<T> for ReverseOrder<C>
where
    T: ?Sized,
    C: Comparator<T>,
{
    fn compare(&self, left: &T, right: &T) -> Ordering {
        self.inner.compare(right, left)
    }
}

/// IEEE 754 total order for floating point keys.
///
/// `-0.0` sorts before `+0.0` and NaNs sort to the ends according to their sign bit, so the order
/// is total even though `f32` and `f64` are not `Ord`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FloatOrder;

impl Comparator<f64> for FloatOrder {
    fn compare(&self, left: &f64, right: &f64) -> Ordering {
        left.total_cmp(right)
    }
}

impl Comparator<f32> for FloatOrder {
    fn compare(&self, left: &f32, right: &f32) -> Ordering {
        left.total_cmp(right)
    }
}

/// Orders values by a key extracted from them.
///
/// # Examples
///
/// ```
/// use rbtree_collections::comparator::{ByKey, Comparator};
/// use std::cmp::Ordering;
///
/// let by_second = ByKey::new(|pair: &(u32, u32)| pair.1);
/// assert_eq!(by_second.compare(&(0, 2), &(1, 1)), Ordering::Greater);
/// ```
pub struct ByKey<T: ?Sized, F> {
    extract: F,
    _marker: PhantomData<fn(&T)>,
}

impl<T: ?Sized, F> ByKey<T, F> {
    pub fn new(extract: F) -> Self {
        ByKey {
            extract,
            _marker: PhantomData,
        }
    }
}

impl<T, F, U> Comparator<T> for ByKey<T, F>
where
    T: ?Sized,
    F: Fn(&T) -> U,
    U: Ord,
{
    fn compare(&self, left: &T, right: &T) -> Ordering {
        (self.extract)(left).cmp(&(self.extract)(right))
    }
}

#[cfg(test)]
mod tests {
    use super::{ByKey, Comparator, FloatOrder, NaturalOrder, ReverseOrder};
    use std::cmp::Ordering;

    #[test]
    fn test_natural_order() {
        assert_eq!(NaturalOrder.compare(&1, &1), Ordering::Equal);
        assert_eq!(NaturalOrder.compare("a", "b"), Ordering::Less);
        assert_eq!(NaturalOrder.compare(&"b".to_string(), &"a".to_string()), Ordering::Greater);
    }

    #[test]
    fn test_reverse_order() {
        let comparator = ReverseOrder::new(NaturalOrder);
        assert_eq!(comparator.compare(&1, &2), Ordering::Greater);
        assert_eq!(comparator.compare(&2, &1), Ordering::Less);
        assert_eq!(comparator.compare(&2, &2), Ordering::Equal);
    }

    #[test]
    fn test_float_order() {
        assert_eq!(FloatOrder.compare(&-0.0f64, &0.0), Ordering::Less);
        assert_eq!(FloatOrder.compare(&1.5f32, &1.5), Ordering::Equal);
        assert_eq!(FloatOrder.compare(&f64::NAN, &f64::INFINITY), Ordering::Greater);
    }

    #[test]
    fn test_closure() {
        let comparator = |a: &i32, b: &i32| a.abs().cmp(&b.abs());
        assert_eq!(comparator.compare(&-3, &2), Ordering::Greater);
        assert_eq!(comparator.compare(&-3, &3), Ordering::Equal);
    }

    #[test]
    fn test_by_key() {
        let comparator = ByKey::new(|s: &str| s.len());
        assert_eq!(comparator.compare("abc", "xy"), Ordering::Greater);
    }
}
