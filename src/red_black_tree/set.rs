use crate::comparator::{Comparator, NaturalOrder};
use crate::red_black_tree::iter::{IntoIter, Iter};
use crate::red_black_tree::map::RedBlackMap;
use std::borrow::Borrow;
use std::fmt;
use std::iter::FromIterator;

/// An ordered set implemented using a red black tree.
///
/// The set is a `RedBlackMap` with unit values, so it shares the map's guarantees: logarithmic
/// insertion, removal and lookup, and order statistics through `rank` and `select`.
///
/// # Examples
///
/// ```
/// use rbtree_collections::red_black_tree::RedBlackSet;
///
/// let mut set = RedBlackSet::new();
/// set.insert(0);
/// set.insert(3);
///
/// assert_eq!(set.len(), 2);
///
/// assert_eq!(set.min(), Some(&0));
/// assert_eq!(set.ceil(&2), Some(&3));
///
/// assert_eq!(set.remove(&0), Some(0));
/// assert_eq!(set.remove(&1), None);
/// ```
pub struct RedBlackSet<T, C = NaturalOrder> {
    map: RedBlackMap<T, (), C>,
}

impl<T> RedBlackSet<T> {
    /// Constructs a new, empty `RedBlackSet<T>` ordered by `Ord`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = RedBlackSet::new();
    /// ```
    pub fn new() -> Self {
        RedBlackSet {
            map: RedBlackMap::new(),
        }
    }
}

impl<T, C> RedBlackSet<T, C> {
    /// Constructs a new, empty `RedBlackSet<T, C>` ordered by `comparator`.
    pub fn with_comparator(comparator: C) -> Self {
        RedBlackSet {
            map: RedBlackMap::with_comparator(comparator),
        }
    }

    /// Inserts a key into the set. Returns `true` if the key was not already present; an
    /// existing key is left in place.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// assert!(set.insert(1));
    /// assert!(set.contains(&1));
    /// assert!(!set.insert(1));
    /// ```
    pub fn insert(&mut self, key: T) -> bool
    where
        C: Comparator<T>,
    {
        self.map.insert(key, ()).is_none()
    }

    /// Removes a key from the set. If the key exists in the set, it will return the stored key.
    /// Otherwise it will return `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert_eq!(set.remove(&1), Some(1));
    /// assert_eq!(set.remove(&1), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.map.remove(key).map(|pair| pair.0)
    }

    /// Checks if a key exists in the set.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.map.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn floor<Q>(&self, key: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.map.floor(key)
    }

    pub fn ceil<Q>(&self, key: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.map.ceil(key)
    }

    pub fn min(&self) -> Option<&T> {
        self.map.min()
    }

    pub fn max(&self) -> Option<&T> {
        self.map.max()
    }

    pub fn pop_min(&mut self) -> Option<T> {
        self.map.pop_min().map(|pair| pair.0)
    }

    pub fn pop_max(&mut self) -> Option<T> {
        self.map.pop_max().map(|pair| pair.0)
    }

    /// Returns the number of keys in the set that are strictly less than a particular key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = vec![10, 20, 30].into_iter().collect();
    /// assert_eq!(set.rank(&25), 2);
    /// assert_eq!(set.select(2), Some(&30));
    /// ```
    pub fn rank<Q>(&self, key: &Q) -> usize
    where
        T: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.map.rank(key)
    }

    /// Returns the `index`-th smallest key, counting from zero.
    pub fn select(&self, index: usize) -> Option<&T> {
        self.map.select(index).map(|pair| pair.0)
    }

    /// Returns an iterator over the set in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(2);
    /// set.insert(1);
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&2));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> RedBlackSetIter<'_, T, C> {
        RedBlackSetIter {
            map_iter: self.map.iter(),
        }
    }

    /// Returns an iterator over the keys in `[low, high]` in ascending order.
    pub fn range<Q>(&self, low: &Q, high: &Q) -> RedBlackSetIter<'_, T, C>
    where
        T: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        RedBlackSetIter {
            map_iter: self.map.range(low, high),
        }
    }
}

impl<T, C> IntoIterator for RedBlackSet<T, C> {
    type IntoIter = RedBlackSetIntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            map_iter: self.map.into_iter(),
        }
    }
}

impl<'a, T, C> IntoIterator for &'a RedBlackSet<T, C>
where
    T: 'a,
{
    type IntoIter = RedBlackSetIter<'a, T, C>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `RedBlackSet<T, C>`.
///
/// This iterator traverses the elements of the set in-order and yields owned keys.
pub struct RedBlackSetIntoIter<T> {
    map_iter: IntoIter<T, ()>,
}

impl<T> Iterator for RedBlackSetIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.map_iter.next().map(|pair| pair.0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.map_iter.size_hint()
    }
}

impl<T> DoubleEndedIterator for RedBlackSetIntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.map_iter.next_back().map(|pair| pair.0)
    }
}

impl<T> ExactSizeIterator for RedBlackSetIntoIter<T> {}

/// An iterator for `RedBlackSet<T, C>`.
///
/// This iterator traverses the elements of the set in-order and yields immutable references.
pub struct RedBlackSetIter<'a, T, C> {
    map_iter: Iter<'a, T, (), C>,
}

impl<'a, T, C> Iterator for RedBlackSetIter<'a, T, C>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.map_iter.next().map(|pair| pair.0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.map_iter.size_hint()
    }
}

impl<'a, T, C> DoubleEndedIterator for RedBlackSetIter<'a, T, C>
where
    T: 'a,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        self.map_iter.next_back().map(|pair| pair.0)
    }
}

impl<'a, T, C> ExactSizeIterator for RedBlackSetIter<'a, T, C> where T: 'a {}

impl<T, C> FromIterator<T> for RedBlackSet<T, C>
where
    C: Comparator<T> + Default,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut set = RedBlackSet::default();
        set.extend(iter);
        set
    }
}

impl<T, C> Extend<T> for RedBlackSet<T, C>
where
    C: Comparator<T>,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<T, C> Default for RedBlackSet<T, C>
where
    C: Default,
{
    fn default() -> Self {
        RedBlackSet {
            map: RedBlackMap::default(),
        }
    }
}

impl<T, C> PartialEq for RedBlackSet<T, C>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl<T, C> Eq for RedBlackSet<T, C> where T: Eq {}

impl<T, C> fmt::Debug for RedBlackSet<T, C>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::RedBlackSet;
    use crate::comparator::{NaturalOrder, ReverseOrder};

    #[test]
    fn test_len_empty() {
        let set: RedBlackSet<u32> = RedBlackSet::new();
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn test_is_empty() {
        let set: RedBlackSet<u32> = RedBlackSet::new();
        assert!(set.is_empty());
    }

    #[test]
    fn test_min_max_empty() {
        let set: RedBlackSet<u32> = RedBlackSet::new();
        assert_eq!(set.min(), None);
        assert_eq!(set.max(), None);
    }

    #[test]
    fn test_insert() {
        let mut set = RedBlackSet::new();
        assert!(set.insert(1));
        assert!(set.contains(&1));
    }

    #[test]
    fn test_insert_duplicate() {
        let mut set = RedBlackSet::new();
        assert!(set.insert(1));
        assert!(!set.insert(1));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut set = RedBlackSet::new();
        set.insert(1);
        assert_eq!(set.remove(&1), Some(1));
        assert!(!set.contains(&1));
    }

    #[test]
    fn test_min_max() {
        let mut set = RedBlackSet::new();
        set.insert(1);
        set.insert(3);
        set.insert(5);

        assert_eq!(set.min(), Some(&1));
        assert_eq!(set.max(), Some(&5));
        assert_eq!(set.pop_min(), Some(1));
        assert_eq!(set.pop_max(), Some(5));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_floor_ceil() {
        let mut set = RedBlackSet::new();
        set.insert(1);
        set.insert(3);
        set.insert(5);

        assert_eq!(set.floor(&0), None);
        assert_eq!(set.floor(&2), Some(&1));
        assert_eq!(set.floor(&4), Some(&3));
        assert_eq!(set.floor(&6), Some(&5));

        assert_eq!(set.ceil(&0), Some(&1));
        assert_eq!(set.ceil(&2), Some(&3));
        assert_eq!(set.ceil(&4), Some(&5));
        assert_eq!(set.ceil(&6), None);
    }

    #[test]
    fn test_rank_select() {
        let set: RedBlackSet<u32> = (0..20).map(|key| key * 2).collect();
        assert_eq!(set.rank(&7), 4);
        assert_eq!(set.select(4), Some(&8));
        assert_eq!(set.select(20), None);
    }

    #[test]
    fn test_into_iter() {
        let mut set = RedBlackSet::new();
        set.insert(1);
        set.insert(5);
        set.insert(3);

        assert_eq!(set.into_iter().collect::<Vec<u32>>(), vec![1, 3, 5]);
    }

    #[test]
    fn test_iter() {
        let mut set = RedBlackSet::new();
        set.insert(1);
        set.insert(5);
        set.insert(3);

        assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&1, &3, &5]);
        assert_eq!(set.iter().rev().collect::<Vec<&u32>>(), vec![&5, &3, &1]);
    }

    #[test]
    fn test_range() {
        let set: RedBlackSet<u32> = vec![1, 6, 8, 11, 13, 15, 17].into_iter().collect();
        assert_eq!(set.range(&7, &14).collect::<Vec<&u32>>(), vec![&8, &11, &13]);
    }

    #[test]
    fn test_with_comparator() {
        let mut set = RedBlackSet::with_comparator(ReverseOrder::new(NaturalOrder));
        set.extend(vec!["a", "c", "b"]);
        assert_eq!(set.iter().collect::<Vec<&&str>>(), vec![&"c", &"b", &"a"]);
    }

    #[test]
    fn test_eq_debug() {
        let left: RedBlackSet<u32> = vec![3, 1, 2].into_iter().collect();
        let right: RedBlackSet<u32> = vec![1, 2, 3].into_iter().collect();
        assert_eq!(left, right);
        assert_eq!(format!("{:?}", left), "{1, 2, 3}");
    }
}
