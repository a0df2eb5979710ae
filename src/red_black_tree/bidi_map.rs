use crate::comparator::{Comparator, NaturalOrder};
use crate::red_black_tree::iter::Iter;
use crate::red_black_tree::tree::Tree;
use std::borrow::Borrow;
use std::fmt;
use std::iter::FromIterator;

/// A bidirectional ordered map implemented using two red black trees.
///
/// Every key maps to exactly one value and every value maps back to exactly one key. The forward
/// tree is ordered by the key comparator and the inverse tree by the value comparator, so both
/// directions support logarithmic lookups. Both keys and values are stored twice, hence the
/// `Clone` bounds on insertion.
///
/// # Examples
///
/// ```
/// use rbtree_collections::red_black_tree::RedBlackBidiMap;
///
/// let mut map = RedBlackBidiMap::new();
/// map.insert(1, "a");
/// map.insert(2, "b");
/// assert_eq!(map.get(&1), Some(&"a"));
/// assert_eq!(map.get_key(&"b"), Some(&2));
///
/// // the old pair holding "a" is evicted
/// map.insert(3, "a");
/// assert_eq!(map.get(&1), None);
/// assert_eq!(map.keys(), vec![&2, &3]);
/// ```
pub struct RedBlackBidiMap<K, V, KC = NaturalOrder, VC = NaturalOrder> {
    forward: Tree<K, V, KC>,
    inverse: Tree<V, K, VC>,
}

impl<K, V> RedBlackBidiMap<K, V> {
    /// Constructs a new, empty `RedBlackBidiMap<K, V>` with keys and values ordered by `Ord`.
    pub fn new() -> Self {
        RedBlackBidiMap::with_comparators(NaturalOrder, NaturalOrder)
    }
}

impl<K, V, KC, VC> RedBlackBidiMap<K, V, KC, VC> {
    /// Constructs a new, empty bidi map ordering keys by `key_comparator` and values by
    /// `value_comparator`.
    pub fn with_comparators(key_comparator: KC, value_comparator: VC) -> Self {
        RedBlackBidiMap {
            forward: Tree::with_comparator(key_comparator),
            inverse: Tree::with_comparator(value_comparator),
        }
    }

    /// Inserts a key-value pair. Any existing pair with the same key or the same value is removed
    /// first, so at most two pairs are evicted.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackBidiMap;
    ///
    /// let mut map = RedBlackBidiMap::new();
    /// map.insert(1, 10);
    /// map.insert(2, 20);
    /// map.insert(1, 20);
    /// assert_eq!(map.len(), 1);
    /// assert_eq!(map.get(&1), Some(&20));
    /// assert_eq!(map.get_key(&10), None);
    /// ```
    pub fn insert(&mut self, key: K, value: V)
    where
        K: Clone,
        V: Clone,
        KC: Comparator<K>,
        VC: Comparator<V>,
    {
        if let Some((_, old_value)) = self.forward.remove(&key) {
            self.inverse.remove(&old_value);
        }
        if let Some((_, old_key)) = self.inverse.remove(&value) {
            self.forward.remove(&old_key);
        }
        self.forward.insert(key.clone(), value.clone());
        self.inverse.insert(value, key);
    }

    /// Returns the value associated with a key.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        KC: Comparator<Q>,
        Q: ?Sized,
    {
        self.forward.get(key)
    }

    /// Returns the key associated with a value.
    pub fn get_key<R>(&self, value: &R) -> Option<&K>
    where
        V: Borrow<R>,
        VC: Comparator<R>,
        R: ?Sized,
    {
        self.inverse.get(value)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        KC: Comparator<Q>,
        Q: ?Sized,
    {
        self.forward.contains_key(key)
    }

    pub fn contains_value<R>(&self, value: &R) -> bool
    where
        V: Borrow<R>,
        VC: Comparator<R>,
        R: ?Sized,
    {
        self.inverse.contains_key(value)
    }

    /// Removes the pair holding `key` and returns it.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackBidiMap;
    ///
    /// let mut map = RedBlackBidiMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove(&1), Some((1, "a")));
    /// assert_eq!(map.get_key(&"a"), None);
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        KC: Comparator<Q>,
        VC: Comparator<V>,
        Q: ?Sized,
    {
        let (key, value) = self.forward.remove(key)?;
        self.inverse.remove(&value);
        Some((key, value))
    }

    /// Removes the pair holding `value` and returns it.
    pub fn remove_value<R>(&mut self, value: &R) -> Option<(K, V)>
    where
        V: Borrow<R>,
        VC: Comparator<R>,
        KC: Comparator<K>,
        R: ?Sized,
    {
        let (value, key) = self.inverse.remove(value)?;
        self.forward.remove(&key);
        Some((key, value))
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    pub fn clear(&mut self) {
        self.forward.clear();
        self.inverse.clear();
    }

    /// Returns the keys in ascending key order.
    pub fn keys(&self) -> Vec<&K> {
        self.forward.keys()
    }

    /// Returns the values in ascending value order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackBidiMap;
    ///
    /// let mut map = RedBlackBidiMap::new();
    /// map.insert(1, "c");
    /// map.insert(2, "a");
    /// map.insert(3, "b");
    /// assert_eq!(map.keys(), vec![&1, &2, &3]);
    /// assert_eq!(map.values(), vec![&"a", &"b", &"c"]);
    /// ```
    pub fn values(&self) -> Vec<&V> {
        self.inverse.keys()
    }

    /// Returns an iterator over the pairs in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V, KC> {
        self.forward.iter()
    }
}

impl<'a, K, V, KC, VC> IntoIterator for &'a RedBlackBidiMap<K, V, KC, VC>
where
    K: 'a,
    V: 'a,
{
    type IntoIter = Iter<'a, K, V, KC>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, KC, VC> FromIterator<(K, V)> for RedBlackBidiMap<K, V, KC, VC>
where
    K: Clone,
    V: Clone,
    KC: Comparator<K> + Default,
    VC: Comparator<V> + Default,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = RedBlackBidiMap::default();
        map.extend(iter);
        map
    }
}

impl<K, V, KC, VC> Extend<(K, V)> for RedBlackBidiMap<K, V, KC, VC>
where
    K: Clone,
    V: Clone,
    KC: Comparator<K>,
    VC: Comparator<V>,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, KC, VC> Default for RedBlackBidiMap<K, V, KC, VC>
where
    KC: Default,
    VC: Default,
{
    fn default() -> Self {
        RedBlackBidiMap::with_comparators(KC::default(), VC::default())
    }
}

impl<K, V, KC, VC> PartialEq for RedBlackBidiMap<K, V, KC, VC>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K, V, KC, VC> fmt::Debug for RedBlackBidiMap<K, V, KC, VC>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::RedBlackBidiMap;
    use crate::comparator::{NaturalOrder, ReverseOrder};

    fn assert_one_to_one(map: &RedBlackBidiMap<u32, u32>) {
        assert_eq!(map.forward.len(), map.inverse.len());
        for (key, value) in map.iter() {
            assert_eq!(map.get_key(value), Some(key));
        }
        assert!(map.forward.validate().is_ok());
        assert!(map.inverse.validate().is_ok());
    }

    #[test]
    fn test_empty() {
        let map: RedBlackBidiMap<u32, u32> = RedBlackBidiMap::new();
        assert!(map.is_empty());
        assert_eq!(map.get(&1), None);
        assert_eq!(map.get_key(&1), None);
    }

    #[test]
    fn test_insert_get() {
        let mut map = RedBlackBidiMap::new();
        map.insert(1, 10);
        map.insert(2, 20);
        assert_eq!(map.get(&2), Some(&20));
        assert_eq!(map.get_key(&10), Some(&1));
        assert!(map.contains_key(&1));
        assert!(map.contains_value(&20));
        assert_one_to_one(&map);
    }

    #[test]
    fn test_insert_evicts_key_and_value() {
        let mut map = RedBlackBidiMap::new();
        map.insert(1, 10);
        map.insert(2, 20);
        map.insert(3, 30);

        // shares its key with (1, 10) and its value with (3, 30)
        map.insert(1, 30);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&1), Some(&30));
        assert_eq!(map.get(&3), None);
        assert_eq!(map.get_key(&10), None);
        assert_one_to_one(&map);
    }

    #[test]
    fn test_insert_same_pair() {
        let mut map = RedBlackBidiMap::new();
        map.insert(1, 10);
        map.insert(1, 10);
        assert_eq!(map.len(), 1);
        assert_one_to_one(&map);
    }

    #[test]
    fn test_remove() {
        let mut map = RedBlackBidiMap::new();
        map.insert(1, 10);
        map.insert(2, 20);
        assert_eq!(map.remove(&1), Some((1, 10)));
        assert_eq!(map.remove(&1), None);
        assert_eq!(map.remove_value(&20), Some((2, 20)));
        assert_eq!(map.remove_value(&20), None);
        assert!(map.is_empty());
        assert_one_to_one(&map);
    }

    #[test]
    fn test_keys_values() {
        let map: RedBlackBidiMap<u32, u32> = vec![(1, 30), (2, 10), (3, 20)].into_iter().collect();
        assert_eq!(map.keys(), vec![&1, &2, &3]);
        assert_eq!(map.values(), vec![&10, &20, &30]);
        assert_eq!(
            map.iter().collect::<Vec<(&u32, &u32)>>(),
            vec![(&1, &30), (&2, &10), (&3, &20)],
        );
    }

    #[test]
    fn test_with_comparators() {
        let mut map =
            RedBlackBidiMap::with_comparators(NaturalOrder, ReverseOrder::new(NaturalOrder));
        map.insert(1, 'a');
        map.insert(2, 'b');
        assert_eq!(map.keys(), vec![&1, &2]);
        assert_eq!(map.values(), vec![&'b', &'a']);
    }

    #[test]
    fn test_clear() {
        let mut map = RedBlackBidiMap::new();
        map.insert(1, 10);
        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.get_key(&10), None);
        map.insert(2, 10);
        assert_eq!(map.get_key(&10), Some(&2));
    }

    #[test]
    fn test_stays_one_to_one() {
        let mut map = RedBlackBidiMap::new();
        for i in 0..500u32 {
            map.insert((i * 7) % 61, (i * 13) % 53);
            if i % 5 == 0 {
                map.remove(&((i * 3) % 61));
            }
            if i % 7 == 0 {
                map.remove_value(&((i * 5) % 53));
            }
        }
        assert_one_to_one(&map);
    }

    #[test]
    fn test_debug() {
        let mut map = RedBlackBidiMap::new();
        map.insert(2, "b");
        map.insert(1, "a");
        assert_eq!(format!("{:?}", map), r#"{1: "a", 2: "b"}"#);
    }
}
