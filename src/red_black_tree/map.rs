use crate::comparator::{Comparator, NaturalOrder};
use crate::red_black_tree::cursor::{Cursor, RangeCursor};
use crate::red_black_tree::iter::{IntoIter, Iter};
use crate::red_black_tree::tree::Tree;
use std::borrow::Borrow;
use std::fmt;
use std::iter::FromIterator;
use std::ops::{Index, IndexMut};

/// An ordered map implemented using a red black tree.
///
/// A red black tree is a self-balancing binary search tree that colors every node red or black.
/// No red node has a red child and every path from a node down to a leaf crosses the same number
/// of black nodes, which keeps the height within twice the optimum. Keys are ordered by a
/// `Comparator`, `Ord` by default.
///
/// # Examples
///
/// ```
/// use rbtree_collections::red_black_tree::RedBlackMap;
///
/// let mut map = RedBlackMap::new();
/// map.insert(0, 1);
/// map.insert(3, 4);
///
/// assert_eq!(map[&0], 1);
/// assert_eq!(map.get(&1), None);
/// assert_eq!(map.len(), 2);
///
/// assert_eq!(map.min(), Some(&0));
/// assert_eq!(map.ceil(&2), Some(&3));
///
/// map[&0] = 2;
/// assert_eq!(map.remove(&0), Some((0, 2)));
/// assert_eq!(map.remove(&1), None);
/// ```
pub struct RedBlackMap<K, V, C = NaturalOrder> {
    tree: Tree<K, V, C>,
}

impl<K, V> RedBlackMap<K, V> {
    /// Constructs a new, empty `RedBlackMap<K, V>` ordered by `Ord`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let map: RedBlackMap<u32, u32> = RedBlackMap::new();
    /// ```
    pub fn new() -> Self {
        RedBlackMap { tree: Tree::new() }
    }
}

impl<K, V, C> RedBlackMap<K, V, C> {
    /// Constructs a new, empty `RedBlackMap<K, V, C>` ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::comparator::{NaturalOrder, ReverseOrder};
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::with_comparator(ReverseOrder::new(NaturalOrder));
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    /// assert_eq!(map.keys(), vec![&2, &1]);
    /// ```
    pub fn with_comparator(comparator: C) -> Self {
        RedBlackMap {
            tree: Tree::with_comparator(comparator),
        }
    }

    /// Constructs a new, empty `RedBlackMap<K, V, C>` ordered by `comparator` whose nodes are
    /// allocated `chunk_size` at a time.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::comparator::NaturalOrder;
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let map: RedBlackMap<u32, u32> = RedBlackMap::with_chunk_size(NaturalOrder, 16);
    /// ```
    pub fn with_chunk_size(comparator: C, chunk_size: usize) -> Self {
        RedBlackMap {
            tree: Tree::with_chunk_size(comparator, chunk_size),
        }
    }

    /// Inserts a key-value pair into the map. If the key already exists in the map, it will
    /// replace the value and return the old one. The stored key is kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// assert_eq!(map.insert(1, 1), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// assert_eq!(map.insert(1, 2), Some(1));
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V>
    where
        C: Comparator<K>,
    {
        self.tree.insert(key, value)
    }

    /// Removes a key-value pair from the map. If the key exists in the map, it will return the
    /// associated key-value pair. Otherwise it will return `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.remove(&1), Some((1, 1)));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.tree.remove(key)
    }

    /// Checks if a key exists in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert!(!map.contains_key(&0));
    /// assert!(map.contains_key(&1));
    /// ```
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.tree.contains_key(key)
    }

    /// Returns an immutable reference to the value associated with a particular key. It will
    /// return `None` if the key does not exist in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.get(&0), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.tree.get(key)
    }

    /// Returns the stored key and the value associated with a particular key. Returns `None` if
    /// such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 2);
    /// assert_eq!(map.get_key_value(&1), Some((&1, &2)));
    /// assert_eq!(map.get_key_value(&0), None);
    /// ```
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.tree.get_key_value(key)
    }

    /// Returns a mutable reference to the value associated with a particular key. Returns `None`
    /// if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// *map.get_mut(&1).unwrap() = 2;
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.tree.get_mut(key)
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let map: RedBlackMap<u32, u32> = RedBlackMap::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Clears the map, removing all values.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    /// map.clear();
    /// assert_eq!(map.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns a key in the map that is less than or equal to a particular key. Returns `None` if
    /// such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.floor(&0), None);
    /// assert_eq!(map.floor(&2), Some(&1));
    /// ```
    pub fn floor<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.tree
            .floor(key)
            .map(|handle| &self.tree.entry(handle).key)
    }

    /// Returns a key in the map that is greater than or equal to a particular key. Returns `None`
    /// if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.ceil(&0), Some(&1));
    /// assert_eq!(map.ceil(&2), None);
    /// ```
    pub fn ceil<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.tree
            .ceiling(key)
            .map(|handle| &self.tree.entry(handle).key)
    }

    /// Returns the minimum key of the map. Returns `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// assert_eq!(map.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&K> {
        self.tree
            .leftmost()
            .map(|handle| &self.tree.entry(handle).key)
    }

    /// Returns the maximum key of the map. Returns `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// assert_eq!(map.max(), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&K> {
        self.tree
            .rightmost()
            .map(|handle| &self.tree.entry(handle).key)
    }

    /// Removes and returns the key-value pair with the minimum key. Returns `None` if the map is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// assert_eq!(map.pop_min(), Some((1, 1)));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn pop_min(&mut self) -> Option<(K, V)> {
        self.tree.pop_min()
    }

    /// Removes and returns the key-value pair with the maximum key. Returns `None` if the map is
    /// empty.
    pub fn pop_max(&mut self) -> Option<(K, V)> {
        self.tree.pop_max()
    }

    /// Returns the number of keys in the map that are strictly less than a particular key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// assert_eq!(map.rank(&0), 0);
    /// assert_eq!(map.rank(&3), 1);
    /// assert_eq!(map.rank(&4), 2);
    /// ```
    pub fn rank<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.tree.rank(key)
    }

    /// Returns the key-value pair with the `index`-th smallest key, counting from zero. Returns
    /// `None` if `index` is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// assert_eq!(map.select(1), Some((&3, &3)));
    /// assert_eq!(map.select(2), None);
    /// ```
    pub fn select(&self, index: usize) -> Option<(&K, &V)> {
        self.tree.select(index).map(|handle| {
            let entry = self.tree.entry(handle);
            (&entry.key, &entry.value)
        })
    }

    /// Returns the keys of the map in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// assert_eq!(map.keys(), vec![&1, &2]);
    /// assert_eq!(map.values(), vec![&"a", &"b"]);
    /// ```
    pub fn keys(&self) -> Vec<&K> {
        self.tree.keys()
    }

    /// Returns the values of the map in ascending key order.
    pub fn values(&self) -> Vec<&V> {
        self.tree.values()
    }

    /// Returns an iterator over the map. The iterator will yield key-value pairs in ascending
    /// key order and can be consumed from either end.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    ///
    /// let mut iterator = map.iter();
    /// assert_eq!(iterator.next(), Some((&1, &1)));
    /// assert_eq!(iterator.next(), Some((&2, &2)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V, C> {
        self.tree.iter()
    }

    /// Returns an iterator over the key-value pairs whose keys lie in `[low, high]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// for key in &[1, 6, 8, 11, 13, 15, 17] {
    ///     map.insert(*key, ());
    /// }
    /// let keys: Vec<&u32> = map.range(&8, &15).map(|(key, _)| key).collect();
    /// assert_eq!(keys, vec![&8, &11, &13, &15]);
    /// ```
    pub fn range<Q>(&self, low: &Q, high: &Q) -> Iter<'_, K, V, C>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.tree.range(low, high)
    }

    /// Returns a cursor positioned before the first entry of the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    ///
    /// let mut cursor = map.cursor();
    /// assert!(cursor.last());
    /// assert_eq!(cursor.value(), Some(&"b"));
    /// assert!(cursor.move_prev());
    /// assert_eq!(cursor.key(), Some(&1));
    /// ```
    pub fn cursor(&self) -> Cursor<'_, K, V, C> {
        self.tree.cursor()
    }

    /// Returns a cursor over the entries whose keys lie in `[low, high]`.
    pub fn range_cursor<Q>(&self, low: &Q, high: &Q) -> RangeCursor<'_, K, V, C>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.tree.range_cursor(low, high)
    }

    /// Returns the tree backing the map.
    pub fn as_tree(&self) -> &Tree<K, V, C> {
        &self.tree
    }
}

impl<K, V, C> IntoIterator for RedBlackMap<K, V, C> {
    type IntoIter = IntoIter<K, V>;
    type Item = (K, V);

    fn into_iter(self) -> Self::IntoIter {
        self.tree.into_iter()
    }
}

impl<'a, K, V, C> IntoIterator for &'a RedBlackMap<K, V, C>
where
    K: 'a,
    V: 'a,
{
    type IntoIter = Iter<'a, K, V, C>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, C> FromIterator<(K, V)> for RedBlackMap<K, V, C>
where
    C: Comparator<K> + Default,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = RedBlackMap::default();
        map.extend(iter);
        map
    }
}

impl<K, V, C> Extend<(K, V)> for RedBlackMap<K, V, C>
where
    C: Comparator<K>,
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

impl<K, V, C> Default for RedBlackMap<K, V, C>
where
    C: Default,
{
    fn default() -> Self {
        RedBlackMap {
            tree: Tree::default(),
        }
    }
}

impl<K, V, C> PartialEq for RedBlackMap<K, V, C>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K, V, C> Eq for RedBlackMap<K, V, C>
where
    K: Eq,
    V: Eq,
{
}

impl<K, V, C> fmt::Debug for RedBlackMap<K, V, C>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.tree, f)
    }
}

impl<K, V, C> fmt::Display for RedBlackMap<K, V, C>
where
    K: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.tree, f)
    }
}

impl<'a, K, V, C, Q> Index<&'a Q> for RedBlackMap<K, V, C>
where
    K: Borrow<Q>,
    C: Comparator<Q>,
    Q: ?Sized,
{
    type Output = V;

    fn index(&self, key: &Q) -> &Self::Output {
        self.get(key).expect("Error: key does not exist.")
    }
}

impl<'a, K, V, C, Q> IndexMut<&'a Q> for RedBlackMap<K, V, C>
where
    K: Borrow<Q>,
    C: Comparator<Q>,
    Q: ?Sized,
{
    fn index_mut(&mut self, key: &Q) -> &mut Self::Output {
        self.get_mut(key).expect("Error: key does not exist.")
    }
}
