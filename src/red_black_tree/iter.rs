use crate::arena::{Handle, TypedArena};
use crate::comparator::Comparator;
use crate::red_black_tree::node::Node;
use crate::red_black_tree::tree::Tree;
use std::borrow::Borrow;
use std::vec;

/// An iterator for `Tree<K, V, C>`.
///
/// This iterator traverses the entries of the tree in-order from both ends and yields immutable
/// references.
pub struct Iter<'a, K, V, C> {
    tree: &'a Tree<K, V, C>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

impl<'a, K, V, C> Iter<'a, K, V, C> {
    fn pair(&self, handle: Handle) -> (&'a K, &'a V) {
        let tree = self.tree;
        let entry = tree.entry(handle);
        (&entry.key, &entry.value)
    }
}

impl<'a, K, V, C> Iterator for Iter<'a, K, V, C> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.front.map(|handle| {
            self.remaining -= 1;
            self.front = self.tree.successor(handle);
            self.pair(handle)
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V, C> DoubleEndedIterator for Iter<'a, K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.back.map(|handle| {
            self.remaining -= 1;
            self.back = self.tree.predecessor(handle);
            self.pair(handle)
        })
    }
}

impl<'a, K, V, C> ExactSizeIterator for Iter<'a, K, V, C> {}

impl<'a, K, V, C> Clone for Iter<'a, K, V, C> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

/// An owning iterator for `Tree<K, V, C>`.
///
/// The in-order sequence of nodes is fixed when the iterator is created. Each yielded entry is
/// moved out of the arena, and entries that are never yielded are dropped with the iterator.
pub struct IntoIter<K, V> {
    arena: TypedArena<Node<K, V>>,
    order: vec::IntoIter<Handle>,
}

impl<K, V> IntoIter<K, V> {
    fn release(&mut self, handle: Handle) -> (K, V) {
        let Node { entry, .. } = self.arena.free(&handle);
        entry.into_pair()
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.order.next().map(|handle| self.release(handle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.order.next_back().map(|handle| self.release(handle))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V, C> Tree<K, V, C> {
    /// Returns an iterator over the entries of the tree in ascending key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(2, "b");
    /// tree.insert(1, "a");
    ///
    /// let mut iterator = tree.iter();
    /// assert_eq!(iterator.next(), Some((&1, &"a")));
    /// assert_eq!(iterator.next_back(), Some((&2, &"b")));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V, C> {
        Iter {
            tree: self,
            front: self.leftmost(),
            back: self.rightmost(),
            remaining: self.len,
        }
    }

    /// Returns an iterator over the entries whose keys lie in `[low, high]`, in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for key in 0..10 {
    ///     tree.insert(key, ());
    /// }
    /// let keys: Vec<u32> = tree.range(&3, &6).map(|(key, _)| *key).collect();
    /// assert_eq!(keys, vec![3, 4, 5, 6]);
    /// ```
    pub fn range<Q>(&self, low: &Q, high: &Q) -> Iter<'_, K, V, C>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        match self.window(low, high) {
            Some((first, last)) => Iter {
                tree: self,
                front: Some(first),
                back: Some(last),
                remaining: self.position(last) - self.position(first) + 1,
            },
            None => Iter {
                tree: self,
                front: None,
                back: None,
                remaining: 0,
            },
        }
    }
}

impl<K, V, C> IntoIterator for Tree<K, V, C> {
    type IntoIter = IntoIter<K, V>;
    type Item = (K, V);

    fn into_iter(self) -> Self::IntoIter {
        let order = self.handles().into_iter();
        IntoIter {
            arena: self.arena,
            order,
        }
    }
}

impl<'a, K, V, C> IntoIterator for &'a Tree<K, V, C>
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

#[cfg(test)]
mod tests {
    use crate::red_black_tree::Tree;
    use std::cell::Cell;
    use std::rc::Rc;

    fn build(keys: &[u32]) -> Tree<u32, u32> {
        let mut tree = Tree::new();
        for key in keys {
            tree.insert(*key, key * 10);
        }
        tree
    }

    #[test]
    fn test_iter() {
        let tree = build(&[5, 3, 8, 1, 4, 7, 9]);
        let keys: Vec<u32> = tree.iter().map(|(key, _)| *key).collect();
        assert_eq!(keys, vec![1, 3, 4, 5, 7, 8, 9]);
        assert_eq!(tree.iter().len(), 7);
    }

    #[test]
    fn test_iter_rev() {
        let tree = build(&[5, 3, 8, 1, 4, 7, 9]);
        let values: Vec<u32> = tree.iter().rev().map(|(_, value)| *value).collect();
        assert_eq!(values, vec![90, 80, 70, 50, 40, 30, 10]);
    }

    #[test]
    fn test_iter_meets_in_middle() {
        let tree = build(&[1, 2, 3, 4]);
        let mut iter = tree.iter();
        assert_eq!(iter.next(), Some((&1, &10)));
        assert_eq!(iter.next_back(), Some((&4, &40)));
        assert_eq!(iter.next_back(), Some((&3, &30)));
        assert_eq!(iter.next(), Some((&2, &20)));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn test_iter_empty() {
        let tree = build(&[]);
        assert_eq!(tree.iter().next(), None);
        assert_eq!(tree.iter().next_back(), None);
    }

    #[test]
    fn test_range() {
        let tree = build(&[1, 6, 8, 11, 13, 15, 17, 22, 25, 27]);
        let keys: Vec<u32> = tree.range(&8, &15).map(|(key, _)| *key).collect();
        assert_eq!(keys, vec![8, 11, 13, 15]);
        assert_eq!(tree.range(&8, &15).len(), 4);

        let keys: Vec<u32> = tree.range(&7, &16).rev().map(|(key, _)| *key).collect();
        assert_eq!(keys, vec![15, 13, 11, 8]);

        assert_eq!(tree.range(&2, &5).next(), None);
        assert_eq!(tree.range(&30, &40).next(), None);
        assert_eq!(tree.range(&15, &8).next(), None);
    }

    #[test]
    fn test_into_iter() {
        let tree = build(&[3, 1, 2]);
        assert_eq!(
            tree.into_iter().collect::<Vec<(u32, u32)>>(),
            vec![(1, 10), (2, 20), (3, 30)],
        );

        let tree = build(&[3, 1, 2]);
        assert_eq!(
            tree.into_iter().rev().collect::<Vec<(u32, u32)>>(),
            vec![(3, 30), (2, 20), (1, 10)],
        );
    }

    #[test]
    fn test_into_iter_drops_unyielded() {
        struct Tracked(Rc<Cell<usize>>);

        impl Drop for Tracked {
            fn drop(&mut self) {
                self.0.set(self.0.get() + 1);
            }
        }

        let drops = Rc::new(Cell::new(0));
        let mut tree = Tree::new();
        for key in 0..10u32 {
            tree.insert(key, Tracked(Rc::clone(&drops)));
        }

        let mut iter = tree.into_iter();
        drop(iter.next());
        assert_eq!(drops.get(), 1);
        drop(iter);
        assert_eq!(drops.get(), 10);
    }
}
