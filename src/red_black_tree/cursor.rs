use crate::arena::Handle;
use crate::comparator::Comparator;
use crate::red_black_tree::tree::Tree;
use std::borrow::Borrow;

/// Where a cursor sits relative to the entries of its tree.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Position {
    /// Before the first entry.
    Begin,
    /// At an entry.
    Between,
    /// Past the last entry.
    End,
}

/// A stateful, bidirectional cursor over a red black tree.
///
/// A cursor starts either before the first entry, past the last entry, or at a particular node.
/// Moving it walks parent links, so each step is amortized O(1) and never allocates. The cursor
/// borrows the tree, which rules out mutation while it is alive.
///
/// # Examples
///
/// ```
/// use rbtree_collections::red_black_tree::{Position, Tree};
///
/// let mut tree = Tree::new();
/// tree.insert(1, "a");
/// tree.insert(2, "b");
///
/// let mut cursor = tree.cursor();
/// assert_eq!(cursor.position(), Position::Begin);
/// assert!(cursor.move_next());
/// assert_eq!(cursor.key(), Some(&1));
/// assert!(cursor.move_next());
/// assert_eq!(cursor.value(), Some(&"b"));
/// assert!(!cursor.move_next());
/// assert_eq!(cursor.position(), Position::End);
/// assert!(cursor.move_prev());
/// assert_eq!(cursor.key(), Some(&2));
/// ```
pub struct Cursor<'a, K, V, C> {
    tree: &'a Tree<K, V, C>,
    node: Option<Handle>,
    position: Position,
}

impl<'a, K, V, C> Cursor<'a, K, V, C> {
    fn settle(&mut self, node: Option<Handle>, otherwise: Position) -> bool {
        self.node = node;
        self.position = match node {
            Some(_) => Position::Between,
            None => otherwise,
        };
        node.is_some()
    }

    /// Moves to the next entry and returns `true` if there was one. From `Begin` this moves to
    /// the first entry; past the last entry the cursor ends up at `End`.
    pub fn move_next(&mut self) -> bool {
        let next = match self.position {
            Position::Begin => self.tree.leftmost(),
            Position::Between => self.node.and_then(|node| self.tree.successor(node)),
            Position::End => None,
        };
        self.settle(next, Position::End)
    }

    /// Moves to the previous entry and returns `true` if there was one. From `End` this moves to
    /// the last entry; before the first entry the cursor ends up at `Begin`.
    pub fn move_prev(&mut self) -> bool {
        let prev = match self.position {
            Position::Begin => None,
            Position::Between => self.node.and_then(|node| self.tree.predecessor(node)),
            Position::End => self.tree.rightmost(),
        };
        self.settle(prev, Position::Begin)
    }

    /// Resets the cursor to before the first entry.
    pub fn begin(&mut self) {
        self.settle(None, Position::Begin);
    }

    /// Moves the cursor past the last entry.
    pub fn end(&mut self) {
        self.settle(None, Position::End);
    }

    /// Moves to the first entry and returns `true` if the tree is not empty.
    pub fn first(&mut self) -> bool {
        self.begin();
        self.move_next()
    }

    /// Moves to the last entry and returns `true` if the tree is not empty.
    pub fn last(&mut self) -> bool {
        self.end();
        self.move_prev()
    }

    /// Moves forward until reaching an entry that satisfies `predicate`. Returns `false` and
    /// leaves the cursor at `End` if no such entry follows the current position.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for key in 0..10 {
    ///     tree.insert(key, key * key);
    /// }
    ///
    /// let mut cursor = tree.cursor();
    /// assert!(cursor.move_next_to(|_, value| *value > 10));
    /// assert_eq!(cursor.key(), Some(&4));
    /// assert!(!cursor.move_next_to(|key, _| *key == 2));
    /// ```
    pub fn move_next_to<F>(&mut self, mut predicate: F) -> bool
    where
        F: FnMut(&K, &V) -> bool,
    {
        while self.move_next() {
            if let Some((key, value)) = self.entry() {
                if predicate(key, value) {
                    return true;
                }
            }
        }
        false
    }

    /// Moves backward until reaching an entry that satisfies `predicate`. Returns `false` and
    /// leaves the cursor at `Begin` if no such entry precedes the current position.
    pub fn move_prev_to<F>(&mut self, mut predicate: F) -> bool
    where
        F: FnMut(&K, &V) -> bool,
    {
        while self.move_prev() {
            if let Some((key, value)) = self.entry() {
                if predicate(key, value) {
                    return true;
                }
            }
        }
        false
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns the handle of the current node, or `None` when not positioned at an entry.
    pub fn node(&self) -> Option<Handle> {
        self.node
    }

    pub fn entry(&self) -> Option<(&'a K, &'a V)> {
        let tree = self.tree;
        self.node.map(|node| {
            let entry = tree.entry(node);
            (&entry.key, &entry.value)
        })
    }

    pub fn key(&self) -> Option<&'a K> {
        self.entry().map(|(key, _)| key)
    }

    pub fn value(&self) -> Option<&'a V> {
        self.entry().map(|(_, value)| value)
    }
}

impl<'a, K, V, C> Clone for Cursor<'a, K, V, C> {
    fn clone(&self) -> Self {
        Cursor {
            tree: self.tree,
            node: self.node,
            position: self.position,
        }
    }
}

/// A cursor restricted to the keys of an inclusive window `[low, high]`.
///
/// The first and last nodes of the window are found once, when the cursor is created. After that
/// the cursor behaves like `Cursor`, except that `Begin` and `End` sit just outside the window
/// and the cursor refuses to step past either edge.
///
/// # Examples
///
/// ```
/// use rbtree_collections::red_black_tree::Tree;
///
/// let mut tree = Tree::new();
/// for key in &[1, 6, 8, 11, 13, 15, 17, 22, 25, 27] {
///     tree.insert(*key, ());
/// }
///
/// let mut cursor = tree.range_cursor(&8, &15);
/// let mut keys = Vec::new();
/// while cursor.move_next() {
///     keys.push(*cursor.key().unwrap());
/// }
/// assert_eq!(keys, vec![8, 11, 13, 15]);
/// assert!(!cursor.move_next());
/// ```
pub struct RangeCursor<'a, K, V, C> {
    cursor: Cursor<'a, K, V, C>,
    window: Option<(Handle, Handle)>,
}

impl<'a, K, V, C> RangeCursor<'a, K, V, C> {
    /// Moves to the next entry inside the window and returns `true` if there was one.
    pub fn move_next(&mut self) -> bool {
        let (first, last) = match self.window {
            Some(window) => window,
            None => return self.cursor.settle(None, Position::End),
        };
        match self.cursor.position {
            Position::Begin => self.cursor.settle(Some(first), Position::End),
            Position::Between if self.cursor.node == Some(last) => {
                self.cursor.settle(None, Position::End)
            },
            Position::Between => self.cursor.move_next(),
            Position::End => false,
        }
    }

    /// Moves to the previous entry inside the window and returns `true` if there was one.
    pub fn move_prev(&mut self) -> bool {
        let (first, last) = match self.window {
            Some(window) => window,
            None => return self.cursor.settle(None, Position::Begin),
        };
        match self.cursor.position {
            Position::End => self.cursor.settle(Some(last), Position::Begin),
            Position::Between if self.cursor.node == Some(first) => {
                self.cursor.settle(None, Position::Begin)
            },
            Position::Between => self.cursor.move_prev(),
            Position::Begin => false,
        }
    }

    pub fn begin(&mut self) {
        self.cursor.begin();
    }

    pub fn end(&mut self) {
        self.cursor.end();
    }

    pub fn first(&mut self) -> bool {
        self.begin();
        self.move_next()
    }

    pub fn last(&mut self) -> bool {
        self.end();
        self.move_prev()
    }

    pub fn move_next_to<F>(&mut self, mut predicate: F) -> bool
    where
        F: FnMut(&K, &V) -> bool,
    {
        while self.move_next() {
            if let Some((key, value)) = self.entry() {
                if predicate(key, value) {
                    return true;
                }
            }
        }
        false
    }

    pub fn move_prev_to<F>(&mut self, mut predicate: F) -> bool
    where
        F: FnMut(&K, &V) -> bool,
    {
        while self.move_prev() {
            if let Some((key, value)) = self.entry() {
                if predicate(key, value) {
                    return true;
                }
            }
        }
        false
    }

    pub fn position(&self) -> Position {
        self.cursor.position()
    }

    pub fn node(&self) -> Option<Handle> {
        self.cursor.node()
    }

    pub fn entry(&self) -> Option<(&'a K, &'a V)> {
        self.cursor.entry()
    }

    pub fn key(&self) -> Option<&'a K> {
        self.cursor.key()
    }

    pub fn value(&self) -> Option<&'a V> {
        self.cursor.value()
    }
}

impl<K, V, C> Tree<K, V, C> {
    /// Returns a cursor positioned before the first entry.
    pub fn cursor(&self) -> Cursor<'_, K, V, C> {
        Cursor {
            tree: self,
            node: None,
            position: Position::Begin,
        }
    }

    /// Returns a cursor positioned at `handle`.
    ///
    /// # Panics
    ///
    /// Panics if `handle` does not refer to a node of this tree.
    pub fn cursor_at(&self, handle: Handle) -> Cursor<'_, K, V, C> {
        assert!(
            self.node(handle).is_some(),
            "Error: cursor handle does not refer to a live node."
        );
        Cursor {
            tree: self,
            node: Some(handle),
            position: Position::Between,
        }
    }

    /// Returns a cursor at the greatest key less than or equal to `key`, or at `Begin` if every
    /// key is greater.
    pub fn floor_cursor<Q>(&self, key: &Q) -> Cursor<'_, K, V, C>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        let mut cursor = self.cursor();
        cursor.settle(self.floor(key), Position::Begin);
        cursor
    }

    /// Returns a cursor at the least key greater than or equal to `key`, or at `End` if every key
    /// is less.
    pub fn ceiling_cursor<Q>(&self, key: &Q) -> Cursor<'_, K, V, C>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        let mut cursor = self.cursor();
        cursor.settle(self.ceiling(key), Position::End);
        cursor
    }

    /// Returns a cursor over the keys in `[low, high]`, positioned before the first of them.
    pub fn range_cursor<Q>(&self, low: &Q, high: &Q) -> RangeCursor<'_, K, V, C>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        RangeCursor {
            cursor: self.cursor(),
            window: self.window(low, high),
        }
    }
}
