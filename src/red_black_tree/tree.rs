use crate::arena::{Handle, TypedArena};
use crate::comparator::{Comparator, NaturalOrder};
use crate::entry::Entry;
use crate::red_black_tree::node::{Color, Node};
use log::trace;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::mem;

/// Number of nodes per arena chunk used by the default constructors.
pub const DEFAULT_CHUNK_SIZE: usize = 256;

/// The red black tree engine shared by `RedBlackMap`, `RedBlackSet` and `RedBlackBidiMap`.
///
/// Nodes live in a `TypedArena` and refer to each other through `Handle`s, including a parent
/// back-reference that lets cursors walk the tree in both directions without a stack. Every node
/// also records the size of its subtree, which keeps `rank` and `select` logarithmic.
///
/// Keys are ordered by a `Comparator`. The comparator is only consulted while searching, never
/// while links are being rewritten, so a comparator that panics leaves the tree exactly as it was
/// before the call.
///
/// # Examples
///
/// ```
/// use rbtree_collections::red_black_tree::Tree;
///
/// let mut tree = Tree::new();
/// for key in &[5, 3, 8, 1, 4, 7, 9] {
///     tree.insert(*key, key * 10);
/// }
/// assert_eq!(tree.keys(), vec![&1, &3, &4, &5, &7, &8, &9]);
///
/// assert_eq!(tree.remove(&5), Some((5, 50)));
/// assert_eq!(tree.keys(), vec![&1, &3, &4, &7, &8, &9]);
/// assert_eq!(tree.len(), 6);
/// assert!(tree.validate().is_ok());
/// ```
pub struct Tree<K, V, C = NaturalOrder> {
    pub(super) arena: TypedArena<Node<K, V>>,
    pub(super) root: Option<Handle>,
    pub(super) len: usize,
    comparator: C,
}

impl<K, V> Tree<K, V> {
    /// Constructs a new, empty tree ordered by `Ord`.
    pub fn new() -> Self {
        Tree::with_comparator(NaturalOrder)
    }
}

impl<K, V, C> Tree<K, V, C> {
    /// Constructs a new, empty tree ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::Tree;
    ///
    /// let mut tree = Tree::with_comparator(|a: &u32, b: &u32| b.cmp(a));
    /// tree.insert(1, ());
    /// tree.insert(2, ());
    /// assert_eq!(tree.keys(), vec![&2, &1]);
    /// ```
    pub fn with_comparator(comparator: C) -> Self {
        Tree::with_chunk_size(comparator, DEFAULT_CHUNK_SIZE)
    }

    /// Constructs a new, empty tree ordered by `comparator` whose arena allocates `chunk_size`
    /// nodes at a time.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    pub fn with_chunk_size(comparator: C, chunk_size: usize) -> Self {
        Tree {
            arena: TypedArena::new(chunk_size),
            root: None,
            len: 0,
            comparator,
        }
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Returns the number of entries in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn root(&self) -> Option<Handle> {
        self.root
    }

    /// Returns the node behind a handle, or `None` if the handle is stale.
    pub fn node(&self, handle: Handle) -> Option<&Node<K, V>> {
        self.arena.get(&handle)
    }

    pub(crate) fn entry(&self, handle: Handle) -> &Entry<K, V> {
        &self.arena[handle].entry
    }

    /// Removes every entry and releases the arena.
    pub fn clear(&mut self) {
        trace!("clearing red black tree with {} nodes", self.len);
        self.arena.clear();
        self.root = None;
        self.len = 0;
    }

    fn is_red(&self, handle: Option<Handle>) -> bool {
        match handle {
            None => false,
            Some(handle) => self.arena[handle].color == Color::Red,
        }
    }

    pub(super) fn size_of(&self, handle: Option<Handle>) -> usize {
        handle.map_or(0, |handle| self.arena[handle].size)
    }

    fn left_of(&self, handle: Option<Handle>) -> Option<Handle> {
        handle.and_then(|handle| self.arena[handle].left)
    }

    // Points the parent of `old` (or the root) at `new`.
    fn replace_child(&mut self, old: Handle, new: Option<Handle>) {
        let parent = self.arena[old].parent;
        match parent {
            None => self.root = new,
            Some(parent) => {
                let node = &mut self.arena[parent];
                if node.left == Some(old) {
                    node.left = new;
                } else {
                    node.right = new;
                }
            },
        }
        if let Some(new) = new {
            self.arena[new].parent = parent;
        }
    }

    fn rotate_left(&mut self, handle: Handle) -> Handle {
        let pivot = self.arena[handle]
            .right
            .expect("Expected right child node to be `Some`.");
        let inner = self.arena[pivot].left;

        self.replace_child(handle, Some(pivot));
        self.arena[handle].right = inner;
        if let Some(inner) = inner {
            self.arena[inner].parent = Some(handle);
        }
        self.arena[pivot].left = Some(handle);
        self.arena[handle].parent = Some(pivot);

        let size = self.arena[handle].size;
        let demoted_size = 1 + self.size_of(self.arena[handle].left) + self.size_of(inner);
        self.arena[pivot].size = size;
        self.arena[handle].size = demoted_size;
        pivot
    }

    fn rotate_right(&mut self, handle: Handle) -> Handle {
        let pivot = self.arena[handle]
            .left
            .expect("Expected left child node to be `Some`.");
        let inner = self.arena[pivot].right;

        self.replace_child(handle, Some(pivot));
        self.arena[handle].left = inner;
        if let Some(inner) = inner {
            self.arena[inner].parent = Some(handle);
        }
        self.arena[pivot].right = Some(handle);
        self.arena[handle].parent = Some(pivot);

        let size = self.arena[handle].size;
        let demoted_size = 1 + self.size_of(inner) + self.size_of(self.arena[handle].right);
        self.arena[pivot].size = size;
        self.arena[handle].size = demoted_size;
        pivot
    }

    // The new top inherits the old top's color and the demoted node turns red.
    fn rotate_left_recolor(&mut self, handle: Handle) -> Handle {
        let pivot = self.rotate_left(handle);
        self.arena[pivot].color = self.arena[handle].color;
        self.arena[handle].color = Color::Red;
        pivot
    }

    fn rotate_right_recolor(&mut self, handle: Handle) -> Handle {
        let pivot = self.rotate_right(handle);
        self.arena[pivot].color = self.arena[handle].color;
        self.arena[handle].color = Color::Red;
        pivot
    }

    fn flip_colors(&mut self, handle: Handle) {
        let node = &mut self.arena[handle];
        node.color = node.color.flip();
        let (left, right) = (node.left, node.right);
        for child in left.into_iter().chain(right) {
            let child = &mut self.arena[child];
            child.color = child.color.flip();
        }
    }

    // Restores the invariants at `handle` after one of its subtrees grew by a red node. At most
    // one red-red link exists below `handle` when this is called.
    fn balance(&mut self, handle: Handle) {
        // Deletions can leave red links leaning right, so a red zig-zag may appear on either
        // side. Straighten it before the left-leaning checks.
        if let Some(left) = self.arena[handle].left {
            if self.is_red(Some(left)) && self.is_red(self.arena[left].right) {
                self.rotate_left_recolor(left);
            }
        }
        if let Some(right) = self.arena[handle].right {
            if self.is_red(Some(right)) && self.is_red(self.arena[right].left) {
                self.rotate_right_recolor(right);
            }
        }

        let mut top = handle;
        if self.is_red(self.arena[top].right) && !self.is_red(self.arena[top].left) {
            top = self.rotate_left_recolor(top);
        }

        let left = self.arena[top].left;
        if self.is_red(left) && self.is_red(self.left_of(left)) {
            top = self.rotate_right_recolor(top);
        }

        if self.is_red(self.arena[top].left) && self.is_red(self.arena[top].right) {
            self.flip_colors(top);
        }
    }

    /// Inserts a key-value pair. If the key already exists, only its value is replaced and the
    /// old value is returned; the stored key and the shape of the tree are left untouched.
    pub fn insert(&mut self, key: K, value: V) -> Option<V>
    where
        C: Comparator<K>,
    {
        let ret = match self.root {
            Some(root) => self.insert_below(root, key, value),
            None => {
                self.root = Some(self.arena.allocate(Node::new(key, value, None)));
                None
            },
        };

        if ret.is_none() {
            self.len += 1;
            let root = self.root.expect("Expected non-empty tree.");
            self.arena[root].color = Color::Black;
        }
        ret
    }

    fn insert_below(&mut self, handle: Handle, key: K, value: V) -> Option<V>
    where
        C: Comparator<K>,
    {
        let ordering = self.comparator.compare(&key, &self.arena[handle].entry.key);
        let child = match ordering {
            Ordering::Less => self.arena[handle].left,
            Ordering::Greater => self.arena[handle].right,
            Ordering::Equal => {
                return Some(mem::replace(&mut self.arena[handle].entry.value, value));
            },
        };

        match child {
            Some(child) => {
                let ret = self.insert_below(child, key, value);
                if ret.is_some() {
                    return ret;
                }
            },
            None => {
                let leaf = self.arena.allocate(Node::new(key, value, Some(handle)));
                let node = &mut self.arena[handle];
                if ordering == Ordering::Less {
                    node.left = Some(leaf);
                } else {
                    node.right = Some(leaf);
                }
            },
        }

        self.arena[handle].size += 1;
        self.balance(handle);
        None
    }

    /// Removes a key from the tree and returns its key-value pair, or `None` if the key is
    /// absent.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.find(key).map(|handle| self.remove_at(handle))
    }

    /// Removes the entry behind `handle` and returns it.
    ///
    /// When the node has two children, its slot takes over the entry of its in-order predecessor
    /// and the predecessor's slot is freed. Any handle held for the predecessor's key is then
    /// stale and may later refer to an unrelated node once the slot is reused; look the key up
    /// again instead.
    ///
    /// # Panics
    ///
    /// Panics if `handle` does not refer to a node of this tree.
    pub fn remove_at(&mut self, handle: Handle) -> (K, V) {
        // A node with two children trades entries with its in-order predecessor, which has at
        // most one child and is the node physically unlinked.
        let victim = match (self.arena[handle].left, self.arena[handle].right) {
            (Some(left), Some(_)) => self.rightmost_from(left),
            _ => handle,
        };

        self.unlink(victim);
        let Node { entry, .. } = self.arena.free(&victim);
        self.len -= 1;

        if victim == handle {
            entry.into_pair()
        } else {
            mem::replace(&mut self.arena[handle].entry, entry).into_pair()
        }
    }

    // precondition: `handle` has at most one child
    fn unlink(&mut self, handle: Handle) {
        let (color, child) = {
            let node = &self.arena[handle];
            (node.color, node.left.or(node.right))
        };

        // A black node without a red child to take its place leaves a black-height deficit.
        // With at most one child that child must be nil, so `handle` stands in for the nil leaf.
        if color == Color::Black && !self.is_red(child) {
            self.remove_fixup(handle);
        }

        let mut curr = self.arena[handle].parent;
        while let Some(ancestor) = curr {
            self.arena[ancestor].size -= 1;
            curr = self.arena[ancestor].parent;
        }

        self.replace_child(handle, child);
        if let Some(child) = child {
            self.arena[child].color = Color::Black;
        }
        let node = &mut self.arena[handle];
        node.left = None;
        node.right = None;
        node.parent = None;
    }

    fn sibling_of(&self, parent: Handle, is_left: bool) -> Handle {
        let node = &self.arena[parent];
        let sibling = if is_left { node.right } else { node.left };
        sibling.expect("Expected sibling node to be `Some`.")
    }

    // Returns the (near, far) children of `sibling` relative to the side being fixed.
    fn nephews(&self, sibling: Handle, is_left: bool) -> (Option<Handle>, Option<Handle>) {
        let node = &self.arena[sibling];
        if is_left {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        }
    }

    fn remove_fixup(&mut self, mut handle: Handle) {
        loop {
            // case 1: reached the root
            let parent = match self.arena[handle].parent {
                Some(parent) => parent,
                None => return,
            };
            let is_left = self.arena[parent].left == Some(handle);
            let mut sibling = self.sibling_of(parent, is_left);

            // case 2: red sibling
            if self.is_red(Some(sibling)) {
                self.arena[parent].color = Color::Red;
                self.arena[sibling].color = Color::Black;
                if is_left {
                    self.rotate_left(parent);
                } else {
                    self.rotate_right(parent);
                }
                sibling = self.sibling_of(parent, is_left);
            }

            let (near, far) = self.nephews(sibling, is_left);
            if !self.is_red(near) && !self.is_red(far) {
                self.arena[sibling].color = Color::Red;
                if self.arena[parent].color == Color::Black {
                    // case 3: everything black, push the deficit up
                    handle = parent;
                    continue;
                }
                // case 4: red parent absorbs the deficit
                self.arena[parent].color = Color::Black;
                return;
            }

            // case 5: near nephew red, far nephew black
            if !self.is_red(far) {
                let near = near.expect("Expected near nephew node to be `Some`.");
                self.arena[sibling].color = Color::Red;
                self.arena[near].color = Color::Black;
                if is_left {
                    self.rotate_right(sibling);
                } else {
                    self.rotate_left(sibling);
                }
                sibling = near;
            }

            // case 6: far nephew red
            let (_, far) = self.nephews(sibling, is_left);
            let far = far.expect("Expected far nephew node to be `Some`.");
            self.arena[sibling].color = self.arena[parent].color;
            self.arena[parent].color = Color::Black;
            self.arena[far].color = Color::Black;
            if is_left {
                self.rotate_left(parent);
            } else {
                self.rotate_right(parent);
            }
            return;
        }
    }

    /// Returns the handle of the node holding `key`, or `None` if the key is absent.
    pub fn find<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        let mut curr = self.root;
        while let Some(handle) = curr {
            let node = &self.arena[handle];
            curr = match self.comparator.compare(key, node.entry.key.borrow()) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(handle),
            };
        }
        None
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.find(key).map(|handle| &self.arena[handle].entry.value)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        match self.find(key) {
            Some(handle) => Some(&mut self.arena[handle].entry.value),
            None => None,
        }
    }

    /// Returns the stored key and its value, or `None` if the key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert("a".to_string(), 1);
    /// assert_eq!(tree.get_key_value("a"), Some((&"a".to_string(), &1)));
    /// assert_eq!(tree.get_key_value("b"), None);
    /// ```
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.find(key).map(|handle| {
            let entry = &self.arena[handle].entry;
            (&entry.key, &entry.value)
        })
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.find(key).is_some()
    }

    /// Returns the node with the greatest key less than or equal to `key`.
    pub fn floor<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        let mut curr = self.root;
        let mut best = None;
        while let Some(handle) = curr {
            let node = &self.arena[handle];
            match self.comparator.compare(key, node.entry.key.borrow()) {
                Ordering::Less => curr = node.left,
                Ordering::Greater => {
                    best = Some(handle);
                    curr = node.right;
                },
                Ordering::Equal => return Some(handle),
            }
        }
        best
    }

    /// Returns the node with the least key greater than or equal to `key`.
    pub fn ceiling<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        let mut curr = self.root;
        let mut best = None;
        while let Some(handle) = curr {
            let node = &self.arena[handle];
            match self.comparator.compare(key, node.entry.key.borrow()) {
                Ordering::Less => {
                    best = Some(handle);
                    curr = node.left;
                },
                Ordering::Greater => curr = node.right,
                Ordering::Equal => return Some(handle),
            }
        }
        best
    }

    // Returns the first and last nodes whose keys lie in `[low, high]`, if any do.
    pub(super) fn window<Q>(&self, low: &Q, high: &Q) -> Option<(Handle, Handle)>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        let first = self.ceiling(low)?;
        let last = self.floor(high)?;
        let first_key: &Q = self.arena[first].entry.key.borrow();
        let last_key: &Q = self.arena[last].entry.key.borrow();
        if self.comparator.compare(first_key, last_key) == Ordering::Greater {
            None
        } else {
            Some((first, last))
        }
    }

    fn leftmost_from(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self.arena[handle].left {
            handle = left;
        }
        handle
    }

    fn rightmost_from(&self, mut handle: Handle) -> Handle {
        while let Some(right) = self.arena[handle].right {
            handle = right;
        }
        handle
    }

    /// Returns the node with the minimum key.
    pub fn leftmost(&self) -> Option<Handle> {
        self.root.map(|root| self.leftmost_from(root))
    }

    /// Returns the node with the maximum key.
    pub fn rightmost(&self) -> Option<Handle> {
        self.root.map(|root| self.rightmost_from(root))
    }

    /// Returns the in-order successor of `handle`.
    pub fn successor(&self, handle: Handle) -> Option<Handle> {
        if let Some(right) = self.arena[handle].right {
            return Some(self.leftmost_from(right));
        }
        let mut curr = handle;
        while let Some(parent) = self.arena[curr].parent {
            if self.arena[parent].left == Some(curr) {
                return Some(parent);
            }
            curr = parent;
        }
        None
    }

    /// Returns the in-order predecessor of `handle`.
    pub fn predecessor(&self, handle: Handle) -> Option<Handle> {
        if let Some(left) = self.arena[handle].left {
            return Some(self.rightmost_from(left));
        }
        let mut curr = handle;
        while let Some(parent) = self.arena[curr].parent {
            if self.arena[parent].right == Some(curr) {
                return Some(parent);
            }
            curr = parent;
        }
        None
    }

    /// Removes and returns the entry with the minimum key.
    pub fn pop_min(&mut self) -> Option<(K, V)> {
        self.leftmost().map(|handle| self.remove_at(handle))
    }

    /// Removes and returns the entry with the maximum key.
    pub fn pop_max(&mut self) -> Option<(K, V)> {
        self.rightmost().map(|handle| self.remove_at(handle))
    }

    /// Returns the number of keys strictly less than `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(10, ());
    /// tree.insert(20, ());
    /// tree.insert(30, ());
    /// assert_eq!(tree.rank(&5), 0);
    /// assert_eq!(tree.rank(&20), 1);
    /// assert_eq!(tree.rank(&25), 2);
    /// ```
    pub fn rank<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        let mut curr = self.root;
        let mut rank = 0;
        while let Some(handle) = curr {
            let node = &self.arena[handle];
            match self.comparator.compare(key, node.entry.key.borrow()) {
                Ordering::Less => curr = node.left,
                Ordering::Greater => {
                    rank += self.size_of(node.left) + 1;
                    curr = node.right;
                },
                Ordering::Equal => return rank + self.size_of(node.left),
            }
        }
        rank
    }

    /// Returns the node holding the `index`-th smallest key, counting from zero.
    pub fn select(&self, mut index: usize) -> Option<Handle> {
        let mut curr = self.root;
        while let Some(handle) = curr {
            let node = &self.arena[handle];
            let left_size = self.size_of(node.left);
            match index.cmp(&left_size) {
                Ordering::Less => curr = node.left,
                Ordering::Greater => {
                    index -= left_size + 1;
                    curr = node.right;
                },
                Ordering::Equal => return Some(handle),
            }
        }
        None
    }

    /// Returns the in-order index of the node behind `handle`.
    pub fn position(&self, handle: Handle) -> usize {
        let mut index = self.size_of(self.arena[handle].left);
        let mut curr = handle;
        while let Some(parent) = self.arena[curr].parent {
            if self.arena[parent].right == Some(curr) {
                index += self.size_of(self.arena[parent].left) + 1;
            }
            curr = parent;
        }
        index
    }

    // Handles of every node in ascending key order.
    pub(super) fn handles(&self) -> Vec<Handle> {
        let mut handles = Vec::with_capacity(self.len);
        let mut curr = self.leftmost();
        while let Some(handle) = curr {
            handles.push(handle);
            curr = self.successor(handle);
        }
        handles
    }

    /// Returns a snapshot of all keys in ascending order.
    pub fn keys(&self) -> Vec<&K> {
        self.handles()
            .into_iter()
            .map(|handle| &self.arena[handle].entry.key)
            .collect()
    }

    /// Returns a snapshot of all values in ascending key order.
    pub fn values(&self) -> Vec<&V> {
        self.handles()
            .into_iter()
            .map(|handle| &self.arena[handle].entry.value)
            .collect()
    }
}

impl<K, V, C> Default for Tree<K, V, C>
where
    C: Default,
{
    fn default() -> Self {
        Tree::with_comparator(C::default())
    }
}
