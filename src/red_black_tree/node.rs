use crate::arena::Handle;
use crate::entry::Entry;

/// The color of a node in a red black tree. Implicit nil leaves are black.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    pub fn flip(self) -> Color {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }
}

/// A node of a red black tree.
///
/// Children are owned through the tree's arena; `parent` is a back-reference used only for
/// traversal.
pub struct Node<K, V> {
    pub(crate) entry: Entry<K, V>,
    pub(crate) color: Color,
    pub(crate) left: Option<Handle>,
    pub(crate) right: Option<Handle>,
    pub(crate) parent: Option<Handle>,
    pub(crate) size: usize,
}

impl<K, V> Node<K, V> {
    pub(crate) fn new(key: K, value: V, parent: Option<Handle>) -> Self {
        Node {
            entry: Entry::new(key, value),
            color: Color::Red,
            left: None,
            right: None,
            parent,
            size: 1,
        }
    }

    pub fn key(&self) -> &K {
        &self.entry.key
    }

    pub fn value(&self) -> &V {
        &self.entry.value
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn left(&self) -> Option<Handle> {
        self.left
    }

    pub fn right(&self) -> Option<Handle> {
        self.right
    }

    pub fn parent(&self) -> Option<Handle> {
        self.parent
    }

    /// Returns the number of nodes in the subtree rooted at this node.
    pub fn size(&self) -> usize {
        self.size
    }
}
