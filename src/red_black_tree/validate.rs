use crate::arena::Handle;
use crate::comparator::Comparator;
use crate::error::{Result, Violation};
use crate::red_black_tree::node::Color;
use crate::red_black_tree::tree::Tree;
use log::debug;
use std::cmp::Ordering;
use std::fmt;
use std::result;

impl<K, V, C> Tree<K, V, C> {
    /// Checks every red black tree invariant: key order, a black root, no red node with a red
    /// child, uniform black height, consistent parent links, subtree sizes and length.
    ///
    /// This walks the whole tree and is meant for tests and debugging.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for key in 0..100 {
    ///     tree.insert(key, ());
    /// }
    /// assert!(tree.validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<()>
    where
        C: Comparator<K>,
    {
        self.check().map_err(|violation| {
            debug!("red black tree validation failed: {}", violation);
            violation.into()
        })
    }

    fn check(&self) -> result::Result<(), Violation>
    where
        C: Comparator<K>,
    {
        let reachable = match self.root {
            None => 0,
            Some(root) => {
                let node = &self.arena[root];
                if node.color == Color::Red {
                    return Err(Violation::RedRoot);
                }
                if node.parent.is_some() {
                    return Err(Violation::BrokenParentLink);
                }
                self.check_subtree(root, None, None)?;
                node.size
            },
        };

        if reachable != self.len || self.arena.len() != self.len {
            return Err(Violation::LengthMismatch);
        }
        Ok(())
    }

    // Returns the black height of the subtree at `handle`. Keys must lie strictly between the
    // keys of `lower` and `upper`.
    fn check_subtree(
        &self,
        handle: Handle,
        lower: Option<Handle>,
        upper: Option<Handle>,
    ) -> result::Result<usize, Violation>
    where
        C: Comparator<K>,
    {
        let node = &self.arena[handle];
        let key = &node.entry.key;

        let in_order = lower.map_or(true, |lower| {
            self.comparator().compare(&self.arena[lower].entry.key, key) == Ordering::Less
        }) && upper.map_or(true, |upper| {
            self.comparator().compare(key, &self.arena[upper].entry.key) == Ordering::Less
        });
        if !in_order {
            return Err(Violation::OrderViolation);
        }

        let left_height = self.check_child(handle, node.left, lower, Some(handle))?;
        let right_height = self.check_child(handle, node.right, Some(handle), upper)?;
        if left_height != right_height {
            return Err(Violation::BlackHeightMismatch);
        }
        if node.size != 1 + self.size_of(node.left) + self.size_of(node.right) {
            return Err(Violation::SizeMismatch);
        }

        match node.color {
            Color::Black => Ok(left_height + 1),
            Color::Red => Ok(left_height),
        }
    }

    fn check_child(
        &self,
        parent: Handle,
        child: Option<Handle>,
        lower: Option<Handle>,
        upper: Option<Handle>,
    ) -> result::Result<usize, Violation>
    where
        C: Comparator<K>,
    {
        let child = match child {
            Some(child) => child,
            None => return Ok(0),
        };
        let node = &self.arena[child];
        if node.parent != Some(parent) {
            return Err(Violation::BrokenParentLink);
        }
        if node.color == Color::Red && self.arena[parent].color == Color::Red {
            return Err(Violation::RedRedLink);
        }
        self.check_subtree(child, lower, upper)
    }

    fn write_subtree(
        &self,
        f: &mut fmt::Formatter<'_>,
        handle: Handle,
        prefix: &str,
        is_tail: bool,
    ) -> fmt::Result
    where
        K: fmt::Display,
    {
        let node = &self.arena[handle];
        if let Some(right) = node.right {
            let branch = if is_tail { "│   " } else { "    " };
            self.write_subtree(f, right, &format!("{}{}", prefix, branch), false)?;
        }

        let connector = if is_tail { "└── " } else { "┌── " };
        writeln!(f, "{}{}{}", prefix, connector, node.entry.key)?;

        if let Some(left) = node.left {
            let branch = if is_tail { "    " } else { "│   " };
            self.write_subtree(f, left, &format!("{}{}", prefix, branch), true)?;
        }
        Ok(())
    }
}

/// Renders the tree sideways with box-drawing characters, right subtree on top.
///
/// # Examples
///
/// ```
/// use rbtree_collections::red_black_tree::Tree;
///
/// let mut tree = Tree::new();
/// tree.insert(2, ());
/// tree.insert(1, ());
/// tree.insert(3, ());
/// assert_eq!(
///     tree.to_string(),
///     "RedBlackTree\n│   ┌── 3\n└── 2\n    └── 1\n",
/// );
/// ```
impl<K, V, C> fmt::Display for Tree<K, V, C>
where
    K: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "RedBlackTree")?;
        match self.root {
            Some(root) => self.write_subtree(f, root, "", true),
            None => Ok(()),
        }
    }
}

impl<K, V, C> fmt::Debug for Tree<K, V, C>
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
    use crate::error::{Error, Violation};
    use crate::red_black_tree::node::Color;
    use crate::red_black_tree::Tree;

    fn build(keys: &[u32]) -> Tree<u32, ()> {
        let mut tree = Tree::new();
        for key in keys {
            tree.insert(*key, ());
        }
        tree
    }

    fn violation(tree: &Tree<u32, ()>) -> Option<Violation> {
        match tree.validate() {
            Ok(()) => None,
            Err(Error::InvariantViolation(violation)) => Some(violation),
            Err(err) => panic!("unexpected error: {}", err),
        }
    }

    #[test]
    fn test_validate_empty() {
        let tree: Tree<u32, ()> = Tree::new();
        assert_eq!(violation(&tree), None);
    }

    #[test]
    fn test_detects_red_root() {
        let mut tree = build(&[1, 2, 3]);
        let root = tree.root.unwrap();
        tree.arena[root].color = Color::Red;
        assert_eq!(violation(&tree), Some(Violation::RedRoot));
    }

    #[test]
    fn test_detects_red_red_link() {
        let mut tree = build(&[2, 1, 3, 4]);
        // 3 hangs red below the black 4
        let four = tree.find(&4).unwrap();
        tree.arena[four].color = Color::Red;
        assert_eq!(violation(&tree), Some(Violation::RedRedLink));
    }

    #[test]
    fn test_detects_black_height_mismatch() {
        let mut tree = build(&[2, 1, 3]);
        let one = tree.find(&1).unwrap();
        tree.arena[one].color = Color::Red;
        assert_eq!(violation(&tree), Some(Violation::BlackHeightMismatch));
    }

    #[test]
    fn test_detects_order_violation() {
        let mut tree = build(&[2, 1, 3]);
        let one = tree.find(&1).unwrap();
        tree.arena[one].entry.key = 5;
        assert_eq!(violation(&tree), Some(Violation::OrderViolation));
    }

    #[test]
    fn test_detects_size_mismatch() {
        let mut tree = build(&[2, 1, 3]);
        let one = tree.find(&1).unwrap();
        tree.arena[one].size = 2;
        assert_eq!(violation(&tree), Some(Violation::SizeMismatch));
    }

    #[test]
    fn test_detects_length_mismatch() {
        let mut tree = build(&[2, 1, 3]);
        tree.len = 4;
        assert_eq!(violation(&tree), Some(Violation::LengthMismatch));
    }

    #[test]
    fn test_detects_broken_parent_link() {
        let mut tree = build(&[2, 1, 3]);
        let one = tree.find(&1).unwrap();
        let three = tree.find(&3).unwrap();
        tree.arena[one].parent = Some(three);
        assert_eq!(violation(&tree), Some(Violation::BrokenParentLink));
    }

    #[test]
    fn test_display() {
        let tree = build(&[1, 2, 3, 4, 5, 6, 7]);
        let expected = [
            "RedBlackTree",
            "│       ┌── 7",
            "│   ┌── 6",
            "│   │   └── 5",
            "└── 4",
            "    │   ┌── 3",
            "    └── 2",
            "        └── 1",
        ];
        assert_eq!(tree.to_string(), expected.join("\n") + "\n");
    }

    #[test]
    fn test_display_empty() {
        let tree: Tree<u32, ()> = Tree::new();
        assert_eq!(tree.to_string(), "RedBlackTree\n");
    }

    #[test]
    fn test_debug() {
        let mut tree = Tree::new();
        tree.insert(2, "b");
        tree.insert(1, "a");
        assert_eq!(format!("{:?}", tree), r#"{1: "a", 2: "b"}"#);
    }
}
