//! Self-balancing binary search tree that uses a color bit to ensure that the tree remains
//! approximately balanced during insertions and deletions.
//!
//! Nodes are allocated in an arena and linked by handles, with parent links and subtree sizes.
//! `Tree` is the engine; `RedBlackMap`, `RedBlackSet` and `RedBlackBidiMap` are the containers
//! built on top of it.

mod bidi_map;
mod cursor;
mod iter;
mod map;
mod node;
mod serialization;
mod set;
mod tree;
mod validate;

pub use self::bidi_map::RedBlackBidiMap;
pub use self::cursor::{Cursor, Position, RangeCursor};
pub use self::iter::{IntoIter, Iter};
pub use self::map::RedBlackMap;
pub use self::node::{Color, Node};
pub use self::set::{RedBlackSet, RedBlackSetIntoIter, RedBlackSetIter};
pub use self::tree::{Tree, DEFAULT_CHUNK_SIZE};
pub use crate::arena::Handle;
