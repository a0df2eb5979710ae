//! Chunked typed arena that hands out copyable handles.

use std::mem;
use std::ops::{Index, IndexMut};
use std::vec::Vec;

/// A handle to an object allocated in a `TypedArena<T>`.
///
/// Handles are plain indices: they stay valid until the object they refer to is freed, after
/// which the slot may be reused by a later allocation.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Handle {
    chunk_index: usize,
    block_index: usize,
}

enum Block<T> {
    Occupied(T),
    Vacant(Option<Handle>),
}

/// An allocator for a single type of object.
///
/// Objects are stored in fixed-size chunks so that growing the arena never moves existing
/// objects. Freed slots are threaded into a free list and reused before a new chunk is
/// requested. The arena owns every object it allocates; dropping or clearing the arena drops
/// them all.
///
/// # Examples
///
/// ```
/// use rbtree_collections::arena::TypedArena;
///
/// let mut arena = TypedArena::new(1024);
///
/// let x = arena.allocate(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena[x], 2);
///
/// assert_eq!(arena.free(&x), 2);
/// assert!(arena.is_empty());
/// ```
pub struct TypedArena<T> {
    head: Option<Handle>,
    chunks: Vec<Vec<Block<T>>>,
    chunk_size: usize,
    len: usize,
    capacity: usize,
}

impl<T> TypedArena<T> {
    fn block(&self, handle: &Handle) -> Option<&Block<T>> {
        self.chunks
            .get(handle.chunk_index)
            .and_then(|chunk| chunk.get(handle.block_index))
    }

    /// Constructs a new, empty `TypedArena<T>` that holds `chunk_size` objects per chunk.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::arena::TypedArena;
    ///
    /// let arena: TypedArena<u32> = TypedArena::new(1024);
    /// ```
    pub fn new(chunk_size: usize) -> Self {
        assert!(chunk_size > 0, "Error: chunk size must be positive.");
        TypedArena {
            head: None,
            chunks: Vec::new(),
            chunk_size,
            len: 0,
            capacity: 0,
        }
    }

    /// Allocates an object in the arena and returns its handle.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.get(&x), Some(&0));
    /// ```
    pub fn allocate(&mut self, value: T) -> Handle {
        self.len += 1;

        if let Some(handle) = self.head.take() {
            let block = mem::replace(
                &mut self.chunks[handle.chunk_index][handle.block_index],
                Block::Occupied(value),
            );
            match block {
                Block::Vacant(next) => self.head = next,
                Block::Occupied(_) => panic!("Expected a vacant block at the free list head."),
            }
            return handle;
        }

        if self.len > self.capacity {
            self.chunks.push(Vec::with_capacity(self.chunk_size));
            self.capacity += self.chunk_size;
        }

        let chunk_index = self.chunks.len() - 1;
        let chunk = &mut self.chunks[chunk_index];
        chunk.push(Block::Occupied(value));
        Handle {
            chunk_index,
            block_index: chunk.len() - 1,
        }
    }

    /// Frees an object in the arena and returns it. The handle must not be used afterwards.
    ///
    /// # Panics
    ///
    /// Panics if the handle corresponds to an invalid or vacant slot.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.free(&x), 0);
    /// ```
    pub fn free(&mut self, handle: &Handle) -> T {
        match self.block(handle) {
            None => panic!("Error: attempting to free invalid block."),
            Some(Block::Vacant(_)) => panic!("Error: attempting to free vacant block."),
            Some(Block::Occupied(_)) => {},
        }

        let next = self.head.replace(*handle);
        let block = mem::replace(
            &mut self.chunks[handle.chunk_index][handle.block_index],
            Block::Vacant(next),
        );
        self.len -= 1;
        match block {
            Block::Occupied(value) => value,
            Block::Vacant(_) => unreachable!(),
        }
    }

    /// Returns an immutable reference to an object in the arena, or `None` if the handle does not
    /// refer to a live object.
    pub fn get(&self, handle: &Handle) -> Option<&T> {
        match self.block(handle) {
            Some(Block::Occupied(ref value)) => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to an object in the arena, or `None` if the handle does not
    /// refer to a live object.
    pub fn get_mut(&mut self, handle: &Handle) -> Option<&mut T> {
        let block = self
            .chunks
            .get_mut(handle.chunk_index)
            .and_then(|chunk| chunk.get_mut(handle.block_index));
        match block {
            Some(Block::Occupied(ref mut value)) => Some(value),
            _ => None,
        }
    }

    /// Returns the number of live objects in the arena.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the arena holds no live objects.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of objects per chunk.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Drops every object in the arena and releases all chunks. Every outstanding handle becomes
    /// invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(2);
    /// let x = arena.allocate(0);
    /// arena.allocate(1);
    /// arena.allocate(2);
    /// arena.clear();
    /// assert!(arena.is_empty());
    /// assert_eq!(arena.get(&x), None);
    /// ```
    pub fn clear(&mut self) {
        self.head = None;
        self.chunks.clear();
        self.len = 0;
        self.capacity = 0;
    }
}

impl<T> Index<Handle> for TypedArena<T> {
    type Output = T;

    fn index(&self, handle: Handle) -> &Self::Output {
        self.get(&handle).expect("Error: handle out of bounds.")
    }
}

impl<T> IndexMut<Handle> for TypedArena<T> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        self.get_mut(&handle).expect("Error: handle out of bounds.")
    }
}

#[cfg(test)]
mod tests {
    use super::{Handle, TypedArena};

    fn handle(chunk_index: usize, block_index: usize) -> Handle {
        Handle {
            chunk_index,
            block_index,
        }
    }

    #[test]
    #[should_panic]
    fn test_new_zero_chunk_size() {
        let _: TypedArena<u32> = TypedArena::new(0);
    }

    #[test]
    #[should_panic]
    fn test_free_invalid_block() {
        let mut arena: TypedArena<u32> = TypedArena::new(1024);
        arena.free(&handle(0, 0));
    }

    #[test]
    #[should_panic]
    fn test_free_vacant_block() {
        let mut arena = TypedArena::new(1024);
        let x = arena.allocate(0);
        arena.free(&x);
        arena.free(&x);
    }

    #[test]
    fn test_allocate_multiple_chunks() {
        let mut arena = TypedArena::new(2);
        assert_eq!(arena.allocate(0), handle(0, 0));
        assert_eq!(arena.allocate(1), handle(0, 1));
        assert_eq!(arena.allocate(2), handle(1, 0));
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn test_free_reuses_slots() {
        let mut arena = TypedArena::new(2);
        let x = arena.allocate(0);
        let y = arena.allocate(1);
        arena.allocate(2);

        assert_eq!(arena.free(&x), 0);
        assert_eq!(arena.free(&y), 1);

        // most recently freed slot comes back first
        assert_eq!(arena.allocate(3), y);
        assert_eq!(arena.allocate(4), x);
        assert_eq!(arena.allocate(5), handle(1, 1));
        assert_eq!(arena.len(), 4);
    }

    #[test]
    fn test_get_vacant_block() {
        let mut arena = TypedArena::new(1024);
        let x = arena.allocate(0);
        arena.free(&x);
        assert_eq!(arena.get(&x), None);
        assert_eq!(arena.get_mut(&x), None);
        assert_eq!(arena.get(&handle(3, 0)), None);
    }

    #[test]
    fn test_index_mut() {
        let mut arena = TypedArena::new(1024);
        let x = arena.allocate(1);
        arena[x] *= 5;
        assert_eq!(arena[x], 5);
    }

    #[test]
    fn test_clear() {
        let mut arena = TypedArena::new(2);
        for i in 0..5 {
            arena.allocate(i);
        }
        arena.clear();
        assert!(arena.is_empty());
        assert_eq!(arena.allocate(7), handle(0, 0));
    }
}
