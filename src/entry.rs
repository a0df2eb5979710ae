/// A key-value pair stored in a tree node.
///
/// Keys are ordered by the owning tree's comparator, not by `Ord`.
#[derive(Debug)]
pub struct Entry<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> Entry<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Entry { key, value }
    }

    pub fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}
