//! Compact binary encoding of the collections through `bincode`.
//!
//! # Examples
//!
//! ```
//! use rbtree_collections::codec;
//! use rbtree_collections::red_black_tree::RedBlackMap;
//!
//! let mut map = RedBlackMap::new();
//! map.insert(1u32, "one".to_string());
//! map.insert(2u32, "two".to_string());
//!
//! let bytes = codec::to_bytes(&map).unwrap();
//! let decoded: RedBlackMap<u32, String> = codec::from_bytes(&bytes).unwrap();
//! assert_eq!(decoded, map);
//! ```

use crate::error::Result;
use bincode::{deserialize, serialize};
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Encodes `value` into bytes.
pub fn to_bytes<T>(value: &T) -> Result<Vec<u8>>
where
    T: Serialize + ?Sized,
{
    let bytes = serialize(value)?;
    debug!("encoded {} bytes", bytes.len());
    Ok(bytes)
}

/// Decodes a value from bytes produced by `to_bytes`.
pub fn from_bytes<T>(bytes: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    debug!("decoding {} bytes", bytes.len());
    Ok(deserialize(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::{from_bytes, to_bytes};
    use crate::error::Error;
    use crate::red_black_tree::{RedBlackBidiMap, RedBlackMap, RedBlackSet};

    #[test]
    fn test_map() {
        let map: RedBlackMap<u64, String> = (0..100).map(|key| (key, key.to_string())).collect();
        let bytes = to_bytes(&map).unwrap();
        let decoded: RedBlackMap<u64, String> = from_bytes(&bytes).unwrap();
        assert_eq!(decoded, map);
        assert!(decoded.as_tree().validate().is_ok());
    }

    #[test]
    fn test_set() {
        let set: RedBlackSet<i32> = (-50..50).rev().collect();
        let bytes = to_bytes(&set).unwrap();
        let decoded: RedBlackSet<i32> = from_bytes(&bytes).unwrap();
        assert_eq!(decoded.iter().collect::<Vec<&i32>>(), set.iter().collect::<Vec<&i32>>());
    }

    #[test]
    fn test_bidi_map() {
        let map: RedBlackBidiMap<u32, String> =
            vec![(2, "b".to_string()), (1, "a".to_string())].into_iter().collect();
        let bytes = to_bytes(&map).unwrap();
        let decoded: RedBlackBidiMap<u32, String> = from_bytes(&bytes).unwrap();
        assert_eq!(decoded, map);
        assert_eq!(decoded.get_key("b"), Some(&2));
    }

    #[test]
    fn test_truncated_input() {
        let map: RedBlackMap<u32, u32> = (0..10).map(|key| (key, key)).collect();
        let bytes = to_bytes(&map).unwrap();
        match from_bytes::<RedBlackMap<u32, u32>>(&bytes[..bytes.len() - 1]) {
            Err(Error::SerdeError(_)) => {},
            _ => panic!("expected a serde error"),
        }
    }
}
