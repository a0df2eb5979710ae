use crate::comparator::Comparator;
use crate::red_black_tree::bidi_map::RedBlackBidiMap;
use crate::red_black_tree::map::RedBlackMap;
use crate::red_black_tree::set::RedBlackSet;
use log::trace;
use serde::de::{Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

impl<K, V, C> Serialize for RedBlackMap<K, V, C>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self)
    }
}

impl<'de, K, V, C> Deserialize<'de> for RedBlackMap<K, V, C>
where
    K: Deserialize<'de>,
    V: Deserialize<'de>,
    C: Comparator<K> + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RedBlackMapVisitor {
            phantom: PhantomData,
        })
    }
}

struct RedBlackMapVisitor<K, V, C> {
    phantom: PhantomData<(K, V, C)>,
}

impl<'de, K, V, C> Visitor<'de> for RedBlackMapVisitor<K, V, C>
where
    K: Deserialize<'de>,
    V: Deserialize<'de>,
    C: Comparator<K> + Default,
{
    type Value = RedBlackMap<K, V, C>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = RedBlackMap::default();
        while let Some((key, value)) = access.next_entry()? {
            map.insert(key, value);
        }
        trace!("rebuilt red black map with {} entries", map.len());
        Ok(map)
    }
}

impl<T, C> Serialize for RedBlackSet<T, C>
where
    T: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self)
    }
}

impl<'de, T, C> Deserialize<'de> for RedBlackSet<T, C>
where
    T: Deserialize<'de>,
    C: Comparator<T> + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(RedBlackSetVisitor {
            phantom: PhantomData,
        })
    }
}

struct RedBlackSetVisitor<T, C> {
    phantom: PhantomData<(T, C)>,
}

impl<'de, T, C> Visitor<'de> for RedBlackSetVisitor<T, C>
where
    T: Deserialize<'de>,
    C: Comparator<T> + Default,
{
    type Value = RedBlackSet<T, C>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut set = RedBlackSet::default();
        while let Some(key) = access.next_element()? {
            set.insert(key);
        }
        trace!("rebuilt red black set with {} keys", set.len());
        Ok(set)
    }
}

impl<K, V, KC, VC> Serialize for RedBlackBidiMap<K, V, KC, VC>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self)
    }
}

impl<'de, K, V, KC, VC> Deserialize<'de> for RedBlackBidiMap<K, V, KC, VC>
where
    K: Clone + Deserialize<'de>,
    V: Clone + Deserialize<'de>,
    KC: Comparator<K> + Default,
    VC: Comparator<V> + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RedBlackBidiMapVisitor {
            phantom: PhantomData,
        })
    }
}

struct RedBlackBidiMapVisitor<K, V, KC, VC> {
    phantom: PhantomData<(K, V, KC, VC)>,
}

impl<'de, K, V, KC, VC> Visitor<'de> for RedBlackBidiMapVisitor<K, V, KC, VC>
where
    K: Clone + Deserialize<'de>,
    V: Clone + Deserialize<'de>,
    KC: Comparator<K> + Default,
    VC: Comparator<V> + Default,
{
    type Value = RedBlackBidiMap<K, V, KC, VC>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = RedBlackBidiMap::default();
        while let Some((key, value)) = access.next_entry()? {
            map.insert(key, value);
        }
        trace!("rebuilt red black bidi map with {} pairs", map.len());
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use crate::red_black_tree::{RedBlackBidiMap, RedBlackMap, RedBlackSet};
    use serde_test::{assert_de_tokens, assert_tokens, Token};

    #[test]
    fn test_map_tokens() {
        let mut map = RedBlackMap::new();
        map.insert(2u32, 'b');
        map.insert(1u32, 'a');

        assert_tokens(
            &map,
            &[
                Token::Map { len: Some(2) },
                Token::U32(1),
                Token::Char('a'),
                Token::U32(2),
                Token::Char('b'),
                Token::MapEnd,
            ],
        );
    }

    #[test]
    fn test_map_empty_tokens() {
        let map: RedBlackMap<u32, u32> = RedBlackMap::new();
        assert_tokens(&map, &[Token::Map { len: Some(0) }, Token::MapEnd]);
    }

    #[test]
    fn test_map_unordered_input() {
        let map: RedBlackMap<u32, u32> = vec![(1, 10), (3, 30)].into_iter().collect();
        assert_de_tokens(
            &map,
            &[
                Token::Map { len: Some(3) },
                Token::U32(3),
                Token::U32(0),
                Token::U32(1),
                Token::U32(10),
                Token::U32(3),
                Token::U32(30),
                Token::MapEnd,
            ],
        );
    }

    #[test]
    fn test_set_tokens() {
        let set: RedBlackSet<i32> = vec![3, -1, 2].into_iter().collect();
        assert_tokens(
            &set,
            &[
                Token::Seq { len: Some(3) },
                Token::I32(-1),
                Token::I32(2),
                Token::I32(3),
                Token::SeqEnd,
            ],
        );
    }

    #[test]
    fn test_bidi_map_tokens() {
        let mut map = RedBlackBidiMap::new();
        map.insert(2u8, 'b');
        map.insert(1u8, 'a');
        assert_tokens(
            &map,
            &[
                Token::Map { len: Some(2) },
                Token::U8(1),
                Token::Char('a'),
                Token::U8(2),
                Token::Char('b'),
                Token::MapEnd,
            ],
        );
    }
}
