//! Set comparison of two ordered maps by key.

use indexmap::IndexMap;
use std::hash::Hash;

/// Keys present on only one side, and keys present on both.
///
/// `increased` follows the right map's order; `missing` and `shared_keys`
/// follow the left map's order.
#[derive(Debug)]
pub struct KeySetDiff<'a, K, V> {
    pub increased: IndexMap<&'a K, &'a V>,
    pub missing: IndexMap<&'a K, &'a V>,
    pub shared_keys: Vec<&'a K>,
}

impl<K, V> KeySetDiff<'_, K, V> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.increased.is_empty() && self.missing.is_empty()
    }
}

/// Partition the keys of two maps. An absent map behaves as an empty one.
#[must_use]
pub fn diff_keys<'a, K, V>(
    left: Option<&'a IndexMap<K, V>>,
    right: Option<&'a IndexMap<K, V>>,
) -> KeySetDiff<'a, K, V>
where
    K: Hash + Eq,
{
    let mut increased = IndexMap::new();
    let mut missing = IndexMap::new();
    let mut shared_keys = Vec::new();

    if let Some(right) = right {
        for (key, value) in right {
            if !left.is_some_and(|l| l.contains_key(key)) {
                increased.insert(key, value);
            }
        }
    }

    if let Some(left) = left {
        for (key, value) in left {
            if right.is_some_and(|r| r.contains_key(key)) {
                shared_keys.push(key);
            } else {
                missing.insert(key, value);
            }
        }
    }

    KeySetDiff {
        increased,
        missing,
        shared_keys,
    }
}
