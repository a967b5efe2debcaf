use super::PrefixMap;
use std::borrow::Borrow;
use std::collections::hash_map::RandomState;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};

/// A prefix map that stores one hash map per key length
///
/// Finding the longest prefix probes each length bucket from the longest that could fit down to
/// the shortest, so it costs `O(longest_key)` hash lookups. The default hasher is std's; the
/// `fnv` feature exports [`FnvHashPrefixMap`][super::FnvHashPrefixMap] which is faster on the
/// short keys LaTeX commands have.
///
/// # Example
/// ```
/// use latex_rpn::prefix_map::HashPrefixMap;
/// use latex_rpn::OPERATOR_ARITIES;
///
/// let arities = HashPrefixMap::from_iter(OPERATOR_ARITIES);
/// ```
#[derive(Debug, Clone)]
pub struct HashPrefixMap<K, V, S = RandomState> {
    by_len: Box<[HashMap<K, V, S>]>,
}

impl<K, V, S> HashPrefixMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    S: BuildHasher + Default,
{
    /// Create from an iterator using a custom hasher
    ///
    /// Later entries replace earlier entries with the same key.
    pub fn from_iter_hasher<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = (K, V)>,
    {
        let mut by_len: Vec<HashMap<K, V, S>> = Vec::new();
        for (key, val) in iter {
            let len = key.borrow().len();
            if by_len.len() <= len {
                by_len.resize_with(len + 1, HashMap::default);
            }
            by_len[len].insert(key, val);
        }
        HashPrefixMap {
            by_len: by_len.into(),
        }
    }

    /// The number of stored keys
    pub fn len(&self) -> usize {
        self.by_len.iter().map(HashMap::len).sum()
    }

    /// Whether no keys are stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, V> FromIterator<(K, V)> for HashPrefixMap<K, V>
where
    K: Borrow<str> + Hash + Eq,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        Self::from_iter_hasher(iter)
    }
}

impl<K, V, S> PrefixMap<V> for HashPrefixMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    S: BuildHasher,
{
    fn get_longest_prefix<P: AsRef<str>>(&self, inp: P) -> Option<(usize, &V)> {
        let inp = inp.as_ref();
        let longest = self.by_len.len().min(inp.len() + 1);
        (0..longest).rev().find_map(|len| {
            if !inp.is_char_boundary(len) {
                return None;
            }
            self.by_len[len].get(&inp[..len]).map(|val| (len, val))
        })
    }
}
