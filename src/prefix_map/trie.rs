use super::PrefixMap;
use qp_trie::Trie;
use std::borrow::Borrow;

/// Trie keys must borrow as bytes, so string keys are wrapped
#[derive(Debug, PartialEq, Eq, Clone)]
struct ByteKey<K>(K);

impl<K> Borrow<[u8]> for ByteKey<K>
where
    K: Borrow<str>,
{
    fn borrow(&self) -> &[u8] {
        self.0.borrow().as_bytes()
    }
}

/// A prefix map backed by a qp-trie
///
/// This is the default command map (feature `qp-trie`, on by default). The walk narrows the trie
/// one byte at a time and stops as soon as no key continues the input, so a lookup takes
/// `O(longest_prefix)`.
///
/// # Example
/// ```
/// use latex_rpn::prefix_map::QpTriePrefixMap;
/// use latex_rpn::LATEX_COMMANDS;
///
/// let commands = QpTriePrefixMap::from_iter(LATEX_COMMANDS);
/// ```
#[derive(Debug, Clone)]
pub struct QpTriePrefixMap<K: Clone, V>(Trie<ByteKey<K>, V>);

impl<K, V> FromIterator<(K, V)> for QpTriePrefixMap<K, V>
where
    K: Borrow<str> + Clone,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        QpTriePrefixMap(
            iter.into_iter()
                .map(|(key, val)| (ByteKey(key), val))
                .collect(),
        )
    }
}

impl<K, V> PrefixMap<V> for QpTriePrefixMap<K, V>
where
    K: Borrow<str> + Clone,
{
    fn get_longest_prefix<P: AsRef<str>>(&self, inp: P) -> Option<(usize, &V)> {
        let inp = inp.as_ref();
        let bytes = inp.as_bytes();
        let empty: &[u8] = &[];
        let mut best = self.0.get(empty).map(|val| (0, val));
        let mut subtrie = self.0.subtrie(empty);
        for end in 1..=bytes.len() {
            let prefix = &bytes[..end];
            subtrie = subtrie.subtrie(prefix);
            if subtrie.is_empty() {
                break;
            }
            // keys are str so a hit always lands on a char boundary
            if let Some(val) = subtrie.get(prefix) {
                best = Some((end, val));
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::{PrefixMap, QpTriePrefixMap};

    #[test]
    fn longest_command_wins() {
        let map = QpTriePrefixMap::from_iter([(r"\sin", 0), (r"\sinh", 1), (r"\s", 2)]);
        assert_eq!(map.get_longest_prefix(r"\sinhx"), Some((5, &1)));
        assert_eq!(map.get_longest_prefix(r"\sinx"), Some((4, &0)));
        assert_eq!(map.get_longest_prefix(r"\sqrt"), Some((2, &2)));
        assert_eq!(map.get_longest_prefix(r"\foo"), None);
        assert_eq!(map.get_longest_prefix("λ"), None);
    }

    #[test]
    fn exact_lookup() {
        let map = QpTriePrefixMap::from_iter([("^", "expt"), ("+", "+")]);
        assert_eq!(map.get("^"), Some(&"expt"));
        assert_eq!(map.get("^2"), None);
        assert_eq!(map.get("-"), None);
    }
}
