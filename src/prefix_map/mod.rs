//! String keyed maps that can find the longest key prefixing an input
//!
//! The lexer uses these to resolve control sequences. A run like `\sinx` has no entry of its own,
//! but its longest known prefix `\sin` does, so the remaining `x` is left for the variable pass.
//! Exact lookups (infix symbols, operator arities) go through [`PrefixMap::get`].
//!
//! Two implementations are provided. [QpTriePrefixMap] walks a trie one byte at a time and is the
//! default when the `qp-trie` feature is on. [HashPrefixMap] buckets keys by length and probes
//! from the longest bucket down; with the `fnv` feature an fnv hashed alias is also exported.
//!
//! # Example
//!
//! ```
//! use latex_rpn::prefix_map::{HashPrefixMap, PrefixMap};
//! use latex_rpn::{Command, LATEX_COMMANDS};
//!
//! let commands = HashPrefixMap::from_iter(LATEX_COMMANDS);
//! assert_eq!(commands.get_longest_prefix(r"\sinx"), Some((4, &Command::Function("sin"))));
//! ```

mod hash;
#[cfg(feature = "qp-trie")]
mod trie;

#[cfg(feature = "fnv")]
use ::fnv::FnvBuildHasher;
pub use hash::HashPrefixMap;
#[cfg(feature = "qp-trie")]
pub use trie::QpTriePrefixMap;

/// A hash prefix map using the fnv hasher
///
/// # Example
/// ```
/// use latex_rpn::prefix_map::FnvHashPrefixMap;
/// use latex_rpn::LATEX_COMMANDS;
///
/// let commands = FnvHashPrefixMap::from_iter_hasher(LATEX_COMMANDS);
/// ```
#[cfg(feature = "fnv")]
pub type FnvHashPrefixMap<K, V> = HashPrefixMap<K, V, FnvBuildHasher>;

/// A map that supports lookups on the prefix of an input
pub trait PrefixMap<V> {
    /// Get the length and value of the longest key that prefixes `inp`
    ///
    /// # Example
    /// ```
    /// use latex_rpn::prefix_map::{HashPrefixMap, PrefixMap};
    ///
    /// let map = HashPrefixMap::from_iter([(r"\sin", 1), (r"\sinh", 2)]);
    /// assert_eq!(map.get_longest_prefix(r"\sinx"), Some((4, &1)));
    /// assert_eq!(map.get_longest_prefix(r"\sinhx"), Some((5, &2)));
    /// ```
    fn get_longest_prefix<P: AsRef<str>>(&self, inp: P) -> Option<(usize, &V)>;

    /// Get the value stored under exactly `key`
    fn get<P: AsRef<str>>(&self, key: P) -> Option<&V> {
        let key = key.as_ref();
        match self.get_longest_prefix(key) {
            Some((len, val)) if len == key.len() => Some(val),
            _ => None,
        }
    }
}
