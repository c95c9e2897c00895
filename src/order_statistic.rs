/// A zero-based position in the sorted order of a map.
///
/// Indexing a [`LlrbMap`](crate::LlrbMap) by `Rank` reaches the value whose
/// key has exactly that many smaller keys.
///
/// # Examples
///
/// ```
/// use llrb_tree::{LlrbMap, Rank};
///
/// let mut map = LlrbMap::new();
/// map.put("a", 10);
/// map.put("b", 20);
///
/// assert_eq!(map[Rank(0)], 10);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
