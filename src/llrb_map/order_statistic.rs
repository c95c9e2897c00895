use core::borrow::Borrow;
use core::ops::{Index, IndexMut, RangeBounds};

use super::LlrbMap;
use crate::Rank;
use crate::error::{Error, Result};

impl<K, V> LlrbMap<K, V> {
    /// Returns the key of rank `rank`: the key with exactly `rank` smaller
    /// keys in the map.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `rank >= self.len()`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::{Error, LlrbMap};
    ///
    /// let map = LlrbMap::from([("c", 3), ("a", 1), ("b", 2)]);
    /// assert_eq!(map.select(0), Ok(&"a"));
    /// assert_eq!(map.select(2), Ok(&"c"));
    /// assert_eq!(map.select(3), Err(Error::InvalidArgument { rank: 3, len: 3 }));
    /// ```
    pub fn select(&self, rank: usize) -> Result<&K> {
        self.raw
            .get_by_rank(rank)
            .map(|(k, _)| k)
            .ok_or(Error::InvalidArgument { rank, len: self.len() })
    }

    /// Returns the entry at position `rank` in sorted order, or `None` if
    /// `rank` is out of bounds.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let map = LlrbMap::from([("a", 10), ("c", 30), ("b", 20)]);
    /// assert_eq!(map.get_by_rank(1), Some((&"b", &20)));
    /// assert!(map.get_by_rank(3).is_none());
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<(&K, &V)> {
        self.raw.get_by_rank(rank)
    }

    /// Returns the key and a mutable reference to the value at position
    /// `rank` in sorted order.
    ///
    /// The key is returned as a shared reference because mutating it would
    /// break the map's ordering.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn get_by_rank_mut(&mut self, rank: usize) -> Option<(&K, &mut V)> {
        self.raw.get_by_rank_mut(rank)
    }
}

impl<K: Ord, V> LlrbMap<K, V> {
    /// Returns the number of keys strictly less than `key`.
    ///
    /// `key` need not be present; for a present key this is its zero-based
    /// position in sorted order.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let map = LlrbMap::from([(10, "a"), (20, "b"), (30, "c")]);
    /// assert_eq!(map.rank(&20), 1);
    /// assert_eq!(map.rank(&25), 2);
    /// assert_eq!(map.rank(&5), 0);
    /// ```
    pub fn rank<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.rank(key)
    }

    /// Returns the number of keys within `range`.
    ///
    /// An inverted range counts zero.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let map: LlrbMap<u32, ()> = (0..10).map(|k| (k * 10, ())).collect();
    /// assert_eq!(map.range_count(15..=40), 3);
    /// assert_eq!(map.range_count(40..15), 0);
    /// ```
    pub fn range_count<Q, R>(&self, range: R) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
        R: RangeBounds<Q>,
    {
        self.raw.range_count(&range)
    }
}

/// Indexes into the map by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use llrb_tree::{LlrbMap, Rank};
///
/// let map = LlrbMap::from([("a", 1), ("b", 2)]);
/// assert_eq!(map[Rank(0)], 1);
/// ```
impl<K, V> Index<Rank> for LlrbMap<K, V> {
    type Output = V;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.get_by_rank(rank.0).map(|(_, v)| v).expect("index out of bounds")
    }
}

/// Mutably indexes into the map by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use llrb_tree::{LlrbMap, Rank};
///
/// let mut map = LlrbMap::from([("a", 1), ("b", 2)]);
/// map[Rank(1)] = 5;
/// assert_eq!(map.get(&"b"), Some(&5));
/// ```
impl<K, V> IndexMut<Rank> for LlrbMap<K, V> {
    fn index_mut(&mut self, rank: Rank) -> &mut Self::Output {
        self.get_by_rank_mut(rank.0).map(|(_, v)| v).expect("index out of bounds")
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn select_inverts_rank_for_present_keys() {
        let map: LlrbMap<i64, ()> = [9, -3, 14, 0, 7].into_iter().map(|k| (k, ())).collect();
        for i in 0..map.len() {
            let key = *map.select(i).unwrap();
            assert_eq!(map.rank(&key), i);
        }
    }

    #[test]
    fn select_on_empty_map_reports_zero_len() {
        let map: LlrbMap<u8, u8> = LlrbMap::new();
        assert_eq!(map.select(0), Err(Error::InvalidArgument { rank: 0, len: 0 }));
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn index_past_end_panics() {
        let map = LlrbMap::from([(1, 1)]);
        let value: i32 = map[Rank(1)];
        assert_eq!(value, 1);
    }
}
