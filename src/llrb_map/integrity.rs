use alloc::vec::Vec;

use super::LlrbMap;
use crate::error::Violation;

impl<K: Ord, V> LlrbMap<K, V> {
    /// Verifies the tree's structural invariants.
    ///
    /// The map is checked for symmetric key order, consistent subtree sizes,
    /// `rank`/`select` agreement, 2-3 shape (no red right links, no two reds
    /// in a row, black root) and perfect black balance. Every failing check
    /// is logged at `warn` level.
    ///
    /// This never fails for a map built only through its public API; it is
    /// meant for tests and debugging.
    ///
    /// # Errors
    ///
    /// The first [`Violation`] found, in the order listed above.
    ///
    /// # Complexity
    ///
    /// O(n log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let map: LlrbMap<u32, ()> = (0..100).map(|k| (k, ())).collect();
    /// assert_eq!(map.check(), Ok(()));
    /// ```
    pub fn check(&self) -> Result<(), Violation> {
        self.raw.check()
    }
}

impl<K, V> LlrbMap<K, V> {
    /// Returns the number of links on the longest path from the root to a
    /// node, or `None` for an empty map. A single entry has height 0.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let mut map = LlrbMap::new();
    /// assert_eq!(map.height(), None);
    /// map.put(1, ());
    /// assert_eq!(map.height(), Some(0));
    /// ```
    #[must_use]
    pub fn height(&self) -> Option<usize> {
        self.raw.height()
    }

    /// Returns the keys in breadth-first order, starting at the root.
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn level_order(&self) -> Vec<&K> {
        self.raw.level_order()
    }
}
