use core::borrow::Borrow;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::ops::{Index, RangeBounds};

use crate::error::{Error, Result};
use crate::raw::{RawLlrbMap, Walk};

mod capacity;
mod integrity;
mod order_statistic;

/// An ordered symbol table based on a [left-leaning red-black tree].
///
/// Given a key type with a [total order], the map stores its entries in key
/// order, and answers both lookups and order-statistic queries (`floor`,
/// `ceiling`, `rank`, `select`, ranged counts and ranged enumeration) in
/// logarithmic time.
///
/// It is a logic error for a key to be modified in such a way that the key's ordering relative to
/// any other key, as determined by the [`Ord`] trait, changes while it is in the map. The behavior
/// resulting from such a logic error is not specified, but will be encapsulated to the `LlrbMap`
/// that observed the logic error and not result in undefined behavior.
///
/// # Examples
///
/// ```
/// use llrb_tree::LlrbMap;
///
/// let mut st = LlrbMap::new();
/// for (i, key) in "SEARCH".chars().enumerate() {
///     st.put(key, i);
/// }
///
/// assert_eq!(st.get(&'R'), Some(&3));
/// assert_eq!(st.min(), Ok(&'A'));
/// assert_eq!(st.max(), Ok(&'S'));
/// assert_eq!(st.rank(&'H'), 3);
///
/// let keys: String = st.keys_in('C'..='R').collect();
/// assert_eq!(keys, "CEHR");
///
/// st.delete(&'E');
/// assert!(!st.contains(&'E'));
/// assert_eq!(st.check(), Ok(()));
/// ```
///
/// A map with a known list of items can be initialized from an array:
///
/// ```
/// use llrb_tree::LlrbMap;
///
/// let solar_distance = LlrbMap::from([
///     ("Mercury", 0.4),
///     ("Venus", 0.7),
///     ("Earth", 1.0),
///     ("Mars", 1.5),
/// ]);
/// assert_eq!(solar_distance.floor("N"), Ok(&"Mercury"));
/// ```
///
/// # Background
///
/// A left-leaning red-black tree encodes a 2-3 tree in binary nodes. Each node
/// records the color of the link from its parent: a red link glues the node to
/// its parent to form a 3-node, and red links always lean left. Every path from
/// the root to an absent child crosses the same number of black links, which
/// bounds the height by 2·log<sub>2</sub>(n + 1).
///
/// Each node also caches the size of its subtree, which is what makes `rank`
/// and `select` logarithmic.
///
/// [left-leaning red-black tree]: https://en.wikipedia.org/wiki/Left-leaning_red%E2%80%93black_tree
/// [total order]: https://en.wikipedia.org/wiki/Total_order
pub struct LlrbMap<K, V> {
    raw: RawLlrbMap<K, V>,
}

/// An iterator over the entries of a `LlrbMap`.
///
/// This `struct` is created by the [`iter`] method on [`LlrbMap`]. See its
/// documentation for more.
///
/// # Examples
///
/// ```
/// use llrb_tree::LlrbMap;
///
/// let map = LlrbMap::from([(1, "a"), (2, "b")]);
/// let mut iter = map.iter();
/// assert_eq!(iter.next(), Some((&1, &"a")));
/// assert_eq!(iter.next_back(), Some((&2, &"b")));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: LlrbMap::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V> {
    walk: Walk<'a, K, V>,
}

/// An owning iterator over the entries of a `LlrbMap`, sorted by key.
///
/// This `struct` is created by the [`into_iter`] method on [`LlrbMap`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: IntoIterator::into_iter
pub struct IntoIter<K, V> {
    inner: alloc::vec::IntoIter<(K, V)>,
}

/// An iterator over the keys of a `LlrbMap`, in ascending order.
///
/// This `struct` is created by the [`keys`] and [`keys_in`] methods on
/// [`LlrbMap`].
///
/// [`keys`]: LlrbMap::keys
/// [`keys_in`]: LlrbMap::keys_in
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// An iterator over the values of a `LlrbMap`, in key order.
///
/// This `struct` is created by the [`values`] method on [`LlrbMap`].
///
/// [`values`]: LlrbMap::values
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// An iterator over a sub-range of entries in a `LlrbMap`.
///
/// This `struct` is created by the [`range`] method on [`LlrbMap`].
///
/// [`range`]: LlrbMap::range
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Range<'a, K, V> {
    walk: Walk<'a, K, V>,
}

impl<K, V> LlrbMap<K, V> {
    /// Makes a new, empty `LlrbMap`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let mut map = LlrbMap::new();
    /// map.put(1, "a");
    /// ```
    #[must_use]
    pub const fn new() -> LlrbMap<K, V> {
        LlrbMap { raw: RawLlrbMap::new() }
    }

    /// Clears the map, removing all elements.
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the number of elements in the map.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let mut a = LlrbMap::new();
    /// assert_eq!(a.len(), 0);
    /// a.put(1, "a");
    /// assert_eq!(a.len(), 1);
    /// ```
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the smallest key.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyContainer`] if the map is empty.
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
    /// let mut map = LlrbMap::new();
    /// assert_eq!(map.min(), Err(Error::EmptyContainer { operation: "min" }));
    /// map.put(2, "b");
    /// map.put(1, "a");
    /// assert_eq!(map.min(), Ok(&1));
    /// ```
    pub fn min(&self) -> Result<&K> {
        self.min_entry().map(|(k, _)| k).ok_or(Error::EmptyContainer { operation: "min" })
    }

    /// Returns the largest key.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyContainer`] if the map is empty.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn max(&self) -> Result<&K> {
        self.max_entry().map(|(k, _)| k).ok_or(Error::EmptyContainer { operation: "max" })
    }

    /// Returns the entry with the smallest key, or `None` if the map is empty.
    #[must_use]
    pub fn min_entry(&self) -> Option<(&K, &V)> {
        self.raw.first_key_value()
    }

    /// Returns the entry with the largest key, or `None` if the map is empty.
    #[must_use]
    pub fn max_entry(&self) -> Option<(&K, &V)> {
        self.raw.last_key_value()
    }

    /// Removes and returns the entry with the smallest key.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyContainer`] if the map is empty; the map is left untouched.
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
    /// let mut map = LlrbMap::from([("A", 1), ("B", 2), ("C", 3)]);
    /// assert_eq!(map.delete_min(), Ok(("A", 1)));
    /// assert_eq!(map.delete_min(), Ok(("B", 2)));
    /// assert_eq!(map.len(), 1);
    /// assert_eq!(map.get("C"), Some(&3));
    /// ```
    pub fn delete_min(&mut self) -> Result<(K, V)> {
        self.raw.pop_first().ok_or(Error::EmptyContainer { operation: "delete_min" })
    }

    /// Removes and returns the entry with the largest key.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyContainer`] if the map is empty; the map is left untouched.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn delete_max(&mut self) -> Result<(K, V)> {
        self.raw.pop_last().ok_or(Error::EmptyContainer { operation: "delete_max" })
    }

    /// Gets an iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let map = LlrbMap::from([(3, "c"), (2, "b"), (1, "a")]);
    /// let (first_key, first_value) = map.iter().next().unwrap();
    /// assert_eq!((*first_key, *first_value), (1, "a"));
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter { walk: self.raw.walk() }
    }

    /// Gets an iterator over all keys of the map, in sorted order.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let map = LlrbMap::from([(2, "b"), (1, "a")]);
    /// let keys: Vec<_> = map.keys().copied().collect();
    /// assert_eq!(keys, [1, 2]);
    /// ```
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Gets an iterator over the values of the map, in order by key.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }
}

impl<K: Ord, V> LlrbMap<K, V> {
    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the map's key type, but the ordering
    /// on the borrowed form *must* match the ordering on the key type.
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
    /// let mut map = LlrbMap::new();
    /// map.put(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get_mut(key)
    }

    /// Returns the stored key and its value for the supplied key.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get_key_value(key)
    }

    /// Returns `true` if the map contains a value for the specified key.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.contains_key(key)
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already had this key, the value is replaced and the old
    /// value returned; the stored key is not updated.
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
    /// let mut map = LlrbMap::new();
    /// assert_eq!(map.put(37, "a"), None);
    /// assert_eq!(map.put(37, "b"), Some("a"));
    /// assert_eq!(map[&37], "b");
    /// ```
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        self.raw.insert(key, value)
    }

    /// Stores `value` under `key`, or deletes `key` when `value` is `None`.
    ///
    /// This is a convenience for callers that model deletion as assigning an
    /// absent value. Returns the previous value, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let mut map = LlrbMap::new();
    /// map.put_or_delete("k", Some(1));
    /// assert_eq!(map.put_or_delete("k", None), Some(1));
    /// assert!(map.is_empty());
    /// ```
    pub fn put_or_delete(&mut self, key: K, value: Option<V>) -> Option<V> {
        match value {
            Some(value) => self.put(key, value),
            None => self.delete(&key),
        }
    }

    /// Removes a key from the map, returning its value if it was present.
    ///
    /// Deleting an absent key is a no-op.
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
    /// let mut map = LlrbMap::new();
    /// map.put(1, "a");
    /// assert_eq!(map.delete(&1), Some("a"));
    /// assert_eq!(map.delete(&1), None);
    /// ```
    pub fn delete<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes a key from the map, returning the stored key and value if the
    /// key was present.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove_entry(key)
    }

    /// Returns the largest key less than or equal to `key`.
    ///
    /// # Errors
    ///
    /// [`Error::NoSuchElement`] if every stored key is greater than `key`
    /// (including when the map is empty).
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
    /// let map = LlrbMap::from([(10, ()), (20, ())]);
    /// assert_eq!(map.floor(&15), Ok(&10));
    /// assert_eq!(map.floor(&20), Ok(&20));
    /// assert_eq!(map.floor(&5), Err(Error::NoSuchElement { operation: "floor" }));
    /// ```
    pub fn floor<Q>(&self, key: &Q) -> Result<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.floor(key).map(|(k, _)| k).ok_or(Error::NoSuchElement { operation: "floor" })
    }

    /// Returns the smallest key greater than or equal to `key`.
    ///
    /// # Errors
    ///
    /// [`Error::NoSuchElement`] if every stored key is less than `key`
    /// (including when the map is empty).
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn ceiling<Q>(&self, key: &Q) -> Result<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.ceiling(key).map(|(k, _)| k).ok_or(Error::NoSuchElement { operation: "ceiling" })
    }

    /// Constructs a double-ended iterator over a sub-range of entries in the
    /// map.
    ///
    /// Unlike `BTreeMap::range`, an inverted or empty range yields nothing
    /// rather than panicking.
    ///
    /// # Complexity
    ///
    /// O(log n) to construct, amortized O(1) per element.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    /// use core::ops::Bound::Included;
    ///
    /// let mut map = LlrbMap::new();
    /// map.put(3, "a");
    /// map.put(5, "b");
    /// map.put(8, "c");
    /// for (&key, &value) in map.range((Included(&4), Included(&8))) {
    ///     println!("{key}: {value}");
    /// }
    /// assert_eq!(Some((&5, &"b")), map.range(4..).next());
    /// assert_eq!(map.range(9..1).count(), 0);
    /// ```
    pub fn range<Q, R>(&self, range: R) -> Range<'_, K, V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
        R: RangeBounds<Q>,
    {
        Range {
            walk: self.raw.range(&range),
        }
    }

    /// Gets an iterator over the keys within `range`, in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let map: LlrbMap<char, usize> = "SEARCH".chars().zip(0..).collect();
    /// let keys: String = map.keys_in('C'..='R').collect();
    /// assert_eq!(keys, "CEHR");
    /// ```
    pub fn keys_in<Q, R>(&self, range: R) -> Keys<'_, K, V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
        R: RangeBounds<Q>,
    {
        Keys {
            inner: Iter {
                walk: self.raw.range(&range),
            },
        }
    }
}

impl<K: Clone, V: Clone> Clone for LlrbMap<K, V> {
    fn clone(&self) -> Self {
        LlrbMap { raw: self.raw.clone() }
    }
}

impl<K: Hash, V: Hash> Hash for LlrbMap<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for (k, v) in self {
            k.hash(state);
            v.hash(state);
        }
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for LlrbMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<K: Eq, V: Eq> Eq for LlrbMap<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for LlrbMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Default for LlrbMap<K, V> {
    fn default() -> Self {
        LlrbMap::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for LlrbMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = LlrbMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for LlrbMap<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

impl<'a, K: Ord + Copy, V: Copy> Extend<(&'a K, &'a V)> for LlrbMap<K, V> {
    fn extend<T: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: T) {
        for (&k, &v) in iter {
            self.put(k, v);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a LlrbMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<K, V> IntoIterator for LlrbMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Gets an owning iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let map = LlrbMap::from([(2, "b"), (1, "a")]);
    /// let mut iter = map.into_iter();
    /// assert_eq!(iter.next(), Some((1, "a")));
    /// assert_eq!(iter.next_back(), Some((2, "b")));
    /// ```
    fn into_iter(mut self) -> IntoIter<K, V> {
        IntoIter {
            inner: self.raw.drain_to_vec().into_iter(),
        }
    }
}

impl<K, Q, V> Index<&Q> for LlrbMap<K, V>
where
    K: Borrow<Q> + Ord,
    Q: ?Sized + Ord,
{
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the map.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for LlrbMap<K, V> {
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.walk.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.walk.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.walk.next_back()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.walk.remaining()
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter { walk: self.walk.clone() }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for IntoIter<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter").field("len", &self.inner.len()).finish()
    }
}

impl<K, V> Default for IntoIter<K, V> {
    /// Creates an empty `llrb_map::IntoIter`.
    ///
    /// ```
    /// # use llrb_tree::llrb_map;
    /// let iter: llrb_map::IntoIter<u8, u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        IntoIter {
            inner: alloc::vec::Vec::new().into_iter(),
        }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V> fmt::Debug for Keys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keys").field("remaining", &self.inner.len()).finish()
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V: fmt::Debug> fmt::Debug for Values<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Values").field("remaining", &self.inner.len()).finish()
    }
}

impl<'a, K, V> Iterator for Range<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.walk.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.walk.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Range<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.walk.next_back()
    }
}

impl<K, V> ExactSizeIterator for Range<'_, K, V> {
    fn len(&self) -> usize {
        self.walk.remaining()
    }
}

impl<K, V> FusedIterator for Range<'_, K, V> {}

impl<K, V> Clone for Range<'_, K, V> {
    fn clone(&self) -> Self {
        Range { walk: self.walk.clone() }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Range<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::vec::Vec;

    #[test]
    fn errors_leave_the_map_untouched() {
        let mut map: LlrbMap<i32, i32> = LlrbMap::new();
        assert_eq!(map.delete_min(), Err(Error::EmptyContainer { operation: "delete_min" }));
        assert_eq!(map.delete_max(), Err(Error::EmptyContainer { operation: "delete_max" }));
        assert_eq!(map.max(), Err(Error::EmptyContainer { operation: "max" }));
        assert_eq!(map.ceiling(&1), Err(Error::NoSuchElement { operation: "ceiling" }));
        assert_eq!(map.delete(&1), None);
        assert!(map.is_empty());
        assert_eq!(map.check(), Ok(()));
    }

    #[test]
    fn min_and_max_resolve_to_key_queries() {
        let map: LlrbMap<i64, i64> = [(5, -5), (-3, 3), (9, -9)].into_iter().collect();
        assert_eq!(map.min(), Ok(&-3));
        assert_eq!(map.max(), Ok(&9));
        assert_eq!(map.min_entry(), Some((&-3, &3)));
        assert_eq!(map.max_entry(), Some((&9, &-9)));
    }

    #[test]
    fn owned_iteration_is_sorted() {
        let map: LlrbMap<_, _> = [5, 1, 4, 2, 3].into_iter().map(|k| (k, k * 10)).collect();
        let entries: Vec<_> = map.into_iter().collect();
        assert_eq!(entries, [(1, 10), (2, 20), (3, 30), (4, 40), (5, 50)]);
    }

    #[test]
    fn debug_formats_as_map() {
        let map = LlrbMap::from([(2, 'b'), (1, 'a')]);
        assert_eq!(format!("{map:?}"), "{1: 'a', 2: 'b'}");
        assert_eq!(format!("{:?}", map.range(2..)), "[(2, 'b')]");
    }

    #[test]
    fn equality_ignores_tree_shape() {
        let ascending: LlrbMap<i32, ()> = (0..32).map(|k| (k, ())).collect();
        let descending: LlrbMap<i32, ()> = (0..32).rev().map(|k| (k, ())).collect();
        assert_eq!(ascending, descending);
        assert_eq!(ascending.clone(), ascending);
    }

    #[test]
    fn borrowed_keys_look_up_owned_strings() {
        let mut map: LlrbMap<alloc::string::String, usize> = LlrbMap::new();
        map.put("beta".into(), 2);
        map.put("alpha".into(), 1);
        assert_eq!(map.get("alpha"), Some(&1));
        assert_eq!(map.rank("beta"), 1);
        assert_eq!(map.floor("b").map(alloc::string::String::as_str), Ok("alpha"));
        assert_eq!(map.delete("beta"), Some(2));
    }

    #[test]
    fn extend_from_borrowed_pairs() {
        let source = LlrbMap::from([(1, 1), (2, 4)]);
        let mut map = LlrbMap::from([(3, 9)]);
        map.extend(&source);
        assert_eq!(map.values().copied().collect::<Vec<_>>(), [1, 4, 9]);
    }
}
