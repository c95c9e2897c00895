use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::cmp::Ordering;
use core::mem;
use core::ops::{Bound, RangeBounds};

use log::trace;

use super::arena::Arena;
use super::handle::{Handle, Link};
use super::node::{Color, Node};
use super::walk::Walk;

/// The left-leaning red-black tree backing `LlrbMap`.
///
/// Every mutating step follows the same shape: take a subtree root, adjust
/// it, and hand back the (possibly different) root of the rebuilt subtree.
/// The caller writes that handle back into the parent's link.
#[derive(Clone)]
pub(crate) struct RawLlrbMap<K, V> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<K, V>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Link,
}

/// A subtree rebuilt by a deleting descent, and the entry it gave up.
type Detached<K, V> = (Link, (K, V));

impl<K, V> RawLlrbMap<K, V> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) fn len(&self) -> usize {
        self.subtree_size(self.root)
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn clear(&mut self) {
        trace!("clearing {} nodes", self.nodes.len());
        self.nodes.clear();
        self.root = None;
    }

    pub(crate) const fn root(&self) -> Link {
        self.root
    }

    pub(crate) fn node(&self, handle: Handle) -> &Node<K, V> {
        &self.nodes[handle]
    }

    #[cfg(test)]
    pub(crate) fn node_mut(&mut self, handle: Handle) -> &mut Node<K, V> {
        &mut self.nodes[handle]
    }

    fn entry(&self, handle: Handle) -> (&K, &V) {
        let node = &self.nodes[handle];
        (&node.key, &node.value)
    }

    fn entry_mut(&mut self, handle: Handle) -> (&K, &mut V) {
        let node = &mut self.nodes[handle];
        (&node.key, &mut node.value)
    }

    // ─── Link and color primitives ──────────────────────────────────────────

    /// Absent links are black.
    #[inline]
    pub(crate) fn is_red(&self, link: Link) -> bool {
        link.is_some_and(|h| self.nodes[h].color.is_red())
    }

    #[inline]
    pub(crate) fn subtree_size(&self, link: Link) -> usize {
        link.map_or(0, |h| self.nodes[h].size)
    }

    #[inline]
    fn left_of(&self, link: Link) -> Link {
        link.and_then(|h| self.nodes[h].left)
    }

    fn update_size(&mut self, h: Handle) {
        let size = 1 + self.subtree_size(self.nodes[h].left) + self.subtree_size(self.nodes[h].right);
        self.nodes[h].size = size;
    }

    /// Makes a right-leaning red link lean left.
    fn rotate_left(&mut self, h: Handle) -> Handle {
        let x = self.nodes[h].right.expect("`rotate_left()` - right link is absent!");
        debug_assert!(self.nodes[x].color.is_red(), "`rotate_left()` - right link is black");
        self.nodes[h].right = self.nodes[x].left;
        self.nodes[x].left = Some(h);
        self.nodes[x].color = self.nodes[h].color;
        self.nodes[h].color = Color::Red;
        self.nodes[x].size = self.nodes[h].size;
        self.update_size(h);
        x
    }

    /// Makes a left-leaning red link lean right.
    fn rotate_right(&mut self, h: Handle) -> Handle {
        let x = self.nodes[h].left.expect("`rotate_right()` - left link is absent!");
        debug_assert!(self.nodes[x].color.is_red(), "`rotate_right()` - left link is black");
        self.nodes[h].left = self.nodes[x].right;
        self.nodes[x].right = Some(h);
        self.nodes[x].color = self.nodes[h].color;
        self.nodes[h].color = Color::Red;
        self.nodes[x].size = self.nodes[h].size;
        self.update_size(h);
        x
    }

    /// `h` must have the opposite color of both its children.
    fn flip_colors(&mut self, h: Handle) {
        let children = [self.nodes[h].left, self.nodes[h].right];
        self.nodes[h].color.flip();
        for child in children.into_iter().flatten() {
            self.nodes[child].color.flip();
        }
    }

    /// Assuming `h` is red and both `h.left` and `h.left.left` are black,
    /// makes `h.left` or one of its children red.
    fn move_red_left(&mut self, mut h: Handle) -> Handle {
        self.flip_colors(h);
        if let Some(right) = self.nodes[h].right
            && self.is_red(self.nodes[right].left)
        {
            self.nodes[h].right = Some(self.rotate_right(right));
            h = self.rotate_left(h);
            self.flip_colors(h);
        }
        h
    }

    /// Assuming `h` is red and both `h.right` and `h.right.left` are black,
    /// makes `h.right` or one of its children red.
    fn move_red_right(&mut self, mut h: Handle) -> Handle {
        self.flip_colors(h);
        if self.is_red(self.left_of(self.nodes[h].left)) {
            h = self.rotate_right(h);
            self.flip_colors(h);
        }
        h
    }

    /// Restores the local invariants after a deletion below `h`.
    fn balance(&mut self, mut h: Handle) -> Handle {
        if self.is_red(self.nodes[h].right) {
            h = self.rotate_left(h);
        }
        if self.is_red(self.nodes[h].left) && self.is_red(self.left_of(self.nodes[h].left)) {
            h = self.rotate_right(h);
        }
        if self.is_red(self.nodes[h].left) && self.is_red(self.nodes[h].right) {
            self.flip_colors(h);
        }
        self.update_size(h);
        h
    }

    /// Restores the local invariants after an insertion below `h`.
    fn fix_up(&mut self, mut h: Handle) -> Handle {
        if self.is_red(self.nodes[h].right) && !self.is_red(self.nodes[h].left) {
            h = self.rotate_left(h);
        }
        if self.is_red(self.nodes[h].left) && self.is_red(self.left_of(self.nodes[h].left)) {
            h = self.rotate_right(h);
        }
        if self.is_red(self.nodes[h].left) && self.is_red(self.nodes[h].right) {
            self.flip_colors(h);
        }
        self.update_size(h);
        h
    }

    fn set_root(&mut self, root: Link) {
        if let Some(h) = root {
            self.nodes[h].color = Color::Black;
        }
        self.root = root;
    }

    /// Gives a deleting descent a red link to borrow from at the top.
    fn redden_root(&mut self, root: Handle) {
        if !self.is_red(self.nodes[root].left) && !self.is_red(self.nodes[root].right) {
            trace!("root has two black children; coloring it red before descending");
            self.nodes[root].color = Color::Red;
        }
    }

    // ─── Extremes and deletion of extremes ──────────────────────────────────

    fn min_at(&self, mut h: Handle) -> Handle {
        while let Some(left) = self.nodes[h].left {
            h = left;
        }
        h
    }

    fn max_at(&self, mut h: Handle) -> Handle {
        while let Some(right) = self.nodes[h].right {
            h = right;
        }
        h
    }

    pub(crate) fn first_key_value(&self) -> Option<(&K, &V)> {
        Some(self.entry(self.min_at(self.root?)))
    }

    pub(crate) fn last_key_value(&self) -> Option<(&K, &V)> {
        Some(self.entry(self.max_at(self.root?)))
    }

    /// Removes the smallest entry.
    pub(crate) fn pop_first(&mut self) -> Option<(K, V)> {
        let root = self.root?;
        self.redden_root(root);
        let (root, entry) = self.delete_min_at(root);
        self.set_root(root);
        Some(entry)
    }

    /// Removes the largest entry.
    pub(crate) fn pop_last(&mut self) -> Option<(K, V)> {
        let root = self.root?;
        self.redden_root(root);
        let (root, entry) = self.delete_max_at(root);
        self.set_root(root);
        Some(entry)
    }

    fn delete_min_at(&mut self, mut h: Handle) -> Detached<K, V> {
        let Some(left) = self.nodes[h].left else {
            debug_assert!(self.nodes[h].right.is_none(), "minimum node has a right child");
            return (None, self.nodes.remove(h).into_entry());
        };

        if !self.is_red(Some(left)) && !self.is_red(self.nodes[left].left) {
            h = self.move_red_left(h);
        }

        let left = self.nodes[h].left.expect("`delete_min_at()` - left link lost while borrowing!");
        let (left, entry) = self.delete_min_at(left);
        self.nodes[h].left = left;
        (Some(self.balance(h)), entry)
    }

    fn delete_max_at(&mut self, mut h: Handle) -> Detached<K, V> {
        if self.is_red(self.nodes[h].left) {
            h = self.rotate_right(h);
        }

        let Some(right) = self.nodes[h].right else {
            debug_assert!(self.nodes[h].left.is_none(), "maximum node has a left child");
            return (None, self.nodes.remove(h).into_entry());
        };

        if !self.is_red(Some(right)) && !self.is_red(self.nodes[right].left) {
            h = self.move_red_right(h);
        }

        let right = self.nodes[h].right.expect("`delete_max_at()` - right link lost while borrowing!");
        let (right, entry) = self.delete_max_at(right);
        self.nodes[h].right = right;
        (Some(self.balance(h)), entry)
    }

    /// Drains all entries in ascending order without rebalancing.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<(K, V)> {
        let mut entries = Vec::with_capacity(self.len());
        let mut pending: Vec<Handle> = Vec::new();
        let mut link = self.root.take();

        loop {
            while let Some(h) = link {
                pending.push(h);
                link = self.nodes[h].left;
            }
            let Some(h) = pending.pop() else {
                break;
            };
            let node = self.nodes.remove(h);
            link = node.right;
            entries.push(node.into_entry());
        }

        self.nodes.clear();
        entries
    }

    // ─── Diagnostics ────────────────────────────────────────────────────────

    /// Height of the tree; a single node has height 0.
    pub(crate) fn height(&self) -> Option<usize> {
        self.root.map(|h| self.height_at(h))
    }

    fn height_at(&self, h: Handle) -> usize {
        let node = &self.nodes[h];
        [node.left, node.right]
            .into_iter()
            .flatten()
            .map(|child| 1 + self.height_at(child))
            .max()
            .unwrap_or(0)
    }

    /// Keys in breadth-first order, root first.
    pub(crate) fn level_order(&self) -> Vec<&K> {
        let mut keys = Vec::with_capacity(self.len());
        let mut queue: VecDeque<Handle> = self.root.into_iter().collect();
        while let Some(h) = queue.pop_front() {
            let node = &self.nodes[h];
            keys.push(&node.key);
            queue.extend([node.left, node.right].into_iter().flatten());
        }
        keys
    }

    /// In-order walk over every entry.
    pub(crate) fn walk(&self) -> Walk<'_, K, V> {
        Walk::new(&self.nodes, self.root, self.len(), |_| true, |_| true)
    }

    // ─── Rank navigation ────────────────────────────────────────────────────

    pub(crate) fn select_handle(&self, mut rank: usize) -> Link {
        if rank >= self.len() {
            return None;
        }

        let mut link = self.root;
        while let Some(h) = link {
            let node = &self.nodes[h];
            let left_size = self.subtree_size(node.left);
            match rank.cmp(&left_size) {
                Ordering::Less => link = node.left,
                Ordering::Greater => {
                    rank -= left_size + 1;
                    link = node.right;
                }
                Ordering::Equal => return Some(h),
            }
        }
        None
    }

    pub(crate) fn get_by_rank(&self, rank: usize) -> Option<(&K, &V)> {
        self.select_handle(rank).map(|h| self.entry(h))
    }

    pub(crate) fn get_by_rank_mut(&mut self, rank: usize) -> Option<(&K, &mut V)> {
        let h = self.select_handle(rank)?;
        Some(self.entry_mut(h))
    }
}

impl<K: Ord, V> RawLlrbMap<K, V> {
    // ─── Search ─────────────────────────────────────────────────────────────

    fn search<Q>(&self, key: &Q) -> Link
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut link = self.root;
        while let Some(h) = link {
            let node = &self.nodes[h];
            link = match key.cmp(node.key.borrow()) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(h),
            };
        }
        None
    }

    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(key).map(|h| &self.nodes[h].value)
    }

    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let h = self.search(key)?;
        Some(&mut self.nodes[h].value)
    }

    pub(crate) fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(key).map(|h| self.entry(h))
    }

    pub(crate) fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(key).is_some()
    }

    // ─── Insertion ──────────────────────────────────────────────────────────

    /// Inserts a key-value pair, returning the previous value for the key.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<V> {
        let root = self.root;
        let (root, old_value) = self.insert_at(root, key, value);
        self.set_root(Some(root));
        old_value
    }

    fn insert_at(&mut self, link: Link, key: K, value: V) -> (Handle, Option<V>) {
        let Some(h) = link else {
            return (self.nodes.insert(Node::leaf(key, value)), None);
        };

        let old_value = match key.cmp(&self.nodes[h].key) {
            Ordering::Less => {
                let left = self.nodes[h].left;
                let (left, old_value) = self.insert_at(left, key, value);
                self.nodes[h].left = Some(left);
                old_value
            }
            Ordering::Greater => {
                let right = self.nodes[h].right;
                let (right, old_value) = self.insert_at(right, key, value);
                self.nodes[h].right = Some(right);
                old_value
            }
            Ordering::Equal => Some(mem::replace(&mut self.nodes[h].value, value)),
        };

        (self.fix_up(h), old_value)
    }

    // ─── Deletion by key ────────────────────────────────────────────────────

    /// Removes `key`, returning its entry. Absent keys leave the tree untouched.
    pub(crate) fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        // The borrow machinery recolors on the way down, so it must only run
        // when the descent is known to end at `key`.
        if !self.contains_key(key) {
            return None;
        }

        let root = self.root?;
        self.redden_root(root);
        let (root, entry) = self.delete_at(root, key);
        self.set_root(root);
        Some(entry)
    }

    fn delete_at<Q>(&mut self, mut h: Handle, key: &Q) -> Detached<K, V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        if key.cmp(self.nodes[h].key.borrow()).is_lt() {
            let left = self.nodes[h].left;
            if !self.is_red(left) && !self.is_red(self.left_of(left)) {
                h = self.move_red_left(h);
            }
            let left = self.nodes[h].left.expect("`delete_at()` - key is present but left link is absent!");
            let (left, entry) = self.delete_at(left, key);
            self.nodes[h].left = left;
            return (Some(self.balance(h)), entry);
        }

        if self.is_red(self.nodes[h].left) {
            h = self.rotate_right(h);
        }
        if key.cmp(self.nodes[h].key.borrow()).is_eq() && self.nodes[h].right.is_none() {
            return (None, self.nodes.remove(h).into_entry());
        }

        let right = self.nodes[h].right;
        if !self.is_red(right) && !self.is_red(self.left_of(right)) {
            h = self.move_red_right(h);
        }

        let right = self.nodes[h].right.expect("`delete_at()` - key is present but right link is absent!");
        let entry = if key.cmp(self.nodes[h].key.borrow()).is_eq() {
            trace!("replacing a deleted interior node with its successor");
            let (right, (successor_key, successor_value)) = self.delete_min_at(right);
            self.nodes[h].right = right;
            let node = &mut self.nodes[h];
            (mem::replace(&mut node.key, successor_key), mem::replace(&mut node.value, successor_value))
        } else {
            let (right, entry) = self.delete_at(right, key);
            self.nodes[h].right = right;
            entry
        };

        (Some(self.balance(h)), entry)
    }

    // ─── Ordered queries ────────────────────────────────────────────────────

    /// The largest entry whose key is `<= key`.
    pub(crate) fn floor<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut best = None;
        let mut link = self.root;
        while let Some(h) = link {
            let node = &self.nodes[h];
            link = match key.cmp(node.key.borrow()) {
                Ordering::Less => node.left,
                Ordering::Greater => {
                    best = Some(h);
                    node.right
                }
                Ordering::Equal => return Some(self.entry(h)),
            };
        }
        best.map(|h| self.entry(h))
    }

    /// The smallest entry whose key is `>= key`.
    pub(crate) fn ceiling<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut best = None;
        let mut link = self.root;
        while let Some(h) = link {
            let node = &self.nodes[h];
            link = match key.cmp(node.key.borrow()) {
                Ordering::Less => {
                    best = Some(h);
                    node.left
                }
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(self.entry(h)),
            };
        }
        best.map(|h| self.entry(h))
    }

    /// Number of keys ordered before `key`; `key` itself is counted when
    /// `inclusive` and present.
    fn count_before<Q>(&self, key: &Q, inclusive: bool) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut count = 0;
        let mut link = self.root;
        while let Some(h) = link {
            let node = &self.nodes[h];
            match key.cmp(node.key.borrow()) {
                Ordering::Less => link = node.left,
                Ordering::Greater => {
                    count += 1 + self.subtree_size(node.left);
                    link = node.right;
                }
                Ordering::Equal => return count + self.subtree_size(node.left) + usize::from(inclusive),
            }
        }
        count
    }

    /// Number of keys strictly less than `key`.
    pub(crate) fn rank<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.count_before(key, false)
    }

    /// Number of keys within `range`, derived from ranks alone.
    pub(crate) fn range_count<Q, R>(&self, range: &R) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
        R: RangeBounds<Q>,
    {
        let before = match range.start_bound() {
            Bound::Included(lo) => self.count_before(lo, false),
            Bound::Excluded(lo) => self.count_before(lo, true),
            Bound::Unbounded => 0,
        };
        let through = match range.end_bound() {
            Bound::Included(hi) => self.count_before(hi, true),
            Bound::Excluded(hi) => self.count_before(hi, false),
            Bound::Unbounded => self.len(),
        };
        through.saturating_sub(before)
    }

    /// In-order walk over the entries within `range`.
    pub(crate) fn range<Q, R>(&self, range: &R) -> Walk<'_, K, V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
        R: RangeBounds<Q>,
    {
        let remaining = self.range_count(range);
        let start = range.start_bound();
        let end = range.end_bound();

        let above_start = |key: &K| match start {
            Bound::Included(lo) => lo.cmp(key.borrow()).is_le(),
            Bound::Excluded(lo) => lo.cmp(key.borrow()).is_lt(),
            Bound::Unbounded => true,
        };
        let below_end = |key: &K| match end {
            Bound::Included(hi) => hi.cmp(key.borrow()).is_ge(),
            Bound::Excluded(hi) => hi.cmp(key.borrow()).is_gt(),
            Bound::Unbounded => true,
        };

        Walk::new(&self.nodes, self.root, remaining, above_start, below_end)
    }
}
