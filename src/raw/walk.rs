use alloc::vec::Vec;
use core::iter::FusedIterator;

use super::arena::Arena;
use super::handle::{Handle, Link};
use super::node::Node;

/// A two-ended in-order traversal over a contiguous run of keys.
///
/// The front stack holds the path to the next ascending entry, the back stack
/// the path to the next descending one. `remaining` is computed up front from
/// subtree sizes, so the two ends stop exactly when they meet and neither
/// needs to recheck the range bounds after seeding.
pub(crate) struct Walk<'a, K, V> {
    nodes: &'a Arena<Node<K, V>>,
    front: Vec<Handle>,
    back: Vec<Handle>,
    remaining: usize,
}

impl<'a, K, V> Walk<'a, K, V> {
    /// Seeds both stacks from `root`. `above_start` must hold for every key at
    /// or after the first key of the run and `below_end` for every key at or
    /// before the last one.
    pub(crate) fn new(
        nodes: &'a Arena<Node<K, V>>,
        root: Link,
        remaining: usize,
        above_start: impl Fn(&K) -> bool,
        below_end: impl Fn(&K) -> bool,
    ) -> Self {
        let mut walk = Self {
            nodes,
            front: Vec::new(),
            back: Vec::new(),
            remaining,
        };
        if remaining == 0 {
            return walk;
        }

        let mut link = root;
        while let Some(h) = link {
            let node = &nodes[h];
            if above_start(&node.key) {
                walk.front.push(h);
                link = node.left;
            } else {
                link = node.right;
            }
        }

        let mut link = root;
        while let Some(h) = link {
            let node = &nodes[h];
            if below_end(&node.key) {
                walk.back.push(h);
                link = node.right;
            } else {
                link = node.left;
            }
        }

        walk
    }

    pub(crate) const fn remaining(&self) -> usize {
        self.remaining
    }

    fn descend_left(&mut self, mut link: Link) {
        while let Some(h) = link {
            self.front.push(h);
            link = self.nodes[h].left;
        }
    }

    fn descend_right(&mut self, mut link: Link) {
        while let Some(h) = link {
            self.back.push(h);
            link = self.nodes[h].right;
        }
    }
}

impl<'a, K, V> Iterator for Walk<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let h = self.front.pop()?;
        let nodes = self.nodes;
        let node = &nodes[h];
        self.descend_left(node.right);
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Walk<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let h = self.back.pop()?;
        let nodes = self.nodes;
        let node = &nodes[h];
        self.descend_right(node.left);
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }
}

impl<K, V> ExactSizeIterator for Walk<'_, K, V> {}

impl<K, V> FusedIterator for Walk<'_, K, V> {}

impl<K, V> Clone for Walk<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            front: self.front.clone(),
            back: self.back.clone(),
            remaining: self.remaining,
        }
    }
}
