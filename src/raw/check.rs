use log::warn;

use super::handle::Link;
use super::raw_llrb_map::RawLlrbMap;
use crate::error::Violation;

impl<K: Ord, V> RawLlrbMap<K, V> {
    /// Verifies every structural invariant independently.
    ///
    /// Each broken invariant is logged; the first one, in the order the
    /// checks run, is returned.
    pub(crate) fn check(&self) -> Result<(), Violation> {
        let findings = [
            (self.is_bst(), Violation::SymmetricOrder),
            (self.is_size_consistent(self.root()), Violation::SizeInconsistent),
            (self.is_rank_consistent(), Violation::RankInconsistent),
            (self.is_23(), Violation::Not23),
            (self.is_balanced(), Violation::Unbalanced),
        ];

        let mut first = None;
        for (holds, violation) in findings {
            if !holds {
                warn!("integrity check failed: {violation}");
                first.get_or_insert(violation);
            }
        }
        first.map_or(Ok(()), Err)
    }

    fn is_bst(&self) -> bool {
        self.is_bst_within(self.root(), None, None)
    }

    // Strict bounds, so this also rules out duplicate keys.
    fn is_bst_within(&self, link: Link, lower: Option<&K>, upper: Option<&K>) -> bool {
        let Some(h) = link else {
            return true;
        };
        let node = self.node(h);
        if lower.is_some_and(|lo| node.key <= *lo) || upper.is_some_and(|hi| node.key >= *hi) {
            return false;
        }
        self.is_bst_within(node.left, lower, Some(&node.key)) && self.is_bst_within(node.right, Some(&node.key), upper)
    }

    fn is_size_consistent(&self, link: Link) -> bool {
        let Some(h) = link else {
            return true;
        };
        let node = self.node(h);
        node.size == 1 + self.subtree_size(node.left) + self.subtree_size(node.right)
            && self.is_size_consistent(node.left)
            && self.is_size_consistent(node.right)
    }

    fn is_rank_consistent(&self) -> bool {
        let selects_invert = (0..self.len())
            .all(|i| self.select_handle(i).is_some_and(|h| self.rank(&self.node(h).key) == i));
        let ranks_invert = self
            .walk()
            .all(|(key, _)| self.select_handle(self.rank(key)).is_some_and(|h| self.node(h).key == *key));
        selects_invert && ranks_invert
    }

    fn is_23(&self) -> bool {
        !self.is_red(self.root()) && self.is_23_at(self.root())
    }

    fn is_23_at(&self, link: Link) -> bool {
        let Some(h) = link else {
            return true;
        };
        let node = self.node(h);
        if self.is_red(node.right) {
            return false;
        }
        if link != self.root() && node.color.is_red() && self.is_red(node.left) {
            return false;
        }
        self.is_23_at(node.left) && self.is_23_at(node.right)
    }

    fn is_balanced(&self) -> bool {
        // Black links on the path from the root to the minimum.
        let mut black = 0;
        let mut link = self.root();
        while let Some(h) = link {
            if !self.is_red(link) {
                black += 1;
            }
            link = self.node(h).left;
        }
        self.is_balanced_at(self.root(), black)
    }

    fn is_balanced_at(&self, link: Link, black: usize) -> bool {
        let Some(h) = link else {
            return black == 0;
        };
        let black = if self.is_red(link) {
            black
        } else if let Some(black) = black.checked_sub(1) {
            black
        } else {
            return false;
        };
        let node = self.node(h);
        self.is_balanced_at(node.left, black) && self.is_balanced_at(node.right, black)
    }
}
