use super::handle::Link;

/// Color of the link from a node's parent down to the node.
///
/// A red link glues a node to its parent to form a 3-node (or, transiently,
/// a 4-node); a black link is an ordinary 2-3 tree link.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Color {
    Red,
    Black,
}

impl Color {
    #[inline]
    pub(crate) const fn is_red(self) -> bool {
        matches!(self, Color::Red)
    }

    #[inline]
    pub(crate) fn flip(&mut self) {
        *self = match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        };
    }
}

#[derive(Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) left: Link,
    pub(crate) right: Link,
    pub(crate) color: Color,
    // Nodes in the subtree rooted here, this one included.
    pub(crate) size: usize,
}

impl<K, V> Node<K, V> {
    /// A fresh leaf. New keys always arrive on a red link.
    pub(crate) fn leaf(key: K, value: V) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
            color: Color::Red,
            size: 1,
        }
    }

    pub(crate) fn into_entry(self) -> (K, V) {
        (self.key, self.value)
    }
}
