//! Error types for `llrb_tree`.

use thiserror::Error;

/// Result type alias using our [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// Precondition failures reported by [`LlrbMap`](crate::LlrbMap) operations.
///
/// Every error is detected before the tree is touched, so a failed call
/// leaves the map exactly as it was.
#[derive(Error, Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// A rank outside `0..len` was passed to a rank-addressed operation.
    #[error("rank {rank} is out of range for a map of {len} entries")]
    InvalidArgument {
        /// The offending rank.
        rank: usize,
        /// Number of entries in the map at the time of the call.
        len: usize,
    },

    /// An operation that needs at least one entry was called on an empty map.
    #[error("`{operation}` called on an empty map")]
    EmptyContainer {
        /// Name of the operation.
        operation: &'static str,
    },

    /// No stored key satisfies the query.
    #[error("no key satisfies `{operation}`")]
    NoSuchElement {
        /// Name of the operation.
        operation: &'static str,
    },
}

/// An invariant found broken by [`LlrbMap::check`](crate::LlrbMap::check).
#[derive(Error, Clone, Copy, Debug, Eq, PartialEq)]
pub enum Violation {
    /// Some key is not strictly between its ancestors' bounds.
    #[error("keys are not in symmetric order")]
    SymmetricOrder,

    /// Some cached subtree size disagrees with its children.
    #[error("subtree sizes are not consistent")]
    SizeInconsistent,

    /// `rank` and `select` are not inverse to each other.
    #[error("ranks are not consistent")]
    RankInconsistent,

    /// A red right link, two reds in a row, or a red root.
    #[error("tree is not a 2-3 tree")]
    Not23,

    /// Two root-to-leaf paths cross different numbers of black links.
    #[error("tree is not black-balanced")]
    Unbalanced,
}
