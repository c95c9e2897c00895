//! An ordered symbol table backed by a left-leaning red-black tree.
//!
//! This crate provides [`LlrbMap`], a map from totally ordered keys to values
//! that keeps itself balanced on every insertion and deletion and answers
//! order-based queries in O(log n):
//!
//! - [`min`](LlrbMap::min), [`max`](LlrbMap::max), [`floor`](LlrbMap::floor) and [`ceiling`](LlrbMap::ceiling)
//! - [`rank`](LlrbMap::rank) and [`select`](LlrbMap::select) - Convert between keys and sorted positions
//! - [`range_count`](LlrbMap::range_count) and [`keys_in`](LlrbMap::keys_in) - Count or enumerate a key range
//! - Indexing by [`Rank`] - e.g., `map[Rank(0)]` for the value of the smallest key
//!
//! # Example
//!
//! ```
//! use llrb_tree::{LlrbMap, Rank};
//!
//! let mut scores = LlrbMap::new();
//! scores.put("Alice", 100);
//! scores.put("Bob", 85);
//! scores.put("Carol", 92);
//!
//! assert_eq!(scores.get("Bob"), Some(&85));
//! assert_eq!(scores.len(), 3);
//!
//! // Bob is second alphabetically.
//! assert_eq!(scores.select(1), Ok(&"Bob"));
//! assert_eq!(scores.rank("Carol"), 2);
//! assert_eq!(scores[Rank(0)], 100);
//!
//! // Deleting a missing key is a no-op.
//! assert_eq!(scores.delete("Dave"), None);
//! ```
//!
//! # Errors
//!
//! Queries that have no answer return [`Error`] instead of panicking: `min`
//! and `delete_min` on an empty map give [`Error::EmptyContainer`], a `floor`
//! below every key gives [`Error::NoSuchElement`], and `select` past the end
//! gives [`Error::InvalidArgument`]. A failed call never modifies the map.
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Logarithmic height** - At most 2·log<sub>2</sub>(n + 1) levels, checked by [`LlrbMap::check`]
//! - **Arena storage** - Nodes live in one contiguous vector and freed slots are reused
//!
//! # Logging
//!
//! The crate logs through the [`log`] facade: structural recoloring and
//! successor substitution at `trace` level, integrity-check failures at
//! `warn` level. Install any `log` backend to see them.

#![no_std]
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod order_statistic;
mod raw;

pub mod llrb_map;

pub use error::{Error, Result, Violation};
pub use llrb_map::LlrbMap;
pub use order_statistic::Rank;
