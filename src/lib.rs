#![forbid(unsafe_code)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::panic)]
#![warn(clippy::cast_possible_truncation)]
#![warn(clippy::missing_const_for_fn, clippy::all)]

//! # kdnn: exact k-nearest-neighbor search over byte-vector points
//!
//! `kdnn` builds a median-balanced k-d tree over fixed-dimension points
//! (unsigned 8-bit attributes plus an integer label) and answers exact
//! k=3 nearest-neighbor queries by squared Euclidean distance.
//! It features:
//! - A flat point arena with index-based child links (no per-node allocation)
//! - Expected O(n log n) construction via linear-time median selection
//! - Two pruning traversal strategies plus a brute-force reference scan
//! - A bounded, allocation-free per-query result list
//! - Read-only queries that run concurrently with no coordination
//!
//! The tree is built once and never mutated; dynamic insertion, rebalancing
//! and approximate search are out of scope.

pub mod core;

// Re-export key types for easier use by library consumers
pub use crate::core::classify::{predict_label, KnnClassifier};
pub use crate::core::common::KnnError;
pub use crate::core::config::Config;
pub use crate::core::dataset::load_idx_dataset;
pub use crate::core::index::{
    squared_euclidean, BoundVectorSearch, Distance, KdTree, Label, LinearSearch,
    NearestNeighbors, Neighbor, PointSet, RejectionFlagSearch, SearchStrategy,
};

/// Core result type for the library
pub type Result<T> = std::result::Result<T, KnnError>;
