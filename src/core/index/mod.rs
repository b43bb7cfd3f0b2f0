//! In-memory spatial index: a median-balanced k-d tree over a flat point
//! arena, queried for exact k=3 nearest neighbors by squared Euclidean
//! distance.

pub mod distance;
pub mod point;
pub mod results;
pub mod search;
pub mod tree;

pub use self::distance::{squared_euclidean, Distance};
pub use self::point::{Label, PointId, PointSet};
pub use self::results::{Neighbor, NearestNeighbors, RESULT_CAPACITY};
pub use self::search::{
    strategy_from_name, BoundVectorSearch, LinearSearch, RejectionFlagSearch, SearchStrategy,
};
pub use self::tree::KdTree;
