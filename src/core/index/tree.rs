use crate::core::common::KnnError;
use crate::core::index::point::{PointId, PointSet};
use crate::core::index::results::NearestNeighbors;
use crate::core::index::search::{RejectionFlagSearch, SearchStrategy};

/// Tree node: child links into the point arena plus the split axis.
///
/// A point doubles as a tree node, so there is no separate node arena; the
/// node table is indexed by [`PointId`].
#[derive(Debug, Clone, Copy, Default)]
struct KdNode {
    left: Option<PointId>,
    right: Option<PointId>,
    axis: usize,
}

/// Median-balanced k-d tree over a [`PointSet`].
///
/// Built once by recursive median partition with the split axis cycling
/// through all dimensions by depth; immutable afterwards. For a node split on
/// axis `d`, every point in its left subtree has attribute `d` <= the node's
/// and every point in its right subtree has attribute `d` >= it. Queries are
/// read-only and may run concurrently without coordination.
#[derive(Debug, Clone)]
pub struct KdTree {
    points: PointSet,
    nodes: Vec<KdNode>,
    root: Option<PointId>,
}

impl KdTree {
    /// Builds the tree, consuming the point set. An empty set yields a valid
    /// empty tree. Expected cost is O(n log n): each partition level costs
    /// expected linear time via `select_nth_unstable_by_key`.
    #[must_use]
    pub fn build(points: PointSet) -> Self {
        let mut nodes = vec![KdNode::default(); points.len()];
        let mut ids: Vec<PointId> = (0..points.len()).collect();
        let root = build_range(&points, &mut nodes, &mut ids, 0);
        Self { points, nodes, root }
    }

    /// The backing point arena.
    #[must_use]
    pub const fn points(&self) -> &PointSet {
        &self.points
    }

    /// Number of indexed points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree indexes no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Length of the longest root-to-leaf path, in nodes. Zero for an empty
    /// tree; median construction keeps this at O(log n).
    #[must_use]
    pub fn depth(&self) -> usize {
        fn node_depth(tree: &KdTree, id: Option<PointId>) -> usize {
            id.map_or(0, |id| {
                1 + node_depth(tree, tree.left(id)).max(node_depth(tree, tree.right(id)))
            })
        }
        node_depth(self, self.root)
    }

    /// Up to 3 nearest neighbors of `query`, ascending by squared Euclidean
    /// distance, using the rejection-flag traversal.
    ///
    /// # Errors
    ///
    /// Returns an error if `query` does not match the indexed dimension.
    pub fn nearest(&self, query: &[u8]) -> Result<NearestNeighbors, KnnError> {
        RejectionFlagSearch.search(self, query)
    }

    pub(crate) const fn root(&self) -> Option<PointId> {
        self.root
    }

    pub(crate) fn left(&self, id: PointId) -> Option<PointId> {
        self.nodes[id].left
    }

    pub(crate) fn right(&self, id: PointId) -> Option<PointId> {
        self.nodes[id].right
    }

    pub(crate) fn axis(&self, id: PointId) -> usize {
        self.nodes[id].axis
    }
}

/// Recursive median partition of `ids`, returning the subtree root. Only the
/// id slice is permuted; point storage never moves.
fn build_range(
    points: &PointSet,
    nodes: &mut [KdNode],
    ids: &mut [PointId],
    axis: usize,
) -> Option<PointId> {
    if ids.is_empty() {
        return None;
    }
    if ids.len() == 1 {
        let id = ids[0];
        nodes[id] = KdNode { left: None, right: None, axis };
        return Some(id);
    }

    let half = ids.len() / 2;
    // nth_element: ids[half] ends up at its ascending-order position for this
    // axis, with <= values before it and >= values after (ties either side).
    ids.select_nth_unstable_by_key(half, |&id| points.attrs(id)[axis]);
    let id = ids[half];

    let next_axis = (axis + 1) % points.dim();
    let (lower, upper) = ids.split_at_mut(half);
    let left = build_range(points, nodes, lower, next_axis);
    let right = build_range(points, nodes, &mut upper[1..], next_axis);
    nodes[id] = KdNode { left, right, axis };
    Some(id)
}
