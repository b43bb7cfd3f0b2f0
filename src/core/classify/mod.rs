//! 3-nearest-neighbor classification layered on the search primitive.

use crate::core::common::KnnError;
use crate::core::index::{KdTree, Label, NearestNeighbors, SearchStrategy};

/// Tie-break rule over an ascending result list: if the two nearest labels
/// agree, that label wins; otherwise if the second and third agree, that
/// label wins; otherwise the nearest label. With fewer than 3 results the
/// nearest label is used; an empty list yields no prediction.
#[must_use]
pub fn predict_label(neighbors: &NearestNeighbors) -> Option<Label> {
    let mut labels = neighbors.iter().map(|n| n.label);
    let first = labels.next()?;
    let Some(second) = labels.next() else {
        return Some(first);
    };
    if first == second {
        return Some(first);
    }
    match labels.next() {
        Some(third) if second == third => Some(second),
        _ => Some(first),
    }
}

/// k=3 classifier binding an immutable tree to a search strategy.
pub struct KnnClassifier {
    tree: KdTree,
    strategy: Box<dyn SearchStrategy>,
}

impl KnnClassifier {
    /// Create a classifier over a built tree with the given strategy.
    #[must_use]
    pub fn new(tree: KdTree, strategy: Box<dyn SearchStrategy>) -> Self {
        Self { tree, strategy }
    }

    /// The indexed tree.
    #[must_use]
    pub const fn tree(&self) -> &KdTree {
        &self.tree
    }

    /// Get strategy name
    #[must_use]
    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Predicts the label of `query`, or `None` over an empty tree.
    ///
    /// # Errors
    ///
    /// Returns an error if `query` does not match the indexed dimension.
    pub fn predict(&self, query: &[u8]) -> Result<Option<Label>, KnnError> {
        let neighbors = self.strategy.search(&self.tree, query)?;
        Ok(predict_label(&neighbors))
    }
}
