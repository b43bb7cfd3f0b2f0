use crate::core::common::KnnError;

/// Identifier of a point inside a [`PointSet`]. Also serves as the node id
/// in the tree built over the set.
pub type PointId = usize;

/// Class label attached to a point.
pub type Label = u32;

/// Flat arena of fixed-dimension points.
///
/// Attribute vectors are stored contiguously in a single buffer; the arena is
/// the sole owner of all point data. Everything else (the tree, search
/// scratch state) refers to points by [`PointId`] only, so no point is ever
/// copied or freed independently of the set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointSet {
    dim: usize,
    attrs: Vec<u8>,
    labels: Vec<Label>,
}

impl PointSet {
    /// Creates an empty set of `dim`-dimensional points.
    ///
    /// # Errors
    ///
    /// Returns an error if `dim` is zero.
    pub fn new(dim: usize) -> Result<Self, KnnError> {
        if dim == 0 {
            return Err(KnnError::InvalidInput {
                message: "point dimension must be at least 1".to_string(),
            });
        }
        Ok(Self { dim, attrs: Vec::new(), labels: Vec::new() })
    }

    /// Creates an empty set with storage reserved for `capacity` points.
    ///
    /// # Errors
    ///
    /// Returns an error if `dim` is zero.
    pub fn with_capacity(dim: usize, capacity: usize) -> Result<Self, KnnError> {
        let mut set = Self::new(dim)?;
        set.attrs.reserve(capacity.saturating_mul(dim));
        set.labels.reserve(capacity);
        Ok(set)
    }

    /// Appends a point and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if `attrs` does not match the set's dimension.
    pub fn push(&mut self, attrs: &[u8], label: Label) -> Result<PointId, KnnError> {
        if attrs.len() != self.dim {
            return Err(KnnError::DimensionMismatch { expected: self.dim, actual: attrs.len() });
        }
        self.attrs.extend_from_slice(attrs);
        self.labels.push(label);
        Ok(self.labels.len() - 1)
    }

    /// Number of points in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns `true` if the set holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Dimension of every point in the set.
    #[must_use]
    pub const fn dim(&self) -> usize {
        self.dim
    }

    /// Attribute vector of the point `id`.
    #[must_use]
    pub fn attrs(&self, id: PointId) -> &[u8] {
        &self.attrs[id * self.dim..(id + 1) * self.dim]
    }

    /// Label of the point `id`.
    #[must_use]
    pub fn label(&self, id: PointId) -> Label {
        self.labels[id]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_dimension_is_rejected() {
        assert!(matches!(PointSet::new(0), Err(KnnError::InvalidInput { .. })));
    }

    #[test]
    fn push_checks_dimension() {
        let mut set = PointSet::new(3).unwrap();
        let err = set.push(&[1, 2], 0).unwrap_err();
        assert!(matches!(err, KnnError::DimensionMismatch { expected: 3, actual: 2 }));
        assert!(set.is_empty());
    }

    #[test]
    fn points_round_trip() {
        let mut set = PointSet::with_capacity(2, 3).unwrap();
        let a = set.push(&[1, 2], 10).unwrap();
        let b = set.push(&[3, 4], 20).unwrap();
        let c = set.push(&[5, 6], 30).unwrap();

        assert_eq!(set.len(), 3);
        assert_eq!((a, b, c), (0, 1, 2));
        assert_eq!(set.attrs(b), &[3, 4]);
        assert_eq!(set.label(c), 30);
    }
}
