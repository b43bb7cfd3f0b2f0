use crate::core::common::KnnError;

/// Squared Euclidean distance between two u8 vectors. The maximum value for
/// 784 dimensions is 784 * 255^2, well inside u32 range.
pub type Distance = u32;

/// Calculates the squared Euclidean distance between two attribute vectors.
///
/// The square root is never taken: only relative ordering matters to
/// nearest-neighbor retrieval.
///
/// # Errors
///
/// Returns an error if the vectors have different dimensions.
pub fn squared_euclidean(a: &[u8], b: &[u8]) -> Result<Distance, KnnError> {
    if a.len() != b.len() {
        return Err(KnnError::DimensionMismatch { expected: a.len(), actual: b.len() });
    }
    Ok(squared_euclidean_unchecked(a, b))
}

/// Squared Euclidean distance over slices already known to share a dimension.
pub(crate) fn squared_euclidean_unchecked(a: &[u8], b: &[u8]) -> Distance {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let delta = i32::from(*x) - i32::from(*y);
            (delta * delta).unsigned_abs()
        })
        .sum()
}

/// Like [`squared_euclidean_unchecked`], but bails out as soon as the partial
/// sum reaches `worst`. The returned value is then some partial sum >= `worst`
/// and therefore still correctly rejected by a full result list.
pub(crate) fn squared_euclidean_within(a: &[u8], b: &[u8], worst: Distance) -> Distance {
    let mut sum: Distance = 0;
    for (x, y) in a.iter().zip(b) {
        let delta = i32::from(*x) - i32::from(*y);
        sum += (delta * delta).unsigned_abs();
        if sum >= worst {
            return sum;
        }
    }
    sum
}
