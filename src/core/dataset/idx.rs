//! Loader for IDX-format datasets (the MNIST file layout): a big-endian
//! magic number and count, then rows x cols for image files, then the raw
//! payload. Images and labels live in paired files and are matched by
//! position.
//!
//! Malformed files fail loudly; a dataset is never partially loaded.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::core::common::KnnError;
use crate::core::index::{Label, PointSet};

/// Magic number of an IDX image file (unsigned byte, 3 dimensions).
const IMAGE_MAGIC: u32 = 0x0000_0803;
/// Magic number of an IDX label file (unsigned byte, 1 dimension).
const LABEL_MAGIC: u32 = 0x0000_0801;

/// All IDX header integers are 32-bit big-endian.
fn read_be_u32<R: Read>(reader: &mut R) -> std::io::Result<u32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_be_bytes(buf))
}

/// Loads a paired image/label IDX file set into a [`PointSet`], one point
/// per image with the pixel vector as attributes and the label attached.
///
/// # Errors
///
/// Returns an error if either file cannot be opened or read, carries a wrong
/// magic number, is truncated, or if the image and label counts disagree.
pub fn load_idx_dataset(images_path: &Path, labels_path: &Path) -> Result<PointSet, KnnError> {
    let mut images = BufReader::new(File::open(images_path)?);
    let magic = read_be_u32(&mut images)?;
    if magic != IMAGE_MAGIC {
        return Err(KnnError::Dataset(format!(
            "{}: expected image magic {IMAGE_MAGIC:#010x}, found {magic:#010x}",
            images_path.display()
        )));
    }
    let count = read_be_u32(&mut images)? as usize;
    let rows = read_be_u32(&mut images)? as usize;
    let cols = read_be_u32(&mut images)? as usize;
    let dim = rows * cols;

    let mut labels = BufReader::new(File::open(labels_path)?);
    let magic = read_be_u32(&mut labels)?;
    if magic != LABEL_MAGIC {
        return Err(KnnError::Dataset(format!(
            "{}: expected label magic {LABEL_MAGIC:#010x}, found {magic:#010x}",
            labels_path.display()
        )));
    }
    let label_count = read_be_u32(&mut labels)? as usize;
    if label_count != count {
        return Err(KnnError::Dataset(format!(
            "{} holds {count} images but {} holds {label_count} labels",
            images_path.display(),
            labels_path.display()
        )));
    }

    let mut set = PointSet::with_capacity(dim, count)?;
    let mut pixels = vec![0u8; dim];
    let mut label = [0u8; 1];
    for i in 0..count {
        images.read_exact(&mut pixels).map_err(|e| {
            KnnError::Dataset(format!(
                "{}: truncated at image {i} of {count}: {e}",
                images_path.display()
            ))
        })?;
        labels.read_exact(&mut label).map_err(|e| {
            KnnError::Dataset(format!(
                "{}: truncated at label {i} of {count}: {e}",
                labels_path.display()
            ))
        })?;
        set.push(&pixels, Label::from(label[0]))?;
    }
    Ok(set)
}
