pub mod idx;
pub use idx::load_idx_dataset;
