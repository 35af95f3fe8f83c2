pub mod applier;
pub mod store;

pub use applier::{apply_mapping, count_unmapped};
pub use store::{SkuMapError, SkuMapStore};
