pub mod index;
pub mod load;

pub use index::{Catalog, SimilarityIndex};
pub use load::load_catalog;
