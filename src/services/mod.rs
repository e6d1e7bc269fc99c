pub mod catalog_lookup;
pub mod context_filter;
pub mod providers;
pub mod ranker;
pub mod recommendations;

pub use catalog_lookup::{CatalogLookup, Lookup};
pub use context_filter::ContextFilter;
pub use ranker::{RankedCandidate, Ranker, Ranking};
