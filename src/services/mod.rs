pub mod extractor;
pub mod fetcher;
pub mod listing_store;
pub mod orchestrator;
pub mod paginator;

pub use extractor::*;
pub use fetcher::*;
pub use listing_store::*;
pub use orchestrator::*;
pub use paginator::*;
