use serde_json::{Map, Value};

/// One property entry exactly as the upstream site emits it. The schema is
/// whatever the embedded page data carries, so records stay as raw JSON
/// objects rather than a typed struct.
pub type ListingRecord = Map<String, Value>;

/// All listings collected for one zip code, in page-then-in-page order.
#[derive(Debug)]
pub struct AggregatedResult {
    pub zip_code: String,
    pub listings: Vec<ListingRecord>,
}
