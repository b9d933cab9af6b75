use scraper::{Html, Selector};
use serde_json::Value;

use crate::domain::ListingRecord;

const LISTINGS_PATH: &[&str] = &[
    "props",
    "pageProps",
    "searchPageState",
    "cat1",
    "searchResults",
    "listResults",
];

const TOTAL_PAGES_PATH: &[&str] = &[
    "props",
    "pageProps",
    "searchPageState",
    "cat1",
    "searchList",
    "totalPages",
];

/// What one result page yields: the listings on it, in source order, and the
/// total page count for the search when the page carries one.
#[derive(Debug, Default)]
pub struct ExtractedPage {
    pub listings: Vec<ListingRecord>,
    pub total_pages: Option<u32>,
}

enum ExtractError {
    MissingDataBlock,
    MalformedJson(serde_json::Error),
}

/// Pulls the listings and the total page count out of the `__NEXT_DATA__`
/// blob embedded in a result page. A missing block, malformed JSON, or a
/// missing key-path segment all degrade to "nothing found on this page";
/// none of them are fatal to the caller.
pub fn extract(page_body: &str) -> ExtractedPage {
    let json_data = match next_data_payload(page_body) {
        Ok(data) => data,
        Err(ExtractError::MissingDataBlock) => {
            log::error!("Cannot find the script tag with id __NEXT_DATA__");
            return ExtractedPage::default();
        }
        Err(ExtractError::MalformedJson(e)) => {
            log::error!("Embedded data block is not valid JSON: {}", e);
            return ExtractedPage::default();
        }
    };

    // The two lookups are independent: a page can report a page count while
    // carrying no listings, and vice versa.
    let listings = match value_at_path(&json_data, LISTINGS_PATH).and_then(Value::as_array) {
        Some(array) => array
            .iter()
            .filter_map(|entry| entry.as_object().cloned())
            .collect(),
        None => {
            log::error!("No listings found under the search results path");
            Vec::new()
        }
    };

    let total_pages = value_at_path(&json_data, TOTAL_PAGES_PATH)
        .and_then(Value::as_u64)
        .map(|n| n as u32);

    log::info!("Found {} listings on the page", listings.len());

    ExtractedPage {
        listings,
        total_pages,
    }
}

fn next_data_payload(page_body: &str) -> Result<Value, ExtractError> {
    let document = Html::parse_document(page_body);
    let selector = Selector::parse(r#"script[id="__NEXT_DATA__"]"#).unwrap();

    let tag = document
        .select(&selector)
        .next()
        .ok_or(ExtractError::MissingDataBlock)?;

    let content: String = tag.text().collect();
    serde_json::from_str(&content).map_err(ExtractError::MalformedJson)
}

/// Walks a fixed key path, returning None as soon as any segment is missing.
fn value_at_path<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(root, |node, key| node.get(key))
}
