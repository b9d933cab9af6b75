use std::fs::OpenOptions;
use std::path::PathBuf;

use serde_json::Value;

use crate::domain::ListingRecord;

/// Append-only CSV persistence, one file per zip code. Rows accumulate
/// across scrape sessions with no deduplication; row order is insertion
/// order.
pub struct ListingStore {
    data_dir: PathBuf,
}

impl ListingStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn csv_path(&self, zip_code: &str) -> PathBuf {
        self.data_dir.join(format!("{}.csv", zip_code))
    }

    /// Appends the listings to `<data_dir>/<zip>.csv`, writing a header row
    /// only when the file is created. Columns are the union of keys seen in
    /// this batch, in first-seen order.
    pub fn append(&self, zip_code: &str, listings: &[ListingRecord]) -> anyhow::Result<()> {
        if listings.is_empty() {
            return Ok(());
        }

        std::fs::create_dir_all(&self.data_dir)?;

        let path = self.csv_path(zip_code);
        let write_header = !path.exists();

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let mut writer = csv::Writer::from_writer(file);

        let columns = column_union(listings);
        if write_header {
            writer.write_record(&columns)?;
        }

        for listing in listings {
            let row: Vec<String> = columns
                .iter()
                .map(|column| listing.get(column).map(flatten_field).unwrap_or_default())
                .collect();
            writer.write_record(&row)?;
        }

        writer.flush()?;
        log::info!("Saved {} listings to {}", listings.len(), path.display());

        Ok(())
    }
}

fn column_union(listings: &[ListingRecord]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for listing in listings {
        for key in listing.keys() {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
        }
    }
    columns
}

fn flatten_field(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::Path;

    fn listing(fields: Value) -> ListingRecord {
        fields.as_object().cloned().unwrap()
    }

    fn read_lines(path: &Path) -> Vec<String> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|l| l.to_string())
            .collect()
    }

    #[test]
    fn writes_header_then_rows_on_first_append() {
        let dir = tempfile::tempdir().unwrap();
        let store = ListingStore::new(dir.path());

        let listings = vec![
            listing(json!({ "address": "123 Main St", "price": 500000 })),
            listing(json!({ "address": "456 Pine St", "beds": 3 })),
        ];
        store.append("98101", &listings).unwrap();

        let lines = read_lines(&store.csv_path("98101"));
        assert_eq!(lines[0], "address,price,beds");
        assert_eq!(lines[1], "123 Main St,500000,");
        assert_eq!(lines[2], "456 Pine St,,3");
    }

    #[test]
    fn second_append_adds_rows_without_a_second_header() {
        let dir = tempfile::tempdir().unwrap();
        let store = ListingStore::new(dir.path());

        let listings = vec![listing(json!({ "address": "123 Main St" }))];
        store.append("98101", &listings).unwrap();
        store.append("98101", &listings).unwrap();

        let lines = read_lines(&store.csv_path("98101"));
        // Re-running a scrape is expected to duplicate rows, never headers.
        assert_eq!(
            lines,
            vec!["address", "123 Main St", "123 Main St"]
        );
    }

    #[test]
    fn empty_batches_create_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = ListingStore::new(dir.path());

        store.append("98101", &[]).unwrap();

        assert!(!store.csv_path("98101").exists());
    }

    #[test]
    fn files_are_keyed_by_zip_code() {
        let dir = tempfile::tempdir().unwrap();
        let store = ListingStore::new(dir.path());

        store
            .append("98101", &[listing(json!({ "address": "a" }))])
            .unwrap();
        store
            .append("10001", &[listing(json!({ "address": "b" }))])
            .unwrap();

        assert!(store.csv_path("98101").exists());
        assert!(store.csv_path("10001").exists());
    }

    #[test]
    fn non_scalar_fields_are_flattened_to_json() {
        let dir = tempfile::tempdir().unwrap();
        let store = ListingStore::new(dir.path());

        let listings = vec![listing(
            json!({ "address": "123 Main St", "photos": ["a.jpg", "b.jpg"] }),
        )];
        store.append("98101", &listings).unwrap();

        let lines = read_lines(&store.csv_path("98101"));
        assert_eq!(lines[1], r#"123 Main St,"[""a.jpg"",""b.jpg""]""#);
    }
}
