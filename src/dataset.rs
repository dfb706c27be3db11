//! CSV input dataset.
//!
//! The file must have a header row with at least `Location`, `ReviewBody` and `Timestamp`. An
//! optional `ReviewId` column is kept when non-empty; any other column is passed through as an
//! extra string field on the review. Every problem here is fatal to startup.
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::info;

use crate::error::StartupError;
use crate::models::review::{parse_timestamp, Review};

const LOCATION: &str = "Location";
const REVIEW_BODY: &str = "ReviewBody";
const TIMESTAMP: &str = "Timestamp";
const REVIEW_ID: &str = "ReviewId";

/// Load raw (unscored) reviews from the CSV file at `path`.
pub fn load_reviews<P: AsRef<Path>>(path: P) -> Result<Vec<Review>, StartupError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| StartupError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let reviews = read_reviews(file)?;
    info!("Loaded {} reviews from {}", reviews.len(), path.display());
    Ok(reviews)
}

/// Parse raw reviews from any CSV source.
pub fn read_reviews<R: Read>(source: R) -> Result<Vec<Review>, StartupError> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(source);
    let headers = reader.headers()?.clone();
    let columns = Columns::locate(&headers)?;

    let mut reviews = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        // 1-based data row, header excluded
        reviews.push(columns.review_from(index + 1, &headers, &record)?);
    }

    Ok(reviews)
}

struct Columns {
    location: usize,
    review_body: usize,
    timestamp: usize,
    review_id: Option<usize>,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self, StartupError> {
        let find = |name: &str| headers.iter().position(|header| header.trim() == name);
        let required = |name: &'static str| find(name).ok_or(StartupError::MissingColumn(name));

        Ok(Columns {
            location: required(LOCATION)?,
            review_body: required(REVIEW_BODY)?,
            timestamp: required(TIMESTAMP)?,
            review_id: find(REVIEW_ID),
        })
    }

    fn is_named(&self, index: usize) -> bool {
        index == self.location
            || index == self.review_body
            || index == self.timestamp
            || Some(index) == self.review_id
    }

    fn review_from(
        &self,
        row: usize,
        headers: &StringRecord,
        record: &StringRecord,
    ) -> Result<Review, StartupError> {
        let required = |index: usize, field: &'static str| match record.get(index) {
            Some(value) if !value.trim().is_empty() => Ok(value.to_string()),
            _ => Err(StartupError::EmptyField { row, field }),
        };

        let location = required(self.location, LOCATION)?;
        let review_body = required(self.review_body, REVIEW_BODY)?;
        let raw_timestamp = required(self.timestamp, TIMESTAMP)?;
        let timestamp = parse_timestamp(raw_timestamp.trim()).map_err(|_| {
            StartupError::InvalidTimestamp {
                row,
                value: raw_timestamp.clone(),
            }
        })?;

        let mut review = Review::new(location, review_body, timestamp);
        review.review_id = self
            .review_id
            .and_then(|index| record.get(index))
            .filter(|id| !id.trim().is_empty())
            .map(str::to_string);

        for (index, (header, value)) in headers.iter().zip(record.iter()).enumerate() {
            if self.is_named(index) || header.is_empty() || value.is_empty() {
                continue;
            }
            review.extra.insert(header.to_string(), value.to_string());
        }

        Ok(review)
    }
}
