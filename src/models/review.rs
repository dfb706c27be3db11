// src/models/review.rs
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Wire and dataset format of review timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Review {
    #[serde(rename = "ReviewId", default, skip_serializing_if = "Option::is_none")]
    pub review_id: Option<String>, // Generated on submit, optional in the dataset
    #[serde(rename = "Location")]
    pub location: String, // Must be one of the dataset locations
    #[serde(rename = "ReviewBody")]
    pub review_body: String, // Free text of the review
    #[serde(rename = "Timestamp", with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
    #[serde(rename = "Sentiment", default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<SentimentScores>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>, // Any other dataset columns, passed through as-is
}

/// Named polarity scores for a piece of text.
///
/// `negative`, `neutral` and `positive` are proportions in `[0, 1]`; `compound` is the
/// normalized overall polarity in `[-1, 1]`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct SentimentScores {
    pub negative: f64,
    pub neutral: f64,
    pub positive: f64,
    pub compound: f64,
}

impl Review {
    pub fn new(location: String, review_body: String, timestamp: NaiveDateTime) -> Self {
        Review {
            review_id: None,
            location,
            review_body,
            timestamp,
            sentiment: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_id(mut self, review_id: impl Into<String>) -> Self {
        self.review_id = Some(review_id.into());
        self
    }
}

pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
}

pub fn format_timestamp(timestamp: &NaiveDateTime) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_timestamp(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw).map_err(de::Error::custom)
    }
}
