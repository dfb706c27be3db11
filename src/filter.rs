use chrono::NaiveDate;

use crate::error::QueryError;
use crate::models::review::Review;
use crate::utils::query_string::{first, FormFields};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Read-side constraints parsed from query parameters. Every present constraint must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewFilter {
    pub location: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ReviewFilter {
    /// Build a filter from `location`, `start_date` and `end_date`; other parameters are ignored.
    pub fn from_params(params: &FormFields) -> Result<Self, QueryError> {
        Ok(ReviewFilter {
            location: first(params, "location").map(str::to_string),
            start_date: parse_date(params, "start_date")?,
            end_date: parse_date(params, "end_date")?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.location.is_none() && self.start_date.is_none() && self.end_date.is_none()
    }

    pub fn matches(&self, review: &Review) -> bool {
        let date = review.timestamp.date();

        self.location
            .as_ref()
            .map_or(true, |location| review.location == *location)
            && self.start_date.map_or(true, |start| date >= start)
            && self.end_date.map_or(true, |end| date <= end)
    }

    /// Keep the matching reviews, preserving their order.
    pub fn apply(&self, reviews: Vec<Review>) -> Vec<Review> {
        if self.is_empty() {
            return reviews;
        }
        reviews
            .into_iter()
            .filter(|review| self.matches(review))
            .collect()
    }
}

/// Parse `params` and filter `reviews` with them.
pub fn filter(reviews: Vec<Review>, params: &FormFields) -> Result<Vec<Review>, QueryError> {
    Ok(ReviewFilter::from_params(params)?.apply(reviews))
}

fn parse_date(params: &FormFields, param: &'static str) -> Result<Option<NaiveDate>, QueryError> {
    first(params, param)
        .map(|value| {
            NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| QueryError::MalformedDate {
                param,
                value: value.to_string(),
            })
        })
        .transpose()
}
