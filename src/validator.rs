use std::collections::HashSet;

use chrono::{Local, NaiveDateTime, Timelike};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::models::review::Review;
use crate::utils::query_string::{first, FormFields};

/// Check submitted form fields and build the review to append, stamped with the current
/// local time.
pub fn validate(
    fields: &FormFields,
    valid_locations: &HashSet<String>,
) -> Result<Review, ValidationError> {
    validate_at(fields, valid_locations, Local::now().naive_local())
}

/// Same as [`validate`] with an explicit clock. Rules are checked in order and the first
/// failure is returned.
pub fn validate_at(
    fields: &FormFields,
    valid_locations: &HashSet<String>,
    now: NaiveDateTime,
) -> Result<Review, ValidationError> {
    let location = first(fields, "Location").ok_or(ValidationError::MissingField("Location"))?;
    let review_body =
        first(fields, "ReviewBody").ok_or(ValidationError::MissingField("ReviewBody"))?;

    if !valid_locations.contains(location) {
        return Err(ValidationError::InvalidLocation);
    }

    // Stored timestamps have second precision
    let timestamp = now.with_nanosecond(0).unwrap_or(now);

    Ok(Review::new(location.to_string(), review_body.to_string(), timestamp)
        .with_id(Uuid::new_v4().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::review::{format_timestamp, parse_timestamp};
    use crate::utils::query_string::parse;

    fn form(input: &str) -> FormFields {
        parse(input).unwrap()
    }

    fn locations() -> HashSet<String> {
        ["San Diego, California", "Austin, Texas"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_accepts_valid_submission() {
        let now = parse_timestamp("2024-05-06 07:08:09").unwrap();
        let fields = form("Location=San Diego, California&ReviewBody=Great!");

        let review = validate_at(&fields, &locations(), now).unwrap();
        assert_eq!(review.location, "San Diego, California");
        assert_eq!(review.review_body, "Great!");
        assert_eq!(format_timestamp(&review.timestamp), "2024-05-06 07:08:09");
        assert!(review.sentiment.is_none());

        let id = review.review_id.unwrap();
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn test_generates_distinct_ids() {
        let fields = form("Location=Austin, Texas&ReviewBody=ok");
        let a = validate(&fields, &locations()).unwrap();
        let b = validate(&fields, &locations()).unwrap();
        assert_ne!(a.review_id, b.review_id);
    }

    #[test]
    fn test_timestamp_is_whole_seconds() {
        let fields = form("Location=Austin, Texas&ReviewBody=ok");
        let review = validate(&fields, &locations()).unwrap();
        let formatted = format_timestamp(&review.timestamp);
        assert_eq!(parse_timestamp(&formatted).unwrap(), review.timestamp);
        assert_eq!(formatted.len(), "YYYY-MM-DD HH:MM:SS".len());
    }

    #[test]
    fn test_location_is_required_first() {
        assert_eq!(
            validate(&form("ReviewBody=Great!"), &locations()).unwrap_err(),
            ValidationError::MissingField("Location")
        );
        assert_eq!(
            validate(&form(""), &locations()).unwrap_err(),
            ValidationError::MissingField("Location")
        );
    }

    #[test]
    fn test_review_body_is_required() {
        assert_eq!(
            validate(&form("Location=Nowhere"), &locations()).unwrap_err(),
            ValidationError::MissingField("ReviewBody")
        );
        assert_eq!(
            validate(&form("Location=Austin, Texas&ReviewBody="), &locations()).unwrap_err(),
            ValidationError::MissingField("ReviewBody")
        );
    }

    #[test]
    fn test_location_must_be_known() {
        assert_eq!(
            validate(&form("Location=Nowhere&ReviewBody=x"), &locations()).unwrap_err(),
            ValidationError::InvalidLocation
        );
        assert_eq!(
            validate(&form("Location=austin, texas&ReviewBody=x"), &locations()).unwrap_err(),
            ValidationError::InvalidLocation
        );
    }

    #[test]
    fn test_first_value_wins() {
        let fields = form("Location=Austin, Texas&Location=Nowhere&ReviewBody=a&ReviewBody=b");
        let review = validate(&fields, &locations()).unwrap();
        assert_eq!(review.location, "Austin, Texas");
        assert_eq!(review.review_body, "a");
    }
}
