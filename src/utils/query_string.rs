//! `application/x-www-form-urlencoded` fields, shared by GET query strings and POST bodies.
//!
//! Decoding is done by `serde_urlencoded` into ordered `(name, value)` pairs; this module only
//! groups them. Pairs with an empty value are dropped, so a submitted `ReviewBody=` is
//! indistinguishable from a missing field.
use std::collections::HashMap;

/// Field name to every non-blank value submitted for it, in submission order.
pub type FormFields = HashMap<String, Vec<String>>;

/// Group decoded pairs by name, dropping blank values.
pub fn group(pairs: Vec<(String, String)>) -> FormFields {
    let mut fields = FormFields::new();
    for (name, value) in pairs {
        if value.is_empty() {
            continue;
        }
        fields.entry(name).or_default().push(value);
    }
    fields
}

pub fn parse(input: &str) -> Result<FormFields, serde_urlencoded::de::Error> {
    serde_urlencoded::from_str::<Vec<(String, String)>>(input).map(group)
}

pub fn parse_bytes(input: &[u8]) -> Result<FormFields, serde_urlencoded::de::Error> {
    serde_urlencoded::from_bytes::<Vec<(String, String)>>(input).map(group)
}

/// First value submitted for `name`, if any.
pub fn first<'a>(fields: &'a FormFields, name: &str) -> Option<&'a str> {
    fields
        .get(name)
        .and_then(|values| values.first())
        .map(String::as_str)
}
