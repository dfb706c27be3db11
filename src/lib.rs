//! Review analyzer service.
//!
//! Loads a fixed dataset of customer reviews, scores each one for sentiment once at startup,
//! and serves them over HTTP with location/date filtering. New reviews can be submitted as
//! url-encoded forms and are validated against the locations seen in the dataset.

pub mod config;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod models;
pub mod sentiment;
pub mod store;
pub mod utils;
pub mod validator;

#[cfg(feature = "server")]
pub mod api;
