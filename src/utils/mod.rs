pub mod query_string;
