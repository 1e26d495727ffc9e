//! HTTP client module with response classification.

mod client;
mod status;

pub use client::HttpClient;
pub use status::{InvalidBody, StatusFailure, check_status, classify_error};
