//! Client for the portfolio backend that proxies GitHub data.

mod client;
mod types;

pub use client::{Backend, PortfolioApi};
pub use types::{RawPayload, RawProfile, RawRepo, SaveRequest};

#[cfg(test)]
pub use client::MockPortfolioApi;

/// Backend root used when neither `--api-url` nor `GHFOLIO_API_URL` is set.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
