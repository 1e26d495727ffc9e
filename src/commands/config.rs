use anyhow::Result;
use log::debug;
use reqwest::Client;
use std::sync::Arc;

use crate::{
    backend::{Backend, DEFAULT_API_URL, PortfolioApi},
    orchestrator::FetchOptions,
    runtime::Runtime,
};

/// Everything a command needs, resolved once at start.
pub struct Config<R: Runtime> {
    pub runtime: R,
    pub api: Arc<dyn PortfolioApi>,
    pub fetch: FetchOptions,
}

impl<R: Runtime> Config<R> {
    pub fn new(runtime: R, api_url: Option<String>, fetch: FetchOptions) -> Result<Self> {
        let api_url = api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let client = Client::builder().user_agent("ghfolio-cli").build()?;

        let backend = Backend::new(client, &api_url)?;
        debug!("Using portfolio backend at {}", backend.api_url());

        Ok(Self {
            runtime,
            api: Arc::new(backend),
            fetch,
        })
    }
}
