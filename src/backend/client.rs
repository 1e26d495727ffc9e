use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Url};
use serde_json::Value;

use super::types::SaveRequest;
use crate::http::HttpClient;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PortfolioApi: Send + Sync {
    /// Fetches the raw profile + repository payload for a handle.
    async fn fetch_user(&self, handle: &str) -> Result<Value>;

    /// Stores a raw payload as the portfolio snapshot for a handle.
    async fn save_portfolio(&self, handle: &str, data: &Value) -> Result<()>;
}

pub struct Backend {
    http: HttpClient,
    api_url: Url,
}

impl Backend {
    #[tracing::instrument(skip(client))]
    pub fn new(client: Client, api_url: &str) -> Result<Self> {
        let api_url = Url::parse(api_url)
            .with_context(|| format!("Invalid backend URL: {}", api_url))?;
        if api_url.cannot_be_a_base() {
            anyhow::bail!("Backend URL cannot be used as a base: {}", api_url);
        }
        Ok(Self {
            http: HttpClient::new(client),
            api_url,
        })
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// Joins `segments` under `{api_url}/api/v1`, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("Backend URL cannot be used as a base: {}", self.api_url))?
            .pop_if_empty()
            .extend(["api", "v1"])
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl PortfolioApi for Backend {
    #[tracing::instrument(skip(self))]
    async fn fetch_user(&self, handle: &str) -> Result<Value> {
        let url = self.endpoint(&["github", handle])?;
        debug!("Fetching portfolio data for {} from {}...", handle, url);
        self.http.get_json(url).await
    }

    #[tracing::instrument(skip(self, data))]
    async fn save_portfolio(&self, handle: &str, data: &Value) -> Result<()> {
        let url = self.endpoint(&["portfolio"])?;
        debug!("Saving portfolio snapshot for {} to {}...", handle, url);
        let body = SaveRequest {
            github_username: handle,
            data,
        };
        self.http.post_json(url, &body).await
    }
}
