//! Thin JSON client over reqwest with status classification.

use anyhow::{Context, Result};
use log::debug;
use reqwest::{Client, Url};
use serde::Serialize;
use serde_json::Value;

use super::status::{InvalidBody, check_status};

/// HTTP client used for every backend call.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a new HTTP client wrapping the given reqwest Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Performs a GET request and returns the JSON body as an untyped value.
    ///
    /// Non-2xx responses come back as [`super::StatusFailure`], bodies that
    /// are not JSON as [`InvalidBody`].
    #[tracing::instrument(skip(self))]
    pub async fn get_json(&self, url: Url) -> Result<Value> {
        debug!("GET JSON from {}...", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to send request")?;

        let response = response.error_for_status().map_err(check_status)?;

        let bytes = response
            .bytes()
            .await
            .context("Failed to read response body")?;

        let value = serde_json::from_slice::<Value>(&bytes)
            .map_err(|e| anyhow::Error::from(InvalidBody(e.to_string())))?;

        Ok(value)
    }

    /// Performs a POST request with a JSON body. The response body is ignored.
    #[tracing::instrument(skip(self, body))]
    pub async fn post_json<B: Serialize + ?Sized>(&self, url: Url, body: &B) -> Result<()> {
        debug!("POST JSON to {}...", url);

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .context("Failed to send request")?;

        response.error_for_status().map_err(check_status)?;

        Ok(())
    }
}
