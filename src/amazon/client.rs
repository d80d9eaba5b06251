//! Signed HTTP client for the Product Advertising API.

use crate::amazon::constants::{get_items, marketplace};
use crate::amazon::models::{GetItemsRequest, GetItemsResponse};
use crate::amazon::signer::{self, SignableRequest, SigningCredentials};
use crate::config::Config;
use crate::error::RelayError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info, warn};
use wreq::Client;

/// Trait for GetItems lookups - enables mocking for tests.
#[async_trait]
pub trait ProductApi: Send + Sync {
    /// Looks up `item_ids` in a single GetItems call.
    async fn get_items(&self, item_ids: &[String]) -> Result<GetItemsResponse, RelayError>;
}

/// PA-API client that signs every request.
pub struct PaapiClient {
    client: Client,
    credentials: SigningCredentials,
    base_url: Option<String>,
}

impl PaapiClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(config, config.endpoint.clone())
    }

    /// Creates a new client with an optional custom base URL (for testing).
    pub fn with_base_url(config: &Config, base_url: Option<String>) -> Result<Self> {
        let mut builder = Client::builder()
            .gzip(true)
            .brotli(true)
            .timeout(config.timeout())
            .connect_timeout(std::time::Duration::from_secs(10));

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self { client, credentials: config.credentials(), base_url })
    }

    /// Returns the base URL (custom for testing, or the marketplace host for production).
    fn base_url(&self) -> String {
        self.base_url.clone().unwrap_or_else(|| format!("https://{}", marketplace::HOST))
    }

    /// Returns the partner tag requests are made for.
    pub fn partner_tag(&self) -> &str {
        &self.credentials.partner_tag
    }
}

#[async_trait]
impl ProductApi for PaapiClient {
    async fn get_items(&self, item_ids: &[String]) -> Result<GetItemsResponse, RelayError> {
        let payload = serde_json::to_string(&GetItemsRequest::new(
            self.credentials.partner_tag.clone(),
            item_ids.to_vec(),
        ))
        .map_err(RelayError::Encode)?;

        let request = SignableRequest::get_items(payload.as_bytes(), marketplace::HOST);
        let signature = signer::sign(&request, &self.credentials, Utc::now())?;

        let url = format!("{}{}", self.base_url(), get_items::PATH);
        info!("Fetching {} item(s)", item_ids.len());
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", get_items::CONTENT_TYPE)
            .header("Content-Encoding", get_items::CONTENT_ENCODING)
            .header("X-Amz-Date", signature.amz_date.as_str())
            .header("X-Amz-Target", get_items::TARGET)
            .header("Authorization", signature.authorization_header.as_str())
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        debug!("Response status: {}", status);

        let body = response.text().await?;

        if !status.is_success() {
            warn!("GetItems failed with status {}: {}", status, body);
            return Err(RelayError::UpstreamStatus { status: status.as_u16(), body });
        }

        let parsed: GetItemsResponse = serde_json::from_str(&body).map_err(RelayError::Decode)?;

        if !parsed.errors.is_empty() {
            warn!("GetItems returned {} error(s)", parsed.errors.len());
        }
        debug!("GetItems returned {} item(s)", parsed.count());

        Ok(parsed)
    }
}
