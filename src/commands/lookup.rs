//! One-shot GetItems lookup command.

use crate::amazon::normalizer::normalize_all;
use crate::amazon::{normalize_asin, PaapiClient, ProductApi};
use crate::config::Config;
use crate::format::Formatter;
use anyhow::{Context, Result};
use tracing::{info, warn};

/// Looks up ASINs once and prints normalized items.
pub struct LookupCommand {
    config: Config,
}

impl LookupCommand {
    /// Creates a new lookup command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Fetches the given ASINs and returns formatted output.
    pub async fn execute(&self, asins: &[String]) -> Result<String> {
        self.config.validate()?;
        let client = PaapiClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_client(&client, asins).await
    }

    /// Fetches with a provided client (for testing).
    pub async fn execute_with_client(
        &self,
        client: &impl ProductApi,
        asins: &[String],
    ) -> Result<String> {
        let mut item_ids = Vec::with_capacity(asins.len());
        for asin in asins {
            match normalize_asin(asin) {
                Some(asin) => item_ids.push(asin),
                None => anyhow::bail!(
                    "Invalid ASIN format: '{}'. ASIN should be 10 alphanumeric characters.",
                    asin.trim()
                ),
            }
        }

        info!("Looking up {} item(s)", item_ids.len());

        let response = client.get_items(&item_ids).await.context("GetItems request failed")?;
        for err in &response.errors {
            warn!("{}: {}", err.code, err.message);
        }

        let items = normalize_all(response.into_items(), &self.config.partner_tag);

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_items(&items))
    }
}
