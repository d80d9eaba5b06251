//! Webhook server command.

use crate::amazon::PaapiClient;
use crate::config::Config;
use crate::server::{self, AppState};
use anyhow::{Context, Result};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Runs the webhook relay.
pub struct ServeCommand {
    config: Config,
}

impl ServeCommand {
    /// Creates a new serve command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Binds the configured address and serves until Ctrl-C.
    pub async fn execute(&self) -> Result<()> {
        let addr = self.config.socket_addr();
        let listener =
            TcpListener::bind(addr).await.with_context(|| format!("Failed to bind {}", addr))?;

        self.execute_on(listener, server::shutdown_signal()).await
    }

    /// Serves on an already bound listener until `shutdown` resolves.
    pub async fn execute_on(
        &self,
        listener: TcpListener,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<()> {
        self.config.validate()?;

        let client = PaapiClient::new(&self.config).context("Failed to create HTTP client")?;
        let state = Arc::new(AppState::new(Arc::new(client), self.config.partner_tag.clone()));

        info!("Relaying GetItems for partner tag {}", self.config.partner_tag);
        server::serve(listener, state, shutdown).await.context("Server error")?;

        info!("Server stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_execute_rejects_missing_credentials() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let cmd = ServeCommand::new(Config::default());

        let err = cmd.execute_on(listener, async {}).await.unwrap_err();
        assert!(err.to_string().contains("Missing required configuration"));
    }

    #[tokio::test]
    async fn test_execute_stops_on_shutdown() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let config = Config {
            access_key_id: "AKIDEXAMPLE".to_string(),
            secret_key: "secret".to_string(),
            partner_tag: "tag-20".to_string(),
            ..Config::default()
        };

        let cmd = ServeCommand::new(config);
        assert!(cmd.execute_on(listener, async {}).await.is_ok());
    }
}
