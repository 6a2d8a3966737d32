use serde_json::Value;
use tracing::{instrument, warn};

use crate::config::{PubgConfig, RefreshConfig};
use crate::error::{KdError, Result};
use crate::fetcher::StatFetcher;
use crate::scraper;

/// Reads K/D values from op.gg player pages.
///
/// `OpGgClient` wraps a [`reqwest::Client`] that identifies itself with the
/// configured browser user agent and gives up after the configured timeout.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> kd_refresher::Result<()> {
/// use kd_refresher::{OpGgClient, RefreshConfig, StatFetcher};
///
/// let client = OpGgClient::from_config(&RefreshConfig::default())?;
/// let kd = client.fetch_kd("chocoTaco").await?;
/// println!("K/D: {kd}");
/// # Ok(())
/// # }
/// ```
pub struct OpGgClient {
    http: reqwest::Client,
    base_url: String,
}

impl OpGgClient {
    /// Create a client from the network settings of `config`.
    pub fn from_config(config: &RefreshConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.request_timeout)
            .build()
            .map_err(KdError::ClientBuild)?;
        Ok(Self::with_client(http, &config.stats_base_url))
    }

    /// Create a client using the provided [`reqwest::Client`].
    ///
    /// Use this when you need to configure proxies, extra headers, etc.
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            http: client,
            base_url: base_url.to_owned(),
        }
    }
}

impl StatFetcher for OpGgClient {
    async fn fetch_kd(&self, player: &str) -> Result<f64> {
        scraper::kd::get_kd(&self.http, &self.base_url, player)
            .await
            .inspect_err(|e| warn!(player, error = %e, "could not fetch K/D"))
    }
}

/// Client for the PUBG developer API.
pub struct PubgClient {
    http: reqwest::Client,
    config: PubgConfig,
}

impl PubgClient {
    pub fn new(config: PubgConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: PubgConfig) -> Self {
        Self {
            http: client,
            config,
        }
    }

    /// Resolve a nickname to its account id.
    #[instrument(skip(self))]
    pub async fn get_account_id(&self, nickname: &str) -> Result<String> {
        scraper::pubg::get_account_id(&self.http, &self.config, nickname).await
    }

    /// Fetch the raw lifetime season stats document of an account.
    #[instrument(skip(self))]
    pub async fn get_lifetime_stats(&self, account_id: &str) -> Result<Value> {
        scraper::pubg::get_lifetime_stats(&self.http, &self.config, account_id).await
    }

    /// Look up a nickname and return its lifetime stats.
    pub async fn lookup(&self, nickname: &str) -> Result<Value> {
        let nickname = nickname.trim();
        if nickname.is_empty() {
            return Err(KdError::PlayerNotFound {
                nickname: nickname.to_owned(),
            });
        }
        let account_id = self.get_account_id(nickname).await?;
        self.get_lifetime_stats(&account_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lookup_rejects_blank_nickname() {
        // Unroutable root: the test fails loudly if a request is attempted.
        let mut config = PubgConfig::new("key");
        config.api_root = "http://127.0.0.1:9".to_string();
        let client = PubgClient::new(config);

        assert!(matches!(
            client.lookup("   ").await,
            Err(KdError::PlayerNotFound { nickname }) if nickname.is_empty()
        ));
    }
}
