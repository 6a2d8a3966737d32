use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ROSTER_PATH: &str = "dados/times.json";
pub const DEFAULT_STATS_BASE_URL: &str = "https://op.gg/pubg/user";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/115.0.0.0 Safari/537.36";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_secs(1);

pub const DEFAULT_PUBG_API_ROOT: &str = "https://api.pubg.com";
pub const DEFAULT_PUBG_SHARD: &str = "steam";

/// Settings for one refresh run.
///
/// The fetcher reads the network settings and the driver reads the roster
/// location and pacing. Nothing here changes once a run has started.
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// Roster file, read at the start of a run and overwritten at the end.
    pub roster_path: PathBuf,
    /// Upper bound on a single stats page request.
    pub request_timeout: Duration,
    /// Browser identification sent with every stats page request.
    pub user_agent: String,
    /// Pause after each player that was actually looked up.
    pub request_delay: Duration,
    /// Stats page root; the player name is appended as a path segment.
    pub stats_base_url: String,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            roster_path: PathBuf::from(DEFAULT_ROSTER_PATH),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_delay: DEFAULT_REQUEST_DELAY,
            stats_base_url: DEFAULT_STATS_BASE_URL.to_string(),
        }
    }
}

/// Credentials and endpoint for the PUBG developer API.
#[derive(Clone)]
pub struct PubgConfig {
    pub api_key: String,
    pub api_root: String,
    pub shard: String,
}

impl PubgConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_root: DEFAULT_PUBG_API_ROOT.to_string(),
            shard: DEFAULT_PUBG_SHARD.to_string(),
        }
    }
}

impl std::fmt::Debug for PubgConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PubgConfig")
            .field("api_key", &"<redacted>")
            .field("api_root", &self.api_root)
            .field("shard", &self.shard)
            .finish()
    }
}
