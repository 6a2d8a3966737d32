use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::config::{self, PubgConfig, RefreshConfig};

#[derive(Parser, Clone, Debug)]
#[command(
    name = "kd-refresher",
    about = "Keeps the K/D of every rostered player up to date",
    long_about = "Looks up each player of the roster file on op.gg, stores their recent-match \
    K/D and writes the roster back"
)]
pub struct Args {
    /// Log filter: a level (trace, debug, info, warn, error) or
    /// `tracing_subscriber` directives such as `kd_refresher=debug`
    #[arg(
        short,
        long,
        global = true,
        env = "RUST_LOG",
        default_value = "info",
        help = "Sets the logging verbosity"
    )]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Command {
    /// Refresh the K/D of every player in the roster file
    Refresh(RefreshArgs),
    /// Print the raw lifetime stats of a player from the PUBG API
    Lookup(LookupArgs),
}

#[derive(clap::Args, Clone, Debug)]
pub struct RefreshArgs {
    /// Roster file to read and overwrite
    #[arg(short, long, env = "ROSTER_PATH", default_value = config::DEFAULT_ROSTER_PATH)]
    pub roster: PathBuf,

    /// Seconds to wait for a stats page before giving up on a player
    #[arg(long, default_value_t = config::DEFAULT_REQUEST_TIMEOUT.as_secs())]
    pub timeout_secs: u64,

    /// Pause after each lookup, in milliseconds
    #[arg(long, default_value_t = config::DEFAULT_REQUEST_DELAY.as_millis() as u64)]
    pub delay_ms: u64,

    /// Browser identification sent to the stats site
    #[arg(long, default_value = config::DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Stats page root; the player name is appended to it
    #[arg(long, env = "STATS_BASE_URL", default_value = config::DEFAULT_STATS_BASE_URL)]
    pub base_url: String,
}

impl From<RefreshArgs> for RefreshConfig {
    fn from(args: RefreshArgs) -> Self {
        Self {
            roster_path: args.roster,
            request_timeout: Duration::from_secs(args.timeout_secs),
            user_agent: args.user_agent,
            request_delay: Duration::from_millis(args.delay_ms),
            stats_base_url: args.base_url,
        }
    }
}

#[derive(clap::Args, Clone, Debug)]
pub struct LookupArgs {
    /// In-game nickname to look up
    pub nickname: String,

    /// PUBG developer API key
    #[arg(long, env = "PUBG_API_KEY", hide_env_values = true)]
    pub api_key: String,

    #[arg(long, default_value = config::DEFAULT_PUBG_API_ROOT)]
    pub api_root: String,

    /// Platform shard, e.g. steam, kakao, psn
    #[arg(long, default_value = config::DEFAULT_PUBG_SHARD)]
    pub shard: String,
}

impl From<LookupArgs> for PubgConfig {
    fn from(args: LookupArgs) -> Self {
        Self {
            api_key: args.api_key,
            api_root: args.api_root,
            shard: args.shard,
        }
    }
}
