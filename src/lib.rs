pub use client::{OpGgClient, PubgClient};
pub use config::{PubgConfig, RefreshConfig};
pub use error::{KdError, Result};
pub use fetcher::StatFetcher;
pub use model::*;
pub use refresh::Refresher;
pub use store::{load_roster, save_roster};

pub mod args;
mod client;
pub mod config;
mod error;
mod fetcher;
mod model;
mod refresh;
mod scraper;
mod store;
