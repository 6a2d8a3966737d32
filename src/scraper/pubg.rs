use reqwest::header::ACCEPT;
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::PubgConfig;
use crate::error::{KdError, Result};
use crate::scraper;

const API_MEDIA_TYPE: &str = "application/vnd.api+json";

#[derive(Debug, Deserialize)]
struct PlayersResponse {
    #[serde(default)]
    data: Vec<PlayerResource>,
}

#[derive(Debug, Deserialize)]
struct PlayerResource {
    id: String,
}

fn authorized(client: &reqwest::Client, config: &PubgConfig, url: &Url) -> reqwest::RequestBuilder {
    client
        .get(url.clone())
        .bearer_auth(&config.api_key)
        .header(ACCEPT, API_MEDIA_TYPE)
}

fn shard_url(config: &PubgConfig, segments: &[&str]) -> Result<Url> {
    let mut path = vec!["shards", config.shard.as_str()];
    path.extend_from_slice(segments);
    scraper::join_path(&config.api_root, &path)
}

pub(crate) fn players_url(config: &PubgConfig, nickname: &str) -> Result<Url> {
    let mut url = shard_url(config, &["players"])?;
    url.query_pairs_mut()
        .append_pair("filter[playerNames]", nickname);
    Ok(url)
}

pub(crate) fn lifetime_url(config: &PubgConfig, account_id: &str) -> Result<Url> {
    shard_url(config, &["players", account_id, "seasons", "lifetime"])
}

#[instrument(skip(client, config))]
pub(crate) async fn get_account_id(
    client: &reqwest::Client,
    config: &PubgConfig,
    nickname: &str,
) -> Result<String> {
    let url = players_url(config, nickname)?;
    let response: PlayersResponse = scraper::get_json(authorized(client, config, &url), &url).await?;
    let id = first_account_id(response, nickname)?;
    debug!(nickname, id = %id, "resolved account id");
    Ok(id)
}

fn first_account_id(response: PlayersResponse, nickname: &str) -> Result<String> {
    response
        .data
        .into_iter()
        .next()
        .map(|player| player.id)
        .ok_or_else(|| KdError::PlayerNotFound {
            nickname: nickname.to_owned(),
        })
}

#[instrument(skip(client, config))]
pub(crate) async fn get_lifetime_stats(
    client: &reqwest::Client,
    config: &PubgConfig,
    account_id: &str,
) -> Result<Value> {
    let url = lifetime_url(config, account_id)?;
    scraper::get_json(authorized(client, config, &url), &url).await
}
