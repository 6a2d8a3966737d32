use ::scraper::Selector;
use tracing::{debug, instrument};

use crate::error::{KdError, Result};
use crate::scraper::{self, element_text, Html};

/// The "good" recent-matches stat box holding the K/D on a player page.
const KD_SELECTOR: &str = "div.recent-matches__stat-value.recent-matches__stat-value--good";

#[instrument(skip(client, base_url))]
pub(crate) async fn get_kd(client: &reqwest::Client, base_url: &str, player: &str) -> Result<f64> {
    let url = scraper::join_path(base_url, &[player])?;
    let document = scraper::get_document(client, &url).await?;
    let kd = parse_kd(&document)?;
    debug!(player, kd, "parsed K/D");
    Ok(kd)
}

pub(crate) fn parse_kd(document: &Html) -> Result<f64> {
    let selector = Selector::parse(KD_SELECTOR)?;
    let element = document
        .select(&selector)
        .next()
        .ok_or(KdError::ElementNotFound {
            context: "recent matches K/D",
        })?;
    parse_stat(&element_text(&element))
}

/// Parse a stat written with either decimal separator, e.g. `"12,5"`.
pub(crate) fn parse_stat(text: &str) -> Result<f64> {
    let value: f64 = text
        .trim()
        .replace(',', ".")
        .parse()
        .map_err(|e| KdError::StatParse {
            text: text.to_owned(),
            source: e,
        })?;
    if !value.is_finite() || value < 0.0 {
        return Err(KdError::InvalidStat { value });
    }
    Ok(value)
}
