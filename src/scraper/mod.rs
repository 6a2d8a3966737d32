pub(crate) mod kd;
pub(crate) mod pubg;

pub(crate) use ::scraper::Html;
use ::scraper::ElementRef;
use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{KdError, Result};

/// Send `request` and return the body of a successful response.
async fn send(request: reqwest::RequestBuilder, url: &str) -> Result<String> {
    debug!(url, "fetching page");

    let response = request.send().await.map_err(|e| KdError::Http {
        url: url.to_owned(),
        source: e,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(KdError::UnexpectedStatus {
            url: url.to_owned(),
            status,
        });
    }

    response.text().await.map_err(|e| KdError::ResponseBody {
        url: url.to_owned(),
        source: e,
    })
}

/// Fetch a URL and parse the response body as an HTML document.
pub(crate) async fn get_document(client: &reqwest::Client, url: &Url) -> Result<Html> {
    let body = send(client.get(url.clone()), url.as_str()).await?;
    Ok(Html::parse_document(&body))
}

/// Send a prepared request and decode the response body as JSON.
pub(crate) async fn get_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
    url: &Url,
) -> Result<T> {
    let body = send(request, url.as_str()).await?;
    serde_json::from_str(&body).map_err(|e| KdError::Json {
        url: url.to_string(),
        source: e,
    })
}

/// Trimmed text content of `element`, with line breaks and tabs removed.
pub(crate) fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .collect::<String>()
        .trim()
        .replace(['\n', '\t'], "")
}

/// Append `segments` to `base` as escaped path segments.
pub(crate) fn join_path(base: &str, segments: &[&str]) -> Result<Url> {
    let invalid = || KdError::InvalidUrl {
        url: base.to_owned(),
    };
    let mut url = Url::parse(base).map_err(|_| invalid())?;
    url.path_segments_mut()
        .map_err(|_| invalid())?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
