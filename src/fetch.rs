/*
 *  fetch.rs
 *
 *  InkList - the to-do list on the fridge door
 *
 *  HTTP collaborators: the to-do service and the quote-of-the-day feed.
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use std::time::Duration;

use log::info;
use reqwest::{header, Client};
use serde::Deserialize;
use thiserror::Error;

use crate::constants::{QUOTE_API_URL, TODO_API_URL};

const USER_AGENT: &str = concat!("InkList v", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("quote feed returned an empty list")]
    EmptyQuoteFeed,
}

/// One entry of the quote feed; the rest of its fields are ignored.
#[derive(Debug, Deserialize)]
struct QuoteEntry {
    q: String,
}

/// One client for the whole run.
pub fn build_client() -> Result<Client, FetchError> {
    let mut headers = header::HeaderMap::new();
    headers.insert("User-Agent", header::HeaderValue::from_static(USER_AGENT));
    headers.insert("Accept", header::HeaderValue::from_static("application/json"));

    let client = Client::builder()
        .connect_timeout(Duration::from_secs(5))
        .timeout(Duration::from_secs(10))
        .default_headers(headers)
        .build()?;
    Ok(client)
}

/// Fetch the raw to-do payload.
///
/// The body comes back undecoded: parsing happens later so that a malformed
/// payload can degrade to an empty list instead of aborting the run, while
/// a transport failure here does abort it.
pub async fn fetch_todos(client: &Client) -> Result<String, FetchError> {
    info!("Fetching to-dos from {}", TODO_API_URL);
    let body = client
        .get(TODO_API_URL)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    Ok(body)
}

/// Fetch today's quote: first element of the feed, `q` field.
pub async fn fetch_quote(client: &Client) -> Result<String, FetchError> {
    info!("Fetching quote of the day from {}", QUOTE_API_URL);
    let entries: Vec<QuoteEntry> = client
        .get(QUOTE_API_URL)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    entries
        .into_iter()
        .next()
        .map(|entry| entry.q)
        .ok_or(FetchError::EmptyQuoteFeed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_feed_shape_decodes_first_q() {
        let body = r#"[
            {"q": "The secret of getting ahead is getting started.", "a": "Mark Twain", "h": "<blockquote>..."},
            {"q": "Second entry", "a": "Nobody"}
        ]"#;
        let entries: Vec<QuoteEntry> = serde_json::from_str(body).unwrap();
        assert_eq!(entries[0].q, "The secret of getting ahead is getting started.");
    }

    #[test]
    fn client_builds_with_fixed_headers() {
        assert!(build_client().is_ok());
    }
}
