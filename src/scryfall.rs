//! Scryfall API client for set metadata and booster card searches.
//!
//! Uses async reqwest. Scryfall asks for 50-100ms between requests, so all
//! multi-request call sites pace themselves with [`REQUEST_PACING`]; a 429
//! response is retried up to [`MAX_ATTEMPTS`] times after a one second pause,
//! and a 404 is a definitive empty result, not a failure.

use crate::error::{AuditError, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tokio::time::sleep;

/// Production API base URL. Tests point the client at a local mock server.
pub const SCRYFALL_API: &str = "https://api.scryfall.com";

const USER_AGENT: &str = "BoosterAudit/1.0";

/// Attempts per request before giving up on rate limiting.
const MAX_ATTEMPTS: u32 = 3;

/// Pause after a 429 before retrying.
const RATE_LIMIT_PAUSE: Duration = Duration::from_secs(1);

/// Fixed delay between successive requests.
pub const REQUEST_PACING: Duration = Duration::from_millis(100);

/// Socket timeout for plain URL reachability checks.
const HEAD_TIMEOUT: Duration = Duration::from_secs(10);

/// One printing of a card, as returned by the search endpoint.
#[derive(Debug, Deserialize, Clone)]
pub struct ScryfallCard {
    pub collector_number: String,
    pub name: String,
    pub rarity: String,
    #[serde(default)]
    pub promo_types: Vec<String>,
    #[serde(default)]
    pub frame_effects: Vec<String>,
}

/// One page of search results.
#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    data: Vec<ScryfallCard>,
    #[serde(default)]
    has_more: bool,
    #[serde(default)]
    next_page: Option<String>,
}

/// Set metadata, only the field the card-count cross-check needs.
#[derive(Debug, Deserialize, Clone)]
pub struct ScryfallSet {
    pub card_count: u32,
}

/// Outcome of a URL reachability check. `status` is 0 on network failure or
/// timeout.
#[derive(Debug, Clone, Copy)]
pub struct UrlCheck {
    pub status: u16,
    pub ok: bool,
}

pub struct ScryfallClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for ScryfallClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ScryfallClient {
    pub fn new() -> Self {
        Self::with_base_url(SCRYFALL_API)
    }

    /// Client against an alternative base URL (used by tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// GET a JSON resource with bounded retry on rate limiting.
    ///
    /// `Ok(None)` means the resource definitively does not exist (404); any
    /// other non-success status is an error for the caller to record.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<Option<T>> {
        for attempt in 1..=MAX_ATTEMPTS {
            log::debug!("GET {} (attempt {})", url, attempt);
            let response = self
                .client
                .get(url)
                .header("User-Agent", USER_AGENT)
                .send()
                .await?;

            let status = response.status();
            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                log::warn!("Rate limited on {}, pausing before retry", url);
                sleep(RATE_LIMIT_PAUSE).await;
                continue;
            }
            if status == reqwest::StatusCode::NOT_FOUND {
                return Ok(None);
            }
            if !status.is_success() {
                return Err(AuditError::HttpStatus(status));
            }
            return Ok(Some(response.json::<T>().await?));
        }
        Err(AuditError::RetriesExhausted(url.to_string()))
    }

    /// Fetch set metadata by set code. `None` if Scryfall doesn't know the
    /// set.
    pub async fn fetch_set(&self, set_code: &str) -> Result<Option<ScryfallSet>> {
        let url = format!("{}/sets/{}", self.base_url, set_code.to_lowercase());
        self.get_json(&url).await
    }

    /// Fetch every booster-flagged printing for a set, following pagination.
    ///
    /// Filtered to English and one canonical entry per printing
    /// (`unique=prints`). An unknown set yields an empty list.
    pub async fn fetch_booster_cards(&self, set_code: &str) -> Result<Vec<ScryfallCard>> {
        let query = format!("set:{} booster:true lang:en", set_code.to_lowercase());
        let url = format!(
            "{}/cards/search?q={}&unique=prints",
            self.base_url,
            urlencoding::encode(&query)
        );

        let Some(mut page) = self.get_json::<SearchPage>(&url).await? else {
            return Ok(Vec::new());
        };

        let mut cards = page.data;
        while page.has_more {
            let Some(next) = page.next_page else { break };
            sleep(REQUEST_PACING).await;
            match self.get_json::<SearchPage>(&next).await? {
                Some(next_page) => {
                    page = next_page;
                    cards.extend(page.data.drain(..));
                }
                None => break,
            }
        }

        log::debug!("Fetched {} booster cards for set {}", cards.len(), set_code);
        Ok(cards)
    }

    /// HEAD a provenance URL and report reachability. Never errors; network
    /// failure and timeout both come back as unreachable with status 0.
    pub async fn check_url(&self, url: &str) -> UrlCheck {
        let result = self
            .client
            .head(url)
            .header("User-Agent", USER_AGENT)
            .timeout(HEAD_TIMEOUT)
            .send()
            .await;

        match result {
            Ok(response) => {
                let status = response.status().as_u16();
                UrlCheck {
                    status,
                    ok: (200..400).contains(&status),
                }
            }
            Err(e) => {
                log::debug!("HEAD {} failed: {}", url, e);
                UrlCheck { status: 0, ok: false }
            }
        }
    }
}

#[cfg(test)]
#[path = "scryfall_tests.rs"]
mod tests;
