//! Upstream boatrace site client
//!
//! Fetches raw HTML pages; extraction lives in `crate::scrape`.

use crate::config::ServerConfig;
use crate::scrape::{HtmlParser, RacerProfile};
use futures::future::join_all;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Race index page used for the graded race list
const RACE_INDEX_VENUE: &str = "24";

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("invalid racer id {0:?} (expected 4 digits)")]
    InvalidRacerId(String),
    #[error("upstream returned HTTP {status} for {url}")]
    Status { status: u16, url: String },
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Registration numbers are exactly four ASCII digits
pub fn is_valid_racer_id(id: &str) -> bool {
    id.len() == 4 && id.bytes().all(|b| b.is_ascii_digit())
}

#[derive(Clone)]
pub struct BoatraceClient {
    http: reqwest::Client,
    base_url: String,
}

impl BoatraceClient {
    pub fn new(config: &ServerConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: config.upstream_base_url.clone(),
        })
    }

    async fn get_text(&self, url: String) -> Result<String, FetchError> {
        tracing::debug!("GET {}", url);
        let resp = self.http.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url,
            });
        }
        Ok(resp.text().await?)
    }

    /// Racer season page (profile header plus upcoming schedule)
    pub async fn fetch_racer_page(&self, racer_id: &str) -> Result<String, FetchError> {
        if !is_valid_racer_id(racer_id) {
            return Err(FetchError::InvalidRacerId(racer_id.to_string()));
        }
        self.get_text(format!(
            "{}/owpc/pc/data/racersearch/season?toban={}",
            self.base_url, racer_id
        ))
        .await
    }

    /// Race index page listing current meets
    pub async fn fetch_race_index(&self) -> Result<String, FetchError> {
        self.get_text(format!(
            "{}/owpc/pc/race/index?jyo={}",
            self.base_url, RACE_INDEX_VENUE
        ))
        .await
    }

    /// Profiles for many racers, `batch_size` requests in flight at a time
    ///
    /// Batches run one after another. A racer whose page fails to load is
    /// logged and left out; the result keeps request order otherwise.
    pub async fn fetch_racer_profiles(
        &self,
        parser: &HtmlParser,
        racer_ids: &[String],
        batch_size: usize,
    ) -> Vec<RacerProfile> {
        let mut profiles = Vec::with_capacity(racer_ids.len());

        for (batch_no, batch) in racer_ids.chunks(batch_size.max(1)).enumerate() {
            tracing::debug!("Fetching racer batch {} ({} ids)", batch_no + 1, batch.len());

            let pages = join_all(batch.iter().map(|id| self.fetch_racer_page(id))).await;

            for (id, page) in batch.iter().zip(pages) {
                match page {
                    Ok(html) => {
                        let mut profile = parser.parse_racer_info(&html);
                        if profile.id.is_none() {
                            profile.id = Some(id.clone());
                        }
                        profiles.push(profile);
                    }
                    Err(e) => tracing::warn!("Skipping racer {}: {}", id, e),
                }
            }
        }

        profiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_racer_id_validation() {
        assert!(is_valid_racer_id("4444"));
        assert!(!is_valid_racer_id("444"));
        assert!(!is_valid_racer_id("44444"));
        assert!(!is_valid_racer_id("44a4"));
        assert!(!is_valid_racer_id("４４４４"));
    }

    #[tokio::test]
    async fn test_invalid_id_rejected_before_request() {
        let client = BoatraceClient::new(&ServerConfig::default()).unwrap();
        let err = client.fetch_racer_page("../etc").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidRacerId(_)));
    }

    #[tokio::test]
    async fn test_failed_profiles_are_skipped() {
        let client = BoatraceClient::new(&ServerConfig::default()).unwrap();
        let parser = HtmlParser::new().unwrap();
        // invalid ids fail without touching the network
        let ids = vec!["x".to_string(), "12".to_string(), "abcd".to_string()];
        let profiles = client.fetch_racer_profiles(&parser, &ids, 2).await;
        assert!(profiles.is_empty());
    }
}
