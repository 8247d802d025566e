//! Synchronous client for the remote trade-data API.
//!
//! Two endpoints are consumed, both keyed by reporter/partner codes and a
//! year window:
//!
//! - `{base}/{reporter}/{partner}/{start}/{end}/tradeEvolution.json`
//! - `{base}/{reporter}/{partner}/{year}/{year}/treemap_HS2.json`
//!
//! Responses are untrusted: a non-2xx status or an undecodable body surfaces
//! as a [`FetchError`], which the coordinator downgrades to a per-chart
//! "no data" placeholder. Nothing is retried; the user retries by touching a
//! selector again.

use crate::models::{EvolutionPayload, TreemapPayload, YearRange};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use reqwest::StatusCode;
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

/// Default base URL of the trade-data API.
pub const DEFAULT_BASE_URL: &str = "https://trade.efta.int/efta/data";

/// Failures surfaced by the client, split along the error taxonomy the
/// coordinator cares about.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with a non-2xx status.
    #[error("request failed with HTTP {0}")]
    Status(StatusCode),
    /// The request never produced a response (DNS, connect, timeout, ...).
    #[error("network error: {0}")]
    Transport(#[source] reqwest::Error),
    /// The body arrived but was not the expected JSON shape.
    #[error("malformed response body: {0}")]
    Decode(#[source] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    http: HttpClient,
}

impl Default for Client {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

// Allow -, _, . unescaped in reporter/partner codes.
const SAFE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

fn enc_segment(code: &str) -> String {
    percent_encoding::utf8_percent_encode(code.trim(), SAFE).to_string()
}

impl Client {
    /// Build a client against an explicit base URL (trailing slash stripped).
    pub fn new(base_url: &str) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30)) // total request timeout
            .connect_timeout(Duration::from_secs(10)) // connect timeout
            .redirect(Policy::limited(5)) // cap redirects
            .user_agent(concat!("tradeflow_rs/", env!("CARGO_PKG_VERSION"))) // set user agent
            .build()
            .expect("reqwest client build");
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    /// Fetch the yearly export/import evolution for `range`.
    ///
    /// ### Arguments
    /// - `reporter` / `partner`: economy codes (`"CHE"`, `"EU27"`, ...),
    ///   percent-encoded into the URL path.
    /// - `range`: inclusive year window, normally `Selection::range()`.
    ///
    /// ### Errors
    /// [`FetchError`] on transport failure, non-2xx status, or a body that
    /// is not JSON. A well-formed body without a `records` key decodes to an
    /// empty payload instead of an error.
    pub fn fetch_trade_evolution(
        &self,
        reporter: &str,
        partner: &str,
        range: YearRange,
    ) -> Result<EvolutionPayload, FetchError> {
        let url = format!(
            "{}/{}/{}/{}/{}/tradeEvolution.json",
            self.base_url,
            enc_segment(reporter),
            enc_segment(partner),
            range.start,
            range.end
        );
        self.get_json(&url)
    }

    /// Fetch the HS2 goods composition treemap for a single year.
    pub fn fetch_goods_treemap(
        &self,
        reporter: &str,
        partner: &str,
        year: i32,
    ) -> Result<TreemapPayload, FetchError> {
        let url = format!(
            "{}/{}/{}/{}/{}/treemap_HS2.json",
            self.base_url,
            enc_segment(reporter),
            enc_segment(partner),
            year,
            year
        );
        self.get_json(&url)
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let resp = self.http.get(url).send().map_err(FetchError::Transport)?;
        if !resp.status().is_success() {
            return Err(FetchError::Status(resp.status()));
        }
        resp.json().map_err(FetchError::Decode)
    }
}
