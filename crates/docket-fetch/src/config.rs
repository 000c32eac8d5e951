//! Endpoint and retry configuration for the fetcher.

use std::fmt;
use std::time::Duration;

/// Recorded entries page; the court number is appended to this stub.
pub const RECORDED_ENTRIES_URL: &str =
    "http://cas-ncr-nter03.cas-satj.gc.ca/IndexingQueries/infp_RE_info_e.php?court_no=";

/// Additional information page; the court number is appended to this stub.
pub const ADDITIONAL_INFO_URL: &str =
    "http://cas-ncr-nter03.cas-satj.gc.ca/IndexingQueries/infp_moreInfo_e.php?";

/// Total attempts per page, first request included.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// The docket serves Latin-1 pages, usually without a charset parameter.
pub const DEFAULT_CHARSET: &str = "ISO-8859-1";

/// The two docket pages fetched for every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    RecordedEntries,
    AdditionalInfo,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::RecordedEntries => f.write_str("recorded-entries"),
            Endpoint::AdditionalInfo => f.write_str("additional-info"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub recorded_entries_url: String,
    pub additional_info_url: String,
    /// Per-request timeout covering connect and body read.
    pub timeout: Duration,
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles for each later one.
    pub retry_backoff: Duration,
    /// Minimum spacing between the start of any two requests.
    pub min_request_interval: Duration,
    /// Used when the response does not declare a charset.
    pub charset: String,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            recorded_entries_url: RECORDED_ENTRIES_URL.to_string(),
            additional_info_url: ADDITIONAL_INFO_URL.to_string(),
            timeout: Duration::from_secs(30),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_backoff: Duration::from_millis(500),
            min_request_interval: Duration::from_millis(250),
            charset: DEFAULT_CHARSET.to_string(),
            user_agent: concat!("docket/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl FetchConfig {
    /// Full request URL for `case_id` on `endpoint`.
    pub fn url(&self, endpoint: Endpoint, case_id: &str) -> String {
        let stub = match endpoint {
            Endpoint::RecordedEntries => &self.recorded_entries_url,
            Endpoint::AdditionalInfo => &self.additional_info_url,
        };
        format!("{stub}{case_id}")
    }

    /// Delay before attempt number `attempt` (1-based). Zero for the first.
    pub fn backoff_before(&self, attempt: u32) -> Duration {
        if attempt <= 1 {
            return Duration::ZERO;
        }
        let factor = 2u32.saturating_pow(attempt - 2);
        self.retry_backoff.saturating_mul(factor)
    }
}
