//! HTTP fetcher for docket pages.
//!
//! Under load the docket site answers `200 OK` with an error page saying it
//! got no response from the application web server. That page is detected
//! from the body and retried; transport failures are returned as-is.

use reqwest::header::CONTENT_TYPE;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep, sleep_until};
use tracing::{debug, info, warn};

use crate::config::{Endpoint, FetchConfig};

/// Lower-cased marker of the site's transient failure page.
pub const TRANSIENT_FAILURE_PHRASE: &str = "no response from the application web server";

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP client setup failed: {0}")]
    Client(#[source] reqwest::Error),
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("{url}: server reported no response in {attempts} attempt(s)")]
    ExhaustedRetries {
        url: String,
        attempts: u32,
        /// Body of the final transient-failure page, for diagnostics.
        last_body: String,
    },
}

/// A successfully retrieved page.
#[derive(Debug, Clone)]
pub struct RawPage {
    pub url: String,
    /// Decoded page text.
    pub body: String,
    /// Charset the body was decoded from.
    pub encoding: String,
    /// Requests made, including retries.
    pub attempts: u32,
}

/// Outcome of a single request that reached the server.
#[derive(Debug)]
enum Attempt {
    Page { body: String, encoding: String },
    Transient { body: String },
}

pub struct Fetcher {
    client: reqwest::Client,
    config: FetchConfig,
    last_request: Mutex<Option<Instant>>,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self {
            client,
            config,
            last_request: Mutex::new(None),
        })
    }

    /// Fetch the `endpoint` page for `case_id`.
    ///
    /// Retries while the server returns its transient failure page, up to
    /// `max_attempts` requests in total with exponential backoff between
    /// them. Network errors are not retried.
    pub async fn fetch(&self, endpoint: Endpoint, case_id: &str) -> Result<RawPage, FetchError> {
        let url = self.config.url(endpoint, case_id);
        let max_attempts = self.config.max_attempts.max(1);
        let mut last_body = String::new();

        for attempt in 1..=max_attempts {
            let delay = self.config.backoff_before(attempt);
            if !delay.is_zero() {
                sleep(delay).await;
            }

            match self.attempt(&url).await? {
                Attempt::Page { body, encoding } => {
                    info!(%endpoint, case_id, attempt, bytes = body.len(), "fetched page");
                    return Ok(RawPage {
                        url,
                        body,
                        encoding,
                        attempts: attempt,
                    });
                }
                Attempt::Transient { body } => {
                    warn!(
                        %endpoint,
                        case_id,
                        attempt,
                        max_attempts,
                        "server reported no response"
                    );
                    last_body = body;
                }
            }
        }

        Err(FetchError::ExhaustedRetries {
            url,
            attempts: max_attempts,
            last_body,
        })
    }

    async fn attempt(&self, url: &str) -> Result<Attempt, FetchError> {
        self.pace().await;
        debug!(url, "GET");

        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            warn!(url, status = status.as_u16(), "non-success status");
        }

        let encoding = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(charset_param)
            .filter(|label| is_known_charset(label))
            .unwrap_or(self.config.charset.as_str())
            .to_string();
        let body = resp.text_with_charset(&encoding).await?;

        if is_transient_failure(&body) {
            Ok(Attempt::Transient { body })
        } else {
            Ok(Attempt::Page { body, encoding })
        }
    }

    /// Wait until `min_request_interval` has passed since the previous request.
    async fn pace(&self) {
        let interval = self.config.min_request_interval;
        if interval.is_zero() {
            return;
        }
        // Held across the sleep so concurrent callers queue up.
        let mut last = self.last_request.lock().await;
        if let Some(prev) = *last {
            sleep_until(prev + interval).await;
        }
        *last = Some(Instant::now());
    }
}

/// Case-insensitive check for the site's transient failure page.
pub fn is_transient_failure(body: &str) -> bool {
    body.to_lowercase().contains(TRANSIENT_FAILURE_PHRASE)
}

/// Whether the decoder recognises `label`; unknown labels would otherwise
/// decode as UTF-8.
fn is_known_charset(label: &str) -> bool {
    let known = encoding_rs::Encoding::for_label(label.as_bytes()).is_some();
    if !known {
        warn!(label, "unrecognised charset in Content-Type; using configured charset");
    }
    known
}

/// `charset` parameter of a Content-Type value, if any.
fn charset_param(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches('"'))
            .filter(|v| !v.is_empty())
    })
}
