//! Fetch layer: HTTP retrieval of docket pages with transient-failure retry.

pub mod config;
pub mod http;

pub use config::{Endpoint, FetchConfig};
pub use http::{FetchError, Fetcher, RawPage};

/// Anything that can produce the raw page for a case identifier.
///
/// [`Fetcher`] is the network implementation; batch drivers are generic over
/// this trait so they can run against canned pages.
#[allow(async_fn_in_trait)]
pub trait PageSource {
    async fn fetch_page(&self, endpoint: Endpoint, case_id: &str) -> Result<RawPage, FetchError>;
}

impl PageSource for Fetcher {
    async fn fetch_page(&self, endpoint: Endpoint, case_id: &str) -> Result<RawPage, FetchError> {
        self.fetch(endpoint, case_id).await
    }
}
