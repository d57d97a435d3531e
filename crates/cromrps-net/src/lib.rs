//! # CromRPS Net
//!
//! Fetches a page with a single blocking HTTP GET.
//!
//! Every request carries the same fixed header set (a browser-like user agent
//! and a cookie-consent cookie). Only status 200 counts as success; there is
//! no retry and no caching.

use std::error::Error as StdError;

use cromrps_core::{BrowserConfig, CromError};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use reqwest::redirect::Policy;
use reqwest::StatusCode;
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

/// Errors that can occur while fetching a page.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("Request failed: {}", describe(.0))]
    Transport(#[from] reqwest::Error),

    #[error("Client setup failed: {0}")]
    Client(String),
}

/// Joins an error and its sources, so "error sending request" also says why.
fn describe(err: &dyn StdError) -> String {
    let mut description = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        description.push_str(": ");
        description.push_str(&cause.to_string());
        source = cause.source();
    }
    description
}

impl From<FetchError> for CromError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Status(status) => CromError::http(status),
            other => CromError::transport(other.to_string()),
        }
    }
}

/// Something that turns an address into page markup.
pub trait Fetcher {
    fn fetch(&self, address: &str) -> Result<String, FetchError>;
}

impl<F> Fetcher for F
where
    F: Fn(&str) -> Result<String, FetchError>,
{
    fn fetch(&self, address: &str) -> Result<String, FetchError> {
        self(address)
    }
}

/// Fetcher backed by a blocking HTTP client.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher sending the configured user agent and cookie.
    pub fn new(config: &BrowserConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        let cookie = HeaderValue::from_str(&config.cookie)
            .map_err(|e| FetchError::Client(format!("invalid cookie: {}", e)))?;
        headers.insert(COOKIE, cookie);

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .redirect(Policy::limited(config.max_redirects))
            .build()
            .map_err(|e| FetchError::Client(describe(&e)))?;

        debug!(user_agent = %config.user_agent, "HttpFetcher initialized");

        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, address: &str) -> Result<String, FetchError> {
        let url = Url::parse(address)?;
        info!(url = %url, "Fetching page content");

        let response = self.client.get(url).send()?;
        let status = response.status();
        if status != StatusCode::OK {
            warn!(url = %address, status = status.as_u16(), "Fetch did not return 200");
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text()?;
        info!(url = %address, bytes = body.len(), "HTML content fetched successfully");
        Ok(body)
    }
}
