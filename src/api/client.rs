use log::debug;
use std::time::Duration;

use super::error::ApiError;
use crate::common::constants::{HTTP_TIMEOUT_SECS, USER_AGENT};
use crate::settings::ApiSettings;

pub(crate) fn build_http_client(
    timeout: Duration,
    user_agent: &str,
) -> Result<reqwest::blocking::Client, ApiError> {
    reqwest::blocking::Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()
        .map_err(ApiError::ClientBuild)
}

/// Entry point for every query and mutation against the blog API.
///
/// Holds one HTTP client that all calls share, including the concurrent
/// lookups of a fan-out. Nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct QueryClient {
    pub(crate) http: reqwest::blocking::Client,
    pub(crate) base_url: String,
}

impl QueryClient {
    /// Client against `base_url` with the default timeout and user agent
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_options(
            base_url,
            Duration::from_secs(HTTP_TIMEOUT_SECS),
            USER_AGENT,
        )
    }

    pub fn with_options(
        base_url: &str,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, ApiError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        debug!(
            "Creating query client for {} (timeout {:?})",
            base_url, timeout
        );
        Ok(Self {
            http: build_http_client(timeout, user_agent)?,
            base_url,
        })
    }

    pub fn from_settings(settings: &ApiSettings) -> Result<Self, ApiError> {
        Self::with_options(
            &settings.base_url,
            Duration::from_secs(settings.timeout_secs),
            &settings.user_agent,
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
