//! HTTP client for the province/district/ward lookup providers.
//!
//! Every level is served by two endpoint families. A lookup asks the primary
//! family, then the fallback exactly once, then gives up with an empty list.
//! Failures are logged and never returned to callers.

use std::time::Duration;

use cementlife_core::{
    RegionEndpointsConfig, RegionEntry, RegionId, RegionLevel, RegionList, RegionLookup,
    RegionSource,
};
use reqwest::{Client, Url};

use crate::endpoints::EndpointFamily;
use crate::error::RegionError;
use crate::normalize::normalize_regions;

const DEFAULT_PRIMARY_URL: &str = "https://provinces.open-api.vn";
const DEFAULT_FALLBACK_URL: &str = "https://esgoo.net";

/// Client over a primary and a fallback [`EndpointFamily`].
///
/// Use [`RegionClient::new`] for the public providers or
/// [`RegionClient::with_base_urls`] to point both families at mock servers.
#[derive(Debug, Clone)]
pub struct RegionClient {
    client: Client,
    primary: EndpointFamily,
    fallback: EndpointFamily,
}

impl RegionClient {
    /// Creates a client pointed at the public providers.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, RegionError> {
        Self::with_base_urls(
            DEFAULT_PRIMARY_URL,
            DEFAULT_FALLBACK_URL,
            timeout_secs,
            user_agent,
        )
    }

    /// Creates a client from the `CEMENTLIFE_REGIONS_*` settings.
    ///
    /// # Errors
    ///
    /// Same as [`RegionClient::with_base_urls`].
    pub fn from_config(
        config: &RegionEndpointsConfig,
        user_agent: &str,
    ) -> Result<Self, RegionError> {
        Self::with_base_urls(
            &config.primary_url,
            &config.fallback_url,
            config.timeout_secs,
            user_agent,
        )
    }

    /// Creates a client with custom base URLs (for testing with wiremock).
    /// The primary uses the open-api path layout, the fallback the esgoo one.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`RegionError::InvalidUrl`] if a base URL does not
    /// parse.
    pub fn with_base_urls(
        primary_url: &str,
        fallback_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, RegionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            primary: EndpointFamily::open_api(primary_url)?,
            fallback: EndpointFamily::esgoo(fallback_url)?,
        })
    }

    /// Looks up the options for `level` under `parent`.
    ///
    /// With `family` unset the primary is tried first and the fallback once
    /// after it. With `family` set only that family is asked. The returned
    /// list records which family answered; it is empty with no source when
    /// every attempt failed.
    pub async fn lookup(
        &self,
        level: RegionLevel,
        parent: Option<&RegionId>,
        family: Option<RegionSource>,
    ) -> RegionList {
        let attempts: Vec<(RegionSource, &EndpointFamily)> = match family {
            Some(RegionSource::Primary) => vec![(RegionSource::Primary, &self.primary)],
            Some(RegionSource::Fallback) => vec![(RegionSource::Fallback, &self.fallback)],
            None => vec![
                (RegionSource::Primary, &self.primary),
                (RegionSource::Fallback, &self.fallback),
            ],
        };

        for (source, endpoints) in attempts {
            match self.fetch(endpoints, level, parent).await {
                Ok(entries) => {
                    if entries.is_empty() {
                        tracing::debug!(
                            endpoint = endpoints.name(),
                            %level,
                            parent = ?parent,
                            "region lookup returned no entries"
                        );
                    }
                    return RegionList::from_source(source, entries);
                }
                Err(e) => {
                    tracing::warn!(
                        endpoint = endpoints.name(),
                        %level,
                        parent = ?parent,
                        error = %e,
                        "region lookup failed"
                    );
                }
            }
        }

        tracing::warn!(%level, parent = ?parent, "all region endpoints failed; offering no options");
        RegionList::default()
    }

    async fn fetch(
        &self,
        endpoints: &EndpointFamily,
        level: RegionLevel,
        parent: Option<&RegionId>,
    ) -> Result<Vec<RegionEntry>, RegionError> {
        let url = endpoints.url_for(level, parent)?;
        let body = self.request_json(&url).await?;
        normalize_regions(&body).ok_or_else(|| RegionError::UnexpectedShape {
            url: url.to_string(),
        })
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the response
    /// body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::Http`] on network failure or a non-2xx status.
    /// Returns [`RegionError::Deserialize`] if the body is not valid JSON.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, RegionError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| RegionError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}

impl RegionLookup for RegionClient {
    async fn provinces(&self) -> RegionList {
        self.lookup(RegionLevel::Province, None, None).await
    }

    async fn districts(&self, province: &RegionId, family: Option<RegionSource>) -> RegionList {
        self.lookup(RegionLevel::District, Some(province), family)
            .await
    }

    async fn wards(&self, district: &RegionId, family: Option<RegionSource>) -> RegionList {
        self.lookup(RegionLevel::Ward, Some(district), family).await
    }
}
