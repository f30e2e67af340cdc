//! Endpoint families: one base URL plus a path template per region level.
//! `{id}` in a template is replaced by the percent-encoded parent id.

use cementlife_core::{RegionId, RegionLevel};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::Url;

use crate::error::RegionError;

const ID_PLACEHOLDER: &str = "{id}";

#[derive(Debug, Clone)]
pub struct EndpointFamily {
    name: &'static str,
    base_url: Url,
    provinces: &'static str,
    districts: &'static str,
    wards: &'static str,
}

impl EndpointFamily {
    /// `provinces.open-api.vn` layout: a bare province list, then each parent
    /// fetched with `depth=2` so its children come back under `districts` or
    /// `wards`.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::InvalidUrl`] if `base_url` does not parse.
    pub fn open_api(base_url: &str) -> Result<Self, RegionError> {
        Ok(Self {
            name: "open-api",
            base_url: normalise_base(base_url)?,
            provinces: "api/p/",
            districts: "api/p/{id}?depth=2",
            wards: "api/d/{id}?depth=2",
        })
    }

    /// `esgoo.net` layout: every level answers `{"error": 0, "data": [...]}`.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::InvalidUrl`] if `base_url` does not parse.
    pub fn esgoo(base_url: &str) -> Result<Self, RegionError> {
        Ok(Self {
            name: "esgoo",
            base_url: normalise_base(base_url)?,
            provinces: "api-tinhthanh/1/0.htm",
            districts: "api-tinhthanh/2/{id}.htm",
            wards: "api-tinhthanh/3/{id}.htm",
        })
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Full URL for `level`, with `parent` substituted into the template.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::InvalidUrl`] if the joined URL does not parse.
    pub fn url_for(&self, level: RegionLevel, parent: Option<&RegionId>) -> Result<Url, RegionError> {
        let template = match level {
            RegionLevel::Province => self.provinces,
            RegionLevel::District => self.districts,
            RegionLevel::Ward => self.wards,
        };
        let encoded = parent
            .map(|id| utf8_percent_encode(&id.to_string(), NON_ALPHANUMERIC).to_string())
            .unwrap_or_default();
        let path = template.replace(ID_PLACEHOLDER, &encoded);

        self.base_url
            .join(&path)
            .map_err(|e| RegionError::InvalidUrl {
                url: format!("{}{path}", self.base_url),
                reason: e.to_string(),
            })
    }
}

/// Ensure the base URL ends with exactly one slash so relative templates are
/// appended rather than replacing the last path segment.
fn normalise_base(base_url: &str) -> Result<Url, RegionError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| RegionError::InvalidUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })
}
