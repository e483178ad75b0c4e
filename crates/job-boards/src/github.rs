// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Github Jobs provider
//!
//! Github Jobs shares one parameter vocabulary across its search endpoint, requires no
//! parameter, but constrains the coordinate fields: `lat` and `long` go together and
//! exclude `location`. Responses are bare JSON arrays of positions.

use board_client::{
    ApiError, CrossFieldRule, Endpoint, Listings, ParameterSchema, Provider, Query, RawResponse,
};
use shared_types::ProviderId;
use url::Url;

const LATITUDE: &str = "lat";
const LONGITUDE: &str = "long";
const LOCATION: &str = "location";

const FIELDS: &[&str] = &[
    "description",
    LOCATION,
    LATITUDE,
    LONGITUDE,
    "full_time",
    "page",
];

static ENDPOINTS: &[Endpoint] = &[
    Endpoint::search("jobs", "positions.json", ParameterSchema::new(FIELDS, &[])),
    Endpoint::lookup("job_id", "positions", ".json"),
];

static RULES: &[CrossFieldRule] = &[
    CrossFieldRule::new("coordinates-paired", coordinates_paired),
    CrossFieldRule::new("coordinates-exclude-location", coordinates_exclude_location),
];

fn coordinates_paired(query: &Query) -> Result<(), String> {
    if query.contains(LATITUDE) != query.contains(LONGITUDE) {
        return Err(
            "If latitude or longitude is provided, you must also provide the other as a parameter."
                .to_string(),
        );
    }
    Ok(())
}

fn coordinates_exclude_location(query: &Query) -> Result<(), String> {
    if (query.contains(LATITUDE) || query.contains(LONGITUDE)) && query.contains(LOCATION) {
        return Err(
            "If latitude and longitude parameters are provided, you must NOT additionally include a location parameter."
                .to_string(),
        );
    }
    Ok(())
}

/// Github Jobs endpoint table and rules
#[derive(Debug, Clone)]
pub struct Github {
    base_url: Url,
}

impl Github {
    /// Create the provider against a custom base URL
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] if the URL does not parse
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url).map_err(|e| ApiError::Configuration {
            message: format!("invalid Github base URL {base_url}: {e}"),
        })?;
        Ok(Self::with_base_url(base_url))
    }

    /// Create the provider from an already parsed base URL
    pub fn with_base_url(base_url: Url) -> Self {
        Self { base_url }
    }
}

impl Default for Github {
    #[allow(clippy::missing_panics_doc)]
    fn default() -> Self {
        Self::new(ProviderId::Github.default_base_url()).expect("static URL is valid")
    }
}

impl Provider for Github {
    fn id(&self) -> ProviderId {
        ProviderId::Github
    }

    fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoints(&self) -> &'static [Endpoint] {
        ENDPOINTS
    }

    fn cross_field_rules(&self) -> &'static [CrossFieldRule] {
        RULES
    }

    fn listings<'r>(&self, response: &'r RawResponse) -> Result<Listings<'r>, ApiError> {
        Listings::from_array(response.as_value()).ok_or(ApiError::UnexpectedEnvelope {
            provider: self.id(),
            expected: "a JSON array of positions",
        })
    }
}
