// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! The Muse provider
//!
//! The Muse declares a separate vocabulary for each collection (`jobs`, `companies`,
//! `posts`, `coaches`) and requires an explicit `page` on every search. Each
//! collection has a singular lookup endpoint (`job_id`, `company_id`, ...). Responses
//! wrap the records in a `results` array.
//!
//! An API key is optional. Once set it is sent as `api_key` with every request.

use std::{
    fmt,
    sync::{PoisonError, RwLock},
};

use board_client::{
    ApiError, Authenticated, Endpoint, Listings, ParameterSchema, Provider, RawResponse,
};
use shared_types::ProviderId;
use tracing::info;
use url::Url;

use crate::NonEmptyString;

/// Query key carrying the API key
pub const API_KEY_PARAM: &str = "api_key";

const PAGE: &str = "page";
const RESULTS_FIELD: &str = "results";

static ENDPOINTS: &[Endpoint] = &[
    Endpoint::search(
        "jobs",
        "jobs",
        ParameterSchema::new(
            &[PAGE, "descending", "company", "category", "level", "location"],
            &[PAGE],
        ),
    ),
    Endpoint::lookup("job_id", "jobs", ""),
    Endpoint::search(
        "companies",
        "companies",
        ParameterSchema::new(
            &[PAGE, "descending", "industry", "size", "location"],
            &[PAGE],
        ),
    ),
    Endpoint::lookup("company_id", "companies", ""),
    Endpoint::search(
        "posts",
        "posts",
        ParameterSchema::new(&[PAGE, "descending", "tag"], &[PAGE]),
    ),
    Endpoint::lookup("post_id", "posts", ""),
    Endpoint::search(
        "coaches",
        "coaches",
        ParameterSchema::new(
            &[PAGE, "descending", "offering", "level", "specialization"],
            &[PAGE],
        ),
    ),
    Endpoint::lookup("coach_id", "coaches", ""),
];

/// The Muse endpoint tables and API key
pub struct TheMuse {
    base_url: Url,
    api_key: RwLock<Option<NonEmptyString>>,
}

impl TheMuse {
    /// Create the provider against a custom base URL
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] if the URL does not parse
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url).map_err(|e| ApiError::Configuration {
            message: format!("invalid The Muse base URL {base_url}: {e}"),
        })?;
        Ok(Self::with_base_url(base_url))
    }

    /// Create the provider from an already parsed base URL
    pub fn with_base_url(base_url: Url) -> Self {
        Self {
            base_url,
            api_key: RwLock::new(None),
        }
    }

    /// Whether an API key is currently set
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl Default for TheMuse {
    #[allow(clippy::missing_panics_doc)]
    fn default() -> Self {
        Self::new(ProviderId::TheMuse.default_base_url()).expect("static URL is valid")
    }
}

impl fmt::Debug for TheMuse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TheMuse")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &self.has_api_key().then_some("<redacted>"))
            .finish()
    }
}

impl Provider for TheMuse {
    fn id(&self) -> ProviderId {
        ProviderId::TheMuse
    }

    fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoints(&self) -> &'static [Endpoint] {
        ENDPOINTS
    }

    fn auth_param(&self) -> Option<&'static str> {
        Some(API_KEY_PARAM)
    }

    fn auth_token(&self) -> Option<String> {
        self.api_key
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|key| key.as_str().to_string())
    }

    fn missing_parameter_message(&self, parameter: &str) -> String {
        if parameter == PAGE {
            "The page number must be supplied as a parameter.".to_string()
        } else {
            format!("The {parameter} parameter must be supplied.")
        }
    }

    fn listings<'r>(&self, response: &'r RawResponse) -> Result<Listings<'r>, ApiError> {
        Listings::from_field(response.as_value(), RESULTS_FIELD).ok_or(
            ApiError::UnexpectedEnvelope {
                provider: self.id(),
                expected: "an object with a results array",
            },
        )
    }
}

impl Authenticated for TheMuse {
    fn set_auth_token(&self, token: &str) -> Result<(), ApiError> {
        let key = NonEmptyString::new(token)
            .map_err(|message| ApiError::InvalidArgument { message })?;
        *self.api_key.write().unwrap_or_else(PoisonError::into_inner) = Some(key);
        info!(provider = %self.id(), "API key set");
        Ok(())
    }

    fn clear_auth_token(&self) {
        *self.api_key.write().unwrap_or_else(PoisonError::into_inner) = None;
        info!(provider = %self.id(), "API key cleared");
    }
}
