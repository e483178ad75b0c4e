// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Endpoint descriptors, rules and response types shared by all providers

use std::{iter::FusedIterator, slice};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Query;

/// One job, company, post or coach returned by a provider
///
/// Providers disagree on fields, so records stay untyped JSON.
pub type ListingRecord = Value;

/// Accepted and required parameter names of a search endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterSchema {
    /// Every parameter name the endpoint understands
    pub accepted: &'static [&'static str],
    /// Names that must be present on every query; a subset of `accepted`
    pub required: &'static [&'static str],
}

impl ParameterSchema {
    /// Create a schema from static name tables
    pub const fn new(accepted: &'static [&'static str], required: &'static [&'static str]) -> Self {
        Self { accepted, required }
    }

    /// Whether `name` is an accepted parameter
    pub fn accepts(&self, name: &str) -> bool {
        self.accepted.contains(&name)
    }
}

/// What an endpoint is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointKind {
    /// Free-form search validated against a schema
    Search(ParameterSchema),
    /// Single entity by identifier, `{path}/{id}{suffix}`
    Lookup {
        /// Appended to the identifier, e.g. `.json`
        suffix: &'static str,
    },
}

/// Entry of a provider's endpoint table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    /// Name callers use, e.g. `jobs` or `job_id`
    pub name: &'static str,
    /// Path relative to the provider base URL
    pub path: &'static str,
    /// Search or lookup
    pub kind: EndpointKind,
}

impl Endpoint {
    /// Declare a search endpoint
    pub const fn search(name: &'static str, path: &'static str, schema: ParameterSchema) -> Self {
        Self {
            name,
            path,
            kind: EndpointKind::Search(schema),
        }
    }

    /// Declare a lookup-by-id endpoint
    pub const fn lookup(name: &'static str, path: &'static str, suffix: &'static str) -> Self {
        Self {
            name,
            path,
            kind: EndpointKind::Lookup { suffix },
        }
    }

    /// Parameter schema of a search endpoint
    pub fn schema(&self) -> Option<&ParameterSchema> {
        match &self.kind {
            EndpointKind::Search(schema) => Some(schema),
            EndpointKind::Lookup { .. } => None,
        }
    }
}

/// A relational constraint over the whole query of a provider
///
/// The check returns a description of the violated relationship.
#[derive(Debug, Clone, Copy)]
pub struct CrossFieldRule {
    /// Short identifier used in logs
    pub name: &'static str,
    check: fn(&Query) -> Result<(), String>,
}

impl CrossFieldRule {
    /// Create a named rule
    pub const fn new(name: &'static str, check: fn(&Query) -> Result<(), String>) -> Self {
        Self { name, check }
    }

    /// Evaluate the rule
    ///
    /// # Errors
    ///
    /// Returns the violation description if the query breaks the rule
    pub fn check(&self, query: &Query) -> Result<(), String> {
        (self.check)(query)
    }
}

/// Parsed body of a provider response, in whatever shape the provider uses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawResponse(Value);

impl RawResponse {
    /// Wrap a parsed body
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Borrow the JSON value
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Take the JSON value
    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl From<Value> for RawResponse {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Lazy iterator over the records of one fetched response
///
/// It never fetches: iterating again means calling [`crate::Provider::listings`] on the
/// same response.
#[derive(Debug, Clone)]
pub struct Listings<'r> {
    records: slice::Iter<'r, ListingRecord>,
}

impl<'r> Listings<'r> {
    /// Iterate over a slice of records
    pub fn new(records: &'r [ListingRecord]) -> Self {
        Self {
            records: records.iter(),
        }
    }

    /// Iterate a bare JSON array
    pub fn from_array(value: &'r Value) -> Option<Self> {
        value.as_array().map(|records| Self::new(records))
    }

    /// Iterate the array held in `field` of a JSON object
    pub fn from_field(value: &'r Value, field: &str) -> Option<Self> {
        value
            .get(field)
            .and_then(Value::as_array)
            .map(|records| Self::new(records))
    }
}

impl<'r> Iterator for Listings<'r> {
    type Item = &'r ListingRecord;

    fn next(&mut self) -> Option<Self::Item> {
        self.records.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.records.size_hint()
    }
}

impl ExactSizeIterator for Listings<'_> {}

impl FusedIterator for Listings<'_> {}
