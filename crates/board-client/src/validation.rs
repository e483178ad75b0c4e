// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Request validation engine
//!
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. the provider's cross-field rules,
//! 2. membership of every supplied name in the endpoint's accepted set,
//! 3. presence of every required name.
//!
//! All checks are synchronous and happen before any request is built.

use tracing::debug;

use crate::{ApiError, Endpoint, ParameterSchema, Provider, Query};

/// Validate `query` for a search on `endpoint` of `provider`
///
/// # Errors
///
/// - [`ApiError::UnresolvableEndpoint`] if `endpoint` is a lookup endpoint
/// - [`ApiError::CrossFieldValidation`] for the first violated provider rule
/// - [`ApiError::UnsupportedField`] for the first name outside the accepted set
/// - [`ApiError::MissingRequiredParameter`] for the first absent required name
pub fn validate<P>(provider: &P, endpoint: &Endpoint, query: &Query) -> Result<(), ApiError>
where
    P: Provider + ?Sized,
{
    let schema = endpoint
        .schema()
        .ok_or_else(|| ApiError::UnresolvableEndpoint {
            provider: provider.id(),
            endpoint: endpoint.name.to_string(),
            operation: "search",
        })?;

    check_cross_field_rules(provider, query)?;
    check_supported_fields(provider, endpoint.name, schema, query)?;
    check_required_parameters(provider, endpoint.name, schema, query)
}

fn check_cross_field_rules<P>(provider: &P, query: &Query) -> Result<(), ApiError>
where
    P: Provider + ?Sized,
{
    for rule in provider.cross_field_rules() {
        if let Err(message) = rule.check(query) {
            debug!(provider = %provider.id(), rule = rule.name, "cross-field rule violated");
            return Err(ApiError::CrossFieldValidation {
                provider: provider.id(),
                message,
            });
        }
    }
    Ok(())
}

fn check_supported_fields<P>(
    provider: &P,
    endpoint: &str,
    schema: &ParameterSchema,
    query: &Query,
) -> Result<(), ApiError>
where
    P: Provider + ?Sized,
{
    let auth_param = provider.auth_param();
    match query
        .keys()
        .find(|field| !schema.accepts(field) && auth_param != Some(*field))
    {
        Some(field) => {
            debug!(provider = %provider.id(), endpoint, field, "unsupported field");
            Err(ApiError::UnsupportedField {
                provider: provider.id(),
                endpoint: endpoint.to_string(),
                field: field.to_string(),
            })
        }
        None => Ok(()),
    }
}

fn check_required_parameters<P>(
    provider: &P,
    endpoint: &str,
    schema: &ParameterSchema,
    query: &Query,
) -> Result<(), ApiError>
where
    P: Provider + ?Sized,
{
    match schema.required.iter().find(|name| !query.contains(name)) {
        Some(parameter) => {
            debug!(provider = %provider.id(), endpoint, parameter, "missing required parameter");
            Err(ApiError::MissingRequiredParameter {
                provider: provider.id(),
                endpoint: endpoint.to_string(),
                parameter: (*parameter).to_string(),
                message: provider.missing_parameter_message(parameter),
            })
        }
        None => Ok(()),
    }
}
