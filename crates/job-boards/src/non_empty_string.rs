// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Non-empty string validation utilities
//!
//! [`NonEmptyString`] guarantees at construction that a value has at least one
//! non-whitespace character. The client uses it for authentication tokens and the
//! outgoing user agent, where an empty string would silently produce a broken request.
//!
//! ```rust
//! use job_boards::NonEmptyString;
//!
//! let token = NonEmptyString::new("muse-api-key").expect("valid token");
//! assert_eq!(token.as_str(), "muse-api-key");
//!
//! assert!(NonEmptyString::new("").is_err());
//! assert!(NonEmptyString::new(" \t\n").is_err());
//! ```
//!
//! It deserializes from a plain string, so configuration structs can hold it directly
//! and reject blank values while loading.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A string with at least one non-whitespace character
///
/// Leading and trailing whitespace is kept as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NonEmptyString(Box<str>);

impl NonEmptyString {
    /// Create a new `NonEmptyString`
    ///
    /// # Errors
    ///
    /// Returns a description of the problem if the value is empty or whitespace-only
    pub fn new(s: impl Into<String>) -> Result<Self, String> {
        let s = s.into();
        if s.trim().is_empty() {
            Err("String cannot be empty or whitespace-only".to_string())
        } else {
            Ok(NonEmptyString(s.into_boxed_str()))
        }
    }

    /// Get a string slice of the contained value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NonEmptyString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NonEmptyString {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for NonEmptyString {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0.into_string()
    }
}

impl AsRef<str> for NonEmptyString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
