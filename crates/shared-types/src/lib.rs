// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Shared types for the job boards client
//!
//! This crate provides types that are shared across the crates of the job boards
//! workspace, avoiding circular dependencies.

pub mod providers;

pub use providers::{ProviderId, ProviderIdParseError};
