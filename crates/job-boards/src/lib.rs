// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Job board integrations
//!
//! This crate implements the [`board_client::Provider`] contract for the supported job
//! boards and wires each one to an HTTP transport.
//!
//! # Architecture
//!
//! - **Providers**: [`github`], [`the_muse`] - endpoint tables, parameter rules and
//!   response envelopes of each job board
//! - **Client**: [`client::JobBoardClient`] - validates a query, then fetches it
//! - **Registry**: [`registry::JobBoardRegistry`] - one client per provider, built from
//!   [`config::JobBoardsConfig`]
//! - **Transport**: [`fetch::HttpFetcher`] - reqwest with a per-request timeout
//!
//! # Example
//!
//! ```no_run
//! use board_client::Query;
//! use job_boards::{JobBoardClient, TheMuse};
//!
//! # async fn run() -> Result<(), board_client::ApiError> {
//! let client = JobBoardClient::new(TheMuse::default())?;
//! client.set_auth_token("my-api-key")?;
//!
//! let query = Query::new().with("page", 1).with("location", "New York, NY");
//! let response = client.search("jobs", query).await?;
//! for job in client.iterate(&response)? {
//!     println!("{}", job["name"]);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod fetch;
pub mod github;
pub mod non_empty_string;
pub mod registry;
pub mod the_muse;

pub use client::JobBoardClient;
pub use config::*;
pub use fetch::{DEFAULT_USER_AGENT, HttpFetcher};
pub use github::Github;
pub use non_empty_string::NonEmptyString;
pub use registry::*;
pub use the_muse::{API_KEY_PARAM, TheMuse};
