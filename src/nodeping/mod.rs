//! NodePing API access.
//!
//! The exporter only depends on the [`CheckSource`] trait; [`NodePingClient`]
//! is the implementation that talks to the real API.

mod client;
mod models;

#[cfg(test)]
pub mod fake;

pub use client::*;
pub use models::*;

use std::collections::HashMap;
use std::future::Future;
use thiserror::Error;

/// Errors returned by a check source.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SourceError {
    #[error("request to {url} failed: {reason}")]
    Unavailable { url: String, reason: String },
    #[error("can't access {url} with provided token")]
    Auth { url: String },
    #[error("can't decode body received from {url}: {reason}")]
    Decode { url: String, reason: String },
    #[error("no results returned for check {0}")]
    EmptyResult(String),
}

/// Errors that refuse construction of a [`NodePingClient`].
#[derive(Error, Debug)]
pub enum ConnectError {
    #[error("token should be specified")]
    MissingToken,
    #[error("invalid API URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    #[error("can't proceed initial check: {0}")]
    Verification(#[source] SourceError),
}

/// Something that knows the monitored checks and their latest results.
pub trait CheckSource: Send + Sync {
    /// All checks keyed by identifier.
    fn list_checks(
        &self,
    ) -> impl Future<Output = Result<HashMap<String, Check>, SourceError>> + Send;

    /// The most recent result of one check.
    fn latest_result(
        &self,
        check_id: &str,
    ) -> impl Future<Output = Result<CheckResult, SourceError>> + Send;

    /// Cheap call confirming the credentials are accepted.
    fn verify_access(&self) -> impl Future<Output = Result<(), SourceError>> + Send;
}
