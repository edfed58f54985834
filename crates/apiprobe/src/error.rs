/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! Error types for a probe run.
//!
//! Every variant is fatal for the run. A response that parses but carries no
//! usable sample is not an error; it is reported as
//! [`ApiServerStatus::Unknown`](crate::interpret::ApiServerStatus::Unknown).

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that end a probe run.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Settings or environment file could not be loaded
    #[error("Error loading configuration: {0}")]
    Config(#[from] config::ConfigError),

    /// HTTP client or request could not be constructed
    #[error("Error creating request: {0}")]
    RequestBuild(#[source] reqwest::Error),

    /// Connection, TLS, timeout or body read failure
    #[error("Error sending request: {0}")]
    Transport(#[source] reqwest::Error),

    /// The endpoint answered 403
    #[error("Received 403 Forbidden: You do not have the necessary permissions to access this resource.")]
    Forbidden,

    /// The endpoint answered anything other than 200 or 403
    #[error("Request failed with status: {0}")]
    UnexpectedStatus(StatusCode),

    /// Body is not a query result
    #[error("Error parsing JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ProbeError {
    /// Whether the run was cut off by the request timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ProbeError::Transport(e) if e.is_timeout())
    }
}
