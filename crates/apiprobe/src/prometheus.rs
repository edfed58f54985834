/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! # Query Client
//!
//! Issues the single authenticated instant query against the metrics backend.
//!
//! ## Core Functions
//!
//! ```rust,ignore
//! pub fn build_client(timeout: Duration, skip_certificate_verification: bool) -> Result<Client, ProbeError>
//! pub fn build_request(client: &Client, endpoint: &str, token: &str, query: &str) -> Result<Request, ProbeError>
//! pub async fn execute(client: &Client, request: Request) -> Result<Vec<u8>, ProbeError>
//! ```
//!
//! ## Status Handling
//!
//! - `200`: body is returned
//! - `403`: [`ProbeError::Forbidden`]
//! - anything else: [`ProbeError::UnexpectedStatus`]
//!
//! ## Certificate Verification
//!
//! Verification is on unless `skip_certificate_verification` is set. Turning it
//! off lets the probe talk to cluster-internal endpoints with self-signed
//! certificates, at the cost of accepting any certificate, including one
//! presented by an impostor.

use crate::error::ProbeError;
use apiprobe_utils::logging::prelude::*;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Request, StatusCode};
use std::time::Duration;

/// Series whose latest value tells whether the API server is scraped successfully.
pub const APISERVER_UP_QUERY: &str = r#"up{job="apiserver"}"#;

/// Creates the HTTP client used for the query.
///
/// # Arguments
/// * `timeout` - Bound covering connect, request and body read
/// * `skip_certificate_verification` - Accept any TLS certificate
pub fn build_client(
    timeout: Duration,
    skip_certificate_verification: bool,
) -> Result<Client, ProbeError> {
    if skip_certificate_verification {
        warn!("TLS certificate verification is disabled for the query endpoint");
    }

    Client::builder()
        .timeout(timeout)
        .danger_accept_invalid_certs(skip_certificate_verification)
        .build()
        .map_err(ProbeError::RequestBuild)
}

/// Builds the authenticated GET request for `query`.
///
/// Nothing is sent. An empty or relative `endpoint` fails here.
pub fn build_request(
    client: &Client,
    endpoint: &str,
    token: &str,
    query: &str,
) -> Result<Request, ProbeError> {
    client
        .get(endpoint)
        .query(&[("query", query)])
        .header(AUTHORIZATION, format!("Bearer {}", token))
        .build()
        .map_err(ProbeError::RequestBuild)
}

/// Sends `request` and returns the body of a 200 response.
///
/// The response is consumed or dropped before returning on every path.
pub async fn execute(client: &Client, request: Request) -> Result<Vec<u8>, ProbeError> {
    debug!("Sending query to {}", request.url());

    let response = client
        .execute(request)
        .await
        .map_err(ProbeError::Transport)?;

    match response.status() {
        StatusCode::OK => {
            info!("Received 200 OK: Request successful.");
        }
        StatusCode::FORBIDDEN => return Err(ProbeError::Forbidden),
        status => return Err(ProbeError::UnexpectedStatus(status)),
    }

    let body = response.bytes().await.map_err(ProbeError::Transport)?;
    debug!("Read {} byte response body", body.len());
    Ok(body.to_vec())
}
